//! Shared test infrastructure for port-led-composer integration tests

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use port_led_composer::status::{LED_HW_LINK, LED_HW_RX, LED_HW_TX};
use port_led_composer::{
    HandlerCtrl, LED_RAM_ROWS, LaneControl, LaneSpeed, LedColor, PatternMemory, PortMap,
};

// ============================================================================
// Mock Pattern RAM
// ============================================================================

/// Pattern RAM that records how often each row was written
pub struct RecordingPatternRam {
    words: [u16; LED_RAM_ROWS],
    writes: [u32; LED_RAM_ROWS],
}

impl RecordingPatternRam {
    pub fn new() -> Self {
        Self {
            // Pre-fill with a code the composer never writes
            words: [0xDEAD; LED_RAM_ROWS],
            writes: [0; LED_RAM_ROWS],
        }
    }

    pub fn word(&self, row: u16) -> u16 {
        self.words[usize::from(row)]
    }

    pub fn color(&self, row: u16) -> Option<LedColor> {
        u8::try_from(self.word(row)).ok().and_then(LedColor::from_code)
    }

    pub fn write_count(&self, row: u16) -> u32 {
        self.writes[usize::from(row)]
    }

    pub fn total_writes(&self) -> u32 {
        self.writes.iter().sum()
    }

    pub fn reset_counts(&mut self) {
        self.writes = [0; LED_RAM_ROWS];
    }
}

impl PatternMemory for RecordingPatternRam {
    fn write_pattern(&mut self, row: u16, word: u16) {
        self.words[usize::from(row)] = word;
        self.writes[usize::from(row)] += 1;
    }
}

// ============================================================================
// Board Fixture
// ============================================================================

pub type TestCtrl = HandlerCtrl<[u16; LED_RAM_ROWS], [u8; LED_RAM_ROWS], RecordingPatternRam>;

/// Control block with every port down and idle
pub fn new_ctrl() -> TestCtrl {
    HandlerCtrl::new(
        [0u16; LED_RAM_ROWS],
        [0u8; LED_RAM_ROWS],
        RecordingPatternRam::new(),
    )
}

/// Hardware row of a logical port on the reference board
pub fn hw_row(lport: u16) -> usize {
    usize::from(PortMap::moonstone().hw_port(lport).unwrap())
}

/// Brings a logical port's link up at `speed` through the hardware link flag
pub fn set_link_up(ctrl: &mut TestCtrl, lport: u16, speed: LaneSpeed) {
    let row = hw_row(lport);
    ctrl.accu_ram[row] |= LED_HW_LINK;
    ctrl.control_data[row] = LaneControl::new(speed, false).raw();
}

/// Marks traffic on a logical port
pub fn set_activity(ctrl: &mut TestCtrl, lport: u16) {
    ctrl.accu_ram[hw_row(lport)] |= LED_HW_TX | LED_HW_RX;
}

/// Takes a logical port's link down and clears its traffic
pub fn set_link_down(ctrl: &mut TestCtrl, lport: u16) {
    let row = hw_row(lport);
    ctrl.accu_ram[row] = 0;
    ctrl.control_data[row] = 0;
}

/// Pattern row a front panel port is merged into (4 lanes per row)
pub fn group_row(lport: u16) -> u16 {
    (lport - 1) / 4 + 1
}

// Ticks on either side of the activity window (ACT_TICKS = 2)
pub const STEADY_TICK: u32 = 0;
pub const BLANK_TICK: u32 = 2;
