//! Hardware memory abstraction traits.
//!
//! The LED microcontroller exposes two 1024x16-bit RAM banks (accumulation
//! and pattern) plus a 1024-byte control data array. Implement these traits
//! over the memory-mapped banks on target; slices and arrays implement them
//! for host use.

use crate::status::{LaneControl, PortStatus};

/// Rows in each LED RAM bank.
pub const LED_RAM_ROWS: usize = 1024;

/// Read access to the accumulation RAM (bank 0).
pub trait AccumulationMemory {
    /// Returns the status word of a hardware port row.
    fn read_status(&self, row: u16) -> PortStatus;
}

/// Read access to the control data array shared with the host.
pub trait ControlData {
    /// Returns the control byte of a hardware port row.
    fn lane_control(&self, row: u16) -> LaneControl;
}

/// Write access to the pattern RAM (bank 1).
pub trait PatternMemory {
    /// Writes one pattern word.
    fn write_pattern(&mut self, row: u16, word: u16);
}

// Rows past the end of a short slice read as zero and drop writes.

impl AccumulationMemory for [u16] {
    fn read_status(&self, row: u16) -> PortStatus {
        PortStatus(self.get(usize::from(row)).copied().unwrap_or(0))
    }
}

impl<const N: usize> AccumulationMemory for [u16; N] {
    fn read_status(&self, row: u16) -> PortStatus {
        self.as_slice().read_status(row)
    }
}

impl ControlData for [u8] {
    fn lane_control(&self, row: u16) -> LaneControl {
        LaneControl(self.get(usize::from(row)).copied().unwrap_or(0))
    }
}

impl<const N: usize> ControlData for [u8; N] {
    fn lane_control(&self, row: u16) -> LaneControl {
        self.as_slice().lane_control(row)
    }
}

impl PatternMemory for [u16] {
    fn write_pattern(&mut self, row: u16, word: u16) {
        if let Some(slot) = self.get_mut(usize::from(row)) {
            *slot = word;
        }
    }
}

impl<const N: usize> PatternMemory for [u16; N] {
    fn write_pattern(&mut self, row: u16, word: u16) {
        self.as_mut_slice().write_pattern(row, word);
    }
}

impl<T: AccumulationMemory + ?Sized> AccumulationMemory for &T {
    fn read_status(&self, row: u16) -> PortStatus {
        (**self).read_status(row)
    }
}

impl<T: ControlData + ?Sized> ControlData for &T {
    fn lane_control(&self, row: u16) -> LaneControl {
        (**self).lane_control(row)
    }
}

impl<T: PatternMemory + ?Sized> PatternMemory for &mut T {
    fn write_pattern(&mut self, row: u16, word: u16) {
        (**self).write_pattern(row, word);
    }
}
