//! Serial LED interface descriptors.
//!
//! CMICx-class devices have five LED serial interfaces. Each one shifts out a
//! contiguous row range of the pattern RAM, `pattern_width` bits per row.

/// Number of hardware LED interfaces.
pub const LED_HW_INTF_MAX_NUM: usize = 5;

/// Bits sent per pattern row on the reference board.
pub const LED_SEND_DATA_WIDTH: u8 = 2;

/// A contiguous, inclusive range of pattern rows sent on one interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InterfaceRange {
    pub start_row: u16,
    pub end_row: u16,
    pub pattern_width: u8,
}

impl InterfaceRange {
    /// Creates a new range.
    #[inline]
    pub const fn new(start_row: u16, end_row: u16, pattern_width: u8) -> Self {
        Self {
            start_row,
            end_row,
            pattern_width,
        }
    }

    /// True if `row` falls inside the range.
    #[inline]
    pub const fn contains(&self, row: u16) -> bool {
        self.start_row <= row && row <= self.end_row
    }

    /// True if the two ranges share at least one row.
    #[inline]
    pub const fn overlaps(&self, other: &InterfaceRange) -> bool {
        self.start_row <= other.end_row && other.start_row <= self.end_row
    }
}

/// Control block of one LED interface as seen by the LED firmware.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LedInterface {
    pub valid: bool,
    pub start_row: u16,
    pub end_row: u16,
    pub pattern_width: u8,
}

impl LedInterface {
    /// An interface that sends nothing.
    pub const DISABLED: LedInterface = LedInterface {
        valid: false,
        start_row: 0,
        end_row: 0,
        pattern_width: 0,
    };

    /// An enabled interface covering `range`.
    pub const fn enabled(range: InterfaceRange) -> Self {
        Self {
            valid: true,
            start_row: range.start_row,
            end_row: range.end_row,
            pattern_width: range.pattern_width,
        }
    }
}

/// The full set of interface control blocks.
pub type InterfaceTable = [LedInterface; LED_HW_INTF_MAX_NUM];

/// Fills every slot of `table`: the first `ranges.len()` slots are enabled
/// with the given ranges, the rest are disabled.
pub fn assign_interfaces(table: &mut InterfaceTable, ranges: &[InterfaceRange]) {
    for (idx, intf) in table.iter_mut().enumerate() {
        *intf = match ranges.get(idx) {
            Some(range) => LedInterface::enabled(*range),
            None => LedInterface::DISABLED,
        };
    }
}
