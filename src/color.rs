//! LED color codes and their blink variants.
//!
//! The serial LED interface shifts out a 2-bit pattern per port. Steady
//! colors are the raw bit patterns; blink variants carry `0xF0` in the high
//! nibble and only exist while the composer is merging lanes. They are
//! always resolved to a steady color before being written to pattern memory.

use palette::{FromColor, Hsv, Srgb};

/// Bit pattern for a green LED.
pub const LED_BIT_GREEN: u8 = 0b00;
/// Bit pattern for an amber LED.
pub const LED_BIT_AMBER: u8 = 0b01;
/// Bit pattern for an unlit LED.
pub const LED_BIT_BLACK: u8 = 0b11;
/// Marker nibble of blink variants.
pub const LED_BLINK_MARK: u8 = 0xF0;

// Preview hues, in degrees
const GREEN_HUE: f32 = 120.0;
const AMBER_HUE: f32 = 45.0;

/// The color of one port LED.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LedColor {
    Green,
    Amber,
    #[default]
    Black,
    /// Green alternating with black.
    BlinkGreen,
    /// Amber alternating with black.
    BlinkAmber,
}

impl LedColor {
    /// Returns the 8-bit code used by the LED firmware.
    pub const fn code(self) -> u8 {
        match self {
            LedColor::Green => LED_BIT_GREEN,
            LedColor::Amber => LED_BIT_AMBER,
            LedColor::Black => LED_BIT_BLACK,
            LedColor::BlinkGreen => LED_BLINK_MARK | LED_BIT_GREEN,
            LedColor::BlinkAmber => LED_BLINK_MARK | LED_BIT_AMBER,
        }
    }

    /// Decodes an 8-bit color code. Unassigned codes yield `None`.
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            LED_BIT_GREEN => Some(LedColor::Green),
            LED_BIT_AMBER => Some(LedColor::Amber),
            LED_BIT_BLACK => Some(LedColor::Black),
            0xF0 => Some(LedColor::BlinkGreen),
            0xF1 => Some(LedColor::BlinkAmber),
            _ => None,
        }
    }

    /// Pattern memory word for this color.
    #[inline]
    pub const fn pattern_word(self) -> u16 {
        self.code() as u16
    }

    /// True for the blink variants.
    #[inline]
    pub const fn is_blink(self) -> bool {
        matches!(self, LedColor::BlinkGreen | LedColor::BlinkAmber)
    }

    /// Strips the blink marker.
    pub const fn steady(self) -> Self {
        match self {
            LedColor::BlinkGreen => LedColor::Green,
            LedColor::BlinkAmber => LedColor::Amber,
            other => other,
        }
    }

    /// Converts a color into its blink variant.
    ///
    /// Green blinks green and everything else blinks amber, so traffic on a
    /// port whose link is down still shows on the panel.
    pub const fn blink(self) -> Self {
        match self {
            LedColor::Green | LedColor::BlinkGreen => LedColor::BlinkGreen,
            LedColor::Amber | LedColor::Black | LedColor::BlinkAmber => LedColor::BlinkAmber,
        }
    }

    /// Resolves a blink variant for one tick: black inside the activity
    /// window, the steady color outside it. Steady colors pass through.
    pub const fn resolve(self, tick: u32, act_ticks: u32) -> Self {
        if !self.is_blink() {
            return self;
        }
        if in_activity_window(tick, act_ticks) {
            LedColor::Black
        } else {
            self.steady()
        }
    }

    /// sRGB approximation for front panel previews.
    ///
    /// Blink variants preview as their steady color.
    pub fn preview(self) -> Srgb {
        match self.steady() {
            LedColor::Green => Srgb::from_color(Hsv::new(GREEN_HUE, 1.0, 1.0)),
            LedColor::Amber => Srgb::from_color(Hsv::new(AMBER_HUE, 1.0, 1.0)),
            _ => Srgb::new(0.0, 0.0, 0.0),
        }
    }
}

/// True on ticks where activity blinks show black.
#[inline]
pub const fn in_activity_window(tick: u32, act_ticks: u32) -> bool {
    tick & act_ticks != 0
}

/// Merges a compression group into one representative color.
///
/// Folds left to right: black yields to anything, and a blink variant
/// replaces a differing steady color. An empty group is black.
pub fn fold_group(lanes: &[LedColor]) -> LedColor {
    let Some((&first, rest)) = lanes.split_first() else {
        return LedColor::Black;
    };

    rest.iter().fold(first, |merged, &lane| {
        if lane == merged {
            merged
        } else if merged == LedColor::Black || lane.is_blink() {
            lane
        } else {
            merged
        }
    })
}
