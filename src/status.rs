//! Port status decoding.
//!
//! The LED microcontroller accumulates one 16-bit status word per hardware
//! port and exposes one control byte per port that the host fills in through
//! the LED API. Both layouts are fixed by the hardware:
//!
//! ```text
//! Accumulation word
//!  15:9       8        7         6        5      4:3     2    1    0
//! | Reserved | Link  | Link-up |  Flow  | Duplex | Speed | Col | Tx | Rx |
//! |          | Enable| Status  | Control|        |       |     |    |    |
//!
//! Control byte
//!  7:4        3:1          0
//! | Unused | Lane speed | SW link-up |
//! ```

/// Hardware link flag. This is the bit the composer treats as "link up".
pub const LED_HW_LINK: u16 = 0x100;
/// Link-up status bit reported by the MAC.
pub const LED_HW_LINK_UP: u16 = 0x80;
/// Flow control enabled.
pub const LED_HW_FLOW_CONTROL: u16 = 0x40;
/// Full duplex.
pub const LED_HW_DUPLEX: u16 = 0x20;
/// Two-bit MAC speed code.
pub const LED_HW_SPEED_MASK: u16 = 0x18;
/// Shift of the MAC speed code.
pub const LED_HW_SPEED_SHIFT: u16 = 3;
/// Collision seen.
pub const LED_HW_COLLISION: u16 = 0x04;
/// Transmit activity.
pub const LED_HW_TX: u16 = 0x02;
/// Receive activity.
pub const LED_HW_RX: u16 = 0x01;

/// Software link-up flag in the control byte.
pub const LED_SW_LINK_UP: u8 = 0x01;
/// Mask of the lane speed field in the control byte, after shifting.
pub const LANE_SPEED_MASK: u8 = 0x07;
/// Shift of the lane speed field in the control byte.
pub const LANE_SPEED_SHIFT: u8 = 1;

/// Coarse MAC speed from the accumulation word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MacSpeed {
    /// 10 Mbps.
    Mbps10,
    /// 100 Mbps.
    Mbps100,
    /// 1 Gbps.
    Gbps1,
    /// Anything above 1 Gbps.
    Above1G,
}

/// One port's accumulation word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PortStatus(pub u16);

impl PortStatus {
    /// Wraps a raw accumulation word.
    #[inline]
    pub const fn new(raw: u16) -> Self {
        Self(raw)
    }

    /// Returns the raw word.
    #[inline]
    pub const fn raw(self) -> u16 {
        self.0
    }

    /// Hardware link flag (bit 8).
    #[inline]
    pub const fn link_enabled(self) -> bool {
        self.0 & LED_HW_LINK != 0
    }

    /// MAC link-up status (bit 7).
    #[inline]
    pub const fn link_up(self) -> bool {
        self.0 & LED_HW_LINK_UP != 0
    }

    /// Flow control enabled (bit 6).
    #[inline]
    pub const fn flow_control(self) -> bool {
        self.0 & LED_HW_FLOW_CONTROL != 0
    }

    /// Full duplex (bit 5).
    #[inline]
    pub const fn full_duplex(self) -> bool {
        self.0 & LED_HW_DUPLEX != 0
    }

    /// Collision seen (bit 2).
    #[inline]
    pub const fn collision(self) -> bool {
        self.0 & LED_HW_COLLISION != 0
    }

    /// Transmit activity (bit 1).
    #[inline]
    pub const fn tx_activity(self) -> bool {
        self.0 & LED_HW_TX != 0
    }

    /// Receive activity (bit 0).
    #[inline]
    pub const fn rx_activity(self) -> bool {
        self.0 & LED_HW_RX != 0
    }

    /// True if either direction saw traffic since the last refresh.
    #[inline]
    pub const fn has_activity(self) -> bool {
        self.0 & (LED_HW_RX | LED_HW_TX) != 0
    }

    /// Coarse MAC speed (bits 4:3).
    pub const fn mac_speed(self) -> MacSpeed {
        match (self.0 & LED_HW_SPEED_MASK) >> LED_HW_SPEED_SHIFT {
            0 => MacSpeed::Mbps10,
            1 => MacSpeed::Mbps100,
            2 => MacSpeed::Gbps1,
            _ => MacSpeed::Above1G,
        }
    }
}

/// Lane speed reported through the control data array.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LaneSpeed {
    G1,
    G10,
    G25,
    G50,
    G100,
    /// Encodings 5..=7 are not assigned.
    Unknown(u8),
}

impl LaneSpeed {
    /// Decodes the 3-bit lane speed field.
    pub const fn from_code(code: u8) -> Self {
        match code & LANE_SPEED_MASK {
            0 => LaneSpeed::G1,
            1 => LaneSpeed::G10,
            2 => LaneSpeed::G25,
            3 => LaneSpeed::G50,
            4 => LaneSpeed::G100,
            other => LaneSpeed::Unknown(other),
        }
    }

    /// Returns the 3-bit field value.
    pub const fn code(self) -> u8 {
        match self {
            LaneSpeed::G1 => 0,
            LaneSpeed::G10 => 1,
            LaneSpeed::G25 => 2,
            LaneSpeed::G50 => 3,
            LaneSpeed::G100 => 4,
            LaneSpeed::Unknown(code) => code & LANE_SPEED_MASK,
        }
    }
}

/// One port's control data byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LaneControl(pub u8);

impl LaneControl {
    /// Builds a control byte from its fields.
    pub const fn new(speed: LaneSpeed, sw_link_up: bool) -> Self {
        let link = if sw_link_up { LED_SW_LINK_UP } else { 0 };
        Self((speed.code() << LANE_SPEED_SHIFT) | link)
    }

    /// Returns the raw byte.
    #[inline]
    pub const fn raw(self) -> u8 {
        self.0
    }

    /// Lane speed field (bits 3:1).
    #[inline]
    pub const fn lane_speed(self) -> LaneSpeed {
        LaneSpeed::from_code(self.0 >> LANE_SPEED_SHIFT)
    }

    /// Software link-up flag set by the host for ports the MAC does not track.
    #[inline]
    pub const fn sw_link_up(self) -> bool {
        self.0 & LED_SW_LINK_UP != 0
    }
}
