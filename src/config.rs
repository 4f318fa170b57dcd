//! Board configuration for the composer.

use crate::interface::{
    InterfaceRange, InterfaceTable, LED_HW_INTF_MAX_NUM, LED_SEND_DATA_WIDTH, LedInterface,
    assign_interfaces,
};
use crate::memory::LED_RAM_ROWS;
use crate::port_map::PortMap;
use crate::status::LaneSpeed;
use heapless::Vec;

/// Lanes merged into one pattern row on the reference board.
pub const COMPRESS_MODE: u16 = 4;

/// Tick mask selecting the activity blink window (30 Hz counter).
pub const ACT_TICKS: u32 = 2;

/// Management ports at the tail of the reference board's port list.
pub const MAX_LED_MGNT_PORT: u16 = 2;

/// Interface layout of the reference board: front LEDs 0-63 and 64-127 on
/// interfaces 0 and 1, the SFP28 management LEDs on interface 2.
pub const MOONSTONE_INTERFACES: InterfaceTable = [
    LedInterface::enabled(InterfaceRange::new(1, 64, LED_SEND_DATA_WIDTH)),
    LedInterface::enabled(InterfaceRange::new(65, 128, LED_SEND_DATA_WIDTH)),
    LedInterface::enabled(InterfaceRange::new(513, 514, LED_SEND_DATA_WIDTH)),
    LedInterface::DISABLED,
    LedInterface::DISABLED,
];

/// Where the composer takes a port's link state from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkSource {
    /// Hardware link flag in the accumulation word.
    #[default]
    Hardware,
    /// Software link-up flag the host sets in the control data.
    Software,
    /// Either flag.
    Either,
}

/// How management ports show traffic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MgmtActivity {
    /// Blank the LED during the activity window while there is traffic.
    #[default]
    Pulse,
    /// Keep the link color regardless of traffic. Matches the shipped
    /// firmware, whose blanking statement never took effect.
    Steady,
}

/// Configuration validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Port count is zero.
    NoPorts,

    /// A port's pattern row would fall outside the pattern RAM.
    TooManyPorts { max_ports: u16, limit: u16 },

    /// No front panel ports left after reserving management ports.
    NoFrontPorts { max_ports: u16, mgmt_ports: u16 },

    /// Compression group size is zero.
    ZeroCompressLanes,

    /// Front ports do not split into whole compression groups.
    UnevenCompression { front_ports: u16, compress_lanes: u16 },

    /// Lane map has fewer entries than ports.
    PortMapTooShort { len: usize, required: u16 },

    /// Lane map entry is zero.
    UnmappedPort { lport: u16 },

    /// Lane map entry points past the accumulation RAM.
    PortOutOfRange { lport: u16, hw_port: u16 },

    /// Interface range is reversed or leaves the pattern RAM.
    InvalidInterfaceRange { index: usize },

    /// Interface sends zero bits per row.
    ZeroPatternWidth { index: usize },

    /// Two interfaces send the same row.
    OverlappingInterfaces { first: usize, second: usize },

    /// More interfaces than the hardware has.
    TooManyInterfaces,

    /// A row the composer writes is not sent on any interface.
    UncoveredRow { row: u16 },

    /// Composer staging buffer cannot hold every front panel port.
    StagingTooSmall { front_ports: u16, capacity: usize },
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ConfigError::NoPorts => write!(f, "port count must be at least one"),
            ConfigError::TooManyPorts { max_ports, limit } => {
                write!(f, "{} ports exceed the pattern RAM limit of {}", max_ports, limit)
            }
            ConfigError::NoFrontPorts {
                max_ports,
                mgmt_ports,
            } => write!(
                f,
                "{} management ports leave no front panel ports out of {}",
                mgmt_ports, max_ports
            ),
            ConfigError::ZeroCompressLanes => write!(f, "compression group size must be non-zero"),
            ConfigError::UnevenCompression {
                front_ports,
                compress_lanes,
            } => write!(
                f,
                "{} front ports do not divide into groups of {}",
                front_ports, compress_lanes
            ),
            ConfigError::PortMapTooShort { len, required } => {
                write!(f, "port map has {} entries, {} required", len, required)
            }
            ConfigError::UnmappedPort { lport } => {
                write!(f, "logical port {} maps to hardware port 0", lport)
            }
            ConfigError::PortOutOfRange { lport, hw_port } => write!(
                f,
                "logical port {} maps to hardware port {} beyond the accumulation RAM",
                lport, hw_port
            ),
            ConfigError::InvalidInterfaceRange { index } => {
                write!(f, "interface {} has an invalid row range", index)
            }
            ConfigError::ZeroPatternWidth { index } => {
                write!(f, "interface {} has zero pattern width", index)
            }
            ConfigError::OverlappingInterfaces { first, second } => {
                write!(f, "interfaces {} and {} overlap", first, second)
            }
            ConfigError::TooManyInterfaces => {
                write!(f, "at most {} interfaces are available", LED_HW_INTF_MAX_NUM)
            }
            ConfigError::UncoveredRow { row } => {
                write!(f, "pattern row {} is not sent on any interface", row)
            }
            ConfigError::StagingTooSmall {
                front_ports,
                capacity,
            } => write!(
                f,
                "{} front ports exceed the staging capacity of {}",
                front_ports, capacity
            ),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

/// Validated composer configuration.
///
/// Built with [`ComposerConfig::builder`], or taken from
/// [`ComposerConfig::moonstone`] for the reference board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposerConfig<'a> {
    port_map: PortMap<'a>,
    max_ports: u16,
    mgmt_ports: u16,
    compress_lanes: u16,
    act_ticks: u32,
    front_green_speed: LaneSpeed,
    mgmt_green_speed: LaneSpeed,
    link_source: LinkSource,
    mgmt_activity: MgmtActivity,
    interfaces: InterfaceTable,
}

impl<'a> ComposerConfig<'a> {
    /// Creates a builder over `port_map` with the reference board's policy
    /// and no interfaces.
    pub fn builder(port_map: PortMap<'a>) -> ConfigBuilder<'a> {
        ConfigBuilder::new(port_map)
    }

    /// The reference 512 + 2 port board.
    pub const fn moonstone() -> ComposerConfig<'static> {
        ComposerConfig {
            port_map: PortMap::moonstone(),
            max_ports: 514,
            mgmt_ports: MAX_LED_MGNT_PORT,
            compress_lanes: COMPRESS_MODE,
            act_ticks: ACT_TICKS,
            front_green_speed: LaneSpeed::G100,
            mgmt_green_speed: LaneSpeed::G25,
            link_source: LinkSource::Hardware,
            mgmt_activity: MgmtActivity::Pulse,
            interfaces: MOONSTONE_INTERFACES,
        }
    }

    /// The lane map.
    pub fn port_map(&self) -> PortMap<'a> {
        self.port_map
    }

    /// Total logical ports, management ports included.
    pub fn max_ports(&self) -> u16 {
        self.max_ports
    }

    /// Trailing ports handled without compression.
    pub fn mgmt_ports(&self) -> u16 {
        self.mgmt_ports
    }

    /// Ports that go through lane compression.
    pub fn front_ports(&self) -> u16 {
        self.max_ports - self.mgmt_ports
    }

    /// Lanes merged into one pattern row.
    pub fn compress_lanes(&self) -> u16 {
        self.compress_lanes
    }

    /// Number of compressed pattern rows, starting at row 1.
    pub fn group_count(&self) -> u16 {
        self.front_ports() / self.compress_lanes
    }

    /// Tick mask of the activity blink window.
    pub fn act_ticks(&self) -> u32 {
        self.act_ticks
    }

    /// Lane speed that shows green on a port of the given class.
    pub fn green_speed(&self, mgmt: bool) -> LaneSpeed {
        if mgmt {
            self.mgmt_green_speed
        } else {
            self.front_green_speed
        }
    }

    /// Where link state is read from.
    pub fn link_source(&self) -> LinkSource {
        self.link_source
    }

    /// How management ports show traffic.
    pub fn mgmt_activity(&self) -> MgmtActivity {
        self.mgmt_activity
    }

    /// Interface control blocks written on every tick.
    pub fn interfaces(&self) -> &InterfaceTable {
        &self.interfaces
    }

    /// True for the management ports at the tail of the port list.
    #[inline]
    pub fn is_mgmt_port(&self, lport: u16) -> bool {
        lport > self.front_ports()
    }
}

/// Builder for validated composer configurations.
#[derive(Debug)]
pub struct ConfigBuilder<'a> {
    port_map: PortMap<'a>,
    max_ports: u16,
    mgmt_ports: u16,
    compress_lanes: u16,
    act_ticks: u32,
    front_green_speed: LaneSpeed,
    mgmt_green_speed: LaneSpeed,
    link_source: LinkSource,
    mgmt_activity: MgmtActivity,
    interfaces: Vec<InterfaceRange, LED_HW_INTF_MAX_NUM>,
}

impl<'a> ConfigBuilder<'a> {
    /// Starts from the reference board's policy. The port count defaults
    /// to the length of the map.
    pub fn new(port_map: PortMap<'a>) -> Self {
        Self {
            port_map,
            max_ports: u16::try_from(port_map.len()).unwrap_or(u16::MAX),
            mgmt_ports: MAX_LED_MGNT_PORT,
            compress_lanes: COMPRESS_MODE,
            act_ticks: ACT_TICKS,
            front_green_speed: LaneSpeed::G100,
            mgmt_green_speed: LaneSpeed::G25,
            link_source: LinkSource::Hardware,
            mgmt_activity: MgmtActivity::Pulse,
            interfaces: Vec::new(),
        }
    }

    /// Total logical ports, management ports included.
    pub fn max_ports(mut self, max_ports: u16) -> Self {
        self.max_ports = max_ports;
        self
    }

    /// Trailing ports handled without compression.
    pub fn mgmt_ports(mut self, mgmt_ports: u16) -> Self {
        self.mgmt_ports = mgmt_ports;
        self
    }

    /// Lanes merged into one pattern row.
    pub fn compress_lanes(mut self, lanes: u16) -> Self {
        self.compress_lanes = lanes;
        self
    }

    /// Tick mask of the activity blink window.
    pub fn act_ticks(mut self, mask: u32) -> Self {
        self.act_ticks = mask;
        self
    }

    /// Lane speed that shows green on a front panel port.
    pub fn front_green_speed(mut self, speed: LaneSpeed) -> Self {
        self.front_green_speed = speed;
        self
    }

    /// Lane speed that shows green on a management port.
    pub fn mgmt_green_speed(mut self, speed: LaneSpeed) -> Self {
        self.mgmt_green_speed = speed;
        self
    }

    /// Where link state is read from.
    pub fn link_source(mut self, source: LinkSource) -> Self {
        self.link_source = source;
        self
    }

    /// How management ports show traffic.
    pub fn mgmt_activity(mut self, activity: MgmtActivity) -> Self {
        self.mgmt_activity = activity;
        self
    }

    /// Adds the next interface. Interfaces are numbered in call order.
    ///
    /// # Errors
    /// * `TooManyInterfaces` - All hardware interfaces are already assigned
    pub fn interface(mut self, range: InterfaceRange) -> Result<Self, ConfigError> {
        self.interfaces
            .push(range)
            .map_err(|_| ConfigError::TooManyInterfaces)?;
        Ok(self)
    }

    /// Validates and builds the configuration.
    ///
    /// # Errors
    /// Returns the first [`ConfigError`] found, checking port counts, then
    /// the lane map, then the interfaces.
    pub fn build(self) -> Result<ComposerConfig<'a>, ConfigError> {
        self.check_ports()?;
        self.check_port_map()?;
        self.check_interfaces()?;

        let mut interfaces = [LedInterface::DISABLED; LED_HW_INTF_MAX_NUM];
        assign_interfaces(&mut interfaces, &self.interfaces);

        Ok(ComposerConfig {
            port_map: self.port_map,
            max_ports: self.max_ports,
            mgmt_ports: self.mgmt_ports,
            compress_lanes: self.compress_lanes,
            act_ticks: self.act_ticks,
            front_green_speed: self.front_green_speed,
            mgmt_green_speed: self.mgmt_green_speed,
            link_source: self.link_source,
            mgmt_activity: self.mgmt_activity,
            interfaces,
        })
    }

    fn check_ports(&self) -> Result<(), ConfigError> {
        if self.max_ports == 0 {
            return Err(ConfigError::NoPorts);
        }

        // Row `max_ports` is the last one written.
        let limit = (LED_RAM_ROWS - 1) as u16;
        if self.max_ports > limit {
            return Err(ConfigError::TooManyPorts {
                max_ports: self.max_ports,
                limit,
            });
        }

        if self.mgmt_ports >= self.max_ports {
            return Err(ConfigError::NoFrontPorts {
                max_ports: self.max_ports,
                mgmt_ports: self.mgmt_ports,
            });
        }

        if self.compress_lanes == 0 {
            return Err(ConfigError::ZeroCompressLanes);
        }

        let front_ports = self.max_ports - self.mgmt_ports;
        if !front_ports.is_multiple_of(self.compress_lanes) {
            return Err(ConfigError::UnevenCompression {
                front_ports,
                compress_lanes: self.compress_lanes,
            });
        }

        Ok(())
    }

    fn check_port_map(&self) -> Result<(), ConfigError> {
        let entries = self.port_map.entries();
        let used = entries
            .get(..usize::from(self.max_ports))
            .ok_or(ConfigError::PortMapTooShort {
                len: entries.len(),
                required: self.max_ports,
            })?;

        for (lport, &hw_port) in (1u16..).zip(used) {
            if hw_port == 0 {
                return Err(ConfigError::UnmappedPort { lport });
            }
            if usize::from(hw_port) > LED_RAM_ROWS {
                return Err(ConfigError::PortOutOfRange { lport, hw_port });
            }
        }

        Ok(())
    }

    fn check_interfaces(&self) -> Result<(), ConfigError> {
        for (index, range) in self.interfaces.iter().enumerate() {
            if range.start_row > range.end_row || usize::from(range.end_row) >= LED_RAM_ROWS {
                return Err(ConfigError::InvalidInterfaceRange { index });
            }
            if range.pattern_width == 0 {
                return Err(ConfigError::ZeroPatternWidth { index });
            }
            for (later, other) in self.interfaces.iter().enumerate().skip(index + 1) {
                if range.overlaps(other) {
                    return Err(ConfigError::OverlappingInterfaces {
                        first: index,
                        second: later,
                    });
                }
            }
        }

        let front_ports = self.max_ports - self.mgmt_ports;
        let group_rows = 1..=front_ports / self.compress_lanes;
        let mgmt_rows = front_ports + 1..=self.max_ports;
        for row in group_rows.chain(mgmt_rows) {
            if !self.interfaces.iter().any(|range| range.contains(row)) {
                return Err(ConfigError::UncoveredRow { row });
            }
        }

        Ok(())
    }
}
