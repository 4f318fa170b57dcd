//! LED bit pattern composer.
//!
//! Provides [`LedComposer`], the per-tick handler that turns port status from
//! the accumulation RAM into LED patterns, and [`HandlerCtrl`], the memory
//! block the LED firmware hands to it.
//!
//! Each call to [`LedComposer::compose`] runs three passes:
//!
//! 1. Decode every logical port into a [`LedColor`]. Management ports are
//!    written straight to their own pattern row; front panel ports are staged.
//! 2. Merge each group of `compress_lanes` staged front ports into one color
//!    and write it to the next pattern row, starting at row 1.
//! 3. Rewrite the interface control blocks from the configuration.

use crate::color::{LedColor, fold_group, in_activity_window};
use crate::config::{ComposerConfig, ConfigError, LinkSource, MgmtActivity};
use crate::interface::{InterfaceTable, LED_HW_INTF_MAX_NUM, LedInterface};
use crate::memory::{AccumulationMemory, ControlData, PatternMemory};
use crate::status::{LaneControl, PortStatus};

/// Front panel ports on the reference board.
pub const MOONSTONE_FRONT_PORTS: usize = 512;

/// Composer sized for the reference board.
pub type MoonstoneComposer = LedComposer<'static, MOONSTONE_FRONT_PORTS>;

/// Memory the LED firmware passes to the custom handler on every tick.
#[derive(Debug)]
pub struct HandlerCtrl<A, C, P> {
    /// Accumulation RAM (bank 0), one status word per hardware port.
    pub accu_ram: A,
    /// Control data bytes written by the host.
    pub control_data: C,
    /// Pattern RAM (bank 1), one LED pattern per row.
    pub pattern_ram: P,
    /// Interface control blocks.
    pub interfaces: InterfaceTable,
}

impl<A, C, P> HandlerCtrl<A, C, P>
where
    A: AccumulationMemory,
    C: ControlData,
    P: PatternMemory,
{
    /// Creates a control block with every interface disabled.
    pub fn new(accu_ram: A, control_data: C, pattern_ram: P) -> Self {
        Self {
            accu_ram,
            control_data,
            pattern_ram,
            interfaces: [LedInterface::DISABLED; LED_HW_INTF_MAX_NUM],
        }
    }
}

/// Composes port LED patterns once per tick.
///
/// # Type Parameters
/// * `'a` - Lifetime of the lane map borrowed by the configuration
/// * `N` - Staging capacity, at least the number of front panel ports
pub struct LedComposer<'a, const N: usize> {
    config: ComposerConfig<'a>,
    colors: [LedColor; N],
}

impl<'a, const N: usize> LedComposer<'a, N> {
    /// Creates a composer for `config`.
    ///
    /// # Errors
    /// * `StagingTooSmall` - `N` is smaller than the front panel port count
    pub fn new(config: ComposerConfig<'a>) -> Result<Self, ConfigError> {
        if usize::from(config.front_ports()) > N {
            return Err(ConfigError::StagingTooSmall {
                front_ports: config.front_ports(),
                capacity: N,
            });
        }

        Ok(Self::with_checked_config(config))
    }

    // Caller guarantees the front panel fits in `N`
    fn with_checked_config(config: ComposerConfig<'a>) -> Self {
        #[cfg(feature = "defmt")]
        defmt::debug!(
            "led composer: {} ports ({} mgmt), {} lanes per row, {} rows",
            config.max_ports(),
            config.mgmt_ports(),
            config.compress_lanes(),
            config.group_count()
        );

        Self {
            config,
            colors: [LedColor::Black; N],
        }
    }

    /// The validated board configuration.
    pub fn config(&self) -> &ComposerConfig<'a> {
        &self.config
    }

    /// Front panel colors staged by the last call to [`compose`](Self::compose).
    pub fn staged_colors(&self) -> &[LedColor] {
        &self.colors[..usize::from(self.config.front_ports())]
    }

    /// Decodes the steady link color of one port.
    ///
    /// Black if the link is down. Otherwise green if the lane runs at the
    /// class's green speed, amber at any other speed.
    pub fn link_color(&self, mgmt: bool, status: PortStatus, control: LaneControl) -> LedColor {
        let link = match self.config.link_source() {
            LinkSource::Hardware => status.link_enabled(),
            LinkSource::Software => control.sw_link_up(),
            LinkSource::Either => status.link_enabled() || control.sw_link_up(),
        };

        if !link {
            LedColor::Black
        } else if control.lane_speed() == self.config.green_speed(mgmt) {
            LedColor::Green
        } else {
            LedColor::Amber
        }
    }

    /// Decodes one port including its activity overlay.
    ///
    /// Management ports come back steady, already resolved for `tick`.
    /// Front panel ports with traffic come back as blink variants.
    pub fn port_color(
        &self,
        mgmt: bool,
        status: PortStatus,
        control: LaneControl,
        tick: u32,
    ) -> LedColor {
        let color = self.link_color(mgmt, status, control);
        if !status.has_activity() {
            return color;
        }

        if !mgmt {
            return color.blink();
        }

        match self.config.mgmt_activity() {
            MgmtActivity::Pulse if in_activity_window(tick, self.config.act_ticks()) => {
                LedColor::Black
            }
            _ => color,
        }
    }

    /// Runs one tick: writes every pattern row and rewrites the interface
    /// control blocks.
    pub fn compose<A, C, P>(&mut self, ctrl: &mut HandlerCtrl<A, C, P>, tick: u32)
    where
        A: AccumulationMemory,
        C: ControlData,
        P: PatternMemory,
    {
        let port_map = self.config.port_map();

        for lport in 1..=self.config.max_ports() {
            let (status, control) = match port_map.hw_port(lport) {
                Some(hw) => (
                    ctrl.accu_ram.read_status(hw),
                    ctrl.control_data.lane_control(hw),
                ),
                None => (PortStatus::default(), LaneControl::default()),
            };

            let mgmt = self.config.is_mgmt_port(lport);
            let color = self.port_color(mgmt, status, control, tick);

            if mgmt {
                ctrl.pattern_ram.write_pattern(lport, color.pattern_word());
            } else {
                self.colors[usize::from(lport - 1)] = color;
            }
        }

        let front_ports = usize::from(self.config.front_ports());
        let lanes = usize::from(self.config.compress_lanes());
        let act_ticks = self.config.act_ticks();
        for (row, group) in (1u16..).zip(self.colors[..front_ports].chunks(lanes)) {
            let color = fold_group(group).resolve(tick, act_ticks);
            ctrl.pattern_ram.write_pattern(row, color.pattern_word());
        }

        ctrl.interfaces = *self.config.interfaces();

        #[cfg(feature = "defmt")]
        defmt::trace!(
            "tick {}: {} group rows, {} mgmt rows",
            tick,
            self.config.group_count(),
            self.config.mgmt_ports()
        );
    }
}

impl LedComposer<'static, MOONSTONE_FRONT_PORTS> {
    /// Composer for the reference board.
    pub fn moonstone() -> Self {
        Self::with_checked_config(ComposerConfig::moonstone())
    }
}
