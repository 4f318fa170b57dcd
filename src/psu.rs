//! PSU attribute overrides.
//!
//! The platform driver framework dispatches PSU attribute reads through a
//! table of [`PsuSysfsAttr`] entries. The reference board's PSUs do not
//! report airflow, so the fan direction entry is replaced by a handler that
//! always reports intake.

use core::fmt::Write;
use heapless::String;

/// Capacity of an attribute read buffer.
pub const ATTR_BUF_LEN: usize = 64;

/// Buffer an attribute is rendered into.
pub type AttrBuf = String<ATTR_BUF_LEN>;

/// Renders an attribute into `buf` and returns the number of bytes written.
pub type ShowFn = fn(&PsuSysfsAttr, &mut AttrBuf) -> usize;

/// Queries the hardware for the fan direction.
pub type FanDirGetFn = fn() -> Option<FanDirection>;

/// PSU fan airflow direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FanDirection {
    Intake,
    Exhaust,
}

impl FanDirection {
    /// Name reported through the attribute.
    pub const fn as_str(self) -> &'static str {
        match self {
            FanDirection::Intake => "FAN_DIRECTION_INTAKE",
            FanDirection::Exhaust => "FAN_DIRECTION_EXHAUST",
        }
    }
}

impl core::fmt::Display for FanDirection {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of the PSU attribute dispatch table.
#[derive(Debug, Clone, Copy)]
pub struct PsuSysfsAttr {
    pub name: &'static str,
    pub show: ShowFn,
    pub do_get: Option<FanDirGetFn>,
}

impl PsuSysfsAttr {
    /// The framework's stock fan direction entry, backed by `do_get`.
    pub const fn fan_dir(do_get: FanDirGetFn) -> Self {
        Self {
            name: "psu_fan_dir",
            show: show_fan_direction,
            do_get: Some(do_get),
        }
    }

    /// Reads the attribute into a cleared buffer.
    pub fn read(&self, buf: &mut AttrBuf) -> usize {
        buf.clear();
        (self.show)(self, buf)
    }
}

fn render(buf: &mut AttrBuf, direction: FanDirection) -> usize {
    buf.clear();
    match writeln!(buf, "{}", direction) {
        Ok(()) => buf.len(),
        Err(_) => 0,
    }
}

/// Stock handler: asks the hardware through `do_get`. Renders nothing when
/// there is no hook or the query fails.
pub fn show_fan_direction(attr: &PsuSysfsAttr, buf: &mut AttrBuf) -> usize {
    match attr.do_get.and_then(|get| get()) {
        Some(direction) => render(buf, direction),
        None => 0,
    }
}

/// Override handler: always `FAN_DIRECTION_INTAKE`.
pub fn show_fan_direction_intake(_attr: &PsuSysfsAttr, buf: &mut AttrBuf) -> usize {
    render(buf, FanDirection::Intake)
}

/// An installed fan direction override.
///
/// Holds the entry it replaced so that unloading puts it back.
#[derive(Debug)]
#[must_use = "dropping the override loses the replaced entry"]
pub struct FanDirOverride {
    previous: PsuSysfsAttr,
}

impl FanDirOverride {
    /// Points `attr` at the fixed intake handler and drops its hardware hook.
    pub fn install(attr: &mut PsuSysfsAttr) -> Self {
        let previous = *attr;
        attr.show = show_fan_direction_intake;
        attr.do_get = None;
        Self { previous }
    }

    /// Restores the entry that was in place before [`install`](Self::install).
    pub fn uninstall(self, attr: &mut PsuSysfsAttr) {
        *attr = self.previous;
    }

    /// The entry that will be restored.
    pub fn previous(&self) -> &PsuSysfsAttr {
        &self.previous
    }
}
