#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![doc = include_str!("../README.md")]

//! # Core Concepts
//!
//! - **`LedComposer`**: Per-tick handler that turns port status into LED patterns
//! - **`HandlerCtrl`**: The memory block the LED firmware passes to the handler
//! - **`ComposerConfig`**: Validated board layout (port counts, lane map, interfaces)
//! - **`PortStatus`** / **`LaneControl`**: Decoders for the accumulation word and control byte
//! - **`LedColor`**: Steady and blink color codes, and the lane merge rules
//! - **`PortMap`**: Fixed logical-to-hardware port table
//! - **`AccumulationMemory`**, **`ControlData`**, **`PatternMemory`**: Traits to implement
//!   for your LED RAM banks
//! - **`FanDirOverride`**: Fixed fan direction handler for the PSU attribute table
//!
//! The composer never fails at tick time. Everything that could put a memory
//! access out of range is rejected once, when the configuration is built.

// Re-export Srgb from palette for preview consumers
pub use palette::Srgb;

pub mod color;
pub mod composer;
pub mod config;
pub mod interface;
pub mod memory;
pub mod port_map;
pub mod psu;
pub mod status;

pub use color::{LedColor, fold_group, in_activity_window};
pub use composer::{HandlerCtrl, LedComposer, MOONSTONE_FRONT_PORTS, MoonstoneComposer};
pub use config::{
    ACT_TICKS, COMPRESS_MODE, ComposerConfig, ConfigBuilder, ConfigError, LinkSource,
    MAX_LED_MGNT_PORT, MgmtActivity,
};
pub use interface::{InterfaceRange, InterfaceTable, LED_HW_INTF_MAX_NUM, LedInterface};
pub use memory::{AccumulationMemory, ControlData, LED_RAM_ROWS, PatternMemory};
pub use port_map::{MOONSTONE_MAX_PORTS, MOONSTONE_PORT_MAP, PortMap};
pub use psu::{FanDirOverride, FanDirection, PsuSysfsAttr};
pub use status::{LaneControl, LaneSpeed, MacSpeed, PortStatus};
