//! # RustRemoteIdBeacon
//!
//! Remote ID beacon firmware built around a typed, table-driven parameter
//! registry.
//!
//! ## Architecture
//!
//! All configuration flows through [`ParamRegistry`]:
//! - The schema table ([`params::PARAM_TABLE`]) is the single static
//!   description of every parameter: type, default, bounds, flags.
//! - The registry owns the live values and mirrors every accepted write
//!   into the persistent store (NVS on target, mock on host).
//! - [`bootstrap::run`] is the only component that writes slots outside
//!   the validated setters, and it runs exactly once at startup.
//!
//! Transports (serial console today, CAN/BT/WiFi later) consume the
//! registry through name or index lookups and never touch slots directly.

#![cfg_attr(not(test), no_std)]

pub mod assets;
pub mod bootstrap;
pub mod console;
pub mod identity;
pub mod logging;
pub mod params;
pub mod serial;
pub mod storage;

pub use assets::{AssetStore, RomAssets};
pub use params::{
    ParamDescriptor, ParamError, ParamFlags, ParamId, ParamRegistry, ParamSchema, ParamType,
    ParamValue, Persist, PARAM_TABLE,
};
pub use storage::{ParamStore, StoreError};

use logging::LogStream;

/// Global system log stream.
///
/// Any thread may push (coordinated via atomics); the serial drain is the
/// single consumer.
pub static SYS_LOG: LogStream = LogStream::new();
