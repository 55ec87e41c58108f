//! Theta: a configurable two-ring watch face
//!
//! The crate turns the face's settings and live readings (time, battery,
//! phone connection, activity totals) into the values drawn each frame:
//! two ring sweeps, a color pair, two complication lines and the center
//! line. Drawing, settings transport, flash storage and the vibration
//! motor stay in the firmware.
#![cfg_attr(not(test), no_std)]

#[macro_use]
mod fmt;

pub mod peripherals;
pub mod system;
pub mod ui;

pub use peripherals::{activity::ActivitySnapshot, battery::BatteryLevel, bluetooth::Connection};
pub use system::{
    config::{ConfigError, Configuration, ConfigurationStore, RawValue, SettingKey},
    storage::{MemoryStorage, Storage},
    time::{seed_rng, ClockAngles, ClockStyle},
};
pub use ui::{
    color::Color,
    watchface::{Effects, Inputs, MessageReport, Surfaces, Watchface},
    FaceGeometry, RenderInput,
};
