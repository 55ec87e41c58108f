//! Readings and requests exchanged with the watch hardware

pub mod activity;
pub mod battery;
pub mod bluetooth;
pub mod vibration;
