// Connection module - Audio device status shared with the UI

pub mod status;

pub use status::{AtomicDeviceStatus, DeviceStatus};
