// beatbar - Library exports for tests

pub mod audio;
pub mod click;
pub mod clock;
pub mod connection;
pub mod input;
pub mod messaging;
pub mod ui;

// Re-export commonly used types for convenience
pub use audio::engine::AudioEngine;
pub use audio::parameters::AtomicF32;
pub use click::{ClickError, ClickPlayer, ClickSample, load_click_sample};
pub use clock::BeatClock;
pub use connection::{AtomicDeviceStatus, DeviceStatus};
pub use input::{EdgeDetector, KeyState};
pub use messaging::channels::{create_command_channel, create_notification_channel};
pub use messaging::command::Command;
