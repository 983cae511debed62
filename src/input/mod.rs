// Input module - Key edge detection for timing sampling

pub mod edge;

pub use edge::{EdgeDetector, KeyState};
