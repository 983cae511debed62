// Audio module - CPAL backend and real-time callback

pub mod dsp_utils;
pub mod engine;
pub mod parameters;
