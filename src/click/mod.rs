// Click module - Loading and playback of the beat click sample

pub mod loader;
pub mod player;

pub use loader::{ClickSample, load_click_sample};
pub use player::ClickPlayer;

use thiserror::Error;

/// Click asset errors
///
/// All of these are startup failures: a missing or undecodable click sample
/// aborts the program before the window opens rather than running silent.
#[derive(Debug, Error)]
pub enum ClickError {
    #[error("Unsupported click sample format: {0}")]
    UnsupportedFormat(String),

    #[error("Failed to decode WAV click: {0}")]
    Wav(#[from] hound::Error),

    #[error("Failed to decode FLAC click: {0}")]
    Flac(#[from] claxon::Error),

    #[error("Click sample contains no audio data: {0}")]
    Empty(String),
}

pub type ClickResult<T> = Result<T, ClickError>;
