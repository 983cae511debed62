// Click sample loading - WAV via hound, FLAC via claxon
// Decodes to mono f32 once at startup; the audio callback only ever reads

use std::path::Path;

use claxon::FlacReader;
use hound::WavReader;

use crate::click::{ClickError, ClickResult};

/// Decoded click sample, shared with the audio callback via `Arc`.
pub struct ClickSample {
    pub name: String,
    /// Mono samples in [-1, 1]
    pub data: Vec<f32>,
    /// Sample rate of the source file
    pub sample_rate: u32,
}

/// Load the click sample from disk.
///
/// Dispatches on the file extension; interleaved channels are downmixed to
/// mono by averaging. Returns an error for unknown extensions, decode
/// failures, and files with no audio frames.
pub fn load_click_sample(path: &Path) -> ClickResult<ClickSample> {
    let extension = path.extension().and_then(|s| s.to_str()).unwrap_or("");

    let sample = match extension.to_lowercase().as_str() {
        "wav" => load_wav(path)?,
        "flac" => load_flac(path)?,
        other => return Err(ClickError::UnsupportedFormat(other.to_string())),
    };

    if sample.data.is_empty() {
        return Err(ClickError::Empty(sample.name));
    }

    Ok(sample)
}

fn load_wav(path: &Path) -> ClickResult<ClickSample> {
    let reader = WavReader::open(path)?;
    let spec = reader.spec();

    let interleaved: Vec<f32> = match spec.sample_format {
        hound::SampleFormat::Float => reader
            .into_samples::<f32>()
            .collect::<Result<Vec<_>, _>>()?,
        hound::SampleFormat::Int => {
            let scale = (1i64 << (spec.bits_per_sample - 1)) as f32;
            reader
                .into_samples::<i32>()
                .map(|s| s.map(|s| s as f32 / scale))
                .collect::<Result<Vec<_>, _>>()?
        }
    };

    Ok(ClickSample {
        name: file_name(path),
        data: downmix_to_mono(interleaved, spec.channels as usize),
        sample_rate: spec.sample_rate,
    })
}

fn load_flac(path: &Path) -> ClickResult<ClickSample> {
    let mut reader = FlacReader::open(path)?;
    let info = reader.streaminfo();
    let scale = (1i64 << (info.bits_per_sample - 1)) as f32;

    let interleaved: Vec<f32> = reader
        .samples()
        .map(|s| s.map(|s| s as f32 / scale))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ClickSample {
        name: file_name(path),
        data: downmix_to_mono(interleaved, info.channels as usize),
        sample_rate: info.sample_rate,
    })
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string()
}

fn downmix_to_mono(interleaved: Vec<f32>, channels: usize) -> Vec<f32> {
    if channels <= 1 {
        return interleaved;
    }

    interleaved
        .chunks(channels)
        .map(|frame| frame.iter().sum::<f32>() / frame.len() as f32)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_downmix_mono_passthrough() {
        let data = vec![0.1, 0.2, 0.3];
        assert_eq!(downmix_to_mono(data.clone(), 1), data);
    }

    #[test]
    fn test_downmix_stereo_averages() {
        let interleaved = vec![1.0, 0.0, 0.5, 0.5, -1.0, 1.0];
        let mono = downmix_to_mono(interleaved, 2);
        assert_eq!(mono, vec![0.5, 0.5, 0.0]);
    }

    #[test]
    fn test_unknown_extension_rejected() {
        let result = load_click_sample(Path::new("click.mp3"));
        assert!(matches!(result, Err(ClickError::UnsupportedFormat(ext)) if ext == "mp3"));
    }
}
