// Click playback state - one-shot cursor over the decoded sample
// Runs inside the real-time callback: no allocation, reads only

use std::sync::Arc;

use crate::click::loader::ClickSample;

/// One-shot player for the click sample.
///
/// Holds a fractional read cursor into the decoded mono data, stepped by the
/// source/output rate ratio so the click keeps its pitch on any device rate.
/// Idle (cursor `None`) it produces silence.
pub struct ClickPlayer {
    sample: Arc<ClickSample>,
    step: f64,
    cursor: Option<f64>,
}

impl ClickPlayer {
    pub fn new(sample: Arc<ClickSample>, output_rate: f32) -> Self {
        let step = sample.sample_rate as f64 / output_rate as f64;
        Self {
            sample,
            step,
            cursor: None,
        }
    }

    /// Start (or restart) the click from the beginning.
    /// Retriggering while a click is still sounding restarts it cleanly.
    pub fn trigger(&mut self) {
        self.cursor = Some(0.0);
    }

    pub fn is_playing(&self) -> bool {
        self.cursor.is_some()
    }

    /// Next mono output sample; 0.0 when idle.
    #[inline]
    pub fn process_sample(&mut self) -> f32 {
        if let Some(position) = self.cursor {
            let index = position as usize;
            if index < self.sample.data.len() {
                let value = self.sample.data[index];
                self.cursor = Some(position + self.step);
                return value;
            }
            // Click finished
            self.cursor = None;
        }

        0.0
    }

    /// Fill a buffer with click output (silence-padded past the end).
    pub fn process_buffer(&mut self, output: &mut [f32]) {
        for sample in output.iter_mut() {
            *sample = self.process_sample();
        }
    }

    /// Stop any sounding click immediately.
    pub fn reset(&mut self) {
        self.cursor = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_sample(len: usize, sample_rate: u32) -> Arc<ClickSample> {
        Arc::new(ClickSample {
            name: "test_click.wav".to_string(),
            data: (0..len).map(|i| ((i + 1) as f32).recip()).collect(),
            sample_rate,
        })
    }

    #[test]
    fn test_idle_is_silent() {
        let mut player = ClickPlayer::new(test_sample(64, 48000), 48000.0);
        for _ in 0..100 {
            assert_eq!(player.process_sample(), 0.0);
        }
        assert!(!player.is_playing());
    }

    #[test]
    fn test_click_plays_then_ends() {
        let mut player = ClickPlayer::new(test_sample(64, 48000), 48000.0);
        player.trigger();
        assert!(player.is_playing());

        let mut non_zero = 0;
        for _ in 0..64 {
            if player.process_sample().abs() > 0.0 {
                non_zero += 1;
            }
        }
        assert_eq!(non_zero, 64);

        // Past the end: silence, idle again
        assert_eq!(player.process_sample(), 0.0);
        assert!(!player.is_playing());
    }

    #[test]
    fn test_retrigger_restarts() {
        let mut player = ClickPlayer::new(test_sample(64, 48000), 48000.0);
        player.trigger();
        let first = player.process_sample();
        for _ in 0..10 {
            player.process_sample();
        }

        player.trigger();
        assert_eq!(player.process_sample(), first);
    }

    #[test]
    fn test_rate_ratio_stretches_playback() {
        // 100 source samples rendered at double the source rate last ~200
        // output samples
        let mut player = ClickPlayer::new(test_sample(100, 44100), 88200.0);
        player.trigger();

        let mut rendered = 0;
        while player.process_sample() != 0.0 {
            rendered += 1;
            assert!(rendered <= 200);
        }
        assert_eq!(rendered, 200);
    }

    #[test]
    fn test_buffer_processing_pads_silence() {
        let mut player = ClickPlayer::new(test_sample(32, 48000), 48000.0);
        let mut buffer = vec![1.0f32; 64];

        player.trigger();
        player.process_buffer(&mut buffer);

        assert!(buffer[..32].iter().all(|s| s.abs() > 0.0));
        assert!(buffer[32..].iter().all(|s| *s == 0.0));
    }

    #[test]
    fn test_reset_silences() {
        let mut player = ClickPlayer::new(test_sample(64, 48000), 48000.0);
        player.trigger();
        player.process_sample();
        player.reset();
        assert!(!player.is_playing());
        assert_eq!(player.process_sample(), 0.0);
    }
}
