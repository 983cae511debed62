// Audio engine - CPAL real-time callback
//
// # Format Support
//
// The engine supports the device's preferred sample format automatically:
// - **F32**: floating point 32-bit (native, no conversion)
// - **I16**: signed 16-bit integer (common on Windows/WASAPI)
// - **U16**: unsigned 16-bit integer (less common)
//
// Internally everything is rendered in f32; conversion to the device format
// happens when writing the interleaved output frame, via CPAL's
// `FromSample<f32>` trait.
//
// # Stream Limitations
//
// On macOS (CoreAudio) the Stream is not Send/Sync, so there is no
// monitoring thread for automatic reconnection. The error callback reports
// failures to the UI through the notification channel and flips the shared
// status; the program keeps running silent.

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{Device, FromSample, SampleFormat, SizedSample, Stream, StreamConfig};
use std::sync::{Arc, Mutex};

use crate::audio::dsp_utils::{OnePoleSmoother, flush_denormals_to_zero, soft_clip};
use crate::audio::parameters::AtomicF32;
use crate::click::loader::ClickSample;
use crate::click::player::ClickPlayer;
use crate::connection::status::{AtomicDeviceStatus, DeviceStatus};
use crate::messaging::channels::{CommandConsumer, NotificationProducer};
use crate::messaging::command::Command;
use crate::messaging::notification::{Notification, NotificationCategory};

/// Click volume at startup
const DEFAULT_VOLUME: f32 = 0.8;

/// Volume smoothing time constant, enough to kill zipper noise from the
/// slider without making the control feel laggy
const VOLUME_SMOOTHING_MS: f32 = 10.0;

pub struct AudioEngine {
    _device: Device,
    _stream: Stream,
    sample_rate: f32,
    pub volume: AtomicF32,
    pub status: AtomicDeviceStatus,
}

impl AudioEngine {
    pub fn new(
        command_rx: CommandConsumer,
        notification_tx: Arc<Mutex<NotificationProducer>>,
        click_sample: Arc<ClickSample>,
    ) -> Result<Self, String> {
        let host = cpal::default_host();

        let device = host
            .default_output_device()
            .ok_or("No audio device found")?;

        println!(
            "Audio device: {}",
            device.name().unwrap_or("Unknown".to_string())
        );

        let supported_config = device
            .default_output_config()
            .map_err(|e| format!("Audio configuration error: {}", e))?;

        let sample_format = supported_config.sample_format();
        let sample_rate = supported_config.sample_rate().0 as f32;
        let channels = supported_config.channels() as usize;
        let config: StreamConfig = supported_config.into();

        // Shared between UI thread and audio callback
        let volume = AtomicF32::new(DEFAULT_VOLUME);
        let status = AtomicDeviceStatus::new(DeviceStatus::Connecting);

        // Callback-side state behind try_lock-only mutexes
        let player = Arc::new(Mutex::new(ClickPlayer::new(click_sample, sample_rate)));
        let smoother = Arc::new(Mutex::new(OnePoleSmoother::new(
            DEFAULT_VOLUME,
            VOLUME_SMOOTHING_MS,
            sample_rate,
        )));
        let command_rx = Arc::new(Mutex::new(command_rx));

        let stream = match sample_format {
            SampleFormat::F32 => Self::build_stream::<f32>(
                &device,
                &config,
                channels,
                command_rx,
                player,
                volume.clone(),
                smoother,
                status.clone(),
                notification_tx.clone(),
            ),
            SampleFormat::I16 => Self::build_stream::<i16>(
                &device,
                &config,
                channels,
                command_rx,
                player,
                volume.clone(),
                smoother,
                status.clone(),
                notification_tx.clone(),
            ),
            SampleFormat::U16 => Self::build_stream::<u16>(
                &device,
                &config,
                channels,
                command_rx,
                player,
                volume.clone(),
                smoother,
                status.clone(),
                notification_tx.clone(),
            ),
            _ => {
                return Err(format!(
                    "Unsupported sample format: {:?}. Supported formats: F32, I16, U16",
                    sample_format
                ));
            }
        }?;

        stream
            .play()
            .map_err(|e| format!("Failed to start audio stream: {}", e))?;

        status.set(DeviceStatus::Connected);

        println!("Audio engine started: {} Hz, {} channels", sample_rate, channels);

        if let Ok(mut tx) = notification_tx.try_lock() {
            let notif = Notification::info(
                NotificationCategory::Audio,
                format!("Audio connected: {} Hz", sample_rate),
            );
            let _ = ringbuf::traits::Producer::try_push(&mut *tx, notif);
        }

        Ok(Self {
            _device: device,
            _stream: stream,
            sample_rate,
            volume,
            status,
        })
    }

    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    /// Build an output stream with automatic format conversion.
    ///
    /// Generic over the device sample type; the callback renders f32 and
    /// converts at frame-write time.
    #[allow(clippy::too_many_arguments)]
    fn build_stream<T>(
        device: &Device,
        config: &StreamConfig,
        channels: usize,
        command_rx: Arc<Mutex<CommandConsumer>>,
        player: Arc<Mutex<ClickPlayer>>,
        volume: AtomicF32,
        smoother: Arc<Mutex<OnePoleSmoother>>,
        status: AtomicDeviceStatus,
        notification_tx: Arc<Mutex<NotificationProducer>>,
    ) -> Result<Stream, String>
    where
        T: SizedSample + FromSample<f32> + Send + 'static,
    {
        let stream = device
            .build_output_stream(
                config,
                move |data: &mut [T], _: &cpal::OutputCallbackInfo| {
                    // ========== SACRED ZONE ==========
                    // No allocations, No I/O, No blocking locks

                    if let Ok(mut player) = player.try_lock() {
                        // Drain UI commands
                        if let Ok(mut rx) = command_rx.try_lock() {
                            while let Some(cmd) = ringbuf::traits::Consumer::try_pop(&mut *rx) {
                                match cmd {
                                    Command::TriggerClick => player.trigger(),
                                    Command::Quit => player.reset(),
                                }
                            }
                        }

                        if let Ok(mut smoother) = smoother.try_lock() {
                            for frame in data.chunks_mut(channels) {
                                // Read target volume once per sample for smoothing
                                let gain = smoother.process(volume.get());

                                let mut sample = player.process_sample();
                                sample = flush_denormals_to_zero(sample);
                                sample *= gain;
                                sample = soft_clip(sample);

                                // mono -> all channels
                                let converted = T::from_sample(sample);
                                for channel_sample in frame.iter_mut() {
                                    *channel_sample = converted;
                                }
                            }
                        } else {
                            // Fallback without smoothing (still better than silence)
                            let gain = volume.get();
                            for frame in data.chunks_mut(channels) {
                                let mut sample = player.process_sample();
                                sample = flush_denormals_to_zero(sample);
                                sample *= gain;
                                sample = soft_clip(sample);

                                let converted = T::from_sample(sample);
                                for channel_sample in frame.iter_mut() {
                                    *channel_sample = converted;
                                }
                            }
                        }
                    } else {
                        // Fallback: silence if the player lock is contended
                        let silence = T::from_sample(0.0f32);
                        for sample in data.iter_mut() {
                            *sample = silence;
                        }
                    }
                    // ========== SACRED ZONE END ==========
                },
                move |err| {
                    // Error callback runs outside the audio callback; I/O is fine here
                    eprintln!("Audio stream error: {}", err);

                    status.set(DeviceStatus::Error);

                    if let Ok(mut tx) = notification_tx.try_lock() {
                        let notif = Notification::error(
                            NotificationCategory::Audio,
                            format!("Audio stream error: {}", err),
                        );
                        let _ = ringbuf::traits::Producer::try_push(&mut *tx, notif);
                    }
                },
                None,
            )
            .map_err(|e| format!("Error in stream creation: {}", e))?;

        Ok(stream)
    }
}
