// Main UI App - per-frame metronome loop
//
// The UI thread owns the BeatClock: each frame measures elapsed wall-clock
// time, advances the clock, and on a beat boundary pushes a click command to
// the audio thread through the lock-free ring.

use crate::audio::parameters::AtomicF32;
use crate::clock::BeatClock;
use crate::connection::status::{AtomicDeviceStatus, DeviceStatus};
use crate::input::edge::EdgeDetector;
use crate::messaging::channels::{CommandProducer, NotificationConsumer};
use crate::messaging::command::Command;
use crate::messaging::notification::{Notification, NotificationCategory, NotificationLevel};
use eframe::egui;
use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Number of bars sweeping across the window per beat
const NUM_BARS: usize = 3;

/// Bar and marker geometry
const BAR_WIDTH: f32 = 10.0;
const BAR_HEIGHT: f32 = 30.0;
const MARKER_HEIGHT: f32 = 50.0;

/// Notifications older than this disappear from the status bar
const NOTIFICATION_MAX_AGE_MS: u64 = 5000;

pub struct MetronomeApp {
    command_tx: CommandProducer,
    volume_atomic: AtomicF32,
    volume_ui: f32,
    engine_status: AtomicDeviceStatus,
    // Beat state, owned by this loop
    clock: BeatClock,
    tempo_ui: u32,
    space_edge: EdgeDetector,
    last_tick: Instant,
    // Notification system
    notification_rx: NotificationConsumer,
    notification_queue: VecDeque<Notification>,
    max_notifications: usize,
}

impl MetronomeApp {
    pub fn new(
        command_tx: CommandProducer,
        volume_atomic: AtomicF32,
        engine_status: AtomicDeviceStatus,
        notification_rx: NotificationConsumer,
    ) -> Self {
        let initial_volume = volume_atomic.get();
        let clock = BeatClock::default();
        let tempo_ui = clock.tempo_bpm() as u32;

        Self {
            command_tx,
            volume_atomic,
            volume_ui: initial_volume,
            engine_status,
            clock,
            tempo_ui,
            space_edge: EdgeDetector::new(),
            last_tick: Instant::now(),
            notification_rx,
            notification_queue: VecDeque::new(),
            max_notifications: 10,
        }
    }

    /// Drain new notifications from the ringbuffer into the bounded queue
    fn update_notifications(&mut self) {
        while let Some(notification) =
            ringbuf::traits::Consumer::try_pop(&mut self.notification_rx)
        {
            self.notification_queue.push_back(notification);

            if self.notification_queue.len() > self.max_notifications {
                self.notification_queue.pop_front();
            }
        }
    }

    /// Recent notifications, newest first
    fn get_recent_notifications(&self) -> Vec<&Notification> {
        self.notification_queue
            .iter()
            .rev()
            .filter(|n| n.is_recent(NOTIFICATION_MAX_AGE_MS))
            .take(3)
            .collect()
    }

    /// Sample the player's timing against the beat.
    ///
    /// Fires once per discrete Space press; the offset is the distance to the
    /// next beat boundary in fractional-beat units.
    fn sample_timing_offset(&mut self, ctx: &egui::Context) {
        let space_down = ctx.input(|i| i.key_down(egui::Key::Space));

        if self.space_edge.update(space_down) {
            let offset = self.clock.offset_from_boundary();
            println!("Timing offset: {:.3} beats to next boundary", offset);

            self.notification_queue.push_back(Notification::info(
                NotificationCategory::Timing,
                format!("Offset: {:.3} beats", offset),
            ));
            if self.notification_queue.len() > self.max_notifications {
                self.notification_queue.pop_front();
            }
        }
    }

    /// Draw the sweeping bars on a gray field with the black center marker
    fn draw_bars(&self, ui: &mut egui::Ui) {
        let (response, painter) =
            ui.allocate_painter(ui.available_size(), egui::Sense::hover());
        let rect = response.rect;

        painter.rect_filled(rect, 0.0, egui::Color32::GRAY);

        let width = rect.width();
        let lane_y = rect.height() * 0.75;

        let marker = egui::Rect::from_min_size(
            rect.min + egui::vec2(width / 2.0, lane_y),
            egui::vec2(BAR_WIDTH, MARKER_HEIGHT),
        );
        painter.rect_filled(marker, 0.0, egui::Color32::BLACK);

        // Each bar sweeps one lane of the left half-width per beat; together
        // they cross the marker once per beat
        let phase = self.clock.normalized_phase() as f32;
        for index in 0..NUM_BARS {
            let x = (width / 2.0) * (phase / NUM_BARS as f32)
                + index as f32 * width / (2.0 * NUM_BARS as f32);

            let bar = egui::Rect::from_min_size(
                rect.min + egui::vec2(x, lane_y + 10.0),
                egui::vec2(BAR_WIDTH, BAR_HEIGHT),
            );
            painter.rect_filled(bar, 0.0, egui::Color32::RED);
        }
    }

    /// Status bar: device status dot plus recent notifications
    fn draw_status_bar(&self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            let (status_text, status_color) = match self.engine_status.get() {
                DeviceStatus::Connected => ("●", egui::Color32::GREEN),
                DeviceStatus::Connecting => ("●", egui::Color32::YELLOW),
                DeviceStatus::Disconnected => ("○", egui::Color32::GRAY),
                DeviceStatus::Error => ("●", egui::Color32::RED),
            };
            ui.colored_label(status_color, status_text);
            ui.label("Audio");
            ui.separator();

            let recent_notifications = self.get_recent_notifications();

            if recent_notifications.is_empty() {
                ui.label("Ready");
            } else {
                for notification in recent_notifications {
                    let (icon, color) = match notification.level {
                        NotificationLevel::Info => ("ℹ", egui::Color32::from_rgb(100, 150, 255)),
                        NotificationLevel::Warning => ("⚠", egui::Color32::from_rgb(255, 165, 0)),
                        NotificationLevel::Error => ("✖", egui::Color32::RED),
                    };

                    ui.colored_label(color, icon);
                    ui.colored_label(color, &notification.message);
                    ui.add_space(10.0);
                }
            }
        });
    }
}

impl eframe::App for MetronomeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Cap the tick rate; elapsed time is measured, never assumed
        ctx.request_repaint_after(Duration::from_secs_f64(1.0 / BeatClock::TICK_RATE));
        let delta_seconds = self.last_tick.elapsed().as_secs_f64();
        self.last_tick = Instant::now();

        self.update_notifications();

        if ctx.input(|i| i.viewport().close_requested()) {
            let _ = ringbuf::traits::Producer::try_push(&mut self.command_tx, Command::Quit);
        }

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            self.draw_status_bar(ui);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("beatbar");
            ui.separator();
            ui.add_space(10.0);

            // Tempo control and readout
            ui.horizontal(|ui| {
                ui.label("Tempo:");
                let slider = egui::Slider::new(
                    &mut self.tempo_ui,
                    BeatClock::MIN_TEMPO_BPM as u32..=BeatClock::MAX_TEMPO_BPM as u32,
                );
                if ui.add(slider).changed() {
                    // Phase is preserved; only the beat period changes
                    self.clock.set_tempo(self.tempo_ui as f64);
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.heading(format!("{} bpm", self.tempo_ui));
                });
            });

            // Click volume (connected to atomic parameter)
            ui.horizontal(|ui| {
                ui.label("Volume:");
                if ui
                    .add(egui::Slider::new(&mut self.volume_ui, 0.0..=1.0))
                    .changed()
                {
                    self.volume_atomic.set(self.volume_ui);
                }
            });

            ui.add_space(4.0);
            ui.label("Press Space on the beat to check your timing");
            ui.add_space(10.0);

            // Advance the beat before anything reads the phase this tick
            if self.clock.advance(delta_seconds) {
                let _ =
                    ringbuf::traits::Producer::try_push(&mut self.command_tx, Command::TriggerClick);
            }

            self.sample_timing_offset(ctx);

            self.draw_bars(ui);
        });
    }
}
