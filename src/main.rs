use beatbar::ui::app::MetronomeApp;
use beatbar::{AudioEngine, create_command_channel, create_notification_channel, load_click_sample};
use std::path::Path;
use std::sync::{Arc, Mutex};

// Ringbuffer capacity constants
// The UI pushes at most one click command per frame plus a quit message, so
// even a full second of backlog at 60 fps fits comfortably
const COMMAND_RINGBUFFER_CAPACITY: usize = 64;
const NOTIFICATION_RINGBUFFER_CAPACITY: usize = 256;

/// Fixed-path click asset, read once at startup
const CLICK_SAMPLE_PATH: &str = "assets/click.wav";

const WINDOW_SIZE: f32 = 600.0;

fn main() {
    println!("=== beatbar ===");
    println!("Visual metronome\n");

    let (command_tx, command_rx) = create_command_channel(COMMAND_RINGBUFFER_CAPACITY);

    // Notification channel (for error handling)
    let (notification_tx, notification_rx) =
        create_notification_channel(NOTIFICATION_RINGBUFFER_CAPACITY);
    let notification_tx = Arc::new(Mutex::new(notification_tx));

    // Fail fast: without the click sample there is no metronome
    let click_sample = match load_click_sample(Path::new(CLICK_SAMPLE_PATH)) {
        Ok(sample) => Arc::new(sample),
        Err(e) => {
            eprintln!("ERROR: {}", e);
            return;
        }
    };
    println!(
        "Click sample loaded: {} ({} Hz)",
        click_sample.name, click_sample.sample_rate
    );

    println!("Audio engine initialisation...");
    let audio_engine = match AudioEngine::new(command_rx, notification_tx, click_sample) {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("ERROR: {}", e);
            return;
        }
    };

    println!("\n=== beatbar started ! ===\n");

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([WINDOW_SIZE, WINDOW_SIZE])
            .with_title("beatbar"),
        ..Default::default()
    };

    let _ = eframe::run_native(
        "beatbar",
        native_options,
        Box::new(|_cc| {
            Ok(Box::new(MetronomeApp::new(
                command_tx,
                audio_engine.volume.clone(),
                audio_engine.status.clone(),
                notification_rx,
            )))
        }),
    );
}
