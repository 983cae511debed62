// Command types - Communication UI -> Audio

/// Messages the UI tick pushes to the audio callback.
///
/// Pushes are `try_push`: on a full ring the command is dropped rather than
/// blocking either thread (a lost click beats a stalled callback).
#[derive(Debug, Clone, Copy)]
pub enum Command {
    /// A beat boundary fired; start the click sample
    TriggerClick,
    /// Window is closing; silence any sounding click
    Quit,
}
