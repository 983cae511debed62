// BeatClock - Repeating beat phase driven by wall-clock time
// Owns tempo and phase; display and audio read from it, never the other way

use std::fmt;

/// Beat phase clock with a mutable tempo.
///
/// Accumulates elapsed wall-clock time into a phase-within-beat value and
/// fires a boundary event each time the phase reaches one full beat period.
/// On overflow the phase resets to zero and the excess is discarded rather
/// than carried into the next beat (reset, not wrap). With coarse frame
/// deltas this drifts the phase slightly per beat; the behavior is kept
/// deliberately.
#[derive(Debug, Clone)]
pub struct BeatClock {
    tempo_bpm: f64,
    tick_rate: f64,
    phase_seconds: f64,
}

impl BeatClock {
    /// Slider lower bound
    pub const MIN_TEMPO_BPM: f64 = 10.0;
    /// Slider upper bound
    pub const MAX_TEMPO_BPM: f64 = 100.0;
    /// Startup tempo
    pub const DEFAULT_TEMPO_BPM: f64 = 30.0;
    /// Nominal frames-per-second cap of the driving loop
    pub const TICK_RATE: f64 = 60.0;

    // Tolerance so that deltas summing exactly to one period still fire on
    // the final call despite f64 summation error.
    const PHASE_EPSILON: f64 = 1e-9;

    /// Create a clock at the given tempo (clamped to the supported range).
    pub fn new(tempo_bpm: f64) -> Self {
        let mut clock = Self {
            tempo_bpm: Self::DEFAULT_TEMPO_BPM,
            tick_rate: Self::TICK_RATE,
            phase_seconds: 0.0,
        };
        clock.set_tempo(tempo_bpm);
        clock
    }

    /// Current tempo in BPM
    pub fn tempo_bpm(&self) -> f64 {
        self.tempo_bpm
    }

    /// Set the tempo, clamped to [`Self::MIN_TEMPO_BPM`, `Self::MAX_TEMPO_BPM`].
    ///
    /// Non-finite input clamps to the minimum, so the derived beat period can
    /// never be zero or NaN. The current phase is NOT reset: a tempo change
    /// takes effect on the boundary calculation immediately, not by
    /// restarting the beat.
    pub fn set_tempo(&mut self, bpm: f64) {
        let bpm = if bpm.is_finite() {
            bpm
        } else {
            Self::MIN_TEMPO_BPM
        };
        self.tempo_bpm = bpm.clamp(Self::MIN_TEMPO_BPM, Self::MAX_TEMPO_BPM);
    }

    /// Duration of one beat in seconds at the current tempo.
    ///
    /// Derived as `tick_rate / tempo_bpm`: the number of whole ticks per beat
    /// at the nominal tick rate, read as seconds. At the fixed 60 fps cap
    /// this equals the conventional `60 / bpm`.
    pub fn beat_period_seconds(&self) -> f64 {
        self.tick_rate / self.tempo_bpm
    }

    /// Raw phase: elapsed seconds since the last beat boundary.
    pub fn phase_seconds(&self) -> f64 {
        self.phase_seconds
    }

    /// Advance the clock by elapsed time since the previous call.
    ///
    /// Negative deltas are treated as zero. Returns true exactly once per
    /// boundary crossing; the phase resets to 0 and any excess beyond the
    /// period is discarded.
    pub fn advance(&mut self, delta_seconds: f64) -> bool {
        self.phase_seconds += delta_seconds.max(0.0);

        if self.phase_seconds >= self.beat_period_seconds() - Self::PHASE_EPSILON {
            self.phase_seconds = 0.0;
            return true;
        }
        false
    }

    /// Phase as a fraction of one beat period, conceptually in [0, 1).
    ///
    /// Idempotent: reading twice without an intervening [`Self::advance`]
    /// yields the same value. Callers must advance before reading within the
    /// same tick.
    pub fn normalized_phase(&self) -> f64 {
        self.phase_seconds / self.beat_period_seconds()
    }

    /// Distance to the next beat boundary in fractional-beat units,
    /// always `1 - normalized_phase()`.
    pub fn offset_from_boundary(&self) -> f64 {
        1.0 - self.normalized_phase()
    }

    /// Reset the phase to the start of a beat.
    pub fn reset(&mut self) {
        self.phase_seconds = 0.0;
    }
}

impl Default for BeatClock {
    fn default() -> Self {
        Self::new(Self::DEFAULT_TEMPO_BPM)
    }
}

impl fmt::Display for BeatClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.0} bpm", self.tempo_bpm)
    }
}
