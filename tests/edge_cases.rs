//! Edge case tests and robustness validation
//!
//! Extreme scenarios and hostile inputs: the metronome must keep producing
//! finite, bounded values and never get stuck, whatever the frame timing or
//! slider plumbing throws at it.

use beatbar::BeatClock;
use beatbar::EdgeDetector;
use beatbar::audio::dsp_utils::{OnePoleSmoother, flush_denormals_to_zero, soft_clip};

/// Non-finite tempo input clamps instead of poisoning the period
#[test]
fn test_clock_non_finite_tempo() {
    let mut clock = BeatClock::new(f64::NAN);
    assert_eq!(clock.tempo_bpm(), BeatClock::MIN_TEMPO_BPM);
    assert!(clock.beat_period_seconds().is_finite());

    clock.set_tempo(f64::INFINITY);
    assert_eq!(clock.tempo_bpm(), BeatClock::MIN_TEMPO_BPM);

    clock.set_tempo(f64::NEG_INFINITY);
    assert_eq!(clock.tempo_bpm(), BeatClock::MIN_TEMPO_BPM);

    // Clock still works after the abuse
    clock.set_tempo(60.0);
    assert!(clock.advance(1.0));
}

/// NaN frame deltas are treated as zero elapsed time
#[test]
fn test_clock_nan_delta() {
    let mut clock = BeatClock::new(60.0);
    clock.advance(0.25);

    assert!(!clock.advance(f64::NAN));
    assert_eq!(clock.phase_seconds(), 0.25);
    assert!(clock.normalized_phase().is_finite());
}

/// A stalled frame (huge delta) fires one beat and leaves a clean phase
#[test]
fn test_clock_huge_delta() {
    let mut clock = BeatClock::new(60.0);

    assert!(clock.advance(1e9));
    assert_eq!(clock.phase_seconds(), 0.0);

    assert!(clock.advance(f64::INFINITY));
    assert_eq!(clock.phase_seconds(), 0.0);

    // Normal cadence resumes
    assert!(!clock.advance(0.5));
    assert!(clock.advance(0.5));
}

/// Phase stays finite and non-negative over a long mixed sequence
#[test]
fn test_clock_long_mixed_sequence() {
    let mut clock = BeatClock::new(10.0);

    let deltas = [0.0, 0.016, -1.0, 0.25, 3.0, 0.001, 100.0, 0.016];
    for _ in 0..1000 {
        for (i, &delta) in deltas.iter().enumerate() {
            clock.advance(delta);
            // Exercise tempo changes mid-beat as the slider would
            if i % 3 == 0 {
                clock.set_tempo(10.0 + (i as f64) * 11.0);
            }

            let phase = clock.normalized_phase();
            assert!(phase.is_finite());
            assert!(phase >= 0.0);
            assert!(clock.offset_from_boundary().is_finite());
        }
    }
}

/// At the nominal 60 fps cap, a 60 BPM clock fires once per second exactly
#[test]
fn test_clock_nominal_frame_cadence() {
    let mut clock = BeatClock::new(60.0);
    let frame = 1.0 / 60.0;

    let mut fired = 0;
    for _ in 0..3600 {
        if clock.advance(frame) {
            fired += 1;
        }
    }
    assert_eq!(fired, 60);
}

/// Reset-on-overflow drift: coarse deltas make beats take longer than the
/// period because the overshoot is discarded, never carried forward
#[test]
fn test_clock_coarse_delta_drift() {
    let mut clock = BeatClock::new(60.0); // 1.0s period

    // 0.4s steps: phase runs 0.4, 0.8, 1.2 -> fire; a beat costs three
    // steps (1.2s of wall clock), not two and a half
    for cycle in 0..10 {
        assert!(!clock.advance(0.4), "cycle {}", cycle);
        assert!(!clock.advance(0.4), "cycle {}", cycle);
        assert!(clock.advance(0.4), "cycle {}", cycle);
        assert_eq!(clock.phase_seconds(), 0.0);
    }
}

/// Edge detector survives rapid toggling and always fires on fresh presses
#[test]
fn test_edge_detector_rapid_toggle() {
    let mut edge = EdgeDetector::new();

    let mut presses = 0;
    for i in 0..1000 {
        if edge.update(i % 2 == 0) {
            presses += 1;
        }
    }
    assert_eq!(presses, 500);
}

/// Smoother with a degenerate time constant jumps straight to the target
#[test]
fn test_smoother_degenerate_time_constant() {
    let mut smoother = OnePoleSmoother::new(0.0, 0.0, 48000.0);

    let value = smoother.process(1.0);
    assert!(value.is_finite());
    assert_eq!(value, 1.0);
}

/// Soft clip bounds arbitrarily hot input
#[test]
fn test_soft_clip_extremes() {
    assert!(soft_clip(f32::INFINITY) <= 1.0);
    assert!(soft_clip(f32::NEG_INFINITY) >= -1.0);
    assert!(soft_clip(1e30).is_finite());
}

/// Denormal flush leaves audible values alone
#[test]
fn test_denormal_flush_preserves_signal() {
    for &x in &[1.0f32, -1.0, 0.5, 1e-6, -1e-6] {
        assert_eq!(flush_denormals_to_zero(x), x);
    }
    assert_eq!(flush_denormals_to_zero(f32::MIN_POSITIVE / 2.0), 0.0);
}
