//! SpO2 plethysmograph signal model.
//!
//! One pulse is modeled piecewise over normalized phase `t` in `[0, 1)`:
//!
//! 1. Systolic upstroke `[0, UPSTROKE_END)`: logistic rise from 0 to 1,
//!    normalized so the endpoints land exactly on 0 and 1.
//! 2. Early falloff `[UPSTROKE_END, NOTCH_PHASE)`: linear decay down to the
//!    dicrotic notch at `1 - NOTCH_DEPTH`.
//! 3. Notch rebound `[NOTCH_PHASE, REBOUND_END)`: cosine-eased rise by
//!    `REBOUND_HEIGHT` (the reflected-wave bump after the notch).
//! 4. Diastolic decay `[REBOUND_END, 1)`: exponential decay with a time
//!    constant that is a fixed fraction of the cycle, so in absolute time it
//!    scales with cycle width. By the end of the cycle the tail is within a
//!    few thousandths of baseline, which keeps the 0/1 wrap seamless.
//!
//! Output is in `[0, 1]` normalized units before variability scaling.

use std::f32::consts::PI;

/// End of the systolic upstroke, as a fraction of the cycle.
pub const UPSTROKE_END: f32 = 0.12;

/// Phase of the dicrotic notch minimum.
pub const NOTCH_PHASE: f32 = 0.40;

/// End of the notch rebound bump.
pub const REBOUND_END: f32 = 0.52;

/// Depth of the fall from the systolic peak to the dicrotic notch.
pub const NOTCH_DEPTH: f32 = 0.35;

/// Height of the cosine-eased rebound after the notch.
pub const REBOUND_HEIGHT: f32 = 0.12;

/// Diastolic decay time constant, as a fraction of the cycle.
const DECAY_TAU: f32 = 0.09;

/// Steepness of the logistic upstroke.
const SIGMOID_STEEPNESS: f32 = 10.0;

/// Raw logistic function used by the upstroke, before normalization.
#[inline]
fn logistic(x: f32) -> f32 {
    1.0 / (1.0 + (-SIGMOID_STEEPNESS * (x - 0.5)).exp())
}

/// Sample the plethysmograph model at a normalized phase in `[0, 1)`.
///
/// Pure function of `phase`; out-of-range input is folded into the cycle.
pub fn sample(phase: f32) -> f32 {
    let t = phase.rem_euclid(1.0);

    if t < UPSTROKE_END {
        // Logistic rise, renormalized so sample(0) == 0 and sample(u) == 1.
        // The raw logistic only approaches 0/1 asymptotically.
        let x = t / UPSTROKE_END;
        let lo = logistic(0.0);
        let hi = logistic(1.0);
        (logistic(x) - lo) / (hi - lo)
    } else if t < NOTCH_PHASE {
        // Linear decay from the systolic peak down to the notch
        let x = (t - UPSTROKE_END) / (NOTCH_PHASE - UPSTROKE_END);
        1.0 - NOTCH_DEPTH * x
    } else if t < REBOUND_END {
        // Cosine-eased rebound off the notch floor
        let x = (t - NOTCH_PHASE) / (REBOUND_END - NOTCH_PHASE);
        let notch_floor = 1.0 - NOTCH_DEPTH;
        notch_floor + REBOUND_HEIGHT * 0.5 * (1.0 - (PI * x).cos())
    } else {
        // Exponential diastolic runoff toward baseline
        let rebound_top = 1.0 - NOTCH_DEPTH + REBOUND_HEIGHT;
        rebound_top * (-(t - REBOUND_END) / DECAY_TAU).exp()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_baseline_at_cycle_start() {
        assert!(
            sample(0.0).abs() < 1e-6,
            "pre-upstroke amplitude should be baseline, got {}",
            sample(0.0)
        );
    }

    #[test]
    fn test_upstroke_midpoint_is_half_peak() {
        // Logistic symmetry: the midpoint of the upstroke is exactly half of
        // the systolic peak.
        let mid = sample(UPSTROKE_END / 2.0);
        assert!(
            (mid - 0.5).abs() < 1e-3,
            "upstroke midpoint should be ~0.5 of peak, got {mid}"
        );
    }

    #[test]
    fn test_systolic_peak_is_unity() {
        let peak = sample(UPSTROKE_END);
        assert!((peak - 1.0).abs() < 1e-3, "systolic peak should be 1.0, got {peak}");
    }

    #[test]
    fn test_dicrotic_notch_depth() {
        let notch = sample(NOTCH_PHASE);
        let expected = 1.0 - NOTCH_DEPTH;
        assert!(
            (notch - expected).abs() < 1e-3,
            "notch floor should be {expected}, got {notch}"
        );
    }

    #[test]
    fn test_rebound_height() {
        let top = sample(REBOUND_END - 1e-5);
        let expected = 1.0 - NOTCH_DEPTH + REBOUND_HEIGHT;
        assert!(
            (top - expected).abs() < 1e-2,
            "rebound top should be {expected}, got {top}"
        );
    }

    #[test]
    fn test_continuity_at_segment_boundaries() {
        for boundary in [UPSTROKE_END, NOTCH_PHASE, REBOUND_END] {
            let before = sample(boundary - 1e-5);
            let after = sample(boundary + 1e-5);
            assert!(
                (before - after).abs() < 1e-2,
                "discontinuity at phase {boundary}: {before} vs {after}"
            );
        }
    }

    #[test]
    fn test_continuity_across_phase_wrap() {
        // Diastolic tail must have decayed to near baseline by end of cycle.
        let at_wrap = sample(1.0 - 1e-4);
        let at_zero = sample(0.0);
        assert!(
            (at_wrap - at_zero).abs() < 0.01,
            "wrap seam: {at_wrap} vs {at_zero}"
        );
    }

    #[test]
    fn test_bounded_in_unit_interval() {
        for i in 0..2000 {
            let phase = i as f32 / 2000.0;
            let value = sample(phase);
            assert!(
                (0.0..=1.0).contains(&value),
                "amplitude {value} at phase {phase} outside [0, 1]"
            );
        }
    }

    #[test]
    fn test_out_of_range_phase_is_folded() {
        let a = sample(0.25);
        assert_eq!(sample(1.25), a, "phase should fold modulo 1");
        assert_eq!(sample(-0.75), a, "negative phase should fold modulo 1");
    }
}
