//! ECG signal model: Gaussian-sum PQRST morphology.
//!
//! The electrical complex of one heartbeat is modeled as a sum of five
//! Gaussian deflections (P, Q, R, S, T), each defined by an amplitude, a
//! full-width-at-half-maximum duration, and a center offset in seconds
//! relative to the R peak. The R peak sits at cycle phase 0, so the trace
//! wraps exactly on the dominant spike.
//!
//! Summed Gaussians are continuous and differentiable everywhere, which gives
//! smooth deflections without any phase branching. To keep the trace seamless
//! across the 0/1 phase wrap (and at high heart rates where neighboring
//! complexes overlap), each sample sums the contributions of the previous,
//! current, and next cardiac cycle.
//!
//! Output is in normalized units: the R peak reaches [`R_AMPLITUDE`] and the
//! full signal stays within [`AMPLITUDE_MIN`]..[`AMPLITUDE_MAX`] for any
//! variability scale within the documented bounds at physiological rates
//! (up to ~150 BPM). Beyond that, neighboring complexes overlap enough to
//! exceed the range; the synthesis engine clamps to the documented bounds so
//! pixel math never sees an out-of-range value.

/// Conversion from full-width-at-half-maximum to Gaussian standard deviation.
pub const FWHM_TO_SIGMA: f32 = 2.355;

/// Normalized amplitude of the R deflection (dominates all others by > 3x).
pub const R_AMPLITUDE: f32 = 1.60;

/// Documented lower bound of the model output including variability.
pub const AMPLITUDE_MIN: f32 = -0.5;

/// Documented upper bound of the model output including variability.
pub const AMPLITUDE_MAX: f32 = 2.0;

/// One named deflection of the PQRST complex.
#[derive(Debug, Clone, Copy)]
pub struct EcgComponent {
    /// Peak amplitude in normalized units (negative for downward deflections).
    pub amplitude: f32,
    /// Full-width-at-half-maximum duration in seconds.
    pub duration_s: f32,
    /// Center offset in seconds relative to the R peak.
    pub center_s: f32,
}

/// The five deflections of a normal sinus beat, centered on the R peak.
///
/// Timings follow textbook surface-ECG intervals: the P wave ~200 ms before
/// the QRS, narrow Q and S flanking the R spike, and a broad T wave ~300 ms
/// after repolarization onset.
pub const COMPONENTS: [EcgComponent; 5] = [
    // P wave: small atrial depolarization hump
    EcgComponent {
        amplitude: 0.15,
        duration_s: 0.09,
        center_s: -0.20,
    },
    // Q wave: narrow negative deflection just before R
    EcgComponent {
        amplitude: -0.12,
        duration_s: 0.03,
        center_s: -0.035,
    },
    // R wave: the dominant spike
    EcgComponent {
        amplitude: R_AMPLITUDE,
        duration_s: 0.035,
        center_s: 0.0,
    },
    // S wave: negative deflection right after R
    EcgComponent {
        amplitude: -0.25,
        duration_s: 0.035,
        center_s: 0.04,
    },
    // T wave: broad repolarization hump
    EcgComponent {
        amplitude: 0.35,
        duration_s: 0.16,
        center_s: 0.30,
    },
];

/// Evaluate one Gaussian deflection at time `t` seconds from the R peak.
#[inline]
fn deflection(t: f32, component: &EcgComponent) -> f32 {
    let sigma = component.duration_s / FWHM_TO_SIGMA;
    let x = (t - component.center_s) / sigma;
    component.amplitude * (-0.5 * x * x).exp()
}

/// Sample the ECG model at a normalized phase within one cardiac cycle.
///
/// `phase` is in `[0, 1)` with the R peak at 0; `seconds_per_beat` is the
/// cycle length (`60 / bpm`). Pure function: no state, no randomness.
///
/// A non-positive or non-finite cycle length yields the isoelectric baseline
/// (0.0) rather than dividing by zero or producing non-finite output.
pub fn sample(phase: f32, seconds_per_beat: f32) -> f32 {
    if !(seconds_per_beat > 0.0) || !seconds_per_beat.is_finite() {
        return 0.0;
    }

    let t = phase * seconds_per_beat;
    let mut signal = 0.0;

    // Sum the previous, current, and next complex so the trace is continuous
    // across the phase wrap and overlapping complexes merge at high rates.
    for cycle in [-1.0f32, 0.0, 1.0] {
        let tc = t + cycle * seconds_per_beat;
        for component in &COMPONENTS {
            signal += deflection(tc, component);
        }
    }

    signal
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 60 BPM reference cycle length.
    const ONE_SECOND_BEAT: f32 = 1.0;

    #[test]
    fn test_r_peak_amplitude_at_phase_zero() {
        // R component is centered at phase 0; sample there should be within
        // 5% of the R amplitude (neighboring deflections contribute almost
        // nothing at this distance).
        let value = sample(0.0, ONE_SECOND_BEAT);
        let error = (value - R_AMPLITUDE).abs() / R_AMPLITUDE;
        assert!(
            error < 0.05,
            "R peak should be within 5% of {R_AMPLITUDE}, got {value}"
        );
    }

    #[test]
    fn test_r_dominates_other_deflections() {
        for component in &COMPONENTS {
            if component.center_s == 0.0 {
                continue;
            }
            assert!(
                R_AMPLITUDE >= 3.0 * component.amplitude.abs(),
                "R amplitude must dominate {component:?} by at least 3x"
            );
        }
    }

    #[test]
    fn test_continuity_across_phase_wrap() {
        // No visible seam: phase 0 and phase 1-eps must agree closely.
        for bpm in [40.0f32, 60.0, 100.0, 150.0] {
            let spb = 60.0 / bpm;
            let at_zero = sample(0.0, spb);
            let at_wrap = sample(1.0 - 1e-4, spb);
            assert!(
                (at_zero - at_wrap).abs() < 0.05,
                "wrap seam at {bpm} BPM: {at_zero} vs {at_wrap}"
            );
        }
    }

    #[test]
    fn test_bounded_output_over_full_cycle() {
        // With the maximum variability scale (1.15) the signal must stay
        // within the documented normalized range for every phase.
        for bpm in [40.0f32, 60.0, 120.0, 150.0] {
            let spb = 60.0 / bpm;
            for i in 0..1000 {
                let phase = i as f32 / 1000.0;
                let value = sample(phase, spb) * 1.15;
                assert!(
                    value >= AMPLITUDE_MIN && value <= AMPLITUDE_MAX,
                    "amplitude {value} at phase {phase} ({bpm} BPM) outside [{AMPLITUDE_MIN}, {AMPLITUDE_MAX}]"
                );
                assert!(value.is_finite(), "non-finite amplitude at phase {phase}");
            }
        }
    }

    #[test]
    fn test_zero_cycle_length_is_flat_baseline() {
        for phase in [0.0f32, 0.25, 0.5, 0.99] {
            assert_eq!(sample(phase, 0.0), 0.0, "zero cycle length must be baseline");
            assert_eq!(sample(phase, -1.0), 0.0, "negative cycle length must be baseline");
            assert_eq!(sample(phase, f32::NAN), 0.0, "NaN cycle length must be baseline");
        }
    }

    #[test]
    fn test_isoelectric_between_t_and_next_p() {
        // Mid-diastole (around phase 0.6 at 60 BPM) sits between the T wave
        // and the next P wave; the signal should be near baseline there.
        let value = sample(0.6, ONE_SECOND_BEAT);
        assert!(
            value.abs() < 0.02,
            "diastolic segment should be near baseline, got {value}"
        );
    }

    #[test]
    fn test_pure_function_is_deterministic() {
        for i in 0..100 {
            let phase = i as f32 / 100.0;
            assert_eq!(
                sample(phase, ONE_SECOND_BEAT),
                sample(phase, ONE_SECOND_BEAT),
                "sample must be a pure function of its inputs"
            );
        }
    }
}
