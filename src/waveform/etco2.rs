//! EtCO2 capnography signal model.
//!
//! One breath is modeled piecewise over normalized phase `t` in `[0, 1)`,
//! following the conventional capnogram phases:
//!
//! - Inspiratory baseline `[0, INSP_END)`: zero CO2.
//! - Phase I `[INSP_END, PHASE1_END)`: gradual power-law rise as dead-space
//!   gas clears.
//! - Phase II `[PHASE1_END, PHASE2_END)`: rapid power-law rise with a higher
//!   exponent as alveolar gas arrives.
//! - Phase III `[PHASE2_END, PLATEAU_END)`: near-flat alveolar plateau with a
//!   mild upward slope ending at the end-tidal maximum.
//! - Phase IV/0 `[PLATEAU_END, 1)`: rapid power-law fall back to baseline on
//!   inspiration.
//!
//! Measurement noise on a real capnogram is visibly larger on the plateau
//! than near baseline; [`noise_amplitude`] exposes that phase-dependent
//! amplitude for the per-pixel noise layer.
//!
//! The breath cycle is paced by a fixed breath width ([`BREATH_SECONDS`]),
//! deliberately independent of heart rate.

/// Fixed breath cycle length in seconds (15 breaths per minute).
pub const BREATH_SECONDS: f32 = 4.0;

/// End of the inspiratory (zero) baseline, as a fraction of the breath.
pub const INSP_END: f32 = 0.45;

/// End of phase I (dead-space washout).
pub const PHASE1_END: f32 = 0.58;

/// End of phase II (rapid expiratory upstroke).
pub const PHASE2_END: f32 = 0.68;

/// End of phase III (alveolar plateau); the expiratory fall starts here.
pub const PLATEAU_END: f32 = 0.93;

/// Level reached at the end of phase I.
const PHASE1_LEVEL: f32 = 0.25;

/// Level reached at the end of phase II.
const PHASE2_LEVEL: f32 = 0.92;

/// End-tidal maximum at the end of the plateau.
const PLATEAU_TOP: f32 = 1.0;

/// Power-law exponent of the phase I rise.
const PHASE1_EXP: f32 = 1.4;

/// Power-law exponent of the phase II rise (steeper curvature).
const PHASE2_EXP: f32 = 2.2;

/// Power-law exponent of the expiratory fall.
const FALL_EXP: f32 = 1.8;

/// Per-pixel noise amplitude near baseline and on the rises.
const BASE_NOISE: f32 = 0.006;

/// Per-pixel noise amplitude on the alveolar plateau.
const PLATEAU_NOISE: f32 = 0.02;

/// Sample the capnogram model at a normalized phase in `[0, 1)`.
///
/// Pure function of `phase`; out-of-range input is folded into the cycle.
/// Output is in `[0, 1]` normalized units before variability scaling.
pub fn sample(phase: f32) -> f32 {
    let t = phase.rem_euclid(1.0);

    if t < INSP_END {
        0.0
    } else if t < PHASE1_END {
        let x = (t - INSP_END) / (PHASE1_END - INSP_END);
        PHASE1_LEVEL * x.powf(PHASE1_EXP)
    } else if t < PHASE2_END {
        let x = (t - PHASE1_END) / (PHASE2_END - PHASE1_END);
        PHASE1_LEVEL + (PHASE2_LEVEL - PHASE1_LEVEL) * x.powf(PHASE2_EXP)
    } else if t < PLATEAU_END {
        // Mild linear upslope across the plateau to the end-tidal point
        let x = (t - PHASE2_END) / (PLATEAU_END - PHASE2_END);
        PHASE2_LEVEL + (PLATEAU_TOP - PHASE2_LEVEL) * x
    } else {
        let x = (t - PLATEAU_END) / (1.0 - PLATEAU_END);
        PLATEAU_TOP * (1.0 - x).powf(FALL_EXP)
    }
}

/// Per-pixel noise amplitude at the given phase.
///
/// Larger on the alveolar plateau than elsewhere.
pub fn noise_amplitude(phase: f32) -> f32 {
    let t = phase.rem_euclid(1.0);
    if (PHASE2_END..PLATEAU_END).contains(&t) {
        PLATEAU_NOISE
    } else {
        BASE_NOISE
    }
}
