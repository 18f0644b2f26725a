//! Procedural waveform synthesis engine.
//!
//! This module generates, frame by frame, plausible ECG, plethysmograph and
//! capnogram traces from the externally supplied vitals. Each trace owns a
//! [`WaveformEngine`]: a phase accumulator ([`scroll::PhaseScroller`]) paced
//! by the live heart rate (or the fixed breath width for EtCO2), a
//! [`variability::Variability`] generator for organic variation, and a pure
//! signal model ([`ecg`], [`spo2`], [`etco2`]) evaluated at every pixel
//! column.
//!
//! The three engines are fully independent: they share no state beyond the
//! heart-rate value carried in [`SignalParams`], and each is sampled only by
//! its own renderer.
//!
//! Invalid input never panics and never produces non-finite coordinates:
//! a missing, zero or negative heart rate freezes the ECG and plethysmograph
//! flat at baseline, and an absent vitals record freezes the capnogram.

pub mod ecg;
pub mod etco2;
pub mod scroll;
pub mod spo2;
pub mod variability;

use crate::config::{SWEEP_PX_PER_TICK, SWEEP_SPEED_PX_PER_S};
use crate::vitals::VitalsRecord;

use scroll::PhaseScroller;
use variability::{ECG_PROFILE, ETCO2_PROFILE, SPO2_PROFILE, Variability};

// =============================================================================
// Signal Parameters
// =============================================================================

/// The physiological parameters the synthesis engine consumes, extracted from
/// the latest vitals record. Read-only from the engine's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SignalParams {
    /// Validated heart rate (finite and positive), or `None` for no signal.
    pub heart_rate_bpm: Option<f32>,
    /// Validated SpO2 percentage (finite and positive), or `None`.
    pub spo2_percent: Option<f32>,
    /// Whether any vitals record has been received at all.
    pub present: bool,
}

impl SignalParams {
    /// Extract engine parameters from the latest record, if any.
    pub fn from_record(record: Option<&VitalsRecord>) -> Self {
        match record {
            Some(rec) => Self {
                heart_rate_bpm: rec.heart_rate_bpm(),
                spo2_percent: rec.spo2_percent(),
                present: true,
            },
            None => Self::default(),
        }
    }
}

// =============================================================================
// Waveform Kinds
// =============================================================================

/// The three synthesized signal types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaveformKind {
    /// Electrocardiogram, paced by heart rate.
    Ecg,
    /// SpO2 plethysmograph, paced by heart rate.
    Spo2,
    /// EtCO2 capnogram, paced by a fixed breath width.
    Etco2,
}

impl WaveformKind {
    /// Cycle length in seconds for the given parameters, or `None` when the
    /// signal has no valid pacing input and must freeze at baseline.
    fn cycle_seconds(self, params: &SignalParams) -> Option<f32> {
        match self {
            Self::Ecg => params.heart_rate_bpm.map(|bpm| 60.0 / bpm),
            // The pleth needs both a pulse to pace it and a valid SpO2 reading
            Self::Spo2 => params.spo2_percent.and(params.heart_rate_bpm).map(|bpm| 60.0 / bpm),
            Self::Etco2 => params.present.then_some(etco2::BREATH_SECONDS),
        }
    }

    fn profile(self) -> variability::VariabilityProfile {
        match self {
            Self::Ecg => ECG_PROFILE,
            Self::Spo2 => SPO2_PROFILE,
            Self::Etco2 => ETCO2_PROFILE,
        }
    }

    /// Default RNG seed, distinct per channel so the three traces never
    /// shimmer in lockstep.
    fn default_seed(self) -> u64 {
        match self {
            Self::Ecg => 0x45_43_47,
            Self::Spo2 => 0x53_50_4F,
            Self::Etco2 => 0x43_4F_32,
        }
    }
}

// =============================================================================
// Waveform Engine
// =============================================================================

/// Per-signal synthesis state: phase accumulator + variability + model.
///
/// Created when the monitor view is shown, advanced once per animation tick,
/// reset to zero offset on re-initialization, and dropped on teardown.
pub struct WaveformEngine {
    kind: WaveformKind,
    scroller: PhaseScroller,
    variability: Variability,
    /// Whether the last tick had valid pacing input. When false the engine
    /// is frozen and every sampled column returns the flat baseline.
    active: bool,
}

impl WaveformEngine {
    /// Create an engine with the channel's default seed.
    pub fn new(kind: WaveformKind) -> Self {
        Self::with_seed(kind, kind.default_seed())
    }

    /// Create an engine with an explicit RNG seed (deterministic tests).
    pub fn with_seed(kind: WaveformKind, seed: u64) -> Self {
        let initial_width = etco2::BREATH_SECONDS * SWEEP_SPEED_PX_PER_S;
        Self {
            kind,
            scroller: PhaseScroller::new(initial_width),
            variability: Variability::with_seed(kind.profile(), seed),
            active: false,
        }
    }

    /// Advance one animation tick: recompute the cycle width from the live
    /// parameters, scroll, and resample per-cycle variability on a cycle
    /// boundary. With no valid pacing input the engine freezes in place.
    pub fn tick(&mut self, params: &SignalParams) {
        let Some(cycle_s) = self.kind.cycle_seconds(params) else {
            self.active = false;
            return;
        };
        self.active = true;

        let cycle_width_px = cycle_s * SWEEP_SPEED_PX_PER_S;
        let wrapped = self.scroller.advance(SWEEP_PX_PER_TICK, cycle_width_px);
        if wrapped {
            self.variability.resample_cycle();
        }
        self.variability.advance_wander(SWEEP_PX_PER_TICK);
    }

    /// Sample the trace amplitude at pixel column `x`, in normalized units.
    ///
    /// Applies the held per-cycle scale, the baseline wander, and one
    /// independent noise draw. A frozen engine returns exactly 0.0 so the
    /// rendered trace is a clean flat line.
    ///
    /// Mutable because every call consumes one draw from the injected RNG.
    pub fn sample_column(&mut self, x: f32) -> f32 {
        if !self.active {
            return 0.0;
        }

        let phase = self.scroller.phase_at(x);
        let base = match self.kind {
            WaveformKind::Ecg => {
                let seconds_per_beat = self.scroller.cycle_width_px() / SWEEP_SPEED_PX_PER_S;
                ecg::sample(phase, seconds_per_beat)
            }
            WaveformKind::Spo2 => spo2::sample(phase),
            WaveformKind::Etco2 => etco2::sample(phase),
        };

        // The capnogram's noise amplitude depends on the breath phase
        // (larger on the plateau); the other channels use their profile's
        // fixed amplitude.
        let noise = match self.kind {
            WaveformKind::Etco2 => self.variability.noise_with_amplitude(etco2::noise_amplitude(phase)),
            _ => self.variability.noise(),
        };

        let value = base * self.variability.cycle_scale() + self.variability.wander_at(x) + noise;

        match self.kind {
            // The pleth is clamped to its unit range after variability/noise
            WaveformKind::Spo2 => value.clamp(0.0, 1.0),
            WaveformKind::Etco2 => value.clamp(0.0, 1.2),
            // Clamped to the documented range; extreme rates make neighboring
            // complexes overlap past it
            WaveformKind::Ecg => value.clamp(ecg::AMPLITUDE_MIN, ecg::AMPLITUDE_MAX),
        }
    }

    /// Reset to zero offset and neutral variability (re-initialization).
    pub fn reset(&mut self) {
        self.scroller.reset();
        self.variability.reset();
        self.active = false;
    }

    /// Whether the engine had valid pacing input on its last tick.
    #[inline]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Current cycle width in pixels (one beat or one breath).
    #[cfg(test)]
    pub fn cycle_width_px(&self) -> f32 {
        self.scroller.cycle_width_px()
    }

    /// Current scroll offset in pixels.
    #[cfg(test)]
    pub fn offset_px(&self) -> f32 {
        self.scroller.offset_px()
    }
}
