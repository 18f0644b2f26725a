//! Bounded pseudo-random variation layered onto the signal models.
//!
//! Three independent layers give the traces their organic texture:
//!
//! - **Per-cycle scale**: one scalar drawn uniformly from a bounded range at
//!   each cycle boundary (beat-to-beat for ECG/SpO2, breath-to-breath for
//!   EtCO2) and held for the whole cycle. Never resampled per pixel.
//! - **Baseline wander**: a slow sinusoid with a period much longer than one
//!   cycle, evaluated in scroll space so the drift travels with the trace.
//!   Deterministic, no randomness involved.
//! - **Per-pixel noise**: a small independent uniform draw for every sampled
//!   column. Independent draws, not a random walk - the noise never
//!   accumulates.
//!
//! The random source is an injected seedable [`SmallRng`], so two generators
//! constructed with the same seed produce identical sequences (the property
//! the determinism tests rely on).

use rand::Rng;
use rand::SeedableRng;
use rand::rngs::SmallRng;

/// Wavelength of the baseline wander in scroll pixels. At 120 px/s sweep this
/// is a 7.5 s period, several times the longest modeled cycle.
const WANDER_PERIOD_PX: f32 = 900.0;

/// Per-cycle variation bounds and texture amplitudes for one signal.
#[derive(Debug, Clone, Copy)]
pub struct VariabilityProfile {
    /// Lower bound of the per-cycle amplitude scale.
    pub scale_min: f32,
    /// Upper bound of the per-cycle amplitude scale.
    pub scale_max: f32,
    /// Peak amplitude of the slow baseline wander, in normalized units.
    pub wander_amp: f32,
    /// Default per-pixel noise amplitude, in normalized units.
    pub noise_amp: f32,
}

/// Beat-to-beat amplitude variation for the ECG (+/-15%).
pub const ECG_PROFILE: VariabilityProfile = VariabilityProfile {
    scale_min: 0.85,
    scale_max: 1.15,
    wander_amp: 0.05,
    noise_amp: 0.01,
};

/// Per-pulse scale for the plethysmograph.
pub const SPO2_PROFILE: VariabilityProfile = VariabilityProfile {
    scale_min: 0.85,
    scale_max: 1.15,
    wander_amp: 0.03,
    noise_amp: 0.01,
};

/// Per-breath scale for the capnogram. Noise amplitude here is only the
/// floor; the capnogram model supplies a larger plateau amplitude per phase.
pub const ETCO2_PROFILE: VariabilityProfile = VariabilityProfile {
    scale_min: 0.90,
    scale_max: 1.10,
    wander_amp: 0.02,
    noise_amp: 0.006,
};

/// Per-signal variability state. One instance per trace.
pub struct Variability {
    rng: SmallRng,
    profile: VariabilityProfile,
    cycle_scale: f32,
    wander_px: f32,
}

impl Variability {
    /// Create a generator with an explicit seed (deterministic).
    pub fn with_seed(profile: VariabilityProfile, seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
            profile,
            cycle_scale: 1.0,
            wander_px: 0.0,
        }
    }

    /// Resample the per-cycle scale. Called once at each cycle boundary.
    pub fn resample_cycle(&mut self) {
        self.cycle_scale = self.rng.gen_range(self.profile.scale_min..=self.profile.scale_max);
    }

    /// The amplitude scale held for the current cycle.
    #[inline]
    pub fn cycle_scale(&self) -> f32 {
        self.cycle_scale
    }

    /// Advance the wander offset by the scroll step for this tick.
    pub fn advance_wander(&mut self, step_px: f32) {
        self.wander_px = (self.wander_px + step_px) % WANDER_PERIOD_PX;
    }

    /// Baseline wander contribution at pixel column `x`.
    pub fn wander_at(&self, x: f32) -> f32 {
        let phase = std::f32::consts::TAU * (x + self.wander_px) / WANDER_PERIOD_PX;
        self.profile.wander_amp * phase.sin()
    }

    /// One independent noise draw with the profile's default amplitude.
    pub fn noise(&mut self) -> f32 {
        self.noise_with_amplitude(self.profile.noise_amp)
    }

    /// One independent noise draw with an explicit amplitude (used by the
    /// capnogram's phase-dependent plateau noise).
    pub fn noise_with_amplitude(&mut self, amplitude: f32) -> f32 {
        if amplitude <= 0.0 {
            return 0.0;
        }
        self.rng.gen_range(-amplitude..=amplitude)
    }

    /// Reset mutable state (display re-initialization). The RNG stream is
    /// left untouched; only the held scale and wander offset return to their
    /// initial values.
    pub fn reset(&mut self) {
        self.cycle_scale = 1.0;
        self.wander_px = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_scale_stays_in_bounds() {
        let mut var = Variability::with_seed(ECG_PROFILE, 42);
        for _ in 0..1000 {
            var.resample_cycle();
            let scale = var.cycle_scale();
            assert!(
                scale >= ECG_PROFILE.scale_min && scale <= ECG_PROFILE.scale_max,
                "cycle scale {scale} escaped [{}, {}]",
                ECG_PROFILE.scale_min,
                ECG_PROFILE.scale_max
            );
        }
    }

    #[test]
    fn test_cycle_scale_held_between_resamples() {
        let mut var = Variability::with_seed(SPO2_PROFILE, 7);
        var.resample_cycle();
        let held = var.cycle_scale();
        // Noise draws and wander advances must not disturb the held scale
        for _ in 0..100 {
            let _ = var.noise();
            var.advance_wander(2.4);
        }
        assert_eq!(var.cycle_scale(), held, "cycle scale must only change on resample");
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = Variability::with_seed(ECG_PROFILE, 1234);
        let mut b = Variability::with_seed(ECG_PROFILE, 1234);
        for _ in 0..200 {
            assert_eq!(a.noise(), b.noise(), "seeded generators must agree");
        }
        a.resample_cycle();
        b.resample_cycle();
        assert_eq!(a.cycle_scale(), b.cycle_scale());
    }

    #[test]
    fn test_different_seeds_diverge() {
        let mut a = Variability::with_seed(ECG_PROFILE, 1);
        let mut b = Variability::with_seed(ECG_PROFILE, 2);
        let same = (0..50).filter(|_| a.noise() == b.noise()).count();
        assert!(same < 50, "different seeds should produce different noise");
    }

    #[test]
    fn test_noise_is_bounded_and_independent() {
        let mut var = Variability::with_seed(ECG_PROFILE, 99);
        let mut sum = 0.0f32;
        for _ in 0..10_000 {
            let n = var.noise();
            assert!(n.abs() <= ECG_PROFILE.noise_amp + 1e-6, "noise draw {n} out of bounds");
            sum += n;
        }
        // Independent zero-mean draws: the running sum must not drift like a
        // random walk scaled by the sample count.
        assert!(
            sum.abs() < ECG_PROFILE.noise_amp * 500.0,
            "noise sum {sum} suggests accumulation"
        );
    }

    #[test]
    fn test_wander_is_slow_and_bounded() {
        let mut var = Variability::with_seed(ECG_PROFILE, 5);
        let w0 = var.wander_at(0.0);
        var.advance_wander(2.4);
        let w1 = var.wander_at(0.0);
        // One tick moves the wander by a tiny fraction of its period
        assert!((w1 - w0).abs() < 0.01, "wander must drift slowly per tick");
        for x in 0..1000 {
            assert!(
                var.wander_at(x as f32).abs() <= ECG_PROFILE.wander_amp + 1e-6,
                "wander exceeded its amplitude"
            );
        }
    }

    #[test]
    fn test_zero_amplitude_noise_is_zero() {
        let mut var = Variability::with_seed(ETCO2_PROFILE, 3);
        assert_eq!(var.noise_with_amplitude(0.0), 0.0);
    }
}
