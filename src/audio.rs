//! Beep scheduling for the monitor's audio feedback.
//!
//! Only the *triggering contract* lives here - when a beep should sound, not
//! how it is synthesized. The scheduler produces [`BeepKind`] events that the
//! UI consumes (pulse dot flash, debug log); an audio backend would consume
//! the same events together with the [`BeepTone`] constants.
//!
//! Timing contract:
//! - The heart beep fires once per beat, i.e. every `60000 / bpm` ms.
//!   Suppressed entirely for a missing, zero or negative heart rate.
//! - The SpO2 beep fires every 2 seconds while a valid reading is present.
//! - Arming a beep plays it immediately, then repeats on its interval.
//! - Muting cancels both pending schedules; unmuting re-arms them from the
//!   current vitals.
//! - A rate is re-armed only when its paced value changes - a poll that
//!   returns the same record must not restart the cadence mid-beat.

use std::time::{Duration, Instant};

// =============================================================================
// Tone Constants
// =============================================================================

/// The synthesis parameters of one beep, carried as data for an audio
/// backend: sine oscillator at `frequency_hz`, gain envelope decaying from
/// `gain` over `duration`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[allow(dead_code)] // Contract data for an audio backend; exercised by tests
pub struct BeepTone {
    pub frequency_hz: f32,
    pub duration: Duration,
    pub gain: f32,
}

/// Heart rate beep: lower pitch, short.
pub const HEART_TONE: BeepTone = BeepTone {
    frequency_hz: 800.0,
    duration: Duration::from_millis(100),
    gain: 0.3,
};

/// SpO2 beep: higher pitch, slightly longer.
pub const SPO2_TONE: BeepTone = BeepTone {
    frequency_hz: 1200.0,
    duration: Duration::from_millis(150),
    gain: 0.2,
};

/// Fixed cadence of the SpO2 beep.
pub const SPO2_BEEP_INTERVAL: Duration = Duration::from_millis(2000);

// =============================================================================
// Beep Events
// =============================================================================

/// A beep that is due now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BeepKind {
    /// Once per heartbeat.
    Heart,
    /// Every two seconds while SpO2 is valid.
    Spo2,
}

impl BeepKind {
    /// The tone an audio backend would synthesize for this beep.
    #[allow(dead_code)] // Contract data for an audio backend; exercised by tests
    pub const fn tone(self) -> BeepTone {
        match self {
            Self::Heart => HEART_TONE,
            Self::Spo2 => SPO2_TONE,
        }
    }
}

/// Beat interval for a heart rate, `None` when the rate cannot pace beeps.
pub fn heart_beep_interval(bpm: f32) -> Option<Duration> {
    if bpm > 0.0 && bpm.is_finite() {
        // 60000 ms per minute / BPM
        Some(Duration::from_secs_f32(60.0 / bpm))
    } else {
        None
    }
}

// =============================================================================
// Scheduler
// =============================================================================

/// Decides when beeps fire. Owned by the main loop, updated on vitals
/// changes, polled once per frame.
pub struct BeepScheduler {
    enabled: bool,
    heart_bpm: Option<f32>,
    spo2_valid: bool,
    next_heart: Option<Instant>,
    next_spo2: Option<Instant>,
}

impl BeepScheduler {
    /// Create an enabled scheduler with nothing armed.
    pub fn new() -> Self {
        Self {
            enabled: true,
            heart_bpm: None,
            spo2_valid: false,
            next_heart: None,
            next_spo2: None,
        }
    }

    /// Whether audio is currently enabled.
    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Enable or disable audio. Disabling cancels both pending schedules;
    /// enabling re-arms them from the current vitals (immediate first beep).
    pub fn set_enabled(&mut self, enabled: bool, now: Instant) {
        if self.enabled == enabled {
            return;
        }
        self.enabled = enabled;
        if enabled {
            self.arm_heart(now);
            self.arm_spo2(now);
        } else {
            self.next_heart = None;
            self.next_spo2 = None;
        }
    }

    /// Feed the latest vitals. Each cadence is re-armed only when its paced
    /// value actually changed, so steady vitals keep a steady rhythm.
    pub fn update_vitals(&mut self, heart_rate_bpm: Option<f32>, spo2_percent: Option<f32>, now: Instant) {
        if heart_rate_bpm != self.heart_bpm {
            self.heart_bpm = heart_rate_bpm;
            if self.enabled {
                self.arm_heart(now);
            }
        }

        let spo2_valid = spo2_percent.is_some();
        if spo2_valid != self.spo2_valid {
            self.spo2_valid = spo2_valid;
            if self.enabled {
                self.arm_spo2(now);
            }
        }
    }

    /// Collect the beeps due at `now`. At most one of each kind per call;
    /// the next occurrence is scheduled from `now`, so a stalled frame does
    /// not burst-fire a backlog.
    pub fn poll(&mut self, now: Instant) -> heapless::Vec<BeepKind, 2> {
        let mut due = heapless::Vec::new();
        if !self.enabled {
            return due;
        }

        if let Some(at) = self.next_heart
            && at <= now
        {
            // Interval recomputed each beat so it tracks the cached rate
            self.next_heart = self
                .heart_bpm
                .and_then(heart_beep_interval)
                .map(|interval| now + interval);
            if self.next_heart.is_some() {
                let _ = due.push(BeepKind::Heart);
            }
        }

        if let Some(at) = self.next_spo2
            && at <= now
        {
            self.next_spo2 = Some(now + SPO2_BEEP_INTERVAL);
            let _ = due.push(BeepKind::Spo2);
        }

        due
    }

    fn arm_heart(&mut self, now: Instant) {
        // Immediate first beep when a valid rate is present
        self.next_heart = self.heart_bpm.and_then(heart_beep_interval).map(|_| now);
    }

    fn arm_spo2(&mut self, now: Instant) {
        self.next_spo2 = self.spo2_valid.then_some(now);
    }
}

impl Default for BeepScheduler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_heart_interval_is_60000_over_bpm() {
        assert_eq!(heart_beep_interval(60.0), Some(ms(1000)));
        assert_eq!(heart_beep_interval(120.0), Some(ms(500)));
        let at_75 = heart_beep_interval(75.0).expect("valid rate");
        assert!((at_75.as_secs_f32() - 0.8).abs() < 1e-6, "75 BPM should beep every 800 ms");
    }

    #[test]
    fn test_invalid_rates_never_beep() {
        assert_eq!(heart_beep_interval(0.0), None);
        assert_eq!(heart_beep_interval(-10.0), None);
        assert_eq!(heart_beep_interval(f32::NAN), None);
    }

    #[test]
    fn test_immediate_beep_then_cadence() {
        let t0 = Instant::now();
        let mut sched = BeepScheduler::new();
        sched.update_vitals(Some(60.0), Some(98.0), t0);

        // Both fire immediately on arming
        let first = sched.poll(t0);
        assert!(first.contains(&BeepKind::Heart), "heart beep should fire immediately");
        assert!(first.contains(&BeepKind::Spo2), "SpO2 beep should fire immediately");

        // Nothing more until the intervals elapse
        assert!(sched.poll(t0 + ms(500)).is_empty());

        // 60 BPM: next heart beep at t0 + 1 s
        let at_1s = sched.poll(t0 + ms(1001));
        assert!(at_1s.contains(&BeepKind::Heart));
        assert!(!at_1s.contains(&BeepKind::Spo2), "SpO2 cadence is 2 s");

        // SpO2 beep lands at t0 + 2 s alongside the next heart beep
        let at_2s = sched.poll(t0 + ms(2002));
        assert!(at_2s.contains(&BeepKind::Heart));
        assert!(at_2s.contains(&BeepKind::Spo2));
    }

    #[test]
    fn test_zero_heart_rate_suppresses_heart_beep() {
        let t0 = Instant::now();
        let mut sched = BeepScheduler::new();
        sched.update_vitals(None, Some(98.0), t0);

        let due = sched.poll(t0);
        assert!(!due.contains(&BeepKind::Heart), "no pulse, no heart beep");
        assert!(due.contains(&BeepKind::Spo2));
    }

    #[test]
    fn test_invalid_spo2_suppresses_spo2_beep() {
        let t0 = Instant::now();
        let mut sched = BeepScheduler::new();
        sched.update_vitals(Some(70.0), None, t0);

        let due = sched.poll(t0);
        assert!(due.contains(&BeepKind::Heart));
        assert!(!due.contains(&BeepKind::Spo2), "no reading, no SpO2 beep");
    }

    #[test]
    fn test_unchanged_vitals_do_not_restart_cadence() {
        let t0 = Instant::now();
        let mut sched = BeepScheduler::new();
        sched.update_vitals(Some(60.0), Some(98.0), t0);
        assert!(!sched.poll(t0).is_empty());

        // A poll 900 ms later delivers the same record; the pending beep at
        // t0 + 1 s must not move.
        sched.update_vitals(Some(60.0), Some(98.0), t0 + ms(900));
        let due = sched.poll(t0 + ms(1001));
        assert!(
            due.contains(&BeepKind::Heart),
            "unchanged vitals must not push the heart beep back"
        );
    }

    #[test]
    fn test_rate_change_rearms_immediately() {
        let t0 = Instant::now();
        let mut sched = BeepScheduler::new();
        sched.update_vitals(Some(60.0), Some(98.0), t0);
        sched.poll(t0);

        // New rate arrives mid-interval: beep immediately, then at the new cadence
        sched.update_vitals(Some(120.0), Some(98.0), t0 + ms(300));
        assert!(sched.poll(t0 + ms(300)).contains(&BeepKind::Heart));
        assert!(sched.poll(t0 + ms(600)).is_empty(), "next beep is 500 ms after re-arm");
        assert!(sched.poll(t0 + ms(801)).contains(&BeepKind::Heart));
    }

    #[test]
    fn test_mute_cancels_and_unmute_rearms() {
        let t0 = Instant::now();
        let mut sched = BeepScheduler::new();
        sched.update_vitals(Some(60.0), Some(98.0), t0);
        sched.poll(t0);

        sched.set_enabled(false, t0 + ms(100));
        assert!(sched.poll(t0 + ms(2500)).is_empty(), "muted scheduler must stay silent");

        // Unmuting re-arms both from the current vitals
        sched.set_enabled(true, t0 + ms(3000));
        let due = sched.poll(t0 + ms(3000));
        assert!(due.contains(&BeepKind::Heart));
        assert!(due.contains(&BeepKind::Spo2));
    }

    #[test]
    fn test_stalled_frame_does_not_burst_fire() {
        let t0 = Instant::now();
        let mut sched = BeepScheduler::new();
        sched.update_vitals(Some(120.0), None, t0);
        sched.poll(t0);

        // 5 intervals pass without polling; only one beep is delivered and
        // the cadence restarts from the late poll.
        let late = t0 + ms(2500);
        let due = sched.poll(late);
        assert_eq!(due.len(), 1, "no backlog burst after a stall");
        assert!(sched.poll(late + ms(499)).is_empty());
        assert!(sched.poll(late + ms(501)).contains(&BeepKind::Heart));
    }

    #[test]
    fn test_tone_constants_match_contract() {
        assert_eq!(BeepKind::Heart.tone(), HEART_TONE);
        assert_eq!(BeepKind::Spo2.tone(), SPO2_TONE);
        assert_eq!(HEART_TONE.frequency_hz, 800.0);
        assert_eq!(SPO2_TONE.frequency_hz, 1200.0);
        assert_eq!(SPO2_BEEP_INTERVAL, Duration::from_secs(2));
    }
}
