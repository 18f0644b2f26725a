//! Vital-sign history tracking for trend arrows.
//!
//! Each numeric vital that shows a trend arrow (heart rate, SpO2) keeps a
//! `VitalTrend` instance fed once per intake update. Trends compare the
//! average of the most recent samples against the oldest samples in the
//! buffer, so a noisy reading does not flip the arrow every second.

use std::collections::VecDeque;

use crate::config::HISTORY_SIZE;

/// Number of samples averaged at each end of the history for the comparison.
const TREND_WINDOW: usize = 5;

/// Rolling history of one displayed vital.
pub struct VitalTrend {
    /// FIFO of recent readings, capped at `HISTORY_SIZE`.
    history: VecDeque<f32>,
    /// Minimum recent-vs-old difference that counts as a trend.
    threshold: f32,
}

impl VitalTrend {
    /// Create an empty history with the given trend threshold.
    pub fn new(threshold: f32) -> Self {
        Self {
            history: VecDeque::with_capacity(HISTORY_SIZE),
            threshold,
        }
    }

    /// Record a reading. `None` readings (no signal) clear the history so a
    /// stale trend does not survive a sensor dropout.
    pub fn update(&mut self, value: Option<f32>) {
        match value {
            Some(v) => {
                if self.history.len() >= HISTORY_SIZE {
                    self.history.pop_front();
                }
                self.history.push_back(v);
            }
            None => self.history.clear(),
        }
    }

    /// Current trend direction, if significant.
    ///
    /// # Returns
    /// - `Some(true)`: rising (recent average above older by the threshold)
    /// - `Some(false)`: falling
    /// - `None`: not enough data, or stable
    pub fn direction(&self) -> Option<bool> {
        if self.history.len() < 2 * TREND_WINDOW {
            return None;
        }

        let recent: f32 = self.history.iter().rev().take(TREND_WINDOW).sum::<f32>() / TREND_WINDOW as f32;
        let older: f32 = self.history.iter().take(TREND_WINDOW).sum::<f32>() / TREND_WINDOW as f32;

        let diff = recent - older;
        if diff.abs() < self.threshold {
            None
        } else {
            Some(diff > 0.0)
        }
    }

    /// Drop all history (display re-initialization).
    pub fn reset(&mut self) {
        self.history.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_trend_with_insufficient_data() {
        let mut trend = VitalTrend::new(1.0);
        for i in 0..(2 * TREND_WINDOW - 1) {
            trend.update(Some(i as f32));
        }
        assert!(trend.direction().is_none(), "need a full window at both ends");
    }

    #[test]
    fn test_rising_trend() {
        let mut trend = VitalTrend::new(1.0);
        for i in 0..20 {
            trend.update(Some(60.0 + i as f32));
        }
        assert_eq!(trend.direction(), Some(true), "steadily rising values should trend up");
    }

    #[test]
    fn test_falling_trend() {
        let mut trend = VitalTrend::new(1.0);
        for i in 0..20 {
            trend.update(Some(100.0 - i as f32));
        }
        assert_eq!(trend.direction(), Some(false), "steadily falling values should trend down");
    }

    #[test]
    fn test_stable_below_threshold() {
        let mut trend = VitalTrend::new(2.0);
        for i in 0..20 {
            trend.update(Some(72.0 + (i % 2) as f32 * 0.5));
        }
        assert!(trend.direction().is_none(), "jitter below the threshold is stable");
    }

    #[test]
    fn test_dropout_clears_history() {
        let mut trend = VitalTrend::new(1.0);
        for i in 0..20 {
            trend.update(Some(60.0 + i as f32));
        }
        assert!(trend.direction().is_some());

        trend.update(None);
        assert!(trend.direction().is_none(), "a dropout must clear the trend");
    }

    #[test]
    fn test_history_is_bounded() {
        let mut trend = VitalTrend::new(1.0);
        for i in 0..(HISTORY_SIZE + 100) {
            trend.update(Some(i as f32));
        }
        assert!(trend.history.len() <= HISTORY_SIZE, "history must not grow unbounded");
    }

    #[test]
    fn test_reset_clears() {
        let mut trend = VitalTrend::new(1.0);
        for i in 0..20 {
            trend.update(Some(i as f32));
        }
        trend.reset();
        assert!(trend.direction().is_none());
    }
}
