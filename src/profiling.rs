//! Profiling metrics and debug logging for performance monitoring.
//!
//! Provides frame timing statistics, render counters, and a ring buffer for
//! debug messages displayed on the debug page.
//!
//! # Usage
//!
//! ```ignore
//! let mut metrics = ProfilingMetrics::new();
//! let mut log = DebugLog::new();
//!
//! // In main loop:
//! let frame_start = Instant::now();
//! // ... render work ...
//! metrics.record_frame(frame_start.elapsed(), render_time, sleep_time);
//!
//! // Log events:
//! log.push("Vitals updated");
//! ```

use std::time::{Duration, Instant};

use heapless::{Deque, String};

// =============================================================================
// Debug Log Configuration
// =============================================================================

/// Maximum number of log lines to keep in the ring buffer.
pub const LOG_BUFFER_SIZE: usize = 6;

/// Maximum characters per log line.
pub const LOG_LINE_LENGTH: usize = 48;

// =============================================================================
// Profiling Metrics
// =============================================================================

/// Frame timing and render statistics for profiling.
///
/// Tracks per-frame timing, min/max/average statistics, and render counters.
/// Updated every frame in the main loop.
pub struct ProfilingMetrics {
    // Frame timing (microseconds for precision)
    /// Total frame time (render + sleep + overhead)
    pub frame_time_us: u32,
    /// Time spent rendering (drawing to display buffer)
    pub render_time_us: u32,
    /// Time spent sleeping (rate limiting)
    pub sleep_time_us: u32,

    // Statistics (computed over time)
    /// Minimum frame time observed
    pub frame_time_min_us: u32,
    /// Maximum frame time observed
    pub frame_time_max_us: u32,
    /// Rolling average frame time (simple exponential moving average)
    frame_time_avg_us: f32,

    // Counters
    /// Total frames rendered since startup
    pub total_frames: u64,
    /// Header redraw count (should be low if dirty tracking works)
    pub header_redraws: u32,
    /// Divider redraw count
    pub divider_redraws: u32,
    /// Waveform strip redraw count (three per frame while animating)
    pub trace_draws: u32,
    /// Vital cell draw count (five per frame on the monitor page)
    pub cell_draws: u32,
    /// Beeps emitted by the scheduler
    pub beeps_emitted: u32,
    /// Vitals records accepted from the intake
    pub intake_updates: u32,
    /// Intake poll failures (kept last good record)
    pub intake_errors: u32,

    // Uptime tracking
    start_time: Instant,
}

impl ProfilingMetrics {
    /// Create new profiling metrics, starting the uptime timer.
    pub fn new() -> Self {
        Self {
            frame_time_us: 0,
            render_time_us: 0,
            sleep_time_us: 0,
            frame_time_min_us: u32::MAX,
            frame_time_max_us: 0,
            frame_time_avg_us: 0.0,
            total_frames: 0,
            header_redraws: 0,
            divider_redraws: 0,
            trace_draws: 0,
            cell_draws: 0,
            beeps_emitted: 0,
            intake_updates: 0,
            intake_errors: 0,
            start_time: Instant::now(),
        }
    }

    /// Exponential moving average alpha (0.1 for smooth updates).
    const EMA_ALPHA: f32 = 0.1;

    /// Record frame timing for this frame.
    ///
    /// Updates current frame stats, min/max, and rolling average.
    pub fn record_frame(&mut self, total_time: Duration, render_time: Duration, sleep_time: Duration) {
        let total_us = total_time.as_micros() as u32;
        let render_us = render_time.as_micros() as u32;
        let sleep_us = sleep_time.as_micros() as u32;

        self.frame_time_us = total_us;
        self.render_time_us = render_us;
        self.sleep_time_us = sleep_us;

        // Update min/max
        if total_us < self.frame_time_min_us {
            self.frame_time_min_us = total_us;
        }
        if total_us > self.frame_time_max_us {
            self.frame_time_max_us = total_us;
        }

        // Exponential moving average
        if self.total_frames == 0 {
            self.frame_time_avg_us = total_us as f32;
        } else {
            self.frame_time_avg_us =
                Self::EMA_ALPHA.mul_add(total_us as f32, (1.0 - Self::EMA_ALPHA) * self.frame_time_avg_us);
        }

        self.total_frames += 1;
    }

    /// Get average frame time in microseconds.
    #[inline]
    pub const fn frame_time_avg_us(&self) -> u32 {
        self.frame_time_avg_us as u32
    }

    /// Get uptime since metrics were created.
    #[inline]
    pub fn uptime(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Increment header redraw counter.
    #[inline]
    pub const fn inc_header_redraws(&mut self) {
        self.header_redraws += 1;
    }

    /// Increment divider redraw counter.
    #[inline]
    pub const fn inc_divider_redraws(&mut self) {
        self.divider_redraws += 1;
    }

    /// Add to the trace redraw counter.
    #[inline]
    pub const fn inc_trace_draws(&mut self, count: u32) {
        self.trace_draws += count;
    }

    /// Add to the vital cell draw counter.
    #[inline]
    pub const fn inc_cell_draws(&mut self, count: u32) {
        self.cell_draws += count;
    }
}

impl Default for ProfilingMetrics {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Debug Log
// =============================================================================

/// Ring buffer of recent debug messages, shown as a terminal on the debug
/// page. Fixed capacity, no heap allocation; the oldest line scrolls off.
pub struct DebugLog {
    lines: Deque<String<LOG_LINE_LENGTH>, LOG_BUFFER_SIZE>,
}

impl DebugLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self { lines: Deque::new() }
    }

    /// Append a message, truncated to `LOG_LINE_LENGTH` characters. The
    /// oldest line is dropped when the buffer is full.
    pub fn push(&mut self, message: &str) {
        if self.lines.is_full() {
            self.lines.pop_front();
        }

        let mut line: String<LOG_LINE_LENGTH> = String::new();
        for ch in message.chars().take(LOG_LINE_LENGTH) {
            if line.push(ch).is_err() {
                break;
            }
        }
        let _ = self.lines.push_back(line);
    }

    /// Iterate the buffered lines, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(|s| s.as_str())
    }
}

impl Default for DebugLog {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_frame_tracks_min_max() {
        let mut metrics = ProfilingMetrics::new();
        metrics.record_frame(Duration::from_millis(20), Duration::from_millis(1), Duration::from_millis(19));
        metrics.record_frame(Duration::from_millis(25), Duration::from_millis(2), Duration::from_millis(23));
        metrics.record_frame(Duration::from_millis(18), Duration::from_millis(1), Duration::from_millis(17));

        assert_eq!(metrics.total_frames, 3);
        assert_eq!(metrics.frame_time_min_us, 18_000);
        assert_eq!(metrics.frame_time_max_us, 25_000);
    }

    #[test]
    fn test_first_frame_seeds_average() {
        let mut metrics = ProfilingMetrics::new();
        metrics.record_frame(Duration::from_millis(20), Duration::ZERO, Duration::ZERO);
        assert_eq!(metrics.frame_time_avg_us(), 20_000, "first frame seeds the EMA");
    }

    #[test]
    fn test_debug_log_scrolls_oldest_off() {
        let mut log = DebugLog::new();
        for i in 0..(LOG_BUFFER_SIZE + 2) {
            let mut msg = std::string::String::new();
            use std::fmt::Write as _;
            let _ = write!(msg, "line {i}");
            log.push(&msg);
        }
        assert_eq!(log.iter().count(), LOG_BUFFER_SIZE, "log must stay at capacity");
        assert_eq!(log.iter().next(), Some("line 2"), "oldest lines scroll off first");
    }

    #[test]
    fn test_debug_log_truncates_long_lines() {
        let mut log = DebugLog::new();
        let long = "x".repeat(LOG_LINE_LENGTH * 2);
        log.push(&long);
        assert_eq!(
            log.iter().next().map(str::len),
            Some(LOG_LINE_LENGTH),
            "lines are truncated to the buffer width"
        );
    }
}
