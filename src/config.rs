//! Application configuration constants.
//!
//! Layout calculations like `SCREEN_WIDTH - VITALS_COL_WIDTH` are computed at
//! compile time as `const`, avoiding per-frame arithmetic. These constants are
//! used throughout the rendering code instead of recalculating positions every
//! frame.

use std::time::Duration;

// =============================================================================
// Display Configuration
// =============================================================================

/// Display width in pixels (landscape bedside monitor layout)
pub const SCREEN_WIDTH: u32 = 480;

/// Display height in pixels
pub const SCREEN_HEIGHT: u32 = 320;

// =============================================================================
// Timing Configuration
// =============================================================================

/// Target frame time (~50 FPS). The main loop sleeps if frame completes early.
pub const FRAME_TIME: Duration = Duration::from_millis(20);

/// Duration that popups remain visible on screen.
pub const POPUP_DURATION: Duration = Duration::from_secs(3);

/// Interval between vitals file polls (matches the original demo's 1 s refresh).
pub const POLL_INTERVAL: Duration = Duration::from_millis(1000);

/// How long the pulse indicator dot stays lit after a heart beep fires.
pub const PULSE_FLASH: Duration = Duration::from_millis(150);

// =============================================================================
// Waveform Sweep Configuration
// =============================================================================

/// Horizontal sweep speed of all traces, in pixels per second.
/// One beat at 60 BPM occupies exactly this many pixels.
pub const SWEEP_SPEED_PX_PER_S: f32 = 120.0;

/// Pixels each trace advances per animation tick (sweep speed x frame time).
pub const SWEEP_PX_PER_TICK: f32 = SWEEP_SPEED_PX_PER_S * 0.020;

/// Spacing of the background grid lines inside each trace strip, in pixels.
pub const GRID_SPACING: i32 = 20;

// =============================================================================
// Vitals Trend Configuration
// =============================================================================

/// Number of samples to keep in vital-sign history for trend detection.
pub const HISTORY_SIZE: usize = 50;

/// Minimum BPM difference between recent and older averages for a trend arrow.
pub const HR_TREND_THRESHOLD: f32 = 2.0;

/// Minimum SpO2 percentage-point difference for a trend arrow.
pub const SPO2_TREND_THRESHOLD: f32 = 1.0;

// =============================================================================
// Pre-computed Layout Constants
// =============================================================================

/// Header bar height in pixels.
pub const HEADER_HEIGHT: u32 = 26;

/// Width of the numeric vitals column on the right edge.
pub const VITALS_COL_WIDTH: u32 = 140;

/// Width of the waveform trace area (everything left of the vitals column).
pub const TRACE_AREA_WIDTH: u32 = SCREEN_WIDTH - VITALS_COL_WIDTH;

/// Height of the observations band below the trace strips.
pub const OBS_HEIGHT: u32 = 48;

/// Height of each of the three waveform strips (ECG, SpO2, EtCO2).
pub const TRACE_STRIP_HEIGHT: u32 = (SCREEN_HEIGHT - HEADER_HEIGHT - OBS_HEIGHT) / 3;

/// Height of each numeric vital cell in the right column (5 cells).
pub const VITAL_CELL_HEIGHT: u32 = (SCREEN_HEIGHT - HEADER_HEIGHT) / 5;

/// Screen center X coordinate. Used for centering popups and text.
pub const CENTER_X: i32 = (SCREEN_WIDTH / 2) as i32;

/// Screen center Y coordinate. Used for centering popups and text.
pub const CENTER_Y: i32 = (SCREEN_HEIGHT / 2) as i32;

/// Default path of the shared vitals record file (the demo-mode channel the
/// control page writes to). Overridable by the first CLI argument.
pub const DEFAULT_VITALS_PATH: &str = "vitals.json";
