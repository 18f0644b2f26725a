//! Color constants for the patient monitor display.
//!
//! Rgb565 uses 16 bits per pixel: 5 bits red, 6 bits green, 5 bits blue.
//! - Red: 0-31 (5 bits)
//! - Green: 0-63 (6 bits)
//! - Blue: 0-31 (5 bits)
//!
//! Each waveform channel carries the conventional bedside-monitor tint:
//! green for ECG, cyan for the plethysmograph, yellow for capnography.
//! Every channel color comes in three intensities: the bright trace color,
//! a dim glow variant drawn underneath the trace, and a near-black grid tint.

use embedded_graphics::pixelcolor::{Rgb565, RgbColor};

// =============================================================================
// Standard Colors (from RgbColor trait - guaranteed optimal values)
// =============================================================================

/// Pure black (0, 0, 0). Used for backgrounds and dark text.
pub const BLACK: Rgb565 = Rgb565::BLACK;

/// Pure white (31, 63, 31). Used for text on dark backgrounds.
pub const WHITE: Rgb565 = Rgb565::WHITE;

/// Pure red (31, 0, 0). Used for the mute indicator.
pub const RED: Rgb565 = Rgb565::RED;

/// Pure green (0, 63, 0). ECG trace and heart rate numerics.
pub const ECG_GREEN: Rgb565 = Rgb565::GREEN;

/// Pure cyan (0, 63, 31). Plethysmograph trace and SpO2 numerics.
pub const SPO2_CYAN: Rgb565 = Rgb565::CYAN;

/// Pure yellow (31, 63, 0). Capnogram trace and respiratory numerics.
pub const ETCO2_YELLOW: Rgb565 = Rgb565::YELLOW;

// =============================================================================
// Custom Colors (application-specific)
// =============================================================================

/// Dark gray for divider lines. Subtle enough to not distract from the traces.
/// RGB565: (8, 16, 8) - roughly 25% brightness.
pub const GRAY: Rgb565 = Rgb565::new(8, 16, 8);

/// Dark slate blue for the header bar, the usual monitor chrome color.
pub const HEADER_BLUE: Rgb565 = Rgb565::new(2, 8, 12);

/// Dim green underlay that gives the ECG trace its phosphor glow.
pub const ECG_GLOW: Rgb565 = Rgb565::new(0, 22, 0);

/// Dim cyan underlay for the plethysmograph glow.
pub const SPO2_GLOW: Rgb565 = Rgb565::new(0, 22, 11);

/// Dim yellow underlay for the capnogram glow.
pub const ETCO2_GLOW: Rgb565 = Rgb565::new(11, 22, 0);

/// Low-intensity green tint for the ECG strip grid.
pub const ECG_GRID: Rgb565 = Rgb565::new(0, 9, 0);

/// Low-intensity cyan tint for the plethysmograph strip grid.
pub const SPO2_GRID: Rgb565 = Rgb565::new(0, 9, 4);

/// Low-intensity yellow tint for the capnogram strip grid.
pub const ETCO2_GRID: Rgb565 = Rgb565::new(5, 9, 0);
