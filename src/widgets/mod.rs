//! Widget components for the patient monitor display.
//!
//! - [`trace`]: waveform strip renderer (grid + glow polyline)
//! - [`cells`]: numeric vital cells and the observations band
//! - [`header`]: header bar and grid divider lines
//! - [`popups`]: overlay popup dialogs (audio, FPS, reset)
//! - [`primitives`]: shared low-level drawing utilities
//!
//! All widgets use the pre-computed styles from [`crate::styles`] and
//! `heapless::String` for per-frame text, so the render loop never touches
//! the heap.

mod cells;
mod header;
mod popups;
mod primitives;
mod trace;

pub use cells::{draw_bp_cell, draw_hr_cell, draw_observations, draw_resp_cell, draw_spo2_cell, draw_temp_cell};
pub use header::{draw_dividers, draw_header};
pub use popups::{draw_audio_popup, draw_fps_toggle_popup, draw_reset_popup};
pub use trace::{ECG_TRACE, ETCO2_TRACE, SPO2_TRACE, TraceStyle, draw_trace};
