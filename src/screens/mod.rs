//! Full-screen views outside the live monitor page.
//!
//! - [`loading`]: console-style boot sequence shown before the monitor view
//! - [`debug`]: profiling metrics and debug log terminal

mod debug;
mod loading;

pub use debug::draw_debug_page;
pub use loading::run_loading_screen;
