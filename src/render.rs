//! Render state tracking for optimized display updates.
//!
//! Tracks display state for:
//! - Header conditional redraw (on FPS change, sound toggle, popup close, or
//!   page switch)
//! - Divider draw-once optimization (redraw only after popup close or page
//!   switch)
//! - Popup cleanup (clear display when a popup disappears or switches kind)
//!
//! # Update Strategy
//!
//! | Element | Update Frequency | Strategy |
//! |---------|-----------------|----------|
//! | Header | On FPS/sound change / popup close / page switch | Conditional redraw |
//! | Dividers | Once / after popup / after page switch | Draw-once tracking |
//! | Vital cells | Every frame | Always redraw (values animate) |
//! | Trace strips | Every due animation tick | Strip repaints itself |
//! | Popups | On show/hide | Full clear on close |
//!
//! Trace strips repaint their whole rectangle on every tick, so they recover
//! from a display clear within one frame on their own. The header and
//! dividers are the only elements that need explicit dirty tracking.

use std::time::Instant;

use crate::config::POPUP_DURATION;

/// Active popup with its start time.
///
/// Each variant holds the `Instant` the popup was triggered, making
/// expiration checks straightforward and mutual exclusion impossible to
/// violate (only one popup exists at a time).
#[derive(Clone, Copy, Debug)]
pub enum Popup {
    /// "SOUNDS ON/OFF" after the audio toggle.
    Audio(Instant),
    /// "FPS ON/OFF" after the FPS toggle.
    Fps(Instant),
    /// "DISPLAY RESET" after re-initializing the waveforms.
    Reset(Instant),
}

impl Popup {
    /// Get the start time of this popup.
    #[inline]
    pub const fn start_time(&self) -> Instant {
        match self {
            Self::Audio(t) | Self::Fps(t) | Self::Reset(t) => *t,
        }
    }

    /// Check if this popup has expired.
    #[inline]
    pub fn is_expired(&self) -> bool {
        self.start_time().elapsed() >= POPUP_DURATION
    }

    /// Get the popup kind (discriminant only, for comparison).
    #[inline]
    const fn kind(&self) -> u8 {
        match self {
            Self::Audio(_) => 0,
            Self::Fps(_) => 1,
            Self::Reset(_) => 2,
        }
    }
}

/// Tracks render state for optimized display updates.
pub struct RenderState {
    /// Whether dividers have been drawn (only need to draw once).
    dividers_drawn: bool,

    /// Previous FPS display state.
    prev_show_fps: bool,

    /// Previous FPS value (rounded to avoid unnecessary redraws).
    prev_fps_rounded: u32,

    /// Previous sound-enabled state shown in the header.
    prev_sound_on: bool,

    /// Previous popup kind (discriminant only, for detecting switches).
    prev_popup_kind: Option<u8>,

    /// Whether popup just closed or switched this frame (need to clear remnants).
    popup_just_closed: bool,

    /// Whether this is the first frame (need full redraw).
    first_frame: bool,

    /// Whether the display was cleared externally (e.g., page switch).
    display_cleared: bool,
}

impl RenderState {
    /// Create a new render state for first frame.
    pub const fn new() -> Self {
        Self {
            dividers_drawn: false,
            prev_show_fps: true,
            prev_fps_rounded: 0,
            prev_sound_on: true,
            prev_popup_kind: None,
            popup_just_closed: false,
            first_frame: true,
            display_cleared: false,
        }
    }

    /// Check if dividers need drawing.
    #[inline]
    pub const fn need_dividers(&self) -> bool {
        !self.dividers_drawn || self.first_frame || self.display_cleared
    }

    /// Mark dividers as drawn.
    #[inline]
    pub const fn mark_dividers_drawn(&mut self) {
        self.dividers_drawn = true;
    }

    /// Check if the header needs redrawing.
    ///
    /// Uses `fps.round()` to match the display formatting (`{:.0}`), so the
    /// dirty check sees the same value that would be printed.
    pub const fn check_header_dirty(&mut self, show_fps: bool, fps: f32, sound_on: bool) -> bool {
        let fps_rounded = fps.round() as u32;
        let dirty = self.first_frame
            || self.popup_just_closed
            || self.display_cleared
            || show_fps != self.prev_show_fps
            || sound_on != self.prev_sound_on
            || (show_fps && fps_rounded != self.prev_fps_rounded);

        self.prev_show_fps = show_fps;
        self.prev_fps_rounded = fps_rounded;
        self.prev_sound_on = sound_on;
        dirty
    }

    /// Update popup state with the current active popup.
    ///
    /// Detects both popup close (becomes None) and popup switch (kind
    /// changes). Both cases require a display clear to remove remnants,
    /// since popup sizes differ.
    pub fn update_popup(&mut self, popup: Option<&Popup>) {
        let current_kind = popup.map(Popup::kind);
        let changed = current_kind != self.prev_popup_kind;
        let was_visible = self.prev_popup_kind.is_some();
        self.prev_popup_kind = current_kind;

        if changed && was_visible {
            self.popup_just_closed = true;
            self.dividers_drawn = false;
        }
    }

    /// Check if popup just closed this frame (need to clear remnants).
    #[inline]
    pub const fn popup_just_closed(&self) -> bool {
        self.popup_just_closed
    }

    /// Check if this is the first frame.
    #[inline]
    pub const fn is_first_frame(&self) -> bool {
        self.first_frame
    }

    /// Mark that the display was cleared externally (page switch).
    pub const fn mark_display_cleared(&mut self) {
        self.display_cleared = true;
        self.dividers_drawn = false;
    }

    /// Call at end of frame to reset per-frame state.
    pub const fn end_frame(&mut self) {
        self.first_frame = false;
        self.popup_just_closed = false;
        self.display_cleared = false;
    }
}

impl Default for RenderState {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_state_new() {
        let state = RenderState::new();
        assert!(state.is_first_frame(), "is_first_frame should be true initially");
        assert!(state.need_dividers(), "dividers should be needed on first frame");
        assert!(!state.popup_just_closed(), "popup_just_closed should be false initially");
    }

    #[test]
    fn test_mark_dividers_drawn() {
        let mut state = RenderState::new();
        state.first_frame = false;
        assert!(state.need_dividers());
        state.mark_dividers_drawn();
        assert!(!state.need_dividers(), "dividers should not be needed after drawing");
    }

    #[test]
    fn test_dividers_needed_after_popup_close() {
        let mut state = RenderState::new();
        state.first_frame = false;
        state.mark_dividers_drawn();

        let popup = Popup::Audio(Instant::now());
        state.update_popup(Some(&popup));
        assert!(!state.need_dividers(), "dividers not needed while popup visible");

        state.update_popup(None);
        assert!(state.need_dividers(), "dividers should be needed after popup closes");
    }

    #[test]
    fn test_header_dirty_on_fps_change() {
        let mut state = RenderState::new();
        state.first_frame = false;
        state.check_header_dirty(true, 50.0, true);

        assert!(
            !state.check_header_dirty(true, 50.4, true),
            "same rounded FPS should not redraw"
        );
        assert!(
            state.check_header_dirty(true, 50.6, true),
            "rounded FPS change should redraw"
        );
    }

    #[test]
    fn test_header_dirty_on_sound_toggle() {
        let mut state = RenderState::new();
        state.first_frame = false;
        state.check_header_dirty(true, 50.0, true);

        assert!(
            state.check_header_dirty(true, 50.0, false),
            "muting should redraw the header indicator"
        );
        assert!(
            state.check_header_dirty(true, 50.0, true),
            "unmuting should redraw the header indicator"
        );
        assert!(!state.check_header_dirty(true, 50.0, true), "no change, no redraw");
    }

    #[test]
    fn test_header_not_dirty_when_fps_hidden() {
        let mut state = RenderState::new();
        state.first_frame = false;
        state.check_header_dirty(false, 50.0, true);
        assert!(
            !state.check_header_dirty(false, 60.0, true),
            "FPS change should not matter while hidden"
        );
    }

    #[test]
    fn test_popup_switch_triggers_cleanup() {
        let mut state = RenderState::new();
        state.first_frame = false;
        state.mark_dividers_drawn();

        let audio = Popup::Audio(Instant::now());
        state.update_popup(Some(&audio));
        assert!(!state.popup_just_closed(), "no cleanup when showing first popup");

        let fps = Popup::Fps(Instant::now());
        state.update_popup(Some(&fps));
        assert!(state.popup_just_closed(), "switching popups should trigger cleanup");
        assert!(state.need_dividers(), "dividers should redraw after popup switch");
    }

    #[test]
    fn test_popup_same_kind_no_cleanup() {
        let mut state = RenderState::new();
        let a = Popup::Reset(Instant::now());
        state.update_popup(Some(&a));
        state.end_frame();

        let b = Popup::Reset(Instant::now());
        state.update_popup(Some(&b));
        assert!(!state.popup_just_closed(), "same popup kind should not trigger cleanup");
    }

    #[test]
    fn test_end_frame_clears_transient_flags() {
        let mut state = RenderState::new();
        let popup = Popup::Fps(Instant::now());
        state.update_popup(Some(&popup));
        state.update_popup(None);
        assert!(state.popup_just_closed());

        state.end_frame();
        assert!(!state.is_first_frame());
        assert!(!state.popup_just_closed());
    }

    #[test]
    fn test_display_cleared_forces_header_and_dividers() {
        let mut state = RenderState::new();
        state.first_frame = false;
        state.mark_dividers_drawn();
        state.check_header_dirty(true, 50.0, true);

        state.mark_display_cleared();
        assert!(state.need_dividers(), "dividers needed after display cleared");
        assert!(
            state.check_header_dirty(true, 50.0, true),
            "header dirty after display cleared"
        );

        state.mark_dividers_drawn();
        state.end_frame();
        assert!(!state.need_dividers(), "flags cleared after end_frame");
    }
}
