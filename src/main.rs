// Crate-level lints: Allow common graphics patterns that pedantic lints flag
#![allow(clippy::cast_possible_truncation)] // Intentional f32->i32, u32->i32 casts for pixel math
#![allow(clippy::cast_precision_loss)] // u32/i32->f32 in graphics calculations
#![allow(clippy::cast_possible_wrap)] // u32->i32 wrapping is acceptable for our value ranges
#![allow(clippy::cast_sign_loss)] // i32->u32 where we know sign is positive
#![allow(clippy::too_many_lines)] // main() is long but well-structured

//! Bedside patient monitor display simulator.
//!
//! Renders a monitor view with three continuously scrolling waveform traces
//! and a numeric vitals column, driven by a vitals record that a control
//! page (or a remote peer) writes to a shared JSON file:
//!
//! ```text
//! ┌───────────────────────────────────────┬───────────┐
//! │            PATIENT MONITOR            │  (header) │  26px
//! ├───────────────────────────────────────┼───────────┤
//! │ ECG II     /\                         │ HR    72  │
//! │ ───────────  ──/\────────────/\─────  │ SpO2  98  │
//! ├───────────────────────────────────────┤ NIBP      │
//! │ PLETH   ~~\_   ~~\_   ~~\_   ~~\_     │ 120/80    │
//! ├───────────────────────────────────────┤ TEMP 36.6 │
//! │ EtCO2  ___/```\____/```\____/```\__   │ RESP  16  │
//! ├───────────────────────────────────────┤           │
//! │ Observations / Last updated           │           │
//! └───────────────────────────────────────┴───────────┘
//! ```
//!
//! Each trace owns an independent animation driver (Idle -> Running ->
//! Stopped) whose tick advances a phase accumulator, resamples per-cycle
//! variability on cycle boundaries, and repaints the strip. The ECG and
//! plethysmograph are paced by the supplied heart rate; the capnogram runs
//! on a fixed breath width. Invalid vitals degrade to flat baselines.
//!
//! Beeps follow the classic contract: one heart beep per beat (60000/bpm
//! ms), one SpO2 beep every 2 s, both suppressed for invalid readings and
//! silenced by the audio toggle. Only scheduling lives here; the pulse dot
//! in the HR cell and the debug log consume the events.
//!
//! # Controls
//!
//! | Key | Action |
//! |-----|--------|
//! | `X` | Toggle FPS display on/off |
//! | `Y` | Switch between Monitor and Debug page |
//! | `A` | Toggle beep sounds on/off |
//! | `B` | Re-initialize the waveform display |
//!
//! Key repeat is ignored to prevent toggle spam when holding keys.
//!
//! The optional first CLI argument overrides the vitals file path
//! (default `vitals.json`).

mod audio;
mod colors;
mod config;
mod driver;
mod pages;
mod profiling;
mod render;
mod screens;
mod state;
mod styles;
mod vitals;
mod waveform;
mod widgets;

use std::thread;
use std::time::Instant;

use audio::{BeepKind, BeepScheduler};
use colors::BLACK;
use config::{
    DEFAULT_VITALS_PATH, FRAME_TIME, HEADER_HEIGHT, HR_TREND_THRESHOLD, POLL_INTERVAL, PULSE_FLASH, SCREEN_HEIGHT,
    SCREEN_WIDTH, SPO2_TREND_THRESHOLD, TRACE_AREA_WIDTH, TRACE_STRIP_HEIGHT, VITAL_CELL_HEIGHT, VITALS_COL_WIDTH,
};
use driver::SignalDriver;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics_simulator::sdl2::Keycode;
use embedded_graphics_simulator::{OutputSettingsBuilder, SimulatorDisplay, SimulatorEvent, Window};
use pages::Page;
use profiling::{DebugLog, ProfilingMetrics};
use render::{Popup, RenderState};
use screens::{draw_debug_page, run_loading_screen};
use state::VitalTrend;
use vitals::VitalsIntake;
use waveform::{SignalParams, WaveformKind};
use widgets::{
    ECG_TRACE, ETCO2_TRACE, SPO2_TRACE, draw_audio_popup, draw_bp_cell, draw_dividers, draw_fps_toggle_popup,
    draw_header, draw_hr_cell, draw_observations, draw_reset_popup, draw_resp_cell, draw_spo2_cell, draw_temp_cell,
    draw_trace,
};

fn main() {
    // Initialize display and window (simulator mode)
    let mut display: SimulatorDisplay<Rgb565> = SimulatorDisplay::new(Size::new(SCREEN_WIDTH, SCREEN_HEIGHT));
    let output_settings = OutputSettingsBuilder::new().scale(2).build();
    let mut window = Window::new("Patient Monitor", &output_settings);

    // Initial clear before the boot sequence
    display.clear(BLACK).ok();
    window.update(&display);

    // Boot sequence; returns false if the user closes the window during it
    if !run_loading_screen(&mut display, &mut window) {
        return;
    }

    // ==========================================================================
    // Main Loop State
    // ==========================================================================

    // Vitals intake: shared file written by the control page
    let vitals_path = std::env::args().nth(1).unwrap_or_else(|| DEFAULT_VITALS_PATH.to_string());
    let mut intake = VitalsIntake::new(vitals_path, POLL_INTERVAL);
    let mut last_poll_failed = false;

    // One animation driver per trace; started when the monitor view appears
    let mut ecg_driver = SignalDriver::new(WaveformKind::Ecg);
    let mut spo2_driver = SignalDriver::new(WaveformKind::Spo2);
    let mut etco2_driver = SignalDriver::new(WaveformKind::Etco2);

    // Beep scheduling and the pulse indicator flash
    let mut beeps = BeepScheduler::new();
    let mut last_heart_beep: Option<Instant> = None;

    // Trend histories for the HR and SpO2 cells
    let mut hr_trend = VitalTrend::new(HR_TREND_THRESHOLD);
    let mut spo2_trend = VitalTrend::new(SPO2_TREND_THRESHOLD);

    // Active popup (only one at a time, encapsulates kind + start time)
    let mut active_popup: Option<Popup> = None;

    // FPS counter state (X toggles)
    let mut show_fps = true;
    let mut last_fps_calc = Instant::now();
    let mut fps_frame_count = 0u32;
    let mut current_fps = 0.0f32;

    // Dirty tracking for header/dividers and popup cleanup
    let mut render_state = RenderState::new();

    // Page navigation state (Monitor is default, Y toggles to Debug)
    let mut current_page = Page::default();
    let mut page_just_switched = false;

    // Profiling metrics and debug log
    let mut metrics = ProfilingMetrics::new();
    let mut debug_log = DebugLog::new();
    debug_log.push("System started");

    // Monitor view is visible and surfaces are bound: Idle -> Running
    let start_time = Instant::now();
    ecg_driver.start(start_time);
    spo2_driver.start(start_time);
    etco2_driver.start(start_time);

    // ==========================================================================
    // Main Render Loop
    // ==========================================================================

    loop {
        let frame_start = Instant::now();

        // Handle window events (close, button presses)
        for ev in window.events() {
            match ev {
                SimulatorEvent::Quit => return,
                SimulatorEvent::KeyDown { keycode, repeat, .. } => {
                    // Ignore OS key repeat to prevent toggle spam when holding keys
                    if repeat {
                        continue;
                    }
                    match keycode {
                        // X: Toggle FPS display (only on Monitor page)
                        Keycode::X if current_page == Page::Monitor => {
                            show_fps = !show_fps;
                            active_popup = Some(Popup::Fps(Instant::now()));
                            debug_log.push(if show_fps { "FPS: ON" } else { "FPS: OFF" });
                        }
                        // Y: Switch page (works on any page)
                        Keycode::Y => {
                            current_page = current_page.toggle();
                            page_just_switched = true;
                            active_popup = None; // Cancel popup when switching pages
                            match current_page {
                                Page::Monitor => {
                                    // View became visible again: re-initialize
                                    // the animations (cancels any prior schedule)
                                    let now = Instant::now();
                                    ecg_driver.start(now);
                                    spo2_driver.start(now);
                                    etco2_driver.start(now);
                                    debug_log.push("Page: Monitor");
                                }
                                Page::Debug => {
                                    // View teardown: cancel the pending ticks
                                    ecg_driver.stop();
                                    spo2_driver.stop();
                                    etco2_driver.stop();
                                    debug_log.push("Page: Debug");
                                }
                            }
                        }
                        // A: Toggle beep sounds (only on Monitor page)
                        Keycode::A if current_page == Page::Monitor => {
                            let now = Instant::now();
                            let enable = !beeps.is_enabled();
                            beeps.set_enabled(enable, now);
                            active_popup = Some(Popup::Audio(now));
                            debug_log.push(if enable { "Sounds: ON" } else { "Sounds: OFF" });
                        }
                        // B: Re-initialize the waveform display (only on Monitor page)
                        Keycode::B if current_page == Page::Monitor => {
                            let now = Instant::now();
                            ecg_driver.start(now);
                            spo2_driver.start(now);
                            etco2_driver.start(now);
                            hr_trend.reset();
                            spo2_trend.reset();
                            active_popup = Some(Popup::Reset(now));
                            debug_log.push("Display reset");
                        }
                        _ => {}
                    }
                }
                _ => {}
            }
        }

        let now = Instant::now();

        // ======================================================================
        // Vitals Intake (rate-limited internally to the poll interval)
        // ======================================================================

        match intake.poll(now) {
            Ok(true) => {
                let record = intake.latest();
                let hr = record.and_then(vitals::VitalsRecord::heart_rate_bpm);
                let spo2 = record.and_then(vitals::VitalsRecord::spo2_percent);
                hr_trend.update(record.and_then(vitals::VitalsRecord::heart_rate_display));
                spo2_trend.update(record.and_then(vitals::VitalsRecord::spo2_display));
                beeps.update_vitals(hr, spo2, now);
                metrics.intake_updates += 1;
                last_poll_failed = false;
                debug_log.push("Vitals updated");
            }
            Ok(false) => {}
            Err(e) => {
                metrics.intake_errors += 1;
                // Log only the transition into the error state, not every poll
                if !last_poll_failed {
                    last_poll_failed = true;
                    let mut line = String::new();
                    use std::fmt::Write as _;
                    let _ = write!(line, "Intake error: {e}");
                    debug_log.push(&line);
                }
            }
        }

        let params = SignalParams::from_record(intake.latest());

        // ======================================================================
        // Beep Scheduling
        // ======================================================================

        for beep in beeps.poll(now) {
            metrics.beeps_emitted += 1;
            if beep == BeepKind::Heart {
                last_heart_beep = Some(now);
            }
        }
        let pulse_lit = last_heart_beep.is_some_and(|at| now.duration_since(at) < PULSE_FLASH);

        // ======================================================================
        // Popup Expiry and Display Cleanup
        // ======================================================================

        // Check expiry BEFORE updating render state so cleanup happens in the
        // same frame the popup disappears.
        if let Some(ref popup) = active_popup
            && popup.is_expired()
        {
            active_popup = None;
        }
        render_state.update_popup(active_popup.as_ref());

        // Clear display on first frame, when a popup just closed, or on page
        // switch; remnants (especially the white popup border) must go.
        if render_state.is_first_frame() || render_state.popup_just_closed() || page_just_switched {
            display.clear(BLACK).ok();
            if page_just_switched {
                render_state.mark_display_cleared();
            }
        }

        // ======================================================================
        // FPS Calculation (updated once per second)
        // ======================================================================

        fps_frame_count += 1;
        if last_fps_calc.elapsed().as_secs() >= 1 {
            current_fps = fps_frame_count as f32 / last_fps_calc.elapsed().as_secs_f32();
            fps_frame_count = 0;
            last_fps_calc = Instant::now();
        }

        // ======================================================================
        // Page-Based Rendering
        // ======================================================================

        match current_page {
            Page::Monitor => {
                // Header bar, redrawn only when its content changed
                if render_state.check_header_dirty(show_fps, current_fps, beeps.is_enabled()) {
                    draw_header(&mut display, show_fps, current_fps, beeps.is_enabled());
                    metrics.inc_header_redraws();
                }

                // After a display clear the strips must repaint even if their
                // tick is not due this frame.
                let traces_forced =
                    render_state.is_first_frame() || render_state.popup_just_closed() || page_just_switched;

                // Three independent waveform pipelines: each driver executes
                // its due ticks, then its renderer repaints the strip it owns.
                // Strip height leaves one row for the divider below.
                let strips: [(&mut SignalDriver, &widgets::TraceStyle, u32); 3] = [
                    (&mut ecg_driver, &ECG_TRACE, HEADER_HEIGHT),
                    (&mut spo2_driver, &SPO2_TRACE, HEADER_HEIGHT + TRACE_STRIP_HEIGHT),
                    (&mut etco2_driver, &ETCO2_TRACE, HEADER_HEIGHT + 2 * TRACE_STRIP_HEIGHT),
                ];
                for (drv, style, strip_y) in strips {
                    let ticked = drv.run_due(now, &params);
                    if ticked || traces_forced {
                        draw_trace(
                            &mut display,
                            0,
                            strip_y as i32,
                            TRACE_AREA_WIDTH,
                            TRACE_STRIP_HEIGHT - 1,
                            drv.engine_mut(),
                            style,
                        );
                        metrics.inc_trace_draws(1);
                    }
                }

                // Numeric vitals column, redrawn every frame
                let record = intake.latest();
                let col_x = TRACE_AREA_WIDTH;
                draw_hr_cell(
                    &mut display,
                    col_x,
                    HEADER_HEIGHT,
                    VITALS_COL_WIDTH,
                    VITAL_CELL_HEIGHT,
                    record,
                    &hr_trend,
                    pulse_lit,
                );
                draw_spo2_cell(
                    &mut display,
                    col_x,
                    HEADER_HEIGHT + VITAL_CELL_HEIGHT,
                    VITALS_COL_WIDTH,
                    VITAL_CELL_HEIGHT,
                    record,
                    &spo2_trend,
                );
                draw_bp_cell(
                    &mut display,
                    col_x,
                    HEADER_HEIGHT + 2 * VITAL_CELL_HEIGHT,
                    VITALS_COL_WIDTH,
                    VITAL_CELL_HEIGHT,
                    record,
                );
                draw_temp_cell(
                    &mut display,
                    col_x,
                    HEADER_HEIGHT + 3 * VITAL_CELL_HEIGHT,
                    VITALS_COL_WIDTH,
                    VITAL_CELL_HEIGHT,
                    record,
                );
                draw_resp_cell(
                    &mut display,
                    col_x,
                    HEADER_HEIGHT + 4 * VITAL_CELL_HEIGHT,
                    VITALS_COL_WIDTH,
                    VITAL_CELL_HEIGHT,
                    record,
                );
                metrics.inc_cell_draws(5);

                // Observations band under the traces
                draw_observations(&mut display, record);

                // Divider lines (draw once, redraw after popup closes)
                if render_state.need_dividers() {
                    draw_dividers(&mut display);
                    render_state.mark_dividers_drawn();
                    metrics.inc_divider_redraws();
                }

                // Popup on top of everything; expiry already handled
                if let Some(ref popup) = active_popup {
                    match popup {
                        Popup::Audio(_) => draw_audio_popup(&mut display, beeps.is_enabled()),
                        Popup::Fps(_) => draw_fps_toggle_popup(&mut display, show_fps),
                        Popup::Reset(_) => draw_reset_popup(&mut display),
                    }
                }
            }

            Page::Debug => {
                draw_debug_page(&mut display, &metrics, &debug_log, current_fps);
            }
        }

        // ======================================================================
        // Frame Timing and Profiling
        // ======================================================================

        let render_time = frame_start.elapsed();

        // End of frame - reset per-frame state
        render_state.end_frame();
        page_just_switched = false;

        // Update window with rendered frame
        window.update(&display);

        // Sleep to maintain target frame rate (~50 FPS)
        let pre_sleep = frame_start.elapsed();
        if pre_sleep < FRAME_TIME {
            thread::sleep(FRAME_TIME - pre_sleep);
        }
        let sleep_time = frame_start.elapsed().saturating_sub(pre_sleep);

        metrics.record_frame(frame_start.elapsed(), render_time, sleep_time);
    }
}
