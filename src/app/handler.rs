//! Input handling and the per-frame update pipeline.
//!
//! Input events only move the scroll target or flip flags — cheap, safe to
//! apply per event.  The expensive work (smooth scroll, kinematics, year
//! state, binary refresh) runs at most once per frame in
//! [`advance_frame`], however many events the loop drained.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::config::Action;
use crate::core::intro;

use super::event::AppEvent;
use super::state::AppState;

/// Dispatch one event.  `Tick` only marks a frame as due; the caller runs
/// [`advance_frame`] after draining the queue.
pub fn handle_event(state: &mut AppState, event: AppEvent) {
    match event {
        AppEvent::Key(key) => handle_key(state, key),
        AppEvent::Wheel(notches) => {
            let step = state.config.wheel_step as f64;
            state.scroll.scroll_by(notches as f64 * step);
        }
        AppEvent::Resize(cols, rows) => {
            state.viewport = (cols, rows);
            state.remeasure();
        }
        AppEvent::Tick => state.frame_due = true,
    }
}

fn handle_key(state: &mut AppState, key: KeyEvent) {
    // Ctrl+c always quits, regardless of overlay.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        state.should_quit = true;
        return;
    }

    if state.show_help {
        // Any bound Help/Quit key (or Esc) closes the overlay; everything
        // else is swallowed while it is open.
        match state.config.match_key(key) {
            Some(Action::Help) | Some(Action::Quit) => state.show_help = false,
            _ if key.code == KeyCode::Esc => state.show_help = false,
            _ => {}
        }
        return;
    }

    let Some(action) = state.config.match_key(key) else {
        return;
    };

    let step = state.config.wheel_step as f64;
    let page = state.pane_rows().saturating_sub(2) as f64;

    match action {
        Action::ScrollUp => state.scroll.scroll_by(-step),
        Action::ScrollDown => state.scroll.scroll_by(step),
        Action::PageUp => state.scroll.scroll_by(-page),
        Action::PageDown => state.scroll.scroll_by(page),
        Action::JumpTop => state.scroll.scroll_to(0.0),
        Action::JumpBottom => {
            let max = state.max_scroll();
            state.scroll.scroll_to(max);
        }
        Action::ToggleStrip => {
            state.strip_visible = !state.strip_visible;
            if !state.strip_visible {
                // Nothing left to animate: drop the tail and any static.
                state.kinematics.cancel_decay();
                state.scramble.clear();
            }
            // Content width changed — wrap and sections shift with it.
            state.remeasure();
            state.refresh_year();
        }
        Action::Help => state.show_help = true,
        Action::Quit => state.should_quit = true,
    }
}

/// One frame of animation work.  Mirrors the scroll-event pipeline: move
/// the position, sample kinematics, run any due decay step, then update
/// whatever the movement touched.
pub fn advance_frame(state: &mut AppState, now_ms: u64) {
    state.frame_due = false;

    let moved = state.scroll.is_animating() && state.scroll.tick();
    state.kinematics.sample(state.scroll.pos(), now_ms);
    let decay_fired = state.kinematics.poll_decay(now_ms);

    if state.intro.is_active() && state.intro.poll(state.timeline.len(), now_ms) {
        intro::store_seen();
        tracing::debug!("intro complete, seen flag stored");
    }

    if moved {
        state.refresh_year();
    }
    // The strip re-renders on movement, on every decay step, and while
    // scrambled digits are still waiting to expire.  A settled view with
    // zero momentum and no live static is left untouched.
    if moved || decay_fired || !state.scramble.is_empty() {
        state.refresh_binary(now_ms);
    }
}

// ───────────────────────────────────────── tests ─────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::core::timeline::Timeline;

    fn test_state() -> AppState {
        let mut state = AppState::new(Timeline::demo(), AppConfig::defaults(), true, true);
        state.viewport = (100, 30);
        state.remeasure();
        state
    }

    #[test]
    fn wheel_events_accumulate_into_the_target() {
        let mut state = test_state();
        handle_event(&mut state, AppEvent::Wheel(1));
        handle_event(&mut state, AppEvent::Wheel(1));
        let step = state.config.wheel_step as f64;
        assert_eq!(state.scroll.target(), 2.0 * step);
    }

    #[test]
    fn tick_marks_a_frame_due_and_advance_clears_it() {
        let mut state = test_state();
        handle_event(&mut state, AppEvent::Tick);
        assert!(state.frame_due);
        advance_frame(&mut state, 16);
        assert!(!state.frame_due);
    }

    #[test]
    fn year_display_is_not_rewritten_on_idle_frames() {
        let mut state = test_state();
        advance_frame(&mut state, 16);
        let rev = state.year.revision();
        // No scroll input: repeated frames must not touch the display.
        advance_frame(&mut state, 48);
        advance_frame(&mut state, 80);
        assert_eq!(state.year.revision(), rev);
    }

    #[test]
    fn scrolling_eventually_changes_the_displayed_year() {
        let mut state = test_state();
        let first = state.year.display().current.clone();
        state.scroll.scroll_to(state.max_scroll());
        let mut now = 0u64;
        for _ in 0..200 {
            now += 33;
            advance_frame(&mut state, now);
        }
        let last = state.year.display().current.clone();
        assert_ne!(first, last, "scrolling to the end kept the first year");
    }

    #[test]
    fn resize_remeasures_sections() {
        let mut state = test_state();
        let before = state.sections.len();
        handle_event(&mut state, AppEvent::Resize(40, 20));
        assert_eq!(state.viewport, (40, 20));
        // Same years, different geometry.
        assert_eq!(state.sections.len(), before);
        assert!(state.sections.windows(2).all(|w| w[0].start <= w[1].start));
    }

    #[test]
    fn momentum_decays_back_to_zero_after_scrolling_stops() {
        let mut state = test_state();
        state.scroll.scroll_to(state.max_scroll());
        let mut now = 0u64;
        for _ in 0..30 {
            now += 33;
            advance_frame(&mut state, now);
        }
        assert!(state.kinematics.momentum() > 0.0);

        // Let the view settle and the tail run out.
        for _ in 0..200 {
            now += 33;
            advance_frame(&mut state, now);
        }
        assert_eq!(state.kinematics.momentum(), 0.0);
    }
}
