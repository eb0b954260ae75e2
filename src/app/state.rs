//! Central application state.
//!
//! All mutable state lives here so that the rest of the app can be pure
//! functions over `&AppState` (rendering) or `&mut AppState` (event
//! handling).  Time is tracked as milliseconds since construction; the
//! core modules never see a real clock.

use std::time::Instant;

use crate::config::AppConfig;
use crate::core::binary::{self, ScrambleMap};
use crate::core::intro::IntroState;
use crate::core::kinematics::ScrollKinematics;
use crate::core::layout::{content_rows, measure, LaidOutEntry};
use crate::core::scroll::SmoothScroll;
use crate::core::section::{build_sections, Section};
use crate::core::timeline::Timeline;
use crate::core::year::{self, YearState};
use crate::ui::binary_strip::DIGIT_SPAN_ROWS;
use crate::ui::layout::AppLayout;
use crate::ui::timeline_widget::GUTTER_COLS;

/// Top-level application state.
pub struct AppState {
    /// The timeline content, in document order.
    pub timeline: Timeline,
    /// Laid-out entries at the current content width.
    pub entries: Vec<LaidOutEntry>,
    /// Year sections in document space (header offset already applied).
    pub sections: Vec<Section>,
    /// Animated scroll position.
    pub scroll: SmoothScroll,
    /// Velocity/momentum tracker + decay tail.
    pub kinematics: ScrollKinematics,
    /// Temporary digit overrides for the static effect.
    pub scramble: ScrambleMap,
    /// Sticky year indicator state with its write-coalescing revision.
    pub year: YearState,
    /// Current display string for the binary strip.
    pub binary: String,
    /// Allocated digit slots for the strip.
    pub digit_count: usize,
    /// First-view stagger.
    pub intro: IntroState,
    /// Whether the binary strip is shown (affects content width).
    pub strip_visible: bool,
    pub show_help: bool,
    pub should_quit: bool,
    /// Set by `Tick`, cleared by the frame pipeline — coalesces however
    /// many events arrived this loop iteration into one frame of work.
    pub frame_due: bool,
    /// Terminal size (cols, rows).
    pub viewport: (u16, u16),
    /// User-configurable keybindings and scroll feel.
    pub config: AppConfig,
    epoch: Instant,
}

impl AppState {
    pub fn new(timeline: Timeline, config: AppConfig, intro_seen: bool, strip_visible: bool) -> Self {
        let scroll = SmoothScroll::new(config.scroll_speed);
        let mut state = Self {
            timeline,
            entries: Vec::new(),
            sections: Vec::new(),
            scroll,
            kinematics: ScrollKinematics::new(),
            scramble: ScrambleMap::default(),
            year: YearState::default(),
            binary: String::new(),
            digit_count: 0,
            intro: IntroState::begin(intro_seen, 0),
            strip_visible,
            show_help: false,
            should_quit: false,
            frame_due: false,
            viewport: (80, 24),
            config,
            epoch: Instant::now(),
        };
        state.remeasure();
        state.refresh_year();
        state.refresh_binary(0);
        state
    }

    /// Milliseconds since construction — the app's only clock read.
    pub fn now_ms(&self) -> u64 {
        self.epoch.elapsed().as_millis() as u64
    }

    /// Height of the sticky header band, in rows.
    pub fn sticky_rows(&self) -> f64 {
        AppLayout::HEADER_ROWS as f64
    }

    /// Rows the timeline pane can show at the current viewport.
    pub fn pane_rows(&self) -> usize {
        let (cols, rows) = self.viewport;
        AppLayout::from_size(cols, rows, self.strip_visible)
            .timeline_area
            .height as usize
    }

    /// Maximum scrollable distance (document height minus viewport).
    pub fn max_scroll(&self) -> f64 {
        self.scroll.max()
    }

    /// Re-run the full measurement pass: wrap entries, rebuild sections,
    /// re-clamp the scroll range, resync the digit slot count.  Safe to
    /// call any time; it recomputes everything from scratch.
    pub fn remeasure(&mut self) {
        let (cols, rows) = self.viewport;
        let layout = AppLayout::from_size(cols, rows, self.strip_visible);
        let wrap_width = layout.timeline_area.width.saturating_sub(GUTTER_COLS);

        self.entries = measure(&self.timeline, wrap_width);
        self.sections = build_sections(&self.entries, self.sticky_rows());

        let content = content_rows(&self.entries);
        let pane = layout.timeline_area.height as usize;
        self.scroll.set_max(content.saturating_sub(pane) as f64);

        // A bad span (layout not settled) keeps the previous count.
        if let Some(n) = binary::digit_count(content, cols, DIGIT_SPAN_ROWS) {
            self.digit_count = n;
        }
    }

    /// Recompute the sticky year display for the current scroll position.
    /// Returns `true` when the display actually changed.
    pub fn refresh_year(&mut self) -> bool {
        let scroll_pos = self.scroll.pos() + self.sticky_rows();
        let max_scroll_pos = self.max_scroll() + self.sticky_rows();
        match year::compute(&self.sections, scroll_pos, max_scroll_pos) {
            Some(display) => self.year.apply(display),
            None => false,
        }
    }

    /// Rebuild the binary display string at the current scroll position,
    /// scramble overlay included.
    pub fn refresh_binary(&mut self, now_ms: u64) {
        if self.digit_count == 0 {
            self.binary.clear();
            return;
        }
        let pos = self.scroll.pos();
        let momentum = self.kinematics.momentum();
        let doc_height = self.max_scroll();
        let base = binary::base_pattern(pos, self.digit_count);
        self.binary = self
            .scramble
            .overlay(&base, momentum, pos, doc_height, now_ms, &mut rand::rng());
    }
}
