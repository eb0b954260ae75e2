//! A scroll-animated timeline viewer for the terminal.
//!
//! Renders a chronological timeline with a sticky year indicator (odometer
//! last digit), a velocity-reactive binary digit strip, and a staggered
//! first-view intro.  Scroll with the wheel or the usual keys.

mod app;
mod config;
mod core;
mod ui;

use std::io::{self, stderr};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::Alignment,
    widgets::Paragraph,
    Terminal,
};

use crate::app::{event::spawn_event_reader, handler, state::AppState};
use crate::config::AppConfig;
use crate::core::{intro, timeline::Timeline};
use crate::ui::{
    binary_strip::BinaryStrip, layout::AppLayout, popup::HelpPopup, theme::Theme,
    timeline_widget::TimelineWidget, year_indicator::YearIndicator,
};

// ───────────────────────────────────────── CLI ───────────────

#[derive(Parser, Debug)]
#[command(name = env!("CARGO_PKG_NAME"), about = "Scroll-animated timeline viewer")]
struct Cli {
    /// Timeline file to load (the built-in demo when omitted).
    #[arg(long)]
    file: Option<PathBuf>,

    /// Start with the binary strip hidden.
    #[arg(long = "no-strip")]
    no_strip: bool,

    /// Replay the intro animation even if it has already been seen.
    #[arg(long = "replay-intro")]
    replay_intro: bool,
}

/// Animation frame interval (~30 fps).
const FRAME_INTERVAL: Duration = Duration::from_millis(33);

// ───────────────────────────────────────── main ─────────────

#[tokio::main]
async fn main() -> Result<()> {
    // Initialise tracing (only in debug builds / when RUST_LOG is set).
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr) // never pollute stdout
        .init();

    let cli = Cli::parse();

    // ── load content + config ─────────────────────────────────
    let timeline = match &cli.file {
        Some(path) => Timeline::load(path)
            .with_context(|| format!("loading timeline from {}", path.display()))?,
        None => Timeline::demo(),
    };
    if timeline.is_empty() {
        tracing::warn!("timeline has no entries — nothing to animate");
    }

    let config = AppConfig::load();
    config.ensure_saved();
    let intro_seen = !cli.replay_intro && intro::load_seen();
    let strip_visible = config.strip && !cli.no_strip;

    let mut state = AppState::new(timeline, config, intro_seen, strip_visible);

    // ── terminal setup ────────────────────────────────────────
    enable_raw_mode()?;
    let mut stderr_handle = stderr();
    execute!(stderr_handle, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stderr());
    let mut terminal = Terminal::new(backend)?;

    // Measurements need the real viewport, not the placeholder size.
    let size = terminal.size()?;
    state.viewport = (size.width, size.height);
    state.remeasure();
    state.refresh_year();
    state.refresh_binary(state.now_ms());

    // ── event loop ────────────────────────────────────────────
    let mut events = spawn_event_reader(FRAME_INTERVAL);

    loop {
        terminal.draw(|frame| {
            let layout = AppLayout::new(frame.area(), state.strip_visible);

            frame.render_widget(YearIndicator::new(state.year.display()), layout.header_area);

            if let Some(strip_area) = layout.strip_area {
                frame.render_widget(
                    BinaryStrip::new(&state.binary, &state.scramble, state.scroll.pos()),
                    strip_area,
                );
            }

            let visible = state.intro.visible_entries(state.timeline.len(), state.now_ms());
            frame.render_widget(
                TimelineWidget::new(&state.entries, state.scroll.pos(), visible),
                layout.timeline_area,
            );

            let hint = Paragraph::new(state.config.status_bar_hint())
                .style(Theme::status_bar_style());
            frame.render_widget(hint, layout.status_area);
            let clock = chrono::Local::now().format(" %H:%M ").to_string();
            frame.render_widget(
                Paragraph::new(clock)
                    .alignment(Alignment::Right)
                    .style(Theme::clock_style()),
                layout.status_area,
            );

            if state.show_help {
                frame.render_widget(HelpPopup { config: &state.config }, frame.area());
            }
        })?;

        // Block for one event, then batch-drain whatever else is queued so
        // a burst of wheel events coalesces into a single frame of work.
        match events.recv().await {
            Some(event) => handler::handle_event(&mut state, event),
            None => break,
        }
        while let Ok(event) = events.try_recv() {
            handler::handle_event(&mut state, event);
        }

        if state.frame_due {
            let now = state.now_ms();
            handler::advance_frame(&mut state, now);
        }

        if state.should_quit {
            break;
        }
    }

    // ── teardown ──────────────────────────────────────────────
    // Dropping `state` takes the decay tail and scramble map with it; the
    // reader task exits once the receiver is gone.
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    Ok(())
}
