//! Colour palette and text styles used across the UI.

use ratatui::style::{Color, Modifier, Style};

/// Central theme — change colours here and they propagate everywhere.
pub struct Theme;

impl Theme {
    // ── sticky year header ─────────────────────────────────────
    pub fn year_style() -> Style {
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD)
    }

    /// The odometer cell mid-transition.
    pub fn year_transition_style() -> Style {
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::DIM)
    }

    pub fn header_rule_style() -> Style {
        Style::default().fg(Color::DarkGray)
    }

    // ── timeline ───────────────────────────────────────────────
    pub fn month_style() -> Style {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    }

    pub fn body_style() -> Style {
        Style::default().fg(Color::White)
    }

    pub fn link_style() -> Style {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::UNDERLINED | Modifier::ITALIC)
    }

    pub fn connector_style() -> Style {
        Style::default().fg(Color::DarkGray)
    }

    /// Rows near the pane edges — stands in for the fade gradients.
    pub fn fade_style() -> Style {
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::DIM)
    }

    // ── binary strip ───────────────────────────────────────────
    pub fn binary_style() -> Style {
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::DIM)
    }

    /// Digits currently carrying a scramble override.
    pub fn binary_scrambled_style() -> Style {
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD)
    }

    // ── chrome ─────────────────────────────────────────────────
    pub fn status_bar_style() -> Style {
        Style::default().bg(Color::DarkGray).fg(Color::White)
    }

    pub fn clock_style() -> Style {
        Style::default().bg(Color::DarkGray).fg(Color::Gray)
    }
}
