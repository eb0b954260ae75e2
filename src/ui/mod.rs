//! UI / rendering layer — everything that touches Ratatui widgets.
//!
//! This layer takes the *core* data structures and turns them into pixels
//! on the terminal.  No animation state is mutated here; widgets read a
//! snapshot and draw it.

pub mod binary_strip;
pub mod layout;
pub mod popup;
pub mod theme;
pub mod timeline_widget;
pub mod year_indicator;
