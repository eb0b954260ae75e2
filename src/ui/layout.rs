//! Layout helpers — split the terminal area into regions.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Primary screen layout: sticky year header, binary strip column beside
/// the timeline pane, and a bottom status bar.
pub struct AppLayout {
    pub header_area: Rect,
    /// `None` when the strip is toggled off — the timeline takes the width.
    pub strip_area: Option<Rect>,
    pub timeline_area: Rect,
    pub status_area: Rect,
}

impl AppLayout {
    /// Sticky header band height (the scroll-position offset for section
    /// matching).
    pub const HEADER_ROWS: u16 = 3;
    pub const STATUS_ROWS: u16 = 1;
    pub const STRIP_COLS: u16 = 4;

    /// Compute the layout from the full terminal area.
    pub fn new(area: Rect, strip: bool) -> Self {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(Self::HEADER_ROWS),
                Constraint::Min(1),
                Constraint::Length(Self::STATUS_ROWS),
            ])
            .split(area);

        let (strip_area, timeline_area) = if strip && rows[1].width > Self::STRIP_COLS * 2 {
            let cols = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Length(Self::STRIP_COLS), Constraint::Min(1)])
                .split(rows[1]);
            (Some(cols[0]), cols[1])
        } else {
            (None, rows[1])
        };

        Self {
            header_area: rows[0],
            strip_area,
            timeline_area,
            status_area: rows[2],
        }
    }

    /// Layout for a bare terminal size (used for measurement before/without
    /// a frame).
    pub fn from_size(cols: u16, rows: u16, strip: bool) -> Self {
        Self::new(Rect::new(0, 0, cols, rows), strip)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn regions_tile_the_screen_vertically() {
        let l = AppLayout::from_size(100, 30, true);
        assert_eq!(l.header_area.height, AppLayout::HEADER_ROWS);
        assert_eq!(l.status_area.height, AppLayout::STATUS_ROWS);
        assert_eq!(
            l.header_area.height + l.timeline_area.height + l.status_area.height,
            30
        );
    }

    #[test]
    fn strip_toggle_changes_timeline_width() {
        let with = AppLayout::from_size(100, 30, true);
        let without = AppLayout::from_size(100, 30, false);
        assert!(with.strip_area.is_some());
        assert!(without.strip_area.is_none());
        assert!(with.timeline_area.width < without.timeline_area.width);
    }

    #[test]
    fn tiny_terminal_drops_the_strip() {
        let l = AppLayout::from_size(7, 10, true);
        assert!(l.strip_area.is_none());
    }
}
