//! Renders the laid-out timeline entries at a fractional scroll offset.
//!
//! Rows near the pane edges are dimmed — the terminal stand-in for the
//! fade gradients framing the timeline.

use ratatui::{buffer::Buffer, layout::Rect, style::Style, widgets::Widget};

use crate::core::layout::LaidOutEntry;

use super::theme::Theme;

/// Columns reserved for the connector gutter (`  ● ` / `  │ `).
pub const GUTTER_COLS: u16 = 4;
/// Rows at the top/bottom of the pane drawn with the fade style.
const FADE_ROWS: u16 = 2;

pub struct TimelineWidget<'a> {
    entries: &'a [LaidOutEntry],
    scroll: f64,
    /// Intro stagger: only this many leading entries are drawn.
    visible_entries: usize,
}

impl<'a> TimelineWidget<'a> {
    pub fn new(entries: &'a [LaidOutEntry], scroll: f64, visible_entries: usize) -> Self {
        Self { entries, scroll, visible_entries }
    }

    fn faded(&self, row: u16, height: u16) -> bool {
        row < FADE_ROWS || row + FADE_ROWS >= height
    }
}

impl Widget for TimelineWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width <= GUTTER_COLS {
            return;
        }

        let scroll = self.scroll.round() as isize;
        let text_x = area.x + GUTTER_COLS;
        let text_width = (area.width - GUTTER_COLS) as usize;

        for entry in &self.entries[..self.visible_entries.min(self.entries.len())] {
            // Entry rows: month label, body lines, blank separator.
            for line in 0..(entry.bottom - entry.top) {
                let doc_row = (entry.top + line) as isize;
                let y = doc_row - scroll;
                if y < 0 || y >= area.height as isize {
                    continue;
                }
                let y = y as u16;
                let fade = self.faded(y, area.height);

                if line == 0 {
                    let gutter_style = if fade { Theme::fade_style() } else { Theme::connector_style() };
                    buf.set_string(area.x, area.y + y, "  ● ", gutter_style);
                    let month_style = if fade { Theme::fade_style() } else { Theme::month_style() };
                    buf.set_stringn(text_x, area.y + y, &entry.month, text_width, month_style);
                    continue;
                }

                let gutter_style = if fade { Theme::fade_style() } else { Theme::connector_style() };
                buf.set_string(area.x, area.y + y, "  │ ", gutter_style);

                let body_line = line - 1;
                let Some(spans) = entry.body_lines.get(body_line) else {
                    continue; // separator row — connector only
                };
                let mut x = text_x;
                let limit = text_x + text_width as u16;
                for span in spans {
                    if x >= limit {
                        break;
                    }
                    let style: Style = if fade {
                        Theme::fade_style()
                    } else if span.link {
                        Theme::link_style()
                    } else {
                        Theme::body_style()
                    };
                    buf.set_stringn(x, area.y + y, &span.text, (limit - x) as usize, style);
                    x += span.text.chars().count() as u16;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::layout::measure;
    use crate::core::timeline::Timeline;

    #[test]
    fn renders_without_panicking_at_any_scroll() {
        let entries = measure(&Timeline::demo(), 40);
        let area = Rect::new(0, 0, 44, 20);
        for scroll in [0.0, 3.5, 100.0, 10_000.0] {
            let mut buf = Buffer::empty(area);
            TimelineWidget::new(&entries, scroll, entries.len()).render(area, &mut buf);
        }
    }

    #[test]
    fn stagger_hides_later_entries() {
        let entries = measure(&Timeline::demo(), 40);
        let area = Rect::new(0, 0, 44, 40);
        let mut buf = Buffer::empty(area);
        TimelineWidget::new(&entries, 0.0, 1).render(area, &mut buf);
        // Only the first entry's rows may be non-blank.
        let first_bottom = entries[0].bottom as u16;
        for y in first_bottom..area.height {
            for x in 0..area.width {
                let symbol = buf.cell((x, y)).map(|c| c.symbol()).unwrap_or(" ");
                assert_eq!(symbol, " ", "row {y} drawn beyond stagger");
            }
        }
    }
}
