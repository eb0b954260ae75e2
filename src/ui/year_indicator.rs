//! Sticky year header with an odometer-style last digit.
//!
//! The shared prefix of the year renders plainly; the final digit cell
//! switches from `current`'s to `next`'s digit as progress crosses the
//! midpoint, with a shaded block standing in for the sub-cell slide a
//! terminal can't draw.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    widgets::Widget,
};

use crate::core::year::YearDisplay;

use super::theme::Theme;

pub struct YearIndicator<'a> {
    display: &'a YearDisplay,
}

impl<'a> YearIndicator<'a> {
    pub fn new(display: &'a YearDisplay) -> Self {
        Self { display }
    }

    /// Glyph + mid-transition flag for the odometer cell.
    fn odometer_cell(&self) -> (char, bool) {
        let curr = self.display.current.chars().last().unwrap_or(' ');
        let next = self.display.next.chars().last().unwrap_or(' ');
        let p = self.display.progress;
        if p <= 0.0 || curr == next {
            (curr, false)
        } else if p < 0.45 {
            (curr, true)
        } else if p < 0.55 {
            ('▒', true)
        } else if p < 1.0 {
            (next, true)
        } else {
            (next, false)
        }
    }
}

impl Widget for YearIndicator<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width < 8 {
            return;
        }

        buf.set_string(area.x + 1, area.y, "timeline", Theme::header_rule_style());

        if area.height > 1 && !self.display.current.is_empty() {
            let year = &self.display.current;
            let prefix: String = {
                let mut chars: Vec<char> = year.chars().collect();
                chars.pop();
                chars.into_iter().collect()
            };
            let (digit, transitioning) = self.odometer_cell();

            let width = (prefix.chars().count() + 1) as u16;
            let x = area.x + area.width.saturating_sub(width) / 2;
            let y = area.y + 1;
            buf.set_string(x, y, &prefix, Theme::year_style());
            let digit_style = if transitioning {
                Theme::year_transition_style()
            } else {
                Theme::year_style()
            };
            buf.set_string(x + prefix.chars().count() as u16, y, digit.to_string(), digit_style);
        }

        if area.height > 2 {
            let rule = "─".repeat(area.width as usize);
            buf.set_string(area.x, area.y + 2, rule, Theme::header_rule_style());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn display(current: &str, next: &str, progress: f64) -> YearDisplay {
        YearDisplay {
            current: current.into(),
            next: next.into(),
            progress,
        }
    }

    #[test]
    fn stable_display_shows_the_current_digit() {
        let d = display("2021", "2021", 0.0);
        assert_eq!(YearIndicator::new(&d).odometer_cell(), ('1', false));
    }

    #[test]
    fn transition_crosses_to_the_next_digit_at_the_midpoint() {
        let d = display("2021", "2022", 0.2);
        assert_eq!(YearIndicator::new(&d).odometer_cell(), ('1', true));
        let d = display("2021", "2022", 0.5);
        assert_eq!(YearIndicator::new(&d).odometer_cell(), ('▒', true));
        let d = display("2021", "2022", 0.8);
        assert_eq!(YearIndicator::new(&d).odometer_cell(), ('2', true));
        let d = display("2021", "2022", 1.0);
        assert_eq!(YearIndicator::new(&d).odometer_cell(), ('2', false));
    }

    #[test]
    fn same_final_digit_never_flickers() {
        // 2019 → 2029 keeps its last digit; no transition styling.
        let d = display("2019", "2029", 0.5);
        assert_eq!(YearIndicator::new(&d).odometer_cell(), ('9', false));
    }
}
