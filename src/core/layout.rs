//! Row-space layout — wraps entry bodies to a width and assigns each entry
//! a vertical extent in absolute content rows.
//!
//! A full recompute happens on every call (mount, resize, strip toggle);
//! there is no incremental state to get out of sync.  Fractional scroll
//! positions live elsewhere — layout itself is whole rows.

use super::timeline::{BodyPart, Timeline};

/// Narrower than this and wrapping stops being meaningful; clamp instead
/// of producing one-character columns.
pub const MIN_CONTENT_WIDTH: u16 = 16;

/// One styled run within a wrapped body line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BodySpan {
    pub text: String,
    pub link: bool,
}

/// A timeline entry after layout: its wrapped lines plus the row interval
/// `[top, bottom)` it occupies in content space.
#[derive(Debug, Clone)]
pub struct LaidOutEntry {
    /// Index into `Timeline::entries`.
    pub index: usize,
    pub year: String,
    pub month: String,
    pub top: usize,
    pub bottom: usize,
    pub body_lines: Vec<Vec<BodySpan>>,
}

/// Lay out every entry at the given content width.
/// Rows per entry: one date-label row, the wrapped body, one separator row.
pub fn measure(timeline: &Timeline, width: u16) -> Vec<LaidOutEntry> {
    let width = width.max(MIN_CONTENT_WIDTH) as usize;
    let mut out = Vec::with_capacity(timeline.entries.len());
    let mut row = 0usize;

    for (index, entry) in timeline.entries.iter().enumerate() {
        let body_lines = wrap_body(&entry.body, width);
        let rows = 1 + body_lines.len() + 1;
        out.push(LaidOutEntry {
            index,
            year: entry.year.clone(),
            month: entry.month.clone(),
            top: row,
            bottom: row + rows,
            body_lines,
        });
        row += rows;
    }

    out
}

/// Total scrollable content height in rows (bottom of the last entry).
pub fn content_rows(entries: &[LaidOutEntry]) -> usize {
    entries.last().map_or(0, |e| e.bottom)
}

/// Greedy word wrap preserving link/text run boundaries across lines.
fn wrap_body(parts: &[BodyPart], width: usize) -> Vec<Vec<BodySpan>> {
    let mut lines: Vec<Vec<BodySpan>> = Vec::new();
    let mut line: Vec<BodySpan> = Vec::new();
    let mut line_len = 0usize;

    let push_word = |word: &str, link: bool, lines: &mut Vec<Vec<BodySpan>>,
                     line: &mut Vec<BodySpan>, line_len: &mut usize| {
        let wlen = word.chars().count();
        let needed = if *line_len == 0 { wlen } else { *line_len + 1 + wlen };
        if needed > width && *line_len > 0 {
            lines.push(std::mem::take(line));
            *line_len = 0;
        }
        if *line_len > 0 {
            // The joining space belongs to whichever run came before.
            if let Some(last) = line.last_mut() {
                last.text.push(' ');
            }
            *line_len += 1;
        }
        match line.last_mut() {
            Some(last) if last.link == link => last.text.push_str(word),
            _ => line.push(BodySpan { text: word.to_string(), link }),
        }
        *line_len += wlen;
    };

    for part in parts {
        let (text, link) = match part {
            BodyPart::Text(t) => (t.as_str(), false),
            BodyPart::Link { text, .. } => (text.as_str(), true),
        };
        for word in text.split_whitespace() {
            if word.chars().count() <= width {
                push_word(word, link, &mut lines, &mut line, &mut line_len);
            } else {
                // Pathological unbroken token: hard-split into width chunks.
                let chars: Vec<char> = word.chars().collect();
                for chunk in chars.chunks(width) {
                    let piece: String = chunk.iter().collect();
                    push_word(&piece, link, &mut lines, &mut line, &mut line_len);
                }
            }
        }
    }

    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

// ───────────────────────────────────────── tests ─────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::timeline::TimelineEntry;

    fn tl(entries: Vec<TimelineEntry>) -> Timeline {
        Timeline { entries }
    }

    fn entry(year: &str, body: &str) -> TimelineEntry {
        TimelineEntry {
            year: year.into(),
            month: String::new(),
            body: vec![BodyPart::Text(body.into())],
        }
    }

    fn line_len(line: &[BodySpan]) -> usize {
        line.iter().map(|s| s.text.chars().count()).sum()
    }

    #[test]
    fn wrap_respects_width() {
        let parts = vec![BodyPart::Text(
            "one two three four five six seven eight nine ten".into(),
        )];
        for width in [16usize, 20, 40] {
            for line in wrap_body(&parts, width) {
                assert!(line_len(&line) <= width, "width {width}");
            }
        }
    }

    #[test]
    fn link_runs_survive_wrapping() {
        let parts = vec![
            BodyPart::Text("read the".into()),
            BodyPart::Link { text: "manual".into(), href: "https://x".into() },
            BodyPart::Text("twice".into()),
        ];
        let lines = wrap_body(&parts, 40);
        let spans: Vec<&BodySpan> = lines.iter().flatten().collect();
        assert!(spans.iter().any(|s| s.link && s.text.contains("manual")));
        assert!(spans.iter().any(|s| !s.link && s.text.contains("read")));
    }

    #[test]
    fn long_token_is_hard_split() {
        let parts = vec![BodyPart::Text("x".repeat(50))];
        let lines = wrap_body(&parts, 16);
        assert!(lines.len() >= 4);
        assert!(lines.iter().all(|l| line_len(l) <= 16));
    }

    #[test]
    fn extents_are_contiguous_and_ordered() {
        let timeline = tl(vec![entry("2020", "a b c"), entry("2021", "d e f")]);
        let laid = measure(&timeline, 40);
        assert_eq!(laid.len(), 2);
        assert_eq!(laid[0].top, 0);
        assert_eq!(laid[0].bottom, laid[1].top);
        assert!(laid[1].top < laid[1].bottom);
        assert_eq!(content_rows(&laid), laid[1].bottom);
    }

    #[test]
    fn empty_timeline_measures_to_nothing() {
        let laid = measure(&Timeline::default(), 40);
        assert!(laid.is_empty());
        assert_eq!(content_rows(&laid), 0);
    }

    #[test]
    fn narrow_width_is_clamped_not_degenerate() {
        let timeline = tl(vec![entry("2020", "several words in a row here")]);
        let laid = measure(&timeline, 1);
        assert!(!laid.is_empty());
        assert!(laid[0].bottom > laid[0].top);
    }
}
