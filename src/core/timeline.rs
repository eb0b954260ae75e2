//! Timeline content model and file loading.
//!
//! Entries are stored in a simple line-oriented text format:
//!
//! ```text
//! [entry]
//! year  = 2021
//! month = Feb 2021
//! text  = Ported the renderer to
//! link  = wgpu | https://wgpu.rs/
//! ```
//!
//! `text` / `link` lines append body parts in order.  Anything the parser
//! doesn't recognise is an error with a line number — content files are
//! authored by hand, so silent drops would be worse than a hard stop.

use std::path::Path;

use thiserror::Error;

// ───────────────────────────────────────── model ─────────────

/// One run of entry body content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BodyPart {
    Text(String),
    Link { text: String, href: String },
}

/// A single timeline entry — one dated event under a year label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimelineEntry {
    /// Year label used for section grouping (non-empty, not necessarily numeric).
    pub year: String,
    /// Free-form date label shown above the body (e.g. `"Feb 2021"`).
    pub month: String,
    pub body: Vec<BodyPart>,
}

/// The full timeline, in document order.
#[derive(Debug, Clone, Default)]
pub struct Timeline {
    pub entries: Vec<TimelineEntry>,
}

// ───────────────────────────────────────── errors ────────────

#[derive(Debug, Error)]
pub enum TimelineError {
    #[error("failed to read {path}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("line {line}: {msg}")]
    Parse { line: usize, msg: String },
}

fn parse_err(line: usize, msg: impl Into<String>) -> TimelineError {
    TimelineError::Parse { line, msg: msg.into() }
}

// ───────────────────────────────────────── loading ───────────

impl Timeline {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Load a timeline from a file on disk.
    pub fn load(path: &Path) -> Result<Self, TimelineError> {
        let contents = std::fs::read_to_string(path).map_err(|source| TimelineError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::parse(&contents)
    }

    /// Parse the `[entry]` / `key = value` format.  Entry order is
    /// preserved exactly as written.
    pub fn parse(s: &str) -> Result<Self, TimelineError> {
        let mut entries = Vec::new();
        // (entry under construction, line its `[entry]` header was on)
        let mut current: Option<(TimelineEntry, usize)> = None;

        for (idx, raw) in s.lines().enumerate() {
            let lineno = idx + 1;
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if line == "[entry]" {
                if let Some((entry, at)) = current.take() {
                    entries.push(finish_entry(entry, at)?);
                }
                current = Some((
                    TimelineEntry {
                        year: String::new(),
                        month: String::new(),
                        body: Vec::new(),
                    },
                    lineno,
                ));
                continue;
            }
            if line.starts_with('[') {
                return Err(parse_err(lineno, format!("unknown section {line}")));
            }

            let Some((key, value)) = line.split_once('=') else {
                return Err(parse_err(lineno, "expected `key = value`"));
            };
            let (key, value) = (key.trim(), value.trim());

            let Some((ref mut entry, _)) = current else {
                return Err(parse_err(lineno, "field before the first [entry]"));
            };

            match key {
                "year" => entry.year = value.to_string(),
                "month" => entry.month = value.to_string(),
                "text" => entry.body.push(BodyPart::Text(value.to_string())),
                "link" => {
                    let Some((text, href)) = value.split_once('|') else {
                        return Err(parse_err(lineno, "link needs `label | url`"));
                    };
                    entry.body.push(BodyPart::Link {
                        text: text.trim().to_string(),
                        href: href.trim().to_string(),
                    });
                }
                other => return Err(parse_err(lineno, format!("unknown key `{other}`"))),
            }
        }

        if let Some((entry, at)) = current.take() {
            entries.push(finish_entry(entry, at)?);
        }

        Ok(Self { entries })
    }

    /// Built-in demo timeline shown when no `--file` is given.
    pub fn demo() -> Self {
        let text = |s: &str| BodyPart::Text(s.to_string());
        let link = |t: &str, h: &str| BodyPart::Link {
            text: t.to_string(),
            href: h.to_string(),
        };
        let entry = |year: &str, month: &str, body: Vec<BodyPart>| TimelineEntry {
            year: year.to_string(),
            month: month.to_string(),
            body,
        };

        Self {
            entries: vec![
                entry("2019", "2018-2019", vec![text(
                    "Picked up systems programming after years of scripting. Worked through \
                     operating-systems coursework and wrote a toy kernel scheduler in C.",
                )]),
                entry("2020", "Mar 2020", vec![
                    text("Learned Rust during lockdown, starting with "),
                    link("the book", "https://doc.rust-lang.org/book/"),
                    text(" and a long tail of borrow-checker arguments. First useful tool: a log colorizer."),
                ]),
                entry("2020", "Oct 2020", vec![
                    text("Shipped a terminal dashboard for a homelab with "),
                    link("ratatui", "https://ratatui.rs/"),
                    text(". Learned the hard way why render loops and blocking I/O don't mix."),
                ]),
                entry("2021", "Feb 2021", vec![text(
                    "Rebuilt the dashboard's data layer around an async event loop. Channels \
                     everywhere, shared state nowhere.",
                )]),
                entry("2021", "Sep 2021", vec![
                    text("First accepted patch to an open-source parser — a pathological backtracking \
                          case found while fuzzing with "),
                    link("cargo-fuzz", "https://github.com/rust-fuzz/cargo-fuzz"),
                    text("."),
                ]),
                entry("2022", "Jan 2022", vec![text(
                    "Spent a semester on compilers. Wrote a bytecode VM with a tracing GC and a \
                     register allocator that almost worked.",
                )]),
                entry("2022", "Aug 2022", vec![
                    text("Internship on a storage team: LSM-tree compaction scheduling and far too \
                          many flame graphs. Everything I know about "),
                    link("io_uring", "https://unixism.net/loti/"),
                    text(" dates from this summer."),
                ]),
                entry("2023", "May 2023", vec![text(
                    "Maintainer duty: triaging issues, reviewing drive-by PRs, and learning that \
                     deleting features is a feature.",
                )]),
                entry("2024", "Mar 2024", vec![
                    text("Built a wire-protocol codec crate with property-based tests via "),
                    link("proptest", "https://proptest-rs.github.io/proptest/"),
                    text(". Round-trip invariants caught four framing bugs before review did."),
                ]),
                entry("2025", "Jan 2025", vec![text(
                    "Now: terminal UI tooling, profiling, and whatever this timeline is scrolling \
                     toward next.",
                )]),
            ],
        }
    }
}

fn finish_entry(entry: TimelineEntry, at: usize) -> Result<TimelineEntry, TimelineError> {
    if entry.year.is_empty() {
        return Err(parse_err(at, "entry has no year"));
    }
    Ok(entry)
}

// ───────────────────────────────────────── tests ─────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_entries_in_order() {
        let src = "\
# demo
[entry]
year = 2020
month = Mar 2020
text = hello

[entry]
year = 2021
text = see
link = docs | https://example.com/
";
        let tl = Timeline::parse(src).unwrap();
        assert_eq!(tl.len(), 2);
        assert_eq!(tl.entries[0].year, "2020");
        assert_eq!(tl.entries[0].month, "Mar 2020");
        assert_eq!(tl.entries[1].body[1], BodyPart::Link {
            text: "docs".into(),
            href: "https://example.com/".into(),
        });
    }

    #[test]
    fn missing_year_is_an_error() {
        let err = Timeline::parse("[entry]\ntext = no year\n").unwrap_err();
        assert!(matches!(err, TimelineError::Parse { line: 1, .. }));
    }

    #[test]
    fn field_before_entry_is_an_error() {
        let err = Timeline::parse("year = 2020\n").unwrap_err();
        assert!(matches!(err, TimelineError::Parse { line: 1, .. }));
    }

    #[test]
    fn bad_link_reports_line() {
        let err = Timeline::parse("[entry]\nyear = 2020\nlink = nopipe\n").unwrap_err();
        assert!(matches!(err, TimelineError::Parse { line: 3, .. }));
    }

    #[test]
    fn demo_is_nonempty_and_sorted_by_document_order() {
        let tl = Timeline::demo();
        assert!(tl.len() >= 8);
        // Years are non-empty; order is whatever the source says.
        assert!(tl.entries.iter().all(|e| !e.year.is_empty()));
    }
}
