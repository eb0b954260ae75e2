//! Year sections — the scroll-space interval covered by all entries that
//! share a year label.

use super::layout::LaidOutEntry;

/// Minimal enclosing scroll-space interval for one year label.
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub year: String,
    pub start: f64,
    pub end: f64,
}

/// Group laid-out entries by year and merge each group's extents, keeping
/// first-appearance order.  `base` shifts content rows into document rows
/// (the sticky header sits above row zero of the content).
///
/// `start <= end` holds for every produced section.  Adjacent sections can
/// still come out non-ascending when a layout is degenerate (all-empty
/// entries); consumers skip such pairs rather than treating them as errors.
pub fn build_sections(entries: &[LaidOutEntry], base: f64) -> Vec<Section> {
    let mut sections: Vec<Section> = Vec::new();

    for entry in entries {
        let start = base + entry.top as f64;
        let end = base + entry.bottom as f64;
        match sections.iter_mut().find(|s| s.year == entry.year) {
            Some(section) => {
                section.start = section.start.min(start);
                section.end = section.end.max(end);
            }
            None => sections.push(Section {
                year: entry.year.clone(),
                start,
                end,
            }),
        }
    }

    sections
}

// ───────────────────────────────────────── tests ─────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn extent(year: &str, top: usize, bottom: usize) -> LaidOutEntry {
        LaidOutEntry {
            index: 0,
            year: year.into(),
            month: String::new(),
            top,
            bottom,
            body_lines: Vec::new(),
        }
    }

    #[test]
    fn merges_same_year_extents() {
        let entries = vec![
            extent("2020", 0, 4),
            extent("2020", 4, 9),
            extent("2021", 9, 12),
        ];
        let sections = build_sections(&entries, 0.0);
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].year, "2020");
        assert_eq!((sections[0].start, sections[0].end), (0.0, 9.0));
        assert_eq!((sections[1].start, sections[1].end), (9.0, 12.0));
    }

    #[test]
    fn same_year_merges_even_when_nonadjacent() {
        // Interleaved labels: the 2020 section spans across the 2021 entry.
        let entries = vec![
            extent("2020", 0, 3),
            extent("2021", 3, 6),
            extent("2020", 6, 10),
        ];
        let sections = build_sections(&entries, 0.0);
        assert_eq!(sections.len(), 2);
        assert_eq!((sections[0].start, sections[0].end), (0.0, 10.0));
        // First-appearance order, not label order.
        assert_eq!(sections[0].year, "2020");
        assert_eq!(sections[1].year, "2021");
    }

    #[test]
    fn base_offset_shifts_into_document_space() {
        let sections = build_sections(&[extent("2020", 0, 5)], 3.0);
        assert_eq!((sections[0].start, sections[0].end), (3.0, 8.0));
    }

    #[test]
    fn start_never_exceeds_end() {
        let entries = vec![extent("2020", 7, 7), extent("2020", 2, 5)];
        let sections = build_sections(&entries, 0.0);
        assert!(sections.iter().all(|s| s.start <= s.end));
    }

    #[test]
    fn empty_input_builds_no_sections() {
        assert!(build_sections(&[], 0.0).is_empty());
    }
}
