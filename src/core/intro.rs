//! First-view intro: entries stagger in one by one, once per machine.
//!
//! Completion is recorded as a marker file under the state directory.
//! Both the read and the write are best-effort — with no usable state
//! directory the intro simply plays every launch.

use std::path::PathBuf;

/// Delay between consecutive entries becoming visible.
pub const INTRO_STAGGER_MS: u64 = 120;
/// Hard cap on the intro's total runtime.
pub const INTRO_MAX_MS: u64 = 4_000;

/// Tracks the staggered reveal.  When `seen` is set at construction the
/// intro is already over and every entry is visible immediately.
#[derive(Debug, Clone)]
pub struct IntroState {
    started_ms: u64,
    done: bool,
}

impl IntroState {
    pub fn begin(seen: bool, now_ms: u64) -> Self {
        Self { started_ms: now_ms, done: seen }
    }

    /// Number of entries (prefix of the timeline) visible at `now_ms`.
    pub fn visible_entries(&self, total: usize, now_ms: u64) -> usize {
        if self.done {
            return total;
        }
        let elapsed = now_ms.saturating_sub(self.started_ms);
        // Entry 0 shows at once; entry n after n stagger intervals.
        ((elapsed / INTRO_STAGGER_MS) as usize + 1).min(total)
    }

    /// Advance the intro.  Returns `true` exactly once, on the tick the
    /// reveal finishes — the caller persists the seen flag then.
    pub fn poll(&mut self, total: usize, now_ms: u64) -> bool {
        if self.done {
            return false;
        }
        let elapsed = now_ms.saturating_sub(self.started_ms);
        if self.visible_entries(total, now_ms) >= total || elapsed >= INTRO_MAX_MS {
            self.done = true;
            return true;
        }
        false
    }

    pub fn is_active(&self) -> bool {
        !self.done
    }
}

// ───────────────────────────────────────── seen flag ─────────

/// True when the marker file exists.  Unreadable state dirs read as unseen.
pub fn load_seen() -> bool {
    marker_path().map(|p| p.exists()).unwrap_or(false)
}

/// Write the marker.  Failures are logged at debug and otherwise ignored.
pub fn store_seen() {
    let Some(path) = marker_path() else {
        return;
    };
    if let Some(parent) = path.parent() {
        if let Err(e) = std::fs::create_dir_all(parent) {
            tracing::debug!("intro marker dir: {e}");
            return;
        }
    }
    if let Err(e) = std::fs::write(&path, b"seen\n") {
        tracing::debug!("intro marker write: {e}");
    }
}

/// `$XDG_STATE_HOME/timeline-tui/intro-seen`, default `~/.local/state/...`.
fn marker_path() -> Option<PathBuf> {
    let state_dir = std::env::var("XDG_STATE_HOME")
        .map(PathBuf::from)
        .ok()
        .or_else(|| {
            std::env::var("HOME")
                .ok()
                .map(|h| PathBuf::from(h).join(".local").join("state"))
        })?;
    Some(state_dir.join("timeline-tui").join("intro-seen"))
}

// ───────────────────────────────────────── tests ─────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seen_intro_shows_everything_immediately() {
        let mut intro = IntroState::begin(true, 0);
        assert_eq!(intro.visible_entries(10, 0), 10);
        assert!(!intro.is_active());
        assert!(!intro.poll(10, 0), "already-seen intro must not complete again");
    }

    #[test]
    fn entries_reveal_one_per_stagger_interval() {
        let intro = IntroState::begin(false, 1_000);
        assert_eq!(intro.visible_entries(5, 1_000), 1);
        assert_eq!(intro.visible_entries(5, 1_000 + INTRO_STAGGER_MS - 1), 1);
        assert_eq!(intro.visible_entries(5, 1_000 + INTRO_STAGGER_MS), 2);
        assert_eq!(intro.visible_entries(5, 1_000 + 4 * INTRO_STAGGER_MS), 5);
        // Never more than the timeline has.
        assert_eq!(intro.visible_entries(5, 1_000 + 100 * INTRO_STAGGER_MS), 5);
    }

    #[test]
    fn completes_exactly_once() {
        let mut intro = IntroState::begin(false, 0);
        assert!(!intro.poll(5, INTRO_STAGGER_MS));
        assert!(intro.poll(5, 4 * INTRO_STAGGER_MS));
        assert!(!intro.poll(5, 5 * INTRO_STAGGER_MS));
        assert!(!intro.is_active());
    }

    #[test]
    fn runtime_cap_finishes_a_long_timeline() {
        let mut intro = IntroState::begin(false, 0);
        let huge = 10_000;
        assert!(!intro.poll(huge, INTRO_MAX_MS - 1));
        assert!(intro.poll(huge, INTRO_MAX_MS));
        assert_eq!(intro.visible_entries(huge, INTRO_MAX_MS), huge);
    }

    #[test]
    fn empty_timeline_completes_at_once() {
        let mut intro = IntroState::begin(false, 0);
        assert!(intro.poll(0, 0));
    }
}
