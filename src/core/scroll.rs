//! Smooth scroll position with exponential ease-out.
//!
//! Input handlers move `target`; each frame tick moves `pos` a fixed
//! fraction of the remaining distance, then snaps when the gap drops under
//! half a cell.  The per-frame positions this produces are what the
//! kinematics tracker samples — the terminal has no native inertial
//! scrolling, so this supplies it.

/// Smoothly animated scroll position in fractional rows.
#[derive(Debug, Clone)]
pub struct SmoothScroll {
    pos: f64,
    target: f64,
    max: f64,
    /// Damping: `pos += (target - pos) * speed` per tick.
    /// Good range at ~30 fps: 0.2–0.5.
    speed: f64,
}

/// Below this remaining distance the position snaps onto the target,
/// avoiding an asymptotic crawl.
const SNAP_THRESHOLD: f64 = 0.05;

impl SmoothScroll {
    pub fn new(speed: f64) -> Self {
        Self {
            pos: 0.0,
            target: 0.0,
            max: 0.0,
            speed: speed.clamp(0.05, 0.95),
        }
    }

    /// Update the scrollable range (`0..=max`).  Both position and target
    /// are re-clamped; shrinking content pulls the view back in bounds.
    pub fn set_max(&mut self, max: f64) {
        self.max = max.max(0.0);
        self.pos = self.pos.clamp(0.0, self.max);
        self.target = self.target.clamp(0.0, self.max);
    }

    pub fn scroll_by(&mut self, delta: f64) {
        self.scroll_to(self.target + delta);
    }

    pub fn scroll_to(&mut self, target: f64) {
        self.target = target.clamp(0.0, self.max);
    }

    /// Advance one frame.  Returns `true` when the position moved.
    pub fn tick(&mut self) -> bool {
        let before = self.pos;
        let gap = self.target - self.pos;
        if gap == 0.0 {
            return false;
        }
        if gap.abs() < SNAP_THRESHOLD {
            self.pos = self.target;
        } else {
            self.pos += gap * self.speed;
        }
        self.pos != before
    }

    pub fn pos(&self) -> f64 {
        self.pos
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    /// True while visible motion remains.
    pub fn is_animating(&self) -> bool {
        self.pos != self.target
    }
}

// ───────────────────────────────────────── tests ─────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converges_onto_target_and_settles() {
        let mut s = SmoothScroll::new(0.35);
        s.set_max(100.0);
        s.scroll_to(40.0);
        let mut ticks = 0;
        while s.is_animating() {
            assert!(s.tick());
            ticks += 1;
            assert!(ticks < 200, "never settled");
        }
        assert_eq!(s.pos(), 40.0);
        assert!(!s.tick(), "settled scroll must not report motion");
    }

    #[test]
    fn target_is_clamped_to_range() {
        let mut s = SmoothScroll::new(0.35);
        s.set_max(10.0);
        s.scroll_by(500.0);
        assert_eq!(s.target(), 10.0);
        s.scroll_by(-500.0);
        assert_eq!(s.target(), 0.0);
    }

    #[test]
    fn shrinking_max_pulls_position_back() {
        let mut s = SmoothScroll::new(0.9);
        s.set_max(100.0);
        s.scroll_to(100.0);
        while s.is_animating() {
            s.tick();
        }
        s.set_max(30.0);
        assert_eq!(s.pos(), 30.0);
        assert_eq!(s.target(), 30.0);
    }

    #[test]
    fn motion_is_monotonic_toward_target() {
        let mut s = SmoothScroll::new(0.25);
        s.set_max(1000.0);
        s.scroll_to(200.0);
        let mut last = s.pos();
        for _ in 0..100 {
            s.tick();
            assert!(s.pos() >= last);
            last = s.pos();
        }
    }
}
