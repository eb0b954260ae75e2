//! Scroll velocity/momentum tracking and the post-scroll decay tail.
//!
//! Momentum is a unitless scalar in `0..=MAX_MOMENTUM` derived from the
//! speed of recent position samples.  It only rises while scrolling; the
//! decay tail brings it back to exactly zero through a bounded sequence of
//! timed steps once samples stop.  Timestamps are caller-supplied
//! milliseconds, so none of this touches a real clock.

/// Instantaneous velocity magnitude cap (rows per millisecond).
pub const MAX_VELOCITY: f64 = 2.5;
/// Velocity → momentum conversion factor.
pub const VELOCITY_SCALE: f64 = 18.0;
/// Momentum ceiling.
pub const MAX_MOMENTUM: f64 = 1.4;
/// Floor on the time delta between samples; coalesced events can arrive
/// with near-identical timestamps and would blow up the division.
pub const MIN_TIME_DELTA_MS: u64 = 16;

/// Quiet period after the last scroll sample before the tail starts.
pub const DECAY_DELAY_MS: u64 = 80;
/// Spacing between decay steps.
pub const DECAY_INTERVAL_MS: u64 = 70;
/// Number of steps in one tail run.
pub const DECAY_STEPS: u32 = 15;
/// Per-step momentum multiplier.
pub const DECAY_FACTOR: f64 = 0.88;

// ───────────────────────────────────────── tracker ───────────

/// Velocity/momentum tracker fed one position sample per frame.
#[derive(Debug, Clone)]
pub struct ScrollKinematics {
    last_pos: f64,
    last_time_ms: u64,
    momentum: f64,
    decay: DecayTail,
}

impl ScrollKinematics {
    pub fn new() -> Self {
        Self {
            last_pos: 0.0,
            last_time_ms: 0,
            momentum: 0.0,
            decay: DecayTail::default(),
        }
    }

    /// Feed a position sample.  Momentum only ever rises here — lowering
    /// it is the decay tail's job.  Any nonzero movement re-arms the tail
    /// from step zero.  Returns `true` when the position moved.
    pub fn sample(&mut self, pos: f64, now_ms: u64) -> bool {
        let dt = now_ms.saturating_sub(self.last_time_ms).max(MIN_TIME_DELTA_MS) as f64;
        let delta = pos - self.last_pos;
        let moved = delta != 0.0;

        if moved {
            let velocity = (delta / dt).clamp(-MAX_VELOCITY, MAX_VELOCITY);
            let candidate = velocity.abs() * VELOCITY_SCALE;
            self.momentum = self.momentum.max(candidate.min(MAX_MOMENTUM));
            self.decay.arm(now_ms);
        }

        self.last_pos = pos;
        self.last_time_ms = now_ms;
        moved
    }

    /// Run any due decay step.  Returns `true` when a step fired, meaning
    /// momentum changed and the digit strip wants a re-render at
    /// [`Self::last_pos`].
    pub fn poll_decay(&mut self, now_ms: u64) -> bool {
        self.decay.poll(now_ms, &mut self.momentum)
    }

    /// Drop any in-flight tail without firing it.
    pub fn cancel_decay(&mut self) {
        self.decay.cancel();
    }

    pub fn momentum(&self) -> f64 {
        self.momentum
    }

    pub fn last_pos(&self) -> f64 {
        self.last_pos
    }
}

impl Default for ScrollKinematics {
    fn default() -> Self {
        Self::new()
    }
}

// ───────────────────────────────────────── decay tail ────────

/// Bounded, poll-driven step schedule.  Re-arming replaces any in-flight
/// run; there is no additive stacking.  Dropping the struct (or never
/// polling it again) means no further steps fire.
#[derive(Debug, Clone, Default)]
struct DecayTail {
    /// Timestamp the next step is due at; `None` while idle.
    next_due_ms: Option<u64>,
    step: u32,
}

impl DecayTail {
    fn arm(&mut self, now_ms: u64) {
        self.step = 0;
        self.next_due_ms = Some(now_ms + DECAY_DELAY_MS);
    }

    fn cancel(&mut self) {
        self.step = 0;
        self.next_due_ms = None;
    }

    /// Fire at most one step per poll.  The next step is scheduled from
    /// the fire time, so a stalled frame clock stretches the tail instead
    /// of bursting it.
    fn poll(&mut self, now_ms: u64, momentum: &mut f64) -> bool {
        let Some(due) = self.next_due_ms else {
            return false;
        };
        if now_ms < due {
            return false;
        }

        *momentum *= DECAY_FACTOR;
        self.step += 1;
        if self.step < DECAY_STEPS {
            self.next_due_ms = Some(now_ms + DECAY_INTERVAL_MS);
        } else {
            *momentum = 0.0;
            self.next_due_ms = None;
        }
        true
    }
}

// ───────────────────────────────────────── tests ─────────────

#[cfg(test)]
mod tests {
    use super::*;

    /// Drive the tracker with steadily increasing positions, then let the
    /// tail run to completion by advancing a fake clock.
    #[test]
    fn momentum_rises_then_decays_to_exactly_zero() {
        let mut k = ScrollKinematics::new();
        let mut now = 0u64;

        let mut prev = 0.0;
        for i in 1..=20 {
            now += 16;
            let m_before = k.momentum();
            assert!(k.sample(i as f64 * 4.0, now));
            assert!(k.momentum() >= m_before, "momentum fell during scrolling");
            prev = k.momentum();
        }
        assert!(prev > 0.0);

        // No more samples: first step fires after the initial delay.
        now += DECAY_DELAY_MS;
        let mut fired = 0u32;
        let mut last = k.momentum();
        while fired < DECAY_STEPS {
            assert!(k.poll_decay(now), "step {fired} did not fire when due");
            fired += 1;
            if fired < DECAY_STEPS {
                assert!(k.momentum() < last, "decay step did not decrease momentum");
                assert!(k.momentum() > 0.0);
            }
            last = k.momentum();
            now += DECAY_INTERVAL_MS;
        }
        assert_eq!(k.momentum(), 0.0);
        assert!(!k.poll_decay(now + 10_000), "tail fired past its final step");
    }

    #[test]
    fn momentum_is_capped() {
        let mut k = ScrollKinematics::new();
        k.sample(10_000.0, 16);
        assert_eq!(k.momentum(), MAX_MOMENTUM);
    }

    #[test]
    fn tiny_time_delta_is_floored() {
        let mut k = ScrollKinematics::new();
        k.sample(1.0, 0);
        // Same-timestamp sample: dt floors to 16 ms rather than dividing by zero.
        k.sample(2.0, 0);
        assert!(k.momentum().is_finite());
        assert!(k.momentum() <= MAX_MOMENTUM);
    }

    #[test]
    fn stationary_samples_do_not_arm_the_tail() {
        let mut k = ScrollKinematics::new();
        assert!(!k.sample(0.0, 16));
        assert!(!k.poll_decay(100_000), "tail armed without movement");
    }

    #[test]
    fn new_scroll_restarts_the_tail_from_step_zero() {
        let mut k = ScrollKinematics::new();
        let mut now = 16u64;
        k.sample(10.0, now);

        // Let a few steps run.
        now += DECAY_DELAY_MS;
        for _ in 0..3 {
            assert!(k.poll_decay(now));
            now += DECAY_INTERVAL_MS;
        }

        // Fresh movement re-arms: nothing due until the delay elapses again.
        k.sample(20.0, now);
        assert!(!k.poll_decay(now + DECAY_DELAY_MS - 1));
        assert!(k.poll_decay(now + DECAY_DELAY_MS));

        // And the restarted run still fires the full number of steps.
        let mut t = now + DECAY_DELAY_MS;
        let mut fired = 1u32;
        loop {
            t += DECAY_INTERVAL_MS;
            if !k.poll_decay(t) {
                break;
            }
            fired += 1;
        }
        assert_eq!(fired, DECAY_STEPS);
        assert_eq!(k.momentum(), 0.0);
    }

    #[test]
    fn cancelled_tail_never_fires() {
        let mut k = ScrollKinematics::new();
        k.sample(10.0, 16);
        k.cancel_decay();
        assert!(!k.poll_decay(1_000_000));
        assert!(k.momentum() > 0.0, "cancel must not itself change momentum");
    }
}
