//! Decorative binary digit strip: deterministic base pattern plus a
//! momentum-driven scramble overlay.
//!
//! The base pattern is a pure function of the quantized scroll position,
//! so a motionless view is rock-stable.  Scrambling overrides individual
//! digits near the viewport's relative position with short-lived random
//! bits; entries expire after [`SCRAMBLE_DURATION_MS`] and the digit
//! reverts to its base value.

use std::collections::HashMap;

use rand::Rng;
use rand::RngExt;

/// Scroll positions are snapped to this grid before hashing, so the base
/// pattern only changes every `SCROLL_SNAP` rows of travel.
pub const SCROLL_SNAP: f64 = 50.0;
/// Seed stride between consecutive 30-digit segments.
pub const SEGMENT_STRIDE: u32 = 500;
/// Momentum below this shows the base pattern unmodified.
pub const MIN_INTENSITY: f64 = 0.008;
/// Lifetime of one scrambled digit.
pub const SCRAMBLE_DURATION_MS: u64 = 100;

/// LCG-style integer hash: `((x ^ (x >> 16)) * 1664525 + 1013904223) mod 2^32`.
pub fn lcg_hash(value: u32) -> u32 {
    let mixed = value ^ (value >> 16);
    mixed.wrapping_mul(1_664_525).wrapping_add(1_013_904_223)
}

/// Build the deterministic base pattern for a scroll position: hash one
/// 30-digit binary segment at a time until `digit_count` is covered.
pub fn base_pattern(scroll_pos: f64, digit_count: usize) -> String {
    let quantized = ((scroll_pos / SCROLL_SNAP).floor() * SCROLL_SNAP).max(0.0) as u32;
    let mut out = String::with_capacity(digit_count + 32);
    let mut segment = 0u32;
    while out.len() < digit_count {
        let h = lcg_hash(quantized.wrapping_add(segment.wrapping_mul(SEGMENT_STRIDE)));
        out.push_str(&format!("{h:030b}"));
        segment += 1;
    }
    out.truncate(digit_count);
    out
}

/// How many digit slots the strip needs: content height plus a headroom
/// buffer (narrow terminals scroll proportionally further per row, so they
/// get a slightly smaller one), divided by the per-digit row span.
///
/// A non-positive span means layout hasn't settled; the caller keeps its
/// previous count and retries on the next resize.
pub fn digit_count(content_rows: usize, viewport_cols: u16, span_rows: f64) -> Option<usize> {
    if span_rows <= 0.0 {
        return None;
    }
    let buffer = if viewport_cols < 80 { 0.35 } else { 0.38 };
    let needed = ((content_rows as f64 * (1.0 + buffer)) / span_rows).ceil() as usize;
    (needed > 0).then_some(needed)
}

// ───────────────────────────────────────── scramble ──────────

#[derive(Debug, Clone, Copy)]
struct ScrambledDigit {
    value: char,
    assigned_at_ms: u64,
}

/// Digit index → temporary override.  Owned by the app for the lifetime of
/// the view; cleared whenever momentum drops below the display threshold.
#[derive(Debug, Default)]
pub struct ScrambleMap {
    digits: HashMap<usize, ScrambledDigit>,
}

impl ScrambleMap {
    /// Apply the overlay for one frame and return the display string.
    ///
    /// Live overrides replace their base digit; expired ones are dropped.
    /// New digits within `width` of the scroll-proportional center are
    /// scrambled with probability `momentum * (1 - dist/width) * 0.2`.
    pub fn overlay<R: Rng>(
        &mut self,
        base: &str,
        momentum: f64,
        scroll_pos: f64,
        doc_height: f64,
        now_ms: u64,
        rng: &mut R,
    ) -> String {
        if momentum < MIN_INTENSITY {
            self.digits.clear();
            return base.to_string();
        }

        let digit_count = base.len();
        let mut chars: Vec<char> = base.chars().collect();
        let rel = if doc_height > 0.0 { scroll_pos / doc_height } else { 0.0 };
        let center = rel * digit_count as f64;
        let width = 80.0 + momentum * 70.0;

        self.digits.retain(|&i, d| {
            if now_ms.saturating_sub(d.assigned_at_ms) < SCRAMBLE_DURATION_MS {
                if i < chars.len() {
                    chars[i] = d.value;
                }
                true
            } else {
                false
            }
        });

        for (i, ch) in chars.iter_mut().enumerate() {
            let dist = (i as f64 - center).abs();
            if dist >= width || self.digits.contains_key(&i) {
                continue;
            }
            let prob = momentum * (1.0 - dist / width) * 0.2;
            if rng.random::<f64>() < prob {
                let value = if rng.random::<bool>() { '1' } else { '0' };
                *ch = value;
                self.digits.insert(i, ScrambledDigit { value, assigned_at_ms: now_ms });
            }
        }

        chars.into_iter().collect()
    }

    /// Whether the digit at `index` currently carries an override
    /// (used to highlight static in the strip).
    pub fn contains(&self, index: usize) -> bool {
        self.digits.contains_key(&index)
    }

    pub fn is_empty(&self) -> bool {
        self.digits.is_empty()
    }

    pub fn clear(&mut self) {
        self.digits.clear();
    }
}

// ───────────────────────────────────────── tests ─────────────
