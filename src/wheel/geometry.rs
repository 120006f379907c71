//! Wheel angle math.
//!
//! The pointer sits at 0 degrees and the wheel rotates clockwise. Segment `i`
//! covers `[i * seg, (i + 1) * seg)` measured counter-clockwise from the
//! pointer once the rotation is undone, where `seg = 360 / count`.
//!
//! The outcome is decided before the wheel moves; this module only works out
//! a rotation that visibly lands on it, plus the inverse mapping for callers
//! that need to read a segment off a rotation.

use serde::{Deserialize, Serialize};

use crate::core::rng::SpinRng;

/// Fewest full turns in a random spin.
pub const MIN_SPINS: f64 = 10.0;

/// Most full turns in a random spin (exclusive).
pub const MAX_SPINS: f64 = 15.0;

/// Fraction of a segment the landing point may drift from its centre.
pub const JITTER_SPAN: f64 = 0.35;

/// Angle covered by one segment.
#[must_use]
pub fn segment_angle(count: usize) -> f64 {
    360.0 / count as f64
}

/// Normalize an angle into `[0, 360)`.
#[must_use]
pub fn normalize(degrees: f64) -> f64 {
    let r = degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negatives
    if r >= 360.0 { 0.0 } else { r }
}

/// Rotation (mod 360) that puts the centre of segment `index` under the pointer.
#[must_use]
pub fn target_angle(index: usize, count: usize) -> f64 {
    let seg = segment_angle(count);
    normalize(360.0 - (index as f64 + 0.5) * seg)
}

/// Segment under the pointer for a given rotation.
///
/// Every rotation maps to 0 on a single-segment wheel. Panics if `count`
/// is zero.
#[must_use]
pub fn index_at_rotation(rotation: f64, count: usize) -> usize {
    let seg = segment_angle(count);
    let adjusted = normalize(360.0 - normalize(rotation));
    ((adjusted / seg).floor() as usize) % count
}

/// A planned spin from the current rotation to one landing on `index`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpinPlan {
    /// Segment the wheel will stop on.
    pub index: usize,

    /// Rotation before the spin, in degrees.
    pub start_rotation: f64,

    /// Absolute rotation after the spin, in degrees.
    pub final_rotation: f64,

    /// Whole turns added for show.
    pub full_spins: u32,

    /// Offset from the segment centre, in degrees.
    pub jitter: f64,
}

impl SpinPlan {
    /// Plan a spin with explicit turn count and jitter.
    ///
    /// `jitter_fraction` is expected in `[-0.5, 0.5)` and is scaled by
    /// [`JITTER_SPAN`] of a segment, which keeps the landing point inside
    /// the target segment.
    ///
    /// Panics if `count` is zero or `index` is out of range.
    #[must_use]
    pub fn new(
        start_rotation: f64,
        index: usize,
        count: usize,
        spins: f64,
        jitter_fraction: f64,
    ) -> Self {
        assert!(count > 0, "Wheel must have at least 1 segment");
        assert!(index < count, "Segment index {index} out of range for {count} segments");

        let seg = segment_angle(count);
        let delta = normalize(target_angle(index, count) - normalize(start_rotation));
        let jitter = jitter_fraction.clamp(-0.5, 0.5) * seg * JITTER_SPAN;
        let full_spins = spins.max(0.0).floor() as u32;

        Self {
            index,
            start_rotation,
            final_rotation: start_rotation + f64::from(full_spins) * 360.0 + delta + jitter,
            full_spins,
            jitter,
        }
    }

    /// Plan a spin with random turn count and jitter.
    #[must_use]
    pub fn random(rng: &mut SpinRng, start_rotation: f64, index: usize, count: usize) -> Self {
        let spins = rng.gen_range_f64(MIN_SPINS..MAX_SPINS);
        let jitter_fraction = rng.gen_range_f64(-0.5..0.5);
        Self::new(start_rotation, index, count, spins, jitter_fraction)
    }

    /// Total degrees travelled.
    #[must_use]
    pub fn travel(&self) -> f64 {
        self.final_rotation - self.start_rotation
    }
}
