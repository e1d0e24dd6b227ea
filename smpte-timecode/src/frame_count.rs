//! Elapsed frame counts and the component ⇄ frame count engine.
//!
//! Counts are kept as an exact `i128` number of subframes so that neither the
//! drop-frame arithmetic nor the subframe fraction ever passes through a
//! floating point value. The engine functions never fail: out-of-range inputs
//! produce out-of-range outputs and the caller decides what to do with them.

use crate::components::Components;
use crate::dropframe::DropFrameConfig;
use crate::error::{Result, TimecodeError};
use crate::frame_rate::FrameRate;
use crate::properties::SubFramesBase;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A frame count as supplied by a caller.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum FrameCountValue {
    /// Whole frames.
    Frames(i64),
    /// Whole frames plus subframes in the timecode's subframes base.
    Split {
        /// Whole frames.
        frames: i64,
        /// Subframes.
        sub_frames: i64,
    },
    /// Frames with a fractional part; the fraction is truncated to subframes.
    Combined(f64),
}

/// An exact elapsed frame count, including subframes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameCount {
    sub_frame_count: i128,
    sub_frames_base: SubFramesBase,
}

impl FrameCount {
    /// Resolve a caller-supplied value in the given subframes base.
    pub fn new(value: FrameCountValue, base: SubFramesBase) -> Result<Self> {
        let divisor = base.divisor() as i128;
        let sub_frame_count = match value {
            FrameCountValue::Frames(frames) => frames as i128 * divisor,
            FrameCountValue::Split { frames, sub_frames } => {
                frames as i128 * divisor + sub_frames as i128
            }
            FrameCountValue::Combined(frames) => snap_floor(frames * divisor as f64)
                .ok_or_else(|| TimecodeError::invalid_argument("frame count is NaN"))?,
        };
        Ok(Self::from_sub_frames(sub_frame_count, base))
    }

    /// A count of `sub_frame_count` subframes in `base`.
    #[must_use]
    pub const fn from_sub_frames(sub_frame_count: i128, sub_frames_base: SubFramesBase) -> Self {
        Self {
            sub_frame_count,
            sub_frames_base,
        }
    }

    /// Total count in subframes.
    #[must_use]
    pub const fn sub_frame_count(&self) -> i128 {
        self.sub_frame_count
    }

    /// The subframes base the count is expressed in.
    #[must_use]
    pub const fn sub_frames_base(&self) -> SubFramesBase {
        self.sub_frames_base
    }

    /// Whole frames, truncated toward zero.
    #[must_use]
    pub fn whole_frames(&self) -> i128 {
        self.sub_frame_count / self.sub_frames_base.divisor() as i128
    }

    /// Subframes beyond the whole frames (same sign as the count).
    #[must_use]
    pub fn sub_frames(&self) -> i128 {
        self.sub_frame_count % self.sub_frames_base.divisor() as i128
    }

    /// Frames including the subframe fraction.
    #[must_use]
    pub fn as_f64(&self) -> f64 {
        self.sub_frame_count as f64 / self.sub_frames_base.divisor() as f64
    }

    /// Whether the count is below zero.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.sub_frame_count < 0
    }

    /// The same count expressed in another subframes base, truncating.
    #[must_use]
    pub fn rebased(&self, base: SubFramesBase) -> Self {
        if base == self.sub_frames_base {
            return *self;
        }
        let scaled = self.sub_frame_count.saturating_mul(base.divisor() as i128)
            / self.sub_frames_base.divisor() as i128;
        Self::from_sub_frames(scaled, base)
    }
}

impl fmt::Display for FrameCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sub = self.sub_frames();
        if sub == 0 {
            write!(f, "{}", self.whole_frames())
        } else {
            let sign = if self.is_negative() && self.whole_frames() == 0 { "-" } else { "" };
            write!(f, "{sign}{}.{:02}/{}", self.whole_frames(), sub.abs(), self.sub_frames_base)
        }
    }
}

/// Total elapsed frames represented by `components` at `frame_rate`.
///
/// Non-drop rates multiply the elapsed seconds by the frame ceiling. Drop
/// rates additionally subtract the frame numbers skipped in every minute
/// that is not a multiple of ten.
#[must_use]
pub fn frame_count_of(
    components: &Components,
    frame_rate: FrameRate,
    base: SubFramesBase,
) -> FrameCount {
    let fps = frame_rate.max_frames() as i128;
    let total_seconds = components.days as i128 * 86_400
        + components.hours as i128 * 3_600
        + components.minutes as i128 * 60
        + components.seconds as i128;

    let mut frames = total_seconds * fps + components.frames as i128;

    if let Some(config) = DropFrameConfig::for_frame_rate(frame_rate) {
        let total_minutes = components.days as i128 * 1_440
            + components.hours as i128 * 60
            + components.minutes as i128;
        frames -= config.frames_dropped_until(total_minutes);
    }

    let divisor = base.divisor() as i128;
    FrameCount::from_sub_frames(frames * divisor + components.sub_frames as i128, base)
}

/// Components for an elapsed frame count at `frame_rate`.
///
/// Negative counts decompose to the mirrored positive components with every
/// field negated. Fields too large for `i64` saturate.
#[must_use]
pub fn components_from(count: &FrameCount, frame_rate: FrameRate) -> Components {
    let divisor = count.sub_frames_base().divisor() as i128;
    let negative = count.is_negative();
    // leave headroom for re-inserting dropped frame numbers
    let magnitude = i128::try_from(count.sub_frame_count().unsigned_abs())
        .unwrap_or(i128::MAX)
        .min(i128::MAX / 2);

    let sub_frames = magnitude % divisor;
    let mut frames = magnitude / divisor;

    if let Some(config) = DropFrameConfig::for_frame_rate(frame_rate) {
        frames = config.restore_dropped_frames(frames);
    }

    let fps = frame_rate.max_frames() as i128;
    let per_day = fps * 86_400;
    let per_hour = fps * 3_600;
    let per_minute = fps * 60;

    let days = frames / per_day;
    frames %= per_day;
    let hours = frames / per_hour;
    frames %= per_hour;
    let minutes = frames / per_minute;
    frames %= per_minute;
    let seconds = frames / fps;
    frames %= fps;

    let sign = if negative { -1 } else { 1 };
    Components {
        days: saturate(days * sign),
        hours: saturate(hours * sign),
        minutes: saturate(minutes * sign),
        seconds: saturate(seconds * sign),
        frames: saturate(frames * sign),
        sub_frames: saturate(sub_frames * sign),
    }
}

pub(crate) fn saturate(value: i128) -> i64 {
    i64::try_from(value).unwrap_or(if value < 0 { i64::MIN } else { i64::MAX })
}

/// Floor a float to an integer, snapping to the nearest integer first when
/// the value is within floating point noise of it.
///
/// `3603.6 * 24000 / 1001` lands on `86399.99999999999`; truncating that
/// loses a whole frame. The relative tolerance (1e-12) stays far below one
/// subframe across the 100 day range at 120 fps with a base of 100.
pub(crate) fn snap_floor(value: f64) -> Option<i128> {
    if value.is_nan() {
        return None;
    }
    let nearest = value.round();
    let tolerance = value.abs().max(1.0) * 1e-12;
    let snapped = if (value - nearest).abs() <= tolerance {
        nearest
    } else {
        value.floor()
    };
    // `as` saturates infinities at the i128 bounds
    Some(snapped as i128)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn count(c: Components, rate: FrameRate) -> i128 {
        frame_count_of(&c, rate, SubFramesBase::Max80).whole_frames()
    }

    fn from_frames(frames: i128, rate: FrameRate) -> Components {
        components_from(
            &FrameCount::from_sub_frames(frames * 80, SubFramesBase::Max80),
            rate,
        )
    }

    #[test]
    fn test_non_drop_frame_count() {
        // 24fps: 1 hour = 86400 frames
        assert_eq!(count(Components::new(1, 0, 0, 0), FrameRate::Fps24), 86_400);
        // 30fps: 1 hour = 108000 frames
        assert_eq!(count(Components::new(1, 0, 0, 0), FrameRate::Fps30), 108_000);
        // 23.976 counts like 24
        assert_eq!(count(Components::new(1, 0, 0, 0), FrameRate::Fps23_976), 86_400);
        let expected = 3600 * 24 + 30 * 60 * 24 + 45 * 24 + 12;
        assert_eq!(count(Components::new(1, 30, 45, 12), FrameRate::Fps24), expected);
        assert_eq!(
            count(Components::ZERO.with_days(1), FrameRate::Fps25),
            25 * 86_400
        );
    }

    #[test]
    fn test_drop_frame_count() {
        assert_eq!(count(Components::new(0, 1, 0, 2), FrameRate::Fps29_97Drop), 1_800);
        assert_eq!(count(Components::new(0, 10, 0, 0), FrameRate::Fps29_97Drop), 17_982);
        assert_eq!(count(Components::new(1, 0, 0, 0), FrameRate::Fps29_97Drop), 107_892);
        assert_eq!(count(Components::new(1, 0, 0, 0), FrameRate::Fps30Drop), 107_892);
        assert_eq!(count(Components::new(1, 0, 0, 0), FrameRate::Fps59_94Drop), 215_784);
        assert_eq!(count(Components::new(1, 0, 0, 0), FrameRate::Fps119_88Drop), 431_568);
        assert_eq!(
            count(Components::new(24, 0, 0, 0), FrameRate::Fps29_97Drop),
            FrameRate::Fps29_97Drop.frames_per_day()
        );
    }

    #[test]
    fn test_components_from_non_drop() {
        assert_eq!(from_frames(86_400, FrameRate::Fps24), Components::new(1, 0, 0, 0));
        assert_eq!(from_frames(130_332, FrameRate::Fps24), Components::new(1, 30, 30, 12));
        assert_eq!(
            from_frames(2_073_600, FrameRate::Fps24),
            Components::ZERO.with_days(1)
        );
    }

    #[test]
    fn test_components_from_drop() {
        assert_eq!(from_frames(29, FrameRate::Fps29_97Drop), Components::new(0, 0, 0, 29));
        assert_eq!(from_frames(30, FrameRate::Fps29_97Drop), Components::new(0, 0, 1, 0));
        assert_eq!(from_frames(1_799, FrameRate::Fps29_97Drop), Components::new(0, 0, 59, 29));
        assert_eq!(from_frames(1_800, FrameRate::Fps29_97Drop), Components::new(0, 1, 0, 2));
        assert_eq!(from_frames(17_982, FrameRate::Fps29_97Drop), Components::new(0, 10, 0, 0));
        assert_eq!(from_frames(3_600, FrameRate::Fps59_94Drop), Components::new(0, 1, 0, 4));
        assert_eq!(from_frames(107_892, FrameRate::Fps29_97Drop), Components::new(1, 0, 0, 0));
        assert_eq!(
            from_frames(2_589_408, FrameRate::Fps29_97Drop),
            Components::ZERO.with_days(1)
        );
    }

    #[test]
    fn test_drop_frame_roundtrip_dense() {
        for rate in FrameRate::ALL.into_iter().filter(|r| r.is_drop()) {
            // every frame of the first 11 minutes, then a sparse sweep of the day
            let dense = 0..(rate.max_frames() as i128 * 60 * 11);
            let sparse = (0..rate.frames_per_day()).step_by(997);
            for frame in dense.chain(sparse) {
                let c = from_frames(frame, rate);
                assert!(c.is_valid(&rate.into()), "{rate} frame {frame} gave {c:?}");
                assert_eq!(count(c, rate), frame, "{rate} frame {frame} via {c:?}");
            }
        }
    }

    #[test]
    fn test_sub_frames_are_exact() {
        let c = Components::new(0, 0, 1, 2).with_sub_frames(79);
        let fc = frame_count_of(&c, FrameRate::Fps24, SubFramesBase::Max80);
        assert_eq!(fc.sub_frame_count(), (26 * 80) + 79);
        assert_eq!(fc.whole_frames(), 26);
        assert_eq!(fc.sub_frames(), 79);
        assert_eq!(components_from(&fc, FrameRate::Fps24), c);
    }

    #[test]
    fn test_negative_counts_mirror() {
        let fc = FrameCount::new(
            FrameCountValue::Split {
                frames: -25,
                sub_frames: -3,
            },
            SubFramesBase::Max80,
        )
        .unwrap();
        let c = components_from(&fc, FrameRate::Fps24);
        assert_eq!(
            c,
            Components {
                days: 0,
                hours: 0,
                minutes: 0,
                seconds: -1,
                frames: -1,
                sub_frames: -3,
            }
        );
        assert_eq!(frame_count_of(&c, FrameRate::Fps24, SubFramesBase::Max80), fc);
    }

    #[test]
    fn test_huge_values_do_not_panic() {
        let c = Components::ZERO.with_days(i64::MAX);
        let fc = frame_count_of(&c, FrameRate::Fps120Drop, SubFramesBase::Max100);
        assert!(fc.sub_frame_count() > 0);
        assert_eq!(components_from(&fc, FrameRate::Fps120Drop).days, i64::MAX);

        let fc = FrameCount::from_sub_frames(i128::MIN, SubFramesBase::Max80);
        let c = components_from(&fc, FrameRate::Fps29_97Drop);
        assert!(c.days < 0);
    }

    #[test]
    fn test_frame_count_value() {
        let base = SubFramesBase::Max80;
        assert_eq!(
            FrameCount::new(FrameCountValue::Frames(10), base).unwrap().sub_frame_count(),
            800
        );
        let fc = FrameCount::new(FrameCountValue::Combined(10.5), base).unwrap();
        assert_eq!(fc.whole_frames(), 10);
        assert_eq!(fc.sub_frames(), 40);
        assert_eq!(fc.as_f64(), 10.5);
        // 0.999 * 80 = 79.92 truncates
        let fc = FrameCount::new(FrameCountValue::Combined(0.999), base).unwrap();
        assert_eq!(fc.sub_frames(), 79);
        assert!(FrameCount::new(FrameCountValue::Combined(f64::NAN), base).is_err());
    }

    #[test]
    fn test_rebased() {
        let fc = FrameCount::from_sub_frames(10 * 80 + 40, SubFramesBase::Max80);
        assert_eq!(fc.rebased(SubFramesBase::Max100).sub_frame_count(), 1_050);
        assert_eq!(fc.rebased(SubFramesBase::Max80), fc);
    }

    #[test]
    fn test_display() {
        let fc = FrameCount::from_sub_frames(10 * 80 + 40, SubFramesBase::Max80);
        assert_eq!(fc.to_string(), "10.40/80");
        assert_eq!(FrameCount::from_sub_frames(160, SubFramesBase::Max80).to_string(), "2");
    }

    #[test]
    fn test_snap_floor() {
        assert_eq!(snap_floor(86_399.999_999_999_99), Some(86_400));
        assert_eq!(snap_floor(86_399.5), Some(86_399));
        assert_eq!(snap_floor(-0.5), Some(-1));
        assert_eq!(snap_floor(f64::NAN), None);
        assert_eq!(snap_floor(f64::INFINITY), Some(i128::MAX));
    }
}
