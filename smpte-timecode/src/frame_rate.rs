//! Timecode frame rates.
//!
//! Every supported rate carries two different notions of "frames per second":
//!
//! - the **elapsed-frames rate**, used when counting frames. Drop-frame rates
//!   count 29.97 (or 59.94, 119.88) frame *numbers* per second of timecode.
//! - the **real-time rate**, used to turn a frame count into wall-clock
//!   duration. `29.97d` runs at `30000/1001` while `30d` runs at exactly 30.
//!
//! Mixing the two up causes silent drift of 3.6 seconds per hour.

use crate::error::{Result, TimecodeError};
use crate::properties::{SubFramesBase, UpperLimit};
use crate::rational::Fraction;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Frame rates supported by timecode values.
///
/// Variants are declared in canonical order; `Ord` follows that order rather
/// than numeric rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum FrameRate {
    /// 23.976 fps (24000/1001, NTSC film)
    Fps23_976,
    /// 24 fps (film)
    Fps24,
    /// 24.98 fps (25000/1001)
    Fps24_98,
    /// 25 fps (PAL)
    Fps25,
    /// 29.97 fps non-drop
    Fps29_97,
    /// 29.97 fps drop-frame
    Fps29_97Drop,
    /// 30 fps
    Fps30,
    /// 30 fps drop-frame
    Fps30Drop,
    /// 47.952 fps (48000/1001)
    Fps47_952,
    /// 48 fps (HFR film)
    Fps48,
    /// 50 fps
    Fps50,
    /// 59.94 fps non-drop
    Fps59_94,
    /// 59.94 fps drop-frame
    Fps59_94Drop,
    /// 60 fps
    Fps60,
    /// 60 fps drop-frame
    Fps60Drop,
    /// 95.904 fps (96000/1001)
    Fps95_904,
    /// 96 fps
    Fps96,
    /// 100 fps
    Fps100,
    /// 119.88 fps non-drop
    Fps119_88,
    /// 119.88 fps drop-frame
    Fps119_88Drop,
    /// 120 fps
    Fps120,
    /// 120 fps drop-frame
    Fps120Drop,
}

/// Groups of rates that share wall-clock timing for identical timecode digits.
///
/// `01:00:00:00` at 23.976 and at 29.97 both last 3603.6 seconds, so the two
/// rates are compatible; 24 fps is not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CompatibleGroup {
    /// NTSC pull-down rates (x/1001), non-drop.
    NtscColorWallTime,
    /// NTSC pull-down drop-frame rates.
    NtscDropWallTime,
    /// Whole-number rates.
    Whole,
    /// Whole-number drop-frame rates.
    WholeDrop,
}

struct RateInfo {
    name: &'static str,
    verbose: &'static str,
    drop: bool,
    max_frames: u32,
    elapsed_fps: Fraction,
    real_time_fps: Fraction,
    dropped_per_minute: u32,
    digits: usize,
    group: CompatibleGroup,
}

const fn info(
    name: &'static str,
    verbose: &'static str,
    max_frames: u32,
    real_time_fps: Fraction,
    dropped_per_minute: u32,
    group: CompatibleGroup,
) -> RateInfo {
    let drop = dropped_per_minute > 0;
    // drop rates count 29.97, 59.94 or 119.88 frame numbers per second
    let elapsed_fps = if drop {
        Fraction::new(max_frames as i64 * 999, 1000)
    } else {
        Fraction::from_int(max_frames as i64)
    };
    RateInfo {
        name,
        verbose,
        drop,
        max_frames,
        elapsed_fps,
        real_time_fps,
        dropped_per_minute,
        digits: if max_frames >= 100 { 3 } else { 2 },
        group,
    }
}

use CompatibleGroup::{NtscColorWallTime, NtscDropWallTime, Whole, WholeDrop};

static RATES: [RateInfo; 22] = [
    info("23.976", "23.976 fps", 24, Fraction::new(24000, 1001), 0, NtscColorWallTime),
    info("24", "24 fps", 24, Fraction::from_int(24), 0, Whole),
    info("24.98", "24.98 fps", 25, Fraction::new(25000, 1001), 0, NtscColorWallTime),
    info("25", "25 fps", 25, Fraction::from_int(25), 0, Whole),
    info("29.97", "29.97 fps", 30, Fraction::new(30000, 1001), 0, NtscColorWallTime),
    info("29.97d", "29.97 fps DF", 30, Fraction::new(30000, 1001), 2, NtscDropWallTime),
    info("30", "30 fps", 30, Fraction::from_int(30), 0, Whole),
    info("30d", "30 fps DF", 30, Fraction::from_int(30), 2, WholeDrop),
    info("47.952", "47.952 fps", 48, Fraction::new(48000, 1001), 0, NtscColorWallTime),
    info("48", "48 fps", 48, Fraction::from_int(48), 0, Whole),
    info("50", "50 fps", 50, Fraction::from_int(50), 0, Whole),
    info("59.94", "59.94 fps", 60, Fraction::new(60000, 1001), 0, NtscColorWallTime),
    info("59.94d", "59.94 fps DF", 60, Fraction::new(60000, 1001), 4, NtscDropWallTime),
    info("60", "60 fps", 60, Fraction::from_int(60), 0, Whole),
    info("60d", "60 fps DF", 60, Fraction::from_int(60), 4, WholeDrop),
    info("95.904", "95.904 fps", 96, Fraction::new(96000, 1001), 0, NtscColorWallTime),
    info("96", "96 fps", 96, Fraction::from_int(96), 0, Whole),
    info("100", "100 fps", 100, Fraction::from_int(100), 0, Whole),
    info("119.88", "119.88 fps", 120, Fraction::new(120000, 1001), 0, NtscColorWallTime),
    info("119.88d", "119.88 fps DF", 120, Fraction::new(120000, 1001), 8, NtscDropWallTime),
    info("120", "120 fps", 120, Fraction::from_int(120), 0, Whole),
    info("120d", "120 fps DF", 120, Fraction::from_int(120), 8, WholeDrop),
];

impl FrameRate {
    /// All frame rates in canonical order.
    pub const ALL: [FrameRate; 22] = [
        Self::Fps23_976,
        Self::Fps24,
        Self::Fps24_98,
        Self::Fps25,
        Self::Fps29_97,
        Self::Fps29_97Drop,
        Self::Fps30,
        Self::Fps30Drop,
        Self::Fps47_952,
        Self::Fps48,
        Self::Fps50,
        Self::Fps59_94,
        Self::Fps59_94Drop,
        Self::Fps60,
        Self::Fps60Drop,
        Self::Fps95_904,
        Self::Fps96,
        Self::Fps100,
        Self::Fps119_88,
        Self::Fps119_88Drop,
        Self::Fps120,
        Self::Fps120Drop,
    ];

    fn info(self) -> &'static RateInfo {
        &RATES[self as usize]
    }

    /// Short name, e.g. `"29.97d"`.
    #[must_use]
    pub fn name(self) -> &'static str {
        self.info().name
    }

    /// Human readable name, e.g. `"29.97 fps DF"`.
    #[must_use]
    pub fn verbose_name(self) -> &'static str {
        self.info().verbose
    }

    /// Whether this is a drop-frame rate.
    #[must_use]
    pub fn is_drop(self) -> bool {
        self.info().drop
    }

    /// Number of frame numbers in one second of timecode (the frames ceiling).
    #[must_use]
    pub fn max_frames(self) -> u32 {
        self.info().max_frames
    }

    /// Frame numbers skipped at the start of each minute not divisible by 10.
    #[must_use]
    pub fn frames_dropped_per_minute(self) -> u32 {
        self.info().dropped_per_minute
    }

    /// Digits needed to display the frames component.
    #[must_use]
    pub fn number_of_digits(self) -> usize {
        self.info().digits
    }

    /// Frame numbers counted per second of timecode (29.97 for 29.97d and 30d).
    #[must_use]
    pub fn elapsed_frames_rate(self) -> Fraction {
        self.info().elapsed_fps
    }

    /// Frames per second of wall-clock time.
    #[must_use]
    pub fn real_time_rate(self) -> Fraction {
        self.info().real_time_fps
    }

    /// The real-time rate as a fraction, e.g. `30000/1001`.
    #[must_use]
    pub fn rational_rate(self) -> Fraction {
        self.real_time_rate()
    }

    /// The duration of one frame as a fraction of a second, e.g. `1001/30000`.
    #[must_use]
    pub fn rational_frame_duration(self) -> Fraction {
        let rate = self.real_time_rate();
        Fraction::new(rate.denominator(), rate.numerator())
    }

    /// The duration of one frame in seconds.
    #[must_use]
    pub fn frame_duration_seconds(self) -> f64 {
        self.rational_frame_duration().to_f64()
    }

    /// The real-time rate as a floating point value.
    #[must_use]
    pub fn as_f64(self) -> f64 {
        self.real_time_rate().to_f64()
    }

    /// The group of rates sharing wall-clock timing with this one.
    #[must_use]
    pub fn compatible_group(self) -> CompatibleGroup {
        self.info().group
    }

    /// Whether identical timecode digits last the same real time at both rates.
    #[must_use]
    pub fn is_compatible_with(self, other: FrameRate) -> bool {
        self.compatible_group() == other.compatible_group()
    }

    /// The rates belonging to a compatible group, in canonical order.
    pub fn in_group(group: CompatibleGroup) -> impl Iterator<Item = FrameRate> {
        Self::ALL
            .into_iter()
            .filter(move |r| r.compatible_group() == group)
    }

    /// Frames elapsed in one day of timecode.
    #[must_use]
    pub fn frames_per_day(self) -> i128 {
        let whole = self.max_frames() as i128 * 86_400;
        // 1296 of the 1440 minutes in a day drop frame numbers
        whole - self.frames_dropped_per_minute() as i128 * 1_296
    }

    /// Total frames spanned by the upper limit (one past the last valid frame).
    #[must_use]
    pub fn max_total_frames(self, limit: UpperLimit) -> i128 {
        self.frames_per_day() * limit.max_days() as i128
    }

    /// The largest elapsed frame count a valid timecode can have.
    #[must_use]
    pub fn max_frame_count_expressible(self, limit: UpperLimit) -> i128 {
        self.max_total_frames(limit) - 1
    }

    /// Total subframes spanned by the upper limit.
    #[must_use]
    pub fn max_total_sub_frames(self, limit: UpperLimit, base: SubFramesBase) -> i128 {
        self.max_total_frames(limit) * base.divisor() as i128
    }

    /// The largest subframe count a valid timecode can have.
    #[must_use]
    pub fn max_sub_frame_count_expressible(self, limit: UpperLimit, base: SubFramesBase) -> i128 {
        self.max_total_sub_frames(limit, base) - 1
    }

    /// Match a floating point rate at two decimal places, preferring non-drop.
    #[must_use]
    pub fn from_fps(fps: f64) -> Option<Self> {
        Self::from_fps_with(fps, 2, false)
    }

    /// Match a floating point rate against the real-time rates.
    ///
    /// Both values are rounded to `precision` decimal places before comparing.
    /// When a drop and non-drop rate match (`29.97`), `favor_drop` picks one.
    #[must_use]
    pub fn from_fps_with(fps: f64, precision: u32, favor_drop: bool) -> Option<Self> {
        if !fps.is_finite() || fps <= 0.0 {
            return None;
        }
        let scale = 10f64.powi(precision.min(9) as i32);
        let target = (fps * scale).round();
        Self::pick(
            Self::ALL
                .into_iter()
                .filter(|r| (r.as_f64() * scale).round() == target),
            favor_drop,
            fps,
        )
    }

    /// Match a rational frame rate, e.g. `30000/1001` from a media container.
    ///
    /// Exact fraction matches win; otherwise the rate is matched at three
    /// decimal places. Ambiguous matches resolve to non-drop unless `drop`.
    #[must_use]
    pub fn from_rate(rate: Fraction, drop: bool) -> Option<Self> {
        if rate.numerator() <= 0 {
            return None;
        }
        let reduced = rate.reduce();
        let exact = Self::ALL
            .into_iter()
            .filter(|r| r.real_time_rate().reduce() == reduced);
        Self::pick(exact, drop, rate.to_f64())
            .or_else(|| Self::from_fps_with(rate.to_f64(), 3, drop))
    }

    /// Match an interlaced field rate (e.g. `60000/1001` fields for 29.97).
    #[must_use]
    pub fn from_field_rate(rate: Fraction, drop: bool) -> Option<Self> {
        Self::from_rate(rate.div_int(2)?, drop)
    }

    /// Match a frame duration, e.g. `1001/30000`.
    #[must_use]
    pub fn from_frame_duration(duration: Fraction, drop: bool) -> Option<Self> {
        Self::from_rate(duration.recip()?, drop)
    }

    fn pick(
        candidates: impl Iterator<Item = FrameRate>,
        favor_drop: bool,
        fps: f64,
    ) -> Option<Self> {
        let candidates: Vec<FrameRate> = candidates.collect();
        match candidates.as_slice() {
            [] => None,
            [only] => Some(*only),
            many => {
                let chosen = many
                    .iter()
                    .copied()
                    .find(|r| r.is_drop() == favor_drop)
                    .unwrap_or(many[0]);
                debug!(fps, candidates = ?many, ?chosen, "ambiguous frame rate match");
                Some(chosen)
            }
        }
    }
}

impl fmt::Display for FrameRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FrameRate {
    type Err = TimecodeError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let normalized = trimmed
            .strip_suffix("fps")
            .or_else(|| trimmed.strip_suffix("FPS"))
            .unwrap_or(trimmed)
            .trim();
        Self::ALL
            .into_iter()
            .find(|r| r.name() == normalized || r.verbose_name() == trimmed)
            .ok_or_else(|| TimecodeError::unknown_frame_rate(s))
    }
}

impl TryFrom<String> for FrameRate {
    type Error = TimecodeError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<FrameRate> for String {
    fn from(rate: FrameRate) -> Self {
        rate.name().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_table_is_in_canonical_order() {
        for (index, rate) in FrameRate::ALL.into_iter().enumerate() {
            assert_eq!(rate as usize, index);
        }
        let mut sorted = FrameRate::ALL;
        sorted.reverse();
        sorted.sort();
        assert_eq!(sorted, FrameRate::ALL);
    }

    #[test]
    fn test_drop_rates() {
        let drops: Vec<_> = FrameRate::ALL.into_iter().filter(|r| r.is_drop()).collect();
        assert_eq!(
            drops,
            vec![
                FrameRate::Fps29_97Drop,
                FrameRate::Fps30Drop,
                FrameRate::Fps59_94Drop,
                FrameRate::Fps60Drop,
                FrameRate::Fps119_88Drop,
                FrameRate::Fps120Drop,
            ]
        );
        assert_eq!(FrameRate::Fps29_97Drop.frames_dropped_per_minute(), 2);
        assert_eq!(FrameRate::Fps60Drop.frames_dropped_per_minute(), 4);
        assert_eq!(FrameRate::Fps120Drop.frames_dropped_per_minute(), 8);
        assert_eq!(FrameRate::Fps29_97.frames_dropped_per_minute(), 0);
    }

    #[test]
    fn test_elapsed_and_real_time_rates_differ_for_drop() {
        assert_eq!(FrameRate::Fps29_97Drop.elapsed_frames_rate().to_f64(), 29.97);
        assert_eq!(
            FrameRate::Fps29_97Drop.real_time_rate(),
            Fraction::new(30000, 1001)
        );
        assert_eq!(FrameRate::Fps30Drop.elapsed_frames_rate().to_f64(), 29.97);
        assert_eq!(FrameRate::Fps30Drop.real_time_rate(), Fraction::from_int(30));
        assert_eq!(FrameRate::Fps23_976.elapsed_frames_rate(), Fraction::from_int(24));
    }

    #[test]
    fn test_digits() {
        assert_eq!(FrameRate::Fps96.number_of_digits(), 2);
        assert_eq!(FrameRate::Fps100.number_of_digits(), 3);
        assert_eq!(FrameRate::Fps119_88Drop.number_of_digits(), 3);
    }

    #[test]
    fn test_max_total_frames() {
        assert_eq!(FrameRate::Fps24.max_total_frames(UpperLimit::Max24Hours), 2_073_600);
        assert_eq!(
            FrameRate::Fps29_97Drop.max_total_frames(UpperLimit::Max24Hours),
            2_589_408
        );
        assert_eq!(
            FrameRate::Fps24.max_total_frames(UpperLimit::Max100Days),
            207_360_000
        );
        assert_eq!(
            FrameRate::Fps24.max_sub_frame_count_expressible(UpperLimit::Max24Hours, SubFramesBase::Max80),
            2_073_600 * 80 - 1
        );
    }

    #[test]
    fn test_string_round_trip() {
        for rate in FrameRate::ALL {
            assert_eq!(rate.to_string().parse::<FrameRate>().unwrap(), rate);
            assert_eq!(rate.verbose_name().parse::<FrameRate>().unwrap(), rate);
        }
        assert_eq!("29.97d fps".parse::<FrameRate>().unwrap(), FrameRate::Fps29_97Drop);
        assert!("29.98".parse::<FrameRate>().is_err());
    }

    #[test]
    fn test_from_fps() {
        assert_eq!(FrameRate::from_fps(23.976), Some(FrameRate::Fps23_976));
        assert_eq!(FrameRate::from_fps(24.98), Some(FrameRate::Fps24_98));
        assert_eq!(FrameRate::from_fps(29.97), Some(FrameRate::Fps29_97));
        assert_eq!(
            FrameRate::from_fps_with(29.97, 2, true),
            Some(FrameRate::Fps29_97Drop)
        );
        assert_eq!(
            FrameRate::from_fps_with(30.0, 3, true),
            Some(FrameRate::Fps30Drop)
        );
        assert_eq!(FrameRate::from_fps(119.88), Some(FrameRate::Fps119_88));
        assert_eq!(FrameRate::from_fps(31.0), None);
        assert_eq!(FrameRate::from_fps(f64::NAN), None);
        assert_eq!(FrameRate::from_fps(-24.0), None);
    }

    #[test]
    fn test_from_rate() {
        assert_eq!(
            FrameRate::from_rate(Fraction::new(30000, 1001), false),
            Some(FrameRate::Fps29_97)
        );
        assert_eq!(
            FrameRate::from_rate(Fraction::new(30000, 1001), true),
            Some(FrameRate::Fps29_97Drop)
        );
        assert_eq!(
            FrameRate::from_rate(Fraction::new(48, 2), false),
            Some(FrameRate::Fps24)
        );
        // no exact fraction, matched by value
        assert_eq!(
            FrameRate::from_rate(Fraction::new(2997, 100), false),
            Some(FrameRate::Fps29_97)
        );
        assert_eq!(
            FrameRate::from_field_rate(Fraction::new(60000, 1001), true),
            Some(FrameRate::Fps29_97Drop)
        );
        assert_eq!(
            FrameRate::from_frame_duration(Fraction::new(1001, 24000), false),
            Some(FrameRate::Fps23_976)
        );
        assert_eq!(FrameRate::from_rate(Fraction::new(0, 1), false), None);
        assert_eq!(FrameRate::from_frame_duration(Fraction::new(0, 1), false), None);
        assert_eq!(FrameRate::from_rate(Fraction::new(7, 3), false), None);
    }

    #[test]
    fn test_compatible_groups() {
        assert!(FrameRate::Fps23_976.is_compatible_with(FrameRate::Fps29_97));
        assert!(!FrameRate::Fps23_976.is_compatible_with(FrameRate::Fps24));
        assert!(FrameRate::Fps29_97Drop.is_compatible_with(FrameRate::Fps119_88Drop));
        let whole_drop: Vec<_> = FrameRate::in_group(CompatibleGroup::WholeDrop).collect();
        assert_eq!(
            whole_drop,
            vec![FrameRate::Fps30Drop, FrameRate::Fps60Drop, FrameRate::Fps120Drop]
        );
    }

    #[test]
    fn test_frame_duration() {
        assert_eq!(
            FrameRate::Fps29_97.rational_frame_duration(),
            Fraction::new(1001, 30000)
        );
        assert!((FrameRate::Fps25.frame_duration_seconds() - 0.04).abs() < 1e-12);
    }

    #[test]
    fn test_serialization() {
        let json = serde_json::to_string(&FrameRate::Fps59_94Drop).unwrap();
        assert_eq!(json, "\"59.94d\"");
        let decoded: FrameRate = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, FrameRate::Fps59_94Drop);
        assert!(serde_json::from_str::<FrameRate>("\"61\"").is_err());
    }
}
