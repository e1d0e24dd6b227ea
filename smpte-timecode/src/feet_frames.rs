//! 35mm film feet+frames positions.
//!
//! Four-perforation 35mm film carries 16 frames per foot, so a position is
//! written `F+FF`, optionally followed by `.SF` subframes.

use crate::error::{Result, TimecodeError};
use crate::frame_count::{saturate, FrameCount};
use crate::properties::{digit_count, SubFramesBase};
use crate::timecode::Timecode;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Frames in one foot of 4-perf 35mm film.
pub const FRAMES_PER_FOOT: i64 = 16;

/// A position in feet, frames and subframes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeetAndFrames {
    /// Whole feet.
    pub feet: i64,
    /// Frames into the current foot.
    pub frames: i64,
    /// Subframes into the current frame.
    pub sub_frames: i64,
    /// Base the subframes are expressed in.
    pub sub_frames_base: SubFramesBase,
}

impl FeetAndFrames {
    /// A position of `feet` and `frames` with no subframes.
    #[must_use]
    pub fn new(feet: i64, frames: i64) -> Self {
        Self {
            feet,
            frames,
            sub_frames: 0,
            sub_frames_base: SubFramesBase::default(),
        }
    }

    /// Split an elapsed frame count into feet and frames.
    #[must_use]
    pub fn from_frame_count(count: &FrameCount) -> Self {
        let frames = count.whole_frames();
        Self {
            feet: saturate(frames / FRAMES_PER_FOOT as i128),
            frames: saturate(frames % FRAMES_PER_FOOT as i128),
            sub_frames: saturate(count.sub_frames()),
            sub_frames_base: count.sub_frames_base(),
        }
    }

    /// The elapsed frame count of this position.
    #[must_use]
    pub fn frame_count(&self) -> FrameCount {
        let frames = self.feet as i128 * FRAMES_PER_FOOT as i128 + self.frames as i128;
        FrameCount::from_sub_frames(
            frames * self.sub_frames_base.divisor() as i128 + self.sub_frames as i128,
            self.sub_frames_base,
        )
    }

    /// Parse `F+FF[.SF]` with subframes in `base`.
    pub fn parse(text: &str, base: SubFramesBase) -> Result<Self> {
        let invalid = || TimecodeError::invalid_format(format!("invalid feet+frames: {text:?}"));
        let field = |s: &str| -> Result<i64> {
            if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
                return Err(invalid());
            }
            s.parse().map_err(|_| invalid())
        };

        let (feet, rest) = text.trim().split_once('+').ok_or_else(invalid)?;
        let (frames, sub_frames) = match rest.split_once('.') {
            Some((frames, sub)) => (frames, Some(sub)),
            None => (rest, None),
        };

        Ok(Self {
            feet: field(feet)?,
            frames: field(frames)?,
            sub_frames: sub_frames.map(field).transpose()?.unwrap_or(0),
            sub_frames_base: base,
        })
    }
}

impl fmt::Display for FeetAndFrames {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}+{:02}", self.feet, self.frames)?;
        if self.sub_frames != 0 {
            let width = digit_count(self.sub_frames_base.divisor() as u64 - 1);
            write!(f, ".{:0width$}", self.sub_frames)?;
        }
        Ok(())
    }
}

impl FromStr for FeetAndFrames {
    type Err = TimecodeError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s, SubFramesBase::default())
    }
}

impl Timecode {
    /// Position as 35mm feet+frames.
    #[must_use]
    pub fn feet_and_frames(&self) -> FeetAndFrames {
        FeetAndFrames::from_frame_count(&self.frame_count())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::Components;
    use crate::frame_rate::FrameRate;
    use crate::validation::ValidationRule;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_from_timecode() {
        let tc = Timecode::from_components(Components::new(0, 1, 0, 0), FrameRate::Fps24).unwrap();
        let ff = tc.feet_and_frames();
        assert_eq!(ff, FeetAndFrames::new(90, 0));
        assert_eq!(ff.to_string(), "90+00");

        let tc = Timecode::from_components(
            Components::new(0, 0, 1, 3).with_sub_frames(7),
            FrameRate::Fps24,
        )
        .unwrap();
        assert_eq!(tc.feet_and_frames().to_string(), "1+11.07");
    }

    #[test]
    fn test_parse() {
        let ff: FeetAndFrames = "90+00".parse().unwrap();
        assert_eq!(ff, FeetAndFrames::new(90, 0));
        let ff = FeetAndFrames::parse(" 1+11.07 ", SubFramesBase::Max100).unwrap();
        assert_eq!(ff.sub_frames, 7);
        assert_eq!(ff.sub_frames_base, SubFramesBase::Max100);

        for bad in ["", "90", "+1", "1+", "1+2.", "a+1", "1+2+3", "-1+2"] {
            assert!(bad.parse::<FeetAndFrames>().is_err(), "{bad:?}");
        }
    }

    #[test]
    fn test_as_source() {
        let tc = Timecode::new(
            FeetAndFrames::new(90, 0),
            FrameRate::Fps24,
            ValidationRule::Exact,
        )
        .unwrap();
        assert_eq!(*tc.components(), Components::new(0, 1, 0, 0));

        // frames beyond a foot are carried
        let ff = FeetAndFrames::new(0, 20);
        assert_eq!(ff.frame_count().whole_frames(), 20);
    }
}
