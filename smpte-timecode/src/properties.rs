//! Contextual properties under which timecode components are interpreted.

use crate::error::{Result, TimecodeError};
use crate::frame_rate::FrameRate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of subframe units composing one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum SubFramesBase {
    /// 100 subframes per frame.
    Max100,
    /// 80 subframes per frame (the Cubase/Nuendo convention).
    #[default]
    Max80,
    /// 50 subframes per frame.
    Max50,
    /// 25 subframes per frame.
    Max25,
    /// 24 subframes per frame.
    Max24,
}

impl SubFramesBase {
    /// All bases, largest first.
    pub const ALL: [SubFramesBase; 5] = [
        Self::Max100,
        Self::Max80,
        Self::Max50,
        Self::Max25,
        Self::Max24,
    ];

    /// The divisor: subframe units per frame.
    #[must_use]
    pub const fn divisor(self) -> u32 {
        match self {
            Self::Max100 => 100,
            Self::Max80 => 80,
            Self::Max50 => 50,
            Self::Max25 => 25,
            Self::Max24 => 24,
        }
    }

    /// Digits needed to display the largest subframe value.
    #[must_use]
    pub fn number_of_digits(self) -> usize {
        digit_count((self.divisor() - 1) as u64)
    }
}

impl fmt::Display for SubFramesBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.divisor())
    }
}

impl TryFrom<u32> for SubFramesBase {
    type Error = TimecodeError;

    fn try_from(value: u32) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|b| b.divisor() == value)
            .ok_or_else(|| {
                TimecodeError::invalid_property(format!("unsupported subframes base: {value}"))
            })
    }
}

impl From<SubFramesBase> for u32 {
    fn from(base: SubFramesBase) -> Self {
        base.divisor()
    }
}

impl FromStr for SubFramesBase {
    type Err = TimecodeError;

    fn from_str(s: &str) -> Result<Self> {
        let value: u32 = s.trim().parse().map_err(|_| {
            TimecodeError::invalid_property(format!("unsupported subframes base: {s}"))
        })?;
        Self::try_from(value)
    }
}

/// The largest timecode extent, which is also the modulus for wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub enum UpperLimit {
    /// `00:00:00:00` through `23:59:59:FF`; days must be zero.
    #[default]
    #[serde(rename = "24 hours")]
    Max24Hours,
    /// Days `0` through `99`.
    #[serde(rename = "100 days")]
    Max100Days,
}

impl UpperLimit {
    /// Number of whole days spanned by this limit.
    #[must_use]
    pub const fn max_days(self) -> u32 {
        match self {
            Self::Max24Hours => 1,
            Self::Max100Days => 100,
        }
    }

    /// Digits needed to display the days component.
    #[must_use]
    pub const fn days_digits(self) -> usize {
        match self {
            Self::Max24Hours => 1,
            Self::Max100Days => 2,
        }
    }
}

impl fmt::Display for UpperLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Max24Hours => f.write_str("24 hours"),
            Self::Max100Days => f.write_str("100 days"),
        }
    }
}

impl FromStr for UpperLimit {
    type Err = TimecodeError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "24 hours" | "24h" | "24hours" => Ok(Self::Max24Hours),
            "100 days" | "100d" | "100days" => Ok(Self::Max100Days),
            _ => Err(TimecodeError::invalid_property(format!(
                "unsupported upper limit: {s}"
            ))),
        }
    }
}

/// Frame rate, subframes base and upper limit of a timecode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Properties {
    /// Frame rate.
    pub frame_rate: FrameRate,
    /// Subframes base.
    pub sub_frames_base: SubFramesBase,
    /// Upper limit.
    pub upper_limit: UpperLimit,
}

impl Properties {
    /// Properties at `frame_rate` with the default base and a 24 hour limit.
    #[must_use]
    pub fn new(frame_rate: FrameRate) -> Self {
        Self {
            frame_rate,
            sub_frames_base: SubFramesBase::default(),
            upper_limit: UpperLimit::default(),
        }
    }

    /// Replace the subframes base.
    #[must_use]
    pub fn with_base(mut self, base: SubFramesBase) -> Self {
        self.sub_frames_base = base;
        self
    }

    /// Replace the upper limit.
    #[must_use]
    pub fn with_limit(mut self, limit: UpperLimit) -> Self {
        self.upper_limit = limit;
        self
    }

    /// Replace the frame rate.
    #[must_use]
    pub fn with_frame_rate(mut self, frame_rate: FrameRate) -> Self {
        self.frame_rate = frame_rate;
        self
    }

    /// Total subframes spanned by the upper limit.
    #[must_use]
    pub fn max_total_sub_frames(&self) -> i128 {
        self.frame_rate
            .max_total_sub_frames(self.upper_limit, self.sub_frames_base)
    }

    /// The largest subframe count a valid timecode can have.
    #[must_use]
    pub fn max_sub_frame_count_expressible(&self) -> i128 {
        self.max_total_sub_frames() - 1
    }
}

impl From<FrameRate> for Properties {
    fn from(frame_rate: FrameRate) -> Self {
        Self::new(frame_rate)
    }
}

pub(crate) fn digit_count(mut value: u64) -> usize {
    let mut digits = 1;
    while value >= 10 {
        value /= 10;
        digits += 1;
    }
    digits
}
