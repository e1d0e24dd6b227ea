//! Signed distances between timecodes.

use crate::timecode::Timecode;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Direction of a [`TimecodeInterval`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sign {
    /// Forward in time.
    #[default]
    Plus,
    /// Backward in time.
    Minus,
}

/// A signed duration expressed as a non-negative timecode magnitude.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimecodeInterval {
    /// Magnitude of the interval.
    pub absolute: Timecode,
    /// Direction of the interval.
    pub sign: Sign,
}

impl TimecodeInterval {
    /// An interval of `absolute` in direction `sign`.
    #[must_use]
    pub fn new(absolute: Timecode, sign: Sign) -> Self {
        Self { absolute, sign }
    }

    /// Whether the interval points backward.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.sign == Sign::Minus && self.absolute.frame_count().sub_frame_count() != 0
    }

    /// The interval as a timecode, wrapping negative intervals back from the
    /// upper limit: `-00:00:01:00` flattens to `23:59:59:00`.
    #[must_use]
    pub fn flattened(&self) -> Timecode {
        match self.sign {
            Sign::Plus => self.absolute,
            Sign::Minus => self
                .absolute
                .wrapped(self.absolute.frame_count().sub_frame_count().saturating_neg()),
        }
    }

    /// Signed duration in wall-clock seconds.
    #[must_use]
    pub fn real_time_value(&self) -> f64 {
        match self.sign {
            Sign::Plus => self.absolute.real_time_value(),
            Sign::Minus => -self.absolute.real_time_value(),
        }
    }

    /// `timecode` moved by this interval, wrapping at its upper limit.
    #[must_use]
    pub fn timecode(&self, offsetting: &Timecode) -> Timecode {
        let magnitude = self
            .absolute
            .frame_count_in(offsetting.properties())
            .sub_frame_count();
        let start = offsetting.frame_count().sub_frame_count();
        match self.sign {
            Sign::Plus => offsetting.wrapped(start.saturating_add(magnitude)),
            Sign::Minus => offsetting.wrapped(start.saturating_sub(magnitude)),
        }
    }
}

impl fmt::Display for TimecodeInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_negative() {
            f.write_str("-")?;
        }
        write!(f, "{}", self.absolute)
    }
}

impl Timecode {
    /// The interval from `self` to `other`, at `self`'s properties.
    ///
    /// `other` is first converted to this timecode's frame rate. The
    /// magnitude is the later timecode minus the earlier one.
    #[must_use]
    pub fn interval(&self, to: &Timecode) -> TimecodeInterval {
        let start = self.frame_count().sub_frame_count();
        let end = to.frame_count_in(self.properties()).sub_frame_count();
        if end >= start {
            TimecodeInterval::new(self.wrapped(end.saturating_sub(start)), Sign::Plus)
        } else {
            TimecodeInterval::new(self.wrapped(start.saturating_sub(end)), Sign::Minus)
        }
    }

    /// This timecode moved by `interval`.
    #[must_use]
    pub fn offset(&self, by: &TimecodeInterval) -> Timecode {
        by.timecode(self)
    }
}
