//! Inputs a timecode can be built from.

use crate::components::Components;
use crate::error::{Result, TimecodeError};
use crate::feet_frames::FeetAndFrames;
use crate::frame_count::{FrameCount, FrameCountValue};
use crate::properties::Properties;
use crate::real_time;
use crate::string;
use crate::timecode::Timecode;
use crate::validation::Resolved;

/// Anything a [`Timecode`] can be constructed from or set to.
///
/// Every variant except [`TimecodeSource::Timecode`] is interpreted in the
/// target properties. A timecode source carries its own properties and is
/// converted through real time when its frame rate differs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TimecodeSource<'a> {
    /// Literal component values.
    Components(Components),
    /// An elapsed frame count.
    FrameCount(FrameCountValue),
    /// Timecode text such as `"01:00:00;02"` or `"1 00:00:00:00.40"`.
    Text(&'a str),
    /// Wall-clock seconds.
    RealTime(f64),
    /// An audio sample position.
    Samples {
        /// Sample position, possibly fractional.
        value: f64,
        /// Samples per second.
        sample_rate: u32,
    },
    /// A 35mm feet+frames position.
    FeetAndFrames(FeetAndFrames),
    /// Another timecode, possibly at a different rate.
    Timecode(Timecode),
}

impl TimecodeSource<'_> {
    pub(crate) fn resolve(self, properties: &Properties) -> Result<Resolved> {
        let base = properties.sub_frames_base;
        Ok(match self {
            Self::Components(components) => Resolved::Components(components),
            Self::FrameCount(value) => Resolved::FrameCount(FrameCount::new(value, base)?),
            Self::Text(text) => Resolved::Components(string::decode(text)?),
            Self::RealTime(seconds) => {
                Resolved::FrameCount(real_time::frame_count_from_seconds(seconds, properties)?)
            }
            Self::Samples { value, sample_rate } => Resolved::FrameCount(
                real_time::frame_count_from_samples(value, sample_rate, properties)?,
            ),
            Self::FeetAndFrames(feet) => Resolved::FrameCount(feet.frame_count().rebased(base)),
            Self::Timecode(other) => {
                let theirs = other.properties();
                if theirs.frame_rate != properties.frame_rate {
                    Resolved::FrameCount(real_time::convert_frame_count(
                        &other.frame_count(),
                        theirs.frame_rate,
                        properties,
                    ))
                } else if theirs.sub_frames_base != base {
                    Resolved::FrameCount(other.frame_count().rebased(base))
                } else {
                    Resolved::Components(*other.components())
                }
            }
        })
    }

    /// The elapsed count of this source under `properties`, without
    /// validation. Used for arithmetic operands.
    pub(crate) fn frame_count(self, properties: &Properties) -> Result<FrameCount> {
        Ok(match self.resolve(properties)? {
            Resolved::Components(components) => crate::frame_count::frame_count_of(
                &components,
                properties.frame_rate,
                properties.sub_frames_base,
            ),
            Resolved::FrameCount(count) => count,
        })
    }
}

impl From<Components> for TimecodeSource<'_> {
    fn from(components: Components) -> Self {
        Self::Components(components)
    }
}

impl From<FrameCountValue> for TimecodeSource<'_> {
    fn from(value: FrameCountValue) -> Self {
        Self::FrameCount(value)
    }
}

impl<'a> From<&'a str> for TimecodeSource<'a> {
    fn from(text: &'a str) -> Self {
        Self::Text(text)
    }
}

impl<'a> From<&'a String> for TimecodeSource<'a> {
    fn from(text: &'a String) -> Self {
        Self::Text(text.as_str())
    }
}

impl From<FeetAndFrames> for TimecodeSource<'_> {
    fn from(feet: FeetAndFrames) -> Self {
        Self::FeetAndFrames(feet)
    }
}

impl From<Timecode> for TimecodeSource<'_> {
    fn from(timecode: Timecode) -> Self {
        Self::Timecode(timecode)
    }
}

impl From<&Timecode> for TimecodeSource<'_> {
    fn from(timecode: &Timecode) -> Self {
        Self::Timecode(*timecode)
    }
}

/// Reject non-finite floating point inputs.
pub(crate) fn finite(value: f64, what: &str) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(TimecodeError::invalid_argument(format!("{what} is not finite: {value}")))
    }
}
