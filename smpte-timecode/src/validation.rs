//! Validation policies applied when a timecode value is produced.

use crate::components::Components;
use crate::error::{Result, TimecodeError};
use crate::frame_count::{components_from, frame_count_of, FrameCount};
use crate::properties::Properties;
use serde::{Deserialize, Serialize};
use tracing::trace;

/// How out-of-range values are treated when constructing or mutating a
/// timecode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ValidationRule {
    /// Fail with an error if the result is not a valid timecode.
    #[default]
    Exact,
    /// Clamp the whole value to `00:00:00:00` through the last subframe
    /// before the upper limit.
    Clamping,
    /// Clamp every component to its own valid range independently.
    ClampingComponents,
    /// Wrap around the upper limit (true modulo, negative values wrap back
    /// from the top).
    Wrapping,
    /// Store whatever values result, valid or not.
    AllowingInvalid,
}

/// A value on its way into a timecode, before a rule is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Resolved {
    /// Literal component values.
    Components(Components),
    /// An elapsed count in the target properties' subframes base.
    FrameCount(FrameCount),
}

impl ValidationRule {
    /// Produce the final components for `value` under `properties`.
    pub(crate) fn apply(self, value: Resolved, properties: &Properties) -> Result<Components> {
        match value {
            Resolved::Components(components) => match self {
                Self::Exact => {
                    components.validate(properties)?;
                    Ok(components)
                }
                Self::AllowingInvalid => Ok(components),
                Self::ClampingComponents => Ok(components.clamped(properties)),
                Self::Clamping | Self::Wrapping => {
                    let count = frame_count_of(
                        &components,
                        properties.frame_rate,
                        properties.sub_frames_base,
                    );
                    self.apply(Resolved::FrameCount(count), properties)
                }
            },
            Resolved::FrameCount(count) => {
                let total = count.sub_frame_count();
                let max = properties.max_sub_frame_count_expressible();
                let bounded = match self {
                    Self::Exact => {
                        if !(0..=max).contains(&total) {
                            return Err(TimecodeError::out_of_range(total, max));
                        }
                        total
                    }
                    Self::Clamping => {
                        let clamped = total.clamp(0, max);
                        if clamped != total {
                            trace!(total, clamped, "clamped timecode subframe count");
                        }
                        clamped
                    }
                    Self::Wrapping => {
                        let wrapped = total.rem_euclid(properties.max_total_sub_frames());
                        if wrapped != total {
                            trace!(total, wrapped, "wrapped timecode subframe count");
                        }
                        wrapped
                    }
                    Self::ClampingComponents | Self::AllowingInvalid => total,
                };
                let components = components_from(
                    &FrameCount::from_sub_frames(bounded, properties.sub_frames_base),
                    properties.frame_rate,
                );
                Ok(match self {
                    Self::ClampingComponents => components.clamped(properties),
                    _ => components,
                })
            }
        }
    }
}
