//! Error types for timecode operations.

use crate::components::Component;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type for timecode operations.
pub type Result<T> = std::result::Result<T, TimecodeError>;

/// Errors that can occur during timecode operations.
///
/// Parse failures ([`TimecodeError::InvalidFormat`]) and validation failures
/// ([`TimecodeError::InvalidComponents`], [`TimecodeError::OutOfRange`]) are
/// separate variants: a string can be well-formed and still describe a
/// timecode that does not exist at a given frame rate.
#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq, Eq)]
pub enum TimecodeError {
    /// The text does not match the timecode grammar.
    #[error("Invalid timecode format: {message}")]
    InvalidFormat {
        /// Description of the format error.
        message: String,
    },

    /// One or more component values are outside their valid range.
    #[error("Invalid timecode components: {}", join_components(.components))]
    InvalidComponents {
        /// The offending components, in days-to-subframes order.
        components: Vec<Component>,
    },

    /// A frame count lies outside the range expressible under the upper limit.
    #[error("Subframe count {sub_frames} out of range (max {max})")]
    OutOfRange {
        /// The subframe count that was produced.
        sub_frames: i128,
        /// The largest expressible subframe count.
        max: i128,
    },

    /// A frame rate name could not be recognized.
    #[error("Unknown frame rate: {name}")]
    UnknownFrameRate {
        /// The name that failed to match.
        name: String,
    },

    /// A subframes base or upper limit value could not be recognized.
    #[error("Invalid timecode property: {message}")]
    InvalidProperty {
        /// Description of the property error.
        message: String,
    },

    /// A numeric argument cannot be used (NaN, zero sample rate, ...).
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Description of the argument error.
        message: String,
    },
}

fn join_components(components: &[Component]) -> String {
    components
        .iter()
        .map(|c| c.name())
        .collect::<Vec<_>>()
        .join(", ")
}

impl TimecodeError {
    /// Create an invalid format error.
    pub fn invalid_format(message: impl Into<String>) -> Self {
        Self::InvalidFormat {
            message: message.into(),
        }
    }

    /// Create an invalid components error.
    pub fn invalid_components(components: impl IntoIterator<Item = Component>) -> Self {
        Self::InvalidComponents {
            components: components.into_iter().collect(),
        }
    }

    /// Create an out of range error.
    pub fn out_of_range(sub_frames: i128, max: i128) -> Self {
        Self::OutOfRange { sub_frames, max }
    }

    /// Create an unknown frame rate error.
    pub fn unknown_frame_rate(name: impl Into<String>) -> Self {
        Self::UnknownFrameRate { name: name.into() }
    }

    /// Create an invalid property error.
    pub fn invalid_property(message: impl Into<String>) -> Self {
        Self::InvalidProperty {
            message: message.into(),
        }
    }

    /// Create an invalid argument error.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Whether this error came from the string codec rather than validation.
    #[must_use]
    pub fn is_parse_error(&self) -> bool {
        matches!(self, Self::InvalidFormat { .. })
    }

    /// Whether this error reports values outside their valid range.
    #[must_use]
    pub fn is_validation_error(&self) -> bool {
        matches!(self, Self::InvalidComponents { .. } | Self::OutOfRange { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_error_display() {
        let err = TimecodeError::invalid_format("missing separator");
        assert_eq!(
            err.to_string(),
            "Invalid timecode format: missing separator"
        );

        let err = TimecodeError::invalid_components([Component::Hours, Component::Frames]);
        assert_eq!(err.to_string(), "Invalid timecode components: hours, frames");

        let err = TimecodeError::out_of_range(-1, 6_911_999);
        assert_eq!(err.to_string(), "Subframe count -1 out of range (max 6911999)");
    }

    #[test]
    fn test_error_kinds() {
        assert!(TimecodeError::invalid_format("x").is_parse_error());
        assert!(!TimecodeError::invalid_format("x").is_validation_error());
        assert!(TimecodeError::invalid_components([Component::Days]).is_validation_error());
        assert!(TimecodeError::out_of_range(1, 0).is_validation_error());
        assert!(!TimecodeError::invalid_argument("nan").is_parse_error());
    }

    #[test]
    fn test_error_serialization() {
        let err = TimecodeError::invalid_components([Component::SubFrames]);
        let json = serde_json::to_string(&err).unwrap();
        let decoded: TimecodeError = serde_json::from_str(&json).unwrap();
        assert_eq!(err, decoded);
    }
}
