//! SMPTE/EBU Timecode Library
//!
//! This crate models timecode values (`DD HH:MM:SS:FF.SF`) across film,
//! video and broadcast frame rates:
//!
//! - **Frame rates**: 22 rates from 23.976 through 120 fps, including the
//!   29.97, 59.94 and 119.88 drop-frame families
//! - **Exact frame counts**: component ⇄ elapsed frame conversion with
//!   integer drop-frame math and exact subframes
//! - **Validation rules**: exact, clamping, per-component clamping, wrapping
//!   or unchecked construction
//! - **Arithmetic**: add, subtract, multiply, divide and signed intervals
//! - **Conversion**: between frame rates, to and from wall-clock seconds and
//!   audio sample positions, and to 35mm feet+frames
//! - **Text and serde**: a stable string format and a flat serialized record
//!
//! # Quick Start
//!
//! ```rust
//! use smpte_timecode::{Components, FrameRate, Timecode, ValidationRule};
//!
//! // Construct from text, requiring a valid value
//! let tc = Timecode::new("01:00:00:00", FrameRate::Fps24, ValidationRule::Exact).unwrap();
//! assert_eq!(tc.frame_count().whole_frames(), 86_400);
//!
//! // Arithmetic wraps at 24 hours with the wrapping rule
//! let later = tc.adding(Components::new(23, 30, 0, 0), ValidationRule::Wrapping).unwrap();
//! assert_eq!(later.to_string(), "00:30:00:00");
//! ```
//!
//! # Drop-Frame Timecode
//!
//! At drop-frame rates the first frame numbers of each minute are skipped,
//! except every tenth minute:
//!
//! ```rust
//! use smpte_timecode::{parse_timecode, FrameRate};
//!
//! assert!(parse_timecode("00:01:00;00", FrameRate::Fps29_97Drop).is_err());
//!
//! let tc = parse_timecode("00:00:59;29", FrameRate::Fps29_97Drop).unwrap();
//! assert_eq!(tc.next_frame().to_string(), "00:01:00;02");
//! ```
//!
//! # Frame Rate Conversion
//!
//! ```rust
//! use smpte_timecode::{parse_timecode, FrameRate};
//!
//! let film = parse_timecode("01:00:00:00", FrameRate::Fps23_976).unwrap();
//! let video = film.converted(FrameRate::Fps29_97, false).unwrap();
//! assert_eq!(video.to_string(), "01:00:00:00");
//! assert_eq!(film, video);
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::all)]

pub mod components;
pub mod dropframe;
pub mod error;
pub mod feet_frames;
pub mod frame_count;
pub mod frame_rate;
pub mod interval;
mod math;
pub mod properties;
pub mod rational;
mod real_time;
pub mod source;
pub mod string;
pub mod timecode;
pub mod validation;

// Re-export main types
pub use components::{Component, Components};
pub use error::{Result, TimecodeError};
pub use feet_frames::{FeetAndFrames, FRAMES_PER_FOOT};
pub use frame_count::{components_from, frame_count_of, FrameCount, FrameCountValue};
pub use frame_rate::{CompatibleGroup, FrameRate};
pub use interval::{Sign, TimecodeInterval};
pub use properties::{Properties, SubFramesBase, UpperLimit};
pub use rational::Fraction;
pub use source::TimecodeSource;
pub use string::{parse_timecode, StringFormat};
pub use timecode::Timecode;
pub use validation::ValidationRule;

// Re-export drop-frame utilities
pub use dropframe::{is_dropped_frame, DropFrameConfig};

/// Create a valid timecode from hours, minutes, seconds and frames.
///
/// # Example
/// ```rust
/// use smpte_timecode::{timecode, FrameRate};
///
/// let tc = timecode(1, 30, 45, 12, FrameRate::Fps24).unwrap();
/// assert_eq!(tc.to_string(), "01:30:45:12");
/// ```
pub fn timecode(
    hours: i64,
    minutes: i64,
    seconds: i64,
    frames: i64,
    frame_rate: FrameRate,
) -> Result<Timecode> {
    Timecode::from_components(Components::new(hours, minutes, seconds, frames), frame_rate)
}

/// Seconds from `start` to `end` (negative if `end` is earlier).
#[must_use]
pub fn duration_seconds(start: &Timecode, end: &Timecode) -> f64 {
    start.interval(end).real_time_value()
}

/// Frames from `start` to `end` at `start`'s frame rate (negative if `end`
/// is earlier).
#[must_use]
pub fn duration_frames(start: &Timecode, end: &Timecode) -> i128 {
    let magnitude = start.interval(end);
    let frames = magnitude.absolute.frame_count().whole_frames();
    if magnitude.is_negative() {
        -frames
    } else {
        frames
    }
}
