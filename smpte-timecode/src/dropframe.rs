//! Drop-frame constants and frame-number skipping rules.
//!
//! Drop-frame timecode keeps 29.97 fps (and its multiples) in step with
//! wall-clock time by skipping frame *numbers*, never actual frames:
//! - frames 0 and 1 (0-3 at 59.94, 0-7 at 119.88) are skipped at the start of
//!   each minute
//! - except for minutes 0, 10, 20, 30, 40, 50

use crate::frame_rate::FrameRate;
use serde::{Deserialize, Serialize};

/// Drop-frame configuration for a frame rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropFrameConfig {
    /// Frame numbers skipped at the top of each minute not divisible by ten
    pub frames_dropped_per_minute: u32,
    /// Frame numbers per second of timecode
    pub nominal_fps: u32,
    /// Elapsed frames in a ten-minute block
    pub frames_per_10_minutes: u64,
    /// Elapsed frames in a minute that skips numbers
    pub frames_per_minute: u64,
}

impl DropFrameConfig {
    /// Build the configuration from the frame ceiling and per-minute drop.
    #[must_use]
    pub const fn new(nominal_fps: u32, frames_dropped_per_minute: u32) -> Self {
        let full_minute = nominal_fps as u64 * 60;
        let drop = frames_dropped_per_minute as u64;
        Self {
            frames_dropped_per_minute,
            nominal_fps,
            frames_per_10_minutes: full_minute * 10 - 9 * drop,
            frames_per_minute: full_minute - drop,
        }
    }

    /// Get the configuration for a frame rate, if it is a drop-frame rate.
    #[must_use]
    pub fn for_frame_rate(frame_rate: FrameRate) -> Option<Self> {
        frame_rate
            .is_drop()
            .then(|| Self::new(frame_rate.max_frames(), frame_rate.frames_dropped_per_minute()))
    }

    /// Frame numbers skipped before the start of `total_minutes`.
    ///
    /// Uses truncating division so negative minute counts mirror positive ones.
    #[must_use]
    pub fn frames_dropped_until(&self, total_minutes: i128) -> i128 {
        self.frames_dropped_per_minute as i128 * (total_minutes - total_minutes / 10)
    }

    /// Re-insert the skipped frame numbers into a non-negative elapsed count.
    ///
    /// The result counts frame numbers as if no numbers were ever dropped, so
    /// it can be split into components by plain division.
    #[must_use]
    pub fn restore_dropped_frames(&self, frame_number: i128) -> i128 {
        let drop = self.frames_dropped_per_minute as i128;
        let per_10 = self.frames_per_10_minutes as i128;
        let per_minute = self.frames_per_minute as i128;

        let ten_minute_blocks = frame_number / per_10;
        let remainder = frame_number % per_10;

        let mut restored = frame_number + 9 * drop * ten_minute_blocks;
        if remainder > drop {
            restored += drop * ((remainder - drop) / per_minute);
        }
        restored
    }
}

/// Check if a minute/second/frame combination is a skipped frame number.
#[must_use]
pub fn is_dropped_frame(minutes: i64, seconds: i64, frames: i64, frame_rate: FrameRate) -> bool {
    let Some(config) = DropFrameConfig::for_frame_rate(frame_rate) else {
        return false;
    };

    seconds == 0 && minutes % 10 != 0 && (0..config.frames_dropped_per_minute as i64).contains(&frames)
}
