//! Wall-clock and audio sample bridges, and frame rate conversion.
//!
//! Real time is derived from the real-time rate of each frame rate
//! (`30000/1001` for 29.97, exactly `30` for 30 drop). Integer inputs are
//! converted with exact `i128` arithmetic; fractional inputs go through `f64`
//! and snap to the nearest subframe when within floating point noise of it.

use crate::error::{Result, TimecodeError};
use crate::frame_count::{snap_floor, FrameCount};
use crate::frame_rate::FrameRate;
use crate::properties::Properties;
use crate::source::finite;
use crate::timecode::Timecode;
use crate::validation::ValidationRule;
use tracing::debug;

/// Largest magnitude at which every integer is exactly representable.
const EXACT_F64_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Subframes at `properties` for a position in seconds.
pub(crate) fn frame_count_from_seconds(seconds: f64, properties: &Properties) -> Result<FrameCount> {
    let seconds = finite(seconds, "real time value")?;
    let rate = properties.frame_rate.real_time_rate();
    let base = properties.sub_frames_base.divisor() as f64;
    let scaled = seconds * (rate.numerator() as f64 * base) / rate.denominator() as f64;
    let sub_frames = snap_floor(scaled)
        .ok_or_else(|| TimecodeError::invalid_argument("real time value is not a number"))?;
    Ok(FrameCount::from_sub_frames(sub_frames, properties.sub_frames_base))
}

/// Subframes at `properties` for an audio sample position.
pub(crate) fn frame_count_from_samples(
    samples: f64,
    sample_rate: u32,
    properties: &Properties,
) -> Result<FrameCount> {
    if sample_rate == 0 {
        return Err(TimecodeError::invalid_argument("sample rate must be non-zero"));
    }
    let samples = finite(samples, "samples value")?;
    let rate = properties.frame_rate.real_time_rate();
    let base = properties.sub_frames_base.divisor() as i128;

    if samples.fract() == 0.0 && samples.abs() < EXACT_F64_INTEGER {
        let num = samples as i128 * rate.numerator() as i128 * base;
        let den = sample_rate as i128 * rate.denominator() as i128;
        return Ok(FrameCount::from_sub_frames(
            num.div_euclid(den),
            properties.sub_frames_base,
        ));
    }

    let scaled = samples * (rate.numerator() as f64 * base as f64)
        / (sample_rate as f64 * rate.denominator() as f64);
    let sub_frames = snap_floor(scaled)
        .ok_or_else(|| TimecodeError::invalid_argument("samples value is not a number"))?;
    Ok(FrameCount::from_sub_frames(sub_frames, properties.sub_frames_base))
}

/// Re-express a count at `from` as the same real time under `to`,
/// flooring to a whole subframe.
pub(crate) fn convert_frame_count(count: &FrameCount, from: FrameRate, to: &Properties) -> FrameCount {
    let src = from.real_time_rate();
    let dst = to.frame_rate.real_time_rate();
    let src_base = count.sub_frames_base().divisor() as i128;
    let dst_base = to.sub_frames_base.divisor() as i128;

    // sub * dst_base * src_den * dst_num / (src_base * src_num * dst_den)
    let num = count
        .sub_frame_count()
        .checked_mul(dst_base)
        .and_then(|n| n.checked_mul(src.denominator() as i128))
        .and_then(|n| n.checked_mul(dst.numerator() as i128));
    let den = src_base * src.numerator() as i128 * dst.denominator() as i128;

    let sub_frames = match num {
        Some(num) => num.div_euclid(den),
        None => {
            let ratio = (dst_base as f64 * src.denominator() as f64 * dst.numerator() as f64)
                / den as f64;
            snap_floor(count.sub_frame_count() as f64 * ratio).unwrap_or_default()
        }
    };
    FrameCount::from_sub_frames(sub_frames, to.sub_frames_base)
}

impl Timecode {
    /// Position in wall-clock seconds.
    #[must_use]
    pub fn real_time_value(&self) -> f64 {
        match self.real_time_fraction() {
            Some((num, den)) => num as f64 / den as f64,
            None => {
                let rate = self.frame_rate().real_time_rate();
                self.frame_count().as_f64() / rate.to_f64()
            }
        }
    }

    /// Position as an audio sample offset at `sample_rate`.
    #[must_use]
    pub fn samples_value(&self, sample_rate: u32) -> f64 {
        let exact = self
            .real_time_fraction()
            .and_then(|(num, den)| Some((num.checked_mul(sample_rate as i128)?, den)));
        match exact {
            Some((num, den)) => num as f64 / den as f64,
            None => self.real_time_value() * sample_rate as f64,
        }
    }

    /// The same point in time at another frame rate.
    ///
    /// Returns `self` unchanged when the rate is the same. With
    /// `preserving_values`, the digits are kept when they are valid at the
    /// new rate. Otherwise the value is recomputed from its real time, which
    /// must be expressible at the new rate.
    pub fn converted(&self, to: FrameRate, preserving_values: bool) -> Result<Self> {
        if to == self.frame_rate() {
            return Ok(*self);
        }
        let properties = self.properties().with_frame_rate(to);

        if preserving_values && self.components().is_valid(&properties) {
            debug!(from = %self.frame_rate(), %to, "kept timecode digits across rate change");
            return Ok(Self::from_parts(*self.components(), properties));
        }

        let converted = Self::new(*self, properties, ValidationRule::Exact)?;
        debug!(
            from = %self.frame_rate(),
            %to,
            before = %self,
            after = %converted,
            "converted timecode through real time"
        );
        Ok(converted)
    }
}
