//! Timecode arithmetic.
//!
//! Every operation converts its operands to exact subframe counts under the
//! receiver's properties, combines them, and feeds the result back through a
//! [`ValidationRule`]. Operands are never validated themselves.

use crate::error::{Result, TimecodeError};
use crate::frame_count::{components_from, snap_floor, FrameCount, FrameCountValue};
use crate::source::{finite, TimecodeSource};
use crate::timecode::Timecode;
use crate::validation::{Resolved, ValidationRule};
use std::ops;

impl Timecode {
    fn apply_sub_frames(&mut self, sub_frames: i128, rule: ValidationRule) -> Result<()> {
        let count = FrameCount::from_sub_frames(sub_frames, self.sub_frames_base());
        let components = rule.apply(Resolved::FrameCount(count), self.properties())?;
        *self.components_mut() = components;
        Ok(())
    }

    /// The timecode `sub_frames` away, wrapping around the upper limit.
    pub(crate) fn wrapped(&self, sub_frames: i128) -> Self {
        let properties = *self.properties();
        let total = sub_frames.rem_euclid(properties.max_total_sub_frames());
        let count = FrameCount::from_sub_frames(total, properties.sub_frames_base);
        Self::from_parts(components_from(&count, properties.frame_rate), properties)
    }

    /// Add `other` in place.
    #[allow(clippy::should_implement_trait)]
    pub fn add<'a>(
        &mut self,
        other: impl Into<TimecodeSource<'a>>,
        rule: ValidationRule,
    ) -> Result<()> {
        let rhs = other.into().frame_count(self.properties())?;
        let total = self.frame_count().sub_frame_count().saturating_add(rhs.sub_frame_count());
        self.apply_sub_frames(total, rule)
    }

    /// Subtract `other` in place.
    pub fn subtract<'a>(
        &mut self,
        other: impl Into<TimecodeSource<'a>>,
        rule: ValidationRule,
    ) -> Result<()> {
        let rhs = other.into().frame_count(self.properties())?;
        let total = self.frame_count().sub_frame_count().saturating_sub(rhs.sub_frame_count());
        self.apply_sub_frames(total, rule)
    }

    /// Multiply in place by a scalar. The product is floored to a whole
    /// subframe.
    pub fn multiply(&mut self, factor: f64, rule: ValidationRule) -> Result<()> {
        let factor = finite(factor, "multiplier")?;
        let total = self.frame_count().sub_frame_count() as f64 * factor;
        let total = snap_floor(total)
            .ok_or_else(|| TimecodeError::invalid_argument("product is not a number"))?;
        self.apply_sub_frames(total, rule)
    }

    /// Divide in place by a scalar. The quotient is floored to a whole
    /// subframe.
    pub fn divide(&mut self, divisor: f64, rule: ValidationRule) -> Result<()> {
        let divisor = finite(divisor, "divisor")?;
        if divisor == 0.0 {
            return Err(TimecodeError::invalid_argument("division by zero"));
        }
        let total = self.frame_count().sub_frame_count() as f64 / divisor;
        let total = snap_floor(total)
            .ok_or_else(|| TimecodeError::invalid_argument("quotient is not a number"))?;
        self.apply_sub_frames(total, rule)
    }

    /// A copy with `other` added.
    pub fn adding<'a>(
        &self,
        other: impl Into<TimecodeSource<'a>>,
        rule: ValidationRule,
    ) -> Result<Self> {
        let mut result = *self;
        result.add(other, rule)?;
        Ok(result)
    }

    /// A copy with `other` subtracted.
    pub fn subtracting<'a>(
        &self,
        other: impl Into<TimecodeSource<'a>>,
        rule: ValidationRule,
    ) -> Result<Self> {
        let mut result = *self;
        result.subtract(other, rule)?;
        Ok(result)
    }

    /// A copy multiplied by `factor`.
    pub fn multiplying(&self, factor: f64, rule: ValidationRule) -> Result<Self> {
        let mut result = *self;
        result.multiply(factor, rule)?;
        Ok(result)
    }

    /// A copy divided by `divisor`.
    pub fn dividing(&self, divisor: f64, rule: ValidationRule) -> Result<Self> {
        let mut result = *self;
        result.divide(divisor, rule)?;
        Ok(result)
    }

    /// Move by a whole number of frames in place.
    pub fn add_frames(&mut self, frames: i64, rule: ValidationRule) -> Result<()> {
        self.add(FrameCountValue::Frames(frames), rule)
    }

    /// The following frame, wrapping at the upper limit.
    #[must_use]
    pub fn next_frame(&self) -> Self {
        let step = self.sub_frames_base().divisor() as i128;
        self.wrapped(self.frame_count().sub_frame_count().saturating_add(step))
    }

    /// The preceding frame, wrapping below zero.
    #[must_use]
    pub fn previous_frame(&self) -> Self {
        let step = self.sub_frames_base().divisor() as i128;
        self.wrapped(self.frame_count().sub_frame_count().saturating_sub(step))
    }
}

impl ops::Add for Timecode {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        let rhs = rhs.frame_count_in(self.properties());
        self.wrapped(self.frame_count().sub_frame_count().saturating_add(rhs.sub_frame_count()))
    }
}

impl ops::Sub for Timecode {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        let rhs = rhs.frame_count_in(self.properties());
        self.wrapped(self.frame_count().sub_frame_count().saturating_sub(rhs.sub_frame_count()))
    }
}

impl ops::AddAssign for Timecode {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl ops::SubAssign for Timecode {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl ops::Mul<f64> for Timecode {
    type Output = Result<Self>;

    fn mul(self, factor: f64) -> Result<Self> {
        self.multiplying(factor, ValidationRule::Wrapping)
    }
}

impl ops::Div<f64> for Timecode {
    type Output = Result<Self>;

    fn div(self, divisor: f64) -> Result<Self> {
        self.dividing(divisor, ValidationRule::Wrapping)
    }
}
