//! The timecode value type.
//!
//! A [`Timecode`] pairs raw [`Components`] with the [`Properties`] they are
//! interpreted under. Construction and mutation go through a
//! [`TimecodeSource`] and a [`ValidationRule`]; arithmetic, conversion and the
//! string codec live in their own modules as further `impl Timecode` blocks.

use crate::components::{Component, Components};
use crate::error::Result;
use crate::frame_count::{frame_count_of, FrameCount, FrameCountValue};
use crate::frame_rate::FrameRate;
use crate::properties::{Properties, SubFramesBase, UpperLimit};
use crate::rational::gcd_u128;
use crate::real_time;
use crate::source::TimecodeSource;
use crate::string::StringFormat;
use crate::validation::ValidationRule;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::RangeInclusive;

/// SMPTE timecode at a specific frame rate.
///
/// Equality and ordering compare the exact real-time position, so timecodes
/// at different rates can be compared directly. Identical digits at rates of
/// the same [`CompatibleGroup`](crate::CompatibleGroup) compare equal.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(from = "TimecodeRecord", into = "TimecodeRecord")]
pub struct Timecode {
    components: Components,
    properties: Properties,
}

impl Timecode {
    /// Build a timecode from `source`, applying `rule` to the result.
    pub fn new<'a>(
        source: impl Into<TimecodeSource<'a>>,
        properties: impl Into<Properties>,
        rule: ValidationRule,
    ) -> Result<Self> {
        let properties = properties.into();
        let resolved = source.into().resolve(&properties)?;
        Ok(Self {
            components: rule.apply(resolved, &properties)?,
            properties,
        })
    }

    /// `00:00:00:00` under `properties`.
    #[must_use]
    pub fn zero(properties: impl Into<Properties>) -> Self {
        Self {
            components: Components::ZERO,
            properties: properties.into(),
        }
    }

    /// Exact construction from component values.
    pub fn from_components(
        components: Components,
        properties: impl Into<Properties>,
    ) -> Result<Self> {
        Self::new(components, properties, ValidationRule::Exact)
    }

    /// Exact construction from an elapsed frame count.
    pub fn from_frame_count(
        value: FrameCountValue,
        properties: impl Into<Properties>,
    ) -> Result<Self> {
        Self::new(value, properties, ValidationRule::Exact)
    }

    /// Exact construction from wall-clock seconds.
    pub fn from_real_time(seconds: f64, properties: impl Into<Properties>) -> Result<Self> {
        Self::new(TimecodeSource::RealTime(seconds), properties, ValidationRule::Exact)
    }

    /// Exact construction from an audio sample position.
    pub fn from_samples(
        samples: f64,
        sample_rate: u32,
        properties: impl Into<Properties>,
    ) -> Result<Self> {
        Self::new(
            TimecodeSource::Samples {
                value: samples,
                sample_rate,
            },
            properties,
            ValidationRule::Exact,
        )
    }

    /// Replace the value with one derived from `source`, keeping the
    /// properties. On error the timecode is left untouched.
    pub fn set<'a>(
        &mut self,
        source: impl Into<TimecodeSource<'a>>,
        rule: ValidationRule,
    ) -> Result<()> {
        let resolved = source.into().resolve(&self.properties)?;
        self.components = rule.apply(resolved, &self.properties)?;
        Ok(())
    }

    pub(crate) fn from_parts(components: Components, properties: Properties) -> Self {
        Self {
            components,
            properties,
        }
    }

    /// Component values.
    #[must_use]
    pub fn components(&self) -> &Components {
        &self.components
    }

    /// Mutable access to the component values. No validation is applied.
    pub fn components_mut(&mut self) -> &mut Components {
        &mut self.components
    }

    /// Frame rate, subframes base and upper limit.
    #[must_use]
    pub fn properties(&self) -> &Properties {
        &self.properties
    }

    /// Frame rate.
    #[must_use]
    pub fn frame_rate(&self) -> FrameRate {
        self.properties.frame_rate
    }

    /// Subframes base.
    #[must_use]
    pub fn sub_frames_base(&self) -> SubFramesBase {
        self.properties.sub_frames_base
    }

    /// Upper limit.
    #[must_use]
    pub fn upper_limit(&self) -> UpperLimit {
        self.properties.upper_limit
    }

    /// Whether every component is within its valid range.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.components.is_valid(&self.properties)
    }

    /// Components outside their valid range.
    #[must_use]
    pub fn invalid_components(&self) -> BTreeSet<Component> {
        self.components.invalid_components(&self.properties)
    }

    /// Valid range of `component` given the current values.
    #[must_use]
    pub fn valid_range(&self, component: Component) -> RangeInclusive<i64> {
        self.components.valid_range(component, &self.properties)
    }

    /// Whether every component fits its display width. See
    /// [`Components::is_within_valid_digit_counts`].
    #[must_use]
    pub fn is_within_valid_digit_counts(&self) -> bool {
        self.components.is_within_valid_digit_counts(&self.properties)
    }

    /// Clamp each component to its own valid range.
    pub fn clamp_components(&mut self) {
        self.components.clamp_each(&self.properties);
    }

    /// Elapsed frames since `00:00:00:00`, including subframes.
    #[must_use]
    pub fn frame_count(&self) -> FrameCount {
        frame_count_of(
            &self.components,
            self.properties.frame_rate,
            self.properties.sub_frames_base,
        )
    }

    /// This timecode's elapsed count expressed under other properties.
    pub(crate) fn frame_count_in(&self, properties: &Properties) -> FrameCount {
        if self.properties.frame_rate == properties.frame_rate {
            self.frame_count().rebased(properties.sub_frames_base)
        } else {
            real_time::convert_frame_count(
                &self.frame_count(),
                self.properties.frame_rate,
                properties,
            )
        }
    }

    /// Position in seconds as an exact fraction `(numerator, denominator)`
    /// with a positive denominator, or `None` if it does not fit in `i128`.
    pub(crate) fn real_time_fraction(&self) -> Option<(i128, i128)> {
        let rate = self.properties.frame_rate.real_time_rate();
        let base = self.properties.sub_frames_base.divisor() as i128;
        let num = self
            .frame_count()
            .sub_frame_count()
            .checked_mul(rate.denominator() as i128)?;
        let den = base.checked_mul(rate.numerator() as i128)?;
        Some((num, den))
    }
}

impl fmt::Display for Timecode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.string_value(StringFormat::default()))
    }
}

impl PartialEq for Timecode {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Timecode {}

impl PartialOrd for Timecode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Timecode {
    fn cmp(&self, other: &Self) -> Ordering {
        if self.properties.frame_rate == other.properties.frame_rate
            && self.properties.sub_frames_base == other.properties.sub_frames_base
        {
            return self
                .frame_count()
                .sub_frame_count()
                .cmp(&other.frame_count().sub_frame_count());
        }

        let exact = self
            .real_time_fraction()
            .zip(other.real_time_fraction())
            .and_then(|((a, b), (c, d))| Some(a.checked_mul(d)?.cmp(&c.checked_mul(b)?)));

        exact.unwrap_or_else(|| {
            self.real_time_value()
                .partial_cmp(&other.real_time_value())
                .unwrap_or(Ordering::Equal)
        })
    }
}

impl Hash for Timecode {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self.real_time_fraction() {
            Some((num, den)) => {
                let divisor = gcd_u128(num.unsigned_abs(), den.unsigned_abs()).max(1) as i128;
                (num / divisor).hash(state);
                (den / divisor).hash(state);
            }
            None => self.real_time_value().to_bits().hash(state),
        }
    }
}

/// Flat serialized form of a [`Timecode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TimecodeRecord {
    days: i64,
    hours: i64,
    minutes: i64,
    seconds: i64,
    frames: i64,
    sub_frames: i64,
    frame_rate: FrameRate,
    sub_frames_base: SubFramesBase,
    upper_limit: UpperLimit,
}

impl From<Timecode> for TimecodeRecord {
    fn from(tc: Timecode) -> Self {
        let c = tc.components;
        Self {
            days: c.days,
            hours: c.hours,
            minutes: c.minutes,
            seconds: c.seconds,
            frames: c.frames,
            sub_frames: c.sub_frames,
            frame_rate: tc.properties.frame_rate,
            sub_frames_base: tc.properties.sub_frames_base,
            upper_limit: tc.properties.upper_limit,
        }
    }
}

// Decoding keeps the stored values verbatim, valid or not.
impl From<TimecodeRecord> for Timecode {
    fn from(r: TimecodeRecord) -> Self {
        Self {
            components: Components {
                days: r.days,
                hours: r.hours,
                minutes: r.minutes,
                seconds: r.seconds,
                frames: r.frames,
                sub_frames: r.sub_frames,
            },
            properties: Properties {
                frame_rate: r.frame_rate,
                sub_frames_base: r.sub_frames_base,
                upper_limit: r.upper_limit,
            },
        }
    }
}
