//! Raw timecode component values.

use crate::error::{Result, TimecodeError};
use crate::properties::{digit_count, Properties, UpperLimit};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

/// One of the six fields of a timecode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Component {
    /// Days.
    Days,
    /// Hours.
    Hours,
    /// Minutes.
    Minutes,
    /// Seconds.
    Seconds,
    /// Frames.
    Frames,
    /// Subframes.
    SubFrames,
}

impl Component {
    /// All components, largest unit first.
    pub const ALL: [Component; 6] = [
        Self::Days,
        Self::Hours,
        Self::Minutes,
        Self::Seconds,
        Self::Frames,
        Self::SubFrames,
    ];

    /// Lowercase name of the component.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Days => "days",
            Self::Hours => "hours",
            Self::Minutes => "minutes",
            Self::Seconds => "seconds",
            Self::Frames => "frames",
            Self::SubFrames => "subframes",
        }
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Timecode component values, independent of any frame rate.
///
/// Values are not validated: they may be negative or overflow their usual
/// ranges. Validity only has meaning against a set of [`Properties`].
/// Ordering is lexicographic from days down to subframes.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub struct Components {
    /// Days
    pub days: i64,
    /// Hours
    pub hours: i64,
    /// Minutes
    pub minutes: i64,
    /// Seconds
    pub seconds: i64,
    /// Frames
    pub frames: i64,
    /// Subframes
    pub sub_frames: i64,
}

impl Components {
    /// All-zero components.
    pub const ZERO: Components = Components::new(0, 0, 0, 0);

    /// Create components from hours, minutes, seconds and frames.
    #[must_use]
    pub const fn new(hours: i64, minutes: i64, seconds: i64, frames: i64) -> Self {
        Self {
            days: 0,
            hours,
            minutes,
            seconds,
            frames,
            sub_frames: 0,
        }
    }

    /// Replace the days value.
    #[must_use]
    pub const fn with_days(mut self, days: i64) -> Self {
        self.days = days;
        self
    }

    /// Replace the subframes value.
    #[must_use]
    pub const fn with_sub_frames(mut self, sub_frames: i64) -> Self {
        self.sub_frames = sub_frames;
        self
    }

    /// Read one component.
    #[must_use]
    pub fn get(&self, component: Component) -> i64 {
        match component {
            Component::Days => self.days,
            Component::Hours => self.hours,
            Component::Minutes => self.minutes,
            Component::Seconds => self.seconds,
            Component::Frames => self.frames,
            Component::SubFrames => self.sub_frames,
        }
    }

    /// Write one component.
    pub fn set(&mut self, component: Component, value: i64) {
        match component {
            Component::Days => self.days = value,
            Component::Hours => self.hours = value,
            Component::Minutes => self.minutes = value,
            Component::Seconds => self.seconds = value,
            Component::Frames => self.frames = value,
            Component::SubFrames => self.sub_frames = value,
        }
    }

    /// The valid range of a component under `properties`.
    ///
    /// The frames range depends on the current minutes and seconds: at drop
    /// frame rates the first frame numbers of every minute not divisible by
    /// ten do not exist.
    #[must_use]
    pub fn valid_range(&self, component: Component, properties: &Properties) -> RangeInclusive<i64> {
        let rate = properties.frame_rate;
        match component {
            Component::Days => match properties.upper_limit {
                UpperLimit::Max24Hours => 0..=0,
                UpperLimit::Max100Days => 0..=99,
            },
            Component::Hours => 0..=23,
            Component::Minutes | Component::Seconds => 0..=59,
            Component::Frames => {
                let start = if rate.is_drop() && self.minutes % 10 != 0 && self.seconds == 0 {
                    rate.frames_dropped_per_minute() as i64
                } else {
                    0
                };
                start..=rate.max_frames() as i64 - 1
            }
            Component::SubFrames => 0..=properties.sub_frames_base.divisor() as i64 - 1,
        }
    }

    /// The components whose values lie outside their valid range.
    #[must_use]
    pub fn invalid_components(&self, properties: &Properties) -> BTreeSet<Component> {
        Component::ALL
            .into_iter()
            .filter(|&c| !self.valid_range(c, properties).contains(&self.get(c)))
            .collect()
    }

    /// Whether every component lies within its valid range.
    #[must_use]
    pub fn is_valid(&self, properties: &Properties) -> bool {
        self.invalid_components(properties).is_empty()
    }

    /// Fail with [`TimecodeError::InvalidComponents`] unless valid.
    pub fn validate(&self, properties: &Properties) -> Result<()> {
        let invalid = self.invalid_components(properties);
        if invalid.is_empty() {
            Ok(())
        } else {
            Err(TimecodeError::invalid_components(invalid))
        }
    }

    /// Maximum number of digits a component may be displayed with.
    #[must_use]
    pub fn valid_digit_count(component: Component, properties: &Properties) -> usize {
        match component {
            Component::Days => properties.upper_limit.days_digits(),
            Component::Hours | Component::Minutes | Component::Seconds => 2,
            Component::Frames => properties.frame_rate.number_of_digits(),
            Component::SubFrames => properties.sub_frames_base.number_of_digits(),
        }
    }

    /// Whether every component fits its display digit count.
    ///
    /// This only bounds the number of digits: `hours = 99` passes here while
    /// still being invalid. Signs are not counted.
    #[must_use]
    pub fn is_within_valid_digit_counts(&self, properties: &Properties) -> bool {
        Component::ALL.into_iter().all(|c| {
            digit_count(self.get(c).unsigned_abs()) <= Self::valid_digit_count(c, properties)
        })
    }

    /// Clamp each component to its own valid range, largest unit first.
    pub fn clamp_each(&mut self, properties: &Properties) {
        for component in Component::ALL {
            // frames' range depends on the minutes and seconds clamped before it
            let range = self.valid_range(component, properties);
            let value = self.get(component).clamp(*range.start(), *range.end());
            self.set(component, value);
        }
    }

    /// A copy with each component clamped to its own valid range.
    #[must_use]
    pub fn clamped(mut self, properties: &Properties) -> Self {
        self.clamp_each(properties);
        self
    }
}

impl FromStr for Components {
    type Err = TimecodeError;

    fn from_str(s: &str) -> Result<Self> {
        crate::string::decode(s)
    }
}
