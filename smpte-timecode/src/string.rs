//! Timecode text codec.
//!
//! Accepted input:
//! - `HH:MM:SS:FF` with `:` or `;` between any groups
//! - an optional day prefix, either `D HH:MM:SS:FF` or `D:HH:MM:SS:FF`
//! - an optional `.SF` subframes suffix
//!
//! Output uses `;` before the frames only at drop frame rates.

use crate::components::Components;
use crate::error::{Result, TimecodeError};
use crate::frame_rate::FrameRate;
use crate::properties::Properties;
use crate::timecode::Timecode;
use crate::validation::ValidationRule;
use serde::{Deserialize, Serialize};

/// Options for [`Timecode::string_value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StringFormat {
    /// Append `.SF`.
    pub show_sub_frames: bool,
    /// Prefix the days even when they are zero.
    pub always_show_days: bool,
}

impl StringFormat {
    /// Format showing subframes.
    #[must_use]
    pub fn with_sub_frames() -> Self {
        Self {
            show_sub_frames: true,
            ..Self::default()
        }
    }

    /// Also show the days when zero.
    #[must_use]
    pub fn always_showing_days(mut self) -> Self {
        self.always_show_days = true;
        self
    }
}

/// Parse timecode text into raw components.
///
/// Only the shape of the text is checked. The values may still be invalid
/// for a given frame rate.
pub fn decode(text: &str) -> Result<Components> {
    let text = text.trim();
    if text.is_empty() {
        return Err(TimecodeError::invalid_format("empty timecode string"));
    }

    let mut words = text.split_whitespace();
    let (day_prefix, body) = match (words.next(), words.next(), words.next()) {
        (Some(body), None, _) => (None, body),
        (Some(days), Some(body), None) => (Some(days), body),
        _ => {
            return Err(TimecodeError::invalid_format(format!(
                "unexpected whitespace in {text:?}"
            )))
        }
    };

    let (main, sub_frames) = match body.split_once('.') {
        Some((main, sub)) => (main, Some(sub)),
        None => (body, None),
    };

    let groups: Vec<&str> = main.split([':', ';']).collect();
    let mut values = match (groups.len(), day_prefix) {
        (4, _) | (5, None) => groups
            .iter()
            .map(|g| number(g, text))
            .collect::<Result<Vec<_>>>()?,
        (n, _) => {
            return Err(TimecodeError::invalid_format(format!(
                "expected 4 or 5 numeric groups before the subframes, found {n} in {text:?}"
            )))
        }
    };

    let days = match day_prefix {
        Some(days) => number(days, text)?,
        None if values.len() == 5 => values.remove(0),
        None => 0,
    };
    let sub_frames = sub_frames.map(|sf| number(sf, text)).transpose()?.unwrap_or(0);

    Ok(Components::new(values[0], values[1], values[2], values[3])
        .with_days(days)
        .with_sub_frames(sub_frames))
}

fn number(group: &str, text: &str) -> Result<i64> {
    if group.is_empty() || !group.bytes().all(|b| b.is_ascii_digit()) {
        return Err(TimecodeError::invalid_format(format!(
            "invalid group {group:?} in {text:?}"
        )));
    }
    group.parse().map_err(|_| {
        TimecodeError::invalid_format(format!("group {group:?} in {text:?} is too large"))
    })
}

/// Render components under `properties`.
#[must_use]
pub fn encode(components: &Components, properties: &Properties, format: StringFormat) -> String {
    let rate = properties.frame_rate;
    let separator = if rate.is_drop() { ';' } else { ':' };
    let mut out = format!(
        "{:02}:{:02}:{:02}{separator}{:0width$}",
        components.hours,
        components.minutes,
        components.seconds,
        components.frames,
        width = rate.number_of_digits(),
    );
    if components.days != 0 || format.always_show_days {
        out.insert_str(0, &format!("{} ", components.days));
    }
    if format.show_sub_frames {
        out.push_str(&format!(
            ".{:0width$}",
            components.sub_frames,
            width = properties.sub_frames_base.number_of_digits(),
        ));
    }
    out
}

impl Timecode {
    /// The timecode as text, e.g. `"01:00:00;02"` or `"1 00:00:00:00.40"`.
    #[must_use]
    pub fn string_value(&self, format: StringFormat) -> String {
        encode(self.components(), self.properties(), format)
    }
}

/// Parse a timecode string at `frame_rate`, requiring valid values.
pub fn parse_timecode(text: &str, frame_rate: FrameRate) -> Result<Timecode> {
    Timecode::new(text, frame_rate, ValidationRule::Exact)
}
