//! CLI subcommand implementations.

pub mod calc;
pub mod completions;
pub mod convert;
pub mod count;
pub mod inspect;
pub mod rates;

pub use calc::CmdCalc;
pub use completions::CmdCompletions;
pub use convert::CmdConvert;
pub use count::{CmdFrames, CmdSamples, CmdSeconds};
pub use inspect::CmdInspect;
pub use rates::CmdRates;

use clap::{Args, ValueEnum};
use console::style;
use serde::Serialize;
use smpte_timecode::{
    Component, Components, FrameRate, Properties, StringFormat, SubFramesBase, Timecode,
    UpperLimit, ValidationRule,
};

/// Frame rate, subframes base and upper limit of the timecodes involved.
#[derive(Args, Debug, Clone)]
pub struct PropertyArgs {
    /// Frame rate (e.g. 24, 29.97d, 59.94, "30 fps DF")
    #[arg(short, long, default_value = "24")]
    pub rate: FrameRate,

    /// Subframes per frame (100, 80, 50, 25, 24)
    #[arg(long, default_value = "80")]
    pub base: SubFramesBase,

    /// Upper limit (24h or 100d)
    #[arg(long, default_value = "24h")]
    pub limit: UpperLimit,
}

impl PropertyArgs {
    /// The properties these flags describe.
    pub fn properties(&self) -> Properties {
        Properties::new(self.rate)
            .with_base(self.base)
            .with_limit(self.limit)
    }
}

/// Validation rule names accepted on the command line.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RuleArg {
    /// Fail on invalid results
    #[default]
    Exact,
    /// Clamp the whole value into range
    Clamp,
    /// Clamp each component into its own range
    ClampEach,
    /// Wrap around the upper limit
    Wrap,
    /// Keep invalid values
    Allow,
}

impl From<RuleArg> for ValidationRule {
    fn from(rule: RuleArg) -> Self {
        match rule {
            RuleArg::Exact => Self::Exact,
            RuleArg::Clamp => Self::Clamping,
            RuleArg::ClampEach => Self::ClampingComponents,
            RuleArg::Wrap => Self::Wrapping,
            RuleArg::Allow => Self::AllowingInvalid,
        }
    }
}

/// How results are printed.
#[derive(Args, Debug, Clone, Default)]
pub struct OutputArgs {
    /// Show subframes
    #[arg(short = 's', long)]
    pub subframes: bool,

    /// Always show the days field
    #[arg(short = 'd', long)]
    pub days: bool,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

impl OutputArgs {
    /// String format selected by these flags.
    pub fn format(&self) -> StringFormat {
        StringFormat {
            show_sub_frames: self.subframes,
            always_show_days: self.days,
        }
    }
}

/// Everything the CLI reports about a timecode.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimecodeReport {
    /// Formatted timecode.
    pub timecode: String,
    /// Raw component values.
    pub components: Components,
    /// Frame rate name.
    pub frame_rate: String,
    /// Subframes base.
    pub sub_frames_base: u32,
    /// Upper limit.
    pub upper_limit: String,
    /// Whether every component is in range.
    pub valid: bool,
    /// Components out of range.
    pub invalid_components: Vec<Component>,
    /// Elapsed frames, with a subframe fraction when present.
    pub frame_count: String,
    /// Wall-clock seconds.
    pub real_time: f64,
    /// 35mm feet+frames.
    pub feet_and_frames: String,
}

impl TimecodeReport {
    /// Collect the report for `tc`.
    pub fn new(tc: &Timecode, format: StringFormat) -> Self {
        Self {
            timecode: tc.string_value(format),
            components: *tc.components(),
            frame_rate: tc.frame_rate().to_string(),
            sub_frames_base: tc.sub_frames_base().divisor(),
            upper_limit: tc.upper_limit().to_string(),
            valid: tc.is_valid(),
            invalid_components: tc.invalid_components().into_iter().collect(),
            frame_count: tc.frame_count().to_string(),
            real_time: tc.real_time_value(),
            feet_and_frames: tc.feet_and_frames().to_string(),
        }
    }
}

/// Print a timecode either as a single line or as JSON.
pub fn print_timecode(tc: &Timecode, output: &OutputArgs) -> anyhow::Result<()> {
    if output.json {
        let report = TimecodeReport::new(tc, output.format());
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", style(tc.string_value(output.format())).green().bold());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_rule_mapping() {
        assert_eq!(ValidationRule::from(RuleArg::default()), ValidationRule::Exact);
        assert_eq!(ValidationRule::from(RuleArg::Wrap), ValidationRule::Wrapping);
        assert_eq!(
            ValidationRule::from(RuleArg::ClampEach),
            ValidationRule::ClampingComponents
        );
    }

    #[test]
    fn test_report() {
        let tc = Timecode::new(
            Components::new(0, 1, 0, 0),
            FrameRate::Fps29_97Drop,
            ValidationRule::AllowingInvalid,
        )
        .unwrap();
        let report = TimecodeReport::new(&tc, StringFormat::default());
        assert_eq!(report.timecode, "00:01:00;00");
        assert!(!report.valid);
        assert_eq!(report.invalid_components, vec![Component::Frames]);
        assert_eq!(report.frame_rate, "29.97d");
        assert_eq!(report.sub_frames_base, 80);
        assert_eq!(report.upper_limit, "24 hours");

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["invalidComponents"], serde_json::json!(["frames"]));
    }
}
