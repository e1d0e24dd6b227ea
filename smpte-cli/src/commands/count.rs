//! Conversions between timecodes and frame, second or sample counts.
//!
//! Each command accepts either a number, which is converted to a timecode,
//! or timecode text, which is converted to the number.

use super::{print_timecode, OutputArgs, PropertyArgs, RuleArg};
use anyhow::Context;
use clap::Args;
use console::style;
use smpte_timecode::{FrameCountValue, Timecode, TimecodeSource, ValidationRule};

/// Either a timecode or a count, depending on what the input looks like.
#[derive(Debug, PartialEq)]
pub enum Converted {
    /// A number was read and converted to this timecode.
    Timecode(Timecode),
    /// A timecode was read and converted to this number.
    Count(String),
}

fn print(converted: &Converted, output: &OutputArgs) -> anyhow::Result<()> {
    match converted {
        Converted::Timecode(tc) => print_timecode(tc, output),
        Converted::Count(count) => {
            if output.json {
                println!("{}", serde_json::json!({ "value": count }));
            } else {
                println!("{}", style(count).green().bold());
            }
            Ok(())
        }
    }
}

fn looks_like_timecode(input: &str) -> bool {
    input.contains([':', ';'])
}

fn read_timecode(input: &str, props: &PropertyArgs) -> anyhow::Result<Timecode> {
    Timecode::new(input, props.properties(), ValidationRule::Exact)
        .with_context(|| format!("invalid timecode {input:?}"))
}

/// Convert between a frame count and a timecode.
#[derive(Args, Debug)]
pub struct CmdFrames {
    /// Frame count (e.g. 86400 or 1439.5) or timecode text
    #[arg(allow_negative_numbers = true)]
    pub input: String,

    #[command(flatten)]
    pub props: PropertyArgs,

    /// How out-of-range counts are handled
    #[arg(long, value_enum, default_value = "exact")]
    pub rule: RuleArg,

    #[command(flatten)]
    pub output: OutputArgs,
}

impl CmdFrames {
    /// Execute the frames command.
    pub fn run(&self) -> anyhow::Result<()> {
        print(&self.convert()?, &self.output)
    }

    fn convert(&self) -> anyhow::Result<Converted> {
        if looks_like_timecode(&self.input) {
            let tc = read_timecode(&self.input, &self.props)?;
            return Ok(Converted::Count(tc.frame_count().to_string()));
        }
        let value = match self.input.parse::<i64>() {
            Ok(frames) => FrameCountValue::Frames(frames),
            Err(_) => FrameCountValue::Combined(
                self.input
                    .parse()
                    .with_context(|| format!("{:?} is not a frame count", self.input))?,
            ),
        };
        let tc = Timecode::new(value, self.props.properties(), self.rule.into())
            .with_context(|| format!("{} frames is out of range", self.input))?;
        Ok(Converted::Timecode(tc))
    }
}

/// Convert between wall-clock seconds and a timecode.
#[derive(Args, Debug)]
pub struct CmdSeconds {
    /// Seconds (e.g. 3600 or 12.5) or timecode text
    #[arg(allow_negative_numbers = true)]
    pub input: String,

    #[command(flatten)]
    pub props: PropertyArgs,

    /// How out-of-range values are handled
    #[arg(long, value_enum, default_value = "exact")]
    pub rule: RuleArg,

    #[command(flatten)]
    pub output: OutputArgs,
}

impl CmdSeconds {
    /// Execute the seconds command.
    pub fn run(&self) -> anyhow::Result<()> {
        print(&self.convert()?, &self.output)
    }

    fn convert(&self) -> anyhow::Result<Converted> {
        if looks_like_timecode(&self.input) {
            let tc = read_timecode(&self.input, &self.props)?;
            return Ok(Converted::Count(tc.real_time_value().to_string()));
        }
        let seconds: f64 = self
            .input
            .parse()
            .with_context(|| format!("{:?} is not a number of seconds", self.input))?;
        let tc = Timecode::new(
            TimecodeSource::RealTime(seconds),
            self.props.properties(),
            self.rule.into(),
        )
        .with_context(|| format!("{} seconds is out of range", self.input))?;
        Ok(Converted::Timecode(tc))
    }
}

/// Convert between an audio sample position and a timecode.
#[derive(Args, Debug)]
pub struct CmdSamples {
    /// Sample position or timecode text
    #[arg(allow_negative_numbers = true)]
    pub input: String,

    /// Audio sample rate in Hz
    #[arg(long, default_value_t = 48_000)]
    pub sample_rate: u32,

    #[command(flatten)]
    pub props: PropertyArgs,

    /// How out-of-range values are handled
    #[arg(long, value_enum, default_value = "exact")]
    pub rule: RuleArg,

    #[command(flatten)]
    pub output: OutputArgs,
}

impl CmdSamples {
    /// Execute the samples command.
    pub fn run(&self) -> anyhow::Result<()> {
        print(&self.convert()?, &self.output)
    }

    fn convert(&self) -> anyhow::Result<Converted> {
        if looks_like_timecode(&self.input) {
            let tc = read_timecode(&self.input, &self.props)?;
            return Ok(Converted::Count(
                tc.samples_value(self.sample_rate).to_string(),
            ));
        }
        let samples: f64 = self
            .input
            .parse()
            .with_context(|| format!("{:?} is not a sample position", self.input))?;
        let tc = Timecode::new(
            TimecodeSource::Samples {
                value: samples,
                sample_rate: self.sample_rate,
            },
            self.props.properties(),
            self.rule.into(),
        )
        .with_context(|| {
            format!(
                "{} samples at {} Hz is out of range",
                self.input, self.sample_rate
            )
        })?;
        Ok(Converted::Timecode(tc))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Cli, Commands};
    use clap::Parser;
    use pretty_assertions::assert_eq;
    use smpte_timecode::StringFormat;

    fn convert(args: &[&str]) -> anyhow::Result<Converted> {
        let mut argv = vec!["smpte"];
        argv.extend_from_slice(args);
        match Cli::try_parse_from(argv).unwrap().command {
            Commands::Frames(cmd) => cmd.convert(),
            Commands::Seconds(cmd) => cmd.convert(),
            Commands::Samples(cmd) => cmd.convert(),
            other => panic!("unexpected command {other:?}"),
        }
    }

    fn text(args: &[&str]) -> String {
        match convert(args).unwrap() {
            Converted::Timecode(tc) => tc.string_value(StringFormat::with_sub_frames()),
            Converted::Count(count) => count,
        }
    }

    #[test]
    fn test_frames() {
        assert_eq!(text(&["frames", "86400"]), "01:00:00:00.00");
        assert_eq!(text(&["frames", "01:00:00:00"]), "86400");
        assert_eq!(text(&["frames", "1.5"]), "00:00:00:01.40");
        assert_eq!(text(&["frames", "17982", "-r", "29.97d"]), "00:10:00;00.00");
    }

    #[test]
    fn test_negative_frames_need_a_rule() {
        assert!(convert(&["frames", "-1"]).is_err());
        assert_eq!(text(&["frames", "-1", "--rule", "wrap"]), "23:59:59:23.00");
    }

    #[test]
    fn test_seconds() {
        assert_eq!(text(&["seconds", "3600", "-r", "25"]), "01:00:00:00.00");
        assert_eq!(text(&["seconds", "00:01:00:00", "-r", "25"]), "60");
        assert!(convert(&["seconds", "ten"]).is_err());
    }

    #[test]
    fn test_samples() {
        assert_eq!(text(&["samples", "96000", "-r", "25"]), "00:00:02:00.00");
        assert_eq!(
            text(&["samples", "00:00:02:00", "-r", "25", "--sample-rate", "44100"]),
            "88200"
        );
        assert!(convert(&["samples", "100", "--sample-rate", "0"]).is_err());
    }
}
