//! Timecode inspection command.

use super::{OutputArgs, PropertyArgs, RuleArg, TimecodeReport};
use anyhow::Context;
use clap::Args;
use console::style;
use smpte_timecode::{Timecode, ValidationRule};
use tracing::debug;

/// Parse a timecode and show everything known about it.
#[derive(Args, Debug)]
pub struct CmdInspect {
    /// Timecode text, e.g. "01:00:00;02" or "3 12:00:00:00.40"
    pub timecode: String,

    #[command(flatten)]
    pub props: PropertyArgs,

    /// Validation applied while parsing (invalid values are kept by default)
    #[arg(long, value_enum, default_value = "allow")]
    pub rule: RuleArg,

    #[command(flatten)]
    pub output: OutputArgs,
}

impl CmdInspect {
    /// Execute the inspect command.
    pub fn run(&self) -> anyhow::Result<()> {
        let tc = self.timecode()?;
        let report = TimecodeReport::new(&tc, self.output.format());

        if self.output.json {
            println!("{}", serde_json::to_string_pretty(&report)?);
        } else {
            print_report(&report);
        }
        Ok(())
    }

    fn timecode(&self) -> anyhow::Result<Timecode> {
        let props = self.props.properties();
        let rule = ValidationRule::from(self.rule);
        debug!(timecode = %self.timecode, ?props, ?rule, "inspecting");
        Timecode::new(self.timecode.as_str(), props, rule)
            .with_context(|| format!("cannot read {:?} at {}", self.timecode, props.frame_rate))
    }
}

fn print_report(report: &TimecodeReport) {
    println!();
    println!("{}", style("Timecode").cyan().bold());
    println!();
    println!("  {:<16} {}", style("Timecode:").white(), style(&report.timecode).green().bold());
    println!("  {:<16} {}", style("Frame rate:").white(), report.frame_rate);
    println!("  {:<16} {}", style("Subframes:").white(), report.sub_frames_base);
    println!("  {:<16} {}", style("Upper limit:").white(), report.upper_limit);

    let validity = if report.valid {
        style("valid".to_string()).green()
    } else {
        let names: Vec<&str> = report.invalid_components.iter().map(|c| c.name()).collect();
        style(format!("invalid ({})", names.join(", "))).red()
    };
    println!("  {:<16} {}", style("Validity:").white(), validity);
    println!("  {:<16} {}", style("Frame count:").white(), report.frame_count);
    println!("  {:<16} {:.6} s", style("Real time:").white(), report.real_time);
    println!("  {:<16} {}", style("Feet+frames:").white(), report.feet_and_frames);
    println!();
}
