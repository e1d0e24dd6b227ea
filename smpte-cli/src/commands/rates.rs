//! List supported frame rates command.

use clap::Args;
use console::style;
use serde::Serialize;
use smpte_timecode::FrameRate;

/// Information about a frame rate.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RateEntry {
    /// Short name, e.g. `29.97d`.
    pub name: String,
    /// Long name, e.g. `29.97 fps DF`.
    pub verbose_name: String,
    /// Whether frame numbers are dropped.
    pub drop: bool,
    /// Frame numbers per second.
    pub max_frames: u32,
    /// Frame numbers dropped per minute.
    pub dropped_per_minute: u32,
    /// Exact real-time rate as a fraction.
    pub real_time_rate: String,
    /// Compatible group name.
    pub group: String,
}

impl From<FrameRate> for RateEntry {
    fn from(rate: FrameRate) -> Self {
        Self {
            name: rate.name().to_string(),
            verbose_name: rate.verbose_name().to_string(),
            drop: rate.is_drop(),
            max_frames: rate.max_frames(),
            dropped_per_minute: rate.frames_dropped_per_minute(),
            real_time_rate: rate.real_time_rate().to_string(),
            group: format!("{:?}", rate.compatible_group()),
        }
    }
}

/// List supported frame rates.
#[derive(Args, Debug)]
pub struct CmdRates {
    /// Output in JSON format.
    #[arg(long)]
    pub json: bool,

    /// Only list drop-frame rates.
    #[arg(long)]
    pub drop: bool,
}

impl CmdRates {
    /// Execute the rates command.
    pub fn run(&self) -> anyhow::Result<()> {
        let rates: Vec<RateEntry> = FrameRate::ALL
            .into_iter()
            .filter(|r| !self.drop || r.is_drop())
            .map(RateEntry::from)
            .collect();

        if self.json {
            let output = serde_json::json!({ "rates": rates });
            println!("{}", serde_json::to_string_pretty(&output)?);
            return Ok(());
        }

        println!();
        println!("{}", style("Supported Frame Rates").cyan().bold());
        println!();
        for rate in &rates {
            let drop = if rate.drop {
                style(format!("DF -{}", rate.dropped_per_minute)).yellow()
            } else {
                style("NDF".to_string()).dim()
            };
            println!(
                "  {:<8} {:<7} {:>3} fr/s  {:<12} {}",
                style(&rate.name).green(),
                drop,
                rate.max_frames,
                rate.real_time_rate,
                style(&rate.group).dim()
            );
        }
        println!();
        Ok(())
    }
}
