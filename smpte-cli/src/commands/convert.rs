//! Frame rate conversion command.

use super::{print_timecode, OutputArgs, PropertyArgs};
use anyhow::Context;
use clap::Args;
use smpte_timecode::{FrameRate, Timecode, ValidationRule};
use tracing::info;

/// Convert a timecode to another frame rate.
#[derive(Args, Debug)]
pub struct CmdConvert {
    /// Timecode text at the source rate
    pub timecode: String,

    #[command(flatten)]
    pub props: PropertyArgs,

    /// Target frame rate
    #[arg(short, long)]
    pub to: FrameRate,

    /// Keep the component values when they are valid at the target rate
    #[arg(long)]
    pub preserve_values: bool,

    #[command(flatten)]
    pub output: OutputArgs,
}

impl CmdConvert {
    /// Execute the convert command.
    pub fn run(&self) -> anyhow::Result<()> {
        let converted = self.convert()?;
        print_timecode(&converted, &self.output)
    }

    fn convert(&self) -> anyhow::Result<Timecode> {
        let props = self.props.properties();
        let source = Timecode::new(self.timecode.as_str(), props, ValidationRule::Exact)
            .with_context(|| format!("invalid source timecode {:?}", self.timecode))?;
        let converted = source
            .converted(self.to, self.preserve_values)
            .with_context(|| format!("{source} does not exist at {}", self.to))?;
        info!(from = %source, to = %converted, "converted");
        Ok(converted)
    }
}
