//! SMPTE CLI - Command-line timecode calculator.

use clap::{Parser, Subcommand};
use console::style;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::{
    CmdCalc, CmdCompletions, CmdConvert, CmdFrames, CmdInspect, CmdRates, CmdSamples, CmdSeconds,
};

/// Command-line arguments for the smpte tool.
#[derive(Parser, Debug)]
#[command(name = "smpte")]
#[command(version)]
#[command(about = "SMPTE/EBU timecode calculator")]
#[command(long_about = "Parse, validate, convert and calculate with SMPTE/EBU timecodes \
    at film, video and broadcast frame rates, including drop-frame.\n\n\
    EXAMPLES:\n    \
    smpte inspect '00:01:00;02' --rate 29.97d\n    \
    smpte convert 01:00:00:00 --rate 23.976 --to 24 --subframes\n    \
    smpte calc 23:00:00:00 + 02:00:00:00\n    \
    smpte frames 17982 --rate 29.97d\n    \
    smpte seconds 01:00:00:00 --rate 59.94")]
pub struct Cli {
    /// Verbose logging (or set RUST_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List supported frame rates
    Rates(CmdRates),
    /// Show components, validity and counts of a timecode
    Inspect(CmdInspect),
    /// Convert a timecode to another frame rate
    Convert(CmdConvert),
    /// Add, subtract, multiply or divide timecodes
    Calc(CmdCalc),
    /// Convert between frame counts and timecodes
    Frames(CmdFrames),
    /// Convert between seconds and timecodes
    Seconds(CmdSeconds),
    /// Convert between audio sample positions and timecodes
    Samples(CmdSamples),
    /// Generate shell completions
    Completions(CmdCompletions),
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Rates(cmd) => cmd.run(),
        Commands::Inspect(cmd) => cmd.run(),
        Commands::Convert(cmd) => cmd.run(),
        Commands::Calc(cmd) => cmd.run(),
        Commands::Frames(cmd) => cmd.run(),
        Commands::Seconds(cmd) => cmd.run(),
        Commands::Samples(cmd) => cmd.run(),
        Commands::Completions(cmd) => cmd.run::<Cli>(),
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("{} {:#}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }
}
