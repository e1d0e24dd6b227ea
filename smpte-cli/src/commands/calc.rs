//! Timecode arithmetic command.

use super::{print_timecode, OutputArgs, PropertyArgs, RuleArg};
use anyhow::{bail, Context};
use clap::{Args, ValueEnum};
use console::style;
use smpte_timecode::{
    FrameCountValue, Timecode, TimecodeInterval, TimecodeSource, ValidationRule,
};
use tracing::debug;

/// Arithmetic operators.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    /// Add a timecode or frame count
    #[value(name = "+", alias = "add")]
    Add,
    /// Subtract a timecode or frame count
    #[value(name = "-", alias = "sub")]
    Subtract,
    /// Multiply by a number
    #[value(name = "x", alias = "mul")]
    Multiply,
    /// Divide by a number
    #[value(name = "/", alias = "div")]
    Divide,
    /// Signed interval from the left operand to the right one
    #[value(name = "to", alias = "interval")]
    Interval,
}

/// Add, subtract, multiply or divide timecodes.
#[derive(Args, Debug)]
pub struct CmdCalc {
    /// Left operand (timecode text)
    pub lhs: String,

    /// Operator: +, -, x, / or to
    #[arg(value_enum)]
    pub op: Operator,

    /// Right operand: timecode text or whole frames for + and -, a number for x and /
    #[arg(allow_negative_numbers = true)]
    pub rhs: String,

    #[command(flatten)]
    pub props: PropertyArgs,

    /// How out-of-range results are handled
    #[arg(long, value_enum, default_value = "wrap")]
    pub rule: RuleArg,

    #[command(flatten)]
    pub output: OutputArgs,
}

/// Result of a calculation.
#[derive(Debug)]
pub enum Outcome {
    /// A new timecode.
    Timecode(Timecode),
    /// A signed interval.
    Interval(TimecodeInterval),
}

impl CmdCalc {
    /// Execute the calc command.
    pub fn run(&self) -> anyhow::Result<()> {
        match self.evaluate()? {
            Outcome::Timecode(tc) => print_timecode(&tc, &self.output),
            Outcome::Interval(interval) => {
                if self.output.json {
                    println!("{}", serde_json::to_string_pretty(&interval)?);
                } else {
                    println!(
                        "{}  {}",
                        style(interval.to_string()).green().bold(),
                        style(format!("({:.6} s)", interval.real_time_value())).dim()
                    );
                }
                Ok(())
            }
        }
    }

    /// Evaluate the expression without printing it.
    pub fn evaluate(&self) -> anyhow::Result<Outcome> {
        let props = self.props.properties();
        let rule = ValidationRule::from(self.rule);
        let lhs = Timecode::new(self.lhs.as_str(), props, ValidationRule::Exact)
            .with_context(|| format!("invalid timecode {:?}", self.lhs))?;
        debug!(%lhs, op = ?self.op, rhs = %self.rhs, ?rule, "evaluating");

        let result = match self.op {
            Operator::Add => lhs.adding(self.operand(), rule),
            Operator::Subtract => lhs.subtracting(self.operand(), rule),
            Operator::Multiply => lhs.multiplying(self.scalar()?, rule),
            Operator::Divide => lhs.dividing(self.scalar()?, rule),
            Operator::Interval => {
                let rhs = Timecode::new(self.rhs.as_str(), props, ValidationRule::Exact)
                    .with_context(|| format!("invalid timecode {:?}", self.rhs))?;
                return Ok(Outcome::Interval(lhs.interval(&rhs)));
            }
        };
        let tc = result
            .with_context(|| format!("{} {:?} {} failed", self.lhs, self.op, self.rhs))?;
        Ok(Outcome::Timecode(tc))
    }

    fn operand(&self) -> TimecodeSource<'_> {
        match self.rhs.parse::<i64>() {
            Ok(frames) => FrameCountValue::Frames(frames).into(),
            Err(_) => self.rhs.as_str().into(),
        }
    }

    fn scalar(&self) -> anyhow::Result<f64> {
        let value: f64 = self
            .rhs
            .parse()
            .with_context(|| format!("{:?} is not a number", self.rhs))?;
        if !value.is_finite() {
            bail!("{:?} is not a finite number", self.rhs);
        }
        Ok(value)
    }
}
