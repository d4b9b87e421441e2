use crate::domain::{ControlPoint, DatapointValue};
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;
use tracing::Level;

/// Control an air-conditioning unit through its local HTTP API
#[derive(Debug, Parser)]
#[command(name = "acwmctl", version, arg_required_else_help = true)]
pub struct Cli {
    /// Configuration file [default: ~/.acwm]
    #[arg(long, short = 'c', env = "ACWM_CONFIG")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Switch the unit on
    On,
    /// Switch the unit off
    Off,
    /// Set the fan level
    Fan {
        #[arg(value_parser = clap::value_parser!(u8).range(1..=4))]
        level: u8,
    },
}

impl Command {
    pub fn datapoint(&self) -> DatapointValue {
        match self {
            Command::On => DatapointValue::new(ControlPoint::PowerOnOff, 1),
            Command::Off => DatapointValue::new(ControlPoint::PowerOnOff, 0),
            Command::Fan { level } => DatapointValue::new(ControlPoint::FanLevel, i64::from(*level)),
        }
    }
}

impl Cli {
    pub fn log_level(&self) -> Level {
        match self.verbose {
            0 => Level::WARN,
            1 => Level::INFO,
            2 => Level::DEBUG,
            _ => Level::TRACE,
        }
    }
}
