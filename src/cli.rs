//! Contains the Cli implementation of monman.
use std::{fmt::Display, path::PathBuf};

use clap::{crate_name, Parser, Subcommand, ValueEnum};
use tracing::level_filters::LevelFilter;

use crate::{frontend::Selection, topology::Resolution};

#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    #[arg(short, long, default_value_t = LogLevel::Error,  help = "",
        long_help = concat!(
        "*Note*: You can also set the log level through the `RUST_LOG` environment variable and filter the logs.\n",
        "See https://docs.rs/tracing-subscriber/latest/tracing_subscriber/filter/struct.EnvFilter.html#directives\n",
        "\n",
        "Example: `RUST_LOG=[run]=debug ", crate_name!(), "` - This will log every xrandr invocation in debug mode."
    ))]
    pub log_level: LogLevel,

    /// Where the logs are written to. [default: $XDG_STATE_HOME/monman/log.log]
    #[arg(long)]
    pub log_path: Option<PathBuf>,

    /// The config file to use. [default: $XDG_CONFIG_HOME/monman/config.toml]
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

impl Cli {
    pub fn command(&self) -> Command {
        self.command
            .clone()
            .unwrap_or(Command::List { toml: false })
    }
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Show the connected outputs and their resolutions. (default)
    List {
        /// Print the outputs as TOML.
        #[arg(long)]
        toml: bool,
    },

    /// Print the resolutions the given outputs have in common. (default: all outputs)
    Common { outputs: Vec<String> },

    /// Print the factor an output at CURRENT gets scaled by to match BASE.
    Scale { base: Resolution, current: Resolution },

    /// Mirror every output onto the primary one.
    Duplicate,

    /// Place the outputs next to each other from left to right.
    Extend,

    /// Set the resolution of each output and scale down larger outputs to the
    /// first one.
    SetResolutions {
        /// `<output>=<width>x<height>`. Outputs not given keep their current resolution.
        selections: Vec<Selection>,
    },

    /// Turn the primary output on.
    EnablePrimary,

    /// Turn the primary output off.
    DisablePrimary,

    /// Turn every other output on at the best resolution shared with the primary.
    EnableSecondary,

    /// Turn every other output off.
    DisableSecondary,

    /// Let xrandr enable all outputs and drive them at their highest common resolution.
    Auto,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
    Off,
}

impl From<&LogLevel> for LevelFilter {
    fn from(level: &LogLevel) -> Self {
        match level {
            LogLevel::Error => Self::ERROR,
            LogLevel::Warn => Self::WARN,
            LogLevel::Info => Self::INFO,
            LogLevel::Debug => Self::DEBUG,
            LogLevel::Trace => Self::TRACE,
            LogLevel::Off => Self::OFF,
        }
    }
}

impl Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", LevelFilter::from(self))
    }
}
