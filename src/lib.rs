//! Welcome to the code-documentation of monman!
//!
//! monman reads the report of `xrandr`, shows which outputs are connected and
//! which resolutions they offer, and turns layout wishes (duplicate, extend,
//! set resolutions, ...) into `xrandr` invocations.

use std::{fs::File, path::PathBuf, sync::OnceLock};

use anyhow::Context;
use clap::crate_name;
use cli::{Cli, Command, LogLevel};
use tracing::{level_filters::LevelFilter, warn};
use tracing_subscriber::EnvFilter;
use xdg::BaseDirectories;

use backend::{Report, Xrandr};
use config::Config;
use frontend::{notification::Notification, render, Panel};
use topology::{scale_factor, Resolution};

pub mod backend;
pub mod cli;
pub mod config;
pub mod frontend;
pub mod plan;
pub mod topology;

#[cfg(test)]
pub(crate) mod testing;

static XDG: OnceLock<BaseDirectories> = OnceLock::new();

// The following paths must be relative to `XDG`!
const LOG_FILENAME: &str = "log.log";
const CONFIG_FILENAME: &str = "config.toml";

/// An enum error which contains all possible error sources while executing monman.
///
/// # Convention
/// Just click on the `Error` value of each error-enum-value to get more information about them.
///
/// ## Example
/// If you want to understand what [`Error::Backend`] catches, then just click
/// on its `Error` type and you should get to [`backend::Error`] where a more detailed
/// description waits for you!
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("An error occured in the backend: {0}")]
    Backend(#[from] backend::Error),

    #[error(transparent)]
    Frontend(#[from] frontend::Error),

    #[error("{failed} of {total} xrandr invocation(s) failed")]
    Incomplete { failed: usize, total: usize },
}

pub fn init_logging(level: &LogLevel, path: Option<PathBuf>) -> anyhow::Result<()> {
    let path = match path {
        Some(path) => path,
        None => get_default_log_path()?,
    };
    let log_file = File::create(&path)
        .with_context(|| format!("Couldn't create log file '{}'", path.to_string_lossy()))?;

    let subscriber_builder = tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_max_level(LevelFilter::from(level))
        .without_time()
        .with_ansi(false)
        .with_target(false)
        .with_file(true);

    if std::env::var_os("RUST_LOG").is_some() {
        subscriber_builder
            .with_env_filter(EnvFilter::from_default_env())
            .init();
    } else {
        subscriber_builder.init();
    }

    tracing::debug!("Logger initialised");
    Ok(())
}

pub fn get_xdg() -> Result<&'static BaseDirectories, xdg::BaseDirectoriesError> {
    if let Some(xdg) = XDG.get() {
        return Ok(xdg);
    }

    let xdg = BaseDirectories::with_prefix(crate_name!())?;
    Ok(XDG.get_or_init(|| xdg))
}

pub fn get_default_log_path() -> anyhow::Result<PathBuf> {
    get_xdg()?
        .place_state_file(LOG_FILENAME)
        .context("Couldn't access log file path")
}

/// `None` if there's no config file in any of the XDG config directories.
pub fn get_config_file_path() -> Option<PathBuf> {
    get_xdg().ok()?.find_config_file(CONFIG_FILENAME)
}

pub fn start(cli: &Cli) -> anyhow::Result<()> {
    let config = Config::load_or_default(cli.config.clone().or_else(get_config_file_path));
    let runner = Xrandr::new(&config.xrandr);

    let result = match cli.command() {
        Command::Scale { base, current } => {
            println!("{}", describe_scaling(base, current));
            return Ok(());
        }
        Command::List { toml } => {
            let panel = open_panel(&runner, &config)?;
            if toml {
                print!("{}", render::snapshot_toml(panel.snapshot())?);
            } else {
                print!("{}", render::form(&panel.form()));
            }
            return Ok(());
        }
        Command::Common { outputs } if !outputs.is_empty() => {
            backend::ensure_xorg(config.xrandr.display.as_deref())?;
            let common = topology::common_resolutions(&runner, &outputs)?;
            print!("{}", render::resolutions(&common));
            return Ok(());
        }
        Command::Common { .. } => {
            let panel = open_panel(&runner, &config)?;
            let snapshot = panel.snapshot();
            print!(
                "{}",
                render::resolutions(&snapshot.common_resolutions(&snapshot.names()))
            );
            return Ok(());
        }
        Command::Duplicate => Ok(open_panel(&runner, &config)?.duplicate()),
        Command::Extend => Ok(open_panel(&runner, &config)?.extend()),
        Command::SetResolutions { selections } => {
            let mut panel = open_panel(&runner, &config)?;
            let mut form = panel.form();
            form.apply(&selections).map_err(frontend::Error::from)?;
            panel.set_resolutions(&form)
        }
        Command::EnablePrimary => Ok(open_panel(&runner, &config)?.enable_primary()),
        Command::DisablePrimary => Ok(open_panel(&runner, &config)?.disable_primary()),
        Command::EnableSecondary => Ok(open_panel(&runner, &config)?.enable_secondary()),
        Command::DisableSecondary => Ok(open_panel(&runner, &config)?.disable_secondary()),
        Command::Auto => open_panel(&runner, &config)?.auto_detect(),
    };

    match result {
        Ok(report) => conclude(&report, &config),
        Err(frontend::Error::Requery { source, partial }) => {
            // show what has been applied before giving up
            let _ = conclude(&partial, &config);
            Err(Error::Backend(source).into())
        }
        Err(err) => Err(Error::Frontend(err).into()),
    }
}

/// Checks for a reachable X server, then queries the outputs once.
fn open_panel<'r>(runner: &'r Xrandr, config: &Config) -> anyhow::Result<Panel<'r, Xrandr>> {
    backend::ensure_xorg(config.xrandr.display.as_deref())?;
    Ok(Panel::new(runner, config.layout.clone())?)
}

fn describe_scaling(base: Resolution, current: Resolution) -> String {
    match scale_factor(base, current) {
        Some(factor) => factor.to_string(),
        None => format!("{} fits into {}, no scaling needed.", current, base),
    }
}

/// Prints the report, notifies about failures and turns them into an error.
fn conclude(report: &Report, config: &Config) -> anyhow::Result<()> {
    print!("{}", render::report(report));

    if config.notifications.enabled {
        for notification in Notification::from_report(report) {
            notification.show();
        }
    }

    let failed = report.failures().count();
    if failed > 0 || report.aborted {
        warn!("{} invocation(s) failed", failed);
        return Err(Error::Incomplete {
            failed,
            total: report.steps.len() + report.skipped.len(),
        }
        .into());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeRunner, DUAL_HEAD_REPORT};

    #[test]
    fn failed_steps_make_an_error() {
        let runner = FakeRunner::new(DUAL_HEAD_REPORT).failing_on("HDMI-1");
        let panel = Panel::new(&runner, Default::default()).unwrap();
        let report = panel.disable_secondary();

        let config = Config {
            notifications: config::Notifications { enabled: false },
            ..Default::default()
        };
        let err = conclude(&report, &config).unwrap_err();

        assert!(matches!(
            err.downcast_ref::<Error>(),
            Some(Error::Incomplete { failed: 1, total: 1 })
        ));
    }

    #[test]
    fn successful_report_is_ok() {
        let config = Config {
            notifications: config::Notifications { enabled: false },
            ..Default::default()
        };

        assert!(conclude(&Report::default(), &config).is_ok());
    }

    #[test]
    fn scaling_description() {
        let fhd = Resolution::new(1920, 1080);
        let uhd = Resolution::new(3840, 2160);

        assert_eq!(describe_scaling(fhd, uhd), "0.5");
        assert_eq!(
            describe_scaling(uhd, fhd),
            "1920x1080 fits into 3840x2160, no scaling needed."
        );
    }
}
