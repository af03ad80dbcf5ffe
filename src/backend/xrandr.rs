use std::process::Command;

use tracing::{debug, info};

use super::{CommandRunner, Error};
use crate::config;

/// Runs the configured `xrandr` binary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Xrandr {
    program: String,

    /// Prepended to every invocation.
    base_args: Vec<String>,
}

impl Xrandr {
    pub fn new(config: &config::Xrandr) -> Self {
        let mut base_args = config.args.clone();
        if let Some(display) = &config.display {
            base_args.push("--display".into());
            base_args.push(display.clone());
        }

        Self {
            program: config.program.clone(),
            base_args,
        }
    }

    fn command_line(&self, args: &[String]) -> String {
        std::iter::once(&self.program)
            .chain(&self.base_args)
            .chain(args)
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl CommandRunner for Xrandr {
    #[tracing::instrument(skip(self))]
    fn run(&self, args: &[String]) -> Result<String, Error> {
        let command = self.command_line(args);
        if args.is_empty() {
            debug!("Running `{}`", command);
        } else {
            info!("Running `{}`", command);
        }

        let output = Command::new(&self.program)
            .args(&self.base_args)
            .args(args)
            .output()
            .map_err(|source| Error::Launch {
                command: command.clone(),
                source,
            })?;

        if !output.status.success() {
            let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
            combined.push_str(&String::from_utf8_lossy(&output.stderr));

            return Err(Error::Failed {
                command,
                code: output.status.code(),
                output: combined.trim().to_string(),
            });
        }

        String::from_utf8(output.stdout).map_err(|source| Error::Utf8 { command, source })
    }
}

/// Makes sure an X server is reachable before any `xrandr` call is made.
///
/// `None` uses the `DISPLAY` environment variable.
pub fn ensure_xorg(display: Option<&str>) -> Result<(), Error> {
    let (_conn, screen_num) = x11rb::connect(display)?;
    debug!("Connected to the xorg server (screen {})", screen_num);

    Ok(())
}
