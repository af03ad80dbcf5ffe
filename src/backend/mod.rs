//! Everything which talks to the external display tool.

mod action;
mod dispatch;
mod xrandr;

pub use action::Action;
pub use dispatch::{Dispatcher, FailurePolicy, Report, Step};
pub use xrandr::{ensure_xorg, Xrandr};

/// A general enum with possible errors as values which can occur while
/// running the display tool.
///
/// Every variant aborts only the single invocation it belongs to.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Couldn't launch `{command}`: {source}")]
    Launch {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{command}` {}: {output}", describe_exit(.code))]
    Failed {
        command: String,
        code: Option<i32>,
        /// stdout followed by stderr of the tool.
        output: String,
    },

    #[error("`{command}` printed invalid UTF-8: {source}")]
    Utf8 {
        command: String,
        #[source]
        source: std::string::FromUtf8Error,
    },

    #[error("Couldn't connect to the xorg server: {0}")]
    ConnectError(#[from] x11rb::errors::ConnectError),
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exited with status {}", code),
        None => "was terminated by a signal".to_string(),
    }
}

/// The seam to the external display tool.
pub trait CommandRunner {
    /// Runs the tool with `args` and returns what it printed to stdout.
    ///
    /// An empty `args` asks the tool for its report of all outputs.
    fn run(&self, args: &[String]) -> Result<String, Error>;
}
