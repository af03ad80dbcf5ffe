use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::backend::FailurePolicy;

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub xrandr: Xrandr,
    pub layout: Layout,
    pub notifications: Notifications,
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(|e| e.into()),
            Err(e) => {
                warn!("Couldn't read config file: {}", e);
                Err(e.into())
            }
        }
    }

    /// Like [`Config::load`] but falls back to the defaults if `path` is
    /// missing or broken.
    pub fn load_or_default<P: AsRef<Path>>(path: Option<P>) -> Self {
        let Some(path) = path else {
            debug!("No config file found, using the defaults");
            return Self::default();
        };

        Self::load(&path).unwrap_or_else(|e| {
            warn!(
                "Ignoring config file '{}': {}",
                path.as_ref().to_string_lossy(),
                e
            );
            Self::default()
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Xrandr {
    pub program: String,

    /// Prepended to every invocation, the output query included. Must not
    /// change the report format (`--verbose` does).
    pub args: Vec<String>,

    /// The X display to configure. `None` uses `DISPLAY`.
    pub display: Option<String>,
}

impl Default for Xrandr {
    fn default() -> Self {
        Self {
            program: "xrandr".into(),
            args: vec![],
            display: None,
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Layout {
    /// The output which counts as primary for the duplicate, enable and
    /// disable actions. Falls back to the output `xrandr` marks as primary.
    pub primary: Option<String>,

    pub on_failure: FailurePolicy,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Notifications {
    pub enabled: bool,
}

impl Default for Notifications {
    fn default() -> Self {
        Self { enabled: true }
    }
}
