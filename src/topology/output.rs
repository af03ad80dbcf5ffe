use std::fmt::Display;

use serde::{Serialize, Serializer};

use super::Resolution;

/// What the report calls an output's current mode when none was found.
pub const UNKNOWN_RESOLUTION: &str = "Unknown";

/// What a supported-resolution list shows when an output has no mode lines.
pub const NO_RESOLUTIONS_FOUND: &str = "No resolutions found";

/// The modes listed under an output's block in the report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SupportedResolutions {
    /// First-seen order, no duplicates, never empty.
    Found(Vec<Resolution>),

    /// The output's block couldn't be located or listed no modes.
    NotFound,
}

impl SupportedResolutions {
    /// The real resolutions. `NotFound` contributes nothing.
    pub fn as_slice(&self) -> &[Resolution] {
        match self {
            Self::Found(list) => list,
            Self::NotFound => &[],
        }
    }

    pub fn contains(&self, res: &Resolution) -> bool {
        self.as_slice().contains(res)
    }

    /// The entries as a user would see them in a selection list.
    pub fn labels(&self) -> Vec<String> {
        match self {
            Self::Found(list) => list.iter().map(ToString::to_string).collect(),
            Self::NotFound => vec![NO_RESOLUTIONS_FOUND.to_string()],
        }
    }
}

impl Serialize for SupportedResolutions {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.labels())
    }
}

/// One connected display connector of a [`super::Snapshot`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Output {
    pub name: String,
    pub connected: bool,
    pub is_primary: bool,

    /// `None` if the report doesn't state the active mode.
    #[serde(serialize_with = "serialize_current")]
    pub current_resolution: Option<Resolution>,

    pub supported_resolutions: SupportedResolutions,
}

impl Output {
    pub fn current_label(&self) -> String {
        current_label(self.current_resolution.as_ref())
    }
}

impl Display for Output {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.current_label())
    }
}

pub fn current_label(res: Option<&Resolution>) -> String {
    res.map(ToString::to_string)
        .unwrap_or_else(|| UNKNOWN_RESOLUTION.to_string())
}

fn serialize_current<S: Serializer>(
    res: &Option<Resolution>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&current_label(res.as_ref()))
}
