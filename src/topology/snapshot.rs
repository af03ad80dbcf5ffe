use std::collections::BTreeSet;

use serde::Serialize;

use super::{parser, Output, Resolution, SupportedResolutions};

static NOT_FOUND: SupportedResolutions = SupportedResolutions::NotFound;

/// All connected outputs of one query.
///
/// A snapshot is never patched. Querying again produces a new one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    outputs: Vec<Output>,
}

impl Snapshot {
    pub fn parse(report: &str) -> Self {
        let outputs = parser::connected_outputs(report)
            .into_iter()
            .map(|name| Output {
                connected: true,
                is_primary: parser::is_primary(report, &name),
                current_resolution: parser::current_resolution(report, &name),
                supported_resolutions: parser::supported_resolutions(report, &name),
                name,
            })
            .collect();

        Self { outputs }
    }

    /// The outputs in discovery order.
    pub fn outputs(&self) -> &[Output] {
        &self.outputs
    }

    pub fn names(&self) -> Vec<&str> {
        self.outputs.iter().map(|output| output.name.as_str()).collect()
    }

    pub fn output(&self, name: &str) -> Option<&Output> {
        self.outputs.iter().find(|output| output.name == name)
    }

    pub fn is_empty(&self) -> bool {
        self.outputs.is_empty()
    }

    /// The output the report marks as `primary`.
    pub fn primary(&self) -> Option<&Output> {
        self.outputs.iter().find(|output| output.is_primary)
    }

    /// Picks the output every "primary"/"secondary" action is relative to:
    /// `configured` if given, otherwise the one marked `primary`, otherwise
    /// the first discovered output.
    pub fn designated_primary(&self, configured: Option<&str>) -> Option<String> {
        if let Some(name) = configured {
            return Some(name.to_string());
        }

        self.primary()
            .or_else(|| self.outputs.first())
            .map(|output| output.name.clone())
    }

    pub fn current_resolution(&self, name: &str) -> Option<Resolution> {
        self.output(name).and_then(|output| output.current_resolution)
    }

    /// Unknown outputs are reported as [`SupportedResolutions::NotFound`].
    pub fn supported_resolutions(&self, name: &str) -> &SupportedResolutions {
        self.output(name)
            .map(|output| &output.supported_resolutions)
            .unwrap_or(&NOT_FOUND)
    }

    /// Returns the resolutions every output of `names` supports, ascending by
    /// `(width, height)`.
    ///
    /// An output without any discovered resolution contributes an empty set,
    /// which empties the whole result.
    pub fn common_resolutions<S: AsRef<str>>(&self, names: &[S]) -> Vec<Resolution> {
        let Some((first, rest)) = names.split_first() else {
            return Vec::new();
        };

        let mut common: BTreeSet<Resolution> = self
            .supported_resolutions(first.as_ref())
            .as_slice()
            .iter()
            .copied()
            .collect();

        for name in rest {
            let supported = self.supported_resolutions(name.as_ref());
            common.retain(|res| supported.contains(res));
        }

        common.into_iter().collect()
    }

    pub fn highest_common_resolution<S: AsRef<str>>(&self, names: &[S]) -> Option<Resolution> {
        self.common_resolutions(names).pop()
    }
}
