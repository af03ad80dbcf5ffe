use std::str::FromStr;

use crate::topology::{ParseResolutionError, Resolution, Snapshot, SupportedResolutions};

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    #[error("There's no connected output called '{0}'")]
    UnknownOutput(String),

    #[error("{output} doesn't offer {resolution}")]
    Unsupported {
        output: String,
        resolution: Resolution,
    },

    #[error("'{0}' isn't of the form <output>=<width>x<height>")]
    Format(String),

    #[error(transparent)]
    Resolution(#[from] ParseResolutionError),
}

/// One row of the resolution form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub output: String,
    pub current: Option<Resolution>,
    pub choices: SupportedResolutions,

    /// `None` if the output doesn't offer anything to choose from.
    pub selected: Option<Resolution>,
}

/// The resolution choice for every output, keyed by output name.
///
/// Rows keep the discovery order of the snapshot they were built from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Form {
    fields: Vec<Field>,
}

impl Form {
    /// Preselects the current resolution of each output, or its first offered
    /// one if the current isn't offered.
    pub fn from_snapshot(snapshot: &Snapshot) -> Self {
        let fields = snapshot
            .outputs()
            .iter()
            .map(|output| {
                let choices = output.supported_resolutions.clone();
                let selected = output
                    .current_resolution
                    .filter(|current| choices.contains(current))
                    .or_else(|| choices.as_slice().first().copied());

                Field {
                    output: output.name.clone(),
                    current: output.current_resolution,
                    choices,
                    selected,
                }
            })
            .collect();

        Self { fields }
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn select(&mut self, output: &str, resolution: Resolution) -> Result<(), FormError> {
        let field = self
            .fields
            .iter_mut()
            .find(|field| field.output == output)
            .ok_or_else(|| FormError::UnknownOutput(output.to_string()))?;

        if !field.choices.contains(&resolution) {
            return Err(FormError::Unsupported {
                output: output.to_string(),
                resolution,
            });
        }

        field.selected = Some(resolution);
        Ok(())
    }

    pub fn apply(&mut self, selections: &[Selection]) -> Result<(), FormError> {
        selections
            .iter()
            .try_for_each(|selection| self.select(&selection.output, selection.resolution))
    }

    /// The selected resolution of each row which has one, in row order.
    pub fn selections(&self) -> Vec<(&str, Resolution)> {
        self.fields
            .iter()
            .filter_map(|field| Some((field.output.as_str(), field.selected?)))
            .collect()
    }

    /// Rows which have nothing selected.
    pub fn unselected(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter().filter(|field| field.selected.is_none())
    }

    /// The resolution every larger output gets scaled down to: the selection
    /// of the first row.
    pub fn base_resolution(&self) -> Option<Resolution> {
        self.fields.first().and_then(|field| field.selected)
    }
}

/// A `<output>=<width>x<height>` pair as given on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub output: String,
    pub resolution: Resolution,
}

impl FromStr for Selection {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (output, resolution) = s
            .split_once('=')
            .filter(|(output, _)| !output.is_empty())
            .ok_or_else(|| FormError::Format(s.to_string()))?;

        Ok(Self {
            output: output.to_string(),
            resolution: resolution.parse()?,
        })
    }
}
