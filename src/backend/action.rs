use std::fmt::Display;

use crate::topology::Resolution;

/// One discrete invocation of the display tool.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// `--output <output> --mode <resolution>`
    Mode { output: String, resolution: Resolution },

    /// `--output <output> --scale <factor>x<factor>`
    Scale { output: String, factor: f64 },

    /// `--output <output> --off`
    Off { output: String },

    /// `--output <output> --auto`
    Auto { output: String },

    /// `--auto`: enable every connected output with its preferred mode.
    AutoAll,

    /// `--output <output> --same-as <target>`
    SameAs { output: String, target: String },

    /// `--output <output> --right-of <anchor>`
    RightOf { output: String, anchor: String },
}

impl Action {
    /// The arguments the display tool has to be called with.
    pub fn args(&self) -> Vec<String> {
        match self {
            Self::Mode { output, resolution } => {
                output_flag(output, "--mode", Some(resolution.to_string()))
            }
            Self::Scale { output, factor } => {
                output_flag(output, "--scale", Some(format!("{}x{}", factor, factor)))
            }
            Self::Off { output } => output_flag(output, "--off", None),
            Self::Auto { output } => output_flag(output, "--auto", None),
            Self::AutoAll => vec!["--auto".to_string()],
            Self::SameAs { output, target } => {
                output_flag(output, "--same-as", Some(target.clone()))
            }
            Self::RightOf { output, anchor } => {
                output_flag(output, "--right-of", Some(anchor.clone()))
            }
        }
    }
}

fn output_flag(output: &str, flag: &str, value: Option<String>) -> Vec<String> {
    let mut args = vec!["--output".to_string(), output.to_string(), flag.to_string()];
    args.extend(value);
    args
}

impl Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.args().join(" "))
    }
}
