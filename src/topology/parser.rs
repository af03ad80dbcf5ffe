//! Reads the plain-text report `xrandr` prints when called without arguments.
//!
//! The relevant parts of such a report look like this:
//!
//! ```text
//! Screen 0: minimum 320 x 200, current 3840 x 1080, maximum 16384 x 16384
//! DP-1 connected primary 1920x1080+0+0 (normal left inverted right x axis y axis) 527mm x 296mm
//!    1920x1080     60.00*+  50.00
//!    1680x1050     59.95
//! HDMI-1 connected (normal left inverted right x axis y axis)
//!    1920x1080     60.00 +
//! HDMI-2 disconnected (normal left inverted right x axis y axis)
//! ```
//!
//! Nothing in here fails: a part of the report that can't be found degrades to
//! `None` or [`SupportedResolutions::NotFound`].
use std::sync::OnceLock;

use regex::{Captures, Regex};

use super::{Resolution, SupportedResolutions};

static CONNECTION_LINE: OnceLock<Regex> = OnceLock::new();
static OUTPUT_NAME: OnceLock<Regex> = OnceLock::new();
static MODE_LINE: OnceLock<Regex> = OnceLock::new();
static RESOLUTION: OnceLock<Regex> = OnceLock::new();

fn connection_line_regex() -> &'static Regex {
    CONNECTION_LINE.get_or_init(|| {
        Regex::new(
            r"^(?P<name>\S+) connected(?P<primary> primary)?(?: (?P<width>\d+)x(?P<height>\d+))?",
        )
        .expect("connection line pattern is valid")
    })
}

/// A connector class followed by a hyphen and an index, e.g. `eDP-1` or `DP-1-2`.
fn output_name_regex() -> &'static Regex {
    OUTPUT_NAME.get_or_init(|| {
        Regex::new(r"^\w+(?:-\d+)+$").expect("output name pattern is valid")
    })
}

fn mode_line_regex() -> &'static Regex {
    MODE_LINE
        .get_or_init(|| Regex::new(r"^\s+\d+x\d+").expect("mode line pattern is valid"))
}

fn resolution_regex() -> &'static Regex {
    RESOLUTION.get_or_init(|| Regex::new(r"\d+x\d+").expect("resolution pattern is valid"))
}

/// Returns the names of all outputs reported as connected, in order of their
/// first appearance.
pub fn connected_outputs(report: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();

    for caps in report.lines().filter_map(|line| connection_line_regex().captures(line)) {
        let name = &caps["name"];
        if output_name_regex().is_match(name) && !names.iter().any(|known| known == name) {
            names.push(name.to_string());
        }
    }

    names
}

/// Returns the active mode of `output`.
///
/// The line carrying the `primary` keyword wins over a plain one if the
/// report happens to list the output twice.
pub fn current_resolution(report: &str, output: &str) -> Option<Resolution> {
    let mut plain = None;

    for (_, caps) in connection_lines(report, output) {
        let Some(res) = geometry(&caps) else {
            continue;
        };

        if caps.name("primary").is_some() {
            return Some(res);
        }
        plain.get_or_insert(res);
    }

    plain
}

/// Returns `true` if the connection line of `output` carries the `primary` keyword.
pub fn is_primary(report: &str, output: &str) -> bool {
    connection_lines(report, output).any(|(_, caps)| caps.name("primary").is_some())
}

/// Collects every `WxH` token of the mode lines directly following the
/// connection line of `output`.
pub fn supported_resolutions(report: &str, output: &str) -> SupportedResolutions {
    let Some((line_idx, _)) = connection_lines(report, output).next() else {
        return SupportedResolutions::NotFound;
    };

    let mut resolutions: Vec<Resolution> = Vec::new();
    let mode_lines = report
        .lines()
        .skip(line_idx + 1)
        .take_while(|line| mode_line_regex().is_match(line));

    for line in mode_lines {
        for token in resolution_regex().find_iter(line) {
            let Ok(res) = token.as_str().parse::<Resolution>() else {
                continue;
            };

            if !resolutions.contains(&res) {
                resolutions.push(res);
            }
        }
    }

    if resolutions.is_empty() {
        SupportedResolutions::NotFound
    } else {
        SupportedResolutions::Found(resolutions)
    }
}

fn connection_lines<'r>(
    report: &'r str,
    output: &'r str,
) -> impl Iterator<Item = (usize, Captures<'r>)> + 'r {
    report
        .lines()
        .enumerate()
        .filter_map(|(idx, line)| connection_line_regex().captures(line).map(|caps| (idx, caps)))
        .filter(move |(_, caps)| &caps["name"] == output)
}

fn geometry(caps: &Captures) -> Option<Resolution> {
    let width = caps.name("width")?.as_str().parse().ok()?;
    let height = caps.name("height")?.as_str().parse().ok()?;

    (width > 0 && height > 0).then(|| Resolution::new(width, height))
}
