//! Connected outputs and their resolutions as reported by `xrandr`.
//!
//! Only [`parser`] ever looks at the raw report. Everything else works on a
//! [`Snapshot`].
pub mod parser;

mod output;
mod resolution;
mod scale;
mod snapshot;

pub use output::{
    current_label, Output, SupportedResolutions, NO_RESOLUTIONS_FOUND, UNKNOWN_RESOLUTION,
};
pub use resolution::{ParseResolutionError, Pixel, Resolution};
pub use scale::scale_factor;
pub use snapshot::Snapshot;

use tracing::debug;

use crate::backend::{self, CommandRunner};

/// Runs the display tool without arguments and parses its report.
#[tracing::instrument(skip(runner))]
pub fn query<R: CommandRunner + ?Sized>(runner: &R) -> Result<Snapshot, backend::Error> {
    let report = runner.run(&[])?;
    debug!("xrandr report:\n{}", report);

    let snapshot = Snapshot::parse(&report);
    debug!("Connected outputs: {:?}", snapshot.names());

    Ok(snapshot)
}

/// Queries the current topology and intersects the resolutions of `names`.
///
/// An empty `names` returns right away without running the display tool.
pub fn common_resolutions<R, S>(runner: &R, names: &[S]) -> Result<Vec<Resolution>, backend::Error>
where
    R: CommandRunner + ?Sized,
    S: AsRef<str>,
{
    if names.is_empty() {
        return Ok(Vec::new());
    }

    Ok(query(runner)?.common_resolutions(names))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeRunner, DUAL_HEAD_REPORT};

    #[test]
    fn empty_list_runs_nothing() {
        let runner = FakeRunner::new(DUAL_HEAD_REPORT);
        let names: [&str; 0] = [];

        assert!(common_resolutions(&runner, &names).unwrap().is_empty());
        assert!(runner.invocations().is_empty());
    }

    #[test]
    fn common_resolutions_queries_once() {
        let runner = FakeRunner::new(DUAL_HEAD_REPORT);
        let common = common_resolutions(&runner, &["DP-1", "HDMI-1"]).unwrap();

        assert_eq!(
            common,
            vec![Resolution::new(1280, 1024), Resolution::new(1920, 1080)]
        );
        assert_eq!(runner.invocations(), vec![Vec::<String>::new()]);
    }

    #[test]
    fn failing_query_propagates() {
        let runner = FakeRunner::new(DUAL_HEAD_REPORT).failing_query();

        assert!(matches!(
            query(&runner),
            Err(backend::Error::Failed { .. })
        ));
    }

    #[test]
    fn no_outputs_is_a_valid_result() {
        let runner = FakeRunner::new("Screen 0: minimum 8 x 8, current 0 x 0\n");

        assert!(query(&runner).unwrap().is_empty());
    }
}
