//! The user facing side: what can be shown about the outputs and which
//! actions a user can trigger.
mod form;
pub mod notification;
pub mod render;

pub use form::{Field, Form, FormError, Selection};

use tracing::{debug, info};

use crate::{
    backend::{self, Action, CommandRunner, Dispatcher, Report},
    config::Layout,
    plan,
    topology::{self, Snapshot},
};

pub const NO_COMMON_RESOLUTION: &str = "No common resolution found among connected outputs.";
pub const NO_OUTPUTS: &str = "No connected outputs.";
pub const NO_SCALING_BASE: &str =
    "Not scaling: the first output has no resolution to scale the others to.";

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Couldn't query the outputs: {0}")]
    Query(#[from] backend::Error),

    /// The outputs couldn't be queried again in the middle of an action.
    /// `partial` holds what has been applied up to then.
    #[error("Couldn't query the outputs again in the middle of an action: {source}")]
    Requery {
        #[source]
        source: backend::Error,
        partial: Report,
    },

    #[error(transparent)]
    Form(#[from] FormError),
}

/// Owns the latest [`Snapshot`] and turns the user actions into invocations.
#[derive(Debug)]
pub struct Panel<'r, R: ?Sized> {
    runner: &'r R,
    layout: Layout,
    snapshot: Snapshot,
}

impl<'r, R: CommandRunner + ?Sized> Panel<'r, R> {
    /// Queries the outputs once.
    pub fn new(runner: &'r R, layout: Layout) -> Result<Self, Error> {
        let snapshot = topology::query(runner)?;

        Ok(Self {
            runner,
            layout,
            snapshot,
        })
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    /// Replaces the snapshot by a fresh one.
    pub fn refresh(&mut self) -> Result<&Snapshot, Error> {
        self.snapshot = topology::query(self.runner)?;
        Ok(&self.snapshot)
    }

    pub fn form(&self) -> Form {
        Form::from_snapshot(&self.snapshot)
    }

    pub fn primary(&self) -> Option<String> {
        self.snapshot
            .designated_primary(self.layout.primary.as_deref())
    }

    #[tracing::instrument(skip(self))]
    pub fn duplicate(&self) -> Report {
        self.with_primary(|snapshot, primary| plan::duplicate(snapshot, primary))
    }

    #[tracing::instrument(skip(self))]
    pub fn extend(&self) -> Report {
        self.dispatch(plan::extend(&self.snapshot))
    }

    /// Sets every selected resolution of `form`, then shrinks each output
    /// which ended up larger than the selection of the first row.
    #[tracing::instrument(skip_all)]
    pub fn set_resolutions(&mut self, form: &Form) -> Result<Report, Error> {
        let mut report = self.dispatch(plan::set_modes(&form.selections()));
        for field in form.unselected() {
            report.note(format!("{} has no resolution to set, skipping it.", field.output));
        }

        let Some(base) = form.base_resolution() else {
            if !form.fields().is_empty() {
                report.note(NO_SCALING_BASE);
            }
            return Ok(report);
        };
        if report.aborted {
            return Ok(report);
        }

        report = self.requery(report)?;
        let scaling = plan::scale_to(&self.snapshot, base);
        for action in &scaling {
            info!("Scaling down to fit {}: {}", base, action);
        }
        report.append(self.dispatch(scaling));

        Ok(report)
    }

    #[tracing::instrument(skip(self))]
    pub fn enable_primary(&self) -> Report {
        self.with_primary(|_, primary| plan::enable_primary(primary))
    }

    #[tracing::instrument(skip(self))]
    pub fn disable_primary(&self) -> Report {
        self.with_primary(|_, primary| plan::disable_primary(primary))
    }

    #[tracing::instrument(skip(self))]
    pub fn enable_secondary(&self) -> Report {
        self.with_primary(plan::enable_secondary)
    }

    #[tracing::instrument(skip(self))]
    pub fn disable_secondary(&self) -> Report {
        self.with_primary(plan::disable_secondary)
    }

    /// Lets the display tool enable every output and then drives all of them
    /// at their highest common resolution.
    #[tracing::instrument(skip(self))]
    pub fn auto_detect(&mut self) -> Result<Report, Error> {
        let mut report = self.dispatch(vec![Action::AutoAll]);
        if report.aborted {
            return Ok(report);
        }

        report = self.requery(report)?;
        if self.snapshot.outputs().len() > 1 {
            match plan::uniform_mode(&self.snapshot) {
                Some(actions) => report.append(self.dispatch(actions)),
                None => report.note(NO_COMMON_RESOLUTION),
            }
        }

        Ok(report)
    }

    fn with_primary<F>(&self, plan: F) -> Report
    where
        F: FnOnce(&Snapshot, &str) -> Vec<Action>,
    {
        match self.primary() {
            Some(primary) => {
                debug!("Primary output: {}", primary);
                self.dispatch(plan(&self.snapshot, &primary))
            }
            None => {
                let mut report = Report::default();
                report.note(NO_OUTPUTS);
                report
            }
        }
    }

    fn dispatch(&self, actions: Vec<Action>) -> Report {
        Dispatcher::new(self.runner, self.layout.on_failure).dispatch(actions)
    }

    fn requery(&mut self, report: Report) -> Result<Report, Error> {
        match topology::query(self.runner) {
            Ok(snapshot) => {
                self.snapshot = snapshot;
                Ok(report)
            }
            Err(source) => Err(Error::Requery {
                source,
                partial: report,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        backend::FailurePolicy,
        testing::{FakeRunner, DUAL_HEAD_REPORT, LAPTOP_4K_REPORT},
        topology::Resolution,
    };

    fn panel(runner: &FakeRunner) -> Panel<'_, FakeRunner> {
        Panel::new(runner, Layout::default()).unwrap()
    }

    #[test]
    fn failing_initial_query() {
        let runner = FakeRunner::new(DUAL_HEAD_REPORT).failing_query();

        assert!(matches!(
            Panel::new(&runner, Layout::default()),
            Err(Error::Query(_))
        ));
    }

    #[test]
    fn refresh_replaces_the_snapshot() {
        let runner = FakeRunner::new(DUAL_HEAD_REPORT).then_report(LAPTOP_4K_REPORT);
        let mut panel = panel(&runner);
        assert_eq!(panel.snapshot().names(), vec!["DP-1", "HDMI-1"]);

        let snapshot = panel.refresh().unwrap();
        assert_eq!(snapshot.names(), vec!["eDP-1", "DP-1-1"]);
        assert_eq!(panel.primary().as_deref(), Some("eDP-1"));
    }

    #[test]
    fn duplicate_onto_reported_primary() {
        let runner = FakeRunner::new(DUAL_HEAD_REPORT);
        let report = panel(&runner).duplicate();

        assert!(report.is_success());
        assert_eq!(runner.invocation_lines(), vec!["--output HDMI-1 --same-as DP-1"]);
    }

    #[test]
    fn configured_primary_wins() {
        let runner = FakeRunner::new(DUAL_HEAD_REPORT);
        let layout = Layout {
            primary: Some("HDMI-1".into()),
            ..Default::default()
        };
        let panel = Panel::new(&runner, layout).unwrap();

        panel.disable_primary();
        panel.disable_secondary();
        assert_eq!(
            runner.invocation_lines(),
            vec!["--output HDMI-1 --off", "--output DP-1 --off"]
        );
    }

    #[test]
    fn nothing_connected() {
        let runner = FakeRunner::new("Screen 0: minimum 8 x 8, current 0 x 0\n");
        let panel = panel(&runner);

        let report = panel.enable_primary();
        assert_eq!(report.notes, vec![NO_OUTPUTS]);
        assert!(panel.extend().steps.is_empty());
        assert!(runner.invocation_lines().is_empty());
    }

    #[test]
    fn extend_continues_after_failure() {
        let runner = FakeRunner::new(
            "eDP-1 connected primary 1920x1080+0+0\nDP-1 connected\nHDMI-1 connected\n",
        )
        .failing_on("--output DP-1 ");
        let report = panel(&runner).extend();

        assert_eq!(report.steps.len(), 2);
        assert_eq!(report.failures().count(), 1);
        assert_eq!(
            runner.invocation_lines(),
            vec!["--output DP-1 --right-of eDP-1", "--output HDMI-1 --right-of DP-1"]
        );
    }

    #[test]
    fn extend_aborts_when_asked_to() {
        let runner = FakeRunner::new(
            "eDP-1 connected primary 1920x1080+0+0\nDP-1 connected\nHDMI-1 connected\n",
        )
        .failing_on("--output DP-1 ");
        let layout = Layout {
            on_failure: FailurePolicy::Abort,
            ..Default::default()
        };
        let report = Panel::new(&runner, layout).unwrap().extend();

        assert!(report.aborted);
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(runner.invocation_lines(), vec!["--output DP-1 --right-of eDP-1"]);
    }

    #[test]
    fn set_resolutions_scales_larger_outputs() {
        let runner = FakeRunner::new(LAPTOP_4K_REPORT);
        let mut panel = panel(&runner);

        let mut form = panel.form();
        form.select("DP-1-1", Resolution::new(3840, 2160)).unwrap();
        let report = panel.set_resolutions(&form).unwrap();

        assert!(report.is_success());
        assert_eq!(
            runner.invocation_lines(),
            vec![
                "--output eDP-1 --mode 1920x1080",
                "--output DP-1-1 --mode 3840x2160",
                "--output DP-1-1 --scale 0.5x0.5",
            ]
        );
        assert_eq!(runner.query_count(), 2);
    }

    #[test]
    fn set_resolutions_without_scaling() {
        let runner = FakeRunner::new(DUAL_HEAD_REPORT);
        let mut panel = panel(&runner);

        let report = panel.set_resolutions(&panel.form()).unwrap();
        assert_eq!(report.steps.len(), 2);
        assert_eq!(
            runner.invocation_lines(),
            vec!["--output DP-1 --mode 1920x1080", "--output HDMI-1 --mode 1920x1080"]
        );
    }

    #[test]
    fn set_resolutions_without_base_skips_scaling() {
        let runner = FakeRunner::new(
            "DP-1 connected\nHDMI-1 connected 1280x720+0+0\n   1280x720  60.00*\n",
        );
        let mut panel = panel(&runner);

        let report = panel.set_resolutions(&panel.form()).unwrap();
        assert_eq!(runner.invocation_lines(), vec!["--output HDMI-1 --mode 1280x720"]);
        assert_eq!(
            report.notes,
            vec![
                "DP-1 has no resolution to set, skipping it.".to_string(),
                NO_SCALING_BASE.to_string(),
            ]
        );
        assert_eq!(runner.query_count(), 1);
    }

    #[test]
    fn set_resolutions_keeps_partial_report_on_failed_requery() {
        let runner = FakeRunner::new(LAPTOP_4K_REPORT);
        let panel = panel(&runner);
        let form = panel.form();

        let runner_failing = FakeRunner::new(LAPTOP_4K_REPORT).failing_query();
        let mut broken = Panel {
            runner: &runner_failing,
            layout: Layout::default(),
            snapshot: panel.snapshot().clone(),
        };

        match broken.set_resolutions(&form) {
            Err(Error::Requery { partial, .. }) => assert_eq!(partial.steps.len(), 2),
            other => panic!("Expected a failed re-query, got {:?}", other),
        }
    }

    #[test]
    fn auto_detect_sets_highest_common() {
        let runner = FakeRunner::new(DUAL_HEAD_REPORT);
        let report = panel(&runner).auto_detect().unwrap();

        assert!(report.is_success());
        assert_eq!(
            runner.invocation_lines(),
            vec![
                "--auto",
                "--output DP-1 --mode 1920x1080",
                "--output HDMI-1 --mode 1920x1080",
            ]
        );
    }

    #[test]
    fn auto_detect_without_common_resolution() {
        let runner = FakeRunner::new(DUAL_HEAD_REPORT).then_report(
            "DP-1 connected primary 1920x1080+0+0\n   1920x1080  60.00*\nHDMI-1 connected\n   1280x720  60.00\n",
        );
        let report = panel(&runner).auto_detect().unwrap();

        assert_eq!(runner.invocation_lines(), vec!["--auto"]);
        assert_eq!(report.notes, vec![NO_COMMON_RESOLUTION]);
    }

    #[test]
    fn enable_secondary_uses_common_resolution_with_primary() {
        let runner = FakeRunner::new(LAPTOP_4K_REPORT);
        panel(&runner).enable_secondary();

        assert_eq!(runner.invocation_lines(), vec!["--output DP-1-1 --mode 1920x1080"]);
    }
}
