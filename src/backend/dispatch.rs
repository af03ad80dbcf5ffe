use serde::{Deserialize, Serialize};
use tracing::{error, warn};

use super::{Action, CommandRunner, Error};

/// What happens to the remaining actions of a sequence once one of them failed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Keep going with the next action. (default)
    #[default]
    Continue,

    /// Skip every action after the failed one.
    Abort,
}

/// The outcome of one dispatched [`Action`].
#[derive(Debug)]
pub struct Step {
    pub action: Action,
    pub result: Result<(), Error>,
}

/// Everything that happened while running a sequence of actions.
///
/// There's no rollback: the steps before a failure stay applied.
#[derive(Debug, Default)]
pub struct Report {
    pub steps: Vec<Step>,

    /// Actions which weren't run because of [`FailurePolicy::Abort`].
    pub skipped: Vec<Action>,

    /// Informational messages for the user which aren't failures.
    pub notes: Vec<String>,

    pub aborted: bool,
}

impl Report {
    pub fn is_success(&self) -> bool {
        !self.aborted && self.failures().next().is_none()
    }

    pub fn failures(&self) -> impl Iterator<Item = (&Action, &Error)> {
        self.steps
            .iter()
            .filter_map(|step| step.result.as_ref().err().map(|err| (&step.action, err)))
    }

    pub fn note(&mut self, msg: impl Into<String>) {
        self.notes.push(msg.into());
    }

    /// Appends `other` to `self` as if both had been one sequence.
    pub fn append(&mut self, other: Report) {
        self.steps.extend(other.steps);
        self.skipped.extend(other.skipped);
        self.notes.extend(other.notes);
        self.aborted |= other.aborted;
    }
}

/// Runs actions one after another, in the given order.
#[derive(Debug)]
pub struct Dispatcher<'r, R: ?Sized> {
    runner: &'r R,
    policy: FailurePolicy,
}

impl<'r, R: CommandRunner + ?Sized> Dispatcher<'r, R> {
    pub fn new(runner: &'r R, policy: FailurePolicy) -> Self {
        Self { runner, policy }
    }

    pub fn policy(&self) -> FailurePolicy {
        self.policy
    }

    pub fn dispatch(&self, actions: Vec<Action>) -> Report {
        let mut report = Report::default();
        let mut actions = actions.into_iter();

        while let Some(action) = actions.next() {
            let result = self.runner.run(&action.args()).map(|_| ());

            if let Err(err) = &result {
                error!("'{}' failed: {}", action, err);
            }
            let failed = result.is_err();
            report.steps.push(Step { action, result });

            if failed && self.policy == FailurePolicy::Abort {
                report.skipped.extend(actions.by_ref());
                report.aborted = true;
                warn!("Skipping {} remaining action(s)", report.skipped.len());
                break;
            }
        }

        report
    }
}
