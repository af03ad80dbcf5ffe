use clap::crate_name;
use notify_rust::Urgency;
use tracing::error;

use crate::backend::Report;

const SUMMARY: &str = "Monman info";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub msg: String,
    pub urgency: Urgency,
}

impl Notification {
    /// One notice per failed invocation and per note of `report`.
    pub fn from_report(report: &Report) -> Vec<Self> {
        let failures = report.failures().map(|(action, err)| Self {
            msg: format!("Couldn't apply '{}': {}", action, err),
            urgency: Urgency::Critical,
        });

        let skipped = (!report.skipped.is_empty()).then(|| Self {
            msg: format!(
                "Skipped {} action(s) after the first failure.",
                report.skipped.len()
            ),
            urgency: Urgency::Normal,
        });

        let notes = report.notes.iter().map(|note| Self {
            msg: note.clone(),
            urgency: Urgency::Low,
        });

        failures.chain(skipped).chain(notes).collect()
    }

    /// Shows the notice on the desktop. Failing to do so is only logged.
    pub fn show(&self) {
        if let Err(err) = notify_rust::Notification::new()
            .appname(crate_name!())
            .urgency(self.urgency)
            .summary(SUMMARY)
            .body(&self.msg)
            .show()
        {
            error!("Couldn't show notification: {}", err);
        }
    }
}
