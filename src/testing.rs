//! Fixtures for the unit tests.
use std::{cell::RefCell, collections::VecDeque};

use crate::backend::{CommandRunner, Error};

pub const DUAL_HEAD_REPORT: &str = "\
Screen 0: minimum 320 x 200, current 1920 x 1080, maximum 16384 x 16384
DP-1 connected primary 1920x1080+0+0 (normal left inverted right x axis y axis) 527mm x 296mm
   1920x1080     60.00*+  50.00    59.94
   1680x1050     59.95
   1280x1024     75.02    60.02
HDMI-1 connected (normal left inverted right x axis y axis)
   1920x1080     60.00 +  50.00
   1280x1024     60.02
HDMI-2 disconnected (normal left inverted right x axis y axis)
";

pub const LAPTOP_4K_REPORT: &str = "\
Screen 0: minimum 320 x 200, current 5760 x 2160, maximum 16384 x 16384
eDP-1 connected primary 1920x1080+0+0 (normal left inverted right x axis y axis) 344mm x 193mm
   1920x1080     60.01*+  59.97
   1680x1050     59.95
   1280x720      60.00
DP-1 disconnected (normal left inverted right x axis y axis)
DP-1-1 connected 3840x2160+1920+0 (normal left inverted right x axis y axis) 597mm x 336mm
   3840x2160     60.00*+  30.00
   2560x1440     59.95
   1920x1080     60.00    50.00
   1280x720      60.00
HDMI-1 disconnected (normal left inverted right x axis y axis)
";

/// A display tool which never touches a real display.
///
/// Queries are answered with the queued reports one after another; the last
/// one is repeated forever.
#[derive(Debug, Default)]
pub struct FakeRunner {
    reports: RefCell<VecDeque<String>>,
    invocations: RefCell<Vec<Vec<String>>>,
    fail_query: bool,
    failing_on: Vec<String>,
}

impl FakeRunner {
    pub fn new(report: &str) -> Self {
        Self {
            reports: RefCell::new(VecDeque::from([report.to_string()])),
            ..Default::default()
        }
    }

    /// Answers every query after the current one with `report`.
    pub fn then_report(self, report: &str) -> Self {
        self.reports.borrow_mut().push_back(report.to_string());
        self
    }

    pub fn failing_query(mut self) -> Self {
        self.fail_query = true;
        self
    }

    /// Lets every non-query invocation containing `needle` fail.
    pub fn failing_on(mut self, needle: &str) -> Self {
        self.failing_on.push(needle.to_string());
        self
    }

    pub fn invocations(&self) -> Vec<Vec<String>> {
        self.invocations.borrow().clone()
    }

    /// Every invocation except the queries, joined by spaces.
    pub fn invocation_lines(&self) -> Vec<String> {
        self.invocations
            .borrow()
            .iter()
            .filter(|args| !args.is_empty())
            .map(|args| args.join(" "))
            .collect()
    }

    pub fn query_count(&self) -> usize {
        self.invocations
            .borrow()
            .iter()
            .filter(|args| args.is_empty())
            .count()
    }
}

impl CommandRunner for FakeRunner {
    fn run(&self, args: &[String]) -> Result<String, Error> {
        self.invocations.borrow_mut().push(args.to_vec());
        let command = format!("xrandr {}", args.join(" ")).trim().to_string();

        if args.is_empty() {
            if self.fail_query {
                return Err(Error::Failed {
                    command,
                    code: Some(1),
                    output: "Can't open display".into(),
                });
            }

            let mut reports = self.reports.borrow_mut();
            let report = if reports.len() > 1 {
                reports.pop_front().unwrap_or_default()
            } else {
                reports.front().cloned().unwrap_or_default()
            };
            return Ok(report);
        }

        let line = args.join(" ");
        if self.failing_on.iter().any(|needle| line.contains(needle.as_str())) {
            return Err(Error::Failed {
                command,
                code: Some(1),
                output: format!("warning: output {} not found; ignoring", line),
            });
        }

        Ok(String::new())
    }
}
