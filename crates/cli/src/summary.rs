// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Run summary rendering.
//!
//! One line per step in text mode:
//! ```text
//! build: PASS (0.42s)
//! test: FAIL (exit 101, 1.03s)
//! bench: SKIP
//! ```
//! JSON mode emits the full report object instead. Neither form alters
//! the run's exit status.

use std::io::{self, Write};
use std::time::Duration;

use serde_json::json;
use termcolor::{ColorChoice, StandardStream, WriteColor};

use crate::color::scheme;
use crate::pipeline::RunReport;
use crate::step::{StepOutcome, StepStatus};

/// Text summary writer with color support.
pub struct SummaryWriter {
    stdout: StandardStream,
}

impl SummaryWriter {
    pub fn new(color_choice: ColorChoice) -> Self {
        Self {
            stdout: StandardStream::stdout(color_choice),
        }
    }

    /// Write the summary block for a completed run.
    pub fn write_report(&mut self, report: &RunReport) -> io::Result<()> {
        // Blank line separates the summary from step output
        writeln!(self.stdout)?;
        for outcome in &report.outcomes {
            self.write_outcome(outcome)?;
        }
        Ok(())
    }

    fn write_outcome(&mut self, outcome: &StepOutcome) -> io::Result<()> {
        self.stdout.set_color(&scheme::step_name())?;
        write!(self.stdout, "{}", outcome.name)?;
        self.stdout.reset()?;
        write!(self.stdout, ": ")?;

        let spec = match outcome.status {
            StepStatus::Passed => scheme::pass(),
            StepStatus::Failed { .. } => scheme::fail(),
            StepStatus::Skipped => scheme::skip(),
        };
        self.stdout.set_color(&spec)?;
        write!(self.stdout, "{}", outcome.status.label())?;
        self.stdout.reset()?;

        match outcome.status {
            StepStatus::Passed => {
                write!(self.stdout, " ({})", format_duration(outcome.duration))?;
            }
            StepStatus::Failed { code } => {
                write!(
                    self.stdout,
                    " (exit {code}, {})",
                    format_duration(outcome.duration)
                )?;
            }
            StepStatus::Skipped => {}
        }
        writeln!(self.stdout)?;

        if let Some(detail) = &outcome.detail {
            writeln!(self.stdout, "    {detail}")?;
        }

        Ok(())
    }
}

/// The report as a JSON document.
pub fn to_json(report: &RunReport) -> serde_json::Value {
    json!({
        "started_at": report.started_at.to_rfc3339(),
        "profile": report.profile,
        "steps": report.outcomes.iter().map(outcome_json).collect::<Vec<_>>(),
        "exit_code": report.exit_code,
    })
}

fn outcome_json(outcome: &StepOutcome) -> serde_json::Value {
    json!({
        "name": outcome.name,
        "status": outcome.status.key(),
        "exit_code": outcome.exit_code(),
        "duration_ms": outcome.duration.as_millis() as u64,
        "detail": outcome.detail,
    })
}

fn format_duration(d: Duration) -> String {
    if d.as_secs() >= 1 {
        format!("{:.2}s", d.as_secs_f64())
    } else {
        format!("{}ms", d.as_millis())
    }
}

#[cfg(test)]
#[path = "summary_tests.rs"]
mod tests;
