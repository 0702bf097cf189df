// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Step model and execution.
//!
//! A step is one external command with a failure policy. Steps run with
//! inherited stdio so the tool's own output streams straight to the
//! caller; stoke only interprets the exit status.

use std::io::{self, ErrorKind};
use std::process::{Child, Command, ExitStatus};
use std::time::{Duration, Instant};

use crate::error::{Error, Result};

/// Exit code reported for a child that died without one (signal, timeout).
pub const FALLBACK_EXIT_CODE: i32 = 1;

/// How a step's non-zero exit status affects the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePolicy {
    /// The run stops immediately and adopts the step's exit status.
    FailFast,
    /// The failure is recorded but never becomes the run's own failure.
    Suppress,
}

/// A single pipeline step.
#[derive(Debug, Clone)]
pub struct Step {
    /// Step name ("build", "test", "bench").
    pub name: &'static str,
    /// Program and arguments, already fully resolved.
    pub command: Vec<String>,
    /// Failure policy.
    pub policy: FailurePolicy,
    /// Optional time limit; expiry counts as the step failing.
    pub timeout: Option<Duration>,
    /// Variables injected into the child environment.
    pub env: Vec<(String, String)>,
}

/// Result of one step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepStatus {
    Passed,
    Failed { code: i32 },
    Skipped,
}

impl StepStatus {
    /// Display label for summary lines.
    pub fn label(&self) -> &'static str {
        match self {
            StepStatus::Passed => "PASS",
            StepStatus::Failed { .. } => "FAIL",
            StepStatus::Skipped => "SKIP",
        }
    }

    /// Stable key for machine-readable output.
    pub fn key(&self) -> &'static str {
        match self {
            StepStatus::Passed => "passed",
            StepStatus::Failed { .. } => "failed",
            StepStatus::Skipped => "skipped",
        }
    }
}

/// Outcome of a step, as recorded in the run report.
#[derive(Debug, Clone)]
pub struct StepOutcome {
    pub name: &'static str,
    pub status: StepStatus,
    /// Extra context: skip reason, timeout, spawn failure.
    pub detail: Option<String>,
    pub duration: Duration,
}

impl StepOutcome {
    /// Outcome for a step that never ran.
    pub fn skipped(name: &'static str, reason: &str) -> Self {
        Self {
            name,
            status: StepStatus::Skipped,
            detail: Some(reason.to_string()),
            duration: Duration::ZERO,
        }
    }

    /// The exit code carried by a failed outcome.
    pub fn exit_code(&self) -> Option<i32> {
        match self.status {
            StepStatus::Failed { code } => Some(code),
            _ => None,
        }
    }
}

impl Step {
    /// The command as a display string.
    pub fn command_line(&self) -> String {
        self.command.join(" ")
    }

    /// Run the step to completion and record its outcome.
    ///
    /// The child inherits stdin/stdout/stderr. A non-zero exit becomes a
    /// `Failed` outcome; the caller decides what that means via the
    /// step's policy. Spawn and wait errors are tool-level errors.
    pub fn execute(&self) -> Result<StepOutcome> {
        let start = Instant::now();

        let Some((program, args)) = self.command.split_first() else {
            return Err(Error::Internal(format!(
                "{} step has an empty command",
                self.name
            )));
        };

        let mut cmd = Command::new(program);
        cmd.args(args);
        for (key, value) in &self.env {
            cmd.env(key, value);
        }

        let child = cmd.spawn().map_err(|e| Error::Spawn {
            step: self.name,
            source: e,
        })?;

        match wait_with_timeout(child, self.timeout) {
            Ok(status) if status.success() => Ok(StepOutcome {
                name: self.name,
                status: StepStatus::Passed,
                detail: None,
                duration: start.elapsed(),
            }),
            Ok(status) => {
                let (code, detail) = match status.code() {
                    Some(code) => (code, None),
                    None => (FALLBACK_EXIT_CODE, Some("terminated by signal".to_string())),
                };
                Ok(StepOutcome {
                    name: self.name,
                    status: StepStatus::Failed { code },
                    detail,
                    duration: start.elapsed(),
                })
            }
            Err(e) if e.kind() == ErrorKind::TimedOut => Ok(StepOutcome {
                name: self.name,
                status: StepStatus::Failed {
                    code: FALLBACK_EXIT_CODE,
                },
                detail: Some(e.to_string()),
                duration: start.elapsed(),
            }),
            Err(e) => Err(Error::Spawn {
                step: self.name,
                source: e,
            }),
        }
    }
}

/// Wait for a child with an optional timeout.
///
/// If timeout is None, waits indefinitely.
/// If timeout expires, kills the process and returns a TimedOut error.
pub fn wait_with_timeout(mut child: Child, timeout: Option<Duration>) -> io::Result<ExitStatus> {
    let Some(limit) = timeout else {
        return child.wait();
    };

    let start = Instant::now();
    let poll_interval = Duration::from_millis(50);

    loop {
        match child.try_wait() {
            Ok(Some(status)) => return Ok(status),
            Ok(None) => {
                if start.elapsed() > limit {
                    child.kill().ok();
                    child.wait().ok();
                    return Err(io::Error::new(
                        ErrorKind::TimedOut,
                        format!("timed out after {:?}", limit),
                    ));
                }
                std::thread::sleep(poll_interval);
            }
            Err(e) => return Err(e),
        }
    }
}

#[cfg(test)]
#[path = "step_tests.rs"]
mod tests;
