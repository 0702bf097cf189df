// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Pipeline planning and sequential execution.
//!
//! The plan is fixed: build (fatal), test (tolerated), bench (release
//! runs only, fatal). The profile argument is appended verbatim to the
//! build and test commands; the bench command takes no extra arguments.
//! Steps run strictly one after another.

use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::config::Config;
use crate::env;
use crate::error::Result;
use crate::step::{FALLBACK_EXIT_CODE, FailurePolicy, Step, StepOutcome, StepStatus};
use crate::verbose::VerboseLogger;

/// Profile literal that unlocks the benchmark step.
pub const RELEASE_FLAG: &str = "--release";

/// Canonical step order.
pub const STEP_NAMES: &[&str] = &["build", "test", "bench"];

/// A resolved sequence of steps for one run.
#[derive(Debug)]
pub struct Plan {
    /// The profile argument, as given.
    pub profile: Option<String>,
    /// Steps to run, in order.
    pub steps: Vec<Step>,
    /// Steps excluded by the profile gate, reported as skipped.
    pub gated: Vec<&'static str>,
}

/// Report for a completed (or aborted) run.
#[derive(Debug)]
pub struct RunReport {
    pub profile: Option<String>,
    pub started_at: DateTime<Utc>,
    pub outcomes: Vec<StepOutcome>,
    /// The run's own exit status.
    pub exit_code: i32,
}

/// Build the step sequence for the given profile.
pub fn plan(profile: Option<&str>, config: &Config) -> Plan {
    let step_env = step_environment(config);
    let mut steps = Vec::with_capacity(STEP_NAMES.len());
    let mut gated = Vec::new();

    steps.push(Step {
        name: "build",
        command: with_profile(config.steps.build_command(), profile),
        policy: FailurePolicy::FailFast,
        timeout: config.steps.build.timeout,
        env: step_env.clone(),
    });

    steps.push(Step {
        name: "test",
        command: with_profile(config.steps.test_command(), profile),
        policy: FailurePolicy::Suppress,
        timeout: config.steps.test.timeout,
        env: step_env.clone(),
    });

    if profile == Some(RELEASE_FLAG) {
        steps.push(Step {
            name: "bench",
            command: config.steps.bench_command(),
            policy: FailurePolicy::FailFast,
            timeout: config.steps.bench.timeout,
            env: step_env,
        });
    } else {
        tracing::debug!("bench step gated off (profile is not {RELEASE_FLAG})");
        gated.push("bench");
    }

    Plan {
        profile: profile.map(str::to_string),
        steps,
        gated,
    }
}

/// Append the profile argument unchanged. An empty profile appends
/// nothing, matching an unquoted empty shell parameter.
fn with_profile(mut command: Vec<String>, profile: Option<&str>) -> Vec<String> {
    if let Some(p) = profile
        && !p.is_empty()
    {
        command.push(p.to_string());
    }
    command
}

/// Environment injected into every step: the fixed diagnostics variable
/// first, then any configured extras.
fn step_environment(config: &Config) -> Vec<(String, String)> {
    let mut vars = Vec::with_capacity(config.env.len() + 1);
    vars.push((
        env::names::RUST_BACKTRACE.to_string(),
        env::BACKTRACE_VALUE.to_string(),
    ));
    for (key, value) in &config.env {
        if key == env::names::RUST_BACKTRACE {
            continue;
        }
        vars.push((key.clone(), value.clone()));
    }
    vars
}

/// Run the plan to completion.
///
/// A fail-fast step's non-zero exit stops execution: the remaining steps
/// are recorded as skipped and the run adopts the step's exit status. A
/// suppressed step's failure (including a failure to launch it at all)
/// is recorded and execution continues.
pub fn execute(plan: &Plan, verbose: &VerboseLogger) -> Result<RunReport> {
    let started_at = Utc::now();
    let mut outcomes = Vec::with_capacity(plan.steps.len() + plan.gated.len());
    let mut exit_code = 0;
    let mut aborted = false;

    for step in &plan.steps {
        if aborted {
            outcomes.push(StepOutcome::skipped(step.name, "previous step failed"));
            continue;
        }

        verbose.command(step.name, &step.command_line());

        let outcome = match step.execute() {
            Ok(outcome) => outcome,
            Err(err) if step.policy == FailurePolicy::Suppress => {
                tracing::warn!("{} step could not run: {err}", step.name);
                StepOutcome {
                    name: step.name,
                    status: StepStatus::Failed {
                        code: FALLBACK_EXIT_CODE,
                    },
                    detail: Some(err.to_string()),
                    duration: Duration::ZERO,
                }
            }
            Err(err) => return Err(err),
        };

        if let StepStatus::Failed { code } = outcome.status {
            match step.policy {
                FailurePolicy::FailFast => {
                    exit_code = code;
                    aborted = true;
                }
                FailurePolicy::Suppress => {
                    tracing::warn!("{} step failed (exit {code}); continuing", step.name);
                }
            }
        }

        verbose.log(&format!(
            "{}: {} in {:.2}s",
            outcome.name,
            outcome.status.label(),
            outcome.duration.as_secs_f64()
        ));
        outcomes.push(outcome);
    }

    for name in plan.gated.iter().copied() {
        outcomes.push(StepOutcome::skipped(name, "requires --release"));
    }

    Ok(RunReport {
        profile: plan.profile.clone(),
        started_at,
        outcomes,
        exit_code,
    })
}

#[cfg(test)]
#[path = "pipeline_tests.rs"]
mod tests;
