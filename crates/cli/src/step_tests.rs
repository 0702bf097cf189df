// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use super::*;

fn sh_step(script: &str) -> Step {
    Step {
        name: "build",
        command: vec!["sh".to_string(), "-c".to_string(), script.to_string()],
        policy: FailurePolicy::FailFast,
        timeout: None,
        env: Vec::new(),
    }
}

#[test]
fn status_labels_match_summary_output() {
    assert_eq!(StepStatus::Passed.label(), "PASS");
    assert_eq!(StepStatus::Failed { code: 3 }.label(), "FAIL");
    assert_eq!(StepStatus::Skipped.label(), "SKIP");
}

#[test]
fn status_keys_are_lowercase() {
    assert_eq!(StepStatus::Passed.key(), "passed");
    assert_eq!(StepStatus::Failed { code: 3 }.key(), "failed");
    assert_eq!(StepStatus::Skipped.key(), "skipped");
}

#[test]
fn skipped_outcome_carries_the_reason() {
    let outcome = StepOutcome::skipped("bench", "requires --release");
    assert_eq!(outcome.status, StepStatus::Skipped);
    assert_eq!(outcome.detail.as_deref(), Some("requires --release"));
    assert_eq!(outcome.duration, Duration::ZERO);
}

#[test]
fn exit_code_is_only_set_for_failures() {
    let outcome = StepOutcome::skipped("bench", "requires --release");
    assert_eq!(outcome.exit_code(), None);

    let failed = StepOutcome {
        name: "build",
        status: StepStatus::Failed { code: 42 },
        detail: None,
        duration: Duration::ZERO,
    };
    assert_eq!(failed.exit_code(), Some(42));
}

#[test]
fn command_line_joins_program_and_args() {
    let step = sh_step("exit 0");
    assert_eq!(step.command_line(), "sh -c exit 0");
}

#[test]
fn successful_command_passes() {
    let outcome = sh_step("exit 0").execute().unwrap();
    assert_eq!(outcome.status, StepStatus::Passed);
    assert!(outcome.detail.is_none());
}

#[test]
fn failing_command_reports_its_exit_code() {
    let outcome = sh_step("exit 7").execute().unwrap();
    assert_eq!(outcome.status, StepStatus::Failed { code: 7 });
}

#[test]
fn step_environment_reaches_the_child() {
    let mut step = sh_step("test \"$STOKE_STEP_PROBE\" = probed");
    step.env
        .push(("STOKE_STEP_PROBE".to_string(), "probed".to_string()));
    let outcome = step.execute().unwrap();
    assert_eq!(outcome.status, StepStatus::Passed);
}

#[test]
fn missing_program_is_a_spawn_error() {
    let step = Step {
        name: "build",
        command: vec!["stoke-no-such-program-a3f1".to_string()],
        policy: FailurePolicy::FailFast,
        timeout: None,
        env: Vec::new(),
    };
    let err = step.execute().unwrap_err();
    assert!(matches!(err, crate::error::Error::Spawn { step: "build", .. }));
}

#[test]
fn empty_command_is_an_internal_error() {
    let step = Step {
        name: "test",
        command: Vec::new(),
        policy: FailurePolicy::Suppress,
        timeout: None,
        env: Vec::new(),
    };
    let err = step.execute().unwrap_err();
    assert!(matches!(err, crate::error::Error::Internal(_)));
}

#[test]
fn timeout_kills_the_child_and_counts_as_failure() {
    let mut step = sh_step("sleep 5");
    step.timeout = Some(Duration::from_millis(100));
    let outcome = step.execute().unwrap();
    assert_eq!(
        outcome.status,
        StepStatus::Failed {
            code: FALLBACK_EXIT_CODE
        }
    );
    assert!(outcome.detail.unwrap_or_default().contains("timed out"));
}
