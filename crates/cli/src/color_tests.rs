// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use termcolor::Color;

use super::*;

#[test]
fn step_name_is_bold_without_color() {
    let spec = scheme::step_name();
    assert!(spec.bold());
    assert_eq!(spec.fg(), None);
}

#[test]
fn pass_is_bold_green() {
    let spec = scheme::pass();
    assert!(spec.bold());
    assert_eq!(spec.fg(), Some(&Color::Green));
}

#[test]
fn fail_is_bold_red() {
    let spec = scheme::fail();
    assert!(spec.bold());
    assert_eq!(spec.fg(), Some(&Color::Red));
}

#[test]
fn skip_is_bold_yellow() {
    let spec = scheme::skip();
    assert!(spec.bold());
    assert_eq!(spec.fg(), Some(&Color::Yellow));
}
