// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use super::*;

fn script_for(shell: Shell) -> String {
    let mut buf = Vec::new();
    write_script(shell, &mut buf);
    String::from_utf8(buf).unwrap()
}

#[test]
fn bash_script_mentions_the_binary() {
    let script = script_for(Shell::Bash);
    assert!(script.contains("stoke"));
}

#[test]
fn zsh_script_is_generated() {
    let script = script_for(Shell::Zsh);
    assert!(script.contains("stoke"));
}

#[test]
fn fish_script_is_generated() {
    let script = script_for(Shell::Fish);
    assert!(script.contains("stoke"));
}
