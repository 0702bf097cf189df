// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Shell completion script generation.
//!
//! Prints the script to stdout; installation is left to the user
//! (e.g. `stoke completions bash > /etc/bash_completion.d/stoke`).

use std::io;

use clap::CommandFactory;
use clap_complete::{Shell, generate};

use crate::cli::Cli;

/// Write the completion script for `shell`.
pub fn write_script(shell: Shell, writer: &mut dyn io::Write) {
    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();
    generate(shell, &mut cmd, bin_name, writer);
}

/// Print the completion script for `shell` to stdout.
pub fn print_script(shell: Shell) {
    write_script(shell, &mut io::stdout());
}

#[cfg(test)]
#[path = "completions_tests.rs"]
mod tests;
