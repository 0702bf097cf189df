// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Implementation of the `stoke init` command.

use std::path::Path;

use anyhow::Result;

use crate::cli::InitArgs;
use crate::config::CONFIG_FILE_NAME;
use crate::error::{Error, ExitCode};

/// Default configuration written by `stoke init`.
const DEFAULT_TEMPLATE: &str = r#"version = 1

# Steps run in order: build (fatal on failure), test (failure tolerated),
# bench (release runs only, fatal on failure). The profile argument given
# to `stoke run` is appended to the build and test commands.

[steps.build]
command = ["cargo", "build", "--examples"]

[steps.test]
command = ["cargo", "test"]

[steps.bench]
command = ["cargo", "bench"]

# Extra variables for every step. RUST_BACKTRACE=1 is always set.
[env]
"#;

/// Run the init command.
pub fn run(args: &InitArgs) -> Result<ExitCode> {
    let cwd = std::env::current_dir()?;
    write_config(&cwd, args.force)?;
    println!("Wrote {}", CONFIG_FILE_NAME);
    Ok(ExitCode::Success)
}

/// Write the default config into `root`.
fn write_config(root: &Path, force: bool) -> crate::error::Result<()> {
    let path = root.join(CONFIG_FILE_NAME);

    if path.exists() && !force {
        return Err(Error::Config {
            message: format!("{CONFIG_FILE_NAME} already exists (use --force to overwrite)"),
            path: Some(path),
        });
    }

    std::fs::write(&path, DEFAULT_TEMPLATE).map_err(|e| Error::Io { path, source: e })?;
    Ok(())
}

#[cfg(test)]
#[path = "cmd_init_tests.rs"]
mod tests;
