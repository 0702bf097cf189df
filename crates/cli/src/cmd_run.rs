// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Run command implementation.

use termcolor::ColorChoice;

use stoke::cli::{Cli, OutputFormat, RunArgs};
use stoke::color::resolve_color;
use stoke::config::{self, Config};
use stoke::env;
use stoke::error::ExitCode;
use stoke::pipeline;
use stoke::summary::{self, SummaryWriter};
use stoke::verbose::VerboseLogger;

/// Run the pipeline and return the process exit code.
pub fn run(cli: &Cli, args: &RunArgs) -> anyhow::Result<i32> {
    // Validate flag combinations
    if args.color && args.no_color {
        eprintln!("--color and --no-color cannot be used together");
        return Ok(ExitCode::ConfigError as i32);
    }

    let config = resolve_config(cli)?;
    let verbose = VerboseLogger::new(args.verbose || env::debug_enabled());

    let plan = pipeline::plan(args.profile.as_deref(), &config);
    tracing::debug!(
        "planned steps: {:?} (gated: {:?})",
        plan.steps.iter().map(|s| s.name).collect::<Vec<_>>(),
        plan.gated
    );

    let report = pipeline::execute(&plan, &verbose)?;

    match args.output {
        OutputFormat::Text => {
            let choice = if args.no_color {
                ColorChoice::Never
            } else if args.color {
                ColorChoice::Always
            } else {
                resolve_color()
            };
            let mut writer = SummaryWriter::new(choice);
            writer.write_report(&report)?;
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&summary::to_json(&report))?);
        }
    }

    Ok(report.exit_code)
}

/// Load config from `--config`, the nearest stoke.toml, or defaults.
fn resolve_config(cli: &Cli) -> anyhow::Result<Config> {
    if let Some(path) = &cli.config {
        tracing::debug!("loading config from {}", path.display());
        return Ok(config::load(path)?);
    }

    let cwd = std::env::current_dir()?;
    match config::find_config(&cwd) {
        Some(path) => {
            tracing::debug!("loading config from {}", path.display());
            Ok(config::load(&path)?)
        }
        None => {
            tracing::debug!("no config found, using defaults");
            Ok(Config::default())
        }
    }
}
