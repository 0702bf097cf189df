// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Stoke CLI entry point.

use clap::{CommandFactory, Parser};
use tracing_subscriber::{EnvFilter, fmt};

use stoke::cli::{Cli, Command};
use stoke::error::ExitCode;

mod cmd_run;

fn init_logging() {
    let filter =
        EnvFilter::try_from_env(stoke::env::log_var()).unwrap_or_else(|_| EnvFilter::new("off"));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    init_logging();

    let exit_code = match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("stoke: {}", e);
            let code = match e.downcast_ref::<stoke::Error>() {
                Some(err) => ExitCode::from(err),
                None => ExitCode::InternalError,
            };
            code as i32
        }
    };

    std::process::exit(exit_code);
}

fn run() -> anyhow::Result<i32> {
    let cli = Cli::parse();

    match &cli.command {
        None => {
            // Show help for bare invocation
            Cli::command().print_help()?;
            println!();
            Ok(ExitCode::Success as i32)
        }
        Some(Command::Run(args)) => cmd_run::run(&cli, args),
        Some(Command::Init(args)) => {
            let code = stoke::cmd_init::run(args)?;
            Ok(code as i32)
        }
        Some(Command::Completions(args)) => {
            stoke::completions::print_script(args.shell);
            Ok(ExitCode::Success as i32)
        }
    }
}
