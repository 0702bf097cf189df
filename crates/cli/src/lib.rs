pub mod cli;
pub mod cmd_init;
pub mod color;
pub mod completions;
pub mod config;
pub mod env;
pub mod error;
pub mod pipeline;
pub mod step;
pub mod summary;
pub mod verbose;

pub use cli::{Cli, Command, CompletionsArgs, InitArgs, OutputFormat, RunArgs};
pub use config::Config;
pub use error::{Error, ExitCode, Result};
pub use pipeline::{Plan, RELEASE_FLAG, RunReport};
pub use step::{FailurePolicy, Step, StepOutcome, StepStatus};
pub use verbose::VerboseLogger;
