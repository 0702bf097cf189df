// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Environment variable names and probes.

/// Environment variable names used by stoke.
pub mod names {
    /// Injected into every step so child tools emit full backtraces.
    pub const RUST_BACKTRACE: &str = "RUST_BACKTRACE";
    /// Log filter for the tracing subscriber.
    pub const STOKE_LOG: &str = "STOKE_LOG";
    /// Enables `[verbose]` output without the `--verbose` flag.
    pub const STOKE_DEBUG: &str = "STOKE_DEBUG";
    /// Config file override, read by the global `--config` flag.
    pub const STOKE_CONFIG: &str = "STOKE_CONFIG";
    /// Disables color output when set.
    pub const NO_COLOR: &str = "NO_COLOR";
    /// Forces color output when set.
    pub const COLOR: &str = "COLOR";
    /// Set by CI systems; disables color auto-detection.
    pub const CI: &str = "CI";
}

/// Fixed value assigned to [`names::RUST_BACKTRACE`] in every step
/// environment. Not caller-controlled.
pub const BACKTRACE_VALUE: &str = "1";

/// Name of the log filter variable.
pub fn log_var() -> &'static str {
    names::STOKE_LOG
}

/// Check if verbose output is forced via `STOKE_DEBUG`.
pub fn debug_enabled() -> bool {
    std::env::var(names::STOKE_DEBUG).is_ok_and(|v| v == "1" || v.eq_ignore_ascii_case("true"))
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
