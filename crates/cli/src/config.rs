//! Configuration parsing and discovery.
//!
//! Handles stoke.toml parsing with version validation and unknown key
//! warnings. A missing file or missing table falls back to the built-in
//! cargo commands.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Deserializer};

use crate::env::names;
use crate::error::{Error, Result};

/// Config file name looked up from the working directory upward.
pub const CONFIG_FILE_NAME: &str = "stoke.toml";

/// The only config version this build understands.
const SUPPORTED_VERSION: i64 = 1;

/// Minimal parse used for version checking and unknown-key warnings.
#[derive(Deserialize)]
struct RawConfig {
    version: Option<i64>,

    #[serde(default)]
    #[allow(dead_code)]
    steps: Option<toml::Value>,

    #[serde(default)]
    #[allow(dead_code)]
    env: Option<toml::Value>,

    #[serde(flatten)]
    unknown: BTreeMap<String, toml::Value>,
}

/// Full configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Config file version (must be 1).
    pub version: i64,

    /// Step command overrides.
    #[serde(default)]
    pub steps: StepsConfig,

    /// Extra variables injected into every step environment.
    #[serde(default)]
    pub env: BTreeMap<String, String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: SUPPORTED_VERSION,
            steps: StepsConfig::default(),
            env: BTreeMap::new(),
        }
    }
}

/// Per-step command configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StepsConfig {
    /// Build step (fatal on failure).
    #[serde(default)]
    pub build: StepConfig,

    /// Test step (failure tolerated).
    #[serde(default)]
    pub test: StepConfig,

    /// Benchmark step (release runs only, fatal on failure).
    #[serde(default)]
    pub bench: StepConfig,
}

impl StepsConfig {
    /// Build command, falling back to `cargo build --examples`.
    pub fn build_command(&self) -> Vec<String> {
        self.build
            .command
            .clone()
            .unwrap_or_else(default_build_command)
    }

    /// Test command, falling back to `cargo test`.
    pub fn test_command(&self) -> Vec<String> {
        self.test
            .command
            .clone()
            .unwrap_or_else(default_test_command)
    }

    /// Benchmark command, falling back to `cargo bench`.
    pub fn bench_command(&self) -> Vec<String> {
        self.bench
            .command
            .clone()
            .unwrap_or_else(default_bench_command)
    }
}

/// Configuration for a single step.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StepConfig {
    /// Program and leading arguments. Absent means the built-in default.
    #[serde(default)]
    pub command: Option<Vec<String>>,

    /// Optional time limit (e.g. "30s", "500ms", "5m").
    #[serde(default, deserialize_with = "deserialize_duration_option")]
    pub timeout: Option<Duration>,
}

pub(crate) fn default_build_command() -> Vec<String> {
    vec!["cargo".to_string(), "build".to_string(), "--examples".to_string()]
}

pub(crate) fn default_test_command() -> Vec<String> {
    vec!["cargo".to_string(), "test".to_string()]
}

pub(crate) fn default_bench_command() -> Vec<String> {
    vec!["cargo".to_string(), "bench".to_string()]
}

/// Load configuration from a file.
pub fn load(path: &Path) -> Result<Config> {
    let text = std::fs::read_to_string(path).map_err(|e| Error::Config {
        message: format!("cannot read config: {e}"),
        path: Some(path.to_path_buf()),
    })?;
    parse(&text, Some(path))
}

/// Parse configuration text.
///
/// Validates the version, warns about unknown top-level keys, and rejects
/// explicitly empty step commands.
pub fn parse(text: &str, path: Option<&Path>) -> Result<Config> {
    let config_error = |message: String| Error::Config {
        message,
        path: path.map(Path::to_path_buf),
    };

    let raw: RawConfig = toml::from_str(text).map_err(|e| config_error(e.to_string()))?;

    match raw.version {
        Some(SUPPORTED_VERSION) => {}
        Some(v) => {
            return Err(config_error(format!(
                "unsupported config version {v} (expected {SUPPORTED_VERSION})"
            )));
        }
        None => return Err(config_error("missing `version` key".to_string())),
    }

    for key in raw.unknown.keys() {
        tracing::warn!("ignoring unknown config key `{key}`");
    }

    let config: Config = toml::from_str(text).map_err(|e| config_error(e.to_string()))?;

    for (name, step) in [
        ("build", &config.steps.build),
        ("test", &config.steps.test),
        ("bench", &config.steps.bench),
    ] {
        if let Some(command) = &step.command
            && command.is_empty()
        {
            return Err(config_error(format!(
                "steps.{name}.command must not be empty"
            )));
        }
    }

    if config.env.contains_key(names::RUST_BACKTRACE) {
        tracing::warn!(
            "ignoring `env.{}`: the diagnostics variable is fixed",
            names::RUST_BACKTRACE
        );
    }

    Ok(config)
}

/// Find the nearest config file, walking up from `start`.
pub fn find_config(start: &Path) -> Option<PathBuf> {
    for dir in start.ancestors() {
        let candidate = dir.join(CONFIG_FILE_NAME);
        if candidate.is_file() {
            tracing::debug!("found config at {}", candidate.display());
            return Some(candidate);
        }
    }
    None
}

/// Parse a duration string into a Duration.
///
/// Supports:
/// - "500ms" → 500 milliseconds
/// - "30s" → 30 seconds (fractional allowed: "1.5s")
/// - "5m" → 5 minutes
/// - "300" → bare seconds
pub fn parse_duration(s: &str) -> std::result::Result<Duration, String> {
    let s = s.trim();

    if s.is_empty() {
        return Err("empty duration".to_string());
    }

    // "ms" ends in 's', so it must be checked before the seconds suffix
    if let Some(n) = s.strip_suffix("ms") {
        let n: u64 = n
            .trim()
            .parse()
            .map_err(|_| format!("invalid duration: {s}"))?;
        return Ok(Duration::from_millis(n));
    }

    if let Some(n) = s.strip_suffix('s') {
        let n: f64 = n
            .trim()
            .parse()
            .map_err(|_| format!("invalid duration: {s}"))?;
        if !n.is_finite() || n < 0.0 {
            return Err(format!("invalid duration: {s}"));
        }
        return Ok(Duration::from_secs_f64(n));
    }

    if let Some(n) = s.strip_suffix('m') {
        let n: u64 = n
            .trim()
            .parse()
            .map_err(|_| format!("invalid duration: {s}"))?;
        return Ok(Duration::from_secs(n * 60));
    }

    // Bare number: whole seconds
    if let Ok(n) = s.parse::<u64>() {
        return Ok(Duration::from_secs(n));
    }

    Err(format!("invalid duration format: {s} (use 30s, 500ms, or 5m)"))
}

/// Deserialize an optional duration string.
fn deserialize_duration_option<'de, D>(deserializer: D) -> std::result::Result<Option<Duration>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt: Option<String> = Option::deserialize(deserializer)?;
    match opt {
        None => Ok(None),
        Some(s) => parse_duration(&s)
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
