//! Run configuration
//!
//! Optional `benchmark.json` in the working directory. Every key falls back
//! to the built-in default, so a missing file means the stock 100/100/40 run.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::fibonacci::MAX_FIBONACCI_INPUT;
use crate::error::{BenchError, Result};

pub const CONFIG_FILE: &str = "benchmark.json";

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct BenchmarkConfig {
    #[serde(rename = "ExternalLabel", deserialize_with = "validate_non_empty")]
    pub external_label: String,
    #[serde(rename = "ExternalCommand", deserialize_with = "validate_non_empty")]
    pub external_command: String,
    #[serde(rename = "ExternalArgs")]
    pub external_args: Vec<String>,
    #[serde(rename = "InProcessLabel", deserialize_with = "validate_non_empty")]
    pub in_process_label: String,
    #[serde(rename = "ExternalRuns")]
    pub external_runs: usize,
    #[serde(rename = "InProcessRuns")]
    pub in_process_runs: usize,
    #[serde(rename = "FibonacciInput", deserialize_with = "validate_fibonacci_input")]
    pub fibonacci_input: u32,
    #[serde(rename = "HistogramBins", deserialize_with = "validate_positive_usize")]
    pub histogram_bins: usize,
    #[serde(rename = "OutputPath", deserialize_with = "validate_non_empty")]
    pub output_path: String,
    #[serde(rename = "ShowChart")]
    pub show_chart: bool,
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        Self {
            external_label: "Volta".to_string(),
            external_command: "./fibonacci".to_string(),
            external_args: Vec::new(),
            in_process_label: "Rust".to_string(),
            external_runs: 100,
            in_process_runs: 100,
            fibonacci_input: 40,
            histogram_bins: 20,
            output_path: "fibonacci_benchmark.png".to_string(),
            show_chart: true,
        }
    }
}

/// Program and arguments for the external sample collector
#[derive(Debug, Clone, PartialEq)]
pub struct ExternalCommand {
    pub label: String,
    pub program: PathBuf,
    pub args: Vec<String>,
}

impl ExternalCommand {
    pub fn new(label: impl Into<String>, program: impl Into<PathBuf>) -> Self {
        Self {
            label: label.into(),
            program: program.into(),
            args: Vec::new(),
        }
    }
}

impl BenchmarkConfig {
    /// Load from `path`, or fall back to defaults when the file does not exist
    pub fn load(path: &Path) -> Result<Self> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::info!("{} not found, using default configuration", path.display());
                return Ok(Self::default());
            }
            Err(e) => return Err(e.into()),
        };

        let config = Self::from_json(&content).map_err(|e| BenchError::Config {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        log::debug!("loaded configuration from {}: {:?}", path.display(), config);
        Ok(config)
    }

    pub fn from_json(content: &str) -> serde_json::Result<Self> {
        serde_json::from_str(content)
    }

    pub fn external_command(&self) -> ExternalCommand {
        ExternalCommand {
            label: self.external_label.clone(),
            program: PathBuf::from(&self.external_command),
            args: self.external_args.clone(),
        }
    }
}

fn validate_non_empty<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = String::deserialize(deserializer)?;
    if value.trim().is_empty() {
        Err(serde::de::Error::custom("Value must not be empty"))
    } else {
        Ok(value)
    }
}

fn validate_fibonacci_input<'de, D>(deserializer: D) -> std::result::Result<u32, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = u32::deserialize(deserializer)?;
    if value == 0 {
        Err(serde::de::Error::custom("Value must be positive"))
    } else if value > MAX_FIBONACCI_INPUT {
        Err(serde::de::Error::custom(format!(
            "Value must be at most {} (larger results overflow u64)",
            MAX_FIBONACCI_INPUT
        )))
    } else {
        Ok(value)
    }
}

fn validate_positive_usize<'de, D>(deserializer: D) -> std::result::Result<usize, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = usize::deserialize(deserializer)?;
    if value > 0 {
        Ok(value)
    } else {
        Err(serde::de::Error::custom("Value must be positive"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_stock_run() {
        let config = BenchmarkConfig::default();
        assert_eq!(config.external_runs, 100);
        assert_eq!(config.in_process_runs, 100);
        assert_eq!(config.fibonacci_input, 40);
        assert_eq!(config.histogram_bins, 20);
        assert_eq!(config.output_path, "fibonacci_benchmark.png");
        assert_eq!(config.external_command().program, PathBuf::from("./fibonacci"));
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let config = BenchmarkConfig::from_json(
            r#"{ "ExternalCommand": "/opt/volta/fib", "ExternalArgs": ["40"], "ExternalRuns": 5 }"#,
        )
        .unwrap();
        assert_eq!(config.external_runs, 5);
        assert_eq!(config.in_process_runs, 100);
        let command = config.external_command();
        assert_eq!(command.program, PathBuf::from("/opt/volta/fib"));
        assert_eq!(command.args, vec!["40".to_string()]);
        assert_eq!(command.label, "Volta");
    }

    #[test]
    fn zero_runs_are_allowed() {
        let config = BenchmarkConfig::from_json(r#"{ "InProcessRuns": 0 }"#).unwrap();
        assert_eq!(config.in_process_runs, 0);
    }

    #[test]
    fn rejects_zero_fibonacci_input() {
        let err = BenchmarkConfig::from_json(r#"{ "FibonacciInput": 0 }"#).unwrap_err();
        assert!(err.to_string().contains("Value must be positive"));
    }

    #[test]
    fn caps_fibonacci_input_at_u64_limit() {
        let config = BenchmarkConfig::from_json(r#"{ "FibonacciInput": 93 }"#).unwrap();
        assert_eq!(config.fibonacci_input, 93);
        let err = BenchmarkConfig::from_json(r#"{ "FibonacciInput": 94 }"#).unwrap_err();
        assert!(err.to_string().contains("at most 93"));
    }

    #[test]
    fn rejects_empty_command() {
        assert!(BenchmarkConfig::from_json(r#"{ "ExternalCommand": "  " }"#).is_err());
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = BenchmarkConfig::load(&dir.path().join(CONFIG_FILE)).unwrap();
        assert_eq!(config, BenchmarkConfig::default());
    }

    #[test]
    fn malformed_file_is_a_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            BenchmarkConfig::load(&path),
            Err(BenchError::Config { .. })
        ));
    }
}
