//! CLI configuration loading
//!
//! Loads configuration from an optional TOML file layered under environment
//! variables prefixed with `PRICER__`, e.g. `PRICER__FOURIER__NODES=20000`.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use config::{Config, Environment, File, FileFormat, Source};
use pricer_core::math::QuadratureRule;
use pricer_models::fourier::FourierConfig;
use pricer_models::models::ModelKind;
use serde::Deserialize;

use crate::{CliError, Result};

const ENV_PREFIX: &str = "PRICER";
const ENV_SEPARATOR: &str = "__";

/// CLI configuration
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CliConfig {
    /// General settings
    #[serde(default)]
    pub general: GeneralConfig,

    /// Fourier inversion overrides
    #[serde(default)]
    pub fourier: FourierOverrides,

    /// Output settings
    #[serde(default)]
    pub output: OutputConfig,
}

impl CliConfig {
    /// Load configuration from `path` (if it exists) and the environment.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let name = path
            .to_str()
            .ok_or_else(|| CliError::InvalidArgument(format!("non UTF-8 path: {:?}", path)))?;
        Self::from_sources(File::new(name, FileFormat::Toml).required(false), environment())
    }

    /// Parse configuration from TOML text, ignoring the environment.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Self::from_sources(
            File::from_str(content, FileFormat::Toml),
            environment().source(Some(config::Map::new())),
        )
    }

    fn from_sources<S>(file: S, env: Environment) -> Result<Self>
    where
        S: Source + Send + Sync + 'static,
    {
        let config = Config::builder().add_source(file).add_source(env).build()?;
        Ok(config.try_deserialize()?)
    }
}

fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .separator(ENV_SEPARATOR)
        .try_parsing(true)
}

/// General CLI settings
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GeneralConfig {
    /// Log level used when `RUST_LOG` is unset
    #[serde(default)]
    pub log_level: LogLevel,

    /// Number of threads for parallel pricing
    #[serde(default = "default_threads")]
    pub threads: usize,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: LogLevel::default(),
            threads: default_threads(),
        }
    }
}

fn default_threads() -> usize {
    num_cpus::get()
}

/// Log levels supported by the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Convert log level to tracing filter string
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl FromStr for LogLevel {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(CliError::InvalidArgument(format!(
                "invalid log level: {}. Must be one of: trace, debug, info, warn, error",
                s
            ))),
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_filter_str())
    }
}

/// Partial Fourier settings.
///
/// Unset fields keep the model-tuned value from [`FourierConfig::for_model`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
pub struct FourierOverrides {
    /// Damping factor α
    #[serde(default)]
    pub alpha: Option<f64>,
    /// Upper integration bound
    #[serde(default)]
    pub truncation: Option<f64>,
    /// Quadrature node count
    #[serde(default)]
    pub nodes: Option<usize>,
    /// Quadrature rule
    #[serde(default)]
    pub rule: Option<QuadratureRule>,
    /// Black-Scholes control variate
    #[serde(default)]
    pub control_variate: Option<bool>,
}

impl FourierOverrides {
    /// Settings for `kind` with the overrides applied.
    pub fn resolve(&self, kind: ModelKind) -> FourierConfig {
        let mut config = FourierConfig::for_model(kind);
        if let Some(alpha) = self.alpha {
            config = config.with_alpha(alpha);
        }
        if let Some(truncation) = self.truncation {
            config = config.with_truncation(truncation);
        }
        if let Some(nodes) = self.nodes {
            config = config.with_nodes(nodes);
        }
        if let Some(rule) = self.rule {
            config = config.with_rule(rule);
        }
        if let Some(control_variate) = self.control_variate {
            config = config.with_control_variate(control_variate);
        }
        config
    }
}

/// Output settings
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct OutputConfig {
    /// Default output format
    #[serde(default)]
    pub format: OutputFormat,

    /// Decimal places for prices
    #[serde(default = "default_precision")]
    pub precision: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            precision: default_precision(),
        }
    }
}

fn default_precision() -> usize {
    6
}

/// Result rendering format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Aligned text table
    #[default]
    Table,
    /// Pretty-printed JSON array
    Json,
    /// Comma-separated values with a header row
    Csv,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Csv => write!(f, "csv"),
        }
    }
}
