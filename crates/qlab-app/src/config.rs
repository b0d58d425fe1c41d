//! Application configuration.
//!
//! Supports loading configuration from:
//! 1. A YAML file
//! 2. Environment variables
//!
//! Precedence (highest to lowest): environment, file, defaults.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

use qlab_adapter_sim::ENGINE_MAX_QUBITS;
use qlab_hal::BackendConfig;

use crate::error::{AppError, AppResult};

/// Complete application configuration.
#[derive(Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Backend identifier resolved through the registry.
    #[serde(default = "default_backend")]
    pub default_backend: String,

    /// Shots used when a run does not specify any.
    #[serde(default = "default_shots")]
    pub default_shots: u32,

    /// Largest register the validator accepts.
    #[serde(default = "default_max_qubits")]
    pub max_qubits: u32,

    /// Largest register for which amplitudes may be requested.
    #[serde(default = "default_statevector_max_qubits")]
    pub statevector_max_qubits: u32,

    /// Hardware provider token (set via IBM_QUANTUM_TOKEN).
    #[serde(default, skip_serializing)]
    pub ibm_token: Option<String>,

    /// Fixed sampling seed for reproducible runs.
    #[serde(default)]
    pub seed: Option<u64>,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("default_backend", &self.default_backend)
            .field("default_shots", &self.default_shots)
            .field("max_qubits", &self.max_qubits)
            .field("statevector_max_qubits", &self.statevector_max_qubits)
            .field("ibm_token", &self.ibm_token.as_ref().map(|_| "[REDACTED]"))
            .field("seed", &self.seed)
            .field("logging", &self.logging)
            .finish()
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Filter directive: "trace", "debug", "info", "warn", "error", or a
    /// full `EnvFilter` expression.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format.
    #[serde(default)]
    pub format: LogFormat,
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable console output.
    #[default]
    Console,
    /// JSON structured logging.
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "console" | "pretty" | "text" => Ok(LogFormat::Console),
            "json" => Ok(LogFormat::Json),
            other => Err(AppError::Config(format!("Unknown log format: {other}"))),
        }
    }
}

fn default_backend() -> String {
    "simulator".to_string()
}

fn default_shots() -> u32 {
    1024
}

fn default_max_qubits() -> u32 {
    qlab_ir::DEFAULT_MAX_QUBITS
}

fn default_statevector_max_qubits() -> u32 {
    10
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::Console,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            default_backend: default_backend(),
            default_shots: default_shots(),
            max_qubits: default_max_qubits(),
            statevector_max_qubits: default_statevector_max_qubits(),
            ibm_token: None,
            seed: None,
            logging: LoggingConfig::default(),
        }
    }
}

impl AppConfig {
    /// Parse configuration from YAML text. Missing fields take defaults.
    pub fn from_yaml_str(contents: &str) -> AppResult<Self> {
        let config: AppConfig = serde_yaml_ng::from_str(contents)
            .map_err(|e| AppError::Config(format!("Parse error: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a YAML file.
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> AppResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| AppError::Config(format!("Cannot read {}: {e}", path.display())))?;
        Self::from_yaml_str(&contents)
    }

    /// Defaults overridden by the process environment.
    pub fn from_env() -> AppResult<Self> {
        Self::default().merge_env()
    }

    /// Load configuration with the following precedence:
    /// 1. Environment variables
    /// 2. The file at `config_file`, if given
    /// 3. Defaults
    pub fn load(config_file: Option<&Path>) -> AppResult<Self> {
        let config = match config_file {
            Some(path) => Self::from_yaml_file(path)?,
            None => Self::default(),
        };
        config.merge_env()
    }

    /// Merge process environment variables into this configuration.
    pub fn merge_env(self) -> AppResult<Self> {
        self.merge_env_from(|key| std::env::var(key).ok())
    }

    /// Merge variables supplied by `lookup`.
    ///
    /// Only variables that are present override the current values. A
    /// present but unparsable number is an error rather than a silent
    /// fallback.
    pub fn merge_env_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> AppResult<Self> {
        if let Some(v) = lookup("QUANTUM_BACKEND") {
            self.default_backend = v;
        }
        if let Some(v) = lookup("QLAB_DEFAULT_SHOTS") {
            self.default_shots = parse_env("QLAB_DEFAULT_SHOTS", &v)?;
        }
        if let Some(v) = lookup("QLAB_MAX_QUBITS") {
            self.max_qubits = parse_env("QLAB_MAX_QUBITS", &v)?;
        }
        if let Some(v) = lookup("QLAB_STATEVECTOR_MAX_QUBITS") {
            self.statevector_max_qubits = parse_env("QLAB_STATEVECTOR_MAX_QUBITS", &v)?;
        }
        if let Some(v) = lookup("IBM_QUANTUM_TOKEN") {
            if !v.trim().is_empty() {
                self.ibm_token = Some(v);
            }
        }
        if let Some(v) = lookup("QLAB_SEED") {
            self.seed = Some(parse_env("QLAB_SEED", &v)?);
        }
        if let Some(v) = lookup("LOG_LEVEL") {
            self.logging.level = v;
        }
        if let Some(v) = lookup("QLAB_LOG_FORMAT") {
            self.logging.format = v.parse()?;
        }
        self.validate()?;
        Ok(self)
    }

    /// Validate configuration values.
    pub fn validate(&self) -> AppResult<()> {
        if self.default_backend.trim().is_empty() {
            return Err(AppError::Config("default_backend must not be empty".into()));
        }
        if self.default_shots == 0 {
            return Err(AppError::Config("default_shots must be at least 1".into()));
        }
        if self.max_qubits == 0 {
            return Err(AppError::Config("max_qubits must be at least 1".into()));
        }
        if self.statevector_max_qubits == 0 {
            return Err(AppError::Config(
                "statevector_max_qubits must be at least 1".into(),
            ));
        }
        for (key, value) in [
            ("max_qubits", self.max_qubits),
            ("statevector_max_qubits", self.statevector_max_qubits),
        ] {
            if value > ENGINE_MAX_QUBITS {
                return Err(AppError::Config(format!(
                    "{key} is {value}, the simulator supports at most {ENGINE_MAX_QUBITS}"
                )));
            }
        }
        if self.logging.level.trim().is_empty() {
            return Err(AppError::Config("logging.level must not be empty".into()));
        }
        Ok(())
    }

    /// Whether hardware credentials are configured.
    pub fn hardware_available(&self) -> bool {
        self.ibm_token.is_some()
    }

    /// Backend configuration derived from these settings.
    pub fn backend_config(&self) -> BackendConfig {
        let mut config = BackendConfig::new(self.default_backend.clone())
            .with_extra("max_qubits", self.max_qubits.into())
            .with_extra("statevector_max_qubits", self.statevector_max_qubits.into());
        if let Some(seed) = self.seed {
            config = config.with_extra("seed", seed.into());
        }
        if let Some(token) = &self.ibm_token {
            config = config.with_token(token.clone());
        }
        config
    }
}

fn parse_env<T: std::str::FromStr>(key: &str, value: &str) -> AppResult<T> {
    value
        .trim()
        .parse()
        .map_err(|_| AppError::Config(format!("{key} is not a valid number: {value:?}")))
}
