use crate::adapters::DEFAULT_BASE_URL;
use crate::core::adapter::{DEFAULT_HANDLE_KEY, DEFAULT_TIMEOUT_SECONDS};
use crate::domain::ports::RegistrarSettings;
use crate::utils::error::{AdapterError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub registrar: RegistrarSection,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistrarSection {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    pub access_token: String,
    #[serde(default)]
    pub username: String,
    pub timeout_seconds: Option<u64>,
    pub handle_key: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: Option<String>,
    pub json: Option<bool>,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl TomlConfig {
    /// Loads the configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(AdapterError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| AdapterError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` placeholders with environment values, e.g. `${REGISTRAR_TOKEN}`.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| AdapterError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_url("registrar.base_url", &self.registrar.base_url)?;
        validation::validate_non_empty_string("registrar.access_token", &self.registrar.access_token)?;

        // An unresolved placeholder means the environment variable was missing.
        if self.registrar.access_token.starts_with("${") {
            return Err(AdapterError::MissingConfigError {
                field: self.registrar.access_token.clone(),
            });
        }

        validation::validate_range("registrar.timeout_seconds", self.timeout_seconds(), 1, 300)?;

        if let Some(key) = &self.registrar.handle_key {
            validation::validate_non_empty_string("registrar.handle_key", key)?;
        }

        Ok(())
    }

    pub fn timeout_seconds(&self) -> u64 {
        self.registrar.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECONDS)
    }

    pub fn log_level(&self) -> &str {
        self.logging
            .as_ref()
            .and_then(|l| l.level.as_deref())
            .unwrap_or("info")
    }

    pub fn json_logging(&self) -> bool {
        self.logging.as_ref().and_then(|l| l.json).unwrap_or(false)
    }
}

impl RegistrarSettings for TomlConfig {
    fn base_url(&self) -> &str {
        &self.registrar.base_url
    }

    fn access_token(&self) -> &str {
        &self.registrar.access_token
    }

    fn username(&self) -> &str {
        &self.registrar.username
    }

    fn timeout_seconds(&self) -> u64 {
        TomlConfig::timeout_seconds(self)
    }

    fn handle_key(&self) -> &str {
        self.registrar.handle_key.as_deref().unwrap_or(DEFAULT_HANDLE_KEY)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
