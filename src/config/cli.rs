use crate::adapters::DEFAULT_BASE_URL;
use crate::core::adapter::{DEFAULT_HANDLE_KEY, DEFAULT_TIMEOUT_SECONDS};
use crate::domain::ports::RegistrarSettings;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use super::toml_config::TomlConfig;

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "registrar-cli")]
#[command(about = "Drive the registrar adapter from the command line")]
pub struct CliConfig {
    /// TOML file with a [registrar] section; flags override it.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[arg(long, env = "REGISTRAR_TOKEN", global = true)]
    pub token: Option<String>,

    #[arg(long, global = true)]
    pub base_url: Option<String>,

    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECONDS, global = true)]
    pub timeout_seconds: u64,

    #[arg(long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Emit JSON log lines")]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Serialize, Deserialize, Subcommand)]
pub enum Command {
    /// Check whether a domain can be registered
    Check { domain: String },
    /// List managed domains with their dates
    Domains,
    /// Reconcile expiration dates for the given domains
    Sync {
        #[arg(required = true)]
        domains: Vec<String>,
    },
    /// Cancel a domain
    Delete { domain: String },
    /// List contacts, optionally only the one with this email address
    Contacts {
        #[arg(long)]
        email: Option<String>,
    },
    /// Show one contact by handle
    Contact { handle: String },
    /// Replace the nameservers of a domain
    Nameservers {
        domain: String,
        #[arg(required = true, value_delimiter = ',')]
        nameservers: Vec<String>,
    },
    /// Show which operations reach the registrar
    Capabilities,
    /// Print version information
    Version,
}

/// Settings resolved from the optional TOML file plus command-line overrides.
#[derive(Debug, Clone)]
pub struct ResolvedSettings {
    pub base_url: String,
    pub access_token: String,
    pub username: String,
    pub timeout_seconds: u64,
    pub handle_key: String,
}

impl CliConfig {
    pub fn resolve(&self) -> Result<ResolvedSettings> {
        let file = match &self.config {
            Some(path) => Some(TomlConfig::from_file(path)?),
            None => None,
        };

        let token = self
            .token
            .clone()
            .or_else(|| file.as_ref().map(|f| f.registrar.access_token.clone()));
        let access_token = validation::validate_required_field("token", &token)?.clone();

        let base_url = self
            .base_url
            .clone()
            .or_else(|| file.as_ref().map(|f| f.registrar.base_url.clone()))
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let timeout_seconds = file
            .as_ref()
            .and_then(|f| f.registrar.timeout_seconds)
            .filter(|_| self.timeout_seconds == DEFAULT_TIMEOUT_SECONDS)
            .unwrap_or(self.timeout_seconds);

        Ok(ResolvedSettings {
            base_url,
            access_token,
            username: file
                .as_ref()
                .map(|f| f.registrar.username.clone())
                .unwrap_or_default(),
            timeout_seconds,
            handle_key: file
                .as_ref()
                .and_then(|f| f.registrar.handle_key.clone())
                .unwrap_or_else(|| DEFAULT_HANDLE_KEY.to_string()),
        })
    }
}

impl RegistrarSettings for ResolvedSettings {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn access_token(&self) -> &str {
        &self.access_token
    }

    fn username(&self) -> &str {
        &self.username
    }

    fn timeout_seconds(&self) -> u64 {
        self.timeout_seconds
    }

    fn handle_key(&self) -> &str {
        &self.handle_key
    }
}

impl Validate for ResolvedSettings {
    fn validate(&self) -> Result<()> {
        validation::validate_url("base_url", &self.base_url)?;
        validation::validate_non_empty_string("token", &self.access_token)?;
        validation::validate_range("timeout_seconds", self.timeout_seconds, 1, 300)?;
        Ok(())
    }
}
