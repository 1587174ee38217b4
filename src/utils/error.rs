use thiserror::Error;

#[derive(Error, Debug)]
pub enum AdapterError {
    #[error("Registrar request failed: {0}")]
    TransportError(#[from] reqwest::Error),

    #[error("Registrar returned HTTP {status} for {endpoint}")]
    UnexpectedStatus { endpoint: String, status: u16 },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration value: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

impl AdapterError {
    /// Short text handed to the host when a transport failure is swallowed.
    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::TransportError(_) | Self::UnexpectedStatus { .. } => {
                "The registrar could not be reached".to_string()
            }
            Self::SerializationError(_) => "The registrar sent an unreadable response".to_string(),
            Self::IoError(e) => format!("IO failure: {}", e),
            Self::ConfigError { .. }
            | Self::MissingConfigError { .. }
            | Self::InvalidConfigValueError { .. } => self.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, AdapterError>;
