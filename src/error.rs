use thiserror::Error;

pub type Result<T> = std::result::Result<T, SynthError>;

#[derive(Error, Debug)]
pub enum SynthError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Unknown source type: {0}")]
    UnknownSourceError(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Ingestion error: {0}")]
    IngestionError(String),
}

// Helper constructors for errors carrying a plain message
impl SynthError {
    pub fn config<S: Into<String>>(msg: S) -> Self {
        SynthError::ConfigError(msg.into())
    }

    pub fn unknown_source<S: Into<String>>(name: S) -> Self {
        SynthError::UnknownSourceError(name.into())
    }

    pub fn ingestion<S: Into<String>>(msg: S) -> Self {
        SynthError::IngestionError(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_message_names_parameter() {
        let err = SynthError::config("generation stage: anomaly_rate must be within 0.0..=1.0, got 1.5");
        let rendered = err.to_string();
        assert!(rendered.contains("anomaly_rate"));
        assert!(rendered.starts_with("Configuration error"));
    }

    #[test]
    fn test_unknown_source_error() {
        let err = SynthError::unknown_source("mainframe");
        assert_eq!(err.to_string(), "Unknown source type: mainframe");
    }
}
