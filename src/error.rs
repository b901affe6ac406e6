//! Error types for codespeak

use std::io;
use thiserror::Error;

/// Main error type for codespeak
#[derive(Error, Debug)]
pub enum CodespeakError {
    /// Input was rejected before reaching the speech provider
    #[error("{0}")]
    Validation(String),

    /// The speech provider failed (network, service or unsupported language)
    #[error("Error generating speech: {0}")]
    Synthesis(String),

    #[error("Playback error: {0}")]
    Playback(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("INI parse error: {0}")]
    IniParse(String),

    #[error("Clipboard error: {0}")]
    Clipboard(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{0}")]
    Other(String),
}

impl CodespeakError {
    /// Whether the user can simply try again after seeing this error
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            CodespeakError::Validation(_)
                | CodespeakError::Synthesis(_)
                | CodespeakError::Playback(_)
                | CodespeakError::Clipboard(_)
        )
    }
}

/// Result type alias for codespeak operations
pub type Result<T> = std::result::Result<T, CodespeakError>;

impl From<String> for CodespeakError {
    fn from(s: String) -> Self {
        CodespeakError::Other(s)
    }
}

impl From<&str> for CodespeakError {
    fn from(s: &str) -> Self {
        CodespeakError::Other(s.to_string())
    }
}

impl From<reqwest::Error> for CodespeakError {
    fn from(e: reqwest::Error) -> Self {
        CodespeakError::Synthesis(format!("Connection error: {}", e))
    }
}

impl From<base64::DecodeError> for CodespeakError {
    fn from(e: base64::DecodeError) -> Self {
        CodespeakError::Synthesis(format!("Invalid audio payload: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recoverable_kinds() {
        assert!(CodespeakError::Validation("empty".into()).is_recoverable());
        assert!(CodespeakError::Synthesis("down".into()).is_recoverable());
        assert!(!CodespeakError::Config("bad".into()).is_recoverable());
        assert!(!CodespeakError::Other("x".into()).is_recoverable());
    }

    #[test]
    fn test_synthesis_message_keeps_provider_text() {
        let err = CodespeakError::Synthesis("connection refused".into());
        assert!(err.to_string().contains("connection refused"));
    }
}
