//! Error types for rate retrieval and conversion

use std::path::PathBuf;
use thiserror::Error;

/// Broad category of an [`ExchangeError`], for callers that only need to branch
/// on the kind of failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidCurrency,
    InvalidAmount,
    Transport,
    Parse,
    Arithmetic,
    Registry,
}

#[derive(Error, Debug)]
pub enum ExchangeError {
    #[error("Currency not found: {0}")]
    UnknownCurrency(String),

    #[error("Invalid amount: '{0}'")]
    InvalidAmount(String),

    #[error("Request error for currency {currency}: {source}")]
    Transport {
        currency: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP error: {status} for currency {currency}")]
    Status {
        currency: String,
        status: reqwest::StatusCode,
    },

    #[error("Failed to parse JSON response for {currency}: {source}")]
    Json {
        currency: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Unexpected response for {currency}: {reason}")]
    MalformedResponse { currency: String, reason: String },

    #[error("Division by zero: rate for {currency} is zero")]
    DivisionByZero { currency: String },

    #[error("Invalid currency registry {}: {message}", .path.display())]
    Registry { path: PathBuf, message: String },

    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ExchangeError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ExchangeError::UnknownCurrency(_) => ErrorKind::InvalidCurrency,
            ExchangeError::InvalidAmount(_) => ErrorKind::InvalidAmount,
            ExchangeError::Transport { .. } | ExchangeError::Status { .. } => ErrorKind::Transport,
            ExchangeError::Json { .. } | ExchangeError::MalformedResponse { .. } => {
                ErrorKind::Parse
            }
            ExchangeError::DivisionByZero { .. } => ErrorKind::Arithmetic,
            ExchangeError::Registry { .. } | ExchangeError::Io { .. } => ErrorKind::Registry,
        }
    }

    /// Message shown on the console when a conversion collapses to "no result".
    pub fn console_message(&self) -> String {
        match self.kind() {
            ErrorKind::InvalidCurrency => "Currency not found.\nConversion not possible.".into(),
            ErrorKind::Parse => {
                "Retrieval error. Likely one or both of the currencies are not in the dataset."
                    .into()
            }
            ErrorKind::Arithmetic | ErrorKind::InvalidAmount => "Conversion not possible.".into(),
            ErrorKind::Transport | ErrorKind::Registry => self.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ExchangeError>;
