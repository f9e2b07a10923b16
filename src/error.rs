//! Error types for configuring and dispatching a run
//!
//! Only configuration problems are errors. Non-finite energies from
//! coincident bodies propagate as values, and a failed energy check is a
//! reported verdict (`Conservation::NotConserved`), not an error.

use thiserror::Error;

use crate::runner::Language;

/// Result type for library operations
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid language: {given}. Please choose from {valid}")]
    UnsupportedLanguage { given: String, valid: String },

    #[error("Invalid value for `{option}`: {value} ({reason})")]
    InvalidOption {
        option: &'static str,
        value: String,
        reason: String,
    },

    #[error("No {0} backend is available in this build")]
    BackendUnavailable(Language),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl Error {
    pub fn invalid_option(option: &'static str, value: impl ToString, reason: impl Into<String>) -> Self {
        Error::InvalidOption {
            option,
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}
