//! Centralized error types for the garden zone tools.
//!
//! Every error that reaches the display layer is converted to [`AppError`],
//! which carries a user-facing message separate from the technical one.

use thiserror::Error;

/// Message shown whenever gardening data could not be produced.
pub const LOAD_FAILED_MESSAGE: &str =
    "Sorry, we couldn't load the gardening data. Please try again later.";

/// Top-level application error type.
///
/// Use `user_message()` to get a UI-appropriate message.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Garden data error: {0}")]
    GardenData(#[from] GardenDataError),

    /// Failures surfaced by the display widget.
    #[error("Widget error: {0}")]
    Widget(String),
}

impl AppError {
    /// Returns a user-friendly message suitable for display.
    pub fn user_message(&self) -> &'static str {
        match self {
            AppError::Config(e) => e.user_message(),
            AppError::GardenData(_) | AppError::Widget(_) => LOAD_FAILED_MESSAGE,
        }
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read configuration: {0}")]
    Read(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Configuration parse error: {0}")]
    ParseError(String),
}

impl ConfigError {
    pub fn user_message(&self) -> &'static str {
        match self {
            ConfigError::Read(_) => "Configuration could not be read. Check file permissions.",
            ConfigError::Invalid(_) => "Invalid configuration. Check your settings.",
            ConfigError::ParseError(_) => "Configuration file is malformed. Check your settings.",
        }
    }
}

/// Garden data errors that escaped the per-field fallback.
#[derive(Debug, Error)]
pub enum GardenDataError {
    #[error("Garden data API error: {0}")]
    ApiError(String),

    #[error("Unexpected data: {0}")]
    ParseError(String),

    #[error("Data source unavailable")]
    SourceUnavailable,
}
