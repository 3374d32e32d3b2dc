//! Core error types used across the system

use thiserror::Error;

/// Core error type for the kernel
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// A string did not match any tag of a closed enumeration
    #[error("Invalid {kind} value: '{value}'")]
    InvalidEnumValue { kind: &'static str, value: String },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl CoreError {
    pub fn invalid_enum_value(kind: &'static str, value: impl Into<String>) -> Self {
        CoreError::InvalidEnumValue {
            kind,
            value: value.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        CoreError::Validation(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        CoreError::NotFound(message.into())
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        CoreError::Configuration(message.into())
    }

    /// Returns true if this error came from parsing an enumeration tag
    pub fn is_invalid_enum_value(&self) -> bool {
        matches!(self, CoreError::InvalidEnumValue { .. })
    }
}
