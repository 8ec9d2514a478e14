// ABOUTME: Unified error handling for the merenda ledger
// ABOUTME: Defines error codes, the AppError type, and constructor helpers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Merenda Ledger Project

//! # Unified Error Handling
//!
//! Central error type shared by the ledger store, the planning engine, and
//! the insight collaborator. Every fallible public operation returns
//! [`AppResult`]. Shortage conditions are *not* errors — they are first-class
//! computed statuses on plan lines (see `planning::LineStatus`).

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Standard error codes used throughout the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCode {
    // Validation (1000-1999)
    /// Input failed validation
    #[serde(rename = "INVALID_INPUT")]
    InvalidInput = 1000,
    /// A required field is missing
    #[serde(rename = "MISSING_REQUIRED_FIELD")]
    MissingRequiredField = 1001,
    /// A numeric value is outside the acceptable range
    #[serde(rename = "VALUE_OUT_OF_RANGE")]
    ValueOutOfRange = 1002,

    // Resources (2000-2999)
    /// The referenced item, event, or category does not exist
    #[serde(rename = "RESOURCE_NOT_FOUND")]
    ResourceNotFound = 2000,
    /// A stock mutation would drive a quantity below zero (strict path only)
    #[serde(rename = "STOCK_UNDERFLOW")]
    StockUnderflow = 2001,

    // Storage (3000-3999)
    /// Durable document store read/write failed
    #[serde(rename = "STORAGE_ERROR")]
    StorageError = 3000,
    /// Document (de)serialization failed
    #[serde(rename = "SERIALIZATION_ERROR")]
    SerializationError = 3001,
    /// Import payload is malformed and was rejected without partial writes
    #[serde(rename = "INVALID_BACKUP")]
    InvalidBackup = 3002,

    // Configuration (4000-4999)
    /// Configuration value is invalid
    #[serde(rename = "CONFIG_ERROR")]
    ConfigError = 4000,
    /// Required configuration is missing (e.g. gram weight for a count item)
    #[serde(rename = "CONFIG_MISSING")]
    ConfigMissing = 4001,

    // External services (5000-5999)
    /// The insight-generation collaborator failed or timed out
    #[serde(rename = "EXTERNAL_SERVICE_ERROR")]
    ExternalServiceError = 5000,

    // Internal (9000-9999)
    /// Unexpected internal error
    #[serde(rename = "INTERNAL_ERROR")]
    InternalError = 9000,
}

impl ErrorCode {
    /// Get a user-friendly description of this error code
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::InvalidInput => "The provided input is invalid",
            Self::MissingRequiredField => "A required field is missing",
            Self::ValueOutOfRange => "The provided value is outside the acceptable range",
            Self::ResourceNotFound => "The requested resource was not found",
            Self::StockUnderflow => "The stock mutation would drive a quantity below zero",
            Self::StorageError => "Durable store operation failed",
            Self::SerializationError => "Data serialization/deserialization failed",
            Self::InvalidBackup => "The backup payload is malformed and was rejected",
            Self::ConfigError => "Configuration error encountered",
            Self::ConfigMissing => "Required configuration is missing",
            Self::ExternalServiceError => "An external service encountered an error",
            Self::InternalError => "An internal error occurred",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

/// Unified error type for the application
#[derive(Debug, Error)]
pub struct AppError {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Source error for error chaining
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl AppError {
    /// Create a new error with the given code and message
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            source: None,
        }
    }

    /// Attach a source error for chaining
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Validation failure
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, message)
    }

    /// Missing required field
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::MissingRequiredField,
            format!("missing required field: {}", field.into()),
        )
    }

    /// Referenced resource does not exist
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::new(ErrorCode::ResourceNotFound, resource)
    }

    /// Strict stock mutation would underflow
    pub fn stock_underflow(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::StockUnderflow, message)
    }

    /// Durable store failure
    pub fn storage(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::StorageError, message)
    }

    /// Serialization failure
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::SerializationError, message)
    }

    /// Malformed import payload
    pub fn invalid_backup(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidBackup, message)
    }

    /// Configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigError, message)
    }

    /// Required configuration missing
    pub fn config_missing(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigMissing, message)
    }

    /// External collaborator failure
    pub fn external_service(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ExternalServiceError, message)
    }

    /// Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::serialization(format!("JSON error: {err}")).with_source(err)
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::storage(format!("I/O error: {err}")).with_source(err)
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        Self::storage(format!("{err:#}"))
    }
}

/// Convenient result alias for application operations
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_includes_code_and_message() {
        let err = AppError::invalid_input("quantity must be positive");
        assert_eq!(format!("{err}"), "InvalidInput: quantity must be positive");
    }

    #[test]
    fn missing_field_names_the_field() {
        let err = AppError::missing_field("supplier");
        assert_eq!(err.code, ErrorCode::MissingRequiredField);
        assert!(err.message.contains("supplier"));
    }

    #[test]
    fn error_code_serializes_to_screaming_snake() {
        let json = serde_json::to_string(&ErrorCode::StockUnderflow).unwrap();
        assert_eq!(json, "\"STOCK_UNDERFLOW\"");
    }

    #[test]
    fn source_error_is_chained() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err = AppError::from(io);
        assert_eq!(err.code, ErrorCode::StorageError);
        assert!(std::error::Error::source(&err).is_some());
    }
}
