//! # Error Types
//!
//! Structured error types for calc_core. Only precondition violations and
//! catalog/IO problems are errors; degenerate inputs and rating-table
//! overflows are ordinary results (see [`crate::catalog::RatingSelection`]
//! and [`crate::calculations::hydraulic::LoopSizing`]).
//!
//! ## Example
//!
//! ```rust
//! use calc_core::errors::{CalcError, CalcResult};
//!
//! fn check_enclosures(count: u32) -> CalcResult<()> {
//!     if count == 0 {
//!         return Err(CalcError::configuration(
//!             "enclosure_count",
//!             "at least one enclosure is required",
//!         ));
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for calc_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for calculation operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// The parameter set describes a facility that cannot exist
    #[error("Configuration error in '{field}': {reason}")]
    Configuration { field: String, reason: String },

    /// A price entry is missing from the injected catalog
    #[error("Catalog entry not found: {entry}")]
    CatalogEntryNotFound { entry: String },

    /// File I/O error (CLI input and catalog files)
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },
}

impl CalcError {
    /// Create a Configuration error
    pub fn configuration(field: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::Configuration {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Create a CatalogEntryNotFound error
    pub fn catalog_entry_not_found(entry: impl Into<String>) -> Self {
        CalcError::CatalogEntryNotFound { entry: entry.into() }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::Configuration { .. } => "CONFIGURATION_ERROR",
            CalcError::CatalogEntryNotFound { .. } => "CATALOG_ENTRY_NOT_FOUND",
            CalcError::FileError { .. } => "FILE_ERROR",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
        }
    }
}

impl From<serde_json::Error> for CalcError {
    fn from(e: serde_json::Error) -> Self {
        CalcError::SerializationError { reason: e.to_string() }
    }
}
