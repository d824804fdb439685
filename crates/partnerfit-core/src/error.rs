//! Error types for PartnerFit Core
//!
//! This module defines all error types used throughout the synergy engine.
//! We use `thiserror` for ergonomic error definitions with automatic Display/Error implementations.

use thiserror::Error;

use crate::dimension::DimensionId;
use crate::classification::RiskLevel;

/// Result type alias for PartnerFit operations
pub type Result<T> = std::result::Result<T, SynergyError>;

/// Main error type for PartnerFit operations
#[derive(Error, Debug)]
pub enum SynergyError {
    /// Malformed input: bad rating or malformed dimension table
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// The dimension table cannot produce a score (zero total weight)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A saved record no longer agrees with the engine
    #[error(
        "Record {id} mismatch: stored {stored_score} ({stored_risk}), recomputed {recomputed_score} ({recomputed_risk})"
    )]
    RecordMismatch {
        id: String,
        stored_score: u8,
        stored_risk: RiskLevel,
        recomputed_score: u8,
        recomputed_risk: RiskLevel,
    },

    /// Generic error with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        source: Box<SynergyError>,
    },
}

/// Input and dimension-table validation failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{actor}: rating for '{dimension}' must be in [1, 10], got {value}")]
    RatingOutOfRange {
        actor: String,
        dimension: DimensionId,
        value: i32,
    },

    #[error("{actor}: no rating for '{dimension}'")]
    MissingRating { actor: String, dimension: DimensionId },

    #[error("{actor}: rating for '{dimension}' given more than once")]
    DuplicateRating { actor: String, dimension: DimensionId },

    #[error("{actor}: unknown dimension '{key}'")]
    UnknownDimension { actor: String, key: String },

    #[error("Rating '{raw}' is not an integer")]
    MalformedRating { raw: String },

    #[error("Dimension table is empty")]
    EmptyDimensionTable,

    #[error("Dimension '{0}' appears more than once in the table")]
    DuplicateDimension(DimensionId),

    #[error("Dimension '{0}' is missing from the table")]
    MissingDimension(DimensionId),

    #[error("Dimension '{0}' has a non-positive weight")]
    NonPositiveWeight(DimensionId),
}

/// A string that names no dimension
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown dimension '{0}'")]
pub struct ParseDimensionError(pub String);

impl SynergyError {
    /// Add context to an error
    pub fn context(self, context: impl Into<String>) -> Self {
        Self::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// True when the error (or the error it wraps) is an input validation failure
    pub fn is_validation(&self) -> bool {
        match self {
            Self::Validation(_) => true,
            Self::WithContext { source, .. } => source.is_validation(),
            _ => false,
        }
    }
}

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to a Result
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add lazy context to a Result
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.context(context))
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| e.context(f()))
    }
}
