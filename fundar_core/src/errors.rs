//! # Error Types
//!
//! Structured error types for fundar_core. Errors carry enough context to be
//! handled programmatically: every variant has named fields and a stable
//! short code via [`DesignError::error_code`].
//!
//! Two channels are distinguished with [`DesignError::is_fatal`]:
//! fatal conditions abort a whole tower run (malformed inputs, a soil profile
//! shallower than a requested query range, an empty depth window), while the
//! remaining variants are loop-local conditions the search optimizer absorbs
//! into degraded candidates instead of propagating.
//!
//! ## Example
//!
//! ```rust
//! use fundar_core::errors::{DesignError, DesignResult};
//!
//! fn validate_width(width_m: f64) -> DesignResult<()> {
//!     if width_m <= 0.0 {
//!         return Err(DesignError::invalid_input(
//!             "width_m",
//!             width_m.to_string(),
//!             "Footing width must be positive",
//!         ));
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for fundar_core operations
pub type DesignResult<T> = Result<T, DesignError>;

/// Structured error type for foundation design operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum DesignError {
    /// An input value is invalid (out of range, inconsistent, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// An aggregate query asked for a depth range past the profile bottom
    #[error("Insufficient profile depth: requested {requested_m} m, profile ends at {available_m} m")]
    InsufficientDepth { requested_m: f64, available_m: f64 },

    /// The admissible depth window is empty (minimum above maximum)
    #[error("Infeasible depth range: minimum {min_m} m exceeds maximum {max_m} m")]
    InfeasibleRange { min_m: f64, max_m: f64 },

    /// The footing base would penetrate the rock mass beyond the allowed limit
    #[error("Rock penetration {penetration_m} m exceeds maximum {max_m} m")]
    RockPenetrationExceeded { penetration_m: f64, max_m: f64 },

    /// The pedestal embedment leaves less cover below the stub than required
    #[error("Stub clearance violation: cover {cover_m} m below stub, {required_m} m required")]
    StubClearanceViolation { cover_m: f64, required_m: f64 },

    /// The load catalogue has no entry for the requested case
    #[error("Missing load case: {kind} / {case}")]
    MissingLoadCase { kind: String, case: String },

    /// The physics oracle failed in a way the evaluator does not understand
    #[error("Physics failure during {operation}: {reason}")]
    PhysicsFailure { operation: String, reason: String },

    /// Generic internal error (should be rare)
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl DesignError {
    /// Create an InvalidInput error
    pub fn invalid_input(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        DesignError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create an InsufficientDepth error
    pub fn insufficient_depth(requested_m: f64, available_m: f64) -> Self {
        DesignError::InsufficientDepth {
            requested_m,
            available_m,
        }
    }

    /// Create an InfeasibleRange error
    pub fn infeasible_range(min_m: f64, max_m: f64) -> Self {
        DesignError::InfeasibleRange { min_m, max_m }
    }

    /// Create a RockPenetrationExceeded error
    pub fn rock_penetration(penetration_m: f64, max_m: f64) -> Self {
        DesignError::RockPenetrationExceeded {
            penetration_m,
            max_m,
        }
    }

    /// Create a StubClearanceViolation error
    pub fn stub_clearance(cover_m: f64, required_m: f64) -> Self {
        DesignError::StubClearanceViolation {
            cover_m,
            required_m,
        }
    }

    /// Create a MissingLoadCase error
    pub fn missing_load_case(kind: impl Into<String>, case: impl Into<String>) -> Self {
        DesignError::MissingLoadCase {
            kind: kind.into(),
            case: case.into(),
        }
    }

    /// Create a PhysicsFailure error
    pub fn physics_failure(operation: impl Into<String>, reason: impl Into<String>) -> Self {
        DesignError::PhysicsFailure {
            operation: operation.into(),
            reason: reason.into(),
        }
    }

    /// Whether this error aborts the whole tower run.
    ///
    /// Non-fatal variants are recorded on the affected candidate (or
    /// pedestal-height entry) and the search continues.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            DesignError::InvalidInput { .. }
                | DesignError::InsufficientDepth { .. }
                | DesignError::InfeasibleRange { .. }
                | DesignError::Internal { .. }
        )
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            DesignError::InvalidInput { .. } => "INVALID_INPUT",
            DesignError::InsufficientDepth { .. } => "INSUFFICIENT_DEPTH",
            DesignError::InfeasibleRange { .. } => "INFEASIBLE_RANGE",
            DesignError::RockPenetrationExceeded { .. } => "ROCK_PENETRATION_EXCEEDED",
            DesignError::StubClearanceViolation { .. } => "STUB_CLEARANCE_VIOLATION",
            DesignError::MissingLoadCase { .. } => "MISSING_LOAD_CASE",
            DesignError::PhysicsFailure { .. } => "PHYSICS_FAILURE",
            DesignError::Internal { .. } => "INTERNAL_ERROR",
        }
    }
}
