//! Core error types for haven-core.
//!
//! Expected conditions (no interventions, no rules, empty results) are never
//! errors; the only typed failure is the registry collaborator being unable
//! to return data.

use thiserror::Error;

/// Core error type for haven-core.
#[derive(Error, Debug)]
pub enum EngineError {
    /// Registry-related errors
    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),
}

/// Registry-specific errors.
#[derive(Error, Debug)]
pub enum RegistryError {
    /// The backing store failed to return intervention/rule data.
    #[error("Registry data unavailable: {0}")]
    Unavailable(String),

    /// No record exists for this user.
    #[error("Unknown user: {user_id}")]
    UserNotFound { user_id: String },

    /// No intervention with this id exists for this user (or it was deleted).
    #[error("Unknown intervention: {intervention_id}")]
    InterventionNotFound { intervention_id: String },
}

/// Result type alias for EngineError
pub type Result<T, E = EngineError> = std::result::Result<T, E>;
