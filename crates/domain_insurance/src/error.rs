//! Insurance domain errors
//!
//! This module defines all error types that can occur within the
//! vehicle insurance domain.

use thiserror::Error;

use core_kernel::{CoreError, PortError};

/// Errors that can occur in the insurance domain
#[derive(Debug, Error)]
pub enum InsuranceError {
    /// An entity was absent for the given id or unique key
    #[error("{entity} not found with {field}: {value}")]
    NotFound {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    /// A date or amount range is inverted
    #[error("{0}")]
    InvalidRange(String),

    /// The policy is not in a state that allows the operation
    #[error("{0}")]
    InvalidState(String),

    /// The operation conflicts with stored data
    #[error("{0}")]
    Conflict(String),

    /// Input failed validation
    #[error("Validation error: {0}")]
    Validation(String),

    /// The underlying store failed
    #[error(transparent)]
    Port(PortError),
}

impl InsuranceError {
    /// Creates a not found error keyed by id
    pub fn not_found(entity: &'static str, id: impl std::fmt::Display) -> Self {
        InsuranceError::NotFound {
            entity,
            field: "id",
            value: id.to_string(),
        }
    }

    /// Creates a not found error keyed by policy number
    pub fn policy_number_not_found(number: impl Into<String>) -> Self {
        InsuranceError::NotFound {
            entity: "Insurance policy",
            field: "number",
            value: number.into(),
        }
    }

    /// Creates a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        InsuranceError::Validation(message.into())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, InsuranceError::NotFound { .. })
    }
}

impl From<PortError> for InsuranceError {
    fn from(error: PortError) -> Self {
        match error {
            PortError::Conflict { message } => InsuranceError::Conflict(message),
            PortError::Validation { message, .. } => InsuranceError::Validation(message),
            other => InsuranceError::Port(other),
        }
    }
}

impl From<CoreError> for InsuranceError {
    fn from(error: CoreError) -> Self {
        match error {
            CoreError::Validation(message) => InsuranceError::Validation(message),
        }
    }
}
