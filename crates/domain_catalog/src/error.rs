//! Catalog domain errors

use thiserror::Error;

use core_kernel::{CoreError, PortError};

/// Errors that can occur in the catalog domain
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("{entity} not found with id: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("{0}")]
    Conflict(String),

    #[error(transparent)]
    Port(PortError),
}

impl CatalogError {
    pub fn not_found(entity: &'static str, id: impl std::fmt::Display) -> Self {
        CatalogError::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        CatalogError::Validation(message.into())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, CatalogError::NotFound { .. })
    }
}

impl From<PortError> for CatalogError {
    fn from(error: PortError) -> Self {
        match error {
            PortError::Conflict { message } => CatalogError::Conflict(message),
            PortError::Validation { message, .. } => CatalogError::Validation(message),
            other => CatalogError::Port(other),
        }
    }
}

impl From<CoreError> for CatalogError {
    fn from(error: CoreError) -> Self {
        match error {
            CoreError::Validation(message) => CatalogError::Validation(message),
        }
    }
}
