pub mod localidade;
pub mod simulation;

use contracts::domain::simulation::engine::SimulationError;
use thiserror::Error;

/// Errors surfaced by domain services to the HTTP layer.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("not found: {0}")]
    NotFound(String),
    #[error("access denied")]
    Forbidden,
    #[error("{0}")]
    Validation(String),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl From<SimulationError> for ServiceError {
    fn from(e: SimulationError) -> Self {
        ServiceError::Validation(e.to_string())
    }
}

impl From<sea_orm::DbErr> for ServiceError {
    fn from(e: sea_orm::DbErr) -> Self {
        ServiceError::Internal(e.into())
    }
}

impl From<serde_json::Error> for ServiceError {
    fn from(e: serde_json::Error) -> Self {
        ServiceError::Internal(e.into())
    }
}
