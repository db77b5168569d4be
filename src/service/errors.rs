use crate::models::{ExtractionError, GeneBoundError, InitializationError, ParameterError};

/// Errors that can occur during an optimization run.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("InvalidParameters: {0}")]
    InvalidParameters(#[from] ParameterError),
    #[error("InfeasibleParameters: {0}")]
    InfeasibleParameters(#[from] InitializationError),
    #[error("OptimizationFailed: {reason}")]
    OptimizationFailed { reason: String },
    #[error("CountSourceError: {0}")]
    CountSource(anyhow::Error),
    #[error("TaskFailed: {0}")]
    TaskFailed(#[from] tokio::task::JoinError),
}

impl Error {
    pub(crate) fn optimization_failed(reason: impl Into<String>) -> Self {
        Self::OptimizationFailed {
            reason: reason.into(),
        }
    }
}

impl From<GeneBoundError> for Error {
    fn from(error: GeneBoundError) -> Self {
        Self::InfeasibleParameters(error.into())
    }
}

impl From<ExtractionError> for Error {
    fn from(error: ExtractionError) -> Self {
        Self::optimization_failed(error.to_string())
    }
}
