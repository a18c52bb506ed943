use lawmonitor_core::IllegalTransition;
use lawmonitor_registry::RegistryError;
use lawmonitor_store::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error(transparent)]
    IllegalTransition(#[from] IllegalTransition),

    #[error("{0}")]
    Validation(String),

    #[error("registry error: {0}")]
    Gateway(#[from] RegistryError),

    #[error("store error: {0}")]
    Store(StoreError),
}

impl WorkflowError {
    pub(crate) fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    pub(crate) fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}

/// A row vanishing between read and write is reported like any other miss.
impl From<StoreError> for WorkflowError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound { entity, id } => Self::NotFound { entity, id },
            other => Self::Store(other),
        }
    }
}
