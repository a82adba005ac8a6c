//! Error types for editing operations

use form_model::NodeId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EditError {
    #[error("Form model error: {0}")]
    Model(#[from] form_model::ModelError),

    #[error("Node not found: {0}")]
    NodeNotFound(NodeId),

    #[error("Invalid settings: {0}")]
    InvalidSettings(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Undo stack is empty")]
    UndoStackEmpty,

    #[error("Redo stack is empty")]
    RedoStackEmpty,
}

impl From<layout_engine::ZoneConfigError> for EditError {
    fn from(err: layout_engine::ZoneConfigError) -> Self {
        EditError::InvalidSettings(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, EditError>;
