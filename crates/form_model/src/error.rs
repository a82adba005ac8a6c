//! Error types for form model operations

use crate::{ComponentType, NodeId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("Node not found: {0}")]
    NodeNotFound(NodeId),

    #[error("Row group not found: {0}")]
    RowNotFound(NodeId),

    #[error("Invalid location: {0}")]
    InvalidLocation(String),

    #[error("Duplicate node id: {0}")]
    DuplicateId(NodeId),

    #[error("Row group {row_id} has {count} children (allowed {min}..={max})")]
    RowSizeOutOfRange {
        row_id: NodeId,
        count: usize,
        min: usize,
        max: usize,
    },

    #[error("Properties of kind '{properties}' are not valid for component type {component_type:?}")]
    PropertiesMismatch {
        component_type: ComponentType,
        properties: &'static str,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ModelError>;
