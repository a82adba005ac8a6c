//! Error types for layout decisions
//!
//! A drop can fail in two very different ways. A [`RejectionReason`] means the
//! user asked for something the layout rules forbid; the tree is left alone
//! and the host shows a notice. A [`FatalError`] means the caller and the tree
//! disagree about what exists, which is a programming error on the host side.

use crate::Intent;
use form_model::{ModelError, NodeId, MAX_ROW_CHILDREN};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Non-fatal reasons a drop is refused
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum RejectionReason {
    #[error("Row {row_id} already holds {capacity} fields")]
    CapacityExceeded { row_id: NodeId, capacity: usize },

    #[error("Rows cannot be placed inside or beside other fields")]
    NestedRowNotAllowed,

    #[error("A row cannot be dropped onto one of its own fields")]
    CircularReference,

    #[error("Pointer is outside the drop target")]
    InvalidGeometry,

    #[error("Item dropped onto itself")]
    SelfDrop,
}

impl RejectionReason {
    pub(crate) fn capacity(row_id: &NodeId) -> Self {
        RejectionReason::CapacityExceeded {
            row_id: row_id.clone(),
            capacity: MAX_ROW_CHILDREN,
        }
    }

    /// Text suitable for a non-blocking notification
    pub fn user_message(&self) -> String {
        match self {
            RejectionReason::CapacityExceeded { capacity, .. } => format!(
                "This row is full ({} fields max). Drop above or below the row instead.",
                capacity
            ),
            RejectionReason::NestedRowNotAllowed => {
                "Rows can only be moved above or below other items.".to_string()
            }
            RejectionReason::CircularReference => {
                "A row can't be dropped into itself.".to_string()
            }
            RejectionReason::InvalidGeometry | RejectionReason::SelfDrop => String::new(),
        }
    }

    /// Whether the rejection should be dropped quietly instead of shown
    pub fn is_silent(&self) -> bool {
        matches!(
            self,
            RejectionReason::InvalidGeometry | RejectionReason::SelfDrop
        )
    }
}

/// Caller/tree desynchronization
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FatalError {
    #[error("Drop target not found in canvas: {0}")]
    TargetNotFound(NodeId),

    #[error("Dragged node not found in canvas: {0}")]
    SourceNotFound(NodeId),

    #[error("Intent {0:?} requires a drop target")]
    MissingTarget(Intent),

    #[error("Canvas structure inconsistent: {0}")]
    Inconsistent(String),
}

impl From<ModelError> for FatalError {
    fn from(err: ModelError) -> Self {
        FatalError::Inconsistent(err.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    #[error("Drop rejected: {0}")]
    Rejected(#[from] RejectionReason),

    #[error("Fatal layout error: {0}")]
    Fatal(#[from] FatalError),
}

impl LayoutError {
    pub fn rejection(&self) -> Option<&RejectionReason> {
        match self {
            LayoutError::Rejected(reason) => Some(reason),
            LayoutError::Fatal(_) => None,
        }
    }

    pub fn is_fatal(&self) -> bool {
        matches!(self, LayoutError::Fatal(_))
    }
}

impl From<ModelError> for LayoutError {
    fn from(err: ModelError) -> Self {
        LayoutError::Fatal(err.into())
    }
}

/// An edge fraction outside the usable range
#[derive(Debug, Clone, PartialEq, Error)]
#[error("Invalid zone fraction {name} = {value} (must be within 0..0.5)")]
pub struct ZoneConfigError {
    pub name: &'static str,
    pub value: f64,
}

pub type Result<T> = std::result::Result<T, LayoutError>;
