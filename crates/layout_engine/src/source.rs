//! Drag source resolution
//!
//! A drag starts either from the palette (a new field of some type) or from
//! the canvas (an existing field or row). The host hands us the raw transfer
//! payload; resolution turns it into a [`Source`] and never touches the tree.

use crate::FatalError;
use form_model::{Canvas, ComponentType, Location, ModelError, Node, NodeId};
use serde::{Deserialize, Serialize};

/// Raw drag payload as carried by the host's drag-and-drop transfer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum DragPayload {
    /// Dragged from the component palette
    #[serde(rename_all = "camelCase")]
    Palette { component_type: ComponentType },
    /// Dragged from the canvas
    #[serde(rename_all = "camelCase")]
    Canvas { node_id: NodeId },
}

impl DragPayload {
    pub fn palette(component_type: ComponentType) -> Self {
        DragPayload::Palette { component_type }
    }

    pub fn canvas(node_id: impl Into<NodeId>) -> Self {
        DragPayload::Canvas {
            node_id: node_id.into(),
        }
    }

    /// Parse the JSON transfer string written at drag start
    pub fn from_json(data: &str) -> Result<Self, ModelError> {
        Ok(serde_json::from_str(data)?)
    }

    pub fn to_json(&self) -> Result<String, ModelError> {
        Ok(serde_json::to_string(self)?)
    }
}

/// What kind of canvas node is being dragged
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    Field,
    RowGroup,
}

/// A classified drag source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Source {
    /// A palette item; a fresh field is materialized when the drop lands
    #[serde(rename_all = "camelCase")]
    NewItem { component_type: ComponentType },
    /// A node already on the canvas, moved as a whole
    #[serde(rename_all = "camelCase")]
    ExistingItem {
        node_id: NodeId,
        origin: Location,
        kind: SourceKind,
    },
}

impl Source {
    /// ID of the dragged node, if it already exists
    pub fn node_id(&self) -> Option<&NodeId> {
        match self {
            Source::NewItem { .. } => None,
            Source::ExistingItem { node_id, .. } => Some(node_id),
        }
    }

    /// Whether a whole row group is being dragged
    pub fn is_row(&self) -> bool {
        matches!(
            self,
            Source::ExistingItem {
                kind: SourceKind::RowGroup,
                ..
            }
        )
    }

    /// Row the dragged field currently sits in, if any
    pub fn origin_row(&self) -> Option<&NodeId> {
        match self {
            Source::ExistingItem {
                origin: Location::InRow { row_id, .. },
                ..
            } => Some(row_id),
            _ => None,
        }
    }
}

/// Classify a drag payload against the current canvas
pub fn resolve(payload: &DragPayload, canvas: &Canvas) -> Result<Source, FatalError> {
    match payload {
        DragPayload::Palette { component_type } => Ok(Source::NewItem {
            component_type: *component_type,
        }),
        DragPayload::Canvas { node_id } => {
            let origin = canvas
                .locate(node_id)
                .ok_or_else(|| FatalError::SourceNotFound(node_id.clone()))?;
            let kind = match &origin {
                Location::TopLevel(index) => match canvas.node_at(*index) {
                    Some(Node::RowGroup(_)) => SourceKind::RowGroup,
                    _ => SourceKind::Field,
                },
                Location::InRow { .. } => SourceKind::Field,
            };
            Ok(Source::ExistingItem {
                node_id: node_id.clone(),
                origin,
                kind,
            })
        }
    }
}
