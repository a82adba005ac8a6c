//! Canvas tree, node addressing and structural helpers
//!
//! The canvas is a single vertical column of [`Node`]s. Every node is reached
//! through a [`Location`]: either a top-level index or an index inside a row
//! group. The mutation helpers here are low level and work on owned copies;
//! they keep addresses consistent but do not enforce the settled row size,
//! which is the job of the layout engine and its dissolution pass.

use crate::{Field, ModelError, NodeId, Result, RowGroup, MAX_ROW_CHILDREN, MIN_ROW_CHILDREN};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// An element of the canvas column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Node {
    Field(Field),
    #[serde(rename = "row")]
    RowGroup(RowGroup),
}

impl Node {
    pub fn id(&self) -> &NodeId {
        match self {
            Node::Field(field) => &field.id,
            Node::RowGroup(row) => &row.id,
        }
    }

    pub fn is_row(&self) -> bool {
        matches!(self, Node::RowGroup(_))
    }

    pub fn as_field(&self) -> Option<&Field> {
        match self {
            Node::Field(field) => Some(field),
            Node::RowGroup(_) => None,
        }
    }

    pub fn as_row(&self) -> Option<&RowGroup> {
        match self {
            Node::RowGroup(row) => Some(row),
            Node::Field(_) => None,
        }
    }

    /// Number of fields contained in this node
    pub fn field_count(&self) -> usize {
        match self {
            Node::Field(_) => 1,
            Node::RowGroup(row) => row.children.len(),
        }
    }
}

impl From<Field> for Node {
    fn from(field: Field) -> Self {
        Node::Field(field)
    }
}

impl From<RowGroup> for Node {
    fn from(row: RowGroup) -> Self {
        Node::RowGroup(row)
    }
}

/// Address of a node within the canvas
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Location {
    /// Index in the top-level column
    TopLevel(usize),
    /// Index among the children of a row group
    #[serde(rename_all = "camelCase")]
    InRow { row_id: NodeId, index: usize },
}

/// The top-level form tree
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Canvas {
    nodes: Vec<Node>,
}

impl Canvas {
    /// Create an empty canvas
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Create a canvas from top-level nodes (not validated)
    pub fn from_nodes(nodes: Vec<Node>) -> Self {
        Self { nodes }
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn into_nodes(self) -> Vec<Node> {
        self.nodes
    }

    /// Number of top-level nodes
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Total number of fields, counting row children
    pub fn field_count(&self) -> usize {
        self.nodes.iter().map(Node::field_count).sum()
    }

    /// Number of row groups
    pub fn row_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_row()).count()
    }

    /// All fields in visual order (top to bottom, left to right)
    pub fn iter_fields(&self) -> impl Iterator<Item = &Field> {
        self.nodes.iter().flat_map(|node| match node {
            Node::Field(field) => std::slice::from_ref(field).iter(),
            Node::RowGroup(row) => row.children.iter(),
        })
    }

    /// Iterate over row groups
    pub fn iter_rows(&self) -> impl Iterator<Item = &RowGroup> {
        self.nodes.iter().filter_map(Node::as_row)
    }

    // =========================================================================
    // Lookup
    // =========================================================================

    /// Find where a field or row lives
    pub fn locate(&self, id: &NodeId) -> Option<Location> {
        for (index, node) in self.nodes.iter().enumerate() {
            if node.id() == id {
                return Some(Location::TopLevel(index));
            }
            if let Node::RowGroup(row) = node {
                if let Some(child_index) = row.position_of(id) {
                    return Some(Location::InRow {
                        row_id: row.id.clone(),
                        index: child_index,
                    });
                }
            }
        }
        None
    }

    pub fn contains(&self, id: &NodeId) -> bool {
        self.locate(id).is_some()
    }

    /// Top-level node at an index
    pub fn node_at(&self, index: usize) -> Option<&Node> {
        self.nodes.get(index)
    }

    /// Top-level index of a row group
    pub fn row_index(&self, row_id: &NodeId) -> Option<usize> {
        self.nodes
            .iter()
            .position(|n| n.is_row() && n.id() == row_id)
    }

    pub fn row(&self, row_id: &NodeId) -> Option<&RowGroup> {
        self.nodes
            .iter()
            .filter_map(Node::as_row)
            .find(|row| &row.id == row_id)
    }

    fn row_mut(&mut self, row_id: &NodeId) -> Result<&mut RowGroup> {
        self.nodes
            .iter_mut()
            .find_map(|node| match node {
                Node::RowGroup(row) if &row.id == row_id => Some(row),
                _ => None,
            })
            .ok_or_else(|| ModelError::RowNotFound(row_id.clone()))
    }

    /// Whether the ID names a row group
    pub fn is_row(&self, id: &NodeId) -> bool {
        self.row(id).is_some()
    }

    /// Find a field anywhere in the canvas
    pub fn find_field(&self, id: &NodeId) -> Option<&Field> {
        self.iter_fields().find(|f| &f.id == id)
    }

    /// Top-level index of the node that holds the given location
    pub fn top_level_index(&self, location: &Location) -> Option<usize> {
        match location {
            Location::TopLevel(index) => (*index < self.nodes.len()).then_some(*index),
            Location::InRow { row_id, .. } => self.row_index(row_id),
        }
    }

    // =========================================================================
    // Mutation helpers
    // =========================================================================

    /// Insert a node into the top-level column; `index == len` appends
    pub fn insert_top_level(&mut self, index: usize, node: Node) -> Result<()> {
        if index > self.nodes.len() {
            return Err(ModelError::InvalidLocation(format!(
                "top-level index {} out of bounds (len {})",
                index,
                self.nodes.len()
            )));
        }
        self.nodes.insert(index, node);
        Ok(())
    }

    /// Replace the top-level node at an index, returning the old node
    pub fn replace_top_level(&mut self, index: usize, node: Node) -> Result<Node> {
        let slot = self.nodes.get_mut(index).ok_or_else(|| {
            ModelError::InvalidLocation(format!("top-level index {} out of bounds", index))
        })?;
        Ok(std::mem::replace(slot, node))
    }

    /// Insert a field into a row group at a child index
    pub fn insert_into_row(&mut self, row_id: &NodeId, index: usize, field: Field) -> Result<()> {
        let row = self.row_mut(row_id)?;
        if index > row.children.len() {
            return Err(ModelError::InvalidLocation(format!(
                "row {} index {} out of bounds (len {})",
                row_id,
                index,
                row.children.len()
            )));
        }
        if row.children.len() >= MAX_ROW_CHILDREN {
            return Err(ModelError::RowSizeOutOfRange {
                row_id: row_id.clone(),
                count: row.children.len() + 1,
                min: MIN_ROW_CHILDREN,
                max: MAX_ROW_CHILDREN,
            });
        }
        row.children.insert(index, field);
        Ok(())
    }

    /// Detach the node at a location
    ///
    /// Removing from a row may leave it with fewer than two children; the
    /// row stays in place until the dissolution pass runs.
    pub fn remove_at(&mut self, location: &Location) -> Result<Node> {
        match location {
            Location::TopLevel(index) => {
                if *index >= self.nodes.len() {
                    return Err(ModelError::InvalidLocation(format!(
                        "top-level index {} out of bounds (len {})",
                        index,
                        self.nodes.len()
                    )));
                }
                Ok(self.nodes.remove(*index))
            }
            Location::InRow { row_id, index } => {
                let row = self.row_mut(row_id)?;
                if *index >= row.children.len() {
                    return Err(ModelError::InvalidLocation(format!(
                        "row {} index {} out of bounds (len {})",
                        row_id,
                        index,
                        row.children.len()
                    )));
                }
                Ok(Node::Field(row.children.remove(*index)))
            }
        }
    }

    /// Detach a node by ID
    pub fn remove(&mut self, id: &NodeId) -> Result<Node> {
        let location = self
            .locate(id)
            .ok_or_else(|| ModelError::NodeNotFound(id.clone()))?;
        self.remove_at(&location)
    }

    // =========================================================================
    // Invariants
    // =========================================================================

    /// Check the settled-tree invariants
    ///
    /// Every row holds 2..=4 fields, IDs are unique across the whole canvas
    /// and every field's properties match its component type.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for node in &self.nodes {
            if !seen.insert(node.id()) {
                return Err(ModelError::DuplicateId(node.id().clone()));
            }
            match node {
                Node::Field(field) => field.validate()?,
                Node::RowGroup(row) => {
                    if !row.is_settled() {
                        return Err(ModelError::RowSizeOutOfRange {
                            row_id: row.id.clone(),
                            count: row.children.len(),
                            min: MIN_ROW_CHILDREN,
                            max: MAX_ROW_CHILDREN,
                        });
                    }
                    for child in &row.children {
                        if !seen.insert(&child.id) {
                            return Err(ModelError::DuplicateId(child.id.clone()));
                        }
                        child.validate()?;
                    }
                }
            }
        }
        Ok(())
    }
}

impl FromIterator<Node> for Canvas {
    fn from_iter<I: IntoIterator<Item = Node>>(iter: I) -> Self {
        Self {
            nodes: iter.into_iter().collect(),
        }
    }
}
