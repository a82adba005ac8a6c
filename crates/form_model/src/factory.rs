//! Field factories
//!
//! The layout engine never invents field contents itself. When a palette item
//! is dropped it asks a [`FieldFactory`] for a fresh field, and when two fields
//! are combined into a row it asks the factory for the row's ID.

use crate::{Canvas, ComponentType, Field, Node, NodeId};

/// Source of fresh fields and row IDs
pub trait FieldFactory {
    /// Create a field with a fresh unique ID and type defaults
    fn create_field(&mut self, component_type: ComponentType) -> Field;

    /// Produce a fresh unique ID for a new row group
    fn next_row_id(&mut self) -> NodeId;

    /// Produce a fresh unique ID for a copy of an existing field
    fn next_field_id(&mut self) -> NodeId;

    /// Account for IDs already present in `canvas`, e.g. after loading a document
    fn sync_with(&mut self, _canvas: &Canvas) {}
}

/// Production factory backed by random UUIDs
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidFieldFactory;

impl FieldFactory for UuidFieldFactory {
    fn create_field(&mut self, component_type: ComponentType) -> Field {
        Field::new(NodeId::new(), component_type)
    }

    fn next_row_id(&mut self) -> NodeId {
        NodeId::new()
    }

    fn next_field_id(&mut self) -> NodeId {
        NodeId::new()
    }
}

/// Deterministic factory producing `field-1`, `row-2`, ... style IDs
///
/// Two factories with the same prefix and starting counter hand out the same
/// sequence, which makes whole editing sessions reproducible.
#[derive(Debug, Clone)]
pub struct SequentialFieldFactory {
    prefix: String,
    counter: u64,
}

impl SequentialFieldFactory {
    pub fn new() -> Self {
        Self::with_prefix("")
    }

    /// IDs become `<prefix>field-<n>` and `<prefix>row-<n>`
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            counter: 0,
        }
    }

    /// Number of IDs handed out so far
    pub fn issued(&self) -> u64 {
        self.counter
    }

    /// Sequence number of an ID this factory could have issued
    fn sequence_of(&self, id: &NodeId) -> Option<u64> {
        let rest = id.as_str().strip_prefix(self.prefix.as_str())?;
        let number = rest
            .strip_prefix("field-")
            .or_else(|| rest.strip_prefix("row-"))?;
        number.parse().ok()
    }

    fn next_id(&mut self, kind: &str) -> NodeId {
        self.counter += 1;
        NodeId::from(format!("{}{}-{}", self.prefix, kind, self.counter))
    }
}

impl Default for SequentialFieldFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldFactory for SequentialFieldFactory {
    fn create_field(&mut self, component_type: ComponentType) -> Field {
        let id = self.next_id("field");
        Field::new(id, component_type)
    }

    fn next_row_id(&mut self) -> NodeId {
        self.next_id("row")
    }

    fn next_field_id(&mut self) -> NodeId {
        self.next_id("field")
    }

    fn sync_with(&mut self, canvas: &Canvas) {
        let highest = canvas
            .nodes()
            .iter()
            .flat_map(|node| {
                let children = match node {
                    Node::RowGroup(row) => row.children.as_slice(),
                    Node::Field(_) => &[][..],
                };
                std::iter::once(node.id()).chain(children.iter().map(|c| &c.id))
            })
            .filter_map(|id| self.sequence_of(id))
            .max();
        if let Some(highest) = highest {
            self.counter = self.counter.max(highest);
        }
    }
}
