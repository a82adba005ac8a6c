//! Fields and row groups

use crate::{ComponentType, FieldProperties, ModelError, NodeId, Result};
use serde::{Deserialize, Serialize};

/// Maximum number of fields a row group may hold
pub const MAX_ROW_CHILDREN: usize = 4;

/// Minimum number of fields a settled row group holds
pub const MIN_ROW_CHILDREN: usize = 2;

/// A leaf form element
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    pub id: NodeId,
    pub component_type: ComponentType,
    pub label: String,
    pub properties: FieldProperties,
}

impl Field {
    /// Create a field with the default label and properties for its type
    pub fn new(id: NodeId, component_type: ComponentType) -> Self {
        Self {
            id,
            component_type,
            label: component_type.display_name().to_string(),
            properties: FieldProperties::defaults_for(component_type),
        }
    }

    /// Create a field with explicit properties, validating them against the type
    pub fn with_properties(
        id: NodeId,
        component_type: ComponentType,
        label: impl Into<String>,
        properties: FieldProperties,
    ) -> Result<Self> {
        let field = Self {
            id,
            component_type,
            label: label.into(),
            properties,
        };
        field.validate()?;
        Ok(field)
    }

    /// Check that the property payload matches the component type
    pub fn validate(&self) -> Result<()> {
        if self.properties.accepts(self.component_type) {
            Ok(())
        } else {
            Err(ModelError::PropertiesMismatch {
                component_type: self.component_type,
                properties: self.properties.kind_name(),
            })
        }
    }
}

/// A horizontal container of fields
///
/// Children are always fields, so a row can never contain another row.
/// Outside of an in-progress mutation a row holds between
/// [`MIN_ROW_CHILDREN`] and [`MAX_ROW_CHILDREN`] fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowGroup {
    pub id: NodeId,
    pub children: Vec<Field>,
}

impl RowGroup {
    pub fn new(id: NodeId, children: Vec<Field>) -> Self {
        Self { id, children }
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Whether another field can be added without exceeding capacity
    pub fn has_room(&self) -> bool {
        self.children.len() < MAX_ROW_CHILDREN
    }

    /// Index of a child field within this row
    pub fn position_of(&self, field_id: &NodeId) -> Option<usize> {
        self.children.iter().position(|f| &f.id == field_id)
    }

    pub fn contains(&self, field_id: &NodeId) -> bool {
        self.position_of(field_id).is_some()
    }

    /// Whether the child count is within the settled range
    pub fn is_settled(&self) -> bool {
        (MIN_ROW_CHILDREN..=MAX_ROW_CHILDREN).contains(&self.children.len())
    }
}
