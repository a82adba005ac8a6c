//! JSON document format for saved forms
//!
//! A saved form is a JSON array of nodes. Each node carries a `type` tag
//! (`"field"` or `"row"`); fields carry their `componentType`, `label` and a
//! `properties` object tagged by `kind`. Loading validates the tree so an
//! invalid document never reaches the layout engine.

use crate::{Canvas, Result};

impl Canvas {
    /// Serialize to compact JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Serialize to indented JSON
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse and validate a saved form
    pub fn from_json(json: &str) -> Result<Self> {
        let canvas: Canvas = serde_json::from_str(json)?;
        canvas.validate()?;
        tracing::debug!(
            target: "form_model::document",
            nodes = canvas.len(),
            fields = canvas.field_count(),
            "form document loaded"
        );
        Ok(canvas)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ComponentType, Field, ModelError, Node, NodeId, RowGroup};

    fn sample() -> Canvas {
        Canvas::from_nodes(vec![
            Node::Field(Field::new(NodeId::from("name"), ComponentType::TextInput)),
            Node::RowGroup(RowGroup::new(
                NodeId::from("row-1"),
                vec![
                    Field::new(NodeId::from("city"), ComponentType::Select),
                    Field::new(NodeId::from("zip"), ComponentType::Number),
                ],
            )),
            Node::Field(Field::new(NodeId::from("submit"), ComponentType::Button)),
        ])
    }

    #[test]
    fn test_round_trip() {
        let canvas = sample();
        let json = canvas.to_json_pretty().unwrap();
        let back = Canvas::from_json(&json).unwrap();
        assert_eq!(back, canvas);
    }

    #[test]
    fn test_document_shape() {
        let value: serde_json::Value = serde_json::from_str(&sample().to_json().unwrap()).unwrap();
        let nodes = value.as_array().unwrap();
        assert_eq!(nodes.len(), 3);
        assert_eq!(nodes[0]["type"], "field");
        assert_eq!(nodes[0]["componentType"], "text_input");
        assert_eq!(nodes[0]["properties"]["kind"], "text");
        assert_eq!(nodes[1]["type"], "row");
        assert_eq!(nodes[1]["children"][1]["id"], "zip");
    }

    #[test]
    fn test_load_rejects_degenerate_row() {
        let json = r#"[
            {"type": "row", "id": "r", "children": [
                {"id": "a", "componentType": "checkbox", "label": "A",
                 "properties": {"kind": "boolean", "required": false, "defaultChecked": true}}
            ]}
        ]"#;
        let err = Canvas::from_json(json).unwrap_err();
        assert!(matches!(err, ModelError::RowSizeOutOfRange { count: 1, .. }));
    }

    #[test]
    fn test_load_rejects_mismatched_properties() {
        let json = r#"[
            {"type": "field", "id": "a", "componentType": "number", "label": "Age",
             "properties": {"kind": "divider"}}
        ]"#;
        assert!(matches!(
            Canvas::from_json(json),
            Err(ModelError::PropertiesMismatch { .. })
        ));
    }

    #[test]
    fn test_load_rejects_malformed_json() {
        assert!(matches!(
            Canvas::from_json("{not json"),
            Err(ModelError::Serialization(_))
        ));
    }
}
