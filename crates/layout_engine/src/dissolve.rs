//! Row dissolution
//!
//! After a drop or a deletion a row may be left with one field or none.
//! Dissolution removes empty rows and replaces single-field rows with their
//! field at the same column position, so every row that survives holds at
//! least two fields.

use form_model::{Canvas, Node, MIN_ROW_CHILDREN};

/// Whether any row is below the settled size
pub fn needs_dissolution(canvas: &Canvas) -> bool {
    canvas
        .iter_rows()
        .any(|row| row.children.len() < MIN_ROW_CHILDREN)
}

/// Dissolve degenerate rows, leaving everything else in place
pub fn dissolve(canvas: &Canvas) -> Canvas {
    if !needs_dissolution(canvas) {
        return canvas.clone();
    }
    dissolve_owned(canvas.clone())
}

/// Dissolve degenerate rows of an owned canvas
pub fn dissolve_owned(canvas: Canvas) -> Canvas {
    let before = canvas.len();
    let result: Canvas = canvas
        .into_nodes()
        .into_iter()
        .filter_map(|node| match node {
            Node::RowGroup(mut row) => match row.children.len() {
                0 => None,
                1 => row.children.pop().map(Node::Field),
                _ => Some(Node::RowGroup(row)),
            },
            field => Some(field),
        })
        .collect();

    tracing::trace!(
        target: "layout_engine::dissolve",
        nodes_before = before,
        nodes_after = result.len(),
        "dissolution pass complete"
    );
    result
}
