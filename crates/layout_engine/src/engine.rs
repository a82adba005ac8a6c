//! Canvas arrangement state machine
//!
//! A drop is decided in two phases. [`plan`] inspects the original canvas and
//! either rejects the drop or produces a [`DropPlan`] naming the destination
//! [`Slot`]. [`apply`] then executes the plan on a copy of the canvas: it
//! detaches an existing source from its origin, shifts the destination to
//! account for that removal, and inserts the moved or freshly created node.
//!
//! Dispatch is a single match on (intent, source kind, target kind):
//!
//! | Intent        | plain field          | field inside a row      | row itself          |
//! |---------------|----------------------|-------------------------|---------------------|
//! | Before/After  | column index (+1)    | row's column index (+1) | row's index (+1)    |
//! | Left/Right    | combine into new row | insert beside (cap 4)   | nested, rejected    |
//! | InsertIntoRow | treated as After     | append to row (cap 4)   | append (cap 4)      |
//!
//! Rows being dragged may only move vertically. The result may contain rows
//! with fewer than two fields; run [`crate::dissolve`] before handing it on.

use crate::{FatalError, Intent, LayoutError, RejectionReason, Result, Source, SourceKind};
use form_model::{Canvas, Field, FieldFactory, Location, Node, NodeId, RowGroup};
use serde::{Deserialize, Serialize};

/// Which side of the target a combined field lands on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Left,
    Right,
}

/// Destination of a drop, addressed in the original canvas
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Slot {
    /// Insert into the column at this index
    TopLevel(usize),
    /// Insert into a row at this child index
    #[serde(rename_all = "camelCase")]
    InRow { row_id: NodeId, index: usize },
    /// Wrap the plain field at this column index into a new row
    Combine { index: usize, side: Side },
}

/// What the drop target is, structurally
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetKind {
    /// A field sitting directly in the column
    Field { index: usize },
    /// A field inside a row group
    RowChild {
        row_id: NodeId,
        row_index: usize,
        index: usize,
    },
    /// A row group as a whole
    Row { index: usize },
}

impl TargetKind {
    /// Column index of the target, or of the row holding it
    pub fn column_index(&self) -> usize {
        match self {
            TargetKind::Field { index } | TargetKind::Row { index } => *index,
            TargetKind::RowChild { row_index, .. } => *row_index,
        }
    }
}

/// Find and classify a drop target
pub fn target_kind(canvas: &Canvas, target: &NodeId) -> Option<TargetKind> {
    match canvas.locate(target)? {
        Location::TopLevel(index) => match canvas.node_at(index)? {
            Node::Field(_) => Some(TargetKind::Field { index }),
            Node::RowGroup(_) => Some(TargetKind::Row { index }),
        },
        Location::InRow { row_id, index } => {
            let row_index = canvas.row_index(&row_id)?;
            Some(TargetKind::RowChild {
                row_id,
                row_index,
                index,
            })
        }
    }
}

/// An accepted drop, ready to execute
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DropPlan {
    /// The intent after center/fallback resolution
    pub intent: Intent,
    pub slot: Slot,
}

/// Decide where a drop lands without touching the canvas
///
/// This is what hover feedback uses: it validates capacity, nesting and
/// self-reference exactly as [`apply`] would, but never creates a field.
pub fn plan(
    canvas: &Canvas,
    intent: Intent,
    source: &Source,
    target: Option<&NodeId>,
) -> Result<DropPlan> {
    match intent {
        Intent::Reject => return Err(RejectionReason::InvalidGeometry.into()),
        Intent::AppendToEnd => {
            return Ok(DropPlan {
                intent,
                slot: Slot::TopLevel(canvas.len()),
            })
        }
        _ => {}
    }

    let target = target.ok_or(FatalError::MissingTarget(intent))?;
    let kind =
        target_kind(canvas, target).ok_or_else(|| FatalError::TargetNotFound(target.clone()))?;

    if let Source::ExistingItem { node_id, kind: src_kind, .. } = source {
        if node_id == target {
            return Err(RejectionReason::SelfDrop.into());
        }
        if *src_kind == SourceKind::RowGroup {
            if let TargetKind::RowChild { row_id, .. } = &kind {
                if row_id == node_id {
                    return Err(RejectionReason::CircularReference.into());
                }
            }
        }
    }

    let slot = match (intent, &kind) {
        (Intent::Before, k) => Slot::TopLevel(k.column_index()),
        (Intent::After, k) => Slot::TopLevel(k.column_index() + 1),

        (intent, _) if intent.is_horizontal() && source.is_row() => {
            return Err(RejectionReason::NestedRowNotAllowed.into())
        }
        (Intent::Left | Intent::Right, TargetKind::Row { .. }) => {
            return Err(RejectionReason::NestedRowNotAllowed.into())
        }
        (Intent::Left, TargetKind::Field { index }) => Slot::Combine {
            index: *index,
            side: Side::Left,
        },
        (Intent::Right, TargetKind::Field { index }) => Slot::Combine {
            index: *index,
            side: Side::Right,
        },
        (Intent::Left | Intent::Right, TargetKind::RowChild { row_id, index, .. }) => {
            ensure_room(canvas, row_id, source)?;
            let offset = usize::from(intent == Intent::Right);
            Slot::InRow {
                row_id: row_id.clone(),
                index: index + offset,
            }
        }

        // center of a plain field resolves to "after"
        (Intent::InsertIntoRow, TargetKind::Field { index }) => {
            return Ok(DropPlan {
                intent: Intent::After,
                slot: Slot::TopLevel(index + 1),
            })
        }
        (Intent::InsertIntoRow, _) if source.is_row() => {
            return Err(RejectionReason::NestedRowNotAllowed.into())
        }
        (Intent::InsertIntoRow, TargetKind::Row { index }) => {
            let row = canvas
                .node_at(*index)
                .and_then(Node::as_row)
                .ok_or_else(|| FatalError::TargetNotFound(target.clone()))?;
            append_slot(canvas, &row.id, source)?
        }
        (Intent::InsertIntoRow, TargetKind::RowChild { row_id, .. }) => {
            append_slot(canvas, row_id, source)?
        }

        (Intent::AppendToEnd, _) => Slot::TopLevel(canvas.len()),
        (Intent::Reject, _) => return Err(RejectionReason::InvalidGeometry.into()),
    };

    Ok(DropPlan { intent, slot })
}

/// Reject additions to a full row; moves within the same row are always allowed
fn ensure_room(canvas: &Canvas, row_id: &NodeId, source: &Source) -> Result<()> {
    let row = canvas
        .row(row_id)
        .ok_or_else(|| FatalError::TargetNotFound(row_id.clone()))?;
    let moving_within = source.node_id().is_some_and(|id| row.contains(id));
    if moving_within || row.has_room() {
        Ok(())
    } else {
        Err(RejectionReason::capacity(row_id).into())
    }
}

fn append_slot(canvas: &Canvas, row_id: &NodeId, source: &Source) -> Result<Slot> {
    ensure_room(canvas, row_id, source)?;
    let len = canvas.row(row_id).map(RowGroup::len).unwrap_or(0);
    Ok(Slot::InRow {
        row_id: row_id.clone(),
        index: len,
    })
}

/// Shift a destination computed on the original canvas so it still points at
/// the same spot once the dragged node has been detached from `origin`.
///
/// Only removals earlier in the same sequence matter: a top-level removal
/// shifts top-level slots, a removal inside a row shifts slots in that row.
pub fn adjust_for_removal(slot: Slot, origin: &Location) -> Slot {
    match (slot, origin) {
        (Slot::TopLevel(index), Location::TopLevel(from)) if *from < index => {
            Slot::TopLevel(index - 1)
        }
        (Slot::Combine { index, side }, Location::TopLevel(from)) if *from < index => {
            Slot::Combine {
                index: index - 1,
                side,
            }
        }
        (Slot::InRow { row_id, index }, Location::InRow { row_id: from_row, index: from })
            if &row_id == from_row && *from < index =>
        {
            Slot::InRow {
                row_id,
                index: index - 1,
            }
        }
        (slot, _) => slot,
    }
}

/// Apply a drop to a copy of the canvas
///
/// New items grow the field count by exactly one; existing items are detached
/// and re-inserted in one step so the count never changes. On any error the
/// input canvas is untouched and no field is created.
pub fn apply(
    canvas: &Canvas,
    intent: Intent,
    source: &Source,
    target: Option<&NodeId>,
    factory: &mut dyn FieldFactory,
) -> Result<Canvas> {
    let plan = plan(canvas, intent, source, target)?;
    tracing::trace!(
        target: "layout_engine::engine",
        intent = ?plan.intent,
        slot = ?plan.slot,
        "drop planned"
    );

    let mut next = canvas.clone();
    let (moving, slot) = match source {
        Source::NewItem { component_type } => {
            let field = factory.create_field(*component_type);
            ensure_fresh(canvas, &field.id)?;
            (Node::Field(field), plan.slot)
        }
        Source::ExistingItem { node_id, origin, .. } => {
            let current = canvas
                .locate(node_id)
                .ok_or_else(|| FatalError::SourceNotFound(node_id.clone()))?;
            if &current != origin {
                tracing::warn!(
                    target: "layout_engine::engine",
                    node = %node_id,
                    stale = ?origin,
                    actual = ?current,
                    "drag origin out of date, using current location"
                );
            }
            let node = next.remove_at(&current)?;
            (node, adjust_for_removal(plan.slot, &current))
        }
    };

    insert(&mut next, slot, moving, factory)?;

    tracing::debug!(
        target: "layout_engine::engine",
        intent = ?plan.intent,
        fields_before = canvas.field_count(),
        fields_after = next.field_count(),
        "drop applied"
    );
    Ok(next)
}

fn insert(
    canvas: &mut Canvas,
    slot: Slot,
    moving: Node,
    factory: &mut dyn FieldFactory,
) -> Result<()> {
    match slot {
        Slot::TopLevel(index) => canvas.insert_top_level(index, moving)?,
        Slot::InRow { row_id, index } => {
            let field = into_field(moving)?;
            canvas.insert_into_row(&row_id, index, field)?;
        }
        Slot::Combine { index, side } => {
            let field = into_field(moving)?;
            let target = canvas
                .node_at(index)
                .and_then(Node::as_field)
                .cloned()
                .ok_or_else(|| {
                    FatalError::Inconsistent(format!("no plain field at column index {}", index))
                })?;
            let children = match side {
                Side::Left => vec![field, target],
                Side::Right => vec![target, field],
            };
            let row_id = factory.next_row_id();
            ensure_fresh(canvas, &row_id)?;
            let row = RowGroup::new(row_id, children);
            canvas.replace_top_level(index, Node::RowGroup(row))?;
        }
    }
    Ok(())
}

/// A factory-issued ID must not already name a node
fn ensure_fresh(canvas: &Canvas, id: &NodeId) -> Result<()> {
    if canvas.contains(id) {
        return Err(FatalError::Inconsistent(format!(
            "factory issued an ID already in use: {}",
            id
        ))
        .into());
    }
    Ok(())
}

fn into_field(node: Node) -> std::result::Result<Field, LayoutError> {
    match node {
        Node::Field(field) => Ok(field),
        Node::RowGroup(row) => Err(FatalError::Inconsistent(format!(
            "row {} cannot be placed inside a row",
            row.id
        ))
        .into()),
    }
}
