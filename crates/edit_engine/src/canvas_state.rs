//! Drop orchestration
//!
//! [`CanvasStateManager`] runs one hover or drop end to end: resolve the drag
//! payload, classify the pointer over the target, ask the layout engine for
//! the new canvas and dissolve any rows left degenerate. Hover never changes
//! anything; a drop returns either a new canvas or the original one together
//! with the reason it was refused.

use crate::{EditError, Result};
use form_model::{
    Canvas, Field, FieldFactory, Location, ModelError, Node, NodeId, RowGroup, UuidFieldFactory,
};
use layout_engine::{
    apply, classify, dissolve_owned, plan, resolve, DragPayload, DropPlan, FatalError, Intent,
    LayoutError, Point, Rect, RejectionReason, Source, ZoneConfig,
};
use serde::{Deserialize, Serialize};

/// The element under the pointer and its rendered bounds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DropTarget {
    pub node_id: NodeId,
    pub bounds: Rect,
}

impl DropTarget {
    pub fn new(node_id: impl Into<NodeId>, bounds: Rect) -> Self {
        Self {
            node_id: node_id.into(),
            bounds,
        }
    }
}

/// A pointer event over the canvas during a drag
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DropEvent {
    pub pointer: Point,
    /// `None` when the pointer is over empty canvas space
    pub target: Option<DropTarget>,
    pub payload: DragPayload,
}

impl DropEvent {
    pub fn new(pointer: Point, target: Option<DropTarget>, payload: DragPayload) -> Self {
        Self {
            pointer,
            target,
            payload,
        }
    }

    /// A drop on empty canvas space
    pub fn on_empty_canvas(payload: DragPayload) -> Self {
        Self::new(Point::default(), None, payload)
    }
}

/// How a drop ended
#[derive(Debug, Clone, PartialEq)]
pub enum DropStatus {
    /// The canvas changed
    Applied { intent: Intent },
    /// Refused by the layout rules; `alternatives` lists intents on the same
    /// target that would be accepted
    Rejected {
        reason: RejectionReason,
        alternatives: Vec<Intent>,
    },
    /// Host and canvas disagree about what exists; nothing changed
    Aborted(FatalError),
}

/// Result of [`CanvasStateManager::handle_drop`]
#[derive(Debug, Clone, PartialEq)]
pub struct DropOutcome {
    /// The canvas to keep: new on success, the original otherwise
    pub canvas: Canvas,
    pub status: DropStatus,
}

impl DropOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self.status, DropStatus::Applied { .. })
    }

    /// Message to show the user, if any
    pub fn notice(&self) -> Option<String> {
        match &self.status {
            DropStatus::Rejected { reason, .. } if !reason.is_silent() => {
                Some(reason.user_message())
            }
            _ => None,
        }
    }
}

/// Live feedback while dragging
#[derive(Debug, Clone, PartialEq)]
pub struct DropPreview {
    /// Intent under the pointer
    pub intent: Intent,
    /// What would happen if released here, when accepted
    pub plan: Option<DropPlan>,
    pub rejection: Option<RejectionReason>,
    pub alternatives: Vec<Intent>,
}

impl DropPreview {
    pub fn is_accepted(&self) -> bool {
        self.plan.is_some()
    }

    fn invalid() -> Self {
        Self {
            intent: Intent::Reject,
            plan: None,
            rejection: None,
            alternatives: Vec::new(),
        }
    }
}

/// Orchestrates hover feedback and drops against a canvas value
pub struct CanvasStateManager {
    zones: ZoneConfig,
    factory: Box<dyn FieldFactory>,
}

impl CanvasStateManager {
    /// Create a manager with default zones and UUID field IDs
    pub fn new() -> Self {
        Self::with_factory(ZoneConfig::default(), Box::new(UuidFieldFactory))
    }

    pub fn with_factory(zones: ZoneConfig, factory: Box<dyn FieldFactory>) -> Self {
        Self { zones, factory }
    }

    pub fn zones(&self) -> &ZoneConfig {
        &self.zones
    }

    pub fn set_zones(&mut self, zones: ZoneConfig) {
        self.zones = zones;
    }

    /// Work out the intent and target ID for an event
    fn intent_for(
        &self,
        canvas: &Canvas,
        event: &DropEvent,
    ) -> std::result::Result<(Intent, Option<NodeId>), FatalError> {
        let Some(target) = &event.target else {
            return Ok((Intent::AppendToEnd, None));
        };
        if !canvas.contains(&target.node_id) {
            return Err(FatalError::TargetNotFound(target.node_id.clone()));
        }
        let target_is_row = canvas.is_row(&target.node_id);
        let intent = classify(event.pointer, target.bounds, target_is_row, &self.zones);
        Ok((intent, Some(target.node_id.clone())))
    }

    /// Intents on the same target that would be accepted instead
    fn alternatives(
        canvas: &Canvas,
        reason: &RejectionReason,
        source: &Source,
        target: Option<&NodeId>,
    ) -> Vec<Intent> {
        match reason {
            RejectionReason::CapacityExceeded { .. } | RejectionReason::NestedRowNotAllowed => {
                [Intent::Before, Intent::After]
                    .into_iter()
                    .filter(|intent| plan(canvas, *intent, source, target).is_ok())
                    .collect()
            }
            _ => Vec::new(),
        }
    }

    /// Classify a hover without changing anything
    pub fn hover(&self, canvas: &Canvas, event: &DropEvent) -> DropPreview {
        let Ok(source) = resolve(&event.payload, canvas) else {
            return DropPreview::invalid();
        };
        let Ok((intent, target)) = self.intent_for(canvas, event) else {
            return DropPreview::invalid();
        };

        match plan(canvas, intent, &source, target.as_ref()) {
            Ok(plan) => DropPreview {
                intent,
                plan: Some(plan),
                rejection: None,
                alternatives: Vec::new(),
            },
            Err(LayoutError::Rejected(reason)) => DropPreview {
                intent,
                plan: None,
                alternatives: Self::alternatives(canvas, &reason, &source, target.as_ref()),
                rejection: Some(reason),
            },
            Err(LayoutError::Fatal(_)) => DropPreview::invalid(),
        }
    }

    /// Run a drop end to end
    pub fn handle_drop(&mut self, canvas: &Canvas, event: &DropEvent) -> DropOutcome {
        let resolved = resolve(&event.payload, canvas).and_then(|source| {
            self.intent_for(canvas, event)
                .map(|(intent, target)| (source, intent, target))
        });
        let (source, intent, target) = match resolved {
            Ok(parts) => parts,
            Err(err) => return Self::aborted(canvas, err),
        };

        self.factory.sync_with(canvas);
        match apply(canvas, intent, &source, target.as_ref(), self.factory.as_mut()) {
            Ok(next) => {
                let next = dissolve_owned(next);
                tracing::debug!(
                    target: "edit_engine::drop",
                    ?intent,
                    nodes = next.len(),
                    fields = next.field_count(),
                    "drop applied"
                );
                DropOutcome {
                    canvas: next,
                    status: DropStatus::Applied { intent },
                }
            }
            Err(LayoutError::Rejected(reason)) => {
                tracing::debug!(
                    target: "edit_engine::drop",
                    ?intent,
                    %reason,
                    "drop rejected"
                );
                let alternatives = Self::alternatives(canvas, &reason, &source, target.as_ref());
                DropOutcome {
                    canvas: canvas.clone(),
                    status: DropStatus::Rejected {
                        reason,
                        alternatives,
                    },
                }
            }
            Err(LayoutError::Fatal(err)) => Self::aborted(canvas, err),
        }
    }

    fn aborted(canvas: &Canvas, err: FatalError) -> DropOutcome {
        tracing::error!(target: "edit_engine::drop", "drop aborted: {}", err);
        DropOutcome {
            canvas: canvas.clone(),
            status: DropStatus::Aborted(err),
        }
    }

    /// Remove a field or a whole row, dissolving whatever row it leaves behind
    pub fn delete_node(&self, canvas: &Canvas, id: &NodeId) -> Result<Canvas> {
        let mut next = canvas.clone();
        if !next.contains(id) {
            return Err(EditError::NodeNotFound(id.clone()));
        }
        let removed = next.remove(id)?;
        tracing::debug!(
            target: "edit_engine::delete",
            node = %id,
            fields_removed = removed.field_count(),
            "node deleted"
        );
        Ok(dissolve_owned(next))
    }

    /// Copy a field or row with fresh IDs and place the copy next to the original
    ///
    /// A field copy goes right of the original when its row has room, below
    /// the row otherwise; a row copy goes below the row.
    pub fn duplicate_node(&mut self, canvas: &Canvas, id: &NodeId) -> Result<Canvas> {
        let location = canvas
            .locate(id)
            .ok_or_else(|| EditError::NodeNotFound(id.clone()))?;
        self.factory.sync_with(canvas);
        let mut next = canvas.clone();

        match location {
            Location::TopLevel(index) => {
                let copy = match canvas.node_at(index) {
                    Some(Node::Field(field)) => Node::Field(self.copy_field(canvas, field)?),
                    Some(Node::RowGroup(row)) => {
                        let children = row
                            .children
                            .iter()
                            .map(|f| self.copy_field(canvas, f))
                            .collect::<Result<Vec<_>>>()?;
                        let row_id = fresh(canvas, self.factory.next_row_id())?;
                        Node::RowGroup(RowGroup::new(row_id, children))
                    }
                    None => return Err(EditError::NodeNotFound(id.clone())),
                };
                next.insert_top_level(index + 1, copy)?;
            }
            Location::InRow { row_id, index } => {
                let row = canvas
                    .row(&row_id)
                    .ok_or_else(|| EditError::NodeNotFound(row_id.clone()))?;
                let copy = self.copy_field(canvas, &row.children[index])?;
                if row.has_room() {
                    next.insert_into_row(&row_id, index + 1, copy)?;
                } else {
                    let row_index = canvas
                        .row_index(&row_id)
                        .ok_or_else(|| EditError::NodeNotFound(row_id.clone()))?;
                    next.insert_top_level(row_index + 1, Node::Field(copy))?;
                }
            }
        }

        tracing::debug!(target: "edit_engine::duplicate", node = %id, "node duplicated");
        Ok(next)
    }

    fn copy_field(&mut self, canvas: &Canvas, field: &Field) -> Result<Field> {
        Ok(Field {
            id: fresh(canvas, self.factory.next_field_id())?,
            ..field.clone()
        })
    }
}

fn fresh(canvas: &Canvas, id: NodeId) -> Result<NodeId> {
    if canvas.contains(&id) {
        return Err(ModelError::DuplicateId(id).into());
    }
    Ok(id)
}

impl Default for CanvasStateManager {
    fn default() -> Self {
        Self::new()
    }
}
