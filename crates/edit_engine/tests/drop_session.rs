//! End-to-end drop handling through the editor session
//!
//! Every drop here goes through pointer geometry, the same path a host takes.

use edit_engine::{DropEvent, DropStatus, DropTarget, EditorSettings, FormEditor};
use form_model::{Canvas, ComponentType, Field, Node, NodeId, RowGroup, SequentialFieldFactory};
use layout_engine::{DragPayload, Intent, Point, Rect, RejectionReason};
use proptest::prelude::*;
use proptest::sample::Index;

// =============================================================================
// Helpers
// =============================================================================

const WIDTH: f64 = 200.0;
const HEIGHT: f64 = 50.0;

fn field(id: &str) -> Field {
    Field::new(NodeId::from(id), ComponentType::TextInput)
}

fn row(id: &str, children: &[&str]) -> Node {
    Node::RowGroup(RowGroup::new(
        NodeId::from(id),
        children.iter().map(|c| field(c)).collect(),
    ))
}

fn editor(nodes: Vec<Node>) -> FormEditor {
    FormEditor::with_factory(
        Canvas::from_nodes(nodes),
        &EditorSettings::default(),
        Box::new(SequentialFieldFactory::with_prefix("new-")),
    )
    .unwrap()
}

/// Drop at a fraction of the target's bounds
fn drop_at(target: &str, fx: f64, fy: f64, payload: DragPayload) -> DropEvent {
    DropEvent::new(
        Point::new(fx * WIDTH, fy * HEIGHT),
        Some(DropTarget::new(target, Rect::new(0.0, 0.0, WIDTH, HEIGHT))),
        payload,
    )
}

fn child_ids(canvas: &Canvas, row_id: &str) -> Vec<String> {
    canvas
        .row(&NodeId::from(row_id))
        .map(|row| row.children.iter().map(|f| f.id.to_string()).collect())
        .unwrap_or_default()
}

fn top_ids(canvas: &Canvas) -> Vec<String> {
    canvas.nodes().iter().map(|n| n.id().to_string()).collect()
}

// =============================================================================
// Scenarios
// =============================================================================

#[test]
fn test_right_edge_of_field_creates_row() {
    let mut editor = editor(vec![Node::Field(field("a"))]);
    let outcome = editor.drop_item(&drop_at(
        "a",
        0.95,
        0.5,
        DragPayload::palette(ComponentType::TextInput),
    ));

    assert_eq!(outcome.status, DropStatus::Applied { intent: Intent::Right });
    let canvas = editor.canvas();
    assert_eq!(canvas.len(), 1);
    let row = canvas.node_at(0).and_then(Node::as_row).unwrap();
    let order: Vec<&str> = row.children.iter().map(|f| f.id.as_str()).collect();
    assert_eq!(order, vec!["a", "new-field-1"]);
    assert_eq!(row.id.as_str(), "new-row-2");
}

#[test]
fn test_after_on_row_child_lands_below_row() {
    let mut editor = editor(vec![row("r", &["a", "b"])]);
    editor.drop_item(&drop_at(
        "a",
        0.5,
        0.95,
        DragPayload::palette(ComponentType::Checkbox),
    ));
    assert_eq!(top_ids(editor.canvas()), vec!["r", "new-field-1"]);
    assert_eq!(child_ids(editor.canvas(), "r"), vec!["a", "b"]);

    editor.drop_item(&drop_at(
        "b",
        0.5,
        0.05,
        DragPayload::palette(ComponentType::Checkbox),
    ));
    assert_eq!(top_ids(editor.canvas()), vec!["new-field-2", "r", "new-field-1"]);
}

#[test]
fn test_delete_from_pair_promotes_survivor() {
    let mut editor = editor(vec![row("r", &["a", "b"])]);
    editor.delete(&NodeId::from("a")).unwrap();
    assert_eq!(
        editor.canvas(),
        &Canvas::from_nodes(vec![Node::Field(field("b"))])
    );
}

#[test]
fn test_full_row_refuses_fifth_field() {
    let mut editor = editor(vec![row("r", &["a", "b", "c", "d"])]);
    for (target, fx) in [("a", 0.05), ("d", 0.95)] {
        let outcome = editor.drop_item(&drop_at(
            target,
            fx,
            0.5,
            DragPayload::palette(ComponentType::Number),
        ));
        match outcome.status {
            DropStatus::Rejected { reason, .. } => assert_eq!(
                reason,
                RejectionReason::CapacityExceeded {
                    row_id: NodeId::from("r"),
                    capacity: 4
                }
            ),
            other => panic!("expected capacity rejection, got {:?}", other),
        }
    }
    assert_eq!(child_ids(editor.canvas(), "r").len(), 4);
    assert!(!editor.can_undo());
}

#[test]
fn test_row_beside_field_rejected() {
    let mut editor = editor(vec![row("r", &["a", "b"]), Node::Field(field("c"))]);
    let original = editor.canvas().clone();

    for fx in [0.05, 0.95] {
        let outcome = editor.drop_item(&drop_at("c", fx, 0.5, DragPayload::canvas("r")));
        match outcome.status {
            DropStatus::Rejected {
                reason,
                alternatives,
            } => {
                assert_eq!(reason, RejectionReason::NestedRowNotAllowed);
                assert_eq!(alternatives, vec![Intent::Before, Intent::After]);
            }
            other => panic!("expected nesting rejection, got {:?}", other),
        }
        assert_eq!(editor.canvas(), &original);
    }

    let outcome = editor.drop_item(&drop_at("c", 0.5, 0.95, DragPayload::canvas("r")));
    assert!(outcome.is_applied());
    assert_eq!(top_ids(editor.canvas()), vec!["c", "r"]);
}

#[test]
fn test_moving_last_but_one_child_out_dissolves_row() {
    let mut editor = editor(vec![row("r", &["a", "b"]), Node::Field(field("c"))]);
    editor.drop_item(&drop_at("c", 0.95, 0.5, DragPayload::canvas("a")));

    let canvas = editor.canvas();
    assert_eq!(canvas.len(), 2);
    assert_eq!(canvas.node_at(0), Some(&Node::Field(field("b"))));
    assert_eq!(child_ids(canvas, "new-row-1"), vec!["c", "a"]);
    assert!(canvas.validate().is_ok());
}

#[test]
fn test_hover_matches_drop() {
    let mut editor = editor(vec![Node::Field(field("a")), Node::Field(field("b"))]);
    let event = drop_at("b", 0.05, 0.5, DragPayload::canvas("a"));

    let preview = editor.hover(&event);
    assert_eq!(preview.intent, Intent::Left);
    assert!(preview.is_accepted());
    assert_eq!(editor.canvas().len(), 2);

    let outcome = editor.drop_item(&event);
    assert_eq!(outcome.status, DropStatus::Applied { intent: Intent::Left });
    assert_eq!(child_ids(editor.canvas(), "new-row-1"), vec!["a", "b"]);
}

#[test]
fn test_session_survives_json_round_trip() {
    let mut editor = editor(vec![]);
    editor.drop_item(&DropEvent::on_empty_canvas(DragPayload::palette(
        ComponentType::Heading,
    )));
    editor.drop_item(&drop_at(
        "new-field-1",
        0.95,
        0.5,
        DragPayload::palette(ComponentType::Select),
    ));
    let json = editor.to_json().unwrap();

    let mut restored = FormEditor::new();
    restored.load_json(&json).unwrap();
    assert_eq!(restored.canvas(), editor.canvas());
}

#[test]
fn test_loaded_document_then_palette_drop() {
    let mut first = editor(vec![]);
    for _ in 0..2 {
        first.drop_item(&DropEvent::on_empty_canvas(DragPayload::palette(
            ComponentType::TextInput,
        )));
    }
    first.duplicate(&NodeId::from("new-field-1")).unwrap();

    let mut second = editor(vec![]);
    second.load_json(&first.to_json().unwrap()).unwrap();
    second.drop_item(&drop_at(
        "new-field-1",
        0.95,
        0.5,
        DragPayload::palette(ComponentType::Email),
    ));
    second.duplicate(&NodeId::from("new-field-2")).unwrap();

    let canvas = second.canvas();
    assert!(canvas.validate().is_ok());
    assert_eq!(canvas.field_count(), 5);
    assert!(FormEditor::new().load_json(&second.to_json().unwrap()).is_ok());
}

// =============================================================================
// Random sessions
// =============================================================================

#[derive(Debug, Clone)]
enum Step {
    Palette { target: Index, kind: Index, fx: f64, fy: f64 },
    Move { source: Index, target: Index, fx: f64, fy: f64 },
    Delete { node: Index },
}

fn step_strategy() -> impl Strategy<Value = Step> {
    let frac = || -0.1f64..1.1;
    prop_oneof![
        3 => (any::<Index>(), any::<Index>(), frac(), frac())
            .prop_map(|(target, kind, fx, fy)| Step::Palette { target, kind, fx, fy }),
        4 => (any::<Index>(), any::<Index>(), frac(), frac())
            .prop_map(|(source, target, fx, fy)| Step::Move { source, target, fx, fy }),
        1 => any::<Index>().prop_map(|node| Step::Delete { node }),
    ]
}

fn every_id(canvas: &Canvas) -> Vec<NodeId> {
    let mut ids = Vec::new();
    for node in canvas.nodes() {
        ids.push(node.id().clone());
        if let Node::RowGroup(row) = node {
            ids.extend(row.children.iter().map(|c| c.id.clone()));
        }
    }
    ids
}

proptest! {
    #[test]
    fn prop_random_session_stays_settled(steps in prop::collection::vec(step_strategy(), 1..30)) {
        let initial = Canvas::from_nodes(vec![
            Node::Field(field("a")),
            row("r", &["b", "c"]),
            Node::Field(field("d")),
        ]);
        let mut editor = editor(initial.nodes().to_vec());
        let mut changes = 0;

        for step in steps {
            let ids = every_id(editor.canvas());
            let fields_before = editor.canvas().field_count();
            match step {
                Step::Palette { target, kind, fx, fy } => {
                    let ct = kind.get(&ComponentType::ALL);
                    let payload = DragPayload::palette(*ct);
                    let event = if ids.is_empty() {
                        DropEvent::on_empty_canvas(payload)
                    } else {
                        drop_at(target.get(&ids).as_str(), fx, fy, payload)
                    };
                    let outcome = editor.drop_item(&event);
                    let expected = fields_before + usize::from(outcome.is_applied());
                    prop_assert_eq!(editor.canvas().field_count(), expected);
                    prop_assert!(!matches!(outcome.status, DropStatus::Aborted(_)));
                    changes += usize::from(outcome.is_applied());
                }
                Step::Move { source, target, fx, fy } => {
                    if ids.is_empty() {
                        continue;
                    }
                    let event = drop_at(
                        target.get(&ids).as_str(),
                        fx,
                        fy,
                        DragPayload::canvas(source.get(&ids).clone()),
                    );
                    let outcome = editor.drop_item(&event);
                    prop_assert_eq!(editor.canvas().field_count(), fields_before);
                    prop_assert!(!matches!(outcome.status, DropStatus::Aborted(_)));
                    changes += usize::from(outcome.is_applied());
                }
                Step::Delete { node } => {
                    if ids.is_empty() {
                        continue;
                    }
                    prop_assert!(editor.delete(node.get(&ids)).is_ok());
                    prop_assert!(editor.canvas().field_count() < fields_before);
                    changes += 1;
                }
            }
            prop_assert!(editor.canvas().validate().is_ok());
        }

        for _ in 0..changes {
            prop_assert!(editor.undo().is_ok());
        }
        prop_assert!(!editor.can_undo());
        prop_assert_eq!(editor.canvas(), &initial);
    }
}
