//! Integration tests for the Engine API.

use trellis::{
    Engine, LayoutOutcome, OccurrenceKind, TrellisError,
    config::{AppConfig, LayoutConfig},
    document::DocumentError,
    identifier::Id,
    model::Hierarchy,
};

const PROCESS: &str = r#"
namespace = "http://b3mn.org/stencilset/bpel#"

[[nodes]]
id = "process"
kind = "process"
children = ["main", "handlers"]
bounds = { x = 0.0, y = 0.0, width = 100.0, height = 100.0 }

[[nodes]]
id = "main"
kind = "sequence"
children = ["receive", "reply"]
bounds = { x = 0.0, y = 0.0, width = 50.0, height = 50.0 }

[[nodes]]
id = "receive"
kind = "receive"
bounds = { x = 0.0, y = 0.0, width = 100.0, height = 40.0 }

[[nodes]]
id = "reply"
kind = "reply"
bounds = { x = 0.0, y = 60.0, width = 100.0, height = 40.0 }

[[nodes]]
id = "handlers"
kind = "faultHandlers"
children = ["catch_all"]
bounds = { x = 0.0, y = 0.0, width = 50.0, height = 50.0 }

[[nodes]]
id = "catch_all"
kind = "catchAll"
bounds = { x = 0.0, y = 0.0, width = 80.0, height = 30.0 }
"#;

fn bounds_of(diagram: &trellis::Diagram, name: &str) -> (f32, f32, f32, f32) {
    let b = diagram.bounds(Id::new(name)).expect("node exists");
    (b.min_x(), b.min_y(), b.width(), b.height())
}

#[test]
fn test_engine_default_exists() {
    let _engine = Engine::default();
}

#[test]
fn test_relayout_cascades_from_the_inside_out() {
    let engine = Engine::default();
    let mut diagram = engine.parse(PROCESS).expect("Failed to parse document");

    // One occurrence per container: process, main and handlers.
    let report = engine.relayout(&mut diagram);
    assert_eq!(report.occurrences, 3);
    assert_eq!(report.disabled, 0);
    assert!(report.writes > 0);

    // Inner sequence is stacked and refit first.
    assert_eq!(bounds_of(&diagram, "receive"), (30.0, 30.0, 100.0, 40.0));
    assert_eq!(bounds_of(&diagram, "reply"), (30.0, 100.0, 100.0, 40.0));
    assert_eq!(bounds_of(&diagram, "main"), (30.0, 30.0, 160.0, 170.0));

    // Fault handler container holds its catch in a column.
    assert_eq!(bounds_of(&diagram, "catch_all"), (30.0, 30.0, 80.0, 30.0));

    // Process puts the handler slot right of the main sequence.
    let (x, y, width, height) = bounds_of(&diagram, "handlers");
    assert_eq!((x, y, width, height), (220.0, 30.0, 140.0, 90.0));
    assert_eq!(bounds_of(&diagram, "process"), (0.0, 0.0, 390.0, 230.0));
}

#[test]
fn test_second_relayout_is_a_no_op() {
    let engine = Engine::default();
    let mut diagram = engine.parse(PROCESS).expect("Failed to parse document");

    engine.relayout(&mut diagram);
    let rendered = engine.render(&diagram).expect("Failed to render");

    let report = engine.relayout(&mut diagram);
    assert_eq!(report.writes, 0);
    assert_eq!(engine.render(&diagram).expect("Failed to render"), rendered);
}

const UNEQUAL_SLOTS: &str = r#"
[[nodes]]
id = "scope"
kind = "scope"
children = ["events", "faults"]
bounds = { x = 0.0, y = 0.0, width = 10.0, height = 10.0 }

[[nodes]]
id = "events"
kind = "eventHandlers"
children = ["on_event"]
bounds = { x = 0.0, y = 0.0, width = 10.0, height = 10.0 }

[[nodes]]
id = "on_event"
kind = "onEvent"
bounds = { x = 0.0, y = 0.0, width = 50.0, height = 40.0 }

[[nodes]]
id = "faults"
kind = "faultHandlers"
children = ["catch"]
bounds = { x = 0.0, y = 0.0, width = 10.0, height = 10.0 }

[[nodes]]
id = "catch"
kind = "catch"
bounds = { x = 0.0, y = 0.0, width = 160.0, height = 40.0 }
"#;

#[test]
fn test_relayout_settles_with_unequal_handler_slots() {
    let engine = Engine::default();
    let mut diagram = engine.parse(UNEQUAL_SLOTS).expect("Failed to parse document");

    let first = engine.relayout(&mut diagram);
    assert_eq!(first.occurrences, 3);
    assert!(first.writes > 0);
    assert_eq!(diagram.pending_count(), 0);

    // The narrow slot is widened to the wide slot's right edge.
    assert_eq!(bounds_of(&diagram, "events"), (60.0, 30.0, 220.0, 100.0));
    assert_eq!(bounds_of(&diagram, "faults"), (60.0, 140.0, 220.0, 100.0));
    assert_eq!(bounds_of(&diagram, "scope"), (0.0, 0.0, 310.0, 270.0));

    let rendered = engine.render(&diagram).expect("Failed to render");
    for _ in 0..3 {
        let report = engine.relayout(&mut diagram);
        assert_eq!(report.occurrences, 0);
        assert_eq!(report.writes, 0);
    }
    assert_eq!(engine.render(&diagram).expect("Failed to render"), rendered);

    // A fresh load of the result lays out to the same document.
    let mut reloaded = engine.parse(&rendered).expect("Rendered output should parse");
    engine.relayout(&mut reloaded);
    assert_eq!(engine.render(&reloaded).expect("Failed to render"), rendered);
    assert_eq!(engine.relayout(&mut reloaded).writes, 0);
}

#[test]
fn test_apply_marks_the_parent_pending() {
    let engine = Engine::default();
    let mut diagram = engine.parse(UNEQUAL_SLOTS).expect("Failed to parse document");
    engine.relayout(&mut diagram);

    let outcome = engine
        .apply(&mut diagram, "catch", None)
        .expect("catch exists");
    assert_eq!(outcome, LayoutOutcome::NoChildren);
    assert_eq!(diagram.pending_count(), 0);

    // Laying out the narrow slot on its own shrinks it back to its content,
    // which makes the scope pending again.
    let outcome = engine
        .apply(&mut diagram, "events", None)
        .expect("events exists");
    assert_eq!(outcome, LayoutOutcome::Applied { writes: 1 });
    assert_eq!(bounds_of(&diagram, "events"), (60.0, 30.0, 110.0, 100.0));
    assert!(diagram.is_pending(Id::new("scope")));
    assert!(!diagram.is_pending(Id::new("events")));

    let report = engine.relayout(&mut diagram);
    assert_eq!(report.occurrences, 1);
    assert_eq!(report.writes, 1);
    assert_eq!(bounds_of(&diagram, "events"), (60.0, 30.0, 220.0, 100.0));
}

#[test]
fn test_render_round_trips() {
    let engine = Engine::default();
    let mut diagram = engine.parse(PROCESS).expect("Failed to parse document");
    engine.relayout(&mut diagram);

    let rendered = engine.render(&diagram).expect("Failed to render");
    let reparsed = engine.parse(&rendered).expect("Rendered output should parse");

    assert_eq!(reparsed.to_document(), diagram.to_document());
}

#[test]
fn test_apply_single_occurrence() {
    let engine = Engine::default();
    let mut diagram = engine.parse(PROCESS).expect("Failed to parse document");

    let outcome = engine
        .apply(&mut diagram, "main", Some(OccurrenceKind::Horizontal))
        .expect("main exists");

    assert!(matches!(outcome, LayoutOutcome::Applied { .. }));
    assert_eq!(bounds_of(&diagram, "receive"), (30.0, 30.0, 100.0, 40.0));
    assert_eq!(bounds_of(&diagram, "reply"), (160.0, 30.0, 100.0, 40.0));
    // Neither siblings nor ancestors move.
    assert_eq!(bounds_of(&diagram, "process"), (0.0, 0.0, 100.0, 100.0));
    assert_eq!(bounds_of(&diagram, "catch_all"), (0.0, 0.0, 80.0, 30.0));
}

#[test]
fn test_apply_uses_container_default_kind() {
    let engine = Engine::default();
    let mut diagram = engine.parse(PROCESS).expect("Failed to parse document");

    engine
        .apply(&mut diagram, "handlers", None)
        .expect("handlers exists");

    assert_eq!(bounds_of(&diagram, "catch_all"), (30.0, 30.0, 80.0, 30.0));
    assert_eq!(bounds_of(&diagram, "handlers"), (0.0, 0.0, 140.0, 90.0));
}

#[test]
fn test_apply_unknown_container() {
    let engine = Engine::default();
    let mut diagram = engine.parse(PROCESS).expect("Failed to parse document");

    let err = engine
        .apply(&mut diagram, "missing", None)
        .expect_err("missing container should fail");
    assert!(matches!(err, TrellisError::UnknownNode(name) if name == "missing"));
}

#[test]
fn test_layout_hint_overrides_default_kind() {
    let source = r#"
        [[nodes]]
        id = "row"
        kind = "sequence"
        layout = "horizontal"
        children = ["a", "b"]
        bounds = { x = 0.0, y = 0.0, width = 10.0, height = 10.0 }

        [[nodes]]
        id = "a"
        kind = "empty"
        bounds = { x = 0.0, y = 0.0, width = 20.0, height = 20.0 }

        [[nodes]]
        id = "b"
        kind = "empty"
        bounds = { x = 50.0, y = 0.0, width = 20.0, height = 20.0 }
    "#;

    let engine = Engine::default();
    let mut diagram = engine.parse(source).expect("Failed to parse document");
    engine.relayout(&mut diagram);

    assert_eq!(bounds_of(&diagram, "a"), (30.0, 30.0, 20.0, 20.0));
    assert_eq!(bounds_of(&diagram, "b"), (80.0, 30.0, 20.0, 20.0));
}

#[test]
fn test_disabled_container_is_counted() {
    let source = r#"
        [[nodes]]
        id = "frozen"
        kind = "sequence"
        children = ["a"]
        bounds = { x = 0.0, y = 0.0, width = 10.0, height = 10.0 }
        properties = { oryx-autolayout = false }

        [[nodes]]
        id = "a"
        kind = "empty"
        bounds = { x = 1.0, y = 2.0, width = 20.0, height = 20.0 }
    "#;

    let engine = Engine::default();
    let mut diagram = engine.parse(source).expect("Failed to parse document");
    let report = engine.relayout(&mut diagram);

    assert_eq!(report.disabled, 1);
    assert_eq!(report.writes, 0);
    assert_eq!(bounds_of(&diagram, "a"), (1.0, 2.0, 20.0, 20.0));
}

#[test]
fn test_custom_margin() {
    let source = r#"
        [[nodes]]
        id = "seq"
        kind = "sequence"
        children = ["a"]
        bounds = { x = 0.0, y = 0.0, width = 10.0, height = 10.0 }

        [[nodes]]
        id = "a"
        kind = "empty"
        bounds = { x = 0.0, y = 0.0, width = 20.0, height = 20.0 }
    "#;

    let engine = Engine::new(AppConfig::new(LayoutConfig::new(12.0, 4.0, 100.0)));
    let mut diagram = engine.parse(source).expect("Failed to parse document");
    engine.relayout(&mut diagram);

    assert_eq!(bounds_of(&diagram, "a"), (12.0, 12.0, 20.0, 20.0));
    assert_eq!(bounds_of(&diagram, "seq"), (0.0, 0.0, 44.0, 44.0));
}

#[test]
fn test_parse_reports_syntax_errors_with_span() {
    let engine = Engine::default();
    let err = engine
        .parse("[[nodes]]\nid = \"a\"\nkind = \n")
        .expect_err("invalid TOML should fail");

    match err {
        TrellisError::Document { err, src } => {
            assert!(matches!(err, DocumentError::Syntax { .. }));
            let span = err.span().expect("syntax errors carry a span");
            assert!(span.start <= src.len());
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_parse_reports_structural_errors() {
    let source = r#"
        [[nodes]]
        id = "a"
        kind = "scope"
        children = ["b"]
        bounds = { x = 0.0, y = 0.0, width = 10.0, height = 10.0 }

        [[nodes]]
        id = "b"
        kind = "scope"
        children = ["a"]
        bounds = { x = 0.0, y = 0.0, width = 10.0, height = 10.0 }
    "#;

    let err = Engine::default()
        .parse(source)
        .expect_err("cyclic document should fail");
    assert!(matches!(
        err,
        TrellisError::Document {
            err: DocumentError::Cycle(_),
            ..
        }
    ));
}
