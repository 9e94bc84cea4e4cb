use kurbo::Point;
use sketcher_app::{AppConfig, Script, SessionOptions, new_editor, run_session};
use sketcher_core::{FileStorage, Shape, ShapeKind, Storage, ToolKind};
use std::fs;
use tempfile::tempdir;

fn replay(json: &str) -> sketcher_core::Editor<sketcher_render::SceneRenderer> {
    let mut editor = new_editor(&AppConfig::default());
    Script::from_json(json).unwrap().run(&mut editor).unwrap();
    editor
}

#[test]
fn test_polyline_session_saved_and_reopened() {
    let dir = tempdir().unwrap();
    let script_path = dir.path().join("session.json");
    fs::write(
        &script_path,
        r#"[
            { "op": "tool", "tool": "polyline" },
            { "op": "pointer_down", "x": 0, "y": 0 },
            { "op": "pointer_up", "x": 0, "y": 0 },
            { "op": "pointer_down", "x": 10, "y": 0 },
            { "op": "pointer_up", "x": 10, "y": 0 },
            { "op": "pointer_move", "x": 10, "y": 10 },
            { "op": "pointer_down", "x": 10, "y": 10 },
            { "op": "pointer_up", "x": 10, "y": 10 },
            { "op": "double_click", "x": 10, "y": 10 }
        ]"#,
    )
    .unwrap();

    let config = AppConfig {
        storage_dir: Some(dir.path().join("docs")),
        ..AppConfig::default()
    };
    let storage = config.storage().unwrap();
    let options = SessionOptions {
        script: Some(script_path),
        save: Some("zigzag".to_string()),
        ..SessionOptions::default()
    };
    let (editor, summary) = run_session(&config, &options, &storage).unwrap();

    assert_eq!(summary.committed.len(), 1);
    match editor.document().shapes_ordered().next().unwrap() {
        Shape::Polyline(polyline) => assert_eq!(
            polyline.points,
            vec![
                Point::new(0.0, 0.0),
                Point::new(10.0, 0.0),
                Point::new(10.0, 10.0)
            ]
        ),
        other => panic!("expected polyline, got {other:?}"),
    }
    assert!(!editor.renderer().has_previews());

    let reopened = FileStorage::new(dir.path().join("docs")).unwrap();
    assert_eq!(reopened.list().unwrap(), ["zigzag"]);
    let options = SessionOptions {
        open: Some("zigzag".to_string()),
        ..SessionOptions::default()
    };
    let (copy, _) = run_session(&config, &options, &reopened).unwrap();
    assert_eq!(copy.document().to_dtos(), editor.document().to_dtos());
}

#[test]
fn test_escape_returns_to_select_without_shape() {
    let editor = replay(
        r#"[
            { "op": "tool", "tool": "circle" },
            { "op": "pointer_down", "x": 0, "y": 0 },
            { "op": "pointer_move", "x": 5, "y": 0 },
            { "op": "key", "key": "Escape" },
            { "op": "pointer_up", "x": 5, "y": 0 }
        ]"#,
    );

    assert_eq!(editor.active_tool(), ToolKind::Select);
    assert!(editor.document().is_empty());
    assert!(editor.renderer().preview(ShapeKind::Circle).is_none());
}

#[test]
fn test_switching_tools_clears_preview() {
    let editor = replay(
        r#"[
            { "op": "tool", "tool": "line" },
            { "op": "pointer_down", "x": 0, "y": 0 },
            { "op": "pointer_move", "x": 4, "y": 4 },
            { "op": "tool", "tool": "ellipse" }
        ]"#,
    );

    assert_eq!(editor.active_tool(), ToolKind::Ellipse);
    assert!(!editor.renderer().has_previews());
    assert!(editor.document().is_empty());
}

#[test]
fn test_click_selects_and_hiding_deselects() {
    let mut editor = replay(
        r#"[
            { "op": "tool", "tool": "line" },
            { "op": "pointer_down", "x": 0, "y": 0 },
            { "op": "pointer_up", "x": 100, "y": 0 },
            { "op": "tool", "tool": "select" },
            { "op": "pointer_down", "x": 50, "y": 2 },
            { "op": "pointer_up", "x": 50, "y": 2 }
        ]"#,
    );
    let id = editor.document().shape_id_at(0).unwrap();
    assert_eq!(editor.document().selected_shape_id(), Some(id));
    assert_eq!(editor.renderer().selection(), Some(id));

    Script::from_json(r#"[{ "op": "toggle_visibility", "shape": 0 }]"#)
        .unwrap()
        .run(&mut editor)
        .unwrap();
    assert_eq!(editor.document().selected_shape_id(), None);
    assert_eq!(editor.renderer().selection(), None);
}

#[test]
fn test_degenerate_shapes_are_discarded() {
    let editor = replay(
        r#"[
            { "op": "tool", "tool": "line" },
            { "op": "pointer_down", "x": 1, "y": 1 },
            { "op": "pointer_up", "x": 1, "y": 1 },
            { "op": "tool", "tool": "circle" },
            { "op": "pointer_down", "x": 0, "y": 0 },
            { "op": "pointer_up", "x": 0.005, "y": 0 },
            { "op": "tool", "tool": "polyline" },
            { "op": "pointer_down", "x": 0, "y": 0 },
            { "op": "double_click", "x": 0, "y": 0 }
        ]"#,
    );

    assert!(editor.document().is_empty());
    assert!(editor.is_drawing());
}

#[test]
fn test_move_and_recolor_selected() {
    let editor = replay(
        r##"[
            { "op": "tool", "tool": "circle" },
            { "op": "pointer_down", "x": 0, "y": 0 },
            { "op": "pointer_up", "x": 2, "y": 0 },
            { "op": "select", "shape": 0 },
            { "op": "move_selected", "dx": 3, "dy": -1 },
            { "op": "set_color", "shape": 0, "color": "#ff0000" }
        ]"##,
    );

    let shape = editor.document().shapes_ordered().next().unwrap();
    match shape {
        Shape::Circle(circle) => {
            assert_eq!(circle.center, Point::new(3.0, -1.0));
            assert!((circle.radius - 2.0).abs() < f64::EPSILON);
        }
        other => panic!("expected circle, got {other:?}"),
    }
    assert_eq!(shape.color(), "#ff0000");
    let object = editor.renderer().object(shape.id()).unwrap();
    assert_eq!(object.shape.anchor(), Point::new(3.0, -1.0));
}

#[test]
fn test_unsupported_entry_clears_document() {
    let mut editor = replay(
        r#"[
            { "op": "tool", "tool": "line" },
            { "op": "pointer_down", "x": 0, "y": 0 },
            { "op": "pointer_up", "x": 5, "y": 5 }
        ]"#,
    );
    assert_eq!(editor.document().len(), 1);

    let result = editor.load_json(
        r##"[
            { "id": "6f1c1b8e-4a5b-4c6d-8e9f-0a1b2c3d4e5f", "type": "line", "color": "#333333",
              "visible": true, "start": { "x": 0, "y": 0 }, "end": { "x": 1, "y": 1 } },
            { "id": "7f1c1b8e-4a5b-4c6d-8e9f-0a1b2c3d4e5f", "type": "triangle", "color": "#333333",
              "visible": true }
        ]"##,
    );

    assert!(result.is_err());
    assert!(editor.document().is_empty());
    assert!(editor.renderer().is_empty());
}
