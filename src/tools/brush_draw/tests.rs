//! Tests des Brush-Draw-Gizmos: Phasen-Übergänge, Degenerate-Guard und
//! Brush-Konstruktion.

use glam::Vec3;

use crate::core::{Plane, Ray, Scene, ViewportCamera};
use crate::shared::{ContentCache, EditorOptions};
use crate::tools::{InputSnapshot, ViewportContext};

use super::construct::construct_brush;
use super::state::{BrushDrawState, BrushShape, DragDirection, DrawStage};
use super::BrushDrawTool;
use crate::core::BrushMode;
use approx::assert_relative_eq;

fn loaded_content() -> ContentCache {
    let mut content = ContentCache::new();
    content.register_gizmo_defaults();
    content.finish_all();
    content
}

fn tool(content: &ContentCache) -> BrushDrawTool {
    BrushDrawTool::new(content, &EditorOptions::default()).expect("Gizmo-Ressourcen")
}

fn top_down_camera() -> ViewportCamera {
    ViewportCamera::new(Vec3::new(0.0, 500.0, 0.0), Vec3::NEG_Y)
}

/// Ray senkrecht von oben durch den Punkt (x, 0, z).
fn ray_down_at(x: f32, z: f32) -> Ray {
    Ray::new(Vec3::new(x, 500.0, z), Vec3::NEG_Y)
}

#[test]
fn missing_gizmo_assets_abort_construction() {
    let content = ContentCache::new();
    assert!(BrushDrawTool::new(&content, &EditorOptions::default()).is_err());
}

#[test]
fn zero_movement_drag_resets_to_first_stage() {
    let content = loaded_content();
    let mut tool = tool(&content);
    let scene = Scene::new();
    let camera = top_down_camera();
    let options = EditorOptions::default();

    // Drücken und ohne Bewegung wieder loslassen
    let mut input = InputSnapshot::idle(ray_down_at(3.0, 4.0));
    input.lmb_down = true;
    let ctx = ViewportContext {
        camera: &camera,
        input: &input,
        options: &options,
        content: &content,
    };
    tool.update(&ctx, &scene);
    assert!(tool.state.dragging());

    let input = InputSnapshot::idle(ray_down_at(3.0, 4.0));
    let ctx = ViewportContext {
        camera: &camera,
        input: &input,
        options: &options,
        content: &content,
    };
    tool.update(&ctx, &scene);

    // Degenerate-Guard muss die Session zurückgesetzt haben
    assert_eq!(tool.state.current_stage, DrawStage::Drag2DShape);
    assert!(!tool.state.dragging());
    assert_relative_eq!(tool.state.extrusion_height(), 0.0);
}

#[test]
fn valid_drag_advances_to_extrude_stage() {
    let content = loaded_content();
    let mut tool = tool(&content);
    let scene = Scene::new();
    let camera = top_down_camera();
    let options = EditorOptions::default();

    let mut input = InputSnapshot::idle(ray_down_at(0.0, 0.0));
    input.lmb_down = true;
    let ctx = ViewportContext {
        camera: &camera,
        input: &input,
        options: &options,
        content: &content,
    };
    tool.update(&ctx, &scene);

    let mut input = InputSnapshot::idle(ray_down_at(10.0, 6.0));
    input.lmb_down = true;
    let ctx = ViewportContext {
        camera: &camera,
        input: &input,
        options: &options,
        content: &content,
    };
    tool.update(&ctx, &scene);

    let input = InputSnapshot::idle(ray_down_at(10.0, 6.0));
    let ctx = ViewportContext {
        camera: &camera,
        input: &input,
        options: &options,
        content: &content,
    };
    tool.update(&ctx, &scene);

    assert_eq!(tool.state.current_stage, DrawStage::Extrude3DShape);
    assert_eq!(tool.state.cursor_start, Vec3::new(0.0, 0.0, 0.0));
    assert_eq!(tool.state.cursor_end, Vec3::new(10.0, 0.0, 6.0));
}

#[test]
fn right_mouse_button_suspends_processing() {
    let content = loaded_content();
    let mut tool = tool(&content);
    let scene = Scene::new();
    let camera = top_down_camera();
    let options = EditorOptions::default();

    let mut input = InputSnapshot::idle(ray_down_at(3.0, 4.0));
    input.lmb_down = true;
    input.rmb_down = true;
    let ctx = ViewportContext {
        camera: &camera,
        input: &input,
        options: &options,
        content: &content,
    };
    tool.update(&ctx, &scene);

    // Kamera-Orbit hat Vorrang: kein Drag gestartet, kein Cursor gesetzt
    assert!(!tool.state.dragging());
    assert!(!tool.state.cursor_valid());
}

#[test]
fn draw_from_center_mirrors_start_around_midpoint() {
    let content = loaded_content();
    let mut tool = tool(&content);
    tool.state.draw_from_center = true;
    let scene = Scene::new();
    let camera = top_down_camera();
    let options = EditorOptions::default();

    let mut input = InputSnapshot::idle(ray_down_at(0.0, 0.0));
    input.lmb_down = true;
    let ctx = ViewportContext {
        camera: &camera,
        input: &input,
        options: &options,
        content: &content,
    };
    tool.update(&ctx, &scene);

    let mut input = InputSnapshot::idle(ray_down_at(5.0, 3.0));
    input.lmb_down = true;
    let ctx = ViewportContext {
        camera: &camera,
        input: &input,
        options: &options,
        content: &content,
    };
    tool.update(&ctx, &scene);

    let input = InputSnapshot::idle(ray_down_at(5.0, 3.0));
    let ctx = ViewportContext {
        camera: &camera,
        input: &input,
        options: &options,
        content: &content,
    };
    tool.update(&ctx, &scene);

    // Startpunkt am Drag-Mittelpunkt gespiegelt: (0,0,0) → (-5,0,-3)
    assert_eq!(tool.state.current_stage, DrawStage::Extrude3DShape);
    assert_eq!(tool.state.cursor_start, Vec3::new(-5.0, 0.0, -3.0));
    assert_eq!(tool.state.cursor_end, Vec3::new(5.0, 0.0, 3.0));
}

#[test]
fn unloaded_assets_gate_extrude_stage() {
    let mut content = ContentCache::new();
    content.register_gizmo_defaults();
    // Assets bleiben im Loading-Zustand
    let mut tool = tool(&content);
    let scene = Scene::new();
    let camera = top_down_camera();
    let options = EditorOptions::default();

    // Gültige Grundfläche aufziehen
    let mut input = InputSnapshot::idle(ray_down_at(0.0, 0.0));
    input.lmb_down = true;
    let ctx = ViewportContext {
        camera: &camera,
        input: &input,
        options: &options,
        content: &content,
    };
    tool.update(&ctx, &scene);
    let mut input = InputSnapshot::idle(ray_down_at(10.0, 6.0));
    input.lmb_down = true;
    let ctx = ViewportContext {
        camera: &camera,
        input: &input,
        options: &options,
        content: &content,
    };
    tool.update(&ctx, &scene);
    let input = InputSnapshot::idle(ray_down_at(10.0, 6.0));
    let ctx = ViewportContext {
        camera: &camera,
        input: &input,
        options: &options,
        content: &content,
    };
    tool.update(&ctx, &scene);
    assert_eq!(tool.state.current_stage, DrawStage::Extrude3DShape);

    // Hover über dem Gizmo-Zentrum: ohne geladene Assets kein Handle-Pick
    let input = InputSnapshot::idle(ray_down_at(5.0, 3.0));
    let ctx = ViewportContext {
        camera: &camera,
        input: &input,
        options: &options,
        content: &content,
    };
    tool.update(&ctx, &scene);
    assert_eq!(tool.state.current_drag_direction, DragDirection::None);
}

#[test]
fn deactivate_resets_whole_session() {
    let content = loaded_content();
    let mut tool = tool(&content);
    let scene = Scene::new();
    let camera = top_down_camera();
    let options = EditorOptions::default();

    let mut input = InputSnapshot::idle(ray_down_at(0.0, 0.0));
    input.lmb_down = true;
    let ctx = ViewportContext {
        camera: &camera,
        input: &input,
        options: &options,
        content: &content,
    };
    tool.update(&ctx, &scene);
    tool.state.set_height(12.0);

    tool.deactivate();
    assert_eq!(tool.state.current_stage, DrawStage::Drag2DShape);
    assert_eq!(tool.state.current_drag_direction, DragDirection::None);
    assert!(!tool.state.dragging());
    assert_relative_eq!(tool.state.extrusion_height(), 0.0);
}

// ── Brush-Konstruktion ──────────────────────────────────────────────

/// Session-Zustand nach Drag (0,0,0)→(4,0,3) auf der Welt-Oben-Ebene
/// mit Extrusionshöhe 5.
fn extruded_state(direction: DragDirection, fix_subtractions: bool) -> BrushDrawState {
    let mut state = BrushDrawState::new(&EditorOptions::default());
    state.fix_subtractions = fix_subtractions;
    state.set_cursor(Vec3::ZERO, Plane::DEFAULT, None);
    state.start_drag();
    state.set_cursor(Vec3::new(4.0, 0.0, 3.0), Plane::DEFAULT, None);
    state.end_drag();
    state.current_stage = DrawStage::Extrude3DShape;
    state.current_drag_direction = direction;
    state.set_height(5.0);
    state
}

#[test]
fn constructed_brush_size_matches_drag_and_extrusion() {
    let mut state = extruded_state(DragDirection::Forward, false);
    let spawn = construct_brush(&mut state);

    assert_relative_eq!(spawn.size.x, 4.0, epsilon = 1e-4);
    assert_relative_eq!(spawn.size.y, 3.0, epsilon = 1e-4);
    assert_relative_eq!(spawn.size.z, 5.0, epsilon = 1e-4);
    assert_eq!(spawn.mode, BrushMode::Additive);

    // Zentrum: Flächen-Mittelpunkt plus halbe Höhe entlang der Normalen
    assert_relative_eq!(spawn.position.x, 2.0, epsilon = 1e-4);
    assert_relative_eq!(spawn.position.y, 2.5, epsilon = 1e-4);
    assert_relative_eq!(spawn.position.z, 1.5, epsilon = 1e-4);
}

#[test]
fn backward_drag_direction_builds_subtractive_brush() {
    let mut state = extruded_state(DragDirection::Backward, false);
    let spawn = construct_brush(&mut state);
    assert_eq!(spawn.mode, BrushMode::Subtractive);
}

#[test]
fn fix_subtractions_shifts_endpoints_and_reduces_height() {
    let mut without_fix = extruded_state(DragDirection::Backward, false);
    let spawn_without = construct_brush(&mut without_fix);

    let mut with_fix = extruded_state(DragDirection::Backward, true);
    let spawn_with = construct_brush(&mut with_fix);

    // Beide Endpunkte um +1 entlang der Ebenen-Normalen verschoben
    assert_relative_eq!(
        with_fix.cursor_start.y,
        without_fix.cursor_start.y + 1.0,
        epsilon = 1e-4
    );
    assert_relative_eq!(
        with_fix.cursor_end.y,
        without_fix.cursor_end.y + 1.0,
        epsilon = 1e-4
    );
    // Extrusionshöhe um den Fix-Abstand reduziert
    assert_relative_eq!(with_fix.extrusion_height(), 4.0, epsilon = 1e-4);
    assert_relative_eq!(spawn_with.size.z, spawn_without.size.z - 1.0, epsilon = 1e-4);

    // Grundfläche bleibt gleich
    assert_relative_eq!(spawn_with.size.x, spawn_without.size.x, epsilon = 1e-4);
    assert_relative_eq!(spawn_with.size.y, spawn_without.size.y, epsilon = 1e-4);
}

#[test]
fn additive_brush_ignores_fix_subtractions() {
    let mut state = extruded_state(DragDirection::Forward, true);
    let spawn = construct_brush(&mut state);
    assert_relative_eq!(state.cursor_start.y, 0.0, epsilon = 1e-4);
    assert_relative_eq!(spawn.size.z, 5.0, epsilon = 1e-4);
}

#[test]
#[should_panic(expected = "unimplemented brush tool shape")]
fn unsupported_shape_is_fatal() {
    let mut state = extruded_state(DragDirection::Forward, false);
    state.current_shape = BrushShape::Cylinder;
    let _ = construct_brush(&mut state);
}
