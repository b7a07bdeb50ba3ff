//! Debug-Draw des Brush-Draw-Gizmos: Cursor, Drag-Rechteck, Extrusions-Box
//! und Achsen-Handles.

use glam::{Mat4, Quat, Vec2, Vec3};

use crate::core::{from_direction, project_point_to_plane_2d};
use crate::shared::debug_draw::{Color, DebugDrawList, COLOR_RED, COLOR_YELLOW};
use crate::tools::ViewportContext;

use super::state::{DragDirection, DrawStage};
use super::BrushDrawTool;

/// Skaliert das Achsen-Modell auf die reale Gizmo-Größe.
const GIZMO_MODEL_SCALE: f32 = 0.075;
/// Länge des Cursor-Normalen-Strahls.
const CURSOR_NORMAL_LENGTH: f32 = 100.0;

impl BrushDrawTool {
    /// Zeichnet die zur Phase passenden Primitive in die Draw-Liste.
    pub fn draw(&self, ctx: &ViewportContext, draw: &mut DebugDrawList) {
        match self.state.current_stage {
            DrawStage::Drag2DShape => {
                self.draw_cursor(draw);
                self.draw_drag_2d(draw);
            }

            DrawStage::Extrude3DShape => {
                if self.resources.all_loaded(ctx.content) {
                    self.draw_extrusion(draw);
                    self.draw_drag_3d(draw);
                }
            }

            DrawStage::FinalizeShape => self.draw_drag_3d(draw),
        }
    }

    /// Cursor-Indikator: Strahl entlang der Ebenen-Normalen.
    fn draw_cursor(&self, draw: &mut DebugDrawList) {
        if !self.state.cursor_valid() || self.state.current_stage != DrawStage::Drag2DShape {
            return;
        }

        let position = self.state.cursor_position();
        let normal = self.state.cursor_plane().normal;
        draw.draw_line(position, position + normal * CURSOR_NORMAL_LENGTH, COLOR_RED);
    }

    /// Grundflächen-Rechteck während des 2D-Drags.
    fn draw_drag_2d(&self, draw: &mut DebugDrawList) {
        if !self.state.dragging() {
            return;
        }

        let plane = self.state.cursor_plane();
        let start_point = project_point_to_plane_2d(&plane, self.state.cursor_start);
        let end_point = project_point_to_plane_2d(&plane, self.state.cursor_position());
        if self.state.draw_from_center {
            draw_rectangle_on_plane(
                draw,
                self.state.cursor_start,
                plane.normal,
                (end_point - start_point) * 2.0,
                COLOR_RED,
            );
            return;
        }

        let mid_point = self.state.cursor_start
            + (self.state.cursor_position() - self.state.cursor_start) * 0.5;
        draw_rectangle_on_plane(draw, mid_point, plane.normal, end_point - start_point, COLOR_RED);
    }

    /// Drahtgitter-Box der laufenden Extrusion.
    fn draw_drag_3d(&self, draw: &mut DebugDrawList) {
        let plane = self.state.cursor_plane();
        let start_point = project_point_to_plane_2d(&plane, self.state.cursor_start);
        let end_point = project_point_to_plane_2d(&plane, self.state.cursor_end);
        let mid_point =
            self.state.cursor_start + (self.state.cursor_end - self.state.cursor_start) * 0.5;
        draw_cube(
            draw,
            mid_point,
            plane.normal,
            start_point - end_point,
            self.state.extrusion_height(),
            COLOR_YELLOW,
        );
    }

    /// Achsen-Handle-Meshes; Fokus-Material für das gehoverte bzw.
    /// gezogene Handle.
    fn draw_extrusion(&self, draw: &mut DebugDrawList) {
        let resources = self.resources;
        let base = self.gizmo_world.to_matrix() * Mat4::from_scale(Vec3::splat(GIZMO_MODEL_SCALE));
        let forward_world = base * Mat4::from_rotation_x(std::f32::consts::PI);
        let backward_world = base;

        if !self.state.dragging() {
            draw.draw_mesh(
                resources.translation_axis,
                if self.state.current_drag_direction == DragDirection::Forward {
                    resources.material_axis_focus
                } else {
                    resources.material_axis_forward
                },
                forward_world,
            );
            draw.draw_mesh(
                resources.translation_axis,
                if self.state.current_drag_direction == DragDirection::Backward {
                    resources.material_axis_focus
                } else {
                    resources.material_axis_backward
                },
                backward_world,
            );
            return;
        }

        match self.state.current_drag_direction {
            DragDirection::Forward => {
                draw.draw_mesh(
                    resources.translation_axis,
                    resources.material_axis_focus,
                    forward_world,
                );
            }
            DragDirection::Backward => {
                draw.draw_mesh(
                    resources.translation_axis,
                    resources.material_axis_focus,
                    backward_world,
                );
            }
            DragDirection::None => {}
        }
    }
}

/// Zeichnet ein Rechteck auf einer Ebene (Mittelpunkt + Extents).
fn draw_rectangle_on_plane(
    draw: &mut DebugDrawList,
    position: Vec3,
    normal: Vec3,
    extents: Vec2,
    color: Color,
) {
    let orientation = from_direction(normal);
    let (right, up) = rectangle_axes(orientation, extents);

    let a = -right + up + position;
    let b = right + up + position;
    let c = right - up + position;
    let d = -right - up + position;

    draw.draw_line(a, b, color);
    draw.draw_line(b, c, color);
    draw.draw_line(c, d, color);
    draw.draw_line(d, a, color);
}

/// Zeichnet eine Drahtgitter-Box: zwei Rechtecke plus vier Kanten entlang
/// der Normalen.
fn draw_cube(
    draw: &mut DebugDrawList,
    position: Vec3,
    normal: Vec3,
    extents: Vec2,
    height: f32,
    color: Color,
) {
    let upper_position = position + normal * height;
    draw_rectangle_on_plane(draw, position, normal, extents, color);
    draw_rectangle_on_plane(draw, upper_position, normal, extents, color);

    let orientation = from_direction(normal);
    let (right, up) = rectangle_axes(orientation, extents);

    let a = -right + up;
    let b = right + up;
    let c = right - up;
    let d = -right - up;

    draw.draw_line(position + a, upper_position + a, color);
    draw.draw_line(position + b, upper_position + b, color);
    draw.draw_line(position + c, upper_position + c, color);
    draw.draw_line(position + d, upper_position + d, color);
}

/// Halbe Rechteck-Achsen in Welt-Koordinaten.
fn rectangle_axes(orientation: Quat, extents: Vec2) -> (Vec3, Vec3) {
    let right = orientation * Vec3::X * (extents.x * 0.5);
    let up = orientation * Vec3::Y * (extents.y * 0.5);
    (right, up)
}
