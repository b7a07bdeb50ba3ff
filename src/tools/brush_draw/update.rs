//! Per-Frame-Update des Brush-Draw-Gizmos: die Phasen-State-Machine.

use glam::Vec3;

use crate::core::{
    project_point_to_plane_2d, from_direction, BoxBrushSpawn, Plane, Ray, RayCastFlags, Scene,
    Transform,
};
use crate::shared::options::NEAR_ZERO_EPSILON;
use crate::tools::ViewportContext;

use super::state::{DragDirection, DrawStage};
use super::BrushDrawTool;

impl BrushDrawTool {
    /// Frame-Update. Gibt Spawn-Daten zurück, sobald eine Extrusion
    /// abgeschlossen und ein Brush konstruiert wurde.
    pub fn update(&mut self, ctx: &ViewportContext, scene: &Scene) -> Option<BoxBrushSpawn> {
        // Rechte Maustaste: Kamera-Orbit hat Vorrang, Frame aussetzen
        if ctx.input.rmb_down {
            return None;
        }

        // Konsumierter Klick: erst loslassen, dann darf ein neuer Drag starten
        if self.was_lmb_down {
            if !ctx.input.lmb_down {
                self.was_lmb_down = false;
            }
            return None;
        }

        let mut spawn = None;
        match self.state.current_stage {
            DrawStage::Drag2DShape => self.drag_2d_shape(ctx, scene),

            DrawStage::Extrude3DShape => {
                if self.resources.all_loaded(ctx.content) {
                    spawn = self.extrude_3d_shape(ctx);
                }
            }

            DrawStage::FinalizeShape => {
                // Vorerst direkt zurücksetzen (Platzhalter für Flächen-Editing)
                self.state.clear_drag();
                self.state.clear_height();
                self.state.current_stage = DrawStage::Drag2DShape;
            }
        }

        // Degenerierte Drags (Null-Fläche / Null-Höhe) setzen die ganze
        // Session still zurück — kein Fehler.
        if !self.state.dragging() && !self.is_drag_valid() {
            self.state.clear_drag();
            self.state.clear_height();
            self.state.current_stage = DrawStage::Drag2DShape;
        }

        spawn
    }

    /// Phase 1: Snap-Ebene picken, Cursor projizieren, Grundfläche ziehen.
    fn drag_2d_shape(&mut self, ctx: &ViewportContext, scene: &Scene) {
        let ray = ctx.input.mouse_ray;
        let flags = RayCastFlags {
            skip_editor_primitives: true,
            skip_triggers: true,
            skip_colliders: true,
        };
        let hit = scene.ray_cast(&ray, flags);

        // Ebene nur außerhalb eines Drags neu locken
        if !self.state.dragging() {
            self.lock_plane = match hit {
                Some(h) => Plane::from_point_normal(ray.point_at(h.distance), h.normal),
                None => Plane::DEFAULT,
            };
        }

        match self.lock_plane.intersect_ray(&ray) {
            Some(t) => {
                let position = ray.point_at(t);
                self.state
                    .set_cursor(position, self.lock_plane, ctx.snap_increment());
            }
            None => self.state.clear_cursor(),
        }

        if ctx.input.lmb_down {
            self.state.start_drag();
        } else if self.state.end_drag() {
            self.state.clear_height();
            self.state.current_stage = DrawStage::Extrude3DShape;
            if self.state.draw_from_center {
                // Startpunkt am Drag-Mittelpunkt spiegeln
                let delta = self.state.cursor_end - self.state.cursor_start;
                self.state.cursor_start -= delta;
            }

            self.update_matrices(ctx);
        }
    }

    /// Phase 2: Extrusions-Handle picken und Höhe ziehen.
    fn extrude_3d_shape(&mut self, ctx: &ViewportContext) -> Option<BoxBrushSpawn> {
        let ray = ctx.input.mouse_ray;

        if ctx.input.lmb_down {
            if self.state.current_drag_direction == DragDirection::None {
                // Klick neben die Handles: konsumieren und Session abbrechen
                self.was_lmb_down = true;
                self.state.clear_drag();
                return None;
            }

            self.state.start_drag();
            self.extrude_drag_height(ctx);
            self.update_matrices(ctx);
            return None;
        }

        self.state.end_drag();
        self.last_extrusion_intersection = Vec3::ZERO;
        let mut spawn = None;
        if self.has_extruded {
            self.state.current_stage = DrawStage::FinalizeShape;
            spawn = Some(self.construct_brush());
            self.has_extruded = false;
        }

        // Handle-Hover in Gizmo-lokalen Koordinaten bestimmen
        let local_ray = Ray {
            origin: self.gizmo_world.inverse_transform_point(ray.origin),
            direction: self.gizmo_world.inverse_transform_vector(ray.direction),
        };
        self.state.current_drag_direction = DragDirection::None;

        if self.axis_box_forward.intersect_ray(&local_ray).is_some() {
            self.state.current_drag_direction = DragDirection::Forward;
        } else if self.axis_box_backward.intersect_ray(&local_ray).is_some() {
            self.state.current_drag_direction = DragDirection::Backward;
        }

        spawn
    }

    /// Akkumuliert die Pointer-Bewegung in die Extrusionshöhe.
    ///
    /// Der Ray wird in den (nur rotierten) Gizmo-Raum transformiert und
    /// gegen die der Blickrichtung senkrechtere der beiden lokalen
    /// Achs-Ebenen (YZ / ZX) geschnitten; jedes Frame wird die Ebenen-Wahl
    /// neu optimiert, damit das Tracking bei wechselndem Blickwinkel stabil
    /// bleibt. Das signierte Z-Delta der Schnittpunkte ist die Höhenänderung.
    fn extrude_drag_height(&mut self, ctx: &ViewportContext) {
        let inv_rotation = self.gizmo_world.orientation.inverse();
        let ray = Ray {
            origin: inv_rotation * ctx.input.mouse_ray.origin,
            direction: inv_rotation * ctx.input.mouse_ray.direction,
        };

        let mid_world =
            self.state.cursor_start + (self.state.cursor_end - self.state.cursor_start) * 0.5;
        let mid_local = inv_rotation * mid_world;

        let plane_yz = Plane::from_point_normal(mid_local, Vec3::NEG_X);
        let plane_zx = Plane::from_point_normal(mid_local, Vec3::NEG_Y);
        let direction = (ray.origin - mid_local).normalize_or_zero();
        let dot_yz = plane_yz.normal.dot(direction).abs();
        let dot_zx = plane_zx.normal.dot(direction).abs();
        let plane = if dot_zx > dot_yz { plane_zx } else { plane_yz };

        if let Some(t) = plane.intersect_ray(&ray) {
            let intersection = ray.point_at(t);
            if self.last_extrusion_intersection != Vec3::ZERO {
                let delta = intersection - self.last_extrusion_intersection;
                self.state.set_height_delta(delta.z, ctx.snap_increment());
                self.has_extruded = true;
            }

            self.last_extrusion_intersection = intersection;
        }
    }

    /// Aktualisiert den Gizmo-Welt-Transform über der Grundfläche.
    pub(super) fn update_matrices(&mut self, ctx: &ViewportContext) {
        let mut origin =
            self.state.cursor_start + (self.state.cursor_end - self.state.cursor_start) * 0.5;
        origin += self.state.cursor_plane().normal * self.state.extrusion_height();

        let screen_scale = ctx.camera.gizmo_screen_scale(origin, ctx.options.gizmo_size);
        self.gizmo_world = Transform {
            translation: origin,
            orientation: from_direction(self.state.cursor_plane().normal),
            scale: Vec3::splat(screen_scale),
        };
    }

    /// Ist die aktuelle Drag-Geometrie nicht-degeneriert?
    ///
    /// Null-Breite oder Null-Höhe der projizierten Grundfläche — und in der
    /// Finalisierungs-Phase eine Null-Extrusionshöhe — gelten als degeneriert.
    pub(super) fn is_drag_valid(&self) -> bool {
        if !self.state.cursor_valid() {
            return false;
        }

        let plane = self.state.cursor_plane();
        let start_point = project_point_to_plane_2d(&plane, self.state.cursor_start);
        let end_point = project_point_to_plane_2d(&plane, self.state.cursor_end);

        if (start_point.x - end_point.x).abs() < NEAR_ZERO_EPSILON
            || (start_point.y - end_point.y).abs() < NEAR_ZERO_EPSILON
        {
            return false;
        }

        if self.state.current_stage == DrawStage::FinalizeShape
            && self.state.extrusion_height().abs() < NEAR_ZERO_EPSILON
        {
            return false;
        }

        true
    }
}
