//! Brush-Draw-Gizmo: interaktives Aufziehen von CSG-Brushes in drei Phasen
//! (2D-Fußabdruck ziehen → Höhe extrudieren → finalisieren).

mod config_ui;
mod construct;
mod draw;
mod state;
#[cfg(test)]
mod tests;
mod update;

pub use config_ui::render_config;
pub use construct::{apply_brush_spawn, SpawnBrushCommand};
pub use state::{BrushDrawState, BrushShape, DragDirection, DrawStage};

use anyhow::{bail, Result};
use glam::Vec3;

use crate::core::{Aabb, Plane, Transform};
use crate::shared::content::{
    AssetHandle, AssetKind, ContentCache, GIZMO_MATERIAL_AXIS_BACKWARD,
    GIZMO_MATERIAL_AXIS_FOCUS, GIZMO_MATERIAL_AXIS_FORWARD, GIZMO_MATERIAL_AXIS_Z,
    GIZMO_TRANSLATION_AXIS,
};
use crate::shared::EditorOptions;

// Achsen-Handle-Geometrie in Gizmo-Einheiten
const AXIS_LENGTH: f32 = 3.75;
const AXIS_OFFSET: f32 = 0.6;
const AXIS_THICKNESS: f32 = 0.25;

/// Spät gebundene Render-Ressourcen des Gizmos.
///
/// Werden beim Start einmalig aufgelöst; schlägt eine Auflösung fehl, bricht
/// die Werkzeug-Initialisierung ab statt halb-initialisiert weiterzulaufen.
/// Der Ladezustand wird pro Frame synchron gepollt.
#[derive(Debug, Clone, Copy)]
pub struct GizmoResources {
    /// Achsen-Modell
    pub translation_axis: AssetHandle,
    /// Material der Vorwärts-Achse
    pub material_axis_forward: AssetHandle,
    /// Material der Rückwärts-Achse
    pub material_axis_backward: AssetHandle,
    /// Material der Z-Achse
    pub material_axis_z: AssetHandle,
    /// Fokus-Material (Hover/Drag)
    pub material_axis_focus: AssetHandle,
}

impl GizmoResources {
    /// Löst alle Gizmo-Assets auf. Fatal wenn eines fehlt.
    pub fn load(content: &ContentCache) -> Result<Self> {
        let resolve = |path: &str, kind: AssetKind| -> Result<AssetHandle> {
            match content.load_async(path, kind) {
                Some(handle) => Ok(handle),
                None => bail!("Gizmo-Ressource konnte nicht geladen werden: {path}"),
            }
        };

        Ok(Self {
            translation_axis: resolve(GIZMO_TRANSLATION_AXIS, AssetKind::Model)?,
            material_axis_forward: resolve(GIZMO_MATERIAL_AXIS_FORWARD, AssetKind::MaterialInstance)?,
            material_axis_backward: resolve(
                GIZMO_MATERIAL_AXIS_BACKWARD,
                AssetKind::MaterialInstance,
            )?,
            material_axis_z: resolve(GIZMO_MATERIAL_AXIS_Z, AssetKind::MaterialInstance)?,
            material_axis_focus: resolve(GIZMO_MATERIAL_AXIS_FOCUS, AssetKind::MaterialInstance)?,
        })
    }

    /// Sind alle Assets fertig gestreamt? (Synchroner Poll pro Frame.)
    pub fn all_loaded(&self, content: &ContentCache) -> bool {
        content.is_loaded(self.translation_axis)
            && content.is_loaded(self.material_axis_forward)
            && content.is_loaded(self.material_axis_backward)
            && content.is_loaded(self.material_axis_z)
            && content.is_loaded(self.material_axis_focus)
    }
}

/// Das Brush-Draw-Gizmo.
pub struct BrushDrawTool {
    /// Session-Zustand der laufenden Zeichnung
    pub state: BrushDrawState,
    resources: GizmoResources,
    gizmo_world: Transform,
    lock_plane: Plane,
    last_extrusion_intersection: Vec3,
    was_lmb_down: bool,
    has_extruded: bool,
    axis_box_forward: Aabb,
    axis_box_backward: Aabb,
}

impl BrushDrawTool {
    /// Erstellt das Gizmo und löst seine Render-Ressourcen auf.
    pub fn new(content: &ContentCache, options: &EditorOptions) -> Result<Self> {
        let resources = GizmoResources::load(content)?;

        Ok(Self {
            state: BrushDrawState::new(options),
            resources,
            gizmo_world: Transform::IDENTITY,
            lock_plane: Plane::DEFAULT,
            last_extrusion_intersection: Vec3::ZERO,
            was_lmb_down: false,
            has_extruded: false,
            axis_box_forward: Aabb::from_half_extent(Vec3::splat(AXIS_THICKNESS))
                .offset_by(Vec3::Z * AXIS_OFFSET)
                .merged_with_point(Vec3::Z * AXIS_LENGTH),
            axis_box_backward: Aabb::from_half_extent(Vec3::splat(AXIS_THICKNESS))
                .offset_by(Vec3::NEG_Z * AXIS_OFFSET)
                .merged_with_point(Vec3::NEG_Z * AXIS_LENGTH),
        })
    }

    /// Render-Ressourcen des Gizmos.
    pub fn resources(&self) -> &GizmoResources {
        &self.resources
    }

    /// Welt-Transform des Gizmos (Ursprung über der Grundfläche).
    pub fn gizmo_world(&self) -> Transform {
        self.gizmo_world
    }

    /// Deaktivierung durch den Host: Session vollständig zurücksetzen,
    /// damit kein Zustand in die nächste Aktivierung leckt.
    pub fn deactivate(&mut self) {
        self.state.clear_drag();
        self.state.clear_height();
        self.state.current_stage = DrawStage::Drag2DShape;
        self.state.current_drag_direction = DragDirection::None;
        self.last_extrusion_intersection = Vec3::ZERO;
        self.was_lmb_down = false;
        self.has_extruded = false;
    }
}
