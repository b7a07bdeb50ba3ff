//! Brush-Konstruktion nach abgeschlossener Extrusion.

use anyhow::{bail, Context, Result};
use glam::Vec3;

use crate::app::{EditCommand, EditHistory};
use crate::core::scene::make_box_brush_actor;
use crate::core::{
    from_direction, project_point_to_plane_2d, spawn_box_brush, ActorId, BoxBrushSpawn, BrushMode,
    Scene,
};
use crate::shared::options::FIX_SUBTRACTION_DISTANCE;

use super::state::{BrushDrawState, BrushShape, DragDirection};
use super::BrushDrawTool;

impl BrushDrawTool {
    /// Konstruiert die Spawn-Daten aus dem aktuellen Session-Zustand.
    pub(super) fn construct_brush(&mut self) -> BoxBrushSpawn {
        construct_brush(&mut self.state)
    }
}

/// Baut die Brush-Spawn-Daten aus dem Session-Zustand.
///
/// Konvention: Die Orientierung kommt direkt aus der FromDirection-Rotation
/// der Ebenen-Normalen (lokal +Z = Extrusionsachse), die Größe ist
/// komponentenweise (|ΔX|, |ΔY|, |Höhe|) der projizierten Endpunkte.
/// Das Vorzeichen (additiv/subtraktiv) kommt aus der in Phase 2 gegriffenen
/// Drag-Richtung.
///
/// # Panics
///
/// Jede andere Form als [`BrushShape::Cube`] ist ein nicht implementierter
/// Programmierpfad und bricht mit einer beschreibenden Panic ab.
pub(crate) fn construct_brush(state: &mut BrushDrawState) -> BoxBrushSpawn {
    let is_subtractive = state.current_drag_direction == DragDirection::Backward;
    // Subtraktive Brushes bei Bedarf von der Zeichen-Ebene wegrücken,
    // sonst flackern deckungsgleiche Flächen (Z-Fighting)
    if state.fix_subtractions && is_subtractive {
        let normal = state.cursor_plane().normal;
        state.cursor_start += normal * FIX_SUBTRACTION_DISTANCE;
        state.cursor_end += normal * FIX_SUBTRACTION_DISTANCE;
        state.set_height(state.extrusion_height() - FIX_SUBTRACTION_DISTANCE);
    }

    let plane = state.cursor_plane();
    let mut mid_point = state.cursor_start + (state.cursor_end - state.cursor_start) * 0.5;
    mid_point += plane.normal * state.extrusion_height() * 0.5;
    let start_point = project_point_to_plane_2d(&plane, state.cursor_start);
    let end_point = project_point_to_plane_2d(&plane, state.cursor_end);

    let orientation = from_direction(plane.normal);
    let size = Vec3::new(
        (end_point.x - start_point.x).abs(),
        (end_point.y - start_point.y).abs(),
        state.extrusion_height().abs(),
    );

    match state.current_shape {
        BrushShape::Cube => BoxBrushSpawn {
            position: mid_point,
            orientation,
            size,
            mode: if is_subtractive {
                BrushMode::Subtractive
            } else {
                BrushMode::Additive
            },
        },

        other => panic!("unimplemented brush tool shape: {:?}", other),
    }
}

/// Undo-Command für das Spawnen eines konstruierten Brushes.
///
/// Speichert Spawn-Daten und die einmal vergebene Aktor-ID; Redo fügt den
/// Brush unter derselben ID wieder ein.
pub struct SpawnBrushCommand {
    /// Vergebene Brush-Aktor-ID
    pub brush_id: ActorId,
    /// Spawn-Daten des Brushes
    pub spawn: BoxBrushSpawn,
}

impl EditCommand for SpawnBrushCommand {
    fn label(&self) -> &str {
        "Brush erstellen"
    }

    fn apply(&self, scene: &mut Scene) -> Result<()> {
        if scene.get(self.brush_id).is_some() {
            bail!("Aktor-ID {} ist bereits belegt", self.brush_id);
        }
        scene.insert(make_box_brush_actor(self.brush_id, &self.spawn));
        Ok(())
    }

    fn revert(&self, scene: &mut Scene) -> Result<()> {
        scene
            .remove(self.brush_id)
            .map(|_| ())
            .with_context(|| format!("Brush {} nicht gefunden", self.brush_id))
    }
}

/// Wendet Spawn-Daten undo-fähig auf die Szene an und gibt die neue
/// Brush-ID zurück.
pub fn apply_brush_spawn(
    scene: &mut Scene,
    history: &mut EditHistory,
    spawn: BoxBrushSpawn,
) -> ActorId {
    let brush_id = spawn_box_brush(scene, &spawn);
    history.record(Box::new(SpawnBrushCommand { brush_id, spawn }));
    log::info!(
        "Brush {} erstellt ({:?}, Größe {:?})",
        brush_id,
        spawn.mode,
        spawn.size
    );
    brush_id
}
