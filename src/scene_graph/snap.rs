//! Snap-Editing: zieht den selektierten Spline-Punkt auf Keyframes oder
//! Kurvenpunkte anderer Splines im Sichtfeld.
//!
//! Aktiv solange die Modifier-Taste gehalten wird und genau ein Punkt-Node
//! der aktuell bearbeiteten Spline selektiert ist. Indikator-Kugeln
//! skalieren mit der Kamera-Distanz, damit ihre Screen-Größe ungefähr
//! konstant bleibt.

use glam::Vec3;

use crate::app::{EditSession, SelectionState};
use crate::core::{
    ActorId, BoundingSphere, Scene, SpatialIndex, ViewportCamera,
};
use crate::shared::debug_draw::{DebugDrawList, COLOR_RED, COLOR_YELLOW};
use crate::shared::options::{EditorOptions, SPLINE_SAMPLES_PER_SEGMENT};

use super::{point_index, NodeId, NodeKind};

/// Radius der Hitbox um den selektierten Punkt.
const SELECTED_NODE_RADIUS: f32 = 1.0;

/// Führt einen Snap-Schritt für die Spline `spline_id` aus.
///
/// Snap-Reihenfolge: zuerst exakte Keyframes anderer Splines (kleinere,
/// rote Indikatoren), dann der nächste Kurvenpunkt irgendeiner anderen
/// Spline (größerer, gelber Indikator).
#[allow(clippy::too_many_arguments)]
pub fn edit_spline_with_snap(
    spline_id: ActorId,
    scene: &mut Scene,
    selection: &SelectionState,
    session: &EditSession,
    camera: &ViewportCamera,
    options: &EditorOptions,
    draw: &mut DebugDrawList,
) {
    if session.current_edit_spline() != Some(spline_id) {
        return;
    }
    let Some(selected_index) = selected_point_index(selection, spline_id) else {
        return;
    };
    let Some(selected_position) = scene
        .get(spline_id)
        .and_then(|a| a.spline_point_world(selected_index))
    else {
        return;
    };
    let selected_bounds = BoundingSphere::new(selected_position, SELECTED_NODE_RADIUS);

    let mut splines_in_view = scene.splines_in_frustum(&camera.frustum());
    splines_in_view.retain(|id| *id != spline_id);
    if splines_in_view.is_empty() {
        return;
    }

    // Keyframe-Snap: alle Keyframes der sichtbaren Splines anzeigen und
    // auf den ersten überlappenden einrasten.
    let mut snapped_on_spline_point = false;
    'outer: for other_id in &splines_in_view {
        let keyframe_positions: Vec<Vec3> = match scene.get(*other_id) {
            Some(other) => {
                let count = other.as_spline().map(|s| s.point_count()).unwrap_or(0);
                (0..count)
                    .filter_map(|index| other.spline_point_world(index))
                    .collect()
            }
            None => continue,
        };

        for keyframe_position in keyframe_positions {
            let indicator_size =
                camera.node_size_by_distance(keyframe_position, options.snap_point_indicator_size);
            let keyframe_bounds = BoundingSphere::new(keyframe_position, indicator_size);
            draw.draw_sphere(keyframe_position, indicator_size, COLOR_RED, false);

            if keyframe_bounds.intersects_sphere(&selected_bounds) {
                if let Some(actor) = scene.get_mut(spline_id) {
                    actor.set_spline_point_world(selected_index, keyframe_bounds.center);
                }
                snapped_on_spline_point = true;
                break 'outer;
            }
        }
    }

    if !snapped_on_spline_point {
        let index = build_curve_sample_index(scene, &splines_in_view);
        let Some(near) = index.nearest(selected_position) else {
            return;
        };
        let indicator_size =
            camera.node_size_by_distance(near.position, options.snap_indicator_size);
        let snap_bounds = BoundingSphere::new(near.position, indicator_size);

        if snap_bounds.intersects_sphere(&selected_bounds) {
            if let Some(actor) = scene.get_mut(spline_id) {
                actor.set_spline_point_world(selected_index, snap_bounds.center);
            }
        }

        draw.draw_sphere(near.position, indicator_size, COLOR_YELLOW, true);
    }
}

/// Index des selektierten Punkt-Nodes, falls genau einer selektiert ist
/// und er zur angegebenen Spline gehört.
fn selected_point_index(selection: &SelectionState, spline_id: ActorId) -> Option<usize> {
    let id: NodeId = selection.single_selected()?;
    if id.owner != spline_id || NodeKind::from_node_id(id) != NodeKind::SplinePoint {
        return None;
    }
    point_index(id)
}

/// Baut den KD-Tree über die gesampelten Kurvenpunkte der übergebenen Splines.
fn build_curve_sample_index(scene: &Scene, spline_ids: &[ActorId]) -> SpatialIndex {
    let mut points: Vec<(ActorId, usize, Vec3)> = Vec::new();
    for id in spline_ids {
        let Some(actor) = scene.get(*id) else {
            continue;
        };
        let Some(spline) = actor.as_spline() else {
            continue;
        };
        for (sample_index, local) in spline
            .sample_local(SPLINE_SAMPLES_PER_SEGMENT)
            .into_iter()
            .enumerate()
        {
            points.push((*id, sample_index, actor.transform.transform_point(local)));
        }
    }
    SpatialIndex::from_points(points)
}
