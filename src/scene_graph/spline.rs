//! Scene-Graph-Nodes für Spline-Aktoren: Wurzel-Node mit Punkt-Kindern,
//! jeder Punkt mit zwei Tangenten-Handles.
//!
//! Die Kind-Nodes spiegeln pro Frame die lebende Punktanzahl des Aktors
//! (`sync`); Identität kommt aus der deterministischen Ableitung in
//! [`super::point_node_id`] und überlebt damit Undo/Redo-Round-Trips.

use anyhow::{Context, Result};
use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::app::{EditCommand, EditHistory, EditSession, SelectionState};
use crate::core::{
    Actor, ActorId, BoundingSphere, Ray, Scene, SplineKeyframe, Transform, ViewportCamera,
};
use crate::shared::debug_draw::{
    alpha_multiplied, DebugDrawList, COLOR_BLUE, COLOR_RED, COLOR_WHITE, COLOR_YELLOW,
    COLOR_YELLOW_GREEN,
};
use crate::shared::options::{EditorOptions, SPLINE_SAMPLES_PER_SEGMENT};
use crate::tools::InputSnapshot;

use super::{point_node_id, root_node_id, tangent_node_id, NodeId, NodeKind};

// ── Tangenten-Node ──────────────────────────────────────────────────

/// Handle für eine einzelne Bezier-Tangente eines Spline-Punkts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplineTangentNode {
    /// Abgeleitete Node-ID
    pub id: NodeId,
    /// Besitzer-Spline
    pub spline_id: ActorId,
    /// Keyframe-Index
    pub index: usize,
    /// Eingehende (`true`) oder ausgehende Tangente
    pub is_in: bool,
}

impl SplineTangentNode {
    fn new(spline_id: ActorId, index: usize, is_in: bool) -> Self {
        Self {
            id: tangent_node_id(spline_id, index, is_in),
            spline_id,
            index,
            is_in,
        }
    }

    /// Welt-Transform des Tangenten-Handles.
    pub fn transform(&self, scene: &Scene) -> Option<Transform> {
        let actor = scene.get(self.spline_id)?;
        let position = actor.spline_tangent_world(self.index, self.is_in)?;
        Some(Transform::from_translation(position))
    }

    /// Setzt die Tangente aus einem Welt-Transform.
    pub fn set_transform(&self, scene: &mut Scene, value: Transform) {
        if let Some(actor) = scene.get_mut(self.spline_id) {
            actor.set_spline_tangent_world(self.index, self.is_in, value.translation);
        }
    }

    /// Kugel-Hit-Test gegen das Tangenten-Handle.
    pub fn ray_cast(
        &self,
        scene: &Scene,
        camera: &ViewportCamera,
        ray: &Ray,
        options: &EditorOptions,
    ) -> Option<(f32, Vec3)> {
        let actor = scene.get(self.spline_id)?;
        let position = actor.spline_tangent_world(self.index, self.is_in)?;
        let size = camera.node_size_by_distance(position, options.tangent_node_size);
        BoundingSphere::new(position, size)
            .intersect_ray(ray)
            .map(|distance| (distance, -ray.direction))
    }

    /// Zeichnet Spline-Pfad und Tangenten-Highlight.
    pub fn debug_draw(
        &self,
        scene: &Scene,
        camera: &ViewportCamera,
        draw: &mut DebugDrawList,
        options: &EditorOptions,
    ) {
        let Some(actor) = scene.get(self.spline_id) else {
            return;
        };
        draw_spline_path(actor, draw);

        let Some(position) = actor.spline_tangent_world(self.index, self.is_in) else {
            return;
        };
        let size = camera.node_size_by_distance(position, options.tangent_node_size);
        draw.draw_sphere(position, size, COLOR_YELLOW_GREEN, false);
    }
}

// ── Punkt-Node ──────────────────────────────────────────────────────

/// Wrapper um einen Keyframe-Index des Spline-Aktors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplinePointNode {
    /// Abgeleitete Node-ID
    pub id: NodeId,
    /// Besitzer-Spline
    pub spline_id: ActorId,
    /// Keyframe-Index
    pub index: usize,
    /// Die beiden Tangenten-Kinder (in, out)
    pub tangents: [SplineTangentNode; 2],
}

/// Serialisierter Zustand eines Punkt-Nodes, ausreichend um den Punkt nach
/// einem Undo/Redo-Round-Trip wiederherzustellen.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SplinePointState {
    /// Besitzer-Spline
    pub spline: ActorId,
    /// Keyframe-Index
    pub index: usize,
    /// Vollständiger Keyframe
    pub keyframe: SplineKeyframe,
}

impl SplinePointNode {
    /// Erstellt den Punkt-Node samt Tangenten-Kindern.
    pub fn new(spline_id: ActorId, index: usize) -> Self {
        Self {
            id: point_node_id(spline_id, index),
            spline_id,
            index,
            tangents: [
                SplineTangentNode::new(spline_id, index, true),
                SplineTangentNode::new(spline_id, index, false),
            ],
        }
    }

    /// Ist der Punkt oder eine seiner Tangenten selektiert?
    pub fn is_selected(&self, selection: &SelectionState) -> bool {
        selection.contains(self.id)
            || selection.contains(self.tangents[0].id)
            || selection.contains(self.tangents[1].id)
    }

    /// Welt-Transform des Punkts.
    pub fn transform(&self, scene: &Scene) -> Option<Transform> {
        scene.get(self.spline_id)?.spline_transform_world(self.index)
    }

    /// Setzt den Punkt aus einem Welt-Transform und markiert die Spline
    /// als aktuell bearbeitet.
    pub fn set_transform(&self, scene: &mut Scene, session: &mut EditSession, value: Transform) {
        if let Some(actor) = scene.get_mut(self.spline_id) {
            actor.set_spline_transform_world(self.index, value);
            session.mark_spline_edited(self.spline_id);
        }
    }

    /// Entfernt den gewrappten Keyframe aus dem Aktor.
    pub fn delete(&self, scene: &mut Scene) {
        if let Some(spline) = scene.get_mut(self.spline_id).and_then(|a| a.as_spline_mut()) {
            spline.remove_point(self.index);
        }
    }

    /// Duplizieren ist gesperrt solange der Eltern-Spline-Node selbst
    /// selektiert ist (der Host dupliziert dann den ganzen Aktor).
    pub fn can_duplicate(&self, selection: &SelectionState) -> bool {
        !selection.contains(root_node_id(self.spline_id))
    }

    /// Dupliziert den Punkt: hinter dem letzten Punkt wird angehängt,
    /// sonst zwischen diesem und dem nächsten eingefügt.
    ///
    /// Zeichnet ein [`DuplicateSplinePointCommand`] auf und gibt die
    /// Node-ID des neuen Punkts zurück.
    pub fn duplicate(
        &self,
        scene: &mut Scene,
        history: &mut EditHistory,
        session: &mut EditSession,
    ) -> Result<NodeId> {
        let spline = scene
            .get(self.spline_id)
            .and_then(|a| a.as_spline())
            .with_context(|| format!("Spline {} nicht gefunden", self.spline_id))?;
        let count = spline.point_count();
        let (new_index, new_time) = if self.index == count.saturating_sub(1) {
            // Hinten anhängen
            (count, spline.time_at(count.saturating_sub(1)) + 1.0)
        } else {
            // Zwischen diesem und dem nächsten Punkt einfügen
            (
                self.index + 1,
                (spline.time_at(self.index) + spline.time_at(self.index + 1)) * 0.5,
            )
        };

        let old = *spline
            .keyframe(self.index)
            .with_context(|| format!("Keyframe {} nicht vorhanden", self.index))?;
        let keyframe = SplineKeyframe {
            time: new_time,
            value: old.value,
            tangent_in: old.tangent_in,
            tangent_out: old.tangent_out,
        };

        let command = DuplicateSplinePointCommand {
            spline_id: self.spline_id,
            index: new_index,
            keyframe,
        };
        command.apply(scene)?;
        history.record(Box::new(command));
        session.mark_spline_edited(self.spline_id);
        Ok(point_node_id(self.spline_id, new_index))
    }

    /// Kugel-Hit-Test gegen das Punkt-Handle.
    pub fn ray_cast(
        &self,
        scene: &Scene,
        camera: &ViewportCamera,
        ray: &Ray,
        options: &EditorOptions,
    ) -> Option<(f32, Vec3)> {
        let actor = scene.get(self.spline_id)?;
        let position = actor.spline_point_world(self.index)?;
        let size = camera.node_size_by_distance(position, options.point_node_size);
        BoundingSphere::new(position, size)
            .intersect_ray(ray)
            .map(|distance| (distance, -ray.direction))
    }

    /// Zeichnet Pfad, Punkt-Highlight und Tangenten.
    pub fn debug_draw(
        &self,
        scene: &Scene,
        camera: &ViewportCamera,
        draw: &mut DebugDrawList,
        options: &EditorOptions,
    ) {
        let Some(actor) = scene.get(self.spline_id) else {
            return;
        };
        let Some(position) = actor.spline_point_world(self.index) else {
            return;
        };
        draw_spline_path(actor, draw);

        let point_size = camera.node_size_by_distance(position, options.point_node_size);
        draw.draw_sphere(position, point_size, COLOR_YELLOW, false);

        let tangent_in = actor.spline_tangent_world(self.index, true);
        let tangent_out = actor.spline_tangent_world(self.index, false);
        if let Some(tangent) = tangent_in {
            if tangent != position {
                let size = camera.node_size_by_distance(tangent, options.tangent_node_size);
                draw.draw_line(position, tangent, alpha_multiplied(COLOR_BLUE, 0.6));
                draw.draw_wire_sphere(tangent, size, COLOR_BLUE, false);
            }
        }
        if let Some(tangent) = tangent_out {
            if tangent != position {
                let size = camera.node_size_by_distance(tangent, options.tangent_node_size);
                draw.draw_line(position, tangent, alpha_multiplied(COLOR_RED, 0.6));
                draw.draw_wire_sphere(tangent, size, COLOR_RED, false);
            }
        }
    }

    /// Serialisiert den Node-Zustand (Spline-ID, Index, Keyframe) als JSON.
    ///
    /// Ein In-Place-Restore auf einem lebenden Node wird bewusst nicht
    /// angeboten — der Snapshot wird ausschließlich über
    /// [`SplinePointNode::create_from_state`] wieder eingespielt.
    pub fn state(&self, scene: &Scene) -> Result<String> {
        let keyframe = scene
            .get(self.spline_id)
            .and_then(|a| a.as_spline())
            .and_then(|s| s.keyframe(self.index))
            .copied()
            .with_context(|| {
                format!(
                    "Keyframe {} von Spline {} nicht vorhanden",
                    self.index, self.spline_id
                )
            })?;
        Ok(serde_json::to_string(&SplinePointState {
            spline: self.spline_id,
            index: self.index,
            keyframe,
        })?)
    }

    /// Stellt einen Punkt aus einem State-Snapshot wieder her und gibt die
    /// Node-ID des neu erzeugten Punkts zurück.
    pub fn create_from_state(
        json: &str,
        scene: &mut Scene,
        session: &mut EditSession,
    ) -> Result<NodeId> {
        let state: SplinePointState = serde_json::from_str(json)?;
        let spline = scene
            .get_mut(state.spline)
            .and_then(|a| a.as_spline_mut())
            .with_context(|| format!("Spline {} nicht gefunden", state.spline))?;
        spline.insert_local_point(state.index, state.keyframe.time, state.keyframe.value);
        spline.set_keyframe(state.index, state.keyframe);
        session.mark_spline_edited(state.spline);
        Ok(point_node_id(state.spline, state.index))
    }
}

// ── Duplicate-Command ───────────────────────────────────────────────

/// Undo-Command für das Duplizieren eines Spline-Punkts.
///
/// Speichert nur stabile IDs und den Keyframe; der lebende Aktor wird bei
/// jeder Ausführung per Lookup aufgelöst.
pub struct DuplicateSplinePointCommand {
    /// Besitzer-Spline
    pub spline_id: ActorId,
    /// Einfüge-Index des neuen Punkts
    pub index: usize,
    /// Vollständiger Keyframe des neuen Punkts
    pub keyframe: SplineKeyframe,
}

impl EditCommand for DuplicateSplinePointCommand {
    fn label(&self) -> &str {
        "Spline-Punkt duplizieren"
    }

    fn apply(&self, scene: &mut Scene) -> Result<()> {
        let spline = scene
            .get_mut(self.spline_id)
            .and_then(|a| a.as_spline_mut())
            .with_context(|| format!("Spline {} nicht gefunden", self.spline_id))?;
        spline.insert_local_point(self.index, self.keyframe.time, self.keyframe.value);
        spline.set_keyframe(self.index, self.keyframe);
        Ok(())
    }

    fn revert(&self, scene: &mut Scene) -> Result<()> {
        let spline = scene
            .get_mut(self.spline_id)
            .and_then(|a| a.as_spline_mut())
            .with_context(|| format!("Spline {} nicht gefunden", self.spline_id))?;
        spline.remove_point(self.index);
        Ok(())
    }
}

// ── Wurzel-Node ─────────────────────────────────────────────────────

/// Scene-Graph-Node eines Spline-Aktors.
#[derive(Debug, Clone, Default)]
pub struct SplineNode {
    /// Gewrappter Aktor
    pub actor_id: ActorId,
    points: Vec<SplinePointNode>,
}

impl SplineNode {
    /// Erstellt den Node; die Punkt-Kinder entstehen beim ersten `sync`.
    pub fn new(actor_id: ActorId) -> Self {
        Self {
            actor_id,
            points: Vec::new(),
        }
    }

    /// Node-ID der Wurzel.
    pub fn id(&self) -> NodeId {
        root_node_id(self.actor_id)
    }

    /// Aktuelle Punkt-Kind-Nodes.
    pub fn points(&self) -> &[SplinePointNode] {
        &self.points
    }

    /// Per-Frame-Update: optionales Snap-Editing, danach Kind-Sync.
    #[allow(clippy::too_many_arguments)]
    pub fn on_update(
        &mut self,
        scene: &mut Scene,
        selection: &mut SelectionState,
        session: &EditSession,
        camera: &ViewportCamera,
        input: &InputSnapshot,
        options: &EditorOptions,
        draw: &mut DebugDrawList,
    ) {
        if input.shift_down {
            super::edit_spline_with_snap(
                self.actor_id,
                scene,
                selection,
                session,
                camera,
                options,
                draw,
            );
        }
        self.sync(scene, selection);
    }

    /// Gleicht die Kind-Nodes mit der lebenden Punktanzahl des Aktors ab.
    ///
    /// Bei Loop-Splines zählt der letzte Punkt nicht (identisch mit dem
    /// ersten). Entfernte Nodes werden vorher deselektiert.
    pub fn sync(&mut self, scene: &Scene, selection: &mut SelectionState) {
        let Some(spline) = scene.get(self.actor_id).and_then(|a| a.as_spline()) else {
            return;
        };
        let mut dst_count = spline.point_count();
        if dst_count > 1 && spline.is_loop {
            dst_count -= 1;
        }
        let src_count = self.points.len();
        if dst_count == src_count {
            return;
        }

        // Überzählige Punkte entfernen
        while self.points.len() > dst_count {
            if let Some(node) = self.points.pop() {
                if node.is_selected(selection) {
                    selection.deselect_all();
                }
            }
        }

        // Neue Punkte anhängen
        while self.points.len() < dst_count {
            let index = self.points.len();
            self.points.push(SplinePointNode::new(self.actor_id, index));
        }
    }

    /// Initial-Setup einer frisch gespawnten Spline: zwei Standard-Punkte
    /// mit Vorwärts-/Rückwärts-Tangenten.
    pub fn post_spawn(scene: &mut Scene, spline_id: ActorId) {
        let Some(spline) = scene.get_mut(spline_id).and_then(|a| a.as_spline_mut()) else {
            return;
        };
        spline.add_local_point(Vec3::ZERO);
        spline.add_local_point(Vec3::new(0.0, 0.0, 100.0));

        spline.set_keyframe(
            0,
            SplineKeyframe {
                time: 0.0,
                value: Transform::IDENTITY,
                tangent_in: Transform::from_translation(Vec3::NEG_Z * 100.0),
                tangent_out: Transform::from_translation(Vec3::Z * 100.0),
            },
        );
        spline.set_keyframe(
            1,
            SplineKeyframe {
                time: 1.0,
                value: Transform::from_translation(Vec3::Z * 100.0),
                tangent_in: Transform::from_translation(Vec3::NEG_Z * 100.0),
                tangent_out: Transform::from_translation(Vec3::Z * 100.0),
            },
        );
    }

    /// Hit-Test über alle Kind-Nodes; das nächste selektierbare Handle
    /// gewinnt. Die Selektierbarkeit kommt aus der Fähigkeitstabelle.
    ///
    /// Der Wurzel-Node selbst ist bewusst nicht pickbar — im Viewport
    /// werden nur Punkte und Tangenten selektiert.
    pub fn ray_cast(
        &self,
        scene: &Scene,
        camera: &ViewportCamera,
        ray: &Ray,
        options: &EditorOptions,
    ) -> Option<(NodeId, f32)> {
        let mut best: Option<(NodeId, f32)> = None;
        let mut consider = |id: NodeId, hit: Option<(f32, Vec3)>| {
            if !NodeKind::from_node_id(id).capabilities().selectable {
                return;
            }
            if let Some((distance, _)) = hit {
                if best.map(|(_, d)| distance < d).unwrap_or(true) {
                    best = Some((id, distance));
                }
            }
        };

        for point in &self.points {
            consider(point.id, point.ray_cast(scene, camera, ray, options));
            for tangent in &point.tangents {
                consider(tangent.id, tangent.ray_cast(scene, camera, ray, options));
            }
        }
        best
    }

    /// Zeichnet den Spline-Pfad.
    pub fn debug_draw(&self, scene: &Scene, draw: &mut DebugDrawList) {
        if let Some(actor) = scene.get(self.actor_id) {
            draw_spline_path(actor, draw);
        }
    }
}

/// Zeichnet die gesampelte Spline-Kurve als Polyline.
pub(crate) fn draw_spline_path(actor: &Actor, draw: &mut DebugDrawList) {
    let Some(spline) = actor.as_spline() else {
        return;
    };
    let samples = spline.sample_local(SPLINE_SAMPLES_PER_SEGMENT);
    for window in samples.windows(2) {
        draw.draw_line(
            actor.transform.transform_point(window[0]),
            actor.transform.transform_point(window[1]),
            alpha_multiplied(COLOR_WHITE, 0.7),
        );
    }
}
