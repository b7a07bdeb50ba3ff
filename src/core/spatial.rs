//! Spatial-Index (KD-Tree) für schnelle Abfragen über Spline-Punkte.
//!
//! Wird vom Snap-Editing pro Aufruf neu aufgebaut — die Punktmengen sind
//! klein (Keyframes bzw. Kurven-Samples der sichtbaren Splines).

use glam::Vec3;
use kiddo::{KdTree, SquaredEuclidean};

use super::ActorId;

/// Ergebnis einer Distanzabfrage gegen den Spatial-Index.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpatialMatch {
    /// Aktor, zu dem der Punkt gehört
    pub actor_id: ActorId,
    /// Punkt-Index innerhalb des Aktors (Keyframe- oder Sample-Index)
    pub index: usize,
    /// Gefundene Welt-Position
    pub position: Vec3,
    /// Euklidische Distanz zum Suchpunkt
    pub distance: f32,
}

/// Read-only 3D-Punkt-Index über (Aktor, Index, Position)-Einträge.
#[derive(Debug, Clone)]
pub struct SpatialIndex {
    tree: KdTree<f64, 3>,
    entries: Vec<(ActorId, usize, Vec3)>,
}

impl SpatialIndex {
    /// Erstellt einen leeren Index.
    pub fn empty() -> Self {
        Self {
            tree: (&Vec::<[f64; 3]>::new()).into(),
            entries: Vec::new(),
        }
    }

    /// Baut einen Index aus den übergebenen Punkten.
    pub fn from_points(points: impl IntoIterator<Item = (ActorId, usize, Vec3)>) -> Self {
        let entries: Vec<(ActorId, usize, Vec3)> = points.into_iter().collect();
        let coords: Vec<[f64; 3]> = entries
            .iter()
            .map(|(_, _, p)| [p.x as f64, p.y as f64, p.z as f64])
            .collect();
        let tree: KdTree<f64, 3> = (&coords).into();
        Self { tree, entries }
    }

    /// Anzahl indexierter Punkte.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Gibt `true` zurück, wenn keine Punkte im Index liegen.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Findet den nächsten Punkt zur gegebenen Weltposition.
    pub fn nearest(&self, query: Vec3) -> Option<SpatialMatch> {
        if self.is_empty() {
            return None;
        }

        let result = self
            .tree
            .nearest_one::<SquaredEuclidean>(&[query.x as f64, query.y as f64, query.z as f64]);
        let (actor_id, index, position) = *self.entries.get(result.item as usize)?;

        Some(SpatialMatch {
            actor_id,
            index,
            position,
            distance: (result.distance as f32).sqrt(),
        })
    }

    /// Findet alle Punkte innerhalb eines Radius, nach Distanz sortiert.
    pub fn within_radius(&self, query: Vec3, radius: f32) -> Vec<SpatialMatch> {
        if self.is_empty() || radius.is_sign_negative() {
            return Vec::new();
        }

        let mut results = self
            .tree
            .within::<SquaredEuclidean>(
                &[query.x as f64, query.y as f64, query.z as f64],
                (radius * radius) as f64,
            )
            .into_iter()
            .filter_map(|entry| {
                let (actor_id, index, position) = *self.entries.get(entry.item as usize)?;
                Some(SpatialMatch {
                    actor_id,
                    index,
                    position,
                    distance: (entry.distance as f32).sqrt(),
                })
            })
            .collect::<Vec<_>>();

        results.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        results
    }
}
