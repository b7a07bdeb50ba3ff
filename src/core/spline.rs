//! Spline-Daten: Bezier-Keyframes mit In/Out-Tangenten, Kurvenauswertung
//! und Sampling für Snap-Abfragen und Debug-Draw.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::Transform;

/// Kubischer Bezier-Punkt (t ∈ [0, 1]).
pub fn cubic_bezier(p0: Vec3, p1: Vec3, p2: Vec3, p3: Vec3, t: f32) -> Vec3 {
    let u = 1.0 - t;
    let u2 = u * u;
    let t2 = t * t;
    p0 * (u2 * u) + p1 * (3.0 * u2 * t) + p2 * (3.0 * u * t2) + p3 * (t2 * t)
}

/// Ein Kontrollpunkt der Spline-Kurve.
///
/// Die Tangenten sind relative Transforms zum Keyframe-Wert; ihre
/// Translation spannt die Bezier-Kontrollpunkte des angrenzenden Segments auf.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SplineKeyframe {
    /// Kurven-Zeit des Keyframes
    pub time: f32,
    /// Lokaler Transform des Punkts
    pub value: Transform,
    /// Eingehende Tangente (relativ zum Wert)
    pub tangent_in: Transform,
    /// Ausgehende Tangente (relativ zum Wert)
    pub tangent_out: Transform,
}

impl SplineKeyframe {
    /// Keyframe ohne Tangenten an einer lokalen Position.
    pub fn at(time: f32, value: Transform) -> Self {
        Self {
            time,
            value,
            tangent_in: Transform::IDENTITY,
            tangent_out: Transform::IDENTITY,
        }
    }
}

/// Keyframe-Liste eines Spline-Aktors.
#[derive(Debug, Clone, Default)]
pub struct SplineData {
    /// Kontrollpunkte in Zeit-Reihenfolge
    pub keyframes: Vec<SplineKeyframe>,
    /// Läuft die Spline als geschlossene Schleife? Der letzte Punkt ist
    /// dann identisch mit dem ersten.
    pub is_loop: bool,
}

impl SplineData {
    /// Leere Spline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Anzahl der Kontrollpunkte.
    pub fn point_count(&self) -> usize {
        self.keyframes.len()
    }

    /// Hängt einen lokalen Punkt hinten an (Zeit = letzte Zeit + 1).
    pub fn add_local_point(&mut self, position: Vec3) {
        let time = self
            .keyframes
            .last()
            .map(|k| k.time + 1.0)
            .unwrap_or(0.0);
        self.keyframes
            .push(SplineKeyframe::at(time, Transform::from_translation(position)));
    }

    /// Fügt einen lokalen Punkt an `index` ein.
    pub fn insert_local_point(&mut self, index: usize, time: f32, value: Transform) {
        let index = index.min(self.keyframes.len());
        self.keyframes.insert(index, SplineKeyframe::at(time, value));
    }

    /// Entfernt den Punkt an `index`.
    pub fn remove_point(&mut self, index: usize) {
        if index < self.keyframes.len() {
            self.keyframes.remove(index);
        }
    }

    /// Keyframe an `index`.
    pub fn keyframe(&self, index: usize) -> Option<&SplineKeyframe> {
        self.keyframes.get(index)
    }

    /// Mutable Keyframe an `index`.
    pub fn keyframe_mut(&mut self, index: usize) -> Option<&mut SplineKeyframe> {
        self.keyframes.get_mut(index)
    }

    /// Ersetzt den Keyframe an `index` vollständig.
    pub fn set_keyframe(&mut self, index: usize, keyframe: SplineKeyframe) {
        if let Some(slot) = self.keyframes.get_mut(index) {
            *slot = keyframe;
        }
    }

    /// Kurven-Zeit an `index` (0.0 wenn außerhalb).
    pub fn time_at(&self, index: usize) -> f32 {
        self.keyframes.get(index).map(|k| k.time).unwrap_or(0.0)
    }

    /// Lokaler Kurvenpunkt auf Segment `segment` bei `t` ∈ [0, 1].
    ///
    /// Kontrollpunkte: `value + tangent_out / 3` bzw. `value + tangent_in / 3`
    /// des jeweiligen Segment-Endes.
    pub fn segment_point_local(&self, segment: usize, t: f32) -> Option<Vec3> {
        let k0 = self.keyframes.get(segment)?;
        let k1 = self.keyframes.get(segment + 1)?;
        let p0 = k0.value.translation;
        let p3 = k1.value.translation;
        let c1 = p0 + k0.tangent_out.translation / 3.0;
        let c2 = p3 + k1.tangent_in.translation / 3.0;
        Some(cubic_bezier(p0, c1, c2, p3, t))
    }

    /// Sampelt die gesamte Kurve als lokale Polyline.
    ///
    /// `samples_per_segment`: Zwischenpunkte pro Segment (ohne Endpunkt);
    /// der letzte Keyframe wird immer exakt übernommen.
    pub fn sample_local(&self, samples_per_segment: usize) -> Vec<Vec3> {
        if self.keyframes.len() < 2 {
            return self.keyframes.iter().map(|k| k.value.translation).collect();
        }
        let segments = self.keyframes.len() - 1;
        let per_segment = samples_per_segment.max(1);
        let mut result = Vec::with_capacity(segments * per_segment + 1);
        for segment in 0..segments {
            for i in 0..per_segment {
                let t = i as f32 / per_segment as f32;
                if let Some(p) = self.segment_point_local(segment, t) {
                    result.push(p);
                }
            }
        }
        result.push(self.keyframes[segments].value.translation);
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn line_spline() -> SplineData {
        let mut spline = SplineData::new();
        spline.add_local_point(Vec3::ZERO);
        spline.add_local_point(Vec3::new(0.0, 0.0, 100.0));
        spline
    }

    #[test]
    fn add_assigns_increasing_times() {
        let spline = line_spline();
        assert_eq!(spline.point_count(), 2);
        assert_relative_eq!(spline.time_at(0), 0.0);
        assert_relative_eq!(spline.time_at(1), 1.0);
    }

    #[test]
    fn insert_and_remove_keep_order() {
        let mut spline = line_spline();
        spline.insert_local_point(1, 0.5, Transform::from_translation(Vec3::new(0.0, 0.0, 50.0)));
        assert_eq!(spline.point_count(), 3);
        assert_relative_eq!(spline.keyframe(1).unwrap().value.translation.z, 50.0);

        spline.remove_point(1);
        assert_eq!(spline.point_count(), 2);
        assert_relative_eq!(spline.keyframe(1).unwrap().value.translation.z, 100.0);
    }

    #[test]
    fn segment_without_tangents_is_a_straight_line() {
        let spline = line_spline();
        let mid = spline.segment_point_local(0, 0.5).expect("Segment vorhanden");
        assert_relative_eq!(mid.z, 50.0, epsilon = 1e-4);
        assert_relative_eq!(mid.x, 0.0, epsilon = 1e-4);
    }

    #[test]
    fn sample_includes_both_endpoints() {
        let spline = line_spline();
        let samples = spline.sample_local(8);
        assert_eq!(samples.len(), 9);
        assert_relative_eq!(samples.first().unwrap().z, 0.0);
        assert_relative_eq!(samples.last().unwrap().z, 100.0);
    }

    #[test]
    fn tangents_bend_the_curve() {
        let mut spline = line_spline();
        let k = spline.keyframe_mut(0).unwrap();
        k.tangent_out = Transform::from_translation(Vec3::new(90.0, 0.0, 0.0));
        let mid = spline.segment_point_local(0, 0.5).expect("Segment vorhanden");
        assert!(mid.x > 5.0, "Tangente muss die Kurve auslenken: {mid:?}");
    }
}
