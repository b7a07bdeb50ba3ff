//! Ebenen-Mathematik für den Brush-Cursor: Projektion zwischen Welt- und
//! Ebenen-Koordinaten sowie Ray-Schnitte.
//!
//! Die 2D-Basis einer Ebene ist kanonisch festgelegt und darf nicht geändert
//! werden — die Platzierung konstruierter Brushes hängt von exakt dieser
//! Konvention ab (siehe `basis`).

use glam::{Quat, Vec2, Vec3};

use super::Ray;

/// Rotation, die die Welt-Vorwärtsachse (+Z) auf `direction` dreht.
///
/// Kanonische "FromDirection"-Rotation für Ebenen-Basen und die
/// Gizmo-Orientierung. Für `direction ≈ -Z` wählt glam deterministisch
/// eine orthogonale Drehachse.
pub fn from_direction(direction: Vec3) -> Quat {
    let dir = direction.normalize_or_zero();
    if dir == Vec3::ZERO {
        return Quat::IDENTITY;
    }
    Quat::from_rotation_arc(Vec3::Z, dir)
}

/// Unendliche Ebene in Normalform `dot(normal, x) = d`.
///
/// Der Referenzpunkt der Ebene ist `normal * d` (Lotfußpunkt vom Ursprung).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    /// Normalisierte Ebenen-Normale
    pub normal: Vec3,
    /// Signierter Abstand entlang der Normalen
    pub d: f32,
}

impl Plane {
    /// Welt-Oben-Ebene durch den Ursprung (Fallback wenn kein Scene-Hit).
    pub const DEFAULT: Plane = Plane {
        normal: Vec3::Y,
        d: 0.0,
    };

    /// Erstellt eine Ebene aus Normale und signiertem Abstand.
    pub fn new(normal: Vec3, d: f32) -> Self {
        Self { normal, d }
    }

    /// Erstellt eine Ebene durch `point` mit Normale `normal`.
    pub fn from_point_normal(point: Vec3, normal: Vec3) -> Self {
        Self {
            normal,
            d: normal.dot(point),
        }
    }

    /// Lotfußpunkt vom Ursprung — Ankerpunkt der 2D-Basis.
    pub fn reference_point(&self) -> Vec3 {
        self.normal * self.d
    }

    /// Kanonische 2D-Basis der Ebene: `right` = Welt-Links (-X) rotiert
    /// durch die FromDirection-Orientierung der Normalen,
    /// `up` = `cross(right, normal)`.
    pub fn basis(&self) -> (Vec3, Vec3) {
        let orientation = from_direction(self.normal);
        let right = orientation * Vec3::NEG_X;
        let up = right.cross(self.normal);
        (right, up)
    }

    /// Schneidet einen Ray mit der Ebene. Gibt die Distanz entlang des Rays
    /// zurück, `None` bei (nahezu) parallelem Ray oder Schnitt hinter dem
    /// Ray-Ursprung.
    pub fn intersect_ray(&self, ray: &Ray) -> Option<f32> {
        let denom = self.normal.dot(ray.direction);
        if denom.abs() < f32::EPSILON {
            return None;
        }
        let t = (self.d - self.normal.dot(ray.origin)) / denom;
        if t < 0.0 {
            return None;
        }
        Some(t)
    }
}

/// Projiziert einen Weltpunkt in die 2D-Basis der Ebene.
///
/// Der Anteil entlang der Normalen wird verworfen; zurück kommen die
/// signierten Fußabdruck-Koordinaten relativ zum Referenzpunkt.
pub fn project_point_to_plane_2d(plane: &Plane, point: Vec3) -> Vec2 {
    let plane_pos = plane.reference_point();
    let relative = point - plane_pos;
    let projected = point - plane.normal * relative.dot(plane.normal);

    let (right, up) = plane.basis();
    let offset = projected - plane_pos;
    Vec2::new(offset.dot(right), offset.dot(up))
}

/// Inverse Abbildung: rekonstruiert den Weltpunkt aus 2D-Ebenen-Koordinaten.
pub fn project_point_from_plane_3d(plane: &Plane, point: Vec2) -> Vec3 {
    let (right, up) = plane.basis();
    plane.reference_point() + right * point.x + up * point.y
}
