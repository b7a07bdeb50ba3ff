//! Welt-Transform (Translation, Orientierung, Skalierung) für Aktoren,
//! Keyframes und das Gizmo.

use glam::{Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Transform aus Translation, Orientierung und nicht-uniformer Skalierung.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    /// Position in Welt-Koordinaten
    pub translation: Vec3,
    /// Orientierung
    pub orientation: Quat,
    /// Skalierung pro Achse
    pub scale: Vec3,
}

impl Transform {
    /// Identitäts-Transform.
    pub const IDENTITY: Transform = Transform {
        translation: Vec3::ZERO,
        orientation: Quat::IDENTITY,
        scale: Vec3::ONE,
    };

    /// Transform nur aus einer Translation.
    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            ..Self::IDENTITY
        }
    }

    /// Lokaler Punkt → Welt.
    pub fn transform_point(&self, point: Vec3) -> Vec3 {
        self.translation + self.orientation * (point * self.scale)
    }

    /// Lokaler Vektor → Welt (ohne Translation).
    pub fn transform_vector(&self, vector: Vec3) -> Vec3 {
        self.orientation * (vector * self.scale)
    }

    /// Welt-Punkt → lokal.
    pub fn inverse_transform_point(&self, point: Vec3) -> Vec3 {
        (self.orientation.inverse() * (point - self.translation)) / self.safe_scale()
    }

    /// Welt-Vektor → lokal (ohne Translation).
    pub fn inverse_transform_vector(&self, vector: Vec3) -> Vec3 {
        (self.orientation.inverse() * vector) / self.safe_scale()
    }

    /// Als 4x4-Matrix (für Mesh-Instanzen im Debug-Draw).
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.orientation, self.translation)
    }

    /// Skalierung mit Null-Komponenten auf 1 geklemmt (Division).
    fn safe_scale(&self) -> Vec3 {
        Vec3::new(
            if self.scale.x.abs() < f32::EPSILON {
                1.0
            } else {
                self.scale.x
            },
            if self.scale.y.abs() < f32::EPSILON {
                1.0
            } else {
                self.scale.y
            },
            if self.scale.z.abs() < f32::EPSILON {
                1.0
            } else {
                self.scale.z
            },
        )
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}
