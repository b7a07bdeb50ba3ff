//! Viewport-Kamera: Frustum-Abfragen und distanzbasierte Gizmo-Skalierung.

use glam::Vec3;

use super::Frustum;

/// Zustand der Editor-Viewport-Kamera, pro Frame vom Host gestellt.
#[derive(Debug, Clone)]
pub struct ViewportCamera {
    /// Kamera-Position in Welt-Koordinaten
    pub view_position: Vec3,
    /// Normalisierte Blickrichtung
    pub view_direction: Vec3,
    /// Oben-Vektor
    pub up: Vec3,
    /// Vertikaler Öffnungswinkel (Radiant)
    pub fov_y: f32,
    /// Nahe Clip-Ebene
    pub near: f32,
    /// Ferne Clip-Ebene
    pub far: f32,
    /// Seitenverhältnis (Breite / Höhe)
    pub aspect: f32,
    /// Orthographische Projektion aktiv?
    pub orthographic: bool,
    /// Skalierung der orthographischen Projektion
    pub ortho_scale: f32,
}

impl ViewportCamera {
    /// Kamera mit Editor-Standardwerten an einer Position.
    pub fn new(view_position: Vec3, view_direction: Vec3) -> Self {
        Self {
            view_position,
            view_direction: view_direction.normalize_or_zero(),
            up: Vec3::Y,
            fov_y: std::f32::consts::FRAC_PI_3,
            near: 0.1,
            far: 10_000.0,
            aspect: 16.0 / 9.0,
            orthographic: false,
            ortho_scale: 1.0,
        }
    }

    /// Sicht-Frustum der Kamera.
    pub fn frustum(&self) -> Frustum {
        Frustum::from_camera(
            self.view_position,
            self.view_direction,
            self.up,
            self.fov_y,
            self.near,
            self.far,
            self.aspect,
        )
    }

    /// Skaliert eine Node-Größe mit der Kamera-Distanz, damit die
    /// Screen-Größe ungefähr konstant bleibt.
    pub fn node_size_by_distance(&self, node_position: Vec3, node_size: f32) -> f32 {
        let distance = self.view_position.distance(node_position) / 100.0;
        distance * node_size
    }

    /// Screen-konstante Gizmo-Skalierung am gegebenen Ursprung.
    pub fn gizmo_screen_scale(&self, origin: Vec3, gizmo_size: f32) -> f32 {
        if self.orthographic {
            gizmo_size * 50.0 * self.ortho_scale
        } else {
            self.view_position.distance(origin) / 25.0 * gizmo_size
        }
    }
}
