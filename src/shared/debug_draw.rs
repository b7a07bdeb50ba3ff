//! Debug-Draw-Senke: pro Frame gesammelte Linien-, Kugel- und
//! Mesh-Primitive, die der Host-Renderer rasterisiert.
//!
//! Reine Daten — das Pendant zur RenderScene des Editors: Werkzeuge
//! schreiben Primitive, der Host liest und leert die Liste pro Frame.

use glam::{Mat4, Vec3};

use crate::shared::content::AssetHandle;

/// RGBA-Farbe.
pub type Color = [f32; 4];

/// Rot (Cursor, Drag-Rechteck, Keyframe-Indikatoren).
pub const COLOR_RED: Color = [1.0, 0.0, 0.0, 1.0];
/// Gelb (Extrusions-Box, Kurven-Snap-Indikator, Punkt-Highlight).
pub const COLOR_YELLOW: Color = [1.0, 1.0, 0.0, 1.0];
/// Blau (eingehende Tangenten).
pub const COLOR_BLUE: Color = [0.0, 0.0, 1.0, 1.0];
/// Gelbgrün (selektierte Tangenten).
pub const COLOR_YELLOW_GREEN: Color = [0.6, 0.8, 0.2, 1.0];
/// Weiß (Spline-Pfad).
pub const COLOR_WHITE: Color = [1.0, 1.0, 1.0, 1.0];

/// Multipliziert den Alpha-Kanal einer Farbe.
pub fn alpha_multiplied(color: Color, factor: f32) -> Color {
    [color[0], color[1], color[2], color[3] * factor]
}

/// Eine Debug-Linie in Welt-Koordinaten.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DebugLine {
    /// Startpunkt
    pub start: Vec3,
    /// Endpunkt
    pub end: Vec3,
    /// Linienfarbe
    pub color: Color,
}

/// Eine Debug-Kugel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DebugSphere {
    /// Mittelpunkt
    pub center: Vec3,
    /// Radius
    pub radius: f32,
    /// Farbe
    pub color: Color,
    /// Nur Drahtgitter statt gefüllt?
    pub wireframe: bool,
    /// Tiefentest beim Rendern?
    pub depth_test: bool,
}

/// Eine Mesh-Instanz (Gizmo-Handles) mit Welt-Matrix und Material.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshInstance {
    /// Modell-Asset
    pub model: AssetHandle,
    /// Material-Asset
    pub material: AssetHandle,
    /// Welt-Matrix
    pub world: Mat4,
}

/// Pro-Frame-Liste aller Debug-Primitive.
#[derive(Debug, Clone, Default)]
pub struct DebugDrawList {
    /// Gesammelte Linien
    pub lines: Vec<DebugLine>,
    /// Gesammelte Kugeln
    pub spheres: Vec<DebugSphere>,
    /// Gesammelte Mesh-Instanzen
    pub meshes: Vec<MeshInstance>,
}

impl DebugDrawList {
    /// Leere Liste.
    pub fn new() -> Self {
        Self::default()
    }

    /// Leert alle Primitive (Frame-Beginn).
    pub fn clear(&mut self) {
        self.lines.clear();
        self.spheres.clear();
        self.meshes.clear();
    }

    /// Zeichnet eine Linie.
    pub fn draw_line(&mut self, start: Vec3, end: Vec3, color: Color) {
        self.lines.push(DebugLine { start, end, color });
    }

    /// Zeichnet eine gefüllte Kugel.
    pub fn draw_sphere(&mut self, center: Vec3, radius: f32, color: Color, depth_test: bool) {
        self.spheres.push(DebugSphere {
            center,
            radius,
            color,
            wireframe: false,
            depth_test,
        });
    }

    /// Zeichnet eine Drahtgitter-Kugel.
    pub fn draw_wire_sphere(&mut self, center: Vec3, radius: f32, color: Color, depth_test: bool) {
        self.spheres.push(DebugSphere {
            center,
            radius,
            color,
            wireframe: true,
            depth_test,
        });
    }

    /// Zeichnet eine Mesh-Instanz.
    pub fn draw_mesh(&mut self, model: AssetHandle, material: AssetHandle, world: Mat4) {
        self.meshes.push(MeshInstance {
            model,
            material,
            world,
        });
    }
}
