//! Session-Zustand des Brush-Draw-Gizmos: Cursor, Drag, Extrusion und
//! Konfiguration.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::core::Plane;
use crate::shared::EditorOptions;

/// Zeichenbare Brush-Formen.
///
/// Aktuell konstruiert nur [`BrushShape::Cube`] — jede andere Form ist beim
/// Konstruieren ein fataler Programmierfehler, kein stilles No-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BrushShape {
    /// Würfel/Quader
    Cube,
    /// Zylinder
    Cylinder,
    /// Pyramide
    Pyramid,
    /// Pyramide mit Apex über einer Ecke
    CornerApexPyramid,
    /// Keil
    Wedge,
    /// Dodekaeder
    Dodecahedron,
}

impl BrushShape {
    /// Alle wählbaren Formen (für das Konfigurationspanel).
    pub const ALL: [BrushShape; 6] = [
        BrushShape::Cube,
        BrushShape::Cylinder,
        BrushShape::Pyramid,
        BrushShape::CornerApexPyramid,
        BrushShape::Wedge,
        BrushShape::Dodecahedron,
    ];

    /// Anzeigename für das Konfigurationspanel.
    pub fn label(self) -> &'static str {
        match self {
            BrushShape::Cube => "Würfel",
            BrushShape::Cylinder => "Zylinder",
            BrushShape::Pyramid => "Pyramide",
            BrushShape::CornerApexPyramid => "Eck-Apex-Pyramide",
            BrushShape::Wedge => "Keil",
            BrushShape::Dodecahedron => "Dodekaeder",
        }
    }
}

/// Phasen der Brush-Zeichnung — strikt sequentiell, zurück nur per Reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawStage {
    /// Erste Phase: 2D-Fußabdruck auf der Cursor-Ebene aufziehen
    Drag2DShape,
    /// Zweite Phase: Höhe entlang der Ebenen-Normalen extrudieren
    Extrude3DShape,
    /// Letzte Phase: Schnell-Anpassungen (derzeit Durchlauf-Phase)
    FinalizeShape,
}

/// Extrusions-Richtung, am Achsen-Handle gegriffen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragDirection {
    /// Kein Handle gegriffen
    None,
    /// Additive (Vorwärts-)Richtung
    Forward,
    /// Subtraktive (Rückwärts-)Richtung
    Backward,
}

/// Mutabler Session-Zustand einer Brush-Zeichnung.
///
/// Invariante: `cursor_start`/`cursor_end` und die Extrusionshöhe sind nur
/// während eines Drags bzw. zwischen Phasenwechseln aussagekräftig; jedes
/// `clear_drag`/`clear_height` setzt sie auf Null/Default zurück.
#[derive(Debug, Clone)]
pub struct BrushDrawState {
    cursor_valid: bool,
    cursor_plane: Plane,
    cursor_position: Vec3,
    /// Startpunkt der Brush-Grundfläche
    pub cursor_start: Vec3,
    /// Endpunkt der Brush-Grundfläche
    pub cursor_end: Vec3,
    dragging: bool,
    /// Aktuelle Zeichenphase
    pub current_stage: DrawStage,
    /// Aktuell gegriffene Extrusions-Richtung
    pub current_drag_direction: DragDirection,
    /// Gerasterte Extrusionshöhe
    extrusion_height: f32,
    /// Ungerasterte (akkumulierte) Extrusionshöhe
    raw_extrusion_height: f32,
    /// Zu konstruierende Form
    pub current_shape: BrushShape,
    /// Brush vom Zentrum statt von einer Ecke aufziehen
    pub draw_from_center: bool,
    /// Subtraktive Brushes von der Zeichen-Ebene wegrücken
    pub fix_subtractions: bool,
}

impl BrushDrawState {
    /// Frischer Zustand; Konfigurations-Defaults aus den Optionen.
    pub fn new(options: &EditorOptions) -> Self {
        Self {
            cursor_valid: false,
            cursor_plane: Plane::DEFAULT,
            cursor_position: Vec3::ZERO,
            cursor_start: Vec3::ZERO,
            cursor_end: Vec3::ZERO,
            dragging: false,
            current_stage: DrawStage::Drag2DShape,
            current_drag_direction: DragDirection::None,
            extrusion_height: 0.0,
            raw_extrusion_height: 0.0,
            current_shape: BrushShape::Cube,
            draw_from_center: options.draw_from_center,
            fix_subtractions: options.fix_subtractions,
        }
    }

    /// Ist der 3D-Cursor aktuell gültig?
    pub fn cursor_valid(&self) -> bool {
        self.cursor_valid
    }

    /// Ebene, auf der der 3D-Cursor zeichnet.
    pub fn cursor_plane(&self) -> Plane {
        self.cursor_plane
    }

    /// Position des 3D-Cursors.
    pub fn cursor_position(&self) -> Vec3 {
        self.cursor_position
    }

    /// Läuft gerade ein Drag (inklusive Extrusion)?
    pub fn dragging(&self) -> bool {
        self.dragging
    }

    /// Aktuelle (ggf. gerasterte) Extrusionshöhe.
    pub fn extrusion_height(&self) -> f32 {
        self.extrusion_height
    }

    /// Invalidiert den 3D-Cursor.
    pub fn clear_cursor(&mut self) {
        self.cursor_valid = false;
    }

    /// Setzt den 3D-Cursor; `snap_increment` rastert die Position auf das
    /// Translations-Raster.
    pub fn set_cursor(&mut self, world_pos: Vec3, plane: Plane, snap_increment: Option<f32>) {
        let mut position = world_pos;
        if let Some(snap) = snap_increment {
            position.x = (position.x / snap).round() * snap;
            position.y = (position.y / snap).round() * snap;
            position.z = (position.z / snap).round() * snap;
        }

        self.cursor_valid = true;
        self.cursor_position = position;
        self.cursor_plane = plane;
    }

    /// Beendet den Drag und setzt die Phase auf [`DrawStage::Drag2DShape`].
    pub fn clear_drag(&mut self) {
        self.dragging = false;
        self.current_stage = DrawStage::Drag2DShape;
    }

    /// Startet einen Drag. `false` wenn der Cursor ungültig ist oder
    /// bereits gezogen wird.
    pub fn start_drag(&mut self) -> bool {
        if !self.cursor_valid || self.dragging {
            return false;
        }

        self.dragging = true;
        if self.current_stage == DrawStage::Drag2DShape {
            self.cursor_start = self.cursor_position;
        }
        true
    }

    /// Beendet einen Drag. `false` wenn gar nicht gezogen wurde.
    pub fn end_drag(&mut self) -> bool {
        if !self.dragging {
            return false;
        }

        self.dragging = false;
        if self.current_stage == DrawStage::Drag2DShape {
            self.cursor_end = self.cursor_position;
        }
        true
    }

    /// Setzt die Extrusionshöhe (roh und gerastert) auf Null zurück.
    pub fn clear_height(&mut self) {
        self.raw_extrusion_height = 0.0;
        self.extrusion_height = 0.0;
    }

    /// Akkumuliert ein Höhen-Delta; `snap_increment` rastert die sichtbare
    /// Höhe, der Roh-Wert akkumuliert weiter ungerastert.
    pub fn set_height_delta(&mut self, delta: f32, snap_increment: Option<f32>) {
        self.raw_extrusion_height += delta;
        let mut height = self.raw_extrusion_height;
        if let Some(snap) = snap_increment {
            height = (height / snap).round() * snap;
        }
        self.extrusion_height = height;
    }

    /// Setzt die Extrusionshöhe absolut (roh == gerastert).
    pub fn set_height(&mut self, height: f32) {
        self.raw_extrusion_height = height;
        self.extrusion_height = height;
    }
}
