//! Viewport-Werkzeuge: Eingabe-Snapshot, Frame-Kontext und das
//! Brush-Draw-Gizmo.
//!
//! Werkzeuge sind zustandsbehaftet und erzeugen reine Daten
//! (z.B. [`crate::core::BoxBrushSpawn`]); die Mutation der Szene erfolgt
//! zentral über Undo-Commands.

/// Brush-Draw-Gizmo: mehrstufige Interaktion zum Aufziehen von CSG-Brushes.
pub mod brush_draw;

pub use brush_draw::{BrushDrawState, BrushDrawTool, BrushShape, DragDirection, DrawStage};

use glam::Vec3;

use crate::core::{Ray, ViewportCamera};
use crate::shared::{ContentCache, EditorOptions};

// ── Eingabe ─────────────────────────────────────────────────────────

/// Pro Frame gepollter Eingabe-Zustand (keine Events).
#[derive(Debug, Clone, Copy)]
pub struct InputSnapshot {
    /// Pointer-Ray durch die Mauscursor-Position
    pub mouse_ray: Ray,
    /// Linke Maustaste gehalten
    pub lmb_down: bool,
    /// Rechte Maustaste gehalten (Kamera-Orbit hat Vorrang)
    pub rmb_down: bool,
    /// Ctrl/Cmd gehalten (erzwingt Translations-Snap)
    pub ctrl_down: bool,
    /// Shift gehalten (aktiviert Spline-Snap-Editing)
    pub shift_down: bool,
}

impl InputSnapshot {
    /// Snapshot ohne gedrückte Tasten mit gegebenem Pointer-Ray.
    pub fn idle(mouse_ray: Ray) -> Self {
        Self {
            mouse_ray,
            lmb_down: false,
            rmb_down: false,
            ctrl_down: false,
            shift_down: false,
        }
    }
}

impl Default for InputSnapshot {
    fn default() -> Self {
        Self::idle(Ray::new(Vec3::ZERO, Vec3::NEG_Z))
    }
}

// ── Frame-Kontext ───────────────────────────────────────────────────

/// Alles, was ein Werkzeug pro Frame vom Host braucht — explizit
/// übergeben statt über globale Zustände.
pub struct ViewportContext<'a> {
    /// Viewport-Kamera
    pub camera: &'a ViewportCamera,
    /// Gepollter Eingabe-Zustand
    pub input: &'a InputSnapshot,
    /// Laufzeit-Optionen
    pub options: &'a EditorOptions,
    /// Content-Cache für Asset-Readiness-Polls
    pub content: &'a ContentCache,
}

impl<'a> ViewportContext<'a> {
    /// Aktives Snap-Raster dieses Frames (Option + Ctrl berücksichtigt).
    pub fn snap_increment(&self) -> Option<f32> {
        self.options.snap_increment(self.input.ctrl_down)
    }
}
