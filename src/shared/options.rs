//! Zentrale Konfiguration der Viewport-Werkzeuge.
//!
//! `EditorOptions` enthält alle zur Laufzeit änderbaren Werte.
//! Die `const`-Werte bleiben als Fallback/Default erhalten.

use serde::{Deserialize, Serialize};

// ── Snapping ────────────────────────────────────────────────────────

/// Standard-Raster für Translations-Snap (Welteinheiten).
pub const TRANSLATION_SNAP_VALUE: f32 = 10.0;

// ── Gizmo ───────────────────────────────────────────────────────────

/// Basis-Skalierung des Brush-Gizmos.
pub const GIZMO_SIZE: f32 = 1.0;
/// Versatz, um den subtraktive Brushes von der Zeichen-Ebene weggerückt
/// werden (Z-Fighting-Korrektur).
pub const FIX_SUBTRACTION_DISTANCE: f32 = 1.0;

// ── Spline-Nodes ────────────────────────────────────────────────────

/// Basis-Größe der Spline-Punkt-Handles.
pub const POINT_NODE_SIZE: f32 = 1.5;
/// Basis-Größe der Tangenten-Handles.
pub const TANGENT_NODE_SIZE: f32 = 1.0;
/// Basis-Größe des Kurven-Snap-Indikators.
pub const SNAP_INDICATOR_SIZE: f32 = 1.7;
/// Basis-Größe der Keyframe-Snap-Indikatoren.
pub const SNAP_POINT_INDICATOR_SIZE: f32 = 2.0;

// ── Geometrie ───────────────────────────────────────────────────────

/// Schwelle, unter der eine Drag-Ausdehnung als degeneriert gilt.
pub const NEAR_ZERO_EPSILON: f32 = 1e-4;
/// Kurven-Samples pro Spline-Segment für Snap-Abfragen und Debug-Draw.
pub const SPLINE_SAMPLES_PER_SEGMENT: usize = 16;

// ── Undo ────────────────────────────────────────────────────────────

/// Maximale Tiefe der Undo/Redo-Stacks.
pub const UNDO_DEPTH: usize = 64;

// ── Laufzeit-Optionen (serialisierbar) ─────────────────────────────

/// Alle zur Laufzeit änderbaren Werkzeug-Optionen.
/// Wird als `csg_brush_editor.toml` neben der Binary gespeichert.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditorOptions {
    // ── Snapping ────────────────────────────────────────────────
    /// Translations-Snap aktiv (zusätzlich per Ctrl erzwingbar)
    pub translation_snap_enable: bool,
    /// Raster-Schrittweite für Translations-Snap
    pub translation_snap_value: f32,

    // ── Gizmo ───────────────────────────────────────────────────
    /// Skalierungsfaktor des Brush-Gizmos
    pub gizmo_size: f32,
    /// Brush vom Zentrum statt von einer Ecke aufziehen (Default)
    pub draw_from_center: bool,
    /// Subtraktive Brushes von der Zeichen-Ebene wegrücken (Default)
    pub fix_subtractions: bool,

    // ── Spline-Nodes ────────────────────────────────────────────
    /// Basis-Größe der Punkt-Handles
    pub point_node_size: f32,
    /// Basis-Größe der Tangenten-Handles
    pub tangent_node_size: f32,
    /// Basis-Größe des Kurven-Snap-Indikators
    #[serde(default = "default_snap_indicator_size")]
    pub snap_indicator_size: f32,
    /// Basis-Größe der Keyframe-Snap-Indikatoren
    #[serde(default = "default_snap_point_indicator_size")]
    pub snap_point_indicator_size: f32,

    // ── Undo ────────────────────────────────────────────────────
    /// Maximale Undo-Tiefe
    #[serde(default = "default_undo_depth")]
    pub undo_depth: usize,
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self {
            translation_snap_enable: false,
            translation_snap_value: TRANSLATION_SNAP_VALUE,

            gizmo_size: GIZMO_SIZE,
            draw_from_center: false,
            fix_subtractions: true,

            point_node_size: POINT_NODE_SIZE,
            tangent_node_size: TANGENT_NODE_SIZE,
            snap_indicator_size: SNAP_INDICATOR_SIZE,
            snap_point_indicator_size: SNAP_POINT_INDICATOR_SIZE,

            undo_depth: UNDO_DEPTH,
        }
    }
}

/// Serde-Default für `snap_indicator_size` (Abwärtskompatibilität).
fn default_snap_indicator_size() -> f32 {
    SNAP_INDICATOR_SIZE
}

/// Serde-Default für `snap_point_indicator_size` (Abwärtskompatibilität).
fn default_snap_point_indicator_size() -> f32 {
    SNAP_POINT_INDICATOR_SIZE
}

/// Serde-Default für `undo_depth` (Abwärtskompatibilität).
fn default_undo_depth() -> usize {
    UNDO_DEPTH
}

impl EditorOptions {
    /// Lädt Optionen aus einer TOML-Datei. Bei Fehler: Standardwerte.
    pub fn load_from_file(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(opts) => {
                    log::info!("Optionen geladen aus: {}", path.display());
                    opts
                }
                Err(e) => {
                    log::warn!("Optionen-Datei fehlerhaft, verwende Standardwerte: {}", e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Keine Optionen-Datei gefunden, verwende Standardwerte");
                Self::default()
            }
        }
    }

    /// Speichert Optionen als TOML-Datei.
    pub fn save_to_file(&self, path: &std::path::Path) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        log::info!("Optionen gespeichert nach: {}", path.display());
        Ok(())
    }

    /// Ermittelt den Pfad zur Optionen-Datei neben der Binary.
    pub fn config_path() -> std::path::PathBuf {
        std::env::current_exe()
            .unwrap_or_else(|_| std::path::PathBuf::from("csg_brush_editor"))
            .parent()
            .unwrap_or_else(|| std::path::Path::new("."))
            .join("csg_brush_editor.toml")
    }

    /// Aktives Snap-Raster, wenn Snap eingeschaltet oder Ctrl gedrückt ist.
    pub fn snap_increment(&self, ctrl_down: bool) -> Option<f32> {
        if self.translation_snap_enable || ctrl_down {
            Some(self.translation_snap_value)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_roundtrip_through_toml() {
        let options = EditorOptions::default();
        let toml_str = toml::to_string_pretty(&options).expect("Serialisierung");
        let back: EditorOptions = toml::from_str(&toml_str).expect("Deserialisierung");
        assert_eq!(back.translation_snap_value, options.translation_snap_value);
        assert_eq!(back.undo_depth, options.undo_depth);
        assert_eq!(back.fix_subtractions, options.fix_subtractions);
    }

    #[test]
    fn snap_increment_follows_flag_and_ctrl() {
        let mut options = EditorOptions::default();
        assert_eq!(options.snap_increment(false), None);
        assert_eq!(options.snap_increment(true), Some(TRANSLATION_SNAP_VALUE));

        options.translation_snap_enable = true;
        assert_eq!(options.snap_increment(false), Some(TRANSLATION_SNAP_VALUE));
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let options = EditorOptions::load_from_file(std::path::Path::new(
            "/nonexistent/csg_brush_editor.toml",
        ));
        assert_eq!(options.gizmo_size, GIZMO_SIZE);
    }
}
