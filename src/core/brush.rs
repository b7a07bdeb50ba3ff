//! CSG-Brush-Daten: Box-Volumen mit additivem oder subtraktivem Modus.

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Kombinationsmodus eines Brushes mit der Level-Geometrie.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BrushMode {
    /// Volumen wird hinzugefügt
    Additive,
    /// Volumen wird ausgeschnitten
    Subtractive,
}

/// Box-Brush-Anteil eines Aktors. Position und Orientierung liegen im
/// Aktor-Transform, hier nur Größe und Modus.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxBrushData {
    /// Kantenlängen der Box
    pub size: Vec3,
    /// Additiv oder subtraktiv
    pub mode: BrushMode,
}

/// Reines Spawn-Datenpaket eines fertig konstruierten Box-Brushes.
///
/// Das Brush-Draw-Tool erzeugt nur Daten; die Mutation der Szene erfolgt
/// zentral über ein Undo-Command.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxBrushSpawn {
    /// Brush-Zentrum in Welt-Koordinaten
    pub position: Vec3,
    /// Orientierung (aus der Cursor-Ebenen-Normalen abgeleitet)
    pub orientation: Quat,
    /// Kantenlängen
    pub size: Vec3,
    /// Additiv oder subtraktiv
    pub mode: BrushMode,
}
