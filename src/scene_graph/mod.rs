//! Scene-Graph-Wrapper über Szenen-Aktoren: geschlossene Node-Varianten
//! mit expliziter Fähigkeitstabelle statt Vererbungsketten.

pub mod context_menu;
pub mod snap;
pub mod spline;

pub use context_menu::{apply_context_action, render_context_menu, SplineContextAction};
pub use snap::edit_spline_with_snap;
pub use spline::{SplineNode, SplinePointNode, SplinePointState, SplineTangentNode};

use crate::core::ActorId;

// ── Node-Identität ──────────────────────────────────────────────────

/// Stabile Identität eines Scene-Graph-Knotens.
///
/// Kind-IDs werden deterministisch aus (Besitzer-Aktor, Slot) abgeleitet —
/// die explizite Ableitungsfunktion ersetzt das Byte-Offsetting roher
/// Identifier des Vorbilds. Slot-Schema:
/// `0` = Wurzel-Node des Aktors, danach drei Slots pro Spline-Punkt
/// (Punkt, eingehende Tangente, ausgehende Tangente).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId {
    /// Besitzer-Aktor
    pub owner: ActorId,
    /// Slot innerhalb des Besitzers
    pub slot: u32,
}

/// Wurzel-Node eines Spline-Aktors.
pub fn root_node_id(spline: ActorId) -> NodeId {
    NodeId {
        owner: spline,
        slot: 0,
    }
}

/// Node-ID des Spline-Punkts an `index`.
pub fn point_node_id(spline: ActorId, index: usize) -> NodeId {
    NodeId {
        owner: spline,
        slot: 1 + index as u32 * 3,
    }
}

/// Node-ID einer Tangente des Punkts an `index`.
pub fn tangent_node_id(spline: ActorId, index: usize, is_in: bool) -> NodeId {
    NodeId {
        owner: spline,
        slot: 1 + index as u32 * 3 + if is_in { 1 } else { 2 },
    }
}

// ── Node-Arten und Fähigkeiten ──────────────────────────────────────

/// Geschlossene Menge der Node-Arten.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// Wurzel-Node des Spline-Aktors
    SplineRoot,
    /// Ein Spline-Kontrollpunkt
    SplinePoint,
    /// Ein Tangenten-Handle eines Kontrollpunkts
    SplineTangent,
}

impl NodeKind {
    /// Leitet die Node-Art aus dem Slot einer [`NodeId`] ab.
    pub fn from_node_id(id: NodeId) -> NodeKind {
        if id.slot == 0 {
            NodeKind::SplineRoot
        } else if (id.slot - 1) % 3 == 0 {
            NodeKind::SplinePoint
        } else {
            NodeKind::SplineTangent
        }
    }

    /// Fähigkeiten dieser Node-Art.
    pub const fn capabilities(self) -> NodeCapabilities {
        match self {
            NodeKind::SplineRoot => NodeCapabilities {
                selectable: true,
                deletable: true,
                duplicable: true,
                drawable: true,
                stateful: false,
            },
            NodeKind::SplinePoint => NodeCapabilities {
                selectable: true,
                deletable: true,
                duplicable: true,
                drawable: true,
                stateful: true,
            },
            NodeKind::SplineTangent => NodeCapabilities {
                selectable: true,
                deletable: false,
                duplicable: false,
                drawable: true,
                stateful: false,
            },
        }
    }
}

/// Punkt-Index einer Punkt- oder Tangenten-Node-ID.
pub fn point_index(id: NodeId) -> Option<usize> {
    if id.slot == 0 {
        return None;
    }
    Some(((id.slot - 1) / 3) as usize)
}

/// Explizite Fähigkeitstabelle einer Node-Art.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeCapabilities {
    /// Direkt im Viewport selektierbar
    pub selectable: bool,
    /// Löschbar
    pub deletable: bool,
    /// Duplizierbar
    pub duplicable: bool,
    /// Zeichnet Debug-Geometrie
    pub drawable: bool,
    /// Unterstützt State-Snapshots für Undo-Round-Trips
    pub stateful: bool,
}
