//! CSG-Brush-Editor — Viewport-Werkzeuge für 3D-Editoren.
//!
//! Zwei Bausteine, beide als schlanke Schicht über Host-Schnittstellen:
//! ein Scene-Graph-Wrapper, der Spline-Aktoren als editierbare, selektier-
//! und undo-fähige Punkt-Nodes anbietet, und das Brush-Draw-Gizmo zum
//! interaktiven Aufziehen von CSG-Brushes (2D-Fußabdruck ziehen, Höhe
//! extrudieren).

pub mod app;
pub mod core;
pub mod scene_graph;
pub mod shared;
pub mod tools;

pub use app::{EditCommand, EditHistory, EditSession, SelectionState};
pub use core::{
    Actor, ActorId, ActorKind, BoxBrushData, BoxBrushSpawn, BrushMode, Plane, Ray, RayCastFlags,
    Scene, SplineData, SplineKeyframe, Transform, ViewportCamera,
};
pub use scene_graph::{NodeCapabilities, NodeId, NodeKind, SplineNode, SplinePointNode};
pub use shared::{ContentCache, DebugDrawList, EditorOptions};
pub use tools::{
    BrushDrawState, BrushDrawTool, BrushShape, DragDirection, DrawStage, InputSnapshot,
    ViewportContext,
};
