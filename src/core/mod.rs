//! Core-Domänentypen: Ebenen-Mathematik, Bounds, Transforms, Kamera,
//! Spline- und Brush-Daten, Szenen-Container, Spatial-Index.

pub mod bounds;
pub mod brush;
pub mod camera;
/// Ebenen-Projektion — Kernmathematik des Brush-Draw-Gizmos.
///
/// Dieses Modul definiert die kanonische 2D-Basis einer Ebene; die
/// Brush-Platzierung hängt von exakt dieser Konvention ab.
pub mod plane;
pub mod scene;
pub mod spatial;
pub mod spline;
pub mod transform;

pub use bounds::{Aabb, BoundingSphere, Frustum, Ray};
pub use brush::{BoxBrushData, BoxBrushSpawn, BrushMode};
pub use camera::ViewportCamera;
pub use plane::{from_direction, project_point_from_plane_3d, project_point_to_plane_2d, Plane};
pub use scene::{spawn_box_brush, Actor, ActorId, ActorKind, RayCastFlags, RayHit, Scene};
pub use spatial::{SpatialIndex, SpatialMatch};
pub use spline::{cubic_bezier, SplineData, SplineKeyframe};
pub use transform::Transform;
