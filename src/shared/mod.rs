//! Layer-neutrale Bausteine: Optionen, Konstanten, Debug-Draw-Senke,
//! Content-Cache.

pub mod content;
pub mod debug_draw;
pub mod options;

pub use content::{AssetHandle, AssetKind, ContentCache, LoadState};
pub use debug_draw::{Color, DebugDrawList, DebugLine, DebugSphere, MeshInstance};
pub use options::EditorOptions;
