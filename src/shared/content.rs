//! Content-Cache: spät gebundene Modell- und Material-Handles mit
//! synchronem Readiness-Poll.
//!
//! Der Host registriert verfügbare Assets und meldet Streaming-Abschluss;
//! die Werkzeuge lösen Pfade einmalig beim Start auf und pollen pro Frame
//! nur noch den Ladezustand.

use std::collections::HashMap;

/// Art eines Assets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    /// Dreiecks-Mesh
    Model,
    /// Material-Instanz
    MaterialInstance,
}

/// Ladezustand eines registrierten Assets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    /// Streaming läuft noch
    Loading,
    /// Vollständig geladen
    Loaded,
    /// Laden fehlgeschlagen
    Failed,
}

/// Opakes Handle auf ein registriertes Asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AssetHandle(usize);

#[derive(Debug, Clone)]
struct AssetEntry {
    path: String,
    kind: AssetKind,
    state: LoadState,
}

/// Registry aller dem Host bekannten Assets.
#[derive(Debug, Clone, Default)]
pub struct ContentCache {
    entries: Vec<AssetEntry>,
    by_path: HashMap<String, usize>,
}

/// Pfade der eingebauten Gizmo-Assets.
pub const GIZMO_TRANSLATION_AXIS: &str = "Editor/Gizmo/TranslationAxis";
/// Material der Vorwärts-Achse (Y).
pub const GIZMO_MATERIAL_AXIS_FORWARD: &str = "Editor/Gizmo/MaterialAxisY";
/// Material der Rückwärts-Achse (X).
pub const GIZMO_MATERIAL_AXIS_BACKWARD: &str = "Editor/Gizmo/MaterialAxisX";
/// Material der Z-Achse.
pub const GIZMO_MATERIAL_AXIS_Z: &str = "Editor/Gizmo/MaterialAxisZ";
/// Fokus-Material (gehoverte/gezogene Achse).
pub const GIZMO_MATERIAL_AXIS_FOCUS: &str = "Editor/Gizmo/MaterialAxisFocus";

impl ContentCache {
    /// Leerer Cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registriert ein Asset unter seinem Pfad (Zustand: `Loading`).
    /// Doppelte Registrierung gibt das bestehende Handle zurück.
    pub fn register(&mut self, path: &str, kind: AssetKind) -> AssetHandle {
        if let Some(&index) = self.by_path.get(path) {
            return AssetHandle(index);
        }
        let index = self.entries.len();
        self.entries.push(AssetEntry {
            path: path.to_string(),
            kind,
            state: LoadState::Loading,
        });
        self.by_path.insert(path.to_string(), index);
        AssetHandle(index)
    }

    /// Registriert die eingebauten Gizmo-Assets des Editors.
    pub fn register_gizmo_defaults(&mut self) {
        self.register(GIZMO_TRANSLATION_AXIS, AssetKind::Model);
        self.register(GIZMO_MATERIAL_AXIS_FORWARD, AssetKind::MaterialInstance);
        self.register(GIZMO_MATERIAL_AXIS_BACKWARD, AssetKind::MaterialInstance);
        self.register(GIZMO_MATERIAL_AXIS_Z, AssetKind::MaterialInstance);
        self.register(GIZMO_MATERIAL_AXIS_FOCUS, AssetKind::MaterialInstance);
    }

    /// Löst einen Pfad zu einem Handle auf (asynchrones Laden läuft weiter).
    /// `None` wenn das Asset unbekannt ist oder die Art nicht passt.
    pub fn load_async(&self, path: &str, kind: AssetKind) -> Option<AssetHandle> {
        let &index = self.by_path.get(path)?;
        if self.entries[index].kind != kind {
            return None;
        }
        Some(AssetHandle(index))
    }

    /// Meldet ein Asset als fertig geladen.
    pub fn finish_load(&mut self, handle: AssetHandle) {
        if let Some(entry) = self.entries.get_mut(handle.0) {
            entry.state = LoadState::Loaded;
        }
    }

    /// Meldet ein Asset als fehlgeschlagen.
    pub fn fail_load(&mut self, handle: AssetHandle) {
        if let Some(entry) = self.entries.get_mut(handle.0) {
            entry.state = LoadState::Failed;
        }
    }

    /// Meldet alle registrierten Assets als geladen (synchrone Hosts).
    pub fn finish_all(&mut self) {
        for entry in &mut self.entries {
            entry.state = LoadState::Loaded;
        }
    }

    /// Ladezustand eines Handles.
    pub fn state(&self, handle: AssetHandle) -> LoadState {
        self.entries
            .get(handle.0)
            .map(|e| e.state)
            .unwrap_or(LoadState::Failed)
    }

    /// Ist das Asset vollständig geladen?
    pub fn is_loaded(&self, handle: AssetHandle) -> bool {
        self.state(handle) == LoadState::Loaded
    }

    /// Pfad eines Handles (Diagnose).
    pub fn path(&self, handle: AssetHandle) -> Option<&str> {
        self.entries.get(handle.0).map(|e| e.path.as_str())
    }
}
