//! Undo/Redo über Command-Objekte.
//!
//! Jedes Command speichert ausschließlich stabile IDs und löst lebende
//! Referenzen erst bei der Ausführung per Lookup auf — niemals gefangene
//! Referenzen. Damit überleben Commands beliebige Szenen-Umbauten zwischen
//! Aufzeichnung und Ausführung.

use anyhow::Result;

use crate::core::Scene;

/// Ein rückgängig machbarer Editier-Schritt.
pub trait EditCommand {
    /// Anzeigename für die History-UI.
    fn label(&self) -> &str;

    /// Führt den Schritt (erneut) aus.
    fn apply(&self, scene: &mut Scene) -> Result<()>;

    /// Macht den Schritt rückgängig.
    fn revert(&self, scene: &mut Scene) -> Result<()>;
}

/// Undo/Redo-Manager mit begrenzter Tiefe.
pub struct EditHistory {
    undo_stack: Vec<Box<dyn EditCommand>>,
    redo_stack: Vec<Box<dyn EditCommand>>,
    max_depth: usize,
}

impl EditHistory {
    /// Erstellt einen neuen History-Manager mit maximaler Tiefe (min. 1).
    pub fn new_with_capacity(max_depth: usize) -> Self {
        let max_depth = max_depth.max(1);
        Self {
            undo_stack: Vec::with_capacity(max_depth),
            redo_stack: Vec::with_capacity(max_depth),
            max_depth,
        }
    }

    /// Zeichnet ein bereits ausgeführtes Command auf.
    /// Leert den Redo-Stack (neuer Zweig der Historie).
    pub fn record(&mut self, command: Box<dyn EditCommand>) {
        if self.undo_stack.len() >= self.max_depth {
            self.undo_stack.remove(0);
        }
        self.undo_stack.push(command);
        self.redo_stack.clear();
    }

    /// Prüft ob Undo möglich ist.
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Prüft ob Redo möglich ist.
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Label des nächsten Undo-Schritts.
    pub fn undo_label(&self) -> Option<&str> {
        self.undo_stack.last().map(|c| c.label())
    }

    /// Macht den letzten Schritt rückgängig. `Ok(false)` wenn der Stack leer
    /// ist; Fehler des Commands werden propagiert (Command bleibt dann auf
    /// dem Undo-Stack).
    pub fn undo(&mut self, scene: &mut Scene) -> Result<bool> {
        let Some(command) = self.undo_stack.pop() else {
            return Ok(false);
        };
        if let Err(e) = command.revert(scene) {
            self.undo_stack.push(command);
            return Err(e);
        }
        if self.redo_stack.len() >= self.max_depth {
            self.redo_stack.remove(0);
        }
        self.redo_stack.push(command);
        Ok(true)
    }

    /// Wiederholt den zuletzt rückgängig gemachten Schritt.
    pub fn redo(&mut self, scene: &mut Scene) -> Result<bool> {
        let Some(command) = self.redo_stack.pop() else {
            return Ok(false);
        };
        if let Err(e) = command.apply(scene) {
            self.redo_stack.push(command);
            return Err(e);
        }
        if self.undo_stack.len() >= self.max_depth {
            self.undo_stack.remove(0);
        }
        self.undo_stack.push(command);
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ActorKind, SplineData, Transform};
    use glam::Vec3;

    /// Test-Command: hängt einen Punkt an eine Spline an / entfernt ihn.
    struct AppendPointCommand {
        spline_id: u64,
        position: Vec3,
    }

    impl EditCommand for AppendPointCommand {
        fn label(&self) -> &str {
            "Punkt anhängen"
        }

        fn apply(&self, scene: &mut Scene) -> Result<()> {
            let spline = scene
                .get_mut(self.spline_id)
                .and_then(|a| a.as_spline_mut())
                .ok_or_else(|| anyhow::anyhow!("Spline {} nicht gefunden", self.spline_id))?;
            spline.add_local_point(self.position);
            Ok(())
        }

        fn revert(&self, scene: &mut Scene) -> Result<()> {
            let spline = scene
                .get_mut(self.spline_id)
                .and_then(|a| a.as_spline_mut())
                .ok_or_else(|| anyhow::anyhow!("Spline {} nicht gefunden", self.spline_id))?;
            let last = spline.point_count().saturating_sub(1);
            spline.remove_point(last);
            Ok(())
        }
    }

    fn scene_with_spline() -> (Scene, u64) {
        let mut scene = Scene::new();
        let id = scene.spawn(
            "Spline",
            Transform::IDENTITY,
            ActorKind::Spline(SplineData::new()),
        );
        (scene, id)
    }

    fn point_count(scene: &Scene, id: u64) -> usize {
        scene.get(id).and_then(|a| a.as_spline()).unwrap().point_count()
    }

    #[test]
    fn empty_history_cannot_undo_or_redo() {
        let history = EditHistory::new_with_capacity(10);
        assert!(!history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn undo_reverts_applied_command() {
        let (mut scene, id) = scene_with_spline();
        let mut history = EditHistory::new_with_capacity(10);

        let command = AppendPointCommand {
            spline_id: id,
            position: Vec3::ZERO,
        };
        command.apply(&mut scene).expect("apply");
        history.record(Box::new(command));
        assert_eq!(point_count(&scene, id), 1);

        assert!(history.undo(&mut scene).expect("undo"));
        assert_eq!(point_count(&scene, id), 0);
        assert!(!history.can_undo());
        assert!(history.can_redo());
    }

    #[test]
    fn redo_reapplies_undone_command() {
        let (mut scene, id) = scene_with_spline();
        let mut history = EditHistory::new_with_capacity(10);

        let command = AppendPointCommand {
            spline_id: id,
            position: Vec3::ZERO,
        };
        command.apply(&mut scene).expect("apply");
        history.record(Box::new(command));

        history.undo(&mut scene).expect("undo");
        assert!(history.redo(&mut scene).expect("redo"));
        assert_eq!(point_count(&scene, id), 1);
        assert!(history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn new_record_clears_redo_stack() {
        let (mut scene, id) = scene_with_spline();
        let mut history = EditHistory::new_with_capacity(10);

        for _ in 0..2 {
            let command = AppendPointCommand {
                spline_id: id,
                position: Vec3::ZERO,
            };
            command.apply(&mut scene).expect("apply");
            history.record(Box::new(command));
        }

        history.undo(&mut scene).expect("undo");
        assert!(history.can_redo());

        let command = AppendPointCommand {
            spline_id: id,
            position: Vec3::ZERO,
        };
        command.apply(&mut scene).expect("apply");
        history.record(Box::new(command));
        assert!(!history.can_redo());
    }

    #[test]
    fn respects_max_depth() {
        let (mut scene, id) = scene_with_spline();
        let mut history = EditHistory::new_with_capacity(3);

        for _ in 0..5 {
            let command = AppendPointCommand {
                spline_id: id,
                position: Vec3::ZERO,
            };
            command.apply(&mut scene).expect("apply");
            history.record(Box::new(command));
        }

        // Nur 3 Undo-Schritte dürfen möglich sein
        let mut undo_count = 0;
        while history.undo(&mut scene).expect("undo") {
            undo_count += 1;
        }
        assert_eq!(undo_count, 3);
        assert_eq!(point_count(&scene, id), 2);
    }

    #[test]
    fn failed_revert_keeps_command_on_undo_stack() {
        let (mut scene, id) = scene_with_spline();
        let mut history = EditHistory::new_with_capacity(10);

        let command = AppendPointCommand {
            spline_id: id,
            position: Vec3::ZERO,
        };
        command.apply(&mut scene).expect("apply");
        history.record(Box::new(command));

        // Zielaktor verschwindet zwischen Aufzeichnung und Undo
        scene.remove(id);
        assert!(history.undo(&mut scene).is_err());
        assert!(history.can_undo());
    }
}
