//! Kontextmenü-Aktionen des Spline-Nodes: Kind-Aktoren anlegen.

use anyhow::{Context, Result};

use crate::core::{ActorId, ActorKind, Scene};

/// Aktionen aus dem Spline-Kontextmenü.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplineContextAction {
    /// Spline-Modell als Kind-Aktor anlegen
    AddSplineModel,
    /// Spline-Collider als Kind-Aktor anlegen
    AddSplineCollider,
    /// Spline-Seilkörper als Kind-Aktor anlegen
    AddSplineRopeBody,
}

/// Rendert die Kontextmenü-Einträge des Spline-Nodes.
pub fn render_context_menu(ui: &mut egui::Ui) -> Option<SplineContextAction> {
    let mut action = None;
    if ui.button("Spline-Modell hinzufügen").clicked() {
        action = Some(SplineContextAction::AddSplineModel);
        ui.close();
    }
    if ui.button("Spline-Collider hinzufügen").clicked() {
        action = Some(SplineContextAction::AddSplineCollider);
        ui.close();
    }
    if ui.button("Spline-Seilkörper hinzufügen").clicked() {
        action = Some(SplineContextAction::AddSplineRopeBody);
        ui.close();
    }
    action
}

/// Führt eine Kontextmenü-Aktion aus: spawnt den Kind-Aktor mit dem
/// Transform der Spline und gibt dessen ID zurück.
pub fn apply_context_action(
    scene: &mut Scene,
    spline_id: ActorId,
    action: SplineContextAction,
) -> Result<ActorId> {
    let spline = scene
        .get(spline_id)
        .with_context(|| format!("Spline {} nicht gefunden", spline_id))?;
    let transform = spline.transform;
    let is_collider = matches!(action, SplineContextAction::AddSplineCollider);

    let (name, kind) = match action {
        SplineContextAction::AddSplineModel => ("SplineModel", ActorKind::SplineModel),
        SplineContextAction::AddSplineCollider => ("SplineCollider", ActorKind::SplineCollider),
        SplineContextAction::AddSplineRopeBody => ("SplineRopeBody", ActorKind::SplineRopeBody),
    };

    let id = scene.spawn(name, transform, kind);
    if let Some(actor) = scene.get_mut(id) {
        actor.parent = Some(spline_id);
        actor.is_collider = is_collider;
    }
    log::info!("Kontextmenü: {} unter Spline {} angelegt", name, spline_id);
    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{SplineData, Transform};
    use glam::Vec3;

    #[test]
    fn apply_spawns_child_with_spline_transform() {
        let mut scene = Scene::new();
        let spline_id = scene.spawn(
            "Spline",
            Transform::from_translation(Vec3::new(5.0, 0.0, 7.0)),
            ActorKind::Spline(SplineData::new()),
        );

        let child = apply_context_action(&mut scene, spline_id, SplineContextAction::AddSplineModel)
            .expect("Spawn");
        let actor = scene.get(child).unwrap();
        assert_eq!(actor.parent, Some(spline_id));
        assert_eq!(actor.transform.translation, Vec3::new(5.0, 0.0, 7.0));
        assert!(matches!(actor.kind, ActorKind::SplineModel));
    }

    #[test]
    fn collider_child_is_flagged_as_collider() {
        let mut scene = Scene::new();
        let spline_id = scene.spawn(
            "Spline",
            Transform::IDENTITY,
            ActorKind::Spline(SplineData::new()),
        );

        let child =
            apply_context_action(&mut scene, spline_id, SplineContextAction::AddSplineCollider)
                .expect("Spawn");
        assert!(scene.get(child).unwrap().is_collider);
    }

    #[test]
    fn apply_fails_for_unknown_spline() {
        let mut scene = Scene::new();
        assert!(
            apply_context_action(&mut scene, 999, SplineContextAction::AddSplineModel).is_err()
        );
    }
}
