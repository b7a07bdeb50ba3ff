//! Szenen-Container: geschlossene Aktor-Menge mit Spawn/Remove,
//! Raycast- und Frustum-Abfragen.
//!
//! Die Szene ist ein schlanker Stand-in für den Szenengraph des Host-Editors:
//! genau die Abfragen, die die Viewport-Werkzeuge brauchen, nicht mehr.

use std::collections::HashMap;

use glam::Vec3;

use super::{Aabb, BoxBrushData, BrushMode, Frustum, Ray, SplineData, Transform};

/// Stabile Aktor-Identität (vom Szenen-Container vergeben).
pub type ActorId = u64;

/// Geschlossene Menge der Aktor-Arten, die die Werkzeuge kennen.
#[derive(Debug, Clone)]
pub enum ActorKind {
    /// Spline-Aktor mit Bezier-Keyframes
    Spline(SplineData),
    /// CSG-Box-Brush
    BoxBrush(BoxBrushData),
    /// Statisches Mesh, nur über seine lokale AABB bekannt
    StaticMesh {
        /// Lokale Bounding-Box des Meshes
        bounds: Aabb,
    },
    /// Spline-Modell (Kind-Aktor einer Spline)
    SplineModel,
    /// Spline-Collider (Kind-Aktor einer Spline)
    SplineCollider,
    /// Spline-Seilkörper (Kind-Aktor einer Spline)
    SplineRopeBody,
}

/// Ein Aktor der Szene.
#[derive(Debug, Clone)]
pub struct Actor {
    /// Stabile ID
    pub id: ActorId,
    /// Anzeigename
    pub name: String,
    /// Welt-Transform
    pub transform: Transform,
    /// Art und artspezifische Daten
    pub kind: ActorKind,
    /// Editor-Hilfsobjekt (vom Szenen-Raycast übersprungen wenn geflaggt)
    pub is_editor_primitive: bool,
    /// Trigger-Volumen
    pub is_trigger: bool,
    /// Reiner Collider
    pub is_collider: bool,
    /// Optionaler Eltern-Aktor (für Spline-Kind-Aktoren)
    pub parent: Option<ActorId>,
}

impl Actor {
    /// Erstellt einen Aktor ohne Sonder-Flags.
    pub fn new(id: ActorId, name: impl Into<String>, transform: Transform, kind: ActorKind) -> Self {
        Self {
            id,
            name: name.into(),
            transform,
            kind,
            is_editor_primitive: false,
            is_trigger: false,
            is_collider: false,
            parent: None,
        }
    }

    /// Spline-Daten, falls der Aktor eine Spline ist.
    pub fn as_spline(&self) -> Option<&SplineData> {
        match &self.kind {
            ActorKind::Spline(data) => Some(data),
            _ => None,
        }
    }

    /// Mutable Spline-Daten.
    pub fn as_spline_mut(&mut self) -> Option<&mut SplineData> {
        match &mut self.kind {
            ActorKind::Spline(data) => Some(data),
            _ => None,
        }
    }

    /// Brush-Daten, falls der Aktor ein Box-Brush ist.
    pub fn as_box_brush(&self) -> Option<&BoxBrushData> {
        match &self.kind {
            ActorKind::BoxBrush(data) => Some(data),
            _ => None,
        }
    }

    /// Welt-Position des Spline-Punkts an `index`.
    pub fn spline_point_world(&self, index: usize) -> Option<Vec3> {
        let spline = self.as_spline()?;
        let keyframe = spline.keyframe(index)?;
        Some(self.transform.transform_point(keyframe.value.translation))
    }

    /// Welt-Position einer Tangente (`is_in`: eingehend, sonst ausgehend).
    pub fn spline_tangent_world(&self, index: usize, is_in: bool) -> Option<Vec3> {
        let spline = self.as_spline()?;
        let keyframe = spline.keyframe(index)?;
        let tangent = if is_in {
            keyframe.tangent_in.translation
        } else {
            keyframe.tangent_out.translation
        };
        Some(
            self.transform
                .transform_point(keyframe.value.translation + tangent),
        )
    }

    /// Welt-Transform des Spline-Punkts an `index`.
    pub fn spline_transform_world(&self, index: usize) -> Option<Transform> {
        let spline = self.as_spline()?;
        let keyframe = spline.keyframe(index)?;
        Some(Transform {
            translation: self.transform.transform_point(keyframe.value.translation),
            orientation: self.transform.orientation * keyframe.value.orientation,
            scale: keyframe.value.scale,
        })
    }

    /// Setzt den Spline-Punkt an `index` aus einer Welt-Position.
    pub fn set_spline_point_world(&mut self, index: usize, world: Vec3) {
        let local = self.transform.inverse_transform_point(world);
        if let ActorKind::Spline(data) = &mut self.kind {
            if let Some(keyframe) = data.keyframe_mut(index) {
                keyframe.value.translation = local;
            }
        }
    }

    /// Setzt eine Tangente aus einer Welt-Position (relativ zum Punkt-Wert).
    pub fn set_spline_tangent_world(&mut self, index: usize, is_in: bool, world: Vec3) {
        let local = self.transform.inverse_transform_point(world);
        if let ActorKind::Spline(data) = &mut self.kind {
            if let Some(keyframe) = data.keyframe_mut(index) {
                let relative = local - keyframe.value.translation;
                let tangent = if is_in {
                    &mut keyframe.tangent_in
                } else {
                    &mut keyframe.tangent_out
                };
                tangent.translation = relative;
            }
        }
    }

    /// Setzt den Spline-Punkt an `index` aus einem Welt-Transform.
    pub fn set_spline_transform_world(&mut self, index: usize, world: Transform) {
        let translation = self.transform.inverse_transform_point(world.translation);
        let orientation = self.transform.orientation.inverse() * world.orientation;
        if let ActorKind::Spline(data) = &mut self.kind {
            if let Some(keyframe) = data.keyframe_mut(index) {
                keyframe.value.translation = translation;
                keyframe.value.orientation = orientation;
                keyframe.value.scale = world.scale;
            }
        }
    }

    /// Editor-Bounding-Box einer Spline über alle Welt-Keyframes.
    pub fn spline_editor_bounds(&self) -> Option<Aabb> {
        let spline = self.as_spline()?;
        let points = (0..spline.point_count()).filter_map(|i| self.spline_point_world(i));
        Aabb::from_points(points).map(|b| b.inflated(1.0))
    }
}

/// Filter-Flags für den Szenen-Raycast.
#[derive(Debug, Clone, Copy, Default)]
pub struct RayCastFlags {
    /// Editor-Hilfsobjekte überspringen
    pub skip_editor_primitives: bool,
    /// Trigger überspringen
    pub skip_triggers: bool,
    /// Collider überspringen
    pub skip_colliders: bool,
}

/// Treffer eines Szenen-Raycasts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// Getroffener Aktor
    pub actor_id: ActorId,
    /// Distanz entlang des Rays
    pub distance: f32,
    /// Welt-Normale der getroffenen Fläche
    pub normal: Vec3,
}

/// Szenen-Container.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    next_id: ActorId,
    /// Alle Aktoren nach ID
    pub actors: HashMap<ActorId, Actor>,
}

impl Scene {
    /// Leere Szene.
    pub fn new() -> Self {
        Self {
            next_id: 1,
            actors: HashMap::new(),
        }
    }

    /// Vergibt die nächste freie Aktor-ID.
    ///
    /// IDs werden getrennt vom Einfügen vergeben, damit Undo-Commands
    /// dieselbe ID beim Redo wiederverwenden können.
    pub fn allocate_id(&mut self) -> ActorId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Fügt einen fertig gebauten Aktor ein.
    pub fn insert(&mut self, actor: Actor) {
        self.next_id = self.next_id.max(actor.id + 1);
        self.actors.insert(actor.id, actor);
    }

    /// Baut und fügt einen Aktor ein; gibt die neue ID zurück.
    pub fn spawn(&mut self, name: impl Into<String>, transform: Transform, kind: ActorKind) -> ActorId {
        let id = self.allocate_id();
        self.insert(Actor::new(id, name, transform, kind));
        id
    }

    /// Entfernt einen Aktor.
    pub fn remove(&mut self, id: ActorId) -> Option<Actor> {
        self.actors.remove(&id)
    }

    /// Aktor nach ID.
    pub fn get(&self, id: ActorId) -> Option<&Actor> {
        self.actors.get(&id)
    }

    /// Mutable Aktor nach ID.
    pub fn get_mut(&mut self, id: ActorId) -> Option<&mut Actor> {
        self.actors.get_mut(&id)
    }

    /// Alle Spline-Aktor-IDs (deterministisch sortiert).
    pub fn spline_ids(&self) -> Vec<ActorId> {
        let mut ids: Vec<ActorId> = self
            .actors
            .values()
            .filter(|a| matches!(a.kind, ActorKind::Spline(_)))
            .map(|a| a.id)
            .collect();
        ids.sort_unstable();
        ids
    }

    /// Spline-Aktoren, deren Editor-Bounds das Frustum schneiden.
    pub fn splines_in_frustum(&self, frustum: &Frustum) -> Vec<ActorId> {
        self.spline_ids()
            .into_iter()
            .filter(|id| {
                self.get(*id)
                    .and_then(|a| a.spline_editor_bounds())
                    .map(|bounds| frustum.intersects_aabb(&bounds))
                    .unwrap_or(false)
            })
            .collect()
    }

    /// Raycast gegen alle Aktoren, nächster Treffer gewinnt.
    ///
    /// Splines sind nicht direkt pickbar (ihre Punkte werden über die
    /// Scene-Graph-Nodes getroffen); Brushes und Meshes über ihre Boxen.
    pub fn ray_cast(&self, ray: &Ray, flags: RayCastFlags) -> Option<RayHit> {
        let mut best: Option<RayHit> = None;
        let mut ids: Vec<ActorId> = self.actors.keys().copied().collect();
        ids.sort_unstable();

        for id in ids {
            let actor = &self.actors[&id];
            if flags.skip_editor_primitives && actor.is_editor_primitive {
                continue;
            }
            if flags.skip_triggers && actor.is_trigger {
                continue;
            }
            if flags.skip_colliders && actor.is_collider {
                continue;
            }

            let hit = match &actor.kind {
                ActorKind::BoxBrush(data) => {
                    Self::ray_cast_oriented_box(ray, &actor.transform, data.size * 0.5)
                }
                ActorKind::StaticMesh { bounds } => {
                    Self::ray_cast_oriented_box_bounds(ray, &actor.transform, bounds)
                }
                _ => None,
            };

            if let Some((distance, normal)) = hit {
                if best.map(|b| distance < b.distance).unwrap_or(true) {
                    best = Some(RayHit {
                        actor_id: id,
                        distance,
                        normal,
                    });
                }
            }
        }

        best
    }

    fn ray_cast_oriented_box(
        ray: &Ray,
        transform: &Transform,
        half_extent: Vec3,
    ) -> Option<(f32, Vec3)> {
        Self::ray_cast_oriented_box_bounds(ray, transform, &Aabb::from_half_extent(half_extent))
    }

    /// Ray gegen eine orientierte Box: Ray in den lokalen Raum transformieren,
    /// Slab-Test, Normale zurück in den Weltraum drehen.
    fn ray_cast_oriented_box_bounds(
        ray: &Ray,
        transform: &Transform,
        bounds: &Aabb,
    ) -> Option<(f32, Vec3)> {
        let local_origin = transform.inverse_transform_point(ray.origin);
        let local_dir = transform.inverse_transform_vector(ray.direction);
        let local_ray = Ray {
            origin: local_origin,
            direction: local_dir,
        };
        let t_local = bounds.intersect_ray(&local_ray)?;
        let local_hit = local_ray.origin + local_ray.direction * t_local;
        let normal_local = bounds.face_normal_at(local_hit);
        let world_hit = transform.transform_point(local_hit);
        let distance = ray.origin.distance(world_hit);
        let normal = (transform.orientation * normal_local).normalize_or_zero();
        Some((distance, normal))
    }
}

/// Baut den Brush-Aktor zu Spawn-Daten unter einer vorgegebenen ID.
pub fn make_box_brush_actor(id: ActorId, spawn: &super::BoxBrushSpawn) -> Actor {
    let name = match spawn.mode {
        BrushMode::Additive => "Brush",
        BrushMode::Subtractive => "SubtractiveBrush",
    };
    Actor::new(
        id,
        name,
        Transform {
            translation: spawn.position,
            orientation: spawn.orientation,
            scale: Vec3::ONE,
        },
        ActorKind::BoxBrush(BoxBrushData {
            size: spawn.size,
            mode: spawn.mode,
        }),
    )
}

/// Spawnt einen Box-Brush aus Spawn-Daten (zentrale Mutation für das
/// Brush-Draw-Tool).
pub fn spawn_box_brush(scene: &mut Scene, spawn: &super::BoxBrushSpawn) -> ActorId {
    let id = scene.allocate_id();
    scene.insert(make_box_brush_actor(id, spawn));
    id
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn ground_box(scene: &mut Scene) -> ActorId {
        // Flacher Boden: 200 x 1 x 200 um den Ursprung
        scene.spawn(
            "Ground",
            Transform::IDENTITY,
            ActorKind::StaticMesh {
                bounds: Aabb::new(Vec3::new(-100.0, -1.0, -100.0), Vec3::new(100.0, 0.0, 100.0)),
            },
        )
    }

    #[test]
    fn ray_cast_hits_ground_from_above() {
        let mut scene = Scene::new();
        let ground = ground_box(&mut scene);

        let ray = Ray::new(Vec3::new(5.0, 50.0, 5.0), Vec3::NEG_Y);
        let hit = scene
            .ray_cast(&ray, RayCastFlags::default())
            .expect("Boden muss getroffen werden");
        assert_eq!(hit.actor_id, ground);
        assert_relative_eq!(hit.distance, 50.0, epsilon = 1e-3);
        assert_relative_eq!(hit.normal.y, 1.0, epsilon = 1e-3);
    }

    #[test]
    fn ray_cast_respects_skip_flags() {
        let mut scene = Scene::new();
        let id = ground_box(&mut scene);
        scene.get_mut(id).unwrap().is_collider = true;

        let ray = Ray::new(Vec3::new(0.0, 50.0, 0.0), Vec3::NEG_Y);
        let flags = RayCastFlags {
            skip_colliders: true,
            ..Default::default()
        };
        assert!(scene.ray_cast(&ray, flags).is_none());
        assert!(scene.ray_cast(&ray, RayCastFlags::default()).is_some());
    }

    #[test]
    fn nearest_actor_wins() {
        let mut scene = Scene::new();
        ground_box(&mut scene);
        let near = scene.spawn(
            "Box",
            Transform::from_translation(Vec3::new(0.0, 20.0, 0.0)),
            ActorKind::BoxBrush(BoxBrushData {
                size: Vec3::splat(4.0),
                mode: BrushMode::Additive,
            }),
        );

        let ray = Ray::new(Vec3::new(0.0, 50.0, 0.0), Vec3::NEG_Y);
        let hit = scene.ray_cast(&ray, RayCastFlags::default()).unwrap();
        assert_eq!(hit.actor_id, near);
    }

    #[test]
    fn spline_world_accessors_apply_actor_transform() {
        let mut scene = Scene::new();
        let mut spline = SplineData::new();
        spline.add_local_point(Vec3::ZERO);
        spline.add_local_point(Vec3::new(0.0, 0.0, 10.0));
        let id = scene.spawn(
            "Spline",
            Transform::from_translation(Vec3::new(100.0, 0.0, 0.0)),
            ActorKind::Spline(spline),
        );

        let actor = scene.get(id).unwrap();
        let p = actor.spline_point_world(1).unwrap();
        assert_relative_eq!(p.x, 100.0);
        assert_relative_eq!(p.z, 10.0);
    }

    #[test]
    fn set_spline_point_world_roundtrips() {
        let mut scene = Scene::new();
        let mut spline = SplineData::new();
        spline.add_local_point(Vec3::ZERO);
        let id = scene.spawn(
            "Spline",
            Transform::from_translation(Vec3::new(50.0, 0.0, 0.0)),
            ActorKind::Spline(spline),
        );

        scene
            .get_mut(id)
            .unwrap()
            .set_spline_point_world(0, Vec3::new(60.0, 5.0, -3.0));
        let back = scene.get(id).unwrap().spline_point_world(0).unwrap();
        assert_relative_eq!(back.x, 60.0, epsilon = 1e-4);
        assert_relative_eq!(back.y, 5.0, epsilon = 1e-4);
        assert_relative_eq!(back.z, -3.0, epsilon = 1e-4);
    }

    #[test]
    fn insert_keeps_id_allocation_monotonic() {
        let mut scene = Scene::new();
        let a = scene.allocate_id();
        scene.insert(Actor::new(
            a,
            "A",
            Transform::IDENTITY,
            ActorKind::SplineModel,
        ));
        let b = scene.allocate_id();
        assert!(b > a);
    }
}
