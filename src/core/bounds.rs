//! Rays, Bounding-Volumen und Kamera-Frustum für Picking und Sichtbarkeit.

use glam::Vec3;

use super::Plane;

/// Strahl mit Ursprung und normalisierter Richtung.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// Welt-Ursprung des Strahls
    pub origin: Vec3,
    /// Normalisierte Richtung
    pub direction: Vec3,
}

impl Ray {
    /// Erstellt einen Ray (Richtung wird normalisiert).
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    /// Punkt in Distanz `t` entlang des Strahls.
    pub fn point_at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// Achsen-paralleler Quader (lokal oder Welt, je nach Verwendung).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimale Ecke
    pub min: Vec3,
    /// Maximale Ecke
    pub max: Vec3,
}

impl Aabb {
    /// Erstellt eine AABB aus zwei Ecken.
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Symmetrische AABB um den Ursprung mit halber Kantenlänge `half_extent`.
    pub fn from_half_extent(half_extent: Vec3) -> Self {
        Self {
            min: -half_extent,
            max: half_extent,
        }
    }

    /// Kleinste AABB um eine Punktmenge. `None` wenn leer.
    pub fn from_points(points: impl IntoIterator<Item = Vec3>) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let mut aabb = Self {
            min: first,
            max: first,
        };
        for p in iter {
            aabb = aabb.merged_with_point(p);
        }
        Some(aabb)
    }

    /// Verschiebt die AABB um `offset`.
    pub fn offset_by(&self, offset: Vec3) -> Self {
        Self {
            min: self.min + offset,
            max: self.max + offset,
        }
    }

    /// Erweitert die AABB, sodass sie `point` einschließt.
    pub fn merged_with_point(&self, point: Vec3) -> Self {
        Self {
            min: self.min.min(point),
            max: self.max.max(point),
        }
    }

    /// Vergrößert die AABB in alle Richtungen um `margin`.
    pub fn inflated(&self, margin: f32) -> Self {
        Self {
            min: self.min - Vec3::splat(margin),
            max: self.max + Vec3::splat(margin),
        }
    }

    /// Ray-AABB-Schnitt (Slab-Methode). Gibt die Eintritts-Distanz zurück
    /// (0 wenn der Ursprung innen liegt).
    pub fn intersect_ray(&self, ray: &Ray) -> Option<f32> {
        let mut t_min = f32::NEG_INFINITY;
        let mut t_max = f32::INFINITY;

        for axis in 0..3 {
            let origin = ray.origin[axis];
            let dir = ray.direction[axis];
            let min = self.min[axis];
            let max = self.max[axis];

            if dir.abs() < f32::EPSILON {
                if origin < min || origin > max {
                    return None;
                }
                continue;
            }

            let inv = 1.0 / dir;
            let (t0, t1) = {
                let a = (min - origin) * inv;
                let b = (max - origin) * inv;
                if a <= b {
                    (a, b)
                } else {
                    (b, a)
                }
            };
            t_min = t_min.max(t0);
            t_max = t_max.min(t1);
            if t_min > t_max {
                return None;
            }
        }

        if t_max < 0.0 {
            return None;
        }
        Some(t_min.max(0.0))
    }

    /// Normale der getroffenen Fläche für einen Punkt auf der AABB-Oberfläche.
    pub fn face_normal_at(&self, point: Vec3) -> Vec3 {
        let center = (self.min + self.max) * 0.5;
        let half = ((self.max - self.min) * 0.5).max(Vec3::splat(f32::EPSILON));
        let local = (point - center) / half;

        // Dominante Achse bestimmt die Fläche
        let abs = local.abs();
        if abs.x >= abs.y && abs.x >= abs.z {
            Vec3::new(local.x.signum(), 0.0, 0.0)
        } else if abs.y >= abs.z {
            Vec3::new(0.0, local.y.signum(), 0.0)
        } else {
            Vec3::new(0.0, 0.0, local.z.signum())
        }
    }
}

/// Kugel-Volumen für Node-Hitboxen und Snap-Indikatoren.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingSphere {
    /// Mittelpunkt in Welt-Koordinaten
    pub center: Vec3,
    /// Radius
    pub radius: f32,
}

impl BoundingSphere {
    /// Erstellt eine Bounding-Kugel.
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Ray-Kugel-Schnitt. Gibt die Eintritts-Distanz zurück
    /// (0 wenn der Ursprung innen liegt).
    pub fn intersect_ray(&self, ray: &Ray) -> Option<f32> {
        let to_center = self.center - ray.origin;
        let proj = to_center.dot(ray.direction);
        let dist_sq = to_center.length_squared() - proj * proj;
        let radius_sq = self.radius * self.radius;
        if dist_sq > radius_sq {
            return None;
        }
        let half_chord = (radius_sq - dist_sq).sqrt();
        let t = proj - half_chord;
        if t < 0.0 {
            let t_exit = proj + half_chord;
            if t_exit < 0.0 {
                return None;
            }
            return Some(0.0);
        }
        Some(t)
    }

    /// Überlappen sich zwei Kugeln?
    pub fn intersects_sphere(&self, other: &BoundingSphere) -> bool {
        let r = self.radius + other.radius;
        self.center.distance_squared(other.center) <= r * r
    }
}

/// Kamera-Frustum aus sechs nach innen zeigenden Ebenen.
#[derive(Debug, Clone)]
pub struct Frustum {
    planes: [Plane; 6],
}

impl Frustum {
    /// Baut ein Frustum aus Kamera-Parametern (perspektivisch).
    pub fn from_camera(
        position: Vec3,
        forward: Vec3,
        up: Vec3,
        fov_y: f32,
        near: f32,
        far: f32,
        aspect: f32,
    ) -> Self {
        let forward = forward.normalize_or_zero();
        let right = forward.cross(up).normalize_or_zero();
        let up = right.cross(forward);

        let half_v = (fov_y * 0.5).tan();
        let half_h = half_v * aspect;

        let near_plane = Plane::from_point_normal(position + forward * near, forward);
        let far_plane = Plane::from_point_normal(position + forward * far, -forward);
        // Seitenflächen gehen durch die Kamera-Position
        let left_normal = (forward - right * half_h).cross(up).normalize_or_zero();
        let right_normal = up.cross(forward + right * half_h).normalize_or_zero();
        let top_normal = right.cross(forward + up * half_v).normalize_or_zero();
        let bottom_normal = (forward - up * half_v).cross(right).normalize_or_zero();

        Self {
            planes: [
                near_plane,
                far_plane,
                Plane::from_point_normal(position, left_normal),
                Plane::from_point_normal(position, right_normal),
                Plane::from_point_normal(position, top_normal),
                Plane::from_point_normal(position, bottom_normal),
            ],
        }
    }

    /// Liegt der Punkt innerhalb (oder auf) allen sechs Ebenen?
    pub fn contains_point(&self, point: Vec3) -> bool {
        self.planes.iter().all(|p| p.normal.dot(point) - p.d >= 0.0)
    }

    /// Schneidet oder enthält das Frustum die Kugel?
    pub fn intersects_sphere(&self, sphere: &BoundingSphere) -> bool {
        self.planes
            .iter()
            .all(|p| p.normal.dot(sphere.center) - p.d >= -sphere.radius)
    }

    /// Schneidet oder enthält das Frustum die AABB (p-Vertex-Test)?
    pub fn intersects_aabb(&self, aabb: &Aabb) -> bool {
        self.planes.iter().all(|p| {
            let positive = Vec3::new(
                if p.normal.x >= 0.0 { aabb.max.x } else { aabb.min.x },
                if p.normal.y >= 0.0 { aabb.max.y } else { aabb.min.y },
                if p.normal.z >= 0.0 { aabb.max.z } else { aabb.min.z },
            );
            p.normal.dot(positive) - p.d >= 0.0
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn aabb_slab_hit_and_miss() {
        let aabb = Aabb::from_half_extent(Vec3::splat(1.0));
        let hit = Ray::new(Vec3::new(0.0, 0.0, -5.0), Vec3::Z);
        let t = aabb.intersect_ray(&hit).expect("Treffer erwartet");
        assert_relative_eq!(t, 4.0, epsilon = 1e-5);

        let miss = Ray::new(Vec3::new(3.0, 0.0, -5.0), Vec3::Z);
        assert!(aabb.intersect_ray(&miss).is_none());

        let behind = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::Z);
        assert!(aabb.intersect_ray(&behind).is_none());
    }

    #[test]
    fn aabb_ray_origin_inside_returns_zero() {
        let aabb = Aabb::from_half_extent(Vec3::splat(2.0));
        let ray = Ray::new(Vec3::ZERO, Vec3::X);
        assert_relative_eq!(aabb.intersect_ray(&ray).unwrap(), 0.0);
    }

    #[test]
    fn merged_offset_matches_axis_handle_construction() {
        // Handle-Box wie im Brush-Gizmo: Basis-Box, versetzt, bis zur Spitze erweitert
        let handle = Aabb::from_half_extent(Vec3::splat(0.25))
            .offset_by(Vec3::Z * 0.6)
            .merged_with_point(Vec3::Z * 3.75);
        assert_relative_eq!(handle.min.z, 0.35, epsilon = 1e-5);
        assert_relative_eq!(handle.max.z, 3.75, epsilon = 1e-5);
        assert_relative_eq!(handle.max.x, 0.25, epsilon = 1e-5);
    }

    #[test]
    fn sphere_ray_intersection() {
        let sphere = BoundingSphere::new(Vec3::new(0.0, 0.0, 10.0), 2.0);
        let ray = Ray::new(Vec3::ZERO, Vec3::Z);
        let t = sphere.intersect_ray(&ray).expect("Treffer erwartet");
        assert_relative_eq!(t, 8.0, epsilon = 1e-4);

        let miss = Ray::new(Vec3::new(5.0, 0.0, 0.0), Vec3::Z);
        assert!(sphere.intersect_ray(&miss).is_none());
    }

    #[test]
    fn frustum_contains_point_ahead_not_behind() {
        let frustum = Frustum::from_camera(
            Vec3::ZERO,
            Vec3::Z,
            Vec3::Y,
            std::f32::consts::FRAC_PI_3,
            0.1,
            1000.0,
            16.0 / 9.0,
        );
        assert!(frustum.contains_point(Vec3::new(0.0, 0.0, 50.0)));
        assert!(!frustum.contains_point(Vec3::new(0.0, 0.0, -50.0)));
        // weit außerhalb des Öffnungswinkels
        assert!(!frustum.contains_point(Vec3::new(500.0, 0.0, 10.0)));
    }

    #[test]
    fn frustum_sphere_and_aabb_tests_agree() {
        let frustum = Frustum::from_camera(
            Vec3::ZERO,
            Vec3::Z,
            Vec3::Y,
            std::f32::consts::FRAC_PI_3,
            0.1,
            1000.0,
            1.0,
        );
        let visible = BoundingSphere::new(Vec3::new(0.0, 0.0, 100.0), 5.0);
        let hidden = BoundingSphere::new(Vec3::new(0.0, 0.0, -100.0), 5.0);
        assert!(frustum.intersects_sphere(&visible));
        assert!(!frustum.intersects_sphere(&hidden));

        let visible_box =
            Aabb::from_half_extent(Vec3::splat(5.0)).offset_by(Vec3::new(0.0, 0.0, 100.0));
        let hidden_box =
            Aabb::from_half_extent(Vec3::splat(5.0)).offset_by(Vec3::new(0.0, 0.0, -100.0));
        assert!(frustum.intersects_aabb(&visible_box));
        assert!(!frustum.intersects_aabb(&hidden_box));
    }
}
