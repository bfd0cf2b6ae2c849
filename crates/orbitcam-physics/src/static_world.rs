//! Brute-force [`WorldQuery`] over a list of static colliders.

use glam::Vec3;
use orbitcam_scene::Entity;

use crate::{Aabb, QueryFilter, Ray, RayHit, Shape, Sphere, WorldQuery};

/// Index of a collider in a [`StaticWorld`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ColliderId(pub usize);

/// A shape, optionally tagged with the entity it belongs to.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Collider {
    /// Geometry in world space.
    pub shape: Shape,
    /// Owning entity; used by [`QueryFilter`] to skip e.g. the player's body.
    pub owner: Option<Entity>,
}

impl Collider {
    /// Untagged box collider.
    #[must_use]
    pub fn cuboid(aabb: Aabb) -> Self {
        Self {
            shape: Shape::Box(aabb),
            owner: None,
        }
    }

    /// Untagged sphere collider.
    #[must_use]
    pub fn ball(sphere: Sphere) -> Self {
        Self {
            shape: Shape::Sphere(sphere),
            owner: None,
        }
    }

    /// Tags the collider with its owning entity.
    #[must_use]
    pub fn owned_by(mut self, owner: Entity) -> Self {
        self.owner = Some(owner);
        self
    }
}

/// Static collision geometry queried by linear scan.
#[derive(Clone, Debug, Default)]
pub struct StaticWorld {
    colliders: Vec<Collider>,
}

impl StaticWorld {
    /// Creates an empty world.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a collider and returns its id.
    pub fn insert(&mut self, collider: Collider) -> ColliderId {
        self.colliders.push(collider);
        ColliderId(self.colliders.len() - 1)
    }

    /// Number of colliders.
    #[must_use]
    pub fn len(&self) -> usize {
        self.colliders.len()
    }

    /// Whether the world has no colliders.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.colliders.is_empty()
    }

    /// Collider by id.
    #[must_use]
    pub fn get(&self, id: ColliderId) -> Option<&Collider> {
        self.colliders.get(id.0)
    }

    /// Moves every collider owned by `owner` by `delta`. Keeps a moving
    /// entity's body in sync with its transform.
    pub fn translate_owned(&mut self, owner: Entity, delta: Vec3) {
        for collider in &mut self.colliders {
            if collider.owner == Some(owner) {
                collider.shape.translate(delta);
            }
        }
    }
}

impl WorldQuery for StaticWorld {
    fn raycast(&self, ray: &Ray, filter: &QueryFilter) -> Option<RayHit> {
        self.colliders
            .iter()
            .filter(|c| filter.accepts(c.owner))
            .filter_map(|c| {
                let (distance, normal) = c.shape.intersect_ray(ray)?;
                Some(RayHit {
                    distance,
                    point: ray.at(distance),
                    normal,
                    owner: c.owner,
                })
            })
            .min_by(|a, b| a.distance.total_cmp(&b.distance))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orbitcam_scene::{Scene, Transform};

    fn wall_at_z(z: f32) -> Collider {
        Collider::cuboid(Aabb::new(
            Vec3::new(-5.0, -5.0, z - 0.25),
            Vec3::new(5.0, 5.0, z + 0.25),
        ))
    }

    #[test]
    fn test_nearest_hit_wins() {
        let mut world = StaticWorld::new();
        world.insert(wall_at_z(8.0));
        world.insert(wall_at_z(4.0));
        let hit = world
            .linecast(Vec3::ZERO, Vec3::new(0.0, 0.0, 20.0), &QueryFilter::new())
            .unwrap();
        assert!((hit.distance - 3.75).abs() < 1e-4);
        assert!((hit.point.z - 3.75).abs() < 1e-4);
        assert_eq!(hit.normal, Vec3::NEG_Z);
    }

    #[test]
    fn test_linecast_stops_at_segment_end() {
        let mut world = StaticWorld::new();
        world.insert(wall_at_z(8.0));
        assert!(
            world
                .linecast(Vec3::ZERO, Vec3::new(0.0, 0.0, 5.0), &QueryFilter::new())
                .is_none()
        );
    }

    #[test]
    fn test_filtered_owner_is_skipped() {
        let mut scene = Scene::new();
        let player = scene.spawn("Player", Transform::IDENTITY);
        let mut world = StaticWorld::new();
        world.insert(
            Collider::ball(Sphere::new(Vec3::new(0.0, 0.0, 2.0), 0.5)).owned_by(player),
        );
        world.insert(wall_at_z(6.0));

        let all = world
            .linecast(Vec3::ZERO, Vec3::new(0.0, 0.0, 10.0), &QueryFilter::new())
            .unwrap();
        assert_eq!(all.owner, Some(player));

        let filtered = world
            .linecast(
                Vec3::ZERO,
                Vec3::new(0.0, 0.0, 10.0),
                &QueryFilter::excluding([player]),
            )
            .unwrap();
        assert_eq!(filtered.owner, None);
        assert!((filtered.distance - 5.75).abs() < 1e-4);
    }

    #[test]
    fn test_translate_owned_moves_body() {
        let mut scene = Scene::new();
        let player = scene.spawn("Player", Transform::IDENTITY);
        let mut world = StaticWorld::new();
        let id = world.insert(Collider::ball(Sphere::new(Vec3::ZERO, 0.5)).owned_by(player));
        let wall = world.insert(wall_at_z(6.0));
        world.translate_owned(player, Vec3::new(1.0, 0.0, 0.0));

        match world.get(id).unwrap().shape {
            Shape::Sphere(s) => assert_eq!(s.center, Vec3::X),
            Shape::Box(_) => panic!("expected sphere"),
        }
        assert_eq!(world.get(wall).unwrap().owner, None);
        assert_eq!(world.len(), 2);
    }
}
