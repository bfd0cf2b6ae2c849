//! World query trait and ray types.

use glam::Vec3;
use orbitcam_scene::Entity;

/// A ray with a normalized direction and a length limit.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    /// Start point in world space.
    pub origin: Vec3,
    /// Unit direction.
    pub direction: Vec3,
    /// Hits farther than this are ignored.
    pub max_distance: f32,
}

impl Ray {
    /// Builds a ray, normalizing `direction`. Returns `None` for a zero or
    /// non-finite direction.
    #[must_use]
    pub fn new(origin: Vec3, direction: Vec3, max_distance: f32) -> Option<Self> {
        let direction = direction.try_normalize()?;
        Some(Self {
            origin,
            direction,
            max_distance,
        })
    }

    /// Ray from `from` toward `to`, limited to the segment between them.
    #[must_use]
    pub fn between(from: Vec3, to: Vec3) -> Option<Self> {
        Self::new(from, to - from, from.distance(to))
    }

    /// Point at parameter `t` along the ray.
    #[must_use]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// First surface found along a ray.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RayHit {
    /// Distance from the ray origin to the hit point.
    pub distance: f32,
    /// Hit point in world space.
    pub point: Vec3,
    /// Surface normal at the hit point.
    pub normal: Vec3,
    /// Entity the collider belongs to, if any.
    pub owner: Option<Entity>,
}

/// Which colliders a query should skip.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QueryFilter {
    excluded: Vec<Entity>,
}

impl QueryFilter {
    /// Filter that accepts every collider.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter that skips colliders owned by any of `entities`.
    #[must_use]
    pub fn excluding(entities: impl IntoIterator<Item = Entity>) -> Self {
        Self {
            excluded: entities.into_iter().collect(),
        }
    }

    /// Whether a collider owned by `owner` passes the filter.
    #[must_use]
    pub fn accepts(&self, owner: Option<Entity>) -> bool {
        match owner {
            Some(owner) => !self.excluded.contains(&owner),
            None => true,
        }
    }
}

/// Read-only access to the world's collision geometry.
///
/// Rays that start inside a collider do not report that collider.
pub trait WorldQuery {
    /// Nearest accepted hit along `ray` within `ray.max_distance`.
    fn raycast(&self, ray: &Ray, filter: &QueryFilter) -> Option<RayHit>;

    /// Nearest accepted hit on the segment `from`..`to`.
    fn linecast(&self, from: Vec3, to: Vec3, filter: &QueryFilter) -> Option<RayHit> {
        let ray = Ray::between(from, to)?;
        self.raycast(&ray, filter)
    }
}

/// A world without geometry: every query misses.
#[derive(Clone, Copy, Debug, Default)]
pub struct EmptyWorld;

impl WorldQuery for EmptyWorld {
    fn raycast(&self, _ray: &Ray, _filter: &QueryFilter) -> Option<RayHit> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orbitcam_scene::{Scene, Transform};

    #[test]
    fn test_ray_normalizes_direction() {
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, 4.0), 10.0).unwrap();
        assert!((ray.direction - Vec3::Z).length() < 1e-6);
        assert!((ray.at(2.0) - Vec3::new(0.0, 0.0, 2.0)).length() < 1e-6);
    }

    #[test]
    fn test_zero_direction_rejected() {
        assert!(Ray::new(Vec3::ONE, Vec3::ZERO, 1.0).is_none());
        assert!(Ray::between(Vec3::ONE, Vec3::ONE).is_none());
    }

    #[test]
    fn test_filter_excludes_owner() {
        let mut scene = Scene::new();
        let player = scene.spawn("Player", Transform::IDENTITY);
        let wall = scene.spawn("Wall", Transform::IDENTITY);
        let filter = QueryFilter::excluding([player]);
        assert!(!filter.accepts(Some(player)));
        assert!(filter.accepts(Some(wall)));
        assert!(filter.accepts(None));
        assert!(QueryFilter::new().accepts(Some(player)));
    }

    #[test]
    fn test_empty_world_never_hits() {
        let world = EmptyWorld;
        assert!(
            world
                .linecast(Vec3::ZERO, Vec3::new(0.0, 0.0, 100.0), &QueryFilter::new())
                .is_none()
        );
    }
}
