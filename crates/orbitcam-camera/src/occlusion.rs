//! Occlusion correction: how far the camera may sit from the focus point
//! before geometry gets in the way.
//!
//! Only the current frame is considered and only along the probe rays, so
//! thin or angled obstacles between the probes can be missed.

use glam::Vec3;
use orbitcam_physics::{QueryFilter, Ray, WorldQuery};

/// Distance from `focus` along `camera_dir` to the first accepted hit,
/// capped at `max_distance`. Returns `max_distance` when nothing is hit or
/// the direction is degenerate.
pub fn resolve_occlusion(
    focus: Vec3,
    camera_dir: Vec3,
    max_distance: f32,
    world: &dyn WorldQuery,
    filter: &QueryFilter,
) -> f32 {
    if !(max_distance > 0.0) {
        return max_distance.max(0.0);
    }
    let Some(ray) = Ray::new(focus, camera_dir, max_distance) else {
        return max_distance;
    };
    match world.raycast(&ray, filter) {
        Some(hit) => hit.distance.clamp(0.0, max_distance),
        None => max_distance,
    }
}

/// The two probe rays cast each update: one from the focus point and one
/// from a point above it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OcclusionProbes {
    /// Height of the second probe above the focus point, along its up axis.
    pub probe_height: f32,
    /// Gap kept between the camera and the occluding surface.
    pub skin: f32,
}

impl OcclusionProbes {
    /// Effective camera distance given both probes.
    ///
    /// Equal to `max_distance` when neither probe hits; otherwise the
    /// nearest hit minus `skin`, never negative.
    pub fn resolve(
        &self,
        focus: Vec3,
        focus_up: Vec3,
        camera_dir: Vec3,
        max_distance: f32,
        world: &dyn WorldQuery,
        filter: &QueryFilter,
    ) -> f32 {
        let center = resolve_occlusion(focus, camera_dir, max_distance, world, filter);
        let upper = resolve_occlusion(
            focus + focus_up * self.probe_height,
            camera_dir,
            max_distance,
            world,
            filter,
        );
        let nearest = center.min(upper);
        if nearest < max_distance {
            (nearest - self.skin).max(0.0)
        } else {
            max_distance
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orbitcam_physics::{Aabb, Collider, EmptyWorld, RayHit, StaticWorld};
    use std::cell::RefCell;

    /// Infinite wall at `z = wall_z` with `y` below `top`, recording rays.
    struct WallBelow {
        wall_z: f32,
        top: f32,
        rays: RefCell<Vec<Ray>>,
    }

    impl WorldQuery for WallBelow {
        fn raycast(&self, ray: &Ray, _filter: &QueryFilter) -> Option<RayHit> {
            self.rays.borrow_mut().push(*ray);
            if ray.direction.z.abs() < f32::EPSILON {
                return None;
            }
            let t = (self.wall_z - ray.origin.z) / ray.direction.z;
            if t < 0.0 || t > ray.max_distance {
                return None;
            }
            let point = ray.at(t);
            (point.y < self.top).then_some(RayHit {
                distance: t,
                point,
                normal: Vec3::NEG_Z,
                owner: None,
            })
        }
    }

    #[test]
    fn test_no_geometry_returns_max() {
        let d = resolve_occlusion(Vec3::ZERO, Vec3::Z, 8.0, &EmptyWorld, &QueryFilter::new());
        assert_eq!(d, 8.0);
    }

    #[test]
    fn test_hit_shortens_distance() {
        let mut world = StaticWorld::new();
        world.insert(Collider::cuboid(Aabb::new(
            Vec3::new(-1.0, -1.0, 3.0),
            Vec3::new(1.0, 1.0, 3.5),
        )));
        let d = resolve_occlusion(Vec3::ZERO, Vec3::Z, 8.0, &world, &QueryFilter::new());
        assert!((d - 3.0).abs() < 1e-5);
    }

    #[test]
    fn test_hit_beyond_max_ignored() {
        let world = WallBelow {
            wall_z: 12.0,
            top: 100.0,
            rays: RefCell::default(),
        };
        let d = resolve_occlusion(Vec3::ZERO, Vec3::Z, 8.0, &world, &QueryFilter::new());
        assert_eq!(d, 8.0);
    }

    #[test]
    fn test_degenerate_direction_returns_max() {
        let world = WallBelow {
            wall_z: 1.0,
            top: 100.0,
            rays: RefCell::default(),
        };
        let d = resolve_occlusion(Vec3::ZERO, Vec3::ZERO, 5.0, &world, &QueryFilter::new());
        assert_eq!(d, 5.0);
        assert!(world.rays.borrow().is_empty());
    }

    #[test]
    fn test_probes_cast_center_and_up() {
        let world = WallBelow {
            wall_z: 100.0,
            top: 0.0,
            rays: RefCell::default(),
        };
        let probes = OcclusionProbes {
            probe_height: 0.5,
            skin: 0.1,
        };
        let d = probes.resolve(
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::Y,
            Vec3::Z,
            6.0,
            &world,
            &QueryFilter::new(),
        );
        assert_eq!(d, 6.0);
        let rays = world.rays.borrow();
        assert_eq!(rays.len(), 2);
        assert!((rays[0].origin - Vec3::new(0.0, 1.0, 0.0)).length() < 1e-6);
        assert!((rays[1].origin - Vec3::new(0.0, 1.5, 0.0)).length() < 1e-6);
    }

    #[test]
    fn test_only_upper_probe_hits() {
        // Overhang above y = 1.2: only the upper probe (y = 1.5) sees it.
        struct Overhang;
        impl WorldQuery for Overhang {
            fn raycast(&self, ray: &Ray, _filter: &QueryFilter) -> Option<RayHit> {
                (ray.origin.y > 1.2).then(|| RayHit {
                    distance: 2.0,
                    point: ray.at(2.0),
                    normal: Vec3::NEG_Z,
                    owner: None,
                })
            }
        }
        let probes = OcclusionProbes {
            probe_height: 0.5,
            skin: 0.25,
        };
        let d = probes.resolve(
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::Y,
            Vec3::Z,
            6.0,
            &Overhang,
            &QueryFilter::new(),
        );
        assert!((d - 1.75).abs() < 1e-6);
    }

    #[test]
    fn test_skin_never_goes_negative() {
        let world = WallBelow {
            wall_z: 0.05,
            top: 100.0,
            rays: RefCell::default(),
        };
        let probes = OcclusionProbes {
            probe_height: 0.5,
            skin: 0.2,
        };
        let d = probes.resolve(
            Vec3::ZERO,
            Vec3::Y,
            Vec3::Z,
            6.0,
            &world,
            &QueryFilter::new(),
        );
        assert_eq!(d, 0.0);
    }
}
