//! Collision primitives and their ray intersection tests.

use glam::Vec3;

use crate::Ray;

/// Axis-aligned box.
///
/// Invariant: `min <= max` on every axis. The constructor enforces this by
/// swapping components if needed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    /// Lower corner.
    pub min: Vec3,
    /// Upper corner.
    pub max: Vec3,
}

impl Aabb {
    /// Box spanning two corners in any order.
    #[must_use]
    pub fn new(a: Vec3, b: Vec3) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Box from a center point and half-extents.
    #[must_use]
    pub fn from_center_half_extents(center: Vec3, half: Vec3) -> Self {
        Self::new(center - half, center + half)
    }

    /// Center point.
    #[must_use]
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Whether the point lies inside or on the boundary.
    #[must_use]
    pub fn contains_point(&self, p: Vec3) -> bool {
        p.cmpge(self.min).all() && p.cmple(self.max).all()
    }

    /// Slab test. Returns the entry distance and the entry face normal, or
    /// `None` if the ray misses, starts inside, or enters beyond its length.
    #[must_use]
    pub fn intersect_ray(&self, ray: &Ray) -> Option<(f32, Vec3)> {
        if self.contains_point(ray.origin) {
            return None;
        }
        let mut t_enter = f32::NEG_INFINITY;
        let mut t_exit = f32::INFINITY;
        let mut normal = Vec3::ZERO;

        for axis in 0..3 {
            let origin = ray.origin[axis];
            let dir = ray.direction[axis];
            let (lo, hi) = (self.min[axis], self.max[axis]);

            if dir.abs() < f32::EPSILON {
                // Parallel to this slab: must already be between its planes.
                if origin < lo || origin > hi {
                    return None;
                }
                continue;
            }

            let inv = 1.0 / dir;
            let (mut t0, mut t1) = ((lo - origin) * inv, (hi - origin) * inv);
            if t0 > t1 {
                std::mem::swap(&mut t0, &mut t1);
            }
            if t0 > t_enter {
                let face = -dir.signum();
                t_enter = t0;
                normal = Vec3::ZERO;
                normal[axis] = face;
            }
            t_exit = t_exit.min(t1);
            if t_enter > t_exit {
                return None;
            }
        }

        if t_enter < 0.0 || t_enter > ray.max_distance {
            return None;
        }
        Some((t_enter, normal))
    }
}

/// Sphere.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sphere {
    /// Center point.
    pub center: Vec3,
    /// Radius, positive.
    pub radius: f32,
}

impl Sphere {
    /// Sphere at `center` with `radius`.
    #[must_use]
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self {
            center,
            radius: radius.abs(),
        }
    }

    /// Entry distance and outward normal, with the same rules as
    /// [`Aabb::intersect_ray`].
    #[must_use]
    pub fn intersect_ray(&self, ray: &Ray) -> Option<(f32, Vec3)> {
        let oc = ray.origin - self.center;
        let c = oc.length_squared() - self.radius * self.radius;
        if c <= 0.0 {
            return None;
        }
        let b = oc.dot(ray.direction);
        if b > 0.0 {
            return None;
        }
        let disc = b * b - c;
        if disc < 0.0 {
            return None;
        }
        let t = -b - disc.sqrt();
        if t < 0.0 || t > ray.max_distance {
            return None;
        }
        let normal = (ray.at(t) - self.center).normalize_or_zero();
        Some((t, normal))
    }
}

/// Any supported collision primitive.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Shape {
    /// Axis-aligned box.
    Box(Aabb),
    /// Sphere.
    Sphere(Sphere),
}

impl Shape {
    /// Entry distance and normal of `ray` against this shape.
    #[must_use]
    pub fn intersect_ray(&self, ray: &Ray) -> Option<(f32, Vec3)> {
        match self {
            Shape::Box(aabb) => aabb.intersect_ray(ray),
            Shape::Sphere(sphere) => sphere.intersect_ray(ray),
        }
    }

    /// Centre of the shape.
    #[must_use]
    pub fn center(&self) -> Vec3 {
        match self {
            Shape::Box(aabb) => aabb.center(),
            Shape::Sphere(sphere) => sphere.center,
        }
    }

    /// Moves the shape by `delta`.
    pub fn translate(&mut self, delta: Vec3) {
        match self {
            Shape::Box(aabb) => {
                aabb.min += delta;
                aabb.max += delta;
            }
            Shape::Sphere(sphere) => sphere.center += delta,
        }
    }
}
