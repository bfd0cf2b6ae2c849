//! Read-only ray queries against static collision geometry.
//!
//! The camera rig only needs "what is the first thing along this ray", so
//! the world is exposed through the [`WorldQuery`] trait. [`StaticWorld`]
//! is a brute-force implementation over boxes and spheres; tests inject
//! their own implementations.

mod query;
mod shapes;
mod static_world;

pub use query::{EmptyWorld, QueryFilter, Ray, RayHit, WorldQuery};
pub use shapes::{Aabb, Shape, Sphere};
pub use static_world::{Collider, ColliderId, StaticWorld};
