//! Scene graph: named entities with parent/child transforms.
//!
//! The camera rig and input bridge read and mutate entity transforms through
//! [`Scene`]; nothing in this crate knows about cameras or input.

mod scene;
mod transform;

pub use scene::{Entity, Scene, SceneError};
pub use transform::Transform;
