//! Third-person orbit camera: zoom, orbit, pitch, smooth follow, and
//! occlusion correction against an injected [`WorldQuery`].
//!
//! [`WorldQuery`]: orbitcam_physics::WorldQuery

mod error;
pub mod focus;
pub mod occlusion;
pub mod rig;

pub use error::RigError;
pub use focus::{FOCUS_POINT_NAME, resolve_focus_point};
pub use occlusion::{OcclusionProbes, resolve_occlusion};
pub use rig::{CameraRig, NUDGE_DISTANCE};
