//! The camera rig: a camera transform orbiting a focus point on the target.
//!
//! Orientation is never stored on its own; every operation that moves the
//! camera re-aims it at the focus point.

use glam::{Mat4, Quat, Vec3};
use orbitcam_config::{CameraConfig, ZoomBoundary};
use orbitcam_physics::{QueryFilter, WorldQuery};
use orbitcam_scene::{Entity, Scene, Transform};
use tracing::{debug, info, trace};

use crate::focus::resolve_focus_point;
use crate::occlusion::OcclusionProbes;
use crate::RigError;

/// How far the camera is pushed back when it collapses onto the focus point.
pub const NUDGE_DISTANCE: f32 = 0.1;

/// Below this camera-to-focus distance the look direction is undefined.
const DEGENERATE_DISTANCE: f32 = 1e-4;

/// Moves `current` toward `target` by at most `max_step`, never overshooting.
fn move_towards(current: Vec3, target: Vec3, max_step: f32) -> Vec3 {
    let to_target = target - current;
    let distance = to_target.length();
    if distance <= max_step || distance < f32::EPSILON {
        target
    } else {
        current + to_target / distance * max_step
    }
}

/// Angle in radians between `offset` and the plane perpendicular to `up`.
fn elevation_of(offset: Vec3, up: Vec3) -> f32 {
    offset
        .normalize_or_zero()
        .dot(up)
        .clamp(-1.0, 1.0)
        .asin()
}

/// Third-person camera attached to a target entity.
#[derive(Clone, Debug)]
pub struct CameraRig {
    config: CameraConfig,
    target: Entity,
    focus: Entity,
    transform: Transform,
    /// World transform of the focus point as of the last scene read.
    focus_world: Transform,
    zoom_distance: f32,
    effective_distance: f32,
    occluded: bool,
    probes: OcclusionProbes,
}

impl CameraRig {
    /// Places the camera behind and above `target`, resolves (or creates)
    /// the focus point, derives the initial zoom distance, and runs one
    /// zero-length update.
    pub fn setup(
        config: CameraConfig,
        scene: &mut Scene,
        target: Entity,
        world: &dyn WorldQuery,
    ) -> Result<Self, RigError> {
        config.validate()?;
        let target_world = scene
            .world_transform(target)
            .ok_or(RigError::MissingTarget(target))?;
        let focus = resolve_focus_point(scene, target, &config)?;
        let focus_world = scene
            .world_transform(focus)
            .ok_or(RigError::MissingFocusPoint(focus))?;

        let start = target_world.translation
            + target_world.back() * (config.max_zoom_range / 2.0)
            + Vec3::Y * config.setup_height;
        let zoom_distance = start
            .distance(focus_world.translation)
            .clamp(config.min_zoom, config.max_zoom_range);

        let probes = OcclusionProbes {
            probe_height: config.occlusion_probe_height,
            skin: config.occlusion_skin,
        };
        let mut rig = Self {
            config,
            target,
            focus,
            transform: Transform::from_translation(start)
                .looking_at(focus_world.translation, Vec3::Y),
            focus_world,
            zoom_distance,
            effective_distance: zoom_distance,
            occluded: false,
            probes,
        };
        rig.update(scene, world, 0.0)?;

        info!(
            "camera rig attached to {target}: zoom {:.2}, near clip {}",
            rig.zoom_distance, rig.config.near_clip
        );
        Ok(rig)
    }

    /// Recomputes the camera position for this frame.
    ///
    /// The desired position lies on the current view ray at `zoom_distance`
    /// from the focus point, shortened by occlusion. The camera moves toward
    /// it by at most `auto_zoom_speed * dt` and is then re-aimed. Returns the
    /// effective (occlusion-corrected) distance.
    pub fn update(
        &mut self,
        scene: &Scene,
        world: &dyn WorldQuery,
        dt: f32,
    ) -> Result<f32, RigError> {
        let focus_world = self.refresh_focus(scene)?;
        let focus = focus_world.translation;
        self.separate_from(focus);

        let camera_dir = (self.transform.translation - focus).normalize();
        let filter = self.occlusion_filter(scene);
        let effective = self.probes.resolve(
            focus,
            focus_world.up(),
            camera_dir,
            self.zoom_distance,
            world,
            &filter,
        );

        let occluded = effective < self.zoom_distance;
        if occluded != self.occluded {
            if occluded {
                debug!(
                    "view occluded: distance {:.2} -> {:.2}",
                    self.zoom_distance, effective
                );
            } else {
                debug!("view clear at distance {:.2}", self.zoom_distance);
            }
            self.occluded = occluded;
        }
        self.effective_distance = effective;

        let desired = focus + camera_dir * effective;
        let max_step = self.config.auto_zoom_speed * dt.max(0.0);
        self.transform.translation = move_towards(self.transform.translation, desired, max_step);
        self.separate_from(focus);
        self.aim(focus);
        Ok(effective)
    }

    /// Changes the zoom distance. Positive `delta` zooms in.
    ///
    /// Under [`ZoomBoundary::Clamp`] the result is clamped into
    /// `[min_zoom, max_zoom_range]`; under [`ZoomBoundary::Sticky`] a step
    /// that would leave the range is dropped entirely.
    pub fn zoom(&mut self, delta: f32) {
        if delta == 0.0 || !delta.is_finite() {
            return;
        }
        let proposed = self.zoom_distance - delta;
        let (min, max) = (self.config.min_zoom, self.config.max_zoom_range);
        match self.config.zoom_boundary {
            ZoomBoundary::Clamp => self.zoom_distance = proposed.clamp(min, max),
            ZoomBoundary::Sticky => {
                if (min..=max).contains(&proposed) {
                    self.zoom_distance = proposed;
                } else {
                    trace!("zoom step to {proposed:.2} dropped at boundary");
                }
            }
        }
    }

    /// Orbits around the focus point about world `+Y` by
    /// `amount * rotate_speed * dt` degrees.
    pub fn rotate(&mut self, scene: &Scene, amount: f32, dt: f32) -> Result<(), RigError> {
        let focus = self.refresh_focus(scene)?.translation;
        let angle = (amount * self.config.rotate_speed * dt).to_radians();
        if angle != 0.0 && angle.is_finite() {
            self.transform
                .rotate_around(focus, Quat::from_rotation_y(angle));
        }
        self.aim(focus);
        Ok(())
    }

    /// Orbits around the focus point about its lateral axis.
    ///
    /// Positive `amount` lowers the camera (the view tilts up) unless
    /// `invert_pitch` is set. The resulting elevation above the focus
    /// point's horizon is clamped to `[pitch_min_deg, pitch_max_deg]`.
    pub fn pitch(&mut self, scene: &Scene, amount: f32, dt: f32) -> Result<(), RigError> {
        let focus_world = self.refresh_focus(scene)?;
        let focus = focus_world.translation;
        let up = focus_world.up();
        let offset = self.transform.translation - focus;
        if offset.length() < DEGENERATE_DISTANCE {
            return Ok(());
        }

        let sign = if self.config.invert_pitch { 1.0 } else { -1.0 };
        let requested = (sign * amount * self.config.rotate_speed * dt).to_radians();
        if !requested.is_finite() {
            return Ok(());
        }
        let current = elevation_of(offset, up);
        let wanted = (current + requested).clamp(
            self.config.pitch_min_deg.to_radians(),
            self.config.pitch_max_deg.to_radians(),
        );
        let delta = wanted - current;

        if delta != 0.0 {
            let axis = offset
                .cross(up)
                .try_normalize()
                .unwrap_or_else(|| self.transform.right());
            self.transform
                .rotate_around(focus, Quat::from_axis_angle(axis, delta));
        }
        self.aim(focus);
        Ok(())
    }

    /// Translates the whole rig by a world-space delta, e.g. to keep pace
    /// with the target.
    pub fn move_by(&mut self, delta: Vec3) {
        self.transform.translate(delta);
        self.focus_world.translate(delta);
    }

    fn refresh_focus(&mut self, scene: &Scene) -> Result<Transform, RigError> {
        let focus_world = scene
            .world_transform(self.focus)
            .ok_or(RigError::MissingFocusPoint(self.focus))?;
        self.focus_world = focus_world;
        Ok(focus_world)
    }

    /// Pushes the camera back if it sits on the focus point.
    fn separate_from(&mut self, focus: Vec3) {
        if self.transform.translation.distance(focus) < DEGENERATE_DISTANCE {
            self.transform.translation = focus + self.focus_world.back() * NUDGE_DISTANCE;
        }
    }

    fn aim(&mut self, focus: Vec3) {
        self.transform.look_at(focus, Vec3::Y);
    }

    /// Skips colliders owned by the target or anything parented to it.
    fn occlusion_filter(&self, scene: &Scene) -> QueryFilter {
        QueryFilter::excluding(
            scene
                .iter()
                .filter(|&e| scene.is_descendant_of(e, self.target)),
        )
    }

    // ── Queries ─────────────────────────────────────────────────────

    /// The configuration the rig was built with.
    #[must_use]
    pub fn config(&self) -> &CameraConfig {
        &self.config
    }

    /// Entity the camera follows.
    #[must_use]
    pub fn target(&self) -> Entity {
        self.target
    }

    /// Focus point entity (child of the target).
    #[must_use]
    pub fn focus(&self) -> Entity {
        self.focus
    }

    /// Camera transform in world space.
    #[must_use]
    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    /// Camera position in world space.
    #[must_use]
    pub fn position(&self) -> Vec3 {
        self.transform.translation
    }

    /// Unit view direction.
    #[must_use]
    pub fn forward(&self) -> Vec3 {
        self.transform.forward()
    }

    /// Camera heading around `+Y` in radians (see [`Transform::yaw`]).
    #[must_use]
    pub fn yaw(&self) -> f32 {
        self.transform.yaw()
    }

    /// Focus point position as of the last scene read.
    #[must_use]
    pub fn focus_position(&self) -> Vec3 {
        self.focus_world.translation
    }

    /// Horizontal angle of the camera around the focus point in radians,
    /// measured from `+Z` toward `+X`.
    #[must_use]
    pub fn azimuth(&self) -> f32 {
        let offset = self.transform.translation - self.focus_world.translation;
        offset.x.atan2(offset.z)
    }

    /// Elevation of the camera above the focus point's horizon in radians.
    #[must_use]
    pub fn elevation(&self) -> f32 {
        elevation_of(
            self.transform.translation - self.focus_world.translation,
            self.focus_world.up(),
        )
    }

    /// Current distance between camera and focus point.
    #[must_use]
    pub fn distance(&self) -> f32 {
        self.transform.translation.distance(self.focus_world.translation)
    }

    /// Desired orbit radius.
    #[must_use]
    pub fn zoom_distance(&self) -> f32 {
        self.zoom_distance
    }

    /// Orbit radius after the last occlusion correction.
    #[must_use]
    pub fn effective_distance(&self) -> f32 {
        self.effective_distance
    }

    /// Whether the last update found geometry in the way.
    #[must_use]
    pub fn is_occluded(&self) -> bool {
        self.occluded
    }

    /// Near clip plane distance.
    #[must_use]
    pub fn near_clip(&self) -> f32 {
        self.config.near_clip
    }

    /// World-to-view matrix.
    #[must_use]
    pub fn view_matrix(&self) -> Mat4 {
        self.transform.view_matrix()
    }
}
