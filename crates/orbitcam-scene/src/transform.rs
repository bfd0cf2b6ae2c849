//! Position + orientation pair used for every entity and the camera.
//!
//! Right-handed, `+Y` up, `-Z` forward.

use glam::{Mat3, Mat4, Quat, Vec3};

/// Rigid transform: translation and unit-quaternion rotation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    /// Position in the parent's space (world space for roots).
    pub translation: Vec3,
    /// Orientation in the parent's space.
    pub rotation: Quat,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    /// No translation, no rotation.
    pub const IDENTITY: Self = Self {
        translation: Vec3::ZERO,
        rotation: Quat::IDENTITY,
    };

    /// Transform at `translation` with identity rotation.
    #[must_use]
    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            rotation: Quat::IDENTITY,
        }
    }

    /// Transform at `(x, y, z)` with identity rotation.
    #[must_use]
    pub fn from_xyz(x: f32, y: f32, z: f32) -> Self {
        Self::from_translation(Vec3::new(x, y, z))
    }

    /// Same translation, different rotation.
    #[must_use]
    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.rotation = rotation;
        self
    }

    /// Unit vector the transform faces (`-Z` in local space).
    #[must_use]
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::NEG_Z
    }

    /// Opposite of [`forward`](Self::forward).
    #[must_use]
    pub fn back(&self) -> Vec3 {
        self.rotation * Vec3::Z
    }

    /// Local `+X` in the parent's space.
    #[must_use]
    pub fn right(&self) -> Vec3 {
        self.rotation * Vec3::X
    }

    /// Local `+Y` in the parent's space.
    #[must_use]
    pub fn up(&self) -> Vec3 {
        self.rotation * Vec3::Y
    }

    /// Heading around `+Y` in radians. 0 faces `-Z`, positive turns toward `-X`.
    #[must_use]
    pub fn yaw(&self) -> f32 {
        let f = self.forward();
        (-f.x).atan2(-f.z)
    }

    /// Maps a point from local space into the parent's space.
    #[must_use]
    pub fn transform_point(&self, local: Vec3) -> Vec3 {
        self.translation + self.rotation * local
    }

    /// Composes `self` (parent) with `child` (expressed in `self`'s space).
    #[must_use]
    pub fn mul_transform(&self, child: &Transform) -> Transform {
        Transform {
            translation: self.transform_point(child.translation),
            rotation: (self.rotation * child.rotation).normalize(),
        }
    }

    /// Inverse rigid transform.
    #[must_use]
    pub fn inverse(&self) -> Transform {
        let rotation = self.rotation.inverse();
        Transform {
            translation: rotation * -self.translation,
            rotation,
        }
    }

    /// Moves by a delta expressed in the parent's space.
    pub fn translate(&mut self, delta: Vec3) {
        self.translation += delta;
    }

    /// Turns the transform so [`forward`](Self::forward) points at `target`.
    ///
    /// Leaves the rotation unchanged when `target` coincides with the
    /// translation or the view direction is parallel to `up`.
    pub fn look_at(&mut self, target: Vec3, up: Vec3) {
        let back = self.translation - target;
        if back.length_squared() < 1e-12 {
            return;
        }
        let back = back.normalize();
        let right = up.cross(back);
        if right.length_squared() < 1e-12 {
            return;
        }
        let right = right.normalize();
        let up = back.cross(right);
        self.rotation = Quat::from_mat3(&Mat3::from_cols(right, up, back)).normalize();
    }

    /// Builder form of [`look_at`](Self::look_at).
    #[must_use]
    pub fn looking_at(mut self, target: Vec3, up: Vec3) -> Self {
        self.look_at(target, up);
        self
    }

    /// Revolves the transform around `point` by `rotation`, turning its
    /// orientation by the same amount.
    pub fn rotate_around(&mut self, point: Vec3, rotation: Quat) {
        self.translation = point + rotation * (self.translation - point);
        self.rotation = (rotation * self.rotation).normalize();
    }

    /// Local-to-parent matrix.
    #[must_use]
    pub fn compute_matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.rotation, self.translation)
    }

    /// View matrix for a camera placed at this transform.
    #[must_use]
    pub fn view_matrix(&self) -> Mat4 {
        self.inverse().compute_matrix()
    }
}
