use glam::{Affine3A, EulerRot, Mat3, Quat, Vec3};

/// Position, rotation and scale as last folded into the local matrix.
#[derive(Debug, Clone, Copy, PartialEq)]
struct TrsSnapshot {
    position: Vec3,
    rotation: Quat,
    scale: Vec3,
}

/// Transform component
///
/// Public TRS fields are written freely (the binder overwrites limb
/// positions every tick). The local matrix is rebuilt lazily: only when the
/// TRS differs from the snapshot taken at the last rebuild.
#[derive(Debug, Clone)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,

    pub(crate) local_matrix: Affine3A,
    pub(crate) world_matrix: Affine3A,

    /// `None` forces the next rebuild.
    folded: Option<TrsSnapshot>,
}

impl Transform {
    #[must_use]
    pub fn new() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
            local_matrix: Affine3A::IDENTITY,
            world_matrix: Affine3A::IDENTITY,
            folded: None,
        }
    }

    /// Builds a transform from decomposed glTF TRS arrays.
    #[must_use]
    pub fn from_trs(translation: [f32; 3], rotation: [f32; 4], scale: [f32; 3]) -> Self {
        Self {
            position: Vec3::from_array(translation),
            rotation: Quat::from_array(rotation),
            scale: Vec3::from_array(scale),
            ..Self::new()
        }
    }

    fn snapshot(&self) -> TrsSnapshot {
        TrsSnapshot {
            position: self.position,
            rotation: self.rotation,
            scale: self.scale,
        }
    }

    /// Rebuilds the local matrix if the TRS changed since the last rebuild.
    /// Returns whether a rebuild happened.
    pub fn update_local_matrix(&mut self) -> bool {
        let current = self.snapshot();
        if self.folded == Some(current) {
            return false;
        }

        self.local_matrix =
            Affine3A::from_scale_rotation_translation(current.scale, current.rotation, current.position);
        self.folded = Some(current);
        true
    }

    /// Forces the next [`update_local_matrix`](Self::update_local_matrix) to rebuild.
    pub fn mark_dirty(&mut self) {
        self.folded = None;
    }

    // ========================================================================
    // Rotation helpers
    // ========================================================================

    /// Sets the rotation from XYZ Euler angles in radians.
    pub fn set_rotation_euler(&mut self, x: f32, y: f32, z: f32) {
        self.rotation = Quat::from_euler(EulerRot::XYZ, x, y, z);
    }

    /// Returns the rotation as XYZ Euler angles in radians.
    #[must_use]
    pub fn rotation_euler(&self) -> Vec3 {
        let (x, y, z) = self.rotation.to_euler(EulerRot::XYZ);
        Vec3::new(x, y, z)
    }

    /// Orients the transform so that -Z points at `target` (parent space).
    /// Leaves the rotation untouched when the view direction is parallel to
    /// `up`.
    pub fn look_at(&mut self, target: Vec3, up: Vec3) {
        let forward = (target - self.position).normalize();
        let right = forward.cross(up);
        if right.length_squared() < 1e-4 {
            return;
        }

        let right = right.normalize();
        let new_up = right.cross(forward).normalize();
        self.rotation = Quat::from_mat3(&Mat3::from_cols(right, new_up, -forward));
    }

    // ========================================================================
    // Matrices
    // ========================================================================

    #[inline]
    #[must_use]
    pub fn local_matrix(&self) -> &Affine3A {
        &self.local_matrix
    }

    /// World matrix written by the last hierarchy update.
    #[inline]
    #[must_use]
    pub fn world_matrix(&self) -> &Affine3A {
        &self.world_matrix
    }

    pub(crate) fn set_world_matrix(&mut self, mat: Affine3A) {
        self.world_matrix = mat;
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::new()
    }
}
