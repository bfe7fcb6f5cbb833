use std::f32::consts::{FRAC_PI_4, PI};

use glam::{Mat3, Mat4, Quat, Vec3};

use crate::error::NavError;

/// Smallest angle kept between a clamped FOV and its `(0, π)` limits.
pub const FOV_EPSILON: f32 = 1e-4;

/// Safety factor keeping the focus distance bounds away from the float limits.
const FOCUS_DIST_MARGIN: f32 = 10.0;

/// Rigid camera-to-world transform.
///
/// Columns are right (X), up (Y), back (Z) and position. The camera looks
/// down its local -Z, so the world-space view direction is `-z_axis`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    camera_to_world: Mat4,
}

impl Default for Pose {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Pose {
    /// Camera at the origin looking down world -Z with +Y up.
    pub const IDENTITY: Self = Self {
        camera_to_world: Mat4::IDENTITY,
    };

    /// Build a pose from a rotation and eye position.
    #[must_use]
    pub fn from_rotation_translation(rotation: Quat, position: Vec3) -> Self {
        Self {
            camera_to_world: Mat4::from_rotation_translation(
                rotation.normalize(),
                position,
            ),
        }
    }

    /// Build a pose from explicit basis vectors. The basis is
    /// re-orthonormalized.
    #[must_use]
    pub fn from_axes(x: Vec3, y: Vec3, z: Vec3, position: Vec3) -> Self {
        let mut pose = Self {
            camera_to_world: Mat4::from_cols(
                x.extend(0.0),
                y.extend(0.0),
                z.extend(0.0),
                position.extend(1.0),
            ),
        };
        pose.orthonormalize();
        pose
    }

    /// The camera-to-world matrix.
    #[must_use]
    pub fn camera_to_world(&self) -> Mat4 {
        self.camera_to_world
    }

    /// The world-to-camera matrix.
    ///
    /// The basis is orthonormal, so this is the transposed rotation with
    /// the translation rotated back and negated rather than a general
    /// inverse.
    #[must_use]
    pub fn world_to_camera(&self) -> Mat4 {
        let rot_t = self.basis().transpose();
        let t = -(rot_t * self.position());
        Mat4::from_cols(
            rot_t.x_axis.extend(0.0),
            rot_t.y_axis.extend(0.0),
            rot_t.z_axis.extend(0.0),
            t.extend(1.0),
        )
    }

    /// Camera right axis in world space.
    #[must_use]
    pub fn x_axis(&self) -> Vec3 {
        self.camera_to_world.x_axis.truncate()
    }

    /// Camera up axis in world space.
    #[must_use]
    pub fn y_axis(&self) -> Vec3 {
        self.camera_to_world.y_axis.truncate()
    }

    /// Camera back axis in world space (opposite the view direction).
    #[must_use]
    pub fn z_axis(&self) -> Vec3 {
        self.camera_to_world.z_axis.truncate()
    }

    /// World-space view direction.
    #[must_use]
    pub fn view_dir(&self) -> Vec3 {
        -self.z_axis()
    }

    /// Eye position in world space.
    #[must_use]
    pub fn position(&self) -> Vec3 {
        self.camera_to_world.w_axis.truncate()
    }

    /// Move the eye without changing orientation.
    pub fn set_position(&mut self, position: Vec3) {
        self.camera_to_world.w_axis = position.extend(1.0);
    }

    /// Rotation part as a 3×3 matrix.
    #[must_use]
    pub fn basis(&self) -> Mat3 {
        Mat3::from_mat4(self.camera_to_world)
    }

    /// Rotation part as a quaternion.
    #[must_use]
    pub fn rotation(&self) -> Quat {
        Quat::from_mat3(&self.basis()).normalize()
    }

    /// Rotate a camera-space direction into world space.
    #[must_use]
    pub fn to_world_dir(&self, dir: Vec3) -> Vec3 {
        self.basis() * dir
    }

    /// Transform a camera-space point into world space.
    #[must_use]
    pub fn to_world_point(&self, point: Vec3) -> Vec3 {
        self.camera_to_world.transform_point3(point)
    }

    /// Re-orthonormalize the basis against accumulated drift, keeping the
    /// back axis direction and the position.
    pub fn orthonormalize(&mut self) {
        let z = self.z_axis().try_normalize().unwrap_or(Vec3::Z);
        let x = self
            .y_axis()
            .cross(z)
            .try_normalize()
            .or_else(|| self.x_axis().try_normalize())
            .unwrap_or_else(|| z.any_orthonormal_vector());
        let x = (x - z * x.dot(z)).normalize_or(z.any_orthonormal_vector());
        let y = z.cross(x);
        self.camera_to_world = Mat4::from_cols(
            x.extend(0.0),
            y.extend(0.0),
            z.extend(0.0),
            self.position().extend(1.0),
        );
    }

    /// Whether all matrix entries are finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.camera_to_world.is_finite()
    }
}

/// Check that `fov` lies strictly inside `(0, π)`.
pub fn validate_fov(fov: f32) -> Result<f32, NavError> {
    if fov.is_finite() && fov > 0.0 && fov < PI {
        Ok(fov)
    } else {
        Err(NavError::InvalidFov(fov))
    }
}

/// Check that `aspect` is finite and positive.
pub fn validate_aspect(aspect: f32) -> Result<f32, NavError> {
    if aspect.is_finite() && aspect > 0.0 {
        Ok(aspect)
    } else {
        Err(NavError::InvalidAspect(aspect))
    }
}

/// Horizontal FOV for a vertical FOV: `tan(fovX/2) = aspect * tan(fovY/2)`.
#[must_use]
pub fn fov_x_from_fov_y(fov_y: f32, aspect: f32) -> f32 {
    2.0 * (aspect * (0.5 * fov_y).tan()).atan()
}

/// Vertical FOV for a horizontal FOV.
#[must_use]
pub fn fov_y_from_fov_x(fov_x: f32, aspect: f32) -> f32 {
    2.0 * ((0.5 * fov_x).tan() / aspect).atan()
}

/// Clamp a FOV into `(ε, π − ε)`.
#[must_use]
pub fn clamp_fov(fov: f32) -> f32 {
    if fov.is_nan() {
        return FOV_EPSILON;
    }
    fov.clamp(FOV_EPSILON, PI - FOV_EPSILON)
}

/// Projection parameters.
///
/// Near and far are multiples of the focus distance so the depth range
/// follows the camera as it zooms in and out.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Intrinsics {
    fov_y: f32,
    default_fov_y: f32,
    aspect: f32,
    /// Near plane as a multiple of the focus distance.
    pub near_mul: f32,
    /// Far plane as a multiple of the focus distance.
    pub far_mul: f32,
    /// Orthographic instead of perspective projection.
    pub orthographic: bool,
}

impl Default for Intrinsics {
    fn default() -> Self {
        Self {
            fov_y: FRAC_PI_4,
            default_fov_y: FRAC_PI_4,
            aspect: 1.0,
            near_mul: 0.01,
            far_mul: 100.0,
            orthographic: false,
        }
    }
}

impl Intrinsics {
    /// Create intrinsics with the given vertical FOV as both the current
    /// and the default FOV.
    pub fn new(fov_y: f32, aspect: f32) -> Result<Self, NavError> {
        let fov_y = validate_fov(fov_y)?;
        let aspect = validate_aspect(aspect)?;
        Ok(Self {
            fov_y,
            default_fov_y: fov_y,
            aspect,
            ..Self::default()
        })
    }

    /// Vertical field of view in radians.
    #[must_use]
    pub fn fov_y(&self) -> f32 {
        self.fov_y
    }

    /// Horizontal field of view in radians.
    #[must_use]
    pub fn fov_x(&self) -> f32 {
        fov_x_from_fov_y(self.fov_y, self.aspect)
    }

    /// The FOV that corresponds to a zoom of 1.
    #[must_use]
    pub fn default_fov_y(&self) -> f32 {
        self.default_fov_y
    }

    /// Width / height.
    #[must_use]
    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    /// Set the vertical FOV. Rejects values outside `(0, π)`.
    pub fn set_fov_y(&mut self, fov_y: f32) -> Result<(), NavError> {
        self.fov_y = validate_fov(fov_y)?;
        Ok(())
    }

    /// Set the horizontal FOV; the vertical FOV is re-derived from the
    /// current aspect.
    pub fn set_fov_x(&mut self, fov_x: f32) -> Result<(), NavError> {
        let fov_x = validate_fov(fov_x)?;
        self.fov_y = validate_fov(fov_y_from_fov_x(fov_x, self.aspect))?;
        Ok(())
    }

    /// Set the FOV reported as zoom 1.
    pub fn set_default_fov_y(&mut self, fov_y: f32) -> Result<(), NavError> {
        self.default_fov_y = validate_fov(fov_y)?;
        Ok(())
    }

    /// Set the aspect ratio. Rejects non-positive or non-finite values.
    pub fn set_aspect(&mut self, aspect: f32) -> Result<(), NavError> {
        self.aspect = validate_aspect(aspect)?;
        Ok(())
    }

    pub(crate) fn set_fov_y_clamped(&mut self, fov_y: f32) {
        self.fov_y = clamp_fov(fov_y);
    }

    /// Smallest focus distance that keeps `|far − near|` above the float
    /// minimum.
    #[must_use]
    pub fn focus_dist_min(&self) -> f32 {
        let span = (self.far_mul - self.near_mul).abs().max(f32::EPSILON);
        FOCUS_DIST_MARGIN * f32::MIN_POSITIVE / span
    }

    /// Largest focus distance that keeps `near * far` below the float
    /// maximum.
    #[must_use]
    pub fn focus_dist_max(&self) -> f32 {
        let product = (self.near_mul * self.far_mul).abs().max(f32::EPSILON);
        (f32::MAX / product).sqrt() / FOCUS_DIST_MARGIN
    }

    /// Clamp a focus distance into `[focus_dist_min, focus_dist_max]`.
    #[must_use]
    pub fn clamp_focus_dist(&self, dist: f32) -> f32 {
        if dist.is_nan() {
            return self.focus_dist_min();
        }
        dist.clamp(self.focus_dist_min(), self.focus_dist_max())
    }
}

/// Everything a viewport needs to know about its camera: pose,
/// projection, focus model and the dirty flag read by the renderer.
///
/// Gesture bookkeeping lives outside, in
/// [`GestureBaseline`](crate::nav::GestureBaseline).
#[derive(Debug, Clone, PartialEq)]
pub struct CameraState {
    pub(crate) pose: Pose,
    pub(crate) intrinsics: Intrinsics,
    pub(crate) focus_dist: f32,
    pub(crate) align: Vec3,
    pub(crate) moved: bool,
}

impl Default for CameraState {
    fn default() -> Self {
        Self {
            pose: Pose::IDENTITY,
            intrinsics: Intrinsics::default(),
            focus_dist: 1.0,
            align: Vec3::ZERO,
            moved: true,
        }
    }
}

impl CameraState {
    /// Create a camera from a pose, intrinsics and focus distance. The
    /// focus distance is clamped into its valid range.
    #[must_use]
    pub fn new(pose: Pose, intrinsics: Intrinsics, focus_dist: f32) -> Self {
        let mut pose = pose;
        pose.orthonormalize();
        Self {
            pose,
            focus_dist: intrinsics.clamp_focus_dist(focus_dist),
            intrinsics,
            ..Self::default()
        }
    }

    /// Current pose.
    #[must_use]
    pub fn pose(&self) -> &Pose {
        &self.pose
    }

    /// Current projection parameters.
    #[must_use]
    pub fn intrinsics(&self) -> &Intrinsics {
        &self.intrinsics
    }

    /// Camera-to-world matrix.
    #[must_use]
    pub fn camera_to_world(&self) -> Mat4 {
        self.pose.camera_to_world()
    }

    /// World-to-camera (view) matrix.
    #[must_use]
    pub fn world_to_camera(&self) -> Mat4 {
        self.pose.world_to_camera()
    }

    /// Replace the pose. The basis is re-orthonormalized.
    pub fn set_camera_to_world(&mut self, camera_to_world: Mat4) {
        self.pose = Pose { camera_to_world };
        self.pose.orthonormalize();
        self.moved = true;
    }

    /// Eye position.
    #[must_use]
    pub fn position(&self) -> Vec3 {
        self.pose.position()
    }

    /// Distance from the eye to the focus point.
    #[must_use]
    pub fn focus_dist(&self) -> f32 {
        self.focus_dist
    }

    /// Set the focus distance, keeping the eye where it is. The value is
    /// clamped into its valid range.
    pub fn set_focus_dist(&mut self, dist: f32) {
        self.focus_dist = self.intrinsics.clamp_focus_dist(dist);
        self.moved = true;
    }

    /// Lower focus distance bound.
    #[must_use]
    pub fn focus_dist_min(&self) -> f32 {
        self.intrinsics.focus_dist_min()
    }

    /// Upper focus distance bound.
    #[must_use]
    pub fn focus_dist_max(&self) -> f32 {
        self.intrinsics.focus_dist_max()
    }

    /// Point ahead of the camera at the focus distance.
    #[must_use]
    pub fn focus_point(&self) -> Vec3 {
        self.pose.position() - self.focus_dist * self.pose.z_axis()
    }

    /// World axis the camera keeps "up" aligned with, or zero if free.
    #[must_use]
    pub fn align(&self) -> Vec3 {
        self.align
    }

    /// Vertical field of view in radians.
    #[must_use]
    pub fn fov_y(&self) -> f32 {
        self.intrinsics.fov_y()
    }

    /// Horizontal field of view in radians.
    #[must_use]
    pub fn fov_x(&self) -> f32 {
        self.intrinsics.fov_x()
    }

    /// Set the vertical FOV. State is unchanged on error.
    pub fn set_fov_y(&mut self, fov_y: f32) -> Result<(), NavError> {
        self.intrinsics.set_fov_y(fov_y).inspect_err(|e| {
            log::warn!("rejected vertical FOV: {e}");
        })?;
        self.moved = true;
        Ok(())
    }

    /// Set the horizontal FOV. State is unchanged on error.
    pub fn set_fov_x(&mut self, fov_x: f32) -> Result<(), NavError> {
        self.intrinsics.set_fov_x(fov_x).inspect_err(|e| {
            log::warn!("rejected horizontal FOV: {e}");
        })?;
        self.moved = true;
        Ok(())
    }

    /// Width / height.
    #[must_use]
    pub fn aspect(&self) -> f32 {
        self.intrinsics.aspect()
    }

    /// Set the aspect ratio. State is unchanged on error.
    pub fn set_aspect(&mut self, aspect: f32) -> Result<(), NavError> {
        self.intrinsics.set_aspect(aspect).inspect_err(|e| {
            log::warn!("rejected aspect ratio: {e}");
        })?;
        self.moved = true;
        Ok(())
    }

    /// Switch between orthographic and perspective projection.
    pub fn set_orthographic(&mut self, orthographic: bool) {
        self.intrinsics.orthographic = orthographic;
        self.moved = true;
    }

    /// Whether the projection is orthographic.
    #[must_use]
    pub fn orthographic(&self) -> bool {
        self.intrinsics.orthographic
    }

    /// `default_fov_y / fov_y`; greater than 1 when zoomed in.
    #[must_use]
    pub fn zoom(&self) -> f32 {
        self.intrinsics.default_fov_y() / self.intrinsics.fov_y()
    }

    /// Whether the camera changed since the flag was last cleared.
    #[must_use]
    pub fn moved(&self) -> bool {
        self.moved
    }

    /// Read and clear the dirty flag.
    pub fn take_moved(&mut self) -> bool {
        std::mem::take(&mut self.moved)
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
/// GPU uniform block holding the view-projection matrix and camera metadata.
pub struct CameraUniform {
    /// Combined view-projection matrix.
    pub view_proj: [[f32; 4]; 4],
    /// Camera world-space position.
    pub position: [f32; 3],
    /// Viewport aspect ratio.
    pub aspect: f32,
    /// Camera view direction for lighting.
    pub forward: [f32; 3],
    /// Vertical field of view in radians.
    pub fov_y: f32,
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self::new()
    }
}

impl CameraUniform {
    /// Create a new camera uniform with identity view-projection.
    pub fn new() -> Self {
        Self {
            view_proj: Mat4::IDENTITY.to_cols_array_2d(),
            position: [0.0; 3],
            aspect: 1.0,
            forward: [0.0, 0.0, -1.0],
            fov_y: FRAC_PI_4,
        }
    }

    /// Update uniform fields from the given camera's current state.
    pub fn update_view_proj(&mut self, camera: &CameraState) {
        self.view_proj = camera.view_projection().to_cols_array_2d();
        self.position = camera.position().to_array();
        self.aspect = camera.aspect();
        self.forward = camera.pose().view_dir().to_array();
        self.fov_y = camera.fov_y();
    }
}
