use bitflags::bitflags;
use glam::{Vec2, Vec3};

use crate::camera::{CameraState, Pose};

bitflags! {
    /// Navigation operations requested by the held mouse buttons.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct NavOps: u8 {
        /// Pan in the camera plane.
        const TRANSLATE = 1 << 0;
        /// Rotate about the focus point.
        const ROTATE = 1 << 1;
        /// Change the field of view (or dolly with the translate-Z key).
        const ZOOM = 1 << 2;
    }
}

/// Snapshot of the camera taken when a gesture starts, plus the screen
/// positions every drag delta is measured from.
///
/// Mutators compute the new camera from this snapshot rather than from the
/// live state, so a drag never accumulates rounding error and can be
/// abandoned with [`revert`](Self::revert).
#[derive(Debug, Clone, PartialEq)]
pub struct GestureBaseline {
    pose: Pose,
    fov_y: f32,
    focus_dist: f32,
    translate_ref: Vec2,
    rotate_ref: Vec2,
    zoom_ref: Vec2,
    accuracy_mode: u8,
}

impl GestureBaseline {
    /// Snapshot the camera as it is now.
    #[must_use]
    pub fn new(camera: &CameraState) -> Self {
        Self {
            pose: camera.pose,
            fov_y: camera.fov_y(),
            focus_dist: camera.focus_dist,
            translate_ref: Vec2::ZERO,
            rotate_ref: Vec2::ZERO,
            zoom_ref: Vec2::ZERO,
            accuracy_mode: 0,
        }
    }

    /// Fold the live camera into the baseline. The live pose is
    /// re-orthonormalized first.
    pub fn commit(&mut self, camera: &mut CameraState) {
        camera.pose.orthonormalize();
        self.pose = camera.pose;
        self.fov_y = camera.fov_y();
        self.focus_dist = camera.focus_dist;
    }

    /// Restore the camera to the last committed baseline.
    pub fn revert(&self, camera: &mut CameraState) {
        camera.pose = self.pose;
        camera.intrinsics.set_fov_y_clamped(self.fov_y);
        camera.focus_dist = self.focus_dist;
        camera.moved = true;
        log::debug!("gesture reverted to baseline");
    }

    /// Pose at the last commit.
    #[must_use]
    pub fn pose(&self) -> &Pose {
        &self.pose
    }

    /// Vertical FOV at the last commit.
    #[must_use]
    pub fn fov_y(&self) -> f32 {
        self.fov_y
    }

    /// Focus distance at the last commit.
    #[must_use]
    pub fn focus_dist(&self) -> f32 {
        self.focus_dist
    }

    /// Focus point at the last commit.
    #[must_use]
    pub fn focus_point(&self) -> Vec3 {
        self.pose.position() - self.focus_dist * self.pose.z_axis()
    }

    /// NSS point translation deltas are measured from.
    #[must_use]
    pub fn translate_ref(&self) -> Vec2 {
        self.translate_ref
    }

    /// NSS point rotation deltas are measured from.
    #[must_use]
    pub fn rotate_ref(&self) -> Vec2 {
        self.rotate_ref
    }

    /// NSS point zoom deltas are measured from.
    #[must_use]
    pub fn zoom_ref(&self) -> Vec2 {
        self.zoom_ref
    }

    /// Accuracy mode seen on the previous pointer sample.
    #[must_use]
    pub fn accuracy_mode(&self) -> u8 {
        self.accuracy_mode
    }

    pub(crate) fn set_accuracy_mode(&mut self, mode: u8) {
        self.accuracy_mode = mode;
    }

    /// Anchor the reference point of every operation in `ops` at `point`.
    /// Translate + rotate together behaves as zoom, so it anchors the zoom
    /// reference as well.
    pub(crate) fn set_reference(&mut self, ops: NavOps, point: Vec2) {
        if ops.contains(NavOps::TRANSLATE) {
            self.translate_ref = point;
        }
        if ops.contains(NavOps::ROTATE) {
            self.rotate_ref = point;
        }
        if ops.contains(NavOps::ZOOM)
            || ops.contains(NavOps::TRANSLATE | NavOps::ROTATE)
        {
            self.zoom_ref = point;
        }
    }
}
