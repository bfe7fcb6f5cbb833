use std::f32::consts::FRAC_PI_2;

use glam::{Quat, Vec3};

use crate::camera::{CameraState, Pose};

/// Views within this of parallel to the align axis count as parallel.
const PARALLEL_TOLERANCE: f32 = 1e-4;

/// Place the eye at `eye` looking at `target` with `up` as the up hint, and
/// set the focus distance to `|target − eye|` (clamped).
///
/// When `eye == target` the current view direction is kept. When `up` is
/// parallel to the view direction the current right axis is kept.
pub fn look_at(camera: &mut CameraState, eye: Vec3, target: Vec3, up: Vec3) {
    let z = (eye - target)
        .try_normalize()
        .unwrap_or_else(|| camera.pose.z_axis());
    let x = up
        .cross(z)
        .try_normalize()
        .or_else(|| {
            let right = camera.pose.x_axis();
            (right - z * right.dot(z)).try_normalize()
        })
        .unwrap_or_else(|| z.any_orthonormal_vector());
    let y = z.cross(x);

    camera.pose = Pose::from_axes(x, y, z, eye);
    camera.focus_dist = camera.intrinsics.clamp_focus_dist(eye.distance(target));
    camera.moved = true;
}

/// Rotate the camera by `angle` radians about the focus point.
///
/// The axis is the align axis if one is set, otherwise the camera's own up.
pub fn orbit(camera: &mut CameraState, angle: f32) {
    let axis = camera
        .align
        .try_normalize()
        .unwrap_or_else(|| camera.pose.y_axis());
    rotate_about_focus(camera, Quat::from_axis_angle(axis, angle));
}

/// Keep the camera's up consistent with `up_axis`, or free it when
/// `up_axis` is zero.
///
/// A camera looking straight along the axis is first tipped 90° about its
/// right axis so the look-at basis is well defined.
pub fn align(camera: &mut CameraState, up_axis: Vec3) {
    camera.align = up_axis;
    let Some(up) = up_axis.try_normalize() else {
        return;
    };
    if camera.pose.z_axis().dot(up).abs() > 1.0 - PARALLEL_TOLERANCE {
        let tip = Quat::from_axis_angle(camera.pose.x_axis(), FRAC_PI_2);
        rotate_about_focus(camera, tip);
    }
    let (eye, focus) = (camera.position(), camera.focus_point());
    look_at(camera, eye, focus, up);
}

fn rotate_about_focus(camera: &mut CameraState, rotation: Quat) {
    let focus = camera.focus_point();
    let position = focus + rotation * (camera.position() - focus);
    camera.pose =
        Pose::from_rotation_translation(rotation * camera.pose.rotation(), position);
    camera.pose.orthonormalize();
    camera.moved = true;
}
