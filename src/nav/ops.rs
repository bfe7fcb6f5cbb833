//! Camera mutators.
//!
//! Each mutator rebuilds the live camera from the gesture baseline plus a
//! delta, so repeated calls within one gesture replace each other rather
//! than accumulate. Locks and accuracy scaling are applied here, once per
//! call.

use glam::{EulerRot, Quat, Vec2, Vec3};

use super::baseline::GestureBaseline;
use super::locks::LockMask;
use super::orbit;
use crate::camera::{CameraState, Pose};
use crate::input::{KeyBindings, KeyState, NavKey};
use crate::options::NavOptions;

/// Everything a mutator reads besides the camera and baseline.
#[derive(Clone, Copy)]
pub struct NavContext<'a> {
    /// Active motion locks.
    pub locks: LockMask,
    /// Logical → physical key table.
    pub bindings: &'a KeyBindings,
    /// Which physical keys are held right now.
    pub keys: &'a dyn KeyState,
    /// Feel constants.
    pub tuning: &'a NavOptions,
}

impl NavContext<'_> {
    /// Whether the key bound to `action` is held.
    #[must_use]
    pub fn is_down(&self, action: NavKey) -> bool {
        self.bindings.is_down(action, self.keys)
    }

    /// Number of accuracy modifiers held.
    #[must_use]
    pub fn accuracy_mode(&self) -> u8 {
        self.bindings.accuracy_mode(self.keys)
    }

    /// Motion scale for the held accuracy modifiers.
    #[must_use]
    pub fn accuracy_scale(&self) -> f32 {
        self.tuning.accuracy_factor(self.accuracy_mode())
    }
}

/// Move the camera by `delta` in the baseline's camera frame. The focus
/// point moves with the camera. Returns whether the camera changed.
pub fn translate(
    camera: &mut CameraState,
    baseline: &GestureBaseline,
    ctx: &NavContext<'_>,
    delta: Vec3,
) -> bool {
    let delta = ctx.locks.mask_camera_translation(delta) * ctx.accuracy_scale();
    let base = baseline.pose();
    let proposed = base.position() + base.to_world_dir(delta);
    let before = camera.clone();

    camera.pose = *base;
    camera
        .pose
        .set_position(ctx.locks.snap_world_position(proposed, base.position()));
    camera.focus_dist = baseline.focus_dist();
    log::trace!("translate {delta}");
    settle(camera, &before)
}

/// Rotate the camera about the baseline focus point by camera-space
/// `(pitch, yaw, roll)` radians.
pub fn rotate(
    camera: &mut CameraState,
    baseline: &GestureBaseline,
    ctx: &NavContext<'_>,
    angles: Vec3,
) -> bool {
    let angles = ctx.locks.mask_camera_rotation(angles) * ctx.accuracy_scale();
    let before = camera.clone();
    let base_rot = baseline.pose().rotation();
    let mut rot =
        base_rot * Quat::from_euler(EulerRot::YXZ, angles.y, angles.x, angles.z);

    if !ctx.locks.camera_relative() && ctx.locks.intersects(LockMask::ROTATION) {
        let (x, y, z) = (rot * base_rot.inverse()).to_euler(EulerRot::XYZ);
        let free = ctx.locks.mask_world_rotation(Vec3::new(x, y, z));
        rot = Quat::from_euler(EulerRot::XYZ, free.x, free.y, free.z) * base_rot;
    }

    let focus = baseline.focus_point();
    let dist = baseline.focus_dist();
    camera.pose = Pose::from_rotation_translation(rot, focus + dist * (rot * Vec3::Z));
    camera.pose.orthonormalize();
    camera.focus_dist = dist;
    let (eye, align) = (camera.position(), camera.align);
    if align != Vec3::ZERO {
        orbit::look_at(camera, eye, focus, align);
    }
    log::trace!("rotate {angles}");
    settle(camera, &before)
}

/// Scale the baseline FOV by `1 + delta`. The result is clamped into
/// `(ε, π − ε)`. Vetoed by the zoom lock. Returns whether the FOV changed.
pub fn zoom(
    camera: &mut CameraState,
    baseline: &GestureBaseline,
    ctx: &NavContext<'_>,
    delta: f32,
) -> bool {
    if ctx.locks.contains(LockMask::ZOOM) {
        return false;
    }
    let delta = delta * ctx.accuracy_scale();
    let before = camera.clone();
    camera
        .intrinsics
        .set_fov_y_clamped((1.0 + delta) * baseline.fov_y());
    log::trace!("zoom {delta}");
    settle(camera, &before)
}

/// Wheel dolly. Moves `wheel_delta / wheel_notch * wheel_step` baseline
/// focus distances toward the scene, either along the view axis or along
/// the ray through `point` on the focus plane.
///
/// Without the translate-Z key the focus distance shrinks by the distance
/// travelled along the view axis, so the camera closes in on the focus
/// point instead of flying past it. Vetoed by the Z translation lock.
pub fn dolly(
    camera: &mut CameraState,
    baseline: &GestureBaseline,
    ctx: &NavContext<'_>,
    point: Vec2,
    wheel_delta: f32,
    along_ray: bool,
) -> bool {
    if ctx.locks.contains(LockMask::TRANS_Z) {
        return false;
    }
    let notches = wheel_delta / ctx.tuning.wheel_notch;
    let dist =
        notches * ctx.tuning.wheel_step * baseline.focus_dist() * ctx.accuracy_scale();

    let dir = if along_ray {
        camera
            .nss_point_to_cs_point(point.extend(baseline.focus_dist()))
            .normalize_or(Vec3::NEG_Z)
    } else {
        Vec3::NEG_Z
    };
    let mut offset = dir * dist;

    let mut focus_dist = baseline.focus_dist();
    if !ctx.is_down(NavKey::TranslateZ) {
        let advance = -offset.z;
        focus_dist = camera.intrinsics.clamp_focus_dist(baseline.focus_dist() - advance);
        let travelled = baseline.focus_dist() - focus_dist;
        if advance != 0.0 {
            offset *= travelled / advance;
        }
    }

    let base = baseline.pose();
    let proposed = base.position() + base.to_world_dir(offset);
    let before = camera.clone();
    camera.pose = *base;
    camera
        .pose
        .set_position(ctx.locks.snap_world_position(proposed, base.position()));
    camera.focus_dist = focus_dist;
    log::trace!("dolly {dist} along {dir}");
    settle(camera, &before)
}

/// Whether the camera differs from `before`; raises the dirty flag if so.
fn settle(camera: &mut CameraState, before: &CameraState) -> bool {
    let changed = camera.pose != before.pose
        || camera.focus_dist != before.focus_dist
        || camera.intrinsics.fov_y() != before.intrinsics.fov_y();
    camera.moved = before.moved || changed;
    changed
}

#[cfg(test)]
mod tests {
    use std::f32::consts::FRAC_PI_2;

    use super::*;
    use crate::input::KeyCode;

    fn setup() -> (CameraState, GestureBaseline) {
        let mut cam = CameraState::default();
        cam.set_camera_to_world(
            Pose::from_rotation_translation(
                Quat::from_euler(EulerRot::YXZ, 0.5, -0.2, 0.0),
                Vec3::new(1.0, 2.0, 3.0),
            )
            .camera_to_world(),
        );
        cam.set_focus_dist(5.0);
        let base = GestureBaseline::new(&cam);
        (cam, base)
    }

    fn no_keys(_: KeyCode) -> bool {
        false
    }

    fn ctx<'a>(
        locks: LockMask,
        keys: &'a dyn KeyState,
        bindings: &'a KeyBindings,
        tuning: &'a NavOptions,
    ) -> NavContext<'a> {
        NavContext {
            locks,
            bindings,
            keys,
            tuning,
        }
    }

    #[test]
    fn zero_deltas_keep_focus_point() {
        let (mut cam, base) = setup();
        let (bindings, tuning) = (KeyBindings::arrows(), NavOptions::default());
        let ctx = ctx(LockMask::empty(), &no_keys, &bindings, &tuning);
        let focus = cam.focus_point();

        let _ = rotate(&mut cam, &base, &ctx, Vec3::ZERO);
        assert!(cam.focus_point().abs_diff_eq(focus, 1e-4));
        let _ = translate(&mut cam, &base, &ctx, Vec3::ZERO);
        assert!(cam.focus_point().abs_diff_eq(focus, 1e-4));
        assert!(!zoom(&mut cam, &base, &ctx, 0.0));
        assert!(cam.focus_point().abs_diff_eq(focus, 1e-4));
        assert_eq!(cam.fov_y(), base.fov_y());
    }

    #[test]
    fn rotate_orbits_the_focus_point() {
        let (mut cam, base) = setup();
        let (bindings, tuning) = (KeyBindings::arrows(), NavOptions::default());
        let ctx = ctx(LockMask::empty(), &no_keys, &bindings, &tuning);
        let focus = cam.focus_point();
        assert!(rotate(&mut cam, &base, &ctx, Vec3::new(0.3, -0.8, 0.2)));
        assert!(cam.focus_point().abs_diff_eq(focus, 1e-4));
        assert!((cam.position().distance(focus) - 5.0).abs() < 1e-4);
    }

    #[test]
    fn world_trans_x_lock_keeps_position_x() {
        let (mut cam, base) = setup();
        let (bindings, tuning) = (KeyBindings::arrows(), NavOptions::default());
        let ctx = ctx(LockMask::TRANS_X, &no_keys, &bindings, &tuning);
        let x = cam.position().x;
        for delta in [Vec3::X, Vec3::new(-3.0, 1.0, 2.0), Vec3::new(7.0, 0.0, -4.0)] {
            assert!(translate(&mut cam, &base, &ctx, delta));
            assert_eq!(cam.position().x, x);
        }
    }

    #[test]
    fn camera_relative_lock_zeroes_input() {
        let (mut cam, base) = setup();
        let (bindings, tuning) = (KeyBindings::arrows(), NavOptions::default());
        let locks = LockMask::TRANS_X | LockMask::CAMERA_RELATIVE;
        let ctx = ctx(locks, &no_keys, &bindings, &tuning);
        assert!(!translate(&mut cam, &base, &ctx, Vec3::new(4.0, 0.0, 0.0)));
        assert!(cam.position().abs_diff_eq(base.pose().position(), 1e-6));
        assert!(translate(&mut cam, &base, &ctx, Vec3::new(4.0, 1.0, 0.0)));
        let moved = cam.position() - base.pose().position();
        assert!(moved.abs_diff_eq(base.pose().y_axis(), 1e-5));
    }

    #[test]
    fn world_rotation_lock_keeps_yaw() {
        let mut cam = CameraState::default();
        cam.set_focus_dist(2.0);
        let base = GestureBaseline::new(&cam);
        let (bindings, tuning) = (KeyBindings::arrows(), NavOptions::default());
        let ctx = ctx(LockMask::ROT_Y, &no_keys, &bindings, &tuning);
        let _ = rotate(&mut cam, &base, &ctx, Vec3::new(0.0, 0.7, 0.0));
        assert!(cam.pose().view_dir().abs_diff_eq(Vec3::NEG_Z, 1e-5));
        assert!(rotate(&mut cam, &base, &ctx, Vec3::new(0.4, 0.0, 0.0)));
        assert!(cam.pose().x_axis().abs_diff_eq(Vec3::X, 1e-5));
    }

    #[test]
    fn accuracy_modifiers_scale_motion() {
        let (mut cam, base) = setup();
        let (bindings, tuning) = (KeyBindings::arrows(), NavOptions::default());
        let shift = |k: KeyCode| k == KeyCode::SHIFT;
        let both = |k: KeyCode| k == KeyCode::SHIFT || k == KeyCode::SPACE;

        let one = ctx(LockMask::empty(), &shift, &bindings, &tuning);
        assert!(translate(&mut cam, &base, &one, Vec3::new(2.0, 0.0, 0.0)));
        let d1 = cam.position().distance(base.pose().position());
        assert!((d1 - 1.0).abs() < 1e-5);

        let two = ctx(LockMask::empty(), &both, &bindings, &tuning);
        assert!(zoom(&mut cam, &base, &two, 0.4));
        assert!((cam.fov_y() - 1.1 * base.fov_y()).abs() < 1e-6);
    }

    #[test]
    fn zoom_lock_vetoes() {
        let (mut cam, base) = setup();
        let (bindings, tuning) = (KeyBindings::arrows(), NavOptions::default());
        let ctx = ctx(LockMask::ZOOM, &no_keys, &bindings, &tuning);
        let fov = cam.fov_y();
        assert!(!zoom(&mut cam, &base, &ctx, -0.5));
        assert_eq!(cam.fov_y(), fov);
    }

    #[test]
    fn zoom_clamps_fov() {
        let (mut cam, base) = setup();
        let (bindings, tuning) = (KeyBindings::arrows(), NavOptions::default());
        let ctx = ctx(LockMask::empty(), &no_keys, &bindings, &tuning);
        assert!(zoom(&mut cam, &base, &ctx, -5.0));
        assert!(cam.fov_y() > 0.0);
        assert!(zoom(&mut cam, &base, &ctx, 50.0));
        assert!(cam.fov_y() < std::f32::consts::PI);
    }

    #[test]
    fn unchanged_camera_reports_no_motion() {
        let (mut cam, base) = setup();
        cam.moved = false;
        let (bindings, tuning) = (KeyBindings::arrows(), NavOptions::default());
        let ctx = ctx(LockMask::empty(), &no_keys, &bindings, &tuning);
        assert!(!translate(&mut cam, &base, &ctx, Vec3::ZERO));
        assert!(!zoom(&mut cam, &base, &ctx, 0.0));
        assert!(!cam.moved);

        // Returning to the baseline is still a change of the live camera.
        assert!(translate(&mut cam, &base, &ctx, Vec3::X));
        assert!(translate(&mut cam, &base, &ctx, Vec3::ZERO));
        assert!(!translate(&mut cam, &base, &ctx, Vec3::ZERO));
        assert!(cam.moved);
    }

    #[test]
    fn wheel_without_translate_z_closes_on_focus_point() {
        let (mut cam, base) = setup();
        let (bindings, tuning) = (KeyBindings::arrows(), NavOptions::default());
        let ctx = ctx(LockMask::empty(), &no_keys, &bindings, &tuning);
        let focus = cam.focus_point();
        assert!(dolly(&mut cam, &base, &ctx, Vec2::ZERO, 120.0, false));
        assert!((cam.focus_dist() - 4.5).abs() < 1e-5);
        assert!(cam.focus_point().abs_diff_eq(focus, 1e-4));
    }

    #[test]
    fn overdriven_wheel_stops_at_min_focus_dist() {
        let (mut cam, base) = setup();
        let (bindings, tuning) = (KeyBindings::arrows(), NavOptions::default());
        let ctx = ctx(LockMask::empty(), &no_keys, &bindings, &tuning);
        let focus = cam.focus_point();
        assert!(dolly(&mut cam, &base, &ctx, Vec2::ZERO, 120.0 * 1000.0, false));
        assert_eq!(cam.focus_dist(), cam.focus_dist_min());
        assert!((cam.position().distance(focus) - cam.focus_dist()).abs() < 1e-4);
        assert!(cam.focus_point().abs_diff_eq(focus, 1e-4));
        assert!(cam.position().is_finite());
    }

    #[test]
    fn wheel_along_ray_heads_for_pointer() {
        let (mut cam, base) = setup();
        let (bindings, tuning) = (KeyBindings::arrows(), NavOptions::default());
        let ctx = ctx(LockMask::empty(), &no_keys, &bindings, &tuning);
        let point = Vec2::new(0.5, -0.5);
        let target = cam.nss_point_to_ws_point(point.extend(cam.focus_dist()));
        let before = (target - cam.position()).normalize();
        assert!(dolly(&mut cam, &base, &ctx, point, 240.0, true));
        let step = (cam.position() - base.pose().position()).normalize();
        assert!(step.abs_diff_eq(before, 1e-4));
    }

    #[test]
    fn trans_z_lock_suppresses_wheel() {
        let (mut cam, base) = setup();
        let (bindings, tuning) = (KeyBindings::arrows(), NavOptions::default());
        for locks in [LockMask::TRANS_Z, LockMask::TRANS_Z | LockMask::CAMERA_RELATIVE] {
            let ctx = ctx(locks, &no_keys, &bindings, &tuning);
            let before = cam.clone();
            assert!(!dolly(&mut cam, &base, &ctx, Vec2::ZERO, 120.0, false));
            assert_eq!(cam, before);
        }
    }

    #[test]
    fn rotate_keeps_align_axis_up() {
        let mut cam = CameraState::default();
        cam.set_focus_dist(3.0);
        cam.align = Vec3::Y;
        let base = GestureBaseline::new(&cam);
        let (bindings, tuning) = (KeyBindings::arrows(), NavOptions::default());
        let ctx = ctx(LockMask::empty(), &no_keys, &bindings, &tuning);
        assert!(rotate(&mut cam, &base, &ctx, Vec3::new(0.3, FRAC_PI_2 * 0.5, 0.4)));
        assert!(cam.pose().x_axis().y.abs() < 1e-5);
        assert!(cam.pose().y_axis().y > 0.0);
    }
}
