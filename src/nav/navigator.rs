use std::f32::consts::{PI, TAU};

use glam::{Vec2, Vec3};

use super::baseline::{GestureBaseline, NavOps};
use super::locks::LockMask;
use super::ops::{self, NavContext};
use super::orbit;
use super::view_fit::{self, BoundingBox};
use crate::camera::CameraState;
use crate::error::NavError;
use crate::input::{KeyBindings, KeyState, NavKey};
use crate::options::{NavOptions, Options};

/// Drives one viewport's camera from pointer, wheel and keyboard input.
///
/// Owns the camera together with the gesture baseline every drag is
/// measured against. Key state is passed into each call, so the navigator
/// never polls the platform.
#[derive(Debug, Clone)]
pub struct Navigator {
    camera: CameraState,
    baseline: GestureBaseline,
    locks: LockMask,
    bindings: KeyBindings,
    tuning: NavOptions,
}

impl Navigator {
    /// Navigator over `camera` with default bindings, no locks and default
    /// tuning.
    #[must_use]
    pub fn new(camera: CameraState) -> Self {
        let baseline = GestureBaseline::new(&camera);
        Self {
            camera,
            baseline,
            locks: LockMask::empty(),
            bindings: KeyBindings::default(),
            tuning: NavOptions::default(),
        }
    }

    /// Navigator configured from loaded options. Fails if the navigation
    /// constants are out of range.
    pub fn from_options(options: &Options) -> Result<Self, NavError> {
        let nav = &options.navigation;
        nav.validate()?;
        let camera = options.camera.build_camera()?;
        log::debug!(
            "navigator: preset {:?}, locks {:?}",
            nav.key_preset,
            nav.locks
        );
        Ok(Self {
            baseline: GestureBaseline::new(&camera),
            camera,
            locks: nav.locks,
            bindings: KeyBindings::from_preset(nav.key_preset),
            tuning: nav.clone(),
        })
    }

    /// The live camera.
    #[must_use]
    pub fn camera(&self) -> &CameraState {
        &self.camera
    }

    /// Mutable access to the live camera (resize, FOV setters, ...).
    pub fn camera_mut(&mut self) -> &mut CameraState {
        &mut self.camera
    }

    /// Snapshot drag deltas are measured from.
    #[must_use]
    pub fn baseline(&self) -> &GestureBaseline {
        &self.baseline
    }

    /// Active motion locks.
    #[must_use]
    pub fn locks(&self) -> LockMask {
        self.locks
    }

    /// Replace the motion locks.
    pub fn set_locks(&mut self, locks: LockMask) {
        self.locks = locks;
    }

    /// Logical → physical key table.
    #[must_use]
    pub fn bindings(&self) -> &KeyBindings {
        &self.bindings
    }

    /// Replace the key table.
    pub fn set_bindings(&mut self, bindings: KeyBindings) {
        self.bindings = bindings;
    }

    /// Feel constants.
    #[must_use]
    pub fn tuning(&self) -> &NavOptions {
        &self.tuning
    }

    /// Fold the live camera into the baseline.
    pub fn commit(&mut self) {
        self.baseline.commit(&mut self.camera);
    }

    /// Discard uncommitted motion.
    pub fn revert(&mut self) {
        self.baseline.revert(&mut self.camera);
    }

    fn split<'a>(
        &'a mut self,
        keys: &'a dyn KeyState,
    ) -> (&'a mut CameraState, &'a GestureBaseline, NavContext<'a>) {
        let ctx = NavContext {
            locks: self.locks,
            bindings: &self.bindings,
            keys,
            tuning: &self.tuning,
        };
        (&mut self.camera, &self.baseline, ctx)
    }

    fn finish(&mut self, moved: bool, commit: bool) -> bool {
        if commit {
            self.commit();
        }
        moved
    }

    /// Pointer drag. `point` is in NSS, `requested` the operations asked
    /// for by the held buttons, and `is_reference_sample` is true on button
    /// press/release.
    ///
    /// A reference sample, or a change in the accuracy modifiers, re-anchors
    /// the active operations at `point` and commits. Returns whether the
    /// camera moved.
    pub fn mouse_control(
        &mut self,
        point: Vec2,
        requested: NavOps,
        is_reference_sample: bool,
        keys: &dyn KeyState,
    ) -> bool {
        let mode = self.bindings.accuracy_mode(keys);
        if is_reference_sample || mode != self.baseline.accuracy_mode() {
            self.baseline.set_reference(requested, point);
            self.baseline.set_accuracy_mode(mode);
            self.commit();
            log::debug!("re-anchored {requested:?} at {point} (accuracy {mode})");
        }

        let roll_zone = self.tuning.roll_zone_radius;
        let dolly_per_unit = self.tuning.drag_dolly_scale * self.tuning.dolly_unit;
        let (camera, baseline, ctx) = self.split(keys);

        let ambiguous = requested.contains(NavOps::TRANSLATE | NavOps::ROTATE);
        if requested.contains(NavOps::ZOOM) || ambiguous {
            let zref = baseline.zoom_ref();
            if ctx.is_down(NavKey::TranslateZ) {
                let dz = (point.y - zref.y) * dolly_per_unit * baseline.focus_dist();
                ops::translate(camera, baseline, &ctx, Vec3::new(0.0, 0.0, -dz))
            } else {
                ops::zoom(camera, baseline, &ctx, zref.y - point.y)
            }
        } else if requested.contains(NavOps::TRANSLATE) {
            let tan_half = (0.5 * baseline.fov_y()).tan();
            let scale = baseline.focus_dist()
                * tan_half
                * Vec2::new(camera.aspect(), 1.0);
            let pan = (baseline.translate_ref() - point) * scale;
            ops::translate(camera, baseline, &ctx, pan.extend(0.0))
        } else if requested.contains(NavOps::ROTATE) {
            let rref = baseline.rotate_ref();
            let angles = if rref.length() < roll_zone {
                Vec3::new(
                    (point.y - rref.y) * TAU / 4.0,
                    (rref.x - point.x) * TAU / 4.0,
                    0.0,
                )
            } else {
                let roll = wrap_angle(rref.y.atan2(rref.x) - point.y.atan2(point.x));
                Vec3::new(0.0, 0.0, roll)
            };
            ops::rotate(camera, baseline, &ctx, angles)
        } else {
            false
        }
    }

    /// Wheel dolly by `wheel_delta` (notches × the wheel notch size), along
    /// the pointer ray through `point` or straight ahead.
    pub fn mouse_control_z(
        &mut self,
        point: Vec2,
        wheel_delta: f32,
        along_ray: bool,
        commit: bool,
        keys: &dyn KeyState,
    ) -> bool {
        let (camera, baseline, ctx) = self.split(keys);
        let moved = ops::dolly(camera, baseline, &ctx, point, wheel_delta, along_ray);
        self.finish(moved, commit)
    }

    /// One keyboard navigation step.
    ///
    /// With the rotate key held, forward/backward pitch, left/right yaw and
    /// up/down dolly along the view axis. Otherwise every direction key
    /// translates along the matching camera axis. A step that both rotates
    /// and dollies dollies along the rotated view axis; neither part reaches
    /// the baseline unless `commit` is set.
    pub fn kb_nav(
        &mut self,
        linear: f32,
        angular: f32,
        commit: bool,
        keys: &dyn KeyState,
    ) -> bool {
        let axis = |pos: NavKey, neg: NavKey| {
            f32::from(u8::from(self.bindings.is_down(pos, keys)))
                - f32::from(u8::from(self.bindings.is_down(neg, keys)))
        };
        let lr = axis(NavKey::Right, NavKey::Left);
        let fb = axis(NavKey::Forward, NavKey::Backward);
        let ud = axis(NavKey::Up, NavKey::Down);
        let rotating = self.bindings.is_down(NavKey::Rotate, keys);

        let mut moved = false;
        if rotating {
            let turning = fb != 0.0 || lr != 0.0;
            if turning {
                let (camera, baseline, ctx) = self.split(keys);
                moved |= ops::rotate(
                    camera,
                    baseline,
                    &ctx,
                    Vec3::new(fb * angular, -lr * angular, 0.0),
                );
            }
            if ud != 0.0 {
                // Dolly from the rotated pose without folding it into the
                // navigator's baseline.
                let mut staged = self.baseline.clone();
                if turning {
                    staged.commit(&mut self.camera);
                }
                let ctx = NavContext {
                    locks: self.locks,
                    bindings: &self.bindings,
                    keys,
                    tuning: &self.tuning,
                };
                moved |= ops::translate(
                    &mut self.camera,
                    &staged,
                    &ctx,
                    Vec3::new(0.0, 0.0, -ud * linear),
                );
            }
        } else if lr != 0.0 || fb != 0.0 || ud != 0.0 {
            let (camera, baseline, ctx) = self.split(keys);
            moved = ops::translate(
                camera,
                baseline,
                &ctx,
                Vec3::new(lr * linear, ud * linear, -fb * linear),
            );
        }
        self.finish(moved, commit)
    }

    /// Move by `delta` in the baseline camera frame.
    pub fn translate(&mut self, delta: Vec3, commit: bool, keys: &dyn KeyState) -> bool {
        let (camera, baseline, ctx) = self.split(keys);
        let moved = ops::translate(camera, baseline, &ctx, delta);
        self.finish(moved, commit)
    }

    /// Rotate about the baseline focus point by `(pitch, yaw, roll)`.
    pub fn rotate(&mut self, angles: Vec3, commit: bool, keys: &dyn KeyState) -> bool {
        let (camera, baseline, ctx) = self.split(keys);
        let moved = ops::rotate(camera, baseline, &ctx, angles);
        self.finish(moved, commit)
    }

    /// Scale the baseline FOV by `1 + delta`.
    pub fn zoom(&mut self, delta: f32, commit: bool, keys: &dyn KeyState) -> bool {
        let (camera, baseline, ctx) = self.split(keys);
        let moved = ops::zoom(camera, baseline, &ctx, delta);
        self.finish(moved, commit)
    }

    /// Place the eye at `eye` looking at `target`.
    pub fn look_at(&mut self, eye: Vec3, target: Vec3, up: Vec3, commit: bool) {
        orbit::look_at(&mut self.camera, eye, target, up);
        let _ = self.finish(true, commit);
    }

    /// Rotate about the focus point by `angle` radians.
    pub fn orbit(&mut self, angle: f32, commit: bool) {
        orbit::orbit(&mut self.camera, angle);
        let _ = self.finish(true, commit);
    }

    /// Keep the camera's up aligned with `up_axis`; zero frees it.
    pub fn align(&mut self, up_axis: Vec3, commit: bool) {
        orbit::align(&mut self.camera, up_axis);
        let _ = self.finish(true, commit);
    }

    /// Frame a bounding box. See [`view_fit::view_bbox`].
    pub fn view_bbox(
        &mut self,
        bbox: &BoundingBox,
        forward: Vec3,
        up: Vec3,
        focus_dist: Option<f32>,
        preserve_aspect: bool,
        commit: bool,
    ) -> Result<(), NavError> {
        view_fit::view_bbox(&mut self.camera, bbox, forward, up, focus_dist, preserve_aspect)?;
        let _ = self.finish(true, commit);
        Ok(())
    }

    /// Frame an exact rectangle. See [`view_fit::view_rect`].
    pub fn view_rect(
        &mut self,
        width: f32,
        height: f32,
        focus_dist: Option<f32>,
        commit: bool,
    ) -> Result<(), NavError> {
        view_fit::view_rect(&mut self.camera, width, height, focus_dist)?;
        let _ = self.finish(true, commit);
        Ok(())
    }
}

/// Wrap an angle into `(-π, π]`.
fn wrap_angle(angle: f32) -> f32 {
    let angle = angle.rem_euclid(TAU);
    if angle > PI {
        angle - TAU
    } else {
        angle
    }
}
