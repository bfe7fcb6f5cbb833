//! Conversions between normalized screen space and world space, and the
//! projection matrices a renderer needs.
//!
//! Normalized screen space (NSS) has `x, y ∈ [-1, 1]` with `(-1, -1)` at
//! the bottom-left of the viewport. The `z` component of an NSS point is
//! the depth in front of the camera in world units.

use glam::{Mat4, Vec2, Vec3};

use super::core::{validate_fov, CameraState};
use super::frustum::{Frustum, FrustumDims};
use crate::error::NavError;

/// World-space ray through a point on the screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// Ray start.
    pub origin: Vec3,
    /// Unit direction.
    pub direction: Vec3,
}

/// Build an orthographic or perspective projection.
///
/// The orthographic view volume has height `2 * focus_dist * tan(fov_y/2)`
/// so switching modes keeps the focus plane the same size on screen.
/// Depth maps to `[0, 1]` (wgpu/Vulkan convention).
#[must_use]
pub fn camera_to_screen(
    near: f32,
    far: f32,
    aspect: f32,
    fov_y: f32,
    focus_dist: f32,
    orthographic: bool,
) -> Mat4 {
    if orthographic {
        let h = 2.0 * focus_dist * (0.5 * fov_y).tan();
        let w = h * aspect;
        Mat4::orthographic_rh(-0.5 * w, 0.5 * w, -0.5 * h, 0.5 * h, near, far)
    } else {
        Mat4::perspective_rh(fov_y, aspect, near, far)
    }
}

impl CameraState {
    /// Near plane distance.
    #[must_use]
    pub fn near(&self) -> f32 {
        self.intrinsics.near_mul * self.focus_dist
    }

    /// Far plane distance.
    #[must_use]
    pub fn far(&self) -> f32 {
        self.intrinsics.far_mul * self.focus_dist
    }

    /// Projection matrix for the current intrinsics and focus distance.
    #[must_use]
    pub fn camera_to_screen(&self) -> Mat4 {
        camera_to_screen(
            self.near(),
            self.far(),
            self.aspect(),
            self.fov_y(),
            self.focus_dist,
            self.orthographic(),
        )
    }

    /// Combined view-projection matrix.
    #[must_use]
    pub fn view_projection(&self) -> Mat4 {
        self.camera_to_screen() * self.world_to_camera()
    }

    /// World-space frustum planes for culling.
    #[must_use]
    pub fn frustum(&self) -> Frustum {
        Frustum::from_view_projection(self.view_projection())
    }

    /// Frustum in dimension form, with the cross-section measured at the
    /// focus plane.
    #[must_use]
    pub fn frustum_dims(&self) -> FrustumDims {
        let area = self.view_area(self.focus_dist);
        FrustumDims {
            width: area.x,
            height: area.y,
            depth: self.focus_dist,
            near: self.near(),
            far: self.far(),
            orthographic: self.orthographic(),
        }
    }

    /// Width and height of the visible region at `dist` in front of the
    /// camera. Orthographic cameras see the same area at every depth.
    #[must_use]
    pub fn view_area(&self, dist: f32) -> Vec2 {
        let dist = if self.orthographic() {
            self.focus_dist
        } else {
            dist
        };
        let h = 2.0 * dist * (0.5 * self.fov_y()).tan();
        Vec2::new(h * self.aspect(), h)
    }

    /// Half-extent scale for an NSS point at `depth`: world units per NSS
    /// unit horizontally and vertically.
    fn nss_scale(&self, depth: f32) -> Vec2 {
        0.5 * self.view_area(depth)
    }

    /// Camera-space position of an NSS point.
    pub(crate) fn nss_point_to_cs_point(&self, nss: Vec3) -> Vec3 {
        let scale = self.nss_scale(nss.z);
        Vec3::new(nss.x * scale.x, nss.y * scale.y, -nss.z)
    }

    /// World-space position of an NSS point at depth `nss.z`.
    #[must_use]
    pub fn nss_point_to_ws_point(&self, nss: Vec3) -> Vec3 {
        self.pose.to_world_point(self.nss_point_to_cs_point(nss))
    }

    /// NSS position (with depth) of a world-space point. Inverse of
    /// [`nss_point_to_ws_point`](Self::nss_point_to_ws_point) for points in
    /// front of the camera.
    #[must_use]
    pub fn ws_point_to_nss_point(&self, ws: Vec3) -> Vec3 {
        let cs = self.world_to_camera().transform_point3(ws);
        let depth = -cs.z;
        let scale = self.nss_scale(depth);
        Vec3::new(cs.x / scale.x, cs.y / scale.y, depth)
    }

    /// World-space ray through an NSS point.
    ///
    /// Perspective rays all start at the eye. Orthographic rays start on
    /// the camera plane and share the view direction.
    #[must_use]
    pub fn nss_point_to_ws_ray(&self, nss: Vec2) -> Ray {
        if self.orthographic() {
            let scale = self.nss_scale(self.focus_dist);
            let origin = self
                .pose
                .to_world_point((nss * scale).extend(0.0));
            Ray {
                origin,
                direction: self.pose.view_dir(),
            }
        } else {
            let through = self.nss_point_to_cs_point(nss.extend(1.0));
            Ray {
                origin: self.position(),
                direction: self.pose.to_world_dir(through).normalize(),
            }
        }
    }

    /// Re-balance the projection so the average of the horizontal and
    /// vertical FOV becomes `target_fov`, keeping the visible area at the
    /// focus point the same. The eye moves along the view axis and the
    /// focus point stays put.
    pub fn balance_fov(&mut self, target_fov: f32) -> Result<(), NavError> {
        let target_fov = validate_fov(target_fov)?;
        let focus = self.focus_point();
        let area = self.view_area(self.focus_dist);

        let size = 0.5 * (area.x + area.y);
        let d2 = self
            .intrinsics
            .clamp_focus_dist(0.5 * size / (0.5 * target_fov).tan());
        let fov_y = validate_fov(2.0 * (0.5 * area.y / d2).atan())?;

        self.intrinsics.set_fov_y(fov_y)?;
        self.focus_dist = d2;
        self.pose.set_position(focus + d2 * self.pose.z_axis());
        self.moved = true;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::FRAC_PI_2;

    use glam::{EulerRot, Quat};

    use super::*;
    use crate::camera::core::{Intrinsics, Pose};

    fn test_camera(orthographic: bool) -> CameraState {
        let pose = Pose::from_rotation_translation(
            Quat::from_euler(EulerRot::YXZ, 0.4, -0.3, 0.1),
            Vec3::new(2.0, 1.0, 6.0),
        );
        let mut intrinsics = Intrinsics::new(0.9, 1.6).unwrap();
        intrinsics.orthographic = orthographic;
        CameraState::new(pose, intrinsics, 4.0)
    }

    #[test]
    fn nss_world_round_trip() {
        for orthographic in [false, true] {
            let cam = test_camera(orthographic);
            for nss in [
                Vec3::new(0.0, 0.0, 4.0),
                Vec3::new(-1.0, -1.0, 0.5),
                Vec3::new(0.7, -0.2, 12.0),
                Vec3::new(1.0, 1.0, 100.0),
            ] {
                let back = cam.ws_point_to_nss_point(cam.nss_point_to_ws_point(nss));
                assert!(
                    back.abs_diff_eq(nss, 1e-3),
                    "ortho={orthographic}: {nss} -> {back}"
                );
            }
        }
    }

    #[test]
    fn nss_centre_at_focus_depth_is_focus_point() {
        let cam = test_camera(false);
        let p = cam.nss_point_to_ws_point(Vec3::new(0.0, 0.0, cam.focus_dist()));
        assert!(p.abs_diff_eq(cam.focus_point(), 1e-4));
    }

    #[test]
    fn perspective_rays_share_origin() {
        let cam = test_camera(false);
        let a = cam.nss_point_to_ws_ray(Vec2::new(-0.5, 0.2));
        let b = cam.nss_point_to_ws_ray(Vec2::new(0.9, -0.9));
        assert_eq!(a.origin, cam.position());
        assert_eq!(b.origin, cam.position());
        assert!(!a.direction.abs_diff_eq(b.direction, 1e-3));
        let centre = cam.nss_point_to_ws_ray(Vec2::ZERO);
        assert!(centre.direction.abs_diff_eq(cam.pose().view_dir(), 1e-5));
    }

    #[test]
    fn orthographic_rays_share_direction() {
        let cam = test_camera(true);
        let a = cam.nss_point_to_ws_ray(Vec2::new(-0.5, 0.2));
        let b = cam.nss_point_to_ws_ray(Vec2::new(0.9, -0.9));
        assert_eq!(a.direction, cam.pose().view_dir());
        assert_eq!(b.direction, cam.pose().view_dir());
        assert!(!a.origin.abs_diff_eq(b.origin, 1e-3));
    }

    #[test]
    fn ray_passes_through_projected_point() {
        for orthographic in [false, true] {
            let cam = test_camera(orthographic);
            let nss = Vec2::new(0.3, -0.6);
            let ray = cam.nss_point_to_ws_ray(nss);
            let target = cam.nss_point_to_ws_point(nss.extend(3.0));
            let to_target = (target - ray.origin).normalize();
            assert!(to_target.abs_diff_eq(ray.direction, 1e-4));
        }
    }

    #[test]
    fn orthographic_projection_spans_focus_plane() {
        let cam = test_camera(true);
        let area = cam.view_area(cam.focus_dist());
        let corner = Vec3::new(0.5 * area.x, 0.5 * area.y, -cam.focus_dist());
        let clip = cam.camera_to_screen().project_point3(corner);
        assert!((clip.x - 1.0).abs() < 1e-4);
        assert!((clip.y - 1.0).abs() < 1e-4);
    }

    #[test]
    fn perspective_projection_matches_nss() {
        let cam = test_camera(false);
        let nss = Vec3::new(0.25, -0.75, 4.0);
        let ws = cam.nss_point_to_ws_point(nss);
        let clip = cam.view_projection().project_point3(ws);
        assert!((clip.x - nss.x).abs() < 1e-4);
        assert!((clip.y - nss.y).abs() < 1e-4);
    }

    #[test]
    fn frustum_contains_focus_point() {
        let cam = test_camera(false);
        let frustum = cam.frustum();
        assert!(frustum.contains_point(cam.focus_point()));
        assert!(!frustum.contains_point(cam.position() + cam.pose().z_axis()));
        let dims = cam.frustum_dims();
        assert!((dims.width / dims.height - cam.aspect()).abs() < 1e-5);
    }

    #[test]
    fn balance_fov_square_viewport_hits_target() {
        let mut cam = CameraState::default();
        cam.set_focus_dist(3.0);
        let focus = cam.focus_point();
        cam.balance_fov(FRAC_PI_2).unwrap();
        assert!((cam.fov_y() - FRAC_PI_2).abs() < 1e-5);
        assert!(cam.focus_point().abs_diff_eq(focus, 1e-4));
    }

    #[test]
    fn balance_fov_keeps_visible_area() {
        let mut cam = test_camera(false);
        let area = cam.view_area(cam.focus_dist());
        let focus = cam.focus_point();
        cam.balance_fov(0.6).unwrap();
        let after = cam.view_area(cam.focus_dist());
        assert!(after.abs_diff_eq(area, 1e-3));
        assert!(cam.focus_point().abs_diff_eq(focus, 1e-3));
        let size = 0.5 * (area.x + area.y);
        let expected = 0.5 * size / 0.3_f32.tan();
        assert!((cam.focus_dist() - expected).abs() < 1e-3);
    }

    #[test]
    fn balance_fov_rejects_invalid_target() {
        let mut cam = test_camera(false);
        let before = cam.clone();
        assert!(matches!(cam.balance_fov(0.0), Err(NavError::InvalidFov(_))));
        assert_eq!(cam, before);
    }
}
