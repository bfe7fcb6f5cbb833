//! Fit the camera to a bounding box or an exact rectangle.
//!
//! Degenerate boxes (a line seen end-on, a flat box seen edge-on) each get
//! their own fallback branch.

use glam::Vec3;

use super::orbit::look_at;
use crate::camera::core::{clamp_fov, validate_aspect, validate_fov};
use crate::camera::CameraState;
use crate::error::NavError;

/// Relative size below which a projected extent counts as collapsed.
const COLLAPSED: f32 = 1e-5;

/// Axis-aligned box as centre plus half-extents.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    /// Box centre.
    pub centre: Vec3,
    /// Half-extents along X, Y and Z.
    pub radius: Vec3,
}

impl BoundingBox {
    /// Box from its centre and half-extents.
    #[must_use]
    pub fn new(centre: Vec3, radius: Vec3) -> Self {
        Self { centre, radius }
    }

    /// Box spanning two corners.
    #[must_use]
    pub fn from_min_max(min: Vec3, max: Vec3) -> Self {
        Self {
            centre: 0.5 * (min + max),
            radius: 0.5 * (max - min),
        }
    }

    /// Finite with non-negative half-extents.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.centre.is_finite()
            && self.radius.is_finite()
            && self.radius.min_element() >= 0.0
    }

    /// All half-extents are zero.
    #[must_use]
    pub fn is_point(&self) -> bool {
        self.radius == Vec3::ZERO
    }

    /// Distance from the centre to the farthest face point along `dir`
    /// (a unit vector).
    #[must_use]
    pub fn support(&self, dir: Vec3) -> f32 {
        (self.radius * dir).abs().element_sum()
    }
}

/// Camera changes computed by a fit, applied only once all are known.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Fit {
    focus_dist: f32,
    fov_y: Option<f32>,
    aspect: Option<f32>,
}

/// Frame `bbox` looking along `forward` with `up` as the up hint.
///
/// `focus_dist` fixes the eye distance from the box centre; it is ignored
/// when absent or not beyond the box's near face. With `preserve_aspect`
/// the current aspect is kept and the FOV (given a distance) or the
/// distance (otherwise) is solved for. Without it the aspect is taken
/// from the box's projected width and height.
///
/// Fails with [`NavError::InvalidBounds`] for a non-finite or point-sized
/// box, leaving the camera untouched.
pub fn view_bbox(
    camera: &mut CameraState,
    bbox: &BoundingBox,
    forward: Vec3,
    up: Vec3,
    focus_dist: Option<f32>,
    preserve_aspect: bool,
) -> Result<(), NavError> {
    if !bbox.is_valid() || bbox.is_point() {
        log::warn!("refusing to fit view to degenerate bounds {bbox:?}");
        return Err(NavError::InvalidBounds);
    }
    let forward = forward
        .try_normalize()
        .unwrap_or_else(|| camera.pose.view_dir());

    // Distance from the box centre to its nearest face along the view axis.
    let sizez = bbox.support(forward);
    let requested = focus_dist.filter(|d| d.is_finite() && *d > sizez);

    let fit = if preserve_aspect {
        fit_preserving_aspect(camera, bbox, sizez, requested)
    } else {
        fit_exact(camera, bbox, forward, up, sizez, requested)
    };

    let aspect = fit.aspect.map(validate_aspect).transpose()?;
    let fov_y = fit.fov_y.map(validate_fov).transpose()?;
    if let Some(aspect) = aspect {
        camera.intrinsics.set_aspect(aspect)?;
    }
    if let Some(fov_y) = fov_y {
        camera.intrinsics.set_fov_y(fov_y)?;
    }
    let centre = bbox.centre;
    let dist = camera.intrinsics.clamp_focus_dist(fit.focus_dist);
    look_at(camera, centre - dist * forward, centre, up);
    log::debug!(
        "fit view to {bbox:?}: focus_dist {} fov_y {}",
        camera.focus_dist(),
        camera.fov_y()
    );
    Ok(())
}

/// Fit the projected radius of the box into the narrower FOV.
fn fit_preserving_aspect(
    camera: &CameraState,
    bbox: &BoundingBox,
    sizez: f32,
    requested: Option<f32>,
) -> Fit {
    let projected = (bbox.radius.length_squared() - sizez * sizez).max(0.0).sqrt();
    // A box seen end-on projects to almost nothing; frame its depth instead.
    let radius = if projected > COLLAPSED * bbox.radius.max_element() {
        projected
    } else {
        sizez
    };
    let aspect = camera.aspect();

    match requested {
        None => {
            let tan_half_min = (0.5 * camera.fov_y()).tan() * aspect.min(1.0);
            Fit {
                focus_dist: sizez + radius / tan_half_min,
                fov_y: None,
                aspect: None,
            }
        }
        Some(dist) => {
            let tan_half_min = radius / (dist - sizez);
            let tan_half_y = if aspect < 1.0 {
                tan_half_min / aspect
            } else {
                tan_half_min
            };
            Fit {
                focus_dist: dist,
                fov_y: Some(clamp_fov(2.0 * tan_half_y.atan())),
                aspect: None,
            }
        }
    }
}

/// Fit the exact projected rectangle of the box, choosing the aspect to
/// match it.
fn fit_exact(
    camera: &CameraState,
    bbox: &BoundingBox,
    forward: Vec3,
    up: Vec3,
    sizez: f32,
    requested: Option<f32>,
) -> Fit {
    let z = -forward;
    let x = up
        .cross(z)
        .try_normalize()
        .unwrap_or_else(|| z.any_orthonormal_vector());
    let y = z.cross(x);

    let mut width = 2.0 * bbox.support(x);
    let mut height = 2.0 * bbox.support(y);
    let collapsed = COLLAPSED * bbox.radius.max_element();
    match (width <= collapsed, height <= collapsed) {
        // A line along the view axis: square view sized by its depth.
        (true, true) => {
            width = 2.0 * sizez;
            height = 2.0 * sizez;
        }
        // Edge-on in X: square view sized by the height.
        (true, false) => width = height,
        // Edge-on in Y: square view sized by the width.
        (false, true) => height = width,
        (false, false) => {}
    }
    let aspect = width / height;

    match requested {
        Some(dist) => Fit {
            focus_dist: dist,
            fov_y: Some(clamp_fov(2.0 * (0.5 * height / (dist - sizez)).atan())),
            aspect: Some(aspect),
        },
        None => {
            let fov_y = camera.intrinsics.default_fov_y();
            let size = 0.5 * (width + height);
            Fit {
                focus_dist: sizez + 0.5 * size / (0.5 * fov_y).tan(),
                fov_y: Some(fov_y),
                aspect: Some(aspect),
            }
        }
    }
}

/// Fit an exact `width × height` rectangle at the focus plane.
///
/// The aspect becomes `width / height`. With `focus_dist` the FOV is
/// solved for that distance; otherwise the focus distance is solved for
/// the current FOV. The eye stays where it is.
pub fn view_rect(
    camera: &mut CameraState,
    width: f32,
    height: f32,
    focus_dist: Option<f32>,
) -> Result<(), NavError> {
    if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
        log::warn!("refusing to fit view to {width} x {height}");
        return Err(NavError::InvalidBounds);
    }
    let aspect = validate_aspect(width / height)?;
    let (fov_y, dist) = match focus_dist.filter(|d| d.is_finite() && *d > 0.0) {
        Some(dist) => (validate_fov(2.0 * (0.5 * height / dist).atan())?, dist),
        None => (camera.fov_y(), 0.5 * height / (0.5 * camera.fov_y()).tan()),
    };

    camera.intrinsics.set_aspect(aspect)?;
    camera.intrinsics.set_fov_y(fov_y)?;
    camera.set_focus_dist(dist);
    Ok(())
}
