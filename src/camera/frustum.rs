//! View frustum in plane form (for culling) and dimension form (for UI and
//! fit computations).

use glam::{Mat4, Vec3, Vec4};

/// A plane `n · p + d = 0` with a unit normal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    /// Unit normal pointing into the positive half-space.
    pub normal: Vec3,
    /// Signed distance from origin (`n · p + d = 0`).
    pub distance: f32,
}

impl Plane {
    /// Create a plane from homogeneous coefficients and normalize it.
    pub fn from_coefficients(coeffs: Vec4) -> Self {
        let len = coeffs.truncate().length();
        if len > 0.0 {
            Self {
                normal: coeffs.truncate() / len,
                distance: coeffs.w / len,
            }
        } else {
            Self {
                normal: Vec3::ZERO,
                distance: 0.0,
            }
        }
    }

    /// Signed distance from point to plane (positive = in front, negative =
    /// behind)
    #[inline]
    pub fn distance_to_point(&self, point: Vec3) -> f32 {
        self.normal.dot(point) + self.distance
    }
}

/// Indices into [`Frustum::planes`].
pub const PLANE_LEFT: usize = 0;
/// Right clipping plane index.
pub const PLANE_RIGHT: usize = 1;
/// Bottom clipping plane index.
pub const PLANE_BOTTOM: usize = 2;
/// Top clipping plane index.
pub const PLANE_TOP: usize = 3;
/// Near clipping plane index.
pub const PLANE_NEAR: usize = 4;
/// Far clipping plane index.
pub const PLANE_FAR: usize = 5;

/// View frustum consisting of 6 inward-facing planes.
#[derive(Debug, Clone, PartialEq)]
pub struct Frustum {
    /// Six clipping planes: left, right, bottom, top, near, far.
    pub planes: [Plane; 6],
}

impl Frustum {
    /// Extract frustum planes from a view-projection matrix using the
    /// Gribb/Hartmann method. Works for perspective and orthographic
    /// projections with `[0, 1]` depth.
    pub fn from_view_projection(vp: Mat4) -> Self {
        let m = vp.transpose();
        let (row0, row1, row2, row3) = (m.x_axis, m.y_axis, m.z_axis, m.w_axis);

        Self {
            planes: [
                Plane::from_coefficients(row3 + row0),
                Plane::from_coefficients(row3 - row0),
                Plane::from_coefficients(row3 + row1),
                Plane::from_coefficients(row3 - row1),
                // [0,1] depth: near plane is just row2
                Plane::from_coefficients(row2),
                Plane::from_coefficients(row3 - row2),
            ],
        }
    }

    /// Test if a point is inside the frustum
    #[inline]
    pub fn contains_point(&self, point: Vec3) -> bool {
        self.planes
            .iter()
            .all(|plane| plane.distance_to_point(point) >= 0.0)
    }

    /// Test if a sphere intersects or is inside the frustum
    #[inline]
    pub fn intersects_sphere(&self, center: Vec3, radius: f32) -> bool {
        self.planes
            .iter()
            .all(|plane| plane.distance_to_point(center) >= -radius)
    }

    /// Test if a sphere is completely inside the frustum
    #[inline]
    pub fn contains_sphere(&self, center: Vec3, radius: f32) -> bool {
        self.planes
            .iter()
            .all(|plane| plane.distance_to_point(center) >= radius)
    }
}

/// Frustum described by its cross-section at one depth plus the clip
/// distances.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrustumDims {
    /// Cross-section width at `depth`.
    pub width: f32,
    /// Cross-section height at `depth`.
    pub height: f32,
    /// Distance in front of the eye where the cross-section is measured.
    pub depth: f32,
    /// Near clip distance.
    pub near: f32,
    /// Far clip distance.
    pub far: f32,
    /// Whether the sides are parallel.
    pub orthographic: bool,
}

impl FrustumDims {
    /// Cross-section width and height at another depth.
    #[must_use]
    pub fn area_at(&self, depth: f32) -> (f32, f32) {
        if self.orthographic || self.depth == 0.0 {
            return (self.width, self.height);
        }
        let s = depth / self.depth;
        (self.width * s, self.height * s)
    }
}
