//! Camera state for one viewport.
//!
//! Holds the pose, projection intrinsics and focus model, and derives the
//! matrices, frustum and screen-space conversions a renderer needs.
//! Nothing here interprets input; see [`crate::nav`] for that.

/// Pose, intrinsics, focus model and the GPU uniform block.
pub mod core;
/// View frustum in plane and dimension form.
pub mod frustum;
/// Normalized-screen-space conversions and projection matrices.
pub mod projector;

pub use self::core::{
    clamp_fov, fov_x_from_fov_y, fov_y_from_fov_x, CameraState, CameraUniform,
    Intrinsics, Pose,
};
pub use frustum::{Frustum, FrustumDims, Plane};
pub use projector::{camera_to_screen, Ray};
