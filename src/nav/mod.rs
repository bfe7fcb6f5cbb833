//! Navigation: turns pointer, wheel and keyboard input into camera motion.
//!
//! Every drag is a transaction against a [`GestureBaseline`]: mutators
//! rebuild the live [`CameraState`](crate::camera::CameraState) from the
//! baseline plus a delta, and the baseline is committed or reverted when
//! the gesture ends. [`Navigator`] bundles the camera, baseline, locks and
//! key bindings for one viewport.

/// Gesture snapshot and commit/revert.
pub mod baseline;
/// Per-axis motion locks.
pub mod locks;
/// Input-driven navigation for one viewport.
pub mod navigator;
/// Baseline-relative camera mutators.
pub mod ops;
/// Look-at, orbit and align.
pub mod orbit;
/// Fitting the view to bounds or a rectangle.
pub mod view_fit;

pub use baseline::{GestureBaseline, NavOps};
pub use locks::LockMask;
pub use navigator::Navigator;
pub use ops::NavContext;
pub use view_fit::BoundingBox;
