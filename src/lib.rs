// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Complexity limits
#![deny(clippy::cognitive_complexity)]
#![deny(clippy::excessive_nesting)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Interactive camera navigation for 3D viewports.
//!
//! Navcam turns pointer, wheel and keyboard input into camera motion
//! (orbit, pan, dolly, zoom), keeps the camera pose and projection
//! consistent, and hands a renderer the matrices and frustum it needs.
//!
//! # Key entry points
//!
//! - [`camera::CameraState`] - pose, intrinsics and focus model, plus the
//!   normalized-screen-space conversions
//! - [`nav::Navigator`] - gesture-level navigation for one viewport
//! - [`input::InputProcessor`] - raw window events to navigator calls
//! - [`options::Options`] - TOML-backed camera and navigation settings
//!
//! # Gestures
//!
//! Every drag is measured against a [`nav::GestureBaseline`] snapshot
//! taken when the gesture starts. Intermediate samples rebuild the camera
//! from that snapshot, so a gesture can be committed or reverted as a
//! whole.

pub mod camera;
pub mod error;
pub mod input;
pub mod nav;
pub mod options;

pub use camera::{CameraState, CameraUniform, Intrinsics, Pose};
pub use error::NavError;
pub use input::{InputEvent, InputProcessor, KeyBindings, KeyCode, KeyState};
pub use nav::{BoundingBox, GestureBaseline, LockMask, NavOps, Navigator};
pub use options::Options;
