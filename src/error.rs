//! Crate-level error types.

use std::fmt;

/// Errors produced by the navcam crate.
///
/// Validation failures never leave the camera half-updated: every setter
/// checks its input before touching state.
#[derive(Debug)]
pub enum NavError {
    /// Aspect ratio was zero, negative or non-finite.
    InvalidAspect(f32),
    /// Field of view was outside `(0, π)` or non-finite.
    InvalidFov(f32),
    /// A fit request used a non-finite or point-sized region.
    InvalidBounds,
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
    /// Generic I/O failure.
    Io(std::io::Error),
}

impl fmt::Display for NavError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidAspect(aspect) => {
                write!(f, "invalid aspect ratio: {aspect}")
            }
            Self::InvalidFov(fov) => {
                write!(f, "invalid field of view: {fov} rad")
            }
            Self::InvalidBounds => {
                write!(f, "bounds are non-finite or degenerate to a point")
            }
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::Io(e) => write!(f, "I/O error: {e}"),
        }
    }
}

impl std::error::Error for NavError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for NavError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
