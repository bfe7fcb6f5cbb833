use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::camera::{CameraState, Intrinsics, Pose};
use crate::error::NavError;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Camera", inline)]
#[serde(default)]
/// Camera projection parameters applied when a viewport camera is created.
pub struct CameraOptions {
    /// Vertical field of view in degrees; also the zoom-1 FOV.
    #[schemars(title = "Field of View", range(min = 5.0, max = 150.0), extend("step" = 1.0))]
    pub fovy: f32,
    /// Viewport aspect ratio (width / height).
    #[schemars(skip)]
    pub aspect: f32,
    /// Near plane as a multiple of the focus distance.
    #[schemars(skip)]
    pub near_mul: f32,
    /// Far plane as a multiple of the focus distance.
    #[schemars(skip)]
    pub far_mul: f32,
    /// Initial focus distance.
    #[schemars(skip)]
    pub focus_dist: f32,
    /// Orthographic instead of perspective projection.
    #[schemars(title = "Orthographic")]
    pub orthographic: bool,
}

impl Default for CameraOptions {
    fn default() -> Self {
        Self {
            fovy: 45.0,
            aspect: 1.0,
            near_mul: 0.01,
            far_mul: 100.0,
            focus_dist: 1.0,
            orthographic: false,
        }
    }
}

impl CameraOptions {
    /// Build a camera at the origin looking down -Z with these settings.
    pub fn build_camera(&self) -> Result<CameraState, NavError> {
        let mut intrinsics = Intrinsics::new(self.fovy.to_radians(), self.aspect)?;
        intrinsics.near_mul = self.near_mul;
        intrinsics.far_mul = self.far_mul;
        intrinsics.orthographic = self.orthographic;
        Ok(CameraState::new(Pose::IDENTITY, intrinsics, self.focus_dist))
    }
}
