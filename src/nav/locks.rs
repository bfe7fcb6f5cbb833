use bitflags::bitflags;
use glam::Vec3;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Per-degree-of-freedom motion locks.
    ///
    /// With [`CAMERA_RELATIVE`](Self::CAMERA_RELATIVE) the translation and
    /// rotation flags refer to the camera's own axes and the matching input
    /// component is zeroed. Without it they refer to world axes and the
    /// proposed pose is snapped back to the baseline on locked axes.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct LockMask: u8 {
        /// Lock translation along X.
        const TRANS_X = 1 << 0;
        /// Lock translation along Y.
        const TRANS_Y = 1 << 1;
        /// Lock translation along Z.
        const TRANS_Z = 1 << 2;
        /// Lock rotation about X.
        const ROT_X = 1 << 3;
        /// Lock rotation about Y.
        const ROT_Y = 1 << 4;
        /// Lock rotation about Z.
        const ROT_Z = 1 << 5;
        /// Lock FOV changes.
        const ZOOM = 1 << 6;
        /// Locks apply to camera-local axes rather than world axes.
        const CAMERA_RELATIVE = 1 << 7;

        /// All translation locks.
        const TRANSLATION = Self::TRANS_X.bits() | Self::TRANS_Y.bits() | Self::TRANS_Z.bits();
        /// All rotation locks.
        const ROTATION = Self::ROT_X.bits() | Self::ROT_Y.bits() | Self::ROT_Z.bits();
    }
}

impl LockMask {
    /// Whether locks act on camera-local axes.
    #[must_use]
    pub fn camera_relative(self) -> bool {
        self.contains(Self::CAMERA_RELATIVE)
    }

    /// Per-axis translation locks as 0 (locked) / 1 (free) factors.
    fn translation_free(self) -> Vec3 {
        Vec3::new(
            free(self.contains(Self::TRANS_X)),
            free(self.contains(Self::TRANS_Y)),
            free(self.contains(Self::TRANS_Z)),
        )
    }

    /// Per-axis rotation locks as 0 (locked) / 1 (free) factors.
    fn rotation_free(self) -> Vec3 {
        Vec3::new(
            free(self.contains(Self::ROT_X)),
            free(self.contains(Self::ROT_Y)),
            free(self.contains(Self::ROT_Z)),
        )
    }

    /// Zero the locked components of a camera-space translation. No-op for
    /// world-relative locks.
    #[must_use]
    pub fn mask_camera_translation(self, delta: Vec3) -> Vec3 {
        if self.camera_relative() {
            delta * self.translation_free()
        } else {
            delta
        }
    }

    /// Zero the locked components of camera-space `(pitch, yaw, roll)`.
    /// No-op for world-relative locks.
    #[must_use]
    pub fn mask_camera_rotation(self, angles: Vec3) -> Vec3 {
        if self.camera_relative() {
            angles * self.rotation_free()
        } else {
            angles
        }
    }

    /// Snap locked world axes of a proposed position back to `base`. No-op
    /// for camera-relative locks.
    #[must_use]
    pub fn snap_world_position(self, proposed: Vec3, base: Vec3) -> Vec3 {
        if self.camera_relative() {
            return proposed;
        }
        let free = self.translation_free();
        base + (proposed - base) * free
    }

    /// Zero the locked components of world-space rotation angles about
    /// `(X, Y, Z)`. No-op for camera-relative locks.
    #[must_use]
    pub fn mask_world_rotation(self, angles: Vec3) -> Vec3 {
        if self.camera_relative() {
            angles
        } else {
            angles * self.rotation_free()
        }
    }
}

fn free(locked: bool) -> f32 {
    if locked {
        0.0
    } else {
        1.0
    }
}
