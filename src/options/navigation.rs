use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::NavError;
use crate::input::KeyPreset;
use crate::nav::LockMask;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Navigation", inline)]
#[serde(default)]
/// Feel constants for pointer, wheel and keyboard navigation.
///
/// These were tuned by hand; none of them is load-bearing for
/// correctness.
pub struct NavOptions {
    /// NSS radius inside which a rotate drag pitches/yaws; outside it rolls.
    #[schemars(title = "Roll Zone", range(min = 0.1, max = 1.5), extend("step" = 0.05))]
    pub roll_zone_radius: f32,
    /// Dolly units per NSS unit of vertical drag.
    #[schemars(skip)]
    pub drag_dolly_scale: f32,
    /// One dolly unit as a fraction of the baseline focus distance.
    #[schemars(skip)]
    pub dolly_unit: f32,
    /// Wheel dolly per notch as a fraction of the baseline focus distance.
    #[schemars(title = "Wheel Step", range(min = 0.01, max = 0.5), extend("step" = 0.01))]
    pub wheel_step: f32,
    /// Raw wheel delta reported for one notch.
    #[schemars(skip)]
    pub wheel_notch: f32,
    /// Motion scale applied once per held accuracy modifier.
    #[schemars(title = "Accuracy Scale", range(min = 0.05, max = 1.0), extend("step" = 0.05))]
    pub accuracy_scale: f32,
    /// Default key layout.
    #[schemars(title = "Keys")]
    pub key_preset: KeyPreset,
    /// Motion locks active when the navigator is created.
    #[schemars(skip)]
    pub locks: LockMask,
}

impl Default for NavOptions {
    fn default() -> Self {
        Self {
            roll_zone_radius: 0.8,
            drag_dolly_scale: 10.0,
            dolly_unit: 0.1,
            wheel_step: 0.1,
            wheel_notch: 120.0,
            accuracy_scale: 0.5,
            key_preset: KeyPreset::Arrows,
            locks: LockMask::empty(),
        }
    }
}

impl NavOptions {
    /// Motion scale for `mode` held accuracy modifiers.
    #[must_use]
    pub fn accuracy_factor(&self, mode: u8) -> f32 {
        self.accuracy_scale.powi(i32::from(mode))
    }

    /// Reject constants that would turn motion into NaN or run it
    /// backwards.
    pub fn validate(&self) -> Result<(), NavError> {
        let bad = |field: &str, value: f32, expected: &str| {
            Err(NavError::OptionsParse(format!(
                "navigation.{field} = {value}, expected {expected}"
            )))
        };
        if !(self.wheel_notch.is_finite() && self.wheel_notch > 0.0) {
            return bad("wheel_notch", self.wheel_notch, "a positive number");
        }
        if !(self.accuracy_scale > 0.0 && self.accuracy_scale <= 1.0) {
            return bad("accuracy_scale", self.accuracy_scale, "a value in (0, 1]");
        }
        if !(self.roll_zone_radius.is_finite() && self.roll_zone_radius >= 0.0) {
            return bad("roll_zone_radius", self.roll_zone_radius, "a non-negative number");
        }
        for (field, value) in [
            ("wheel_step", self.wheel_step),
            ("drag_dolly_scale", self.drag_dolly_scale),
            ("dolly_unit", self.dolly_unit),
        ] {
            if !value.is_finite() {
                return bad(field, value, "a finite number");
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accuracy_halves_per_modifier() {
        let opts = NavOptions::default();
        assert_eq!(opts.accuracy_factor(0), 1.0);
        assert_eq!(opts.accuracy_factor(1), 0.5);
        assert_eq!(opts.accuracy_factor(2), 0.25);
    }

    #[test]
    fn defaults_are_valid() {
        assert!(NavOptions::default().validate().is_ok());
    }

    #[test]
    fn degenerate_constants_are_rejected() {
        let cases: [fn(&mut NavOptions); 6] = [
            |o| o.wheel_notch = 0.0,
            |o| o.wheel_notch = f32::INFINITY,
            |o| o.accuracy_scale = 0.0,
            |o| o.accuracy_scale = 1.5,
            |o| o.roll_zone_radius = -0.1,
            |o| o.dolly_unit = f32::NAN,
        ];
        for set in cases {
            let mut opts = NavOptions::default();
            set(&mut opts);
            assert!(matches!(opts.validate(), Err(NavError::OptionsParse(_))));
        }
    }
}
