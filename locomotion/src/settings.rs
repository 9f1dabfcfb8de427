/*!
Locomotion tunables.

A flat set of named parameters supplied at construction. Defaults match the
reference character (a 2 m capsule walking at 4 m/s).

Notes
- Distances are in meters, speeds in meters per second, time in seconds and
  angles in degrees.
- Settings can be deserialized from TOML; any key left out keeps its default.
- `validate()` is run by `from_toml_str` and by `LocomotionController::new`.
*/

use serde::{Deserialize, Serialize};

use crate::error::SettingsError;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocomotionSettings {
    /// Base walking speed.
    pub walk_speed: f32,
    /// Base running speed (run key held).
    pub run_speed: f32,
    /// Vertical velocity applied on jump.
    pub jump_power: f32,
    /// Gravity magnitude (positive value, applied downward while airborne).
    pub gravity: f32,
    /// Look sensitivity, degrees per unit of look delta.
    pub look_speed: f32,
    /// Pitch clamp (± degrees).
    pub look_x_limit: f32,

    /// Standing capsule height.
    pub default_height: f32,
    /// Capsule height while crouching or sliding.
    pub crouch_height: f32,
    /// Walk and run speed while crouching.
    pub crouch_speed: f32,
    /// Walk speed while sliding.
    pub slide_speed: f32,

    /// Vertical speed while climbing; also the walk speed while the climb key is held.
    pub climb_speed: f32,
    /// Climb stamina (seconds of continuous climbing).
    pub max_climb_time: f32,

    /// Forward wall probe length.
    pub detection_length: f32,
    /// Forward wall probe radius.
    pub sphere_cast_radius: f32,
    /// Maximum angle between facing and the inverted wall normal that still allows climbing.
    pub max_wall_look_angle: f32,
    /// Normal change that makes a previously climbed surface count as a new wall.
    pub min_wall_normal_angle_change: f32,

    /// Duration of the wall-exit cooldown.
    pub exit_wall_time: f32,

    /// Steepest surface (from up) that still counts as a walkable slope.
    pub max_slope_angle: f32,
}

impl Default for LocomotionSettings {
    fn default() -> Self {
        Self {
            walk_speed: 4.0,
            run_speed: 6.0,
            jump_power: 4.0,
            gravity: 10.0,
            look_speed: 2.0,
            look_x_limit: 90.0,
            default_height: 2.0,
            crouch_height: 1.0,
            crouch_speed: 2.0,
            slide_speed: 9.0,
            climb_speed: 5.0,
            max_climb_time: 3.0,
            detection_length: 0.5,
            sphere_cast_radius: 1.0,
            max_wall_look_angle: 20.0,
            min_wall_normal_angle_change: 45.0,
            exit_wall_time: 0.2,
            max_slope_angle: 45.0,
        }
    }
}

impl LocomotionSettings {
    /// Parse settings from a TOML document and validate them.
    pub fn from_toml_str(source: &str) -> Result<Self, SettingsError> {
        let settings: LocomotionSettings = toml::from_str(source)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Check that every tunable is usable by the controller.
    pub fn validate(&self) -> Result<(), SettingsError> {
        let fields: [(&'static str, f32); 18] = [
            ("walk_speed", self.walk_speed),
            ("run_speed", self.run_speed),
            ("jump_power", self.jump_power),
            ("gravity", self.gravity),
            ("look_speed", self.look_speed),
            ("look_x_limit", self.look_x_limit),
            ("default_height", self.default_height),
            ("crouch_height", self.crouch_height),
            ("crouch_speed", self.crouch_speed),
            ("slide_speed", self.slide_speed),
            ("climb_speed", self.climb_speed),
            ("max_climb_time", self.max_climb_time),
            ("detection_length", self.detection_length),
            ("sphere_cast_radius", self.sphere_cast_radius),
            ("max_wall_look_angle", self.max_wall_look_angle),
            ("min_wall_normal_angle_change", self.min_wall_normal_angle_change),
            ("exit_wall_time", self.exit_wall_time),
            ("max_slope_angle", self.max_slope_angle),
        ];

        for (field, value) in fields {
            if !value.is_finite() {
                return Err(SettingsError::Invalid {
                    field,
                    reason: "must be finite",
                });
            }
            if value < 0.0 {
                return Err(SettingsError::Invalid {
                    field,
                    reason: "must not be negative",
                });
            }
        }

        if self.default_height <= 0.0 {
            return Err(SettingsError::Invalid {
                field: "default_height",
                reason: "must be positive",
            });
        }
        if self.crouch_height <= 0.0 {
            return Err(SettingsError::Invalid {
                field: "crouch_height",
                reason: "must be positive",
            });
        }
        if self.crouch_height > self.default_height {
            return Err(SettingsError::Invalid {
                field: "crouch_height",
                reason: "must not exceed default_height",
            });
        }
        if self.look_x_limit > 180.0 {
            return Err(SettingsError::Invalid {
                field: "look_x_limit",
                reason: "must be at most 180 degrees",
            });
        }
        if self.max_slope_angle > 90.0 {
            return Err(SettingsError::Invalid {
                field: "max_slope_angle",
                reason: "must be at most 90 degrees",
            });
        }

        Ok(())
    }
}
