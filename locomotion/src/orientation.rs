use nalgebra as na;

use crate::{
    settings::LocomotionSettings,
    types::{Quat, Vec2, Vec3},
};

/// Head pitch and body yaw, both in degrees.
///
/// Pitch is clamped to `±look_x_limit`; yaw is an unbounded accumulation.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Orientation {
    pub pitch_deg: f32,
    pub yaw_deg: f32,
}

impl Orientation {
    pub fn new(yaw_deg: f32) -> Self {
        Self {
            pitch_deg: 0.0,
            yaw_deg,
        }
    }

    /// Apply one frame of look input. No smoothing; a closed `can_move` gate freezes both axes.
    pub fn apply_look(&mut self, look: Vec2, settings: &LocomotionSettings, can_move: bool) {
        if !can_move || !look.x.is_finite() || !look.y.is_finite() {
            return;
        }

        let limit = settings.look_x_limit;
        self.pitch_deg = (self.pitch_deg - look.y * settings.look_speed).clamp(-limit, limit);
        self.yaw_deg += look.x * settings.look_speed;
    }

    /// Yaw-only body rotation (about +Y).
    pub fn body_rotation(&self) -> Quat {
        na::UnitQuaternion::from_axis_angle(&na::Vector3::y_axis(), self.yaw_deg.to_radians())
    }

    /// Head rotation relative to the body (about the body's +X).
    pub fn head_rotation(&self) -> Quat {
        na::UnitQuaternion::from_axis_angle(&na::Vector3::x_axis(), self.pitch_deg.to_radians())
    }

    /// Planar facing direction. Yaw 0 faces +Z; positive yaw turns toward +X.
    pub fn forward(&self) -> Vec3 {
        let (s, c) = self.yaw_deg.to_radians().sin_cos();
        Vec3::new(s, 0.0, c)
    }

    /// Planar right direction, perpendicular to [`Self::forward`].
    pub fn right(&self) -> Vec3 {
        let (s, c) = self.yaw_deg.to_radians().sin_cos();
        Vec3::new(c, 0.0, -s)
    }
}

/// Wrap `angle` into (-180, 180] and clamp it to `[angle_min, angle_max]`.
pub fn restrict_angle(angle: f32, angle_min: f32, angle_max: f32) -> f32 {
    let mut angle = angle;
    if angle > 180.0 {
        angle -= 360.0;
    } else if angle < -180.0 {
        angle += 360.0;
    }

    angle.clamp(angle_min, angle_max)
}
