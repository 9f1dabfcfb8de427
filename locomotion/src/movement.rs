use crate::types::Vec3;

/// Per-frame inputs to the grounded locomotion step.
#[derive(Clone, Copy, Debug)]
pub struct MovementStep {
    /// Planar facing direction (unit, Y = 0).
    pub forward: Vec3,
    /// Planar right direction (unit, Y = 0).
    pub right: Vec3,
    /// Forward/back axis in [-1, 1].
    pub vertical_axis: f32,
    /// Right/left axis in [-1, 1].
    pub horizontal_axis: f32,
    /// Speed selected from the active profile (walk or run).
    pub speed: f32,
    /// Global movement gate.
    pub can_move: bool,
    /// Grounded state read from the physics body at the start of the frame.
    pub grounded: bool,
    /// Jump button held this frame.
    pub jump_held: bool,
    pub jump_power: f32,
    /// Gravity magnitude (positive).
    pub gravity: f32,
    pub dt: f32,
}

/// Output of a single `step_velocity()` call.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StepVelocityResult {
    /// New velocity intent (m/s). Multiply by `dt` for this frame's displacement.
    pub velocity: Vec3,
    /// Whether a jump was triggered this frame.
    pub jumped: bool,
}

/// Compute this frame's velocity intent from the previous one.
///
/// Behavior
/// - Planar part is rebuilt every frame from the axes and `speed`; zero while `can_move` is false.
/// - Vertical part carries over from the previous frame. While airborne it accumulates
///   `-gravity * dt` with no terminal-velocity clamp.
/// - Jump (held, grounded, `can_move`) sets vertical velocity to `jump_power`.
#[inline]
pub fn step_velocity(previous: Vec3, step: MovementStep) -> StepVelocityResult {
    let dt = step.dt.max(0.0);

    let planar = planar_velocity(
        step.forward,
        step.right,
        step.vertical_axis,
        step.horizontal_axis,
        step.speed,
        step.can_move,
    );

    let mut vertical = previous.y;
    if !step.grounded {
        vertical -= step.gravity * dt;
    }

    let jumped = step.jump_held && step.can_move && step.grounded;
    if jumped {
        vertical = step.jump_power;
    }

    StepVelocityResult {
        velocity: Vec3::new(planar.x, vertical, planar.z),
        jumped,
    }
}

/// Planar velocity `(forward * vertical + right * horizontal) * speed`.
#[inline]
pub fn planar_velocity(
    forward: Vec3,
    right: Vec3,
    vertical_axis: f32,
    horizontal_axis: f32,
    speed: f32,
    can_move: bool,
) -> Vec3 {
    if !can_move {
        return Vec3::zeros();
    }

    let v = forward * (speed * vertical_axis) + right * (speed * horizontal_axis);
    Vec3::new(v.x, 0.0, v.z)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1.0e-5;

    fn step() -> MovementStep {
        MovementStep {
            forward: Vec3::new(0.0, 0.0, 1.0),
            right: Vec3::new(1.0, 0.0, 0.0),
            vertical_axis: 0.0,
            horizontal_axis: 0.0,
            speed: 4.0,
            can_move: true,
            grounded: true,
            jump_held: false,
            jump_power: 4.0,
            gravity: 10.0,
            dt: 0.02,
        }
    }

    #[test]
    fn walking_forward_moves_at_walk_speed() {
        let out = step_velocity(
            Vec3::zeros(),
            MovementStep {
                vertical_axis: 1.0,
                ..step()
            },
        );
        let planar = Vec3::new(out.velocity.x, 0.0, out.velocity.z);
        assert!((planar.norm() - 4.0).abs() < EPS);
        assert!((out.velocity.z - 4.0).abs() < EPS);
    }

    #[test]
    fn strafing_uses_right_axis() {
        let out = step_velocity(
            Vec3::zeros(),
            MovementStep {
                horizontal_axis: -1.0,
                ..step()
            },
        );
        assert!((out.velocity.x + 4.0).abs() < EPS);
    }

    #[test]
    fn closed_gate_zeroes_planar_but_keeps_vertical() {
        let out = step_velocity(
            Vec3::new(1.0, -3.0, 1.0),
            MovementStep {
                vertical_axis: 1.0,
                can_move: false,
                grounded: false,
                ..step()
            },
        );
        assert_eq!(out.velocity.x, 0.0);
        assert_eq!(out.velocity.z, 0.0);
        assert!((out.velocity.y - (-3.0 - 10.0 * 0.02)).abs() < EPS);
    }

    #[test]
    fn gravity_accumulates_without_clamp() {
        let mut v = Vec3::zeros();
        for _ in 0..500 {
            v = step_velocity(
                v,
                MovementStep {
                    grounded: false,
                    ..step()
                },
            )
            .velocity;
        }
        // 10 s of free fall at 10 m/s^2.
        assert!((v.y + 100.0).abs() < 1.0e-2);
    }

    #[test]
    fn grounded_keeps_vertical_residual() {
        let out = step_velocity(Vec3::new(0.0, -2.5, 0.0), step());
        assert_eq!(out.velocity.y, -2.5);
    }

    #[test]
    fn jump_only_when_grounded() {
        let jump = MovementStep {
            jump_held: true,
            ..step()
        };
        let out = step_velocity(Vec3::zeros(), jump);
        assert!(out.jumped);
        assert_eq!(out.velocity.y, 4.0);

        let airborne = step_velocity(
            Vec3::zeros(),
            MovementStep {
                grounded: false,
                ..jump
            },
        );
        assert!(!airborne.jumped);
        assert!(airborne.velocity.y < 0.0);
    }
}
