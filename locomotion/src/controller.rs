use crate::{
    climb::{ClimbState, ClimbTransition, WallClimb},
    error::SettingsError,
    input::{Button, InputSnapshot},
    movement::{MovementStep, step_velocity},
    orientation::Orientation,
    physics::PhysicsBody,
    profile::{ProfileKind, ProfileToggles, SpeedProfile, resolve_profile},
    settings::LocomotionSettings,
    slope::{on_slope, redirect_planar, slope_probe_length},
    types::{Quat, SlopeProbe, Vec3, WallProbe},
};

/// Mutable locomotion state, owned exclusively by the controller.
#[derive(Clone, Copy, Debug)]
pub struct LocomotionState {
    /// Velocity intent (m/s). The vertical part carries over between frames.
    pub velocity: Vec3,
    /// Grounded state read from the physics body at the start of the last update.
    pub grounded: bool,
    pub profile_kind: ProfileKind,
    pub profile: SpeedProfile,
}

/// Everything the controller decided in one update.
#[derive(Clone, Copy, Debug)]
pub struct FrameReport {
    /// Displacement handed to `move_capsule` (meters).
    pub displacement: Vec3,
    /// Velocity intent after this frame (m/s).
    pub velocity: Vec3,
    pub grounded: bool,
    pub profile: ProfileKind,
    pub capsule_height: f32,
    pub climb_state: ClimbState,
    pub climb_timer: f32,
    pub on_slope: bool,
    pub jumped: bool,
    pub yaw_deg: f32,
    pub pitch_deg: f32,
    /// Yaw-only body rotation, for the camera/cosmetic layer.
    pub body_rotation: Quat,
    /// Head pitch relative to the body.
    pub head_rotation: Quat,
}

/// First-person locomotion controller.
///
/// Call [`LocomotionController::update`] exactly once per frame. Within a frame the
/// order is fixed: speed profile, movement, jump, wall climb, slope redirect,
/// capsule move, look.
///
/// Crouch and slide take precedence over climbing: a climb never starts, and an
/// active climb stops, while the Crouch or Slide profile is selected.
#[derive(Clone, Debug)]
pub struct LocomotionController {
    settings: LocomotionSettings,
    /// Immutable snapshot of the base speeds and height, taken at construction.
    base: SpeedProfile,
    state: LocomotionState,
    orientation: Orientation,
    climb: WallClimb,
    can_move: bool,
    applied_height: Option<f32>,
}

impl LocomotionController {
    pub fn new(settings: LocomotionSettings) -> Result<Self, SettingsError> {
        settings.validate()?;
        let base = SpeedProfile::base(&settings);

        Ok(Self {
            settings,
            base,
            state: LocomotionState {
                velocity: Vec3::zeros(),
                grounded: false,
                profile_kind: ProfileKind::Normal,
                profile: base,
            },
            orientation: Orientation::default(),
            climb: WallClimb::new(),
            can_move: true,
            applied_height: None,
        })
    }

    pub fn settings(&self) -> &LocomotionSettings {
        &self.settings
    }

    pub fn base_profile(&self) -> SpeedProfile {
        self.base
    }

    pub fn state(&self) -> &LocomotionState {
        &self.state
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn set_orientation(&mut self, orientation: Orientation) {
        self.orientation = orientation;
    }

    pub fn climb(&self) -> &WallClimb {
        &self.climb
    }

    pub fn can_move(&self) -> bool {
        self.can_move
    }

    /// Global movement gate (cutscenes, menus). While closed, movement input and look are ignored.
    pub fn set_can_move(&mut self, can_move: bool) {
        if self.can_move != can_move {
            log::debug!("can_move {} -> {}", self.can_move, can_move);
        }
        self.can_move = can_move;
    }

    /// Leave the wall and start the exit cooldown.
    pub fn exit_wall(&mut self) {
        log::debug!("exit wall (climb state {:?})", self.climb.state());
        self.climb.begin_exit(&self.settings);
    }

    /// Advance the controller by one frame of `dt` seconds.
    pub fn update<B: PhysicsBody>(
        &mut self,
        body: &mut B,
        input: &InputSnapshot,
        dt: f32,
    ) -> FrameReport {
        let dt = if dt.is_finite() && dt >= 0.0 {
            dt
        } else {
            log::warn!("ignoring invalid frame delta {dt}");
            0.0
        };

        let settings = self.settings;
        let grounded = body.is_grounded();
        self.state.grounded = grounded;

        // 1) Speed profile.
        self.resolve_profile(body, input);

        // 2) Movement + jump.
        let (vertical_axis, horizontal_axis) = input.axes();
        let forward = self.orientation.forward();
        let step = step_velocity(
            self.state.velocity,
            MovementStep {
                forward,
                right: self.orientation.right(),
                vertical_axis,
                horizontal_axis,
                speed: self.state.profile.speed(input.is_held(Button::Run)),
                can_move: self.can_move,
                grounded,
                jump_held: input.is_held(Button::Jump),
                jump_power: settings.jump_power,
                gravity: settings.gravity,
                dt,
            },
        );
        let mut velocity = step.velocity;
        if step.jumped {
            log::trace!("jump");
        }

        // 3) Wall climb. Crouch and slide own the character, so the climb key
        // counts as released while either is active.
        let climb_held = input.is_held(Button::Climb)
            && !matches!(
                self.state.profile_kind,
                ProfileKind::Crouch | ProfileKind::Slide
            );
        let origin = body.position();
        let wall_probe = if climb_held {
            let hit = body.cast_forward(
                origin,
                forward,
                settings.sphere_cast_radius,
                settings.detection_length,
            );
            let probe = WallProbe::from_hit(forward, hit);
            if self.climb.wall_check(&probe, grounded, &settings) {
                log::trace!("climb stamina refilled");
            }
            probe
        } else {
            WallProbe::miss()
        };

        match self.climb.evaluate(&wall_probe, climb_held, dt, &settings) {
            ClimbTransition::Started => log::debug!(
                "climb started on {:?} (look angle {:.1})",
                self.climb.last_wall(),
                wall_probe.look_angle_deg
            ),
            ClimbTransition::Stopped => {
                log::debug!("climb stopped (timer {:.2})", self.climb.timer())
            }
            ClimbTransition::ExitCleared => log::debug!("wall exit cooldown finished"),
            ClimbTransition::None => {}
        }

        let climbing = self.climb.is_climbing() && !self.climb.is_exiting();
        if climbing {
            velocity.y = settings.climb_speed;
            body.set_vertical_velocity(settings.climb_speed);
        }
        self.state.velocity = velocity;

        // 4) Slope redirect of the planar part. The stored intent stays unredirected.
        let slope_probe = SlopeProbe::from_hit(
            body.cast_down(origin, slope_probe_length(settings.default_height)),
        );
        let on_slope = on_slope(&slope_probe, settings.max_slope_angle);
        let mut commit = velocity;
        if on_slope && grounded && !climbing && !step.jumped {
            if let Some(normal) = slope_probe.normal {
                let planar = Vec3::new(velocity.x, 0.0, velocity.z);
                if let Some(redirected) = redirect_planar(planar, normal) {
                    commit = redirected + Vec3::new(0.0, velocity.y, 0.0);
                }
            }
        }

        // 5) Single move per frame.
        let displacement = commit * dt;
        body.move_capsule(displacement, dt);

        // 6) Look.
        self.orientation
            .apply_look(input.look, &settings, self.can_move);

        FrameReport {
            displacement,
            velocity: self.state.velocity,
            grounded,
            profile: self.state.profile_kind,
            capsule_height: self.state.profile.capsule_height,
            climb_state: self.climb.state(),
            climb_timer: self.climb.timer(),
            on_slope,
            jumped: step.jumped,
            yaw_deg: self.orientation.yaw_deg,
            pitch_deg: self.orientation.pitch_deg,
            body_rotation: self.orientation.body_rotation(),
            head_rotation: self.orientation.head_rotation(),
        }
    }

    fn resolve_profile<B: PhysicsBody>(&mut self, body: &mut B, input: &InputSnapshot) {
        let toggles = ProfileToggles {
            slide: input.is_held(Button::Slide),
            crouch: input.is_held(Button::Crouch),
            climb: input.is_held(Button::Climb),
            can_move: self.can_move,
        };
        let (kind, profile) = resolve_profile(&self.base, toggles, &self.settings);

        if kind != self.state.profile_kind {
            log::debug!("profile {:?} -> {:?}", self.state.profile_kind, kind);
        }
        self.state.profile_kind = kind;
        self.state.profile = profile;

        if self.applied_height != Some(profile.capsule_height) {
            body.set_capsule_height(profile.capsule_height);
            self.applied_height = Some(profile.capsule_height);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        physics::ScriptedBody,
        types::{RayHit, ShapeHit, SurfaceId},
    };

    const DT: f32 = 0.02;
    const EPS: f32 = 1.0e-4;

    fn setup() -> (LocomotionController, ScriptedBody) {
        let controller =
            LocomotionController::new(LocomotionSettings::default()).expect("default settings");
        let body = ScriptedBody::new(Vec3::new(0.0, 1.0, 0.0), 2.0);
        (controller, body)
    }

    fn square_wall() -> ShapeHit {
        ShapeHit {
            normal: Vec3::new(0.0, 0.0, -1.0),
            surface: SurfaceId(1),
            distance: 0.2,
        }
    }

    #[test]
    fn invalid_settings_are_rejected() {
        let settings = LocomotionSettings {
            gravity: f32::NAN,
            ..Default::default()
        };
        assert!(LocomotionController::new(settings).is_err());
    }

    #[test]
    fn walking_forward_at_walk_speed() {
        let (mut c, mut body) = setup();
        let input = InputSnapshot::default().with_axes(1.0, 0.0);
        let report = c.update(&mut body, &input, DT);

        let planar = Vec3::new(report.velocity.x, 0.0, report.velocity.z);
        assert!((planar.norm() - 4.0).abs() < EPS);
        assert!((report.displacement.z - 4.0 * DT).abs() < EPS);
        assert_eq!(body.moves.len(), 1);
    }

    #[test]
    fn running_uses_run_speed() {
        let (mut c, mut body) = setup();
        let input = InputSnapshot::default()
            .with_axes(1.0, 0.0)
            .holding(Button::Run);
        let report = c.update(&mut body, &input, DT);
        assert!((report.velocity.z - 6.0).abs() < EPS);
    }

    #[test]
    fn exactly_one_move_per_frame() {
        let (mut c, mut body) = setup();
        body.wall = Some(square_wall());
        let input = InputSnapshot::default()
            .with_axes(1.0, 0.0)
            .holding(Button::Climb)
            .holding(Button::Jump);
        for _ in 0..10 {
            c.update(&mut body, &input, DT);
        }
        assert_eq!(body.moves.len(), 10);
    }

    #[test]
    fn invalid_dt_moves_nothing() {
        let (mut c, mut body) = setup();
        let input = InputSnapshot::default().with_axes(1.0, 0.0);
        let report = c.update(&mut body, &input, f32::NAN);
        assert_eq!(report.displacement, Vec3::zeros());
    }

    #[test]
    fn closed_gate_freezes_movement_and_look() {
        let (mut c, mut body) = setup();
        c.set_can_move(false);
        let input = InputSnapshot::default()
            .with_axes(1.0, 1.0)
            .with_look(10.0, 10.0);
        let report = c.update(&mut body, &input, DT);
        assert_eq!(report.displacement.x, 0.0);
        assert_eq!(report.displacement.z, 0.0);
        assert_eq!(report.yaw_deg, 0.0);
        assert_eq!(report.pitch_deg, 0.0);
    }

    #[test]
    fn first_update_applies_profile_height() {
        let (mut c, _) = setup();
        let mut body = ScriptedBody::new(Vec3::zeros(), 1.3);
        c.update(&mut body, &InputSnapshot::default(), DT);
        assert_eq!(body.capsule_height, 2.0);
    }

    #[test]
    fn climbing_overrides_vertical_velocity() {
        let (mut c, mut body) = setup();
        body.grounded = false;
        body.wall = Some(square_wall());
        let input = InputSnapshot::default().holding(Button::Climb);

        let report = c.update(&mut body, &input, DT);
        assert_eq!(report.climb_state, ClimbState::Climbing);
        assert_eq!(report.velocity.y, 5.0);
        assert!((report.displacement.y - 5.0 * DT).abs() < EPS);
        assert_eq!(body.vertical_velocity, Some(5.0));
    }

    #[test]
    fn climbing_allows_strafing() {
        let (mut c, mut body) = setup();
        body.wall = Some(square_wall());
        let input = InputSnapshot::default()
            .with_axes(0.0, 1.0)
            .holding(Button::Climb);
        let report = c.update(&mut body, &input, DT);
        assert_eq!(report.climb_state, ClimbState::Climbing);
        // Walk speed is the climb speed while the climb key is held.
        assert!((report.velocity.x - 5.0).abs() < EPS);
    }

    #[test]
    fn exit_wall_stops_climb_and_blocks_restart() {
        let (mut c, mut body) = setup();
        body.grounded = false;
        body.wall = Some(square_wall());
        let input = InputSnapshot::default().holding(Button::Climb);
        c.update(&mut body, &input, DT);
        assert!(c.climb().is_climbing());

        c.exit_wall();
        let report = c.update(&mut body, &input, DT);
        assert_eq!(report.climb_state, ClimbState::ExitingWall);
        // Falling again, not climbing.
        assert!(report.velocity.y < 5.0);
    }

    #[test]
    fn crouching_on_a_wall_ends_the_climb() {
        let (mut c, mut body) = setup();
        body.grounded = false;
        body.wall = Some(square_wall());
        let climb = InputSnapshot::default().holding(Button::Climb);
        c.update(&mut body, &climb, DT);
        assert!(c.climb().is_climbing());

        let report = c.update(&mut body, &climb.holding(Button::Crouch), DT);
        assert_eq!(report.profile, ProfileKind::Crouch);
        assert_eq!(report.climb_state, ClimbState::Idle);
        assert!(report.velocity.y < 5.0);
    }

    #[test]
    fn sliding_into_a_wall_never_starts_a_climb() {
        let (mut c, mut body) = setup();
        body.grounded = false;
        body.wall = Some(square_wall());
        let input = InputSnapshot::default()
            .holding(Button::Climb)
            .holding(Button::Slide);
        for _ in 0..5 {
            let report = c.update(&mut body, &input, DT);
            assert_eq!(report.profile, ProfileKind::Slide);
            assert_eq!(report.climb_state, ClimbState::Idle);
        }
    }

    #[test]
    fn slope_redirects_planar_motion_uphill() {
        let (mut c, mut body) = setup();
        // Ground tilted 20° and rising toward +Z.
        let r = 20f32.to_radians();
        body.ground = Some(RayHit {
            normal: Vec3::new(0.0, r.cos(), -r.sin()),
            distance: 1.0,
        });
        let input = InputSnapshot::default().with_axes(1.0, 0.0);
        let report = c.update(&mut body, &input, DT);

        assert!(report.on_slope);
        assert!(report.displacement.y > 0.0);
        let speed = report.displacement.norm() / DT;
        assert!((speed - 4.0).abs() < 1.0e-3);
        // The stored intent stays planar.
        assert_eq!(report.velocity.y, 0.0);
    }

    #[test]
    fn flat_ground_is_not_redirected() {
        let (mut c, mut body) = setup();
        body.ground = Some(RayHit {
            normal: Vec3::new(0.0, 1.0, 0.0),
            distance: 1.0,
        });
        let input = InputSnapshot::default().with_axes(1.0, 0.0);
        let report = c.update(&mut body, &input, DT);
        assert!(!report.on_slope);
        assert_eq!(report.displacement.y, 0.0);
    }
}
