//! Wall-climb state machine.
//!
//! States: `Idle`, `Climbing`, `ExitingWall`.
//!
//! - Stamina (`timer`) refills to `max_climb_time` on touching ground or on a
//!   genuinely new wall (different surface, or a normal that turned by more than
//!   `min_wall_normal_angle_change`). The last climbed wall is remembered across
//!   sessions so the same surface cannot refill stamina.
//! - `ExitingWall` is only entered through [`WallClimb::begin_exit`] and clears
//!   once its cooldown runs out. The cooldown is frozen while the climb key is up.
//! - Both timers end at zero inclusive: a timer that lands exactly on 0 ends its state.
//! - Timers are advanced explicitly by the caller's `dt`; a large `dt` may push a
//!   timer well past zero within one frame.

use crate::{
    settings::LocomotionSettings,
    types::{SurfaceId, Vec3, WallProbe, angle_deg},
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ClimbState {
    #[default]
    Idle,
    Climbing,
    ExitingWall,
}

/// What happened to the climb state during one evaluation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClimbTransition {
    None,
    Started,
    Stopped,
    ExitCleared,
}

/// Climb session plus the wall memory that outlives it.
#[derive(Clone, Copy, Debug, Default)]
pub struct WallClimb {
    state: ClimbState,
    /// Remaining climb stamina (seconds).
    timer: f32,
    /// Remaining wall-exit cooldown (seconds).
    exit_timer: f32,
    last_wall: Option<SurfaceId>,
    last_wall_normal: Vec3,
}

impl WallClimb {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn state(&self) -> ClimbState {
        self.state
    }

    #[inline]
    pub fn is_climbing(&self) -> bool {
        self.state == ClimbState::Climbing
    }

    #[inline]
    pub fn is_exiting(&self) -> bool {
        self.state == ClimbState::ExitingWall
    }

    #[inline]
    pub fn timer(&self) -> f32 {
        self.timer
    }

    #[inline]
    pub fn exit_timer(&self) -> f32 {
        self.exit_timer
    }

    #[inline]
    pub fn last_wall(&self) -> Option<SurfaceId> {
        self.last_wall
    }

    #[inline]
    pub fn last_wall_normal(&self) -> Vec3 {
        self.last_wall_normal
    }

    /// Is the probed wall different enough from the last climbed wall to count as new?
    pub fn is_new_wall(&self, probe: &WallProbe, settings: &LocomotionSettings) -> bool {
        let Some(hit) = probe.hit else {
            return self.last_wall.is_some();
        };

        self.last_wall != Some(hit.surface)
            || angle_deg(&self.last_wall_normal, &hit.normal)
                > settings.min_wall_normal_angle_change
    }

    /// Stamina refill. Runs every frame the climb key is held, before [`Self::evaluate`].
    ///
    /// Returns true if the timer was refilled.
    pub fn wall_check(
        &mut self,
        probe: &WallProbe,
        grounded: bool,
        settings: &LocomotionSettings,
    ) -> bool {
        let new_wall = self.is_new_wall(probe, settings);
        if (probe.is_hit() && new_wall) || grounded {
            self.timer = settings.max_climb_time;
            return true;
        }
        false
    }

    /// Run the transition rules for one frame.
    ///
    /// `climb_held` is the effective climb key: callers pass false while another
    /// movement mode (crouch, slide) owns the character.
    pub fn evaluate(
        &mut self,
        probe: &WallProbe,
        climb_held: bool,
        dt: f32,
        settings: &LocomotionSettings,
    ) -> ClimbTransition {
        let facing_wall = probe.is_hit() && probe.look_angle_deg < settings.max_wall_look_angle;

        if facing_wall && climb_held && !self.is_exiting() {
            let mut transition = ClimbTransition::None;
            if !self.is_climbing() && self.timer > 0.0 {
                self.start(probe);
                transition = ClimbTransition::Started;
            }

            if self.timer > 0.0 {
                self.timer -= dt;
            }
            if self.is_climbing() && self.timer <= 0.0 {
                self.stop();
                // A same-frame start and stop nets out to nothing.
                return match transition {
                    ClimbTransition::Started => ClimbTransition::None,
                    _ => ClimbTransition::Stopped,
                };
            }
            return transition;
        }

        if self.is_exiting() {
            // The cooldown only runs on frames the climb key is held.
            if !climb_held {
                return ClimbTransition::None;
            }
            if self.exit_timer > 0.0 {
                self.exit_timer -= dt;
            }
            if self.exit_timer <= 0.0 {
                self.exit_timer = 0.0;
                self.state = ClimbState::Idle;
                return ClimbTransition::ExitCleared;
            }
            return ClimbTransition::None;
        }

        if self.is_climbing() {
            self.stop();
            return ClimbTransition::Stopped;
        }

        ClimbTransition::None
    }

    /// Leave the wall and start the exit cooldown.
    ///
    /// Any climb in progress stops immediately. Climbing cannot restart until the cooldown ends.
    pub fn begin_exit(&mut self, settings: &LocomotionSettings) {
        self.state = ClimbState::ExitingWall;
        self.exit_timer = settings.exit_wall_time;
    }

    fn start(&mut self, probe: &WallProbe) {
        self.state = ClimbState::Climbing;
        if let Some(hit) = probe.hit {
            self.last_wall = Some(hit.surface);
            self.last_wall_normal = hit.normal;
        }
    }

    fn stop(&mut self) {
        if self.is_climbing() {
            self.state = ClimbState::Idle;
        }
    }
}
