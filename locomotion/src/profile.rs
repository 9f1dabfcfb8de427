//! Speed profiles (walk speed, run speed, capsule height).
//!
//! The effective profile is recomputed every frame from the held toggles and an
//! immutable base snapshot, so no toggle sequence can leave stale speeds behind.
//! Priority is Slide > Crouch > Climb > Normal.

use crate::settings::LocomotionSettings;

/// Which profile is active this frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ProfileKind {
    #[default]
    Normal,
    Crouch,
    Slide,
    Climb,
}

/// A named bundle of speeds and capsule height applied atomically.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpeedProfile {
    pub walk_speed: f32,
    pub run_speed: f32,
    pub capsule_height: f32,
}

impl SpeedProfile {
    /// The base (Normal) profile, captured once from settings.
    pub fn base(settings: &LocomotionSettings) -> Self {
        Self {
            walk_speed: settings.walk_speed,
            run_speed: settings.run_speed,
            capsule_height: settings.default_height,
        }
    }

    /// Speed for the current run state.
    #[inline]
    pub fn speed(&self, running: bool) -> f32 {
        if running {
            self.run_speed
        } else {
            self.walk_speed
        }
    }
}

/// Held toggles that feed profile selection.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ProfileToggles {
    pub slide: bool,
    pub crouch: bool,
    pub climb: bool,
    /// Global movement gate. Slide and crouch need it; the climb-key override does not.
    pub can_move: bool,
}

/// Select the profile for this frame.
///
/// - Slide: crouch height, walk = `slide_speed`, run untouched.
/// - Crouch: crouch height, walk = run = `crouch_speed`.
/// - Climb (climb key held): standing height, walk = `climb_speed`, run untouched.
/// - Normal: the base profile.
///
/// Releasing any toggle falls straight back to `base`.
pub fn resolve_profile(
    base: &SpeedProfile,
    toggles: ProfileToggles,
    settings: &LocomotionSettings,
) -> (ProfileKind, SpeedProfile) {
    if toggles.slide && toggles.can_move {
        return (
            ProfileKind::Slide,
            SpeedProfile {
                walk_speed: settings.slide_speed,
                run_speed: base.run_speed,
                capsule_height: settings.crouch_height,
            },
        );
    }

    if toggles.crouch && toggles.can_move {
        return (
            ProfileKind::Crouch,
            SpeedProfile {
                walk_speed: settings.crouch_speed,
                run_speed: settings.crouch_speed,
                capsule_height: settings.crouch_height,
            },
        );
    }

    if toggles.climb {
        return (
            ProfileKind::Climb,
            SpeedProfile {
                walk_speed: settings.climb_speed,
                run_speed: base.run_speed,
                capsule_height: base.capsule_height,
            },
        );
    }

    (ProfileKind::Normal, *base)
}
