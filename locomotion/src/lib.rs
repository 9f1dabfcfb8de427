pub mod climb;
pub mod constants;
pub mod controller;
pub mod error;
pub mod input;
pub mod movement;
pub mod orientation;
pub mod physics;
pub mod profile;
pub mod settings;
pub mod slope;
pub mod types;

pub use climb::{ClimbState, ClimbTransition, WallClimb};
pub use constants::{MIN_INTENT_SQ, SLOPE_PROBE_EXTRA};
pub use controller::{FrameReport, LocomotionController, LocomotionState};
pub use error::SettingsError;
pub use input::{Button, ButtonSet, InputSnapshot};
pub use orientation::{Orientation, restrict_angle};
pub use physics::{PhysicsBody, RapierBody, RapierQueryWorld, ScriptedBody, WorldStaticDef};
pub use profile::{ProfileKind, SpeedProfile};
pub use settings::LocomotionSettings;
pub use slope::{on_slope, slope_move_direction};
pub use types::{Quat, RayHit, ShapeHit, SlopeProbe, SurfaceId, Vec2, Vec3, WallProbe};
