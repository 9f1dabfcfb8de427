/*!
Physics capability consumed by the controller.

The controller never talks to a physics engine directly. It depends only on
[`PhysicsBody`], which covers the handful of queries and commands it needs:

- scripted:     deterministic backend returning synthetic probe results (tests, replays)
- rapier_world: immutable Rapier query world built from static collider definitions
- rapier_body:  `PhysicsBody` over a `RapierQueryWorld` using Rapier's
                `KinematicCharacterController`

All queries are synchronous point-in-time snapshots. The body is borrowed
mutably for the whole controller update, so nothing else can move it mid-frame.
*/

pub mod rapier_body;
pub mod rapier_world;
pub mod scripted;

pub use rapier_body::RapierBody;
pub use rapier_world::{ColliderShapeDef, RapierQueryWorld, WorldStaticDef};
pub use scripted::ScriptedBody;

use crate::types::{RayHit, ShapeHit, Vec3};

/// Trait for physics backend implementations.
///
/// Implement this to drive the controller from a physics engine. The backend owns
/// the capsule; the controller issues exactly one `move_capsule` per frame.
pub trait PhysicsBody {
    /// Sweep a sphere of `radius` from `origin` along `dir` (unit) for at most
    /// `max_distance`, against climbable geometry only.
    fn cast_forward(&self, origin: Vec3, dir: Vec3, radius: f32, max_distance: f32)
    -> Option<ShapeHit>;

    /// Cast a ray straight down from `origin` for at most `max_distance`.
    fn cast_down(&self, origin: Vec3, max_distance: f32) -> Option<RayHit>;

    /// Move the capsule by `delta` (world space, meters) with collision.
    fn move_capsule(&mut self, delta: Vec3, dt: f32);

    /// Whether the body rested on walkable ground after the last move.
    fn is_grounded(&self) -> bool;

    /// Capsule center (world space).
    fn position(&self) -> Vec3;

    /// Resize the capsule to the given total height.
    fn set_capsule_height(&mut self, height: f32);

    /// Override the body's own vertical velocity, for backends that simulate one.
    ///
    /// Kinematic backends have no velocity channel and ignore this.
    fn set_vertical_velocity(&mut self, _vertical: f32) {}
}
