/*!
Core value types and math aliases shared by the controller modules.

This module contains no algorithms. It defines the data exchanged
between:
- the physics capability (`physics::PhysicsBody`) and its backends
- the wall-climb state machine (forward probe results)
- the slope resolver (downward probe results)
- the controller's per-frame state and report

Notes
- Distances are in meters, time in seconds, angles in degrees unless a name
  says otherwise.
- Probe values are recomputed every frame and never persisted.
*/

use nalgebra as na;

/// Common math aliases for clarity and consistency.
pub type Vec2 = na::Vector2<f32>;
pub type Vec3 = na::Vector3<f32>;
pub type Quat = na::UnitQuaternion<f32>;

/// World up axis (+Y).
#[inline]
pub fn up() -> Vec3 {
    Vec3::new(0.0, 1.0, 0.0)
}

/// Opaque handle distinguishing one collidable surface from another.
///
/// Backends map their own collider identity onto this. The Rapier backend uses the
/// id of the static definition the collider was built from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SurfaceId(pub u64);

/// Result of a forward shape cast.
#[derive(Clone, Copy, Debug)]
pub struct ShapeHit {
    /// World-space surface normal at the contact, pointing out of the hit surface.
    pub normal: Vec3,
    /// Identity of the surface that was hit.
    pub surface: SurfaceId,
    /// Distance travelled along the cast direction before contact (meters).
    pub distance: f32,
}

/// Result of a downward ray cast.
#[derive(Clone, Copy, Debug)]
pub struct RayHit {
    /// World-space surface normal at the hit point.
    pub normal: Vec3,
    /// Distance from the ray origin to the hit (meters).
    pub distance: f32,
}

/// Forward wall probe, as seen by the climb state machine.
#[derive(Clone, Copy, Debug)]
pub struct WallProbe {
    pub hit: Option<ShapeHit>,
    /// Angle between the facing direction and the inverted wall normal.
    /// 0° means facing the wall squarely. 0 when nothing was hit.
    pub look_angle_deg: f32,
}

impl WallProbe {
    pub fn miss() -> Self {
        Self {
            hit: None,
            look_angle_deg: 0.0,
        }
    }

    /// Build a probe from a cast result and the facing direction.
    pub fn from_hit(forward: Vec3, hit: Option<ShapeHit>) -> Self {
        let look_angle_deg = hit.map_or(0.0, |h| angle_deg(&forward, &(-h.normal)));
        Self {
            hit,
            look_angle_deg,
        }
    }

    #[inline]
    pub fn is_hit(&self) -> bool {
        self.hit.is_some()
    }
}

/// Downward slope probe.
#[derive(Clone, Copy, Debug)]
pub struct SlopeProbe {
    /// Surface normal under the body, if the ray hit anything.
    pub normal: Option<Vec3>,
    /// Angle of the surface from vertical-up. 0 when nothing was hit.
    pub angle_deg: f32,
}

impl SlopeProbe {
    pub fn miss() -> Self {
        Self {
            normal: None,
            angle_deg: 0.0,
        }
    }

    pub fn from_hit(hit: Option<RayHit>) -> Self {
        match hit {
            Some(h) => Self {
                normal: Some(h.normal),
                angle_deg: angle_deg(&up(), &h.normal),
            },
            None => Self::miss(),
        }
    }

    #[inline]
    pub fn is_hit(&self) -> bool {
        self.normal.is_some()
    }
}

/// Unsigned angle between two vectors in degrees, in [0, 180].
///
/// Returns 0 if either vector is (near) zero.
#[inline]
pub fn angle_deg(a: &Vec3, b: &Vec3) -> f32 {
    let denom = (a.norm_squared() * b.norm_squared()).sqrt();
    if denom <= 1.0e-12 {
        return 0.0;
    }
    let cos = (a.dot(b) / denom).clamp(-1.0, 1.0);
    cos.acos().to_degrees()
}
