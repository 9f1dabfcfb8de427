//! `PhysicsBody` backed by a Rapier query world.
//!
//! Notes
//! - The capsule is purely kinematic: it is not inserted into the world, so queries
//!   never need to exclude it.
//! - Movement goes through Rapier's `KinematicCharacterController` (sweep-and-slide,
//!   slope limits, snap-to-ground); grounded state comes from its corrected movement.
//! - Forward probes only see colliders built from climbable definitions.

use rapier3d::control::KinematicCharacterController;
use rapier3d::parry::{query::ShapeCastOptions, shape::Ball};
use rapier3d::prelude::*;

use crate::{
    physics::{
        PhysicsBody,
        rapier_world::{RapierQueryWorld, is_climbable},
    },
    settings::LocomotionSettings,
    types::{RayHit, ShapeHit, Vec3},
};

pub struct RapierBody<'w> {
    world: &'w RapierQueryWorld,
    controller: KinematicCharacterController,
    position: Vec3,
    radius: f32,
    height: f32,
    grounded: bool,
}

impl<'w> RapierBody<'w> {
    /// Create a standing capsule of `radius` centered at `position`.
    pub fn new(
        world: &'w RapierQueryWorld,
        position: Vec3,
        radius: f32,
        settings: &LocomotionSettings,
    ) -> Self {
        let controller = KinematicCharacterController {
            max_slope_climb_angle: settings.max_slope_angle.to_radians(),
            ..KinematicCharacterController::default()
        };

        Self {
            world,
            controller,
            position,
            radius: radius.max(0.0),
            height: settings.default_height,
            grounded: false,
        }
    }

    /// Rapier capsule for the current height. The segment collapses to a sphere when the
    /// height is at most the diameter.
    fn capsule(&self) -> Capsule {
        let half_height = (self.height * 0.5 - self.radius).max(0.0);
        Capsule::new_y(half_height, self.radius)
    }

    fn iso(&self, at: Vec3) -> Isometry<Real> {
        Isometry::translation(at.x, at.y, at.z)
    }
}

impl PhysicsBody for RapierBody<'_> {
    fn cast_forward(
        &self,
        origin: Vec3,
        dir: Vec3,
        radius: f32,
        max_distance: f32,
    ) -> Option<ShapeHit> {
        let dir = dir.try_normalize(1.0e-6)?;
        if max_distance <= 0.0 || radius <= 0.0 {
            return None;
        }

        let climbable = |_handle: ColliderHandle, co: &Collider| is_climbable(co);
        let filter = QueryFilter::default().predicate(&climbable);
        let query_pipeline = self.world.query_pipeline(filter);

        let ball = Ball::new(radius);
        let options = ShapeCastOptions::with_max_time_of_impact(max_distance);
        let (handle, hit) =
            query_pipeline.cast_shape(&self.iso(origin), &dir, &ball, options)?;

        // `normal1` is on the moving ball (identity rotation), pointing at the wall.
        // The wall's outward normal is its inverse.
        let normal = -hit.normal1.into_inner();
        let surface = self.world.surface_of(handle)?;

        Some(ShapeHit {
            normal,
            surface,
            distance: hit.time_of_impact,
        })
    }

    fn cast_down(&self, origin: Vec3, max_distance: f32) -> Option<RayHit> {
        if max_distance <= 0.0 {
            return None;
        }

        let query_pipeline = self.world.query_pipeline(QueryFilter::default());
        let ray = Ray::new(origin.into(), -Vector::y());

        query_pipeline
            .cast_ray_and_get_normal(&ray, max_distance, true)
            .map(|(_handle, hit)| RayHit {
                normal: hit.normal,
                distance: hit.time_of_impact,
            })
    }

    fn move_capsule(&mut self, delta: Vec3, dt: f32) {
        let query_pipeline = self.world.query_pipeline(QueryFilter::default());
        let capsule = self.capsule();

        let corrected = self.controller.move_shape(
            dt,
            &query_pipeline,
            &capsule,
            &self.iso(self.position),
            delta,
            |_| {},
        );

        self.position += corrected.translation;
        self.grounded = corrected.grounded;
    }

    fn is_grounded(&self) -> bool {
        self.grounded
    }

    fn position(&self) -> Vec3 {
        self.position
    }

    fn set_capsule_height(&mut self, height: f32) {
        // Center stays put; a shrinking capsule drops onto the ground under gravity.
        self.height = height.max(0.0);
    }
}
