use crate::{
    physics::PhysicsBody,
    types::{RayHit, ShapeHit, Vec3},
};

/// Deterministic backend with scripted probe results.
///
/// Moves are applied verbatim (no collision) and recorded, so tests can drive
/// exact sequences of walls, slopes and ground contact.
#[derive(Clone, Debug)]
pub struct ScriptedBody {
    pub position: Vec3,
    pub grounded: bool,
    pub capsule_height: f32,
    /// Result returned by every `cast_forward`.
    pub wall: Option<ShapeHit>,
    /// Result returned by every `cast_down`.
    pub ground: Option<RayHit>,
    /// Last vertical velocity pushed by the controller, if any.
    pub vertical_velocity: Option<f32>,
    /// Every displacement passed to `move_capsule`, in order.
    pub moves: Vec<Vec3>,
}

impl ScriptedBody {
    pub fn new(position: Vec3, capsule_height: f32) -> Self {
        Self {
            position,
            grounded: true,
            capsule_height,
            wall: None,
            ground: None,
            vertical_velocity: None,
            moves: Vec::new(),
        }
    }
}

impl PhysicsBody for ScriptedBody {
    fn cast_forward(
        &self,
        _origin: Vec3,
        _dir: Vec3,
        _radius: f32,
        max_distance: f32,
    ) -> Option<ShapeHit> {
        self.wall.filter(|h| h.distance <= max_distance)
    }

    fn cast_down(&self, _origin: Vec3, max_distance: f32) -> Option<RayHit> {
        self.ground.filter(|h| h.distance <= max_distance)
    }

    fn move_capsule(&mut self, delta: Vec3, _dt: f32) {
        self.position += delta;
        self.moves.push(delta);
    }

    fn is_grounded(&self) -> bool {
        self.grounded
    }

    fn position(&self) -> Vec3 {
        self.position
    }

    fn set_capsule_height(&mut self, height: f32) {
        self.capsule_height = height;
    }

    fn set_vertical_velocity(&mut self, vertical: f32) {
        self.vertical_velocity = Some(vertical);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SurfaceId;

    #[test]
    fn probes_respect_max_distance() {
        let mut body = ScriptedBody::new(Vec3::zeros(), 2.0);
        body.wall = Some(ShapeHit {
            normal: Vec3::new(0.0, 0.0, -1.0),
            surface: SurfaceId(1),
            distance: 0.8,
        });
        let fwd = Vec3::new(0.0, 0.0, 1.0);
        assert!(body.cast_forward(Vec3::zeros(), fwd, 1.0, 0.5).is_none());
        assert!(body.cast_forward(Vec3::zeros(), fwd, 1.0, 1.0).is_some());
    }

    #[test]
    fn moves_are_recorded() {
        let mut body = ScriptedBody::new(Vec3::zeros(), 2.0);
        body.move_capsule(Vec3::new(1.0, 0.0, 0.0), 0.1);
        body.move_capsule(Vec3::new(0.0, 0.0, 2.0), 0.1);
        assert_eq!(body.moves.len(), 2);
        assert_eq!(body.position, Vec3::new(1.0, 0.0, 2.0));
    }
}
