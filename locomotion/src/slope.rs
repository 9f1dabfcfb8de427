use crate::{
    constants::{MIN_INTENT_SQ, SLOPE_PROBE_EXTRA},
    types::{SlopeProbe, Vec3},
};

/// Length of the downward slope probe for a capsule of standing height `default_height`.
#[inline]
pub fn slope_probe_length(default_height: f32) -> f32 {
    default_height * 0.5 + SLOPE_PROBE_EXTRA
}

/// Is the body standing on a walkable slope?
///
/// True iff the probe hit a surface whose angle from up is strictly between 0
/// and `max_slope_angle_deg`. Flat ground and surfaces at exactly the limit are not slopes.
#[inline]
pub fn on_slope(probe: &SlopeProbe, max_slope_angle_deg: f32) -> bool {
    probe.is_hit() && probe.angle_deg > 0.0 && probe.angle_deg < max_slope_angle_deg
}

/// Project `intent` onto the plane with normal `slope_normal` and normalize.
///
/// Returns `None` if the intent (or its projection) is too small to have a direction.
pub fn slope_move_direction(intent: Vec3, slope_normal: Vec3) -> Option<Vec3> {
    let n_len_sq = slope_normal.norm_squared();
    if n_len_sq <= 1.0e-12 || intent.norm_squared() <= MIN_INTENT_SQ {
        return None;
    }

    let n = slope_normal / n_len_sq.sqrt();
    let projected = intent - n * intent.dot(&n);
    let len_sq = projected.norm_squared();
    if len_sq <= MIN_INTENT_SQ {
        return None;
    }

    Some(projected / len_sq.sqrt())
}

/// Redirect a planar velocity along the slope, keeping its speed.
///
/// Returns `None` when there is nothing to redirect.
pub fn redirect_planar(planar: Vec3, slope_normal: Vec3) -> Option<Vec3> {
    let speed = planar.norm();
    slope_move_direction(planar, slope_normal).map(|dir| dir * speed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RayHit;

    const EPS: f32 = 1.0e-5;

    fn probe_with_angle(deg: f32) -> SlopeProbe {
        let rad = deg.to_radians();
        SlopeProbe::from_hit(Some(RayHit {
            normal: Vec3::new(0.0, rad.cos(), rad.sin()),
            distance: 1.0,
        }))
    }

    #[test]
    fn probe_length_reaches_past_feet() {
        assert!((slope_probe_length(2.0) - 1.3).abs() < EPS);
    }

    #[test]
    fn miss_is_not_a_slope() {
        assert!(!on_slope(&SlopeProbe::miss(), 45.0));
    }

    #[test]
    fn flat_ground_is_not_a_slope() {
        let flat = SlopeProbe::from_hit(Some(RayHit {
            normal: Vec3::new(0.0, 1.0, 0.0),
            distance: 1.0,
        }));
        assert_eq!(flat.angle_deg, 0.0);
        assert!(!on_slope(&flat, 45.0));
    }

    #[test]
    fn boundary_and_steeper_are_not_slopes() {
        let at_limit = SlopeProbe {
            normal: Some(Vec3::new(0.0, 1.0, 1.0).normalize()),
            angle_deg: 45.0,
        };
        assert!(!on_slope(&at_limit, 45.0));
        assert!(!on_slope(&probe_with_angle(60.0), 45.0));
    }

    #[test]
    fn strictly_between_is_a_slope() {
        assert!(on_slope(&probe_with_angle(20.0), 45.0));
        assert!(on_slope(&probe_with_angle(0.5), 45.0));
    }

    #[test]
    fn projected_direction_lies_in_slope_plane() {
        let n = Vec3::new(0.0, 1.0, 1.0).normalize();
        let dir = slope_move_direction(Vec3::new(0.0, 0.0, -4.0), n).expect("direction");
        assert!((dir.norm() - 1.0).abs() < EPS);
        assert!(dir.dot(&n).abs() < EPS);
        // Walking into the rising side goes uphill.
        assert!(dir.y > 0.0);
    }

    #[test]
    fn zero_intent_has_no_direction() {
        assert!(slope_move_direction(Vec3::zeros(), Vec3::new(0.0, 1.0, 0.0)).is_none());
    }

    #[test]
    fn redirect_keeps_speed() {
        let n = probe_with_angle(30.0).normal.expect("hit");
        let v = redirect_planar(Vec3::new(3.0, 0.0, 0.0), n).expect("redirected");
        assert!((v.norm() - 3.0).abs() < 1.0e-4);
    }
}
