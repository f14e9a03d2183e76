use std::f64::consts::TAU;

use foundation::math::{Vec3, wrap_unit};

use crate::Route;

/// Closed planar ring with a sinusoidal out-of-plane wobble.
///
/// `t` maps to the angle `t * TAU`; the y coordinate wobbles with
/// `amplitude * sin(lobes * angle)`. An integer lobe count keeps the loop
/// seamless at t = 0/1.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RingRoute {
    pub radius: f64,
    pub wobble_amplitude: f64,
    pub wobble_lobes: f64,
}

impl RingRoute {
    pub fn new(radius: f64, wobble_amplitude: f64, wobble_lobes: f64) -> Self {
        Self {
            radius,
            wobble_amplitude,
            wobble_lobes: wobble_lobes.round().max(0.0),
        }
    }
}

impl Route for RingRoute {
    fn point_at(&self, t: f64) -> Vec3 {
        let angle = wrap_unit(t) * TAU;
        Vec3::new(
            self.radius * angle.cos(),
            self.wobble_amplitude * (self.wobble_lobes * angle).sin(),
            self.radius * angle.sin(),
        )
    }

    fn tangent_at(&self, t: f64) -> Vec3 {
        let angle = wrap_unit(t) * TAU;
        // Analytic derivative with respect to the angle.
        Vec3::new(
            -self.radius * angle.sin(),
            self.wobble_amplitude * self.wobble_lobes * (self.wobble_lobes * angle).cos(),
            self.radius * angle.cos(),
        )
        .normalized_or(Vec3::Z)
    }

    fn is_closed(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::RingRoute;
    use crate::Route;
    use foundation::math::Vec3;

    #[test]
    fn flat_ring_stays_in_plane() {
        let ring = RingRoute::new(10.0, 0.0, 0.0);
        for i in 0..16 {
            let p = ring.point_at(i as f64 / 16.0);
            assert_eq!(p.y, 0.0);
            assert!(((p.x * p.x + p.z * p.z).sqrt() - 10.0).abs() < 1e-9);
        }
    }

    #[test]
    fn tangent_matches_finite_difference() {
        let ring = RingRoute::new(25.0, 4.0, 3.0);
        for i in 0..32 {
            let t = i as f64 / 32.0;
            let analytic = ring.tangent_at(t);
            let eps = 1e-6;
            let numeric = (ring.point_at(t + eps) - ring.point_at(t - eps))
                .normalized()
                .expect("nonzero");
            assert!(
                (analytic - numeric).length() < 1e-4,
                "t={t}: {analytic:?} vs {numeric:?}"
            );
        }
    }

    #[test]
    fn fractional_lobes_round_to_seamless() {
        let ring = RingRoute::new(10.0, 2.0, 2.4);
        assert_eq!(ring.wobble_lobes, 2.0);
        assert!((ring.point_at(0.0) - ring.point_at(1.0)).length() < 1e-12);
    }

    #[test]
    fn tangent_is_unit_and_tangential() {
        let ring = RingRoute::new(10.0, 0.0, 0.0);
        let t = 0.125;
        let tan = ring.tangent_at(t);
        assert!((tan.length() - 1.0).abs() < 1e-12);
        // In-plane tangent is perpendicular to the radial direction.
        let p = ring.point_at(t);
        let radial = Vec3::new(p.x, 0.0, p.z).normalized().expect("off-center");
        assert!(tan.dot(radial).abs() < 1e-9);
    }
}
