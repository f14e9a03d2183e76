use foundation::math::Vec3;

use crate::{Route, RouteError};

/// Open Catmull-Rom spline over ordered control points.
///
/// Endpoints are handled by clamping the neighbor indices, which degrades
/// the first and last segments to a quadratic blend instead of introducing
/// phantom points.
#[derive(Debug, Clone, PartialEq)]
pub struct SplineRoute {
    points: Vec<Vec3>,
}

impl SplineRoute {
    pub fn new(points: Vec<Vec3>) -> Result<Self, RouteError> {
        if points.len() < 2 {
            return Err(RouteError::TooFewPoints(points.len()));
        }
        Ok(Self { points })
    }

    pub fn control_points(&self) -> &[Vec3] {
        &self.points
    }
}

impl Route for SplineRoute {
    fn point_at(&self, t: f64) -> Vec3 {
        let t = t.clamp(0.0, 1.0);
        let segments = (self.points.len() - 1) as f64;
        let scaled = t * segments;
        let i1 = (scaled.floor() as usize).min(self.points.len() - 2);
        let local = scaled - i1 as f64;

        let i0 = i1.saturating_sub(1);
        let i2 = i1 + 1;
        let i3 = (i1 + 2).min(self.points.len() - 1);

        catmull_rom(
            self.points[i0],
            self.points[i1],
            self.points[i2],
            self.points[i3],
            local,
        )
    }

    fn is_closed(&self) -> bool {
        false
    }
}

/// Uniform Catmull-Rom segment interpolation between `p1` and `p2`.
fn catmull_rom(p0: Vec3, p1: Vec3, p2: Vec3, p3: Vec3, t: f64) -> Vec3 {
    let t2 = t * t;
    let t3 = t2 * t;

    let c0 = -0.5 * t3 + t2 - 0.5 * t;
    let c1 = 1.5 * t3 - 2.5 * t2 + 1.0;
    let c2 = -1.5 * t3 + 2.0 * t2 + 0.5 * t;
    let c3 = 0.5 * t3 - 0.5 * t2;

    p0.scale(c0) + p1.scale(c1) + p2.scale(c2) + p3.scale(c3)
}
