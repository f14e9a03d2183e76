//! The travel route: a smooth parametric 3D curve.
//!
//! Purely a geometry query service with no runtime mutation. Two shapes are
//! supported: an open Catmull-Rom spline over authored control points, and
//! a closed planar ring with a sinusoidal out-of-plane wobble for the
//! orbital variant.

pub mod ring;
pub mod spline;

use foundation::math::Vec3;

pub use ring::RingRoute;
pub use spline::SplineRoute;

/// Finite-difference step for tangent estimation.
const TANGENT_EPS: f64 = 5e-4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteError {
    /// A spline needs at least two control points.
    TooFewPoints(usize),
}

impl std::fmt::Display for RouteError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RouteError::TooFewPoints(n) => {
                write!(f, "route needs at least 2 control points, got {n}")
            }
        }
    }
}

impl std::error::Error for RouteError {}

/// Parametric curve queries. `t` is normalized to [0, 1]; open routes clamp
/// it, closed routes wrap it.
pub trait Route {
    fn point_at(&self, t: f64) -> Vec3;

    /// Unit forward direction at `t`. Implementations fall back to +Z when
    /// the local derivative is degenerate.
    fn tangent_at(&self, t: f64) -> Vec3 {
        let (a, b) = if self.is_closed() {
            (t - TANGENT_EPS, t + TANGENT_EPS)
        } else {
            ((t - TANGENT_EPS).max(0.0), (t + TANGENT_EPS).min(1.0))
        };
        (self.point_at(b) - self.point_at(a)).normalized_or(Vec3::Z)
    }

    fn is_closed(&self) -> bool;

    /// `n` approximately arc-length-uniform samples, used once at world
    /// build for ribbon geometry and placement.
    fn spaced_points(&self, n: usize) -> Vec<Vec3> {
        resample_by_arc_length(self, n)
    }
}

/// Resample a route into `n` points spaced evenly by accumulated chord
/// length over a dense parameter sweep.
fn resample_by_arc_length<R: Route + ?Sized>(route: &R, n: usize) -> Vec<Vec3> {
    if n == 0 {
        return Vec::new();
    }
    if n == 1 {
        return vec![route.point_at(0.0)];
    }

    const DENSE: usize = 512;
    let mut dense_points = Vec::with_capacity(DENSE + 1);
    let mut cumulative = Vec::with_capacity(DENSE + 1);
    let mut total = 0.0;
    let mut prev = route.point_at(0.0);
    dense_points.push(prev);
    cumulative.push(0.0);
    for i in 1..=DENSE {
        let t = i as f64 / DENSE as f64;
        let p = route.point_at(t);
        total += (p - prev).length();
        dense_points.push(p);
        cumulative.push(total);
        prev = p;
    }

    if total <= 0.0 {
        return vec![dense_points[0]; n];
    }

    let mut out = Vec::with_capacity(n);
    let mut cursor = 0usize;
    for k in 0..n {
        let target = total * k as f64 / (n - 1) as f64;
        while cursor + 1 < cumulative.len() && cumulative[cursor + 1] < target {
            cursor += 1;
        }
        let seg_start = cumulative[cursor];
        let seg_end = cumulative[(cursor + 1).min(DENSE)];
        let frac = if seg_end > seg_start {
            (target - seg_start) / (seg_end - seg_start)
        } else {
            0.0
        };
        let a = dense_points[cursor];
        let b = dense_points[(cursor + 1).min(DENSE)];
        out.push(a.lerp(b, frac));
    }
    out
}
