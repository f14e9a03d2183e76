use std::f64::consts::{PI, TAU};

use foundation::math::Vec3;
use foundation::math::precision::camera_relative_f32;

use crate::mesh::MeshDescriptor;
use crate::noise::lattice;
use crate::render::InstancePose;

/// Sky dome: an inward-facing hemisphere with a vertical color gradient.
/// The dome is re-centered on the camera every frame so it never parallaxes.
pub fn build_sky_dome(radius: f64, segments: usize) -> MeshDescriptor {
    let segments = segments.max(4);
    let rings = segments / 2;

    let horizon = [0.93, 0.62, 0.45];
    let zenith = [0.18, 0.24, 0.49];

    let mut mesh = MeshDescriptor::new();
    for j in 0..=rings {
        let phi = j as f64 / rings as f64 * (PI * 0.5);
        let y = phi.sin();
        let ring_r = phi.cos();
        let t = y as f32;
        let color = [
            horizon[0] + (zenith[0] - horizon[0]) * t,
            horizon[1] + (zenith[1] - horizon[1]) * t,
            horizon[2] + (zenith[2] - horizon[2]) * t,
        ];
        for i in 0..=segments {
            let theta = i as f64 / segments as f64 * TAU;
            let dir = Vec3::new(ring_r * theta.cos(), y, ring_r * theta.sin());
            // Normals face inward; the camera lives inside the dome.
            mesh.push_vertex(dir.scale(radius), -dir, color);
        }
    }

    let stride = (segments + 1) as u32;
    for j in 0..rings as u32 {
        for i in 0..segments as u32 {
            let a = j * stride + i;
            let b = a + 1;
            let c = a + stride;
            let d = c + 1;
            // Inward winding.
            mesh.push_triangle(a, b, c);
            mesh.push_triangle(b, d, c);
        }
    }
    mesh
}

/// Puff mesh shared by every cloud instance: a few overlapping slabs.
pub fn build_cloud_mesh() -> MeshDescriptor {
    let white = [0.96, 0.96, 0.99];
    let mut mesh = MeshDescriptor::new();
    mesh.push_box(Vec3::ZERO, Vec3::new(4.0, 0.9, 2.2), white);
    mesh.push_box(Vec3::new(-2.2, 0.7, 0.4), Vec3::new(2.0, 0.8, 1.6), white);
    mesh.push_box(Vec3::new(2.4, 0.5, -0.3), Vec3::new(1.7, 0.7, 1.4), white);
    mesh
}

#[derive(Debug, Copy, Clone, PartialEq)]
struct Cloud {
    angle: f64,
    orbit_radius: f64,
    altitude: f64,
    speed: f64,
    scale: f64,
}

/// Drifting cloud field orbiting the world origin.
#[derive(Debug, Clone, PartialEq)]
pub struct CloudLayer {
    clouds: Vec<Cloud>,
}

impl CloudLayer {
    /// Deterministic generation: cloud parameters come from the same
    /// lattice hash as the terrain, not a RNG.
    pub fn generate(seed: u64, count: usize, orbit_radius: f64) -> Self {
        let mut clouds = Vec::with_capacity(count);
        for i in 0..count {
            let i64i = i as i64;
            let u = |salt: i64| (lattice(i64i, salt, seed) + 1.0) * 0.5;
            clouds.push(Cloud {
                angle: u(1) * TAU,
                orbit_radius: orbit_radius * (0.55 + 0.45 * u(2)),
                altitude: 42.0 + 30.0 * u(3),
                speed: 0.004 + 0.010 * u(4),
                scale: 1.0 + 1.8 * u(5),
            });
        }
        Self { clouds }
    }

    pub fn len(&self) -> usize {
        self.clouds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clouds.is_empty()
    }

    pub fn update(&mut self, dt: f64) {
        for cloud in &mut self.clouds {
            cloud.angle = (cloud.angle + cloud.speed * dt) % TAU;
        }
    }

    /// Per-frame instance poses, camera-relative per the precision policy.
    pub fn poses(&self, eye: Vec3) -> Vec<InstancePose> {
        self.clouds
            .iter()
            .map(|c| {
                let world = Vec3::new(
                    c.orbit_radius * c.angle.cos(),
                    c.altitude,
                    c.orbit_radius * c.angle.sin(),
                );
                InstancePose {
                    position_rel: camera_relative_f32(world, eye),
                    yaw_rad: c.angle as f32,
                    scale: [c.scale as f32; 3],
                }
            })
            .collect()
    }
}

/// Sun direction for the shading collaborator: fixed elevation, slow azimuth
/// drift so terrain shading shifts over a long session.
pub fn sun_direction(time_s: f64) -> [f32; 3] {
    let azimuth = 0.7 + time_s * 0.002;
    let elevation = 0.9f64;
    let dir = Vec3::new(
        elevation.cos() * azimuth.cos(),
        elevation.sin(),
        elevation.cos() * azimuth.sin(),
    )
    .normalized_or(Vec3::Y);
    [dir.x as f32, dir.y as f32, dir.z as f32]
}

#[cfg(test)]
mod tests {
    use super::{CloudLayer, build_cloud_mesh, build_sky_dome, sun_direction};
    use foundation::math::Vec3;

    #[test]
    fn dome_vertices_sit_on_the_radius() {
        let dome = build_sky_dome(500.0, 16);
        for p in &dome.positions {
            let r = (f64::from(p[0]).powi(2) + f64::from(p[1]).powi(2) + f64::from(p[2]).powi(2))
                .sqrt();
            assert!((r - 500.0).abs() < 0.5, "vertex off the dome: {r}");
        }
        assert!(dome.triangle_count() > 0);
    }

    #[test]
    fn cloud_generation_is_deterministic() {
        let a = CloudLayer::generate(7, 12, 200.0);
        let b = CloudLayer::generate(7, 12, 200.0);
        assert_eq!(a, b);
        assert_eq!(a.len(), 12);
        let c = CloudLayer::generate(8, 12, 200.0);
        assert_ne!(a, c);
    }

    #[test]
    fn clouds_drift_and_wrap() {
        let mut layer = CloudLayer::generate(7, 4, 200.0);
        let before = layer.poses(Vec3::ZERO);
        layer.update(10.0);
        let after = layer.poses(Vec3::ZERO);
        assert_ne!(before, after);
    }

    #[test]
    fn poses_are_camera_relative() {
        let layer = CloudLayer::generate(7, 1, 200.0);
        let at_origin = layer.poses(Vec3::ZERO);
        let offset = layer.poses(Vec3::new(10.0, 0.0, 0.0));
        let dx = at_origin[0].position_rel[0] - offset[0].position_rel[0];
        assert!((f64::from(dx) - 10.0).abs() < 1e-4);
    }

    #[test]
    fn sun_stays_above_the_horizon() {
        for t in [0.0, 100.0, 10_000.0] {
            let d = sun_direction(t);
            assert!(d[1] > 0.0);
        }
    }

    #[test]
    fn cloud_mesh_is_non_trivial() {
        assert!(build_cloud_mesh().triangle_count() >= 36);
    }
}
