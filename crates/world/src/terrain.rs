use foundation::math::{Vec2, Vec3, smoothstep};

use crate::mesh::MeshDescriptor;
use crate::noise::fbm;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TerrainSettings {
    /// Side length of the square terrain patch, centered on the origin.
    pub size: f64,
    /// Grid cells per side of the heightfield mesh.
    pub resolution: usize,
    /// Peak-to-valley scale applied to the fractal noise.
    pub amplitude: f64,
    /// World-units-to-noise-units scale.
    pub frequency: f64,
    /// Lateral half-width of the perfectly flat road corridor.
    pub road_width: f64,
    /// Width of the smoothstep band between road and open terrain.
    pub blend_width: f64,
    /// Height of the flat road surface.
    pub road_height: f64,
    pub seed: u64,
}

impl Default for TerrainSettings {
    fn default() -> Self {
        Self {
            size: 600.0,
            resolution: 128,
            amplitude: 14.0,
            frequency: 0.015,
            road_width: 6.0,
            blend_width: 14.0,
            road_height: 0.0,
            seed: 0x5EED,
        }
    }
}

/// Route samples used for lateral distance queries.
///
/// Built once from `Route::spaced_points`; the terrain never touches the
/// route again after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct RoadCorridor {
    samples: Vec<Vec3>,
    closed: bool,
}

impl RoadCorridor {
    pub fn new(samples: Vec<Vec3>, closed: bool) -> Self {
        Self { samples, closed }
    }

    pub fn samples(&self) -> &[Vec3] {
        &self.samples
    }

    /// Distance from `(x, z)` to the nearest corridor segment, measured in
    /// the ground plane.
    pub fn distance_xz(&self, x: f64, z: f64) -> f64 {
        if self.samples.is_empty() {
            return f64::INFINITY;
        }
        if self.samples.len() == 1 {
            let s = self.samples[0];
            return (Vec2::new(x, z) - Vec2::new(s.x, s.z)).length();
        }

        let p = Vec2::new(x, z);
        let mut best = f64::INFINITY;
        let count = if self.closed {
            self.samples.len()
        } else {
            self.samples.len() - 1
        };
        for i in 0..count {
            let a = self.samples[i];
            let b = self.samples[(i + 1) % self.samples.len()];
            let d = point_segment_distance(p, Vec2::new(a.x, a.z), Vec2::new(b.x, b.z));
            if d < best {
                best = d;
            }
        }
        best
    }
}

fn point_segment_distance(p: Vec2, a: Vec2, b: Vec2) -> f64 {
    let ab = b - a;
    let ap = p - a;
    let len2 = ab.x * ab.x + ab.y * ab.y;
    if len2 <= 1e-20 {
        return ap.length();
    }
    let t = ((ap.x * ab.x + ap.y * ab.y) / len2).clamp(0.0, 1.0);
    (p - (a + ab.scale(t))).length()
}

/// Deterministic heightfield with a flat road corridor.
#[derive(Debug, Clone, PartialEq)]
pub struct TerrainField {
    settings: TerrainSettings,
    corridor: RoadCorridor,
}

impl TerrainField {
    pub fn new(settings: TerrainSettings, corridor: RoadCorridor) -> Self {
        Self { settings, corridor }
    }

    pub fn corridor(&self) -> &RoadCorridor {
        &self.corridor
    }

    /// Terrain height at a ground position.
    ///
    /// Contract:
    /// - Pure: identical inputs give identical outputs.
    /// - Exactly `road_height` anywhere within `road_width` of the corridor.
    /// - Pure fractal height beyond `road_width + blend_width`.
    pub fn height_at(&self, x: f64, z: f64) -> f64 {
        let s = &self.settings;
        let hill = fbm(x * s.frequency, z * s.frequency, s.seed) * s.amplitude;
        let d = self.corridor.distance_xz(x, z);
        let blend = smoothstep(s.road_width, s.road_width + s.blend_width, d);
        s.road_height + (hill - s.road_height) * blend
    }

    /// Build the heightfield mesh. Normals come from central differences on
    /// the same height function, so lighting matches the geometry.
    pub fn build_mesh(&self) -> MeshDescriptor {
        let s = &self.settings;
        let n = s.resolution;
        let step = s.size / n as f64;
        let half = s.size * 0.5;

        let mut mesh = MeshDescriptor::new();
        for j in 0..=n {
            for i in 0..=n {
                let x = -half + i as f64 * step;
                let z = -half + j as f64 * step;
                let y = self.height_at(x, z);

                let dx = self.height_at(x + step, z) - self.height_at(x - step, z);
                let dz = self.height_at(x, z + step) - self.height_at(x, z - step);
                let normal = Vec3::new(-dx, 2.0 * step, -dz).normalized_or(Vec3::Y);

                let color = terrain_color(y, s.amplitude);
                mesh.push_vertex(Vec3::new(x, y, z), normal, color);
            }
        }

        let stride = (n + 1) as u32;
        for j in 0..n as u32 {
            for i in 0..n as u32 {
                let a = j * stride + i;
                let b = a + 1;
                let c = a + stride;
                let d = c + 1;
                mesh.push_triangle(a, c, b);
                mesh.push_triangle(b, c, d);
            }
        }
        mesh
    }
}

/// Valley-to-peak gradient: low ground is muted green, peaks go pale.
fn terrain_color(height: f64, amplitude: f64) -> [f32; 3] {
    let t = ((height / amplitude.max(1e-9)) * 0.5 + 0.5).clamp(0.0, 1.0) as f32;
    let low = [0.18, 0.34, 0.22];
    let high = [0.62, 0.64, 0.60];
    [
        low[0] + (high[0] - low[0]) * t,
        low[1] + (high[1] - low[1]) * t,
        low[2] + (high[2] - low[2]) * t,
    ]
}

/// Road ribbon along the corridor samples: a strip of quads offset left and
/// right of the path, floating just above the flattened ground.
pub fn build_road_ribbon(corridor: &RoadCorridor, width: f64, road_height: f64) -> MeshDescriptor {
    let samples = corridor.samples();
    let mut mesh = MeshDescriptor::new();
    if samples.len() < 2 {
        return mesh;
    }

    const SURFACE_LIFT: f64 = 0.03;
    let color = [0.12, 0.12, 0.14];
    let half = width * 0.5;

    let mut left = Vec::with_capacity(samples.len());
    let mut right = Vec::with_capacity(samples.len());
    for i in 0..samples.len() {
        let forward = if i + 1 < samples.len() {
            samples[i + 1] - samples[i]
        } else {
            samples[i] - samples[i - 1]
        };
        let side = forward.cross(Vec3::Y).normalized_or(Vec3::X).scale(half);
        let base = Vec3::new(samples[i].x, road_height + SURFACE_LIFT, samples[i].z);
        left.push(base - side);
        right.push(base + side);
    }

    for i in 0..samples.len() - 1 {
        mesh.push_quad(
            [left[i], right[i], right[i + 1], left[i + 1]],
            Vec3::Y,
            color,
        );
    }
    mesh
}

#[cfg(test)]
mod tests {
    use super::{RoadCorridor, TerrainField, TerrainSettings, build_road_ribbon};
    use foundation::math::Vec3;

    fn straight_corridor() -> RoadCorridor {
        // Path straight down the z axis.
        let samples = (0..=10)
            .map(|i| Vec3::new(0.0, 0.0, i as f64 * 10.0))
            .collect();
        RoadCorridor::new(samples, false)
    }

    #[test]
    fn height_is_deterministic() {
        let field = TerrainField::new(TerrainSettings::default(), straight_corridor());
        assert_eq!(field.height_at(123.4, -56.7), field.height_at(123.4, -56.7));
    }

    #[test]
    fn road_corridor_is_exactly_flat() {
        let settings = TerrainSettings::default();
        let field = TerrainField::new(settings, straight_corridor());
        // Points within road_width of the path.
        for (x, z) in [(0.0, 50.0), (3.0, 20.0), (-5.9, 80.0)] {
            assert_eq!(
                field.height_at(x, z),
                settings.road_height,
                "({x}, {z}) should sit on the flat road"
            );
        }
    }

    #[test]
    fn far_terrain_is_pure_fractal() {
        let settings = TerrainSettings::default();
        let field = TerrainField::new(settings, straight_corridor());
        let x = 200.0;
        let z = 50.0;
        let raw =
            crate::noise::fbm(x * settings.frequency, z * settings.frequency, settings.seed)
                * settings.amplitude;
        assert!((field.height_at(x, z) - raw).abs() < 1e-12);
    }

    #[test]
    fn blend_band_is_between_road_and_fractal() {
        let settings = TerrainSettings {
            road_width: 6.0,
            blend_width: 14.0,
            ..TerrainSettings::default()
        };
        let field = TerrainField::new(settings, straight_corridor());
        // Inside the blend band the height sits between the two extremes.
        let x = 12.0;
        let z = 40.0;
        let raw =
            crate::noise::fbm(x * settings.frequency, z * settings.frequency, settings.seed)
                * settings.amplitude;
        let h = field.height_at(x, z);
        let (lo, hi) = if raw < settings.road_height {
            (raw, settings.road_height)
        } else {
            (settings.road_height, raw)
        };
        assert!(h >= lo && h <= hi, "{h} outside [{lo}, {hi}]");
    }

    #[test]
    fn corridor_distance_handles_closed_loops() {
        let square = vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(10.0, 0.0, 0.0),
            Vec3::new(10.0, 0.0, 10.0),
            Vec3::new(0.0, 0.0, 10.0),
        ];
        let open = RoadCorridor::new(square.clone(), false);
        let closed = RoadCorridor::new(square, true);
        // A point near the closing edge (x=0 side).
        let (x, z) = (-1.0, 5.0);
        assert!(closed.distance_xz(x, z) < open.distance_xz(x, z));
        assert!((closed.distance_xz(x, z) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn heightfield_mesh_has_expected_size() {
        let settings = TerrainSettings {
            resolution: 8,
            ..TerrainSettings::default()
        };
        let field = TerrainField::new(settings, straight_corridor());
        let mesh = field.build_mesh();
        assert_eq!(mesh.vertex_count(), 81);
        assert_eq!(mesh.triangle_count(), 128);
    }

    #[test]
    fn ribbon_follows_samples() {
        let ribbon = build_road_ribbon(&straight_corridor(), 8.0, 0.0);
        assert_eq!(ribbon.triangle_count(), 20);
        let b = ribbon.bounds().expect("non-empty");
        assert!((b.min.x - -4.0).abs() < 1e-6);
        assert!((b.max.x - 4.0).abs() < 1e-6);
    }
}
