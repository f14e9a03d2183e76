use foundation::bounds::Aabb3;
use foundation::math::{Quat, Vec3};

/// CPU-side triangle mesh handed to the rendering collaborator.
///
/// Positions are world-space f32 (static geometry is uploaded once; the
/// renderer re-bases per frame). Flat arrays, no submeshes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshDescriptor {
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub colors: Vec<[f32; 3]>,
    pub indices: Vec<u32>,
}

impl MeshDescriptor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn push_vertex(&mut self, position: Vec3, normal: Vec3, color: [f32; 3]) -> u32 {
        let index = self.positions.len() as u32;
        self.positions
            .push([position.x as f32, position.y as f32, position.z as f32]);
        self.normals
            .push([normal.x as f32, normal.y as f32, normal.z as f32]);
        self.colors.push(color);
        index
    }

    pub fn push_triangle(&mut self, a: u32, b: u32, c: u32) {
        self.indices.extend_from_slice(&[a, b, c]);
    }

    /// Two triangles over `corners`, wound counter-clockwise as seen from
    /// the `normal` side. Corner order: counter-clockwise.
    pub fn push_quad(&mut self, corners: [Vec3; 4], normal: Vec3, color: [f32; 3]) {
        let i0 = self.push_vertex(corners[0], normal, color);
        let i1 = self.push_vertex(corners[1], normal, color);
        let i2 = self.push_vertex(corners[2], normal, color);
        let i3 = self.push_vertex(corners[3], normal, color);
        self.push_triangle(i0, i1, i2);
        self.push_triangle(i0, i2, i3);
    }

    /// Axis-aligned box in local coordinates before transform helpers.
    pub fn push_box(&mut self, center: Vec3, half: Vec3, color: [f32; 3]) {
        let c = center;
        let h = half;
        // +X / -X
        self.push_quad(
            [
                Vec3::new(c.x + h.x, c.y - h.y, c.z - h.z),
                Vec3::new(c.x + h.x, c.y + h.y, c.z - h.z),
                Vec3::new(c.x + h.x, c.y + h.y, c.z + h.z),
                Vec3::new(c.x + h.x, c.y - h.y, c.z + h.z),
            ],
            Vec3::X,
            color,
        );
        self.push_quad(
            [
                Vec3::new(c.x - h.x, c.y - h.y, c.z + h.z),
                Vec3::new(c.x - h.x, c.y + h.y, c.z + h.z),
                Vec3::new(c.x - h.x, c.y + h.y, c.z - h.z),
                Vec3::new(c.x - h.x, c.y - h.y, c.z - h.z),
            ],
            -Vec3::X,
            color,
        );
        // +Y / -Y
        self.push_quad(
            [
                Vec3::new(c.x - h.x, c.y + h.y, c.z - h.z),
                Vec3::new(c.x - h.x, c.y + h.y, c.z + h.z),
                Vec3::new(c.x + h.x, c.y + h.y, c.z + h.z),
                Vec3::new(c.x + h.x, c.y + h.y, c.z - h.z),
            ],
            Vec3::Y,
            color,
        );
        self.push_quad(
            [
                Vec3::new(c.x - h.x, c.y - h.y, c.z + h.z),
                Vec3::new(c.x - h.x, c.y - h.y, c.z - h.z),
                Vec3::new(c.x + h.x, c.y - h.y, c.z - h.z),
                Vec3::new(c.x + h.x, c.y - h.y, c.z + h.z),
            ],
            -Vec3::Y,
            color,
        );
        // +Z / -Z
        self.push_quad(
            [
                Vec3::new(c.x - h.x, c.y - h.y, c.z + h.z),
                Vec3::new(c.x + h.x, c.y - h.y, c.z + h.z),
                Vec3::new(c.x + h.x, c.y + h.y, c.z + h.z),
                Vec3::new(c.x - h.x, c.y + h.y, c.z + h.z),
            ],
            Vec3::Z,
            color,
        );
        self.push_quad(
            [
                Vec3::new(c.x + h.x, c.y - h.y, c.z - h.z),
                Vec3::new(c.x - h.x, c.y - h.y, c.z - h.z),
                Vec3::new(c.x - h.x, c.y + h.y, c.z - h.z),
                Vec3::new(c.x + h.x, c.y + h.y, c.z - h.z),
            ],
            -Vec3::Z,
            color,
        );
    }

    /// Append `other` rotated then translated into this mesh.
    pub fn append_transformed(&mut self, other: &Self, translation: Vec3, rotation: Quat) {
        let base = self.positions.len() as u32;
        for i in 0..other.positions.len() {
            let p = other.positions[i];
            let n = other.normals[i];
            let p = rotation.rotate(Vec3::new(f64::from(p[0]), f64::from(p[1]), f64::from(p[2])))
                + translation;
            let n = rotation.rotate(Vec3::new(f64::from(n[0]), f64::from(n[1]), f64::from(n[2])));
            self.positions.push([p.x as f32, p.y as f32, p.z as f32]);
            self.normals.push([n.x as f32, n.y as f32, n.z as f32]);
            self.colors.push(other.colors[i]);
        }
        for idx in &other.indices {
            self.indices.push(base + idx);
        }
    }

    pub fn bounds(&self) -> Option<Aabb3> {
        Aabb3::from_points(
            self.positions
                .iter()
                .map(|p| Vec3::new(f64::from(p[0]), f64::from(p[1]), f64::from(p[2]))),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::MeshDescriptor;
    use foundation::math::{Quat, Vec3};

    #[test]
    fn quad_produces_two_triangles() {
        let mut m = MeshDescriptor::new();
        m.push_quad(
            [
                Vec3::new(0.0, 0.0, 0.0),
                Vec3::new(1.0, 0.0, 0.0),
                Vec3::new(1.0, 1.0, 0.0),
                Vec3::new(0.0, 1.0, 0.0),
            ],
            Vec3::Z,
            [1.0, 0.0, 0.0],
        );
        assert_eq!(m.vertex_count(), 4);
        assert_eq!(m.triangle_count(), 2);
    }

    #[test]
    fn box_has_six_faces() {
        let mut m = MeshDescriptor::new();
        m.push_box(Vec3::ZERO, Vec3::new(1.0, 2.0, 3.0), [0.5; 3]);
        assert_eq!(m.vertex_count(), 24);
        assert_eq!(m.triangle_count(), 12);
        let b = m.bounds().expect("non-empty");
        assert_eq!(b.min, Vec3::new(-1.0, -2.0, -3.0));
        assert_eq!(b.max, Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn append_transformed_offsets_indices_and_positions() {
        let mut part = MeshDescriptor::new();
        part.push_quad(
            [
                Vec3::new(-1.0, -1.0, 0.0),
                Vec3::new(1.0, -1.0, 0.0),
                Vec3::new(1.0, 1.0, 0.0),
                Vec3::new(-1.0, 1.0, 0.0),
            ],
            Vec3::Z,
            [1.0; 3],
        );

        let mut scene = MeshDescriptor::new();
        scene.push_vertex(Vec3::ZERO, Vec3::Y, [0.0; 3]);
        scene.append_transformed(&part, Vec3::new(10.0, 0.0, 0.0), Quat::IDENTITY);

        assert_eq!(scene.vertex_count(), 5);
        assert_eq!(scene.indices, vec![1, 2, 3, 1, 3, 4]);
        assert_eq!(scene.positions[1], [9.0, -1.0, 0.0]);
    }

    #[test]
    fn append_transformed_rotates_normals() {
        let mut part = MeshDescriptor::new();
        part.push_vertex(Vec3::X, Vec3::Z, [1.0; 3]);

        let mut out = MeshDescriptor::new();
        let quarter = Quat::from_axis_angle(Vec3::Y, std::f64::consts::FRAC_PI_2);
        out.append_transformed(&part, Vec3::ZERO, quarter);

        // +Z rotated a quarter turn around Y lands on +X.
        let n = out.normals[0];
        assert!((f64::from(n[0]) - 1.0).abs() < 1e-6);
        assert!(f64::from(n[2]).abs() < 1e-6);
    }
}
