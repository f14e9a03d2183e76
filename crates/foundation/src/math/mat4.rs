use super::Vec3;

/// Column-major 4x4 matrix, f64 CPU precision.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Mat4 {
    pub cols: [[f64; 4]; 4],
}

impl Mat4 {
    pub const IDENTITY: Self = Self {
        cols: [
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ],
    };

    pub fn mul(self, other: Self) -> Self {
        let a = self.cols;
        let b = other.cols;
        let mut c = [[0.0f64; 4]; 4];
        for col in 0..4 {
            for row in 0..4 {
                c[col][row] = a[0][row] * b[col][0]
                    + a[1][row] * b[col][1]
                    + a[2][row] * b[col][2]
                    + a[3][row] * b[col][3];
            }
        }
        Self { cols: c }
    }

    /// Right-handed look-at view matrix.
    ///
    /// Falls back to world axes when `target - eye` or `up` is degenerate.
    pub fn look_at_rh(eye: Vec3, target: Vec3, up: Vec3) -> Self {
        let f = (target - eye).normalized_or(Vec3::Z);
        let s = f.cross(up).normalized_or(Vec3::X);
        let u = s.cross(f);

        let ex = -s.dot(eye);
        let ey = -u.dot(eye);
        let ez = f.dot(eye);

        Self {
            cols: [
                [s.x, u.x, -f.x, 0.0],
                [s.y, u.y, -f.y, 0.0],
                [s.z, u.z, -f.z, 0.0],
                [ex, ey, ez, 1.0],
            ],
        }
    }

    /// Right-handed perspective projection with zero-to-one depth.
    pub fn perspective_rh_z0(fov_y_rad: f64, aspect: f64, near: f64, far: f64) -> Self {
        let f = 1.0 / (0.5 * fov_y_rad).tan();
        let m00 = f / aspect.max(1e-6);
        let m22 = far / (near - far);
        let m23 = (near * far) / (near - far);

        Self {
            cols: [
                [m00, 0.0, 0.0, 0.0],
                [0.0, f, 0.0, 0.0],
                [0.0, 0.0, m22, -1.0],
                [0.0, 0.0, m23, 0.0],
            ],
        }
    }

    /// Transform a point, returning homogeneous clip coordinates.
    pub fn transform_point(self, p: Vec3) -> [f64; 4] {
        let c = self.cols;
        [
            c[0][0] * p.x + c[1][0] * p.y + c[2][0] * p.z + c[3][0],
            c[0][1] * p.x + c[1][1] * p.y + c[2][1] * p.z + c[3][1],
            c[0][2] * p.x + c[1][2] * p.y + c[2][2] * p.z + c[3][2],
            c[0][3] * p.x + c[1][3] * p.y + c[2][3] * p.z + c[3][3],
        ]
    }

    /// Project a point to normalized device coordinates.
    ///
    /// Returns `None` when the point is on or behind the eye plane (w <= 0),
    /// where the perspective divide is meaningless.
    pub fn project_point(self, p: Vec3) -> Option<Vec3> {
        let [x, y, z, w] = self.transform_point(p);
        if w <= 1e-9 {
            return None;
        }
        Some(Vec3::new(x / w, y / w, z / w))
    }

    /// f32 column-major copy for the GPU boundary.
    pub fn to_f32_cols(self) -> [[f32; 4]; 4] {
        let mut out = [[0.0f32; 4]; 4];
        for col in 0..4 {
            for row in 0..4 {
                out[col][row] = self.cols[col][row] as f32;
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::Mat4;
    use crate::math::Vec3;

    #[test]
    fn identity_multiplication() {
        let m = Mat4::perspective_rh_z0(1.0, 1.5, 0.1, 100.0);
        assert_eq!(Mat4::IDENTITY.mul(m), m);
        assert_eq!(m.mul(Mat4::IDENTITY), m);
    }

    #[test]
    fn look_at_moves_eye_to_origin() {
        let view = Mat4::look_at_rh(
            Vec3::new(0.0, 0.0, 10.0),
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::Y,
        );
        let [x, y, z, w] = view.transform_point(Vec3::new(0.0, 0.0, 10.0));
        assert!(x.abs() < 1e-12 && y.abs() < 1e-12 && z.abs() < 1e-12);
        assert_eq!(w, 1.0);
    }

    #[test]
    fn point_in_front_projects_to_center() {
        let view = Mat4::look_at_rh(
            Vec3::new(0.0, 0.0, 10.0),
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::Y,
        );
        let proj = Mat4::perspective_rh_z0(1.0, 1.0, 0.1, 100.0);
        let ndc = proj.mul(view).project_point(Vec3::ZERO).expect("in front");
        assert!(ndc.x.abs() < 1e-9);
        assert!(ndc.y.abs() < 1e-9);
        assert!(ndc.z > 0.0 && ndc.z < 1.0);
    }

    #[test]
    fn point_behind_eye_is_rejected() {
        let view = Mat4::look_at_rh(
            Vec3::new(0.0, 0.0, 10.0),
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::Y,
        );
        let proj = Mat4::perspective_rh_z0(1.0, 1.0, 0.1, 100.0);
        assert!(
            proj.mul(view)
                .project_point(Vec3::new(0.0, 0.0, 20.0))
                .is_none()
        );
    }
}
