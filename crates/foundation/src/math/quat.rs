use super::Vec3;

/// Unit quaternion for 3D orientation.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Quat {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub w: f64,
}

impl Quat {
    pub const IDENTITY: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
        w: 1.0,
    };

    pub fn new(x: f64, y: f64, z: f64, w: f64) -> Self {
        Self { x, y, z, w }
    }

    pub fn from_axis_angle(axis: Vec3, angle_rad: f64) -> Self {
        let Some(axis) = axis.normalized() else {
            return Self::IDENTITY;
        };
        let half = angle_rad * 0.5;
        let s = half.sin();
        Self::new(axis.x * s, axis.y * s, axis.z * s, half.cos())
    }

    /// Rotation taking unit vector `a` onto unit vector `b`.
    pub fn from_unit_vectors(a: Vec3, b: Vec3) -> Self {
        let dot = a.dot(b).clamp(-1.0, 1.0);

        // Nearly opposite: pick an arbitrary orthogonal axis.
        if dot < -0.999999 {
            let mut axis = Vec3::X.cross(a);
            if axis.length_squared() < 1e-12 {
                axis = Vec3::Y.cross(a);
            }
            let axis = axis.normalized_or(Vec3::Y);
            return Self::new(axis.x, axis.y, axis.z, 0.0);
        }

        // Nearly identical: identity.
        if dot > 0.999999 {
            return Self::IDENTITY;
        }

        let axis = a.cross(b);
        Self::new(axis.x, axis.y, axis.z, 1.0 + dot).normalized()
    }

    /// Orientation whose -Z looks along `forward` with `up` as the vertical
    /// reference. Falls back to world axes when the inputs are degenerate.
    pub fn look_rotation(forward: Vec3, up: Vec3) -> Self {
        let f = forward.normalized_or(Vec3::Z);
        let r = up.cross(f).normalized_or(Vec3::X);
        let u = f.cross(r);
        Self::from_basis(r, u, f)
    }

    /// Orientation from an orthonormal right/up/forward basis.
    pub fn from_basis(right: Vec3, up: Vec3, forward: Vec3) -> Self {
        // Shepperd's method on the column-basis rotation matrix.
        let (m00, m01, m02) = (right.x, up.x, forward.x);
        let (m10, m11, m12) = (right.y, up.y, forward.y);
        let (m20, m21, m22) = (right.z, up.z, forward.z);

        let trace = m00 + m11 + m22;
        let q = if trace > 0.0 {
            let s = (trace + 1.0).sqrt() * 2.0;
            Self::new(
                (m21 - m12) / s,
                (m02 - m20) / s,
                (m10 - m01) / s,
                0.25 * s,
            )
        } else if m00 > m11 && m00 > m22 {
            let s = (1.0 + m00 - m11 - m22).sqrt() * 2.0;
            Self::new(
                0.25 * s,
                (m01 + m10) / s,
                (m02 + m20) / s,
                (m21 - m12) / s,
            )
        } else if m11 > m22 {
            let s = (1.0 + m11 - m00 - m22).sqrt() * 2.0;
            Self::new(
                (m01 + m10) / s,
                0.25 * s,
                (m12 + m21) / s,
                (m02 - m20) / s,
            )
        } else {
            let s = (1.0 + m22 - m00 - m11).sqrt() * 2.0;
            Self::new(
                (m02 + m20) / s,
                (m12 + m21) / s,
                0.25 * s,
                (m10 - m01) / s,
            )
        };
        q.normalized()
    }

    pub fn mul(self, other: Self) -> Self {
        Self::new(
            self.w * other.x + self.x * other.w + self.y * other.z - self.z * other.y,
            self.w * other.y - self.x * other.z + self.y * other.w + self.z * other.x,
            self.w * other.z + self.x * other.y - self.y * other.x + self.z * other.w,
            self.w * other.w - self.x * other.x - self.y * other.y - self.z * other.z,
        )
    }

    pub fn normalized(self) -> Self {
        let n = (self.x * self.x + self.y * self.y + self.z * self.z + self.w * self.w).sqrt();
        if n > 1e-10 {
            Self::new(self.x / n, self.y / n, self.z / n, self.w / n)
        } else {
            Self::IDENTITY
        }
    }

    /// Rotate a vector by this (unit) quaternion.
    pub fn rotate(self, v: Vec3) -> Vec3 {
        let qv = Vec3::new(self.x, self.y, self.z);
        let t = qv.cross(v).scale(2.0);
        v + t.scale(self.w) + qv.cross(t)
    }

    /// Spherical linear interpolation.
    pub fn slerp(self, other: Self, t: f64) -> Self {
        let mut dot =
            self.x * other.x + self.y * other.y + self.z * other.z + self.w * other.w;

        // Negate one side so we take the shorter arc.
        let mut other = other;
        if dot < 0.0 {
            other = Self::new(-other.x, -other.y, -other.z, -other.w);
            dot = -dot;
        }

        // Close orientations: linear blend avoids a divide by tiny sin.
        if dot > 0.9995 {
            return Self::new(
                self.x + t * (other.x - self.x),
                self.y + t * (other.y - self.y),
                self.z + t * (other.z - self.z),
                self.w + t * (other.w - self.w),
            )
            .normalized();
        }

        let theta_0 = dot.clamp(-1.0, 1.0).acos();
        let theta = theta_0 * t;
        let sin_theta = theta.sin();
        let sin_theta_0 = theta_0.sin();

        let s0 = theta.cos() - dot * sin_theta / sin_theta_0;
        let s1 = sin_theta / sin_theta_0;

        Self::new(
            s0 * self.x + s1 * other.x,
            s0 * self.y + s1 * other.y,
            s0 * self.z + s1 * other.z,
            s0 * self.w + s1 * other.w,
        )
    }
}
