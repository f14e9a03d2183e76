use foundation::math::{Mat4, Vec3};

/// Projection parameters.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Lens {
    pub fov_y_rad: f64,
    pub near: f64,
    pub far: f64,
}

impl Default for Lens {
    fn default() -> Self {
        Self {
            fov_y_rad: 55f64.to_radians(),
            near: 0.1,
            far: 2000.0,
        }
    }
}

/// Camera placement for one frame.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CameraPose {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
}

impl CameraPose {
    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn view_proj(&self, lens: Lens, aspect: f64) -> Mat4 {
        Mat4::perspective_rh_z0(lens.fov_y_rad, aspect, lens.near, lens.far).mul(self.view())
    }

    /// Unit forward direction; `None` when eye and target coincide.
    pub fn forward(&self) -> Option<Vec3> {
        (self.target - self.eye).normalized()
    }
}
