pub mod mat4;
pub mod precision;
pub mod quat;
pub mod smoothing;
pub mod vec;

pub use mat4::Mat4;
pub use precision::{StableF64, canonical_f64, stable_total_cmp_f64};
pub use quat::Quat;
pub use smoothing::{damp_towards, lerp, smoothstep, wrap_unit, wrapped_delta};
pub use vec::{Vec2, Vec3};
