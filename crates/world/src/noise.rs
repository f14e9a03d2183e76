//! Deterministic value noise.
//!
//! Terrain is built once and never regenerated, so the noise must be a pure
//! function of its inputs: same `(x, z, seed)` in, same height out, on every
//! platform. Lattice values come from an integer hash, not a RNG.

use foundation::math::smoothstep;

/// Octaves of the fractal sum.
const OCTAVES: u32 = 5;

/// Amplitude falloff per octave.
const GAIN: f64 = 0.48;

/// Frequency growth per octave. Deliberately not 2.0 so octave lattices
/// never line up and produce grid artifacts.
const LACUNARITY: f64 = 2.1;

/// Hash a lattice corner to a value in [-1, 1].
pub(crate) fn lattice(ix: i64, iz: i64, seed: u64) -> f64 {
    let mut h = (ix as u64)
        .wrapping_mul(0x9E37_79B9_7F4A_7C15)
        .wrapping_add((iz as u64).wrapping_mul(0xC2B2_AE3D_27D4_EB4F))
        .wrapping_add(seed.wrapping_mul(0xD6E8_FEB8_6659_FD93));
    h ^= h >> 32;
    h = h.wrapping_mul(0xD6E8_FEB8_6659_FD93);
    h ^= h >> 29;
    // Top 53 bits to a float in [0, 1), then to [-1, 1].
    (h >> 11) as f64 / (1u64 << 53) as f64 * 2.0 - 1.0
}

/// Single-octave value noise: smoothstep-interpolated lattice values.
pub fn value_noise(x: f64, z: f64, seed: u64) -> f64 {
    let ix = x.floor() as i64;
    let iz = z.floor() as i64;
    let fx = x - x.floor();
    let fz = z - z.floor();

    let wx = smoothstep(0.0, 1.0, fx);
    let wz = smoothstep(0.0, 1.0, fz);

    let v00 = lattice(ix, iz, seed);
    let v10 = lattice(ix + 1, iz, seed);
    let v01 = lattice(ix, iz + 1, seed);
    let v11 = lattice(ix + 1, iz + 1, seed);

    let bottom = v00 + (v10 - v00) * wx;
    let top = v01 + (v11 - v01) * wx;
    bottom + (top - bottom) * wz
}

/// Fractal Brownian motion: five octaves of value noise.
///
/// Output stays within ±sum of amplitudes (≈ ±1.88 for these constants).
pub fn fbm(x: f64, z: f64, seed: u64) -> f64 {
    let mut value = 0.0;
    let mut amplitude = 1.0;
    let mut frequency = 1.0;
    for octave in 0..OCTAVES {
        let octave_seed = seed.wrapping_add(u64::from(octave).wrapping_mul(0x9E37_79B9));
        value += amplitude * value_noise(x * frequency, z * frequency, octave_seed);
        amplitude *= GAIN;
        frequency *= LACUNARITY;
    }
    value
}

#[cfg(test)]
mod tests {
    use super::{fbm, lattice, value_noise};

    #[test]
    fn noise_is_idempotent() {
        let a = fbm(12.34, -56.78, 7);
        let b = fbm(12.34, -56.78, 7);
        assert_eq!(a, b);
        assert_eq!(value_noise(0.5, 0.5, 1), value_noise(0.5, 0.5, 1));
    }

    #[test]
    fn seeds_decorrelate() {
        assert_ne!(fbm(3.0, 4.0, 1), fbm(3.0, 4.0, 2));
        assert_ne!(lattice(5, 9, 1), lattice(9, 5, 1));
    }

    #[test]
    fn noise_interpolates_lattice_corners() {
        // At integer coordinates the noise equals the corner hash exactly.
        let v = value_noise(3.0, -2.0, 42);
        assert_eq!(v, lattice(3, -2, 42));
    }

    #[test]
    fn fbm_stays_bounded() {
        // Sum of amplitudes: 1 + .48 + .48^2 + .48^3 + .48^4
        let bound = 1.0 + 0.48 + 0.48f64.powi(2) + 0.48f64.powi(3) + 0.48f64.powi(4);
        for i in 0..200 {
            for j in 0..200 {
                let v = fbm(i as f64 * 0.37, j as f64 * 0.53, 99);
                assert!(v.abs() <= bound, "fbm out of range: {v}");
            }
        }
    }

    #[test]
    fn negative_coordinates_are_continuous() {
        // No seam at zero: tiny steps across the axis stay tiny in value.
        let eps = 1e-4;
        let a = value_noise(-eps, 0.5, 3);
        let b = value_noise(eps, 0.5, 3);
        assert!((a - b).abs() < 0.01, "seam at x=0: {a} vs {b}");
    }
}
