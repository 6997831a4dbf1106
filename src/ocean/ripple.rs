//! Wind-driven ripple detail layered on top of the Gerstner swell.

use glam::{Vec2, Vec3};
use noise::{NoiseFn, Perlin};

use crate::params::RippleParams;

/// How fast the ripple pattern evolves in place, independent of wind scroll
const RIPPLE_EVOLUTION_RATE: f32 = 0.35;

/// Perlin lattice period; the pattern repeats every 256 cells on each axis
const PERLIN_PERIOD: f64 = 256.0;

/// Fold a sample coordinate into one lattice period.
///
/// `Perlin::get` panics once a coordinate no longer fits in `isize`.
fn wrap_coordinate(value: f64) -> f64 {
    value.rem_euclid(PERLIN_PERIOD)
}

/// Perlin fBm sampler for small-scale surface ripples
pub struct RippleNoise {
    perlin: Perlin,
}

impl RippleNoise {
    pub fn new(seed: u32) -> Self {
        Self {
            perlin: Perlin::new(seed),
        }
    }

    /// Ripple elevation at (x, z), within ±`strength` meters.
    ///
    /// Non-finite inputs yield a flat (0) ripple.
    pub fn height(&self, params: &RippleParams, time_s: f32, x: f32, z: f32) -> f32 {
        if !params.enabled || !params.strength.is_finite() || params.strength <= 0.0 {
            return 0.0;
        }

        // Scroll the pattern downwind
        let scroll = params.wind_direction * params.wind_speed_m_per_s * time_s;
        let p = (Vec2::new(x, z) - scroll) / params.scale.max(RippleParams::MIN_SCALE);
        let w = time_s * RIPPLE_EVOLUTION_RATE;
        if !p.is_finite() || !w.is_finite() {
            return 0.0;
        }

        let octaves = params
            .octaves
            .clamp(RippleParams::MIN_OCTAVES, RippleParams::MAX_OCTAVES);
        let w = wrap_coordinate(w as f64);

        let mut total = 0.0_f32;
        let mut norm = 0.0_f32;
        let mut amplitude = 1.0_f32;
        let mut frequency = 1.0_f64;
        for _ in 0..octaves {
            let sample = self.perlin.get([
                wrap_coordinate(p.x as f64 * frequency),
                wrap_coordinate(p.y as f64 * frequency),
                w,
            ]) as f32;
            total += sample * amplitude;
            norm += amplitude;
            amplitude *= 0.5;
            frequency *= 2.0;
        }

        (total / norm).clamp(-1.0, 1.0) * params.strength
    }

    /// Ripple slope (∂h/∂x, ∂h/∂z) by central differences
    pub fn slope(&self, params: &RippleParams, time_s: f32, x: f32, z: f32) -> Vec2 {
        if !params.enabled || params.strength <= 0.0 {
            return Vec2::ZERO;
        }

        let e = params
            .normal_sample_offset_m
            .max(RippleParams::MIN_NORMAL_SAMPLE_OFFSET_M);
        let dx = self.height(params, time_s, x + e, z) - self.height(params, time_s, x - e, z);
        let dz = self.height(params, time_s, x, z + e) - self.height(params, time_s, x, z - e);
        Vec2::new(dx, dz) / (2.0 * e)
    }

    /// Tilt a base normal by the ripple slope at (x, z)
    pub fn perturb_normal(
        &self,
        params: &RippleParams,
        time_s: f32,
        x: f32,
        z: f32,
        normal: Vec3,
    ) -> Vec3 {
        let slope = self.slope(params, time_s, x, z);
        (normal + Vec3::new(-slope.x, 0.0, -slope.y))
            .try_normalize()
            .unwrap_or(normal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_ripples_are_flat() {
        let noise = RippleNoise::new(7);
        let params = RippleParams {
            enabled: false,
            ..RippleParams::default()
        };
        assert_eq!(noise.height(&params, 1.0, 3.3, 4.4), 0.0);
        assert_eq!(
            noise.perturb_normal(&params, 1.0, 3.3, 4.4, Vec3::Y),
            Vec3::Y
        );
    }

    #[test]
    fn test_ripple_height_bounded_by_strength() {
        let noise = RippleNoise::new(42);
        let params = RippleParams {
            strength: 0.2,
            octaves: 6,
            ..RippleParams::default()
        };
        for i in 0..200 {
            let x = i as f32 * 0.37;
            let z = i as f32 * -0.53;
            let h = noise.height(&params, i as f32 * 0.1, x, z);
            assert!(h.is_finite());
            assert!(h.abs() <= params.strength + 1e-4);
        }
    }

    #[test]
    fn test_ripples_are_deterministic_per_seed() {
        let params = RippleParams::default();
        let a = RippleNoise::new(3);
        let b = RippleNoise::new(3);
        for i in 0..20 {
            let x = i as f32 * 1.7 + 0.31;
            assert_eq!(
                a.height(&params, 2.0, x, 0.77),
                b.height(&params, 2.0, x, 0.77)
            );
        }
    }

    #[test]
    fn test_far_and_nan_points_stay_finite() {
        let noise = RippleNoise::new(1);
        let params = RippleParams::default();

        let far = noise.height(&params, 0.5, 5.0e18, 0.0);
        assert!(far.is_finite());
        assert!(far.abs() <= params.strength + 1e-4);
        assert_eq!(noise.height(&params, 0.5, f32::NAN, 1.0), 0.0);
        assert_eq!(noise.height(&params, f32::INFINITY, 1.0, 1.0), 0.0);

        let n = noise.perturb_normal(&params, 0.5, -3.0e20, 7.0e19, Vec3::Y);
        assert!((n.length() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_unvalidated_octaves_are_capped() {
        let noise = RippleNoise::new(9);
        let wild = RippleParams {
            octaves: 200,
            ..RippleParams::default()
        };
        let capped = RippleParams {
            octaves: RippleParams::MAX_OCTAVES,
            ..RippleParams::default()
        };
        for i in 0..10 {
            let x = i as f32 * 3.1 + 0.2;
            assert_eq!(
                noise.height(&wild, 1.0, x, -x),
                noise.height(&capped, 1.0, x, -x)
            );
        }
    }

    #[test]
    fn test_perturbed_normal_is_unit() {
        let noise = RippleNoise::new(11);
        let params = RippleParams {
            strength: 1.0,
            ..RippleParams::default()
        };
        for i in 0..50 {
            let n = noise.perturb_normal(&params, 0.5, i as f32 * 0.29, 1.1, Vec3::Y);
            assert!((n.length() - 1.0).abs() < 1e-5);
            assert!(n.y > 0.0);
        }
    }
}
