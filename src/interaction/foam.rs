//! Decorative foam particles seeded by splashes and wakes.
//!
//! Particles drift on the horizontal plane and fade out; they are not coupled
//! to the height field. Scatter comes from an injected seedable RNG so a given
//! seed always yields the same foam.

use std::f32::consts::TAU;

use glam::Vec3;
use log::trace;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Maximum live foam particles per surface
pub const MAX_FOAM_PARTICLES: usize = 1000;

/// Particles spawned per unit of foam amount
pub const PARTICLES_PER_AMOUNT: f32 = 20.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FoamParticle {
    pub position: Vec3,
    /// Drift velocity (m/s); y is always 0
    pub velocity: Vec3,
    pub size_m: f32,
    /// Opacity in [0, 1]
    pub alpha: f32,
    pub decay_rate: f32,
    pub remaining_lifetime_s: f32,
}

impl FoamParticle {
    /// Age by `delta_s`. Returns false once the lifetime is used up.
    ///
    /// Non-positive or non-finite steps leave the particle untouched.
    pub fn advance(&mut self, delta_s: f32) -> bool {
        if !delta_s.is_finite() || delta_s <= 0.0 {
            return self.remaining_lifetime_s > 0.0;
        }
        self.remaining_lifetime_s -= delta_s;
        if self.remaining_lifetime_s <= 0.0 {
            return false;
        }
        self.position += self.velocity * delta_s;
        self.alpha *= (-self.decay_rate * delta_s).exp();
        true
    }
}

/// Number of particles a spawn request asks for before capacity clipping.
///
/// Rounds half to even; non-positive or non-finite amounts yield 0.
pub fn requested_particle_count(amount: f32) -> usize {
    let scaled = (amount * PARTICLES_PER_AMOUNT).round_ties_even();
    if scaled.is_finite() && scaled > 0.0 {
        scaled as usize
    } else {
        0
    }
}

/// Dense, fixed-capacity foam storage with its own RNG
#[derive(Debug, Clone)]
pub struct FoamPool {
    particles: Vec<FoamParticle>,
    capacity: usize,
    rng: ChaCha8Rng,
}

impl FoamPool {
    pub fn new(capacity: usize, rng: ChaCha8Rng) -> Self {
        Self {
            particles: Vec::with_capacity(capacity),
            capacity,
            rng,
        }
    }

    /// Default-capacity pool seeded from `seed`
    pub fn seeded(seed: u64) -> Self {
        Self::new(MAX_FOAM_PARTICLES, ChaCha8Rng::seed_from_u64(seed))
    }

    /// Scatter `round(amount · 20)` particles in a disk of radius `spread_m`
    /// around `origin`, clipped to the remaining capacity.
    ///
    /// Returns how many particles were created.
    pub fn spawn(&mut self, origin: Vec3, amount: f32, spread_m: f32) -> usize {
        let remaining = self.capacity.saturating_sub(self.particles.len());
        let requested = requested_particle_count(amount);
        let count = requested.min(remaining);
        if count < requested {
            trace!("Foam pool clipped spawn from {} to {}", requested, count);
        }

        let spread_m = if spread_m.is_finite() { spread_m.abs() } else { 0.0 };
        for _ in 0..count {
            let particle = self.random_particle(origin, spread_m);
            self.particles.push(particle);
        }
        count
    }

    fn random_particle(&mut self, origin: Vec3, spread_m: f32) -> FoamParticle {
        // sqrt keeps the disk density uniform
        let radius = spread_m * self.rng.gen::<f32>().sqrt();
        let angle = self.rng.gen_range(0.0..TAU);
        let offset = Vec3::new(radius * angle.cos(), 0.0, radius * angle.sin());

        FoamParticle {
            position: origin + offset,
            velocity: Vec3::new(
                self.rng.gen_range(-0.5..=0.5),
                0.0,
                self.rng.gen_range(-0.5..=0.5),
            ),
            size_m: self.rng.gen_range(0.1..=0.3),
            alpha: 1.0,
            decay_rate: self.rng.gen_range(0.5..=2.0),
            remaining_lifetime_s: self.rng.gen_range(2.0..=5.0),
        }
    }

    /// Advance every particle and retire the expired ones
    pub fn update(&mut self, delta_s: f32) {
        let mut i = 0;
        while i < self.particles.len() {
            if self.particles[i].advance(delta_s) {
                i += 1;
            } else {
                self.particles.swap_remove(i);
            }
        }
    }

    pub fn particles(&self) -> &[FoamParticle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requested_count() {
        assert_eq!(requested_particle_count(0.0), 0);
        assert_eq!(requested_particle_count(-1.0), 0);
        assert_eq!(requested_particle_count(f32::NAN), 0);
        assert_eq!(requested_particle_count(0.5), 10);
        assert_eq!(requested_particle_count(0.3), 6);
        // 0.125 · 20 = 2.5 rounds to even
        assert_eq!(requested_particle_count(0.125), 2);
    }

    #[test]
    fn test_spawn_attributes_in_range() {
        let mut pool = FoamPool::seeded(9);
        let origin = Vec3::new(10.0, 2.0, -4.0);
        assert_eq!(pool.spawn(origin, 2.0, 1.5), 40);

        for p in pool.particles() {
            let offset = p.position - origin;
            assert_eq!(offset.y, 0.0);
            assert!(offset.length() <= 1.5 + 1e-5);
            assert_eq!(p.velocity.y, 0.0);
            assert!((-0.5..=0.5).contains(&p.velocity.x));
            assert!((-0.5..=0.5).contains(&p.velocity.z));
            assert!((0.1..=0.3).contains(&p.size_m));
            assert_eq!(p.alpha, 1.0);
            assert!((0.5..=2.0).contains(&p.decay_rate));
            assert!((2.0..=5.0).contains(&p.remaining_lifetime_s));
        }
    }

    #[test]
    fn test_spawn_clipped_to_capacity() {
        let mut pool = FoamPool::new(25, ChaCha8Rng::seed_from_u64(1));
        assert_eq!(pool.spawn(Vec3::ZERO, 1.0, 1.0), 20);
        assert_eq!(pool.spawn(Vec3::ZERO, 1.0, 1.0), 5);
        assert_eq!(pool.spawn(Vec3::ZERO, 1.0, 1.0), 0);
        assert_eq!(pool.len(), 25);
    }

    #[test]
    fn test_same_seed_same_foam() {
        let mut a = FoamPool::seeded(1234);
        let mut b = FoamPool::seeded(1234);
        a.spawn(Vec3::ZERO, 1.0, 2.0);
        b.spawn(Vec3::ZERO, 1.0, 2.0);
        assert_eq!(a.particles(), b.particles());

        let mut c = FoamPool::seeded(4321);
        c.spawn(Vec3::ZERO, 1.0, 2.0);
        assert_ne!(a.particles(), c.particles());
    }

    #[test]
    fn test_invalid_step_keeps_alpha_in_range() {
        let mut pool = FoamPool::seeded(21);
        pool.spawn(Vec3::ZERO, 0.5, 1.0);
        let before = pool.particles().to_vec();

        for delta_s in [-10.0, f32::NAN, f32::NEG_INFINITY, 0.0] {
            pool.update(delta_s);
        }
        assert_eq!(pool.particles(), &before[..]);

        pool.update(5.0);
        assert!(pool.is_empty());
    }

    #[test]
    fn test_update_drifts_fades_and_retires() {
        let mut pool = FoamPool::seeded(5);
        pool.spawn(Vec3::ZERO, 1.0, 0.0);
        let before = pool.particles().to_vec();

        pool.update(0.5);
        assert_eq!(pool.len(), before.len());
        for (old, new) in before.iter().zip(pool.particles()) {
            assert!((new.position - (old.position + old.velocity * 0.5)).length() < 1e-6);
            let expected_alpha = (-old.decay_rate * 0.5_f32).exp();
            assert!((new.alpha - expected_alpha).abs() < 1e-6);
        }

        // Longest possible lifetime is 5 s
        for _ in 0..10 {
            pool.update(0.5);
        }
        assert!(pool.is_empty());
    }
}
