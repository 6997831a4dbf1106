//! Splash/wake creation, per-tick aging, and the shader-facing snapshot.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;
use log::trace;
use rand_chacha::ChaCha8Rng;

use super::foam::{FoamParticle, FoamPool, MAX_FOAM_PARTICLES};
use super::pool::{Interaction, InteractionPool, MAX_ACTIVE_INTERACTIONS};

/// Interactions the water shader can read per frame
pub const SHADER_INTERACTION_SLOTS: usize = 32;

/// Default splash radius (meters)
pub const DEFAULT_SPLASH_RADIUS_M: f32 = 1.0;

/// Wakes slower than this (m/s) are ignored
pub const MIN_WAKE_SPEED_M_PER_S: f32 = 0.1;

/// Fixed-size, zero-padded interaction arrays for upload.
///
/// `positions[i] = (x, y, z, kind)`,
/// `params[i] = (current amplitude, current radius, remaining lifetime, 0)`.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct ShaderInteractions {
    pub positions: [[f32; 4]; SHADER_INTERACTION_SLOTS],
    pub params: [[f32; 4]; SHADER_INTERACTION_SLOTS],
}

impl Default for ShaderInteractions {
    fn default() -> Self {
        Self::zeroed()
    }
}

/// Owns the interaction and foam pools of one water surface
#[derive(Debug, Clone)]
pub struct InteractionManager {
    interactions: InteractionPool,
    foam: FoamPool,
    enabled: bool,
}

impl InteractionManager {
    pub fn new(rng: ChaCha8Rng) -> Self {
        Self {
            interactions: InteractionPool::new(MAX_ACTIVE_INTERACTIONS),
            foam: FoamPool::new(MAX_FOAM_PARTICLES, rng),
            enabled: true,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Disabling pauses creation and aging; pool contents are kept.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Start a splash and throw foam around it.
    ///
    /// Returns false when interactions are disabled or the pool is full.
    pub fn create_splash(&mut self, position: Vec3, intensity: f32, radius_m: f32) -> bool {
        if !self.enabled {
            trace!("Interactions disabled, ignoring splash at {}", position);
            return false;
        }
        if !self
            .interactions
            .insert(Interaction::splash(position, intensity, radius_m))
        {
            return false;
        }

        self.foam.spawn(position, intensity * 0.5, radius_m);
        true
    }

    /// Leave a wake behind something moving at `velocity`.
    ///
    /// Returns false when disabled, too slow, or the pool is full.
    pub fn create_wake(&mut self, position: Vec3, velocity: Vec3, intensity: f32) -> bool {
        if !self.enabled {
            trace!("Interactions disabled, ignoring wake at {}", position);
            return false;
        }
        let speed = velocity.length();
        if speed.is_nan() || speed < MIN_WAKE_SPEED_M_PER_S {
            trace!("Wake too slow ({:.3} m/s), ignoring", speed);
            return false;
        }
        if !self.interactions.insert(Interaction::wake(position, intensity)) {
            return false;
        }

        self.foam.spawn(position, intensity * 0.3, 0.3);
        true
    }

    /// Age interactions and foam by `delta_s`; no-op while disabled.
    pub fn update(&mut self, delta_s: f32) {
        if !self.enabled {
            return;
        }
        self.interactions.update(delta_s);
        self.foam.update(delta_s);
    }

    /// Pack up to [`SHADER_INTERACTION_SLOTS`] interactions; remaining slots stay zero.
    pub fn interactions_for_shader(&self) -> ShaderInteractions {
        let mut packed = ShaderInteractions::zeroed();
        let slots = packed.positions.iter_mut().zip(packed.params.iter_mut());

        for ((position, params), interaction) in slots.zip(self.interactions.iter()) {
            let p = interaction.position;
            *position = [p.x, p.y, p.z, interaction.kind as u32 as f32];
            *params = [
                interaction.current_amplitude,
                interaction.current_radius_m,
                interaction.remaining_lifetime_s,
                0.0,
            ];
        }
        packed
    }

    pub fn interactions(&self) -> &[Interaction] {
        self.interactions.as_slice()
    }

    pub fn foam_particles(&self) -> &[FoamParticle] {
        self.foam.particles()
    }

    pub fn active_interaction_count(&self) -> usize {
        self.interactions.len()
    }

    pub fn foam_count(&self) -> usize {
        self.foam.len()
    }

    /// Drop all interactions and foam
    pub fn clear(&mut self) {
        self.interactions.clear();
        self.foam.clear();
    }
}
