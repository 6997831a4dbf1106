//! Bounded pool of transient surface disturbances.

use glam::Vec3;
use log::trace;

/// Maximum simultaneous interactions per surface
pub const MAX_ACTIVE_INTERACTIONS: usize = 64;

/// Kind of disturbance; the discriminant is what the shader sees
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InteractionKind {
    Splash = 0,
    Wake = 1,
    Ripple = 2,
}

/// One expanding, decaying disturbance on the surface
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interaction {
    pub position: Vec3,
    pub kind: InteractionKind,
    pub initial_amplitude: f32,
    pub current_amplitude: f32,
    pub initial_radius_m: f32,
    pub current_radius_m: f32,
    /// Radius growth (meters/second)
    pub expansion_rate_m_per_s: f32,
    /// Exponential amplitude decay rate (1/second)
    pub decay_rate: f32,
    pub remaining_lifetime_s: f32,
}

impl Interaction {
    /// Splash: fast-expanding ring, 3 s lifetime
    pub fn splash(position: Vec3, intensity: f32, radius_m: f32) -> Self {
        Self {
            position,
            kind: InteractionKind::Splash,
            initial_amplitude: intensity,
            current_amplitude: intensity,
            initial_radius_m: radius_m,
            current_radius_m: radius_m,
            expansion_rate_m_per_s: 5.0,
            decay_rate: 2.0,
            remaining_lifetime_s: 3.0,
        }
    }

    /// Wake: half-strength, small and short-lived
    pub fn wake(position: Vec3, intensity: f32) -> Self {
        let amplitude = intensity * 0.5;
        Self {
            position,
            kind: InteractionKind::Wake,
            initial_amplitude: amplitude,
            current_amplitude: amplitude,
            initial_radius_m: 0.5,
            current_radius_m: 0.5,
            expansion_rate_m_per_s: 3.0,
            decay_rate: 1.5,
            remaining_lifetime_s: 2.0,
        }
    }

    /// Age by `delta_s`. Returns false once the lifetime is used up.
    ///
    /// Non-positive or non-finite steps leave the interaction untouched.
    pub fn advance(&mut self, delta_s: f32) -> bool {
        if !delta_s.is_finite() || delta_s <= 0.0 {
            return self.remaining_lifetime_s > 0.0;
        }
        self.remaining_lifetime_s -= delta_s;
        if self.remaining_lifetime_s <= 0.0 {
            return false;
        }
        self.current_radius_m += self.expansion_rate_m_per_s * delta_s;
        self.current_amplitude *= (-self.decay_rate * delta_s).exp();
        true
    }
}

/// Dense, fixed-capacity interaction storage.
///
/// Expired entries are swap-removed, so iteration order is not insertion order.
#[derive(Debug, Clone)]
pub struct InteractionPool {
    active: Vec<Interaction>,
    capacity: usize,
}

impl Default for InteractionPool {
    fn default() -> Self {
        Self::new(MAX_ACTIVE_INTERACTIONS)
    }
}

impl InteractionPool {
    pub fn new(capacity: usize) -> Self {
        Self {
            active: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Add an interaction; a full pool drops it and returns false
    pub fn insert(&mut self, interaction: Interaction) -> bool {
        if self.is_full() {
            trace!(
                "Interaction pool full ({}), dropping {:?}",
                self.capacity,
                interaction.kind
            );
            return false;
        }
        self.active.push(interaction);
        true
    }

    /// Advance every interaction and retire the expired ones
    pub fn update(&mut self, delta_s: f32) {
        let mut i = 0;
        while i < self.active.len() {
            if self.active[i].advance(delta_s) {
                i += 1;
            } else {
                // The swapped-in element has not been advanced yet: revisit slot i
                self.active.swap_remove(i);
            }
        }
    }

    pub fn as_slice(&self) -> &[Interaction] {
        &self.active
    }

    pub fn iter(&self) -> impl Iterator<Item = &Interaction> {
        self.active.iter()
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_full(&self) -> bool {
        self.active.len() >= self.capacity
    }

    pub fn clear(&mut self) {
        self.active.clear();
    }
}
