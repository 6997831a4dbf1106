//! Transient surface disturbances (splashes, wakes) and the foam they leave.

mod foam;
mod manager;
mod pool;

// Re-export public types
pub use foam::{requested_particle_count, FoamParticle, FoamPool, MAX_FOAM_PARTICLES};
pub use manager::{
    InteractionManager, ShaderInteractions, DEFAULT_SPLASH_RADIUS_M, MIN_WAKE_SPEED_M_PER_S,
    SHADER_INTERACTION_SLOTS,
};
pub use pool::{Interaction, InteractionKind, InteractionPool, MAX_ACTIVE_INTERACTIONS};
