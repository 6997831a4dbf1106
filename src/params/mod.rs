//! Parameter definitions with physical units and documented semantics.
//!
//! All tunable numbers live here with:
//! - Physical units (meters, seconds, radians)
//! - Documented ranges and meanings
//! - Validation that clamps instead of rejecting

mod presets;
mod surface;
mod waves;

// Re-export all types
pub use presets::WaterBodyType;
pub use surface::SurfaceSettings;
pub(crate) use waves::DEGENERATE_EPSILON;
pub use waves::{
    normalize_direction, RippleParams, WaveField, WaveLayer, DIRECTION_EPSILON,
    GRAVITY_M_PER_S2, MAX_WAVE_LAYERS, MIN_WAVELENGTH_M,
};
