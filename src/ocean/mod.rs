//! Water surface simulation: Gerstner swell, ripple detail, and the
//! per-surface orchestrator that ties waves, clocks and interactions together.

mod clock;
mod gerstner;
mod ripple;
mod system;

// Re-export public types
pub use clock::{SharedClock, TimeSource, WaveClock};
pub use gerstner::{GerstnerEvaluator, GpuWave, LayerSample, WaveTable};
pub use ripple::RippleNoise;
pub use system::WaterSurface;
