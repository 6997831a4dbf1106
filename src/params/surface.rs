//! Per-surface runtime settings supplied by the host each tick.

use super::{RippleParams, MAX_WAVE_LAYERS};

/// Host-facing multipliers and feature flags for one water surface
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceSettings {
    /// Still-water elevation of the surface (meters, world Y)
    pub baseline_elevation_m: f32,

    /// Overall amplitude multiplier applied to wave height (0..5 in practice)
    pub wave_strength: f32,

    /// Wave animation speed multiplier (scales the wave clock)
    pub wave_speed: f32,

    /// Enable procedural wave evaluation and clock advancement
    pub enable_waves: bool,

    /// Enable splashes, wakes and foam
    pub enable_interactions: bool,

    /// Layers packed into the shader wave table (1..=8)
    pub max_wave_layers: usize,

    /// Octave cap for ripple detail (1..=6)
    pub max_ripple_octaves: u32,
}

impl Default for SurfaceSettings {
    fn default() -> Self {
        Self {
            baseline_elevation_m: 0.0,
            wave_strength: 1.0,
            wave_speed: 1.0,
            enable_waves: true,
            enable_interactions: true,
            max_wave_layers: MAX_WAVE_LAYERS,
            max_ripple_octaves: 4,
        }
    }
}

impl SurfaceSettings {
    /// Multipliers clamped to be non-negative and finite, caps to their ranges
    pub fn sanitized(&self) -> Self {
        let non_negative = |value: f32| if value.is_finite() { value.max(0.0) } else { 0.0 };
        Self {
            baseline_elevation_m: if self.baseline_elevation_m.is_finite() {
                self.baseline_elevation_m
            } else {
                0.0
            },
            wave_strength: non_negative(self.wave_strength),
            wave_speed: non_negative(self.wave_speed),
            max_wave_layers: self.max_wave_layers.clamp(1, MAX_WAVE_LAYERS),
            max_ripple_octaves: self
                .max_ripple_octaves
                .clamp(RippleParams::MIN_OCTAVES, RippleParams::MAX_OCTAVES),
            ..self.clone()
        }
    }
}
