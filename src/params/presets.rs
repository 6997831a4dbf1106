//! Named wave-field presets for common bodies of water.

use std::fmt;
use std::str::FromStr;

use glam::Vec2;

use super::waves::{RippleParams, WaveField, WaveLayer};
use crate::error::ConfigError;

/// Kind of water body a preset is tuned for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WaterBodyType {
    /// Large open water with long rolling waves
    #[default]
    Ocean,
    /// Calm enclosed water with gentle ripples
    Lake,
    /// Directional flow with faster, shorter waves
    River,
    /// Still artificial water
    Pool,
}

impl WaterBodyType {
    pub const ALL: [WaterBodyType; 4] = [Self::Ocean, Self::Lake, Self::River, Self::Pool];

    /// Build the validated wave field for this water body
    pub fn wave_field(self) -> WaveField {
        match self {
            Self::Ocean => WaveField::ocean(),
            Self::Lake => WaveField::lake(),
            Self::River => WaveField::river(),
            Self::Pool => WaveField::pool(),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Ocean => "ocean",
            Self::Lake => "lake",
            Self::River => "river",
            Self::Pool => "pool",
        }
    }
}

impl fmt::Display for WaterBodyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for WaterBodyType {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == wanted)
            .ok_or_else(|| ConfigError::UnknownPreset(s.to_string()))
    }
}

fn layer(
    dir: (f32, f32),
    amplitude_m: f32,
    wavelength_m: f32,
    steepness: f32,
    speed: f32,
    phase: f32,
) -> WaveLayer {
    WaveLayer::new(
        Vec2::new(dir.0, dir.1),
        amplitude_m,
        wavelength_m,
        steepness,
        speed,
        phase,
    )
}

fn ripple(
    wind: (f32, f32),
    wind_speed_m_per_s: f32,
    scale: f32,
    strength: f32,
    octaves: u32,
) -> RippleParams {
    RippleParams {
        enabled: true,
        wind_direction: Vec2::new(wind.0, wind.1),
        wind_speed_m_per_s,
        scale,
        strength,
        octaves,
        ..RippleParams::default()
    }
}

impl WaveField {
    /// Ocean: one long primary swell plus three shorter cross waves
    pub fn ocean() -> Self {
        Self::from_layers(
            [
                layer((1.0, 0.0), 1.5, 60.0, 0.6, 0.0, 0.0),
                layer((0.7, 0.7), 1.0, 40.0, 0.5, 0.0, 1.57),
                layer((-0.5, 0.866), 0.5, 20.0, 0.4, 0.0, 3.14),
                layer((0.3, -0.954), 0.3, 10.0, 0.3, 0.0, 4.71),
            ],
            ripple((1.0, 0.3), 5.0, 0.5, 0.15, 4),
        )
    }

    /// Lake: two small gentle waves
    pub fn lake() -> Self {
        Self::from_layers(
            [
                layer((1.0, 0.0), 0.15, 8.0, 0.2, 0.0, 0.0),
                layer((0.6, 0.8), 0.1, 5.0, 0.15, 0.0, 2.0),
            ],
            ripple((1.0, 0.2), 1.5, 1.5, 0.05, 3),
        )
    }

    /// River: short waves aligned with the flow, authored speeds
    pub fn river() -> Self {
        Self::from_layers(
            [
                layer((1.0, 0.0), 0.2, 3.0, 0.3, 2.0, 0.0),
                layer((1.0, 0.1), 0.15, 2.0, 0.25, 1.8, 1.0),
            ],
            ripple((1.0, 0.0), 3.0, 2.0, 0.08, 3),
        )
    }

    /// Pool: a single tiny surface-tension wave
    pub fn pool() -> Self {
        Self::from_layers(
            [layer((1.0, 0.0), 0.02, 0.5, 0.1, 0.0, 0.0)],
            ripple((1.0, 0.5), 0.5, 3.0, 0.02, 2),
        )
    }
}
