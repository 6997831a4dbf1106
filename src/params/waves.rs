//! Gerstner wave layers and the wave field that owns them.
//!
//! A field keeps every layer inside the multi-wave stability bound
//! `Q_max = 1 / (k * A * N)`. Because `N` is the layer count of the whole
//! field, any structural change re-validates every layer.

use std::f32::consts::TAU;

use glam::Vec2;
use log::debug;

/// Gravitational acceleration used by the deep-water dispersion relation (m/s²)
pub const GRAVITY_M_PER_S2: f32 = 9.81;

/// Maximum layer count the shader-side wave table can hold
pub const MAX_WAVE_LAYERS: usize = 8;

/// Shortest wavelength accepted by validation (meters)
pub const MIN_WAVELENGTH_M: f32 = 0.1;

/// Directions shorter than this are treated as degenerate
pub const DIRECTION_EPSILON: f32 = 1e-3;

/// Below this, amplitude or `k * A * N` counts as zero
pub(crate) const DEGENERATE_EPSILON: f32 = 1e-6;

/// Normalize a horizontal direction, falling back to +X when degenerate.
pub fn normalize_direction(direction: Vec2) -> Vec2 {
    let length = direction.length();
    if length > DIRECTION_EPSILON {
        direction / length
    } else {
        Vec2::X
    }
}

/// One additive Gerstner wave component
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaveLayer {
    /// Horizontal travel direction (x, z), unit length after validation
    pub direction: Vec2,

    /// Wave height in meters (half the peak-to-trough distance)
    pub amplitude_m: f32,

    /// Distance between crests in meters
    pub wavelength_m: f32,

    /// Crest sharpness: 0 = sine wave, 1 = sharpest before looping
    pub steepness: f32,

    /// Phase speed in meters/second (0 = derive from the dispersion relation)
    pub speed_m_per_s: f32,

    /// Initial phase offset in radians, [0, 2π)
    pub phase_rad: f32,
}

impl Default for WaveLayer {
    fn default() -> Self {
        Self {
            direction: Vec2::X,
            amplitude_m: 0.5,
            wavelength_m: 10.0,
            steepness: 0.5,
            speed_m_per_s: 0.0,
            phase_rad: 0.0,
        }
    }
}

impl WaveLayer {
    pub fn new(
        direction: Vec2,
        amplitude_m: f32,
        wavelength_m: f32,
        steepness: f32,
        speed_m_per_s: f32,
        phase_rad: f32,
    ) -> Self {
        Self {
            direction,
            amplitude_m,
            wavelength_m,
            steepness,
            speed_m_per_s,
            phase_rad,
        }
    }

    /// Wavenumber k = 2π / λ (radians per meter)
    pub fn wavenumber(&self) -> f32 {
        TAU / self.wavelength_m.max(MIN_WAVELENGTH_M)
    }

    /// Deep-water phase speed c = sqrt(g / k)
    pub fn phase_speed(&self) -> f32 {
        (GRAVITY_M_PER_S2 / self.wavenumber()).sqrt()
    }

    /// Authored speed, or the dispersion speed when left at 0
    pub fn effective_speed(&self) -> f32 {
        if self.speed_m_per_s > 1e-3 {
            self.speed_m_per_s
        } else {
            self.phase_speed()
        }
    }

    /// Largest steepness that keeps `total_layers` superposed waves from looping.
    ///
    /// Returns 1.0 (no extra bound) when the amplitude or layer count is ~0.
    pub fn max_steepness(&self, total_layers: usize) -> f32 {
        let denominator = self.wavenumber() * self.amplitude_m * total_layers as f32;
        if self.amplitude_m <= DEGENERATE_EPSILON || denominator <= DEGENERATE_EPSILON {
            1.0
        } else {
            1.0 / denominator
        }
    }

    /// Clamp this layer into its valid ranges for a field of `total_layers`.
    ///
    /// Returns true when steepness had to be lowered to satisfy the bound.
    pub fn validate(&mut self, total_layers: usize) -> bool {
        self.amplitude_m = self.amplitude_m.max(0.0);
        self.wavelength_m = self.wavelength_m.max(MIN_WAVELENGTH_M);
        self.speed_m_per_s = self.speed_m_per_s.max(0.0);

        let requested = if self.steepness.is_finite() {
            self.steepness
        } else {
            0.0
        };
        self.steepness = requested
            .min(self.max_steepness(total_layers))
            .clamp(0.0, 1.0);

        self.phase_rad = wrap_phase(self.phase_rad);
        self.direction = normalize_direction(self.direction);

        self.steepness < requested.min(1.0)
    }
}

fn wrap_phase(phase_rad: f32) -> f32 {
    if !phase_rad.is_finite() {
        return 0.0;
    }
    let wrapped = phase_rad.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if wrapped >= TAU {
        0.0
    } else {
        wrapped
    }
}

/// Small-scale noise ripple parameters shared by the whole field
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RippleParams {
    /// Enable noise-based ripple detail
    pub enabled: bool,

    /// Wind direction (x, z) that scrolls the ripple pattern, unit length
    pub wind_direction: Vec2,

    /// Wind speed in meters/second
    pub wind_speed_m_per_s: f32,

    /// Ripple size scale (higher = larger ripples), > 0
    pub scale: f32,

    /// Ripple height multiplier, [0, 1]
    pub strength: f32,

    /// Noise octaves, 1..=6
    pub octaves: u32,

    /// Finite-difference offset for ripple normals (meters), > 0
    pub normal_sample_offset_m: f32,
}

impl Default for RippleParams {
    fn default() -> Self {
        Self {
            enabled: true,
            wind_direction: normalize_direction(Vec2::new(1.0, 0.5)),
            wind_speed_m_per_s: 2.0,
            scale: 1.0,
            strength: 0.1,
            octaves: 3,
            normal_sample_offset_m: 0.1,
        }
    }
}

impl RippleParams {
    pub const MIN_SCALE: f32 = 0.1;
    pub const MIN_OCTAVES: u32 = 1;
    pub const MAX_OCTAVES: u32 = 6;
    pub const MIN_NORMAL_SAMPLE_OFFSET_M: f32 = 0.01;

    pub fn validate(&mut self) {
        self.wind_direction = normalize_direction(self.wind_direction);
        self.wind_speed_m_per_s = self.wind_speed_m_per_s.max(0.0);
        self.scale = self.scale.max(Self::MIN_SCALE);
        self.strength = if self.strength.is_finite() {
            self.strength.clamp(0.0, 1.0)
        } else {
            0.0
        };
        self.octaves = self.octaves.clamp(Self::MIN_OCTAVES, Self::MAX_OCTAVES);
        self.normal_sample_offset_m = self
            .normal_sample_offset_m
            .max(Self::MIN_NORMAL_SAMPLE_OFFSET_M);
    }
}

/// Ordered set of up to [`MAX_WAVE_LAYERS`] layers plus ripple parameters.
///
/// Layers and ripple parameters are only reachable through methods that
/// re-validate the whole field afterwards. `Clone` is a deep copy.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WaveField {
    layers: Vec<WaveLayer>,
    ripple: RippleParams,
}

impl WaveField {
    /// Empty field with default ripple parameters
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a validated field. Layers past [`MAX_WAVE_LAYERS`] are dropped.
    pub fn from_layers(
        layers: impl IntoIterator<Item = WaveLayer>,
        ripple: RippleParams,
    ) -> Self {
        let mut field = Self {
            layers: layers.into_iter().take(MAX_WAVE_LAYERS).collect(),
            ripple,
        };
        field.validate();
        field
    }

    pub fn layers(&self) -> &[WaveLayer] {
        &self.layers
    }

    pub fn layer(&self, index: usize) -> Option<&WaveLayer> {
        self.layers.get(index)
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    pub fn ripple(&self) -> &RippleParams {
        &self.ripple
    }

    /// Replace the ripple parameters; they are clamped to their valid ranges
    pub fn set_ripple(&mut self, ripple: RippleParams) {
        self.ripple = ripple;
        self.ripple.validate();
    }

    /// Edit the ripple parameters in place, then clamp them again
    pub fn modify_ripple<F>(&mut self, edit: F)
    where
        F: FnOnce(&mut RippleParams),
    {
        edit(&mut self.ripple);
        self.ripple.validate();
    }

    /// Append a layer and re-validate every layer.
    ///
    /// Returns false (field unchanged) when the field is already full.
    pub fn add_layer(&mut self, layer: WaveLayer) -> bool {
        if self.layers.len() >= MAX_WAVE_LAYERS {
            debug!(
                "Wave field full ({} layers), ignoring new layer",
                MAX_WAVE_LAYERS
            );
            return false;
        }
        self.layers.push(layer);
        self.validate();
        true
    }

    /// Remove the layer at `index` and re-validate the rest.
    ///
    /// Out-of-range indices are ignored and return `None`.
    pub fn remove_layer(&mut self, index: usize) -> Option<WaveLayer> {
        if index >= self.layers.len() {
            return None;
        }
        let removed = self.layers.remove(index);
        self.validate();
        Some(removed)
    }

    /// Edit one layer in place, then re-validate the whole field.
    pub fn modify_layer<F>(&mut self, index: usize, edit: F) -> bool
    where
        F: FnOnce(&mut WaveLayer),
    {
        let Some(layer) = self.layers.get_mut(index) else {
            return false;
        };
        edit(layer);
        self.validate();
        true
    }

    /// Clamp every layer against the current layer count and normalize directions.
    pub fn validate(&mut self) {
        self.ripple.validate();

        let total_layers = self.layers.len();
        for (index, layer) in self.layers.iter_mut().enumerate() {
            if layer.validate(total_layers) {
                debug!(
                    "Wave layer {} steepness lowered to {:.4} for {} layers",
                    index, layer.steepness, total_layers
                );
            }
        }
    }

    /// Sum of layer amplitudes (meters)
    pub fn total_wave_height(&self) -> f32 {
        self.layers.iter().map(|layer| layer.amplitude_m).sum()
    }

    /// Amplitude-weighted mean direction, +X when the field is (nearly) flat
    pub fn dominant_direction(&self) -> Vec2 {
        let (weighted, total_amplitude) = self.layers.iter().fold(
            (Vec2::ZERO, 0.0),
            |(weighted, total), layer| {
                (
                    weighted + layer.direction * layer.amplitude_m,
                    total + layer.amplitude_m,
                )
            },
        );

        if total_amplitude > DIRECTION_EPSILON {
            weighted / total_amplitude
        } else {
            Vec2::X
        }
    }
}
