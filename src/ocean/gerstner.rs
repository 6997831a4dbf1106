//! Multi-layer Gerstner wave evaluation.
//!
//! Each layer displaces a surface point by
//! `(Q·A·dx·cos θ, A·sin θ, Q·A·dz·cos θ)` with
//! `θ = k·(d·p − c·t) + φ` and `Q = s / (k·A·N)`.
//! Normals come from the summed partial derivatives of that displacement.

use bytemuck::{Pod, Zeroable};
use glam::{Vec2, Vec3};

use crate::params::{WaveField, WaveLayer, DEGENERATE_EPSILON, MAX_WAVE_LAYERS};

/// One wave-table entry for GPU displacement (matches the shader struct layout)
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct GpuWave {
    pub direction: [f32; 2],
    pub amplitude: f32,
    pub wavelength: f32,
    pub steepness: f32,
    pub speed: f32,
    pub phase: f32,
    pub _reserved: f32,
}

/// Fixed-size wave table plus the number of populated entries
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct WaveTable {
    pub waves: [GpuWave; MAX_WAVE_LAYERS],
    pub count: u32,
}

/// Contribution of one layer at one point and time
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LayerSample {
    /// Full displacement (x/z surge, y elevation)
    pub displacement: Vec3,
    /// ∂P/∂x
    pub tangent: Vec3,
    /// ∂P/∂z
    pub binormal: Vec3,
}

/// Stateless Gerstner evaluator.
///
/// All results are raw wave offsets: callers add baseline elevation and apply
/// their own strength multiplier.
pub struct GerstnerEvaluator;

impl GerstnerEvaluator {
    /// Evaluate a single layer at horizontal position `pos` (x, z).
    ///
    /// `total_layers` is the layer count of the owning field (the `N` in `Q`).
    pub fn sample_layer(
        layer: &WaveLayer,
        pos: Vec2,
        time_s: f32,
        total_layers: usize,
    ) -> LayerSample {
        let k = layer.wavenumber();
        let a = layer.amplitude_m;
        let c = layer.effective_speed();
        let d = layer.direction;

        let ka = k * a;
        let spread = ka * total_layers as f32;
        let q = if a > DEGENERATE_EPSILON && spread > DEGENERATE_EPSILON {
            layer.steepness / spread
        } else {
            0.0
        };

        let theta = k * (d.dot(pos) - c * time_s) + layer.phase_rad;
        let (sin_t, cos_t) = theta.sin_cos();

        LayerSample {
            displacement: Vec3::new(q * a * d.x * cos_t, a * sin_t, q * a * d.y * cos_t),
            tangent: Vec3::new(
                1.0 - q * ka * d.x * d.x * sin_t,
                ka * d.x * cos_t,
                -q * ka * d.x * d.y * sin_t,
            ),
            binormal: Vec3::new(
                -q * ka * d.x * d.y * sin_t,
                ka * d.y * cos_t,
                1.0 - q * ka * d.y * d.y * sin_t,
            ),
        }
    }

    /// Summed displacement of every layer at (x, z)
    pub fn displacement(field: &WaveField, time_s: f32, x: f32, z: f32) -> Vec3 {
        let pos = Vec2::new(x, z);
        let n = field.len();
        field
            .layers()
            .iter()
            .map(|layer| Self::sample_layer(layer, pos, time_s, n).displacement)
            .sum()
    }

    /// Summed vertical offset at (x, z); 0 for an empty field
    pub fn height(field: &WaveField, time_s: f32, x: f32, z: f32) -> f32 {
        if field.is_empty() {
            return 0.0;
        }
        Self::displacement(field, time_s, x, z).y
    }

    /// Unit surface normal at (x, z); +Y for an empty field
    pub fn normal(field: &WaveField, time_s: f32, x: f32, z: f32) -> Vec3 {
        if field.is_empty() {
            return Vec3::Y;
        }

        let pos = Vec2::new(x, z);
        let n = field.len();
        let (tangent, binormal) = field.layers().iter().fold(
            (Vec3::ZERO, Vec3::ZERO),
            |(tangent, binormal), layer| {
                let sample = Self::sample_layer(layer, pos, time_s, n);
                (tangent + sample.tangent, binormal + sample.binormal)
            },
        );

        binormal.cross(tangent).try_normalize().unwrap_or(Vec3::Y)
    }

    /// Pack the first `max_layers` layers into the fixed shader wave table.
    ///
    /// Unused slots stay zeroed, so they contribute nothing on the GPU.
    pub fn pack_waves(field: &WaveField, max_layers: usize) -> WaveTable {
        let mut waves = [GpuWave::zeroed(); MAX_WAVE_LAYERS];
        let count = field.len().min(max_layers).min(MAX_WAVE_LAYERS);

        for (slot, layer) in waves.iter_mut().zip(&field.layers()[..count]) {
            *slot = GpuWave {
                direction: layer.direction.to_array(),
                amplitude: layer.amplitude_m,
                wavelength: layer.wavelength_m,
                steepness: layer.steepness,
                speed: layer.effective_speed(),
                phase: layer.phase_rad,
                _reserved: 0.0,
            };
        }

        WaveTable {
            waves,
            count: count as u32,
        }
    }
}
