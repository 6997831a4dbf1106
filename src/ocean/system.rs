//! High-level water surface with waves, clock and interactions.

use glam::{Vec2, Vec3};
use log::info;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use super::clock::{SharedClock, TimeSource};
use super::gerstner::{GerstnerEvaluator, WaveTable};
use super::ripple::RippleNoise;
use crate::interaction::{FoamParticle, Interaction, InteractionManager, ShaderInteractions};
use crate::params::{RippleParams, SurfaceSettings, WaveField};

/// One water surface instance.
///
/// The owner drives it explicitly: construct, call [`WaterSurface::update`]
/// once per tick, query freely between ticks, then [`WaterSurface::dispose`].
/// Mutating calls must be serialized by the owner.
pub struct WaterSurface {
    pub settings: SurfaceSettings,
    field: WaveField,
    time: TimeSource,
    ripples: RippleNoise,
    interactions: InteractionManager,
}

impl WaterSurface {
    /// Create a surface with its own clock.
    ///
    /// `seed` drives both foam scatter and the ripple noise pattern.
    pub fn new(settings: SurfaceSettings, field: WaveField, seed: u64) -> Self {
        let mut interactions = InteractionManager::new(ChaCha8Rng::seed_from_u64(seed));
        interactions.set_enabled(settings.enable_interactions);

        Self {
            settings,
            field,
            time: TimeSource::default(),
            ripples: RippleNoise::new(seed as u32),
            interactions,
        }
    }

    /// Read animation time from a shared clock instead of a local one.
    ///
    /// Only a surface built with `writer = true` advances or resets it.
    pub fn with_shared_clock(mut self, clock: SharedClock, writer: bool) -> Self {
        self.time = TimeSource::Shared { clock, writer };
        self
    }

    /// Advance the wave clock and age interactions by `delta_s` seconds.
    ///
    /// Disabled features keep their state and resume when re-enabled.
    pub fn update(&mut self, delta_s: f32) {
        if !delta_s.is_finite() || delta_s <= 0.0 {
            return;
        }
        let settings = self.settings.sanitized();

        if settings.enable_waves {
            self.time.advance(delta_s, settings.wave_speed);
        }

        self.interactions.set_enabled(settings.enable_interactions);
        self.interactions.update(delta_s);
    }

    /// Current animation time (seconds, already speed-scaled)
    pub fn time_s(&self) -> f32 {
        self.time.now()
    }

    pub fn reset_time(&mut self) {
        self.time.reset();
    }

    pub fn field(&self) -> &WaveField {
        &self.field
    }

    /// Edit the wave field; its own methods keep it validated
    pub fn field_mut(&mut self) -> &mut WaveField {
        &mut self.field
    }

    pub fn set_field(&mut self, field: WaveField) {
        self.field = field;
    }

    /// Water height under `point` (world Y, meters)
    pub fn height_at(&self, point: Vec3) -> f32 {
        let settings = self.settings.sanitized();
        if !settings.enable_waves {
            return settings.baseline_elevation_m;
        }
        let offset = GerstnerEvaluator::height(&self.field, self.time_s(), point.x, point.z);
        settings.baseline_elevation_m + offset * settings.wave_strength
    }

    /// Unit surface normal under `point`
    pub fn normal_at(&self, point: Vec3) -> Vec3 {
        if !self.settings.enable_waves {
            return Vec3::Y;
        }
        GerstnerEvaluator::normal(&self.field, self.time_s(), point.x, point.z)
    }

    /// Gerstner displacement under `point`; vertical part scaled by wave strength
    pub fn displacement_at(&self, point: Vec3) -> Vec3 {
        let settings = self.settings.sanitized();
        if !settings.enable_waves {
            return Vec3::ZERO;
        }
        let mut displacement =
            GerstnerEvaluator::displacement(&self.field, self.time_s(), point.x, point.z);
        displacement.y *= settings.wave_strength;
        displacement
    }

    /// Ripple parameters with the octave count held to the quality cap
    fn detail_ripple(&self) -> RippleParams {
        let mut ripple = *self.field.ripple();
        ripple.octaves = ripple
            .octaves
            .min(self.settings.sanitized().max_ripple_octaves);
        ripple
    }

    /// Height including ripple detail, for visual effects
    pub fn detailed_height_at(&self, point: Vec3) -> f32 {
        let base = self.height_at(point);
        if !self.settings.enable_waves {
            return base;
        }
        base + self
            .ripples
            .height(&self.detail_ripple(), self.time_s(), point.x, point.z)
    }

    /// Normal including ripple detail, for visual effects
    pub fn detailed_normal_at(&self, point: Vec3) -> Vec3 {
        let base = self.normal_at(point);
        if !self.settings.enable_waves {
            return base;
        }
        self.ripples
            .perturb_normal(&self.detail_ripple(), self.time_s(), point.x, point.z, base)
    }

    /// True when `point` lies below the water surface
    pub fn is_underwater(&self, point: Vec3) -> bool {
        point.y < self.height_at(point)
    }

    /// Estimated crest height for gameplay queries (sum of amplitudes)
    pub fn max_wave_height(&self) -> f32 {
        self.field.total_wave_height()
    }

    /// Amplitude-weighted travel direction of the swell
    pub fn wave_direction(&self) -> Vec2 {
        self.field.dominant_direction()
    }

    /// Wave table for GPU displacement, limited to `max_wave_layers` entries.
    ///
    /// CPU queries always evaluate the full field.
    pub fn wave_table(&self) -> WaveTable {
        GerstnerEvaluator::pack_waves(&self.field, self.settings.sanitized().max_wave_layers)
    }

    /// Splash at `position`; silently ignored when disabled or saturated
    pub fn create_splash(&mut self, position: Vec3, intensity: f32, radius_m: f32) -> bool {
        self.interactions.set_enabled(self.settings.enable_interactions);
        self.interactions.create_splash(position, intensity, radius_m)
    }

    /// Wake at `position`; silently ignored when disabled, too slow or saturated
    pub fn create_wake(&mut self, position: Vec3, velocity: Vec3, intensity: f32) -> bool {
        self.interactions.set_enabled(self.settings.enable_interactions);
        self.interactions.create_wake(position, velocity, intensity)
    }

    pub fn interactions_for_shader(&self) -> ShaderInteractions {
        self.interactions.interactions_for_shader()
    }

    pub fn interactions(&self) -> &[Interaction] {
        self.interactions.interactions()
    }

    pub fn foam_particles(&self) -> &[FoamParticle] {
        self.interactions.foam_particles()
    }

    /// Release pooled state. The surface stays usable afterwards.
    pub fn dispose(&mut self) {
        info!(
            "Disposing water surface ({} interactions, {} foam particles)",
            self.interactions.active_interaction_count(),
            self.interactions.foam_count()
        );
        self.interactions.clear();
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::{FRAC_PI_2, TAU};

    use super::*;
    use crate::params::{RippleParams, WaveLayer};

    fn single_wave_surface(settings: SurfaceSettings) -> WaterSurface {
        let field = WaveField::from_layers(
            [WaveLayer::new(Vec2::X, 1.0, TAU, 0.5, 0.0, 0.0)],
            RippleParams::default(),
        );
        WaterSurface::new(settings, field, 42)
    }

    #[test]
    fn test_empty_field_returns_baseline() {
        let mut surface = WaterSurface::new(
            SurfaceSettings {
                baseline_elevation_m: 12.5,
                ..SurfaceSettings::default()
            },
            WaveField::new(),
            1,
        );
        for _ in 0..5 {
            surface.update(0.37);
            for p in [Vec3::ZERO, Vec3::new(40.0, -3.0, -17.0)] {
                assert_eq!(surface.height_at(p), 12.5);
                assert_eq!(surface.normal_at(p), Vec3::Y);
            }
        }
    }

    #[test]
    fn test_height_applies_baseline_and_strength() {
        let surface = single_wave_surface(SurfaceSettings {
            baseline_elevation_m: 2.0,
            wave_strength: 0.5,
            ..SurfaceSettings::default()
        });
        let crest = surface.height_at(Vec3::new(FRAC_PI_2, 0.0, 0.0));
        assert!((crest - 2.5).abs() < 1e-5);
        assert!((surface.height_at(Vec3::ZERO) - 2.0).abs() < 1e-5);
    }

    #[test]
    fn test_update_scales_time_by_wave_speed() {
        let mut surface = single_wave_surface(SurfaceSettings {
            wave_speed: 2.0,
            ..SurfaceSettings::default()
        });
        surface.update(0.25);
        surface.update(0.25);
        assert!((surface.time_s() - 1.0).abs() < 1e-6);

        surface.update(-1.0);
        surface.update(f32::NAN);
        assert!((surface.time_s() - 1.0).abs() < 1e-6);

        surface.reset_time();
        assert_eq!(surface.time_s(), 0.0);
    }

    #[test]
    fn test_queries_are_idempotent_between_ticks() {
        let mut surface = WaterSurface::new(SurfaceSettings::default(), WaveField::ocean(), 3);
        surface.update(1.3);
        let p = Vec3::new(7.0, 0.0, -2.0);
        assert_eq!(surface.height_at(p), surface.height_at(p));
        assert_eq!(surface.normal_at(p), surface.normal_at(p));
        assert_eq!(surface.detailed_height_at(p), surface.detailed_height_at(p));
    }

    #[test]
    fn test_disabled_waves_freeze_and_flatten() {
        let mut surface = single_wave_surface(SurfaceSettings::default());
        surface.update(0.5);
        surface.settings.enable_waves = false;
        surface.update(0.5);

        assert!((surface.time_s() - 0.5).abs() < 1e-6);
        let p = Vec3::new(FRAC_PI_2, 0.0, 0.0);
        assert_eq!(surface.height_at(p), 0.0);
        assert_eq!(surface.normal_at(p), Vec3::Y);
        assert_eq!(surface.displacement_at(p), Vec3::ZERO);
        assert_eq!(surface.detailed_height_at(p), 0.0);
    }

    #[test]
    fn test_is_underwater() {
        let surface = single_wave_surface(SurfaceSettings::default());
        // Crest is at +1 m
        assert!(surface.is_underwater(Vec3::new(FRAC_PI_2, 0.5, 0.0)));
        assert!(!surface.is_underwater(Vec3::new(FRAC_PI_2, 1.5, 0.0)));
        // Trough is at -1 m
        assert!(!surface.is_underwater(Vec3::new(3.0 * FRAC_PI_2, -0.5, 0.0)));
    }

    #[test]
    fn test_shared_clock_synchronizes_surfaces() {
        let clock = SharedClock::new();
        let mut leader = WaterSurface::new(SurfaceSettings::default(), WaveField::ocean(), 1)
            .with_shared_clock(clock.clone(), true);
        let mut follower = WaterSurface::new(SurfaceSettings::default(), WaveField::ocean(), 2)
            .with_shared_clock(clock.clone(), false);

        leader.update(0.5);
        follower.update(0.5);
        assert_eq!(clock.now(), 0.5);

        let p = Vec3::new(13.0, 0.0, 5.0);
        assert_eq!(leader.height_at(p), follower.height_at(p));
    }

    #[test]
    fn test_interaction_flag_follows_settings() {
        let mut surface = single_wave_surface(SurfaceSettings::default());
        assert!(surface.create_splash(Vec3::ZERO, 1.0, 1.0));

        surface.settings.enable_interactions = false;
        assert!(!surface.create_splash(Vec3::ZERO, 1.0, 1.0));
        surface.update(5.0);
        assert_eq!(surface.interactions().len(), 1);

        surface.settings.enable_interactions = true;
        surface.update(3.0);
        assert!(surface.interactions().is_empty());
    }

    #[test]
    fn test_dispose_clears_pools() {
        let mut surface = single_wave_surface(SurfaceSettings::default());
        surface.create_splash(Vec3::ZERO, 1.0, 1.0);
        surface.create_wake(Vec3::ZERO, Vec3::Z * 3.0, 1.0);
        assert!(!surface.foam_particles().is_empty());

        surface.dispose();
        assert!(surface.interactions().is_empty());
        assert!(surface.foam_particles().is_empty());
        assert_eq!(surface.interactions_for_shader(), ShaderInteractions::default());
    }

    #[test]
    fn test_far_and_nan_points_do_not_panic() {
        let mut surface = WaterSurface::new(SurfaceSettings::default(), WaveField::ocean(), 1);
        surface.update(0.25);

        let far = Vec3::new(5.0e18, 0.0, 0.0);
        assert!(surface.detailed_height_at(far).is_finite());
        assert!(surface.detailed_normal_at(far).is_finite());

        let nan = Vec3::new(f32::NAN, 0.0, 2.0);
        surface.detailed_height_at(nan);
        surface.detailed_normal_at(nan);

        surface.field_mut().modify_ripple(|ripple| ripple.octaves = 200);
        assert!(surface.detailed_height_at(Vec3::new(3.0, 0.0, 4.0)).is_finite());
    }

    #[test]
    fn test_quality_caps() {
        let mut surface = WaterSurface::new(SurfaceSettings::default(), WaveField::ocean(), 4);
        surface.settings.max_wave_layers = 2;
        assert_eq!(surface.wave_table().count, 2);
        assert_eq!(surface.field().len(), 4);

        surface.field_mut().modify_ripple(|ripple| ripple.octaves = 6);
        let p = Vec3::new(1.3, 0.0, -0.7);
        surface.settings.max_ripple_octaves = 1;
        let coarse = surface.detailed_height_at(p);
        let single = RippleNoise::new(4).height(
            &RippleParams {
                octaves: 1,
                ..*surface.field().ripple()
            },
            surface.time_s(),
            p.x,
            p.z,
        );
        assert_eq!(coarse, surface.height_at(p) + single);
    }

    #[test]
    fn test_profile_queries() {
        let surface = WaterSurface::new(SurfaceSettings::default(), WaveField::ocean(), 0);
        assert!((surface.max_wave_height() - 3.3).abs() < 1e-5);
        assert_eq!(surface.wave_table().count, 4);
        let direction = surface.wave_direction();
        assert!(direction.x > 0.0);
    }
}
