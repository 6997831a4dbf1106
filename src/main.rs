//! Wavefield - headless driver for a Gerstner water surface
//!
//! Runs one surface for a fixed number of ticks, dropping splashes and a
//! circling wake, and reports the probe height, normal and pool sizes.

use clap::Parser;
use glam::Vec3;
use log::info;

use wavefield::cli::Args;
use wavefield::error::ConfigError;
use wavefield::interaction::DEFAULT_SPLASH_RADIUS_M;
use wavefield::ocean::WaterSurface;

/// Radius of the circling wake source (meters)
const WAKE_ORBIT_RADIUS_M: f32 = 8.0;

/// Angular speed of the wake source (radians/second)
const WAKE_ORBIT_RATE: f32 = 0.6;

fn main() -> Result<(), ConfigError> {
    env_logger::init();

    let args = Args::parse();
    let body = args.water_body()?;
    let mut surface = WaterSurface::new(args.surface_settings(), body.wave_field(), args.seed);

    info!(
        "Preset {}: {} layers, max wave height {:.2} m",
        body,
        surface.field().len(),
        surface.max_wave_height()
    );

    let probe = Vec3::new(args.probe_x, 0.0, args.probe_z);
    let report_every = (args.ticks / 10).max(1);

    for tick in 0..args.ticks {
        let elapsed_s = tick as f32 * args.dt;

        if args.splash_every > 0 && tick % args.splash_every == 0 {
            let at = Vec3::new(probe.x, surface.height_at(probe), probe.z);
            surface.create_splash(at, 1.0, DEFAULT_SPLASH_RADIUS_M);
        }

        // Boat circling the probe
        let angle = elapsed_s * WAKE_ORBIT_RATE;
        let offset = Vec3::new(angle.cos(), 0.0, angle.sin()) * WAKE_ORBIT_RADIUS_M;
        let velocity = Vec3::new(-angle.sin(), 0.0, angle.cos())
            * WAKE_ORBIT_RADIUS_M
            * WAKE_ORBIT_RATE;
        let boat = probe + offset;
        let boat = Vec3::new(boat.x, surface.height_at(boat), boat.z);
        surface.create_wake(boat, velocity, 0.8);

        surface.update(args.dt);

        if tick % report_every == 0 || tick + 1 == args.ticks {
            let height = surface.height_at(probe);
            let normal = surface.normal_at(probe);
            println!(
                "t={:6.2}s  h={:+.3} m  n=({:+.3}, {:.3}, {:+.3})  interactions={:2}  foam={:4}",
                surface.time_s(),
                height,
                normal.x,
                normal.y,
                normal.z,
                surface.interactions().len(),
                surface.foam_particles().len()
            );
        }
    }

    surface.dispose();
    Ok(())
}
