//! Command-line argument parsing.

use clap::Parser;

use crate::error::ConfigError;
use crate::params::{SurfaceSettings, WaterBodyType};

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "wavefield")]
#[command(about = "Headless Gerstner water surface simulation", long_about = None)]
pub struct Args {
    /// Wave preset: ocean (default), lake, river, pool
    #[arg(long, value_name = "PRESET", default_value = "ocean")]
    pub preset: String,

    /// Number of simulation ticks to run
    #[arg(long, value_name = "COUNT", default_value = "180")]
    pub ticks: u32,

    /// Tick length in seconds
    #[arg(long, value_name = "SECONDS", default_value = "0.016666668")]
    pub dt: f32,

    /// Seed for foam scatter and ripple noise
    #[arg(long, default_value = "42")]
    pub seed: u64,

    /// Drop a splash at the probe every N ticks (0 = never)
    #[arg(long, value_name = "TICKS", default_value = "30")]
    pub splash_every: u32,

    /// Overall wave amplitude multiplier
    #[arg(long, default_value = "1.0")]
    pub wave_strength: f32,

    /// Wave animation speed multiplier
    #[arg(long, default_value = "1.0")]
    pub wave_speed: f32,

    /// Probe X coordinate (meters)
    #[arg(long, value_name = "METERS", default_value = "0.0", allow_negative_numbers = true)]
    pub probe_x: f32,

    /// Probe Z coordinate (meters)
    #[arg(long, value_name = "METERS", default_value = "0.0", allow_negative_numbers = true)]
    pub probe_z: f32,
}

impl Args {
    /// Parse the wave preset from command-line arguments
    pub fn water_body(&self) -> Result<WaterBodyType, ConfigError> {
        self.preset.parse()
    }

    /// Surface settings from command-line multipliers
    pub fn surface_settings(&self) -> SurfaceSettings {
        SurfaceSettings {
            wave_strength: self.wave_strength,
            wave_speed: self.wave_speed,
            ..SurfaceSettings::default()
        }
        .sanitized()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["wavefield"]);
        assert_eq!(args.water_body(), Ok(WaterBodyType::Ocean));
        assert_eq!(args.ticks, 180);
        assert_eq!(args.splash_every, 30);
        assert_eq!(args.surface_settings(), SurfaceSettings::default());
    }

    #[test]
    fn test_preset_and_negative_probe() {
        let args = Args::parse_from([
            "wavefield",
            "--preset",
            "Lake",
            "--probe-x",
            "-12.5",
            "--wave-strength",
            "2",
        ]);
        assert_eq!(args.water_body(), Ok(WaterBodyType::Lake));
        assert_eq!(args.probe_x, -12.5);
        assert_eq!(args.surface_settings().wave_strength, 2.0);
    }

    #[test]
    fn test_unknown_preset() {
        let args = Args::parse_from(["wavefield", "--preset", "puddle"]);
        assert!(matches!(
            args.water_body(),
            Err(ConfigError::UnknownPreset(name)) if name == "puddle"
        ));
    }
}
