//! Errors for the fallible configuration surface.
//!
//! The simulation core itself never fails: out-of-range values are clamped
//! and impossible requests are dropped.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("unknown water preset '{0}' (expected ocean, lake, river or pool)")]
    UnknownPreset(String),
}
