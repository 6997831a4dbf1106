//! Wavefield library - Gerstner water surfaces with splashes, wakes and foam

pub mod cli;
pub mod error;
pub mod interaction;
pub mod ocean;
pub mod params;
