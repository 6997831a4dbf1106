//! Wave animation clocks.
//!
//! A surface either owns a [`WaveClock`] or reads a [`SharedClock`] that keeps
//! several surfaces in sync. Exactly one surface (the writer) advances a
//! shared clock per tick; the others only read it.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

/// Per-surface animation time
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WaveClock {
    time_s: f32,
}

impl WaveClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> f32 {
        self.time_s
    }

    /// `t += delta_s · speed`
    pub fn advance(&mut self, delta_s: f32, speed: f32) {
        self.time_s += delta_s * speed;
    }

    pub fn reset(&mut self) {
        self.time_s = 0.0;
    }
}

/// Cloneable handle to a process-wide animation time.
///
/// Time is stored as f32 bits in an atomic, so reads from other threads see a
/// whole value. Advancing is read-modify-write and must stay with one writer.
#[derive(Debug, Clone, Default)]
pub struct SharedClock {
    bits: Arc<AtomicU32>,
}

impl SharedClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> f32 {
        f32::from_bits(self.bits.load(Ordering::Acquire))
    }

    pub fn advance(&self, delta_s: f32, speed: f32) {
        let next = self.now() + delta_s * speed;
        self.bits.store(next.to_bits(), Ordering::Release);
    }

    pub fn reset(&self) {
        self.bits.store(0.0f32.to_bits(), Ordering::Release);
    }
}

/// Where a surface reads its animation time from
#[derive(Debug, Clone)]
pub enum TimeSource {
    Local(WaveClock),
    Shared {
        clock: SharedClock,
        /// Only the writer advances or resets the shared clock
        writer: bool,
    },
}

impl Default for TimeSource {
    fn default() -> Self {
        Self::Local(WaveClock::new())
    }
}

impl TimeSource {
    pub fn now(&self) -> f32 {
        match self {
            Self::Local(clock) => clock.now(),
            Self::Shared { clock, .. } => clock.now(),
        }
    }

    pub fn advance(&mut self, delta_s: f32, speed: f32) {
        match self {
            Self::Local(clock) => clock.advance(delta_s, speed),
            Self::Shared { clock, writer: true } => clock.advance(delta_s, speed),
            Self::Shared { writer: false, .. } => {}
        }
    }

    pub fn reset(&mut self) {
        match self {
            Self::Local(clock) => clock.reset(),
            Self::Shared { clock, writer: true } => clock.reset(),
            Self::Shared { writer: false, .. } => {}
        }
    }
}
