//! Randomized injection sources for the demo driver.
//!
//! A [`StimulusSource`] produces the next pulse to feed into the heat map:
//! a position, an amount, and a splat radius. All implementations are
//! deterministic given their seed, so a demo run is reproducible.

use heatsim_core::SplitMix64;
use noise::{NoiseFn, Perlin};

/// All recognized stimulus source names.
const STIMULUS_NAMES: &[&str] = &["uniform", "clustered", "drift"];

/// Clock increment per drift pulse; small values wander slowly.
const DRIFT_RATE: f64 = 0.02;
/// Seed offset separating the drift source's two noise channels.
const DRIFT_CHANNEL_OFFSET: u32 = 7919;

/// One injection event for [`HeatMap::add_value_at`](heatsim_core::HeatMap).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pulse {
    pub x: f64,
    pub y: f64,
    pub amount: f64,
    pub radius: i64,
}

/// A source of injection pulses. Implementations must be deterministic:
/// same seed, same pulse sequence.
pub trait StimulusSource {
    /// Produces the next pulse for a `width` x `height` grid. Positions are
    /// fractional; the heat map floors them on injection.
    fn pulse(&mut self, width: usize, height: usize) -> Pulse;
}

/// Positions drawn uniformly over the grid.
pub struct UniformStimulus {
    rng: SplitMix64,
    amount: f64,
    radius: i64,
}

/// Positions drawn as the mean of three uniform draws per axis, biasing
/// pulses toward the grid centre.
pub struct ClusteredStimulus {
    rng: SplitMix64,
    amount: f64,
    radius: i64,
}

/// Position wanders smoothly along two Perlin noise channels, producing a
/// continuous hot trail instead of scattered pulses.
pub struct DriftStimulus {
    noise_x: Perlin,
    noise_y: Perlin,
    clock: f64,
    amount: f64,
    radius: i64,
}

impl UniformStimulus {
    pub fn new(seed: u64, amount: f64, radius: i64) -> Self {
        Self {
            rng: SplitMix64::new(seed),
            amount,
            radius,
        }
    }
}

impl ClusteredStimulus {
    pub fn new(seed: u64, amount: f64, radius: i64) -> Self {
        Self {
            rng: SplitMix64::new(seed),
            amount,
            radius,
        }
    }

    /// Mean of three uniform draws in [0, 1): a rough bell centred on 0.5.
    fn central(&mut self) -> f64 {
        (self.rng.next_f64() + self.rng.next_f64() + self.rng.next_f64()) / 3.0
    }
}

impl DriftStimulus {
    pub fn new(seed: u32, amount: f64, radius: i64) -> Self {
        Self {
            noise_x: Perlin::new(seed),
            noise_y: Perlin::new(seed.wrapping_add(DRIFT_CHANNEL_OFFSET)),
            clock: 0.0,
            amount,
            radius,
        }
    }
}

impl StimulusSource for UniformStimulus {
    fn pulse(&mut self, width: usize, height: usize) -> Pulse {
        Pulse {
            x: self.rng.next_f64() * width as f64,
            y: self.rng.next_f64() * height as f64,
            amount: self.amount,
            radius: self.radius,
        }
    }
}

impl StimulusSource for ClusteredStimulus {
    fn pulse(&mut self, width: usize, height: usize) -> Pulse {
        Pulse {
            x: self.central() * width as f64,
            y: self.central() * height as f64,
            amount: self.amount,
            radius: self.radius,
        }
    }
}

impl StimulusSource for DriftStimulus {
    fn pulse(&mut self, width: usize, height: usize) -> Pulse {
        self.clock += DRIFT_RATE;
        // Perlin output sits in roughly [-1, 1]; remap to grid coordinates
        // and clamp the tail ends.
        let nx = self.noise_x.get([self.clock, 0.0]) * 0.5 + 0.5;
        let ny = self.noise_y.get([self.clock, 0.0]) * 0.5 + 0.5;
        Pulse {
            x: (nx * width as f64).clamp(0.0, (width - 1) as f64),
            y: (ny * height as f64).clamp(0.0, (height - 1) as f64),
            amount: self.amount,
            radius: self.radius,
        }
    }
}

/// Constructs a stimulus source by name, or `None` for unrecognized names.
pub fn from_name(
    name: &str,
    seed: u64,
    amount: f64,
    radius: i64,
) -> Option<Box<dyn StimulusSource>> {
    match name {
        "uniform" => Some(Box::new(UniformStimulus::new(seed, amount, radius))),
        "clustered" => Some(Box::new(ClusteredStimulus::new(seed, amount, radius))),
        "drift" => Some(Box::new(DriftStimulus::new(seed as u32, amount, radius))),
        _ => None,
    }
}

/// Returns a slice of all recognized stimulus source names.
pub fn list_names() -> &'static [&'static str] {
    STIMULUS_NAMES
}
