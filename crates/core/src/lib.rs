#![deny(unsafe_code)]
//! Core of the heatsim field simulation.
//!
//! Provides the [`HeatMap`] simulation primitive (sparse cell storage,
//! radial injection, convolution-based decay on a fixed 24 Hz timestep),
//! the [`ZOrderCurve`] spatial index backing its storage, the shared
//! [`SimError`] type, the [`SplitMix64`] PRNG, and JSON parameter helpers.

pub mod error;
pub mod heatmap;
pub mod params;
pub mod prng;
pub mod zorder;

pub use error::SimError;
pub use heatmap::{Cell, HeatMap, HeatMapParams, FIXED_TIME_STEP_MS, MAX_CATCHUP_STEPS};
pub use prng::SplitMix64;
pub use zorder::ZOrderCurve;
