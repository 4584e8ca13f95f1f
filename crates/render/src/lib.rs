#![deny(unsafe_code)]
//! CPU-side rasterization for heatsim fields.
//!
//! Maps sparse heat cells to RGBA pixel buffers through a multi-stop
//! [`Palette`], with an optional `png` feature (default on) for writing
//! snapshots to disk via the `image` crate.

pub mod palette;
pub mod pixel;

#[cfg(feature = "png")]
pub mod snapshot;

pub use palette::Palette;
