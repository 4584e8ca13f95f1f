//! Sparse 2D heat field with radial injection and convolution-based decay.
//!
//! A [`HeatMap`] stores only the cells whose value is meaningfully above the
//! configured floor; absence means "at floor value". Injections write into
//! the current buffer at any time, while [`HeatMap::advance`] quantizes
//! elapsed wall-clock time into fixed 24 Hz steps and runs one smoothing +
//! decay pass per step, swapping the two cell buffers after each pass.

use std::collections::HashMap;
use std::f64::consts::FRAC_1_SQRT_2;
use std::mem;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::SimError;
use crate::params::{param_bool, param_f64};
use crate::zorder::ZOrderCurve;

/// Simulation tick length in milliseconds (24 Hz).
pub const FIXED_TIME_STEP_MS: f64 = 1000.0 / 24.0;
/// Upper bound on queued catch-up passes after a long stall.
pub const MAX_CATCHUP_STEPS: usize = 50;
/// Cells within this distance of the floor value are dropped from storage.
const PRUNE_EPSILON: f64 = 0.01;
/// Keeps the radial falloff denominator non-zero.
const FALLOFF_EPSILON: f64 = 1e-4;

/// Default floor value.
const DEFAULT_MIN_VALUE: f64 = 0.0;
/// Default ceiling value.
const DEFAULT_MAX_VALUE: f64 = 255.0;
/// Default fraction of value lost per decay pass.
const DEFAULT_DECAY_RATE: f64 = 0.01;
/// Out-of-bounds neighbours count as floor value by default.
const DEFAULT_CONTAIN_HEAT: bool = true;

/// One stored grid location and its scalar value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cell {
    pub x: i64,
    pub y: i64,
    pub value: f64,
}

/// Construction parameters for a [`HeatMap`].
///
/// Use [`Default`] for the classic display configuration (floor 0, ceiling
/// 255, 1% decay per step, contained boundaries).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct HeatMapParams {
    /// Floor value: what an absent cell reads as, and the clamp lower bound.
    pub min_value: f64,
    /// Ceiling value: the clamp upper bound.
    pub max_value: f64,
    /// Fraction of value lost per decay pass, in [0, 1).
    pub decay_rate: f64,
    /// Whether out-of-bounds neighbours are treated as floor-value cells
    /// during convolution (true) or excluded from the weighted average
    /// (false).
    pub contain_heat: bool,
}

impl Default for HeatMapParams {
    fn default() -> Self {
        Self {
            min_value: DEFAULT_MIN_VALUE,
            max_value: DEFAULT_MAX_VALUE,
            decay_rate: DEFAULT_DECAY_RATE,
            contain_heat: DEFAULT_CONTAIN_HEAT,
        }
    }
}

impl HeatMapParams {
    /// Extracts parameters from a JSON object, falling back to defaults for
    /// missing or mistyped keys.
    pub fn from_json(params: &Value) -> Self {
        Self {
            min_value: param_f64(params, "min_value", DEFAULT_MIN_VALUE),
            max_value: param_f64(params, "max_value", DEFAULT_MAX_VALUE),
            decay_rate: param_f64(params, "decay_rate", DEFAULT_DECAY_RATE),
            contain_heat: param_bool(params, "contain_heat", DEFAULT_CONTAIN_HEAT),
        }
    }
}

/// Sparse 2D scalar field driven by injections and fixed-timestep decay.
///
/// Cells live in a `HashMap` keyed by the Z-order index of their
/// coordinates. Two buffers of identical shape exchange the current/next
/// roles after every decay pass; cell data is never copied between them.
///
/// Numeric inputs are not validated: negative radii, out-of-range
/// coordinates, and non-finite values produce degenerate but non-crashing
/// results. Not designed for concurrent access; embed behind external
/// synchronization if shared across threads.
#[derive(Debug, Clone)]
pub struct HeatMap {
    width: usize,
    height: usize,
    params: HeatMapParams,
    curve: ZOrderCurve,
    current: HashMap<u64, Cell>,
    buffer: HashMap<u64, Cell>,
    accumulator: f64,
    observed_max: f64,
    observed_min: f64,
}

impl HeatMap {
    /// Creates an empty heat map of the given dimensions.
    ///
    /// Returns `SimError::InvalidDimensions` if either dimension is zero or
    /// `width * height` overflows `usize`. Numeric parameters are taken
    /// as-is.
    pub fn new(width: usize, height: usize, params: HeatMapParams) -> Result<Self, SimError> {
        if width == 0 || height == 0 {
            return Err(SimError::InvalidDimensions);
        }
        width
            .checked_mul(height)
            .ok_or(SimError::InvalidDimensions)?;
        Ok(Self {
            width,
            height,
            params,
            curve: ZOrderCurve::new(width, height),
            current: HashMap::new(),
            buffer: HashMap::new(),
            accumulator: 0.0,
            // Observed extrema start at 0 regardless of the configured
            // bounds, matching the behaviour renderers already depend on.
            observed_max: 0.0,
            observed_min: 0.0,
        })
    }

    /// Field width in cells.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Field height in cells.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Floor value.
    pub fn min_value(&self) -> f64 {
        self.params.min_value
    }

    /// Ceiling value.
    pub fn max_value(&self) -> f64 {
        self.params.max_value
    }

    /// Fraction of value lost per decay pass.
    pub fn decay_rate(&self) -> f64 {
        self.params.decay_rate
    }

    /// Whether out-of-bounds neighbours count as floor-value cells.
    pub fn contain_heat(&self) -> bool {
        self.params.contain_heat
    }

    /// Construction parameters.
    pub fn params(&self) -> HeatMapParams {
        self.params
    }

    /// Highest cell value ever produced by a decay pass.
    pub fn observed_max(&self) -> f64 {
        self.observed_max
    }

    /// Lowest cell value ever produced by a decay pass.
    pub fn observed_min(&self) -> f64 {
        self.observed_min
    }

    /// Number of cells currently stored.
    pub fn cell_count(&self) -> usize {
        self.current.len()
    }

    /// Iterates over all stored cells as `(key, &Cell)`.
    ///
    /// The renderer surface: each cell carries its own coordinates, so the
    /// key is only needed by callers that want the Z-order position.
    pub fn cells(&self) -> impl Iterator<Item = (u64, &Cell)> + '_ {
        self.current.iter().map(|(&key, cell)| (key, cell))
    }

    /// Value at `(x, y)` (floored), or the floor value if no cell is stored
    /// there.
    pub fn value_at(&self, x: f64, y: f64) -> f64 {
        let key = self.curve.index(floor_coord(x), floor_coord(y));
        self.current
            .get(&key)
            .map_or(self.params.min_value, |cell| cell.value)
    }

    /// Overwrites the value at `(x, y)` (floored).
    ///
    /// With radius 0 the cell is set to `value` verbatim; no clamping
    /// happens until the next decay pass. A non-zero radius delegates to
    /// the radial writer in overwrite mode, which clamps per cell.
    pub fn set_value_at(&mut self, x: f64, y: f64, value: f64, radius: i64) {
        let (cx, cy) = (floor_coord(x), floor_coord(y));
        if radius == 0 {
            let key = self.curve.index(cx, cy);
            self.current.insert(
                key,
                Cell {
                    x: cx,
                    y: cy,
                    value,
                },
            );
        } else {
            self.splat(cx, cy, value, radius, false);
        }
    }

    /// Adds `delta` to the value at `(x, y)` (floored).
    ///
    /// With radius 0 the cell becomes its prior value (or the floor value
    /// if absent) plus `delta`, unclamped. A non-zero radius delegates to
    /// the radial writer in accumulate mode.
    pub fn add_value_at(&mut self, x: f64, y: f64, delta: f64, radius: i64) {
        let (cx, cy) = (floor_coord(x), floor_coord(y));
        if radius == 0 {
            let key = self.curve.index(cx, cy);
            let prior = self
                .current
                .get(&key)
                .map_or(self.params.min_value, |cell| cell.value);
            self.current.insert(
                key,
                Cell {
                    x: cx,
                    y: cy,
                    value: prior + delta,
                },
            );
        } else {
            self.splat(cx, cy, delta, radius, true);
        }
    }

    /// Writes a circular falloff pattern centred on `(ox, oy)`.
    ///
    /// Offsets within the bounding square whose squared distance exceeds
    /// `radius^2` are skipped, giving a circular cutoff rather than a
    /// square one. A negative radius yields an empty offset range.
    fn splat(&mut self, ox: i64, oy: i64, value: f64, radius: i64, accumulate: bool) {
        let radius_sq = (radius * radius) as f64;
        for dy in -radius..=radius {
            for dx in -radius..=radius {
                let dist = (dx * dx + dy * dy) as f64;
                if dist > radius_sq {
                    continue;
                }
                let ratio = 1.0 - dist / (radius_sq + FALLOFF_EPSILON);
                let contribution = value * ratio;

                let (tx, ty) = (ox + dx, oy + dy);
                let key = self.curve.index(tx, ty);
                let next = if accumulate {
                    let prior = self
                        .current
                        .get(&key)
                        .map_or(self.params.min_value, |cell| cell.value);
                    self.clamp_value(contribution + prior)
                } else {
                    self.clamp_value(contribution)
                };
                self.current.insert(
                    key,
                    Cell {
                        x: tx,
                        y: ty,
                        value: next,
                    },
                );
            }
        }
    }

    /// Advances the simulation by `elapsed_ms` of wall-clock time,
    /// returning the number of decay passes run.
    ///
    /// Elapsed time accumulates until a whole 24 Hz step is available; the
    /// accumulator is clamped to [`MAX_CATCHUP_STEPS`] steps so a stalled
    /// caller (paused tab, suspended process) cannot queue unbounded
    /// catch-up work.
    pub fn advance(&mut self, elapsed_ms: f64) -> usize {
        self.accumulator += elapsed_ms;
        let cap = FIXED_TIME_STEP_MS * MAX_CATCHUP_STEPS as f64;
        if self.accumulator > cap {
            self.accumulator = cap;
        }
        let mut passes = 0;
        while self.accumulator >= FIXED_TIME_STEP_MS {
            self.accumulator -= FIXED_TIME_STEP_MS;
            self.decay_pass();
            passes += 1;
        }
        passes
    }

    /// One convolution + decay step over the full grid.
    ///
    /// Jacobi-style: all reads come from the current buffer, all writes go
    /// to the next buffer, and the buffers swap at the end. The next buffer
    /// is cleared first so every surviving cell is freshly computed;
    /// stale entries (including out-of-bounds injection garbage) never
    /// resurface.
    fn decay_pass(&mut self) {
        self.buffer.clear();
        let w = self.width as i64;
        let h = self.height as i64;
        let min = self.params.min_value;
        let retain = 1.0 - self.params.decay_rate;

        for y in 0..h {
            for x in 0..w {
                let mut weighted = 0.0;
                let mut total = 0.0;
                for dy in -1..=1_i64 {
                    for dx in -1..=1_i64 {
                        let weight = kernel_weight(dx, dy);
                        let (tx, ty) = (x + dx, y + dy);
                        if tx < 0 || ty < 0 || tx >= w || ty >= h {
                            if self.params.contain_heat {
                                weighted += min * weight;
                                total += weight;
                            }
                            continue;
                        }
                        let value = self
                            .current
                            .get(&self.curve.index(tx, ty))
                            .map_or(min, |cell| cell.value);
                        weighted += value * weight;
                        total += weight;
                    }
                }

                let averaged = if total > 0.0 { weighted / total } else { 0.0 };
                let next = self.clamp_value(averaged * retain);

                if next > self.observed_max {
                    self.observed_max = next;
                }
                if next < self.observed_min {
                    self.observed_min = next;
                }

                if next <= min + PRUNE_EPSILON {
                    continue;
                }
                let key = self.curve.index(x, y);
                self.buffer.insert(key, Cell { x, y, value: next });
            }
        }

        mem::swap(&mut self.current, &mut self.buffer);
    }

    /// Order-safe clamp to [min_value, max_value]. Unlike `f64::clamp`
    /// this never panics when the configured bounds are inverted.
    fn clamp_value(&self, value: f64) -> f64 {
        value.min(self.params.max_value).max(self.params.min_value)
    }
}

/// 3x3 smoothing kernel: axis-aligned neighbours and the centre weigh 1,
/// diagonals sqrt(2)/2.
fn kernel_weight(dx: i64, dy: i64) -> f64 {
    if dx != 0 && dy != 0 {
        FRAC_1_SQRT_2
    } else {
        1.0
    }
}

/// Floors a caller-supplied coordinate to a grid index.
fn floor_coord(coord: f64) -> i64 {
    coord.floor() as i64
}
