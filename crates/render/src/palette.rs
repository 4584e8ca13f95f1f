//! Multi-stop RGB gradients sampled by linear interpolation.
//!
//! Stops are evenly spaced along the `t` parameter: `sample(0.0)` returns
//! the first stop, `sample(1.0)` the last. Heat values are normalized by
//! the caller before sampling.

use heatsim_core::SimError;

/// All recognized palette names.
const PALETTE_NAMES: &[&str] = &["thermal", "grayscale"];

/// A gradient of RGB stops with components in [0, 1].
#[derive(Debug, Clone)]
pub struct Palette {
    stops: Vec<[f64; 3]>,
}

impl Palette {
    /// Creates a palette from explicit stops. Requires at least one.
    pub fn new(stops: Vec<[f64; 3]>) -> Result<Self, SimError> {
        if stops.is_empty() {
            return Err(SimError::InvalidPalette(
                "palette requires at least 1 stop".to_string(),
            ));
        }
        Ok(Self { stops })
    }

    /// Classic heat ramp: black, blue, green, yellow, orange, red.
    pub fn thermal() -> Self {
        Self {
            stops: vec![
                [0.0, 0.0, 0.0],
                [0.0, 0.0, 1.0],
                [0.0, 1.0, 0.0],
                [1.0, 1.0, 0.0],
                [1.0, 165.0 / 255.0, 0.0],
                [1.0, 0.0, 0.0],
            ],
        }
    }

    /// Black to white.
    pub fn grayscale() -> Self {
        Self {
            stops: vec![[0.0, 0.0, 0.0], [1.0, 1.0, 1.0]],
        }
    }

    /// Constructs a named palette.
    ///
    /// Returns `SimError::InvalidPalette` for unrecognized names.
    pub fn from_name(name: &str) -> Result<Self, SimError> {
        match name {
            "thermal" => Ok(Self::thermal()),
            "grayscale" => Ok(Self::grayscale()),
            _ => Err(SimError::InvalidPalette(format!(
                "unknown palette: {name}"
            ))),
        }
    }

    /// Returns a slice of all recognized palette names.
    pub fn list_names() -> &'static [&'static str] {
        PALETTE_NAMES
    }

    /// Number of stops.
    pub fn len(&self) -> usize {
        self.stops.len()
    }

    /// Always false for a constructed palette.
    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    /// Samples the gradient at `t` in [0, 1], clamping out-of-range input
    /// (NaN reads as 0). Returns RGB components in [0, 1].
    pub fn sample(&self, t: f64) -> [f64; 3] {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let n = self.stops.len();
        if n == 1 {
            return self.stops[0];
        }

        let scaled = t * (n - 1) as f64;
        let idx = (scaled as usize).min(n - 2);
        let frac = scaled - idx as f64;

        let a = self.stops[idx];
        let b = self.stops[idx + 1];
        [
            a[0] + frac * (b[0] - a[0]),
            a[1] + frac * (b[1] - a[1]),
            a[2] + frac * (b[2] - a[2]),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_rejects_empty_stop_list() {
        assert!(matches!(
            Palette::new(vec![]),
            Err(SimError::InvalidPalette(_))
        ));
    }

    #[test]
    fn from_name_resolves_known_palettes() {
        assert_eq!(Palette::from_name("thermal").unwrap().len(), 6);
        assert_eq!(Palette::from_name("grayscale").unwrap().len(), 2);
    }

    #[test]
    fn from_name_rejects_unknown_palette() {
        let err = Palette::from_name("lava").unwrap_err();
        assert!(err.to_string().contains("lava"));
    }

    #[test]
    fn list_names_matches_from_name() {
        for name in Palette::list_names() {
            assert!(Palette::from_name(name).is_ok(), "{name} should resolve");
        }
    }

    #[test]
    fn sample_boundaries_hit_first_and_last_stops() {
        let p = Palette::thermal();
        assert_eq!(p.sample(0.0), [0.0, 0.0, 0.0]);
        assert_eq!(p.sample(1.0), [1.0, 0.0, 0.0]);
    }

    #[test]
    fn sample_clamps_out_of_range_input() {
        let p = Palette::grayscale();
        assert_eq!(p.sample(-2.0), p.sample(0.0));
        assert_eq!(p.sample(9.0), p.sample(1.0));
        assert_eq!(p.sample(f64::NAN), p.sample(0.0));
    }

    #[test]
    fn sample_interpolates_midpoints() {
        let p = Palette::grayscale();
        let mid = p.sample(0.5);
        for c in mid {
            assert!((c - 0.5).abs() < 1e-12, "expected grey, got {mid:?}");
        }
    }

    #[test]
    fn single_stop_palette_is_constant() {
        let p = Palette::new(vec![[0.2, 0.4, 0.6]]).unwrap();
        assert_eq!(p.sample(0.0), [0.2, 0.4, 0.6]);
        assert_eq!(p.sample(0.7), [0.2, 0.4, 0.6]);
        assert_eq!(p.sample(1.0), [0.2, 0.4, 0.6]);
    }

    // -- Property-based tests --

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn samples_stay_in_unit_cube(t in -10.0_f64..10.0) {
                let p = Palette::thermal();
                for c in p.sample(t) {
                    prop_assert!((0.0..=1.0).contains(&c));
                }
            }
        }
    }
}
