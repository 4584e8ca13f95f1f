//! PNG snapshot writing for heat maps.
//!
//! Feature-gated behind `png` (default on) so embedders that only need the
//! pixel buffer conversion can drop the `image` dependency.

use std::path::Path;

use heatsim_core::{HeatMap, SimError};

use crate::palette::Palette;
use crate::pixel::heatmap_to_rgba;

/// Writes a heat map as a PNG image, mapping values through the palette and
/// upscaling each cell to a `scale x scale` block.
///
/// Returns `SimError::InvalidDimensions` if the scaled dimensions overflow
/// `u32`, or `SimError::Io` on write failure.
pub fn write_png(
    map: &HeatMap,
    palette: &Palette,
    scale: usize,
    path: &Path,
) -> Result<(), SimError> {
    let w = map
        .width()
        .checked_mul(scale)
        .and_then(|w| u32::try_from(w).ok())
        .ok_or(SimError::InvalidDimensions)?;
    let h = map
        .height()
        .checked_mul(scale)
        .and_then(|h| u32::try_from(h).ok())
        .ok_or(SimError::InvalidDimensions)?;

    let rgba = heatmap_to_rgba(map, palette, scale);
    let img = image::RgbaImage::from_raw(w, h, rgba)
        .ok_or_else(|| SimError::Io("RGBA buffer size mismatch".into()))?;
    img.save(path).map_err(|e| SimError::Io(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use heatsim_core::HeatMapParams;

    #[test]
    fn write_png_round_trip() {
        let mut map = HeatMap::new(16, 16, HeatMapParams::default()).unwrap();
        map.add_value_at(8.0, 8.0, 255.0, 3);
        let palette = Palette::thermal();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("snapshot.png");

        write_png(&map, &palette, 4, &path).unwrap();

        let img = image::open(&path).unwrap().to_rgba8();
        assert_eq!(img.width(), 64);
        assert_eq!(img.height(), 64);
        // The injected hot spot must stand out from the black background.
        let centre = img.get_pixel(8 * 4, 8 * 4);
        assert!(centre[0] > 200, "hot centre pixel: {centre:?}");
    }

    #[test]
    fn write_png_rejects_overflowing_scale() {
        let map = HeatMap::new(4, 4, HeatMapParams::default()).unwrap();
        let err = write_png(
            &map,
            &Palette::thermal(),
            usize::MAX / 2,
            Path::new("unused.png"),
        )
        .unwrap_err();
        assert!(matches!(err, SimError::InvalidDimensions));
    }

    #[test]
    fn write_png_surfaces_io_failures() {
        let map = HeatMap::new(4, 4, HeatMapParams::default()).unwrap();
        let err = write_png(
            &map,
            &Palette::thermal(),
            1,
            Path::new("/nonexistent-dir/snapshot.png"),
        )
        .unwrap_err();
        assert!(matches!(err, SimError::Io(_)));
    }
}
