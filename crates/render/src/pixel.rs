//! Sparse cell map to RGBA8 pixel buffer conversion.
//!
//! Always available (no feature gate) so that callers embedding their own
//! output path can share the conversion with the `png` snapshot writer.

use heatsim_core::HeatMap;

use crate::palette::Palette;

/// Keeps the value normalization finite when the ceiling is 0.
const NORM_EPSILON: f64 = 1e-4;

/// Rasterizes a heat map through a palette into an RGBA8 buffer.
///
/// The buffer is `(width * scale) x (height * scale)` pixels in row-major
/// order, 4 bytes per pixel, alpha always 255. Every grid cell paints a
/// `scale x scale` block. Absent cells read as the floor value; stored
/// cells sample the palette at `value / (max_value + epsilon)`. Cells
/// injected outside the grid are skipped.
pub fn heatmap_to_rgba(map: &HeatMap, palette: &Palette, scale: usize) -> Vec<u8> {
    let width = map.width() * scale;
    let height = map.height() * scale;
    let denom = map.max_value() + NORM_EPSILON;

    let background = to_rgb8(palette.sample(map.min_value() / denom));
    let mut buf = Vec::with_capacity(width * height * 4);
    for _ in 0..width * height {
        buf.extend_from_slice(&[background[0], background[1], background[2], 255]);
    }

    for (_, cell) in map.cells() {
        if cell.x < 0
            || cell.y < 0
            || cell.x >= map.width() as i64
            || cell.y >= map.height() as i64
        {
            continue;
        }
        let rgb = to_rgb8(palette.sample(cell.value / denom));
        let (cx, cy) = (cell.x as usize, cell.y as usize);
        for py in 0..scale {
            for px in 0..scale {
                let idx = ((cy * scale + py) * width + cx * scale + px) * 4;
                buf[idx] = rgb[0];
                buf[idx + 1] = rgb[1];
                buf[idx + 2] = rgb[2];
            }
        }
    }

    buf
}

/// Converts [0, 1] RGB components to 8-bit channels.
fn to_rgb8(rgb: [f64; 3]) -> [u8; 3] {
    [
        (rgb[0] * 255.0).round() as u8,
        (rgb[1] * 255.0).round() as u8,
        (rgb[2] * 255.0).round() as u8,
    ]
}
