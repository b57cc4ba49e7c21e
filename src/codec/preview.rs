//! PNG preview of a grid's display colors

use std::path::Path;

use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};

use crate::core::types::{CellCoord, Result};
use crate::grid::{DisplayColor, Grid};

/// Largest accepted pixels-per-cell factor
pub const MAX_SCALE: u32 = 64;

/// Render the grid as RGB8, `scale` image pixels per cell, row 0 at the top.
///
/// At scales of 3 and above each cell gets a one-pixel border in its outline
/// color. Cells missing from the mapping render white.
pub fn render_rgb(grid: &Grid, scale: u32) -> (u32, u32, Vec<u8>) {
    let scale = scale.clamp(1, MAX_SCALE) as usize;
    let (nx, ny) = (grid.nx(), grid.ny());
    let (width, height) = (nx * scale, ny * scale);
    let draw_outline = scale >= 3;

    let mut rgb = vec![255u8; width * height * 3];
    for row in 0..ny {
        for col in 0..nx {
            let (fill, outline) = grid
                .pixels()
                .get(&CellCoord::new(row, col))
                .map_or((DisplayColor::White, DisplayColor::White), |p| (p.color, p.outline));

            for dy in 0..scale {
                for dx in 0..scale {
                    let edge = dy == 0 || dx == 0 || dy == scale - 1 || dx == scale - 1;
                    let color = if draw_outline && edge { outline } else { fill };
                    let offset = ((row * scale + dy) * width + col * scale + dx) * 3;
                    rgb[offset..offset + 3].copy_from_slice(&color.rgb());
                }
            }
        }
    }
    (width as u32, height as u32, rgb)
}

/// Encode the preview as PNG bytes
pub fn encode_png(grid: &Grid, scale: u32) -> Result<Vec<u8>> {
    let (width, height, rgb) = render_rgb(grid, scale);
    let mut png_data = Vec::new();
    PngEncoder::new(&mut png_data).write_image(&rgb, width, height, ExtendedColorType::Rgb8)?;
    Ok(png_data)
}

/// Write the preview PNG to `path`
pub fn save(grid: &Grid, scale: u32, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let png = encode_png(grid, scale)?;
    std::fs::write(path, &png)?;
    log::info!("Preview written to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tool::{BuildingParams, Tool};
    use tempfile::TempDir;

    #[test]
    fn test_row_zero_on_top() {
        let mut grid = Grid::new(2, 2, 1.0).unwrap();
        grid.apply(0, 1, &Tool::Water.classification(&BuildingParams::default())).unwrap();

        let (width, height, rgb) = render_rgb(&grid, 1);
        assert_eq!((width, height), (2, 2));
        // top-right image pixel
        assert_eq!(&rgb[3..6], &DisplayColor::Blue.rgb());
        assert_eq!(&rgb[6..9], &DisplayColor::Brown.rgb());
    }

    #[test]
    fn test_outline_at_large_scale() {
        let grid = Grid::new(1, 1, 1.0).unwrap();
        let (width, _, rgb) = render_rgb(&grid, 4);
        assert_eq!(width, 4);
        assert_eq!(&rgb[0..3], &DisplayColor::White.rgb());
        let center = (4 + 1) * 3;
        assert_eq!(&rgb[center..center + 3], &DisplayColor::Brown.rgb());
    }

    #[test]
    fn test_png_decodes() {
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        let path = temp_dir.path().join("preview.png");

        let grid = Grid::new(5, 3, 1.0).unwrap();
        save(&grid, 2, &path).unwrap();

        let image = image::open(&path).unwrap().to_rgb8();
        assert_eq!(image.dimensions(), (10, 6));
        assert_eq!(image.get_pixel(0, 0).0, DisplayColor::Brown.rgb());
    }
}
