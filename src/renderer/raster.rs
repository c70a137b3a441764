use anyhow::{bail, Context, Result};
use fast_image_resize as fr;
use fr::images::Image;
use std::path::Path;

use crate::core::grid::Grid;
use crate::utils::{file_utils, logger};

/// Largest edge, in pixels, an exported image may have.
pub const MAX_EXPORT_EDGE: u32 = 8192;

/// An RGBA8 bitmap.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bitmap {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

/// One pixel per cell.
pub fn rasterize(grid: &Grid) -> Bitmap {
    let mut pixels = Vec::with_capacity(grid.width() * grid.height() * 4);
    for color in grid.cells() {
        pixels.extend_from_slice(&color.rgba());
    }

    Bitmap {
        width: grid.width() as u32,
        height: grid.height() as u32,
        pixels,
    }
}

/// Nearest-neighbour resize, so cells stay crisp blocks.
pub fn upscale(bitmap: Bitmap, width: u32, height: u32) -> Result<Bitmap> {
    if width == 0 || height == 0 {
        bail!("target size {}x{} is empty", width, height);
    }
    if width > MAX_EXPORT_EDGE || height > MAX_EXPORT_EDGE {
        bail!(
            "image would be {}x{}, the limit is {}x{}",
            width,
            height,
            MAX_EXPORT_EDGE,
            MAX_EXPORT_EDGE
        );
    }
    if width == bitmap.width && height == bitmap.height {
        return Ok(bitmap);
    }

    let src_image = Image::from_vec_u8(
        bitmap.width,
        bitmap.height,
        bitmap.pixels,
        fr::PixelType::U8x4,
    )
    .context("grid bitmap has the wrong size")?;

    let mut dst_image = Image::new(width, height, fr::PixelType::U8x4);

    // Straight alpha: translucent cells keep their exact channel values.
    let options = fr::ResizeOptions::new()
        .resize_alg(fr::ResizeAlg::Nearest)
        .use_alpha(false);
    let mut resizer = fr::Resizer::new();
    resizer
        .resize(&src_image, &mut dst_image, &options)
        .context("failed to scale image")?;

    Ok(Bitmap {
        width,
        height,
        pixels: dst_image.buffer().to_vec(),
    })
}

pub fn encode_png(bitmap: &Bitmap) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut out, bitmap.width, bitmap.height);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header().context("failed to write PNG header")?;
        writer
            .write_image_data(&bitmap.pixels)
            .context("failed to write PNG data")?;
        writer.finish().context("failed to finish PNG")?;
    }
    Ok(out)
}

/// PNG of the grid with every cell drawn as a `scale` x `scale` block.
pub fn render_png(grid: &Grid, scale: u32) -> Result<Vec<u8>> {
    if scale == 0 {
        bail!("export scale must be at least 1");
    }
    let bitmap = rasterize(grid);
    let (w, h) = (
        bitmap.width.saturating_mul(scale),
        bitmap.height.saturating_mul(scale),
    );
    encode_png(&upscale(bitmap, w, h)?)
}

/// Square thumbnail of fixed size, whatever the grid dimensions.
pub fn render_preview(grid: &Grid, size: u32) -> Result<Vec<u8>> {
    encode_png(&upscale(rasterize(grid), size, size)?)
}

pub fn write_png(path: &Path, grid: &Grid, scale: u32) -> Result<()> {
    let bytes = render_png(grid, scale)?;
    file_utils::write_atomic(path, &bytes)?;
    logger::info(&format!(
        "wrote {}x{} grid at scale {} to {}",
        grid.width(),
        grid.height(),
        scale,
        path.display()
    ));
    Ok(())
}
