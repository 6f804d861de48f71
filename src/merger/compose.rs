//! Horizontal compositing.

use image::{DynamicImage, Rgba, RgbaImage, imageops};

use super::error::{MergeError, MergeResult};

/// Initial value of every canvas pixel: opaque black.
///
/// Areas below images shorter than the tallest one keep this value.
pub const CANVAS_FILL: Rgba<u8> = Rgba([0, 0, 0, 255]);

/// Canvas size for a horizontal strip: summed widths, tallest height.
pub fn strip_dimensions(images: &[DynamicImage]) -> MergeResult<(u32, u32)> {
    let width = images
        .iter()
        .try_fold(0u32, |acc, image| acc.checked_add(image.width()))
        .ok_or(MergeError::CanvasTooWide {
            images: images.len(),
        })?;
    let height = images.iter().map(DynamicImage::height).max().unwrap_or(0);
    Ok((width, height))
}

/// Paste `images` left to right, top-aligned, onto a fresh canvas.
///
/// Pixels are replaced, not blended, so source alpha is carried over as is.
/// Each source is dropped as soon as it has been pasted.
pub fn compose_horizontal(images: Vec<DynamicImage>) -> MergeResult<RgbaImage> {
    let (width, height) = strip_dimensions(&images)?;
    let mut canvas = RgbaImage::from_pixel(width, height, CANVAS_FILL);

    let mut x: i64 = 0;
    for image in images {
        imageops::replace(&mut canvas, &image, x, 0);
        x += i64::from(image.width());
    }

    Ok(canvas)
}
