//! Resizing and sharpening of RGBA bitmaps.

use image::imageops::{self, FilterType};
use image::RgbaImage;
use std::io::{self, Error, ErrorKind};

use super::bitmap::{Image, PixelFormat};
use super::iconsize::IconSize;

/// Parameters of an unsharp-mask pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct UnsharpMask {
    /// Standard deviation of the Gaussian blur, in pixels.
    pub radius: f32,
    /// Strength of the sharpening, in percent of the blur difference.
    pub percent: i32,
    /// Minimum difference (in intensity levels) that gets sharpened.
    pub threshold: i32,
}

/// The sharpening applied to supersampled intermediates of small icons.
pub const ICON_SHARPEN: UnsharpMask = UnsharpMask {
    radius: 1.0,
    percent: 50,
    threshold: 3,
};

/// One stage of the high-quality resize.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ResizeStep {
    /// Lanczos resize of the current image to the given size.
    Resize(IconSize),
    /// Unsharp mask over the current image.
    Sharpen(UnsharpMask),
}

/// Returns the stages `high_quality_resize` runs to produce an image of the
/// given size.  Sizes narrower than 64 pixels are first resized to 4x the
/// target, sharpened, and then resized down; larger sizes take a single
/// resize.
pub fn resize_steps(size: IconSize) -> Vec<ResizeStep> {
    if size.needs_supersampling() {
        vec![ResizeStep::Resize(size.supersampled()),
             ResizeStep::Sharpen(ICON_SHARPEN),
             ResizeStep::Resize(size)]
    } else {
        vec![ResizeStep::Resize(size)]
    }
}

/// Resizes `source` to exactly `size`, compensating with a sharpened
/// intermediate for the blur a large downscale leaves at tiny sizes.  The
/// result is always RGBA.
pub fn high_quality_resize(source: &Image, size: IconSize) -> io::Result<Image> {
    let mut current: Option<Image> = None;
    for step in resize_steps(size) {
        let input = current.as_ref().unwrap_or(source);
        log::debug!("{}: {:?} on {}x{}",
                    size,
                    step,
                    input.width(),
                    input.height());
        current = Some(match step {
            ResizeStep::Resize(target) => resize_lanczos(input, target)?,
            ResizeStep::Sharpen(params) => unsharp_mask(input, params)?,
        });
    }
    Ok(current.unwrap_or_else(|| source.to_rgba()))
}

/// Upscales `image` to exactly `min_side` x `min_side` if either of its
/// dimensions is smaller than `min_side`; otherwise returns it unchanged.
/// The result is always RGBA.
pub fn ensure_min_resolution(image: Image, min_side: u32) -> io::Result<Image> {
    if image.width() >= min_side && image.height() >= min_side {
        return Ok(image.into_rgba());
    }
    log::debug!("upscaling {}x{} source to {}x{}",
                image.width(),
                image.height(),
                min_side,
                min_side);
    resize_lanczos(&image, IconSize::square(min_side))
}

/// Resizes an image with a Lanczos (windowed sinc, three lobes) filter.
/// Color channels are resampled premultiplied by alpha, so fully transparent
/// pixels do not bleed their color into the edges of opaque ones.
pub fn resize_lanczos(image: &Image, size: IconSize) -> io::Result<Image> {
    if size.width == 0 || size.height == 0 {
        let msg = format!("cannot resize to empty size {}", size);
        return Err(Error::new(ErrorKind::InvalidInput, msg));
    }
    if (image.width(), image.height()) == (size.width, size.height) {
        return Ok(image.to_rgba());
    }
    let mut buffer = to_buffer(image)?;
    premultiply(&mut buffer);
    let mut resized = imageops::resize(&buffer,
                                       size.width,
                                       size.height,
                                       FilterType::Lanczos3);
    unpremultiply(&mut resized);
    from_buffer(resized)
}

/// Sharpens an image by adding back a scaled difference between it and a
/// Gaussian-blurred copy.  Every channel, alpha included, is sharpened
/// independently; differences below the threshold are left alone.
pub fn unsharp_mask(image: &Image, params: UnsharpMask) -> io::Result<Image> {
    let original = to_buffer(image)?;
    let blurred = imageops::blur(&original, params.radius);
    let mut sharpened = original.clone();
    for ((out, &orig), &blur) in sharpened.iter_mut()
        .zip(original.iter())
        .zip(blurred.iter()) {
        let diff = i32::from(orig) - i32::from(blur);
        if diff.abs() >= params.threshold {
            let value = i32::from(orig) + diff * params.percent / 100;
            *out = value.clamp(0, 255) as u8;
        }
    }
    from_buffer(sharpened)
}

fn to_buffer(image: &Image) -> io::Result<RgbaImage> {
    let rgba = image.to_rgba();
    let (width, height) = (rgba.width(), rgba.height());
    RgbaImage::from_raw(width, height, rgba.into_data()).ok_or_else(|| {
        Error::new(ErrorKind::InvalidData,
                   format!("pixel buffer too small for {}x{}", width, height))
    })
}

fn from_buffer(buffer: RgbaImage) -> io::Result<Image> {
    let (width, height) = buffer.dimensions();
    Image::from_data(PixelFormat::RGBA,
                     width,
                     height,
                     buffer.into_raw())
}

fn premultiply(buffer: &mut RgbaImage) {
    for pixel in buffer.pixels_mut() {
        let alpha = u32::from(pixel[3]);
        for channel in &mut pixel.0[..3] {
            *channel = ((u32::from(*channel) * alpha + 127) / 255) as u8;
        }
    }
}

fn unpremultiply(buffer: &mut RgbaImage) {
    for pixel in buffer.pixels_mut() {
        let alpha = u32::from(pixel[3]);
        if alpha == 0 {
            pixel.0 = [0, 0, 0, 0];
            continue;
        }
        for channel in &mut pixel.0[..3] {
            let value = (u32::from(*channel) * 255 + alpha / 2) / alpha;
            *channel = value.min(255) as u8;
        }
    }
}
