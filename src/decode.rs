use image::{DynamicImage, ImageError};
use std::fs;
use std::io::{self, Error, ErrorKind};
use std::path::Path;

use super::bitmap::{Image, PixelFormat};

impl Image {
    /// Reads and decodes an image file in any raster format supported by the
    /// codec (PNG, JPEG, GIF, BMP, ICO, TIFF or WebP).  The format is guessed
    /// from the file contents, not its extension.
    pub fn open<P: AsRef<Path>>(path: P) -> io::Result<Image> {
        let path = path.as_ref();
        let with_path = |err: Error, action: &str| {
            Error::new(err.kind(),
                       format!("failed to {} {}: {}", action, path.display(),
                               err))
        };
        let bytes = fs::read(path).map_err(|err| with_path(err, "read"))?;
        let image = Image::decode(&bytes)
            .map_err(|err| with_path(err, "decode"))?;
        log::info!("decoded {} ({}x{}, {:?})",
                   path.display(),
                   image.width(),
                   image.height(),
                   image.pixel_format());
        Ok(image)
    }

    /// Decodes an in-memory image file.  Eight-bit images keep their pixel
    /// format; anything wider (16-bit or floating point channels) is
    /// converted to RGBA.
    pub fn decode(bytes: &[u8]) -> io::Result<Image> {
        let dynamic = image::load_from_memory(bytes).map_err(codec_error)?;
        from_dynamic(dynamic)
    }
}

fn from_dynamic(dynamic: DynamicImage) -> io::Result<Image> {
    let (format, width, height, data) = match dynamic {
        DynamicImage::ImageRgba8(buf) => {
            (PixelFormat::RGBA, buf.width(), buf.height(), buf.into_raw())
        }
        DynamicImage::ImageRgb8(buf) => {
            (PixelFormat::RGB, buf.width(), buf.height(), buf.into_raw())
        }
        DynamicImage::ImageLumaA8(buf) => {
            (PixelFormat::GrayAlpha, buf.width(), buf.height(), buf.into_raw())
        }
        DynamicImage::ImageLuma8(buf) => {
            (PixelFormat::Gray, buf.width(), buf.height(), buf.into_raw())
        }
        other => {
            let buf = other.to_rgba8();
            (PixelFormat::RGBA, buf.width(), buf.height(), buf.into_raw())
        }
    };
    Image::from_data(format, width, height, data)
}

/// Converts a codec error into an I/O error, keeping the original kind for
/// I/O failures.
pub(crate) fn codec_error(err: ImageError) -> Error {
    match err {
        ImageError::IoError(err) => err,
        other @ (ImageError::Parameter(_) | ImageError::Limits(_)) => {
            Error::new(ErrorKind::InvalidInput, other)
        }
        other => Error::new(ErrorKind::InvalidData, other),
    }
}
