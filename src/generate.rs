//! The end-to-end conversion from one source image to the icon files.

use std::fs;
use std::io::{self, Error, Write};
use std::path::Path;

use super::bitmap::Image;
use super::config::IconConfig;
use super::icondir::IconDir;
use super::iconsize::IconSize;
use super::resample::{ensure_min_resolution, high_quality_resize};

/// The encoded outputs of one conversion, before they touch the disk.
pub struct RenderedIcons {
    /// Resolution the source was normalized to before deriving icons.
    pub working_size: IconSize,
    /// The multi-image icon directory, largest image first.
    pub ico: IconDir,
    /// `ico` encoded as an ICO file.
    pub ico_bytes: Vec<u8>,
    /// The standalone icon encoded as a PNG file.
    pub png_bytes: Vec<u8>,
}

/// Derives every icon from an already-decoded source image without writing
/// anything.
pub fn render_icons(source: Image, config: &IconConfig)
                    -> io::Result<RenderedIcons> {
    let source = ensure_min_resolution(source.into_rgba(),
                                       config.min_source_side)?;
    let working_size = IconSize::new(source.width(), source.height());

    let mut variants = Vec::with_capacity(config.sizes.len());
    for &size in &config.sizes {
        variants.push(high_quality_resize(&source, size)?);
    }
    // Largest first, so it becomes the primary image of the ICO file.
    variants.reverse();
    let ico = IconDir::from_images(&variants, &config.sizes)?;
    let ico_bytes = ico.to_bytes()?;

    let png = high_quality_resize(&source, config.png_size)?;
    let png_bytes = png.to_png_bytes()?;

    Ok(RenderedIcons {
        working_size,
        ico,
        ico_bytes,
        png_bytes,
    })
}

/// Converts the image at `source_path` into the icon files named by
/// `config`, reporting each written file on `progress`.  Everything is
/// decoded and encoded before the first file is written, so a bad source
/// leaves existing outputs untouched.  Parent directories are not created.
pub fn generate_icons<P, W>(source_path: P,
                            config: &IconConfig,
                            mut progress: W)
                            -> io::Result<RenderedIcons>
    where P: AsRef<Path>,
          W: Write
{
    let source = Image::open(source_path)?;
    let rendered = render_icons(source, config)?;

    for path in &config.ico_paths {
        write_output(path, &rendered.ico_bytes)?;
        writeln!(progress, "Generated: {}", path.display())?;
    }
    write_output(&config.png_path, &rendered.png_bytes)?;
    writeln!(progress, "Generated: {}", config.png_path.display())?;

    writeln!(progress)?;
    writeln!(progress, "Done! High-quality icons generated successfully.")?;
    writeln!(progress, "Sizes included: {}", size_list(&config.sizes))?;
    Ok(rendered)
}

/// Formats sizes as `['16x16', '24x24']`.
pub fn size_list(sizes: &[IconSize]) -> String {
    let quoted: Vec<String> = sizes.iter()
        .map(|size| format!("'{}'", size))
        .collect();
    format!("[{}]", quoted.join(", "))
}

fn write_output(path: &Path, bytes: &[u8]) -> io::Result<()> {
    fs::write(path, bytes).map_err(|err| {
        Error::new(err.kind(),
                   format!("failed to write {}: {}", path.display(), err))
    })?;
    log::debug!("wrote {} bytes to {}", bytes.len(), path.display());
    Ok(())
}
