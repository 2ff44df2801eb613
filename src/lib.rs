//! Library for turning one source image into a Windows application icon set:
//! a multi-resolution ICO file and a standalone PNG.
//!
//! See https://en.wikipedia.org/wiki/ICO_(file_format) for more information
//! about the ICO file format.
//!
//! # Generating icons
//!
//! ```no_run
//! use appicon::{generate_icons, IconConfig};
//!
//! let config = IconConfig::default();
//! generate_icons("icon.png", &config, std::io::stdout())
//!     .expect("failed to generate icons");
//! ```
//!
//! # Reading an ICO file
//!
//! ```no_run
//! use appicon::{IconDir, IconSize};
//! use std::fs::File;
//! use std::io::BufReader;
//!
//! let file = BufReader::new(File::open("assets/app_icon.ico").unwrap());
//! let dir = IconDir::read(file).unwrap();
//! let image = dir.get_image(IconSize::square(32)).unwrap();
//! assert_eq!(image.width(), 32);
//! ```

#![warn(missing_docs)]

mod bitmap;
pub use self::bitmap::{Image, PixelFormat};

mod decode;

mod pngio;

mod iconsize;
pub use self::iconsize::{IconSize, SUPERSAMPLE_BELOW_WIDTH,
                         SUPERSAMPLE_FACTOR};

mod entry;
pub use self::entry::IconDirEntry;

mod icondir;
pub use self::icondir::IconDir;

pub mod resample;

mod config;
pub use self::config::{ASSETS_ICO_PATH, ASSETS_PNG_PATH, ICO_SIZES,
                       IconConfig, MIN_SOURCE_SIDE, WINDOWS_ICO_PATH};

mod generate;
pub use self::generate::{RenderedIcons, generate_icons, render_icons,
                         size_list};
