use std::path::{Path, PathBuf};

use super::iconsize::IconSize;

/// Sizes embedded in the generated ICO file, smallest first.
pub const ICO_SIZES: [IconSize; 7] = [IconSize::square(16),
                                      IconSize::square(24),
                                      IconSize::square(32),
                                      IconSize::square(48),
                                      IconSize::square(64),
                                      IconSize::square(128),
                                      IconSize::square(256)];

/// Where the Windows runner picks up its icon resource.
pub const WINDOWS_ICO_PATH: &str = "windows/runner/resources/app_icon.ico";

/// Copy of the ICO file used at run time (e.g. by the system tray).
pub const ASSETS_ICO_PATH: &str = "assets/app_icon.ico";

/// Standalone PNG icon.
pub const ASSETS_PNG_PATH: &str = "assets/app_icon.png";

/// Sources smaller than this in either dimension are upscaled to a square of
/// this side before any icon is derived.
pub const MIN_SOURCE_SIDE: u32 = 512;

/// What to generate and where to put it.
#[derive(Clone, Debug, PartialEq)]
pub struct IconConfig {
    /// Sizes stored in the ICO file, smallest first.
    pub sizes: Vec<IconSize>,
    /// Every path the ICO file is written to.
    pub ico_paths: Vec<PathBuf>,
    /// Path of the standalone PNG icon.
    pub png_path: PathBuf,
    /// Size of the standalone PNG icon.
    pub png_size: IconSize,
    /// Minimum working resolution of the source image.
    pub min_source_side: u32,
}

impl IconConfig {
    /// Returns a copy of this configuration with every relative output path
    /// resolved against `root` instead of the working directory.
    pub fn rooted_at<P: AsRef<Path>>(&self, root: P) -> IconConfig {
        let root = root.as_ref();
        IconConfig {
            ico_paths: self.ico_paths.iter().map(|p| root.join(p)).collect(),
            png_path: root.join(&self.png_path),
            ..self.clone()
        }
    }

    /// Returns every output path, in the order files are written.
    pub fn output_paths(&self) -> Vec<&Path> {
        self.ico_paths
            .iter()
            .map(PathBuf::as_path)
            .chain(Some(self.png_path.as_path()))
            .collect()
    }
}

impl Default for IconConfig {
    fn default() -> IconConfig {
        IconConfig {
            sizes: ICO_SIZES.to_vec(),
            ico_paths: vec![PathBuf::from(WINDOWS_ICO_PATH),
                            PathBuf::from(ASSETS_ICO_PATH)],
            png_path: PathBuf::from(ASSETS_PNG_PATH),
            png_size: IconSize::square(256),
            min_source_side: MIN_SOURCE_SIDE,
        }
    }
}
