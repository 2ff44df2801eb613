use std::fmt;
use std::str::FromStr;

/// Icons narrower than this are derived through a sharpened, supersampled
/// intermediate rather than a single resize.
pub const SUPERSAMPLE_BELOW_WIDTH: u32 = 64;

/// Scale factor of the supersampled intermediate.
pub const SUPERSAMPLE_FACTOR: u32 = 4;

/// Pixel dimensions of one icon image.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct IconSize {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl IconSize {
    /// Creates an icon size.
    pub const fn new(width: u32, height: u32) -> IconSize {
        IconSize { width, height }
    }

    /// Creates a square icon size.
    pub const fn square(side: u32) -> IconSize {
        IconSize::new(side, side)
    }

    /// Returns true if icons of this size should be resized through a
    /// sharpened intermediate.
    ///
    /// # Examples
    /// ```
    /// use appicon::IconSize;
    /// assert!(IconSize::square(48).needs_supersampling());
    /// assert!(!IconSize::square(64).needs_supersampling());
    /// ```
    pub fn needs_supersampling(self) -> bool {
        self.width < SUPERSAMPLE_BELOW_WIDTH
    }

    /// Returns the size of the supersampled intermediate for this size.
    ///
    /// # Examples
    /// ```
    /// use appicon::IconSize;
    /// assert_eq!(IconSize::square(16).supersampled(), IconSize::square(64));
    /// ```
    pub fn supersampled(self) -> IconSize {
        IconSize::new(self.width * SUPERSAMPLE_FACTOR,
                      self.height * SUPERSAMPLE_FACTOR)
    }

    /// Returns true if an ICO directory entry can describe this size.
    pub fn fits_ico(self) -> bool {
        (1..=256).contains(&self.width) && (1..=256).contains(&self.height)
    }
}

impl fmt::Display for IconSize {
    fn fmt(&self, out: &mut fmt::Formatter) -> fmt::Result {
        write!(out, "{}x{}", self.width, self.height)
    }
}

impl FromStr for IconSize {
    type Err = String;

    fn from_str(input: &str) -> Result<IconSize, String> {
        let (width, height) = input.split_once('x')
            .ok_or_else(|| format!("icon size must look like WxH (was {:?})",
                                   input))?;
        let parse = |text: &str| {
            text.parse::<u32>()
                .ok()
                .filter(|&n| n > 0)
                .ok_or_else(|| format!("invalid icon dimension {:?}", text))
        };
        Ok(IconSize::new(parse(width)?, parse(height)?))
    }
}
