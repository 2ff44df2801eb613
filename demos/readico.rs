//! Lists the images stored in an ICO file:
//!
//! ```shell
//! cargo run --example readico <path/to/file.ico>
//! ```
//!
//! To extract one of them as a PNG, also pass its size:
//!
//! ```shell
//! cargo run --example readico <path/to/file.ico> 32x32
//! # PNG will be saved to path/to/file.32x32.png
//! ```

extern crate appicon;

use appicon::{IconDir, IconSize};
use std::env;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;
use std::str::FromStr;

fn main() {
    let num_args = env::args().count();
    if num_args < 2 || num_args > 3 {
        println!("Usage: readico <path> [<WxH>]");
        return;
    }
    let path = env::args().nth(1).unwrap();
    let path = Path::new(&path);
    let file = File::open(path).expect("failed to open file");
    let buffered = BufReader::new(file);
    let dir = IconDir::read(buffered).expect("failed to read ICO file");
    if num_args == 3 {
        let size = IconSize::from_str(&env::args().nth(2).unwrap()).unwrap();
        let image = dir.get_image(size).expect("failed to decode image");
        let png_path = path.with_extension(format!("{}.png", size));
        let png_file = BufWriter::new(File::create(png_path)
            .expect("failed to create PNG file"));
        image.write_png(png_file).expect("failed to write PNG file");
        return;
    }
    println!("ICO file contains {} image(s).", dir.entries().len());
    for (index, entry) in dir.entries().iter().enumerate() {
        println!("Image {}: {} {}-bit {} ({} byte payload)",
                 index,
                 entry.size(),
                 entry.bits_per_pixel(),
                 if entry.is_png() { "PNG" } else { "BMP" },
                 entry.data().len());
    }
}
