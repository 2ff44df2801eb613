//! Generates the application icons from a source image.
//!
//! ```shell
//! cargo run -- <path/to/source.png>
//! ```
//!
//! Run from the project root: the icons are written to
//! `windows/runner/resources/app_icon.ico`, `assets/app_icon.ico` and
//! `assets/app_icon.png`, whose directories must already exist.  Set
//! `RUST_LOG=debug` to trace each resize stage.

use appicon::{generate_icons, IconConfig};
use std::env;
use std::io;
use std::process;

fn main() -> io::Result<()> {
    env_logger::init();
    let source_path = match env::args_os().nth(1) {
        Some(path) => path,
        None => {
            println!("Usage: generate_icons <source_image>");
            println!("Example: generate_icons icon.png");
            process::exit(1);
        }
    };
    generate_icons(source_path, &IconConfig::default(), io::stdout())?;
    Ok(())
}
