extern crate appicon;
extern crate image;
extern crate png;
extern crate tempfile;

use appicon::{generate_icons, resample, IconConfig, IconDir, IconSize, Image,
              PixelFormat, ICO_SIZES};
use std::fs::{self, File};
use std::io::{self, BufReader, Cursor};
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

#[test]
fn generates_all_outputs_from_small_rgb_source() {
    let project = project_tree();
    let source = write_source(project.path(), "small.png", PixelFormat::RGB,
                              100, 80);
    let config = IconConfig::default().rooted_at(project.path());
    let mut progress = Vec::new();
    let rendered = generate_icons(&source, &config, &mut progress).unwrap();
    assert_eq!(rendered.working_size, IconSize::square(512));

    let windows_ico = fs::read(&config.ico_paths[0]).unwrap();
    let assets_ico = fs::read(&config.ico_paths[1]).unwrap();
    assert!(!windows_ico.is_empty());
    assert!(windows_ico == assets_ico);
    assert_ico_contents(&windows_ico);

    let png = load_png(&config.png_path).unwrap();
    assert_eq!((png.width(), png.height()), (256, 256));
    assert_eq!(png.pixel_format(), PixelFormat::RGBA);

    let progress = String::from_utf8(progress).unwrap();
    let lines: Vec<&str> = progress.lines().collect();
    assert_eq!(lines.len(), 6);
    assert!(lines[0].starts_with("Generated: "));
    assert!(lines[0].ends_with("app_icon.ico"));
    assert!(lines[2].ends_with("app_icon.png"));
    assert_eq!(lines[3], "");
    assert_eq!(lines[4], "Done! High-quality icons generated successfully.");
    assert_eq!(lines[5],
               "Sizes included: ['16x16', '24x24', '32x32', '48x48', \
                '64x64', '128x128', '256x256']");
}

#[test]
fn generates_from_large_gray_alpha_source() {
    let project = project_tree();
    let source = write_source(project.path(), "large.png",
                              PixelFormat::GrayAlpha, 640, 600);
    let config = IconConfig::default().rooted_at(project.path());
    let rendered = generate_icons(&source, &config, io::sink()).unwrap();
    assert_eq!(rendered.working_size, IconSize::new(640, 600));
    assert_ico_contents(&fs::read(&config.ico_paths[1]).unwrap());
    let png = load_png(&config.png_path).unwrap();
    assert_eq!(png.pixel_format(), PixelFormat::RGBA);
}

#[test]
fn generates_from_paletted_png_source() {
    let project = project_tree();
    let source = project.path().join("palette.png");
    let (width, height) = (64, 48);
    let mut encoder = png::Encoder::new(File::create(&source).unwrap(),
                                        width,
                                        height);
    encoder.set_color(png::ColorType::Indexed);
    encoder.set_depth(png::BitDepth::Eight);
    encoder.set_palette(vec![255, 0, 0, 0, 0, 255]);
    encoder.set_trns(vec![255, 0]);
    let mut writer = encoder.write_header().unwrap();
    let indices: Vec<u8> = (0..width * height)
        .map(|i| if (i % width) < width / 2 { 0 } else { 1 })
        .collect();
    writer.write_image_data(&indices).unwrap();
    writer.finish().unwrap();

    let config = IconConfig::default().rooted_at(project.path());
    let rendered = generate_icons(&source, &config, io::sink()).unwrap();
    assert_eq!(rendered.working_size, IconSize::square(512));
    assert_ico_contents(&fs::read(&config.ico_paths[0]).unwrap());
    let png = load_png(&config.png_path).unwrap();
    assert_eq!((png.width(), png.height()), (256, 256));
    assert_eq!(png.pixel_format(), PixelFormat::RGBA);
    // Left half is opaque red, right half fully transparent.
    let left = &png.data()[(128 * 256 + 10) * 4..(128 * 256 + 11) * 4];
    let right = &png.data()[(128 * 256 + 245) * 4..(128 * 256 + 246) * 4];
    assert_eq!(left, &[255, 0, 0, 255]);
    assert_eq!(right[3], 0);
}

#[test]
fn generates_from_jpeg_source() {
    let project = project_tree();
    let source = project.path().join("photo.jpg");
    let photo = image::RgbImage::from_fn(300, 200, |x, y| {
        image::Rgb([(x % 256) as u8, (y % 256) as u8, 128])
    });
    photo.save_with_format(&source, image::ImageFormat::Jpeg).unwrap();

    let config = IconConfig::default().rooted_at(project.path());
    let rendered = generate_icons(&source, &config, io::sink()).unwrap();
    assert_eq!(rendered.working_size, IconSize::square(512));
    let windows_ico = fs::read(&config.ico_paths[0]).unwrap();
    assert!(windows_ico == fs::read(&config.ico_paths[1]).unwrap());
    assert_ico_contents(&windows_ico);
    let png = load_png(&config.png_path).unwrap();
    assert_eq!(png.pixel_format(), PixelFormat::RGBA);
    assert!(png.data().chunks_exact(4).all(|pixel| pixel[3] == 255));
}

#[test]
fn missing_source_writes_nothing() {
    let project = project_tree();
    let config = IconConfig::default().rooted_at(project.path());
    fs::write(&config.png_path, b"previous").unwrap();
    let result = generate_icons(project.path().join("missing.png"),
                                &config,
                                io::sink());
    assert_eq!(result.err().map(|e| e.kind()), Some(io::ErrorKind::NotFound));
    assert!(!config.ico_paths[0].exists());
    assert!(!config.ico_paths[1].exists());
    assert_eq!(fs::read(&config.png_path).unwrap(), b"previous");
}

#[test]
fn undecodable_source_writes_nothing() {
    let project = project_tree();
    let source = project.path().join("broken.png");
    fs::write(&source, b"this is not an image").unwrap();
    let config = IconConfig::default().rooted_at(project.path());
    let result = generate_icons(&source, &config, io::sink());
    assert_eq!(result.err().map(|e| e.kind()),
               Some(io::ErrorKind::InvalidData));
    for path in config.output_paths() {
        assert!(!path.exists(), "{} was written", path.display());
    }
}

#[test]
fn missing_output_directory_is_an_error() {
    let project = TempDir::new().unwrap();
    let source = write_source(project.path(), "icon.png", PixelFormat::RGBA,
                              32, 32);
    let config = IconConfig::default().rooted_at(project.path());
    let result = generate_icons(&source, &config, io::sink());
    assert_eq!(result.err().map(|e| e.kind()), Some(io::ErrorKind::NotFound));
}

#[test]
fn small_icons_are_sharpened_before_downscale() {
    // Vertical stripes 64 pixels wide; at 16x16 each stripe is 2 pixels.
    let mut data = Vec::new();
    for _ in 0..512 {
        for x in 0..512u32 {
            let v = if (x / 64) % 2 == 0 { 230 } else { 25 };
            data.extend_from_slice(&[v, v, v, 255]);
        }
    }
    let source = Image::from_data(PixelFormat::RGBA, 512, 512, data).unwrap();
    let size = IconSize::square(16);
    let sharp = resample::high_quality_resize(&source, size).unwrap();
    let unsharpened = resample::resize_lanczos(
            &resample::resize_lanczos(&source, size.supersampled()).unwrap(),
            size)
        .unwrap();
    assert!(sharp.data() != unsharpened.data());
    assert!(interior_spread(&sharp) > interior_spread(&unsharpened));

    // Sizes from 64 up are a single resize.
    let size = IconSize::square(64);
    let direct = resample::resize_lanczos(&source, size).unwrap();
    assert!(resample::high_quality_resize(&source, size).unwrap().data() ==
            direct.data());
}

#[test]
fn cli_without_arguments_prints_usage() {
    let project = project_tree();
    let output = Command::new(env!("CARGO_BIN_EXE_generate_icons"))
        .current_dir(project.path())
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(stdout,
               "Usage: generate_icons <source_image>\n\
                Example: generate_icons icon.png\n");
    for path in IconConfig::default().output_paths() {
        assert!(!project.path().join(path).exists());
    }
}

#[test]
fn cli_writes_relative_outputs() {
    let project = project_tree();
    write_source(project.path(), "icon.png", PixelFormat::RGB, 512, 512);
    let output = Command::new(env!("CARGO_BIN_EXE_generate_icons"))
        .arg("icon.png")
        .current_dir(project.path())
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.starts_with("Generated: \
                                windows/runner/resources/app_icon.ico\n\
                                Generated: assets/app_icon.ico\n\
                                Generated: assets/app_icon.png\n"));
    for path in IconConfig::default().output_paths() {
        let len = fs::metadata(project.path().join(path)).unwrap().len();
        assert!(len > 0);
    }
}

#[test]
fn cli_with_missing_file_fails() {
    let project = project_tree();
    let status = Command::new(env!("CARGO_BIN_EXE_generate_icons"))
        .arg("nope.png")
        .current_dir(project.path())
        .status()
        .unwrap();
    assert!(!status.success());
    assert!(!project.path().join("assets/app_icon.ico").exists());
}

fn project_tree() -> TempDir {
    let project = TempDir::new().unwrap();
    fs::create_dir_all(project.path().join("windows/runner/resources"))
        .unwrap();
    fs::create_dir_all(project.path().join("assets")).unwrap();
    project
}

fn write_source(dir: &Path, name: &str, format: PixelFormat, width: u32,
                height: u32)
                -> std::path::PathBuf {
    let bytes = format.bytes_per_pixel() as usize;
    let mut data = Vec::new();
    for y in 0..height {
        for x in 0..width {
            let value = ((x * 7 + y * 3) % 256) as u8;
            data.extend(std::iter::repeat(value).take(bytes));
        }
    }
    let image = Image::from_data(format, width, height, data).unwrap();
    let path = dir.join(name);
    image.write_png(File::create(&path).unwrap()).unwrap();
    path
}

fn assert_ico_contents(bytes: &[u8]) {
    let dir = IconDir::read(Cursor::new(bytes)).unwrap();
    let mut expected = ICO_SIZES.to_vec();
    expected.reverse();
    assert_eq!(dir.sizes(), expected);
    for &size in &ICO_SIZES {
        let image = dir.get_image(size).unwrap();
        assert_eq!((image.width(), image.height()), (size.width, size.height));
        assert_eq!(image.pixel_format(), PixelFormat::RGBA);
    }
}

fn load_png(path: &Path) -> io::Result<Image> {
    let file = BufReader::new(File::open(path)?);
    Image::read_png(file)
}

/// Red-channel contrast along the middle row, leaving out the two columns
/// nearest each border.
fn interior_spread(image: &Image) -> u32 {
    let width = image.width() as usize;
    let row = image.height() as usize / 2;
    let reds = (2..width - 2)
        .map(|x| u32::from(image.data()[(row * width + x) * 4]));
    let (min, max) = reds.fold((255, 0), |(lo, hi), v| (lo.min(v), hi.max(v)));
    max - min
}
