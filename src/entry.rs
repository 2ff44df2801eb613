use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use std::io::{self, Cursor, Error, ErrorKind, Read, Write};

use super::bitmap::Image;
use super::iconsize::IconSize;

/// The length of an icon directory entry, in bytes:
pub const ICON_DIR_ENTRY_LENGTH: u32 = 16;

/// The first eight bytes of a PNG stream:
const PNG_SIGNATURE: &[u8; 8] = b"\x89PNG\r\n\x1a\n";

/// One image stored in an ICO file: the 16-byte directory record together
/// with its encoded payload.
pub struct IconDirEntry {
    size: IconSize,
    color_count: u8,
    planes: u16,
    bits_per_pixel: u16,
    data: Vec<u8>,
}

impl IconDirEntry {
    /// Creates an entry for a 32-bit image with the given payload.
    pub fn new(size: IconSize, data: Vec<u8>) -> IconDirEntry {
        IconDirEntry {
            size,
            color_count: 0,
            planes: 1,
            bits_per_pixel: 32,
            data,
        }
    }

    /// Encodes an image as a PNG-compressed 32-bit entry.  Returns an error
    /// if the image is larger than 256 pixels (or empty) in either
    /// dimension.
    pub fn encode_image(image: &Image) -> io::Result<IconDirEntry> {
        let size = IconSize::new(image.width(), image.height());
        if !size.fits_ico() {
            let msg = format!("ICO images must be 1 to 256 pixels wide and \
                               high (was {})",
                              size);
            return Err(Error::new(ErrorKind::InvalidInput, msg));
        }
        let data = image.to_rgba().to_png_bytes()?;
        Ok(IconDirEntry::new(size, data))
    }

    /// Decodes the entry's payload into an image.  Returns an error if the
    /// payload is not a PNG stream, or if its dimensions disagree with the
    /// directory record.
    pub fn decode_image(&self) -> io::Result<Image> {
        if !self.is_png() {
            let msg = "BMP-encoded icon entries are not supported";
            return Err(Error::new(ErrorKind::InvalidData, msg));
        }
        let image = Image::read_png(Cursor::new(&self.data))?;
        if image.width() != self.size.width ||
           image.height() != self.size.height {
            let msg = format!("decoded PNG has wrong dimensions ({}x{} \
                               instead of {})",
                              image.width(),
                              image.height(),
                              self.size);
            return Err(Error::new(ErrorKind::InvalidData, msg));
        }
        Ok(image)
    }

    /// Returns the pixel dimensions recorded in the directory.
    pub fn size(&self) -> IconSize {
        self.size
    }

    /// Returns the bit depth recorded in the directory.
    pub fn bits_per_pixel(&self) -> u16 {
        self.bits_per_pixel
    }

    /// Returns true if the payload is a PNG stream rather than a BMP.
    pub fn is_png(&self) -> bool {
        self.data.starts_with(PNG_SIGNATURE)
    }

    /// Returns the encoded payload.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Writes the 16-byte directory record, pointing at a payload stored
    /// `offset` bytes from the start of the file.
    pub fn write_record<W: Write>(&self, mut writer: W, offset: u32)
                                  -> io::Result<()> {
        writer.write_u8(encode_dimension(self.size.width))?;
        writer.write_u8(encode_dimension(self.size.height))?;
        writer.write_u8(self.color_count)?;
        writer.write_u8(0)?;
        writer.write_u16::<LittleEndian>(self.planes)?;
        writer.write_u16::<LittleEndian>(self.bits_per_pixel)?;
        writer.write_u32::<LittleEndian>(self.data.len() as u32)?;
        writer.write_u32::<LittleEndian>(offset)?;
        Ok(())
    }

    /// Reads a directory record, then fetches its payload out of `file`,
    /// which holds the complete ICO file.
    pub fn read_record<R: Read>(mut reader: R, file: &[u8])
                                -> io::Result<IconDirEntry> {
        let width = decode_dimension(reader.read_u8()?);
        let height = decode_dimension(reader.read_u8()?);
        let color_count = reader.read_u8()?;
        let _reserved = reader.read_u8()?;
        let planes = reader.read_u16::<LittleEndian>()?;
        let bits_per_pixel = reader.read_u16::<LittleEndian>()?;
        let length = reader.read_u32::<LittleEndian>()? as usize;
        let offset = reader.read_u32::<LittleEndian>()? as usize;
        let data = offset.checked_add(length)
            .and_then(|end| file.get(offset..end))
            .ok_or_else(|| {
                let msg = format!("icon payload ({} bytes at offset {}) \
                                   extends past end of file",
                                  length,
                                  offset);
                Error::new(ErrorKind::InvalidData, msg)
            })?;
        Ok(IconDirEntry {
            size: IconSize::new(width, height),
            color_count,
            planes,
            bits_per_pixel,
            data: data.to_vec(),
        })
    }
}

/// ICO records store 256 as 0.
fn encode_dimension(pixels: u32) -> u8 {
    if pixels >= 256 { 0 } else { pixels as u8 }
}

fn decode_dimension(byte: u8) -> u32 {
    if byte == 0 { 256 } else { u32::from(byte) }
}
