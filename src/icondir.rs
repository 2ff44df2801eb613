use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use std::io::{self, Error, ErrorKind, Read, Write};

use super::bitmap::Image;
use super::entry::{ICON_DIR_ENTRY_LENGTH, IconDirEntry};
use super::iconsize::IconSize;

/// The length of an ICO file header, in bytes:
const ICON_DIR_HEADER_LENGTH: u32 = 6;

/// Resource type stored in the header of an icon (as opposed to cursor)
/// file:
const RESOURCE_TYPE_ICON: u16 = 1;

/// A set of images stored in a single ICO file.
pub struct IconDir {
    entries: Vec<IconDirEntry>,
}

impl IconDir {
    /// Creates a new, empty icon directory.
    pub fn new() -> IconDir {
        IconDir { entries: Vec::new() }
    }

    /// Builds a directory holding one entry per requested size.  Entries
    /// follow the order of `images`, so passing the largest image first makes
    /// it the primary image of the file.  Images whose size was not requested
    /// are skipped.  Returns an error if a requested size has no image of
    /// exactly that size, or cannot be stored in an ICO file.
    pub fn from_images(images: &[Image], sizes: &[IconSize])
                       -> io::Result<IconDir> {
        for &size in sizes {
            if !size.fits_ico() {
                let msg = format!("ICO images must be 1 to 256 pixels wide \
                                   and high (was {})",
                                  size);
                return Err(Error::new(ErrorKind::InvalidInput, msg));
            }
            if !images.iter().any(|image| image_size(image) == size) {
                let msg = format!("no image was provided for icon size {}",
                                  size);
                return Err(Error::new(ErrorKind::InvalidInput, msg));
            }
        }
        let mut dir = IconDir::new();
        for image in images {
            let size = image_size(image);
            if sizes.contains(&size) && !dir.has_size(size) {
                dir.add_image(image)?;
            }
        }
        Ok(dir)
    }

    /// Returns true if the directory contains no images.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the entries of the directory, in file order.
    pub fn entries(&self) -> &[IconDirEntry] {
        &self.entries
    }

    /// Returns the sizes of the stored images, in file order.
    pub fn sizes(&self) -> Vec<IconSize> {
        self.entries.iter().map(IconDirEntry::size).collect()
    }

    /// Determines whether the directory contains an image of the given size.
    pub fn has_size(&self, size: IconSize) -> bool {
        self.entries.iter().any(|entry| entry.size() == size)
    }

    /// Encodes the image and appends it to the directory.
    pub fn add_image(&mut self, image: &Image) -> io::Result<()> {
        self.add_entry(IconDirEntry::encode_image(image)?)
    }

    /// Appends an already-encoded entry to the directory.  Returns an error
    /// if the directory is full.
    pub fn add_entry(&mut self, entry: IconDirEntry) -> io::Result<()> {
        if self.entries.len() >= usize::from(u16::MAX) {
            return Err(Error::new(ErrorKind::InvalidInput,
                                  "too many images for one ICO file"));
        }
        self.entries.push(entry);
        Ok(())
    }

    /// Decodes the stored image of the given size.  Returns an error if
    /// there is no such image, or if its payload is malformed.
    pub fn get_image(&self, size: IconSize) -> io::Result<Image> {
        let entry = self.entries
            .iter()
            .find(|entry| entry.size() == size)
            .ok_or_else(|| {
                let msg = format!("the icon directory does not contain a \
                                   {} image",
                                  size);
                Error::new(ErrorKind::NotFound, msg)
            })?;
        entry.decode_image()
    }

    /// Reads an icon directory from an ICO file.
    pub fn read<R: Read>(mut reader: R) -> io::Result<IconDir> {
        let mut file = Vec::new();
        reader.read_to_end(&mut file)?;
        let mut header = &file[..];
        let reserved = header.read_u16::<LittleEndian>()?;
        let resource_type = header.read_u16::<LittleEndian>()?;
        if reserved != 0 || resource_type != RESOURCE_TYPE_ICON {
            let msg = "not an ico file (wrong header)";
            return Err(Error::new(ErrorKind::InvalidData, msg));
        }
        let count = header.read_u16::<LittleEndian>()?;
        let mut dir = IconDir::new();
        for _ in 0..count {
            let entry = IconDirEntry::read_record(header.by_ref(), &file)?;
            dir.entries.push(entry);
        }
        Ok(dir)
    }

    /// Writes the icon directory to an ICO file.  Payloads are stored
    /// back-to-back after the directory, in entry order.
    pub fn write<W: Write>(&self, mut writer: W) -> io::Result<()> {
        writer.write_u16::<LittleEndian>(0)?;
        writer.write_u16::<LittleEndian>(RESOURCE_TYPE_ICON)?;
        writer.write_u16::<LittleEndian>(self.entries.len() as u16)?;
        let mut offset = ICON_DIR_HEADER_LENGTH +
                         ICON_DIR_ENTRY_LENGTH * self.entries.len() as u32;
        for entry in &self.entries {
            entry.write_record(writer.by_ref(), offset)?;
            offset += entry.data().len() as u32;
        }
        for entry in &self.entries {
            writer.write_all(entry.data())?;
        }
        Ok(())
    }

    /// Encodes the directory as an in-memory ICO file.
    pub fn to_bytes(&self) -> io::Result<Vec<u8>> {
        let mut output = Vec::with_capacity(self.total_length() as usize);
        self.write(&mut output)?;
        Ok(output)
    }

    /// Returns the encoded length of the file, in bytes, including the
    /// length of the header.
    pub fn total_length(&self) -> u32 {
        let mut length = ICON_DIR_HEADER_LENGTH;
        for entry in &self.entries {
            length += ICON_DIR_ENTRY_LENGTH + entry.data().len() as u32;
        }
        length
    }
}

impl Default for IconDir {
    fn default() -> IconDir {
        IconDir::new()
    }
}

fn image_size(image: &Image) -> IconSize {
    IconSize::new(image.width(), image.height())
}
