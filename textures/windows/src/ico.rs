use byteorder::{
	LE,
	ReadBytesExt,
	WriteBytesExt
};

use std::io;
use thiserror::Error;

pub const HEADER_SIZE: usize = 6;
pub const DIR_ENTRY_SIZE: usize = 16;
pub const MAX_DIMENSION: u16 = 256;

#[derive(Clone, Copy, Debug, PartialEq)]
#[repr(u16)]
pub enum ImageType {
	Icon = 1,
	Cursor,
	Unknown = 65535,
}

impl ImageType {
	/// Byte signature of a directory header of this type (reserved word included)
	pub const fn signature(self) -> [u8; 4] {
		let [lo, hi] = (self as u16).to_le_bytes();
		[0, 0, lo, hi]
	}

	#[cfg(feature = "import")]
	fn read<R>(buf: &mut R) -> io::Result<ImageType>
	where
		R: ReadBytesExt,
	{
		match buf.read_u16::<LE>()? {
			1 => Ok(ImageType::Icon),
			2 => Ok(ImageType::Cursor),
			_ => Ok(ImageType::Unknown),
		}
	}

	#[cfg(feature = "export")]
	fn write<W>(self, buf: &mut W) -> io::Result<()>
	where
		W: WriteBytesExt,
	{
		buf.write_u16::<LE>(self as u16)
	}
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Header {
	reserved: u16,
	pub kind: ImageType,
	pub num_images: u16,
}

impl Header {
	pub fn new(kind: ImageType, num_images: u16) -> Header {
		Header {
			reserved: 0,
			kind: kind,
			num_images: num_images,
		}
	}

	/// Size of the header plus its directory table
	pub fn directory_size(&self) -> usize {
		HEADER_SIZE + (self.num_images as usize * DIR_ENTRY_SIZE)
	}

	#[cfg(feature = "import")]
	pub fn read<R>(buf: &mut R) -> io::Result<Header>
	where
		R: ReadBytesExt,
	{
		Ok(Header {
			reserved: buf.read_u16::<LE>()?,
			kind: ImageType::read(buf)?,
			num_images: buf.read_u16::<LE>()?,
		})
	}

	/// Reads the header and every directory entry, rejecting empty or oversized tables
	#[cfg(feature = "import")]
	pub fn read_directory<R>(buf: &mut R, max_images: u16) -> Result<(Header, Vec<DirEntry>), IcoImportError>
	where
		R: ReadBytesExt,
	{
		let header = Header::read(buf)?;
		if header.num_images == 0 || header.num_images > max_images {
			return Err(IcoImportError::NumImages(header.num_images));
		}

		let mut entries = Vec::with_capacity(header.num_images as usize);
		for _ in 0..header.num_images {
			entries.push(DirEntry::read(buf)?);
		}

		Ok((header, entries))
	}

	#[cfg(feature = "export")]
	pub fn write<W>(&self, buf: &mut W) -> io::Result<()>
	where
		W: WriteBytesExt,
	{
		buf.write_u16::<LE>(self.reserved)?;
		self.kind.write(buf)?;
		buf.write_u16::<LE>(self.num_images)
	}
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DirEntry {
	width: u8, // 0 means 256
	height: u8, // 0 means 256
	pub num_colors: u8,
	reserved: u8,
	pub planes: u16, // hotspot X for cursors
	pub bpp: u16, // hotspot Y for cursors
	pub size: u32,
	pub offset: u32,
}

impl DirEntry {
	pub fn new(width: u16, height: u16, size: u32, offset: u32) -> DirEntry {
		DirEntry {
			width: width as u8,
			height: height as u8,
			num_colors: 0,
			reserved: 0,
			planes: 0,
			bpp: 0,
			size: size,
			offset: offset,
		}
	}

	pub fn width(&self) -> u16 {
		if self.width == 0 { MAX_DIMENSION } else { self.width as u16 }
	}

	pub fn height(&self) -> u16 {
		if self.height == 0 { MAX_DIMENSION } else { self.height as u16 }
	}

	#[cfg(feature = "import")]
	pub fn read<R>(buf: &mut R) -> io::Result<DirEntry>
	where
		R: ReadBytesExt,
	{
		Ok(DirEntry {
			width: buf.read_u8()?,
			height: buf.read_u8()?,
			num_colors: buf.read_u8()?,
			reserved: buf.read_u8()?,
			planes: buf.read_u16::<LE>()?,
			bpp: buf.read_u16::<LE>()?,
			size: buf.read_u32::<LE>()?,
			offset: buf.read_u32::<LE>()?,
		})
	}

	#[cfg(feature = "export")]
	pub fn write<W>(&self, buf: &mut W) -> io::Result<()>
	where
		W: WriteBytesExt,
	{
		buf.write_u8(self.width)?;
		buf.write_u8(self.height)?;
		buf.write_u8(self.num_colors)?;
		buf.write_u8(self.reserved)?;
		buf.write_u16::<LE>(self.planes)?;
		buf.write_u16::<LE>(self.bpp)?;
		buf.write_u32::<LE>(self.size)?;
		buf.write_u32::<LE>(self.offset)
	}
}

#[cfg(feature = "import")]
#[derive(Debug, Error)]
pub enum IcoImportError {
	#[error("I/O error")]
	IO {
		#[from]
		source: io::Error,
	},
	#[error("Invalid number of images: {0}")]
	NumImages(u16),
}
