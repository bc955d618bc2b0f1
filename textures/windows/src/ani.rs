//! Static cursor extraction from animated cursors.
//!
//! An `.ani` file is a RIFF `ACON` container whose frames are complete icon or
//! cursor resources. Rather than walking the chunk list, the whole buffer is
//! scanned for resource directory signatures and the first plausible directory
//! is copied out as a standalone `.cur` resource.

use byteorder::{
	ByteOrder,
	LE
};

use log::{
	debug,
	trace
};

use rgk_core::{
	rtag4,
	slice_ext::SliceExt
};

use crate::ico::{
	DirEntry,
	Header,
	ImageType,
	MAX_DIMENSION
};

pub const RIFF_MAGIC: u32 = rtag4!(b"RIFF");
pub const ACON_MAGIC: u32 = rtag4!(b"ACON");

/// Largest image count a directory may declare before it is considered noise
pub const MAX_IMAGES: u16 = 100;
/// Image sizes at or above this are ignored when estimating the resource size
pub const MAX_IMAGE_SIZE: u32 = 10 * 1024 * 1024; // 10 MiB
/// Minimum payload copied after the directory table
pub const MIN_PAYLOAD_SIZE: usize = 2048;

/// A possible start of a resource directory
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Candidate {
	pub offset: usize,
	pub kind: ImageType,
}

/// A cursor resource cut out of a larger buffer
#[derive(Clone, Debug, PartialEq)]
pub struct Extraction {
	/// Where the directory was found in the source buffer
	pub offset: usize,
	/// Type tag of the source directory before patching
	pub source_kind: ImageType,
	/// Header of the extracted resource, always cursor-typed
	pub header: Header,
	pub data: Vec<u8>,
}

/// Checks for a RIFF container holding an `ACON` form
pub fn is_ani(buf: &[u8]) -> bool {
	buf.window(0, 4).map(LE::read_u32) == Some(RIFF_MAGIC) &&
		buf.window(8, 4).map(LE::read_u32) == Some(ACON_MAGIC)
}

/// Returns every cursor and icon directory signature, in ascending offset order
pub fn find_candidates(buf: &[u8]) -> Vec<Candidate> {
	let cursor_sig = ImageType::Cursor.signature();
	let icon_sig = ImageType::Icon.signature();

	let mut candidates: Vec<Candidate> = buf.find_all(&cursor_sig)
		.map(|offset| Candidate { offset: offset, kind: ImageType::Cursor })
		.collect();
	candidates.extend(buf.find_all(&icon_sig)
		.map(|offset| Candidate { offset: offset, kind: ImageType::Icon }));

	candidates.sort_by_key(|c| c.offset);
	candidates
}

/// Checks whether the bytes from a candidate onwards look like a real directory,
/// returning its header and entries if so
fn validate(tail: &[u8], candidate: &Candidate) -> Option<(Header, Vec<DirEntry>)> {
	let mut window = tail;

	// short reads and out of range counts both land here
	let (header, entries) = match Header::read_directory(&mut window, MAX_IMAGES) {
		Ok(dir) => dir,
		Err(e) => {
			trace!("Rejected {:?} at {:#x}: {}", candidate.kind, candidate.offset, e);
			return None;
		},
	};

	let first = entries.first()?;
	if first.width() > MAX_DIMENSION || first.height() > MAX_DIMENSION {
		trace!("Rejected {:?} at {:#x}: {}x{} image", candidate.kind, candidate.offset,
			first.width(), first.height());
		return None;
	}

	Some((header, entries))
}

/// Estimates how many bytes from `offset` belong to the resource.
///
/// This is the directory table plus the largest single image (at least
/// [`MIN_PAYLOAD_SIZE`]), clamped to the end of the buffer. It can both
/// overshoot and undershoot the real resource.
pub fn estimate_size(buf: &[u8], offset: usize, header: &Header, entries: &[DirEntry]) -> usize {
	let max_img_size = entries.iter()
		.take(header.num_images as usize)
		.map(|e| e.size)
		.filter(|&size| size > 0 && size < MAX_IMAGE_SIZE)
		.max()
		.unwrap_or(0);

	let estimated = header.directory_size() + (max_img_size as usize).max(MIN_PAYLOAD_SIZE);
	estimated.min(buf.len().saturating_sub(offset))
}

/// Locates the first plausible icon or cursor directory in `buf` and copies it
/// out as a cursor resource
pub fn locate_cursor(buf: &[u8]) -> Option<Extraction> {
	for candidate in find_candidates(buf).iter() {
		let tail = match buf.tail(candidate.offset) {
			Some(tail) => tail,
			None => continue,
		};

		let (mut header, entries) = match validate(tail, candidate) {
			Some(dir) => dir,
			None => continue,
		};

		// clamped to tail.len(), so the copy is always in range
		let size = estimate_size(buf, candidate.offset, &header, &entries);
		let mut data = tail[..size].to_vec();

		if candidate.kind == ImageType::Icon {
			LE::write_u16(&mut data[2..4], ImageType::Cursor as u16);
		}
		header.kind = ImageType::Cursor;

		debug!("Found {:?} directory at {:#x}: {} image(s), {} bytes", candidate.kind,
			candidate.offset, header.num_images, data.len());

		return Some(Extraction {
			offset: candidate.offset,
			source_kind: candidate.kind,
			header: header,
			data: data,
		});
	}

	None
}

/// Extracts a standalone cursor resource from an animated cursor, if one is found
pub fn extract_cursor(buf: &[u8]) -> Option<Vec<u8>> {
	locate_cursor(buf).map(|e| e.data)
}
