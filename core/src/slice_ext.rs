use byteorder::{
	ByteOrder,
	LE
};

/// Iterator over every offset at which a needle occurs in a haystack.
///
/// The search resumes one byte past each match, so overlapping occurrences
/// are all reported.
#[derive(Clone, Debug)]
pub struct FindAll<'a, 'b> {
	haystack: &'a [u8],
	needle: &'b [u8],
	pos: usize,
}

impl<'a, 'b> Iterator for FindAll<'a, 'b> {
	type Item = usize;

	fn next(&mut self) -> Option<usize> {
		if self.needle.is_empty() {
			return None;
		}

		let rest = self.haystack.get(self.pos..)?;
		let found = rest.windows(self.needle.len()).position(|w| w == self.needle)?;
		let offset = self.pos + found;
		self.pos = offset + 1;

		Some(offset)
	}
}

pub trait SliceExt {
	/// Returns `len` bytes starting at `offset`, or `None` if the slice is too short
	fn window(&self, offset: usize, len: usize) -> Option<&[u8]>;

	/// Returns everything from `offset` to the end, or `None` if `offset` is out of range
	fn tail(&self, offset: usize) -> Option<&[u8]>;

	/// Reads a little endian u16 at `offset`
	#[inline]
	fn u16_le_at(&self, offset: usize) -> Option<u16> {
		self.window(offset, 2).map(LE::read_u16)
	}

	/// Reads a little endian u32 at `offset`
	#[inline]
	fn u32_le_at(&self, offset: usize) -> Option<u32> {
		self.window(offset, 4).map(LE::read_u32)
	}

	/// Returns an iterator over every (possibly overlapping) offset of `needle`
	fn find_all<'a, 'b>(&'a self, needle: &'b [u8]) -> FindAll<'a, 'b>;
}

impl SliceExt for [u8] {
	#[inline]
	fn window(&self, offset: usize, len: usize) -> Option<&[u8]> {
		let end = offset.checked_add(len)?;
		self.get(offset..end)
	}

	#[inline]
	fn tail(&self, offset: usize) -> Option<&[u8]> {
		self.get(offset..)
	}

	fn find_all<'a, 'b>(&'a self, needle: &'b [u8]) -> FindAll<'a, 'b> {
		FindAll {
			haystack: self,
			needle: needle,
			pos: 0,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_find_all_overlapping() {
		let data = b"\x00\x00\x00\x00\x02\x00";
		let found: Vec<usize> = data.find_all(b"\x00\x00").collect();
		assert_eq!(vec![0, 1, 2], found);
	}

	#[test]
	fn test_find_all_none() {
		let data = b"RIFF....ACON";
		assert_eq!(0, data.find_all(b"\x00\x00\x02\x00").count());
		assert_eq!(0, data.find_all(b"").count());
		assert_eq!(0, b"".find_all(b"\x00").count());
	}

	#[test]
	fn test_find_all_at_end() {
		let data = b"xyz\x00\x00\x01\x00";
		let found: Vec<usize> = data.find_all(b"\x00\x00\x01\x00").collect();
		assert_eq!(vec![3], found);
	}

	#[test]
	fn test_bounded_reads() {
		let data = &b"\x01\x02\x03\x04\x05"[..];
		assert_eq!(Some(0x0201), data.u16_le_at(0));
		assert_eq!(Some(0x05040302), data.u32_le_at(1));
		assert_eq!(None, data.u32_le_at(2));
		assert_eq!(None, data.u16_le_at(usize::MAX));
		assert_eq!(None, data.window(4, 2));
		assert_eq!(Some(&b""[..]), data.tail(5));
		assert_eq!(None, data.tail(6));
	}
}
