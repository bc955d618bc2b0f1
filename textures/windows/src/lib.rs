#[cfg(feature = "import")]
pub mod ani;
pub mod ico;

#[cfg(feature = "import")]
use std::{
	fs,
	io,
	path::Path
};

#[cfg(feature = "import")]
use thiserror::Error;

#[cfg(feature = "import")]
use ani::Extraction;

/// Reads an animated cursor and writes its first embedded image directory out as a
/// static cursor. The output file is only created when a directory was found.
#[cfg(feature = "import")]
pub fn convert_ani_to_cur<P, Q>(input: P, output: Q) -> Result<Extraction, ConvertError>
where
	P: AsRef<Path>,
	Q: AsRef<Path>,
{
	let input = input.as_ref();
	let data = fs::read(input)?;

	if !ani::is_ani(&data) {
		log::warn!("{}: no RIFF/ACON header, scanning anyway", input.display());
	}

	let found = ani::locate_cursor(&data).ok_or(ConvertError::NoCursor)?;
	fs::write(output, &found.data)?;

	Ok(found)
}

#[cfg(feature = "import")]
#[derive(Debug, Error)]
pub enum ConvertError {
	#[error("I/O error")]
	IO {
		#[from]
		source: io::Error,
	},
	#[error("No icon or cursor directory found")]
	NoCursor,
}
