//! Converts every animated cursor (`.ani`) in a directory into a static cursor
//! (`.cur`) holding the first embedded frame.
//!
//! ```bash
//! ani2cur ui/public/cursors
//! ani2cur -v cursors --out-dir static
//! ```

mod batch;

use clap::Parser;
use log::LevelFilter;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "ani2cur")]
#[command(about = "Extracts static cursors from animated cursors")]
#[command(version)]
struct Args {
	/// Directory holding the .ani files
	#[arg(default_value = "ui/public/cursors")]
	dir: PathBuf,

	/// Write the .cur files here instead of next to their sources
	#[arg(short, long)]
	out_dir: Option<PathBuf>,

	/// Increase logging verbosity (-v debug, -vv trace)
	#[arg(short, long, action = clap::ArgAction::Count)]
	verbose: u8,
}

fn main() -> anyhow::Result<()> {
	let args = Args::parse();

	let level = match args.verbose {
		0 => LevelFilter::Info,
		1 => LevelFilter::Debug,
		_ => LevelFilter::Trace,
	};

	env_logger::Builder::new()
		.filter_level(level)
		.parse_default_env()
		.format_timestamp(None)
		.init();

	batch::convert_dir(&args.dir, args.out_dir.as_deref())?;
	Ok(())
}
