use anyhow::{
	Context,
	Result
};

use log::{
	error,
	info,
	warn
};

use std::{
	collections::HashSet,
	fs,
	path::{
		Path,
		PathBuf
	}
};

use rgk_textures_windows::convert_ani_to_cur;

pub const SOURCE_EXT: &str = "ani";
pub const TARGET_EXT: &str = "cur";

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Summary {
	pub converted: usize,
	pub total: usize,
}

/// Lists the animated cursors directly inside `dir`, sorted by name
pub fn find_sources(dir: &Path) -> Result<Vec<PathBuf>> {
	let mut sources = vec![];

	for entry in fs::read_dir(dir).with_context(|| format!("Directory not found: {}", dir.display()))? {
		let path = entry?.path();

		let is_source = path.extension()
			.and_then(|e| e.to_str())
			.map_or(false, |e| e.eq_ignore_ascii_case(SOURCE_EXT));

		if is_source && path.is_file() {
			sources.push(path);
		}
	}

	sources.sort();
	Ok(sources)
}

/// Derives the output path for a source, optionally moving it into `out_dir`
pub fn target_path(source: &Path, out_dir: Option<&Path>) -> PathBuf {
	let target = source.with_extension(TARGET_EXT);

	match (out_dir, target.file_name()) {
		(Some(dir), Some(name)) => dir.join(name),
		_ => target,
	}
}

/// Returns the sources whose output path was already claimed by an earlier source,
/// e.g. `a.ANI` and `a.ani` both writing `a.cur`
pub fn target_collisions(sources: &[PathBuf], out_dir: Option<&Path>) -> Vec<PathBuf> {
	let mut seen = HashSet::new();

	sources.iter()
		.filter(|s| !seen.insert(target_path(s, out_dir)))
		.cloned()
		.collect()
}

/// Converts every animated cursor in `dir`. Failures are reported and skipped.
pub fn convert_dir(dir: &Path, out_dir: Option<&Path>) -> Result<Summary> {
	let sources = find_sources(dir)?;
	let mut summary = Summary {
		converted: 0,
		total: sources.len(),
	};

	if sources.is_empty() {
		warn!("No .{} files found in {}", SOURCE_EXT, dir.display());
		return Ok(summary);
	}

	if let Some(out) = out_dir {
		fs::create_dir_all(out).with_context(|| format!("Cannot create {}", out.display()))?;
	}

	info!("Found {} .{} file(s) to convert", sources.len(), SOURCE_EXT);

	for source in target_collisions(&sources, out_dir).iter() {
		warn!("{} overwrites the output of an earlier file: {}", display_name(source),
			target_path(source, out_dir).display());
	}

	for source in sources.iter() {
		let target = target_path(source, out_dir);
		info!("Converting {} -> {}...", display_name(source), display_name(&target));

		match convert_ani_to_cur(source, &target) {
			Ok(found) => {
				info!("  [OK] Converted ({} bytes, {:?} directory at {:#x})", found.data.len(),
					found.source_kind, found.offset);
				summary.converted += 1;
			},
			Err(e) => error!("  [ERR] {}: {:#}", display_name(source), anyhow::Error::from(e)),
		}
	}

	info!("Completed: {}/{} files converted", summary.converted, summary.total);
	Ok(summary)
}

fn display_name(path: &Path) -> String {
	path.file_name()
		.map(|n| n.to_string_lossy().into_owned())
		.unwrap_or_else(|| path.display().to_string())
}
