//! Input discovery.

use anyhow::{Result, bail};
use autoimport::FileFilter;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Expand `paths` into the list of files to rewrite, sorted and deduplicated.
///
/// Files named directly are always taken. Directories are walked and only
/// files with one of `extensions` that the filter does not exclude are kept.
pub fn discover_files(
    paths: &[PathBuf],
    extensions: &[String],
    filter: &dyn FileFilter,
) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for path in paths {
        if path.is_file() {
            files.push(path.clone());
            continue;
        }
        if !path.is_dir() {
            bail!("no such file or directory: {}", path.display());
        }
        for entry in WalkDir::new(path)
            .follow_links(false)
            .into_iter()
            .filter_entry(|entry| !is_excluded_dir(entry.path(), filter))
        {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }
            let file = entry.path();
            if has_extension(file, extensions) && !filter.is_excluded(&display_name(file)) {
                files.push(file.to_path_buf());
            }
        }
    }
    files.sort();
    files.dedup();
    Ok(files)
}

/// Prune a directory when the directory itself, or an arbitrary file inside
/// it, matches the filter (`**/node_modules/**` needs the latter).
fn is_excluded_dir(path: &Path, filter: &dyn FileFilter) -> bool {
    if !path.is_dir() {
        return false;
    }
    let dir = display_name(path);
    filter.is_excluded(&dir) || filter.is_excluded(&format!("{dir}/{PRUNE_PROBE}"))
}

const PRUNE_PROBE: &str = "autoimport-probe";

pub fn has_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| extensions.iter().any(|wanted| wanted.eq_ignore_ascii_case(ext)))
}

/// Forward-slash path text, as matched by exclude globs and shown in output.
pub fn display_name(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}
