//! Build artifact cleanup.
//!
//! Removes every object file, static archive and host shared library under
//! the project root. Nothing else is touched.

use crate::config::BuildConfig;
use crate::error::BuildError;
use crate::ui;
use std::fs;
use std::path::PathBuf;
use walkdir::WalkDir;

/// Files `clean` would remove, in traversal order.
pub fn artifacts(config: &BuildConfig) -> Vec<PathBuf> {
    let exts = config.artifact_exts();
    WalkDir::new(&config.root)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter(|e| {
            e.path()
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| exts.contains(&ext))
        })
        .map(|e| e.into_path())
        .collect()
}

/// Returns the number of files removed, or that would be with `dry_run`.
pub fn clean(config: &BuildConfig, dry_run: bool) -> Result<usize, BuildError> {
    let targets = artifacts(config);
    for path in &targets {
        let shown = path.strip_prefix(&config.root).unwrap_or(path.as_path());
        ui::info(&format!("Removing: {}", shown.display()));
        if !dry_run {
            fs::remove_file(path).map_err(|e| BuildError::io(path, e))?;
        }
    }

    if targets.is_empty() {
        ui::warn("Nothing to clean");
    } else {
        ui::ok("Clean complete.");
    }
    Ok(targets.len())
}
