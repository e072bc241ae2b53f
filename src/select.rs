// src/select.rs
//! Turns an operator target (one file or one directory) into the path list
//! handed to the batch processor.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::CoreError;
use crate::CoreResult as Result;

/// A file yields itself; a directory yields every regular file beneath it,
/// depth-first with entries sorted by name. Symlinks are not followed.
pub fn collect_files<P: AsRef<Path>>(target: P) -> Result<Vec<PathBuf>> {
    let target = target.as_ref();
    let meta = std::fs::metadata(target).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => CoreError::NotFound(target.to_path_buf()),
        _ => CoreError::Io(e),
    })?;

    if meta.is_file() {
        return Ok(vec![target.to_path_buf()]);
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(target).follow_links(false).sort_by_file_name() {
        let entry = entry.map_err(|e| CoreError::Io(e.into()))?;
        if entry.file_type().is_file() {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}
