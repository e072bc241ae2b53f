// src/core/file.rs
//! File-level encryption/decryption operations
//!
//! Whole-file read, in-memory transform via the crypto primitives,
//! then the result replaces the original at the same path.

use std::fs;
use std::io::Write;
use std::path::Path;

use crate::core::crypto::{decrypt_to_vec, encrypt_to_vec};
use crate::core::key::KeyMaterial;
use crate::enums::{CipherMode, WriteMode};
use crate::CoreResult as Result;

/// Encrypt the file at `path` in place. Returns the number of bytes written.
pub fn encrypt_file<P: AsRef<Path>>(path: P, key: &KeyMaterial, write_mode: WriteMode) -> Result<u64> {
    transform_file(path, key, CipherMode::Encrypt, write_mode)
}

/// Decrypt the file at `path` in place. Returns the number of bytes written.
pub fn decrypt_file<P: AsRef<Path>>(path: P, key: &KeyMaterial, write_mode: WriteMode) -> Result<u64> {
    transform_file(path, key, CipherMode::Decrypt, write_mode)
}

/// Read `path`, apply `mode`, write the result back over `path`
///
/// Nothing is written when the transform fails.
pub fn transform_file<P: AsRef<Path>>(
    path: P,
    key: &KeyMaterial,
    mode: CipherMode,
    write_mode: WriteMode,
) -> Result<u64> {
    let path = path.as_ref();
    let input = fs::read(path)?;

    let output = match mode {
        CipherMode::Encrypt => encrypt_to_vec(&input, key)?,
        CipherMode::Decrypt => decrypt_to_vec(&input, key)?,
    };

    match write_mode {
        WriteMode::InPlace => fs::write(path, &output)?,
        WriteMode::Atomic => replace_atomically(path, &output)?,
    }
    Ok(output.len() as u64)
}

/// Write `data` to a temp file next to `path`, then rename it over `path`
///
/// Symlinks are resolved first so the rename replaces the file they point
/// at and the link itself survives. A file with other hard links is written
/// through instead, since a rename would detach it from those names. The
/// replacement keeps the original file's permissions.
pub fn replace_atomically(path: &Path, data: &[u8]) -> std::io::Result<()> {
    let target = fs::canonicalize(path)?;
    let meta = fs::metadata(&target)?;
    let dir = match target.parent() {
        Some(parent) if !has_other_links(&meta) => parent,
        _ => return fs::write(&target, data),
    };

    let mut tmp = tempfile::Builder::new()
        .prefix(".filecrypt-")
        .suffix(".tmp")
        .tempfile_in(dir)?;
    tmp.write_all(data)?;
    tmp.as_file().sync_all()?;
    fs::set_permissions(tmp.path(), meta.permissions())?;

    tmp.persist(&target).map_err(|e| e.error)?;
    Ok(())
}

#[cfg(unix)]
fn has_other_links(meta: &fs::Metadata) -> bool {
    use std::os::unix::fs::MetadataExt;
    meta.nlink() > 1
}

#[cfg(not(unix))]
fn has_other_links(_meta: &fs::Metadata) -> bool {
    false
}
