// src/key_store.rs
//! Durable key records
//!
//! One JSON file per saved key, created exclusively under the key-store root
//! and restricted to the owning user. Records are never rewritten: every save
//! produces a new file.

use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::Config;
use crate::consts::{KEY_FILE_EXT, KEY_FILE_PREFIX};
use crate::core::KeyMaterial;
use crate::enums::KeyOrigin;
use crate::error::CoreError;
use crate::CoreResult as Result;

/// Upper bound on `_N` suffixes tried when a timestamped name is taken
const MAX_NAME_ATTEMPTS: u32 = 1000;

/// On-disk form of one key
///
/// Only `key` is required on load, so records written by older tooling
/// (`{"key": "..."}`) still load.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersistedKeyRecord {
    /// Standard base64 of the raw key bytes
    pub key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<KeyOrigin>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length_bits: Option<usize>,
}

impl PersistedKeyRecord {
    pub fn from_key(key: &KeyMaterial) -> Self {
        Self {
            key: STANDARD.encode(key.expose_secret()),
            created_at: Some(Utc::now()),
            origin: Some(key.origin()),
            length_bits: Some(key.length_bits()),
        }
    }

    pub fn into_key(self) -> Result<KeyMaterial> {
        let bytes = STANDARD
            .decode(self.key.trim())
            .map_err(|e| CoreError::MalformedRecord(format!("key is not valid base64: {e}")))?;
        Ok(KeyMaterial::new(
            bytes,
            self.origin.unwrap_or(KeyOrigin::Imported),
        ))
    }
}

/// Key records under one root directory
#[derive(Debug, Clone)]
pub struct KeyStore {
    root: PathBuf,
}

impl KeyStore {
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.paths.key_dir.clone())
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Persist `key` as a new owner-only record file and return its path
    pub fn save(&self, key: &KeyMaterial) -> Result<PathBuf> {
        fs::create_dir_all(&self.root)?;

        let record = PersistedKeyRecord::from_key(key);
        let json = serde_json::to_vec_pretty(&record).map_err(std::io::Error::other)?;

        let (path, file) = self.create_record_file()?;
        write_or_discard(&path, file, &json)?;

        info!(path = %path.display(), length_bits = key.length_bits(), "saved key");
        Ok(path)
    }

    /// Read the record at `path`
    ///
    /// A bare name that does not exist relative to the working directory is
    /// also looked up under the key-store root.
    pub fn load<P: AsRef<Path>>(&self, path: P) -> Result<KeyMaterial> {
        let path = self.resolve(path.as_ref());
        let content = fs::read_to_string(&path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => CoreError::NotFound(path.clone()),
            _ => CoreError::Io(e),
        })?;

        let record: PersistedKeyRecord = serde_json::from_str(&content)
            .map_err(|e| CoreError::MalformedRecord(format!("{}: {e}", path.display())))?;
        let key = record.into_key()?;

        debug!(path = %path.display(), length_bits = key.length_bits(), "loaded key");
        Ok(key)
    }

    /// Record files under the root, oldest first
    pub fn list(&self) -> Result<Vec<PathBuf>> {
        let entries = match fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut paths = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if path.is_file() && is_record_name(&path) {
                paths.push(path);
            }
        }
        paths.sort();
        Ok(paths)
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if !path.exists() && path.components().count() == 1 {
            let candidate = self.root.join(path);
            if candidate.exists() {
                return candidate;
            }
        }
        path.to_path_buf()
    }

    fn create_record_file(&self) -> Result<(PathBuf, File)> {
        let stem = format!(
            "{KEY_FILE_PREFIX}{}",
            Local::now().format("%Y%m%d_%H%M%S_%6f")
        );

        for attempt in 0..MAX_NAME_ATTEMPTS {
            let name = match attempt {
                0 => format!("{stem}.{KEY_FILE_EXT}"),
                n => format!("{stem}_{n}.{KEY_FILE_EXT}"),
            };
            let path = self.root.join(name);
            match open_new_private(&path) {
                Ok(file) => return Ok((path, file)),
                Err(e) if e.kind() == ErrorKind::AlreadyExists => continue,
                Err(e) => return Err(e.into()),
            }
        }

        Err(CoreError::Io(std::io::Error::new(
            ErrorKind::AlreadyExists,
            format!("no free key file name for {stem}"),
        )))
    }
}

/// Fill a freshly created record, removing it again if anything fails
///
/// A half-written record would show up in `list()` and fail `load()`.
fn write_or_discard(path: &Path, file: File, json: &[u8]) -> std::io::Result<()> {
    let written = write_record(path, file, json);
    if written.is_err() {
        let _ = fs::remove_file(path);
    }
    written
}

fn write_record(path: &Path, mut file: File, json: &[u8]) -> std::io::Result<()> {
    file.write_all(json)?;
    file.sync_all()?;
    drop(file);
    restrict_to_owner(path)
}

fn is_record_name(path: &Path) -> bool {
    let name_ok = path
        .file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.starts_with(KEY_FILE_PREFIX));
    let ext_ok = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(KEY_FILE_EXT));
    name_ok && ext_ok
}

#[cfg(unix)]
fn open_new_private(path: &Path) -> std::io::Result<File> {
    use std::os::unix::fs::OpenOptionsExt;
    OpenOptions::new()
        .write(true)
        .create_new(true)
        .mode(0o600)
        .open(path)
}

#[cfg(not(unix))]
fn open_new_private(path: &Path) -> std::io::Result<File> {
    OpenOptions::new().write(true).create_new(true).open(path)
}

#[cfg(unix)]
fn restrict_to_owner(path: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o600))
}

#[cfg(not(unix))]
fn restrict_to_owner(_path: &Path) -> std::io::Result<()> {
    Ok(())
}
