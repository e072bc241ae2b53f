// tests/common.rs
//! Shared test utilities — logging setup and small fixtures

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use filecrypt::{KeyMaterial, KeyOrigin};
#[cfg(feature = "logging")]
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize test-friendly logging
/// Call once at the start of any test that needs logs
pub fn setup() {
    #[cfg(feature = "logging")]
    tracing_subscriber::registry()
        .with(fmt::layer().with_test_writer()) // captured by `cargo test`
        .with(EnvFilter::from_default_env()) // respects RUST_LOG=
        .try_init()
        .ok(); // idempotent

    #[cfg(not(feature = "logging"))]
    { /* no-op */ }
}

/// Key of `len` bytes with a recognisable pattern
pub fn test_key(len: usize) -> KeyMaterial {
    KeyMaterial::new((0..len as u8).collect(), KeyOrigin::Random)
}

/// Write `contents` to `dir/name` and return the path
pub fn write_file(dir: &Path, name: &str, contents: &[u8]) -> PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent dir");
    }
    fs::write(&path, contents).expect("write fixture");
    path
}
