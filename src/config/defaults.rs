// src/config/defaults.rs
use std::path::PathBuf;

use crate::config::app::{BatchSettings, KdfSettings, Paths};
use crate::consts::{DEFAULT_KEY_DIR, KDF_ITERATIONS};
use crate::enums::WriteMode;

pub fn default_paths() -> Paths {
    Paths {
        key_dir: PathBuf::from(DEFAULT_KEY_DIR),
    }
}

pub fn default_kdf() -> KdfSettings {
    KdfSettings {
        iterations: KDF_ITERATIONS,
    }
}

pub fn default_batch() -> BatchSettings {
    BatchSettings {
        write_mode: WriteMode::default(),
    }
}
