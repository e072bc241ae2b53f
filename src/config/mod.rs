// src/config/mod.rs
//! Configuration system for filecrypt
//!
//! TOML file + env overrides, loaded into a plain value that callers
//! pass to the components that need it.

pub use app::{
    load, load_from, BatchSettings, Config, KdfSettings, Paths, ENV_CONFIG, ENV_KDF_ITERATIONS,
    ENV_KEY_DIR,
};

mod app;
mod defaults;
