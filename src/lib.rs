// src/lib.rs
//! filecrypt — symmetric key management and whole-file AES-CBC encryption
//!
//! Features:
//! - Random or PBKDF2-HMAC-SHA256 derived AES-128/192/256 keys
//! - Owner-only JSON key records
//! - `IV || AES-CBC(PKCS#7)` file format, fresh IV per file
//! - Sequential batches with per-file outcomes and atomic replacement
//! - SFTP copy of a key record to a remote host (`cli` feature)

pub mod aliases;
pub mod batch;
pub mod config;
pub mod consts;
pub mod core;
pub mod enums;
pub mod key_store;
pub mod select;
#[cfg(feature = "cli")]
pub mod transfer;

pub mod error;

// Re-export everything users need at the crate root
pub use batch::{BatchProcessor, BatchProgress, BatchReport, FileOutcome};
pub use config::load as load_config;
pub use config::Config;
pub use crate::core::{
    decrypt_to_vec, derive, encrypt_to_vec, KeyDeriver, KeyMaterial, PassphraseSource,
    Result as CoreResult, StaticPassphrase,
};
#[cfg(feature = "cli")]
pub use crate::core::TerminalPrompt;
pub use enums::{CipherMode, KeyAlgorithm, KeyOrigin, WriteMode};
pub use error::CoreError;
pub use key_store::{KeyStore, PersistedKeyRecord};
pub use select::collect_files;
#[cfg(feature = "cli")]
pub use transfer::{send_file, RemoteTarget};
