// src/consts.rs
//! Shared constants — security parameters and defaults

/// AES block size in bytes
pub const BLOCK_LEN: usize = 16;

/// Length of the random IV prepended to every encrypted file
pub const IV_LEN: usize = 16;

/// Smallest valid encrypted file: IV + one padded block
pub const MIN_BLOB_LEN: usize = IV_LEN + BLOCK_LEN;

/// Length of the random PBKDF2 salt
pub const SALT_LEN: usize = 16;

/// PBKDF2-HMAC-SHA256 work factor for passphrase-derived keys
pub const KDF_ITERATIONS: u32 = 390_000;

/// Accepted key sizes in bits
pub const KEY_LENGTHS_BITS: [u32; 3] = [128, 192, 256];

/// Default key-store directory, relative to the working directory
pub const DEFAULT_KEY_DIR: &str = "./keys";

/// Default config file name
pub const DEFAULT_CONFIG_FILE: &str = "filecrypt.toml";

/// Prefix and extension of persisted key records
pub const KEY_FILE_PREFIX: &str = "key_";
pub const KEY_FILE_EXT: &str = "json";
