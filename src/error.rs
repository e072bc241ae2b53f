// src/error.rs
//! Public error type for the entire crate

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Operator asked for a key algorithm this crate does not know
    #[error("unsupported key algorithm: {0:?} (expected AES or PBKDF2)")]
    UnsupportedAlgorithm(String),

    /// Requested key length is not 128, 192 or 256 bits
    #[error("invalid key length: {0} bits (expected 128, 192 or 256)")]
    InvalidLength(u32),

    /// Key handed to the cipher is not 16, 24 or 32 bytes
    #[error("invalid key length for AES: {0} bytes (expected 16, 24 or 32)")]
    InvalidKeyLength(usize),

    #[error("passphrase must not be empty")]
    EmptyPassphrase,

    #[error("key record not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("malformed key record: {0}")]
    MalformedRecord(String),

    /// Blob shorter than one IV
    #[error("encrypted data truncated: {0} bytes, need at least 16")]
    TruncatedInput(usize),

    /// Ciphertext after the IV is empty or not block-aligned
    #[error("ciphertext length {0} is not a nonzero multiple of 16")]
    InvalidCiphertextLength(usize),

    /// Wrong key, corrupted data, or data that was never encrypted
    #[error("invalid padding (wrong key, corrupted or unencrypted file?)")]
    PaddingInvalid,

    #[error("configuration error: {0}")]
    Config(String),

    /// SSH handshake, authentication or SFTP failure
    #[error("remote transfer failed: {0}")]
    Transfer(String),
}

impl CoreError {
    /// True for errors raised by the cipher on malformed or foreign input
    pub fn is_cipher_error(&self) -> bool {
        matches!(
            self,
            CoreError::InvalidKeyLength(_)
                | CoreError::TruncatedInput(_)
                | CoreError::InvalidCiphertextLength(_)
                | CoreError::PaddingInvalid
        )
    }
}
