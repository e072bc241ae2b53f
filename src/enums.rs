// src/enums.rs
//! Public enum types used throughout the crate
//!
//! Central location for the enums that represent user-visible choices:
//! key algorithms, key origins, batch direction and write strategy.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// How a new key is produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAlgorithm {
    /// Key bytes straight from the OS RNG
    Random,
    /// PBKDF2-HMAC-SHA256 over an operator passphrase
    PasswordDerived,
}

impl FromStr for KeyAlgorithm {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "AES" | "RANDOM" => Ok(KeyAlgorithm::Random),
            "PBKDF2" | "PASSWORD" => Ok(KeyAlgorithm::PasswordDerived),
            _ => Err(CoreError::UnsupportedAlgorithm(s.trim().to_owned())),
        }
    }
}

/// Where a [`KeyMaterial`](crate::core::KeyMaterial) came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyOrigin {
    Random,
    PasswordDerived,
    /// Loaded from a record that does not say how it was made
    Imported,
}

impl From<KeyAlgorithm> for KeyOrigin {
    fn from(algo: KeyAlgorithm) -> Self {
        match algo {
            KeyAlgorithm::Random => KeyOrigin::Random,
            KeyAlgorithm::PasswordDerived => KeyOrigin::PasswordDerived,
        }
    }
}

/// Direction of a batch run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CipherMode {
    Encrypt,
    Decrypt,
}

impl fmt::Display for CipherMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CipherMode::Encrypt => f.write_str("encrypt"),
            CipherMode::Decrypt => f.write_str("decrypt"),
        }
    }
}

/// How transformed bytes replace the original file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum WriteMode {
    /// Temp file in the same directory, then rename over the target
    #[default]
    Atomic,
    /// Truncate and rewrite the target directly
    InPlace,
}
