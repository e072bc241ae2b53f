// src/core/key.rs
//! Key material and key generation
//!
//! A key is either raw OS randomness or PBKDF2-HMAC-SHA256 over an
//! operator passphrase. Passphrase acquisition is a separate collaborator
//! ([`PassphraseSource`]) so derivation itself stays a pure function.

use std::fmt;

use hmac::Hmac;
use pbkdf2::pbkdf2;
use sha2::Sha256;
use tracing::{debug, info};

use crate::aliases::{KeyBytes, Passphrase, Salt16};
use crate::consts::{KDF_ITERATIONS, KEY_LENGTHS_BITS, SALT_LEN};
use crate::core::util::{fill_random, random_bytes};
use crate::enums::{KeyAlgorithm, KeyOrigin};
use crate::error::CoreError;
use crate::CoreResult as Result;

/// Raw symmetric key bytes plus where they came from
///
/// The byte length is the only size information; `length_bits()` is
/// always `len * 8`. Bytes are zeroized on drop.
pub struct KeyMaterial {
    bytes: KeyBytes,
    origin: KeyOrigin,
}

impl KeyMaterial {
    /// Wrap existing key bytes. No length check: the cipher validates at use time.
    pub fn new(bytes: Vec<u8>, origin: KeyOrigin) -> Self {
        Self {
            bytes: KeyBytes::new(bytes),
            origin,
        }
    }

    #[inline]
    pub fn expose_secret(&self) -> &[u8] {
        self.bytes.expose_secret().as_slice()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.expose_secret().len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    pub fn length_bits(&self) -> usize {
        self.len() * 8
    }

    #[inline]
    pub fn origin(&self) -> KeyOrigin {
        self.origin
    }
}

impl fmt::Debug for KeyMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyMaterial")
            .field("length_bits", &self.length_bits())
            .field("origin", &self.origin)
            .field("bytes", &"[REDACTED]")
            .finish()
    }
}

/// Supplies the passphrase for password-derived keys
pub trait PassphraseSource {
    fn read_passphrase(&self) -> Result<Passphrase>;
}

/// Fixed passphrase, for scripted use and tests
pub struct StaticPassphrase(Passphrase);

impl StaticPassphrase {
    pub fn new(passphrase: impl Into<String>) -> Self {
        Self(Passphrase::new(passphrase.into()))
    }
}

impl PassphraseSource for StaticPassphrase {
    fn read_passphrase(&self) -> Result<Passphrase> {
        Ok(self.0.clone())
    }
}

/// Interactive prompt on the controlling terminal, input not echoed
#[cfg(feature = "cli")]
pub struct TerminalPrompt {
    prompt: String,
}

#[cfg(feature = "cli")]
impl TerminalPrompt {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
        }
    }
}

#[cfg(feature = "cli")]
impl Default for TerminalPrompt {
    fn default() -> Self {
        Self::new("Master passphrase: ")
    }
}

#[cfg(feature = "cli")]
impl PassphraseSource for TerminalPrompt {
    fn read_passphrase(&self) -> Result<Passphrase> {
        let input = rpassword::prompt_password(&self.prompt)?;
        Ok(Passphrase::new(input))
    }
}

/// Check `length_bits` and return the key size in bytes
pub fn key_len_bytes(length_bits: u32) -> Result<usize> {
    if KEY_LENGTHS_BITS.contains(&length_bits) {
        Ok((length_bits / 8) as usize)
    } else {
        Err(CoreError::InvalidLength(length_bits))
    }
}

/// PBKDF2-HMAC-SHA256 over `passphrase` and `salt` → `length_bits / 8` key bytes
///
/// Deterministic: equal inputs always yield equal keys.
pub fn derive(
    passphrase: &Passphrase,
    salt: &Salt16,
    length_bits: u32,
    iterations: u32,
) -> Result<KeyMaterial> {
    let len = key_len_bytes(length_bits)?;
    if passphrase.expose_secret().is_empty() {
        return Err(CoreError::EmptyPassphrase);
    }
    if iterations == 0 {
        return Err(CoreError::Config("PBKDF2 iterations must be ≥1".into()));
    }

    let mut out = vec![0u8; len];
    pbkdf2::<Hmac<Sha256>>(
        passphrase.expose_secret().as_bytes(),
        salt.expose_secret(),
        iterations,
        &mut out,
    )
    .map_err(|e| CoreError::Config(format!("PBKDF2 failed: {e}")))?;

    Ok(KeyMaterial::new(out, KeyOrigin::PasswordDerived))
}

/// Produces fresh [`KeyMaterial`]
#[derive(Debug, Clone, Copy)]
pub struct KeyDeriver {
    iterations: u32,
}

impl Default for KeyDeriver {
    fn default() -> Self {
        Self::new(KDF_ITERATIONS)
    }
}

impl KeyDeriver {
    pub fn new(iterations: u32) -> Self {
        Self { iterations }
    }

    pub fn from_config(config: &crate::config::Config) -> Self {
        Self::new(config.kdf.iterations)
    }

    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    /// Generate a new key of `length_bits` using `algorithm`
    ///
    /// `passphrase` is only consulted for [`KeyAlgorithm::PasswordDerived`],
    /// and only after the length has been validated.
    pub fn generate(
        &self,
        algorithm: KeyAlgorithm,
        length_bits: u32,
        passphrase: &dyn PassphraseSource,
    ) -> Result<KeyMaterial> {
        let len = key_len_bytes(length_bits)?;

        let key = match algorithm {
            KeyAlgorithm::Random => KeyMaterial {
                bytes: KeyBytes::new(random_bytes(len)?),
                origin: KeyOrigin::Random,
            },
            KeyAlgorithm::PasswordDerived => {
                let pass = passphrase.read_passphrase()?;
                // Fresh salt per derivation; not persisted with the key.
                let mut salt = [0u8; SALT_LEN];
                fill_random(&mut salt)?;
                let salt = Salt16::new(salt);
                debug!(iterations = self.iterations, "deriving key with PBKDF2-HMAC-SHA256");
                derive(&pass, &salt, length_bits, self.iterations)?
            }
        };

        info!(length_bits, origin = ?key.origin(), "generated key");
        Ok(key)
    }
}
