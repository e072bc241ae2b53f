//! Small utility functions used across the core module
//!
//! OS randomness for IVs, salts and raw keys.
//! Keep this light.

use rand::rngs::OsRng;
use rand::TryRngCore;

use crate::error::CoreError;

/// Fill `dest` from the operating system CSPRNG
pub fn fill_random(dest: &mut [u8]) -> Result<(), CoreError> {
    OsRng
        .try_fill_bytes(dest)
        .map_err(|e| CoreError::Io(std::io::Error::other(e)))
}

/// `len` fresh random bytes from the operating system CSPRNG
pub fn random_bytes(len: usize) -> Result<Vec<u8>, CoreError> {
    let mut out = vec![0u8; len];
    fill_random(&mut out)?;
    Ok(out)
}
