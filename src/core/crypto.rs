// src/core/crypto.rs
//! Pure cryptographic primitives — no I/O
//!
//! AES-CBC with PKCS#7 padding over in-memory buffers. The output framing is
//! `IV (16 bytes) || ciphertext`, with a fresh random IV per call. The key
//! length picks AES-128, AES-192 or AES-256.
//!
//! There is no authentication tag: a padding failure on decrypt is the only
//! integrity signal, and a corrupted blob can still decrypt to garbage.

use aes::cipher::block_padding::Pkcs7;
use aes::cipher::{BlockDecryptMut, BlockEncryptMut, InvalidLength, KeyIvInit};
use aes::{Aes128, Aes192, Aes256};

use crate::aliases::Iv16;
use crate::consts::{BLOCK_LEN, IV_LEN};
use crate::core::key::KeyMaterial;
use crate::core::util::fill_random;
use crate::error::CoreError;
use crate::CoreResult as Result;

type Aes128CbcEnc = cbc::Encryptor<Aes128>;
type Aes192CbcEnc = cbc::Encryptor<Aes192>;
type Aes256CbcEnc = cbc::Encryptor<Aes256>;
type Aes128CbcDec = cbc::Decryptor<Aes128>;
type Aes192CbcDec = cbc::Decryptor<Aes192>;
type Aes256CbcDec = cbc::Decryptor<Aes256>;

fn check_key(key: &KeyMaterial) -> Result<&[u8]> {
    match key.len() {
        16 | 24 | 32 => Ok(key.expose_secret()),
        n => Err(CoreError::InvalidKeyLength(n)),
    }
}

/// Encrypt `plaintext` → `IV || ciphertext` with a fresh random IV
pub fn encrypt_to_vec(plaintext: &[u8], key: &KeyMaterial) -> Result<Vec<u8>> {
    check_key(key)?;
    let mut iv = [0u8; IV_LEN];
    fill_random(&mut iv)?;
    encrypt_with_iv(plaintext, key, &Iv16::new(iv))
}

/// Encrypt with a caller-chosen IV. The IV must never repeat under one key.
pub fn encrypt_with_iv(plaintext: &[u8], key: &KeyMaterial, iv: &Iv16) -> Result<Vec<u8>> {
    let key_bytes = check_key(key)?;
    let iv_bytes = iv.expose_secret();
    let bad_key = |_: InvalidLength| CoreError::InvalidKeyLength(key_bytes.len());

    let ciphertext = match key_bytes.len() {
        16 => Aes128CbcEnc::new_from_slices(key_bytes, iv_bytes)
            .map_err(bad_key)?
            .encrypt_padded_vec_mut::<Pkcs7>(plaintext),
        24 => Aes192CbcEnc::new_from_slices(key_bytes, iv_bytes)
            .map_err(bad_key)?
            .encrypt_padded_vec_mut::<Pkcs7>(plaintext),
        _ => Aes256CbcEnc::new_from_slices(key_bytes, iv_bytes)
            .map_err(bad_key)?
            .encrypt_padded_vec_mut::<Pkcs7>(plaintext),
    };

    let mut out = Vec::with_capacity(IV_LEN + ciphertext.len());
    out.extend_from_slice(iv_bytes);
    out.extend_from_slice(&ciphertext);
    Ok(out)
}

/// Decrypt `IV || ciphertext` → plaintext, validating length and padding
pub fn decrypt_to_vec(blob: &[u8], key: &KeyMaterial) -> Result<Vec<u8>> {
    let key_bytes = check_key(key)?;

    if blob.len() < IV_LEN {
        return Err(CoreError::TruncatedInput(blob.len()));
    }
    let (iv, ciphertext) = blob.split_at(IV_LEN);
    if ciphertext.is_empty() || ciphertext.len() % BLOCK_LEN != 0 {
        return Err(CoreError::InvalidCiphertextLength(ciphertext.len()));
    }

    let bad_key = |_: InvalidLength| CoreError::InvalidKeyLength(key_bytes.len());
    let unpadded = match key_bytes.len() {
        16 => Aes128CbcDec::new_from_slices(key_bytes, iv)
            .map_err(bad_key)?
            .decrypt_padded_vec_mut::<Pkcs7>(ciphertext),
        24 => Aes192CbcDec::new_from_slices(key_bytes, iv)
            .map_err(bad_key)?
            .decrypt_padded_vec_mut::<Pkcs7>(ciphertext),
        _ => Aes256CbcDec::new_from_slices(key_bytes, iv)
            .map_err(bad_key)?
            .decrypt_padded_vec_mut::<Pkcs7>(ciphertext),
    };

    unpadded.map_err(|_| CoreError::PaddingInvalid)
}

/// Size of the encrypted blob for a plaintext of `plaintext_len` bytes
#[inline]
pub const fn encrypted_len(plaintext_len: usize) -> usize {
    IV_LEN + (plaintext_len / BLOCK_LEN + 1) * BLOCK_LEN
}
