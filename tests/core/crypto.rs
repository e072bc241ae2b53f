// tests/core/crypto.rs
use filecrypt::consts::{IV_LEN, MIN_BLOB_LEN};
use filecrypt::core::{decrypt_to_vec, encrypt_to_vec};
use filecrypt::error::CoreError;

use crate::common::{setup, test_key};

#[test]
fn test_encrypt_decrypt_roundtrip_in_memory() {
    setup();
    let plaintext = b"Attack at dawn!";
    for len in [16, 24, 32] {
        let key = test_key(len);
        let blob = encrypt_to_vec(plaintext, &key).unwrap();
        let decrypted = decrypt_to_vec(&blob, &key).unwrap();
        assert_eq!(decrypted, plaintext);
    }
}

#[test]
fn test_roundtrip_empty_and_block_aligned_inputs() {
    let key = test_key(32);
    for len in [0usize, 1, 15, 16, 17, 31, 32, 33, 4096] {
        let plaintext: Vec<u8> = (0..len).map(|i| (i * 31 % 251) as u8).collect();
        let blob = encrypt_to_vec(&plaintext, &key).unwrap();
        assert!(blob.len() >= MIN_BLOB_LEN);
        assert_eq!((blob.len() - IV_LEN) % 16, 0);
        assert_eq!(decrypt_to_vec(&blob, &key).unwrap(), plaintext, "len {len}");
    }
}

#[test]
fn test_same_plaintext_encrypts_differently_each_time() {
    let key = test_key(16);
    let a = encrypt_to_vec(b"same message", &key).unwrap();
    let b = encrypt_to_vec(b"same message", &key).unwrap();
    assert_ne!(a[..IV_LEN], b[..IV_LEN], "IV must be fresh per call");
    assert_ne!(a, b);
}

#[test]
fn test_flipped_ciphertext_byte_never_yields_original() {
    let key = test_key(32);
    let plaintext = b"a message that spans more than one AES block".to_vec();
    let blob = encrypt_to_vec(&plaintext, &key).unwrap();

    for idx in IV_LEN..blob.len() {
        let mut tampered = blob.clone();
        tampered[idx] ^= 0x01;
        match decrypt_to_vec(&tampered, &key) {
            Err(CoreError::PaddingInvalid) => {}
            Ok(garbled) => assert_ne!(garbled, plaintext, "flip at {idx}"),
            Err(other) => panic!("unexpected error at {idx}: {other}"),
        }
    }
}

#[test]
fn test_flipped_last_block_byte_breaks_padding() {
    // Flipping the last byte of the previous block turns the final 0x10 pad byte into 0x11.
    let key = test_key(16);
    let blob = encrypt_to_vec(&[0u8; 16], &key).unwrap();
    let mut tampered = blob.clone();
    let last_prev = blob.len() - 17;
    tampered[last_prev] ^= 0x01;
    assert!(matches!(
        decrypt_to_vec(&tampered, &key),
        Err(CoreError::PaddingInvalid)
    ));
}

#[test]
fn test_decrypt_rejects_short_blobs() {
    let key = test_key(16);
    assert!(matches!(
        decrypt_to_vec(&[0u8; 10], &key),
        Err(CoreError::TruncatedInput(10))
    ));
    assert!(matches!(
        decrypt_to_vec(&[0u8; 20], &key),
        Err(CoreError::InvalidCiphertextLength(4))
    ));
    assert!(matches!(
        decrypt_to_vec(&[], &key),
        Err(CoreError::TruncatedInput(0))
    ));
}

#[test]
fn test_key_length_validation() {
    let bad = test_key(10);
    assert!(matches!(
        encrypt_to_vec(b"data", &bad),
        Err(CoreError::InvalidKeyLength(10))
    ));
    for len in [16, 24, 32] {
        assert!(encrypt_to_vec(b"data", &test_key(len)).is_ok());
    }
    assert!(matches!(
        encrypt_to_vec(b"data", &test_key(0)),
        Err(CoreError::InvalidKeyLength(0))
    ));
}

#[test]
fn test_decrypt_with_wrong_key_never_returns_plaintext() {
    let plaintext = b"secret".to_vec();
    let blob = encrypt_to_vec(&plaintext, &test_key(32)).unwrap();

    let wrong = filecrypt::KeyMaterial::new(vec![0xEE; 32], filecrypt::KeyOrigin::Random);
    match decrypt_to_vec(&blob, &wrong) {
        Err(e) => assert!(matches!(e, CoreError::PaddingInvalid)),
        Ok(garbled) => assert_ne!(garbled, plaintext),
    }
}

#[test]
fn test_key_size_mismatch_between_encrypt_and_decrypt() {
    let blob = encrypt_to_vec(b"sized for aes-256", &test_key(32)).unwrap();
    match decrypt_to_vec(&blob, &test_key(16)) {
        Err(e) => assert!(e.is_cipher_error()),
        Ok(garbled) => assert_ne!(garbled, b"sized for aes-256"),
    }
}
