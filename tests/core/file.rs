// tests/core/file.rs
use std::fs;

use filecrypt::core::{decrypt_file, encrypt_file};
use filecrypt::error::CoreError;
use filecrypt::WriteMode;
use tempfile::tempdir;

use crate::common::{test_key, write_file};

#[test]
fn test_encrypt_file_and_decrypt_file_roundtrip() {
    let dir = tempdir().unwrap();
    let contents = b"The quick brown fox jumps over the lazy dog";
    let key = test_key(32);

    for mode in [WriteMode::Atomic, WriteMode::InPlace] {
        let path = write_file(dir.path(), "plain.txt", contents);

        let written = encrypt_file(&path, &key, mode).unwrap();
        let on_disk = fs::read(&path).unwrap();
        assert_eq!(written, on_disk.len() as u64);
        assert_ne!(on_disk.as_slice(), contents.as_slice());

        let restored = decrypt_file(&path, &key, mode).unwrap();
        assert_eq!(restored, contents.len() as u64);
        assert_eq!(fs::read(&path).unwrap(), contents);
    }
}

#[test]
fn test_failed_decrypt_leaves_file_untouched() {
    let dir = tempdir().unwrap();
    let path = write_file(dir.path(), "short.bin", b"too short");

    let err = decrypt_file(&path, &test_key(16), WriteMode::Atomic).unwrap_err();
    assert!(matches!(err, CoreError::TruncatedInput(9)));
    assert_eq!(fs::read(&path).unwrap(), b"too short");
}

#[test]
fn test_atomic_write_leaves_no_temp_files() {
    let dir = tempdir().unwrap();
    let path = write_file(dir.path(), "doc.txt", b"hello");
    encrypt_file(&path, &test_key(16), WriteMode::Atomic).unwrap();

    let names: Vec<_> = fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name())
        .collect();
    assert_eq!(names, vec![std::ffi::OsString::from("doc.txt")]);
}

#[cfg(unix)]
#[test]
fn test_atomic_write_keeps_permissions() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempdir().unwrap();
    let path = write_file(dir.path(), "script.sh", b"#!/bin/sh\necho hi\n");
    fs::set_permissions(&path, fs::Permissions::from_mode(0o750)).unwrap();

    encrypt_file(&path, &test_key(24), WriteMode::Atomic).unwrap();

    let mode = fs::metadata(&path).unwrap().permissions().mode() & 0o777;
    assert_eq!(mode, 0o750);
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempdir().unwrap();
    let err = encrypt_file(dir.path().join("nope"), &test_key(16), WriteMode::InPlace).unwrap_err();
    assert!(matches!(err, CoreError::Io(_)));
}

#[cfg(unix)]
#[test]
fn test_atomic_write_goes_through_symlink() {
    let dir = tempdir().unwrap();
    let real = write_file(dir.path(), "real.txt", b"top secret");
    let link = dir.path().join("link.txt");
    std::os::unix::fs::symlink(&real, &link).unwrap();
    let key = test_key(16);

    encrypt_file(&link, &key, WriteMode::Atomic).unwrap();

    assert!(fs::symlink_metadata(&link).unwrap().file_type().is_symlink());
    assert_ne!(fs::read(&real).unwrap(), b"top secret");

    decrypt_file(&link, &key, WriteMode::Atomic).unwrap();
    assert!(fs::symlink_metadata(&link).unwrap().file_type().is_symlink());
    assert_eq!(fs::read(&real).unwrap(), b"top secret");
}

#[cfg(unix)]
#[test]
fn test_atomic_write_keeps_hard_links_together() {
    let dir = tempdir().unwrap();
    let first = write_file(dir.path(), "first.txt", b"shared contents");
    let second = dir.path().join("second.txt");
    fs::hard_link(&first, &second).unwrap();

    encrypt_file(&first, &test_key(32), WriteMode::Atomic).unwrap();

    let encrypted = fs::read(&first).unwrap();
    assert_ne!(encrypted, b"shared contents");
    assert_eq!(fs::read(&second).unwrap(), encrypted);
}
