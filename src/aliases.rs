// src/aliases.rs
//! Re-exports secure-gate's secret wrappers under domain names
//!
//! These are the canonical secret types used throughout filecrypt.
//! Every one of them zeroizes on drop and hides its contents behind
//! `expose_secret()`.

pub use secure_gate::{dynamic_alias, fixed_alias};

// Fixed-size secrets
fixed_alias!(Iv16, 16); // CBC initialization vector
fixed_alias!(Salt16, 16); // PBKDF2 salt

// Dynamic secrets
dynamic_alias!(KeyBytes, Vec<u8>); // raw AES key, 16/24/32 bytes
dynamic_alias!(Passphrase, String); // operator passphrase for PBKDF2
