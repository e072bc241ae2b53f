// tests/core/mod.rs

#[cfg(test)]
mod crypto;
#[cfg(test)]
mod file;
