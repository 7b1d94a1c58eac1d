//! Credential hashing used by the user repository.
//!
//! # Invariants
//! - Hashing is deterministic: the same plaintext always yields the same digest,
//!   so account creation and authentication agree.
//! - Digests are opaque to the rest of the crate.

use sha2::{Digest, Sha256};

/// Pure `plaintext -> digest` function.
pub trait CredentialHasher {
    fn digest(&self, plaintext: &str) -> String;
}

/// Lowercase hex SHA-256 of the UTF-8 plaintext.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sha256CredentialHasher;

impl CredentialHasher for Sha256CredentialHasher {
    fn digest(&self, plaintext: &str) -> String {
        hex::encode(Sha256::digest(plaintext.as_bytes()))
    }
}

impl<H: CredentialHasher + ?Sized> CredentialHasher for &H {
    fn digest(&self, plaintext: &str) -> String {
        (**self).digest(plaintext)
    }
}
