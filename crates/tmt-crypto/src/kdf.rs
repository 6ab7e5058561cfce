//! Key derivation: PBKDF2-HMAC-SHA256 password + salt → AES-128 key
//!
//! The parameters are fixed by the encryption tool and are not stored in the
//! container. Changing any of them breaks every existing file.

use pbkdf2::pbkdf2_hmac;
use sha2::Sha256;
use zeroize::Zeroize;

use crate::KEY_SIZE;

/// PBKDF2 round count used by the encryption tool
pub const KDF_ITERATIONS: u32 = 1000;

/// A 128-bit AES key derived from a password and per-file salt.
///
/// Zeroized on drop to prevent secrets lingering in memory.
pub struct DerivedKey {
    bytes: [u8; KEY_SIZE],
}

impl DerivedKey {
    pub fn from_bytes(bytes: [u8; KEY_SIZE]) -> Self {
        Self { bytes }
    }

    pub fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.bytes
    }
}

impl Drop for DerivedKey {
    fn drop(&mut self) {
        self.bytes.zeroize();
    }
}

impl std::fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DerivedKey")
            .field("bytes", &"[REDACTED]")
            .finish()
    }
}

/// Derive the container key from `password` and `salt`.
///
/// Any password and salt are accepted, including empty ones.
pub fn derive_key(password: &[u8], salt: &[u8]) -> DerivedKey {
    let mut key = [0u8; KEY_SIZE];
    pbkdf2_hmac::<Sha256>(password, salt, KDF_ITERATIONS, &mut key);
    DerivedKey::from_bytes(key)
}
