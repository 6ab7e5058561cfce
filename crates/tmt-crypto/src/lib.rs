//! tmt-crypto: decryption of tmtcrypt containers
//!
//! Pipeline: container text → base64 decode → PBKDF2 key → AES-GCM open
//!
//! ```text
//! <base64(salt)>.<base64(nonce)>.<base64(ciphertext || tag)>
//!       │                │                 │
//!       └── PBKDF2-HMAC-SHA256(password, salt, 1000) → 16-byte key
//!                        └── AES-128-GCM(key, nonce, no AAD) ─┘
//! ```

pub mod aead;
pub mod container;
pub mod kdf;
pub mod pipeline;

pub use aead::{open, seal, Plaintext, MAX_NONCE_SIZE};
pub use container::Container;
pub use kdf::{derive_key, DerivedKey, KDF_ITERATIONS};
pub use pipeline::{decrypt_container, decrypt_file, read_container};

/// Size of the derived AES-128 key in bytes
pub const KEY_SIZE: usize = 16;

/// Size of the GCM authentication tag
pub const TAG_SIZE: usize = 16;
