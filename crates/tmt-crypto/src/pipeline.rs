//! Decode → derive → decrypt, over a container string or a file on disk.

use std::path::Path;

use tmt_core::{DecryptError, TmtResult};

use crate::aead::{open, Plaintext};
use crate::container::Container;
use crate::kdf::derive_key;

/// Decrypt container text with an already-resolved password.
pub fn decrypt_container(raw: &str, password: &[u8]) -> TmtResult<Plaintext> {
    let container = Container::parse(raw)?;
    tracing::debug!(
        salt_len = container.salt.len(),
        nonce_len = container.nonce.len(),
        sealed_len = container.sealed.len(),
        "container decoded"
    );

    let key = derive_key(password, &container.salt);
    open(&key, &container.nonce, &container.sealed)
}

/// Read the whole container file at `path`.
pub fn read_container(path: &Path) -> TmtResult<String> {
    let bytes = std::fs::read(path).map_err(|e| DecryptError::io(path, e))?;
    String::from_utf8(bytes).map_err(|_| DecryptError::malformed("container is not ASCII text"))
}

/// Read `path` fully and decrypt it with `password`.
///
/// The password is chosen by the caller, normally via
/// [`PasswordTable::resolve`](tmt_core::PasswordTable::resolve).
pub fn decrypt_file(path: &Path, password: &[u8]) -> TmtResult<Plaintext> {
    let raw = read_container(path)?;
    tracing::debug!(path = %path.display(), bytes = raw.len(), "container read");
    decrypt_container(&raw, password)
}
