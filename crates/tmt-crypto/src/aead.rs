//! AES-128-GCM authenticated decryption of the sealed segment
//!
//! Sealed data format (binary):
//! ```text
//! [N bytes: ciphertext][16 bytes: GCM tag]
//! ```
//!
//! No associated data is bound. The nonce travels in its own container
//! segment and is used as the GCM IV as-is. The encryption tool's library
//! takes any non-empty nonce (16 bytes by default), so every length from 1 to
//! [`MAX_NONCE_SIZE`] is accepted.

use aes_gcm::{
    aead::{self, consts, AeadInPlace, KeyInit},
    aes::Aes128,
    AesGcm,
};
use tmt_core::{DecryptError, TmtResult};
use zeroize::{Zeroize, Zeroizing};

use crate::kdf::DerivedKey;
use crate::TAG_SIZE;

/// Longest nonce accepted in a container
pub const MAX_NONCE_SIZE: usize = 32;

/// Instantiate `AesGcm<Aes128, N>` for the runtime nonce length and evaluate
/// `$body` with it bound to `$cipher`. Yields `None` for unsupported lengths.
macro_rules! with_nonce_size {
    ($nonce:expr, $key:expr, |$cipher:ident| $body:expr) => {
        with_nonce_size!(@arms $nonce, $key, $cipher, $body;
            1 U1, 2 U2, 3 U3, 4 U4, 5 U5, 6 U6, 7 U7, 8 U8,
            9 U9, 10 U10, 11 U11, 12 U12, 13 U13, 14 U14, 15 U15, 16 U16,
            17 U17, 18 U18, 19 U19, 20 U20, 21 U21, 22 U22, 23 U23, 24 U24,
            25 U25, 26 U26, 27 U27, 28 U28, 29 U29, 30 U30, 31 U31, 32 U32)
    };
    (@arms $nonce:expr, $key:expr, $cipher:ident, $body:expr; $($len:literal $size:ident),*) => {
        match $nonce.len() {
            $($len => {
                let $cipher = AesGcm::<Aes128, consts::$size>::new($key);
                Some($body)
            })*
            _ => None,
        }
    };
}

/// Decrypted container contents. Zeroized on drop.
pub struct Plaintext {
    bytes: Zeroizing<Vec<u8>>,
}

impl Plaintext {
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Interpret the plaintext as UTF-8 text.
    pub fn into_text(mut self) -> TmtResult<String> {
        String::from_utf8(std::mem::take(&mut *self.bytes)).map_err(|e| {
            let err = e.utf8_error();
            e.into_bytes().zeroize();
            DecryptError::Encoding(err)
        })
    }
}

impl std::fmt::Debug for Plaintext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Plaintext")
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// Verify and decrypt `sealed` (ciphertext || tag).
///
/// Fails with `MalformedContainer` if `sealed` is shorter than the tag or the
/// nonce is empty or longer than [`MAX_NONCE_SIZE`], and with
/// `AuthenticationFailure` if the tag does not verify. No plaintext is
/// returned on failure.
pub fn open(key: &DerivedKey, nonce: &[u8], sealed: &[u8]) -> TmtResult<Plaintext> {
    if sealed.len() < TAG_SIZE {
        return Err(DecryptError::malformed(format!(
            "sealed data too short: {} bytes (minimum {TAG_SIZE})",
            sealed.len()
        )));
    }

    let (ciphertext, tag) = sealed.split_at(sealed.len() - TAG_SIZE);
    let mut buffer = Zeroizing::new(ciphertext.to_vec());

    let verified = with_nonce_size!(nonce, key.as_bytes().into(), |cipher| {
        decrypt_detached(&cipher, nonce, &mut buffer, tag)
    })
    .ok_or_else(|| unsupported_nonce(nonce.len()))?;

    // `buffer` is zeroized on drop when verification fails
    verified.map_err(|_| DecryptError::AuthenticationFailure)?;

    tracing::debug!(bytes = buffer.len(), "container authenticated");
    Ok(Plaintext { bytes: buffer })
}

/// Encrypt `plaintext` and return `ciphertext || tag`, the inverse of [`open`].
///
/// Used to produce fixtures; the decryptor never calls it.
pub fn seal(key: &DerivedKey, nonce: &[u8], plaintext: &[u8]) -> TmtResult<Vec<u8>> {
    let mut buffer = plaintext.to_vec();

    let tag = with_nonce_size!(nonce, key.as_bytes().into(), |cipher| {
        encrypt_detached(&cipher, nonce, &mut buffer)
    })
    .ok_or_else(|| unsupported_nonce(nonce.len()))?
    .map_err(|_| DecryptError::malformed("plaintext too long for AES-GCM"))?;

    buffer.extend_from_slice(&tag);
    Ok(buffer)
}

fn unsupported_nonce(len: usize) -> DecryptError {
    if len == 0 {
        DecryptError::malformed("empty nonce")
    } else {
        DecryptError::malformed(format!(
            "unsupported nonce length: {len} bytes (maximum {MAX_NONCE_SIZE})"
        ))
    }
}

fn decrypt_detached<C: AeadInPlace>(
    cipher: &C,
    nonce: &[u8],
    buffer: &mut [u8],
    tag: &[u8],
) -> aead::Result<()> {
    cipher.decrypt_in_place_detached(
        aead::Nonce::<C>::from_slice(nonce),
        &[],
        buffer,
        aead::Tag::<C>::from_slice(tag),
    )
}

fn encrypt_detached<C: AeadInPlace>(
    cipher: &C,
    nonce: &[u8],
    buffer: &mut [u8],
) -> aead::Result<Vec<u8>> {
    cipher
        .encrypt_in_place_detached(aead::Nonce::<C>::from_slice(nonce), &[], buffer)
        .map(|tag| tag.to_vec())
}
