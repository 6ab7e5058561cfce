use std::path::PathBuf;

use thiserror::Error;

pub type TmtResult<T> = Result<T, DecryptError>;

#[derive(Debug, Error)]
pub enum DecryptError {
    #[error("malformed container: {0}")]
    MalformedContainer(String),

    /// Tag verification failed: wrong password for the extension, a
    /// corrupted or tampered file, or a mismatched nonce.
    #[error("authentication failed (wrong password or corrupted file)")]
    AuthenticationFailure,

    #[error("decrypted data is not valid UTF-8: {0}")]
    Encoding(#[from] std::str::Utf8Error),

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("config error: {0}")]
    Config(String),
}

impl DecryptError {
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedContainer(msg.into())
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
