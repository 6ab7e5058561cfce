//! tmt-core: shared error kinds, configuration schema, and the
//! extension → password table used by the decryption pipeline.

pub mod config;
pub mod error;
pub mod passwords;

pub use config::{KeysConfig, LogConfig, TmtConfig, DEFAULT_EXTENSION};
pub use error::{DecryptError, TmtResult};
pub use passwords::{PasswordTable, Resolved};
