use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::{DecryptError, TmtResult};
use crate::passwords::PasswordTable;

/// Extension used when a file's extension has no entry in the password table
pub const DEFAULT_EXTENSION: &str = ".tmt";

/// Passwords shipped with the encryption tool, keyed by file extension
const BUILTIN_PASSWORDS: &[(&str, &str)] = &[
    (".tut", "fubvx788b46v"),
    (".sks", "dyv35224nossas!!"),
    (".cyh", "dyv35182!"),
    (".sex", "dYv35224nossas!."),
    (".tmt", "fubvx788B4mev"),
];

/// Top-level configuration (loaded from config.toml)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TmtConfig {
    pub keys: KeysConfig,
    pub log: LogConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct KeysConfig {
    /// Extension whose password is used for unknown extensions (default: .tmt)
    pub default_extension: String,
    /// Extension → password. Replaces the built-in table when present.
    pub passwords: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Log level (default: error)
    pub level: String,
    /// Log format: "json" or "text"
    pub format: String,
}

impl Default for KeysConfig {
    fn default() -> Self {
        Self {
            default_extension: DEFAULT_EXTENSION.into(),
            passwords: BUILTIN_PASSWORDS
                .iter()
                .map(|(ext, pw)| (ext.to_string(), pw.to_string()))
                .collect(),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "error".into(),
            format: "text".into(),
        }
    }
}

impl TmtConfig {
    /// Load the config file at `path`, falling back to defaults if it does not exist.
    pub fn load(path: &Path) -> TmtResult<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "config file not found, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| DecryptError::io(path, e))?;
        toml::from_str(&content)
            .map_err(|e| DecryptError::Config(format!("parsing {}: {e}", path.display())))
    }
}

impl KeysConfig {
    /// Build the immutable lookup table used during decryption.
    pub fn password_table(&self) -> TmtResult<PasswordTable> {
        PasswordTable::new(
            self.passwords
                .iter()
                .map(|(ext, pw)| (ext.as_str(), pw.as_bytes().to_vec())),
            &self.default_extension,
        )
    }
}
