//! Extension → password lookup with a lenient default.
//!
//! Files produced by the encryption tool carry their password family in the
//! file extension (`.tmt`, `.tut`, ...). Unknown extensions are not an error:
//! resolution falls back to the default extension and reports the fallback so
//! the caller can warn the operator.

use secrecy::{ExposeSecret, SecretSlice};
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::{DecryptError, TmtResult};

/// Immutable extension → password mapping, built once at start-up.
#[derive(Debug)]
pub struct PasswordTable {
    passwords: BTreeMap<String, SecretSlice<u8>>,
    default_extension: String,
    default_password: SecretSlice<u8>,
}

/// Outcome of resolving a file path against the table.
#[derive(Debug)]
pub struct Resolved<'a> {
    /// Extension whose password was selected
    pub extension: &'a str,
    /// Extension found on the path when it was not in the table
    pub fallback_from: Option<String>,
    password: &'a SecretSlice<u8>,
}

impl Resolved<'_> {
    pub fn password(&self) -> &[u8] {
        self.password.expose_secret()
    }
}

impl PasswordTable {
    /// Build a table from `(extension, password)` pairs.
    ///
    /// Extensions are normalized to carry a leading dot. `default_extension`
    /// must be one of the entries.
    pub fn new<'e>(
        entries: impl IntoIterator<Item = (&'e str, Vec<u8>)>,
        default_extension: &str,
    ) -> TmtResult<Self> {
        let mut passwords = BTreeMap::new();
        for (ext, password) in entries {
            passwords.insert(normalize_extension(ext)?, SecretSlice::from(password));
        }

        let default_extension = normalize_extension(default_extension)?;
        let default_password = match passwords.get(&default_extension) {
            Some(password) => SecretSlice::from(password.expose_secret().to_vec()),
            None => {
                return Err(DecryptError::Config(format!(
                    "default extension {default_extension} has no password"
                )))
            }
        };

        Ok(Self {
            passwords,
            default_extension,
            default_password,
        })
    }

    pub fn default_extension(&self) -> &str {
        &self.default_extension
    }

    /// Known extensions in sorted order.
    pub fn extensions(&self) -> impl Iterator<Item = &str> {
        self.passwords.keys().map(String::as_str)
    }

    /// Select the password for `path` by its final extension.
    ///
    /// Matching is case-sensitive. A missing or unknown extension resolves
    /// to the default extension's password with `fallback_from` set.
    pub fn resolve(&self, path: &Path) -> Resolved<'_> {
        let extension = path
            .extension()
            .map(|e| format!(".{}", e.to_string_lossy()))
            .unwrap_or_default();

        if let Some((ext, password)) = self.passwords.get_key_value(&extension) {
            return Resolved {
                extension: ext,
                fallback_from: None,
                password,
            };
        }

        tracing::debug!(
            extension = %extension,
            default = %self.default_extension,
            "unknown file extension, using default password"
        );

        Resolved {
            extension: &self.default_extension,
            fallback_from: Some(extension),
            password: &self.default_password,
        }
    }
}

fn normalize_extension(ext: &str) -> TmtResult<String> {
    let bare = ext.strip_prefix('.').unwrap_or(ext);
    if bare.is_empty() || bare.contains(['.', '/', '\\']) {
        return Err(DecryptError::Config(format!("invalid extension {ext:?}")));
    }
    Ok(format!(".{bare}"))
}
