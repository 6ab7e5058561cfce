//! Writing decrypted plaintext to a file or to stdout.
//!
//! Overwrite confirmation is injected as a callback so this module never
//! talks to the terminal itself.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use tmt_core::{DecryptError, TmtResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    Written,
    /// The target existed and the operator declined to overwrite it
    Declined,
}

/// Write `bytes` to `path`, asking `confirm_overwrite` first if a regular
/// file is already there.
pub fn write_file<F>(path: &Path, bytes: &[u8], mut confirm_overwrite: F) -> TmtResult<WriteOutcome>
where
    F: FnMut(&Path) -> io::Result<bool>,
{
    if path.is_file() {
        let confirmed = confirm_overwrite(path).map_err(|e| DecryptError::io(path, e))?;
        if !confirmed {
            tracing::info!(path = %path.display(), "overwrite declined");
            return Ok(WriteOutcome::Declined);
        }
    }

    let mut file = File::create(path).map_err(|e| DecryptError::io(path, e))?;
    file.write_all(bytes)
        .and_then(|()| file.flush())
        .map_err(|e| DecryptError::io(path, e))?;

    tracing::debug!(path = %path.display(), bytes = bytes.len(), "plaintext written");
    Ok(WriteOutcome::Written)
}

/// Write `text` to `out` and flush.
pub fn write_text<W: Write>(out: &mut W, text: &str) -> TmtResult<()> {
    out.write_all(text.as_bytes())
        .and_then(|()| out.flush())
        .map_err(|e| DecryptError::io("<stdout>", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_new_file_does_not_ask() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("out.txt");

        let outcome = write_file(&path, b"plaintext", |_| {
            panic!("must not ask for a new file")
        })
        .unwrap();

        assert_eq!(outcome, WriteOutcome::Written);
        assert_eq!(std::fs::read(&path).unwrap(), b"plaintext");
    }

    #[test]
    fn test_overwrite_confirmed() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("out.txt");
        std::fs::write(&path, b"old contents that are longer").unwrap();

        let mut asked = Vec::new();
        let outcome = write_file(&path, b"new", |p| {
            asked.push(p.to_path_buf());
            Ok(true)
        })
        .unwrap();

        assert_eq!(outcome, WriteOutcome::Written);
        assert_eq!(asked, vec![path.clone()]);
        assert_eq!(std::fs::read(&path).unwrap(), b"new");
    }

    #[test]
    fn test_overwrite_declined_leaves_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("out.txt");
        std::fs::write(&path, b"keep me").unwrap();

        let outcome = write_file(&path, b"new", |_| Ok(false)).unwrap();

        assert_eq!(outcome, WriteOutcome::Declined);
        assert_eq!(std::fs::read(&path).unwrap(), b"keep me");
    }

    #[test]
    fn test_confirmation_error_is_io() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("out.txt");
        std::fs::write(&path, b"keep me").unwrap();

        let result = write_file(&path, b"new", |_| {
            Err(io::Error::new(io::ErrorKind::UnexpectedEof, "stdin closed"))
        });

        assert!(matches!(result, Err(DecryptError::Io { .. })));
        assert_eq!(std::fs::read(&path).unwrap(), b"keep me");
    }

    #[test]
    fn test_directory_target_is_io_error() {
        let tmp = TempDir::new().unwrap();

        let result = write_file(tmp.path(), b"data", |_| {
            panic!("directories are not confirmed")
        });

        assert!(matches!(result, Err(DecryptError::Io { .. })));
    }

    #[test]
    fn test_write_raw_bytes() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("out.bin");
        let bytes = [0xffu8, 0x00, 0xfe];

        write_file(&path, &bytes, |_| Ok(true)).unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), bytes);
    }

    #[test]
    fn test_write_text() {
        let mut out = Vec::new();
        write_text(&mut out, "hello").unwrap();
        assert_eq!(out, b"hello");
    }
}
