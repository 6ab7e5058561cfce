//! tmt-decrypt: decrypt tmtcrypt containers
//!
//! Usage:
//!   tmt-decrypt <FILE>                 - print decrypted text to stdout
//!   tmt-decrypt <FILE> -o <PATH>       - write decrypted bytes to PATH
//!
//! The password is picked by FILE's extension; unknown extensions fall back
//! to the default extension with a warning.

mod output;
mod ui;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use output::WriteOutcome;
use tmt_core::TmtConfig;

// ── CLI structure ──────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(
    name = "tmt-decrypt",
    version,
    about = "Decrypt tmtcrypt container files",
    long_about = "tmt-decrypt: decrypt salt.nonce.ciphertext containers with the password for their extension"
)]
struct Cli {
    /// File to decrypt
    file: PathBuf,

    /// File to write the decrypted bytes to
    #[arg(long, short = 'o')]
    output: Option<PathBuf>,

    /// Write the decrypted text to stdout (default)
    #[arg(long, short = 'O', conflicts_with = "output")]
    stdout: bool,

    /// Path to config.toml
    #[arg(
        long,
        short = 'c',
        env = "TMT_CONFIG",
        default_value = "~/.config/tmtcrypt/config.toml"
    )]
    config: PathBuf,

    /// Log level (trace, debug, info, warn, error); overrides the config file
    #[arg(long, env = "TMT_LOG")]
    log: Option<String>,

    /// Log format (json, text); overrides the config file
    #[arg(long, env = "TMT_LOG_FORMAT")]
    log_format: Option<LogFormat>,
}

#[derive(Clone, Debug, ValueEnum)]
enum LogFormat {
    Json,
    Text,
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            ui::error(&format!("{e:#}"));
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config_path = expand_tilde(&cli.config);
    let config = TmtConfig::load(&config_path)
        .with_context(|| format!("loading config: {}", config_path.display()))?;

    let level = cli.log.as_deref().unwrap_or(&config.log.level);
    let format = cli
        .log_format
        .clone()
        .unwrap_or_else(|| parse_log_format(&config.log.format));
    init_logging(level, &format);

    tracing::debug!(
        version = env!("CARGO_PKG_VERSION"),
        file = %cli.file.display(),
        stdout = cli.stdout || cli.output.is_none(),
        "tmt-decrypt starting"
    );

    let table = config.keys.password_table()?;
    tracing::debug!(
        extensions = ?table.extensions().collect::<Vec<_>>(),
        default = table.default_extension(),
        "password table loaded"
    );
    let resolved = table.resolve(&cli.file);
    if resolved.fallback_from.is_some() {
        ui::warn(&format!(
            "Unknown file extension, defaulting to {}",
            table.default_extension()
        ));
    }

    let plaintext = tmt_crypto::decrypt_file(&cli.file, resolved.password())?;

    match cli.output {
        Some(path) => {
            let outcome = output::write_file(&path, plaintext.as_bytes(), |p| {
                let answer = ui::ask(&format!(
                    "A file named \"{}\" already exists. Overwrite it? (y/n)",
                    p.display()
                ))?;
                Ok(ui::is_yes(&answer))
            })?;
            if outcome == WriteOutcome::Declined {
                tracing::debug!(path = %path.display(), "output left untouched");
            }
        }
        None => {
            let text = plaintext.into_text()?;
            output::write_text(&mut std::io::stdout().lock(), &text)?;
        }
    }

    Ok(())
}

// ── Config / logging ──────────────────────────────────────────────────────────

/// Expand `~` in path to the user's home directory
fn expand_tilde(path: &Path) -> PathBuf {
    let s = path.to_string_lossy();
    if let Some(rest) = s.strip_prefix("~/") {
        let home = std::env::var("HOME").unwrap_or_default();
        PathBuf::from(home).join(rest)
    } else {
        path.to_path_buf()
    }
}

fn parse_log_format(format: &str) -> LogFormat {
    if format.eq_ignore_ascii_case("json") {
        LogFormat::Json
    } else {
        LogFormat::Text
    }
}

fn init_logging(level: &str, format: &LogFormat) {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    // stdout carries plaintext only
    match format {
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        LogFormat::Text => {
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_output_modes_conflict() {
        let result = Cli::try_parse_from(["tmt-decrypt", "in.tmt", "-o", "out.txt", "-O"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_stdout_is_default() {
        let cli = Cli::try_parse_from(["tmt-decrypt", "in.tmt"]).unwrap();
        assert!(cli.output.is_none());
        assert_eq!(cli.file, PathBuf::from("in.tmt"));
    }

    #[test]
    fn test_output_flag() {
        let cli = Cli::try_parse_from(["tmt-decrypt", "in.tmt", "--output", "out.txt"]).unwrap();
        assert_eq!(cli.output, Some(PathBuf::from("out.txt")));
    }

    #[test]
    fn test_expand_tilde() {
        let home = std::env::var("HOME").unwrap_or_default();
        assert_eq!(
            expand_tilde(Path::new("~/.config/tmtcrypt/config.toml")),
            PathBuf::from(home).join(".config/tmtcrypt/config.toml")
        );
        assert_eq!(
            expand_tilde(Path::new("/etc/tmtcrypt.toml")),
            PathBuf::from("/etc/tmtcrypt.toml")
        );
    }

    #[test]
    fn test_parse_log_format() {
        assert!(matches!(parse_log_format("json"), LogFormat::Json));
        assert!(matches!(parse_log_format("JSON"), LogFormat::Json));
        assert!(matches!(parse_log_format("text"), LogFormat::Text));
        assert!(matches!(parse_log_format("other"), LogFormat::Text));
    }
}
