//! Shell logging bootstrap.
//!
//! # Responsibility
//! - Start the rolling file logger exactly once per process.
//! - Keep shell events metadata-only (`event=... module=... status=...`);
//!   notification bodies and client details never reach the log.
//!
//! # Invariants
//! - Repeating init with identical settings is a no-op.
//! - Init with different settings after a successful start is rejected.
//! - Nothing in this module panics.

use crate::config::ShellConfig;
use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming, WriteMode};
use log::{error, info};
use once_cell::sync::OnceCell;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

const LOG_FILE_BASENAME: &str = "caredesk";
const ROTATE_AT_BYTES: u64 = 5 * 1024 * 1024;
const KEPT_LOG_FILES: usize = 3;
const PANIC_PAYLOAD_LIMIT: usize = 120;

static ACTIVE_LOGGER: OnceCell<ActiveLogger> = OnceCell::new();
static PANIC_HOOK: OnceCell<()> = OnceCell::new();

struct ActiveLogger {
    settings: LogSettings,
    _handle: LoggerHandle,
}

/// Normalized logger settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    pub level: &'static str,
    pub dir: PathBuf,
}

impl LogSettings {
    /// Normalizes a level name and an absolute directory.
    pub fn new(level: &str, dir: impl AsRef<Path>) -> Result<Self, LoggingError> {
        let level = normalize_level(level).map_err(LoggingError::InvalidLevel)?;
        let dir = dir.as_ref();
        if dir.as_os_str().is_empty() {
            return Err(LoggingError::InvalidDirectory(
                "log directory must not be empty".to_string(),
            ));
        }
        if !dir.is_absolute() {
            return Err(LoggingError::InvalidDirectory(format!(
                "log directory must be absolute, got `{}`",
                dir.display()
            )));
        }
        Ok(Self {
            level,
            dir: dir.to_path_buf(),
        })
    }

    /// Takes the level from a validated shell config.
    pub fn from_config(config: &ShellConfig, dir: impl AsRef<Path>) -> Result<Self, LoggingError> {
        Self::new(config.log_level.as_str(), dir)
    }
}

/// Logger bootstrap errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoggingError {
    InvalidLevel(String),
    InvalidDirectory(String),
    AlreadyInitialized {
        active: LogSettings,
        requested: LogSettings,
    },
    Backend(String),
}

impl Display for LoggingError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidLevel(message) | Self::InvalidDirectory(message) => {
                write!(f, "{message}")
            }
            Self::AlreadyInitialized { active, requested } => write!(
                f,
                "logging already running at `{}` ({}); refusing to switch to `{}` ({})",
                active.dir.display(),
                active.level,
                requested.dir.display(),
                requested.level
            ),
            Self::Backend(message) => write!(f, "logger backend failed: {message}"),
        }
    }
}

impl Error for LoggingError {}

/// Starts file logging for the shell.
///
/// # Errors
/// - `AlreadyInitialized` when a logger with other settings is running.
/// - `Backend` when the directory cannot be created or the logger fails to start.
pub fn init_logging(settings: LogSettings) -> Result<(), LoggingError> {
    if let Some(active) = ACTIVE_LOGGER.get() {
        return ensure_same(&active.settings, settings);
    }

    let active = ACTIVE_LOGGER.get_or_try_init(|| start_logger(settings.clone()))?;
    ensure_same(&active.settings, settings)
}

/// Settings of the running logger, if any.
pub fn logging_status() -> Option<LogSettings> {
    ACTIVE_LOGGER.get().map(|active| active.settings.clone())
}

/// `debug` for debug builds, `info` for release builds.
pub fn default_log_level() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    }
}

pub(crate) fn normalize_level(level: &str) -> Result<&'static str, String> {
    match level.trim().to_ascii_lowercase().as_str() {
        "trace" => Ok("trace"),
        "debug" => Ok("debug"),
        "info" => Ok("info"),
        "warn" | "warning" => Ok("warn"),
        "error" => Ok("error"),
        other => Err(format!(
            "unsupported log level `{other}`; expected trace|debug|info|warn|error"
        )),
    }
}

fn ensure_same(active: &LogSettings, requested: LogSettings) -> Result<(), LoggingError> {
    if *active == requested {
        return Ok(());
    }
    Err(LoggingError::AlreadyInitialized {
        active: active.clone(),
        requested,
    })
}

fn start_logger(settings: LogSettings) -> Result<ActiveLogger, LoggingError> {
    std::fs::create_dir_all(&settings.dir).map_err(|err| {
        LoggingError::Backend(format!(
            "cannot create `{}`: {err}",
            settings.dir.display()
        ))
    })?;

    let handle = Logger::try_with_str(settings.level)
        .map_err(|err| LoggingError::Backend(err.to_string()))?
        .log_to_file(
            FileSpec::default()
                .directory(settings.dir.as_path())
                .basename(LOG_FILE_BASENAME),
        )
        .rotate(
            Criterion::Size(ROTATE_AT_BYTES),
            Naming::Numbers,
            Cleanup::KeepLogFiles(KEPT_LOG_FILES),
        )
        .write_mode(WriteMode::BufferAndFlush)
        .append()
        .format_for_files(flexi_logger::detailed_format)
        .start()
        .map_err(|err| LoggingError::Backend(err.to_string()))?;

    install_panic_hook();
    info!(
        "event=logging_init module=core status=ok level={} version={} os={}",
        settings.level,
        env!("CARGO_PKG_VERSION"),
        std::env::consts::OS
    );

    Ok(ActiveLogger {
        settings,
        _handle: handle,
    })
}

fn install_panic_hook() {
    if PANIC_HOOK.set(()).is_err() {
        return;
    }

    let previous = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        // Payload may carry client names typed into the shell; cap and flatten it.
        let location = panic_info
            .location()
            .map(|loc| format!("{}:{}", loc.file(), loc.line()))
            .unwrap_or_else(|| "unknown".to_string());
        let payload = panic_info
            .payload()
            .downcast_ref::<&str>()
            .map(|message| (*message).to_string())
            .or_else(|| panic_info.payload().downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "non-string panic payload".to_string());
        error!(
            "event=panic module=core status=error location={} payload={}",
            location,
            flatten_and_cap(&payload, PANIC_PAYLOAD_LIMIT)
        );
        previous(panic_info);
    }));
}

fn flatten_and_cap(value: &str, limit: usize) -> String {
    let flat = value.replace(['\n', '\r'], " ");
    if flat.chars().count() <= limit {
        return flat;
    }
    let mut capped = flat.chars().take(limit).collect::<String>();
    capped.push_str("...");
    capped
}

#[cfg(test)]
mod tests {
    use super::{flatten_and_cap, init_logging, logging_status, LogSettings, LoggingError};

    #[test]
    fn settings_normalize_level_and_reject_relative_dir() {
        let dir = std::env::temp_dir();
        let settings = LogSettings::new(" Warning ", &dir).expect("warning should normalize");
        assert_eq!(settings.level, "warn");

        let err = LogSettings::new("info", "logs/dev").expect_err("relative dir must fail");
        assert!(matches!(err, LoggingError::InvalidDirectory(_)));

        let err = LogSettings::new("chatty", &dir).expect_err("unknown level must fail");
        assert!(matches!(err, LoggingError::InvalidLevel(_)));
    }

    #[test]
    fn flatten_and_cap_strips_newlines() {
        assert_eq!(flatten_and_cap("a\nb", 10), "a b");
        assert_eq!(flatten_and_cap("abcdef", 3), "abc...");
    }

    #[test]
    fn init_is_idempotent_and_rejects_switching() {
        let first = tempfile::tempdir().expect("temp dir");
        let second = tempfile::tempdir().expect("temp dir");
        let settings = LogSettings::new("info", first.path()).expect("settings");

        init_logging(settings.clone()).expect("first init should succeed");
        init_logging(settings.clone()).expect("same settings should be idempotent");

        let other_level = LogSettings::new("debug", first.path()).expect("settings");
        let err = init_logging(other_level).expect_err("level switch must fail");
        assert!(err.to_string().contains("refusing to switch"));

        let other_dir = LogSettings::new("info", second.path()).expect("settings");
        assert!(matches!(
            init_logging(other_dir),
            Err(LoggingError::AlreadyInitialized { .. })
        ));

        assert_eq!(logging_status(), Some(settings));
    }
}
