//! Shell configuration.
//!
//! # Responsibility
//! - Carry tunables for hover intent, inbox partitioning and date rendering.
//! - Parse host-provided JSON and validate it before any component is built.
//!
//! # Invariants
//! - Every field has a default; an empty JSON object is a valid config.
//! - A config that passed `validate()` never makes a component misbehave.

use crate::logging::normalize_level;
use chrono::format::{Item, StrftimeItems};
use chrono::{FixedOffset, Offset, Utc};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Delay before a hover-revealed flyout closes.
pub const DEFAULT_HOVER_CLOSE_DELAY_MS: u64 = 150;
/// Cap of the inbox "recent" partition.
pub const DEFAULT_RECENT_LIMIT: usize = 10;
/// Western Australia (AWST, UTC+8).
pub const DEFAULT_UTC_OFFSET_MINUTES: i32 = 8 * 60;
/// Calendar date format for notifications older than a day.
pub const DEFAULT_DATE_FORMAT: &str = "%d/%m/%Y";

const MAX_HOVER_CLOSE_DELAY_MS: u64 = 5_000;
const MAX_UTC_OFFSET_MINUTES: i32 = 14 * 60;

/// Host platform, used for shortcut labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    Mac,
    Other,
}

impl Platform {
    /// Platform of the running process.
    pub fn current() -> Self {
        if cfg!(target_os = "macos") {
            Self::Mac
        } else {
            Self::Other
        }
    }

    /// Modifier label shown on the search trigger.
    pub fn modifier_label(self) -> &'static str {
        match self {
            Self::Mac => "⌘",
            Self::Other => "Ctrl",
        }
    }
}

/// Tunables of the application shell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellConfig {
    pub hover_close_delay_ms: u64,
    pub recent_limit: usize,
    pub utc_offset_minutes: i32,
    pub date_format: String,
    pub platform: Platform,
    pub log_level: String,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            hover_close_delay_ms: DEFAULT_HOVER_CLOSE_DELAY_MS,
            recent_limit: DEFAULT_RECENT_LIMIT,
            utc_offset_minutes: DEFAULT_UTC_OFFSET_MINUTES,
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            platform: Platform::current(),
            log_level: crate::logging::default_log_level().to_string(),
        }
    }
}

impl ShellConfig {
    /// Parses and validates a JSON config document.
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks value ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.hover_close_delay_ms == 0 || self.hover_close_delay_ms > MAX_HOVER_CLOSE_DELAY_MS
        {
            return Err(ConfigError::InvalidHoverDelay(self.hover_close_delay_ms));
        }
        if self.recent_limit == 0 {
            return Err(ConfigError::InvalidRecentLimit);
        }
        if self.utc_offset_minutes.abs() > MAX_UTC_OFFSET_MINUTES {
            return Err(ConfigError::InvalidUtcOffset(self.utc_offset_minutes));
        }
        if self.date_format.trim().is_empty() {
            return Err(ConfigError::InvalidDateFormat(self.date_format.clone()));
        }
        if StrftimeItems::new(self.date_format.as_str()).any(|item| matches!(item, Item::Error)) {
            return Err(ConfigError::InvalidDateFormat(self.date_format.clone()));
        }
        normalize_level(self.log_level.as_str()).map_err(ConfigError::InvalidLogLevel)?;
        Ok(())
    }

    /// Offset used to render calendar dates. Falls back to UTC when out of range.
    pub fn utc_offset(&self) -> FixedOffset {
        FixedOffset::east_opt(self.utc_offset_minutes * 60).unwrap_or_else(|| Utc.fix())
    }
}

/// Config parse/validation errors.
#[derive(Debug)]
pub enum ConfigError {
    Parse(serde_json::Error),
    InvalidHoverDelay(u64),
    InvalidRecentLimit,
    InvalidUtcOffset(i32),
    InvalidDateFormat(String),
    InvalidLogLevel(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "invalid shell config: {err}"),
            Self::InvalidHoverDelay(value) => write!(
                f,
                "hover_close_delay_ms must be within 1..={MAX_HOVER_CLOSE_DELAY_MS}, got {value}"
            ),
            Self::InvalidRecentLimit => write!(f, "recent_limit must be greater than zero"),
            Self::InvalidUtcOffset(value) => write!(
                f,
                "utc_offset_minutes must be within ±{MAX_UTC_OFFSET_MINUTES}, got {value}"
            ),
            Self::InvalidDateFormat(value) => write!(f, "date_format is invalid: `{value}`"),
            Self::InvalidLogLevel(message) => write!(f, "{message}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
            _ => None,
        }
    }
}
