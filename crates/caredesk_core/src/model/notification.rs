//! Inbox notification model.
//!
//! # Responsibility
//! - Define the canonical notification record rendered by the inbox popover.
//! - Provide the only lifecycle transition the shell performs (unread to read).
//!
//! # Invariants
//! - `id` is stable and unique within one feed.
//! - `read` never flips back to `false` once set.
//! - `created_at` is unix epoch milliseconds.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Severity bucket of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationCategory {
    Info,
    Warning,
    Success,
    Error,
}

/// Icon rendered next to a notification row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationIcon {
    Bell,
    Alert,
    Check,
}

/// Colour tone of a notification icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationTone {
    Info,
    Warning,
    Success,
    Destructive,
}

impl NotificationCategory {
    /// Icon shape used by the inbox rows.
    pub fn icon(self) -> NotificationIcon {
        match self {
            Self::Warning | Self::Error => NotificationIcon::Alert,
            Self::Success => NotificationIcon::Check,
            Self::Info => NotificationIcon::Bell,
        }
    }

    pub fn tone(self) -> NotificationTone {
        match self {
            Self::Info => NotificationTone::Info,
            Self::Warning => NotificationTone::Warning,
            Self::Success => NotificationTone::Success,
            Self::Error => NotificationTone::Destructive,
        }
    }
}

/// Canonical inbox record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationItem {
    pub id: String,
    pub title: String,
    pub message: String,
    /// Serialized as `type` to match the feed schema.
    #[serde(rename = "type")]
    pub category: NotificationCategory,
    pub created_at: i64,
    pub read: bool,
    pub sender: Option<String>,
}

impl NotificationItem {
    /// Creates an unread notification with a generated id.
    pub fn new(
        title: impl Into<String>,
        message: impl Into<String>,
        category: NotificationCategory,
        created_at: i64,
    ) -> Self {
        Self::with_id(
            Uuid::new_v4().to_string(),
            title,
            message,
            category,
            created_at,
        )
    }

    /// Creates an unread notification with a caller-provided id.
    ///
    /// Used by feeds where identity already exists externally.
    pub fn with_id(
        id: impl Into<String>,
        title: impl Into<String>,
        message: impl Into<String>,
        category: NotificationCategory,
        created_at: i64,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            message: message.into(),
            category,
            created_at,
            read: false,
            sender: None,
        }
    }

    pub fn from_sender(mut self, sender: impl Into<String>) -> Self {
        self.sender = Some(sender.into());
        self
    }

    pub fn already_read(mut self) -> Self {
        self.read = true;
        self
    }

    /// Marks this notification read. Returns whether state changed.
    pub fn mark_read(&mut self) -> bool {
        let changed = !self.read;
        self.read = true;
        changed
    }
}
