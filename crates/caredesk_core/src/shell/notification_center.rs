//! Read/unread inbox behind the rail's "Inbox" trigger.
//!
//! # Responsibility
//! - Own the notification list and its single transition (unread to read).
//! - Partition items into unread and recent and render relative timestamps.
//!
//! # Invariants
//! - Items are never removed; marking read preserves the item count.
//! - `revision` increases once per state-changing call, never on no-ops.
//! - Relative times are computed from the `now` passed to `render`, never cached.

use crate::config::ShellConfig;
use crate::model::notification::{NotificationIcon, NotificationItem, NotificationTone};
use crate::repo::{PortResult, ReadPort};
use chrono::{FixedOffset, TimeZone};
use log::{debug, info};
use std::fmt::Write;

/// Placeholder of an empty unread partition.
pub const EMPTY_UNREAD_PLACEHOLDER: &str = "No unread notifications";
pub const MARK_ALL_LABEL: &str = "Mark all read";
pub const JUST_NOW: &str = "Just now";

const HOUR_MS: i64 = 60 * 60 * 1_000;
const DAY_MS: i64 = 24 * HOUR_MS;
const FALLBACK_DATE_FORMAT: &str = "%d/%m/%Y";

/// Popover tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InboxTab {
    #[default]
    Unread,
    Recent,
}

/// One rendered notification row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboxRow {
    pub id: String,
    pub title: String,
    pub message: String,
    pub sender: Option<String>,
    pub icon: NotificationIcon,
    pub tone: NotificationTone,
    pub time_label: String,
    pub read: bool,
}

/// Popover snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboxView {
    pub open: bool,
    pub tab: InboxTab,
    pub unread_count: usize,
    pub mark_all_label: Option<&'static str>,
    pub rows: Vec<InboxRow>,
    pub placeholder: Option<&'static str>,
}

#[derive(Debug, Clone)]
pub struct NotificationCenter {
    items: Vec<NotificationItem>,
    revision: u64,
    open: bool,
    tab: InboxTab,
    recent_limit: usize,
    offset: FixedOffset,
    date_format: String,
}

impl NotificationCenter {
    pub fn new(items: Vec<NotificationItem>, config: &ShellConfig) -> Self {
        Self {
            items,
            revision: 0,
            open: false,
            tab: InboxTab::default(),
            recent_limit: config.recent_limit,
            offset: config.utc_offset(),
            date_format: config.date_format.clone(),
        }
    }

    /// Loads every item from a feed.
    pub fn from_feed(
        feed: &dyn ReadPort<NotificationItem, Id = str>,
        config: &ShellConfig,
    ) -> PortResult<Self> {
        let items = feed.list()?;
        info!(
            "event=inbox_load module=shell status=ok items={}",
            items.len()
        );
        Ok(Self::new(items, config))
    }

    pub fn items(&self) -> &[NotificationItem] {
        &self.items
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Marks one item read. Unknown or already-read ids are no-ops.
    pub fn mark_read(&mut self, id: &str) -> bool {
        let changed = self
            .items
            .iter_mut()
            .find(|item| item.id == id)
            .map(NotificationItem::mark_read)
            .unwrap_or(false);
        if changed {
            self.revision += 1;
            debug!("event=inbox_mark_read module=shell status=ok id={id}");
        }
        changed
    }

    /// Marks every item read in one transition. Returns how many changed.
    pub fn mark_all_read(&mut self) -> usize {
        let changed = self
            .items
            .iter_mut()
            .map(NotificationItem::mark_read)
            .filter(|changed| *changed)
            .count();
        if changed > 0 {
            self.revision += 1;
            debug!("event=inbox_mark_all_read module=shell status=ok changed={changed}");
        }
        changed
    }

    /// Unread items in stored order.
    pub fn unread(&self) -> Vec<&NotificationItem> {
        self.items.iter().filter(|item| !item.read).collect()
    }

    /// Read items, newest first, capped at the recent limit.
    pub fn recent(&self) -> Vec<&NotificationItem> {
        let mut read = self
            .items
            .iter()
            .filter(|item| item.read)
            .collect::<Vec<_>>();
        read.sort_by(|left, right| right.created_at.cmp(&left.created_at));
        read.truncate(self.recent_limit);
        read
    }

    pub fn unread_count(&self) -> usize {
        self.items.iter().filter(|item| !item.read).count()
    }

    pub fn show_mark_all(&self) -> bool {
        self.unread_count() > 0
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn toggle(&mut self) {
        self.open = !self.open;
    }

    pub fn tab(&self) -> InboxTab {
        self.tab
    }

    pub fn select_tab(&mut self, tab: InboxTab) {
        self.tab = tab;
    }

    /// Click on an unread row.
    pub fn activate_row(&mut self, id: &str) -> bool {
        self.tab == InboxTab::Unread && self.mark_read(id)
    }

    pub fn render(&self, now_ms: i64) -> InboxView {
        let visible = match self.tab {
            InboxTab::Unread => self.unread(),
            InboxTab::Recent => self.recent(),
        };
        let placeholder = match self.tab {
            InboxTab::Unread if visible.is_empty() => Some(EMPTY_UNREAD_PLACEHOLDER),
            _ => None,
        };
        let rows = visible
            .into_iter()
            .map(|item| InboxRow {
                id: item.id.clone(),
                title: item.title.clone(),
                message: item.message.clone(),
                sender: item.sender.clone(),
                icon: item.category.icon(),
                tone: item.category.tone(),
                time_label: format_relative_time(
                    item.created_at,
                    now_ms,
                    self.offset,
                    self.date_format.as_str(),
                ),
                read: item.read,
            })
            .collect();

        InboxView {
            open: self.open,
            tab: self.tab,
            unread_count: self.unread_count(),
            mark_all_label: self.show_mark_all().then_some(MARK_ALL_LABEL),
            rows,
            placeholder,
        }
    }
}

/// Renders `created_at` relative to `now`, both epoch milliseconds.
///
/// Under an hour (or in the future) reads "Just now", under a day reads
/// "{n}h ago" with whole hours, anything older is a calendar date in `offset`.
pub fn format_relative_time(
    created_at: i64,
    now: i64,
    offset: FixedOffset,
    date_format: &str,
) -> String {
    let elapsed = now.saturating_sub(created_at);
    if elapsed < HOUR_MS {
        return JUST_NOW.to_string();
    }
    if elapsed < DAY_MS {
        return format!("{}h ago", elapsed / HOUR_MS);
    }

    let Some(at) = offset.timestamp_millis_opt(created_at).single() else {
        return JUST_NOW.to_string();
    };
    let mut out = String::new();
    if write!(out, "{}", at.format(date_format)).is_err() {
        out.clear();
        let _ = write!(out, "{}", at.format(FALLBACK_DATE_FORMAT));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::{format_relative_time, InboxTab, NotificationCenter, EMPTY_UNREAD_PLACEHOLDER};
    use crate::config::ShellConfig;
    use crate::repo::seed::sample_notifications;
    use chrono::FixedOffset;

    const HOUR: i64 = 3_600_000;
    // 2024-01-15 14:30 UTC
    const NOW: i64 = 1_705_329_000_000;

    fn awst() -> FixedOffset {
        FixedOffset::east_opt(8 * 3600).expect("offset")
    }

    #[test]
    fn relative_time_buckets() {
        assert_eq!(format_relative_time(NOW, NOW, awst(), "%d/%m/%Y"), "Just now");
        assert_eq!(
            format_relative_time(NOW - HOUR + 1, NOW, awst(), "%d/%m/%Y"),
            "Just now"
        );
        assert_eq!(format_relative_time(NOW - HOUR, NOW, awst(), "%d/%m/%Y"), "1h ago");
        assert_eq!(
            format_relative_time(NOW - 23 * HOUR - 59_000, NOW, awst(), "%d/%m/%Y"),
            "23h ago"
        );
        assert_eq!(
            format_relative_time(NOW + 5 * HOUR, NOW, awst(), "%d/%m/%Y"),
            "Just now"
        );
    }

    #[test]
    fn older_items_render_local_calendar_date() {
        // 2024-01-13 15:45 UTC is 23:45 the same day in Perth.
        let created = 1_705_160_700_000;
        assert_eq!(
            format_relative_time(created, NOW, awst(), "%d/%m/%Y"),
            "13/01/2024"
        );
        // 2024-01-13 20:00 UTC is already the 14th in Perth.
        let late = created + 4 * HOUR + 15 * 60_000;
        assert_eq!(format_relative_time(late, NOW + 2 * 24 * HOUR, awst(), "%d/%m/%Y"), "14/01/2024");
    }

    #[test]
    fn mark_read_bumps_revision_only_on_change() {
        let mut center = NotificationCenter::new(sample_notifications(), &ShellConfig::default());
        assert!(center.mark_read("1"));
        assert_eq!(center.revision(), 1);
        assert!(!center.mark_read("1"));
        assert!(!center.mark_read("missing"));
        assert_eq!(center.revision(), 1);
        assert_eq!(center.unread_count(), 1);
    }

    #[test]
    fn mark_all_read_is_one_transition() {
        let mut center = NotificationCenter::new(sample_notifications(), &ShellConfig::default());
        assert_eq!(center.mark_all_read(), 2);
        assert_eq!(center.revision(), 1);
        assert_eq!(center.mark_all_read(), 0);
        assert_eq!(center.revision(), 1);
        assert!(!center.show_mark_all());
    }

    #[test]
    fn recent_respects_limit() {
        let config = ShellConfig {
            recent_limit: 3,
            ..ShellConfig::default()
        };
        let center = NotificationCenter::new(sample_notifications(), &config);
        let ids = center
            .recent()
            .into_iter()
            .map(|item| item.id.as_str())
            .collect::<Vec<_>>();
        assert_eq!(ids, vec!["3", "4", "5"]);
    }

    #[test]
    fn render_shows_placeholder_once_unread_is_empty() {
        let mut center = NotificationCenter::new(sample_notifications(), &ShellConfig::default());
        let view = center.render(NOW);
        assert_eq!(view.tab, InboxTab::Unread);
        assert_eq!(view.rows.len(), 2);
        assert_eq!(view.rows[0].time_label, "Just now");
        assert_eq!(view.rows[1].time_label, "2h ago");
        assert_eq!(view.mark_all_label, Some("Mark all read"));

        assert!(center.activate_row("1"));
        assert!(center.activate_row("2"));
        let view = center.render(NOW);
        assert!(view.rows.is_empty());
        assert_eq!(view.placeholder, Some(EMPTY_UNREAD_PLACEHOLDER));
        assert_eq!(view.mark_all_label, None);
        assert_eq!(view.unread_count, 0);
    }
}
