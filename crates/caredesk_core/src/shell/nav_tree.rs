//! Collapsible navigation rail.
//!
//! # Responsibility
//! - Hold per-group collapse flags and per-branch open state for both rail
//!   modes.
//! - Apply hover intent in the collapsed rail: reveal on enter, close after a
//!   delay on leave, cancel the close when the pointer comes back.
//! - Produce renderer-agnostic snapshots marking the current destination.
//!
//! # Invariants
//! - Expanded-rail open state and collapsed-rail flyout state are independent.
//! - Branch open flags are independent booleans, never accordion-exclusive.
//! - Every pending close is keyed by branch title with its own handle.
//! - Unknown titles and wrong-mode calls change nothing and report `false`.

use crate::model::nav::{
    validate_catalog, Badge, BadgeTone, NavGroup, NavIcon, NavItem, NavTreeError, PopoverTarget,
};
use crate::shell::deferred::{DeferredTasks, TaskHandle};
use crate::shell::input::{ListenerKind, ListenerOwner, ListenerRegistry, ListenerSlot};
use log::debug;
use serde::Serialize;
use std::collections::BTreeSet;

/// Layout of the rail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RailMode {
    /// Icons with labels; branches open inline.
    Expanded,
    /// Icons only; branches open as flyouts.
    Collapsed,
}

/// Navigation rail state machine.
#[derive(Debug, Clone)]
pub struct NavigationTree {
    groups: Vec<NavGroup>,
    branch_titles: BTreeSet<String>,
    mode: RailMode,
    hover_close_delay_ms: u64,
    collapsed_groups: BTreeSet<String>,
    open_branches: BTreeSet<String>,
    open_flyouts: BTreeSet<String>,
    pending_close: DeferredTasks<String>,
    listener: ListenerSlot,
}

impl NavigationTree {
    /// Builds a rail over a validated catalog, starting expanded.
    pub fn new(groups: Vec<NavGroup>, hover_close_delay_ms: u64) -> Result<Self, NavTreeError> {
        validate_catalog(&groups)?;
        let mut branch_titles = BTreeSet::new();
        for group in &groups {
            collect_branch_titles(&group.items, &mut branch_titles);
        }

        Ok(Self {
            groups,
            branch_titles,
            mode: RailMode::Expanded,
            hover_close_delay_ms,
            collapsed_groups: BTreeSet::new(),
            open_branches: BTreeSet::new(),
            open_flyouts: BTreeSet::new(),
            pending_close: DeferredTasks::new(),
            listener: ListenerSlot::default(),
        })
    }

    pub fn groups(&self) -> &[NavGroup] {
        &self.groups
    }

    pub fn mode(&self) -> RailMode {
        self.mode
    }

    /// Switches rail layout. Leaving the collapsed rail drops its flyouts.
    pub fn set_mode(&mut self, mode: RailMode) {
        if self.mode == mode {
            return;
        }
        if self.mode == RailMode::Collapsed {
            self.open_flyouts.clear();
            self.pending_close.clear();
        }
        self.mode = mode;
        debug!("event=nav_mode module=shell status=ok mode={mode:?}");
    }

    /// Registers the document click-outside listener.
    pub fn mount(&mut self, registry: &mut ListenerRegistry) {
        self.listener.attach(
            registry,
            ListenerKind::PointerDown,
            ListenerOwner::NavigationTree,
        );
    }

    /// Removes the listener and drops every pending close.
    pub fn unmount(&mut self, registry: &mut ListenerRegistry) {
        self.listener.detach(registry);
        let dropped = self.pending_close.clear();
        self.open_flyouts.clear();
        debug!("event=nav_unmount module=shell status=ok dropped_tasks={dropped}");
    }

    pub fn is_mounted(&self) -> bool {
        self.listener.is_attached()
    }

    /// Flips a group's expanded flag. Non-collapsible groups never change.
    pub fn toggle_group_collapse(&mut self, group_title: &str) -> bool {
        let Some(group) = self.groups.iter().find(|group| group.title == group_title) else {
            return false;
        };
        if !group.collapsible {
            return false;
        }
        if !self.collapsed_groups.remove(group_title) {
            self.collapsed_groups.insert(group_title.to_string());
        }
        true
    }

    /// Groups start expanded.
    pub fn is_group_expanded(&self, group_title: &str) -> bool {
        !self.collapsed_groups.contains(group_title)
    }

    /// Flips one inline sub-list in the expanded rail.
    pub fn toggle_branch_open(&mut self, node_title: &str) -> bool {
        if self.mode != RailMode::Expanded || !self.branch_titles.contains(node_title) {
            return false;
        }
        if !self.open_branches.remove(node_title) {
            self.open_branches.insert(node_title.to_string());
        }
        true
    }

    pub fn is_branch_open(&self, node_title: &str) -> bool {
        self.open_branches.contains(node_title)
    }

    /// Open inline branches, sorted by title.
    pub fn open_branches(&self) -> Vec<&str> {
        self.open_branches.iter().map(String::as_str).collect()
    }

    /// Pointer entered a branch in the collapsed rail.
    pub fn hover_open(&mut self, node_title: &str, now_ms: u64) -> bool {
        if !self.accepts_flyout(node_title) {
            return false;
        }
        let cancelled = self.pending_close.cancel(&node_title.to_string()).is_some();
        self.open_flyouts.insert(node_title.to_string());
        debug!(
            "event=nav_hover_open module=shell status=ok title={node_title} cancelled_close={cancelled} at_ms={now_ms}"
        );
        true
    }

    /// Pointer left a branch; the flyout closes after the hover delay.
    pub fn hover_close(&mut self, node_title: &str, now_ms: u64) -> Option<TaskHandle> {
        if !self.accepts_flyout(node_title) || !self.open_flyouts.contains(node_title) {
            return None;
        }
        let due_at = now_ms.saturating_add(self.hover_close_delay_ms);
        let handle = self.pending_close.schedule(node_title.to_string(), due_at);
        debug!("event=nav_hover_close module=shell status=scheduled title={node_title} due_at_ms={due_at}");
        Some(handle)
    }

    /// Pointer reached the flyout; any pending close is cancelled.
    pub fn flyout_enter(&mut self, node_title: &str, now_ms: u64) -> bool {
        if !self.open_flyouts.contains(node_title) {
            return false;
        }
        self.hover_open(node_title, now_ms)
    }

    /// Pointer left the flyout.
    pub fn flyout_leave(&mut self, node_title: &str, now_ms: u64) -> Option<TaskHandle> {
        self.hover_close(node_title, now_ms)
    }

    /// Touch input has no hover; it flips the flyout immediately.
    pub fn touch_toggle(&mut self, node_title: &str) -> bool {
        if !self.accepts_flyout(node_title) {
            return false;
        }
        self.pending_close.cancel(&node_title.to_string());
        if !self.open_flyouts.remove(node_title) {
            self.open_flyouts.insert(node_title.to_string());
        }
        true
    }

    /// Applies every close due at `now_ms`. Returns the closed titles.
    pub fn advance(&mut self, now_ms: u64) -> Vec<String> {
        let closed = self.pending_close.drain_due(now_ms);
        for title in &closed {
            self.open_flyouts.remove(title);
            debug!("event=nav_flyout_close module=shell status=ok title={title} at_ms={now_ms}");
        }
        closed
    }

    /// Document click outside the rail. Closes every collapsed-rail flyout.
    pub fn click_outside(&mut self) -> usize {
        if self.mode != RailMode::Collapsed {
            return 0;
        }
        let closed = self.open_flyouts.len();
        self.open_flyouts.clear();
        self.pending_close.clear();
        closed
    }

    pub fn is_flyout_open(&self, node_title: &str) -> bool {
        self.open_flyouts.contains(node_title)
    }

    pub fn has_pending_close(&self, node_title: &str) -> bool {
        self.pending_close.is_pending(&node_title.to_string())
    }

    pub fn pending_close_count(&self) -> usize {
        self.pending_close.len()
    }

    /// Children of an open flyout, in declaration order.
    pub fn flyout_items(&self, node_title: &str) -> Option<&[NavItem]> {
        if self.mode != RailMode::Collapsed || !self.open_flyouts.contains(node_title) {
            return None;
        }
        find_branch(&self.groups, node_title).map(NavItem::children)
    }

    /// First item titled `title`, searched depth-first in rail order.
    pub fn find_item(&self, title: &str) -> Option<&NavItem> {
        fn search<'a>(items: &'a [NavItem], title: &str) -> Option<&'a NavItem> {
            items.iter().find_map(|item| {
                if item.title() == title {
                    Some(item)
                } else {
                    search(item.children(), title)
                }
            })
        }
        self.groups
            .iter()
            .find_map(|group| search(&group.items, title))
    }

    /// Snapshot for the renderer.
    pub fn render(&self, current_path: &str, inbox_unread: usize) -> RailView {
        let groups = self
            .groups
            .iter()
            .map(|group| {
                let expanded = self.is_group_expanded(group.title.as_str());
                let (label, visible) = match self.mode {
                    RailMode::Expanded if group.show_label => {
                        (Some(group.title.clone()), expanded)
                    }
                    _ => (None, true),
                };
                let rows = if visible {
                    group
                        .items
                        .iter()
                        .map(|item| self.render_item(item, current_path, inbox_unread))
                        .collect()
                } else {
                    Vec::new()
                };
                GroupView {
                    title: group.title.clone(),
                    label,
                    collapsible: group.collapsible,
                    expanded,
                    rows,
                }
            })
            .collect();

        RailView {
            mode: self.mode,
            groups,
        }
    }

    fn render_item(&self, item: &NavItem, current_path: &str, inbox_unread: usize) -> RowView {
        match item {
            NavItem::Leaf {
                title,
                destination,
                icon,
                badge,
            } => RowView {
                title: title.clone(),
                icon: *icon,
                destination: Some(destination.clone()),
                badge: badge.clone().map(BadgeView::from),
                current: destination == current_path,
                kind: RowKind::Link,
                children: Vec::new(),
            },
            NavItem::Branch {
                title,
                icon,
                badge,
                summary_destination,
                children,
            } => {
                let open = match self.mode {
                    RailMode::Expanded => self.open_branches.contains(title),
                    RailMode::Collapsed => self.open_flyouts.contains(title),
                };
                let destination = match self.mode {
                    RailMode::Expanded => None,
                    RailMode::Collapsed => summary_destination.clone(),
                };
                let child_rows = if open {
                    children
                        .iter()
                        .map(|child| self.render_item(child, current_path, inbox_unread))
                        .collect()
                } else {
                    Vec::new()
                };
                RowView {
                    title: title.clone(),
                    icon: *icon,
                    current: destination.as_deref() == Some(current_path),
                    destination,
                    badge: badge.clone().map(BadgeView::from),
                    kind: RowKind::Branch { open },
                    children: child_rows,
                }
            }
            NavItem::Trigger {
                title,
                icon,
                target,
            } => RowView {
                title: title.clone(),
                icon: *icon,
                destination: None,
                badge: (inbox_unread > 0)
                    .then(|| BadgeView::from(Badge::new(inbox_unread.to_string()))),
                current: false,
                kind: RowKind::Popover { target: *target },
                children: Vec::new(),
            },
        }
    }

    fn accepts_flyout(&self, node_title: &str) -> bool {
        self.mode == RailMode::Collapsed && self.branch_titles.contains(node_title)
    }
}

fn collect_branch_titles(items: &[NavItem], titles: &mut BTreeSet<String>) {
    for item in items {
        if let NavItem::Branch { title, children, .. } = item {
            titles.insert(title.clone());
            collect_branch_titles(children, titles);
        }
    }
}

fn find_branch<'a>(groups: &'a [NavGroup], title: &str) -> Option<&'a NavItem> {
    fn search<'a>(items: &'a [NavItem], title: &str) -> Option<&'a NavItem> {
        items.iter().find_map(|item| match item {
            NavItem::Branch {
                title: candidate,
                children,
                ..
            } => {
                if candidate == title {
                    Some(item)
                } else {
                    search(children, title)
                }
            }
            _ => None,
        })
    }
    groups.iter().find_map(|group| search(&group.items, title))
}

/// Rendered rail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RailView {
    pub mode: RailMode,
    pub groups: Vec<GroupView>,
}

impl RailView {
    /// Titles of every row marked current, depth-first.
    pub fn current_titles(&self) -> Vec<&str> {
        fn walk<'a>(rows: &'a [RowView], out: &mut Vec<&'a str>) {
            for row in rows {
                if row.current {
                    out.push(row.title.as_str());
                }
                walk(&row.children, out);
            }
        }
        let mut out = Vec::new();
        for group in &self.groups {
            walk(&group.rows, &mut out);
        }
        out
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupView {
    pub title: String,
    /// Rendered label; `None` in the collapsed rail or for unlabeled groups.
    pub label: Option<String>,
    pub collapsible: bool,
    pub expanded: bool,
    pub rows: Vec<RowView>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BadgeView {
    pub label: String,
    pub tone: BadgeTone,
}

impl From<Badge> for BadgeView {
    fn from(value: Badge) -> Self {
        let tone = value.tone();
        Self {
            label: value.label,
            tone,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RowKind {
    Link,
    Branch { open: bool },
    Popover { target: PopoverTarget },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowView {
    pub title: String,
    pub icon: Option<NavIcon>,
    pub destination: Option<String>,
    pub badge: Option<BadgeView>,
    /// Destination equals the current path.
    pub current: bool,
    pub kind: RowKind,
    /// Inline sub-list or flyout content; empty while closed.
    pub children: Vec<RowView>,
}
