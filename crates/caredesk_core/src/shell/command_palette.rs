//! Keyboard-invoked launch overlay.
//!
//! # Responsibility
//! - Toggle on Ctrl/Cmd+K while mounted.
//! - Filter destinations by label and hand the chosen one to the router.
//!
//! # Invariants
//! - Selection closes the overlay before navigating, and navigates once.
//! - Closing resets the query.

use crate::config::Platform;
use crate::model::command::CommandEntry;
use crate::routing::router::Router;
use crate::shell::input::{KeyEvent, ListenerKind, ListenerOwner, ListenerRegistry, ListenerSlot};
use log::debug;

/// Placeholder rendered when the filter matches nothing.
pub const NO_RESULTS_PLACEHOLDER: &str = "No results found.";
/// Heading of the destination group.
pub const NAVIGATE_HEADING: &str = "Navigate";
/// Placeholder of the query input.
pub const QUERY_PLACEHOLDER: &str = "Search pages and actions…";

/// Filtered palette content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaletteResults<'a> {
    Entries(Vec<&'a CommandEntry>),
    NoResults(&'static str),
}

impl<'a> PaletteResults<'a> {
    pub fn entries(&self) -> &[&'a CommandEntry] {
        match self {
            Self::Entries(entries) => entries,
            Self::NoResults(_) => &[],
        }
    }
}

#[derive(Debug, Clone)]
pub struct CommandPalette {
    entries: Vec<CommandEntry>,
    platform: Platform,
    open: bool,
    query: String,
    listener: ListenerSlot,
}

impl CommandPalette {
    pub fn new(entries: Vec<CommandEntry>, platform: Platform) -> Self {
        Self {
            entries,
            platform,
            open: false,
            query: String::new(),
            listener: ListenerSlot::default(),
        }
    }

    /// Attaches the global key listener for the shell lifetime.
    pub fn mount(&mut self, registry: &mut ListenerRegistry) {
        self.listener
            .attach(registry, ListenerKind::KeyDown, ListenerOwner::CommandPalette);
    }

    /// Detaches the listener and closes the overlay.
    pub fn unmount(&mut self, registry: &mut ListenerRegistry) {
        self.listener.detach(registry);
        self.close();
    }

    pub fn is_mounted(&self) -> bool {
        self.listener.is_attached()
    }

    /// Handles a document key press. Returns whether the key was consumed.
    pub fn handle_key(&mut self, event: &KeyEvent) -> bool {
        if !self.is_mounted() {
            return false;
        }
        if event.is_palette_chord() {
            self.toggle();
            return true;
        }
        if self.open && event.is_escape() {
            self.close();
            return true;
        }
        false
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
        self.query.clear();
    }

    pub fn toggle(&mut self) {
        if self.open {
            self.close();
        } else {
            self.open();
        }
        debug!(
            "event=palette_toggle module=shell status=ok open={}",
            self.open
        );
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    /// Entries whose label contains the query, case-insensitively.
    pub fn results(&self) -> PaletteResults<'_> {
        let matches = self
            .entries
            .iter()
            .filter(|entry| entry.matches(self.query.as_str()))
            .collect::<Vec<_>>();
        if matches.is_empty() {
            PaletteResults::NoResults(NO_RESULTS_PLACEHOLDER)
        } else {
            PaletteResults::Entries(matches)
        }
    }

    /// Closes the overlay, then navigates to the entry.
    pub fn select_entry(&mut self, entry: &CommandEntry, router: &mut dyn Router) {
        self.close();
        debug!(
            "event=palette_select module=shell status=ok destination={}",
            entry.destination
        );
        router.navigate(entry.destination.as_str());
    }

    /// Selects the `index`-th filtered result. Out-of-range indexes do nothing.
    pub fn select_index(&mut self, index: usize, router: &mut dyn Router) -> bool {
        let Some(entry) = self.results().entries().get(index).map(|entry| (*entry).clone())
        else {
            return false;
        };
        self.select_entry(&entry, router);
        true
    }

    /// Modifier label shown on the search trigger button.
    pub fn trigger_label(&self) -> String {
        format!("{}K", self.platform.modifier_label())
    }

    /// Disabled row listed under the "Shortcuts" heading.
    pub fn shortcut_hint(&self) -> &'static str {
        "Open search (⌘/Ctrl + K)"
    }
}
