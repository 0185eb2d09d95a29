//! One entity, several named views.
//!
//! # Responsibility
//! - Keep exactly one active tab over an entity that is built once.
//! - Keep tab-local state per tab without leaking it to siblings.
//!
//! # Invariants
//! - Tab keys are non-blank and unique; the first declared tab is the default.
//! - Switching tabs never rebuilds the entity and never blocks.
//! - Tabs stay mounted once visited: hidden tabs keep their local state until
//!   the whole set is dropped.

use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Pure view function of one tab.
pub type TabRender<E, S, V> = Box<dyn Fn(&E, &S) -> V>;

/// Declared tab.
pub struct TabSpec<E, S, V> {
    key: String,
    label: String,
    render: TabRender<E, S, V>,
}

impl<E, S, V> TabSpec<E, S, V> {
    pub fn new(
        key: impl Into<String>,
        label: impl Into<String>,
        render: impl Fn(&E, &S) -> V + 'static,
    ) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            render: Box::new(render),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}

/// Tab strip entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabHeader<'a> {
    pub key: &'a str,
    pub label: &'a str,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TabSetError {
    NoTabs,
    BlankKey,
    DuplicateKey(String),
    UnknownTab(String),
}

impl Display for TabSetError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoTabs => write!(f, "tab set needs at least one tab"),
            Self::BlankKey => write!(f, "tab key must not be blank"),
            Self::DuplicateKey(key) => write!(f, "tab key is duplicated: {key}"),
            Self::UnknownTab(key) => write!(f, "tab not found: {key}"),
        }
    }
}

impl Error for TabSetError {}

/// Entity presented through named tabs with per-tab local state `S`.
pub struct EntityTabSet<E, S, V> {
    entity: E,
    tabs: Vec<TabSpec<E, S, V>>,
    active: usize,
    mounted: BTreeMap<String, S>,
}

impl<E, S: Default, V> EntityTabSet<E, S, V> {
    /// Builds the set with the first tab active.
    pub fn new(entity: E, tabs: Vec<TabSpec<E, S, V>>) -> Result<Self, TabSetError> {
        if tabs.is_empty() {
            return Err(TabSetError::NoTabs);
        }
        let mut keys = BTreeMap::new();
        for tab in &tabs {
            if tab.key.trim().is_empty() {
                return Err(TabSetError::BlankKey);
            }
            if keys.insert(tab.key.as_str(), ()).is_some() {
                return Err(TabSetError::DuplicateKey(tab.key.clone()));
            }
        }

        let mut set = Self {
            entity,
            tabs,
            active: 0,
            mounted: BTreeMap::new(),
        };
        set.mount_active();
        Ok(set)
    }

    /// Overrides the initial tab.
    pub fn with_active(mut self, key: &str) -> Result<Self, TabSetError> {
        self.select(key)?;
        Ok(self)
    }

    pub fn entity(&self) -> &E {
        &self.entity
    }

    pub fn active_key(&self) -> &str {
        self.tabs
            .get(self.active)
            .map(TabSpec::key)
            .unwrap_or_default()
    }

    pub fn headers(&self) -> Vec<TabHeader<'_>> {
        self.tabs
            .iter()
            .enumerate()
            .map(|(index, tab)| TabHeader {
                key: tab.key.as_str(),
                label: tab.label.as_str(),
                active: index == self.active,
            })
            .collect()
    }

    pub fn keys(&self) -> Vec<&str> {
        self.tabs.iter().map(TabSpec::key).collect()
    }

    /// Activates `key`. Unknown keys leave the set untouched.
    pub fn select(&mut self, key: &str) -> Result<(), TabSetError> {
        let index = self
            .tabs
            .iter()
            .position(|tab| tab.key == key)
            .ok_or_else(|| TabSetError::UnknownTab(key.to_string()))?;
        self.active = index;
        self.mount_active();
        Ok(())
    }

    /// Local state of a visited tab.
    pub fn local_state(&self, key: &str) -> Option<&S> {
        self.mounted.get(key)
    }

    /// Local state of the active tab.
    pub fn active_state_mut(&mut self) -> &mut S {
        let key = self.active_key().to_string();
        self.mounted.entry(key).or_default()
    }

    /// Keys whose state is alive, sorted.
    pub fn mounted_keys(&self) -> Vec<&str> {
        self.mounted.keys().map(String::as_str).collect()
    }

    /// Renders the active tab.
    pub fn render_active(&self) -> Option<V> {
        let tab = self.tabs.get(self.active)?;
        let view = match self.mounted.get(tab.key.as_str()) {
            Some(state) => (tab.render)(&self.entity, state),
            None => (tab.render)(&self.entity, &S::default()),
        };
        Some(view)
    }

    fn mount_active(&mut self) {
        let key = self.active_key().to_string();
        self.mounted.entry(key).or_default();
    }
}
