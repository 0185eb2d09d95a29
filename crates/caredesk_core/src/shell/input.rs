//! Global input events and mount-scoped listener registration.
//!
//! # Responsibility
//! - Model document-level input the shell receives from its host.
//! - Track which mounted component listens to which global event kind.
//!
//! # Invariants
//! - A component holds at most one listener id per kind; mounting twice does
//!   not register twice.
//! - Unmounting removes the listener, so no event reaches a torn-down component.

use std::collections::BTreeMap;

/// Document-level key press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: String,
    pub ctrl: bool,
    pub meta: bool,
    pub shift: bool,
}

impl KeyEvent {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ctrl: false,
            meta: false,
            shift: false,
        }
    }

    pub fn with_ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }

    pub fn with_meta(mut self) -> Self {
        self.meta = true;
        self
    }

    pub fn with_shift(mut self) -> Self {
        self.shift = true;
        self
    }

    /// Ctrl+K or Cmd+K, key compared case-insensitively.
    pub fn is_palette_chord(&self) -> bool {
        (self.ctrl || self.meta) && self.key.eq_ignore_ascii_case("k")
    }

    pub fn is_escape(&self) -> bool {
        self.key == "Escape"
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ListenerKind {
    KeyDown,
    PointerDown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ListenerOwner {
    CommandPalette,
    NavigationTree,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ListenerId(u64);

/// Registry of global listeners for the lifetime of one shell.
#[derive(Debug, Clone)]
pub struct ListenerRegistry {
    entries: BTreeMap<ListenerId, (ListenerKind, ListenerOwner)>,
    next_id: u64,
}

impl Default for ListenerRegistry {
    fn default() -> Self {
        Self {
            entries: BTreeMap::new(),
            next_id: 1,
        }
    }
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, kind: ListenerKind, owner: ListenerOwner) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.entries.insert(id, (kind, owner));
        id
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.entries.remove(&id).is_some()
    }

    pub fn is_subscribed(&self, kind: ListenerKind, owner: ListenerOwner) -> bool {
        self.entries
            .values()
            .any(|entry| *entry == (kind, owner))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Mount-scoped listener slot held by a component.
#[derive(Debug, Clone, Default)]
pub struct ListenerSlot {
    id: Option<ListenerId>,
}

impl ListenerSlot {
    /// Subscribes once. Returns whether a new listener was registered.
    pub fn attach(
        &mut self,
        registry: &mut ListenerRegistry,
        kind: ListenerKind,
        owner: ListenerOwner,
    ) -> bool {
        if self.id.is_some() {
            return false;
        }
        self.id = Some(registry.subscribe(kind, owner));
        true
    }

    /// Unsubscribes. Returns whether a listener was removed.
    pub fn detach(&mut self, registry: &mut ListenerRegistry) -> bool {
        match self.id.take() {
            Some(id) => registry.unsubscribe(id),
            None => false,
        }
    }

    pub fn is_attached(&self) -> bool {
        self.id.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::{KeyEvent, ListenerKind, ListenerOwner, ListenerRegistry, ListenerSlot};

    #[test]
    fn palette_chord_accepts_ctrl_or_meta_any_case() {
        assert!(KeyEvent::new("k").with_ctrl().is_palette_chord());
        assert!(KeyEvent::new("K").with_meta().is_palette_chord());
        assert!(!KeyEvent::new("k").is_palette_chord());
        assert!(!KeyEvent::new("j").with_ctrl().is_palette_chord());
    }

    #[test]
    fn slot_attaches_once_and_detaches() {
        let mut registry = ListenerRegistry::new();
        let mut slot = ListenerSlot::default();

        assert!(slot.attach(
            &mut registry,
            ListenerKind::KeyDown,
            ListenerOwner::CommandPalette
        ));
        assert!(!slot.attach(
            &mut registry,
            ListenerKind::KeyDown,
            ListenerOwner::CommandPalette
        ));
        assert_eq!(registry.len(), 1);
        assert!(registry.is_subscribed(ListenerKind::KeyDown, ListenerOwner::CommandPalette));
        assert!(!registry.is_subscribed(ListenerKind::PointerDown, ListenerOwner::CommandPalette));

        assert!(slot.detach(&mut registry));
        assert!(!slot.detach(&mut registry));
        assert!(registry.is_empty());
    }
}
