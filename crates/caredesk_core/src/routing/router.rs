//! Router port and in-process history implementation.
//!
//! # Responsibility
//! - Define the imperative/reactive routing capability the shell consumes.
//! - Provide a history-stack router for hosts without a browser location.
//!
//! # Invariants
//! - `current_path()` always reflects the last applied transition.
//! - Redirects replace the requested entry instead of stacking on it.

use crate::routing::route::{resolve, Route};
use log::debug;

/// Routing capability consumed by the rail and the palette.
pub trait Router {
    /// Imperative transition to `path`.
    fn navigate(&mut self, path: &str);

    /// Path currently rendered.
    fn current_path(&self) -> &str;
}

/// History-stack router.
#[derive(Debug, Clone)]
pub struct MemoryRouter {
    history: Vec<String>,
    cursor: usize,
}

impl MemoryRouter {
    /// Starts at `initial_path`, applying its redirect if any.
    pub fn new(initial_path: &str) -> Self {
        Self {
            history: vec![applied_path(initial_path)],
            cursor: 0,
        }
    }

    /// Route for the current path.
    pub fn current_route(&self) -> Route {
        resolve(self.current_path()).route
    }

    /// Steps back one entry. Returns whether the location changed.
    pub fn back(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        debug!(
            "event=router_back module=routing status=ok path={}",
            self.current_path()
        );
        true
    }

    /// Steps forward one entry. Returns whether the location changed.
    pub fn forward(&mut self) -> bool {
        if self.cursor + 1 >= self.history.len() {
            return false;
        }
        self.cursor += 1;
        debug!(
            "event=router_forward module=routing status=ok path={}",
            self.current_path()
        );
        true
    }

    /// Number of reachable history entries.
    pub fn history_len(&self) -> usize {
        self.history.len()
    }
}

impl Default for MemoryRouter {
    fn default() -> Self {
        Self::new("/")
    }
}

impl Router for MemoryRouter {
    fn navigate(&mut self, path: &str) {
        let applied = applied_path(path);
        self.history.truncate(self.cursor + 1);
        self.history.push(applied);
        self.cursor = self.history.len() - 1;
        debug!(
            "event=router_navigate module=routing status=ok requested={} path={}",
            path,
            self.current_path()
        );
    }

    fn current_path(&self) -> &str {
        self.history
            .get(self.cursor)
            .map(String::as_str)
            .unwrap_or("/")
    }
}

fn applied_path(path: &str) -> String {
    let resolution = resolve(path);
    if resolution.redirected_from.is_some() {
        resolution.route.path()
    } else {
        path.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::{MemoryRouter, Router};
    use crate::routing::route::Route;

    #[test]
    fn redirect_replaces_requested_entry() {
        let mut router = MemoryRouter::default();
        router.navigate("/scheduler");
        assert_eq!(router.current_path(), "/scheduler/roster");
        assert_eq!(router.history_len(), 2);
        assert_eq!(router.current_route(), Route::SchedulerRoster);
    }

    #[test]
    fn back_and_forward_walk_history() {
        let mut router = MemoryRouter::new("/clients");
        router.navigate("/sil");
        assert!(router.back());
        assert_eq!(router.current_path(), "/clients");
        assert!(!router.back());
        assert!(router.forward());
        assert_eq!(router.current_path(), "/sil");
        assert!(!router.forward());
    }

    #[test]
    fn navigate_after_back_drops_forward_entries() {
        let mut router = MemoryRouter::new("/");
        router.navigate("/sil");
        router.navigate("/staff");
        assert!(router.back());
        router.navigate("/jobs");
        assert_eq!(router.history_len(), 3);
        assert!(!router.forward());
    }
}
