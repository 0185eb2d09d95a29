//! Core state of the CareDesk application shell.
//! Navigation rail, command palette, entity tabs and inbox live here; hosts
//! only render the snapshots and feed input back in.

pub mod clock;
pub mod config;
pub mod logging;
pub mod model;
pub mod repo;
pub mod routing;
pub mod service;
pub mod shell;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{ConfigError, Platform, ShellConfig};
pub use logging::{default_log_level, init_logging, logging_status, LogSettings, LoggingError};
pub use model::command::{default_command_entries, CommandEntry};
pub use model::entity::{ClientId, ClientRecord, HouseId, HouseRecord};
pub use model::nav::{default_navigation, NavGroup, NavItem, NavTreeError};
pub use model::notification::{NotificationCategory, NotificationItem};
pub use repo::{PortError, PortResult, ReadPort};
pub use routing::route::{resolve, Resolution, Route};
pub use routing::router::{MemoryRouter, Router};
pub use service::detail_service::{DetailService, EntityKind, PageView};
pub use shell::app::{AppShell, ShellError, ShellEvent};
pub use shell::command_palette::CommandPalette;
pub use shell::nav_tree::{NavigationTree, RailMode};
pub use shell::notification_center::{format_relative_time, NotificationCenter};
pub use shell::tab_set::{EntityTabSet, TabSetError, TabSpec};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
