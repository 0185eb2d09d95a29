//! Shell composition root.
//!
//! # Responsibility
//! - Own the router, the rail, the palette, the inbox and the content page.
//! - Route global input to the components that registered for it.
//! - Sample the injected clock and pass explicit time down.
//!
//! # Invariants
//! - Global events reach a component only while its listener is registered.
//! - The content page is rebuilt only when the current path changes, so tab
//!   selection and tab-local state survive unrelated shell activity.

use crate::clock::Clock;
use crate::config::{ConfigError, ShellConfig};
use crate::model::command::default_command_entries;
use crate::model::entity::{ClientId, ClientRecord, HouseId, HouseRecord};
use crate::model::nav::{default_navigation, NavItem, NavTreeError, PopoverTarget};
use crate::model::notification::NotificationItem;
use crate::repo::memory::{
    InMemoryClientDirectory, InMemoryHouseDirectory, InMemoryNotificationFeed,
};
use crate::repo::seed::{sample_clients, sample_houses, sample_notifications};
use crate::repo::{PortError, ReadPort};
use crate::routing::route::resolve;
use crate::routing::router::Router;
use crate::service::detail_service::{DetailService, PageView};
use crate::shell::command_palette::CommandPalette;
use crate::shell::input::{KeyEvent, ListenerKind, ListenerOwner, ListenerRegistry};
use crate::shell::nav_tree::{NavigationTree, RailMode, RailView};
use crate::shell::notification_center::{InboxView, NotificationCenter};
use log::{debug, info};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Global input delivered by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellEvent {
    KeyDown(KeyEvent),
    /// Pointer pressed outside the rail and its flyouts.
    PointerDownOutside,
    /// Timer poll; fires due hover closes.
    Tick,
}

/// Shell construction errors.
#[derive(Debug)]
pub enum ShellError {
    Config(ConfigError),
    Navigation(NavTreeError),
    Port(PortError),
}

impl Display for ShellError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(err) => write!(f, "{err}"),
            Self::Navigation(err) => write!(f, "{err}"),
            Self::Port(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ShellError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(err) => Some(err),
            Self::Navigation(err) => Some(err),
            Self::Port(err) => Some(err),
        }
    }
}

impl From<ConfigError> for ShellError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<NavTreeError> for ShellError {
    fn from(value: NavTreeError) -> Self {
        Self::Navigation(value)
    }
}

impl From<PortError> for ShellError {
    fn from(value: PortError) -> Self {
        Self::Port(value)
    }
}

/// Application shell over a router `R` and client/house read ports.
pub struct AppShell<R, C = InMemoryClientDirectory, H = InMemoryHouseDirectory>
where
    R: Router,
    C: ReadPort<ClientRecord, Id = ClientId>,
    H: ReadPort<HouseRecord, Id = HouseId>,
{
    router: R,
    nav: NavigationTree,
    palette: CommandPalette,
    inbox: NotificationCenter,
    listeners: ListenerRegistry,
    details: DetailService<C, H>,
    clock: Box<dyn Clock>,
    page: Option<(String, PageView)>,
}

impl<R: Router> AppShell<R> {
    /// Shell over the console's sample clients, houses and notifications.
    pub fn with_sample_data(
        config: &ShellConfig,
        router: R,
        clock: Box<dyn Clock>,
    ) -> Result<Self, ShellError> {
        let details = DetailService::new(
            InMemoryClientDirectory::try_new(sample_clients())?,
            InMemoryHouseDirectory::try_new(sample_houses())?,
        );
        let feed = InMemoryNotificationFeed::try_new(sample_notifications())?;
        Self::new(config, router, details, &feed, clock)
    }
}

impl<R, C, H> AppShell<R, C, H>
where
    R: Router,
    C: ReadPort<ClientRecord, Id = ClientId>,
    H: ReadPort<HouseRecord, Id = HouseId>,
{
    /// Builds the shell, loading the inbox once from `notifications`.
    pub fn new(
        config: &ShellConfig,
        router: R,
        details: DetailService<C, H>,
        notifications: &dyn ReadPort<NotificationItem, Id = str>,
        clock: Box<dyn Clock>,
    ) -> Result<Self, ShellError> {
        config.validate()?;
        let nav = NavigationTree::new(default_navigation(), config.hover_close_delay_ms)?;
        let inbox = NotificationCenter::from_feed(notifications, config)?;
        Ok(Self {
            router,
            nav,
            palette: CommandPalette::new(default_command_entries(), config.platform),
            inbox,
            listeners: ListenerRegistry::new(),
            details,
            clock,
            page: None,
        })
    }

    /// Registers global listeners. Mounting twice registers nothing new.
    pub fn mount(&mut self) {
        self.nav.mount(&mut self.listeners);
        self.palette.mount(&mut self.listeners);
        info!(
            "event=shell_mount module=shell status=ok listeners={}",
            self.listeners.len()
        );
    }

    /// Removes global listeners and drops pending hover closes.
    pub fn unmount(&mut self) {
        self.nav.unmount(&mut self.listeners);
        self.palette.unmount(&mut self.listeners);
        self.inbox.close();
        info!(
            "event=shell_unmount module=shell status=ok listeners={}",
            self.listeners.len()
        );
    }

    pub fn is_mounted(&self) -> bool {
        self.nav.is_mounted() && self.palette.is_mounted()
    }

    /// Delivers one global event. Returns whether any state changed.
    pub fn handle_event(&mut self, event: ShellEvent) -> bool {
        match event {
            ShellEvent::KeyDown(key) => {
                self.listeners
                    .is_subscribed(ListenerKind::KeyDown, ListenerOwner::CommandPalette)
                    && self.palette.handle_key(&key)
            }
            ShellEvent::PointerDownOutside => {
                let nav_closed = if self
                    .listeners
                    .is_subscribed(ListenerKind::PointerDown, ListenerOwner::NavigationTree)
                {
                    self.nav.click_outside()
                } else {
                    0
                };
                let inbox_was_open = self.inbox.is_open();
                self.inbox.close();
                nav_closed > 0 || inbox_was_open
            }
            ShellEvent::Tick => !self.nav.advance(self.clock.monotonic_ms()).is_empty(),
        }
    }

    pub fn navigate(&mut self, path: &str) {
        self.router.navigate(path);
    }

    pub fn current_path(&self) -> &str {
        self.router.current_path()
    }

    /// Activates a rail row by title: leaves navigate, branches open, the
    /// inbox trigger toggles its popover.
    pub fn activate(&mut self, title: &str) -> bool {
        let Some(item) = self.nav.find_item(title).cloned() else {
            return false;
        };
        match item {
            NavItem::Leaf { destination, .. } => {
                self.router.navigate(destination.as_str());
                true
            }
            NavItem::Branch { .. } => match self.nav.mode() {
                RailMode::Expanded => self.nav.toggle_branch_open(title),
                RailMode::Collapsed => self.nav.touch_toggle(title),
            },
            NavItem::Trigger {
                target: PopoverTarget::Inbox,
                ..
            } => {
                self.inbox.toggle();
                true
            }
        }
    }

    /// Pointer entered a rail branch.
    pub fn hover_enter(&mut self, title: &str) -> bool {
        let now = self.clock.monotonic_ms();
        self.nav.hover_open(title, now)
    }

    /// Pointer left a rail branch.
    pub fn hover_leave(&mut self, title: &str) -> bool {
        let now = self.clock.monotonic_ms();
        self.nav.hover_close(title, now).is_some()
    }

    /// Pointer reached an open flyout; cancels its pending close.
    pub fn flyout_enter(&mut self, title: &str) -> bool {
        let now = self.clock.monotonic_ms();
        self.nav.flyout_enter(title, now)
    }

    /// Pointer left an open flyout.
    pub fn flyout_leave(&mut self, title: &str) -> bool {
        let now = self.clock.monotonic_ms();
        self.nav.flyout_leave(title, now).is_some()
    }

    pub fn toggle_rail(&mut self) -> RailMode {
        let next = match self.nav.mode() {
            RailMode::Expanded => RailMode::Collapsed,
            RailMode::Collapsed => RailMode::Expanded,
        };
        self.nav.set_mode(next);
        next
    }

    /// Selects the `index`-th palette result and navigates to it.
    pub fn select_palette_result(&mut self, index: usize) -> bool {
        self.palette.select_index(index, &mut self.router)
    }

    pub fn rail(&self) -> RailView {
        self.nav
            .render(self.router.current_path(), self.inbox.unread_count())
    }

    pub fn inbox_view(&self) -> InboxView {
        self.inbox.render(self.clock.wall_ms())
    }

    /// Page for the current path, rebuilt only when the path changed.
    pub fn page(&mut self) -> &mut PageView {
        let path = self.router.current_path().to_string();
        let entry = match self.page.take() {
            Some((cached, view)) if cached == path => (cached, view),
            _ => {
                let view = self.details.page_for(&resolve(path.as_str()).route);
                debug!(
                    "event=page_build module=shell status=ok path={path} terminal={}",
                    view.is_terminal()
                );
                (path, view)
            }
        };
        &mut self.page.insert(entry).1
    }

    pub fn router(&self) -> &R {
        &self.router
    }

    pub fn router_mut(&mut self) -> &mut R {
        &mut self.router
    }

    pub fn nav(&self) -> &NavigationTree {
        &self.nav
    }

    pub fn nav_mut(&mut self) -> &mut NavigationTree {
        &mut self.nav
    }

    pub fn palette(&self) -> &CommandPalette {
        &self.palette
    }

    pub fn palette_mut(&mut self) -> &mut CommandPalette {
        &mut self.palette
    }

    pub fn inbox(&self) -> &NotificationCenter {
        &self.inbox
    }

    pub fn inbox_mut(&mut self) -> &mut NotificationCenter {
        &mut self.inbox
    }

    pub fn listeners(&self) -> &ListenerRegistry {
        &self.listeners
    }
}

#[cfg(test)]
mod tests {
    use super::{AppShell, ShellEvent};
    use crate::clock::ManualClock;
    use crate::config::{Platform, ShellConfig};
    use crate::routing::router::MemoryRouter;
    use crate::shell::input::KeyEvent;

    fn shell() -> AppShell<MemoryRouter> {
        let config = ShellConfig {
            platform: Platform::Other,
            ..ShellConfig::default()
        };
        AppShell::with_sample_data(&config, MemoryRouter::default(), Box::new(ManualClock::new(0)))
            .expect("shell")
    }

    #[test]
    fn keys_are_ignored_before_mount_and_after_unmount() {
        let mut shell = shell();
        let chord = ShellEvent::KeyDown(KeyEvent::new("k").with_ctrl());
        assert!(!shell.handle_event(chord.clone()));

        shell.mount();
        assert!(shell.handle_event(chord.clone()));
        assert!(shell.palette().is_open());

        shell.unmount();
        assert!(!shell.palette().is_open());
        assert!(!shell.handle_event(chord));
        assert!(shell.listeners().is_empty());
    }

    #[test]
    fn activate_leaf_navigates_and_trigger_toggles_inbox() {
        let mut shell = shell();
        assert!(shell.activate("Roster"));
        assert_eq!(shell.current_path(), "/scheduler/roster");

        assert!(shell.activate("Inbox"));
        assert!(shell.inbox().is_open());
        assert!(shell.handle_event(ShellEvent::PointerDownOutside));
        assert!(!shell.inbox().is_open());

        assert!(!shell.activate("Nowhere"));
    }
}
