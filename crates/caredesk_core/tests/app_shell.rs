use caredesk_core::repo::memory::{
    InMemoryClientDirectory, InMemoryHouseDirectory, InMemoryNotificationFeed,
};
use caredesk_core::repo::seed::{sample_clients, sample_houses, sample_notifications};
use caredesk_core::shell::input::KeyEvent;
use caredesk_core::{
    AppShell, ClientId, ClientRecord, DetailService, EntityKind, ManualClock, MemoryRouter,
    NotificationItem, PageView, Platform, PortError, PortResult, RailMode, ReadPort, ShellConfig, ShellError,
    ShellEvent,
};

// 2024-01-15 14:30 UTC
const NOW: i64 = 1_705_329_000_000;

fn config() -> ShellConfig {
    ShellConfig {
        platform: Platform::Other,
        ..ShellConfig::default()
    }
}

fn mounted_shell(clock: &ManualClock) -> AppShell<MemoryRouter> {
    let mut shell =
        AppShell::with_sample_data(&config(), MemoryRouter::default(), Box::new(clock.clone()))
            .unwrap();
    shell.mount();
    shell
}

#[test]
fn mount_registers_each_listener_once() {
    let clock = ManualClock::new(NOW);
    let mut shell = mounted_shell(&clock);
    shell.mount();
    assert_eq!(shell.listeners().len(), 2);
    assert!(shell.is_mounted());

    shell.unmount();
    assert!(shell.listeners().is_empty());
}

#[test]
fn palette_flow_navigates_and_closes() {
    let clock = ManualClock::new(NOW);
    let mut shell = mounted_shell(&clock);

    assert!(shell.handle_event(ShellEvent::KeyDown(KeyEvent::new("k").with_ctrl())));
    shell.palette_mut().set_query("sil");
    assert!(shell.select_palette_result(0));

    assert!(!shell.palette().is_open());
    assert_eq!(shell.current_path(), "/sil");
    match shell.page() {
        PageView::House(tabs) => assert_eq!(tabs.entity().name, "Subiaco House"),
        _ => panic!("expected house tabs"),
    }
}

#[test]
fn escape_closes_palette_through_shell() {
    let clock = ManualClock::new(NOW);
    let mut shell = mounted_shell(&clock);
    shell.handle_event(ShellEvent::KeyDown(KeyEvent::new("k").with_meta()));
    assert!(shell.handle_event(ShellEvent::KeyDown(KeyEvent::new("Escape"))));
    assert!(!shell.palette().is_open());
}

#[test]
fn tick_fires_hover_close_after_delay() {
    let clock = ManualClock::new(NOW);
    let mut shell = mounted_shell(&clock);
    assert_eq!(shell.toggle_rail(), RailMode::Collapsed);

    assert!(shell.hover_enter("Scheduler"));
    assert!(shell.hover_leave("Scheduler"));
    clock.advance(100);
    assert!(!shell.handle_event(ShellEvent::Tick));
    assert!(shell.nav().is_flyout_open("Scheduler"));

    clock.advance(50);
    assert!(shell.handle_event(ShellEvent::Tick));
    assert!(!shell.nav().is_flyout_open("Scheduler"));
}

#[test]
fn entering_flyout_on_shell_clock_cancels_pending_close() {
    let clock = ManualClock::new(NOW);
    let mut shell = mounted_shell(&clock);
    shell.toggle_rail();

    assert!(shell.hover_enter("Scheduler"));
    assert!(shell.hover_leave("Scheduler"));
    clock.advance(100);
    assert!(shell.flyout_enter("Scheduler"));
    clock.advance(100);
    assert!(!shell.handle_event(ShellEvent::Tick));
    assert!(shell.nav().is_flyout_open("Scheduler"));

    assert!(shell.flyout_leave("Scheduler"));
    clock.advance(149);
    assert!(!shell.handle_event(ShellEvent::Tick));
    clock.advance(1);
    assert!(shell.handle_event(ShellEvent::Tick));
    assert!(!shell.nav().is_flyout_open("Scheduler"));
}

#[test]
fn pointer_outside_closes_flyouts_only_while_mounted() {
    let clock = ManualClock::new(NOW);
    let mut shell = mounted_shell(&clock);
    shell.toggle_rail();
    shell.activate("Finances");
    assert!(shell.nav().is_flyout_open("Finances"));
    assert!(shell.handle_event(ShellEvent::PointerDownOutside));
    assert!(!shell.nav().is_flyout_open("Finances"));

    shell.unmount();
    shell.activate("Finances");
    assert!(!shell.handle_event(ShellEvent::PointerDownOutside));
    assert!(shell.nav().is_flyout_open("Finances"));
}

#[test]
fn rail_inbox_badge_follows_unread_count() {
    let clock = ManualClock::new(NOW);
    let mut shell = mounted_shell(&clock);
    let badge = |shell: &AppShell<MemoryRouter>| {
        shell.rail().groups[0]
            .rows
            .iter()
            .find(|row| row.title == "Inbox")
            .and_then(|row| row.badge.clone())
            .map(|badge| badge.label)
    };
    assert_eq!(badge(&shell), Some("2".to_string()));

    shell.inbox_mut().mark_all_read();
    assert_eq!(badge(&shell), None);
    assert_eq!(shell.inbox_view().unread_count, 0);
}

#[test]
fn inbox_view_uses_injected_wall_clock() {
    let clock = ManualClock::new(NOW);
    let shell = mounted_shell(&clock);
    assert_eq!(shell.inbox_view().rows[0].time_label, "Just now");

    clock.advance(2 * 3_600_000);
    assert_eq!(shell.inbox_view().rows[0].time_label, "2h ago");
}

#[test]
fn client_page_keeps_tab_state_while_path_is_unchanged() {
    let clock = ManualClock::new(NOW);
    let mut shell = mounted_shell(&clock);
    shell.navigate("/client/301");

    {
        let tabs = shell.page().client_tabs_mut().unwrap();
        tabs.select("budget").unwrap();
        tabs.active_state_mut().filter = "level".to_string();
    }
    shell.toggle_rail();
    shell.handle_event(ShellEvent::Tick);

    let tabs = shell.page().client_tabs_mut().unwrap();
    assert_eq!(tabs.active_key(), "budget");
    assert_eq!(tabs.render_active().unwrap().fields.len(), 1);

    shell.navigate("/client/302");
    let tabs = shell.page().client_tabs_mut().unwrap();
    assert_eq!(tabs.entity().id, ClientId(302));
    assert_eq!(tabs.active_key(), "dashboard");
}

#[test]
fn unknown_routes_and_ids_render_terminal_views() {
    let clock = ManualClock::new(NOW);
    let mut shell = mounted_shell(&clock);

    shell.navigate("/does-not-exist");
    assert!(matches!(shell.page(), PageView::NotFound { path } if path.as_str() == "/does-not-exist"));

    shell.navigate("/client/abc");
    assert!(matches!(
        shell.page(),
        PageView::EntityNotFound { kind: EntityKind::Client, .. }
    ));

    shell.navigate("/client/999");
    assert_eq!(shell.page().title(), "Client not found");
}

struct OfflineClients;

impl ReadPort<ClientRecord> for OfflineClients {
    type Id = ClientId;

    fn list(&self) -> PortResult<Vec<ClientRecord>> {
        Err(PortError::Unavailable("directory offline".to_string()))
    }

    fn get(&self, _id: &ClientId) -> PortResult<Option<ClientRecord>> {
        Err(PortError::Unavailable("directory offline".to_string()))
    }
}

#[test]
fn port_failure_renders_unavailable_view() {
    let details = DetailService::new(
        OfflineClients,
        InMemoryHouseDirectory::try_new(sample_houses()).unwrap(),
    );
    let feed = InMemoryNotificationFeed::try_new(sample_notifications()).unwrap();
    let mut shell = AppShell::new(
        &config(),
        MemoryRouter::new("/client/301"),
        details,
        &feed,
        Box::new(ManualClock::new(NOW)),
    )
    .unwrap();

    match shell.page() {
        PageView::EntityUnavailable { kind, message } => {
            assert_eq!(*kind, EntityKind::Client);
            assert!(message.contains("directory offline"));
        }
        _ => panic!("expected unavailable view"),
    }
}

struct OfflineFeed;

impl ReadPort<NotificationItem> for OfflineFeed {
    type Id = str;

    fn list(&self) -> PortResult<Vec<NotificationItem>> {
        Err(PortError::Unavailable("feed offline".to_string()))
    }

    fn get(&self, _id: &str) -> PortResult<Option<NotificationItem>> {
        Err(PortError::Unavailable("feed offline".to_string()))
    }
}

#[test]
fn notification_feed_failure_rejects_shell() {
    let details = DetailService::new(
        InMemoryClientDirectory::try_new(sample_clients()).unwrap(),
        InMemoryHouseDirectory::try_new(sample_houses()).unwrap(),
    );
    let err = AppShell::new(
        &config(),
        MemoryRouter::default(),
        details,
        &OfflineFeed,
        Box::new(ManualClock::new(NOW)),
    )
    .err()
    .unwrap();
    assert!(matches!(err, ShellError::Port(PortError::Unavailable(_))));
    assert!(err.to_string().contains("feed offline"));
}

#[test]
fn invalid_config_is_rejected() {
    let config = ShellConfig {
        recent_limit: 0,
        ..config()
    };
    let err = AppShell::with_sample_data(&config, MemoryRouter::default(), Box::new(ManualClock::new(NOW)))
        .err()
        .unwrap();
    assert!(matches!(err, ShellError::Config(_)));
}
