use caredesk_core::repo::seed::{sample_clients, sample_houses};
use caredesk_core::service::entity_tabs::{client_tabs, house_tabs};
use caredesk_core::{EntityTabSet, TabSetError, TabSpec};

#[derive(Debug, Default, PartialEq)]
struct Draft {
    text: String,
}

fn note_tabs() -> EntityTabSet<&'static str, Draft, String> {
    let tabs = vec![
        TabSpec::new("notes", "Notes", |entity: &&'static str, draft: &Draft| {
            format!("{entity} notes: {}", draft.text)
        }),
        TabSpec::new("calls", "Calls", |entity: &&'static str, draft: &Draft| {
            format!("{entity} calls: {}", draft.text)
        }),
    ];
    EntityTabSet::new("Caren", tabs).unwrap()
}

#[test]
fn exactly_one_tab_is_active() {
    let mut set = note_tabs();
    set.select("calls").unwrap();
    let headers = set.headers();
    assert_eq!(headers.iter().filter(|header| header.active).count(), 1);
    assert_eq!(set.active_key(), "calls");
}

#[test]
fn local_state_survives_switching_away_and_back() {
    let mut set = note_tabs();
    set.active_state_mut().text = "draft".to_string();

    set.select("calls").unwrap();
    assert_eq!(set.render_active().unwrap(), "Caren calls: ");
    set.select("notes").unwrap();

    assert_eq!(set.render_active().unwrap(), "Caren notes: draft");
}

#[test]
fn state_is_created_lazily_on_first_activation() {
    let mut set = note_tabs();
    assert_eq!(set.mounted_keys(), vec!["notes"]);
    assert_eq!(set.local_state("calls"), None);

    set.select("calls").unwrap();
    assert_eq!(set.mounted_keys(), vec!["calls", "notes"]);
    assert_eq!(set.local_state("calls"), Some(&Draft::default()));
}

#[test]
fn unknown_tab_is_rejected_without_side_effects() {
    let mut set = note_tabs();
    set.active_state_mut().text = "keep".to_string();
    assert_eq!(
        set.select("billing"),
        Err(TabSetError::UnknownTab("billing".to_string()))
    );
    assert_eq!(set.active_key(), "notes");
    assert_eq!(set.mounted_keys(), vec!["notes"]);
}

#[test]
fn client_tabs_switch_over_one_record() {
    let client = sample_clients().remove(0);
    let mut tabs = client_tabs(client.clone()).unwrap();

    for key in tabs.keys().into_iter().map(str::to_string).collect::<Vec<_>>() {
        tabs.select(key.as_str()).unwrap();
        assert_eq!(tabs.entity(), &client);
        assert!(!tabs.render_active().unwrap().heading.is_empty());
    }
    assert_eq!(tabs.mounted_keys().len(), 11);
}

#[test]
fn house_tabs_override_initial_tab() {
    let tabs = house_tabs(sample_houses().remove(0))
        .unwrap()
        .with_active("roster")
        .unwrap();
    assert_eq!(tabs.active_key(), "roster");
    let panel = tabs.render_active().unwrap();
    assert_eq!(panel.heading, "Roster");
    assert_eq!(panel.fields[0].value, "Subiaco House");
}
