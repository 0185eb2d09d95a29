use caredesk_core::shell::command_palette::{PaletteResults, NO_RESULTS_PLACEHOLDER};
use caredesk_core::shell::input::{KeyEvent, ListenerRegistry};
use caredesk_core::{default_command_entries, CommandPalette, Platform, Router};

#[derive(Default)]
struct RecordingRouter {
    calls: Vec<String>,
    path: String,
}

impl Router for RecordingRouter {
    fn navigate(&mut self, path: &str) {
        self.calls.push(path.to_string());
        self.path = path.to_string();
    }

    fn current_path(&self) -> &str {
        &self.path
    }
}

fn mounted_palette() -> (CommandPalette, ListenerRegistry) {
    let mut registry = ListenerRegistry::new();
    let mut palette = CommandPalette::new(default_command_entries(), Platform::Other);
    palette.mount(&mut registry);
    (palette, registry)
}

fn labels(palette: &CommandPalette) -> Vec<String> {
    palette
        .results()
        .entries()
        .iter()
        .map(|entry| entry.label.clone())
        .collect()
}

#[test]
fn rost_matches_only_roster() {
    let (mut palette, _registry) = mounted_palette();
    palette.set_query("rost");
    assert_eq!(labels(&palette), vec!["Scheduler • Roster".to_string()]);
}

#[test]
fn query_matching_is_case_insensitive_over_labels() {
    let (mut palette, _registry) = mounted_palette();
    palette.set_query("SCHEDULER");
    assert_eq!(labels(&palette).len(), 2);

    // destinations are not searched
    palette.set_query("/sil");
    assert_eq!(palette.results(), PaletteResults::NoResults(NO_RESULTS_PLACEHOLDER));
}

#[test]
fn empty_query_lists_every_entry() {
    let (palette, _registry) = mounted_palette();
    assert_eq!(labels(&palette).len(), default_command_entries().len());
}

#[test]
fn whitespace_query_is_matched_literally() {
    let (mut palette, _registry) = mounted_palette();
    palette.set_query("  ");
    assert_eq!(palette.results(), PaletteResults::NoResults(NO_RESULTS_PLACEHOLDER));

    palette.set_query(" ");
    assert_eq!(labels(&palette).len(), 2);
}

#[test]
fn selecting_sil_navigates_once_and_closes() {
    let (mut palette, _registry) = mounted_palette();
    let mut router = RecordingRouter::default();

    assert!(palette.handle_key(&KeyEvent::new("k").with_meta()));
    assert!(palette.is_open());
    palette.set_query("sil");

    let results = palette.results();
    assert_eq!(results.entries().len(), 1);
    assert_eq!(results.entries()[0].label, "SIL");
    assert_eq!(results.entries()[0].destination, "/sil");

    assert!(palette.select_index(0, &mut router));
    assert_eq!(router.calls, vec!["/sil".to_string()]);
    assert!(!palette.is_open());
    assert_eq!(palette.query(), "");
}

#[test]
fn chord_toggles_while_mounted() {
    let (mut palette, mut registry) = mounted_palette();
    let chord = KeyEvent::new("K").with_ctrl();

    assert!(palette.handle_key(&chord));
    assert!(palette.is_open());
    assert!(palette.handle_key(&chord));
    assert!(!palette.is_open());

    palette.unmount(&mut registry);
    assert!(registry.is_empty());
    assert!(!palette.handle_key(&chord));
    assert!(!palette.is_open());
}

#[test]
fn plain_k_and_other_chords_are_ignored() {
    let (mut palette, _registry) = mounted_palette();
    assert!(!palette.handle_key(&KeyEvent::new("k")));
    assert!(!palette.handle_key(&KeyEvent::new("j").with_ctrl()));
    assert!(!palette.handle_key(&KeyEvent::new("k").with_shift()));
    assert!(!palette.is_open());
}
