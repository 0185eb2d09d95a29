//! Command palette entries.

use serde::{Deserialize, Serialize};

/// One launchable destination in the palette.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandEntry {
    pub label: String,
    pub destination: String,
}

impl CommandEntry {
    pub fn new(label: impl Into<String>, destination: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            destination: destination.into(),
        }
    }

    /// Case-insensitive substring match against the label only.
    pub fn matches(&self, query: &str) -> bool {
        let needle = query.to_lowercase();
        needle.is_empty() || self.label.to_lowercase().contains(needle.as_str())
    }
}

/// Quick links offered by the palette under the "Navigate" heading.
pub fn default_command_entries() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new("Dashboard", "/"),
        CommandEntry::new("Clients", "/clients"),
        CommandEntry::new("SIL", "/sil"),
        CommandEntry::new("Scheduler • Roster", "/scheduler/roster"),
        CommandEntry::new("Scheduler • Vacant Shifts", "/scheduler/vacant-shifts"),
    ]
}

#[cfg(test)]
mod tests {
    use super::CommandEntry;

    #[test]
    fn matches_is_case_insensitive_substring() {
        let entry = CommandEntry::new("Scheduler • Roster", "/scheduler/roster");
        assert!(entry.matches("rost"));
        assert!(entry.matches("ROSTER"));
        assert!(entry.matches(""));
        assert!(!entry.matches("  "));
        assert!(!entry.matches("vacant"));
    }
}
