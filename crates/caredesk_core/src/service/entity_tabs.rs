//! Tab catalogs of the client and SIL house detail pages.
//!
//! # Invariants
//! - Client and house tab keys and their order are fixed.
//! - Every panel is a pure function of the entity and the tab's own filter.

use crate::model::entity::{ClientRecord, HouseRecord};
use crate::shell::tab_set::{EntityTabSet, TabSetError, TabSpec};

/// Client detail tabs, in display order.
pub const CLIENT_TABS: &[(&str, &str)] = &[
    ("dashboard", "Dashboard"),
    ("details", "Details"),
    ("connections", "Connections"),
    ("notes-activity", "Notes & Activity"),
    ("documents", "Documents"),
    ("care-plan", "Care Plan"),
    ("budget", "Budget"),
    ("shift-notes", "Shift Notes"),
    ("financials", "Financials"),
    ("shift-cautions", "Shift Cautions"),
    ("incidents", "Incidents"),
];

/// SIL house tabs, in display order.
pub const HOUSE_TABS: &[(&str, &str)] = &[
    ("overview", "Overview"),
    ("participants", "Participants"),
    ("roster", "Roster"),
    ("staff", "Staff"),
    ("shift-notes", "Shift Notes"),
    ("cautions", "Shift Cautions"),
    ("incidents", "Incidents"),
    ("billing", "Billing"),
    ("documents", "Documents"),
];

/// Tab-local state: the panel's own search box.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PanelState {
    pub filter: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelField {
    pub label: String,
    pub value: String,
}

/// Rendered tab body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabPanel {
    pub heading: String,
    pub fields: Vec<PanelField>,
    pub filter: Option<String>,
}

impl TabPanel {
    fn new(heading: impl Into<String>) -> Self {
        Self {
            heading: heading.into(),
            fields: Vec::new(),
            filter: None,
        }
    }

    fn field(mut self, label: &str, value: impl Into<String>) -> Self {
        self.fields.push(PanelField {
            label: label.to_string(),
            value: value.into(),
        });
        self
    }

    /// Keeps fields whose label or value contains the filter, case-insensitively.
    fn filtered(mut self, state: &PanelState) -> Self {
        let needle = state.filter.trim().to_lowercase();
        if needle.is_empty() {
            return self;
        }
        self.fields.retain(|field| {
            field.label.to_lowercase().contains(needle.as_str())
                || field.value.to_lowercase().contains(needle.as_str())
        });
        self.filter = Some(needle);
        self
    }
}

pub type ClientTabs = EntityTabSet<ClientRecord, PanelState, TabPanel>;
pub type HouseTabs = EntityTabSet<HouseRecord, PanelState, TabPanel>;

/// Builds the client tab set with "dashboard" active.
pub fn client_tabs(client: ClientRecord) -> Result<ClientTabs, TabSetError> {
    let tabs = CLIENT_TABS
        .iter()
        .map(|(key, label)| {
            let key = *key;
            TabSpec::new(key, *label, move |client: &ClientRecord, state: &PanelState| {
                client_panel(key, client).filtered(state)
            })
        })
        .collect();
    EntityTabSet::new(client, tabs)
}

/// Builds the house tab set with "overview" active.
pub fn house_tabs(house: HouseRecord) -> Result<HouseTabs, TabSetError> {
    let tabs = HOUSE_TABS
        .iter()
        .map(|(key, label)| {
            let key = *key;
            TabSpec::new(key, *label, move |house: &HouseRecord, state: &PanelState| {
                house_panel(key, house).filtered(state)
            })
        })
        .collect();
    EntityTabSet::new(house, tabs)
}

fn client_panel(key: &str, client: &ClientRecord) -> TabPanel {
    let level = client
        .level
        .map(|level| format!("Level {level}"))
        .unwrap_or_else(|| "-".to_string());
    match key {
        "dashboard" => TabPanel::new(format!("{} overview", client.name))
            .field("Status", client.status.label())
            .field("Funding", client.funding.label())
            .field("Level", level),
        "details" => TabPanel::new("Personal details")
            .field("Client ID", client.id.to_string())
            .field("Name", client.name.as_str())
            .field("Phone", client.phone.as_str())
            .field("Email", client.email.as_str())
            .field("Address", client.address.as_str()),
        "budget" | "financials" => TabPanel::new(heading_for(CLIENT_TABS, key))
            .field("Funding", client.funding.label())
            .field("Level", level),
        _ => TabPanel::new(heading_for(CLIENT_TABS, key)).field("Client", client.name.as_str()),
    }
}

fn house_panel(key: &str, house: &HouseRecord) -> TabPanel {
    match key {
        "overview" => TabPanel::new(house.name.as_str())
            .field("House", house.id.to_string())
            .field("Address", house.address.as_str()),
        _ => TabPanel::new(heading_for(HOUSE_TABS, key)).field("House", house.name.as_str()),
    }
}

fn heading_for(catalog: &[(&str, &'static str)], key: &str) -> &'static str {
    catalog
        .iter()
        .find(|(candidate, _)| *candidate == key)
        .map(|(_, label)| *label)
        .unwrap_or_default()
}
