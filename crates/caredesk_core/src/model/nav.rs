//! Navigation catalog model.
//!
//! # Responsibility
//! - Describe the sidebar hierarchy as groups of closed-variant items.
//! - Validate title uniqueness before a tree is built over the catalog.
//!
//! # Invariants
//! - Sibling titles are unique inside one group or branch.
//! - Branch titles are unique across the whole catalog, because branch
//!   open-state is addressed by title.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Icon reference resolved by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NavIcon {
    Home,
    Inbox,
    Users,
    House,
    Calendar,
    UserCheck,
    Briefcase,
    CreditCard,
    FileText,
    FileSignature,
    AlertTriangle,
    BarChart,
    Dollar,
    UserCircle,
    Building,
    Settings,
}

/// Visual weight of a badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BadgeTone {
    /// Attention marker (`!`).
    Alert,
    /// Counter or short label.
    Neutral,
}

/// Short label rendered next to a navigation entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Badge {
    pub label: String,
}

impl Badge {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }

    /// `!` is an alert; everything else is neutral.
    pub fn tone(&self) -> BadgeTone {
        if self.label == "!" {
            BadgeTone::Alert
        } else {
            BadgeTone::Neutral
        }
    }
}

/// Popover surfaces a trigger item can open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PopoverTarget {
    Inbox,
}

/// One sidebar entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NavItem {
    /// Navigates to one destination.
    Leaf {
        title: String,
        destination: String,
        icon: Option<NavIcon>,
        badge: Option<Badge>,
    },
    /// Reveals children inline (expanded rail) or in a flyout (collapsed rail).
    Branch {
        title: String,
        icon: Option<NavIcon>,
        badge: Option<Badge>,
        /// Summary link shown for the branch in the collapsed rail.
        summary_destination: Option<String>,
        children: Vec<NavItem>,
    },
    /// Opens a popover instead of navigating.
    Trigger {
        title: String,
        icon: Option<NavIcon>,
        target: PopoverTarget,
    },
}

impl NavItem {
    pub fn leaf(title: impl Into<String>, destination: impl Into<String>) -> Self {
        Self::Leaf {
            title: title.into(),
            destination: destination.into(),
            icon: None,
            badge: None,
        }
    }

    pub fn branch(title: impl Into<String>, children: Vec<NavItem>) -> Self {
        Self::Branch {
            title: title.into(),
            icon: None,
            badge: None,
            summary_destination: None,
            children,
        }
    }

    pub fn trigger(title: impl Into<String>, target: PopoverTarget) -> Self {
        Self::Trigger {
            title: title.into(),
            icon: None,
            target,
        }
    }

    /// Sets the icon on any variant.
    pub fn with_icon(mut self, value: NavIcon) -> Self {
        match &mut self {
            Self::Leaf { icon, .. } | Self::Branch { icon, .. } | Self::Trigger { icon, .. } => {
                *icon = Some(value);
            }
        }
        self
    }

    /// Sets the badge on leaf/branch items. Trigger badges are derived at render time.
    pub fn with_badge(mut self, label: impl Into<String>) -> Self {
        match &mut self {
            Self::Leaf { badge, .. } | Self::Branch { badge, .. } => {
                *badge = Some(Badge::new(label));
            }
            Self::Trigger { .. } => {}
        }
        self
    }

    /// Sets the collapsed-rail summary link of a branch.
    pub fn with_summary(mut self, destination: impl Into<String>) -> Self {
        if let Self::Branch {
            summary_destination,
            ..
        } = &mut self
        {
            *summary_destination = Some(destination.into());
        }
        self
    }

    pub fn title(&self) -> &str {
        match self {
            Self::Leaf { title, .. } | Self::Branch { title, .. } | Self::Trigger { title, .. } => {
                title
            }
        }
    }

    pub fn icon(&self) -> Option<NavIcon> {
        match self {
            Self::Leaf { icon, .. } | Self::Branch { icon, .. } | Self::Trigger { icon, .. } => {
                *icon
            }
        }
    }

    pub fn is_branch(&self) -> bool {
        matches!(self, Self::Branch { .. })
    }

    pub fn children(&self) -> &[NavItem] {
        match self {
            Self::Branch { children, .. } => children,
            _ => &[],
        }
    }
}

/// Titled section of the rail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavGroup {
    pub title: String,
    /// Whether the group label is rendered in the expanded rail.
    pub show_label: bool,
    /// Whether clicking the label collapses the group.
    pub collapsible: bool,
    pub items: Vec<NavItem>,
}

impl NavGroup {
    /// Labelled, collapsible group.
    pub fn new(title: impl Into<String>, items: Vec<NavItem>) -> Self {
        Self {
            title: title.into(),
            show_label: true,
            collapsible: true,
            items,
        }
    }

    /// Group without a label that can never collapse.
    pub fn unlabeled(title: impl Into<String>, items: Vec<NavItem>) -> Self {
        Self {
            title: title.into(),
            show_label: false,
            collapsible: false,
            items,
        }
    }
}

/// Validation errors for a navigation catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavTreeError {
    EmptyTitle,
    DuplicateGroupTitle(String),
    DuplicateSiblingTitle { parent: String, title: String },
    DuplicateBranchTitle(String),
    EmptyBranch(String),
}

impl Display for NavTreeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "navigation title must not be blank"),
            Self::DuplicateGroupTitle(title) => {
                write!(f, "navigation group title is duplicated: {title}")
            }
            Self::DuplicateSiblingTitle { parent, title } => {
                write!(f, "navigation title `{title}` is duplicated under `{parent}`")
            }
            Self::DuplicateBranchTitle(title) => {
                write!(f, "navigation branch title is duplicated: {title}")
            }
            Self::EmptyBranch(title) => write!(f, "navigation branch has no children: {title}"),
        }
    }
}

impl Error for NavTreeError {}

/// Checks catalog-wide title invariants.
pub fn validate_catalog(groups: &[NavGroup]) -> Result<(), NavTreeError> {
    let mut group_titles = BTreeSet::new();
    let mut branch_titles = BTreeSet::new();
    for group in groups {
        if group.title.trim().is_empty() {
            return Err(NavTreeError::EmptyTitle);
        }
        if !group_titles.insert(group.title.as_str()) {
            return Err(NavTreeError::DuplicateGroupTitle(group.title.clone()));
        }
        validate_siblings(group.title.as_str(), &group.items, &mut branch_titles)?;
    }
    Ok(())
}

fn validate_siblings<'a>(
    parent: &str,
    items: &'a [NavItem],
    branch_titles: &mut BTreeSet<&'a str>,
) -> Result<(), NavTreeError> {
    let mut siblings = BTreeSet::new();
    for item in items {
        let title = item.title();
        if title.trim().is_empty() {
            return Err(NavTreeError::EmptyTitle);
        }
        if !siblings.insert(title) {
            return Err(NavTreeError::DuplicateSiblingTitle {
                parent: parent.to_string(),
                title: title.to_string(),
            });
        }
        if let NavItem::Branch { children, .. } = item {
            if children.is_empty() {
                return Err(NavTreeError::EmptyBranch(title.to_string()));
            }
            if !branch_titles.insert(title) {
                return Err(NavTreeError::DuplicateBranchTitle(title.to_string()));
            }
            validate_siblings(title, children, branch_titles)?;
        }
    }
    Ok(())
}

/// Sidebar catalog of the care console.
pub fn default_navigation() -> Vec<NavGroup> {
    vec![
        NavGroup::unlabeled(
            "Main",
            vec![
                NavItem::leaf("Dashboard", "/").with_icon(NavIcon::Home),
                NavItem::trigger("Inbox", PopoverTarget::Inbox).with_icon(NavIcon::Inbox),
            ],
        ),
        NavGroup::new(
            "Client Management",
            vec![
                NavItem::branch(
                    "Clients",
                    vec![
                        NavItem::leaf("HCP", "/clients/hcp"),
                        NavItem::leaf("NDIS", "/clients/ndis"),
                        NavItem::leaf("Private", "/clients/private"),
                    ],
                )
                .with_icon(NavIcon::Users)
                .with_summary("/clients"),
                NavItem::leaf("SIL", "/sil").with_icon(NavIcon::House),
                NavItem::branch(
                    "Scheduler",
                    vec![
                        NavItem::leaf("Roster", "/scheduler/roster"),
                        NavItem::leaf("Vacant shifts", "/scheduler/vacant-shifts"),
                        NavItem::leaf("Timesheets", "/scheduler/timesheets"),
                    ],
                )
                .with_icon(NavIcon::Calendar)
                .with_summary("/scheduler"),
            ],
        ),
        NavGroup::new(
            "Human Resources",
            vec![
                NavItem::branch(
                    "Manage staff",
                    vec![
                        NavItem::leaf("Staff", "/staff"),
                        NavItem::leaf("Availability", "/staff/availability"),
                        NavItem::leaf("Leave", "/staff/leave"),
                    ],
                )
                .with_icon(NavIcon::UserCheck)
                .with_badge("!")
                .with_summary("/staff"),
                NavItem::leaf("Job Board", "/jobs").with_icon(NavIcon::Briefcase),
                NavItem::leaf("Payroll", "/payroll").with_icon(NavIcon::CreditCard),
            ],
        ),
        NavGroup::new(
            "Compliance",
            vec![
                NavItem::leaf("Documents", "/documents").with_icon(NavIcon::FileText),
                NavItem::leaf("eSign", "/esign").with_icon(NavIcon::FileSignature),
                NavItem::leaf("Incidents", "/incidents").with_icon(NavIcon::AlertTriangle),
                NavItem::leaf("Reports", "/reports").with_icon(NavIcon::BarChart),
            ],
        ),
        NavGroup::new(
            "Operations",
            vec![
                NavItem::branch(
                    "Finances",
                    vec![
                        NavItem::leaf("Invoicing", "/finances/invoicing"),
                        NavItem::leaf("HCP claims", "/finances/hcp-claims"),
                        NavItem::leaf("NDIS claims", "/finances/ndis-claims"),
                        NavItem::leaf("Travel claims", "/finances/travel-claims"),
                        NavItem::leaf("Staff claims", "/finances/staff-claims"),
                    ],
                )
                .with_icon(NavIcon::Dollar)
                .with_badge("!")
                .with_summary("/finances"),
                NavItem::branch(
                    "CRM",
                    vec![
                        NavItem::leaf("People", "/crm/people"),
                        NavItem::leaf("Prospects", "/crm/prospects"),
                    ],
                )
                .with_icon(NavIcon::UserCircle)
                .with_summary("/crm"),
                NavItem::leaf("Suppliers", "/suppliers").with_icon(NavIcon::Building),
            ],
        ),
        NavGroup::unlabeled(
            "Footer",
            vec![NavItem::leaf("Settings", "/settings").with_icon(NavIcon::Settings)],
        ),
    ]
}
