//! Route resolution over the destination table.
//!
//! # Invariants
//! - Matching is exact after normalization (one trailing slash, query and
//!   fragment stripped).
//! - `/scheduler` always redirects to `/scheduler/roster`.
//! - `/client/:id` accepts any single non-empty segment; id validity is the
//!   detail service's concern.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

static CLIENT_DETAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^/client/([^/]+)$").expect("valid client detail regex"));

/// Every destination the shell can render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "route", rename_all = "snake_case")]
pub enum Route {
    Dashboard,
    Clients,
    ClientsHcp,
    ClientsNdis,
    ClientsPrivate,
    Sil,
    ClientDetail { id: String },
    Scheduler,
    SchedulerRoster,
    VacantShifts,
    Timesheets,
    Staff,
    StaffAvailability,
    StaffLeave,
    Jobs,
    Payroll,
    Documents,
    ESign,
    Incidents,
    Reports,
    Finances,
    Invoicing,
    HcpClaims,
    NdisClaims,
    TravelClaims,
    StaffClaims,
    CrmPeople,
    CrmProspects,
    Suppliers,
    Settings,
    NotFound { path: String },
}

const STATIC_PATHS: &[&str] = &[
    "/",
    "/clients",
    "/clients/hcp",
    "/clients/ndis",
    "/clients/private",
    "/sil",
    "/scheduler",
    "/scheduler/roster",
    "/scheduler/vacant-shifts",
    "/scheduler/timesheets",
    "/staff",
    "/staff/availability",
    "/staff/leave",
    "/jobs",
    "/payroll",
    "/documents",
    "/esign",
    "/incidents",
    "/reports",
    "/finances",
    "/finances/invoicing",
    "/finances/hcp-claims",
    "/finances/ndis-claims",
    "/finances/travel-claims",
    "/finances/staff-claims",
    "/crm/people",
    "/crm/prospects",
    "/suppliers",
    "/settings",
];

fn static_route(path: &str) -> Option<Route> {
    let route = match path {
        "/" => Route::Dashboard,
        "/clients" => Route::Clients,
        "/clients/hcp" => Route::ClientsHcp,
        "/clients/ndis" => Route::ClientsNdis,
        "/clients/private" => Route::ClientsPrivate,
        "/sil" => Route::Sil,
        "/scheduler" => Route::Scheduler,
        "/scheduler/roster" => Route::SchedulerRoster,
        "/scheduler/vacant-shifts" => Route::VacantShifts,
        "/scheduler/timesheets" => Route::Timesheets,
        "/staff" => Route::Staff,
        "/staff/availability" => Route::StaffAvailability,
        "/staff/leave" => Route::StaffLeave,
        "/jobs" => Route::Jobs,
        "/payroll" => Route::Payroll,
        "/documents" => Route::Documents,
        "/esign" => Route::ESign,
        "/incidents" => Route::Incidents,
        "/reports" => Route::Reports,
        "/finances" => Route::Finances,
        "/finances/invoicing" => Route::Invoicing,
        "/finances/hcp-claims" => Route::HcpClaims,
        "/finances/ndis-claims" => Route::NdisClaims,
        "/finances/travel-claims" => Route::TravelClaims,
        "/finances/staff-claims" => Route::StaffClaims,
        "/crm/people" => Route::CrmPeople,
        "/crm/prospects" => Route::CrmProspects,
        "/suppliers" => Route::Suppliers,
        "/settings" => Route::Settings,
        _ => return None,
    };
    Some(route)
}

impl Route {
    /// Canonical path of this route.
    pub fn path(&self) -> String {
        let path = match self {
            Self::ClientDetail { id } => return format!("/client/{id}"),
            Self::NotFound { path } => return path.clone(),
            Self::Dashboard => "/",
            Self::Clients => "/clients",
            Self::ClientsHcp => "/clients/hcp",
            Self::ClientsNdis => "/clients/ndis",
            Self::ClientsPrivate => "/clients/private",
            Self::Sil => "/sil",
            Self::Scheduler => "/scheduler",
            Self::SchedulerRoster => "/scheduler/roster",
            Self::VacantShifts => "/scheduler/vacant-shifts",
            Self::Timesheets => "/scheduler/timesheets",
            Self::Staff => "/staff",
            Self::StaffAvailability => "/staff/availability",
            Self::StaffLeave => "/staff/leave",
            Self::Jobs => "/jobs",
            Self::Payroll => "/payroll",
            Self::Documents => "/documents",
            Self::ESign => "/esign",
            Self::Incidents => "/incidents",
            Self::Reports => "/reports",
            Self::Finances => "/finances",
            Self::Invoicing => "/finances/invoicing",
            Self::HcpClaims => "/finances/hcp-claims",
            Self::NdisClaims => "/finances/ndis-claims",
            Self::TravelClaims => "/finances/travel-claims",
            Self::StaffClaims => "/finances/staff-claims",
            Self::CrmPeople => "/crm/people",
            Self::CrmProspects => "/crm/prospects",
            Self::Suppliers => "/suppliers",
            Self::Settings => "/settings",
        };
        path.to_string()
    }

    /// Page heading rendered for this route.
    pub fn title(&self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::Clients => "Clients",
            Self::ClientsHcp => "HCP Clients",
            Self::ClientsNdis => "NDIS Clients",
            Self::ClientsPrivate => "Private Clients",
            Self::Sil => "SIL",
            Self::ClientDetail { .. } => "Client",
            Self::Scheduler | Self::SchedulerRoster => "Roster",
            Self::VacantShifts => "Vacant Shifts",
            Self::Timesheets => "Timesheets",
            Self::Staff => "Staff",
            Self::StaffAvailability => "Availability",
            Self::StaffLeave => "Leave",
            Self::Jobs => "Job Board",
            Self::Payroll => "Payroll",
            Self::Documents => "Documents",
            Self::ESign => "eSign",
            Self::Incidents => "Incidents",
            Self::Reports => "Reports",
            Self::Finances => "Finances",
            Self::Invoicing => "Invoicing",
            Self::HcpClaims => "HCP Claims",
            Self::NdisClaims => "NDIS Claims",
            Self::TravelClaims => "Travel Claims",
            Self::StaffClaims => "Staff Claims",
            Self::CrmPeople => "People",
            Self::CrmProspects => "Prospects",
            Self::Suppliers => "Suppliers",
            Self::Settings => "Settings",
            Self::NotFound { .. } => "Page not found",
        }
    }

    /// Target of a replace-redirect, if this route is one.
    pub fn redirect_target(&self) -> Option<Route> {
        match self {
            Self::Scheduler => Some(Self::SchedulerRoster),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Outcome of resolving one path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// Route that renders.
    pub route: Route,
    /// Route that was requested when a redirect applied.
    pub redirected_from: Option<Route>,
}

/// Resolves a path against the destination table, following redirects.
pub fn resolve(path: &str) -> Resolution {
    let requested = match_path(path);
    match requested.redirect_target() {
        Some(target) => Resolution {
            route: target,
            redirected_from: Some(requested),
        },
        None => Resolution {
            route: requested,
            redirected_from: None,
        },
    }
}

/// Matches one path without following redirects.
pub fn match_path(path: &str) -> Route {
    let normalized = normalize_path(path);
    if let Some(route) = static_route(normalized) {
        return route;
    }

    if let Some(id) = CLIENT_DETAIL_RE
        .captures(normalized)
        .and_then(|captures| captures.get(1))
    {
        return Route::ClientDetail {
            id: id.as_str().to_string(),
        };
    }

    Route::NotFound {
        path: path.to_string(),
    }
}

/// Strips query/fragment and a single trailing slash.
pub fn normalize_path(path: &str) -> &str {
    let end = path.find(['?', '#']).unwrap_or(path.len());
    let trimmed = &path[..end];
    if trimmed.len() > 1 {
        trimmed.strip_suffix('/').unwrap_or(trimmed)
    } else {
        trimmed
    }
}

/// Every static path of the destination table, in declaration order.
pub fn destination_paths() -> impl Iterator<Item = &'static str> {
    STATIC_PATHS.iter().copied()
}
