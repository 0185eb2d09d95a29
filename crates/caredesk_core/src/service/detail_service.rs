//! Route-to-page use-case service.
//!
//! # Responsibility
//! - Turn a resolved route into the page the shell content area renders.
//! - Fetch the scoped entity once per page and hand it to its tab set.
//!
//! # Invariants
//! - Invalid routes, missing ids and port failures end in terminal views;
//!   nothing here returns an error to the shell.
//! - `/client/:id` ids are looked up; non-numeric ids never reach the port.

use crate::model::entity::{ClientId, ClientRecord, HouseId, HouseRecord};
use crate::repo::{PortError, ReadPort};
use crate::routing::route::Route;
use crate::service::entity_tabs::{client_tabs, house_tabs, ClientTabs, HouseTabs};
use log::{info, warn};
use std::fmt::{Display, Formatter};

/// Entity kind scoped by a detail page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Client,
    House,
}

impl Display for EntityKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Client => write!(f, "client"),
            Self::House => write!(f, "house"),
        }
    }
}

/// What the content area shows for one route.
pub enum PageView {
    /// Static destination page.
    Page { route: Route, title: &'static str },
    Client(Box<ClientTabs>),
    House(Box<HouseTabs>),
    NotFound { path: String },
    EntityNotFound { kind: EntityKind, id: String },
    EntityUnavailable { kind: EntityKind, message: String },
}

impl PageView {
    /// Heading rendered above the page.
    pub fn title(&self) -> String {
        match self {
            Self::Page { title, .. } => (*title).to_string(),
            Self::Client(tabs) => tabs.entity().name.clone(),
            Self::House(tabs) => tabs.entity().name.clone(),
            Self::NotFound { .. } => "Page not found".to_string(),
            Self::EntityNotFound { kind: EntityKind::Client, .. } => "Client not found".to_string(),
            Self::EntityNotFound { kind: EntityKind::House, .. } => "House not found".to_string(),
            Self::EntityUnavailable { .. } => "Something went wrong".to_string(),
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::NotFound { .. } | Self::EntityNotFound { .. } | Self::EntityUnavailable { .. }
        )
    }

    pub fn client_tabs_mut(&mut self) -> Option<&mut ClientTabs> {
        match self {
            Self::Client(tabs) => Some(&mut **tabs),
            _ => None,
        }
    }

    pub fn house_tabs_mut(&mut self) -> Option<&mut HouseTabs> {
        match self {
            Self::House(tabs) => Some(&mut **tabs),
            _ => None,
        }
    }
}

/// Detail page facade over the client and house read ports.
pub struct DetailService<C, H>
where
    C: ReadPort<ClientRecord, Id = ClientId>,
    H: ReadPort<HouseRecord, Id = HouseId>,
{
    clients: C,
    houses: H,
}

impl<C, H> DetailService<C, H>
where
    C: ReadPort<ClientRecord, Id = ClientId>,
    H: ReadPort<HouseRecord, Id = HouseId>,
{
    pub fn new(clients: C, houses: H) -> Self {
        Self { clients, houses }
    }

    /// Builds the page for `route`.
    pub fn page_for(&self, route: &Route) -> PageView {
        match route {
            Route::ClientDetail { id } => self.client_page(id),
            Route::Sil => self.house_page(),
            Route::NotFound { path } => PageView::NotFound { path: path.clone() },
            other => PageView::Page {
                route: other.clone(),
                title: other.title(),
            },
        }
    }

    fn client_page(&self, raw_id: &str) -> PageView {
        let Some(id) = ClientId::parse(raw_id) else {
            info!("event=detail_load module=service status=not_found kind=client id={raw_id}");
            return PageView::EntityNotFound {
                kind: EntityKind::Client,
                id: raw_id.to_string(),
            };
        };

        match self.clients.get(&id) {
            Ok(Some(client)) => match client_tabs(client) {
                Ok(tabs) => PageView::Client(Box::new(tabs)),
                Err(err) => unavailable(EntityKind::Client, &PortError::InvalidData(err.to_string())),
            },
            Ok(None) => {
                info!("event=detail_load module=service status=not_found kind=client id={id}");
                PageView::EntityNotFound {
                    kind: EntityKind::Client,
                    id: raw_id.to_string(),
                }
            }
            Err(err) => unavailable(EntityKind::Client, &err),
        }
    }

    /// `/sil` shows the first house of the directory.
    fn house_page(&self) -> PageView {
        match self.houses.list() {
            Ok(houses) => match houses.into_iter().next() {
                Some(house) => match house_tabs(house) {
                    Ok(tabs) => PageView::House(Box::new(tabs)),
                    Err(err) => {
                        unavailable(EntityKind::House, &PortError::InvalidData(err.to_string()))
                    }
                },
                None => {
                    info!("event=detail_load module=service status=not_found kind=house");
                    PageView::EntityNotFound {
                        kind: EntityKind::House,
                        id: String::new(),
                    }
                }
            },
            Err(err) => unavailable(EntityKind::House, &err),
        }
    }
}

fn unavailable(kind: EntityKind, err: &PortError) -> PageView {
    warn!("event=detail_load module=service status=error kind={kind} error={err}");
    PageView::EntityUnavailable {
        kind,
        message: err.to_string(),
    }
}
