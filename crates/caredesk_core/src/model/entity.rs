//! Entity records scoped by tabbed detail views.
//!
//! # Invariants
//! - `ClientId` is the numeric id used in `/client/:id` paths.
//! - `level` only carries meaning for home care package funding.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Numeric client identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClientId(pub u32);

impl ClientId {
    /// Parses the `:id` route segment.
    pub fn parse(segment: &str) -> Option<Self> {
        segment.trim().parse::<u32>().ok().map(Self)
    }
}

impl Display for ClientId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClientStatus {
    Active,
    Inactive,
}

impl ClientStatus {
    pub fn label(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Inactive => "Inactive",
        }
    }
}

/// Funding stream a client is billed against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FundingType {
    HomeCarePackage,
    Ndis,
    Private,
}

impl FundingType {
    pub fn label(self) -> &'static str {
        match self {
            Self::HomeCarePackage => "Home Care Package",
            Self::Ndis => "NDIS",
            Self::Private => "Private",
        }
    }
}

/// Client record injected into the client detail tabs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientRecord {
    pub id: ClientId,
    pub name: String,
    pub status: ClientStatus,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub funding: FundingType,
    pub level: Option<u8>,
}

/// SIL house slug.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HouseId(pub String);

impl Display for HouseId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// SIL house record injected into the house tabs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HouseRecord {
    pub id: HouseId,
    pub name: String,
    pub address: String,
}

#[cfg(test)]
mod tests {
    use super::ClientId;

    #[test]
    fn parses_numeric_client_ids_only() {
        assert_eq!(ClientId::parse("301"), Some(ClientId(301)));
        assert_eq!(ClientId::parse("abc"), None);
        assert_eq!(ClientId::parse("-1"), None);
    }
}
