//! In-memory read ports.

use crate::model::entity::{ClientId, ClientRecord, HouseId, HouseRecord};
use crate::model::notification::NotificationItem;
use crate::repo::{PortError, PortResult, ReadPort};
use std::collections::BTreeSet;

/// Client directory backed by a vector.
#[derive(Debug, Clone, Default)]
pub struct InMemoryClientDirectory {
    clients: Vec<ClientRecord>,
}

impl InMemoryClientDirectory {
    /// Builds the directory, rejecting duplicate ids.
    pub fn try_new(clients: Vec<ClientRecord>) -> PortResult<Self> {
        let mut seen = BTreeSet::new();
        for client in &clients {
            if !seen.insert(client.id) {
                return Err(PortError::InvalidData(format!(
                    "duplicate client id {}",
                    client.id
                )));
            }
        }
        Ok(Self { clients })
    }
}

impl ReadPort<ClientRecord> for InMemoryClientDirectory {
    type Id = ClientId;

    fn list(&self) -> PortResult<Vec<ClientRecord>> {
        Ok(self.clients.clone())
    }

    fn get(&self, id: &ClientId) -> PortResult<Option<ClientRecord>> {
        Ok(self.clients.iter().find(|client| client.id == *id).cloned())
    }
}

/// House directory backed by a vector.
#[derive(Debug, Clone, Default)]
pub struct InMemoryHouseDirectory {
    houses: Vec<HouseRecord>,
}

impl InMemoryHouseDirectory {
    /// Builds the directory, rejecting duplicate slugs.
    pub fn try_new(houses: Vec<HouseRecord>) -> PortResult<Self> {
        let mut seen = BTreeSet::new();
        for house in &houses {
            if !seen.insert(house.id.clone()) {
                return Err(PortError::InvalidData(format!(
                    "duplicate house id {}",
                    house.id
                )));
            }
        }
        Ok(Self { houses })
    }
}

impl ReadPort<HouseRecord> for InMemoryHouseDirectory {
    type Id = HouseId;

    fn list(&self) -> PortResult<Vec<HouseRecord>> {
        Ok(self.houses.clone())
    }

    fn get(&self, id: &HouseId) -> PortResult<Option<HouseRecord>> {
        Ok(self.houses.iter().find(|house| house.id == *id).cloned())
    }
}

/// Notification feed backed by a vector.
#[derive(Debug, Clone, Default)]
pub struct InMemoryNotificationFeed {
    items: Vec<NotificationItem>,
}

impl InMemoryNotificationFeed {
    /// Builds the feed, rejecting duplicate or blank ids.
    pub fn try_new(items: Vec<NotificationItem>) -> PortResult<Self> {
        let mut seen = BTreeSet::new();
        for item in &items {
            if item.id.trim().is_empty() {
                return Err(PortError::InvalidData(
                    "notification id must not be blank".to_string(),
                ));
            }
            if !seen.insert(item.id.as_str()) {
                return Err(PortError::InvalidData(format!(
                    "duplicate notification id {}",
                    item.id
                )));
            }
        }
        Ok(Self { items })
    }
}

impl ReadPort<NotificationItem> for InMemoryNotificationFeed {
    type Id = str;

    fn list(&self) -> PortResult<Vec<NotificationItem>> {
        Ok(self.items.clone())
    }

    fn get(&self, id: &str) -> PortResult<Option<NotificationItem>> {
        Ok(self.items.iter().find(|item| item.id == id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::{InMemoryClientDirectory, InMemoryNotificationFeed};
    use crate::model::entity::ClientId;
    use crate::model::notification::{NotificationCategory, NotificationItem};
    use crate::repo::seed::sample_clients;
    use crate::repo::{PortError, ReadPort};

    #[test]
    fn client_lookup_by_id() {
        let directory = InMemoryClientDirectory::try_new(sample_clients()).expect("directory");
        let client = directory
            .get(&ClientId(301))
            .expect("lookup")
            .expect("client 301");
        assert_eq!(client.name, "Caren Simpson");
        assert_eq!(directory.get(&ClientId(999)).expect("lookup"), None);
    }

    #[test]
    fn rejects_duplicate_client_ids() {
        let mut clients = sample_clients();
        clients.push(clients[0].clone());
        let err = InMemoryClientDirectory::try_new(clients).expect_err("duplicate must fail");
        assert!(matches!(err, PortError::InvalidData(_)));
    }

    #[test]
    fn rejects_blank_notification_ids() {
        let item = NotificationItem::with_id(" ", "t", "m", NotificationCategory::Info, 0);
        assert!(InMemoryNotificationFeed::try_new(vec![item]).is_err());
    }
}
