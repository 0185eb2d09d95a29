//! Sample records the console ships with until a backend is wired in.

use crate::model::entity::{
    ClientId, ClientRecord, ClientStatus, FundingType, HouseId, HouseRecord,
};
use crate::model::notification::{NotificationCategory, NotificationItem};

// 2024-01-15 14:30 UTC and friends, in epoch milliseconds.
const JAN_15_1430: i64 = 1_705_329_000_000;
const JAN_15_1215: i64 = 1_705_320_900_000;
const JAN_15_1045: i64 = 1_705_315_500_000;
const JAN_14_1620: i64 = 1_705_249_200_000;
const JAN_14_0930: i64 = 1_705_224_600_000;
const JAN_13_1545: i64 = 1_705_160_700_000;

pub fn sample_clients() -> Vec<ClientRecord> {
    vec![
        ClientRecord {
            id: ClientId(301),
            name: "Caren Simpson".to_string(),
            status: ClientStatus::Active,
            phone: "0451 824 000".to_string(),
            email: "caren.simpson@gmail.com".to_string(),
            address: "58 High Avenue, Sorrento 6020, Western Australia".to_string(),
            funding: FundingType::HomeCarePackage,
            level: Some(4),
        },
        ClientRecord {
            id: ClientId(302),
            name: "John Fletcher".to_string(),
            status: ClientStatus::Active,
            phone: "(08) 9234-5678".to_string(),
            email: "john.fletcher@email.com".to_string(),
            address: "12 Beach Road, Scarborough 6019, Western Australia".to_string(),
            funding: FundingType::HomeCarePackage,
            level: Some(3),
        },
        ClientRecord {
            id: ClientId(303),
            name: "Jennifer Brown".to_string(),
            status: ClientStatus::Inactive,
            phone: "(08) 9567-8901".to_string(),
            email: "jennifer.brown@email.com".to_string(),
            address: "9 Lake Street, Perth 6000, Western Australia".to_string(),
            funding: FundingType::Ndis,
            level: None,
        },
    ]
}

pub fn sample_houses() -> Vec<HouseRecord> {
    vec![HouseRecord {
        id: HouseId("subiaco".to_string()),
        name: "Subiaco House".to_string(),
        address: "12 Atkinson Road, Subiaco 6008 WA".to_string(),
    }]
}

/// Six inbox items, two of them unread.
pub fn sample_notifications() -> Vec<NotificationItem> {
    vec![
        NotificationItem::with_id(
            "1",
            "New Incident Report",
            "Kitchen safety incident reported at Subiaco House",
            NotificationCategory::Warning,
            JAN_15_1430,
        )
        .from_sender("Mike Thompson"),
        NotificationItem::with_id(
            "2",
            "Shift Coverage Update",
            "Tomorrow's evening shift has been confirmed",
            NotificationCategory::Success,
            JAN_15_1215,
        )
        .from_sender("Lisa Anderson"),
        NotificationItem::with_id(
            "3",
            "New Participant Admission",
            "Sarah Johnson has been admitted to Subiaco House",
            NotificationCategory::Info,
            JAN_15_1045,
        )
        .from_sender("James Wilson")
        .already_read(),
        NotificationItem::with_id(
            "4",
            "Document Review Required",
            "Care plan for David Chen requires your review",
            NotificationCategory::Info,
            JAN_14_1620,
        )
        .from_sender("Emma Davis")
        .already_read(),
        NotificationItem::with_id(
            "5",
            "Budget Alert",
            "Monthly budget threshold reached for Community Support",
            NotificationCategory::Warning,
            JAN_14_0930,
        )
        .from_sender("System")
        .already_read(),
        NotificationItem::with_id(
            "6",
            "Staff Training Completed",
            "Alex Martinez completed First Aid certification",
            NotificationCategory::Success,
            JAN_13_1545,
        )
        .from_sender("HR Department")
        .already_read(),
    ]
}
