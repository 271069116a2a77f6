//! Entity kinds and the record-to-storage conversion contract.

use crate::model::record::Record;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier shared by every zoo record.
pub type EntityId = Uuid;

/// Structured entity kinds managed by the zoo store.
///
/// The activity log is not listed here: it is an append-only text stream
/// without records, ids or a dropdown projection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Address,
    Animal,
    Building,
    Enclosure,
    Foodplan,
    Food,
    Guardian,
    Supplier,
    Territory,
}

impl EntityKind {
    /// Every structured kind, in declaration order.
    pub const ALL: [EntityKind; 9] = [
        Self::Address,
        Self::Animal,
        Self::Building,
        Self::Enclosure,
        Self::Foodplan,
        Self::Food,
        Self::Guardian,
        Self::Supplier,
        Self::Territory,
    ];

    /// Stable lowercase name, also used as the storage table name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Address => "address",
            Self::Animal => "animal",
            Self::Building => "building",
            Self::Enclosure => "enclosure",
            Self::Foodplan => "foodplan",
            Self::Food => "food",
            Self::Guardian => "guardian",
            Self::Supplier => "supplier",
            Self::Territory => "territory",
        }
    }
}

impl Display for EntityKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A domain record that can be persisted through a `StorageContext`.
pub trait Entity {
    /// Kind whose repository accepts this record.
    const KIND: EntityKind;

    /// Flattens the record into ordered column/value pairs.
    fn to_record(&self) -> Record;
}
