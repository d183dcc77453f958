use serde::{Deserialize, Serialize};

use crate::profile::GameVersion;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub version: GameVersion,
    pub profile_name: String,
    pub size: usize,
    pub stored_checksum: u8,
    pub calculated_checksum: u8,
    pub money: u32,
    pub bag: Vec<BagItemEntry>,
    pub bag_capacity: usize,
    pub sha256: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BagItemEntry {
    pub id: u8,
    pub quantity: u8,
    pub name: String,
}

/// One field mutation. A batch is applied in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Edit {
    SetMoney { amount: u32 },
    SetItem { id: u8, quantity: u8 },
    RemoveItem { id: u8 },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "change", rename_all = "snake_case")]
pub enum PlannedChange {
    Money {
        from: u32,
        to: u32,
    },
    SetItem {
        id: u8,
        name: String,
        from: Option<u8>,
        to: u8,
    },
    RemoveItem {
        id: u8,
        name: String,
        quantity: u8,
    },
}

impl PlannedChange {
    pub fn is_new_item(&self) -> bool {
        matches!(self, Self::SetItem { from: None, .. })
    }
}
