use crate::model::EntityId;
use serde::{Deserialize, Serialize};

/// A fire station and the area it covers (FireStation parent).
///
/// Several stations may share a `station_number`; coverage queries match all
/// of them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FireStation {
    #[serde(default)]
    pub id: Option<EntityId>,
    pub station_number: i32,
    pub address: String,
}

impl FireStation {
    pub fn new(station_number: i32, address: impl Into<String>) -> Self {
        Self {
            id: None,
            station_number,
            address: address.into(),
        }
    }
}
