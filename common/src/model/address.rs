use crate::model::EntityId;
use serde::{Deserialize, Serialize};

/// A street address that people live at (ChildAlert parent).
///
/// Keeping the address as its own record lets several people share one row
/// instead of each carrying a copy of the text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    #[serde(default)]
    pub id: Option<EntityId>,
    pub address: String,
}

impl Address {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            id: None,
            address: address.into(),
        }
    }
}
