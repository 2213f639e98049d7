use crate::model::EntityId;
use serde::{Deserialize, Serialize};

/// A medication that any number of people may be taking (PersonInfo parent).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Medication {
    #[serde(default)]
    pub id: Option<EntityId>,
    pub name: String,
    /// Free text so the amount and its unit travel together, e.g. `"200mg"`.
    pub dosage: String,
}

impl Medication {
    pub fn new(name: impl Into<String>, dosage: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            dosage: dosage.into(),
        }
    }
}
