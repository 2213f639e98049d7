use crate::model::EntityId;
use serde::{Deserialize, Serialize};

/// A city that residents are registered in (CommunityEmail parent).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct City {
    #[serde(default)]
    pub id: Option<EntityId>,
    /// Census figure, not the number of registered residents.
    pub population: i32,
    pub name: String,
    pub area_code: String,
}

impl City {
    pub fn new(name: impl Into<String>, population: i32, area_code: impl Into<String>) -> Self {
        Self {
            id: None,
            population,
            name: name.into(),
            area_code: area_code.into(),
        }
    }
}
