use crate::model::EntityId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A registered resident.
///
/// One record shape serves every service variant; fields a variant does not
/// use stay empty. The association lives here and nowhere else:
/// `parent_id` is the one-to-many back-reference (Address, City or
/// FireStation) and `medication_ids` is the person's side of the
/// many-to-many Medication edge set. Parents expose their people as a view
/// derived from these fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    #[serde(default)]
    pub id: Option<EntityId>,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
    pub age: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub allergies: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<EntityId>,
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub medication_ids: BTreeSet<EntityId>,
}

impl Person {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        phone_number: impl Into<String>,
        age: u32,
    ) -> Self {
        Self {
            id: None,
            first_name: first_name.into(),
            last_name: last_name.into(),
            phone_number: phone_number.into(),
            age,
            address: None,
            email: None,
            allergies: Vec::new(),
            parent_id: None,
            medication_ids: BTreeSet::new(),
        }
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
