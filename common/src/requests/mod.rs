//! Inbound request shapes.
//!
//! Payload fields are optional so the boundary can report a missing field
//! with its own message instead of a generic deserialization error.

use crate::model::EntityId;
use serde::Deserialize;

/// Body of a person create or update request.
///
/// `parent_id` is the transient foreign key naming the Address, City or
/// FireStation the person should belong to. It is consumed by the
/// association step and never stored as given. The per-variant field names
/// (`addressId`, `cityId`, `fireStationId`) are accepted as aliases.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonPayload {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone_number: Option<String>,
    #[serde(default)]
    pub age: i32,
    pub address: Option<String>,
    pub email: Option<String>,
    pub allergies: Option<Vec<String>>,
    #[serde(alias = "addressId", alias = "cityId", alias = "fireStationId")]
    pub parent_id: Option<EntityId>,
    /// `None` leaves a person's medications untouched on update; `Some(vec![])`
    /// clears them.
    pub medication_ids: Option<Vec<EntityId>>,
}

/// `GET /childAlert?address=...`
#[derive(Debug, Clone, Deserialize)]
pub struct AddressQuery {
    pub address: String,
}

/// `GET /firestation?stationNumber=...`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StationQuery {
    pub station_number: i32,
}

/// `GET /communityEmail?city=...`
#[derive(Debug, Clone, Deserialize)]
pub struct CityQuery {
    pub city: String,
}

/// `GET /personinfo?firstName=...&lastName=...`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NameQuery {
    pub first_name: String,
    pub last_name: String,
}
