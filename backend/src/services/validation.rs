//! Required-field and range checks applied before the domain layer runs.
//!
//! Messages use the `<field> cannot be null!` wording clients already parse.

use crate::error::ApiError;
use common::model::address::Address;
use common::model::city::City;
use common::model::fire_station::FireStation;
use common::model::medication::Medication;
use common::model::person::Person;
use common::model::variant::ServiceVariant;
use common::model::EntityId;
use common::requests::PersonPayload;

pub trait Validate {
    fn validate(&self) -> Result<(), ApiError>;
}

fn require_text(value: &str, field: &str) -> Result<(), ApiError> {
    if value.trim().is_empty() {
        return Err(ApiError::validation(format!("{field} cannot be null!")));
    }
    Ok(())
}

fn require_field(value: &Option<String>, field: &str) -> Result<String, ApiError> {
    match value {
        Some(text) if !text.trim().is_empty() => Ok(text.clone()),
        _ => Err(ApiError::validation(format!("{field} cannot be null!"))),
    }
}

fn require_positive(value: i32, field: &str) -> Result<(), ApiError> {
    if value <= 0 {
        return Err(ApiError::validation(format!(
            "{field} cannot be negative!"
        )));
    }
    Ok(())
}

impl Validate for Address {
    fn validate(&self) -> Result<(), ApiError> {
        require_text(&self.address, "address")
    }
}

impl Validate for City {
    fn validate(&self) -> Result<(), ApiError> {
        require_positive(self.population, "population")?;
        require_text(&self.name, "name")?;
        require_text(&self.area_code, "areaCode")
    }
}

impl Validate for FireStation {
    fn validate(&self) -> Result<(), ApiError> {
        require_positive(self.station_number, "stationNumber")?;
        require_text(&self.address, "address")
    }
}

impl Validate for Medication {
    fn validate(&self) -> Result<(), ApiError> {
        require_text(&self.name, "name")?;
        require_text(&self.dosage, "dosage")
    }
}

/// Builds an unassociated person from `payload`, checking the fields
/// `variant` requires.
pub fn person_from_payload(
    payload: &PersonPayload,
    variant: ServiceVariant,
) -> Result<Person, ApiError> {
    let first_name = require_field(&payload.first_name, "firstName")?;
    let last_name = require_field(&payload.last_name, "lastName")?;
    let phone_number = require_field(&payload.phone_number, "phoneNumber")?;
    require_positive(payload.age, "age")?;
    let age = u32::try_from(payload.age)
        .map_err(|_| ApiError::validation("age cannot be negative!"))?;

    let mut person = Person::new(first_name, last_name, phone_number, age);
    if variant.person_requires_address() {
        person.address = Some(require_field(&payload.address, "address")?);
    }
    if variant.person_requires_email() {
        person.email = Some(require_field(&payload.email, "email")?);
    }
    if variant == ServiceVariant::PersonInfo {
        person.allergies = payload.allergies.clone().unwrap_or_default();
    }
    Ok(person)
}

/// The transient foreign key of a one-to-many payload.
pub fn parent_key(payload: &PersonPayload, variant: ServiceVariant) -> Result<EntityId, ApiError> {
    let field = match variant {
        ServiceVariant::ChildAlert => "addressId",
        ServiceVariant::CommunityEmail => "cityId",
        ServiceVariant::FireStation => "fireStationId",
        ServiceVariant::PersonInfo => "parentId",
    };
    payload
        .parent_id
        .ok_or_else(|| ApiError::validation(format!("{field} cannot be null!")))
}

/// Copies descriptive fields from `details` onto `person`, leaving identity
/// and edges alone. Allergies are only replaced when the payload sent them.
pub fn merge_person_details(person: &mut Person, details: Person, payload: &PersonPayload) {
    person.first_name = details.first_name;
    person.last_name = details.last_name;
    person.phone_number = details.phone_number;
    person.age = details.age;
    person.address = details.address;
    person.email = details.email;
    if payload.allergies.is_some() {
        person.allergies = details.allergies;
    }
}
