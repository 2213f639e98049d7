//! Caller-facing projections of stored people.

use crate::model::medication::Medication;
use crate::model::person::Person;
use serde::{Deserialize, Serialize};

/// One child entry in a ChildAlert response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChildRecord {
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub age: u32,
}

/// Children living at an address. `people` may be empty when every match is
/// an adult; an address with no residents at all never produces this value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChildAlert {
    pub people: Vec<ChildRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StationResident {
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub phone: String,
}

/// Everyone covered by a station number, with age-bracket counters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StationCoverage {
    pub people: Vec<StationResident>,
    pub adult_count: usize,
    pub child_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommunityResident {
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub phone: String,
    pub email: String,
    pub age: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonInfoRecord {
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub phone: String,
    pub age: u32,
    pub allergies: Vec<String>,
    pub medications: Vec<Medication>,
}

/// A parent record together with the people currently associated with it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WithPeople<P> {
    #[serde(flatten)]
    pub parent: P,
    pub people: Vec<Person>,
}
