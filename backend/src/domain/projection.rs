//! Turns matched people into the response shape of each query endpoint.
//!
//! Every projection distinguishes "nothing matched" from "matched, but the
//! filtered list is empty". The pure `project_*` functions return `None` for
//! the first case; [`AggregationProjector`] turns that into
//! [`CoreError::EmptyMatch`].

use super::{CoreError, CoreResult, Parent};
use crate::storage::{PersonKey, Store};
use common::model::address::Address;
use common::model::city::City;
use common::model::fire_station::FireStation;
use common::model::medication::Medication;
use common::model::person::Person;
use common::model::EntityId;
use common::responses::{
    ChildAlert, ChildRecord, CommunityResident, PersonInfoRecord, StationCoverage,
    StationResident,
};
use std::collections::BTreeMap;

/// Age used by both age rules. ChildAlert lists people strictly younger;
/// FireStation counts people strictly older as adults, so someone exactly
/// this age is a child there and absent from ChildAlert.
pub const ADULT_AGE: u32 = 18;

pub fn project_children(people: &[Person]) -> Option<ChildAlert> {
    if people.is_empty() {
        return None;
    }
    let children = people
        .iter()
        .filter(|person| person.age < ADULT_AGE)
        .map(|person| ChildRecord {
            first_name: person.first_name.clone(),
            last_name: person.last_name.clone(),
            phone: person.phone_number.clone(),
            age: person.age,
        })
        .collect();
    Some(ChildAlert { people: children })
}

pub fn project_station(people: &[Person]) -> Option<StationCoverage> {
    if people.is_empty() {
        return None;
    }
    let adult_count = people
        .iter()
        .filter(|person| person.age > ADULT_AGE)
        .count();
    let residents = people
        .iter()
        .map(|person| StationResident {
            first_name: person.first_name.clone(),
            last_name: person.last_name.clone(),
            address: person.address.clone().unwrap_or_default(),
            phone: person.phone_number.clone(),
        })
        .collect();
    Some(StationCoverage {
        people: residents,
        adult_count,
        child_count: people.len() - adult_count,
    })
}

pub fn project_community(people: &[Person]) -> Option<Vec<CommunityResident>> {
    if people.is_empty() {
        return None;
    }
    Some(
        people
            .iter()
            .map(|person| CommunityResident {
                first_name: person.first_name.clone(),
                last_name: person.last_name.clone(),
                address: person.address.clone().unwrap_or_default(),
                phone: person.phone_number.clone(),
                email: person.email.clone().unwrap_or_default(),
                age: person.age,
            })
            .collect(),
    )
}

/// `medications` must hold every id referenced by `people`; ids missing from
/// it are skipped.
pub fn project_person_info(
    people: &[Person],
    medications: &BTreeMap<EntityId, Medication>,
) -> Option<Vec<PersonInfoRecord>> {
    if people.is_empty() {
        return None;
    }
    Some(
        people
            .iter()
            .map(|person| PersonInfoRecord {
                first_name: person.first_name.clone(),
                last_name: person.last_name.clone(),
                address: person.address.clone().unwrap_or_default(),
                phone: person.phone_number.clone(),
                age: person.age,
                allergies: person.allergies.clone(),
                medications: person
                    .medication_ids
                    .iter()
                    .filter_map(|id| medications.get(id).cloned())
                    .collect(),
            })
            .collect(),
    )
}

/// Runs each query endpoint against the store.
pub struct AggregationProjector<'s, S> {
    store: &'s S,
}

impl<'s, S> AggregationProjector<'s, S>
where
    S: Store<Person>,
{
    pub fn new(store: &'s S) -> Self {
        Self { store }
    }

    /// People under every parent matching `key`, grouped by parent id.
    fn people_under<P>(&self, key: &P::Key) -> CoreResult<Vec<Person>>
    where
        P: Parent,
        S: Store<P>,
    {
        let mut people = Vec::new();
        for parent in <S as Store<P>>::find_by_key(self.store, key)? {
            if let Some(id) = parent.id() {
                people.extend(<S as Store<Person>>::find_by_key(
                    self.store,
                    &P::people_key(id),
                )?);
            }
        }
        Ok(people)
    }

    pub fn child_alert(&self, address: &str) -> CoreResult<ChildAlert>
    where
        S: Store<Address>,
    {
        let people = self.people_under::<Address>(&address.to_string())?;
        project_children(&people).ok_or_else(|| CoreError::EmptyMatch {
            key: format!("address `{address}`"),
        })
    }

    pub fn station_coverage(&self, station_number: i32) -> CoreResult<StationCoverage>
    where
        S: Store<FireStation>,
    {
        let people = self.people_under::<FireStation>(&station_number)?;
        project_station(&people).ok_or_else(|| CoreError::EmptyMatch {
            key: format!("station number {station_number}"),
        })
    }

    pub fn community(&self, city: &str) -> CoreResult<Vec<CommunityResident>>
    where
        S: Store<City>,
    {
        let people = self.people_under::<City>(&city.to_string())?;
        project_community(&people).ok_or_else(|| CoreError::EmptyMatch {
            key: format!("city `{city}`"),
        })
    }

    pub fn person_info(&self, first_name: &str, last_name: &str) -> CoreResult<Vec<PersonInfoRecord>>
    where
        S: Store<Medication>,
    {
        let people = <S as Store<Person>>::find_by_key(
            self.store,
            &PersonKey::Name {
                first_name: first_name.to_string(),
                last_name: last_name.to_string(),
            },
        )?;
        let mut medications = BTreeMap::new();
        for id in people.iter().flat_map(|person| person.medication_ids.iter()) {
            if medications.contains_key(id) {
                continue;
            }
            if let Some(medication) = <S as Store<Medication>>::find_by_id(self.store, *id)? {
                medications.insert(*id, medication);
            }
        }
        project_person_info(&people, &medications).ok_or_else(|| CoreError::EmptyMatch {
            key: format!("name `{first_name} {last_name}`"),
        })
    }
}
