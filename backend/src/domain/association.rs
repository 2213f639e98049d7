//! Keeps both sides of every parent/person edge consistent.
//!
//! Mutating operations only change the in-memory `Person`; the caller
//! persists it with one `save`, which writes the whole edge at once. The
//! exceptions are the parent-removal paths, which must touch many people and
//! so persist through the store themselves.

use super::{CoreError, CoreResult, Ownership, Owner, Parent};
use crate::storage::{Store, StoreResult};
use common::model::medication::Medication;
use common::model::person::Person;
use common::model::EntityId;
use log::debug;
use std::collections::BTreeSet;

/// Edges removed from a person by [`AssociationManager::detach`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Detached {
    pub parent_id: Option<EntityId>,
    pub medication_ids: Vec<EntityId>,
}

impl Detached {
    pub fn is_empty(&self) -> bool {
        self.parent_id.is_none() && self.medication_ids.is_empty()
    }
}

pub struct AssociationManager<'s, S> {
    store: &'s S,
}

impl<'s, S> AssociationManager<'s, S>
where
    S: Store<Person>,
{
    pub fn new(store: &'s S) -> Self {
        Self { store }
    }

    /// Loads parent `id`, failing with `NotFound` when it does not exist.
    pub fn resolve<P>(&self, id: EntityId) -> CoreResult<P>
    where
        P: Parent,
        S: Store<P>,
    {
        <S as Store<P>>::find_by_id(self.store, id)?
            .ok_or(CoreError::NotFound { kind: P::KIND, id })
    }

    /// Points `person` at parent `parent_id`.
    ///
    /// Attaching again to the same parent changes nothing, so membership is
    /// never duplicated.
    pub fn attach<P>(&self, person: &mut Person, parent_id: EntityId) -> CoreResult<P>
    where
        P: Owner,
        S: Store<P>,
    {
        let parent: P = self.resolve(parent_id)?;
        person.parent_id = Some(parent_id);
        debug!("Attached {} to {} {}", person.full_name(), P::KIND, parent_id);
        Ok(parent)
    }

    /// Moves `person` from its current parent to `new_parent_id`.
    ///
    /// The old membership disappears in the same step the new one appears,
    /// including when both are the same parent.
    pub fn reattach<P>(&self, person: &mut Person, new_parent_id: EntityId) -> CoreResult<P>
    where
        P: Owner,
        S: Store<P>,
    {
        let parent: P = self.resolve(new_parent_id)?;
        let previous = person.parent_id.replace(new_parent_id);
        match previous {
            Some(old) if old != new_parent_id => debug!(
                "Moved {} from {} {} to {}",
                person.full_name(),
                P::KIND,
                old,
                new_parent_id
            ),
            _ => debug!(
                "Kept {} under {} {}",
                person.full_name(),
                P::KIND,
                new_parent_id
            ),
        }
        Ok(parent)
    }

    /// Clears every edge `person` participates in. A person with no edges is
    /// left unchanged.
    pub fn detach(&self, person: &mut Person) -> Detached {
        let detached = Detached {
            parent_id: person.parent_id.take(),
            medication_ids: std::mem::take(&mut person.medication_ids)
                .into_iter()
                .collect(),
        };
        if !detached.is_empty() {
            debug!("Detached {}: {:?}", person.full_name(), detached);
        }
        detached
    }

    /// Replaces the medications `person` holds with `medication_ids`.
    ///
    /// All ids are resolved before the person is touched; the first one that
    /// does not exist is reported and the current set stays in place.
    /// Duplicate ids collapse to one edge.
    pub fn set_medications(
        &self,
        person: &mut Person,
        medication_ids: &[EntityId],
    ) -> CoreResult<Vec<Medication>>
    where
        S: Store<Medication>,
    {
        let wanted: BTreeSet<EntityId> = medication_ids.iter().copied().collect();
        let mut resolved = Vec::with_capacity(wanted.len());
        for id in &wanted {
            resolved.push(self.resolve::<Medication>(*id)?);
        }
        person.medication_ids = wanted;
        debug!(
            "Set medications of {} to {:?}",
            person.full_name(),
            person.medication_ids
        );
        Ok(resolved)
    }

    /// The people currently associated with `parent`.
    pub fn owned<P>(&self, parent: &P) -> CoreResult<Vec<Person>>
    where
        P: Parent,
    {
        match parent.id() {
            Some(id) => Ok(self.store.find_by_key(&P::people_key(id))?),
            None => Ok(Vec::new()),
        }
    }

    /// Deletes every person owned by `parent` and returns them.
    ///
    /// Called before the parent itself is deleted so no person is left
    /// pointing at a missing parent. For a shared parent this would delete
    /// every holder; [`release_parent`](Self::release_parent) only routes
    /// exclusive parents here.
    pub fn cascade_delete_parent<P>(&self, parent: &P) -> CoreResult<Vec<Person>>
    where
        P: Parent,
    {
        let people = self.owned(parent)?;
        for person in &people {
            self.store.delete(person)?;
        }
        debug!(
            "Cascade deleted {} people of {} {:?}",
            people.len(),
            P::KIND,
            parent.id()
        );
        Ok(people)
    }

    /// Prepares `parent` for deletion according to how it holds its people.
    ///
    /// Exclusive parents cascade; shared parents are removed from each
    /// holder, which is saved, and no person is deleted. Returns the people
    /// affected.
    pub fn release_parent<P>(&self, parent: &P) -> CoreResult<Vec<Person>>
    where
        P: Parent,
    {
        let id = match (P::OWNERSHIP, parent.id()) {
            (_, None) => return Ok(Vec::new()),
            (Ownership::Exclusive, Some(_)) => return self.cascade_delete_parent(parent),
            (Ownership::Shared, Some(id)) => id,
        };
        let people = self.owned(parent)?;
        for person in &people {
            let mut holder = person.clone();
            holder.medication_ids.remove(&id);
            self.store.save(&holder)?;
        }
        debug!(
            "Released {} people from {} {}",
            people.len(),
            P::KIND,
            id
        );
        Ok(people)
    }

    /// Persists `person` through the store.
    pub fn save(&self, person: &Person) -> StoreResult<Person> {
        self.store.save(person)
    }
}
