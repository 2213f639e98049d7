//! In-memory [`Store`] used as a test double for the domain layer.

use super::{Entity, Store, StoreResult};
use common::model::address::Address;
use common::model::city::City;
use common::model::fire_station::FireStation;
use common::model::medication::Medication;
use common::model::person::Person;
use common::model::EntityId;
use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;

/// One id-ordered table of entities.
#[derive(Debug)]
pub struct MemoryTable<E> {
    rows: RefCell<BTreeMap<EntityId, E>>,
    next_id: Cell<EntityId>,
}

impl<E> Default for MemoryTable<E> {
    fn default() -> Self {
        Self {
            rows: RefCell::new(BTreeMap::new()),
            next_id: Cell::new(1),
        }
    }
}

impl<E: Entity> MemoryTable<E> {
    pub fn len(&self) -> usize {
        self.rows.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.borrow().is_empty()
    }

    fn allocate_id(&self, requested: Option<EntityId>) -> EntityId {
        let next = self.next_id.get();
        let id = requested.unwrap_or(next);
        self.next_id.set(next.max(id + 1));
        id
    }
}

impl<E: Entity> Store<E> for MemoryTable<E> {
    fn find_by_id(&self, id: EntityId) -> StoreResult<Option<E>> {
        Ok(self.rows.borrow().get(&id).cloned())
    }

    fn find_by_key(&self, key: &E::Key) -> StoreResult<Vec<E>> {
        Ok(self
            .rows
            .borrow()
            .values()
            .filter(|entity| entity.matches(key))
            .cloned()
            .collect())
    }

    fn save(&self, entity: &E) -> StoreResult<E> {
        let mut stored = entity.clone();
        let id = self.allocate_id(entity.id());
        stored.set_id(id);
        self.rows.borrow_mut().insert(id, stored.clone());
        Ok(stored)
    }

    fn delete(&self, entity: &E) -> StoreResult<()> {
        if let Some(id) = entity.id() {
            self.rows.borrow_mut().remove(&id);
        }
        Ok(())
    }

    fn find_all(&self) -> StoreResult<Vec<E>> {
        Ok(self.rows.borrow().values().cloned().collect())
    }
}

/// Access to the table holding one entity kind.
pub trait HasTable<E> {
    fn table(&self) -> &MemoryTable<E>;
}

/// Every entity kind in one process-local store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    pub addresses: MemoryTable<Address>,
    pub cities: MemoryTable<City>,
    pub fire_stations: MemoryTable<FireStation>,
    pub medications: MemoryTable<Medication>,
    pub people: MemoryTable<Person>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

macro_rules! memory_table {
    ($entity:ty, $field:ident) => {
        impl HasTable<$entity> for MemoryStore {
            fn table(&self) -> &MemoryTable<$entity> {
                &self.$field
            }
        }
    };
}

memory_table!(Address, addresses);
memory_table!(City, cities);
memory_table!(FireStation, fire_stations);
memory_table!(Medication, medications);
memory_table!(Person, people);

fn table<E>(store: &MemoryStore) -> &MemoryTable<E>
where
    MemoryStore: HasTable<E>,
{
    <MemoryStore as HasTable<E>>::table(store)
}

impl<E> Store<E> for MemoryStore
where
    E: Entity,
    MemoryStore: HasTable<E>,
{
    fn find_by_id(&self, id: EntityId) -> StoreResult<Option<E>> {
        table::<E>(self).find_by_id(id)
    }

    fn find_by_key(&self, key: &E::Key) -> StoreResult<Vec<E>> {
        table::<E>(self).find_by_key(key)
    }

    fn save(&self, entity: &E) -> StoreResult<E> {
        table::<E>(self).save(entity)
    }

    fn delete(&self, entity: &E) -> StoreResult<()> {
        table::<E>(self).delete(entity)
    }

    fn find_all(&self) -> StoreResult<Vec<E>> {
        table::<E>(self).find_all()
    }
}
