//! SQLite-backed [`Store`].
//!
//! Ids come from `INTEGER PRIMARY KEY AUTOINCREMENT`, so a deleted id is
//! never handed out again. A person's allergies and medication edges live in
//! child tables; saving or deleting a person rewrites its row and those child
//! rows inside one transaction, or inside the caller's when
//! [`SqliteStore::atomically`] has one open.

use super::{Entity, PersonKey, Store, StoreError, StoreResult};
use common::model::address::Address;
use common::model::city::City;
use common::model::fire_station::FireStation;
use common::model::medication::Medication;
use common::model::person::Person;
use common::model::EntityId;
use log::{debug, info};
use rusqlite::{params, Connection, OptionalExtension, Params, Row};
use std::collections::BTreeSet;
use std::path::Path;

const SCHEMA_SQL: &str = "
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS addresses (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    address TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS cities (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    population INTEGER NOT NULL,
    name TEXT NOT NULL,
    area_code TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS fire_stations (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    station_number INTEGER NOT NULL,
    address TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS medications (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    dosage TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS people (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    first_name TEXT NOT NULL,
    last_name TEXT NOT NULL,
    phone_number TEXT NOT NULL,
    age INTEGER NOT NULL,
    address TEXT,
    email TEXT,
    parent_id INTEGER
);

CREATE INDEX IF NOT EXISTS idx_people_parent_id ON people(parent_id);
CREATE INDEX IF NOT EXISTS idx_people_name ON people(first_name, last_name);

CREATE TABLE IF NOT EXISTS person_allergies (
    person_id INTEGER NOT NULL REFERENCES people(id) ON DELETE CASCADE,
    position INTEGER NOT NULL,
    allergy TEXT NOT NULL,
    PRIMARY KEY (person_id, position)
);

CREATE TABLE IF NOT EXISTS person_medications (
    person_id INTEGER NOT NULL REFERENCES people(id) ON DELETE CASCADE,
    medication_id INTEGER NOT NULL REFERENCES medications(id) ON DELETE CASCADE,
    PRIMARY KEY (person_id, medication_id)
);
";

const PERSON_SELECT_SQL: &str = "SELECT
    p.id,
    p.first_name,
    p.last_name,
    p.phone_number,
    p.age,
    p.address,
    p.email,
    p.parent_id
FROM people p";

pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Opens (or creates) a database file and ensures the schema exists.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref();
        info!("Opening SQLite database at {}", path.display());
        Self::bootstrap(Connection::open(path)?)
    }

    pub fn open_in_memory() -> StoreResult<Self> {
        info!("Opening in-memory SQLite database");
        Self::bootstrap(Connection::open_in_memory()?)
    }

    fn bootstrap(conn: Connection) -> StoreResult<Self> {
        conn.execute_batch(SCHEMA_SQL)?;
        Ok(Self { conn })
    }

    fn query_all<T, P, F>(&self, sql: &str, params: P, map: F) -> StoreResult<Vec<T>>
    where
        P: Params,
        F: FnMut(&Row<'_>) -> rusqlite::Result<T>,
    {
        let mut stmt = self.conn.prepare(sql)?;
        let rows = stmt.query_map(params, map)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    fn query_one<T, P, F>(&self, sql: &str, params: P, map: F) -> StoreResult<Option<T>>
    where
        P: Params,
        F: FnOnce(&Row<'_>) -> rusqlite::Result<T>,
    {
        Ok(self.conn.query_row(sql, params, map).optional()?)
    }

    /// Runs `work` inside one transaction, committing only when it succeeds.
    ///
    /// Person writes issued by `work` join this transaction instead of
    /// opening their own, so a failure part-way rolls back every row.
    pub fn atomically<T, E, F>(&self, work: F) -> Result<T, E>
    where
        E: From<StoreError>,
        F: FnOnce(&Self) -> Result<T, E>,
    {
        let tx = self
            .conn
            .unchecked_transaction()
            .map_err(StoreError::from)?;
        let value = work(self)?;
        tx.commit().map_err(StoreError::from)?;
        Ok(value)
    }

    /// Runs a multi-statement write in its own transaction, or in the
    /// caller's when one is already open.
    fn write<T>(&self, work: impl FnOnce(&Connection) -> StoreResult<T>) -> StoreResult<T> {
        if !self.conn.is_autocommit() {
            return work(&self.conn);
        }
        let tx = self.conn.unchecked_transaction()?;
        let value = work(&*tx)?;
        tx.commit()?;
        Ok(value)
    }

    /// Id of a row just written by an upsert.
    fn saved_id(&self, requested: Option<EntityId>) -> EntityId {
        requested.unwrap_or_else(|| self.conn.last_insert_rowid())
    }

    fn load_people<P: Params>(&self, sql: &str, params: P) -> StoreResult<Vec<Person>> {
        self.query_all(sql, params, person_from_row)?
            .into_iter()
            .map(|person| self.hydrate(person))
            .collect()
    }

    /// Fills in the child-table collections of a freshly read person row.
    fn hydrate(&self, mut person: Person) -> StoreResult<Person> {
        let Some(id) = person.id else {
            return Err(StoreError::InvalidData {
                kind: Person::KIND,
                message: "row without id".to_string(),
            });
        };
        person.allergies = self.query_all(
            "SELECT allergy FROM person_allergies WHERE person_id = ?1 ORDER BY position",
            params![id],
            |row| row.get(0),
        )?;
        person.medication_ids = self
            .query_all(
                "SELECT medication_id FROM person_medications WHERE person_id = ?1",
                params![id],
                |row| row.get(0),
            )?
            .into_iter()
            .collect::<BTreeSet<EntityId>>();
        Ok(person)
    }
}

fn person_from_row(row: &Row<'_>) -> rusqlite::Result<Person> {
    Ok(Person {
        id: row.get(0)?,
        first_name: row.get(1)?,
        last_name: row.get(2)?,
        phone_number: row.get(3)?,
        age: row.get(4)?,
        address: row.get(5)?,
        email: row.get(6)?,
        allergies: Vec::new(),
        parent_id: row.get(7)?,
        medication_ids: BTreeSet::new(),
    })
}

fn address_from_row(row: &Row<'_>) -> rusqlite::Result<Address> {
    Ok(Address {
        id: row.get(0)?,
        address: row.get(1)?,
    })
}

fn city_from_row(row: &Row<'_>) -> rusqlite::Result<City> {
    Ok(City {
        id: row.get(0)?,
        population: row.get(1)?,
        name: row.get(2)?,
        area_code: row.get(3)?,
    })
}

fn fire_station_from_row(row: &Row<'_>) -> rusqlite::Result<FireStation> {
    Ok(FireStation {
        id: row.get(0)?,
        station_number: row.get(1)?,
        address: row.get(2)?,
    })
}

fn medication_from_row(row: &Row<'_>) -> rusqlite::Result<Medication> {
    Ok(Medication {
        id: row.get(0)?,
        name: row.get(1)?,
        dosage: row.get(2)?,
    })
}

impl Store<Person> for SqliteStore {
    fn find_by_id(&self, id: EntityId) -> StoreResult<Option<Person>> {
        let sql = format!("{PERSON_SELECT_SQL} WHERE p.id = ?1");
        match self.query_one(&sql, params![id], person_from_row)? {
            Some(person) => Ok(Some(self.hydrate(person)?)),
            None => Ok(None),
        }
    }

    fn find_by_key(&self, key: &PersonKey) -> StoreResult<Vec<Person>> {
        match key {
            PersonKey::Parent(parent_id) => self.load_people(
                &format!("{PERSON_SELECT_SQL} WHERE p.parent_id = ?1 ORDER BY p.id"),
                params![parent_id],
            ),
            PersonKey::Medication(medication_id) => self.load_people(
                &format!(
                    "{PERSON_SELECT_SQL}
                     JOIN person_medications pm ON pm.person_id = p.id
                     WHERE pm.medication_id = ?1
                     ORDER BY p.id"
                ),
                params![medication_id],
            ),
            PersonKey::Name {
                first_name,
                last_name,
            } => self.load_people(
                &format!(
                    "{PERSON_SELECT_SQL} WHERE p.first_name = ?1 AND p.last_name = ?2 ORDER BY p.id"
                ),
                params![first_name, last_name],
            ),
        }
    }

    fn save(&self, person: &Person) -> StoreResult<Person> {
        let id = self.write(|conn| {
            conn.execute(
                "INSERT INTO people (
                    id,
                    first_name,
                    last_name,
                    phone_number,
                    age,
                    address,
                    email,
                    parent_id
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
                ON CONFLICT(id) DO UPDATE SET
                    first_name = excluded.first_name,
                    last_name = excluded.last_name,
                    phone_number = excluded.phone_number,
                    age = excluded.age,
                    address = excluded.address,
                    email = excluded.email,
                    parent_id = excluded.parent_id",
                params![
                    person.id,
                    person.first_name,
                    person.last_name,
                    person.phone_number,
                    person.age,
                    person.address,
                    person.email,
                    person.parent_id,
                ],
            )?;
            let id = person.id.unwrap_or_else(|| conn.last_insert_rowid());

            conn.execute(
                "DELETE FROM person_allergies WHERE person_id = ?1",
                params![id],
            )?;
            for (position, allergy) in person.allergies.iter().enumerate() {
                conn.execute(
                    "INSERT INTO person_allergies (person_id, position, allergy) VALUES (?1, ?2, ?3)",
                    params![id, position as i64, allergy],
                )?;
            }

            conn.execute(
                "DELETE FROM person_medications WHERE person_id = ?1",
                params![id],
            )?;
            for medication_id in &person.medication_ids {
                conn.execute(
                    "INSERT INTO person_medications (person_id, medication_id) VALUES (?1, ?2)",
                    params![id, medication_id],
                )?;
            }
            Ok(id)
        })?;

        debug!("Saved person {id}");
        let mut saved = person.clone();
        saved.id = Some(id);
        Ok(saved)
    }

    fn delete(&self, person: &Person) -> StoreResult<()> {
        let Some(id) = person.id else {
            return Ok(());
        };
        self.write(|conn| {
            conn.execute(
                "DELETE FROM person_allergies WHERE person_id = ?1",
                params![id],
            )?;
            conn.execute(
                "DELETE FROM person_medications WHERE person_id = ?1",
                params![id],
            )?;
            conn.execute("DELETE FROM people WHERE id = ?1", params![id])?;
            Ok(())
        })?;
        debug!("Deleted person {id}");
        Ok(())
    }

    fn find_all(&self) -> StoreResult<Vec<Person>> {
        self.load_people(&format!("{PERSON_SELECT_SQL} ORDER BY p.id"), [])
    }
}

impl Store<Address> for SqliteStore {
    fn find_by_id(&self, id: EntityId) -> StoreResult<Option<Address>> {
        self.query_one(
            "SELECT id, address FROM addresses WHERE id = ?1",
            params![id],
            address_from_row,
        )
    }

    fn find_by_key(&self, address: &String) -> StoreResult<Vec<Address>> {
        self.query_all(
            "SELECT id, address FROM addresses WHERE address = ?1 ORDER BY id",
            params![address],
            address_from_row,
        )
    }

    fn save(&self, address: &Address) -> StoreResult<Address> {
        self.conn.execute(
            "INSERT INTO addresses (id, address) VALUES (?1, ?2)
             ON CONFLICT(id) DO UPDATE SET address = excluded.address",
            params![address.id, address.address],
        )?;
        let mut saved = address.clone();
        saved.id = Some(self.saved_id(address.id));
        Ok(saved)
    }

    fn delete(&self, address: &Address) -> StoreResult<()> {
        self.conn
            .execute("DELETE FROM addresses WHERE id = ?1", params![address.id])?;
        Ok(())
    }

    fn find_all(&self) -> StoreResult<Vec<Address>> {
        self.query_all(
            "SELECT id, address FROM addresses ORDER BY id",
            [],
            address_from_row,
        )
    }
}

impl Store<City> for SqliteStore {
    fn find_by_id(&self, id: EntityId) -> StoreResult<Option<City>> {
        self.query_one(
            "SELECT id, population, name, area_code FROM cities WHERE id = ?1",
            params![id],
            city_from_row,
        )
    }

    fn find_by_key(&self, name: &String) -> StoreResult<Vec<City>> {
        self.query_all(
            "SELECT id, population, name, area_code FROM cities WHERE name = ?1 ORDER BY id",
            params![name],
            city_from_row,
        )
    }

    fn save(&self, city: &City) -> StoreResult<City> {
        self.conn.execute(
            "INSERT INTO cities (id, population, name, area_code) VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(id) DO UPDATE SET
                population = excluded.population,
                name = excluded.name,
                area_code = excluded.area_code",
            params![city.id, city.population, city.name, city.area_code],
        )?;
        let mut saved = city.clone();
        saved.id = Some(self.saved_id(city.id));
        Ok(saved)
    }

    fn delete(&self, city: &City) -> StoreResult<()> {
        self.conn
            .execute("DELETE FROM cities WHERE id = ?1", params![city.id])?;
        Ok(())
    }

    fn find_all(&self) -> StoreResult<Vec<City>> {
        self.query_all(
            "SELECT id, population, name, area_code FROM cities ORDER BY id",
            [],
            city_from_row,
        )
    }
}

impl Store<FireStation> for SqliteStore {
    fn find_by_id(&self, id: EntityId) -> StoreResult<Option<FireStation>> {
        self.query_one(
            "SELECT id, station_number, address FROM fire_stations WHERE id = ?1",
            params![id],
            fire_station_from_row,
        )
    }

    fn find_by_key(&self, station_number: &i32) -> StoreResult<Vec<FireStation>> {
        self.query_all(
            "SELECT id, station_number, address FROM fire_stations
             WHERE station_number = ?1 ORDER BY id",
            params![station_number],
            fire_station_from_row,
        )
    }

    fn save(&self, station: &FireStation) -> StoreResult<FireStation> {
        self.conn.execute(
            "INSERT INTO fire_stations (id, station_number, address) VALUES (?1, ?2, ?3)
             ON CONFLICT(id) DO UPDATE SET
                station_number = excluded.station_number,
                address = excluded.address",
            params![station.id, station.station_number, station.address],
        )?;
        let mut saved = station.clone();
        saved.id = Some(self.saved_id(station.id));
        Ok(saved)
    }

    fn delete(&self, station: &FireStation) -> StoreResult<()> {
        self.conn
            .execute("DELETE FROM fire_stations WHERE id = ?1", params![station.id])?;
        Ok(())
    }

    fn find_all(&self) -> StoreResult<Vec<FireStation>> {
        self.query_all(
            "SELECT id, station_number, address FROM fire_stations ORDER BY id",
            [],
            fire_station_from_row,
        )
    }
}

impl Store<Medication> for SqliteStore {
    fn find_by_id(&self, id: EntityId) -> StoreResult<Option<Medication>> {
        self.query_one(
            "SELECT id, name, dosage FROM medications WHERE id = ?1",
            params![id],
            medication_from_row,
        )
    }

    fn find_by_key(&self, name: &String) -> StoreResult<Vec<Medication>> {
        self.query_all(
            "SELECT id, name, dosage FROM medications WHERE name = ?1 ORDER BY id",
            params![name],
            medication_from_row,
        )
    }

    fn save(&self, medication: &Medication) -> StoreResult<Medication> {
        self.conn.execute(
            "INSERT INTO medications (id, name, dosage) VALUES (?1, ?2, ?3)
             ON CONFLICT(id) DO UPDATE SET
                name = excluded.name,
                dosage = excluded.dosage",
            params![medication.id, medication.name, medication.dosage],
        )?;
        let mut saved = medication.clone();
        saved.id = Some(self.saved_id(medication.id));
        Ok(saved)
    }

    // Edge rows go with the medication through ON DELETE CASCADE.
    fn delete(&self, medication: &Medication) -> StoreResult<()> {
        self.conn
            .execute("DELETE FROM medications WHERE id = ?1", params![medication.id])?;
        Ok(())
    }

    fn find_all(&self) -> StoreResult<Vec<Medication>> {
        self.query_all(
            "SELECT id, name, dosage FROM medications ORDER BY id",
            [],
            medication_from_row,
        )
    }
}
