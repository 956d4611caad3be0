//! Record store boundary.
//!
//! The ledger never talks to storage directly; it is handed something that
//! can load and replace whole collections. [`MemoryStore`] keeps each
//! collection as a JSON string under a fixed key, the same shape a browser
//! key-value store would hold.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use tracing::debug;

use crate::errors::{LedgerError, Result};
use crate::model::{Payment, Resident, Room};

/// named collections held by a record store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Residents,
    Rooms,
    Payments,
}

impl Collection {
    pub fn key(&self) -> &'static str {
        match self {
            Collection::Residents => "residents",
            Collection::Rooms => "rooms",
            Collection::Payments => "payments",
        }
    }
}

/// whole-collection persistence
pub trait RecordStore {
    /// all records of a collection; an absent collection is empty
    fn load_all<T: DeserializeOwned>(&self, collection: Collection) -> Result<Vec<T>>;

    /// replace a collection with `records`
    fn save_all<T: Serialize>(&mut self, collection: Collection, records: &[T]) -> Result<()>;
}

/// in-memory store holding serialized collections
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// raw serialized value under `key`
    pub fn raw(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// overwrite the raw value under `key`
    pub fn put_raw(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }
}

impl RecordStore for MemoryStore {
    fn load_all<T: DeserializeOwned>(&self, collection: Collection) -> Result<Vec<T>> {
        match self.entries.get(collection.key()) {
            Some(json) => serde_json::from_str(json).map_err(|err| LedgerError::Store {
                message: format!("corrupt {} collection: {err}", collection.key()),
            }),
            None => Ok(Vec::new()),
        }
    }

    fn save_all<T: Serialize>(&mut self, collection: Collection, records: &[T]) -> Result<()> {
        let json = serde_json::to_string(records)?;
        debug!(collection = collection.key(), count = records.len(), "saving collection");
        self.entries.insert(collection.key().to_string(), json);
        Ok(())
    }
}

/// residents, rooms and payments read together before any calculation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LedgerSnapshot {
    pub residents: Vec<Resident>,
    pub rooms: Vec<Room>,
    pub payments: Vec<Payment>,
}

impl LedgerSnapshot {
    pub fn load<S: RecordStore>(store: &S) -> Result<Self> {
        Ok(Self {
            residents: store.load_all(Collection::Residents)?,
            rooms: store.load_all(Collection::Rooms)?,
            payments: store.load_all(Collection::Payments)?,
        })
    }

    pub fn resident(&self, id: crate::types::ResidentId) -> Result<&Resident> {
        self.residents
            .iter()
            .find(|r| r.id == id)
            .ok_or(LedgerError::ResidentNotFound { id })
    }

    pub fn room(&self, id: crate::types::RoomId) -> Option<&Room> {
        self.rooms.iter().find(|r| r.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decimal::Money;

    #[test]
    fn test_missing_collection_is_empty() {
        let store = MemoryStore::new();
        let rooms: Vec<Room> = store.load_all(Collection::Rooms).unwrap();
        assert!(rooms.is_empty());
    }

    #[test]
    fn test_save_replaces_collection() {
        let mut store = MemoryStore::new();
        let first = vec![Room::new("101", 2, Money::from_major(5_000))];
        let second = vec![
            Room::new("201", 1, Money::from_major(7_000)),
            Room::new("202", 3, Money::from_major(4_000)),
        ];

        store.save_all(Collection::Rooms, &first).unwrap();
        store.save_all(Collection::Rooms, &second).unwrap();

        let loaded: Vec<Room> = store.load_all(Collection::Rooms).unwrap();
        assert_eq!(loaded, second);
        assert!(store.raw("rooms").is_some());
    }

    #[test]
    fn test_corrupt_collection_is_store_error() {
        let mut store = MemoryStore::new();
        store.put_raw("payments", "{not json");

        let err = LedgerSnapshot::load(&store).unwrap_err();
        assert!(matches!(err, LedgerError::Store { .. }));
    }
}
