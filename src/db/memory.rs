use bson::{Bson, Document as BsonDocument};
use std::collections::{BTreeMap, HashMap};
use std::sync::{Mutex, MutexGuard};

use super::repository::{new_id, Document, Repository, StoreError, StoreHealth};

type Table = BTreeMap<String, BsonDocument>;

/// Process-local store. Documents go through the same BSON encoding as the
/// MongoDB store, so serde attributes behave identically in both.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: Mutex<HashMap<&'static str, Table>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn tables(&self) -> Result<MutexGuard<'_, HashMap<&'static str, Table>>, StoreError> {
        self.tables
            .lock()
            .map_err(|_| StoreError::Database("memory store lock poisoned".to_string()))
    }
}

fn decode<T: Document>(doc: &BsonDocument) -> Result<T, StoreError> {
    Ok(bson::from_document(doc.clone())?)
}

impl<T: Document> Repository<T> for MemoryStore {
    async fn find_all(&self) -> Result<Vec<T>, StoreError> {
        let tables = self.tables()?;
        match tables.get(T::COLLECTION) {
            Some(table) => table.values().map(decode).collect(),
            None => Ok(Vec::new()),
        }
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<T>, StoreError> {
        let tables = self.tables()?;
        tables
            .get(T::COLLECTION)
            .and_then(|table| table.get(id))
            .map(decode)
            .transpose()
    }

    async fn find_by_field(&self, field: &str, value: Bson) -> Result<Vec<T>, StoreError> {
        let tables = self.tables()?;
        match tables.get(T::COLLECTION) {
            Some(table) => table
                .values()
                .filter(|doc| doc.get(field) == Some(&value))
                .map(decode)
                .collect(),
            None => Ok(Vec::new()),
        }
    }

    async fn insert(&self, mut doc: T) -> Result<T, StoreError> {
        let id = match doc.id() {
            Some(id) => id.to_string(),
            None => {
                let id = new_id();
                doc.set_id(id.clone());
                id
            }
        };
        let encoded = bson::to_document(&doc)?;
        let mut tables = self.tables()?;
        let table = tables.entry(T::COLLECTION).or_default();
        if table.contains_key(&id) {
            return Err(StoreError::Database(format!(
                "duplicate key {} in {}",
                id,
                T::COLLECTION
            )));
        }
        table.insert(id, encoded);
        Ok(doc)
    }

    async fn replace(&self, id: &str, mut doc: T) -> Result<Option<T>, StoreError> {
        doc.set_id(id.to_string());
        let encoded = bson::to_document(&doc)?;
        let mut tables = self.tables()?;
        match tables
            .get_mut(T::COLLECTION)
            .and_then(|table| table.get_mut(id))
        {
            Some(slot) => {
                *slot = encoded;
                Ok(Some(doc))
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, id: &str) -> Result<bool, StoreError> {
        let mut tables = self.tables()?;
        Ok(tables
            .get_mut(T::COLLECTION)
            .and_then(|table| table.remove(id))
            .is_some())
    }
}

impl StoreHealth for MemoryStore {
    async fn ping(&self) -> Result<(), StoreError> {
        self.tables().map(|_| ())
    }
}
