//! Record store interface and in-memory backend.
//!
//! The API layer talks to its collections through the [`RecordStore`]
//! trait so that every test run can inject a fresh store instead of
//! sharing process-global state. The only backend is [`InMemoryStore`];
//! records live for the lifetime of the store and are kept in
//! insertion order.

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

/// A record that can report its unique string id.
pub trait Keyed {
    fn key(&self) -> &str;
}

/// An ordered collection of records keyed by unique string id.
///
/// `list` returns records in insertion order. Lookup is by linear
/// scan, which is fine at the scale these stores hold.
#[async_trait]
pub trait RecordStore<T: Keyed>: Send + Sync {
    /// All records, in insertion order.
    async fn list(&self) -> Vec<T>;

    /// Find a record by id.
    async fn find(&self, id: &str) -> Option<T>;

    /// Append a new record.
    async fn append(&self, record: T);

    /// Replace the stored record with the same key. Returns `false`
    /// if no such record exists.
    async fn replace(&self, record: T) -> bool;

    /// Remove a record by id. Returns `false` if no such record exists.
    async fn remove(&self, id: &str) -> bool;
}

/// Generate a fresh unique record id. Ids are never reused.
pub fn next_id() -> String {
    Uuid::new_v4().to_string()
}

/// In-memory record store backed by a `Vec` under an async lock.
pub struct InMemoryStore<T> {
    records: RwLock<Vec<T>>,
}

impl<T> InMemoryStore<T> {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(Vec::new()),
        }
    }
}

impl<T> Default for InMemoryStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T> RecordStore<T> for InMemoryStore<T>
where
    T: Keyed + Clone + Send + Sync,
{
    async fn list(&self) -> Vec<T> {
        self.records.read().await.clone()
    }

    async fn find(&self, id: &str) -> Option<T> {
        self.records
            .read()
            .await
            .iter()
            .find(|r| r.key() == id)
            .cloned()
    }

    async fn append(&self, record: T) {
        self.records.write().await.push(record);
    }

    async fn replace(&self, record: T) -> bool {
        let mut records = self.records.write().await;
        match records.iter().position(|r| r.key() == record.key()) {
            Some(index) => {
                records[index] = record;
                true
            }
            None => false,
        }
    }

    async fn remove(&self, id: &str) -> bool {
        let mut records = self.records.write().await;
        match records.iter().position(|r| r.key() == id) {
            Some(index) => {
                records.remove(index);
                true
            }
            None => false,
        }
    }
}
