//! The generic collection manager: one ordered list per entity kind,
//! mirrored to the store on every mutation.

use crate::store::Store;
use crate::Result;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::Debug;
use tracing::debug;

/// An entity kind managed by a [`Collection`]. Implementors supply the store
/// key the collection persists under, identifier access, the field-merge
/// patch type used by edits, and the built-in default list substituted when
/// no snapshot exists.
pub trait Record: Debug + Clone + PartialEq + Serialize + DeserializeOwned {
    /// The store key the full collection is serialized under.
    const STORE_KEY: &'static str;

    /// The field-merge patch applied by `update`.
    type Updates;

    fn id(&self) -> u64;

    fn set_id(&mut self, id: u64);

    /// Merges the present fields of `updates` onto this record. The
    /// identifier is never part of the patch.
    fn apply(&mut self, updates: Self::Updates);

    /// The default list used when the store holds no snapshot for this kind.
    fn seed() -> Vec<Self>;
}

/// Holds the canonical in-memory ordered list for one entity kind and keeps
/// it mirrored to the store.
///
/// Insertion order is preserved: `create` appends and nothing here sorts.
/// Every mutation rewrites the full serialized collection under
/// [`Record::STORE_KEY`] before returning.
#[derive(Debug, Clone)]
pub struct Collection<R: Record> {
    store: Store,
    data: Vec<R>,
}

impl<R: Record> Collection<R> {
    /// Reads the persisted snapshot for this kind. A missing or unparsable
    /// snapshot is treated as "no data" and replaced with [`Record::seed`];
    /// loading never fails.
    pub async fn load(store: Store) -> Self {
        let data = match store.read_json::<Vec<R>>(R::STORE_KEY).await {
            Some(data) => data,
            None => {
                debug!("No usable snapshot under '{}', using defaults", R::STORE_KEY);
                R::seed()
            }
        };
        Self { store, data }
    }

    /// The current in-memory state, in insertion order.
    pub fn records(&self) -> &[R] {
        &self.data
    }

    pub fn get(&self, id: u64) -> Option<&R> {
        self.data.iter().find(|r| r.id() == id)
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The identifier the next created record will receive: one more than
    /// the largest identifier currently in the collection, starting at 1.
    fn next_id(&self) -> u64 {
        1 + self.data.iter().map(Record::id).max().unwrap_or(0)
    }

    /// Assigns a fresh identifier to `record`, appends it and persists the
    /// collection. Returns the created record.
    pub async fn create(&mut self, mut record: R) -> Result<R> {
        record.set_id(self.next_id());
        self.data.push(record.clone());
        self.save().await?;
        Ok(record)
    }

    /// Merges `updates` onto the record with `id` and persists. A missing
    /// identifier leaves the collection unchanged and yields `Ok(None)`.
    pub async fn update(&mut self, id: u64, updates: R::Updates) -> Result<Option<R>> {
        let Some(record) = self.data.iter_mut().find(|r| r.id() == id) else {
            return Ok(None);
        };
        record.apply(updates);
        let updated = record.clone();
        self.save().await?;
        Ok(Some(updated))
    }

    /// Applies a targeted mutation, such as the task toggle, to the record
    /// with `id` and persists. A missing identifier is a no-op.
    pub async fn modify(&mut self, id: u64, f: impl FnOnce(&mut R)) -> Result<Option<R>> {
        let Some(record) = self.data.iter_mut().find(|r| r.id() == id) else {
            return Ok(None);
        };
        f(record);
        let modified = record.clone();
        self.save().await?;
        Ok(Some(modified))
    }

    /// Removes the record with `id` and persists. Removing an identifier
    /// that is not present is a silent no-op (the snapshot is still
    /// rewritten).
    pub async fn remove(&mut self, id: u64) -> Result<()> {
        self.data.retain(|r| r.id() != id);
        self.save().await
    }

    async fn save(&self) -> Result<()> {
        self.store.write_json(R::STORE_KEY, &self.data).await
    }
}
