//! The sales pipeline: clients partitioned across an ordered, fixed sequence
//! of stage buckets.
//!
//! The pipeline is the one collection that is not a flat list. Its persisted
//! shape is the board itself: one bucket per stage, each holding the ordered
//! clients currently assigned to it. Identifier uniqueness spans all buckets.

use crate::model::{Client, ClientUpdates, NewClient, Stage};
use crate::store::{Store, CLIENTS_KEY};
use crate::Result;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::debug;

/// One named partition of the board holding zero or more clients in order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageBucket {
    pub(crate) stage: Stage,
    pub(crate) clients: Vec<Client>,
}

impl StageBucket {
    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn clients(&self) -> &[Client] {
        &self.clients
    }

    /// The derived per-stage count shown next to the column heading.
    pub fn count(&self) -> usize {
        self.clients.len()
    }
}

/// Manages the client records of the sales pipeline and keeps the board
/// mirrored to the store.
#[derive(Debug, Clone)]
pub struct Pipeline {
    store: Store,
    stages: Vec<StageBucket>,
}

impl Pipeline {
    /// Reads the persisted board. A missing or unparsable snapshot is
    /// replaced with the seeded board; loading never fails.
    pub async fn load(store: Store) -> Self {
        let stages = match store.read_json::<Vec<StageBucket>>(CLIENTS_KEY).await {
            Some(stages) => stages,
            None => {
                debug!("No usable snapshot under '{CLIENTS_KEY}', using the seeded board");
                seed_board()
            }
        };
        Self { store, stages }
    }

    /// The stage buckets in board order.
    pub fn buckets(&self) -> &[StageBucket] {
        &self.stages
    }

    /// All clients across every bucket, in board-then-insertion order.
    pub fn clients(&self) -> impl Iterator<Item = &Client> {
        self.stages.iter().flat_map(|bucket| bucket.clients.iter())
    }

    /// Total number of clients on the board.
    pub fn len(&self) -> usize {
        self.stages.iter().map(StageBucket::count).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, id: u64) -> Option<&Client> {
        self.clients().find(|client| client.id == id)
    }

    /// Per-stage derived counts, equal to the bucket lengths.
    pub fn stage_counts(&self) -> Vec<(Stage, usize)> {
        self.stages
            .iter()
            .map(|bucket| (bucket.stage, bucket.count()))
            .collect()
    }

    /// One more than the largest identifier across all buckets, starting
    /// at 1. Cross-bucket uniqueness is mandatory.
    fn next_id(&self) -> u64 {
        1 + self.clients().map(|client| client.id).max().unwrap_or(0)
    }

    /// Creates a client from the form fields. New clients always land in the
    /// first stage bucket.
    pub async fn create_client(&mut self, fields: NewClient) -> Result<Client> {
        let mut client = Client::new(fields);
        client.id = self.next_id();
        let created = client.clone();
        self.bucket_mut(Stage::first()).clients.push(client);
        self.save().await?;
        Ok(created)
    }

    /// Merges `updates` onto the client with `id`, wherever it currently
    /// sits. Field edits never move a client between buckets; stage changes
    /// go through [`Pipeline::move_to_stage`]. A missing identifier leaves
    /// the board unchanged and yields `Ok(None)`.
    pub async fn update_client(&mut self, id: u64, updates: ClientUpdates) -> Result<Option<Client>> {
        let Some(client) = self
            .stages
            .iter_mut()
            .flat_map(|bucket| bucket.clients.iter_mut())
            .find(|client| client.id == id)
        else {
            return Ok(None);
        };
        client.apply(updates);
        let updated = client.clone();
        self.save().await?;
        Ok(Some(updated))
    }

    /// Moves the client with `id` out of its current bucket and appends it
    /// to the `target` bucket, updating the record's stage field to match.
    /// A missing identifier is a no-op yielding `Ok(None)`.
    pub async fn move_to_stage(&mut self, id: u64, target: Stage) -> Result<Option<Client>> {
        let Some(mut client) = self.take(id) else {
            return Ok(None);
        };
        client.stage = target;
        let moved = client.clone();
        self.bucket_mut(target).clients.push(client);
        self.save().await?;
        Ok(Some(moved))
    }

    /// Removes the client with `id` from whichever bucket currently holds
    /// it. Removing an identifier that is not present is a silent no-op.
    pub async fn delete_client(&mut self, id: u64) -> Result<()> {
        self.take(id);
        self.save().await
    }

    /// Pulls the client with `id` out of its bucket, if present.
    fn take(&mut self, id: u64) -> Option<Client> {
        for bucket in &mut self.stages {
            if let Some(ix) = bucket.clients.iter().position(|client| client.id == id) {
                return Some(bucket.clients.remove(ix));
            }
        }
        None
    }

    fn bucket_mut(&mut self, stage: Stage) -> &mut StageBucket {
        // Snapshots always carry all five buckets, but tolerate a stage
        // missing from a hand-edited file by appending it.
        let ix = match self.stages.iter().position(|bucket| bucket.stage == stage) {
            Some(ix) => ix,
            None => {
                self.stages.push(StageBucket {
                    stage,
                    clients: Vec::new(),
                });
                self.stages.len() - 1
            }
        };
        &mut self.stages[ix]
    }

    async fn save(&self) -> Result<()> {
        self.store.write_json(CLIENTS_KEY, &self.stages).await
    }
}

/// The built-in default board: every stage present, with one sample lead in
/// the first column.
fn seed_board() -> Vec<StageBucket> {
    let sample = Client {
        id: 1,
        name: "João Silva".to_string(),
        email: "joao@email.com".to_string(),
        phone: "(11) 99999-9999".to_string(),
        company: "Tech Corp".to_string(),
        stage: Stage::Lead,
        status: "Novo".to_string(),
        value: crate::model::Amount::from_str("R$ 5.000,00").unwrap_or_default(),
        last_contact: "2024-03-15".to_string(),
    };
    Stage::ALL
        .into_iter()
        .map(|stage| StageBucket {
            stage,
            clients: if stage == Stage::Lead {
                vec![sample.clone()]
            } else {
                Vec::new()
            },
        })
        .collect()
}
