//! In-memory record store for deterministic tests.

use std::collections::BTreeMap;
use std::sync::RwLock;

use safe_route_risk_models::Incident;
use safe_route_store_models::{CommentRecord, IncidentRecord, bucket_key};

use crate::{CommentStore, IncidentStore, StoreError};

/// In-memory implementation of both record stores.
///
/// Behaves like [`crate::JsonFileStore`] minus persistence. Intended for
/// tests and ephemeral deployments.
#[derive(Default)]
pub struct MemoryStore {
    incidents: RwLock<BTreeMap<String, Vec<IncidentRecord>>>,
    comments: RwLock<BTreeMap<String, Vec<CommentRecord>>>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-seeded with incident records.
    #[must_use]
    pub fn with_incidents(records: impl IntoIterator<Item = IncidentRecord>) -> Self {
        let store = Self::new();
        {
            let mut buckets = store.incidents.write().expect("incident store lock poisoned");
            for record in records {
                buckets
                    .entry(bucket_key(record.lat, record.lon))
                    .or_default()
                    .push(record);
            }
        }
        store
    }
}

impl IncidentStore for MemoryStore {
    fn list_incidents(&self) -> Result<Vec<Incident>, StoreError> {
        let buckets = self.incidents.read().expect("incident store lock poisoned");

        let mut incidents = Vec::new();
        for record in buckets.values().flatten() {
            match record.to_incident() {
                Ok(incident) => incidents.push(incident),
                Err(e) => log::warn!("Skipping unreadable incident record: {e}"),
            }
        }
        Ok(incidents)
    }

    fn append_incident(&self, record: IncidentRecord) -> Result<(), StoreError> {
        let mut buckets = self.incidents.write().expect("incident store lock poisoned");
        buckets
            .entry(bucket_key(record.lat, record.lon))
            .or_default()
            .push(record);
        Ok(())
    }
}

impl CommentStore for MemoryStore {
    fn comments_for(&self, place_id: &str) -> Result<Vec<CommentRecord>, StoreError> {
        let places = self.comments.read().expect("comment store lock poisoned");
        Ok(places.get(place_id).cloned().unwrap_or_default())
    }

    fn append_comment(
        &self,
        place_id: &str,
        record: CommentRecord,
    ) -> Result<Vec<CommentRecord>, StoreError> {
        let mut places = self.comments.write().expect("comment store lock poisoned");
        let comments = places.entry(place_id.to_string()).or_default();
        comments.push(record);
        Ok(comments.clone())
    }

    fn apply_vote(
        &self,
        place_id: &str,
        index: usize,
        delta: i64,
    ) -> Result<Vec<CommentRecord>, StoreError> {
        let mut places = self.comments.write().expect("comment store lock poisoned");

        let comment = places
            .get_mut(place_id)
            .and_then(|comments| comments.get_mut(index))
            .ok_or_else(|| StoreError::CommentNotFound {
                place_id: place_id.to_string(),
                index,
            })?;
        comment.votes += delta;

        Ok(places[place_id].clone())
    }
}
