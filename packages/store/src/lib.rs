#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Injected record stores for incident reports and place comments.
//!
//! The scoring core and the HTTP handlers depend only on the
//! [`IncidentStore`] and [`CommentStore`] traits, never on a concrete
//! backing format. The shipped backend is [`JsonFileStore`], which keeps
//! the legacy flat-JSON record files; [`MemoryStore`] backs deterministic
//! tests.
//!
//! Both stores are append-only from the consumer's perspective (votes
//! mutate a counter on an otherwise append-only comment record), and
//! reads always return a complete snapshot; a reader never observes a
//! partially-written record.

pub mod json;
pub mod memory;

use safe_route_risk_models::Incident;
use safe_route_store_models::{CommentRecord, IncidentRecord};
use thiserror::Error;

pub use json::JsonFileStore;
pub use memory::MemoryStore;

/// Errors from record store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing a record file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A record file does not contain the expected JSON shape.
    #[error("Record file corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),

    /// A vote referenced a comment that does not exist.
    #[error("No comment at index {index} for place {place_id}")]
    CommentNotFound {
        /// The place whose comment list was addressed.
        place_id: String,
        /// The out-of-range comment index.
        index: usize,
    },
}

/// Read-only-plus-append view over recorded incidents.
///
/// `list_incidents` returns an owned snapshot so a ranking call can
/// score every candidate against identical data regardless of
/// concurrent appends.
pub trait IncidentStore: Send + Sync {
    /// Returns all recorded incidents, flattened across buckets.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the snapshot cannot be read.
    fn list_incidents(&self) -> Result<Vec<Incident>, StoreError>;

    /// Appends one incident report atomically.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the record cannot be persisted.
    fn append_incident(&self, record: IncidentRecord) -> Result<(), StoreError>;
}

/// Store of free-text comments grouped by place id.
pub trait CommentStore: Send + Sync {
    /// Returns the comments recorded for a place (empty if unknown).
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the snapshot cannot be read.
    fn comments_for(&self, place_id: &str) -> Result<Vec<CommentRecord>, StoreError>;

    /// Appends a comment and returns the place's updated comment list.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the record cannot be persisted.
    fn append_comment(
        &self,
        place_id: &str,
        record: CommentRecord,
    ) -> Result<Vec<CommentRecord>, StoreError>;

    /// Applies a vote delta to one comment and returns the place's
    /// updated comment list.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::CommentNotFound`] if the place or index
    /// does not exist, or another [`StoreError`] if persisting fails.
    fn apply_vote(
        &self,
        place_id: &str,
        index: usize,
        delta: i64,
    ) -> Result<Vec<CommentRecord>, StoreError>;
}
