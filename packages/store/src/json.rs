//! Flat-JSON file backend for the record stores.
//!
//! Keeps the legacy on-disk layout: one JSON object per store, mapping a
//! bucket key (incidents) or place id (comments) to an array of records.
//! Records are held in memory behind an `RwLock` and the whole file is
//! rewritten to a temp path and renamed on every mutation, so a reader
//! never sees a torn record.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use safe_route_risk_models::Incident;
use safe_route_store_models::{CommentRecord, IncidentRecord, bucket_key};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::{CommentStore, IncidentStore, StoreError};

/// Incident record file name within the data directory.
const INCIDENTS_FILE: &str = "crime_reports.json";
/// Comment record file name within the data directory.
const COMMENTS_FILE: &str = "comments.json";

/// Record store backed by two flat JSON files in a data directory.
pub struct JsonFileStore {
    incidents_path: PathBuf,
    comments_path: PathBuf,
    incidents: RwLock<BTreeMap<String, Vec<IncidentRecord>>>,
    comments: RwLock<BTreeMap<String, Vec<CommentRecord>>>,
}

impl JsonFileStore {
    /// Opens (or initializes) the record files under `data_dir`.
    ///
    /// Missing files start as empty stores; they are created on first
    /// append.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the directory cannot be created or an
    /// existing record file cannot be read or parsed.
    pub fn open(data_dir: &Path) -> Result<Self, StoreError> {
        fs::create_dir_all(data_dir)?;

        let incidents_path = data_dir.join(INCIDENTS_FILE);
        let comments_path = data_dir.join(COMMENTS_FILE);

        let incidents = load_map(&incidents_path)?;
        let comments = load_map(&comments_path)?;

        log::info!(
            "Opened record stores in {}: {} incident bucket(s), {} commented place(s)",
            data_dir.display(),
            incidents.len(),
            comments.len()
        );

        Ok(Self {
            incidents_path,
            comments_path,
            incidents: RwLock::new(incidents),
            comments: RwLock::new(comments),
        })
    }
}

impl IncidentStore for JsonFileStore {
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

        persist(&self.incidents_path, &*buckets)
    }
}

impl CommentStore for JsonFileStore {
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
        let updated = comments.clone();

        persist(&self.comments_path, &*places)?;
        Ok(updated)
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

        let updated = places[place_id].clone();
        persist(&self.comments_path, &*places)?;
        Ok(updated)
    }
}

/// Loads a record file into memory; a missing file is an empty store.
fn load_map<T: DeserializeOwned>(path: &Path) -> Result<BTreeMap<String, Vec<T>>, StoreError> {
    match fs::read(path) {
        Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
        Err(e) => Err(e.into()),
    }
}

/// Writes the full record map to a temp file and renames it over the
/// record file, so concurrent readers of the file never observe a
/// partial write.
fn persist<T: Serialize>(path: &Path, map: &BTreeMap<String, Vec<T>>) -> Result<(), StoreError> {
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, serde_json::to_vec_pretty(map)?)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn temp_data_dir(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "safe_route_store_{tag}_{}",
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    fn report(lat: f64, lon: f64, category: &str) -> IncidentRecord {
        IncidentRecord {
            lat,
            lon,
            category: category.to_string(),
        }
    }

    fn comment(text: &str) -> CommentRecord {
        CommentRecord {
            text: text.to_string(),
            votes: 0,
            posted_at: Utc::now(),
        }
    }

    #[test]
    fn lists_appended_incidents_across_buckets() {
        let dir = temp_data_dir("flatten");
        let store = JsonFileStore::open(&dir).unwrap();

        store.append_incident(report(17.385_01, 78.486_7, "theft")).unwrap();
        store.append_incident(report(17.385_02, 78.486_7, "robbery")).unwrap();
        store.append_incident(report(12.9716, 77.5946, "assault")).unwrap();

        let incidents = store.list_incidents().unwrap();
        assert_eq!(incidents.len(), 3);

        // The two nearby reports landed in one bucket; the read side
        // flattens regardless.
        let buckets = store.incidents.read().unwrap();
        assert_eq!(buckets.len(), 2);
    }

    #[test]
    fn records_survive_reopen() {
        let dir = temp_data_dir("reopen");
        {
            let store = JsonFileStore::open(&dir).unwrap();
            store.append_incident(report(17.3850, 78.4867, "theft")).unwrap();
            store.append_comment("place-1", comment("dark alley")).unwrap();
        }

        let store = JsonFileStore::open(&dir).unwrap();
        assert_eq!(store.list_incidents().unwrap().len(), 1);
        let comments = store.comments_for("place-1").unwrap();
        assert_eq!(comments.len(), 1);
        assert_eq!(comments[0].text, "dark alley");
    }

    #[test]
    fn reads_legacy_record_files() {
        let dir = temp_data_dir("legacy");
        fs::create_dir_all(&dir).unwrap();
        fs::write(
            dir.join(INCIDENTS_FILE),
            r#"{"17.385,78.4867": [{"lat": 17.385, "lon": 78.4867, "type": "theft"}]}"#,
        )
        .unwrap();

        let store = JsonFileStore::open(&dir).unwrap();
        let incidents = store.list_incidents().unwrap();
        assert_eq!(incidents.len(), 1);
        assert_eq!(incidents[0].category, "theft");
    }

    #[test]
    fn skips_out_of_domain_records_on_read() {
        let dir = temp_data_dir("corrupt_record");
        fs::create_dir_all(&dir).unwrap();
        fs::write(
            dir.join(INCIDENTS_FILE),
            r#"{"k": [{"lat": 917.0, "lon": 78.0, "type": "theft"},
                     {"lat": 17.0, "lon": 78.0, "type": "assault"}]}"#,
        )
        .unwrap();

        let store = JsonFileStore::open(&dir).unwrap();
        let incidents = store.list_incidents().unwrap();
        assert_eq!(incidents.len(), 1);
        assert_eq!(incidents[0].category, "assault");
    }

    #[test]
    fn corrupt_file_fails_open() {
        let dir = temp_data_dir("corrupt_file");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(COMMENTS_FILE), "not json").unwrap();

        assert!(matches!(
            JsonFileStore::open(&dir),
            Err(StoreError::Corrupt(_))
        ));
    }

    #[test]
    fn append_comment_returns_updated_list() {
        let dir = temp_data_dir("comments");
        let store = JsonFileStore::open(&dir).unwrap();

        let after_first = store.append_comment("place-9", comment("poorly lit")).unwrap();
        assert_eq!(after_first.len(), 1);
        let after_second = store.append_comment("place-9", comment("avoid at night")).unwrap();
        assert_eq!(after_second.len(), 2);
    }

    #[test]
    fn vote_adjusts_tally_and_persists() {
        let dir = temp_data_dir("votes");
        let store = JsonFileStore::open(&dir).unwrap();
        store.append_comment("place-3", comment("busy corner")).unwrap();

        let updated = store.apply_vote("place-3", 0, 1).unwrap();
        assert_eq!(updated[0].votes, 1);
        let updated = store.apply_vote("place-3", 0, -1).unwrap();
        assert_eq!(updated[0].votes, 0);
    }

    #[test]
    fn vote_on_unknown_comment_is_not_found() {
        let dir = temp_data_dir("vote_missing");
        let store = JsonFileStore::open(&dir).unwrap();

        assert!(matches!(
            store.apply_vote("nowhere", 0, 1),
            Err(StoreError::CommentNotFound { .. })
        ));

        store.append_comment("place-5", comment("ok")).unwrap();
        assert!(matches!(
            store.apply_vote("place-5", 7, 1),
            Err(StoreError::CommentNotFound { index: 7, .. })
        ));
    }

    #[test]
    fn comments_for_unknown_place_is_empty() {
        let dir = temp_data_dir("unknown_place");
        let store = JsonFileStore::open(&dir).unwrap();
        assert!(store.comments_for("nowhere").unwrap().is_empty());
    }
}
