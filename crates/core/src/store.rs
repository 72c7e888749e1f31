//! File-backed persistence for update records.
//!
//! Each record is stored as one JSON document under `<data_dir>/updates/`,
//! named by its UUID. The store is the only component that touches the
//! filesystem; everything derived from a record (sections, charts, exports)
//! is recomputed on each read and never persisted.

use crate::config::CoreConfig;
use crate::update::{UpdateDraft, UpdatePatch, UpdateRecord};
use crate::{UpdateError, UpdateResult};
use chrono::{DateTime, Utc};
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::Arc;
use uuid::Uuid;

/// Service providing CRUD access to persisted updates.
#[derive(Debug, Clone)]
pub struct UpdateStore {
    cfg: Arc<CoreConfig>,
}

impl UpdateStore {
    pub fn new(cfg: Arc<CoreConfig>) -> Self {
        Self { cfg }
    }

    fn record_path(&self, id: Uuid) -> PathBuf {
        self.cfg.updates_dir().join(format!("{}.json", id.simple()))
    }

    /// Creates and persists a new record from caller input.
    pub fn create(&self, draft: UpdateDraft, now: DateTime<Utc>) -> UpdateResult<UpdateRecord> {
        let record = UpdateRecord::from_draft(draft, now)?;
        self.write_record(&record)?;
        tracing::info!(id = %record.id, title = %record.title, "created update");
        Ok(record)
    }

    /// Reads a single record by id.
    pub fn get(&self, id: Uuid) -> UpdateResult<UpdateRecord> {
        let path = self.record_path(id);
        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Err(UpdateError::NotFound(id)),
            Err(e) => return Err(UpdateError::FileRead(e)),
        };
        serde_json::from_str(&contents).map_err(UpdateError::Deserialization)
    }

    /// Lists all records, newest first.
    ///
    /// A missing updates directory is treated as an empty store. Files that
    /// fail to parse are skipped with a warning rather than failing the whole
    /// listing.
    pub fn list(&self) -> UpdateResult<Vec<UpdateRecord>> {
        let dir = self.cfg.updates_dir();
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(UpdateError::FileRead(e)),
        };

        let mut records = Vec::new();
        for entry in entries {
            let entry = entry.map_err(UpdateError::FileRead)?;
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }
            let contents = fs::read_to_string(&path).map_err(UpdateError::FileRead)?;
            match serde_json::from_str::<UpdateRecord>(&contents) {
                Ok(record) => records.push(record),
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "skipping unreadable update file");
                }
            }
        }

        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(records)
    }

    /// Applies a partial patch to a record and persists the result.
    pub fn update(&self, id: Uuid, patch: UpdatePatch) -> UpdateResult<UpdateRecord> {
        let mut record = self.get(id)?;
        record.apply(patch)?;
        self.write_record(&record)?;
        Ok(record)
    }

    /// Deletes a record by id.
    pub fn delete(&self, id: Uuid) -> UpdateResult<()> {
        let path = self.record_path(id);
        match fs::remove_file(&path) {
            Ok(()) => {
                tracing::info!(id = %id, "deleted update");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Err(UpdateError::NotFound(id)),
            Err(e) => Err(UpdateError::FileDelete(e)),
        }
    }

    fn write_record(&self, record: &UpdateRecord) -> UpdateResult<()> {
        let dir = self.cfg.updates_dir();
        fs::create_dir_all(&dir).map_err(UpdateError::StorageDirCreation)?;
        let contents =
            serde_json::to_string_pretty(record).map_err(UpdateError::Serialization)?;
        fs::write(self.record_path(record.id), contents).map_err(UpdateError::FileWrite)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::update::UpdateStatus;
    use chrono::TimeZone;

    fn store_in(dir: &std::path::Path) -> UpdateStore {
        let cfg = Arc::new(CoreConfig::new(dir.to_path_buf()).unwrap());
        UpdateStore::new(cfg)
    }

    #[test]
    fn test_create_get_roundtrip() {
        let tmp = tempfile::tempdir().unwrap();
        let store = store_in(tmp.path());

        let draft = UpdateDraft {
            title: Some("Q1 update".into()),
            revenue: Some("$125,000".into()),
            ..Default::default()
        };
        let created = store.create(draft, Utc::now()).unwrap();
        let fetched = store.get(created.id).unwrap();
        assert_eq!(created, fetched);
    }

    #[test]
    fn test_get_missing_is_not_found() {
        let tmp = tempfile::tempdir().unwrap();
        let store = store_in(tmp.path());
        assert!(matches!(
            store.get(Uuid::new_v4()),
            Err(UpdateError::NotFound(_))
        ));
    }

    #[test]
    fn test_list_is_newest_first_and_empty_without_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let store = store_in(tmp.path());
        assert!(store.list().unwrap().is_empty());

        let older = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        let newer = Utc.with_ymd_and_hms(2026, 6, 1, 0, 0, 0).unwrap();
        store
            .create(
                UpdateDraft {
                    title: Some("January".into()),
                    ..Default::default()
                },
                older,
            )
            .unwrap();
        store
            .create(
                UpdateDraft {
                    title: Some("June".into()),
                    ..Default::default()
                },
                newer,
            )
            .unwrap();

        let listed = store.list().unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].title, "June");
        assert_eq!(listed[1].title, "January");
    }

    #[test]
    fn test_update_patches_and_persists() {
        let tmp = tempfile::tempdir().unwrap();
        let store = store_in(tmp.path());
        let created = store
            .create(
                UpdateDraft {
                    title: Some("Draft".into()),
                    ..Default::default()
                },
                Utc::now(),
            )
            .unwrap();

        let patched = store
            .update(
                created.id,
                UpdatePatch {
                    narrative_text: Some("## Executive Summary\nAll good.".into()),
                    status: Some(UpdateStatus::Sent),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(patched.status, UpdateStatus::Sent);

        let reread = store.get(created.id).unwrap();
        assert_eq!(
            reread.narrative_text.as_deref(),
            Some("## Executive Summary\nAll good.")
        );
    }

    #[test]
    fn test_delete_then_missing() {
        let tmp = tempfile::tempdir().unwrap();
        let store = store_in(tmp.path());
        let created = store.create(UpdateDraft::default(), Utc::now()).unwrap();
        store.delete(created.id).unwrap();
        assert!(matches!(
            store.delete(created.id),
            Err(UpdateError::NotFound(_))
        ));
    }
}
