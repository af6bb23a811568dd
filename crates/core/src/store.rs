//! File-backed consult storage.
//!
//! One JSON document per consult under `<consult_data_dir>/consults/`,
//! named `<id>.json`. Ids are allocated from an in-process monotonic
//! counter seeded by scanning the directory at open, so descending id
//! order is newest-created-first.
//!
//! The store supports atomic single-record create/read/update only; there
//! are no multi-record transactions and no locking across concurrent edits
//! to the same id (two racing saves are last-write-wins).

use chrono::Utc;
use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::config::CoreConfig;
use crate::error::{IntakeError, IntakeResult};
use crate::record::{ConsultId, ConsultRecord, PatientDetails};

/// Store of consult records rooted at the configured data directory.
pub struct ConsultStore {
    cfg: Arc<CoreConfig>,
    next_id: AtomicU64,
}

impl ConsultStore {
    /// Opens the store, creating the consults directory if needed and
    /// seeding the id counter from the highest id already on disk.
    ///
    /// # Errors
    ///
    /// Returns `IntakeError::StorageDirCreation` if the directory cannot be
    /// created, or `IntakeError::FileRead` if it cannot be scanned.
    pub fn open(cfg: Arc<CoreConfig>) -> IntakeResult<Self> {
        let consults_dir = cfg.consults_dir();
        fs::create_dir_all(&consults_dir).map_err(IntakeError::StorageDirCreation)?;

        let mut max_id = 0u64;
        for entry in fs::read_dir(&consults_dir).map_err(IntakeError::FileRead)? {
            let entry = entry.map_err(IntakeError::FileRead)?;
            if let Some(id) = id_from_filename(&entry.path()) {
                max_id = max_id.max(id);
            }
        }

        Ok(Self {
            cfg,
            next_id: AtomicU64::new(max_id + 1),
        })
    }

    /// Creates a new draft record from a validated Section A field set and
    /// persists it.
    pub fn create(&self, patient: PatientDetails) -> IntakeResult<ConsultRecord> {
        let id = ConsultId::new(self.next_id.fetch_add(1, Ordering::SeqCst));
        let record = ConsultRecord::new(id, Utc::now(), patient);
        self.write(&record)?;
        Ok(record)
    }

    /// Reads one record.
    ///
    /// # Errors
    ///
    /// Returns `IntakeError::NotFound` if no record has the given id.
    pub fn get(&self, id: ConsultId) -> IntakeResult<ConsultRecord> {
        let path = self.consult_path(id);
        if !path.is_file() {
            return Err(IntakeError::NotFound(id));
        }
        let contents = fs::read_to_string(&path).map_err(IntakeError::FileRead)?;
        serde_json::from_str(&contents).map_err(IntakeError::Deserialization)
    }

    /// Read-modify-write of one record. The write happens only after the
    /// closure returns, so a caller that fails before mutating leaves the
    /// stored record untouched.
    ///
    /// # Errors
    ///
    /// Returns `IntakeError::NotFound` if no record has the given id.
    pub fn update(
        &self,
        id: ConsultId,
        apply: impl FnOnce(&mut ConsultRecord),
    ) -> IntakeResult<ConsultRecord> {
        let mut record = self.get(id)?;
        apply(&mut record);
        self.write(&record)?;
        Ok(record)
    }

    /// All submitted records, newest first (descending id).
    ///
    /// Unreadable or unparseable entries are logged and skipped rather than
    /// failing the whole listing.
    pub fn list_submitted(&self) -> IntakeResult<Vec<ConsultRecord>> {
        let consults_dir = self.cfg.consults_dir();
        let mut records = Vec::new();

        for entry in fs::read_dir(&consults_dir).map_err(IntakeError::FileRead)? {
            let entry = entry.map_err(IntakeError::FileRead)?;
            let path = entry.path();
            if id_from_filename(&path).is_none() {
                continue;
            }
            let contents = match fs::read_to_string(&path) {
                Ok(contents) => contents,
                Err(e) => {
                    tracing::warn!("failed to read consult file: {} - {}", path.display(), e);
                    continue;
                }
            };
            match serde_json::from_str::<ConsultRecord>(&contents) {
                Ok(record) => {
                    if record.submitted {
                        records.push(record);
                    }
                }
                Err(e) => {
                    tracing::warn!("failed to parse consult file: {} - {}", path.display(), e);
                }
            }
        }

        records.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(records)
    }

    fn consult_path(&self, id: ConsultId) -> PathBuf {
        self.cfg.consults_dir().join(format!("{id}.json"))
    }

    fn write(&self, record: &ConsultRecord) -> IntakeResult<()> {
        let json = serde_json::to_string_pretty(record).map_err(IntakeError::Serialization)?;
        fs::write(self.consult_path(record.id), json).map_err(IntakeError::FileWrite)
    }
}

fn id_from_filename(path: &std::path::Path) -> Option<u64> {
    if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
        return None;
    }
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .and_then(|stem| stem.parse::<u64>().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use intake_types::{Discipline, Gender, NonEmptyText, Ward};
    use tempfile::TempDir;

    fn test_cfg(dir: &TempDir) -> Arc<CoreConfig> {
        Arc::new(CoreConfig::new(dir.path().to_path_buf()))
    }

    fn test_patient(name: &str) -> PatientDetails {
        PatientDetails {
            patient_name: NonEmptyText::new(name).unwrap(),
            date_of_birth: None,
            age: Some(63),
            gender: Gender::Male,
            hospital_number: NonEmptyText::new("H-104").unwrap(),
            ward: Ward::EmergencyUnit,
            request_datetime: NaiveDate::from_ymd_opt(2026, 2, 11)
                .unwrap()
                .and_hms_opt(9, 0, 0)
                .unwrap(),
            requesting_discipline: Discipline::GeneralSurgery,
            requesting_dr: None,
            requesting_dr_contact: None,
            requesting_dr_speed_dial: None,
        }
    }

    #[test]
    fn test_create_then_get_round_trips() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let store = ConsultStore::open(test_cfg(&temp_dir)).expect("open should succeed");

        let record = store
            .create(test_patient("Sipho Nkosi"))
            .expect("create should succeed");
        let loaded = store.get(record.id).expect("get should succeed");
        assert_eq!(loaded, record);
    }

    #[test]
    fn test_ids_are_monotonic() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let store = ConsultStore::open(test_cfg(&temp_dir)).expect("open should succeed");

        let first = store.create(test_patient("A")).expect("should succeed");
        let second = store.create(test_patient("B")).expect("should succeed");
        assert!(second.id > first.id, "ids must increase with creation order");
    }

    #[test]
    fn test_open_seeds_counter_from_existing_records() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let cfg = test_cfg(&temp_dir);

        let existing_id = {
            let store = ConsultStore::open(cfg.clone()).expect("open should succeed");
            store.create(test_patient("A")).expect("should succeed").id
        };

        // A second process opening the same directory must not reuse ids.
        let store = ConsultStore::open(cfg).expect("reopen should succeed");
        let fresh = store.create(test_patient("B")).expect("should succeed");
        assert!(fresh.id > existing_id, "reopened store must not reuse ids");
    }

    #[test]
    fn test_get_unknown_id_is_not_found() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let store = ConsultStore::open(test_cfg(&temp_dir)).expect("open should succeed");

        let err = store.get(ConsultId::new(999)).expect_err("should fail");
        assert!(
            matches!(err, IntakeError::NotFound(id) if id == ConsultId::new(999)),
            "should return NotFound"
        );
    }

    #[test]
    fn test_update_persists_changes() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let store = ConsultStore::open(test_cfg(&temp_dir)).expect("open should succeed");

        let record = store.create(test_patient("A")).expect("should succeed");
        store
            .update(record.id, |r| r.submitted = true)
            .expect("update should succeed");

        let loaded = store.get(record.id).expect("get should succeed");
        assert!(loaded.submitted);
    }

    #[test]
    fn test_list_submitted_filters_and_sorts_descending() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let store = ConsultStore::open(test_cfg(&temp_dir)).expect("open should succeed");

        let first = store.create(test_patient("First")).expect("should succeed");
        let draft = store.create(test_patient("Draft")).expect("should succeed");
        let last = store.create(test_patient("Last")).expect("should succeed");

        store.update(first.id, |r| r.submitted = true).expect("should succeed");
        store.update(last.id, |r| r.submitted = true).expect("should succeed");

        let listed = store.list_submitted().expect("list should succeed");
        let ids: Vec<ConsultId> = listed.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![last.id, first.id], "newest first, drafts excluded");
        assert!(
            !ids.contains(&draft.id),
            "unsubmitted records never appear in the listing"
        );
    }

    #[test]
    fn test_list_submitted_skips_corrupt_files() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let cfg = test_cfg(&temp_dir);
        let store = ConsultStore::open(cfg.clone()).expect("open should succeed");

        let record = store.create(test_patient("Valid")).expect("should succeed");
        store.update(record.id, |r| r.submitted = true).expect("should succeed");

        fs::write(cfg.consults_dir().join("7.json"), "{ not json").expect("should write");

        let listed = store.list_submitted().expect("list should succeed");
        assert_eq!(listed.len(), 1, "corrupt entry should be skipped");
        assert_eq!(listed[0].id, record.id);
    }
}
