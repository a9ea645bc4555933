//! In-memory record store for tests and local development.

use crate::traits::{RecordError, RecordResult, RecordStore};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

use pixgate_core::models::{ImageRecord, ImageStatus, ModerationVerdict};

/// Record store keyed by image id in a process-local map.
#[derive(Clone, Default)]
pub struct MemoryRecordStore {
    records: Arc<Mutex<HashMap<Uuid, ImageRecord>>>,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a record without going through the trait (for test assertions).
    pub fn record(&self, image_id: Uuid) -> Option<ImageRecord> {
        self.records.lock().unwrap().get(&image_id).cloned()
    }

    /// Number of stored records (for test assertions).
    pub fn len(&self) -> usize {
        self.records.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.lock().unwrap().is_empty()
    }
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn create(&self, record: ImageRecord) -> RecordResult<()> {
        self.records
            .lock()
            .unwrap()
            .insert(record.image_id, record);
        Ok(())
    }

    async fn get(&self, image_id: Uuid) -> RecordResult<Option<ImageRecord>> {
        Ok(self.records.lock().unwrap().get(&image_id).cloned())
    }

    async fn set_moderation(
        &self,
        image_id: Uuid,
        status: ImageStatus,
        verdict: ModerationVerdict,
        flags: Vec<String>,
        updated_at: DateTime<Utc>,
    ) -> RecordResult<()> {
        let mut records = self.records.lock().unwrap();
        let record = records
            .get_mut(&image_id)
            .ok_or(RecordError::NotFound(image_id))?;
        record.status = status;
        record.moderation_result = Some(verdict);
        record.moderation_flags = Some(flags);
        record.updated_at = updated_at;
        Ok(())
    }

    async fn set_status(
        &self,
        image_id: Uuid,
        status: ImageStatus,
        updated_at: DateTime<Utc>,
    ) -> RecordResult<()> {
        let mut records = self.records.lock().unwrap();
        let record = records
            .get_mut(&image_id)
            .ok_or(RecordError::NotFound(image_id))?;
        record.status = status;
        record.updated_at = updated_at;
        Ok(())
    }
}
