//! Postgres-backed record store.
//!
//! Expects an `image_records` table:
//!
//! ```sql
//! CREATE TABLE image_records (
//!     image_id UUID PRIMARY KEY,
//!     status TEXT NOT NULL,
//!     moderation_result TEXT,
//!     moderation_flags TEXT[],
//!     created_at TIMESTAMPTZ NOT NULL,
//!     updated_at TIMESTAMPTZ NOT NULL
//! );
//! ```

use crate::traits::{RecordError, RecordResult, RecordStore};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Row};
use uuid::Uuid;

use pixgate_core::models::{ImageRecord, ImageStatus, ModerationVerdict};

#[derive(Clone)]
pub struct PgRecordStore {
    pool: PgPool,
}

impl PgRecordStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn row_to_record(row: sqlx::postgres::PgRow) -> RecordResult<ImageRecord> {
    let status: String = row
        .try_get("status")
        .map_err(|e| RecordError::Backend(e.to_string()))?;
    let status: ImageStatus = status.parse().map_err(RecordError::Backend)?;

    let moderation_result: Option<String> = row
        .try_get("moderation_result")
        .map_err(|e| RecordError::Backend(e.to_string()))?;
    let moderation_result: Option<ModerationVerdict> = moderation_result
        .map(|v| v.parse().map_err(RecordError::Backend))
        .transpose()?;

    Ok(ImageRecord {
        image_id: row
            .try_get("image_id")
            .map_err(|e| RecordError::Backend(e.to_string()))?,
        status,
        moderation_result,
        moderation_flags: row
            .try_get("moderation_flags")
            .map_err(|e| RecordError::Backend(e.to_string()))?,
        created_at: row
            .try_get("created_at")
            .map_err(|e| RecordError::Backend(e.to_string()))?,
        updated_at: row
            .try_get("updated_at")
            .map_err(|e| RecordError::Backend(e.to_string()))?,
    })
}

#[async_trait]
impl RecordStore for PgRecordStore {
    async fn create(&self, record: ImageRecord) -> RecordResult<()> {
        sqlx::query(
            r#"
            INSERT INTO image_records (
                image_id, status, moderation_result, moderation_flags,
                created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(record.image_id)
        .bind(record.status.to_string())
        .bind(record.moderation_result.map(|v| v.to_string()))
        .bind(record.moderation_flags.as_deref())
        .bind(record.created_at)
        .bind(record.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!(
                error = %e,
                image_id = %record.image_id,
                "Failed to insert image record"
            );
            RecordError::Backend(e.to_string())
        })?;

        Ok(())
    }

    async fn get(&self, image_id: Uuid) -> RecordResult<Option<ImageRecord>> {
        let row = sqlx::query(
            r#"
            SELECT image_id, status, moderation_result, moderation_flags,
                   created_at, updated_at
            FROM image_records
            WHERE image_id = $1
            "#,
        )
        .bind(image_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RecordError::Backend(e.to_string()))?;

        row.map(row_to_record).transpose()
    }

    async fn set_moderation(
        &self,
        image_id: Uuid,
        status: ImageStatus,
        verdict: ModerationVerdict,
        flags: Vec<String>,
        updated_at: DateTime<Utc>,
    ) -> RecordResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE image_records
            SET status = $2, moderation_result = $3, moderation_flags = $4,
                updated_at = $5
            WHERE image_id = $1
            "#,
        )
        .bind(image_id)
        .bind(status.to_string())
        .bind(verdict.to_string())
        .bind(&flags)
        .bind(updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!(
                error = %e,
                image_id = %image_id,
                "Failed to update moderation fields"
            );
            RecordError::Backend(e.to_string())
        })?;

        if result.rows_affected() == 0 {
            return Err(RecordError::NotFound(image_id));
        }

        Ok(())
    }

    async fn set_status(
        &self,
        image_id: Uuid,
        status: ImageStatus,
        updated_at: DateTime<Utc>,
    ) -> RecordResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE image_records
            SET status = $2, updated_at = $3
            WHERE image_id = $1
            "#,
        )
        .bind(image_id)
        .bind(status.to_string())
        .bind(updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!(
                error = %e,
                image_id = %image_id,
                "Failed to update image status"
            );
            RecordError::Backend(e.to_string())
        })?;

        if result.rows_affected() == 0 {
            return Err(RecordError::NotFound(image_id));
        }

        Ok(())
    }
}
