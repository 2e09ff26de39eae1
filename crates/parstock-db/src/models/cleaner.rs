//! Cleaner model.

use chrono::{DateTime, Utc};
use parstock_core::{CleanerId, OwnerId};
use parstock_inventory::{Cleaner, CleanerStatus};
use sqlx::{FromRow, PgExecutor};
use uuid::Uuid;

use crate::error::DbError;

/// A row of `cleaners`.
#[derive(Debug, Clone, FromRow)]
pub struct CleanerRow {
    pub id: Uuid,
    pub name: String,
    pub manager_id: Uuid,
    pub status: String,
    pub last_active_at: Option<DateTime<Utc>>,
}

impl TryFrom<CleanerRow> for Cleaner {
    type Error = DbError;

    fn try_from(row: CleanerRow) -> Result<Self, Self::Error> {
        let status: CleanerStatus = row.status.parse().map_err(DbError::CorruptRow)?;
        Ok(Cleaner {
            id: CleanerId::from_uuid(row.id),
            name: row.name,
            manager_id: OwnerId::from_uuid(row.manager_id),
            status,
            last_active_at: row.last_active_at,
        })
    }
}

impl CleanerRow {
    pub async fn find_by_id<'e>(
        executor: impl PgExecutor<'e>,
        id: Uuid,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as(
            "SELECT id, name, manager_id, status, last_active_at FROM cleaners WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(executor)
        .await
    }

    /// Insert or replace a cleaner.
    pub async fn upsert<'e>(
        executor: impl PgExecutor<'e>,
        cleaner: &Cleaner,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO cleaners (id, name, manager_id, status, last_active_at) \
             VALUES ($1, $2, $3, $4, $5) \
             ON CONFLICT (id) DO UPDATE SET \
               name = EXCLUDED.name, manager_id = EXCLUDED.manager_id, \
               status = EXCLUDED.status, last_active_at = EXCLUDED.last_active_at",
        )
        .bind(cleaner.id.into_uuid())
        .bind(&cleaner.name)
        .bind(cleaner.manager_id.into_uuid())
        .bind(cleaner.status.to_string())
        .bind(cleaner.last_active_at)
        .execute(executor)
        .await?;
        Ok(())
    }
}
