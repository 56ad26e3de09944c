use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::postgres::PgExecutor;
use sqlx::PgPool;

use crate::common::{DomainResult, DonorId, NotificationId};

/// In-system inbox item for a donor, independent of email delivery.
#[derive(sqlx::FromRow, Debug, Clone, Serialize, Deserialize)]
pub struct DonorNotification {
    pub id: NotificationId,
    pub donor_id: DonorId,
    pub title: String,
    pub message: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

impl DonorNotification {
    /// Insert an inbox item. Takes any executor so callers can write it
    /// inside their own transaction.
    pub async fn create<'e>(
        donor_id: DonorId,
        title: &str,
        message: &str,
        executor: impl PgExecutor<'e>,
    ) -> DomainResult<Self> {
        sqlx::query_as::<_, Self>(
            "INSERT INTO donor_notifications (id, donor_id, title, message)
             VALUES ($1, $2, $3, $4)
             RETURNING *",
        )
        .bind(NotificationId::new())
        .bind(donor_id)
        .bind(title)
        .bind(message)
        .fetch_one(executor)
        .await
        .map_err(Into::into)
    }

    pub async fn find_by_donor(donor_id: DonorId, pool: &PgPool) -> DomainResult<Vec<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM donor_notifications WHERE donor_id = $1 ORDER BY created_at DESC",
        )
        .bind(donor_id)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }

    /// Mark everything unread as read, returning how many items flipped.
    pub async fn mark_all_read(donor_id: DonorId, pool: &PgPool) -> DomainResult<u64> {
        let result = sqlx::query(
            "UPDATE donor_notifications SET is_read = TRUE WHERE donor_id = $1 AND is_read = FALSE",
        )
        .bind(donor_id)
        .execute(pool)
        .await?;

        Ok(result.rows_affected())
    }
}
