use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::common::{DomainResult, UserId};

/// Thin replica of an identity-provider account.
#[derive(sqlx::FromRow, Debug, Clone, Serialize, Deserialize)]
pub struct UserAccount {
    pub id: UserId,
    pub email: String,
    pub full_name: String,
    pub created_at: DateTime<Utc>,
}

impl UserAccount {
    pub async fn create(email: &str, full_name: &str, pool: &PgPool) -> DomainResult<Self> {
        sqlx::query_as::<_, Self>(
            "INSERT INTO users (id, email, full_name)
             VALUES ($1, $2, $3)
             RETURNING *",
        )
        .bind(UserId::new())
        .bind(email)
        .bind(full_name)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    pub async fn find_by_id(id: UserId, pool: &PgPool) -> DomainResult<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    pub async fn find_by_email(email: &str, pool: &PgPool) -> DomainResult<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }
}
