use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::common::{DomainResult, HospitalId, UserId};

/// Hospital profile, linked to exactly one account.
#[derive(sqlx::FromRow, Debug, Clone, Serialize, Deserialize)]
pub struct Hospital {
    pub id: HospitalId,
    pub user_id: UserId,
    pub name: String,
    pub city: String,
    pub phone: String,
    pub contact_person: String,
    pub created_at: DateTime<Utc>,
}

impl Hospital {
    pub async fn create(
        user_id: UserId,
        name: &str,
        city: &str,
        phone: &str,
        contact_person: &str,
        pool: &PgPool,
    ) -> DomainResult<Self> {
        sqlx::query_as::<_, Self>(
            "INSERT INTO hospitals (id, user_id, name, city, phone, contact_person)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING *",
        )
        .bind(HospitalId::new())
        .bind(user_id)
        .bind(name)
        .bind(crate::common::title_case(city))
        .bind(phone)
        .bind(contact_person)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    pub async fn find_by_id(id: HospitalId, pool: &PgPool) -> DomainResult<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM hospitals WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    pub async fn find_by_user(user_id: UserId, pool: &PgPool) -> DomainResult<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM hospitals WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }
}
