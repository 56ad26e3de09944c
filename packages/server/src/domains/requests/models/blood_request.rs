use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{PgPool, Postgres, Transaction};

use crate::common::{title_case, DomainError, DomainResult, HospitalId, RequestId, UserId};
use crate::domains::matching::BloodGroup;
use crate::domains::requests::lifecycle::RequestStatus;

/// Blood request - SQL persistence layer
///
/// Created `open`; the lifecycle in [`RequestStatus`] governs every status
/// change after that. City is stored title-cased so matching can compare
/// it exactly.
#[derive(sqlx::FromRow, Debug, Clone, Serialize, Deserialize)]
pub struct BloodRequest {
    pub id: RequestId,
    pub requested_by: UserId,
    pub hospital_id: Option<HospitalId>,
    pub blood_group: BloodGroup,
    pub units_required: i32,
    pub city: String,
    pub contact_info: String,
    pub status: RequestStatus,
    pub created_at: DateTime<Utc>,
}

impl BloodRequest {
    /// Insert a new open request.
    pub async fn create(
        requested_by: UserId,
        hospital_id: Option<HospitalId>,
        blood_group: BloodGroup,
        units_required: i32,
        city: &str,
        contact_info: &str,
        pool: &PgPool,
    ) -> DomainResult<Self> {
        if units_required < 1 {
            return Err(DomainError::Validation("units_required must be positive"));
        }

        sqlx::query_as::<_, Self>(
            "INSERT INTO blood_requests
                (id, requested_by, hospital_id, blood_group, units_required, city, contact_info, status)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING *",
        )
        .bind(RequestId::new())
        .bind(requested_by)
        .bind(hospital_id)
        .bind(blood_group)
        .bind(units_required)
        .bind(title_case(city))
        .bind(contact_info)
        .bind(RequestStatus::Open)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    pub async fn find_by_id(id: RequestId, pool: &PgPool) -> DomainResult<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM blood_requests WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    /// Load and row-lock a request inside a transaction. Every guarded
    /// status change starts here so concurrent writers serialize.
    pub async fn lock_by_id(
        id: RequestId,
        tx: &mut Transaction<'_, Postgres>,
    ) -> DomainResult<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM blood_requests WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut **tx)
            .await
            .map_err(Into::into)
    }

    /// Validate-then-save for `status`.
    ///
    /// Checks the lifecycle transition from this row's loaded status, then
    /// issues an UPDATE guarded on that same old status. Zero rows affected
    /// means a concurrent writer got there first.
    pub async fn set_status(
        &self,
        next: RequestStatus,
        tx: &mut Transaction<'_, Postgres>,
    ) -> DomainResult<()> {
        self.status.transition(next)?;

        let result = sqlx::query("UPDATE blood_requests SET status = $3 WHERE id = $1 AND status = $2")
            .bind(self.id)
            .bind(self.status)
            .bind(next)
            .execute(&mut **tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DomainError::NotAvailable);
        }

        Ok(())
    }

    pub async fn find_by_requester(user_id: UserId, pool: &PgPool) -> DomainResult<Vec<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM blood_requests WHERE requested_by = $1 ORDER BY created_at DESC",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }

    pub async fn find_by_hospital(hospital_id: HospitalId, pool: &PgPool) -> DomainResult<Vec<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM blood_requests WHERE hospital_id = $1 ORDER BY created_at DESC",
        )
        .bind(hospital_id)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }
}
