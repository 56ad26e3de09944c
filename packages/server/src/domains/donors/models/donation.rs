use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{PgPool, Postgres, Transaction};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::common::{DomainError, DomainResult, DonationId, DonorId, RequestId};
use crate::domains::donors::models::donor::Donor;
use crate::domains::requests::models::blood_request::BloodRequest;
use crate::impl_pg_text_enum;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DonationStatus {
    Completed,
}

#[derive(Error, Debug)]
#[error("Unknown donation status: {0}")]
pub struct ParseDonationStatusError(String);

impl DonationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DonationStatus::Completed => "completed",
        }
    }
}

impl FromStr for DonationStatus {
    type Err = ParseDonationStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "completed" => Ok(DonationStatus::Completed),
            other => Err(ParseDonationStatusError(other.to_string())),
        }
    }
}

impl fmt::Display for DonationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl_pg_text_enum!(DonationStatus);

/// Durable record proving a completed transfer. Unique per (donor, request)
/// so fulfillment retries cannot double-record.
#[derive(sqlx::FromRow, Debug, Clone, Serialize, Deserialize)]
pub struct DonorDonation {
    pub id: DonationId,
    pub donor_id: DonorId,
    pub request_id: RequestId,
    pub units_donated: i32,
    pub status: DonationStatus,
    pub donation_date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

impl DonorDonation {
    /// Idempotent completed-donation insert, inside the fulfillment
    /// transaction.
    ///
    /// The donation invariants are re-checked here before the write,
    /// whoever the caller is: the donor must hold an accepted match for
    /// this request, and must not be the requester. The unique constraint
    /// turns a retry after partial failure into a no-op.
    pub async fn create_completed(
        donor: &Donor,
        request: &BloodRequest,
        tx: &mut Transaction<'_, Postgres>,
    ) -> DomainResult<()> {
        if request.requested_by == donor.user_id {
            return Err(DomainError::SelfMatch);
        }

        let has_accepted_match = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (
                 SELECT 1 FROM request_matches
                 WHERE donor_id = $1 AND request_id = $2 AND accepted = TRUE
             )",
        )
        .bind(donor.id)
        .bind(request.id)
        .fetch_one(&mut **tx)
        .await?;

        if !has_accepted_match {
            return Err(DomainError::DonationPrecondition);
        }

        sqlx::query(
            "INSERT INTO donor_donations (id, donor_id, request_id, units_donated, status)
             VALUES ($1, $2, $3, $4, $5)
             ON CONFLICT (donor_id, request_id) DO NOTHING",
        )
        .bind(DonationId::new())
        .bind(donor.id)
        .bind(request.id)
        .bind(request.units_required)
        .bind(DonationStatus::Completed)
        .execute(&mut **tx)
        .await?;

        Ok(())
    }

    pub async fn find_by_donor(donor_id: DonorId, pool: &PgPool) -> DomainResult<Vec<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM donor_donations WHERE donor_id = $1 ORDER BY donation_date DESC",
        )
        .bind(donor_id)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }

    pub async fn find_by_request(request_id: RequestId, pool: &PgPool) -> DomainResult<Vec<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM donor_donations WHERE request_id = $1")
            .bind(request_id)
            .fetch_all(pool)
            .await
            .map_err(Into::into)
    }
}
