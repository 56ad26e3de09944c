use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{PgPool, QueryBuilder};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::common::{DomainResult, DonorId, UserId};
use crate::domains::matching::BloodGroup;
use crate::impl_pg_text_enum;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DonorStatus {
    Active,
    Inactive,
}

#[derive(Error, Debug)]
#[error("Unknown donor status: {0}")]
pub struct ParseDonorStatusError(String);

impl DonorStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DonorStatus::Active => "active",
            DonorStatus::Inactive => "inactive",
        }
    }

    /// The other status; availability toggling flips between the two.
    pub fn toggled(&self) -> Self {
        match self {
            DonorStatus::Active => DonorStatus::Inactive,
            DonorStatus::Inactive => DonorStatus::Active,
        }
    }
}

impl FromStr for DonorStatus {
    type Err = ParseDonorStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "active" => Ok(DonorStatus::Active),
            "inactive" => Ok(DonorStatus::Inactive),
            other => Err(ParseDonorStatusError(other.to_string())),
        }
    }
}

impl fmt::Display for DonorStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl_pg_text_enum!(DonorStatus);

/// Donor profile - SQL persistence layer
///
/// Owned by exactly one identity-provider account. Only `active` donors
/// participate in matching.
#[derive(sqlx::FromRow, Debug, Clone, Serialize, Deserialize)]
pub struct Donor {
    pub id: DonorId,
    pub user_id: UserId,
    pub first_name: String,
    pub middle_name: String,
    pub last_name: String,
    pub date_of_birth: NaiveDate,
    pub phone: String,
    pub blood_group: BloodGroup,
    pub address: String,
    pub state: String,
    pub city: String,
    pub pincode: String,
    pub status: DonorStatus,
    pub created_at: DateTime<Utc>,
}

/// Fields required to register a donor profile.
#[derive(Debug, Clone)]
pub struct NewDonor {
    pub user_id: UserId,
    pub first_name: String,
    pub middle_name: String,
    pub last_name: String,
    pub date_of_birth: NaiveDate,
    pub phone: String,
    pub blood_group: BloodGroup,
    pub address: String,
    pub state: String,
    pub city: String,
    pub pincode: String,
}

/// The slice of a donor the match engine needs: where to record the match
/// and where to send the invitation.
#[derive(sqlx::FromRow, Debug, Clone)]
pub struct MatchCandidate {
    pub donor_id: DonorId,
    pub user_id: UserId,
    pub email: String,
}

/// Filters for the public donor directory.
#[derive(Debug, Clone, Default)]
pub struct DonorSearchFilters {
    pub blood_group: Option<BloodGroup>,
    pub city: Option<String>,
    /// Free-text match across city, state, and address.
    pub location: Option<String>,
}

impl Donor {
    pub fn full_name(&self) -> String {
        [&self.first_name, &self.middle_name, &self.last_name]
            .iter()
            .filter(|part| !part.is_empty())
            .map(|part| part.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub async fn create(new: NewDonor, pool: &PgPool) -> DomainResult<Self> {
        sqlx::query_as::<_, Self>(
            "INSERT INTO donors
                (id, user_id, first_name, middle_name, last_name, date_of_birth,
                 phone, blood_group, address, state, city, pincode, status)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
             RETURNING *",
        )
        .bind(DonorId::new())
        .bind(new.user_id)
        .bind(&new.first_name)
        .bind(&new.middle_name)
        .bind(&new.last_name)
        .bind(new.date_of_birth)
        .bind(&new.phone)
        .bind(new.blood_group)
        .bind(&new.address)
        .bind(&new.state)
        .bind(crate::common::title_case(&new.city))
        .bind(&new.pincode)
        .bind(DonorStatus::Active)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    pub async fn find_by_id(id: DonorId, pool: &PgPool) -> DomainResult<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM donors WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    pub async fn find_by_user(user_id: UserId, pool: &PgPool) -> DomainResult<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM donors WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    /// Eligible candidates for a matching run: active, compatible group,
    /// same normalized city, requester excluded. Group and city columns are
    /// normalized in SQL so legacy rows with stray case or whitespace still
    /// participate.
    pub async fn find_match_candidates(
        donor_groups: &[BloodGroup],
        city: &str,
        exclude_user: UserId,
        pool: &PgPool,
    ) -> DomainResult<Vec<MatchCandidate>> {
        let groups: Vec<String> = donor_groups.iter().map(|g| g.as_str().to_string()).collect();

        sqlx::query_as::<_, MatchCandidate>(
            "SELECT d.id AS donor_id, d.user_id, u.email
             FROM donors d
             JOIN users u ON u.id = d.user_id
             WHERE d.status = 'active'
               AND UPPER(TRIM(d.blood_group)) = ANY($1)
               AND LOWER(TRIM(d.city)) = LOWER($2)
               AND d.user_id <> $3
             ORDER BY d.created_at",
        )
        .bind(&groups)
        .bind(city)
        .bind(exclude_user)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }

    pub async fn update_status(
        id: DonorId,
        status: DonorStatus,
        pool: &PgPool,
    ) -> DomainResult<Self> {
        sqlx::query_as::<_, Self>("UPDATE donors SET status = $2 WHERE id = $1 RETURNING *")
            .bind(id)
            .bind(status)
            .fetch_one(pool)
            .await
            .map_err(Into::into)
    }

    /// Public active-donor directory with optional filters.
    pub async fn search(filters: &DonorSearchFilters, pool: &PgPool) -> DomainResult<Vec<Self>> {
        let mut query =
            QueryBuilder::new("SELECT * FROM donors WHERE status = 'active'");

        if let Some(group) = filters.blood_group {
            query.push(" AND UPPER(TRIM(blood_group)) = ");
            query.push_bind(group.as_str());
        }

        if let Some(city) = &filters.city {
            query.push(" AND city ILIKE ");
            query.push_bind(format!("%{}%", city.trim()));
        }

        if let Some(location) = &filters.location {
            let pattern = format!("%{}%", location.trim());
            query.push(" AND (city ILIKE ");
            query.push_bind(pattern.clone());
            query.push(" OR state ILIKE ");
            query.push_bind(pattern.clone());
            query.push(" OR address ILIKE ");
            query.push_bind(pattern);
            query.push(")");
        }

        query.push(" ORDER BY first_name, last_name");

        query
            .build_query_as::<Self>()
            .fetch_all(pool)
            .await
            .map_err(Into::into)
    }
}
