use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{PgPool, Postgres, Transaction};

use crate::common::{DomainError, DomainResult, DonorId, MatchId, RequestId, UserId};
use crate::domains::matching::BloodGroup;
use crate::domains::requests::models::blood_request::BloodRequest;

/// Candidate pairing between a request and an eligible donor.
///
/// `accepted` is three-valued: NULL while pending, then true or false
/// exactly once. The (request, donor) unique constraint makes creation
/// idempotent under concurrent matching runs.
#[derive(sqlx::FromRow, Debug, Clone, Serialize, Deserialize)]
pub struct RequestMatch {
    pub id: MatchId,
    pub request_id: RequestId,
    pub donor_id: DonorId,
    pub notified: bool,
    pub accepted: Option<bool>,
    pub created_at: DateTime<Utc>,
}

/// Pending match joined with the request fields a donor needs to decide.
/// Contact details are deliberately absent; they are shared on acceptance
/// only.
#[derive(sqlx::FromRow, Debug, Clone, Serialize)]
pub struct PendingMatch {
    pub match_id: MatchId,
    pub request_id: RequestId,
    pub blood_group: BloodGroup,
    pub city: String,
    pub units_required: i32,
    pub created_at: DateTime<Utc>,
}

impl RequestMatch {
    /// Idempotent insert of a pending match.
    ///
    /// Returns `Ok(None)` when the (request, donor) pair already exists:
    /// the unique constraint absorbs the duplicate instead of surfacing an
    /// error, so concurrent matching runs cannot double-create. The
    /// self-match invariant is re-checked here, before the write, no matter
    /// which caller asked.
    pub async fn create_pending(
        request: &BloodRequest,
        donor_id: DonorId,
        donor_user: UserId,
        pool: &PgPool,
    ) -> DomainResult<Option<Self>> {
        if donor_user == request.requested_by {
            return Err(DomainError::SelfMatch);
        }

        sqlx::query_as::<_, Self>(
            "INSERT INTO request_matches (id, request_id, donor_id)
             VALUES ($1, $2, $3)
             ON CONFLICT (request_id, donor_id) DO NOTHING
             RETURNING *",
        )
        .bind(MatchId::new())
        .bind(request.id)
        .bind(donor_id)
        .fetch_optional(pool)
        .await
        .map_err(Into::into)
    }

    /// Flag a match as notified after its invitation email went out.
    pub async fn mark_notified(id: MatchId, pool: &PgPool) -> DomainResult<()> {
        sqlx::query("UPDATE request_matches SET notified = TRUE WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(())
    }

    /// Guarded, locking load for a donor response.
    ///
    /// Returns the match only if it belongs to the given user, is still
    /// pending, and its request is still open. Locks both the match and the
    /// request row so a concurrent response or cancellation serializes
    /// behind this transaction.
    pub async fn lock_pending_for_donor(
        id: MatchId,
        user_id: UserId,
        tx: &mut Transaction<'_, Postgres>,
    ) -> DomainResult<Option<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT m.*
             FROM request_matches m
             JOIN donors d ON d.id = m.donor_id
             JOIN blood_requests r ON r.id = m.request_id
             WHERE m.id = $1
               AND d.user_id = $2
               AND m.accepted IS NULL
               AND r.status = 'open'
             FOR UPDATE OF m, r",
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(&mut **tx)
        .await
        .map_err(Into::into)
    }

    /// One-way pending -> accepted/rejected write, guarded on the row still
    /// being pending. Zero rows affected means a concurrent response won.
    pub async fn set_accepted(
        id: MatchId,
        accepted: bool,
        tx: &mut Transaction<'_, Postgres>,
    ) -> DomainResult<()> {
        let result =
            sqlx::query("UPDATE request_matches SET accepted = $2 WHERE id = $1 AND accepted IS NULL")
                .bind(id)
                .bind(accepted)
                .execute(&mut **tx)
                .await?;

        if result.rows_affected() == 0 {
            return Err(DomainError::NotAvailable);
        }

        Ok(())
    }

    /// The accepted match for a request, locked for fulfillment. At most one
    /// can exist once a request leaves `open`.
    pub async fn lock_accepted_for_request(
        request_id: RequestId,
        tx: &mut Transaction<'_, Postgres>,
    ) -> DomainResult<Option<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM request_matches
             WHERE request_id = $1 AND accepted = TRUE
             ORDER BY created_at
             LIMIT 1
             FOR UPDATE",
        )
        .bind(request_id)
        .fetch_optional(&mut **tx)
        .await
        .map_err(Into::into)
    }

    /// Pending matches on open requests for a donor's dashboard.
    pub async fn find_pending_for_user(
        user_id: UserId,
        pool: &PgPool,
    ) -> DomainResult<Vec<PendingMatch>> {
        sqlx::query_as::<_, PendingMatch>(
            "SELECT m.id AS match_id, r.id AS request_id, r.blood_group, r.city,
                    r.units_required, m.created_at
             FROM request_matches m
             JOIN donors d ON d.id = m.donor_id
             JOIN blood_requests r ON r.id = m.request_id
             WHERE d.user_id = $1
               AND m.accepted IS NULL
               AND r.status = 'open'
             ORDER BY m.created_at DESC",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }

    /// Email addresses of donors who accepted this request, for the
    /// post-commit cancellation/fulfillment fan-out.
    pub async fn accepted_donor_emails(
        request_id: RequestId,
        pool: &PgPool,
    ) -> DomainResult<Vec<String>> {
        sqlx::query_scalar::<_, String>(
            "SELECT u.email
             FROM request_matches m
             JOIN donors d ON d.id = m.donor_id
             JOIN users u ON u.id = d.user_id
             WHERE m.request_id = $1 AND m.accepted = TRUE",
        )
        .bind(request_id)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }
}
