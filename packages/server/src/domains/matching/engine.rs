//! The match engine: finds eligible local donors for a request, records
//! matches idempotently, and dispatches invitation emails for new matches.

use tracing::{info, warn};

use crate::common::{title_case, DomainError, DomainResult, RequestId};
use crate::domains::donors::models::Donor;
use crate::domains::matching::{compatibility, emails};
use crate::domains::requests::models::{BloodRequest, RequestMatch};
use crate::kernel::ServerDeps;

/// Run matching for a request loaded by id.
pub async fn run_matching_for(request_id: RequestId, deps: &ServerDeps) -> DomainResult<usize> {
    let request = BloodRequest::find_by_id(request_id, &deps.db_pool)
        .await?
        .ok_or(DomainError::NotFound("blood request"))?;

    run_matching(&request, deps).await
}

/// Match eligible donors to a request and notify the new ones.
///
/// Candidates are active donors with a compatible blood group in the same
/// (normalized) city, excluding the requester. Match creation is idempotent:
/// a concurrent or repeated run skips pairs that already exist. Invitation
/// dispatch is best effort per donor; one failed send never stops the run
/// or unwinds the match row.
///
/// Returns the number of newly created matches. An empty candidate set is a
/// valid zero-result outcome, not an error.
pub async fn run_matching(request: &BloodRequest, deps: &ServerDeps) -> DomainResult<usize> {
    let donor_groups = compatibility::compatible_donors(request.blood_group);
    let city = title_case(&request.city);

    let candidates =
        Donor::find_match_candidates(donor_groups, &city, request.requested_by, &deps.db_pool)
            .await?;

    let mut created = 0usize;

    for candidate in candidates {
        let match_row = match RequestMatch::create_pending(
            request,
            candidate.donor_id,
            candidate.user_id,
            &deps.db_pool,
        )
        .await
        {
            Ok(Some(row)) => row,
            // Pair already matched: idempotent no-op
            Ok(None) => continue,
            // The query excludes the requester; the entity re-check is the
            // final word either way
            Err(DomainError::SelfMatch) => continue,
            Err(e) => return Err(e),
        };

        created += 1;

        // Single-use action references, resolved by the outer transport layer
        let accept_link = format!("/donors/matches/{}/accept", match_row.id);
        let reject_link = format!("/donors/matches/{}/reject", match_row.id);

        let (subject, body) = emails::match_invitation(request, &accept_link, &reject_link);

        match deps.mailer.send(&candidate.email, &subject, &body).await {
            Ok(()) => {
                if let Err(e) = RequestMatch::mark_notified(match_row.id, &deps.db_pool).await {
                    warn!(match_id = %match_row.id, error = %e, "failed to flag match as notified");
                }
            }
            Err(e) => {
                // The match stands; delivery is at-most-once, best effort
                warn!(
                    match_id = %match_row.id,
                    request_id = %request.id,
                    error = %e,
                    "match invitation email failed"
                );
            }
        }
    }

    info!(request_id = %request.id, created, "matching run complete");

    Ok(created)
}
