//! Cancel blood request action (owner only, open requests only).

use tracing::info;

use crate::common::{DomainError, DomainResult, RequestId, UserId};
use crate::domains::matching::emails;
use crate::domains::requests::lifecycle::RequestStatus;
use crate::domains::requests::models::BloodRequest;
use crate::kernel::ServerDeps;

use super::{ensure_owner, fan_out_to_accepted};

/// Cancel an open request.
///
/// The `open -> cancelled` guard runs against a row-locked re-read, so a
/// cancel racing an acceptance or a fulfillment loses cleanly. After
/// commit, donors with an accepted match are emailed; under the lifecycle
/// as modeled that set is always empty (an accepted match means the request
/// already left `open`), so the fan-out is a structural no-op kept for
/// symmetry with fulfillment.
pub async fn cancel_request(
    request_id: RequestId,
    acting_user: UserId,
    deps: &ServerDeps,
) -> DomainResult<()> {
    let request = BloodRequest::find_by_id(request_id, &deps.db_pool)
        .await?
        .ok_or(DomainError::NotFound("blood request"))?;

    ensure_owner(&request, acting_user, deps).await?;

    let mut tx = deps.db_pool.begin().await?;

    let current = BloodRequest::lock_by_id(request_id, &mut tx)
        .await?
        .ok_or(DomainError::NotFound("blood request"))?;

    // The same-value exemption in `transition` would let a repeat cancel
    // through; a terminal request takes no action at all
    if current.status.is_terminal() {
        return Err(DomainError::ImmutableState);
    }

    current.set_status(RequestStatus::Cancelled, &mut tx).await?;

    tx.commit().await?;

    info!(request_id = %request_id, "blood request cancelled");

    let (subject, body) = emails::request_cancelled(&current);
    fan_out_to_accepted(&current, &subject, &body, deps).await;

    Ok(())
}
