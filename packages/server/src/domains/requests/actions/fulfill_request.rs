//! Fulfill blood request action.

use tracing::info;

use crate::common::{DomainError, DomainResult, RequestId, UserId};
use crate::domains::donors::models::{Donor, DonorDonation, DonorNotification};
use crate::domains::matching::emails;
use crate::domains::requests::lifecycle::RequestStatus;
use crate::domains::requests::models::{BloodRequest, RequestMatch};
use crate::kernel::ServerDeps;

use super::{ensure_owner, fan_out_to_accepted};

/// Finalize a matched request: `matched -> fulfilled`, record the donation,
/// notify the donor.
///
/// Everything stateful happens in one transaction against row-locked
/// re-reads, and the donation insert is idempotent, so a retry after a
/// partial failure converges instead of double-recording. The thank-you
/// email fan-out runs after commit and never unwinds it.
pub async fn fulfill_request(
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

    // The same-value exemption in `transition` would let a repeat fulfill
    // through; a terminal request takes no action at all
    if current.status.is_terminal() {
        return Err(DomainError::ImmutableState);
    }

    // Rejects open requests (NotAvailable)
    current.status.transition(RequestStatus::Fulfilled)?;

    // A matched request has exactly one accepted match; none means the data
    // is inconsistent and no donation can be recorded
    let accepted_match = RequestMatch::lock_accepted_for_request(request_id, &mut tx)
        .await?
        .ok_or(DomainError::DonationPrecondition)?;

    let donor = Donor::find_by_id(accepted_match.donor_id, &deps.db_pool)
        .await?
        .ok_or(DomainError::NotFound("donor"))?;

    current.set_status(RequestStatus::Fulfilled, &mut tx).await?;

    DonorDonation::create_completed(&donor, &current, &mut tx).await?;

    DonorNotification::create(
        donor.id,
        "Blood Request Fulfilled",
        "Thank you for donating blood. The requester has marked the request as fulfilled.",
        &mut *tx,
    )
    .await?;

    tx.commit().await?;

    info!(request_id = %request_id, donor_id = %donor.id, "blood request fulfilled");

    let (subject, body) = emails::request_fulfilled(&current);
    fan_out_to_accepted(&current, &subject, &body, deps).await;

    Ok(())
}
