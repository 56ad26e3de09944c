//! Donor accept/reject action on a pending match.

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::common::{DomainError, DomainResult, MatchId, UserId};
use crate::domains::accounts::models::UserAccount;
use crate::domains::donors::models::{Donor, DonorNotification};
use crate::domains::hospitals::models::Hospital;
use crate::domains::matching::emails;
use crate::domains::requests::lifecycle::RequestStatus;
use crate::domains::requests::models::{BloodRequest, RequestMatch};
use crate::kernel::ServerDeps;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchResponse {
    Accepted,
    Rejected,
}

/// Process a donor's response to a pending match.
///
/// The guarded load only returns the match if it belongs to the acting
/// user, is still pending, and its request is still open; both rows stay
/// locked until commit, so of two donors accepting the same request at the
/// same instant, exactly one performs `open -> matched` and the other gets
/// `NotAvailable` with nothing written.
///
/// On accept, the requester (or linked hospital) receives the donor's
/// contact details by email. That message and the donor's inbox entry are
/// the only side effects beyond the two status writes; a failed email is
/// logged, never surfaced.
pub async fn respond_to_match(
    match_id: MatchId,
    acting_user: UserId,
    action: &str,
    deps: &ServerDeps,
) -> DomainResult<MatchResponse> {
    let response = match action {
        "accept" => MatchResponse::Accepted,
        "reject" => MatchResponse::Rejected,
        other => return Err(DomainError::InvalidAction(other.to_string())),
    };

    let mut tx = deps.db_pool.begin().await?;

    let match_row = RequestMatch::lock_pending_for_donor(match_id, acting_user, &mut tx)
        .await?
        .ok_or(DomainError::NotAvailable)?;

    RequestMatch::set_accepted(match_id, response == MatchResponse::Accepted, &mut tx).await?;

    let mut accepted = None;

    if response == MatchResponse::Accepted {
        let request = BloodRequest::lock_by_id(match_row.request_id, &mut tx)
            .await?
            .ok_or(DomainError::NotAvailable)?;

        // First acceptance wins; the guarded load already pinned the row to
        // `open` under lock
        request.set_status(RequestStatus::Matched, &mut tx).await?;

        let donor = Donor::find_by_id(match_row.donor_id, &deps.db_pool)
            .await?
            .ok_or(DomainError::NotFound("donor"))?;

        let coordinate_with = if request.hospital_id.is_some() {
            "hospital"
        } else {
            "requester"
        };
        DonorNotification::create(
            donor.id,
            "Request Accepted",
            &format!(
                "You have accepted a blood request. Please coordinate with the {}.",
                coordinate_with
            ),
            &mut *tx,
        )
        .await?;

        accepted = Some((request, donor));
    }

    tx.commit().await?;

    info!(match_id = %match_id, ?response, "match response recorded");

    if let Some((request, donor)) = accepted {
        if let Err(e) = send_acceptance_email(&request, &donor, deps).await {
            warn!(match_id = %match_id, error = %e, "acceptance email failed");
        }
    }

    Ok(response)
}

/// Email the donor's contact details to the hospital if the request has
/// one, otherwise to the requester. Contact details are shared only here.
async fn send_acceptance_email(
    request: &BloodRequest,
    donor: &Donor,
    deps: &ServerDeps,
) -> Result<()> {
    let recipient_user = match request.hospital_id {
        Some(hospital_id) => {
            let hospital = Hospital::find_by_id(hospital_id, &deps.db_pool)
                .await
                .map_err(anyhow::Error::from)?
                .context("linked hospital missing")?;
            hospital.user_id
        }
        None => request.requested_by,
    };

    let recipient = UserAccount::find_by_id(recipient_user, &deps.db_pool)
        .await
        .map_err(anyhow::Error::from)?
        .context("recipient account missing")?
        .email;

    let donor_email = UserAccount::find_by_id(donor.user_id, &deps.db_pool)
        .await
        .map_err(anyhow::Error::from)?
        .context("donor account missing")?
        .email;

    let (subject, body) = emails::acceptance_notice(donor, &donor_email, request);

    deps.mailer.send(&recipient, &subject, &body).await
}
