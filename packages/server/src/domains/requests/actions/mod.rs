// Requester-facing operations. Each action re-reads its preconditions
// inside a transaction; email fan-out happens after commit and is best
// effort.

pub mod cancel_request;
pub mod create_request;
pub mod fulfill_request;
pub mod queries;

pub use cancel_request::cancel_request;
pub use create_request::{create_request, NewBloodRequest};
pub use fulfill_request::fulfill_request;
pub use queries::{hospital_requests, my_requests};

use tracing::warn;

use crate::common::{DomainError, DomainResult, UserId};
use crate::domains::hospitals::models::Hospital;
use crate::domains::requests::models::{BloodRequest, RequestMatch};
use crate::kernel::ServerDeps;

/// The caller must be the original requester or the linked hospital.
pub(crate) async fn ensure_owner(
    request: &BloodRequest,
    acting_user: UserId,
    deps: &ServerDeps,
) -> DomainResult<()> {
    if request.requested_by == acting_user {
        return Ok(());
    }

    if let Some(hospital_id) = request.hospital_id {
        if let Some(hospital) = Hospital::find_by_id(hospital_id, &deps.db_pool).await? {
            if hospital.user_id == acting_user {
                return Ok(());
            }
        }
    }

    Err(DomainError::PermissionDenied)
}

/// Post-commit email fan-out to donors who accepted the request. Failures
/// are logged and absorbed; the committed state stands either way.
pub(crate) async fn fan_out_to_accepted(
    request: &BloodRequest,
    subject: &str,
    body: &str,
    deps: &ServerDeps,
) {
    let emails = match RequestMatch::accepted_donor_emails(request.id, &deps.db_pool).await {
        Ok(emails) => emails,
        Err(e) => {
            warn!(request_id = %request.id, error = %e, "could not load accepted donors for fan-out");
            return;
        }
    };

    for email in emails {
        if let Err(e) = deps.mailer.send(&email, subject, body).await {
            warn!(request_id = %request.id, error = %e, "fan-out email failed");
        }
    }
}
