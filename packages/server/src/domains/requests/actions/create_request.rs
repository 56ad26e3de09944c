//! Create blood request action.

use tracing::{info, warn};

use crate::common::{DomainError, DomainResult, HospitalId, RequestId, UserId};
use crate::domains::accounts::models::UserAccount;
use crate::domains::hospitals::models::Hospital;
use crate::domains::matching::engine;
use crate::domains::matching::BloodGroup;
use crate::domains::requests::models::BloodRequest;
use crate::kernel::ServerDeps;

/// Input for [`create_request`].
#[derive(Debug, Clone)]
pub struct NewBloodRequest {
    pub requested_by: UserId,
    pub hospital_id: Option<HospitalId>,
    pub blood_group: BloodGroup,
    pub units_required: i32,
    pub city: String,
    /// Defaults to the hospital's phone, then the requester's email.
    pub contact_info: Option<String>,
}

/// Create an open request and immediately run matching for it.
///
/// The request commit and the matching run are decoupled: once the request
/// exists, a matching failure is logged and absorbed, and the id is still
/// returned. Matching can be re-run later; it is idempotent.
pub async fn create_request(new: NewBloodRequest, deps: &ServerDeps) -> DomainResult<RequestId> {
    let hospital = match new.hospital_id {
        Some(hospital_id) => {
            let hospital = Hospital::find_by_id(hospital_id, &deps.db_pool)
                .await?
                .ok_or(DomainError::NotFound("hospital"))?;
            if hospital.user_id != new.requested_by {
                return Err(DomainError::PermissionDenied);
            }
            Some(hospital)
        }
        None => None,
    };

    let contact_info = match new.contact_info {
        Some(contact) => contact,
        None => match &hospital {
            Some(hospital) => hospital.phone.clone(),
            None => {
                UserAccount::find_by_id(new.requested_by, &deps.db_pool)
                    .await?
                    .ok_or(DomainError::NotFound("user"))?
                    .email
            }
        },
    };

    let request = BloodRequest::create(
        new.requested_by,
        new.hospital_id,
        new.blood_group,
        new.units_required,
        &new.city,
        &contact_info,
        &deps.db_pool,
    )
    .await?;

    info!(request_id = %request.id, blood_group = %request.blood_group, city = %request.city,
          "blood request created");

    if let Err(e) = engine::run_matching(&request, deps).await {
        warn!(request_id = %request.id, error = %e, "initial matching run failed");
    }

    Ok(request.id)
}
