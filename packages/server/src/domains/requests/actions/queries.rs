//! Read-side request listings.

use crate::common::{DomainError, DomainResult, UserId};
use crate::domains::hospitals::models::Hospital;
use crate::domains::requests::models::BloodRequest;
use crate::kernel::ServerDeps;

/// Requests created by the acting user.
pub async fn my_requests(acting_user: UserId, deps: &ServerDeps) -> DomainResult<Vec<BloodRequest>> {
    BloodRequest::find_by_requester(acting_user, &deps.db_pool).await
}

/// Requests linked to the acting user's hospital. Hospital accounts only.
pub async fn hospital_requests(
    acting_user: UserId,
    deps: &ServerDeps,
) -> DomainResult<Vec<BloodRequest>> {
    let hospital = Hospital::find_by_user(acting_user, &deps.db_pool)
        .await?
        .ok_or(DomainError::PermissionDenied)?;

    BloodRequest::find_by_hospital(hospital.id, &deps.db_pool).await
}
