//! Availability toggle: an inactive donor stops receiving matches.

use tracing::info;

use crate::common::{DomainError, DomainResult, UserId};
use crate::domains::donors::models::{Donor, DonorStatus};
use crate::kernel::ServerDeps;

pub async fn toggle_availability(
    acting_user: UserId,
    deps: &ServerDeps,
) -> DomainResult<DonorStatus> {
    let donor = Donor::find_by_user(acting_user, &deps.db_pool)
        .await?
        .ok_or(DomainError::NotFound("donor"))?;

    let updated = Donor::update_status(donor.id, donor.status.toggled(), &deps.db_pool).await?;

    info!(donor_id = %updated.id, status = %updated.status, "donor availability toggled");

    Ok(updated.status)
}
