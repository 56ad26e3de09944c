//! Donor read-side operations: dashboard listings and the public directory.

use crate::common::{DomainError, DomainResult, UserId};
use crate::domains::donors::models::{
    Donor, DonorDonation, DonorNotification, DonorSearchFilters,
};
use crate::domains::donors::models::donation::DonationStatus;
use crate::domains::requests::models::PendingMatch;
use crate::domains::requests::models::RequestMatch;
use crate::kernel::ServerDeps;

/// Pending matches on open requests, newest first.
pub async fn pending_matches(
    acting_user: UserId,
    deps: &ServerDeps,
) -> DomainResult<Vec<PendingMatch>> {
    RequestMatch::find_pending_for_user(acting_user, &deps.db_pool).await
}

/// Read-only donation history with summary counts.
#[derive(Debug, Clone)]
pub struct DonationHistory {
    pub donations: Vec<DonorDonation>,
    pub total: usize,
    pub completed: usize,
}

pub async fn donation_history(
    acting_user: UserId,
    deps: &ServerDeps,
) -> DomainResult<DonationHistory> {
    let donor = Donor::find_by_user(acting_user, &deps.db_pool)
        .await?
        .ok_or(DomainError::NotFound("donor"))?;

    let donations = DonorDonation::find_by_donor(donor.id, &deps.db_pool).await?;
    let total = donations.len();
    let completed = donations
        .iter()
        .filter(|d| d.status == DonationStatus::Completed)
        .count();

    Ok(DonationHistory {
        donations,
        total,
        completed,
    })
}

/// The donor's inbox, newest first. Unread items flip to read on view.
pub async fn inbox(acting_user: UserId, deps: &ServerDeps) -> DomainResult<Vec<DonorNotification>> {
    let donor = Donor::find_by_user(acting_user, &deps.db_pool)
        .await?
        .ok_or(DomainError::NotFound("donor"))?;

    let notifications = DonorNotification::find_by_donor(donor.id, &deps.db_pool).await?;
    DonorNotification::mark_all_read(donor.id, &deps.db_pool).await?;

    Ok(notifications)
}

/// Public directory of active donors.
pub async fn search_donors(
    filters: &DonorSearchFilters,
    deps: &ServerDeps,
) -> DomainResult<Vec<Donor>> {
    Donor::search(filters, &deps.db_pool).await
}
