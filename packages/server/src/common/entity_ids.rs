//! Typed id aliases for all domain entities.
//!
//! Each alias pins `Id<T>` to an entity marker so the compiler rejects
//! mixed-up ids (e.g. a `MatchId` passed where a `RequestId` is expected).

pub use super::id::Id;

/// Marker type for identity-provider accounts.
pub struct UserAccount;

/// Marker type for Hospital profiles.
pub struct Hospital;

/// Marker type for Donor profiles.
pub struct Donor;

/// Marker type for BloodRequest entities.
pub struct BloodRequest;

/// Marker type for RequestMatch entities.
pub struct RequestMatch;

/// Marker type for DonorDonation records.
pub struct DonorDonation;

/// Marker type for DonorNotification inbox items.
pub struct DonorNotification;

pub type UserId = Id<UserAccount>;
pub type HospitalId = Id<Hospital>;
pub type DonorId = Id<Donor>;
pub type RequestId = Id<BloodRequest>;
pub type MatchId = Id<RequestMatch>;
pub type DonationId = Id<DonorDonation>;
pub type NotificationId = Id<DonorNotification>;
