pub mod donation;
pub mod donor;
pub mod notification;

pub use donation::DonorDonation;
pub use donor::{Donor, DonorSearchFilters, DonorStatus, MatchCandidate, NewDonor};
pub use notification::DonorNotification;
