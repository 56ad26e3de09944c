// Donor-facing operations.

pub mod queries;
pub mod respond_to_match;
pub mod toggle_availability;

pub use queries::{donation_history, inbox, pending_matches, search_donors, DonationHistory};
pub use respond_to_match::{respond_to_match, MatchResponse};
pub use toggle_availability::toggle_availability;
