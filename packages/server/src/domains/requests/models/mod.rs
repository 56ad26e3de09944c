pub mod blood_request;
pub mod request_match;

pub use blood_request::BloodRequest;
pub use request_match::{PendingMatch, RequestMatch};
