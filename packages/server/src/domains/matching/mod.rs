// Matching domain: compatibility rules, the match engine, and the email
// bodies it dispatches.

pub mod blood_group;
pub mod compatibility;
pub mod emails;
pub mod engine;

pub use blood_group::BloodGroup;
pub use compatibility::compatible_donors;
pub use engine::run_matching;
