// Donor domain: donor profiles, donation records, the in-system inbox, and
// donor-facing actions.

pub mod actions;
pub mod models;
