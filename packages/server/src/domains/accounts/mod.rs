// Identity replica: stable account ids and email addresses from the
// external auth provider. Credentials never enter this crate.

pub mod models;

pub use models::UserAccount;
