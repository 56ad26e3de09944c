pub mod user_account;

pub use user_account::UserAccount;
