// Business domains
pub mod accounts;
pub mod donors;
pub mod hospitals;
pub mod matching;
pub mod requests;
