// Hospital profiles, consumed for ownership checks and contact routing.

pub mod models;

pub use models::Hospital;
