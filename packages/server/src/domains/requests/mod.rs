// Blood request domain: the request and match entities, the status
// lifecycle, and requester-facing actions.

pub mod actions;
pub mod lifecycle;
pub mod models;

pub use lifecycle::RequestStatus;
