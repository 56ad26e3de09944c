// Blood Connect - coordination core
//
// Matches open blood requests to compatible local donors, tracks donor
// responses, and drives each request through its lifecycle to fulfillment
// or cancellation with a durable donation record.
//
// Transport (HTTP/CLI), authentication, and page rendering live in outer
// layers; this crate exposes the operations as plain async functions.

pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;

pub use config::*;
