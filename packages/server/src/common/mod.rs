pub mod entity_ids;
pub mod error;
pub mod id;
pub mod sql;
pub mod text;

pub use entity_ids::*;
pub use error::{DomainError, DomainResult};
pub use id::Id;
pub use text::title_case;
