// Infrastructure layer: trait seams and their implementations.
//
// Domain code depends on the traits only; concrete services are wired in
// through ServerDeps so tests can substitute recording doubles.

pub mod deps;
pub mod mailer;
pub mod test_dependencies;
pub mod traits;

pub use deps::ServerDeps;
pub use mailer::{HttpMailer, LogMailer};
pub use traits::BaseMailer;
