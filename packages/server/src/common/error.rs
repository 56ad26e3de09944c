use thiserror::Error;

/// Domain errors for the coordination core.
///
/// User-visible variants carry generic, retryable wording and never leak
/// internal identifiers. A duplicate match is deliberately not an error:
/// the unique constraint turns it into an idempotent no-op.
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Cancelled or fulfilled requests cannot be modified")]
    ImmutableState,

    #[error("Requester cannot be matched as a donor for their own blood request")]
    SelfMatch,

    #[error("This blood request is no longer available or already responded to")]
    NotAvailable,

    #[error("Invalid action: {0}")]
    InvalidAction(String),

    #[error("Donation allowed only after donor has accepted the request")]
    DonationPrecondition,

    #[error("You are not allowed to perform this action")]
    PermissionDenied,

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("{0}")]
    Validation(&'static str),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

pub type DomainResult<T> = Result<T, DomainError>;
