// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic.
// Domain code calls them through ServerDeps and treats every send as
// fire-and-forget: failures are logged at the call site, never propagated.

use anyhow::Result;
use async_trait::async_trait;

// =============================================================================
// Mailer Trait (Infrastructure - outbound email)
// =============================================================================

#[async_trait]
pub trait BaseMailer: Send + Sync {
    /// Deliver one message to one recipient address.
    ///
    /// Ok means the transport accepted the message; it is not a delivery
    /// guarantee. There is no retry machinery behind this call.
    async fn send(&self, recipient: &str, subject: &str, body: &str) -> Result<()>;
}
