//! Mailer implementations behind the `BaseMailer` seam.

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Serialize;
use tracing::info;

use super::traits::BaseMailer;

/// Sends mail through an HTTP JSON relay (any transactional-mail API that
/// accepts a `{from, to, subject, text}` POST).
pub struct HttpMailer {
    client: reqwest::Client,
    relay_url: String,
    from: String,
}

#[derive(Serialize)]
struct MailPayload<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    text: &'a str,
}

impl HttpMailer {
    pub fn new(relay_url: String, from: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            relay_url,
            from,
        }
    }
}

#[async_trait]
impl BaseMailer for HttpMailer {
    async fn send(&self, recipient: &str, subject: &str, body: &str) -> Result<()> {
        let payload = MailPayload {
            from: &self.from,
            to: recipient,
            subject,
            text: body,
        };

        let response = self
            .client
            .post(&self.relay_url)
            .json(&payload)
            .send()
            .await
            .context("mail relay unreachable")?;

        response
            .error_for_status()
            .context("mail relay rejected message")?;

        Ok(())
    }
}

/// Logs outbound mail instead of sending it. Used when no relay is
/// configured (local development).
pub struct LogMailer;

#[async_trait]
impl BaseMailer for LogMailer {
    async fn send(&self, recipient: &str, subject: &str, _body: &str) -> Result<()> {
        info!(recipient, subject, "outbound mail (log only)");
        Ok(())
    }
}
