// Test doubles for infrastructure traits.
//
// Compiled into the library so integration tests under tests/ can inject
// them through ServerDeps.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use super::traits::BaseMailer;

/// One captured outbound message.
#[derive(Debug, Clone)]
pub struct SentMail {
    pub recipient: String,
    pub subject: String,
    pub body: String,
}

/// Mailer that records every send for later assertions.
#[derive(Default)]
pub struct RecordingMailer {
    sent: Arc<Mutex<Vec<SentMail>>>,
}

impl RecordingMailer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent(&self) -> Vec<SentMail> {
        self.sent.lock().unwrap().clone()
    }

    pub fn sent_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }

    pub fn was_sent_to(&self, recipient: &str) -> bool {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .any(|m| m.recipient == recipient)
    }
}

#[async_trait]
impl BaseMailer for RecordingMailer {
    async fn send(&self, recipient: &str, subject: &str, body: &str) -> Result<()> {
        self.sent.lock().unwrap().push(SentMail {
            recipient: recipient.to_string(),
            subject: subject.to_string(),
            body: body.to_string(),
        });
        Ok(())
    }
}

/// Mailer that fails every send, for exercising the best-effort paths.
pub struct FailingMailer;

#[async_trait]
impl BaseMailer for FailingMailer {
    async fn send(&self, _recipient: &str, _subject: &str, _body: &str) -> Result<()> {
        Err(anyhow!("simulated mail transport failure"))
    }
}
