//! Server dependencies for domain actions (using traits for testability)

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::Config;
use crate::kernel::mailer::{HttpMailer, LogMailer};
use crate::kernel::traits::BaseMailer;

/// Dependency container handed to every domain action.
#[derive(Clone)]
pub struct ServerDeps {
    pub db_pool: PgPool,
    pub mailer: Arc<dyn BaseMailer>,
}

impl ServerDeps {
    pub fn new(db_pool: PgPool, mailer: Arc<dyn BaseMailer>) -> Self {
        Self { db_pool, mailer }
    }

    /// Wire production dependencies from configuration. Without a relay URL
    /// the mailer degrades to log-only output.
    pub fn from_config(config: &Config, db_pool: PgPool) -> Self {
        let mailer: Arc<dyn BaseMailer> = match &config.mail_relay_url {
            Some(url) => Arc::new(HttpMailer::new(url.clone(), config.mail_from.clone())),
            None => Arc::new(LogMailer),
        };

        Self { db_pool, mailer }
    }
}
