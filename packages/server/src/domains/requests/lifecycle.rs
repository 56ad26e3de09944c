//! Request status lifecycle.
//!
//! The only legal edges are `open -> matched`, `open -> cancelled`, and
//! `matched -> fulfilled`. `cancelled` and `fulfilled` are terminal: once a
//! request reaches either, every status change is rejected. Callers go
//! through [`RequestStatus::transition`] so the rules live in one place
//! instead of ad hoc checks at each call site.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::common::{DomainError, DomainResult};
use crate::impl_pg_text_enum;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    Open,
    Matched,
    Fulfilled,
    Cancelled,
}

#[derive(Error, Debug)]
#[error("Unknown request status: {0}")]
pub struct ParseRequestStatusError(String);

impl RequestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestStatus::Open => "open",
            RequestStatus::Matched => "matched",
            RequestStatus::Fulfilled => "fulfilled",
            RequestStatus::Cancelled => "cancelled",
        }
    }

    /// Terminal statuses accept no further transition.
    pub fn is_terminal(&self) -> bool {
        matches!(self, RequestStatus::Fulfilled | RequestStatus::Cancelled)
    }

    /// Validates a status change from `self` to `next`.
    ///
    /// Re-setting the current value is a no-op and always passes. A change
    /// away from a terminal status fails with `ImmutableState`; any other
    /// edge outside the lifecycle fails with `NotAvailable`.
    pub fn transition(&self, next: RequestStatus) -> DomainResult<()> {
        if next == *self {
            return Ok(());
        }

        if self.is_terminal() {
            return Err(DomainError::ImmutableState);
        }

        match (self, next) {
            (RequestStatus::Open, RequestStatus::Matched)
            | (RequestStatus::Open, RequestStatus::Cancelled)
            | (RequestStatus::Matched, RequestStatus::Fulfilled) => Ok(()),
            _ => Err(DomainError::NotAvailable),
        }
    }
}

impl FromStr for RequestStatus {
    type Err = ParseRequestStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "open" => Ok(RequestStatus::Open),
            "matched" => Ok(RequestStatus::Matched),
            "fulfilled" => Ok(RequestStatus::Fulfilled),
            "cancelled" => Ok(RequestStatus::Cancelled),
            other => Err(ParseRequestStatusError(other.to_string())),
        }
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl_pg_text_enum!(RequestStatus);

#[cfg(test)]
mod tests {
    use super::RequestStatus::*;
    use crate::common::DomainError;

    #[test]
    fn legal_edges_pass() {
        assert!(Open.transition(Matched).is_ok());
        assert!(Open.transition(Cancelled).is_ok());
        assert!(Matched.transition(Fulfilled).is_ok());
    }

    #[test]
    fn terminal_statuses_reject_every_change() {
        for terminal in [Fulfilled, Cancelled] {
            for next in [Open, Matched, Fulfilled, Cancelled] {
                if next == terminal {
                    continue;
                }
                assert!(matches!(
                    terminal.transition(next),
                    Err(DomainError::ImmutableState)
                ));
            }
        }
    }

    #[test]
    fn resetting_the_same_value_is_a_noop() {
        for status in [Open, Matched, Fulfilled, Cancelled] {
            assert!(status.transition(status).is_ok());
        }
    }

    #[test]
    fn undeclared_edges_are_rejected() {
        assert!(matches!(
            Open.transition(Fulfilled),
            Err(DomainError::NotAvailable)
        ));
        assert!(matches!(
            Matched.transition(Cancelled),
            Err(DomainError::NotAvailable)
        ));
        assert!(matches!(
            Matched.transition(Open),
            Err(DomainError::NotAvailable)
        ));
    }
}
