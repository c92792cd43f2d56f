//! Shared error types.
//!
//! Source-specific crates define their own error enums (market data, platform)
//! and wrap [`TransportError`] for failed remote calls. Errors that must reach
//! monitoring go through [`report_error`] together with their context.

use std::collections::BTreeMap;
use std::fmt;

use log::error;
use thiserror::Error;

/// Contextual parameters attached to an escalated error.
pub type ErrorParams = BTreeMap<&'static str, String>;

/// Errors raised by a [`Transport`](crate::client::Transport) call.
#[derive(Error, Debug)]
pub enum TransportError {
    /// The request could not be sent or the body could not be read.
    #[error("Request to {url} failed: {message}")]
    Request { url: String, message: String },

    /// The remote answered with a non-success status.
    #[error("Unexpected status {status} from {url}: {body}")]
    Status {
        url: String,
        status: u16,
        body: String,
    },

    /// The body was received but does not match the expected shape.
    #[error("Failed to decode response from {path}: {message}")]
    Decode { path: String, message: String },

    /// No fixture is registered for the path (offline transport only).
    #[error("No response registered for {0}")]
    NoFixture(String),
}

impl TransportError {
    /// Short label used in structured log lines.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Request { .. } => "request",
            Self::Status { .. } => "status",
            Self::Decode { .. } => "decode",
            Self::NoFixture(_) => "no_fixture",
        }
    }
}

/// Escalates an error to the monitoring sink with its context.
///
/// The sink is whatever the host process installed behind the `log` facade;
/// the record is emitted under the `atlas::report` target so it can be routed
/// separately.
pub fn report_error<E: fmt::Display + ?Sized>(err: &E, params: &ErrorParams) {
    let context = params
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join(" ");
    error!(target: "atlas::report", "{} [{}]", err, context);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_error_display() {
        let err = TransportError::Status {
            url: "https://node.test/v1/status".to_string(),
            status: 503,
            body: "unavailable".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Unexpected status 503 from https://node.test/v1/status: unavailable"
        );
        assert_eq!(err.kind(), "status");
    }

    #[test]
    fn test_decode_error_kind() {
        let err = TransportError::Decode {
            path: "v1/block/1".to_string(),
            message: "missing field".to_string(),
        };
        assert_eq!(err.kind(), "decode");
        assert!(err.to_string().contains("v1/block/1"));
    }
}
