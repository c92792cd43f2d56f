//! Error types for platform adapters.

use atlas_core::{ErrorParams, TransportError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlatformError {
    /// A remote call to the chain's API failed.
    #[error("{operation} failed: {source}")]
    Fetch {
        operation: &'static str,
        params: ErrorParams,
        #[source]
        source: TransportError,
    },

    /// A value that cannot be defaulted failed to parse.
    #[error("{operation}: cannot parse '{input}': {message}")]
    Parse {
        operation: &'static str,
        input: String,
        message: String,
    },

    /// The platform does not offer the operation.
    #[error("{operation} is not supported on {platform}")]
    NotSupported {
        operation: &'static str,
        platform: &'static str,
    },

    /// The validator directory could not be built.
    #[error("Validator directory unavailable for {platform}: {source}")]
    Directory {
        platform: &'static str,
        #[source]
        source: Box<PlatformError>,
    },
}

impl PlatformError {
    pub(crate) fn fetch(operation: &'static str, params: ErrorParams, source: TransportError) -> Self {
        Self::Fetch {
            operation,
            params,
            source,
        }
    }

    /// Short label used in structured log lines.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Fetch { source, .. } => source.kind(),
            Self::Parse { .. } => "parse",
            Self::NotSupported { .. } => "not_supported",
            Self::Directory { .. } => "directory",
        }
    }
}

/// Builds [`ErrorParams`] from literal pairs.
pub(crate) fn params<const N: usize>(pairs: [(&'static str, &str); N]) -> ErrorParams {
    pairs
        .into_iter()
        .map(|(k, v)| (k, v.to_string()))
        .collect()
}
