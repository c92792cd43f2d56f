//! Error types for the market data crate.
//!
//! - [`MarketDataError`]: a provider's fetch failed; the current cycle is aborted
//! - [`StoreError`]: a storage read or write failed

use atlas_core::{RateOverflow, TransportError};
use rust_decimal::Decimal;
use thiserror::Error;

/// Errors that abort a provider's fetch.
///
/// No tickers are emitted when a fetch returns one of these.
#[derive(Error, Debug)]
pub enum MarketDataError {
    /// A remote call to the provider failed.
    #[error("{operation} failed for provider '{provider}': {source}")]
    Fetch {
        provider: String,
        operation: &'static str,
        #[source]
        source: TransportError,
    },

    /// The conversion rate of the provider's reference asset is unavailable.
    #[error("Rate not found for asset {asset}: {source}")]
    RateNotFound {
        asset: String,
        #[source]
        source: StoreError,
    },

    /// The stored rate cannot be used for conversion (zero or negative).
    #[error("Invalid rate {rate} for asset {asset}")]
    InvalidRate { asset: String, rate: Decimal },

    /// A converted price does not fit; the whole batch is dropped.
    #[error("Conversion from {asset} failed: {source}")]
    Conversion {
        asset: String,
        #[source]
        source: RateOverflow,
    },
}

impl MarketDataError {
    pub fn fetch(provider: &str, operation: &'static str, source: TransportError) -> Self {
        Self::Fetch {
            provider: provider.to_string(),
            operation,
            source,
        }
    }

    /// Short label used in structured log lines.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Fetch { source, .. } => source.kind(),
            Self::RateNotFound { .. } => "rate_not_found",
            Self::InvalidRate { .. } => "invalid_rate",
            Self::Conversion { .. } => "conversion_overflow",
        }
    }
}

/// Errors returned by a [`MarketStore`](crate::store::MarketStore).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Not found: {0}")]
    NotFound(String),

    /// A newer ticker for the same pair is already stored.
    #[error("Ticker is outdated: {0}")]
    Outdated(String),

    /// The stored ticker comes from a provider with a better registry slot.
    #[error("Provider '{incoming}' has lower priority than '{existing}'")]
    LowerPriority { incoming: String, existing: String },

    #[error("Storage failure: {0}")]
    Internal(String),
}

impl StoreError {
    /// True when the store deliberately kept the existing record.
    pub fn is_rejection(&self) -> bool {
        matches!(self, Self::Outdated(_) | Self::LowerPriority { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_error_kind_follows_transport() {
        let error = MarketDataError::fetch(
            "dex",
            "GetData",
            TransportError::NoFixture("v1/ticker/24hr".to_string()),
        );
        assert_eq!(error.kind(), "no_fixture");
        assert_eq!(
            error.to_string(),
            "GetData failed for provider 'dex': No response registered for v1/ticker/24hr"
        );
    }

    #[test]
    fn test_rate_not_found_display() {
        let error = MarketDataError::RateNotFound {
            asset: "BNB".to_string(),
            source: StoreError::NotFound("rate BNB".to_string()),
        };
        assert_eq!(error.kind(), "rate_not_found");
        assert_eq!(
            error.to_string(),
            "Rate not found for asset BNB: Not found: rate BNB"
        );
    }

    #[test]
    fn test_rejections() {
        assert!(StoreError::Outdated("BNB".to_string()).is_rejection());
        assert!(StoreError::LowerPriority {
            incoming: "cmc".to_string(),
            existing: "dex".to_string(),
        }
        .is_rejection());
        assert!(!StoreError::Internal("disk full".to_string()).is_rejection());
    }
}
