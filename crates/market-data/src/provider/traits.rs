//! Market provider trait definition.

use std::time::Duration;

use async_trait::async_trait;
use atlas_core::Ticker;

use crate::errors::MarketDataError;

/// Trait for market price providers.
///
/// Implement this trait to add a new price source. Each implementation owns
/// its transport and its polling interval; the scheduler only calls
/// [`fetch`](Self::fetch) on that interval and persists what it returns.
///
/// # Example
///
/// ```ignore
/// use async_trait::async_trait;
/// use atlas_market_data::provider::MarketProvider;
///
/// struct MyProvider {
///     client: ApiClient,
///     interval: Duration,
/// }
///
/// #[async_trait]
/// impl MarketProvider for MyProvider {
///     fn id(&self) -> &'static str {
///         "my_provider"
///     }
///
///     fn update_interval(&self) -> Duration {
///         self.interval
///     }
///
///     async fn fetch(&self) -> Result<Vec<Ticker>, MarketDataError> {
///         let raw = self.client.get_json("v1/prices", &[]).await
///             .map_err(|e| MarketDataError::fetch(self.id(), "GetData", e))?;
///         Ok(normalize_tickers(&raw, self.id()))
///     }
/// }
/// ```
#[async_trait]
pub trait MarketProvider: Send + Sync {
    /// Stable identifier, stored on every ticker the provider produces.
    fn id(&self) -> &'static str;

    /// How often the scheduler polls this provider.
    fn update_interval(&self) -> Duration;

    /// Fetches raw quotes and returns them normalized.
    ///
    /// Rows that cannot be normalized are skipped. Any failure of a remote
    /// call, including the rate lookup of providers that convert prices,
    /// fails the whole fetch.
    async fn fetch(&self) -> Result<Vec<Ticker>, MarketDataError>;
}
