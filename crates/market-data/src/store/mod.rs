//! Storage contract for market data.
//!
//! The engine never assumes serialized access: providers save concurrently,
//! so implementations must be safe under concurrent writes. Writes for the
//! same (coin, token) pair are last-write-wins unless the store rejects them
//! on priority or freshness grounds.

mod memory;

use async_trait::async_trait;

use atlas_core::{Rate, Ticker};

use crate::errors::StoreError;
use crate::registry::ProviderRegistry;

pub use memory::InMemoryMarketStore;

#[async_trait]
pub trait MarketStore: Send + Sync {
    /// Rate of `symbol` against the default fiat currency.
    async fn get_rate(&self, symbol: &str) -> Result<Rate, StoreError>;

    async fn save_rate(&self, rate: Rate) -> Result<(), StoreError>;

    async fn get_ticker(&self, coin: &str, token: &str) -> Result<Ticker, StoreError>;

    /// Persists a ticker.
    ///
    /// `providers` is the full registry so the store can rank the incoming
    /// ticker's provider against the one that wrote the stored ticker.
    async fn save_ticker(
        &self,
        ticker: &Ticker,
        providers: &ProviderRegistry,
    ) -> Result<(), StoreError>;
}
