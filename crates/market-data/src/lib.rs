//! Atlas Market Data Crate
//!
//! Periodically fetches prices from heterogeneous market sources, normalizes
//! them into [`Ticker`](atlas_core::Ticker) records, converts them to USD and
//! hands them to a [`MarketStore`].
//!
//! # Architecture
//!
//! ```text
//! +------------------+     +------------------+
//! | MarketScheduler  | --> | MarketProvider   |  (dex, cmc, compound, coingecko)
//! +------------------+     +------------------+
//!          |                        |
//!          |                        v
//!          |               +------------------+
//!          |               |  Normalization   |  (raw rows -> Ticker)
//!          |               +------------------+
//!          |                        |
//!          v                        v
//! +------------------+     +------------------+
//! | ProviderRegistry | --> |   MarketStore    |  (rates in, tickers out)
//! +------------------+     +------------------+
//! ```
//!
//! Registry slots double as provider priority: when two providers quote the
//! same pair, the store keeps the one with the lower slot.

pub mod errors;
pub mod provider;
pub mod registry;
pub mod scheduler;
pub mod store;

#[cfg(test)]
mod test_support;

pub use errors::{MarketDataError, StoreError};
pub use provider::cmc::CmcProvider;
pub use provider::coingecko::CoingeckoProvider;
pub use provider::compound::CompoundProvider;
pub use provider::dex::DexProvider;
pub use provider::MarketProvider;
pub use registry::ProviderRegistry;
pub use scheduler::{CycleSummary, MarketScheduler, SchedulerHandle};
pub use store::{InMemoryMarketStore, MarketStore};
