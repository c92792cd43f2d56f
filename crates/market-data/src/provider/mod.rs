//! Market price providers.
//!
//! This module contains:
//! - The `MarketProvider` trait every provider implements
//! - The fiat conversion step shared by providers quoting in a crypto asset
//! - Concrete providers:
//!   - `dex` - order-book exchange, prices in BNB
//!   - `cmc` - aggregator index, prices in USD
//!   - `compound` - lending-protocol index, prices in ETH
//!   - `coingecko` - generic market index, prices in USD
//!
//! Every provider keeps its raw response types private to its module and
//! exposes a pure `normalize_tickers` function next to the fetch path.

mod traits;

pub mod cmc;
pub mod coingecko;
pub mod compound;
pub mod dex;

use rust_decimal::Decimal;

use atlas_core::{apply_rate, Ticker, DEFAULT_CURRENCY};

use crate::errors::MarketDataError;
use crate::store::MarketStore;

pub use traits::MarketProvider;

/// Converts tickers quoted in `asset` to the default fiat currency.
///
/// Either every ticker is converted or the call fails and the caller must
/// drop the batch.
pub(crate) async fn convert_to_fiat(
    store: &dyn MarketStore,
    asset: &str,
    tickers: &mut [Ticker],
) -> Result<(), MarketDataError> {
    let rate = store
        .get_rate(asset)
        .await
        .map_err(|source| MarketDataError::RateNotFound {
            asset: asset.to_string(),
            source,
        })?;

    let factor = if rate.rate > Decimal::ZERO {
        Decimal::ONE.checked_div(rate.rate)
    } else {
        None
    };
    let factor = factor.ok_or_else(|| MarketDataError::InvalidRate {
        asset: asset.to_string(),
        rate: rate.rate,
    })?;

    apply_rate(tickers, factor, DEFAULT_CURRENCY).map_err(|source| MarketDataError::Conversion {
        asset: asset.to_string(),
        source,
    })
}
