//! Order-book exchange provider.
//!
//! The exchange quotes every pair against its native asset (BNB). Rows are
//! normalized to "token priced in BNB" and then converted to the default fiat
//! currency with the BNB rate from storage.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use atlas_core::coin::BNB;
use atlas_core::utils::parse_decimal;
use atlas_core::{ApiClient, CoinType, Normalized, Ticker, TickerPrice};

use crate::errors::MarketDataError;
use crate::provider::{convert_to_fiat, MarketProvider};
use crate::store::MarketStore;

const PROVIDER_ID: &str = "dex";

/// Asset every raw price is denominated in.
const REFERENCE_ASSET: &str = BNB.symbol;

const TICKER_LIMIT: &str = "1000";

/// One row of the exchange's 24h ticker endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoinPrice {
    pub base_asset_name: String,
    pub quote_asset_name: String,
    pub last_price: String,
    pub price_change_percent: String,
}

pub struct DexProvider {
    client: ApiClient,
    store: Arc<dyn MarketStore>,
    update_interval: Duration,
}

impl DexProvider {
    pub fn new(client: ApiClient, store: Arc<dyn MarketStore>, update_interval: Duration) -> Self {
        Self {
            client,
            store,
            update_interval,
        }
    }

    async fn fetch_prices(&self) -> Result<Vec<CoinPrice>, MarketDataError> {
        self.client
            .get_json("v1/ticker/24hr", &[("limit", TICKER_LIMIT.to_string())])
            .await
            .map_err(|e| MarketDataError::fetch(PROVIDER_ID, "GetData", e))
    }
}

#[async_trait]
impl MarketProvider for DexProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    fn update_interval(&self) -> Duration {
        self.update_interval
    }

    async fn fetch(&self) -> Result<Vec<Ticker>, MarketDataError> {
        let prices = self.fetch_prices().await?;
        let mut tickers = normalize_tickers(&prices, PROVIDER_ID);
        convert_to_fiat(self.store.as_ref(), REFERENCE_ASSET, &mut tickers).await?;
        Ok(tickers)
    }
}

/// Normalizes one row to a ticker priced in the reference asset.
///
/// When the reference asset is the row's base side the price is inverted and
/// the quote asset becomes the token.
pub fn normalize_ticker(price: &CoinPrice, provider: &str) -> Normalized<Ticker> {
    if price.quote_asset_name != REFERENCE_ASSET && price.base_asset_name != REFERENCE_ASSET {
        return Normalized::unsupported(format!(
            "{}/{}",
            price.base_asset_name, price.quote_asset_name
        ));
    }

    let Some(mut value) = parse_decimal(&price.last_price) else {
        return Normalized::malformed(format!("lastPrice '{}'", price.last_price));
    };
    let Some(change_24h) = parse_decimal(&price.price_change_percent) else {
        return Normalized::malformed(format!(
            "priceChangePercent '{}'",
            price.price_change_percent
        ));
    };

    let mut token_id = price.base_asset_name.clone();
    if token_id == REFERENCE_ASSET {
        token_id = price.quote_asset_name.clone();
        value = match rust_decimal::Decimal::ONE.checked_div(value) {
            Some(inverted) => inverted,
            None => return Normalized::malformed(format!("lastPrice '{}'", price.last_price)),
        };
    }

    Normalized::Record(Ticker::new(
        REFERENCE_ASSET,
        CoinType::Token,
        token_id,
        TickerPrice {
            value,
            change_24h,
            currency: REFERENCE_ASSET.to_string(),
            provider: provider.to_string(),
        },
    ))
}

/// Normalizes every row, silently dropping the ones that do not map.
pub fn normalize_tickers(prices: &[CoinPrice], provider: &str) -> Vec<Ticker> {
    prices
        .iter()
        .filter_map(|p| normalize_ticker(p, provider).record())
        .collect()
}
