//! Aggregator index provider (CoinMarketCap listings).
//!
//! Listings are already quoted in the default fiat currency, so no rate
//! conversion is needed. A listing issued on another chain becomes a token
//! ticker of that chain's coin.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use atlas_core::utils::parse_decimal_f64;
use atlas_core::{ApiClient, CoinType, Normalized, Ticker, TickerPrice, DEFAULT_CURRENCY};

use crate::errors::MarketDataError;
use crate::provider::MarketProvider;

const PROVIDER_ID: &str = "cmc";

const LISTINGS_LIMIT: &str = "5000";

#[derive(Debug, Deserialize)]
struct ListingsResponse {
    data: Vec<Listing>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Listing {
    pub id: u64,
    pub symbol: String,
    #[serde(default)]
    pub platform: Option<ListingPlatform>,
    #[serde(default)]
    pub quote: HashMap<String, ListingQuote>,
}

/// Chain a token listing is issued on.
#[derive(Debug, Clone, Deserialize)]
pub struct ListingPlatform {
    pub symbol: String,
    pub token_address: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ListingQuote {
    pub price: Option<f64>,
    pub percent_change_24h: Option<f64>,
}

pub struct CmcProvider {
    client: ApiClient,
    update_interval: Duration,
}

impl CmcProvider {
    /// The API key is sent on every request in the `X-CMC_PRO_API_KEY` header.
    pub fn new(client: ApiClient, api_key: &str, update_interval: Duration) -> Self {
        Self {
            client: client.with_header("X-CMC_PRO_API_KEY", api_key),
            update_interval,
        }
    }
}

#[async_trait]
impl MarketProvider for CmcProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    fn update_interval(&self) -> Duration {
        self.update_interval
    }

    async fn fetch(&self) -> Result<Vec<Ticker>, MarketDataError> {
        let response: ListingsResponse = self
            .client
            .get_json(
                "v1/cryptocurrency/listings/latest",
                &[
                    ("limit", LISTINGS_LIMIT.to_string()),
                    ("convert", DEFAULT_CURRENCY.to_string()),
                ],
            )
            .await
            .map_err(|e| MarketDataError::fetch(PROVIDER_ID, "GetData", e))?;

        Ok(normalize_tickers(&response.data, PROVIDER_ID))
    }
}

pub fn normalize_ticker(listing: &Listing, provider: &str) -> Normalized<Ticker> {
    let Some(quote) = listing.quote.get(DEFAULT_CURRENCY) else {
        return Normalized::malformed(format!("{}: no {} quote", listing.symbol, DEFAULT_CURRENCY));
    };
    let Some(value) = quote.price.and_then(parse_decimal_f64) else {
        return Normalized::malformed(format!("{}: price", listing.symbol));
    };
    let change_24h = quote
        .percent_change_24h
        .and_then(parse_decimal_f64)
        .unwrap_or_default();

    let (coin_name, coin_type, token_id) = match &listing.platform {
        Some(platform) => (
            platform.symbol.clone(),
            CoinType::Token,
            platform.token_address.to_lowercase(),
        ),
        None => (listing.symbol.clone(), CoinType::Native, String::new()),
    };

    Normalized::Record(Ticker::new(
        coin_name,
        coin_type,
        token_id,
        TickerPrice {
            value,
            change_24h,
            currency: DEFAULT_CURRENCY.to_string(),
            provider: provider.to_string(),
        },
    ))
}

pub fn normalize_tickers(listings: &[Listing], provider: &str) -> Vec<Ticker> {
    listings
        .iter()
        .filter_map(|l| normalize_ticker(l, provider).record())
        .collect()
}
