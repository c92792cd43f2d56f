//! Generic market index provider (CoinGecko `coins/markets`).
//!
//! Prices are requested directly in USD, one page at a time. A failing page
//! fails the whole fetch so a cycle never stores a partial market.

use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use serde::Deserialize;

use atlas_core::utils::parse_decimal_f64;
use atlas_core::{ApiClient, CoinType, Normalized, Ticker, TickerPrice, DEFAULT_CURRENCY};

use crate::errors::MarketDataError;
use crate::provider::MarketProvider;

const PROVIDER_ID: &str = "coingecko";

const PER_PAGE: usize = 250;

/// Pages fetched per cycle when none is configured.
pub const DEFAULT_PAGES: usize = 4;

#[derive(Debug, Clone, Deserialize)]
pub struct CoinMarket {
    pub id: String,
    pub symbol: String,
    #[serde(default)]
    pub current_price: Option<f64>,
    #[serde(default)]
    pub price_change_percentage_24h: Option<f64>,
}

pub struct CoingeckoProvider {
    client: ApiClient,
    pages: usize,
    update_interval: Duration,
}

impl CoingeckoProvider {
    pub fn new(client: ApiClient, pages: usize, update_interval: Duration) -> Self {
        Self {
            client,
            pages: pages.max(1),
            update_interval,
        }
    }

    async fn fetch_page(&self, page: usize) -> Result<Vec<CoinMarket>, MarketDataError> {
        self.client
            .get_json(
                "coins/markets",
                &[
                    ("vs_currency", DEFAULT_CURRENCY.to_lowercase()),
                    ("per_page", PER_PAGE.to_string()),
                    ("page", page.to_string()),
                ],
            )
            .await
            .map_err(|e| MarketDataError::fetch(PROVIDER_ID, "GetData", e))
    }
}

#[async_trait]
impl MarketProvider for CoingeckoProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    fn update_interval(&self) -> Duration {
        self.update_interval
    }

    async fn fetch(&self) -> Result<Vec<Ticker>, MarketDataError> {
        let mut markets = Vec::new();
        for page in 1..=self.pages {
            let rows = self.fetch_page(page).await?;
            debug!("coingecko page {} returned {} rows", page, rows.len());
            let last_page = rows.len() < PER_PAGE;
            markets.extend(rows);
            if last_page {
                break;
            }
        }
        Ok(normalize_tickers(&markets, PROVIDER_ID))
    }
}

pub fn normalize_ticker(market: &CoinMarket, provider: &str) -> Normalized<Ticker> {
    let Some(value) = market.current_price.and_then(parse_decimal_f64) else {
        return Normalized::malformed(format!("{}: no current_price", market.id));
    };
    let change_24h = market
        .price_change_percentage_24h
        .and_then(parse_decimal_f64)
        .unwrap_or_default();

    Normalized::Record(Ticker::new(
        market.symbol.to_uppercase(),
        CoinType::Native,
        "",
        TickerPrice {
            value,
            change_24h,
            currency: DEFAULT_CURRENCY.to_string(),
            provider: provider.to_string(),
        },
    ))
}

pub fn normalize_tickers(markets: &[CoinMarket], provider: &str) -> Vec<Ticker> {
    markets
        .iter()
        .filter_map(|m| normalize_ticker(m, provider).record())
        .collect()
}
