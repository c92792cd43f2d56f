//! Lending-protocol index provider (Compound cTokens).
//!
//! Each cToken is priced in ETH as `underlying_price * exchange_rate` and the
//! batch is then converted to the default fiat currency with the ETH rate.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::Deserialize;

use atlas_core::coin::ETH;
use atlas_core::utils::parse_decimal;
use atlas_core::{ApiClient, CoinType, Normalized, Ticker, TickerPrice};

use crate::errors::MarketDataError;
use crate::provider::{convert_to_fiat, MarketProvider};
use crate::store::MarketStore;

const PROVIDER_ID: &str = "compound";

const REFERENCE_ASSET: &str = ETH.symbol;

#[derive(Debug, Deserialize)]
struct CTokenResponse {
    #[serde(rename = "cToken", default)]
    c_tokens: Vec<CToken>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CToken {
    pub token_address: String,
    pub symbol: String,
    pub exchange_rate: PreciseValue,
    pub underlying_price: PreciseValue,
}

/// Numbers are sent as strings to keep their precision.
#[derive(Debug, Clone, Deserialize)]
pub struct PreciseValue {
    pub value: String,
}

pub struct CompoundProvider {
    client: ApiClient,
    store: Arc<dyn MarketStore>,
    update_interval: Duration,
}

impl CompoundProvider {
    pub fn new(client: ApiClient, store: Arc<dyn MarketStore>, update_interval: Duration) -> Self {
        Self {
            client,
            store,
            update_interval,
        }
    }
}

#[async_trait]
impl MarketProvider for CompoundProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    fn update_interval(&self) -> Duration {
        self.update_interval
    }

    async fn fetch(&self) -> Result<Vec<Ticker>, MarketDataError> {
        let response: CTokenResponse = self
            .client
            .get_json("v2/ctoken", &[])
            .await
            .map_err(|e| MarketDataError::fetch(PROVIDER_ID, "GetData", e))?;

        let mut tickers = normalize_tickers(&response.c_tokens, PROVIDER_ID);
        convert_to_fiat(self.store.as_ref(), REFERENCE_ASSET, &mut tickers).await?;
        Ok(tickers)
    }
}

pub fn normalize_ticker(c_token: &CToken, provider: &str) -> Normalized<Ticker> {
    let Some(underlying) = parse_decimal(&c_token.underlying_price.value) else {
        return Normalized::malformed(format!("{}: underlying_price", c_token.symbol));
    };
    let Some(exchange_rate) = parse_decimal(&c_token.exchange_rate.value) else {
        return Normalized::malformed(format!("{}: exchange_rate", c_token.symbol));
    };
    let Some(value) = underlying.checked_mul(exchange_rate) else {
        return Normalized::malformed(format!("{}: price overflow", c_token.symbol));
    };

    Normalized::Record(Ticker::new(
        REFERENCE_ASSET,
        CoinType::Token,
        c_token.token_address.to_lowercase(),
        TickerPrice {
            value,
            change_24h: Decimal::ZERO,
            currency: REFERENCE_ASSET.to_string(),
            provider: provider.to_string(),
        },
    ))
}

pub fn normalize_tickers(c_tokens: &[CToken], provider: &str) -> Vec<Ticker> {
    c_tokens
        .iter()
        .filter_map(|c| normalize_ticker(c, provider).record())
        .collect()
}
