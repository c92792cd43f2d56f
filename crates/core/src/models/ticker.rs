use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Fiat currency every ticker is converted to before it is stored.
pub const DEFAULT_CURRENCY: &str = "USD";

/// Whether a ticker prices a chain's native coin or a token on that chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoinType {
    Native,
    Token,
}

/// Price part of a ticker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickerPrice {
    pub value: Decimal,
    pub change_24h: Decimal,
    /// Unit `value` is denominated in, after any rate conversion.
    pub currency: String,
    pub provider: String,
}

/// Canonical price quote for one asset from one provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ticker {
    #[serde(rename = "coin")]
    pub coin_name: String,
    #[serde(rename = "type")]
    pub coin_type: CoinType,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub token_id: String,
    pub price: TickerPrice,
    /// Set when the raw record is normalized, not when it was fetched.
    pub last_update: DateTime<Utc>,
}

impl Ticker {
    /// Creates a ticker stamped with the current time.
    pub fn new(
        coin_name: impl Into<String>,
        coin_type: CoinType,
        token_id: impl Into<String>,
        price: TickerPrice,
    ) -> Self {
        Self {
            coin_name: coin_name.into(),
            coin_type,
            token_id: token_id.into(),
            price,
            last_update: Utc::now(),
        }
    }

    /// Storage key: one ticker per (coin, token) pair.
    pub fn key(&self) -> (String, String) {
        (self.coin_name.clone(), self.token_id.clone())
    }
}

/// Exchange rate of an asset against [`DEFAULT_CURRENCY`].
///
/// `rate` is the amount of `currency` worth one unit of the default fiat
/// currency, so a value in `currency` converts with `value * (1 / rate)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rate {
    pub currency: String,
    pub rate: Decimal,
    pub timestamp: i64,
    pub provider: String,
}

/// A rescaled ticker value does not fit in a [`Decimal`].
#[derive(Error, Debug, Clone, PartialEq)]
#[error("Rescaling {coin}/{token} value {value} by {factor} overflows")]
pub struct RateOverflow {
    pub coin: String,
    pub token: String,
    pub value: Decimal,
    pub factor: Decimal,
}

/// Rescales every ticker by `factor` and relabels its currency.
///
/// Either every ticker is rescaled or, on overflow, none is touched.
pub fn apply_rate(
    tickers: &mut [Ticker],
    factor: Decimal,
    currency: &str,
) -> Result<(), RateOverflow> {
    let values = tickers
        .iter()
        .map(|t| {
            t.price.value.checked_mul(factor).ok_or_else(|| RateOverflow {
                coin: t.coin_name.clone(),
                token: t.token_id.clone(),
                value: t.price.value,
                factor,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    for (ticker, value) in tickers.iter_mut().zip(values) {
        ticker.price.value = value;
        ticker.price.currency = currency.to_string();
    }
    Ok(())
}
