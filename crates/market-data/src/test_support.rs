//! Stubs shared by the crate's unit tests.

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use rust_decimal::Decimal;

use atlas_core::{CoinType, Rate, Ticker, TickerPrice, TransportError};

use crate::errors::{MarketDataError, StoreError};
use crate::provider::MarketProvider;
use crate::registry::ProviderRegistry;
use crate::store::MarketStore;

pub(crate) fn ticker_from(provider: &str, coin: &str, token: &str, value: Decimal) -> Ticker {
    let coin_type = if token.is_empty() {
        CoinType::Native
    } else {
        CoinType::Token
    };
    Ticker::new(
        coin,
        coin_type,
        token,
        TickerPrice {
            value,
            change_24h: Decimal::ZERO,
            currency: "USD".to_string(),
            provider: provider.to_string(),
        },
    )
}

/// Provider returning a fixed batch, failing or panicking on every fetch.
pub(crate) struct StubProvider {
    id: &'static str,
    tickers: Option<Vec<Ticker>>,
    panics: bool,
    interval: Duration,
    calls: AtomicUsize,
}

impl StubProvider {
    pub(crate) fn ok(id: &'static str, tickers: Vec<Ticker>) -> Self {
        Self {
            id,
            tickers: Some(tickers),
            panics: false,
            interval: Duration::from_secs(60),
            calls: AtomicUsize::new(0),
        }
    }

    pub(crate) fn failing(id: &'static str) -> Self {
        Self {
            id,
            tickers: None,
            panics: false,
            interval: Duration::from_secs(60),
            calls: AtomicUsize::new(0),
        }
    }

    pub(crate) fn panicking(id: &'static str) -> Self {
        Self {
            panics: true,
            ..Self::failing(id)
        }
    }

    pub(crate) fn every(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MarketProvider for StubProvider {
    fn id(&self) -> &'static str {
        self.id
    }

    fn update_interval(&self) -> Duration {
        self.interval
    }

    async fn fetch(&self) -> Result<Vec<Ticker>, MarketDataError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.panics {
            panic!("stub provider '{}' panicked", self.id);
        }
        match &self.tickers {
            Some(tickers) => Ok(tickers.clone()),
            None => Err(MarketDataError::fetch(
                self.id,
                "GetData",
                TransportError::NoFixture("stub".to_string()),
            )),
        }
    }
}

/// Store recording every saved ticker, failing saves for selected coins.
#[derive(Default)]
pub(crate) struct RecordingStore {
    rates: Mutex<Vec<Rate>>,
    saved: Mutex<Vec<Ticker>>,
    fail_coins: Mutex<HashSet<String>>,
}

impl RecordingStore {
    pub(crate) fn with_rate(currency: &str, rate: Decimal) -> Self {
        let store = Self::default();
        store.rates.lock().unwrap().push(Rate {
            currency: currency.to_string(),
            rate,
            timestamp: 0,
            provider: "test".to_string(),
        });
        store
    }

    pub(crate) fn fail_saves_for(&self, coin: &str) {
        self.fail_coins.lock().unwrap().insert(coin.to_string());
    }

    pub(crate) fn saved(&self) -> Vec<Ticker> {
        self.saved.lock().unwrap().clone()
    }
}

#[async_trait]
impl MarketStore for RecordingStore {
    async fn get_rate(&self, symbol: &str) -> Result<Rate, StoreError> {
        self.rates
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.currency == symbol)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("rate {}", symbol)))
    }

    async fn save_rate(&self, rate: Rate) -> Result<(), StoreError> {
        self.rates.lock().unwrap().push(rate);
        Ok(())
    }

    async fn get_ticker(&self, coin: &str, token: &str) -> Result<Ticker, StoreError> {
        self.saved
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|t| t.coin_name == coin && t.token_id == token)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("{}/{}", coin, token)))
    }

    async fn save_ticker(
        &self,
        ticker: &Ticker,
        _providers: &ProviderRegistry,
    ) -> Result<(), StoreError> {
        if self.fail_coins.lock().unwrap().contains(&ticker.coin_name) {
            return Err(StoreError::Internal("Intentional save failure".to_string()));
        }
        self.saved.lock().unwrap().push(ticker.clone());
        Ok(())
    }
}
