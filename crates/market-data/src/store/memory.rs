use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use atlas_core::{Rate, Ticker};

use super::MarketStore;
use crate::errors::StoreError;
use crate::registry::ProviderRegistry;

type TickerKey = (String, String);

/// Process-local market store.
///
/// A stored ticker is replaced only when the incoming one is not older and
/// its provider does not rank below the stored ticker's provider.
#[derive(Debug, Default)]
pub struct InMemoryMarketStore {
    tickers: RwLock<HashMap<TickerKey, Ticker>>,
    rates: RwLock<HashMap<String, Rate>>,
}

impl InMemoryMarketStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ticker_count(&self) -> usize {
        self.tickers.read().map(|t| t.len()).unwrap_or(0)
    }

    fn poisoned() -> StoreError {
        StoreError::Internal("lock poisoned".to_string())
    }
}

#[async_trait]
impl MarketStore for InMemoryMarketStore {
    async fn get_rate(&self, symbol: &str) -> Result<Rate, StoreError> {
        let rates = self.rates.read().map_err(|_| Self::poisoned())?;
        rates
            .get(symbol)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("rate {}", symbol)))
    }

    async fn save_rate(&self, rate: Rate) -> Result<(), StoreError> {
        let mut rates = self.rates.write().map_err(|_| Self::poisoned())?;
        rates.insert(rate.currency.clone(), rate);
        Ok(())
    }

    async fn get_ticker(&self, coin: &str, token: &str) -> Result<Ticker, StoreError> {
        let tickers = self.tickers.read().map_err(|_| Self::poisoned())?;
        tickers
            .get(&(coin.to_string(), token.to_string()))
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("ticker {}/{}", coin, token)))
    }

    async fn save_ticker(
        &self,
        ticker: &Ticker,
        providers: &ProviderRegistry,
    ) -> Result<(), StoreError> {
        let mut tickers = self.tickers.write().map_err(|_| Self::poisoned())?;
        let key = ticker.key();

        if let Some(existing) = tickers.get(&key) {
            if existing.last_update > ticker.last_update {
                return Err(StoreError::Outdated(format!("{}/{}", key.0, key.1)));
            }
            let existing_rank = providers.rank(&existing.price.provider);
            let incoming_rank = providers.rank(&ticker.price.provider);
            if incoming_rank > existing_rank {
                return Err(StoreError::LowerPriority {
                    incoming: ticker.price.provider.clone(),
                    existing: existing.price.provider.clone(),
                });
            }
        }

        tickers.insert(key, ticker.clone());
        Ok(())
    }
}
