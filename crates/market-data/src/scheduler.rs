//! Periodic refresh of every registered provider.
//!
//! Each provider gets its own tokio task and timer. A cycle fetches the
//! provider's tickers and saves them one by one; a failing fetch or save is
//! logged and never stops the provider's timer or any other provider. A cycle
//! that panics is contained in its own task and logged the same way.

use std::sync::Arc;
use std::time::Duration;

use log::{debug, error, info, warn};
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};

use crate::errors::MarketDataError;
use crate::provider::MarketProvider;
use crate::registry::ProviderRegistry;
use crate::store::MarketStore;

/// Shortest period a provider timer is allowed to run at.
const MIN_UPDATE_INTERVAL: Duration = Duration::from_secs(1);

/// Outcome of one provider cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleSummary {
    pub provider: &'static str,
    pub tickers: usize,
    pub saved: usize,
    pub failed: usize,
}

pub struct MarketScheduler {
    registry: Arc<ProviderRegistry>,
    store: Arc<dyn MarketStore>,
}

impl MarketScheduler {
    pub fn new(registry: Arc<ProviderRegistry>, store: Arc<dyn MarketStore>) -> Self {
        Self { registry, store }
    }

    /// Spawns one timer task per provider, in registry order.
    ///
    /// The first cycle of every provider runs immediately. A cycle that
    /// overruns its period delays the next tick instead of stacking up.
    pub fn start(&self) -> SchedulerHandle {
        let mut tasks = Vec::with_capacity(self.registry.len());

        for (slot, provider) in self.registry.iter() {
            let provider = Arc::clone(provider);
            let registry = Arc::clone(&self.registry);
            let store = Arc::clone(&self.store);
            let period = provider.update_interval().max(MIN_UPDATE_INTERVAL);

            info!(
                "Scheduling market provider '{}' (slot {}) every {:?}",
                provider.id(),
                slot,
                period
            );

            tasks.push(tokio::spawn(async move {
                let mut ticker = interval(period);
                ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
                loop {
                    ticker.tick().await;
                    let cycle = tokio::spawn({
                        let provider = Arc::clone(&provider);
                        let registry = Arc::clone(&registry);
                        let store = Arc::clone(&store);
                        async move {
                            // Failures are already logged inside the cycle.
                            let _ = run_cycle(provider.as_ref(), store.as_ref(), &registry).await;
                        }
                    });
                    if let Err(e) = cycle.await {
                        error!("Market provider '{}' cycle aborted: {}", provider.id(), e);
                    }
                }
            }));
        }

        SchedulerHandle { tasks }
    }

    /// Runs a single cycle of `provider` against this scheduler's store.
    pub async fn run_cycle(
        &self,
        provider: &dyn MarketProvider,
    ) -> Result<CycleSummary, MarketDataError> {
        run_cycle(provider, self.store.as_ref(), &self.registry).await
    }
}

/// Running provider tasks.
pub struct SchedulerHandle {
    tasks: Vec<JoinHandle<()>>,
}

impl SchedulerHandle {
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Aborts every provider task and waits for them to finish.
    pub async fn shutdown(self) {
        for task in &self.tasks {
            task.abort();
        }
        futures::future::join_all(self.tasks).await;
        info!("Market scheduler stopped");
    }
}

async fn run_cycle(
    provider: &dyn MarketProvider,
    store: &dyn MarketStore,
    registry: &ProviderRegistry,
) -> Result<CycleSummary, MarketDataError> {
    let id = provider.id();
    debug!("Fetching tickers from provider '{}'", id);

    let tickers = match provider.fetch().await {
        Ok(tickers) => tickers,
        Err(e) => {
            error!(
                "Market provider '{}' fetch failed (kind={}): {}",
                id,
                e.kind(),
                e
            );
            return Err(e);
        }
    };

    let mut summary = CycleSummary {
        provider: id,
        tickers: tickers.len(),
        saved: 0,
        failed: 0,
    };

    for ticker in &tickers {
        match store.save_ticker(ticker, registry).await {
            Ok(()) => summary.saved += 1,
            Err(e) if e.is_rejection() => {
                summary.failed += 1;
                warn!(
                    "Ticker {}/{} from '{}' not saved: {}",
                    ticker.coin_name, ticker.token_id, id, e
                );
            }
            Err(e) => {
                summary.failed += 1;
                error!(
                    "Failed to save ticker {}/{} from '{}': {}",
                    ticker.coin_name, ticker.token_id, id, e
                );
            }
        }
    }

    info!(
        "Market data: {} tickers from '{}' ({} saved, {} failed)",
        summary.tickers, id, summary.saved, summary.failed
    );
    Ok(summary)
}
