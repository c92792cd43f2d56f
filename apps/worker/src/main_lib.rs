use std::sync::Arc;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use atlas_core::coin::{BNB, ETH};
use atlas_core::ApiClient;
use atlas_market_data::{
    CmcProvider, CoingeckoProvider, CompoundProvider, DexProvider, InMemoryMarketStore,
    MarketStore, ProviderRegistry,
};
use atlas_platform::{AlgorandPlatform, CosmosPlatform, Platform, PlatformRegistry};

use crate::config::Config;

pub fn init_tracing() {
    let log_format = std::env::var("ATLAS_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

pub fn build_store() -> Arc<dyn MarketStore> {
    Arc::new(InMemoryMarketStore::new())
}

/// Assets the dex and compound providers convert their quotes through.
const REFERENCE_ASSETS: [&str; 2] = [BNB.symbol, ETH.symbol];

/// Warns once per reference asset that has no rate in `store`.
///
/// Providers quoting in a missing asset fail every fetch until a rate is
/// saved. Returns the missing symbols.
pub async fn warn_missing_rates(store: &dyn MarketStore) -> Vec<&'static str> {
    let mut missing = Vec::new();
    for asset in REFERENCE_ASSETS {
        if let Err(e) = store.get_rate(asset).await {
            tracing::warn!(
                "No {} rate in store ({}); providers quoting in {} will fail until one is saved",
                asset,
                e,
                asset
            );
            missing.push(asset);
        }
    }
    missing
}

/// Registers the market providers. Slot order is provider priority.
pub fn build_providers(config: &Config, store: &Arc<dyn MarketStore>) -> ProviderRegistry {
    ProviderRegistry::new()
        .with(
            0,
            Arc::new(DexProvider::new(
                ApiClient::http(&config.dex_api),
                Arc::clone(store),
                config.dex_interval,
            )),
        )
        .with(
            1,
            Arc::new(CmcProvider::new(
                ApiClient::http(&config.cmc_api),
                &config.cmc_api_key,
                config.quote_interval,
            )),
        )
        .with(
            2,
            Arc::new(CompoundProvider::new(
                ApiClient::http(&config.compound_api),
                Arc::clone(store),
                config.quote_interval,
            )),
        )
        .with(
            3,
            Arc::new(CoingeckoProvider::new(
                ApiClient::http(&config.coingecko_api),
                config.coingecko_pages,
                config.quote_interval,
            )),
        )
}

pub fn build_platforms(config: &Config) -> PlatformRegistry {
    PlatformRegistry::new()
        .with(Arc::new(AlgorandPlatform::new(
            ApiClient::http(&config.algorand_api),
            &config.algorand_key,
        )))
        .with(Arc::new(CosmosPlatform::new(ApiClient::http(
            &config.cosmos_api,
        ))))
}

/// Logs the head of every platform so misconfigured endpoints show up at
/// startup.
pub async fn probe_platforms(platforms: &PlatformRegistry) {
    for platform in platforms.iter() {
        let handle = platform.coin().handle;
        match platform.current_block_number().await {
            Ok(height) => tracing::info!("Platform {} at block {}", handle, height),
            Err(e) => tracing::warn!("Platform {} unreachable ({}): {}", handle, e.kind(), e),
        }
    }
}
