mod config;
mod main_lib;

use std::sync::Arc;

use atlas_market_data::MarketScheduler;
use config::Config;
use main_lib::{
    build_platforms, build_providers, build_store, init_tracing, probe_platforms,
    warn_missing_rates,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();
    let config = Config::from_env();

    let platforms = build_platforms(&config);
    tracing::info!("Platforms: {:?}", platforms);
    probe_platforms(&platforms).await;

    let store = build_store();
    warn_missing_rates(store.as_ref()).await;
    let providers = Arc::new(build_providers(&config, &store));
    tracing::info!("Market providers: {:?}", providers);

    let scheduler = MarketScheduler::new(providers, store);
    let handle = scheduler.start();
    tracing::info!("Market scheduler running {} providers", handle.len());

    tokio::signal::ctrl_c().await?;
    tracing::info!("Shutting down");
    handle.shutdown().await;
    Ok(())
}
