use std::time::Duration;

/// Refresh period of the order-book exchange when unset.
const DEFAULT_DEX_INTERVAL: Duration = Duration::from_secs(60);

/// Refresh period of the quote indexes (cmc, compound, coingecko) when unset.
const DEFAULT_QUOTE_INTERVAL: Duration = Duration::from_secs(300);

pub struct Config {
    pub dex_api: String,
    pub dex_interval: Duration,
    pub cmc_api: String,
    pub cmc_api_key: String,
    pub compound_api: String,
    pub coingecko_api: String,
    pub coingecko_pages: usize,
    pub quote_interval: Duration,
    pub algorand_api: String,
    pub algorand_key: String,
    pub cosmos_api: String,
}

impl Config {
    /// Reads the process environment; `.env` must already be loaded.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());
        let interval = |key: &str, default: Duration| match lookup(key) {
            Some(raw) => parse_interval(&raw).unwrap_or_else(|| {
                tracing::warn!("Invalid {}='{}', using {:?}", key, raw, default);
                default
            }),
            None => default,
        };

        Self {
            dex_api: var("ATLAS_MARKET_DEX_API", "https://dex.binance.org/api"),
            dex_interval: interval("ATLAS_MARKET_DEX_INTERVAL", DEFAULT_DEX_INTERVAL),
            cmc_api: var("ATLAS_MARKET_CMC_API", "https://pro-api.coinmarketcap.com"),
            cmc_api_key: var("ATLAS_MARKET_CMC_API_KEY", ""),
            compound_api: var("ATLAS_MARKET_COMPOUND_API", "https://api.compound.finance/api"),
            coingecko_api: var("ATLAS_MARKET_COINGECKO_API", "https://api.coingecko.com/api/v3"),
            coingecko_pages: lookup("ATLAS_MARKET_COINGECKO_PAGES")
                .and_then(|raw| raw.trim().parse().ok())
                .unwrap_or(atlas_market_data::provider::coingecko::DEFAULT_PAGES),
            quote_interval: interval("ATLAS_MARKET_QUOTE_INTERVAL", DEFAULT_QUOTE_INTERVAL),
            algorand_api: var("ATLAS_ALGORAND_API", "https://api.algoexplorer.io"),
            algorand_key: var("ATLAS_ALGORAND_KEY", ""),
            cosmos_api: var("ATLAS_COSMOS_API", "https://lcd.nylira.net"),
        }
    }
}

/// Parses `30s`, `5m`, `1h` or a plain number of seconds.
fn parse_interval(raw: &str) -> Option<Duration> {
    let raw = raw.trim();
    let (digits, unit) = match raw.char_indices().last()? {
        (i, c) if c.is_ascii_alphabetic() => (&raw[..i], c),
        _ => (raw, 's'),
    };
    let value: u64 = digits.trim().parse().ok()?;
    let seconds = match unit {
        's' => value,
        'm' => value.checked_mul(60)?,
        'h' => value.checked_mul(3600)?,
        _ => return None,
    };
    (seconds > 0).then(|| Duration::from_secs(seconds))
}
