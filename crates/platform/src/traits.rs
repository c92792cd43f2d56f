use async_trait::async_trait;

use atlas_core::{Block, Coin, Delegation, StakingDetails, Tx, Validator};

use crate::errors::PlatformError;

/// A blockchain whose data is normalized into the canonical records.
///
/// Only [`coin`](Platform::coin) and [`get_details`](Platform::get_details)
/// are required. Block and transaction methods default to
/// [`PlatformError::NotSupported`]; staking methods default to empty results
/// since a chain without staking simply has no validators.
///
/// # Example
///
/// ```ignore
/// struct MyChain;
///
/// #[async_trait]
/// impl Platform for MyChain {
///     fn coin(&self) -> &'static Coin {
///         &atlas_core::coin::ALGO
///     }
///
///     fn get_details(&self) -> StakingDetails {
///         // ...
///     }
/// }
/// ```
#[async_trait]
pub trait Platform: Send + Sync {
    fn coin(&self) -> &'static Coin;

    async fn current_block_number(&self) -> Result<i64, PlatformError> {
        Err(not_supported(self.coin(), "CurrentBlockNumber"))
    }

    async fn get_block_by_number(&self, _number: i64) -> Result<Block, PlatformError> {
        Err(not_supported(self.coin(), "GetBlockByNumber"))
    }

    async fn get_txs_by_address(&self, _address: &str) -> Result<Vec<Tx>, PlatformError> {
        Err(not_supported(self.coin(), "GetTxsByAddress"))
    }

    /// Static staking parameters of the chain.
    fn get_details(&self) -> StakingDetails;

    /// Spendable (not delegated) balance in the coin's smallest unit.
    async fn undelegated_balance(&self, _address: &str) -> Result<String, PlatformError> {
        Err(not_supported(self.coin(), "UndelegatedBalance"))
    }

    async fn get_validators(&self) -> Result<Vec<Validator>, PlatformError> {
        Ok(Vec::new())
    }

    async fn get_delegations(&self, _address: &str) -> Result<Vec<Delegation>, PlatformError> {
        Ok(Vec::new())
    }
}

fn not_supported(coin: &Coin, operation: &'static str) -> PlatformError {
    PlatformError::NotSupported {
        operation,
        platform: coin.handle,
    }
}
