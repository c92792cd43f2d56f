//! Algorand platform adapter.
//!
//! Only plain payments (`pay`) are normalized; key registrations, asset
//! transfers and other kinds are skipped. Algorand has no delegation model,
//! so validators and delegations stay at the trait defaults.

mod client;
pub mod models;

use async_trait::async_trait;
use rust_decimal::Decimal;

use atlas_core::coin::ALGO;
use atlas_core::{
    ApiClient, Block, Coin, DelegationType, Normalized, StakingDetails, StakingReward, Transfer,
    Tx, TxMeta, TxStatus, TxType,
};

pub use client::AlgorandClient;
use models::{Transaction, TRANSACTION_TYPE_PAY};

use crate::errors::PlatformError;
use crate::traits::Platform;

/// Annual staking reward, in percent.
const ANNUAL_REWARD: i64 = 7;

pub struct AlgorandPlatform {
    client: AlgorandClient,
}

impl AlgorandPlatform {
    pub fn new(api: ApiClient, api_key: &str) -> Self {
        Self {
            client: AlgorandClient::new(api, api_key),
        }
    }
}

#[async_trait]
impl Platform for AlgorandPlatform {
    fn coin(&self) -> &'static Coin {
        &ALGO
    }

    async fn current_block_number(&self) -> Result<i64, PlatformError> {
        self.client.get_latest_block().await
    }

    async fn get_block_by_number(&self, number: i64) -> Result<Block, PlatformError> {
        let txs = self.client.get_txs_in_block(number).await?;
        Ok(Block {
            number,
            txs: normalize_txs(&txs),
        })
    }

    async fn get_txs_by_address(&self, address: &str) -> Result<Vec<Tx>, PlatformError> {
        let txs = self.client.get_txs_of_address(address).await?;
        Ok(normalize_txs(&txs))
    }

    fn get_details(&self) -> StakingDetails {
        StakingDetails {
            reward: StakingReward {
                annual: Decimal::from(ANNUAL_REWARD),
            },
            minimum_amount: "0".to_string(),
            lock_time: 0,
            delegation_type: DelegationType::Delegate,
        }
    }

    async fn undelegated_balance(&self, address: &str) -> Result<String, PlatformError> {
        let account = self.client.get_account(address).await?;
        Ok(account.amount.to_string())
    }
}

pub fn normalize(tx: &Transaction) -> Normalized<Tx> {
    if tx.tx_type != TRANSACTION_TYPE_PAY {
        return Normalized::unsupported(tx.tx_type.clone());
    }
    let Some(payment) = &tx.payment else {
        return Normalized::malformed(format!("{}: pay without payment", tx.hash));
    };

    Normalized::Record(Tx {
        id: tx.hash.clone(),
        coin: ALGO.id,
        from: tx.from.clone(),
        to: payment.to.clone(),
        fee: tx.fee.to_string(),
        date: tx.timestamp,
        block: tx.round,
        status: TxStatus::Completed,
        tx_type: TxType::Transfer,
        memo: String::new(),
        meta: TxMeta::Transfer(Transfer {
            value: payment.amount.to_string(),
            symbol: ALGO.symbol.to_string(),
            decimals: ALGO.decimals,
        }),
    })
}

pub fn normalize_txs(txs: &[Transaction]) -> Vec<Tx> {
    txs.iter().filter_map(|tx| normalize(tx).record()).collect()
}
