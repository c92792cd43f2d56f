//! Cosmos Hub platform adapter.
//!
//! Transactions come from the LCD `txs` search, staking data from the
//! `staking` and `minting` modules. Delegations are resolved against a
//! [`ValidatorDirectory`] so the reward figures attached to each delegation
//! match the current validator set.

mod client;
pub mod models;
pub mod stake;
#[cfg(test)]
mod stake_tests;
pub mod tx;

use std::sync::Arc;

use async_trait::async_trait;
use log::debug;
use rust_decimal::Decimal;

use atlas_core::coin::ATOM;
use atlas_core::utils::parse_decimal;
use atlas_core::{report_error, ApiClient, Block, Coin, Delegation, StakingDetails, Tx, Validator};

pub use client::CosmosClient;
use models::DENOM;

use crate::directory::{LiveValidatorDirectory, ValidatorDirectory};
use crate::errors::{params, PlatformError};
use crate::traits::Platform;

pub struct CosmosPlatform {
    client: CosmosClient,
    directory: Arc<dyn ValidatorDirectory>,
}

impl CosmosPlatform {
    /// Platform resolving delegations against its own live validator set.
    pub fn new(api: ApiClient) -> Self {
        Self::with_directory(api, Arc::new(LiveValidatorDirectory))
    }

    pub fn with_directory(api: ApiClient, directory: Arc<dyn ValidatorDirectory>) -> Self {
        Self {
            client: CosmosClient::new(api),
            directory,
        }
    }
}

#[async_trait]
impl Platform for CosmosPlatform {
    fn coin(&self) -> &'static Coin {
        &ATOM
    }

    async fn current_block_number(&self) -> Result<i64, PlatformError> {
        let latest = self.client.get_latest_block().await?;
        let height = &latest.block.header.height;
        height.parse::<i64>().map_err(|e| PlatformError::Parse {
            operation: "CurrentBlockNumber",
            input: height.clone(),
            message: e.to_string(),
        })
    }

    async fn get_block_by_number(&self, number: i64) -> Result<Block, PlatformError> {
        let txs = self.client.get_block_txs(number).await?;
        Ok(Block {
            number,
            txs: tx::normalize_txs(&txs),
        })
    }

    async fn get_txs_by_address(&self, address: &str) -> Result<Vec<Tx>, PlatformError> {
        let txs = self.client.get_address_txs(address).await?;
        Ok(tx::normalize_address_txs(&txs))
    }

    fn get_details(&self) -> StakingDetails {
        stake::staking_details(Decimal::from(stake::ANNUAL_REWARD))
    }

    async fn undelegated_balance(&self, address: &str) -> Result<String, PlatformError> {
        let account = self.client.get_account(address).await?;
        Ok(account
            .value
            .coins
            .into_iter()
            .find(|c| c.denom == DENOM)
            .map(|c| c.amount)
            .unwrap_or_else(|| "0".to_string()))
    }

    async fn get_validators(&self) -> Result<Vec<Validator>, PlatformError> {
        let validators = self.client.get_validators().await?;
        let pool = self.client.get_pool().await?;
        let raw_inflation = self.client.get_inflation().await?;

        let Some(inflation) = parse_decimal(&raw_inflation) else {
            let err = PlatformError::Parse {
                operation: "GetValidators",
                input: raw_inflation.clone(),
                message: "inflation is not a decimal".to_string(),
            };
            report_error(
                &err,
                &params([("platform", ATOM.handle), ("inflation", raw_inflation.as_str())]),
            );
            return Err(err);
        };

        Ok(validators
            .iter()
            .map(|v| stake::normalize_validator(v, &pool, inflation))
            .collect())
    }

    async fn get_delegations(&self, address: &str) -> Result<Vec<Delegation>, PlatformError> {
        let delegations = self.client.get_delegations(address).await?;
        let unbonding = self.client.get_unbonding_delegations(address).await?;
        if delegations.is_none() && unbonding.is_none() {
            debug!("cosmos address {} has no delegations", address);
            return Ok(Vec::new());
        }

        let validators = self.directory.validators_map(self).await?;

        let mut results =
            stake::normalize_delegations(&delegations.unwrap_or_default(), &validators);
        results.extend(stake::normalize_unbonding_delegations(
            &unbonding.unwrap_or_default(),
            &validators,
        ));
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use atlas_core::{DelegationStatus, StaticTransport, TxStatus, ValidatorMap};
    use rust_decimal_macros::dec;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const VALIDATORS_JSON: &str = r#"{
        "height": "1",
        "result": [
            {"operator_address": "cosmosvaloper1a", "status": 2,
             "commission": {"commission_rates": {"rate": "0.1"}}},
            {"operator_address": "cosmosvaloper1b", "status": 1,
             "commission": {"commission_rates": {"rate": "oops"}}}
        ]
    }"#;

    const POOL_JSON: &str =
        r#"{"height": "1", "result": {"not_bonded_tokens": "0", "bonded_tokens": "100"}}"#;

    fn staking_transport(inflation: &str) -> StaticTransport {
        StaticTransport::new()
            .with("staking/validators?status=bonded", VALIDATORS_JSON)
            .with("staking/pool", POOL_JSON)
            .with(
                "minting/inflation",
                format!(r#"{{"height": "1", "result": "{}"}}"#, inflation),
            )
    }

    fn platform(transport: StaticTransport) -> CosmosPlatform {
        CosmosPlatform::new(ApiClient::new(Arc::new(transport)))
    }

    #[tokio::test]
    async fn test_validators_carry_reward_and_status() {
        let platform = platform(staking_transport("0.07"));

        let validators = platform.get_validators().await.unwrap();

        assert_eq!(validators.len(), 2);
        assert_eq!(validators[0].id, "cosmosvaloper1a");
        assert!(validators[0].status);
        assert_eq!(validators[0].details.reward.annual, dec!(6.3));
        assert_eq!(validators[0].details.lock_time, 1814400);
        assert!(!validators[1].status);
        assert_eq!(validators[1].details.reward.annual, Decimal::ZERO);
    }

    #[tokio::test]
    async fn test_unparseable_inflation_is_fatal() {
        let platform = platform(staking_transport("not-a-number"));

        let err = platform.get_validators().await.unwrap_err();

        match err {
            PlatformError::Parse {
                operation, input, ..
            } => {
                assert_eq!(operation, "GetValidators");
                assert_eq!(input, "not-a-number");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_delegations_use_live_validators() {
        let transport = staking_transport("0.07")
            .with(
                "staking/delegators/cosmos1d/delegations",
                r#"{"result": [
                    {"delegator_address": "cosmos1d", "validator_address": "cosmosvaloper1a",
                     "shares": "5000000.000000000000", "balance": "5000000"},
                    {"delegator_address": "cosmos1d", "validator_address": "cosmosvaloper1gone",
                     "shares": "1.0", "balance": "1"}
                ]}"#,
            )
            .with(
                "staking/delegators/cosmos1d/unbonding_delegations",
                r#"{"result": [
                    {"delegator_address": "cosmos1d", "validator_address": "cosmosvaloper1b",
                     "entries": [
                        {"creation_height": "10", "completion_time": "2019-09-24T17:52:30Z",
                         "initial_balance": "300", "balance": "300"}
                     ]}
                ]}"#,
            );
        let platform = platform(transport);

        let delegations = platform.get_delegations("cosmos1d").await.unwrap();

        assert_eq!(delegations.len(), 2);
        assert_eq!(delegations[0].status, DelegationStatus::Active);
        assert_eq!(delegations[0].value, "5000000");
        assert_eq!(delegations[0].delegator.details.reward.annual, dec!(6.3));
        assert_eq!(delegations[1].status, DelegationStatus::Pending);
        assert_eq!(delegations[1].delegator.id, "cosmosvaloper1b");
    }

    struct CountingDirectory(AtomicUsize);

    #[async_trait]
    impl ValidatorDirectory for CountingDirectory {
        async fn validators_map(
            &self,
            _platform: &dyn Platform,
        ) -> Result<ValidatorMap, PlatformError> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Ok(ValidatorMap::new())
        }
    }

    #[tokio::test]
    async fn test_no_delegations_skips_directory() {
        let transport = StaticTransport::new()
            .with("staking/delegators/cosmos1d/delegations", r#"{"height": "1", "result": null}"#)
            .with(
                "staking/delegators/cosmos1d/unbonding_delegations",
                r#"{"height": "1"}"#,
            );
        let directory = Arc::new(CountingDirectory(AtomicUsize::new(0)));
        let platform = CosmosPlatform::with_directory(
            ApiClient::new(Arc::new(transport)),
            directory.clone(),
        );

        let delegations = platform.get_delegations("cosmos1d").await.unwrap();

        assert!(delegations.is_empty());
        assert_eq!(directory.0.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_directory_failure_aborts_delegations() {
        let transport = StaticTransport::new()
            .with(
                "staking/delegators/cosmos1d/delegations",
                r#"{"result": [{"delegator_address": "cosmos1d",
                    "validator_address": "cosmosvaloper1a", "shares": "1", "balance": "1"}]}"#,
            )
            .with("staking/delegators/cosmos1d/unbonding_delegations", r#"{"result": null}"#);
        let platform = platform(transport);

        let err = platform.get_delegations("cosmos1d").await.unwrap_err();
        assert!(matches!(err, PlatformError::Directory { platform: "cosmos", .. }));
    }

    #[tokio::test]
    async fn test_balance_and_blocks() {
        let send = r#"{
            "txhash": "H1", "height": "42", "timestamp": "2019-09-24T17:52:30Z",
            "tx": {"type": "cosmos-sdk/StdTx", "value": {
                "msg": [{"type": "cosmos-sdk/MsgSend", "value": {
                    "from_address": "cosmos1a", "to_address": "cosmos1b",
                    "amount": [{"denom": "uatom", "amount": "10"}]}}],
                "fee": {"amount": [], "gas": "1"}, "memo": ""}}
        }"#;
        let transport = StaticTransport::new()
            .with(
                "auth/accounts/cosmos1a",
                r#"{"result": {"type": "cosmos-sdk/Account", "value": {"address": "cosmos1a",
                    "coins": [{"denom": "uiris", "amount": "1"}, {"denom": "uatom", "amount": "777"}]}}}"#,
            )
            .with(
                "auth/accounts/cosmos1b",
                r#"{"result": {"type": "cosmos-sdk/Account", "value": {"address": "cosmos1b", "coins": []}}}"#,
            )
            .with("blocks/latest", r#"{"block": {"header": {"height": "42"}}}"#)
            .with("txs?tx.height=42", format!(r#"{{"txs": [{}]}}"#, send))
            .with("txs?message.sender=cosmos1a", format!(r#"{{"txs": [{}]}}"#, send))
            .with("txs?transfer.recipient=cosmos1a", r#"{"txs": []}"#);
        let platform = platform(transport);

        assert_eq!(platform.undelegated_balance("cosmos1a").await.unwrap(), "777");
        assert_eq!(platform.undelegated_balance("cosmos1b").await.unwrap(), "0");
        assert_eq!(platform.current_block_number().await.unwrap(), 42);

        let block = platform.get_block_by_number(42).await.unwrap();
        assert_eq!(block.txs.len(), 1);
        assert_eq!(block.txs[0].fee, "0");
        assert_eq!(block.txs[0].status, TxStatus::Completed);

        let txs = platform.get_txs_by_address("cosmos1a").await.unwrap();
        assert_eq!(txs.len(), 1);
        assert_eq!(platform.get_details().reward.annual, dec!(11));
    }
}
