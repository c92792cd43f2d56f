use atlas_core::ApiClient;
use log::debug;

use super::models::{
    Account, AccountResponse, Delegation, DelegationsResponse, InflationResponse, LatestBlock,
    Pool, PoolResponse, TxPage, TxResponse, UnbondingDelegation, UnbondingDelegationsResponse,
    Validator, ValidatorsResponse,
};
use crate::errors::{params, PlatformError};

/// Cosmos SDK LCD client.
#[derive(Debug, Clone)]
pub struct CosmosClient {
    api: ApiClient,
}

impl CosmosClient {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn get_latest_block(&self) -> Result<LatestBlock, PlatformError> {
        self.api
            .get_json("blocks/latest", &[])
            .await
            .map_err(|e| PlatformError::fetch("CurrentBlockNumber", params([]), e))
    }

    pub async fn get_block_txs(&self, number: i64) -> Result<Vec<TxResponse>, PlatformError> {
        let page: TxPage = self
            .api
            .get_json("txs", &[("tx.height", number.to_string())])
            .await
            .map_err(|e| {
                PlatformError::fetch(
                    "GetBlockByNumber",
                    params([("block", number.to_string().as_str())]),
                    e,
                )
            })?;
        Ok(page.txs)
    }

    /// Sent and received transactions of `address`, in node order.
    pub async fn get_address_txs(&self, address: &str) -> Result<Vec<TxResponse>, PlatformError> {
        let mut txs = Vec::new();
        for filter in ["message.sender", "transfer.recipient"] {
            let page: TxPage = self
                .api
                .get_json("txs", &[(filter, address.to_string())])
                .await
                .map_err(|e| {
                    PlatformError::fetch(
                        "GetTxsByAddress",
                        params([("address", address), ("filter", filter)]),
                        e,
                    )
                })?;
            debug!("cosmos {}={} returned {} txs", filter, address, page.txs.len());
            txs.extend(page.txs);
        }
        Ok(txs)
    }

    pub async fn get_validators(&self) -> Result<Vec<Validator>, PlatformError> {
        let response: ValidatorsResponse = self
            .api
            .get_json("staking/validators", &[("status", "bonded".to_string())])
            .await
            .map_err(|e| PlatformError::fetch("GetValidators", params([]), e))?;
        Ok(response.result)
    }

    pub async fn get_pool(&self) -> Result<Pool, PlatformError> {
        let response: PoolResponse = self
            .api
            .get_json("staking/pool", &[])
            .await
            .map_err(|e| PlatformError::fetch("GetPool", params([]), e))?;
        Ok(response.result)
    }

    pub async fn get_inflation(&self) -> Result<String, PlatformError> {
        let response: InflationResponse = self
            .api
            .get_json("minting/inflation", &[])
            .await
            .map_err(|e| PlatformError::fetch("GetInflation", params([]), e))?;
        Ok(response.result)
    }

    /// `None` when the node reports no delegations at all.
    pub async fn get_delegations(
        &self,
        address: &str,
    ) -> Result<Option<Vec<Delegation>>, PlatformError> {
        let path = format!("staking/delegators/{}/delegations", address);
        let response: DelegationsResponse = self
            .api
            .get_json(&path, &[])
            .await
            .map_err(|e| PlatformError::fetch("GetDelegations", params([("address", address)]), e))?;
        Ok(response.result)
    }

    pub async fn get_unbonding_delegations(
        &self,
        address: &str,
    ) -> Result<Option<Vec<UnbondingDelegation>>, PlatformError> {
        let path = format!("staking/delegators/{}/unbonding_delegations", address);
        let response: UnbondingDelegationsResponse =
            self.api.get_json(&path, &[]).await.map_err(|e| {
                PlatformError::fetch(
                    "GetUnbondingDelegations",
                    params([("address", address)]),
                    e,
                )
            })?;
        Ok(response.result)
    }

    pub async fn get_account(&self, address: &str) -> Result<Account, PlatformError> {
        let path = format!("auth/accounts/{}", address);
        let response: AccountResponse = self
            .api
            .get_json(&path, &[])
            .await
            .map_err(|e| PlatformError::fetch("UndelegatedBalance", params([("address", address)]), e))?;
        Ok(response.result)
    }
}
