use atlas_core::ApiClient;

use super::models::{Account, BlockResponse, Status, Transaction, TransactionsResponse};
use crate::errors::{params, PlatformError};

/// Algorand node REST client (v1 API).
#[derive(Debug, Clone)]
pub struct AlgorandClient {
    api: ApiClient,
}

impl AlgorandClient {
    /// The key is sent on every request in the `x-api-key` header.
    pub fn new(api: ApiClient, api_key: &str) -> Self {
        Self {
            api: api.with_header("x-api-key", api_key),
        }
    }

    pub async fn get_latest_block(&self) -> Result<i64, PlatformError> {
        let status: Status = self
            .api
            .get_json("v1/status", &[])
            .await
            .map_err(|e| PlatformError::fetch("CurrentBlockNumber", params([]), e))?;
        Ok(status.last_round)
    }

    pub async fn get_txs_in_block(&self, number: i64) -> Result<Vec<Transaction>, PlatformError> {
        let path = format!("v1/block/{}", number);
        let block: BlockResponse = self.api.get_json(&path, &[]).await.map_err(|e| {
            PlatformError::fetch(
                "GetBlockByNumber",
                params([("block", number.to_string().as_str())]),
                e,
            )
        })?;
        Ok(block.txns.transactions)
    }

    pub async fn get_txs_of_address(&self, address: &str) -> Result<Vec<Transaction>, PlatformError> {
        let path = format!("v1/account/{}/transactions", address);
        let response: TransactionsResponse = self
            .api
            .get_json(&path, &[])
            .await
            .map_err(|e| PlatformError::fetch("GetTxsByAddress", params([("address", address)]), e))?;
        Ok(response.transactions)
    }

    pub async fn get_account(&self, address: &str) -> Result<Account, PlatformError> {
        let path = format!("v1/account/{}", address);
        self.api
            .get_json(&path, &[])
            .await
            .map_err(|e| PlatformError::fetch("UndelegatedBalance", params([("address", address)]), e))
    }
}
