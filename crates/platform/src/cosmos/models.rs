//! Response shapes of the Cosmos SDK LCD (REST) API.

use serde::Deserialize;

/// Denomination of spendable and delegated ATOM.
pub const DENOM: &str = "uatom";

/// Message type of a plain bank transfer.
pub const MSG_SEND: &str = "cosmos-sdk/MsgSend";

/// Validator status code of a validator in the bonded set.
pub const BONDED_STATUS: i64 = 2;

#[derive(Debug, Deserialize)]
pub struct LatestBlock {
    pub block: BlockInner,
}

#[derive(Debug, Deserialize)]
pub struct BlockInner {
    pub header: BlockHeader,
}

#[derive(Debug, Deserialize)]
pub struct BlockHeader {
    pub height: String,
}

#[derive(Debug, Deserialize)]
pub struct TxPage {
    #[serde(default)]
    pub txs: Vec<TxResponse>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TxResponse {
    #[serde(rename = "txhash")]
    pub hash: String,
    pub height: String,
    #[serde(default)]
    pub code: u32,
    #[serde(default)]
    pub timestamp: String,
    pub tx: StdTx,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StdTx {
    pub value: StdTxValue,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StdTxValue {
    #[serde(default)]
    pub msg: Vec<Message>,
    pub fee: Fee,
    #[serde(default)]
    pub memo: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Message {
    #[serde(rename = "type")]
    pub msg_type: String,
    pub value: serde_json::Value,
}

/// Payload of a `cosmos-sdk/MsgSend` message.
#[derive(Debug, Clone, Deserialize)]
pub struct MsgSend {
    pub from_address: String,
    pub to_address: String,
    #[serde(default)]
    pub amount: Vec<CoinAmount>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Fee {
    #[serde(default)]
    pub amount: Vec<CoinAmount>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CoinAmount {
    pub denom: String,
    pub amount: String,
}

#[derive(Debug, Deserialize)]
pub struct ValidatorsResponse {
    #[serde(default)]
    pub result: Vec<Validator>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Validator {
    pub operator_address: String,
    pub status: i64,
    pub commission: Commission,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Commission {
    pub commission_rates: CommissionRates,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommissionRates {
    pub rate: String,
}

#[derive(Debug, Deserialize)]
pub struct PoolResponse {
    pub result: Pool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Pool {
    pub not_bonded_tokens: String,
    pub bonded_tokens: String,
}

#[derive(Debug, Deserialize)]
pub struct InflationResponse {
    pub result: String,
}

/// `result` is `null` when the address has no delegations.
#[derive(Debug, Deserialize)]
pub struct DelegationsResponse {
    #[serde(default)]
    pub result: Option<Vec<Delegation>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Delegation {
    pub delegator_address: String,
    pub validator_address: String,
    #[serde(default)]
    pub shares: String,
    #[serde(default)]
    pub balance: Option<String>,
}

impl Delegation {
    /// Delegated amount: `balance`, or the integer part of `shares` on nodes
    /// that do not report a balance.
    pub fn value(&self) -> String {
        match &self.balance {
            Some(balance) if !balance.is_empty() => balance.clone(),
            _ => self
                .shares
                .split('.')
                .next()
                .filter(|s| !s.is_empty())
                .unwrap_or("0")
                .to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct UnbondingDelegationsResponse {
    #[serde(default)]
    pub result: Option<Vec<UnbondingDelegation>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UnbondingDelegation {
    pub delegator_address: String,
    pub validator_address: String,
    #[serde(default)]
    pub entries: Vec<UnbondingEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UnbondingEntry {
    pub completion_time: String,
    pub balance: String,
}

#[derive(Debug, Deserialize)]
pub struct AccountResponse {
    pub result: Account,
}

#[derive(Debug, Deserialize)]
pub struct Account {
    pub value: AccountValue,
}

#[derive(Debug, Default, Deserialize)]
pub struct AccountValue {
    #[serde(default)]
    pub coins: Vec<CoinAmount>,
}
