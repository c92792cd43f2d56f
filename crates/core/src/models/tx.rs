use serde::{Deserialize, Serialize};

/// Integer amount in the coin's smallest unit, kept as a decimal string.
pub type Amount = String;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TxStatus {
    Completed,
    Pending,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TxType {
    Transfer,
}

/// Payload of a plain value transfer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transfer {
    pub value: Amount,
    pub symbol: String,
    pub decimals: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TxMeta {
    Transfer(Transfer),
}

/// Canonical transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tx {
    pub id: String,
    pub coin: u32,
    pub from: String,
    pub to: String,
    pub fee: Amount,
    /// Unix seconds.
    pub date: i64,
    pub block: u64,
    pub status: TxStatus,
    #[serde(rename = "type")]
    pub tx_type: TxType,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub memo: String,
    #[serde(rename = "metadata")]
    pub meta: TxMeta,
}

/// Normalized transactions of one block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub number: i64,
    pub txs: Vec<Tx>,
}
