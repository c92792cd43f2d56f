use serde::Deserialize;

/// Transaction type of a plain ALGO payment.
pub const TRANSACTION_TYPE_PAY: &str = "pay";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Status {
    pub last_round: i64,
}

#[derive(Debug, Deserialize)]
pub struct BlockResponse {
    #[serde(default)]
    pub txns: BlockTransactions,
}

#[derive(Debug, Default, Deserialize)]
pub struct BlockTransactions {
    #[serde(default)]
    pub transactions: Vec<Transaction>,
}

#[derive(Debug, Deserialize)]
pub struct TransactionsResponse {
    #[serde(default)]
    pub transactions: Vec<Transaction>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Transaction {
    #[serde(rename = "type")]
    pub tx_type: String,
    #[serde(rename = "tx")]
    pub hash: String,
    pub from: String,
    #[serde(default)]
    pub fee: u64,
    #[serde(default)]
    pub round: u64,
    #[serde(default)]
    pub timestamp: i64,
    #[serde(default)]
    pub payment: Option<Payment>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Payment {
    pub to: String,
    #[serde(default)]
    pub amount: u64,
}

#[derive(Debug, Deserialize)]
pub struct Account {
    #[serde(default)]
    pub amount: u64,
}
