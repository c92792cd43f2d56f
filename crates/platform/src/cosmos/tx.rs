//! Transaction normalization for Cosmos.

use std::collections::HashSet;

use atlas_core::coin::ATOM;
use atlas_core::utils::rfc3339_to_unix_or_zero;
use atlas_core::{Normalized, Transfer, Tx, TxMeta, TxStatus, TxType};

use super::models::{CoinAmount, MsgSend, TxResponse, DENOM, MSG_SEND};

pub fn normalize(tx: &TxResponse) -> Normalized<Tx> {
    let Some(msg) = tx.tx.value.msg.first() else {
        return Normalized::malformed(format!("{}: no messages", tx.hash));
    };
    if msg.msg_type != MSG_SEND {
        return Normalized::unsupported(msg.msg_type.clone());
    }
    let send: MsgSend = match serde_json::from_value(msg.value.clone()) {
        Ok(send) => send,
        Err(e) => return Normalized::malformed(format!("{}: {}", tx.hash, e)),
    };
    let Some(amount) = send.amount.iter().find(|a| a.denom == DENOM) else {
        return Normalized::unsupported(format!("{} without {}", MSG_SEND, DENOM));
    };
    let Some(fee) = sum_denom(&tx.tx.value.fee.amount) else {
        return Normalized::malformed(format!("{}: fee", tx.hash));
    };
    let Ok(block) = tx.height.parse::<u64>() else {
        return Normalized::malformed(format!("{}: height '{}'", tx.hash, tx.height));
    };

    let status = if tx.code == 0 {
        TxStatus::Completed
    } else {
        TxStatus::Failed
    };

    Normalized::Record(Tx {
        id: tx.hash.clone(),
        coin: ATOM.id,
        from: send.from_address,
        to: send.to_address,
        fee: fee.to_string(),
        date: rfc3339_to_unix_or_zero(&tx.timestamp),
        block,
        status,
        tx_type: TxType::Transfer,
        memo: tx.tx.value.memo.clone(),
        meta: TxMeta::Transfer(Transfer {
            value: amount.amount.clone(),
            symbol: ATOM.symbol.to_string(),
            decimals: ATOM.decimals,
        }),
    })
}

/// Normalizes in input order.
pub fn normalize_txs(txs: &[TxResponse]) -> Vec<Tx> {
    txs.iter().filter_map(|tx| normalize(tx).record()).collect()
}

/// Normalizes an address history: duplicates (a self-transfer shows up as both
/// sent and received) are dropped and the result is ordered newest first.
pub fn normalize_address_txs(txs: &[TxResponse]) -> Vec<Tx> {
    let mut seen = HashSet::new();
    let mut result: Vec<Tx> = normalize_txs(txs)
        .into_iter()
        .filter(|tx| seen.insert(tx.id.clone()))
        .collect();
    result.sort_by(|a, b| b.date.cmp(&a.date));
    result
}

/// Sum of the amounts in the native denomination. `None` when one fails to
/// parse.
fn sum_denom(amounts: &[CoinAmount]) -> Option<u128> {
    amounts
        .iter()
        .filter(|a| a.denom == DENOM)
        .try_fold(0u128, |acc, a| {
            a.amount.parse::<u128>().ok().and_then(|v| acc.checked_add(v))
        })
}
