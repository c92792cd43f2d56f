//! Canonical records produced by every adapter.
//!
//! - `ticker` - Ticker, TickerPrice, Rate and rate conversion
//! - `tx` - Tx, Block and transfer metadata
//! - `staking` - Validator, StakingDetails and Delegation
//! - `normalized` - tagged outcome of normalizing one raw record

mod normalized;
mod staking;
mod ticker;
mod tx;

pub use normalized::{Normalized, SkipReason};
pub use staking::{
    Delegation, DelegationMetadata, DelegationStatus, DelegationType, StakingDetails,
    StakingReward, Validator, ValidatorMap,
};
pub use ticker::{
    apply_rate, CoinType, Rate, RateOverflow, Ticker, TickerPrice, DEFAULT_CURRENCY,
};
pub use tx::{Amount, Block, Transfer, Tx, TxMeta, TxStatus, TxType};
