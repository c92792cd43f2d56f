use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::tx::Amount;

/// Validators keyed by their chain address.
pub type ValidatorMap = HashMap<String, Validator>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DelegationType {
    Delegate,
    Freeze,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StakingReward {
    /// Annualized reward, in percent.
    pub annual: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StakingDetails {
    pub reward: StakingReward,
    pub minimum_amount: Amount,
    /// Unbonding period, in seconds.
    pub lock_time: u64,
    #[serde(rename = "type")]
    pub delegation_type: DelegationType,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Validator {
    pub id: String,
    /// Bonded / active in the current validator set.
    pub status: bool,
    pub details: StakingDetails,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DelegationStatus {
    Active,
    Pending,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DelegationMetadata {
    /// Unix seconds at which pending funds become available.
    Pending { available_date: i64 },
}

/// A stake held with one validator.
///
/// `delegator` is a copy of the validator taken at normalization time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Delegation {
    pub delegator: Validator,
    pub value: Amount,
    pub status: DelegationStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<DelegationMetadata>,
}
