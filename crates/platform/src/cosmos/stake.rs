//! Staking normalization: validator rewards and delegations.

use log::error;
use rust_decimal::Decimal;

use atlas_core::utils::{parse_decimal, rfc3339_to_unix_or_zero};
use atlas_core::{
    Delegation, DelegationMetadata, DelegationStatus, DelegationType, StakingDetails,
    StakingReward, Validator, ValidatorMap,
};

use super::models::{self, Pool, BONDED_STATUS};

/// Unbonding period: 21 days.
pub const LOCK_TIME: u64 = 1_814_400;

/// Annual reward advertised for the chain as a whole, in percent.
pub(crate) const ANNUAL_REWARD: i64 = 11;

pub(crate) fn staking_details(annual: Decimal) -> StakingDetails {
    StakingDetails {
        reward: StakingReward { annual },
        minimum_amount: "0".to_string(),
        lock_time: LOCK_TIME,
        delegation_type: DelegationType::Delegate,
    }
}

/// Annual reward of delegating to `validator`, in percent.
///
/// `(not_bonded + bonded) / bonded * inflation`, minus the validator's
/// commission. Returns zero when any input fails to parse or nothing is
/// bonded.
pub fn calculate_annual_reward(pool: &Pool, inflation: Decimal, validator: &models::Validator) -> Decimal {
    annual_reward(pool, inflation, validator).unwrap_or(Decimal::ZERO)
}

fn annual_reward(pool: &Pool, inflation: Decimal, validator: &models::Validator) -> Option<Decimal> {
    let not_bonded = parse_decimal(&pool.not_bonded_tokens)?;
    let bonded = parse_decimal(&pool.bonded_tokens)?;
    let commission = parse_decimal(&validator.commission.commission_rates.rate)?;

    let result = not_bonded
        .checked_add(bonded)?
        .checked_div(bonded)?
        .checked_mul(inflation)?;
    let net = result.checked_sub(result.checked_mul(commission)?)?;
    net.checked_mul(Decimal::ONE_HUNDRED)
}

pub fn normalize_validator(validator: &models::Validator, pool: &Pool, inflation: Decimal) -> Validator {
    Validator {
        id: validator.operator_address.clone(),
        status: validator.status == BONDED_STATUS,
        details: staking_details(calculate_annual_reward(pool, inflation, validator)),
    }
}

/// Active delegations; entries whose validator is not in `validators` are
/// logged and dropped.
pub fn normalize_delegations(
    delegations: &[models::Delegation],
    validators: &ValidatorMap,
) -> Vec<Delegation> {
    delegations
        .iter()
        .filter_map(|d| {
            let Some(validator) = validators.get(&d.validator_address) else {
                log_missing_validator(&d.validator_address, &d.delegator_address);
                return None;
            };
            Some(Delegation {
                delegator: validator.clone(),
                value: d.value(),
                status: DelegationStatus::Active,
                metadata: None,
            })
        })
        .collect()
}

/// One pending delegation per unbonding entry, available at the entry's
/// completion time.
pub fn normalize_unbonding_delegations(
    delegations: &[models::UnbondingDelegation],
    validators: &ValidatorMap,
) -> Vec<Delegation> {
    let mut results = Vec::new();
    for d in delegations {
        let Some(validator) = validators.get(&d.validator_address) else {
            log_missing_validator(&d.validator_address, &d.delegator_address);
            continue;
        };
        results.extend(d.entries.iter().map(|entry| Delegation {
            delegator: validator.clone(),
            value: entry.balance.clone(),
            status: DelegationStatus::Pending,
            metadata: Some(DelegationMetadata::Pending {
                available_date: rfc3339_to_unix_or_zero(&entry.completion_time),
            }),
        }));
    }
    results
}

fn log_missing_validator(address: &str, delegator: &str) {
    error!(
        "Validator not found: address={} platform=cosmos delegation={}",
        address, delegator
    );
}
