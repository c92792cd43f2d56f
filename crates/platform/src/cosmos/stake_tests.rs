//! Reward formula and delegation normalization scenarios.

use atlas_core::testing::LogCapture;
use atlas_core::{
    DelegationMetadata, DelegationStatus, DelegationType, Validator, ValidatorMap,
};
use log::Level;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::cosmos::models::{
    Commission, CommissionRates, Delegation, Pool, UnbondingDelegation, UnbondingEntry,
    Validator as RawValidator,
};
use crate::cosmos::stake::{
    calculate_annual_reward, normalize_delegations, normalize_unbonding_delegations,
    normalize_validator, staking_details, LOCK_TIME,
};

fn pool(not_bonded: &str, bonded: &str) -> Pool {
    Pool {
        not_bonded_tokens: not_bonded.to_string(),
        bonded_tokens: bonded.to_string(),
    }
}

fn raw_validator(address: &str, status: i64, commission: &str) -> RawValidator {
    RawValidator {
        operator_address: address.to_string(),
        status,
        commission: Commission {
            commission_rates: CommissionRates {
                rate: commission.to_string(),
            },
        },
    }
}

fn directory(ids: &[&str]) -> ValidatorMap {
    ids.iter()
        .map(|id| {
            (
                id.to_string(),
                Validator {
                    id: id.to_string(),
                    status: true,
                    details: staking_details(dec!(7)),
                },
            )
        })
        .collect()
}

fn active(validator: &str, balance: &str) -> Delegation {
    Delegation {
        delegator_address: "cosmos1delegator".to_string(),
        validator_address: validator.to_string(),
        shares: format!("{}.000000000000", balance),
        balance: Some(balance.to_string()),
    }
}

fn unbonding(validator: &str, entries: &[(&str, &str)]) -> UnbondingDelegation {
    UnbondingDelegation {
        delegator_address: "cosmos1delegator".to_string(),
        validator_address: validator.to_string(),
        entries: entries
            .iter()
            .map(|(completion_time, balance)| UnbondingEntry {
                completion_time: completion_time.to_string(),
                balance: balance.to_string(),
            })
            .collect(),
    }
}

// =========================================================================
// calculate_annual_reward
// =========================================================================

#[test]
fn test_reward_reference_scenario() {
    let reward = calculate_annual_reward(
        &pool("0", "100"),
        dec!(0.07),
        &raw_validator("v", 2, "0.1"),
    );
    assert_eq!(reward, dec!(6.3));
}

#[test]
fn test_reward_with_unbonded_supply() {
    // Half the supply bonded doubles the yield of bonded tokens.
    let reward = calculate_annual_reward(
        &pool("100", "100"),
        dec!(0.07),
        &raw_validator("v", 2, "0"),
    );
    assert_eq!(reward, dec!(14));
}

#[test]
fn test_reward_decreases_with_commission() {
    let pool = pool("237349212", "185739364");
    let rewards: Vec<Decimal> = ["0", "0.05", "0.1", "0.25", "0.5", "1"]
        .iter()
        .map(|c| calculate_annual_reward(&pool, dec!(0.0702), &raw_validator("v", 2, c)))
        .collect();

    for pair in rewards.windows(2) {
        assert!(pair[0] > pair[1], "{} should exceed {}", pair[0], pair[1]);
    }
    assert_eq!(rewards[rewards.len() - 1], Decimal::ZERO);
}

#[test]
fn test_reward_is_zero_on_parse_failure() {
    let inflation = dec!(0.07);
    let validator = raw_validator("v", 2, "0.1");

    assert_eq!(
        calculate_annual_reward(&pool("x", "100"), inflation, &validator),
        Decimal::ZERO
    );
    assert_eq!(
        calculate_annual_reward(&pool("0", ""), inflation, &validator),
        Decimal::ZERO
    );
    assert_eq!(
        calculate_annual_reward(&pool("0", "100"), inflation, &raw_validator("v", 2, "ten")),
        Decimal::ZERO
    );
}

#[test]
fn test_reward_is_zero_without_bonded_tokens() {
    let reward =
        calculate_annual_reward(&pool("100", "0"), dec!(0.07), &raw_validator("v", 2, "0.1"));
    assert_eq!(reward, Decimal::ZERO);
}

#[test]
fn test_normalize_validator() {
    let bonded = normalize_validator(&raw_validator("a", 2, "0.1"), &pool("0", "100"), dec!(0.07));
    let unbonding =
        normalize_validator(&raw_validator("b", 1, "0.1"), &pool("0", "100"), dec!(0.07));

    assert_eq!(bonded.id, "a");
    assert!(bonded.status);
    assert!(!unbonding.status);
    assert_eq!(bonded.details.reward.annual, dec!(6.3));
    assert_eq!(bonded.details.lock_time, LOCK_TIME);
    assert_eq!(bonded.details.minimum_amount, "0");
    assert_eq!(bonded.details.delegation_type, DelegationType::Delegate);
}

// =========================================================================
// Delegations
// =========================================================================

#[test]
fn test_active_delegations_keep_order() {
    let validators = directory(&["va", "vb"]);
    let delegations = normalize_delegations(
        &[active("vb", "200"), active("va", "100")],
        &validators,
    );

    assert_eq!(delegations.len(), 2);
    assert_eq!(delegations[0].delegator.id, "vb");
    assert_eq!(delegations[0].value, "200");
    assert_eq!(delegations[1].delegator.id, "va");
    assert!(delegations
        .iter()
        .all(|d| d.status == DelegationStatus::Active && d.metadata.is_none()));
}

#[test]
fn test_unresolved_validator_is_dropped() {
    let validators = directory(&["va"]);
    let delegations = normalize_delegations(
        &[active("va", "100"), active("missing", "5"), active("va", "300")],
        &validators,
    );

    let values: Vec<&str> = delegations.iter().map(|d| d.value.as_str()).collect();
    assert_eq!(values, vec!["100", "300"]);
}

#[test]
fn test_each_unbonding_entry_is_pending() {
    let validators = directory(&["va"]);
    let delegations = normalize_unbonding_delegations(
        &[unbonding(
            "va",
            &[
                ("2019-09-24T17:52:30Z", "10"),
                ("2019-09-25T17:52:30Z", "20"),
                ("not a time", "30"),
            ],
        )],
        &validators,
    );

    assert_eq!(delegations.len(), 3);
    assert!(delegations
        .iter()
        .all(|d| d.status == DelegationStatus::Pending && d.delegator.id == "va"));

    let dates: Vec<i64> = delegations
        .iter()
        .map(|d| match d.metadata {
            Some(DelegationMetadata::Pending { available_date }) => available_date,
            None => panic!("pending delegation without metadata"),
        })
        .collect();
    assert_eq!(dates, vec![1569347550, 1569433950, 0]);

    let values: Vec<&str> = delegations.iter().map(|d| d.value.as_str()).collect();
    assert_eq!(values, vec!["10", "20", "30"]);
}

#[test]
fn test_unbonding_with_unknown_validator_is_dropped() {
    let validators = directory(&["va"]);
    let delegations = normalize_unbonding_delegations(
        &[
            unbonding("missing", &[("2019-09-24T17:52:30Z", "10"), ("2019-09-24T17:52:30Z", "11")]),
            unbonding("va", &[("2019-09-24T17:52:30Z", "12")]),
        ],
        &validators,
    );

    assert_eq!(delegations.len(), 1);
    assert_eq!(delegations[0].value, "12");
}

#[test]
fn test_each_unresolved_delegation_logs_once() {
    let validators = directory(&["va"]);
    let capture = LogCapture::start();

    normalize_delegations(
        &[active("va", "100"), active("gone1", "5"), active("gone2", "6")],
        &validators,
    );
    normalize_unbonding_delegations(
        &[
            unbonding("gone3", &[("2019-09-24T17:52:30Z", "10"), ("2019-09-25T17:52:30Z", "11")]),
            unbonding("va", &[("2019-09-24T17:52:30Z", "12")]),
        ],
        &validators,
    );

    let missing = capture.matching(Level::Error, "Validator not found");
    let addresses: Vec<&str> = missing
        .iter()
        .map(|r| {
            ["gone1", "gone2", "gone3"]
                .into_iter()
                .find(|a| r.message.contains(&format!("address={} ", a)))
                .unwrap_or("?")
        })
        .collect();
    assert_eq!(addresses, vec!["gone1", "gone2", "gone3"]);
    assert!(missing.iter().all(|r| r.message.contains("platform=cosmos")));
}

#[test]
fn test_resolved_delegations_log_nothing() {
    let validators = directory(&["va", "vb"]);
    let capture = LogCapture::start();

    normalize_delegations(&[active("va", "100"), active("vb", "200")], &validators);
    normalize_unbonding_delegations(
        &[unbonding("vb", &[("2019-09-24T17:52:30Z", "12")])],
        &validators,
    );

    assert!(capture.matching(Level::Error, "").is_empty());
}

#[test]
fn test_empty_inputs() {
    let validators = directory(&[]);
    assert!(normalize_delegations(&[], &validators).is_empty());
    assert!(normalize_unbonding_delegations(&[], &validators).is_empty());
}
