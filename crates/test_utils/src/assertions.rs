//! Custom Test Assertions
//!
//! Settlement checks that report which member broke the rule.

use std::collections::HashMap;

use core_kernel::{MemberId, Money};
use domain_settlement::{MemberBalance, Transfer};
use rust_decimal::Decimal;

/// Asserts that two Money values are equal, currency included
pub fn assert_money_eq(actual: &Money, expected: &Money) {
    assert_eq!(
        actual.currency(),
        expected.currency(),
        "Currency mismatch: actual={}, expected={}",
        actual.currency(),
        expected.currency()
    );
    assert_eq!(
        actual.amount(),
        expected.amount(),
        "Amount mismatch: actual={}, expected={}",
        actual,
        expected
    );
}

fn net_flows(transfers: &[Transfer]) -> HashMap<MemberId, (Decimal, Decimal)> {
    let mut flows: HashMap<MemberId, (Decimal, Decimal)> = HashMap::new();
    for transfer in transfers {
        flows.entry(transfer.from_member_id).or_default().0 += transfer.amount.amount();
        flows.entry(transfer.to_member_id).or_default().1 += transfer.amount.amount();
    }
    flows
}

/// Asserts that applying every transfer leaves every balance at zero
///
/// Only meaningful when the balances themselves sum to zero.
pub fn assert_transfers_settle(balances: &[MemberBalance], transfers: &[Transfer]) {
    let flows = net_flows(transfers);
    for balance in balances {
        let (sent, received) = flows.get(&balance.member_id).copied().unwrap_or_default();
        let remaining = balance.balance.amount() - sent + received;
        assert!(
            remaining.is_zero(),
            "{} still has balance {} after settlement (sent {}, received {})",
            balance.member_name,
            remaining,
            sent,
            received
        );
    }
}

/// Asserts that nobody pays more than they owe or receives more than they are owed
///
/// Also checks that every transfer is strictly positive and never involves a
/// settled member.
pub fn assert_no_over_transfer(balances: &[MemberBalance], transfers: &[Transfer]) {
    for transfer in transfers {
        assert!(
            transfer.amount.is_positive(),
            "Transfer {} -> {} has non-positive amount {}",
            transfer.from_name,
            transfer.to_name,
            transfer.amount
        );
    }

    let flows = net_flows(transfers);
    for balance in balances {
        let (sent, received) = flows.get(&balance.member_id).copied().unwrap_or_default();
        let net = balance.balance.amount();

        if balance.is_settled() {
            assert!(
                sent.is_zero() && received.is_zero(),
                "Settled member {} appears in a transfer",
                balance.member_name
            );
        }
        assert!(
            sent <= net.max(Decimal::ZERO),
            "{} sends {} but only owes {}",
            balance.member_name,
            sent,
            net
        );
        assert!(
            received <= (-net).max(Decimal::ZERO),
            "{} receives {} but is only owed {}",
            balance.member_name,
            received,
            -net
        );
    }
}

/// Asserts every balance equals owed minus paid
pub fn assert_balances_consistent(balances: &[MemberBalance]) {
    for balance in balances {
        assert_eq!(
            balance.balance.amount(),
            balance.total_owed.amount() - balance.total_paid.amount(),
            "Balance of {} is not owed minus paid",
            balance.member_name
        );
    }
}
