//! Property-Based Test Generators
//!
//! Proptest strategies producing whole room ledgers. Amounts are whole cents
//! so balanced ledgers stay exactly balanced.

use chrono::NaiveDate;
use core_kernel::Currency;
use domain_expense::{Expense, ExpenseCategory, ExpensePayment, ExpenseShare, Member, Room};
use proptest::prelude::*;
use rust_decimal::Decimal;

use crate::builders::ExpenseBuilder;
use crate::fixtures::RoomFixture;

/// Strategy for a room currency
pub fn currency_strategy() -> impl Strategy<Value = Currency> {
    prop_oneof![
        Just(Currency::USD),
        Just(Currency::NPR),
        Just(Currency::GBP),
        Just(Currency::EUR),
    ]
}

/// Strategy for an expense category
pub fn category_strategy() -> impl Strategy<Value = ExpenseCategory> {
    proptest::sample::select(ExpenseCategory::ALL.to_vec())
}

/// Non-negative amount in cents, 0.00 to 5000.00
pub fn amount_strategy() -> impl Strategy<Value = Decimal> {
    (0i64..500_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Positive amount in cents, 0.01 to 5000.00
pub fn positive_amount_strategy() -> impl Strategy<Value = Decimal> {
    (1i64..500_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

fn build_room(member_count: usize, inactive: &[bool], currency: Currency) -> (Room, Vec<Member>) {
    let room = Room::new("Generated", currency);
    let members = (0..member_count)
        .map(|i| {
            let member = Member::new(room.id, format!("Member {i}"));
            if inactive.get(i).copied().unwrap_or(false) {
                member.deactivated()
            } else {
                member
            }
        })
        .collect();
    (room, members)
}

fn march(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, day).unwrap()
}

/// Arbitrary ledgers
///
/// Up to 6 members, some inactive, and up to 12 expenses. A member index equal
/// to the member count stands for someone outside the room; payments may also
/// come from removed members. Shares do not have to match payments.
pub fn ledger_strategy() -> impl Strategy<Value = RoomFixture> {
    (0usize..7, currency_strategy())
        .prop_flat_map(|(member_count, currency)| {
            let reference = 0..=member_count;
            let payment = (prop::option::of(reference.clone()), amount_strategy());
            let share = (reference, amount_strategy());
            let expense = (
                prop::collection::vec(payment, 1..4),
                prop::collection::vec(share, 0..5),
                category_strategy(),
                1u32..29,
            );
            (
                Just(member_count),
                Just(currency),
                prop::collection::vec(any::<bool>(), member_count),
                prop::collection::vec(expense, 0..12),
            )
        })
        .prop_map(|(member_count, currency, inactive, specs)| {
            let (room, members) = build_room(member_count, &inactive, currency);
            let outsider = core_kernel::MemberId::new();
            let resolve = |index: usize| members.get(index).map_or(outsider, |m| m.id);

            let expenses = specs
                .into_iter()
                .map(|(payments, shares, category, day)| {
                    let mut expense = Expense::new(room.id, "Generated", category, march(day));
                    expense.payments = payments
                        .into_iter()
                        .map(|(who, amount)| ExpensePayment {
                            member_id: who.map(resolve),
                            paid_amount: Some(amount),
                        })
                        .collect();
                    expense.shares = shares
                        .into_iter()
                        .map(|(who, amount)| ExpenseShare::new(resolve(who), amount))
                        .collect();
                    expense
                })
                .collect();

            RoomFixture {
                room,
                members,
                expenses,
            }
        })
}

/// Ledgers whose expenses are each split exactly among active members
///
/// Every balance set produced from these sums to zero.
pub fn balanced_ledger_strategy() -> impl Strategy<Value = RoomFixture> {
    (1usize..7, currency_strategy())
        .prop_flat_map(|(member_count, currency)| {
            let expense = (
                prop::collection::vec((0..member_count, positive_amount_strategy()), 1..3),
                prop::collection::btree_set(0..member_count, 1..=member_count),
                1u32..29,
            );
            (
                Just(member_count),
                Just(currency),
                prop::collection::vec(expense, 0..12),
            )
        })
        .prop_map(|(member_count, currency, specs)| {
            let (room, members) = build_room(member_count, &[], currency);

            let expenses = specs
                .into_iter()
                .map(|(payments, sharers, day)| {
                    let sharer_ids: Vec<_> = sharers.into_iter().map(|i| members[i].id).collect();
                    payments
                        .into_iter()
                        .fold(ExpenseBuilder::new(room.id).on(march(day)), |b, (who, amount)| {
                            b.paid(members[who].id, amount)
                        })
                        .split_evenly(&sharer_ids)
                        .build()
                })
                .collect();

            RoomFixture {
                room,
                members,
                expenses,
            }
        })
}
