//! Integration tests for the settlement engine
//!
//! Tests cover the worked scenarios, engine properties over generated
//! ledgers, and the async service over an in-memory ledger.

use std::collections::HashSet;
use std::sync::Arc;

use core_kernel::{DateWindow, MemberId, Timezone};
use domain_expense::LedgerPort;
use domain_settlement::{
    settle, BalanceAggregator, SettlementError, SettlementPlanner, SettlementService,
};
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use test_utils::{
    assert_balances_consistent, assert_money_eq, assert_no_over_transfer, assert_transfers_settle,
    balanced_ledger_strategy, ledger_strategy, DateFixtures, ExpenseBuilder, RoomFixture,
    RoomFixtures,
};

fn transfer_summary(fixture: &RoomFixture, window: Option<DateWindow>) -> Vec<(String, String, Decimal)> {
    let expenses: Vec<_> = fixture
        .expenses
        .iter()
        .filter(|e| window.map_or(true, |w| w.contains(e.expense_date)))
        .cloned()
        .collect();
    settle(&expenses, &fixture.members, fixture.room.currency)
        .unwrap()
        .transfers
        .into_iter()
        .map(|t| (t.from_name, t.to_name, t.amount.amount()))
        .collect()
}

fn named(from: &str, to: &str, amount: Decimal) -> (String, String, Decimal) {
    (from.to_string(), to.to_string(), amount)
}

// ============================================================================
// Worked scenarios
// ============================================================================

mod scenarios {
    use super::*;

    #[test]
    fn test_three_way_split() {
        let fixture = RoomFixtures::three_way_split();
        let outcome = settle(&fixture.expenses, &fixture.members, fixture.room.currency).unwrap();

        let nets: Vec<Decimal> = outcome.balances.iter().map(|b| b.balance.amount()).collect();
        assert_eq!(nets, vec![dec!(-15), dec!(0), dec!(15)]);
        assert_money_eq(&outcome.balances[0].total_paid, &fixture.money(dec!(30)));
        assert_money_eq(&outcome.balances[0].total_owed, &fixture.money(dec!(15)));

        assert_eq!(transfer_summary(&fixture, None), vec![named("C", "A", dec!(15))]);
    }

    #[test]
    fn test_single_payer() {
        let fixture = RoomFixtures::single_payer();
        let outcome = settle(&fixture.expenses, &fixture.members, fixture.room.currency).unwrap();

        let nets: Vec<Decimal> = outcome.balances.iter().map(|b| b.balance.amount()).collect();
        assert_eq!(nets, vec![dec!(-80), dec!(40), dec!(40)]);
        assert_eq!(
            transfer_summary(&fixture, None),
            vec![named("B", "A", dec!(40)), named("C", "A", dec!(40))]
        );
    }

    #[test]
    fn test_months_do_not_carry_over() {
        let fixture = RoomFixtures::two_months();
        let march = DateWindow::month(2024, 3).unwrap();
        let april = DateWindow::month(2024, 4).unwrap();

        assert_eq!(transfer_summary(&fixture, Some(march)), vec![named("B", "A", dec!(30))]);
        assert_eq!(transfer_summary(&fixture, Some(april)), vec![named("A", "B", dec!(45))]);
        assert_eq!(transfer_summary(&fixture, None), vec![named("A", "B", dec!(15))]);
    }

    #[test]
    fn test_empty_room() {
        let fixture = RoomFixtures::empty();
        let outcome = settle(&fixture.expenses, &fixture.members, fixture.room.currency).unwrap();
        assert!(outcome.balances.is_empty());
        assert!(outcome.transfers.is_empty());
    }

    #[test]
    fn test_co_paid_expense_with_removed_payer() {
        let fixture = RoomFixtures::single_payer();
        let (a, b) = (fixture.member("A").id, fixture.member("B").id);
        let expense = ExpenseBuilder::new(fixture.room.id)
            .on(DateFixtures::march(20))
            .paid(a, dec!(20))
            .paid_by_removed(dec!(20))
            .owed(b, dec!(40))
            .build();

        let outcome = settle(&[expense], &fixture.members, fixture.room.currency).unwrap();

        let nets: Vec<Decimal> = outcome.balances.iter().map(|b| b.balance.amount()).collect();
        assert_eq!(nets, vec![dec!(-20), dec!(40), dec!(0)]);
        assert_eq!(outcome.transfers.len(), 1);
        assert_eq!(outcome.transfers[0].amount.amount(), dec!(20));
    }

    #[test]
    fn test_over_allocated_shares_reported_not_rejected() {
        let fixture = RoomFixtures::three_way_split();
        let (a, b) = (fixture.member("A").id, fixture.member("B").id);
        let expense = ExpenseBuilder::new(fixture.room.id)
            .paid(a, dec!(10))
            .owed(a, dec!(10))
            .owed(b, dec!(10))
            .build();

        let outcome = settle(&[expense], &fixture.members, fixture.room.currency).unwrap();

        assert_eq!(outcome.imbalance().unwrap(), Some(fixture.money(dec!(10))));
        assert!(outcome.transfers.is_empty());
    }

    #[test]
    fn test_missing_owed_amount_fails_whole_aggregation() {
        let fixture = RoomFixtures::three_way_split();
        let c = fixture.member("C").id;
        let mut expenses = fixture.expenses.clone();
        expenses.push(
            ExpenseBuilder::new(fixture.room.id)
                .paid(c, dec!(5))
                .owed_missing(c)
                .build(),
        );

        let err = settle(&expenses, &fixture.members, fixture.room.currency).unwrap_err();
        assert!(matches!(err, SettlementError::InvalidAmount { member_id: Some(id), .. } if id == c));
    }

    #[test]
    fn test_fractional_amounts_stay_exact() {
        let fixture = RoomFixtures::three_way_split();
        let ids: Vec<MemberId> = fixture.members.iter().map(|m| m.id).collect();
        let expense = ExpenseBuilder::new(fixture.room.id)
            .paid(ids[0], dec!(100))
            .owed(ids[0], dec!(33.333333))
            .owed(ids[1], dec!(33.333333))
            .owed(ids[2], dec!(33.333334))
            .build();

        let outcome = settle(&[expense], &fixture.members, fixture.room.currency).unwrap();

        assert_eq!(outcome.imbalance().unwrap(), Some(fixture.money(dec!(0))));
        assert_transfers_settle(&outcome.balances, &outcome.transfers);
    }
}

// ============================================================================
// Properties
// ============================================================================

mod properties {
    use super::*;

    proptest! {
        #[test]
        fn prop_paid_and_owed_totals_are_conserved(fixture in ledger_strategy()) {
            let active: HashSet<MemberId> = fixture
                .members
                .iter()
                .filter(|m| m.is_active)
                .map(|m| m.id)
                .collect();

            let expected_paid: Decimal = fixture
                .expenses
                .iter()
                .flat_map(|e| e.payments.iter())
                .filter(|p| p.member_id.map_or(false, |id| active.contains(&id)))
                .filter_map(|p| p.paid_amount)
                .sum();
            let expected_owed: Decimal = fixture
                .expenses
                .iter()
                .flat_map(|e| e.shares.iter())
                .filter(|s| active.contains(&s.member_id))
                .filter_map(|s| s.owed_amount)
                .sum();

            let balances = BalanceAggregator::new(fixture.room.currency)
                .aggregate(&fixture.expenses, &fixture.members)
                .unwrap();

            let paid: Decimal = balances.iter().map(|b| b.total_paid.amount()).sum();
            let owed: Decimal = balances.iter().map(|b| b.total_owed.amount()).sum();
            let net: Decimal = balances.iter().map(|b| b.balance.amount()).sum();

            prop_assert_eq!(balances.len(), active.len());
            prop_assert_eq!(paid, expected_paid);
            prop_assert_eq!(owed, expected_owed);
            prop_assert_eq!(net, owed - paid);
            assert_balances_consistent(&balances);
        }

        #[test]
        fn prop_plan_never_over_transfers(fixture in ledger_strategy()) {
            let outcome = settle(&fixture.expenses, &fixture.members, fixture.room.currency).unwrap();
            assert_no_over_transfer(&outcome.balances, &outcome.transfers);

            let debtors = outcome.balances.iter().filter(|b| b.is_debtor()).count();
            let creditors = outcome.balances.iter().filter(|b| b.is_creditor()).count();
            prop_assert!(outcome.transfers.len() <= (debtors + creditors).saturating_sub(1));

            let moved: Decimal = outcome.transfers.iter().map(|t| t.amount.amount()).sum();
            let owed_in: Decimal = outcome.balances.iter().filter(|b| b.is_debtor()).map(|b| b.balance.amount()).sum();
            let owed_out: Decimal = outcome.balances.iter().filter(|b| b.is_creditor()).map(|b| -b.balance.amount()).sum();
            prop_assert_eq!(moved, owed_in.min(owed_out));
        }

        #[test]
        fn prop_balanced_ledgers_settle_completely(fixture in balanced_ledger_strategy()) {
            let outcome = settle(&fixture.expenses, &fixture.members, fixture.room.currency).unwrap();

            prop_assert_eq!(outcome.imbalance().unwrap().map(|m| m.amount()), Some(Decimal::ZERO));
            assert_transfers_settle(&outcome.balances, &outcome.transfers);
            assert_no_over_transfer(&outcome.balances, &outcome.transfers);
        }

        #[test]
        fn prop_aggregation_and_planning_are_deterministic(fixture in ledger_strategy()) {
            let aggregator = BalanceAggregator::new(fixture.room.currency);
            let first = aggregator.aggregate(&fixture.expenses, &fixture.members).unwrap();
            let second = aggregator.aggregate(&fixture.expenses, &fixture.members).unwrap();
            prop_assert_eq!(&first, &second);

            let planner = SettlementPlanner::new();
            prop_assert_eq!(planner.plan(&first).unwrap(), planner.plan(&second).unwrap());
        }

        #[test]
        fn prop_settled_members_never_transfer(fixture in ledger_strategy()) {
            let outcome = settle(&fixture.expenses, &fixture.members, fixture.room.currency).unwrap();
            let settled: HashSet<MemberId> = outcome
                .balances
                .iter()
                .filter(|b| b.is_settled())
                .map(|b| b.member_id)
                .collect();

            for transfer in &outcome.transfers {
                prop_assert!(!settled.contains(&transfer.from_member_id));
                prop_assert!(!settled.contains(&transfer.to_member_id));
            }
        }
    }
}

// ============================================================================
// Service over an in-memory ledger
// ============================================================================

mod service {
    use super::*;

    async fn service_for(fixture: &RoomFixture) -> (SettlementService, Arc<domain_expense::MockLedgerPort>) {
        let port = Arc::new(fixture.port().await);
        let ledger: Arc<dyn LedgerPort> = port.clone();
        (SettlementService::new(ledger, Timezone::default()), port)
    }

    #[tokio::test]
    async fn test_room_balances_scoped_to_window() {
        let fixture = RoomFixtures::two_months();
        let (service, _) = service_for(&fixture).await;

        let march = DateWindow::month(2024, 3).unwrap();
        let report = service.room_balances(fixture.room.id, Some(march)).await.unwrap();

        assert_eq!(report.window, Some(march));
        assert_eq!(report.room, fixture.room);
        assert_eq!(report.outcome.transfers.len(), 1);
        assert_money_eq(&report.outcome.transfers[0].amount, &fixture.money(dec!(30)));
    }

    #[tokio::test]
    async fn test_unknown_room_passes_through_not_found() {
        let fixture = RoomFixtures::three_way_split();
        let (service, _) = service_for(&fixture).await;

        let err = service
            .room_balances(core_kernel::RoomId::new(), None)
            .await
            .unwrap_err();

        assert!(matches!(err, SettlementError::Ledger(ref e) if e.is_not_found()));
    }

    #[tokio::test]
    async fn test_unavailable_ledger_passes_through() {
        let fixture = RoomFixtures::three_way_split();
        let (service, port) = service_for(&fixture).await;
        port.set_unavailable(true);

        let err = service.dashboard(fixture.room.id, None).await.unwrap_err();
        assert!(matches!(err, SettlementError::Ledger(ref e) if e.is_transient()));
    }

    #[tokio::test]
    async fn test_inactive_member_drops_out_of_balances() {
        let fixture = RoomFixtures::three_way_split();
        let port = fixture.port().await;
        port.insert_member(
            test_utils::MemberBuilder::new(fixture.room.id)
                .named("Former")
                .inactive()
                .build(),
        )
        .await;
        let service = SettlementService::new(Arc::new(port), Timezone::default());

        let report = service.room_balances(fixture.room.id, None).await.unwrap();
        let names: Vec<&str> = report.outcome.balances.iter().map(|b| b.member_name.as_str()).collect();
        assert_eq!(names, vec!["A", "B", "C"]);
    }

    #[tokio::test]
    async fn test_analytics_reports() {
        let fixture = RoomFixtures::three_way_split();
        let (service, _) = service_for(&fixture).await;
        let march = DateWindow::month(2024, 3).unwrap();

        let summary = service.monthly_summary(fixture.room.id, Some(march)).await.unwrap();
        assert_money_eq(&summary.summary.total_expenses, &fixture.money(dec!(45)));
        assert_eq!(summary.summary.expense_count, 2);
        assert_eq!(summary.summary.member_totals.len(), 3);

        let categories = service.category_breakdown(fixture.room.id, Some(march)).await.unwrap();
        let order: Vec<_> = categories.categories.iter().map(|c| c.category.as_str()).collect();
        assert_eq!(order, vec!["groceries", "supplies"]);

        let dashboard = service.dashboard(fixture.room.id, Some(march)).await.unwrap();
        assert_eq!(dashboard.stats.total_roommates, 3);
        assert_money_eq(&dashboard.stats.average_cost_per_person, &fixture.money(dec!(15)));
        assert_money_eq(&dashboard.stats.all_time_total, &fixture.money(dec!(45)));
    }

    #[tokio::test]
    async fn test_trends_window_ends_today() {
        let fixture = RoomFixtures::empty();
        let (service, _) = service_for(&fixture).await;

        let report = service.trends(fixture.room.id, 6).await.unwrap();
        assert_eq!(report.window.end, Timezone::default().today());
        assert!(report.months.is_empty());
    }

    #[tokio::test]
    async fn test_trends_count_expenses_dated_after_today() {
        let fixture = RoomFixtures::three_way_split();
        let payer = fixture.member("A").id;
        let today = Timezone::default().today();
        let next_month = today
            .checked_add_months(chrono::Months::new(1))
            .unwrap();
        let early_rent = ExpenseBuilder::new(fixture.room.id)
            .on(next_month)
            .paid(payer, dec!(900))
            .build();
        let (service, port) = service_for(&fixture).await;
        port.insert_expense(early_rent).await;

        let report = service.trends(fixture.room.id, 6).await.unwrap();

        assert_eq!(report.window.end, today);
        let last = report.months.last().unwrap();
        assert_eq!(last.month, core_kernel::month_key(next_month));
        assert_eq!(last.total_amount.amount(), dec!(900));
        assert_eq!(last.expense_count, 1);
    }

    #[tokio::test]
    async fn test_concurrent_requests_agree() {
        let fixture = RoomFixtures::single_payer();
        let (service, _) = service_for(&fixture).await;
        let room_id = fixture.room.id;

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let service = service.clone();
                tokio::spawn(async move { service.room_balances(room_id, None).await })
            })
            .collect();

        let mut outcomes = Vec::new();
        for handle in handles {
            outcomes.push(handle.await.unwrap().unwrap().outcome);
        }
        assert!(outcomes.windows(2).all(|pair| pair[0] == pair[1]));
        assert_eq!(outcomes[0].transfers.len(), 2);
    }
}
