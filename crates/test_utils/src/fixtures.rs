//! Pre-built Test Fixtures
//!
//! Small rooms with hand-checked balances. Every fixture lives in March 2024
//! unless stated otherwise.

use chrono::NaiveDate;
use core_kernel::{Currency, Money};
use domain_expense::{Expense, ExpenseCategory, Member, MockLedgerPort, Room};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// A room with its members and expenses
#[derive(Debug, Clone)]
pub struct RoomFixture {
    pub room: Room,
    pub members: Vec<Member>,
    pub expenses: Vec<Expense>,
}

impl RoomFixture {
    /// Looks up a member by full name
    ///
    /// # Panics
    ///
    /// Panics if no member has that name
    pub fn member(&self, name: &str) -> &Member {
        self.members
            .iter()
            .find(|m| m.full_name == name)
            .unwrap_or_else(|| panic!("fixture has no member named {name}"))
    }

    /// Money in the room currency
    pub fn money(&self, amount: Decimal) -> Money {
        Money::new(amount, self.room.currency)
    }

    /// An in-memory ledger holding this room
    pub async fn port(&self) -> MockLedgerPort {
        MockLedgerPort::with_room(
            self.room.clone(),
            self.members.clone(),
            self.expenses.clone(),
        )
        .await
    }
}

/// Fixture for calendar dates
pub struct DateFixtures;

impl DateFixtures {
    /// A day in March 2024
    pub fn march(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, day).unwrap()
    }

    /// A day in April 2024
    pub fn april(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 4, day).unwrap()
    }
}

/// Fixture rooms
pub struct RoomFixtures;

impl RoomFixtures {
    fn room_with(name: &str, currency: Currency, member_names: &[&str]) -> (Room, Vec<Member>) {
        let room = Room::new(name, currency);
        let members = member_names
            .iter()
            .map(|n| Member::new(room.id, *n))
            .collect();
        (room, members)
    }

    /// A, B and C split two expenses three ways
    ///
    /// A pays 30 (10 each), B pays 15 (5 each). Balances: A -15, B 0, C +15.
    /// Settlement: C pays A 15.
    pub fn three_way_split() -> RoomFixture {
        let (room, members) = Self::room_with("Flat 4B", Currency::USD, &["A", "B", "C"]);
        let (a, b, c) = (members[0].id, members[1].id, members[2].id);

        let expenses = vec![
            Expense::new(room.id, "Groceries", ExpenseCategory::Groceries, DateFixtures::march(3))
                .paid_by(a, dec!(30))
                .owed_by(a, dec!(10))
                .owed_by(b, dec!(10))
                .owed_by(c, dec!(10)),
            Expense::new(room.id, "Cleaning supplies", ExpenseCategory::Supplies, DateFixtures::march(9))
                .paid_by(b, dec!(15))
                .owed_by(a, dec!(5))
                .owed_by(b, dec!(5))
                .owed_by(c, dec!(5)),
        ];

        RoomFixture {
            room,
            members,
            expenses,
        }
    }

    /// A pays 100; shares A=20, B=40, C=40
    ///
    /// Balances: A -80, B +40, C +40. Settlement: B pays A 40, C pays A 40.
    pub fn single_payer() -> RoomFixture {
        let (room, members) = Self::room_with("Lakeside", Currency::NPR, &["A", "B", "C"]);
        let (a, b, c) = (members[0].id, members[1].id, members[2].id);

        let expenses = vec![Expense::new(room.id, "Rent", ExpenseCategory::Rent, DateFixtures::march(1))
            .paid_by(a, dec!(100))
            .owed_by(a, dec!(20))
            .owed_by(b, dec!(40))
            .owed_by(c, dec!(40))];

        RoomFixture {
            room,
            members,
            expenses,
        }
    }

    /// Expenses in two months
    ///
    /// March: A pays 60 split with B. April: B pays 90 split with A.
    /// March alone: B owes A 30. April alone: A owes B 45.
    pub fn two_months() -> RoomFixture {
        let (room, members) = Self::room_with("Two Months", Currency::EUR, &["A", "B"]);
        let (a, b) = (members[0].id, members[1].id);

        let expenses = vec![
            Expense::new(room.id, "Internet", ExpenseCategory::Internet, DateFixtures::march(31))
                .paid_by(a, dec!(60))
                .owed_by(a, dec!(30))
                .owed_by(b, dec!(30)),
            Expense::new(room.id, "Repairs", ExpenseCategory::Maintenance, DateFixtures::april(1))
                .paid_by(b, dec!(90))
                .owed_by(a, dec!(45))
                .owed_by(b, dec!(45)),
        ];

        RoomFixture {
            room,
            members,
            expenses,
        }
    }

    /// A room where nobody lives any more
    pub fn empty() -> RoomFixture {
        let (room, _) = Self::room_with("Vacant", Currency::GBP, &[]);
        RoomFixture {
            room,
            members: Vec::new(),
            expenses: Vec::new(),
        }
    }
}
