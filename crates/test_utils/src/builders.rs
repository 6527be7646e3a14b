//! Test Data Builders
//!
//! Builders with sensible defaults so tests only spell out what matters.
//! Names and titles default to fake data.

use chrono::NaiveDate;
use core_kernel::{MemberId, RoomId};
use domain_expense::{Expense, ExpenseCategory, ExpensePayment, ExpenseShare, Member};
use fake::faker::lorem::en::Word;
use fake::faker::name::en::Name;
use fake::Fake;
use rust_decimal::Decimal;

use crate::fixtures::DateFixtures;

/// Builder for members
pub struct MemberBuilder {
    room_id: RoomId,
    full_name: String,
    nickname: Option<String>,
    is_active: bool,
}

impl MemberBuilder {
    /// Creates a builder for an active member with a random name
    pub fn new(room_id: RoomId) -> Self {
        Self {
            room_id,
            full_name: Name().fake(),
            nickname: None,
            is_active: true,
        }
    }

    pub fn named(mut self, full_name: impl Into<String>) -> Self {
        self.full_name = full_name.into();
        self
    }

    pub fn with_nickname(mut self, nickname: impl Into<String>) -> Self {
        self.nickname = Some(nickname.into());
        self
    }

    pub fn inactive(mut self) -> Self {
        self.is_active = false;
        self
    }

    pub fn build(self) -> Member {
        let mut member = Member::new(self.room_id, self.full_name);
        member.nickname = self.nickname;
        member.is_active = self.is_active;
        member
    }
}

/// Builder for expenses
pub struct ExpenseBuilder {
    room_id: RoomId,
    title: String,
    category: ExpenseCategory,
    expense_date: NaiveDate,
    payments: Vec<ExpensePayment>,
    shares: Vec<ExpenseShare>,
}

impl ExpenseBuilder {
    /// Creates a builder for an "other" expense on 1 March 2024
    pub fn new(room_id: RoomId) -> Self {
        let word: String = Word().fake();
        Self {
            room_id,
            title: format!("Shared {word}"),
            category: ExpenseCategory::Other,
            expense_date: DateFixtures::march(1),
            payments: Vec::new(),
            shares: Vec::new(),
        }
    }

    pub fn titled(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn category(mut self, category: ExpenseCategory) -> Self {
        self.category = category;
        self
    }

    pub fn on(mut self, date: NaiveDate) -> Self {
        self.expense_date = date;
        self
    }

    pub fn paid(mut self, member_id: MemberId, amount: Decimal) -> Self {
        self.payments.push(ExpensePayment::new(member_id, amount));
        self
    }

    /// A payment whose member record no longer exists
    pub fn paid_by_removed(mut self, amount: Decimal) -> Self {
        self.payments.push(ExpensePayment {
            member_id: None,
            paid_amount: Some(amount),
        });
        self
    }

    pub fn owed(mut self, member_id: MemberId, amount: Decimal) -> Self {
        self.shares.push(ExpenseShare::new(member_id, amount));
        self
    }

    /// A share with no amount recorded
    pub fn owed_missing(mut self, member_id: MemberId) -> Self {
        self.shares.push(ExpenseShare {
            member_id,
            owed_amount: None,
        });
        self
    }

    /// Splits the total paid so far evenly, in cents, across `members`
    ///
    /// Leftover cents go to the first members in order.
    pub fn split_evenly(mut self, members: &[MemberId]) -> Self {
        if members.is_empty() {
            return self;
        }
        let total: Decimal = self.payments.iter().filter_map(|p| p.paid_amount).sum();
        let cents = (total * Decimal::ONE_HUNDRED).trunc();
        let count = Decimal::from(members.len());
        let base = (cents / count).trunc();
        let mut leftover = cents - base * count;

        for member_id in members {
            let mut share = base;
            if leftover > Decimal::ZERO {
                share += Decimal::ONE;
                leftover -= Decimal::ONE;
            }
            self.shares
                .push(ExpenseShare::new(*member_id, share / Decimal::ONE_HUNDRED));
        }
        self
    }

    pub fn build(self) -> Expense {
        let mut expense = Expense::new(self.room_id, self.title, self.category, self.expense_date);
        expense.payments = self.payments;
        expense.shares = self.shares;
        expense
    }
}
