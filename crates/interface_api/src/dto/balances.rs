//! Balance and settlement DTOs

use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use domain_settlement::{BalanceReport, MemberBalance, PrecisionPolicy, Transfer};

use super::PeriodDto;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberBalanceDto {
    pub member_id: Uuid,
    pub member_name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_paid: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_owed: Decimal,
    /// Positive: owes the group. Negative: is owed by the group.
    #[serde(with = "rust_decimal::serde::float")]
    pub balance: Decimal,
}

impl From<&MemberBalance> for MemberBalanceDto {
    fn from(b: &MemberBalance) -> Self {
        Self {
            member_id: *b.member_id.as_uuid(),
            member_name: b.member_name.clone(),
            total_paid: PrecisionPolicy::present(&b.total_paid),
            total_owed: PrecisionPolicy::present(&b.total_owed),
            balance: PrecisionPolicy::present(&b.balance),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferDto {
    pub from: String,
    pub from_id: Uuid,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub to: String,
    pub to_id: Uuid,
}

impl From<&Transfer> for TransferDto {
    fn from(t: &Transfer) -> Self {
        Self {
            from: t.from_name.clone(),
            from_id: *t.from_member_id.as_uuid(),
            amount: PrecisionPolicy::present(&t.amount),
            to: t.to_name.clone(),
            to_id: *t.to_member_id.as_uuid(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BalancesResponse {
    pub room_id: Uuid,
    pub currency_code: String,
    /// Absent when the whole history was settled
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<PeriodDto>,
    pub balances: Vec<MemberBalanceDto>,
    pub who_owes_whom: Vec<TransferDto>,
    /// Sum of all balances; non-zero when shares and payments disagree
    #[serde(with = "rust_decimal::serde::float")]
    pub imbalance: Decimal,
}

impl BalancesResponse {
    pub fn from_report(report: &BalanceReport) -> Result<Self, domain_settlement::SettlementError> {
        let imbalance = report
            .outcome
            .imbalance()?
            .map(|m| PrecisionPolicy::present(&m))
            .unwrap_or(Decimal::ZERO);

        Ok(Self {
            room_id: *report.room.id.as_uuid(),
            currency_code: report.room.currency.code().to_string(),
            period: report.window.map(PeriodDto::from),
            balances: report.outcome.balances.iter().map(MemberBalanceDto::from).collect(),
            who_owes_whom: report.outcome.transfers.iter().map(TransferDto::from).collect(),
            imbalance,
        })
    }
}
