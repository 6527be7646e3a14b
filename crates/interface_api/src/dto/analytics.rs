//! Analytics DTOs

use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use domain_expense::{Member, Room};
use domain_settlement::{
    CategoryReport, CategoryTotal, Dashboard, MonthlyTrend, PrecisionPolicy, SummaryReport,
    TrendReport,
};

use super::balances::MemberBalanceDto;
use super::PeriodDto;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlySummaryResponse {
    pub period: PeriodDto,
    pub currency_code: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_expenses: Decimal,
    pub expense_count: usize,
    pub member_totals: Vec<MemberBalanceDto>,
}

impl From<&SummaryReport> for MonthlySummaryResponse {
    fn from(report: &SummaryReport) -> Self {
        let summary = &report.summary;
        Self {
            period: summary.window.into(),
            currency_code: report.room.currency.code().to_string(),
            total_expenses: PrecisionPolicy::present(&summary.total_expenses),
            expense_count: summary.expense_count,
            member_totals: summary.member_totals.iter().map(MemberBalanceDto::from).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryTotalDto {
    pub category: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_amount: Decimal,
    pub expense_count: usize,
}

impl From<&CategoryTotal> for CategoryTotalDto {
    fn from(c: &CategoryTotal) -> Self {
        Self {
            category: c.category.as_str().to_string(),
            total_amount: PrecisionPolicy::present(&c.total_amount),
            expense_count: c.expense_count,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorySummaryResponse {
    pub period: PeriodDto,
    pub currency_code: String,
    pub categories: Vec<CategoryTotalDto>,
}

impl From<&CategoryReport> for CategorySummaryResponse {
    fn from(report: &CategoryReport) -> Self {
        Self {
            period: report.window.into(),
            currency_code: report.room.currency.code().to_string(),
            categories: report.categories.iter().map(CategoryTotalDto::from).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyTrendDto {
    pub month: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_amount: Decimal,
    pub expense_count: usize,
}

impl From<&MonthlyTrend> for MonthlyTrendDto {
    fn from(t: &MonthlyTrend) -> Self {
        Self {
            month: t.month.clone(),
            total_amount: PrecisionPolicy::present(&t.total_amount),
            expense_count: t.expense_count,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendsResponse {
    pub period: PeriodDto,
    pub currency_code: String,
    pub trends: Vec<MonthlyTrendDto>,
}

impl From<&TrendReport> for TrendsResponse {
    fn from(report: &TrendReport) -> Self {
        Self {
            period: report.window.into(),
            currency_code: report.room.currency.code().to_string(),
            trends: report.months.iter().map(MonthlyTrendDto::from).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomDto {
    pub id: Uuid,
    pub name: String,
    pub currency_code: String,
}

impl From<&Room> for RoomDto {
    fn from(room: &Room) -> Self {
        Self {
            id: *room.id.as_uuid(),
            name: room.name.clone(),
            currency_code: room.currency.code().to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberDto {
    pub id: Uuid,
    pub full_name: String,
    pub nickname: Option<String>,
}

impl From<&Member> for MemberDto {
    fn from(member: &Member) -> Self {
        Self {
            id: *member.id.as_uuid(),
            full_name: member.full_name.clone(),
            nickname: member.nickname.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStatsDto {
    pub total_roommates: usize,
    #[serde(with = "rust_decimal::serde::float")]
    pub current_month_total: Decimal,
    pub current_month_expense_count: usize,
    #[serde(with = "rust_decimal::serde::float")]
    pub all_time_total: Decimal,
    pub all_time_expense_count: usize,
    #[serde(with = "rust_decimal::serde::float")]
    pub average_cost_per_person: Decimal,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    pub room: RoomDto,
    pub period: PeriodDto,
    pub stats: DashboardStatsDto,
    pub members: Vec<MemberDto>,
}

impl From<&Dashboard> for DashboardResponse {
    fn from(d: &Dashboard) -> Self {
        Self {
            room: (&d.room).into(),
            period: d.window.into(),
            stats: DashboardStatsDto {
                total_roommates: d.stats.total_roommates,
                current_month_total: PrecisionPolicy::present(&d.stats.window_total),
                current_month_expense_count: d.stats.window_expense_count,
                all_time_total: PrecisionPolicy::present(&d.stats.all_time_total),
                all_time_expense_count: d.stats.all_time_expense_count,
                average_cost_per_person: PrecisionPolicy::present(
                    &d.stats.average_cost_per_person,
                ),
            },
            members: d.members.iter().map(MemberDto::from).collect(),
        }
    }
}
