/// serializable views handed to the presentation layer
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::decimal::Money;
use crate::errors::{ProjectionError, Result};
use crate::projection::{monthly_breakdown, Projection, ProjectionTotals};
use crate::savings::{AccrualSummary, GoalProgress, GrowthPreview, SavingsAccount};
use crate::types::TransactionKind;

/// projection as the dashboard consumes it
#[derive(Debug, Serialize, Deserialize)]
pub struct ProjectionView {
    pub today: NaiveDate,
    pub horizon: NaiveDate,
    pub totals: TotalsView,
    pub months: Vec<MonthView>,
    pub occurrences: Vec<OccurrenceView>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TotalsView {
    pub count: usize,
    pub projected_count: usize,
    pub income: Money,
    pub expense: Money,
    pub net: Money,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MonthView {
    pub month: String,
    pub income: Money,
    pub expense: Money,
    pub net: Money,
    pub running_balance: Money,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct OccurrenceView {
    pub source: Uuid,
    pub kind: TransactionKind,
    pub amount: Money,
    pub date: NaiveDate,
    pub label: String,
    pub projected: bool,
}

impl ProjectionView {
    pub fn from_projection(projection: &Projection, opening_balance: Money, scale: u32) -> Result<Self> {
        let totals: ProjectionTotals = projection.totals()?;
        Ok(ProjectionView {
            today: projection.today,
            horizon: projection.horizon,
            totals: TotalsView {
                count: totals.count,
                projected_count: totals.projected_count,
                income: totals.income.round_dp(scale),
                expense: totals.expense.round_dp(scale),
                net: totals.net.round_dp(scale),
            },
            months: monthly_breakdown(projection, opening_balance)?
                .into_iter()
                .map(|m| MonthView {
                    month: format!("{:04}-{:02}", m.year, m.month),
                    income: m.income.round_dp(scale),
                    expense: m.expense.round_dp(scale),
                    net: m.net.round_dp(scale),
                    running_balance: m.running_balance.round_dp(scale),
                })
                .collect(),
            occurrences: projection
                .occurrences
                .iter()
                .map(|o| OccurrenceView {
                    source: o.source,
                    kind: o.kind,
                    amount: o.amount.round_dp(scale),
                    date: o.date,
                    label: o.label.clone(),
                    projected: o.is_projected,
                })
                .collect(),
        })
    }
}

/// savings account with its current value and growth previews
#[derive(Debug, Serialize, Deserialize)]
pub struct SavingsView {
    pub id: Uuid,
    pub name: String,
    pub interest: String,
    pub as_of: NaiveDate,
    pub total_invested: Money,
    pub total_earnings: Money,
    pub current_value: Money,
    pub goal: Option<GoalProgress>,
    pub previews: Vec<PreviewView>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PreviewView {
    pub months: u32,
    pub as_of: NaiveDate,
    pub projected_value: Money,
    pub total_earnings: Money,
}

impl SavingsView {
    pub fn from_summary(
        account: &SavingsAccount,
        current: &AccrualSummary,
        previews: &[GrowthPreview],
        scale: u32,
    ) -> Self {
        SavingsView {
            id: account.id,
            name: account.name.clone(),
            interest: format!("{} {}", account.interest_rate, account.interest_period.label()),
            as_of: current.as_of,
            total_invested: current.total_invested.round_dp(scale),
            total_earnings: current.total_earnings.round_dp(scale),
            current_value: current.projected_value.round_dp(scale),
            goal: GoalProgress::for_account(account, current),
            previews: previews
                .iter()
                .map(|p| PreviewView {
                    months: p.months,
                    as_of: p.summary.as_of,
                    projected_value: p.summary.projected_value.round_dp(scale),
                    total_earnings: p.summary.total_earnings.round_dp(scale),
                })
                .collect(),
        }
    }
}

/// pretty json for any view
pub fn to_json<T: Serialize>(view: &T) -> Result<String> {
    serde_json::to_string_pretty(view).map_err(|e| ProjectionError::InvalidConfiguration {
        message: format!("failed to serialize view: {}", e),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decimal::Rate;
    use crate::projection::{RecurrenceExpander, TransactionTemplate};
    use crate::savings::{accrue, Contribution};
    use crate::types::{InterestPeriod, Interval};
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_projection_view_json() {
        let today = date(2024, 1, 1);
        let plan = TransactionTemplate::builder()
            .expense(Money::from_major(300))
            .description("phone")
            .starting(today)
            .installments(Interval::Monthly, 2)
            .build()
            .unwrap();

        let projection = RecurrenceExpander::new(6).expand_from(&[plan], &[], today).unwrap();
        let view = ProjectionView::from_projection(&projection, Money::ZERO, 2).unwrap();

        assert_eq!(view.months.len(), 2);
        assert_eq!(view.months[1].month, "2024-02");
        assert_eq!(view.months[1].running_balance, Money::from_major(-600));

        let json = to_json(&view).unwrap();
        assert!(json.contains("\"label\": \"phone (2/2)\""));
        assert!(json.contains("\"kind\": \"EXPENSE\""));
    }

    #[test]
    fn test_savings_view_rounds_to_scale() {
        let account = SavingsAccount::new("rainy day", Rate::from_percentage_decimal(dec!(1.2)), InterestPeriod::Monthly)
            .with_target(Money::from_major(2_000));
        let deposit = Contribution::new(account.id, Money::from_major(1_000), "sam", date(2024, 2, 10));
        let current = accrue(&[deposit], &account, date(2024, 2, 20)).unwrap();

        let view = SavingsView::from_summary(&account, &current, &[], 2);

        assert_eq!(view.current_value, Money::from_str_exact("1004.14").unwrap());
        assert_eq!(view.total_earnings, Money::from_str_exact("4.14").unwrap());
        assert_eq!(view.interest, "1.2% monthly");
        assert!(view.goal.is_some());
        assert!(to_json(&view).unwrap().contains("rainy day"));
    }
}
