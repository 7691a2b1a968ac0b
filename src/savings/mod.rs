pub mod account;
pub mod accrual;
pub mod contributions;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};
use crate::types::{AccountId, ContributionId};

pub use account::{Contribution, SavingsAccount};
pub use accrual::{accrue, InterestAccrualCalculator, YEAR_BASIS_DAYS};
pub use contributions::{ContributionLedger, SyncReport};

/// earnings of a single contribution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccrualLine {
    pub contribution: ContributionId,
    pub date: NaiveDate,
    pub amount: Money,
    pub days_elapsed: u32,
    pub daily_rate: Rate,
    pub earnings: Money,
}

/// accrual result for one account at one valuation date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccrualSummary {
    pub account: AccountId,
    pub as_of: NaiveDate,
    pub total_invested: Money,
    pub total_earnings: Money,
    pub projected_value: Money,
    pub lines: Vec<AccrualLine>,
}

/// projected value at a future horizon
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrowthPreview {
    pub months: u32,
    pub summary: AccrualSummary,
}

/// progress towards a savings target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalProgress {
    pub target: Money,
    pub current: Money,
    pub remaining: Money,
    /// 0 to 100, capped once the target is reached
    pub percent_complete: Decimal,
    pub reached: bool,
}

impl GoalProgress {
    /// `None` when the account has no positive target
    pub fn for_account(account: &SavingsAccount, summary: &AccrualSummary) -> Option<Self> {
        let target = account.target_amount.filter(|t| t.is_positive())?;
        let current = summary.projected_value;
        let hundred = Decimal::ONE_HUNDRED;
        // a ratio too large for a decimal is far past the target
        let percent = current
            .as_decimal()
            .checked_div(target.as_decimal())
            .and_then(|ratio| ratio.checked_mul(hundred))
            .map_or(hundred, |p| p.min(hundred))
            .round_dp(2);

        Some(Self {
            target,
            current,
            remaining: target.checked_sub(current).map_or(Money::ZERO, |r| r.max(Money::ZERO)),
            percent_complete: percent,
            reached: current >= target,
        })
    }
}
