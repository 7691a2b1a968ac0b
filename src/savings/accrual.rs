use chrono::NaiveDate;
use hourglass_rs::SafeTimeProvider;
use tracing::{debug, warn};

use crate::calendar;
use crate::decimal::{Money, Rate};
use crate::errors::{ProjectionError, Result};
use crate::savings::account::{Contribution, SavingsAccount};
use crate::savings::{AccrualLine, AccrualSummary, GrowthPreview};
use crate::types::InterestPeriod;

/// fixed year length for yearly rates; leap years are not special-cased
pub const YEAR_BASIS_DAYS: u32 = 365;

/// engine for prorated simple interest on savings contributions
///
/// each contribution accrues on its own principal from its own date; nothing
/// is compounded back into a running balance.
#[derive(Debug, Clone, Copy, Default)]
pub struct InterestAccrualCalculator;

impl InterestAccrualCalculator {
    pub fn new() -> Self {
        Self
    }

    /// days the nominal rate is spread over for a contribution made on `date`
    ///
    /// monthly rates use the length of the contribution's own month, not the
    /// month of the valuation date.
    pub fn period_days(&self, period: InterestPeriod, date: NaiveDate) -> u32 {
        match period {
            InterestPeriod::Monthly => calendar::days_in_month_of(date),
            InterestPeriod::Yearly => YEAR_BASIS_DAYS,
        }
    }

    pub fn daily_rate(&self, account: &SavingsAccount, date: NaiveDate) -> Rate {
        account
            .interest_rate
            .per_day(self.period_days(account.interest_period, date))
    }

    /// earnings of one contribution as of `as_of`; zero on the same day
    pub fn accrue_contribution(
        &self,
        contribution: &Contribution,
        account: &SavingsAccount,
        as_of: NaiveDate,
    ) -> Result<AccrualLine> {
        let days_elapsed = calendar::whole_days_between(contribution.date, as_of);
        let daily_rate = self.daily_rate(account, contribution.date);
        let earnings = if days_elapsed < 1 {
            Money::ZERO
        } else {
            contribution
                .amount
                .accrue_simple(daily_rate, days_elapsed)
                .ok_or_else(|| ProjectionError::overflow(contribution.id, "interest accrual"))?
        };

        Ok(AccrualLine {
            contribution: contribution.id,
            date: contribution.date,
            amount: contribution.amount,
            days_elapsed,
            daily_rate,
            earnings,
        })
    }

    /// invested total, earnings and value of an account as of a date
    pub fn accrue(
        &self,
        contributions: &[Contribution],
        account: &SavingsAccount,
        as_of: NaiveDate,
    ) -> Result<AccrualSummary> {
        account.validate()?;
        for contribution in contributions {
            contribution.validate()?;
            if contribution.account != account.id {
                warn!(
                    contribution_id = %contribution.id,
                    account_id = %account.id,
                    "contribution does not belong to account"
                );
                return Err(ProjectionError::AccountMismatch {
                    contribution_id: contribution.id,
                    expected: account.id,
                    actual: contribution.account,
                });
            }
        }

        let lines = contributions
            .iter()
            .map(|c| self.accrue_contribution(c, account, as_of))
            .collect::<Result<Vec<AccrualLine>>>()?;

        let mut total_invested = Money::ZERO;
        let mut total_earnings = Money::ZERO;
        for line in &lines {
            let overflow = || ProjectionError::overflow(line.contribution, "savings totals");
            total_invested = total_invested.checked_add(line.amount).ok_or_else(overflow)?;
            total_earnings = total_earnings.checked_add(line.earnings).ok_or_else(overflow)?;
        }
        let projected_value = total_invested
            .checked_add(total_earnings)
            .ok_or_else(|| ProjectionError::overflow(account.id, "savings totals"))?;

        debug!(
            account_id = %account.id,
            contributions = lines.len(),
            %as_of,
            %total_invested,
            %total_earnings,
            "savings accrued"
        );

        Ok(AccrualSummary {
            account: account.id,
            as_of,
            total_invested,
            total_earnings,
            projected_value,
            lines,
        })
    }

    /// accrue as of "today" according to the time provider
    pub fn accrue_now(
        &self,
        contributions: &[Contribution],
        account: &SavingsAccount,
        time_provider: &SafeTimeProvider,
    ) -> Result<AccrualSummary> {
        self.accrue(contributions, account, calendar::today(time_provider))
    }

    /// value `months` from today, recomputed from each contribution's date
    pub fn project(
        &self,
        contributions: &[Contribution],
        account: &SavingsAccount,
        months: u32,
        time_provider: &SafeTimeProvider,
    ) -> Result<AccrualSummary> {
        let as_of = calendar::add_months(calendar::today(time_provider), months)?;
        self.accrue(contributions, account, as_of)
    }

    /// one projection per requested horizon, e.g. 6/12/24 months
    pub fn preview(
        &self,
        contributions: &[Contribution],
        account: &SavingsAccount,
        horizons: &[u32],
        time_provider: &SafeTimeProvider,
    ) -> Result<Vec<GrowthPreview>> {
        horizons
            .iter()
            .map(|&months| {
                self.project(contributions, account, months, time_provider)
                    .map(|summary| GrowthPreview { months, summary })
            })
            .collect()
    }
}

/// accrue with the default calculator
pub fn accrue(
    contributions: &[Contribution],
    account: &SavingsAccount,
    as_of: NaiveDate,
) -> Result<AccrualSummary> {
    InterestAccrualCalculator::new().accrue(contributions, account, as_of)
}
