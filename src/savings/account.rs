use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

use crate::decimal::{Money, Rate};
use crate::errors::{ProjectionError, Result};
use crate::types::{AccountId, ContributionId, EntryId, InterestPeriod};

/// savings account with a nominal simple-interest rate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavingsAccount {
    pub id: AccountId,
    pub name: String,
    pub target_amount: Option<Money>,
    /// stored as a fraction; `Rate::from_percentage_decimal(1.5)` is 1.5%
    pub interest_rate: Rate,
    pub interest_period: InterestPeriod,
}

impl SavingsAccount {
    pub fn new(name: impl Into<String>, interest_rate: Rate, interest_period: InterestPeriod) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            target_amount: None,
            interest_rate,
            interest_period,
        }
    }

    pub fn with_target(mut self, target: Money) -> Self {
        self.target_amount = Some(target);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.interest_rate.is_negative() {
            warn!(account_id = %self.id, rate = %self.interest_rate, "rejecting negative interest rate");
            return Err(ProjectionError::InvalidInterestRate {
                account_id: self.id,
                rate: self.interest_rate,
            });
        }
        Ok(())
    }
}

/// dated deposit into exactly one savings account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contribution {
    pub id: ContributionId,
    pub account: AccountId,
    pub amount: Money,
    pub contributed_by: String,
    pub date: NaiveDate,
    /// ledger entry this contribution was derived from, if any
    pub source_entry: Option<EntryId>,
}

impl Contribution {
    pub fn new(account: AccountId, amount: Money, contributed_by: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            account,
            amount,
            contributed_by: contributed_by.into(),
            date,
            source_entry: None,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !self.amount.is_positive() {
            warn!(contribution_id = %self.id, amount = %self.amount, "rejecting contribution amount");
            return Err(ProjectionError::InvalidAmount {
                id: self.id,
                amount: self.amount,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_negative_rate_rejected() {
        let account = SavingsAccount::new("holiday", Rate::from_decimal(dec!(-0.01)), InterestPeriod::Yearly);
        assert_eq!(
            account.validate(),
            Err(ProjectionError::InvalidInterestRate {
                account_id: account.id,
                rate: account.interest_rate,
            })
        );
    }

    #[test]
    fn test_zero_rate_allowed() {
        let account = SavingsAccount::new("cash", Rate::ZERO, InterestPeriod::Monthly);
        assert!(account.validate().is_ok());
    }

    #[test]
    fn test_target_does_not_affect_validity() {
        let account = SavingsAccount::new("car", Rate::from_percentage(2), InterestPeriod::Yearly)
            .with_target(Money::ZERO);
        assert!(account.validate().is_ok());
    }

    #[test]
    fn test_contribution_amount_must_be_positive() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let contribution = Contribution::new(Uuid::new_v4(), Money::from_major(-5), "alex", date);
        assert!(matches!(contribution.validate(), Err(ProjectionError::InvalidAmount { .. })));
    }
}
