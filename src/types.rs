use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// unique identifier for a transaction template
pub type TemplateId = Uuid;

/// unique identifier for a realized ledger entry
pub type EntryId = Uuid;

/// unique identifier for a category (weak reference, never owned)
pub type CategoryId = Uuid;

/// unique identifier for a savings account
pub type AccountId = Uuid;

/// unique identifier for a savings contribution
pub type ContributionId = Uuid;

/// direction of a money movement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionKind {
    Income,
    Expense,
}

/// step between two occurrences of a repeating template
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Interval {
    /// +7 days
    Weekly,
    /// +1 calendar month, day clamped to the target month
    Monthly,
    /// +12 calendar months
    Yearly,
}

/// period a nominal savings rate refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InterestPeriod {
    /// rate is prorated over the days of the contribution's own month
    Monthly,
    /// rate is prorated over a fixed 365-day year
    Yearly,
}

impl InterestPeriod {
    pub fn label(&self) -> &'static str {
        match self {
            InterestPeriod::Monthly => "monthly",
            InterestPeriod::Yearly => "yearly",
        }
    }
}
