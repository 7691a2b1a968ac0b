pub mod expander;
pub mod occurrence;
pub mod summary;
pub mod template;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::errors::{ProjectionError, Result};
use crate::types::TransactionKind;

pub use expander::{expand, RecurrenceExpander};
pub use occurrence::{InstallmentPosition, LedgerEntry, Occurrence};
pub use summary::{monthly_breakdown, trailing_average, MonthlySummary, TrailingAverage};
pub use template::{Recurrence, TemplateBuilder, TemplateSet, TransactionTemplate};

/// date-ordered projection over `[today, horizon)`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projection {
    pub today: NaiveDate,
    pub horizon: NaiveDate,
    pub occurrences: Vec<Occurrence>,
}

impl Projection {
    /// occurrences generated from templates only
    pub fn projected(&self) -> impl Iterator<Item = &Occurrence> {
        self.occurrences.iter().filter(|o| o.is_projected)
    }

    /// occurrences dated in `[from, to)`
    pub fn between(&self, from: NaiveDate, to: NaiveDate) -> impl Iterator<Item = &Occurrence> {
        self.occurrences.iter().filter(move |o| o.date >= from && o.date < to)
    }

    pub fn totals(&self) -> Result<ProjectionTotals> {
        ProjectionTotals::from_occurrences(&self.occurrences)
    }
}

/// income, expense and net over a set of occurrences
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ProjectionTotals {
    pub count: usize,
    pub projected_count: usize,
    pub income: Money,
    pub expense: Money,
    pub net: Money,
}

impl ProjectionTotals {
    /// fails with `AmountOverflow` naming the occurrence that pushed a total out of range
    pub fn from_occurrences<'a>(occurrences: impl IntoIterator<Item = &'a Occurrence>) -> Result<Self> {
        let mut totals = ProjectionTotals::default();
        for occurrence in occurrences {
            totals.count += 1;
            if occurrence.is_projected {
                totals.projected_count += 1;
            }
            let total = match occurrence.kind {
                TransactionKind::Income => &mut totals.income,
                TransactionKind::Expense => &mut totals.expense,
            };
            *total = total
                .checked_add(occurrence.amount)
                .ok_or_else(|| ProjectionError::overflow(occurrence.source, "projection totals"))?;
            totals.net = totals
                .income
                .checked_sub(totals.expense)
                .ok_or_else(|| ProjectionError::overflow(occurrence.source, "projection totals"))?;
        }
        Ok(totals)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Interval;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_totals() {
        let today = date(2024, 1, 1);
        let salary = TransactionTemplate::builder()
            .income(Money::from_major(3_000))
            .starting(date(2024, 1, 25))
            .every(Interval::Monthly)
            .build()
            .unwrap();
        let rent = TransactionTemplate::builder()
            .expense(Money::from_major(1_200))
            .starting(date(2024, 1, 1))
            .every(Interval::Monthly)
            .build()
            .unwrap();
        let coffee = LedgerEntry::new(TransactionKind::Expense, Money::from_minor(450), date(2023, 12, 30));

        let projection = RecurrenceExpander::new(3)
            .expand_from(&[salary, rent], &[coffee], today)
            .unwrap();
        let totals = projection.totals().unwrap();

        assert_eq!(totals.count, 7);
        assert_eq!(totals.projected_count, 6);
        assert_eq!(totals.income, Money::from_major(9_000));
        assert_eq!(totals.expense, Money::from_str_exact("3604.50").unwrap());
        assert_eq!(totals.net, Money::from_str_exact("5395.50").unwrap());
    }

    #[test]
    fn test_between_and_projected() {
        let today = date(2024, 1, 1);
        let rent = TransactionTemplate::builder()
            .expense(Money::from_major(1_200))
            .starting(today)
            .every(Interval::Monthly)
            .build()
            .unwrap();
        let realized = LedgerEntry::new(TransactionKind::Income, Money::from_major(10), date(2024, 2, 3));

        let projection = RecurrenceExpander::new(6)
            .expand_from(&[rent], &[realized], today)
            .unwrap();

        assert_eq!(projection.projected().count(), 6);
        assert_eq!(projection.between(date(2024, 2, 1), date(2024, 3, 1)).count(), 2);
    }

    #[test]
    fn test_totals_overflow_names_template() {
        let today = date(2024, 1, 1);
        let windfall = TransactionTemplate::builder()
            .income(Money::from_str_exact("50000000000000000000000000000").unwrap())
            .starting(today)
            .every(Interval::Monthly)
            .build()
            .unwrap();
        let id = windfall.id;

        let projection = RecurrenceExpander::new(3)
            .expand_from(&[windfall], &[], today)
            .unwrap();

        assert_eq!(projection.occurrences.len(), 3);
        assert_eq!(
            projection.totals(),
            Err(ProjectionError::AmountOverflow {
                id,
                context: "projection totals".to_string(),
            })
        );
    }
}
