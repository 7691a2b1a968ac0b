//! dashboard aggregations over a projection or over realized entries.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calendar;
use crate::decimal::Money;
use crate::errors::{ProjectionError, Result};
use crate::projection::occurrence::LedgerEntry;
use crate::projection::Projection;
use crate::types::TransactionKind;

/// one calendar month of a projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlySummary {
    pub year: i32,
    pub month: u32,
    pub count: usize,
    pub income: Money,
    pub expense: Money,
    pub net: Money,
    /// opening balance plus the net of this and every earlier month
    pub running_balance: Money,
}

/// running totals of one calendar month
struct MonthBucket {
    count: usize,
    income: Money,
    expense: Money,
    /// last occurrence added, named when a later sum overflows
    last_source: Uuid,
}

/// group a projection by calendar month, oldest first
pub fn monthly_breakdown(projection: &Projection, opening_balance: Money) -> Result<Vec<MonthlySummary>> {
    let mut buckets: BTreeMap<(i32, u32), MonthBucket> = BTreeMap::new();
    for occurrence in &projection.occurrences {
        let bucket = buckets
            .entry((occurrence.date.year(), occurrence.date.month()))
            .or_insert(MonthBucket {
                count: 0,
                income: Money::ZERO,
                expense: Money::ZERO,
                last_source: occurrence.source,
            });
        bucket.count += 1;
        bucket.last_source = occurrence.source;
        let total = match occurrence.kind {
            TransactionKind::Income => &mut bucket.income,
            TransactionKind::Expense => &mut bucket.expense,
        };
        *total = total
            .checked_add(occurrence.amount)
            .ok_or_else(|| ProjectionError::overflow(occurrence.source, "monthly breakdown"))?;
    }

    let mut balance = opening_balance;
    let mut months = Vec::with_capacity(buckets.len());
    for ((year, month), bucket) in buckets {
        let overflow = || ProjectionError::overflow(bucket.last_source, "monthly breakdown");
        let net = bucket.income.checked_sub(bucket.expense).ok_or_else(overflow)?;
        balance = balance.checked_add(net).ok_or_else(overflow)?;
        months.push(MonthlySummary {
            year,
            month,
            count: bucket.count,
            income: bucket.income,
            expense: bucket.expense,
            net,
            running_balance: balance,
        });
    }
    Ok(months)
}

/// averages of realized entries over a fixed trailing window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrailingAverage {
    pub window_start: NaiveDate,
    pub window_end: NaiveDate,
    pub window_months: u32,
    pub income_total: Money,
    pub expense_total: Money,
    pub average_income: Money,
    pub average_expense: Money,
    pub average_net: Money,
}

/// monthly averages over `[as_of - window_months, as_of)`
///
/// totals are always divided by `window_months`, even when the ledger holds
/// less history than the window.
pub fn trailing_average(entries: &[LedgerEntry], as_of: NaiveDate, window_months: u32) -> Result<TrailingAverage> {
    if window_months < 1 {
        return Err(ProjectionError::InvalidConfiguration {
            message: format!("average window must be at least 1 month, got {}", window_months),
        });
    }
    let window_start = calendar::sub_months(as_of, window_months)?;

    let mut income_total = Money::ZERO;
    let mut expense_total = Money::ZERO;
    let mut net_total = Money::ZERO;
    for entry in entries.iter().filter(|e| e.date >= window_start && e.date < as_of) {
        let overflow = || ProjectionError::overflow(entry.id, "trailing average");
        let total = match entry.kind {
            TransactionKind::Income => &mut income_total,
            TransactionKind::Expense => &mut expense_total,
        };
        *total = total.checked_add(entry.amount).ok_or_else(overflow)?;
        net_total = income_total.checked_sub(expense_total).ok_or_else(overflow)?;
    }

    let divisor = Decimal::from(window_months);
    Ok(TrailingAverage {
        window_start,
        window_end: as_of,
        window_months,
        income_total,
        expense_total,
        average_income: income_total / divisor,
        average_expense: expense_total / divisor,
        average_net: net_total / divisor,
    })
}
