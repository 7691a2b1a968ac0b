use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::decimal::Money;
use crate::errors::{ProjectionError, Result};
use crate::types::{CategoryId, EntryId, TransactionKind};

/// position of an occurrence inside an installment plan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstallmentPosition {
    pub index: u32,
    pub count: u32,
}

/// one concrete dated money movement; derived, never persisted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Occurrence {
    /// template id for projected items, ledger entry id for realized ones
    pub source: Uuid,
    pub kind: TransactionKind,
    pub amount: Money,
    pub date: NaiveDate,
    pub label: String,
    pub category: Option<CategoryId>,
    pub installment: Option<InstallmentPosition>,
    pub is_projected: bool,
}

impl Occurrence {
    /// amount with sign applied: income positive, expense negative
    pub fn signed_amount(&self) -> Money {
        match self.kind {
            TransactionKind::Income => self.amount,
            TransactionKind::Expense => -self.amount,
        }
    }
}

/// a realized transaction coming from the ledger
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub id: EntryId,
    pub kind: TransactionKind,
    pub amount: Money,
    pub date: NaiveDate,
    pub description: Option<String>,
    pub category: Option<CategoryId>,
}

impl LedgerEntry {
    pub fn new(kind: TransactionKind, amount: Money, date: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            amount,
            date,
            description: None,
            category: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_category(mut self, category: CategoryId) -> Self {
        self.category = Some(category);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !self.amount.is_positive() {
            return Err(ProjectionError::InvalidAmount {
                id: self.id,
                amount: self.amount,
            });
        }
        Ok(())
    }

    /// merge into a projection as-is, never re-expanded
    pub fn to_occurrence(&self) -> Occurrence {
        Occurrence {
            source: self.id,
            kind: self.kind,
            amount: self.amount,
            date: self.date,
            label: self.description.clone().unwrap_or_default(),
            category: self.category,
            installment: None,
            is_projected: false,
        }
    }
}

/// label for an occurrence: description, plus ` (k/count)` for installments
pub(crate) fn occurrence_label(
    description: Option<&str>,
    installment: Option<InstallmentPosition>,
) -> String {
    let description = description.unwrap_or("").trim();
    match installment {
        Some(pos) if description.is_empty() => format!("({}/{})", pos.index, pos.count),
        Some(pos) => format!("{} ({}/{})", description, pos.index, pos.count),
        None => description.to_string(),
    }
}
