use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

use crate::decimal::Money;
use crate::errors::{ProjectionError, Result};
use crate::types::{CategoryId, Interval, TemplateId, TransactionKind};

/// shape of the occurrences a template produces
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Recurrence {
    /// exactly one occurrence on the start date
    Single,
    /// repeats until `end_date` (inclusive) or the projection horizon
    Recurring {
        interval: Interval,
        end_date: Option<NaiveDate>,
    },
    /// exactly `count` occurrences of the full amount, labeled `k/count`
    Installments {
        interval: Interval,
        count: u32,
    },
}

/// one user-declared intent to produce money movements
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionTemplate {
    pub id: TemplateId,
    pub kind: TransactionKind,
    pub amount: Money,
    pub description: Option<String>,
    pub category: Option<CategoryId>,
    pub start_date: NaiveDate,
    pub recurrence: Recurrence,
}

impl TransactionTemplate {
    /// builder for creating templates
    pub fn builder() -> TemplateBuilder {
        TemplateBuilder::new()
    }

    /// check the template invariants
    pub fn validate(&self) -> Result<()> {
        if !self.amount.is_positive() || !self.amount.is_currency_scale() {
            warn!(template_id = %self.id, amount = %self.amount, "rejecting template amount");
            return Err(ProjectionError::InvalidAmount {
                id: self.id,
                amount: self.amount,
            });
        }

        match &self.recurrence {
            Recurrence::Single => Ok(()),
            Recurrence::Recurring { end_date: Some(end), .. } if *end < self.start_date => {
                Err(self.invalid_recurrence(format!(
                    "end date {} precedes start date {}",
                    end, self.start_date
                )))
            }
            Recurrence::Recurring { .. } => Ok(()),
            Recurrence::Installments { count, .. } if *count < 2 => Err(self.invalid_recurrence(
                format!("installment count must be at least 2, got {}", count),
            )),
            Recurrence::Installments { interval: Interval::Yearly, .. } => Err(self
                .invalid_recurrence("installments must be weekly or monthly".to_string())),
            Recurrence::Installments { .. } => Ok(()),
        }
    }

    fn invalid_recurrence(&self, message: String) -> ProjectionError {
        warn!(template_id = %self.id, %message, "rejecting template recurrence");
        ProjectionError::InvalidRecurrence {
            id: self.id,
            message,
        }
    }
}

/// builder for transaction templates
#[derive(Debug, Default)]
pub struct TemplateBuilder {
    id: Option<TemplateId>,
    kind: Option<TransactionKind>,
    amount: Option<Money>,
    description: Option<String>,
    category: Option<CategoryId>,
    start_date: Option<NaiveDate>,
    recurrence: Option<Recurrence>,
}

impl TemplateBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(mut self, id: TemplateId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn income(mut self, amount: Money) -> Self {
        self.kind = Some(TransactionKind::Income);
        self.amount = Some(amount);
        self
    }

    pub fn expense(mut self, amount: Money) -> Self {
        self.kind = Some(TransactionKind::Expense);
        self.amount = Some(amount);
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn category(mut self, category: CategoryId) -> Self {
        self.category = Some(category);
        self
    }

    pub fn starting(mut self, date: NaiveDate) -> Self {
        self.start_date = Some(date);
        self
    }

    /// repeat every interval with no end date
    pub fn every(mut self, interval: Interval) -> Self {
        self.recurrence = Some(Recurrence::Recurring {
            interval,
            end_date: None,
        });
        self
    }

    /// repeat every interval up to and including `end_date`
    pub fn every_until(mut self, interval: Interval, end_date: NaiveDate) -> Self {
        self.recurrence = Some(Recurrence::Recurring {
            interval,
            end_date: Some(end_date),
        });
        self
    }

    pub fn installments(mut self, interval: Interval, count: u32) -> Self {
        self.recurrence = Some(Recurrence::Installments { interval, count });
        self
    }

    /// build and validate; recurrence defaults to single
    pub fn build(self) -> Result<TransactionTemplate> {
        let kind = self.kind.ok_or(ProjectionError::InvalidConfiguration {
            message: "template needs an income or expense amount".to_string(),
        })?;
        let amount = self.amount.ok_or(ProjectionError::InvalidConfiguration {
            message: "template needs an amount".to_string(),
        })?;
        let start_date = self.start_date.ok_or(ProjectionError::InvalidConfiguration {
            message: "template needs a start date".to_string(),
        })?;

        let template = TransactionTemplate {
            id: self.id.unwrap_or_else(Uuid::new_v4),
            kind,
            amount,
            description: self.description,
            category: self.category,
            start_date,
            recurrence: self.recurrence.unwrap_or(Recurrence::Single),
        };
        template.validate()?;
        Ok(template)
    }
}

/// ordered, validated collection of templates
///
/// insertion order is kept because the expander breaks date ties by it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TemplateSet {
    templates: Vec<TransactionTemplate>,
}

impl TemplateSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// insert a new template, rejecting invalid shapes and reused ids
    pub fn insert(&mut self, template: TransactionTemplate) -> Result<()> {
        template.validate()?;
        if self.get(template.id).is_some() {
            return Err(ProjectionError::DuplicateTemplate { id: template.id });
        }
        self.templates.push(template);
        Ok(())
    }

    /// full replace of an existing template, keeping its position
    pub fn replace(&mut self, template: TransactionTemplate) -> Result<TransactionTemplate> {
        template.validate()?;
        let slot = self
            .templates
            .iter_mut()
            .find(|t| t.id == template.id)
            .ok_or(ProjectionError::TemplateNotFound { id: template.id })?;
        Ok(std::mem::replace(slot, template))
    }

    pub fn remove(&mut self, id: TemplateId) -> Result<TransactionTemplate> {
        let index = self
            .templates
            .iter()
            .position(|t| t.id == id)
            .ok_or(ProjectionError::TemplateNotFound { id })?;
        Ok(self.templates.remove(index))
    }

    pub fn get(&self, id: TemplateId) -> Option<&TransactionTemplate> {
        self.templates.iter().find(|t| t.id == id)
    }

    pub fn as_slice(&self) -> &[TransactionTemplate] {
        &self.templates
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}
