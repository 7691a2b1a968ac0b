use thiserror::Error;
use uuid::Uuid;

use crate::decimal::{Money, Rate};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProjectionError {
    #[error("invalid amount on {id}: {amount} (must be positive with at most 2 decimal places)")]
    InvalidAmount {
        id: Uuid,
        amount: Money,
    },

    #[error("invalid recurrence on template {id}: {message}")]
    InvalidRecurrence {
        id: Uuid,
        message: String,
    },

    #[error("duplicate template id: {id}")]
    DuplicateTemplate {
        id: Uuid,
    },

    #[error("template not found: {id}")]
    TemplateNotFound {
        id: Uuid,
    },

    #[error("invalid horizon: {months} months (must be at least 1)")]
    InvalidHorizon {
        months: u32,
    },

    #[error("invalid interest rate on account {account_id}: {rate}")]
    InvalidInterestRate {
        account_id: Uuid,
        rate: Rate,
    },

    #[error("contribution {contribution_id} belongs to account {actual}, expected {expected}")]
    AccountMismatch {
        contribution_id: Uuid,
        expected: Uuid,
        actual: Uuid,
    },

    #[error("savings account not found: {id}")]
    AccountNotFound {
        id: Uuid,
    },

    #[error("contribution not found: {id}")]
    ContributionNotFound {
        id: Uuid,
    },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration {
        message: String,
    },

    #[error("invalid date: {message}")]
    InvalidDate {
        message: String,
    },

    #[error("amount overflow in {context} at {id}")]
    AmountOverflow {
        id: Uuid,
        context: String,
    },
}

impl ProjectionError {
    pub(crate) fn overflow(id: Uuid, context: &str) -> Self {
        ProjectionError::AmountOverflow {
            id,
            context: context.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ProjectionError>;
