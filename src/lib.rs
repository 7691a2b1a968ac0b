pub mod calendar;
pub mod config;
pub mod decimal;
pub mod errors;
pub mod logging;
pub mod projection;
pub mod savings;
pub mod serialization;
pub mod types;

// re-export key types
pub use config::ProjectionConfig;
pub use decimal::{Money, Rate};
pub use errors::{ProjectionError, Result};
pub use projection::{
    expand, monthly_breakdown, trailing_average, InstallmentPosition, LedgerEntry, MonthlySummary,
    Occurrence, Projection, ProjectionTotals, Recurrence, RecurrenceExpander, TemplateBuilder,
    TemplateSet, TrailingAverage, TransactionTemplate,
};
pub use savings::{
    accrue, AccrualLine, AccrualSummary, Contribution, ContributionLedger, GoalProgress,
    GrowthPreview, InterestAccrualCalculator, SavingsAccount, SyncReport,
};
pub use serialization::{ProjectionView, SavingsView};
pub use types::{
    AccountId, CategoryId, ContributionId, EntryId, InterestPeriod, Interval, TemplateId,
    TransactionKind,
};

// re-export external dependencies that users will need
pub use chrono;
pub use hourglass_rs::{SafeTimeProvider, TimeSource};
pub use rust_decimal::Decimal;
pub use uuid::Uuid;
