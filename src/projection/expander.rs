use std::collections::HashSet;

use chrono::NaiveDate;
use hourglass_rs::SafeTimeProvider;
use tracing::{debug, trace, warn};

use crate::calendar;
use crate::config::ProjectionConfig;
use crate::errors::{ProjectionError, Result};
use crate::projection::occurrence::{occurrence_label, InstallmentPosition, LedgerEntry, Occurrence};
use crate::projection::template::{Recurrence, TransactionTemplate};
use crate::projection::Projection;

/// engine turning templates into a dated, sorted projection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecurrenceExpander {
    pub horizon_months: u32,
}

impl RecurrenceExpander {
    pub fn new(horizon_months: u32) -> Self {
        Self { horizon_months }
    }

    pub fn from_config(config: &ProjectionConfig) -> Self {
        Self::new(config.horizon_months)
    }

    /// expand against "today" as reported by the time provider
    pub fn expand(
        &self,
        templates: &[TransactionTemplate],
        ledger: &[LedgerEntry],
        time_provider: &SafeTimeProvider,
    ) -> Result<Projection> {
        self.expand_from(templates, ledger, calendar::today(time_provider))
    }

    /// expand the window `[today, today + horizon_months)`
    ///
    /// every template is validated before anything is produced, so a
    /// contract violation never yields a partial projection. ledger entries
    /// are merged unchanged and are not clipped to the window.
    pub fn expand_from(
        &self,
        templates: &[TransactionTemplate],
        ledger: &[LedgerEntry],
        today: NaiveDate,
    ) -> Result<Projection> {
        if self.horizon_months < 1 {
            warn!(months = self.horizon_months, "rejecting projection horizon");
            return Err(ProjectionError::InvalidHorizon { months: self.horizon_months });
        }
        validate_inputs(templates, ledger)?;

        let horizon = calendar::add_months(today, self.horizon_months)?;

        // ledger first, then templates in insertion order; the stable sort
        // below keeps this order for equal dates
        let mut occurrences: Vec<Occurrence> = ledger.iter().map(LedgerEntry::to_occurrence).collect();
        for template in templates {
            let expanded = expand_template(template, today, horizon)?;
            trace!(
                template_id = %template.id,
                occurrences = expanded.len(),
                "expanded template"
            );
            occurrences.extend(expanded);
        }
        occurrences.sort_by_key(|o| o.date);

        debug!(
            templates = templates.len(),
            ledger_entries = ledger.len(),
            occurrences = occurrences.len(),
            %today,
            %horizon,
            "projection expanded"
        );

        Ok(Projection {
            today,
            horizon,
            occurrences,
        })
    }
}

/// expand with an explicit horizon in months
pub fn expand(
    templates: &[TransactionTemplate],
    ledger: &[LedgerEntry],
    horizon_months: u32,
    time_provider: &SafeTimeProvider,
) -> Result<Projection> {
    RecurrenceExpander::new(horizon_months).expand(templates, ledger, time_provider)
}

fn validate_inputs(templates: &[TransactionTemplate], ledger: &[LedgerEntry]) -> Result<()> {
    let mut seen = HashSet::with_capacity(templates.len());
    for template in templates {
        template.validate()?;
        if !seen.insert(template.id) {
            warn!(template_id = %template.id, "duplicate template in projection input");
            return Err(ProjectionError::DuplicateTemplate { id: template.id });
        }
    }
    for entry in ledger {
        entry.validate()?;
    }
    Ok(())
}

/// occurrences of a single template inside `[today, horizon)`
///
/// dates before `today` are stepped over without being emitted; installment
/// numbering still counts them.
pub fn expand_template(
    template: &TransactionTemplate,
    today: NaiveDate,
    horizon: NaiveDate,
) -> Result<Vec<Occurrence>> {
    let in_window = |date: NaiveDate| date >= today && date < horizon;
    let mut occurrences = Vec::new();

    match &template.recurrence {
        Recurrence::Single => {
            if in_window(template.start_date) {
                occurrences.push(occurrence_at(template, template.start_date, None));
            }
        }
        Recurrence::Recurring { interval, end_date } => {
            let mut cursor = template.start_date;
            while cursor < horizon && end_date.map_or(true, |end| cursor <= end) {
                if cursor >= today {
                    occurrences.push(occurrence_at(template, cursor, None));
                }
                cursor = calendar::step(cursor, *interval)?;
            }
        }
        Recurrence::Installments { interval, count } => {
            let mut cursor = template.start_date;
            let mut index = 1;
            while index <= *count && cursor < horizon {
                if cursor >= today {
                    let position = InstallmentPosition { index, count: *count };
                    occurrences.push(occurrence_at(template, cursor, Some(position)));
                }
                cursor = calendar::step(cursor, *interval)?;
                index += 1;
            }
        }
    }

    Ok(occurrences)
}

fn occurrence_at(
    template: &TransactionTemplate,
    date: NaiveDate,
    installment: Option<InstallmentPosition>,
) -> Occurrence {
    Occurrence {
        source: template.id,
        kind: template.kind,
        amount: template.amount,
        date,
        label: occurrence_label(template.description.as_deref(), installment),
        category: template.category,
        installment,
        is_projected: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};
    use hourglass_rs::TimeSource;
    use uuid::Uuid;

    use crate::decimal::Money;
    use crate::types::{Interval, TransactionKind};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn clock(y: i32, m: u32, d: u32) -> SafeTimeProvider {
        SafeTimeProvider::new(TimeSource::Test(
            Utc.with_ymd_and_hms(y, m, d, 9, 0, 0).unwrap()
        ))
    }

    fn monthly(amount: i64, start: NaiveDate) -> TransactionTemplate {
        TransactionTemplate::builder()
            .expense(Money::from_major(amount))
            .starting(start)
            .every(Interval::Monthly)
            .build()
            .unwrap()
    }

    #[test]
    fn test_single_inside_and_beyond_horizon() {
        let today = date(2024, 1, 1);
        let inside = TransactionTemplate::builder()
            .income(Money::from_major(500))
            .starting(date(2024, 3, 1))
            .build()
            .unwrap();
        let beyond = TransactionTemplate::builder()
            .income(Money::from_major(500))
            .starting(date(2025, 3, 1))
            .build()
            .unwrap();

        let projection = RecurrenceExpander::new(6)
            .expand_from(&[inside.clone(), beyond], &[], today)
            .unwrap();

        assert_eq!(projection.occurrences.len(), 1);
        assert_eq!(projection.occurrences[0].source, inside.id);
        assert!(projection.occurrences[0].is_projected);
    }

    #[test]
    fn test_horizon_is_exclusive() {
        let today = date(2024, 1, 15);
        // lands exactly on today + 1 month
        let on_horizon = TransactionTemplate::builder()
            .expense(Money::from_major(10))
            .starting(date(2024, 2, 15))
            .build()
            .unwrap();

        let projection = RecurrenceExpander::new(1)
            .expand_from(&[on_horizon], &[], today)
            .unwrap();

        assert_eq!(projection.horizon, date(2024, 2, 15));
        assert!(projection.occurrences.is_empty());
    }

    #[test]
    fn test_open_ended_recurring_bounded_by_horizon() {
        let today = date(2024, 1, 1);
        let projection = RecurrenceExpander::new(12)
            .expand_from(&[monthly(900, today)], &[], today)
            .unwrap();

        assert_eq!(projection.occurrences.len(), 12);
        assert_eq!(projection.occurrences[11].date, date(2024, 12, 1));
        for occurrence in &projection.occurrences {
            assert!(occurrence.date >= projection.today);
            assert!(occurrence.date < projection.horizon);
        }
    }

    #[test]
    fn test_recurring_end_date_inclusive() {
        let today = date(2024, 1, 10);
        let template = TransactionTemplate::builder()
            .expense(Money::from_major(50))
            .starting(date(2024, 1, 10))
            .every_until(Interval::Monthly, date(2024, 3, 10))
            .build()
            .unwrap();

        let projection = RecurrenceExpander::new(12)
            .expand_from(&[template], &[], today)
            .unwrap();

        let dates: Vec<NaiveDate> = projection.occurrences.iter().map(|o| o.date).collect();
        assert_eq!(dates, vec![date(2024, 1, 10), date(2024, 2, 10), date(2024, 3, 10)]);
    }

    #[test]
    fn test_month_end_clamping_does_not_catch_up() {
        let today = date(2024, 1, 1);
        let projection = RecurrenceExpander::new(4)
            .expand_from(&[monthly(100, date(2024, 1, 31))], &[], today)
            .unwrap();

        let dates: Vec<NaiveDate> = projection.occurrences.iter().map(|o| o.date).collect();
        assert_eq!(dates, vec![date(2024, 1, 31), date(2024, 2, 29), date(2024, 3, 29), date(2024, 4, 29)]);
    }

    #[test]
    fn test_weekly_and_yearly_steps() {
        let today = date(2024, 1, 1);
        let weekly = TransactionTemplate::builder()
            .expense(Money::from_major(20))
            .starting(date(2024, 1, 3))
            .every(Interval::Weekly)
            .build()
            .unwrap();
        let yearly = TransactionTemplate::builder()
            .expense(Money::from_major(120))
            .starting(date(2024, 2, 29))
            .every(Interval::Yearly)
            .build()
            .unwrap();

        let weeks = expand_template(&weekly, today, date(2024, 2, 1)).unwrap();
        assert_eq!(weeks.len(), 5); // jan 3, 10, 17, 24, 31

        let years = expand_template(&yearly, today, date(2027, 1, 1)).unwrap();
        let dates: Vec<NaiveDate> = years.iter().map(|o| o.date).collect();
        assert_eq!(dates, vec![date(2024, 2, 29), date(2025, 2, 28), date(2026, 2, 28)]);
    }

    #[test]
    fn test_installments_full_plan() {
        let today = date(2024, 1, 1);
        let template = TransactionTemplate::builder()
            .expense(Money::from_major(250))
            .description("sofa")
            .starting(date(2024, 2, 5))
            .installments(Interval::Monthly, 4)
            .build()
            .unwrap();

        let projection = RecurrenceExpander::new(24)
            .expand_from(&[template], &[], today)
            .unwrap();

        let labels: Vec<&str> = projection.occurrences.iter().map(|o| o.label.as_str()).collect();
        assert_eq!(labels, vec!["sofa (1/4)", "sofa (2/4)", "sofa (3/4)", "sofa (4/4)"]);

        // each installment carries the full amount
        for (i, occurrence) in projection.occurrences.iter().enumerate() {
            assert_eq!(occurrence.amount, Money::from_major(250));
            assert_eq!(occurrence.installment, Some(InstallmentPosition { index: i as u32 + 1, count: 4 }));
        }
    }

    #[test]
    fn test_installments_cut_by_horizon() {
        let today = date(2024, 1, 1);
        let template = TransactionTemplate::builder()
            .expense(Money::from_major(80))
            .starting(date(2024, 1, 1))
            .installments(Interval::Weekly, 10)
            .build()
            .unwrap();

        let projection = RecurrenceExpander::new(1)
            .expand_from(&[template], &[], today)
            .unwrap();

        // jan 1, 8, 15, 22, 29; feb 5 is past the horizon
        assert_eq!(projection.occurrences.len(), 5);
        assert_eq!(projection.occurrences[4].label, "(5/10)");
    }

    #[test]
    fn test_installments_started_in_past_keep_numbering() {
        let today = date(2024, 3, 15);
        let template = TransactionTemplate::builder()
            .expense(Money::from_major(60))
            .starting(date(2024, 1, 20))
            .installments(Interval::Monthly, 5)
            .build()
            .unwrap();

        let projection = RecurrenceExpander::new(12)
            .expand_from(&[template], &[], today)
            .unwrap();

        let positions: Vec<u32> = projection
            .occurrences
            .iter()
            .filter_map(|o| o.installment.map(|p| p.index))
            .collect();
        assert_eq!(positions, vec![3, 4, 5]);
        assert_eq!(projection.occurrences[0].date, date(2024, 3, 20));
    }

    #[test]
    fn test_sorted_with_stable_ties() {
        let today = date(2024, 1, 1);
        let rent = monthly(900, date(2024, 1, 1));
        let gym = monthly(30, date(2024, 1, 1));
        let salary = TransactionTemplate::builder()
            .income(Money::from_major(3_000))
            .starting(date(2024, 1, 25))
            .every(Interval::Monthly)
            .build()
            .unwrap();
        let realized = LedgerEntry::new(TransactionKind::Expense, Money::from_major(45), date(2024, 1, 1));

        let projection = RecurrenceExpander::new(3)
            .expand_from(&[salary, rent.clone(), gym.clone()], &[realized.clone()], today)
            .unwrap();

        for pair in projection.occurrences.windows(2) {
            assert!(pair[0].date <= pair[1].date);
        }

        let first_day: Vec<_> = projection
            .occurrences
            .iter()
            .filter(|o| o.date == date(2024, 1, 1))
            .map(|o| o.source)
            .collect();
        assert_eq!(first_day, vec![realized.id, rent.id, gym.id]);
    }

    #[test]
    fn test_ledger_entries_merged_unfiltered() {
        let today = date(2024, 6, 1);
        let past = LedgerEntry::new(TransactionKind::Income, Money::from_major(100), date(2024, 4, 2));

        let projection = RecurrenceExpander::new(1)
            .expand_from(&[], &[past.clone()], today)
            .unwrap();

        assert_eq!(projection.occurrences.len(), 1);
        assert!(!projection.occurrences[0].is_projected);
        assert_eq!(projection.occurrences[0].date, past.date);
    }

    #[test]
    fn test_rejects_zero_horizon() {
        let result = RecurrenceExpander::new(0).expand_from(&[], &[], date(2024, 1, 1));
        assert_eq!(result, Err(ProjectionError::InvalidHorizon { months: 0 }));
    }

    #[test]
    fn test_invalid_template_fails_without_partial_output() {
        let good = monthly(10, date(2024, 1, 1));
        let mut bad = monthly(10, date(2024, 1, 1));
        bad.recurrence = Recurrence::Installments { interval: Interval::Monthly, count: 1 };

        let result = RecurrenceExpander::new(6).expand_from(&[good, bad.clone()], &[], date(2024, 1, 1));
        match result {
            Err(ProjectionError::InvalidRecurrence { id, .. }) => assert_eq!(id, bad.id),
            other => panic!("expected invalid recurrence, got {:?}", other),
        }
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let template = monthly(10, date(2024, 1, 1));
        let result = RecurrenceExpander::new(6)
            .expand_from(&[template.clone(), template.clone()], &[], date(2024, 1, 1));
        assert_eq!(result, Err(ProjectionError::DuplicateTemplate { id: template.id }));
    }

    #[test]
    fn test_idempotent_under_same_clock() {
        let time = clock(2024, 1, 1);
        let templates = vec![
            monthly(900, date(2024, 1, 1)),
            TransactionTemplate::builder()
                .id(Uuid::new_v4())
                .expense(Money::from_major(99))
                .starting(date(2024, 2, 14))
                .installments(Interval::Weekly, 3)
                .build()
                .unwrap(),
        ];

        let first = expand(&templates, &[], 6, &time).unwrap();
        let second = expand(&templates, &[], 6, &time).unwrap();
        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn test_window_moves_with_clock() {
        let time = clock(2024, 1, 1);
        let control = time.test_control().unwrap();
        let templates = vec![monthly(900, date(2024, 1, 1))];

        let before = expand(&templates, &[], 3, &time).unwrap();
        assert_eq!(before.occurrences.first().map(|o| o.date), Some(date(2024, 1, 1)));

        control.advance(Duration::days(40));
        let after = expand(&templates, &[], 3, &time).unwrap();
        assert_eq!(after.today, date(2024, 2, 10));
        assert_eq!(after.occurrences.first().map(|o| o.date), Some(date(2024, 3, 1)));
        assert_eq!(after.occurrences.len(), 3);
    }
}
