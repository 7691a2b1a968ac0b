/// installments - simulated purchases against a fixed clock
use household_projection::chrono::{NaiveDate, TimeZone, Utc};
use household_projection::serialization::to_json;
use household_projection::{
    Interval, LedgerEntry, Money, ProjectionView, RecurrenceExpander, SafeTimeProvider, TemplateSet,
    TimeSource, TransactionKind, TransactionTemplate,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== installment simulation ===\n");

    let time = SafeTimeProvider::new(TimeSource::Test(
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
    ));

    let mut simulation = TemplateSet::new();
    simulation.insert(
        TransactionTemplate::builder()
            .expense(Money::from_major(400))
            .description("laptop")
            .starting(NaiveDate::from_ymd_opt(2024, 1, 31).unwrap())
            .installments(Interval::Monthly, 6)
            .build()?,
    )?;
    simulation.insert(
        TransactionTemplate::builder()
            .expense(Money::from_major(25))
            .description("swimming lessons")
            .starting(NaiveDate::from_ymd_opt(2024, 1, 6).unwrap())
            .installments(Interval::Weekly, 8)
            .build()?,
    )?;

    let realized = vec![
        LedgerEntry::new(TransactionKind::Income, Money::from_major(3_000), NaiveDate::from_ymd_opt(2024, 1, 1).unwrap())
            .with_description("opening balance"),
    ];

    let projection = RecurrenceExpander::new(4).expand(simulation.as_slice(), &realized, &time)?;
    for occurrence in &projection.occurrences {
        println!("{}  {:>8}  {}", occurrence.date, occurrence.signed_amount(), occurrence.label);
    }

    // the laptop plan runs past the 4 month horizon, so only 4 of 6 show
    let view = ProjectionView::from_projection(&projection, Money::ZERO, 2)?;
    println!("\n{}", to_json(&view.months)?);

    Ok(())
}
