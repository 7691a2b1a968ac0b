/// quick start - project a month of household transactions
use household_projection::chrono::NaiveDate;
use household_projection::logging::init_tracing;
use household_projection::{Interval, Money, RecurrenceExpander, SafeTimeProvider, TimeSource, TransactionTemplate};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let rent = TransactionTemplate::builder()
        .expense(Money::from_major(950))
        .description("rent")
        .starting(NaiveDate::from_ymd_opt(2024, 1, 1).ok_or("bad date")?)
        .every(Interval::Monthly)
        .build()?;

    let salary = TransactionTemplate::builder()
        .income(Money::from_major(3_200))
        .description("salary")
        .starting(NaiveDate::from_ymd_opt(2024, 1, 25).ok_or("bad date")?)
        .every(Interval::Monthly)
        .build()?;

    // project the next three months from the system clock
    let time = SafeTimeProvider::new(TimeSource::System);
    let projection = RecurrenceExpander::new(3).expand(&[rent, salary], &[], &time)?;

    for occurrence in &projection.occurrences {
        println!("{}  {:>10}  {}", occurrence.date, occurrence.signed_amount(), occurrence.label);
    }
    println!("net over horizon: {}", projection.totals()?.net);

    Ok(())
}
