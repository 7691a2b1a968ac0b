/// savings growth - current value and 6/12/24 month previews
use household_projection::chrono::{Duration, NaiveDate, TimeZone, Utc};
use household_projection::serialization::to_json;
use household_projection::{
    ContributionLedger, Decimal, InterestAccrualCalculator, InterestPeriod, LedgerEntry, Money,
    ProjectionConfig, Rate, SafeTimeProvider, SavingsAccount, SavingsView, TimeSource,
    TransactionKind, Uuid,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== savings growth ===\n");

    let config = ProjectionConfig::default();
    let time = SafeTimeProvider::new(TimeSource::Test(
        Utc.with_ymd_and_hms(2024, 2, 20, 0, 0, 0).unwrap()
    ));
    let control = time.test_control().unwrap();

    let account = SavingsAccount::new(
        "emergency fund",
        Rate::from_percentage_decimal(Decimal::new(12, 1)), // 1.2% per month
        InterestPeriod::Monthly,
    )
    .with_target(Money::from_major(5_000));

    // transactions tagged with the savings category become contributions
    let savings_category = Uuid::new_v4();
    let mut contributions = ContributionLedger::new();
    contributions.link_category(savings_category, account.id);

    let entries = vec![
        LedgerEntry::new(TransactionKind::Expense, Money::from_major(1_000), NaiveDate::from_ymd_opt(2024, 2, 10).unwrap())
            .with_category(savings_category),
        LedgerEntry::new(TransactionKind::Expense, Money::from_major(64), NaiveDate::from_ymd_opt(2024, 2, 12).unwrap())
            .with_description("groceries"),
    ];
    let report = contributions.sync_from_entries(&entries, "household")?;
    println!("contributions derived: {:?}", report);

    let calculator = InterestAccrualCalculator::new();
    let deposits = contributions.for_account(account.id);
    let current = calculator.accrue_now(&deposits, &account, &time)?;
    let previews = calculator.preview(&deposits, &account, &config.savings_preview_months, &time)?;

    let view = SavingsView::from_summary(&account, &current, &previews, config.display_scale);
    println!("{}", to_json(&view)?);

    // a month later the same deposits are worth more
    control.advance(Duration::days(30));
    let later = calculator.accrue_now(&deposits, &account, &time)?;
    println!("\nvalue on {}: {}", later.as_of, later.projected_value.to_currency());

    Ok(())
}
