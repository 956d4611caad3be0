/// monthly reports - overdue, current-period shortfall and the full ledger
use rent_ledger_rs::chrono::{NaiveDate, TimeZone, Utc};
use rent_ledger_rs::{
    LedgerConfig, LedgerTab, MemoryStore, Money, PaymentInput, PaymentMode, Period, RentLedger,
    Resident, Room, SafeTimeProvider, TimeSource,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let time = SafeTimeProvider::new(TimeSource::Test(
        Utc.with_ymd_and_hms(2024, 4, 12, 10, 0, 0).unwrap(),
    ));
    let april = RentLedger::<MemoryStore>::current_period(&time);

    let mut ledger = RentLedger::new(MemoryStore::new(), LedgerConfig::default())?;
    let single = ledger.add_room(Room::new("S-1", 1, Money::from_major(9_000)))?;
    let triple = ledger.add_room(Room::new("T-3", 3, Money::from_major(6_000)))?;

    let joined = |m| NaiveDate::from_ymd_opt(2024, m, 1).ok_or("bad date");
    let asha = ledger.add_resident(Resident::active(
        "Asha",
        "9000000001",
        single.id,
        joined(1)?,
        time.now(),
    ))?;
    let bilal = ledger.add_resident(Resident::active(
        "Bilal",
        "9000000002",
        triple.id,
        joined(2)?,
        time.now(),
    ))?;
    let chen = ledger.add_resident(
        Resident::active("Chen", "9000000003", triple.id, joined(4)?, time.now())
            .with_discount(Money::from_major(1_000))?,
    )?;

    let pay = |amount: i64, period: Period| {
        PaymentInput::new(Money::from_major(amount), period, PaymentMode::Cash)
    };
    for month in 1..=4 {
        ledger.record_payment(asha.id, pay(9_000, Period::new(2024, month)?), &time)?;
    }
    ledger.record_payment(bilal.id, pay(6_000, Period::new(2024, 2)?), &time)?;
    ledger.record_payment(bilal.id, pay(2_500, april), &time)?;
    ledger.record_payment(chen.id, pay(2_000, april), &time)?;

    println!("=== overdue ===");
    println!("{}\n", ledger.overdue_report(april)?.to_json_pretty()?);

    println!("=== current-period shortfall ===");
    println!("{}\n", ledger.upcoming_report(april)?.to_json_pretty()?);

    let statement = ledger.period_ledger(april)?;
    println!("=== ledger {} ===", statement.period);
    for (tab, count) in statement.tab_counts() {
        println!("{tab:?}: {count}");
    }
    for row in statement.tab(LedgerTab::All) {
        println!(
            "{:<6} {:<4} rent {:>8} paid {:>8} arrears {:>8} status {}",
            row.resident_name,
            row.room_number.as_deref().unwrap_or("-"),
            row.snapshot.effective_rent,
            row.snapshot.amount_paid_for_period,
            row.snapshot.arrears_before_period,
            row.snapshot.status,
        );
    }
    println!("totals: {:?}", statement.totals);

    Ok(())
}
