/// resident lifecycle - booking, move-in, payments and move-out
use rent_ledger_rs::chrono::{Duration, TimeZone, Utc};
use rent_ledger_rs::{
    LedgerConfig, LedgerError, MemoryStore, Money, PaymentInput, PaymentMode, RentLedger,
    Resident, Room, SafeTimeProvider, TimeSource,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let time = SafeTimeProvider::new(TimeSource::Test(
        Utc.with_ymd_and_hms(2024, 1, 3, 9, 0, 0).unwrap(),
    ));
    let controller = time.test_control().unwrap();

    let mut ledger = RentLedger::new(MemoryStore::new(), LedgerConfig::default())?;
    let room = ledger.add_room(Room::new("201", 2, Money::from_major(7_000)))?;
    let resident = ledger.add_resident(Resident::upcoming("Dev", "9000000004", time.now()))?;

    ledger.assign_room(resident.id, room.id, &time)?;
    ledger.activate_resident(resident.id, &time)?;
    println!("occupancy: {:?}", ledger.occupancy()?);

    // pay january, skip february
    let january = RentLedger::<MemoryStore>::current_period(&time);
    ledger.record_payment(
        resident.id,
        PaymentInput::new(Money::from_major(7_000), january, PaymentMode::BankTransfer),
        &time,
    )?;
    controller.advance(Duration::days(60));
    let march = RentLedger::<MemoryStore>::current_period(&time);

    match ledger.vacate_resident(resident.id, &time) {
        Err(LedgerError::OutstandingArrears { arrears }) => {
            println!("cannot vacate yet, owes {arrears}")
        }
        other => println!("unexpected: {other:?}"),
    }

    // clearing february arrears unlocks move-out
    ledger.record_payment(
        resident.id,
        PaymentInput::new(Money::from_major(7_000), january.succ(), PaymentMode::Cash)
            .with_notes("late february rent"),
        &time,
    )?;
    let former = ledger.vacate_resident(resident.id, &time)?;
    let listed = ledger.period_ledger(march)?.entries.len();
    println!("{} is now {:?} ({listed} in march ledger)", former.name, former.status);

    for event in ledger.take_events() {
        println!("{event:?}");
    }

    Ok(())
}
