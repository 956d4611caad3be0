/// quick start - minimal example to get started
use rent_ledger_rs::chrono::NaiveDate;
use rent_ledger_rs::{
    LedgerConfig, MemoryStore, Money, PaymentInput, PaymentMode, RentLedger, Resident, Room,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut ledger = RentLedger::new(MemoryStore::new(), LedgerConfig::default())?;

    // one twin-sharing room at 5,000 a month
    let room = ledger.add_room(Room::new("101", 2, Money::from_major(5_000)))?;
    let joined = NaiveDate::from_ymd_opt(2024, 1, 1).ok_or("bad date")?;
    let resident = ledger.add_resident(Resident::active(
        "Asha",
        "9000000001",
        room.id,
        joined,
        rent_ledger_rs::chrono::Utc::now(),
    ))?;

    // pay march rent
    let march = rent_ledger_rs::Period::new(2024, 3)?;
    let payment = ledger.record_payment_now(
        resident.id,
        PaymentInput::new(Money::from_major(5_000), march, PaymentMode::Upi),
    )?;
    println!("receipt {}", payment.receipt_id);

    // january and february are still owed
    let snapshot = ledger.snapshot_for(resident.id, march)?;
    println!("{}", serde_json::to_string_pretty(&snapshot)?);

    Ok(())
}
