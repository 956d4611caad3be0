pub mod config;
pub mod decimal;
pub mod dues;
pub mod errors;
pub mod events;
pub mod ledger;
pub mod model;
pub mod payments;
pub mod period;
pub mod reports;
pub mod store;
pub mod types;

// re-export key types
pub use config::{ArrearsStartPolicy, LedgerConfig};
pub use decimal::Money;
pub use dues::{compute_snapshot, effective_rent, BillingSnapshot, DuesCalculator};
pub use errors::{LedgerError, RejectionReason, Result};
pub use events::{Event, EventStore};
pub use ledger::RentLedger;
pub use model::{
    occupancy, occupancy_by_room, ActivityLogEntry, Payment, Resident, Room, RoomOccupancy,
};
pub use payments::recorder::record_payment;
pub use payments::{PaymentInput, PaymentRecorder};
pub use period::{compare_periods, months_in_period_range, periods_before, Period, PeriodRange};
pub use reports::{
    build_overdue_report, build_period_ledger, build_upcoming_report, LedgerTotals, OverdueReport,
    PeriodLedger, ReportEntry, ReportOptions, UpcomingReport,
};
pub use store::{Collection, LedgerSnapshot, MemoryStore, RecordStore};
pub use types::{
    ActivityKind, LedgerTab, PaymentId, PaymentMode, PaymentStatus, ResidentId, ResidentStatus,
    RoomId,
};

// re-export external dependencies that users will need
pub use chrono;
pub use hourglass_rs::{SafeTimeProvider, TimeSource};
pub use rust_decimal::Decimal;
pub use uuid::Uuid;
