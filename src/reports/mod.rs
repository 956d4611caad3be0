//! Billing reports built on top of the dues calculator.
//!
//! Each report calls [`DuesCalculator::snapshot`] once per resident for the
//! requested period and shapes the results for one view:
//!
//! - [`build_overdue_report`]: residents carrying arrears from earlier months
//! - [`build_upcoming_report`]: residents who have not yet paid the current
//!   period in full (the "upcoming" name is historical; this is a
//!   current-period shortfall view, not a projection)
//! - [`build_period_ledger`]: the full monthly statement with totals
//!
//! Only active residents are considered. Residents without a billable room
//! are left out of the first two views entirely.

pub mod ledger;
pub mod overdue;
pub mod upcoming;

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::config::{ArrearsStartPolicy, LedgerConfig};
use crate::dues::{BillingSnapshot, DuesCalculator};
use crate::model::{Payment, Resident, Room};
use crate::period::Period;
use crate::types::{ResidentId, RoomId};

pub use ledger::{build_period_ledger, LedgerTotals, PeriodLedger};
pub use overdue::{build_overdue_report, OverdueReport};
pub use upcoming::{build_upcoming_report, UpcomingReport};

/// knobs shared by every report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportOptions {
    pub arrears_start: ArrearsStartPolicy,
    /// list residents without a billable room on the ledger as N/A rows
    pub include_unbilled: bool,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            arrears_start: ArrearsStartPolicy::default(),
            include_unbilled: true,
        }
    }
}

impl From<&LedgerConfig> for ReportOptions {
    fn from(config: &LedgerConfig) -> Self {
        Self {
            arrears_start: config.arrears_start,
            include_unbilled: config.include_unbilled_in_ledger,
        }
    }
}

/// one resident's row in a report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportEntry {
    pub resident_id: ResidentId,
    pub resident_name: String,
    pub room_number: Option<String>,
    pub snapshot: BillingSnapshot,
}

/// snapshot every active resident for `target`
fn active_entries(
    residents: &[Resident],
    rooms: &[Room],
    payments: &[Payment],
    target: Period,
    options: &ReportOptions,
) -> Vec<ReportEntry> {
    let calculator = DuesCalculator::new(options.arrears_start);
    let rooms_by_id: HashMap<RoomId, &Room> = rooms.iter().map(|r| (r.id, r)).collect();

    let mut by_resident: HashMap<ResidentId, Vec<Payment>> = HashMap::new();
    for payment in payments {
        by_resident
            .entry(payment.resident_id)
            .or_default()
            .push(payment.clone());
    }

    residents
        .iter()
        .filter(|resident| resident.is_active())
        .map(|resident| {
            let room = resident
                .room_id
                .and_then(|id| rooms_by_id.get(&id).copied());
            let history = by_resident
                .get(&resident.id)
                .map(Vec::as_slice)
                .unwrap_or(&[]);

            ReportEntry {
                resident_id: resident.id,
                resident_name: resident.name.clone(),
                room_number: room.map(|r| r.room_number.clone()),
                snapshot: calculator.snapshot(resident, room, history, target),
            }
        })
        .collect()
}
