use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::model::{Payment, Resident, Room};
use crate::period::Period;

use super::{active_entries, ReportEntry, ReportOptions};

/// residents who have not paid the current period in full
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpcomingReport {
    pub period: Period,
    /// sorted by shortfall, largest first
    pub entries: Vec<ReportEntry>,
    pub total_shortfall: Money,
}

impl UpcomingReport {
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// list active residents whose payments for `target` fall short of the rent
pub fn build_upcoming_report(
    residents: &[Resident],
    rooms: &[Room],
    payments: &[Payment],
    target: Period,
    options: &ReportOptions,
) -> UpcomingReport {
    let mut entries: Vec<ReportEntry> =
        active_entries(residents, rooms, payments, target, options)
            .into_iter()
            .filter(|e| {
                e.snapshot.is_billable()
                    && e.snapshot.amount_paid_for_period < e.snapshot.effective_rent
            })
            .collect();

    entries.sort_by(|a, b| {
        b.snapshot
            .shortfall()
            .cmp(&a.snapshot.shortfall())
            .then_with(|| a.resident_name.cmp(&b.resident_name))
    });

    let total_shortfall: Money = entries.iter().map(|e| e.snapshot.shortfall()).sum();

    UpcomingReport {
        period: target,
        entries,
        total_shortfall,
    }
}
