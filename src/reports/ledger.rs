use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::model::{Payment, Resident, Room};
use crate::period::Period;
use crate::types::LedgerTab;

use super::{active_entries, ReportEntry, ReportOptions};

/// column totals of a period ledger
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LedgerTotals {
    pub rent_sum: Money,
    pub paid_sum: Money,
    pub arrears_sum: Money,
    /// sum of each row's remaining due
    pub overall_due: Money,
}

/// full monthly statement for all active residents
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodLedger {
    pub period: Period,
    /// in resident order
    pub entries: Vec<ReportEntry>,
    pub totals: LedgerTotals,
}

impl PeriodLedger {
    /// rows belonging to a display tab
    pub fn tab(&self, tab: LedgerTab) -> Vec<&ReportEntry> {
        self.entries
            .iter()
            .filter(|e| tab.includes(e.snapshot.status))
            .collect()
    }

    /// row count per tab, in `LedgerTab::ALL_TABS` order
    pub fn tab_counts(&self) -> Vec<(LedgerTab, usize)> {
        LedgerTab::ALL_TABS
            .iter()
            .map(|tab| (*tab, self.tab(*tab).len()))
            .collect()
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// build the ledger for `target`
///
/// Residents without a billable room appear as N/A rows only when
/// `options.include_unbilled` is set; they contribute nothing to the totals.
pub fn build_period_ledger(
    residents: &[Resident],
    rooms: &[Room],
    payments: &[Payment],
    target: Period,
    options: &ReportOptions,
) -> PeriodLedger {
    let entries: Vec<ReportEntry> = active_entries(residents, rooms, payments, target, options)
        .into_iter()
        .filter(|e| options.include_unbilled || e.snapshot.is_billable())
        .collect();

    let totals = entries.iter().fold(LedgerTotals::default(), |mut acc, e| {
        acc.rent_sum += e.snapshot.effective_rent;
        acc.paid_sum += e.snapshot.amount_paid_for_period;
        acc.arrears_sum += e.snapshot.arrears_before_period;
        acc.overall_due += e.snapshot.remaining_due();
        acc
    });

    PeriodLedger {
        period: target,
        entries,
        totals,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::fixtures::{payment, resident};
    use crate::types::PaymentStatus;

    fn sample() -> (Vec<Resident>, Vec<Room>, Vec<Payment>) {
        let room = Room::new("301", 4, Money::from_major(5_000));
        let paid = resident("Asha", &room, (2024, 3));
        let partial = resident("Bilal", &room, (2024, 3));
        let behind = resident("Chen", &room, (2024, 2));
        let mut roomless = resident("Dev", &room, (2024, 3));
        roomless.room_id = None;

        let payments = vec![
            payment(&paid, &room, 5_000, 2024, 3),
            payment(&partial, &room, 1_500, 2024, 3),
        ];
        (vec![paid, partial, behind, roomless], vec![room], payments)
    }

    #[test]
    fn test_totals() {
        let (residents, rooms, payments) = sample();
        let ledger = build_period_ledger(
            &residents,
            &rooms,
            &payments,
            Period::new(2024, 3).unwrap(),
            &ReportOptions::default(),
        );

        assert_eq!(ledger.entries.len(), 4);
        assert_eq!(ledger.totals.rent_sum, Money::from_major(15_000));
        assert_eq!(ledger.totals.paid_sum, Money::from_major(6_500));
        assert_eq!(ledger.totals.arrears_sum, Money::from_major(5_000));
        // 0 + 3500 + 10000
        assert_eq!(ledger.totals.overall_due, Money::from_major(13_500));
    }

    #[test]
    fn test_unbilled_rows_follow_flag() {
        let (residents, rooms, payments) = sample();
        let target = Period::new(2024, 3).unwrap();

        let with_na =
            build_period_ledger(&residents, &rooms, &payments, target, &ReportOptions::default());
        let na_row = with_na.entries.iter().find(|e| e.resident_name == "Dev").unwrap();
        assert_eq!(na_row.snapshot.status, PaymentStatus::NotApplicable);
        assert!(na_row.room_number.is_none());

        let options = ReportOptions {
            include_unbilled: false,
            ..ReportOptions::default()
        };
        let without_na = build_period_ledger(&residents, &rooms, &payments, target, &options);
        assert_eq!(without_na.entries.len(), 3);
        assert_eq!(without_na.totals, with_na.totals);
    }

    #[test]
    fn test_tabs_are_filters() {
        let (residents, rooms, payments) = sample();
        let ledger = build_period_ledger(
            &residents,
            &rooms,
            &payments,
            Period::new(2024, 3).unwrap(),
            &ReportOptions::default(),
        );

        let names = |tab| -> Vec<String> {
            ledger.tab(tab).iter().map(|e| e.resident_name.clone()).collect()
        };
        assert_eq!(names(LedgerTab::Paid), vec!["Asha"]);
        assert_eq!(names(LedgerTab::PartiallyPaid), vec!["Bilal"]);
        assert_eq!(names(LedgerTab::Unpaid), vec!["Chen"]);
        assert_eq!(names(LedgerTab::All).len(), 4);

        assert_eq!(
            ledger.tab_counts(),
            vec![
                (LedgerTab::All, 4),
                (LedgerTab::Unpaid, 1),
                (LedgerTab::PartiallyPaid, 1),
                (LedgerTab::Paid, 1),
            ]
        );
    }
}
