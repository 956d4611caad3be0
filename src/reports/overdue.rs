use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::model::{Payment, Resident, Room};
use crate::period::Period;

use super::{active_entries, ReportEntry, ReportOptions};

/// residents carrying arrears into a period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverdueReport {
    pub period: Period,
    /// sorted by arrears, largest first
    pub entries: Vec<ReportEntry>,
    pub total_arrears: Money,
}

impl OverdueReport {
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// list active residents with arrears before `target`
pub fn build_overdue_report(
    residents: &[Resident],
    rooms: &[Room],
    payments: &[Payment],
    target: Period,
    options: &ReportOptions,
) -> OverdueReport {
    let mut entries: Vec<ReportEntry> = active_entries(residents, rooms, payments, target, options)
        .into_iter()
        .filter(|e| e.snapshot.is_billable() && e.snapshot.arrears_before_period.is_positive())
        .collect();

    entries.sort_by(|a, b| {
        b.snapshot
            .arrears_before_period
            .cmp(&a.snapshot.arrears_before_period)
            .then_with(|| a.resident_name.cmp(&b.resident_name))
    });

    let total_arrears: Money = entries.iter().map(|e| e.snapshot.arrears_before_period).sum();

    OverdueReport {
        period: target,
        entries,
        total_arrears,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::fixtures::{payment, resident};
    use crate::types::ResidentStatus;

    #[test]
    fn test_sorted_by_arrears_desc() {
        let room = Room::new("101", 3, Money::from_major(5_000));
        let one_month = resident("Asha", &room, (2024, 2));
        let two_months = resident("Bilal", &room, (2024, 1));
        let paid_up = resident("Chen", &room, (2024, 2));
        let payments = vec![payment(&paid_up, &room, 5_000, 2024, 2)];

        let report = build_overdue_report(
            &[one_month.clone(), two_months.clone(), paid_up],
            &[room],
            &payments,
            Period::new(2024, 3).unwrap(),
            &ReportOptions::default(),
        );

        let names: Vec<_> = report.entries.iter().map(|e| e.resident_name.as_str()).collect();
        assert_eq!(names, vec!["Bilal", "Asha"]);
        assert_eq!(report.total_arrears, Money::from_major(15_000));
        assert_eq!(report.entries[0].room_number.as_deref(), Some("101"));
    }

    #[test]
    fn test_excludes_roomless_and_inactive() {
        let room = Room::new("102", 3, Money::from_major(5_000));
        let mut roomless = resident("Dev", &room, (2024, 1));
        roomless.room_id = None;
        let mut former = resident("Esha", &room, (2024, 1));
        former.status = ResidentStatus::Former;
        let mut upcoming = resident("Farid", &room, (2024, 1));
        upcoming.status = ResidentStatus::Upcoming;

        let report = build_overdue_report(
            &[roomless, former, upcoming],
            &[room],
            &[],
            Period::new(2024, 3).unwrap(),
            &ReportOptions::default(),
        );

        assert!(report.entries.is_empty());
        assert_eq!(report.total_arrears, Money::ZERO);
    }

    #[test]
    fn test_report_serializes() {
        let room = Room::new("103", 1, Money::from_major(5_000));
        let late = resident("Gita", &room, (2024, 1));
        let report = build_overdue_report(
            &[late],
            &[room],
            &[],
            Period::new(2024, 2).unwrap(),
            &ReportOptions::default(),
        );
        let json = report.to_json_pretty().unwrap();
        assert!(json.contains("total_arrears"));
        let back: OverdueReport = serde_json::from_str(&json).unwrap();
        assert_eq!(back, report);
    }
}
