use std::collections::HashMap;
use tracing::warn;

use crate::decimal::Money;
use crate::model::Payment;
use crate::period::{months_in_period_range, Period};
use crate::types::RoomId;

/// payment totals per period for a single room
#[derive(Debug, Clone, Default)]
pub struct PeriodTotals {
    totals: HashMap<Period, Money>,
}

impl PeriodTotals {
    /// sum the payments made against `room_id`, keyed by billing period
    pub fn collect<'a>(payments: impl IntoIterator<Item = &'a Payment>, room_id: RoomId) -> Self {
        let mut totals: HashMap<Period, Money> = HashMap::new();
        for payment in payments.into_iter().filter(|p| p.room_id == room_id) {
            match payment.period() {
                Ok(period) => *totals.entry(period).or_default() += payment.amount,
                Err(_) => warn!(
                    payment_id = %payment.id,
                    month = payment.month,
                    "payment has no valid period"
                ),
            }
        }
        Self { totals }
    }

    /// total paid in `period`, zero if nothing was paid
    pub fn paid_in(&self, period: Period) -> Money {
        self.totals.get(&period).copied().unwrap_or(Money::ZERO)
    }
}

/// unmet rent over every period in `[start, target)`
///
/// Each period contributes `rent - paid` when paid falls short; surplus in
/// one period never offsets another.
pub fn accumulate_arrears(
    totals: &PeriodTotals,
    rent: Money,
    start: Period,
    target: Period,
) -> Money {
    if rent.is_zero() {
        return Money::ZERO;
    }
    months_in_period_range(start, target)
        .map(|period| rent.saturating_sub(totals.paid_in(period)))
        .sum()
}
