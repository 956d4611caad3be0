//! Dues calculator.
//!
//! Given one resident, the room they currently occupy, and their payment
//! history, work out what they owe for a target period. Inputs are treated
//! forgivingly: a missing room, a missing discount or an empty payment list
//! degrade to zero dues instead of failing. Every call recomputes from
//! scratch; snapshots are never cached.

pub mod arrears;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::ArrearsStartPolicy;
use crate::decimal::Money;
use crate::model::{Payment, Resident, Room};
use crate::period::Period;
use crate::types::{PaymentStatus, ResidentId};

pub use arrears::{accumulate_arrears, PeriodTotals};

/// dues of one resident for one period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BillingSnapshot {
    pub resident_id: ResidentId,
    pub period: Period,
    pub effective_rent: Money,
    pub amount_paid_for_period: Money,
    pub arrears_before_period: Money,
    /// effective rent plus arrears, before subtracting this period's payments
    pub total_due: Money,
    pub status: PaymentStatus,
}

impl BillingSnapshot {
    fn not_applicable(resident_id: ResidentId, period: Period) -> Self {
        Self {
            resident_id,
            period,
            effective_rent: Money::ZERO,
            amount_paid_for_period: Money::ZERO,
            arrears_before_period: Money::ZERO,
            total_due: Money::ZERO,
            status: PaymentStatus::NotApplicable,
        }
    }

    /// false for residents without a billable room
    pub fn is_billable(&self) -> bool {
        self.status != PaymentStatus::NotApplicable
    }

    /// unpaid part of this period's rent
    pub fn shortfall(&self) -> Money {
        self.effective_rent.saturating_sub(self.amount_paid_for_period)
    }

    /// everything still owed, arrears included
    pub fn remaining_due(&self) -> Money {
        self.total_due.saturating_sub(self.amount_paid_for_period)
    }

    /// period paid in full and nothing carried over
    pub fn is_settled(&self) -> bool {
        self.amount_paid_for_period >= self.effective_rent && self.arrears_before_period.is_zero()
    }
}

/// room rent less discount, floored at zero
pub fn effective_rent(room_rent: Money, discount: Money) -> Money {
    room_rent.saturating_sub(discount)
}

/// computes billing snapshots
#[derive(Debug, Clone, Copy, Default)]
pub struct DuesCalculator {
    policy: ArrearsStartPolicy,
}

impl DuesCalculator {
    pub fn new(policy: ArrearsStartPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> ArrearsStartPolicy {
        self.policy
    }

    /// first period included in the arrears scan
    ///
    /// A resident who never moved in has no history to scan, so without a
    /// joining date only active residents fall back to the policy start.
    pub fn arrears_start(&self, resident: &Resident, target: Period) -> Period {
        match resident.joining_period() {
            Some(joined) => joined,
            None if resident.is_active() => self.policy.fallback_start(target),
            None => target,
        }
    }

    /// compute the snapshot for `resident` in `target`
    ///
    /// `payments` may contain other residents' payments; only those for the
    /// resident's current room are counted. The current rent and discount are
    /// applied to every past period as well, since rate history is not kept.
    pub fn snapshot(
        &self,
        resident: &Resident,
        room: Option<&Room>,
        payments: &[Payment],
        target: Period,
    ) -> BillingSnapshot {
        let room = match room {
            Some(room) if room.is_billable() => room,
            _ => {
                debug!(resident_id = %resident.id, period = %target, "no billable room");
                return BillingSnapshot::not_applicable(resident.id, target);
            }
        };

        let rent = effective_rent(room.rent, resident.discount());
        let totals = PeriodTotals::collect(
            payments.iter().filter(|p| p.resident_id == resident.id),
            room.id,
        );

        let start = self.arrears_start(resident, target);
        let arrears = accumulate_arrears(&totals, rent, start, target);
        let paid = totals.paid_in(target);

        let status = if rent.is_zero() {
            PaymentStatus::FullyDiscounted
        } else if paid >= rent {
            PaymentStatus::Paid
        } else if paid.is_positive() {
            PaymentStatus::PartiallyPaid
        } else {
            PaymentStatus::Unpaid
        };

        debug!(
            resident_id = %resident.id,
            period = %target,
            effective_rent = %rent,
            paid = %paid,
            arrears = %arrears,
            ?status,
            "computed billing snapshot"
        );

        BillingSnapshot {
            resident_id: resident.id,
            period: target,
            effective_rent: rent,
            amount_paid_for_period: paid,
            arrears_before_period: arrears,
            total_due: rent + arrears,
            status,
        }
    }
}

/// compute a snapshot with the default arrears policy
pub fn compute_snapshot(
    resident: &Resident,
    room: Option<&Room>,
    payments: &[Payment],
    target: Period,
) -> BillingSnapshot {
    DuesCalculator::default().snapshot(resident, room, payments, target)
}
