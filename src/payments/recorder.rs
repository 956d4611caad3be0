use hourglass_rs::SafeTimeProvider;
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::LedgerConfig;
use crate::dues::{BillingSnapshot, DuesCalculator};
use crate::errors::{RejectionReason, Result};
use crate::events::{Event, EventStore};
use crate::model::{Payment, Resident, Room};
use crate::period::Period;

use super::PaymentInput;

/// validates and appends rent payments
#[derive(Debug, Clone)]
pub struct PaymentRecorder {
    config: LedgerConfig,
    calculator: DuesCalculator,
}

impl PaymentRecorder {
    pub fn new(config: LedgerConfig) -> Self {
        let calculator = DuesCalculator::new(config.arrears_start);
        Self { config, calculator }
    }

    /// decide whether a payment against `period` may be accepted
    ///
    /// Checks run in a fixed order: billable room first, then the settled
    /// check (which looks at arrears as well as the named period, so
    /// catch-up payments stay possible), then the fully-discounted case.
    pub fn check(
        &self,
        resident: &Resident,
        room: Option<&Room>,
        payments: &[Payment],
        period: Period,
    ) -> std::result::Result<BillingSnapshot, RejectionReason> {
        let room = match room {
            Some(room) if room.is_billable() => room,
            _ => return Err(RejectionReason::NoBillableRoom),
        };

        let snapshot = self.calculator.snapshot(resident, Some(room), payments, period);
        let no_arrears = snapshot.arrears_before_period.is_zero();

        if snapshot.effective_rent.is_positive()
            && snapshot.amount_paid_for_period >= snapshot.effective_rent
            && no_arrears
        {
            return Err(RejectionReason::AlreadySettled);
        }
        if snapshot.effective_rent.is_zero() && no_arrears {
            return Err(RejectionReason::NoPaymentNeeded);
        }
        Ok(snapshot)
    }

    /// validate `input` and append a new payment to `payments`
    ///
    /// Existing payment records are never touched.
    pub fn record(
        &self,
        resident: &Resident,
        room: Option<&Room>,
        payments: &mut Vec<Payment>,
        input: PaymentInput,
        time_provider: &SafeTimeProvider,
        events: &mut EventStore,
    ) -> Result<Payment> {
        let period = input.validate(&self.config)?;
        let now = time_provider.now();

        let room = match self.check(resident, room, payments, period) {
            Ok(_) => room.ok_or(RejectionReason::NoBillableRoom)?,
            Err(reason) => {
                warn!(resident_id = %resident.id, %period, %reason, "payment rejected");
                events.emit(Event::PaymentRejected {
                    resident_id: resident.id,
                    period,
                    reason,
                    timestamp: now,
                });
                return Err(reason.into());
            }
        };

        let id = Uuid::new_v4();
        let payment = Payment {
            id,
            resident_id: resident.id,
            room_id: room.id,
            amount: input.amount,
            month: period.month(),
            year: period.year(),
            date: now,
            mode: input.mode,
            receipt_id: self.receipt_id(id, period),
            notes: input.notes,
        };
        payments.push(payment.clone());

        info!(
            resident_id = %resident.id,
            receipt_id = %payment.receipt_id,
            amount = %payment.amount,
            %period,
            "payment recorded"
        );
        events.emit(Event::PaymentRecorded {
            resident_id: resident.id,
            payment_id: payment.id,
            receipt_id: payment.receipt_id.clone(),
            amount: payment.amount,
            period,
            timestamp: now,
        });

        Ok(payment)
    }

    fn receipt_id(&self, id: Uuid, period: Period) -> String {
        let suffix: String = id.simple().to_string().chars().take(8).collect();
        format!(
            "{}-{:04}{:02}-{}",
            self.config.receipt_prefix,
            period.year(),
            period.month(),
            suffix.to_uppercase()
        )
    }
}

/// record a payment with the default configuration
pub fn record_payment(
    resident: &Resident,
    room: Option<&Room>,
    payments: &mut Vec<Payment>,
    input: PaymentInput,
    time_provider: &SafeTimeProvider,
) -> Result<Payment> {
    let mut events = EventStore::new();
    PaymentRecorder::new(LedgerConfig::default()).record(
        resident,
        room,
        payments,
        input,
        time_provider,
        &mut events,
    )
}
