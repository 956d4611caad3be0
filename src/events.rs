use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::errors::RejectionReason;
use crate::period::Period;
use crate::types::{PaymentId, ResidentId, RoomId};

/// all events that can be emitted by the ledger
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    // payment events
    PaymentRecorded {
        resident_id: ResidentId,
        payment_id: PaymentId,
        receipt_id: String,
        amount: Money,
        period: Period,
        timestamp: DateTime<Utc>,
    },
    PaymentRejected {
        resident_id: ResidentId,
        period: Period,
        reason: RejectionReason,
        timestamp: DateTime<Utc>,
    },

    // resident lifecycle events
    RoomAssigned {
        resident_id: ResidentId,
        previous_room: Option<RoomId>,
        room_id: RoomId,
        timestamp: DateTime<Utc>,
    },
    ResidentActivated {
        resident_id: ResidentId,
        room_id: RoomId,
        timestamp: DateTime<Utc>,
    },
    ResidentVacated {
        resident_id: ResidentId,
        timestamp: DateTime<Utc>,
    },
}

/// event store for collecting events during operations
#[derive(Debug, Default)]
pub struct EventStore {
    events: Vec<Event>,
}

impl EventStore {
    pub fn new() -> Self {
        Self {
            events: Vec::new(),
        }
    }

    pub fn emit(&mut self, event: Event) {
        self.events.push(event);
    }

    pub fn take_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }
}
