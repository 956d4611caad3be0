use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::info;
use uuid::Uuid;

use crate::decimal::Money;
use crate::errors::{LedgerError, Result};
use crate::period::Period;
use crate::types::{ActivityKind, PaymentId, PaymentMode, ResidentId, ResidentStatus, RoomId};

/// a rentable room
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    pub id: RoomId,
    pub room_number: String,
    pub capacity: u32,
    /// nominal monthly charge per resident
    pub rent: Money,
}

impl Room {
    pub fn new(room_number: impl Into<String>, capacity: u32, rent: Money) -> Self {
        Self {
            id: Uuid::new_v4(),
            room_number: room_number.into(),
            capacity,
            rent,
        }
    }

    /// rooms with no positive rent carry no dues
    pub fn is_billable(&self) -> bool {
        self.rent.is_positive()
    }
}

/// one line of a resident's history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityLogEntry {
    pub timestamp: DateTime<Utc>,
    pub kind: ActivityKind,
    pub description: String,
}

/// a person renting a bed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resident {
    pub id: ResidentId,
    pub name: String,
    pub contact: String,
    pub status: ResidentStatus,
    pub room_id: Option<RoomId>,
    pub joining_date: Option<NaiveDate>,
    pub monthly_discount_amount: Option<Money>,
    #[serde(default)]
    pub activity_log: Vec<ActivityLogEntry>,
}

impl Resident {
    /// create a resident that has not moved in yet
    pub fn upcoming(
        name: impl Into<String>,
        contact: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        let mut resident = Self {
            id: Uuid::new_v4(),
            name: name.into(),
            contact: contact.into(),
            status: ResidentStatus::Upcoming,
            room_id: None,
            joining_date: None,
            monthly_discount_amount: None,
            activity_log: Vec::new(),
        };
        resident.log(ActivityKind::Created, "resident created as upcoming", timestamp);
        resident
    }

    /// create an active resident already living in a room
    pub fn active(
        name: impl Into<String>,
        contact: impl Into<String>,
        room_id: RoomId,
        joining_date: NaiveDate,
        timestamp: DateTime<Utc>,
    ) -> Self {
        let mut resident = Self {
            id: Uuid::new_v4(),
            name: name.into(),
            contact: contact.into(),
            status: ResidentStatus::Active,
            room_id: Some(room_id),
            joining_date: Some(joining_date),
            monthly_discount_amount: None,
            activity_log: Vec::new(),
        };
        resident.log(ActivityKind::Created, "resident created as active", timestamp);
        resident
    }

    /// set the monthly discount; negative amounts are rejected
    pub fn with_discount(mut self, discount: Money) -> Result<Self> {
        self.monthly_discount_amount = Some(discount);
        self.validate()?;
        Ok(self)
    }

    /// check the fields a stored record cannot be trusted to have right
    pub fn validate(&self) -> Result<()> {
        if let Some(discount) = self.monthly_discount_amount {
            if discount.is_negative() {
                return Err(LedgerError::invalid_input(format!(
                    "discount for {} must not be negative, got {discount}",
                    self.name
                )));
            }
        }
        Ok(())
    }

    pub fn is_active(&self) -> bool {
        self.status == ResidentStatus::Active
    }

    /// monthly discount, zero when unset or negative
    pub fn discount(&self) -> Money {
        self.monthly_discount_amount
            .unwrap_or(Money::ZERO)
            .max(Money::ZERO)
    }

    /// billing period the resident joined in, if known
    pub fn joining_period(&self) -> Option<Period> {
        self.joining_date.map(Period::from_date)
    }

    /// assign (or move to) a room with free capacity
    pub fn assign_room(
        &mut self,
        room: &Room,
        occupancy: &RoomOccupancy,
        timestamp: DateTime<Utc>,
    ) -> Result<()> {
        if self.status == ResidentStatus::Former {
            return Err(LedgerError::InvalidTransition {
                action: "assign a room to".to_string(),
                status: self.status,
            });
        }
        if self.room_id == Some(room.id) {
            return Ok(());
        }
        if occupancy.vacancies() == 0 {
            return Err(LedgerError::RoomFull {
                room_number: room.room_number.clone(),
                capacity: room.capacity,
            });
        }

        self.room_id = Some(room.id);
        self.log(
            ActivityKind::RoomAssigned,
            format!("assigned to room {}", room.room_number),
            timestamp,
        );
        info!(resident_id = %self.id, room = %room.room_number, "room assigned");
        Ok(())
    }

    /// move an upcoming resident in
    pub fn activate(&mut self, timestamp: DateTime<Utc>) -> Result<()> {
        if self.status != ResidentStatus::Upcoming {
            return Err(LedgerError::InvalidTransition {
                action: "activate".to_string(),
                status: self.status,
            });
        }
        if self.room_id.is_none() {
            return Err(LedgerError::RoomAssignmentRequired);
        }

        self.status = ResidentStatus::Active;
        if self.joining_date.is_none() {
            self.joining_date = Some(timestamp.date_naive());
        }
        self.log(ActivityKind::Activated, "resident activated", timestamp);
        info!(resident_id = %self.id, "resident activated");
        Ok(())
    }

    /// move a resident out; `arrears` must already be cleared
    pub fn vacate(&mut self, arrears: Money, timestamp: DateTime<Utc>) -> Result<()> {
        if self.status == ResidentStatus::Former {
            return Err(LedgerError::InvalidTransition {
                action: "vacate".to_string(),
                status: self.status,
            });
        }
        if arrears.is_positive() {
            return Err(LedgerError::OutstandingArrears { arrears });
        }

        self.status = ResidentStatus::Former;
        self.room_id = None;
        self.log(ActivityKind::Vacated, "resident vacated", timestamp);
        info!(resident_id = %self.id, "resident vacated");
        Ok(())
    }

    fn log(
        &mut self,
        kind: ActivityKind,
        description: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) {
        self.activity_log.push(ActivityLogEntry {
            timestamp,
            kind,
            description: description.into(),
        });
    }
}

/// a rent payment attributed to one room and one billing period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    pub id: PaymentId,
    pub resident_id: ResidentId,
    pub room_id: RoomId,
    pub amount: Money,
    pub month: u32,
    pub year: i32,
    pub date: DateTime<Utc>,
    pub mode: PaymentMode,
    pub receipt_id: String,
    #[serde(default)]
    pub notes: String,
}

impl Payment {
    /// billing period the payment was made for
    pub fn period(&self) -> Result<Period> {
        Period::new(self.year, self.month)
    }
}

/// occupancy of a room, derived from the resident set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomOccupancy {
    pub room_id: RoomId,
    pub capacity: u32,
    pub occupied: u32,
}

impl RoomOccupancy {
    pub fn vacancies(&self) -> u32 {
        self.capacity.saturating_sub(self.occupied)
    }

    pub fn is_full(&self) -> bool {
        self.vacancies() == 0
    }
}

/// count the non-former residents assigned to a room
pub fn occupancy(room: &Room, residents: &[Resident]) -> RoomOccupancy {
    let occupied = residents
        .iter()
        .filter(|r| r.status != ResidentStatus::Former && r.room_id == Some(room.id))
        .count() as u32;

    RoomOccupancy {
        room_id: room.id,
        capacity: room.capacity,
        occupied,
    }
}

/// occupancy for every room
pub fn occupancy_by_room(
    rooms: &[Room],
    residents: &[Resident],
) -> HashMap<RoomId, RoomOccupancy> {
    rooms
        .iter()
        .map(|room| (room.id, occupancy(room, residents)))
        .collect()
}
