use hourglass_rs::SafeTimeProvider;
use tracing::{info, warn};

use crate::config::LedgerConfig;
use crate::dues::{BillingSnapshot, DuesCalculator};
use crate::errors::{LedgerError, Result};
use crate::events::{Event, EventStore};
use crate::model::{occupancy, Payment, Resident, Room, RoomOccupancy};
use crate::payments::{PaymentInput, PaymentRecorder};
use crate::period::Period;
use crate::reports::{
    build_overdue_report, build_period_ledger, build_upcoming_report, OverdueReport, PeriodLedger,
    ReportOptions, UpcomingReport,
};
use crate::store::{Collection, LedgerSnapshot, RecordStore};
use crate::types::{ResidentId, RoomId};

/// rent ledger over an injected record store
///
/// Every operation loads a fresh [`LedgerSnapshot`] first; writes replace the
/// affected collection in one call and store errors are returned unchanged.
pub struct RentLedger<S: RecordStore> {
    store: S,
    config: LedgerConfig,
    events: EventStore,
}

impl<S: RecordStore> RentLedger<S> {
    pub fn new(store: S, config: LedgerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            store,
            config,
            events: EventStore::new(),
        })
    }

    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    pub fn events(&self) -> &[Event] {
        self.events.events()
    }

    pub fn take_events(&mut self) -> Vec<Event> {
        self.events.take_events()
    }

    /// billing period containing the provider's current time
    pub fn current_period(time_provider: &SafeTimeProvider) -> Period {
        Period::from_date(time_provider.now().date_naive())
    }

    fn report_options(&self) -> ReportOptions {
        ReportOptions::from(&self.config)
    }

    fn calculator(&self) -> DuesCalculator {
        DuesCalculator::new(self.config.arrears_start)
    }

    /// the room a resident occupies, if it still exists
    fn room_of<'a>(snapshot: &'a LedgerSnapshot, resident: &Resident) -> Option<&'a Room> {
        let room_id = resident.room_id?;
        let room = snapshot.room(room_id);
        if room.is_none() {
            warn!(resident_id = %resident.id, %room_id, "resident references a missing room");
        }
        room
    }

    /// add a room to the rooms collection
    pub fn add_room(&mut self, room: Room) -> Result<Room> {
        let mut rooms: Vec<Room> = self.store.load_all(Collection::Rooms)?;
        rooms.push(room.clone());
        self.store.save_all(Collection::Rooms, &rooms)?;
        Ok(room)
    }

    /// add a resident to the residents collection
    pub fn add_resident(&mut self, resident: Resident) -> Result<Resident> {
        resident.validate()?;
        let mut residents: Vec<Resident> = self.store.load_all(Collection::Residents)?;
        residents.push(resident.clone());
        self.store.save_all(Collection::Residents, &residents)?;
        Ok(resident)
    }

    /// billing snapshot of one resident
    pub fn snapshot_for(&self, resident_id: ResidentId, period: Period) -> Result<BillingSnapshot> {
        let snapshot = LedgerSnapshot::load(&self.store)?;
        let resident = snapshot.resident(resident_id)?;
        let room = Self::room_of(&snapshot, resident);
        Ok(self.calculator().snapshot(resident, room, &snapshot.payments, period))
    }

    pub fn overdue_report(&self, period: Period) -> Result<OverdueReport> {
        let s = LedgerSnapshot::load(&self.store)?;
        let options = self.report_options();
        Ok(build_overdue_report(&s.residents, &s.rooms, &s.payments, period, &options))
    }

    pub fn upcoming_report(&self, period: Period) -> Result<UpcomingReport> {
        let s = LedgerSnapshot::load(&self.store)?;
        let options = self.report_options();
        Ok(build_upcoming_report(&s.residents, &s.rooms, &s.payments, period, &options))
    }

    pub fn period_ledger(&self, period: Period) -> Result<PeriodLedger> {
        let s = LedgerSnapshot::load(&self.store)?;
        let options = self.report_options();
        Ok(build_period_ledger(&s.residents, &s.rooms, &s.payments, period, &options))
    }

    /// occupancy of every room, derived from current assignments
    pub fn occupancy(&self) -> Result<Vec<RoomOccupancy>> {
        let s = LedgerSnapshot::load(&self.store)?;
        Ok(s.rooms.iter().map(|room| occupancy(room, &s.residents)).collect())
    }

    /// record a payment for a resident
    pub fn record_payment(
        &mut self,
        resident_id: ResidentId,
        input: PaymentInput,
        time_provider: &SafeTimeProvider,
    ) -> Result<Payment> {
        // malformed input fails before anything is read
        input.validate(&self.config)?;

        let snapshot = LedgerSnapshot::load(&self.store)?;
        let resident = snapshot.resident(resident_id)?;
        let room = Self::room_of(&snapshot, resident);

        let mut payments = snapshot.payments.clone();
        let recorder = PaymentRecorder::new(self.config.clone());
        let payment = recorder.record(
            resident,
            room,
            &mut payments,
            input,
            time_provider,
            &mut self.events,
        )?;

        self.store.save_all(Collection::Payments, &payments)?;
        Ok(payment)
    }

    /// record a payment stamped with system time
    pub fn record_payment_now(
        &mut self,
        resident_id: ResidentId,
        input: PaymentInput,
    ) -> Result<Payment> {
        let time = SafeTimeProvider::new(hourglass_rs::TimeSource::System);
        self.record_payment(resident_id, input, &time)
    }

    /// assign a resident to a room with free capacity
    pub fn assign_room(
        &mut self,
        resident_id: ResidentId,
        room_id: RoomId,
        time_provider: &SafeTimeProvider,
    ) -> Result<Resident> {
        let mut snapshot = LedgerSnapshot::load(&self.store)?;
        let room = snapshot
            .room(room_id)
            .cloned()
            .ok_or(LedgerError::RoomNotFound { id: room_id })?;
        let occ = occupancy(&room, &snapshot.residents);
        let now = time_provider.now();

        let resident = Self::resident_mut(&mut snapshot.residents, resident_id)?;
        let previous_room = resident.room_id;
        resident.assign_room(&room, &occ, now)?;
        let updated = resident.clone();

        self.store.save_all(Collection::Residents, &snapshot.residents)?;
        if previous_room != Some(room_id) {
            self.events.emit(Event::RoomAssigned {
                resident_id,
                previous_room,
                room_id,
                timestamp: now,
            });
        }
        Ok(updated)
    }

    /// move an upcoming resident in
    pub fn activate_resident(
        &mut self,
        resident_id: ResidentId,
        time_provider: &SafeTimeProvider,
    ) -> Result<Resident> {
        let mut snapshot = LedgerSnapshot::load(&self.store)?;
        let now = time_provider.now();

        let resident = Self::resident_mut(&mut snapshot.residents, resident_id)?;
        resident.activate(now)?;
        let updated = resident.clone();

        self.store.save_all(Collection::Residents, &snapshot.residents)?;
        if let Some(room_id) = updated.room_id {
            self.events.emit(Event::ResidentActivated {
                resident_id,
                room_id,
                timestamp: now,
            });
        }
        Ok(updated)
    }

    /// move a resident out once their arrears are cleared
    pub fn vacate_resident(
        &mut self,
        resident_id: ResidentId,
        time_provider: &SafeTimeProvider,
    ) -> Result<Resident> {
        let mut snapshot = LedgerSnapshot::load(&self.store)?;
        let period = Self::current_period(time_provider);
        let now = time_provider.now();

        let arrears = {
            let resident = snapshot.resident(resident_id)?;
            let room = Self::room_of(&snapshot, resident);
            self.calculator()
                .snapshot(resident, room, &snapshot.payments, period)
                .arrears_before_period
        };

        let resident = Self::resident_mut(&mut snapshot.residents, resident_id)?;
        if let Err(err) = resident.vacate(arrears, now) {
            warn!(%resident_id, %arrears, "vacate refused");
            return Err(err);
        }
        let updated = resident.clone();

        self.store.save_all(Collection::Residents, &snapshot.residents)?;
        info!(%resident_id, %period, "resident record closed");
        self.events.emit(Event::ResidentVacated {
            resident_id,
            timestamp: now,
        });
        Ok(updated)
    }

    fn resident_mut(residents: &mut [Resident], id: ResidentId) -> Result<&mut Resident> {
        residents
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(LedgerError::ResidentNotFound { id })
    }
}
