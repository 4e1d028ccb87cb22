mod availability;
mod conflict;
mod error;
mod mutations;
mod queries;

pub use availability::{DayAvailability, free_within, merge_spans, subtract_spans};
pub use conflict::{BookingRequest, ValidatedDraft};
pub use error::EngineError;
pub use queries::{AppointmentFilter, DateFilter, Sort};

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::RwLock;
use ulid::Ulid;

use crate::directory::Directory;
use crate::model::{AppointmentEvent, Calendar};
use crate::notify::NotifyHub;

pub type SharedCalendar = Arc<RwLock<Calendar>>;

/// The appointment store and scheduling core.
///
/// One `RwLock<Calendar>` per professional: reads (validation, availability,
/// queries) run concurrently, while every mutation of one professional's
/// book goes through that calendar's write lock. That exclusion is what
/// makes the no-double-booking invariant checkable-then-enforceable; no
/// operation ever holds more than one calendar lock.
pub struct Engine {
    calendars: DashMap<Ulid, SharedCalendar>,
    /// Reverse lookup: appointment id → professional id.
    appointment_index: DashMap<Ulid, Ulid>,
    directory: Arc<Directory>,
    notify: Arc<NotifyHub>,
}

impl Engine {
    pub fn new(directory: Arc<Directory>, notify: Arc<NotifyHub>) -> Self {
        Self {
            calendars: DashMap::new(),
            appointment_index: DashMap::new(),
            directory,
            notify,
        }
    }

    pub fn directory(&self) -> &Directory {
        &self.directory
    }

    /// The calendar for a professional, created on first use. Callers must
    /// have resolved the professional through the directory first.
    pub(super) fn calendar(&self, professional_id: Ulid) -> SharedCalendar {
        self.calendars
            .entry(professional_id)
            .or_insert_with(|| Arc::new(RwLock::new(Calendar::new(professional_id))))
            .value()
            .clone()
    }

    pub(super) fn calendar_if_exists(&self, professional_id: &Ulid) -> Option<SharedCalendar> {
        self.calendars.get(professional_id).map(|e| e.value().clone())
    }

    pub(super) fn calendars(&self) -> Vec<SharedCalendar> {
        self.calendars.iter().map(|e| e.value().clone()).collect()
    }

    pub(super) fn professional_for_appointment(&self, appointment_id: &Ulid) -> Option<Ulid> {
        self.appointment_index.get(appointment_id).map(|e| *e.value())
    }

    pub(super) fn index_appointment(&self, appointment_id: Ulid, professional_id: Ulid) {
        self.appointment_index.insert(appointment_id, professional_id);
    }

    /// Lookup appointment → professional and take that calendar's write lock.
    pub(super) async fn resolve_appointment_write(
        &self,
        appointment_id: &Ulid,
    ) -> Result<(Ulid, tokio::sync::OwnedRwLockWriteGuard<Calendar>), EngineError> {
        let professional_id = self
            .professional_for_appointment(appointment_id)
            .ok_or(EngineError::NotFound(*appointment_id))?;
        let cal = self
            .calendar_if_exists(&professional_id)
            .ok_or(EngineError::NotFound(professional_id))?;
        let guard = cal.write_owned().await;
        Ok((professional_id, guard))
    }

    pub(super) fn emit(&self, professional_id: Ulid, event: &AppointmentEvent) {
        self.notify.send(professional_id, event);
    }
}
