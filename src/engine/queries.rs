use chrono::NaiveDate;
use ulid::Ulid;

use crate::model::{Appointment, AppointmentStatus, week_of};

use super::availability::{DayAvailability, free_within};
use super::{Engine, EngineError};

/// Calendar-day selection. All bounds are inclusive; dates compare by
/// value, timezone-naive (the caller decides what "today" is).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateFilter {
    #[default]
    Any,
    On(NaiveDate),
    /// The Sunday-to-Saturday week containing the reference date.
    Week(NaiveDate),
    Range { from: NaiveDate, to: NaiveDate },
}

impl DateFilter {
    fn matches(&self, date: NaiveDate) -> bool {
        match *self {
            DateFilter::Any => true,
            DateFilter::On(d) => date == d,
            DateFilter::Week(reference) => {
                let (start, end) = week_of(reference);
                start <= date && date <= end
            }
            DateFilter::Range { from, to } => from <= date && date <= to,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct AppointmentFilter {
    pub date: DateFilter,
    pub status: Option<AppointmentStatus>,
    pub professional_id: Option<Ulid>,
    pub client_id: Option<Ulid>,
    /// Case-insensitive substring match against client name, client phone,
    /// or professional name.
    pub text: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sort {
    /// `(date, start)` ascending; ties keep stored (insertion) order.
    StartTime,
}

impl Engine {
    pub async fn get_appointment(&self, id: Ulid) -> Result<Appointment, EngineError> {
        let professional_id = self
            .professional_for_appointment(&id)
            .ok_or(EngineError::NotFound(id))?;
        let cal = self
            .calendar_if_exists(&professional_id)
            .ok_or(EngineError::NotFound(id))?;
        let guard = cal.read().await;
        guard.get(&id).cloned().ok_or(EngineError::NotFound(id))
    }

    /// Read-only projection of the current snapshot. Never mutates; the
    /// result is a pure function of (snapshot, filter, sort).
    pub async fn query_appointments(
        &self,
        filter: &AppointmentFilter,
        sort: Option<Sort>,
    ) -> Vec<Appointment> {
        let needle = filter.text.as_ref().map(|t| t.to_lowercase());

        let calendars = match filter.professional_id {
            Some(pid) => self.calendar_if_exists(&pid).into_iter().collect(),
            None => self.calendars(),
        };

        let mut result = Vec::new();
        for cal in calendars {
            let guard = cal.read().await;
            for appointment in guard.appointments() {
                if self.matches(filter, needle.as_deref(), appointment) {
                    result.push(appointment.clone());
                }
            }
        }

        if let Some(Sort::StartTime) = sort {
            result.sort_by_key(|a| (a.date, a.span.start));
        }
        result
    }

    fn matches(
        &self,
        filter: &AppointmentFilter,
        needle: Option<&str>,
        appointment: &Appointment,
    ) -> bool {
        if !filter.date.matches(appointment.date) {
            return false;
        }
        if let Some(status) = filter.status
            && appointment.status != status
        {
            return false;
        }
        if let Some(client_id) = filter.client_id
            && appointment.client_id != client_id
        {
            return false;
        }
        if let Some(needle) = needle {
            let client = self.directory().client(&appointment.client_id);
            let professional = self.directory().professional(&appointment.professional_id);
            let hit = client
                .as_ref()
                .is_some_and(|c| {
                    c.name.to_lowercase().contains(needle) || c.phone.contains(needle)
                })
                || professional
                    .as_ref()
                    .is_some_and(|p| p.name.to_lowercase().contains(needle));
            if !hit {
                return false;
            }
        }
        true
    }

    /// Free intervals for one professional on one date: the working window
    /// minus occupying appointments. Idempotent for identical inputs, and
    /// an explicit `NotWorking` (not an error) when the weekday is off.
    pub async fn resolve_availability(
        &self,
        professional_id: Ulid,
        date: NaiveDate,
    ) -> Result<DayAvailability, EngineError> {
        let professional = self
            .directory()
            .professional(&professional_id)
            .ok_or(EngineError::NotFound(professional_id))?;
        if !professional.active {
            return Ok(DayAvailability::NotWorking);
        }
        let Some(window) = professional.hours.window_on(date) else {
            return Ok(DayAvailability::NotWorking);
        };

        let Some(cal) = self.calendar_if_exists(&professional_id) else {
            return Ok(DayAvailability::Open(vec![window]));
        };
        let guard = cal.read().await;
        let occupying: Vec<_> = guard.occupying_on(date).map(|a| a.span).collect();
        Ok(DayAvailability::Open(free_within(window, &occupying)))
    }
}
