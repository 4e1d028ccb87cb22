use tracing::info;
use ulid::Ulid;

use crate::model::{Appointment, AppointmentEvent, AppointmentStatus};
use crate::observability;

use super::conflict::{ValidatedDraft, first_overlap};
use super::{Engine, EngineError};

impl Engine {
    /// Commit a validated draft. The overlap check reruns against the
    /// current calendar under the professional's write lock, so a booking
    /// that raced past validation loses here with `Conflict` instead of
    /// double-booking. The price is snapshotted from the service at this
    /// instant; later repricing never rewrites committed appointments.
    pub async fn create_appointment(
        &self,
        draft: ValidatedDraft,
    ) -> Result<Appointment, EngineError> {
        let cal = self.calendar(draft.professional_id);
        let mut guard = cal.write().await;

        if let Some(existing) = first_overlap(&guard, draft.date, &draft.span) {
            metrics::counter!(observability::BOOKING_CONFLICTS_TOTAL).increment(1);
            return Err(EngineError::Conflict(existing));
        }

        let service = self
            .directory()
            .service(&draft.service_id)
            .ok_or(EngineError::NotFound(draft.service_id))?;

        let appointment = Appointment {
            id: Ulid::new(),
            client_id: draft.client_id,
            professional_id: draft.professional_id,
            service_id: draft.service_id,
            date: draft.date,
            span: draft.span,
            status: AppointmentStatus::Scheduled,
            price_cents: service.price_cents,
            notes: draft.notes,
        };
        guard.insert(appointment.clone());
        self.index_appointment(appointment.id, draft.professional_id);
        drop(guard);

        info!(id = %appointment.id, professional = %appointment.professional_id,
              date = %appointment.date, span = %appointment.span, "appointment booked");
        metrics::counter!(observability::BOOKINGS_TOTAL).increment(1);
        self.emit(
            appointment.professional_id,
            &AppointmentEvent::Booked(appointment.clone()),
        );
        Ok(appointment)
    }

    /// Apply a lifecycle transition. Only legal state-machine moves pass;
    /// everything else fails with `InvalidTransition`. Appointments are
    /// never deleted — cancel-and-recreate is the only way to "edit" time,
    /// professional, or service, preserving history for reporting.
    pub async fn transition_appointment(
        &self,
        appointment_id: Ulid,
        target: AppointmentStatus,
    ) -> Result<Appointment, EngineError> {
        let (professional_id, mut guard) = self.resolve_appointment_write(&appointment_id).await?;
        let appointment = guard
            .get_mut(&appointment_id)
            .ok_or(EngineError::NotFound(appointment_id))?;

        let from = appointment.status;
        if !from.can_transition_to(target) {
            return Err(EngineError::InvalidTransition { from, to: target });
        }
        appointment.status = target;
        let updated = appointment.clone();
        drop(guard);

        info!(id = %appointment_id, %from, to = %target, "appointment transitioned");
        metrics::counter!(observability::TRANSITIONS_TOTAL).increment(1);
        self.emit(
            professional_id,
            &AppointmentEvent::Transitioned {
                id: appointment_id,
                professional_id,
                from,
                to: target,
            },
        );
        Ok(updated)
    }

    /// Notes are the only field besides status that may change after
    /// creation.
    pub async fn update_notes(
        &self,
        appointment_id: Ulid,
        notes: Option<String>,
    ) -> Result<Appointment, EngineError> {
        let (_, mut guard) = self.resolve_appointment_write(&appointment_id).await?;
        let appointment = guard
            .get_mut(&appointment_id)
            .ok_or(EngineError::NotFound(appointment_id))?;
        appointment.notes = notes;
        Ok(appointment.clone())
    }
}
