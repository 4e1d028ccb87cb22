use chrono::NaiveDate;
use tracing::debug;
use ulid::Ulid;

use crate::model::{Calendar, Minute, Span, weekday_index};
use crate::observability;

use super::{Engine, EngineError};

/// A booking candidate as the caller states it. The end time is derived
/// from the service duration, never supplied.
#[derive(Debug, Clone)]
pub struct BookingRequest {
    pub client_id: Ulid,
    pub professional_id: Ulid,
    pub service_id: Ulid,
    pub date: NaiveDate,
    pub start: Minute,
    pub notes: Option<String>,
}

/// A booking that has passed validation but is not yet committed. Only the
/// validator constructs these; `create_appointment` is the only consumer.
#[derive(Debug, Clone)]
pub struct ValidatedDraft {
    pub(super) client_id: Ulid,
    pub(super) professional_id: Ulid,
    pub(super) service_id: Ulid,
    pub(super) date: NaiveDate,
    pub(super) span: Span,
    pub(super) notes: Option<String>,
}

impl ValidatedDraft {
    pub fn professional_id(&self) -> Ulid {
        self.professional_id
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn span(&self) -> Span {
        self.span
    }
}

/// The first occupying appointment on `date` that overlaps `span`, if any.
pub(super) fn first_overlap(cal: &Calendar, date: NaiveDate, span: &Span) -> Option<Ulid> {
    cal.occupying_on(date)
        .find(|a| a.span.overlaps(span))
        .map(|a| a.id)
}

impl Engine {
    /// Run the full admission pipeline without mutating anything, so the
    /// same call serves pre-flight UI checks and the booking path. Checks
    /// run in a fixed order and stop at the first failure:
    /// professional exists/active, qualification, weekday, working window,
    /// overlap against occupying appointments.
    pub async fn validate_booking(
        &self,
        request: BookingRequest,
    ) -> Result<ValidatedDraft, EngineError> {
        let result = self.admit(&request).await;
        if let Err(e) = &result {
            debug!(professional = %request.professional_id, date = %request.date, error = %e, "booking rejected");
            metrics::counter!(observability::VALIDATION_FAILURES_TOTAL).increment(1);
        }
        result
    }

    async fn admit(&self, request: &BookingRequest) -> Result<ValidatedDraft, EngineError> {
        let professional = self
            .directory()
            .professional(&request.professional_id)
            .ok_or(EngineError::NotFound(request.professional_id))?;
        if !professional.active {
            return Err(EngineError::InactiveProfessional(professional.id));
        }

        let service = self
            .directory()
            .service(&request.service_id)
            .ok_or(EngineError::NotFound(request.service_id))?;
        if !service.professional_ids.contains(&professional.id) {
            return Err(EngineError::UnqualifiedService {
                professional: professional.id,
                service: service.id,
            });
        }

        self.directory()
            .client(&request.client_id)
            .ok_or(EngineError::NotFound(request.client_id))?;

        let weekday = weekday_index(request.date);
        let Some(window) = professional.hours.window_on(request.date) else {
            return Err(EngineError::OutsideWorkingDay { weekday });
        };

        // Saturating add: a nonsense start/duration pair lands outside the
        // window and is rejected instead of wrapping the minute arithmetic.
        let span = Span::new(
            request.start,
            request.start.saturating_add(service.duration_min),
        );
        if !span.within(&window) {
            return Err(EngineError::OutsideWorkingHours {
                requested: span,
                window,
            });
        }

        let cal = self.calendar(request.professional_id);
        let guard = cal.read().await;
        if let Some(existing) = first_overlap(&guard, request.date, &span) {
            return Err(EngineError::Overlap(existing));
        }

        Ok(ValidatedDraft {
            client_id: request.client_id,
            professional_id: request.professional_id,
            service_id: request.service_id,
            date: request.date,
            span,
            notes: request.notes.clone(),
        })
    }
}
