use ulid::Ulid;

use crate::model::{AppointmentStatus, Span};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// Unknown id reference (professional, service, client, or appointment).
    NotFound(Ulid),
    InactiveProfessional(Ulid),
    UnqualifiedService { professional: Ulid, service: Ulid },
    OutsideWorkingDay { weekday: u8 },
    OutsideWorkingHours { requested: Span, window: Span },
    /// Requested slot overlaps an occupying appointment (validation time).
    Overlap(Ulid),
    InvalidTransition {
        from: AppointmentStatus,
        to: AppointmentStatus,
    },
    /// The slot was taken between validation and commit.
    Conflict(Ulid),
    /// A directory record violates a registry invariant.
    InvalidRecord(&'static str),
}

impl std::fmt::Display for EngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EngineError::NotFound(id) => write!(f, "not found: {id}"),
            EngineError::InactiveProfessional(id) => {
                write!(f, "professional is inactive: {id}")
            }
            EngineError::UnqualifiedService { professional, service } => {
                write!(f, "professional {professional} is not qualified for service {service}")
            }
            EngineError::OutsideWorkingDay { weekday } => {
                write!(f, "professional does not work on weekday {weekday}")
            }
            EngineError::OutsideWorkingHours { requested, window } => {
                write!(f, "requested {requested} is outside working window {window}")
            }
            EngineError::Overlap(id) => write!(f, "overlaps appointment: {id}"),
            EngineError::InvalidTransition { from, to } => {
                write!(f, "invalid status transition: {from} -> {to}")
            }
            EngineError::Conflict(id) => {
                write!(f, "slot taken by appointment {id} between validation and commit")
            }
            EngineError::InvalidRecord(msg) => write!(f, "invalid record: {msg}"),
        }
    }
}

impl std::error::Error for EngineError {}
