use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use ulid::Ulid;

/// Minutes since midnight — the only time-of-day type.
pub type Minute = u16;

/// Half-open interval `[start, end)` in minutes of a single day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub start: Minute,
    pub end: Minute,
}

impl Span {
    pub fn new(start: Minute, end: Minute) -> Self {
        debug_assert!(start < end, "Span start must be before end");
        Self { start, end }
    }

    /// Build a span from `HH:MM` components. Convenience for fixtures.
    pub fn hm(start_h: u16, start_m: u16, end_h: u16, end_m: u16) -> Self {
        Self::new(start_h * 60 + start_m, end_h * 60 + end_m)
    }

    pub fn duration_min(&self) -> Minute {
        self.end - self.start
    }

    /// Touching endpoints do not overlap.
    pub fn overlaps(&self, other: &Span) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Returns true if `self` lies fully within `window` (inclusive bounds).
    pub fn within(&self, window: &Span) -> bool {
        window.start <= self.start && self.end <= window.end
    }
}

impl std::fmt::Display for Span {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:02}:{:02}-{:02}:{:02}",
            self.start / 60,
            self.start % 60,
            self.end / 60,
            self.end % 60
        )
    }
}

/// Weekday as 0..6 with Sunday = 0.
pub fn weekday_index(date: NaiveDate) -> u8 {
    date.weekday().num_days_from_sunday() as u8
}

/// The Sunday-to-Saturday window containing `date`.
pub fn week_of(date: NaiveDate) -> (NaiveDate, NaiveDate) {
    let start = date - Duration::days(date.weekday().num_days_from_sunday() as i64);
    (start, start + Duration::days(6))
}

/// Set of weekdays (0 = Sunday .. 6 = Saturday) as a bitmask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekdaySet(u8);

impl WeekdaySet {
    pub const EMPTY: WeekdaySet = WeekdaySet(0);

    pub fn contains(&self, weekday: u8) -> bool {
        debug_assert!(weekday <= 6, "weekday out of range");
        self.0 & (1 << weekday) != 0
    }

    pub fn insert(&mut self, weekday: u8) {
        debug_assert!(weekday <= 6, "weekday out of range");
        self.0 |= 1 << weekday;
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }
}

impl FromIterator<u8> for WeekdaySet {
    fn from_iter<I: IntoIterator<Item = u8>>(iter: I) -> Self {
        let mut set = WeekdaySet::EMPTY;
        for d in iter {
            set.insert(d);
        }
        set
    }
}

/// Weekly bookable window: one daily span, active on a set of weekdays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkingHours {
    pub window: Span,
    pub days: WeekdaySet,
}

impl WorkingHours {
    pub fn new(window: Span, days: WeekdaySet) -> Self {
        Self { window, days }
    }

    /// The bookable window on `date`, or None if the weekday is off.
    pub fn window_on(&self, date: NaiveDate) -> Option<Span> {
        if self.days.contains(weekday_index(date)) {
            Some(self.window)
        } else {
            None
        }
    }
}

// ── Directory records ────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Professional {
    pub id: Ulid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub specialties: Vec<String>,
    pub hours: WorkingHours,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Service {
    pub id: Ulid,
    pub name: String,
    /// Minutes, always > 0 (enforced by the directory).
    pub duration_min: Minute,
    /// Integer cents, never negative.
    pub price_cents: i64,
    pub category: String,
    /// Professionals qualified to perform this service. Never empty.
    pub professional_ids: Vec<Ulid>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    pub id: Ulid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub notes: Option<String>,
    pub created_at: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: Ulid,
    pub name: String,
    pub category: String,
    pub current_stock: u32,
    pub min_stock: u32,
    pub unit: String,
    pub price_cents: i64,
    pub supplier: Option<String>,
}

// ── Appointments ─────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AppointmentStatus {
    Scheduled,
    Confirmed,
    Completed,
    Cancelled,
    NoShow,
}

impl AppointmentStatus {
    /// Occupying statuses block the time slot.
    pub fn occupies(&self) -> bool {
        matches!(
            self,
            AppointmentStatus::Scheduled
                | AppointmentStatus::Confirmed
                | AppointmentStatus::Completed
        )
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            AppointmentStatus::Completed
                | AppointmentStatus::Cancelled
                | AppointmentStatus::NoShow
        )
    }

    /// Legal lifecycle moves. Everything else is rejected, including
    /// completing an appointment that was never confirmed.
    pub fn can_transition_to(&self, target: AppointmentStatus) -> bool {
        use AppointmentStatus::*;
        matches!(
            (self, target),
            (Scheduled, Confirmed)
                | (Scheduled, Cancelled)
                | (Scheduled, NoShow)
                | (Confirmed, Completed)
                | (Confirmed, Cancelled)
                | (Confirmed, NoShow)
        )
    }
}

impl std::fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            AppointmentStatus::Scheduled => "scheduled",
            AppointmentStatus::Confirmed => "confirmed",
            AppointmentStatus::Completed => "completed",
            AppointmentStatus::Cancelled => "cancelled",
            AppointmentStatus::NoShow => "no-show",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: Ulid,
    pub client_id: Ulid,
    pub professional_id: Ulid,
    pub service_id: Ulid,
    pub date: NaiveDate,
    pub span: Span,
    pub status: AppointmentStatus,
    /// Price captured when the appointment was booked; later service price
    /// changes never rewrite it.
    pub price_cents: i64,
    pub notes: Option<String>,
}

/// One professional's appointment book. Appointments are kept sorted by
/// `(date, span.start)`; equal starts preserve insertion order, which keeps
/// availability deterministic for identical inputs. Appointments are never
/// removed, only transitioned to a terminal status.
#[derive(Debug, Clone)]
pub struct Calendar {
    pub professional_id: Ulid,
    appointments: Vec<Appointment>,
}

impl Calendar {
    pub fn new(professional_id: Ulid) -> Self {
        Self {
            professional_id,
            appointments: Vec::new(),
        }
    }

    /// Insert keeping sort order; ties on `(date, start)` go after existing
    /// entries so stored order is insertion order.
    pub fn insert(&mut self, appointment: Appointment) {
        let key = (appointment.date, appointment.span.start);
        let pos = self
            .appointments
            .partition_point(|a| (a.date, a.span.start) <= key);
        self.appointments.insert(pos, appointment);
    }

    pub fn get(&self, id: &Ulid) -> Option<&Appointment> {
        self.appointments.iter().find(|a| a.id == *id)
    }

    pub fn get_mut(&mut self, id: &Ulid) -> Option<&mut Appointment> {
        self.appointments.iter_mut().find(|a| a.id == *id)
    }

    /// Occupying appointments on `date`, in stored order.
    pub fn occupying_on(&self, date: NaiveDate) -> impl Iterator<Item = &Appointment> {
        self.appointments
            .iter()
            .filter(move |a| a.date == date && a.status.occupies())
    }

    pub fn appointments(&self) -> &[Appointment] {
        &self.appointments
    }
}

/// Emitted by the store on every committed mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppointmentEvent {
    Booked(Appointment),
    Transitioned {
        id: Ulid,
        professional_id: Ulid,
        from: AppointmentStatus,
        to: AppointmentStatus,
    },
}
