// Metric names for the booking write path. The crate emits through the
// `metrics` facade only; installing a recorder/exporter is the embedding
// application's call.

/// Counter: appointments committed.
pub const BOOKINGS_TOTAL: &str = "agenda_bookings_total";

/// Counter: bookings rejected during validation (any error kind).
pub const VALIDATION_FAILURES_TOTAL: &str = "agenda_validation_failures_total";

/// Counter: bookings that passed validation but lost the commit race.
pub const BOOKING_CONFLICTS_TOTAL: &str = "agenda_booking_conflicts_total";

/// Counter: status transitions applied.
pub const TRANSITIONS_TOTAL: &str = "agenda_transitions_total";
