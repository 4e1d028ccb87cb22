//! Derived aggregates for dashboards and reports. Every function here is a
//! pure projection over an appointment snapshot (as returned by the query
//! engine) — no side effects, callable any number of times, and kept out of
//! the store's write path.

use std::collections::HashMap;

use ulid::Ulid;

use crate::model::{Appointment, AppointmentStatus, Product};

/// Sum of price snapshots across the whole snapshot, regardless of status.
pub fn total_revenue_cents(appointments: &[Appointment]) -> i64 {
    appointments.iter().map(|a| a.price_cents).sum()
}

/// Sum of price snapshots for completed appointments only — the "revenue
/// today" figure when fed a single-day snapshot.
pub fn completed_revenue_cents(appointments: &[Appointment]) -> i64 {
    appointments
        .iter()
        .filter(|a| a.status == AppointmentStatus::Completed)
        .map(|a| a.price_cents)
        .sum()
}

pub fn count_by_status(appointments: &[Appointment]) -> HashMap<AppointmentStatus, usize> {
    let mut counts = HashMap::new();
    for a in appointments {
        *counts.entry(a.status).or_insert(0) += 1;
    }
    counts
}

pub fn revenue_by_professional(appointments: &[Appointment]) -> HashMap<Ulid, i64> {
    let mut revenue = HashMap::new();
    for a in appointments {
        *revenue.entry(a.professional_id).or_insert(0) += a.price_cents;
    }
    revenue
}

pub fn appointments_per_professional(appointments: &[Appointment]) -> HashMap<Ulid, usize> {
    let mut counts = HashMap::new();
    for a in appointments {
        *counts.entry(a.professional_id).or_insert(0) += 1;
    }
    counts
}

/// Products at or below their minimum stock level.
pub fn low_stock(products: &[Product]) -> Vec<&Product> {
    products
        .iter()
        .filter(|p| p.current_stock <= p.min_stock)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Span;
    use chrono::NaiveDate;

    fn appt(professional_id: Ulid, status: AppointmentStatus, price_cents: i64) -> Appointment {
        Appointment {
            id: Ulid::new(),
            client_id: Ulid::new(),
            professional_id,
            service_id: Ulid::new(),
            date: NaiveDate::from_ymd_opt(2024, 6, 17).unwrap(),
            span: Span::hm(10, 0, 11, 0),
            status,
            price_cents,
            notes: None,
        }
    }

    #[test]
    fn revenue_sums() {
        let p = Ulid::new();
        let snapshot = vec![
            appt(p, AppointmentStatus::Completed, 5_000),
            appt(p, AppointmentStatus::Completed, 2_500),
            appt(p, AppointmentStatus::Scheduled, 12_000),
            appt(p, AppointmentStatus::Cancelled, 3_000),
        ];
        assert_eq!(total_revenue_cents(&snapshot), 22_500);
        assert_eq!(completed_revenue_cents(&snapshot), 7_500);
    }

    #[test]
    fn per_professional_breakdown() {
        let a = Ulid::new();
        let b = Ulid::new();
        let snapshot = vec![
            appt(a, AppointmentStatus::Completed, 5_000),
            appt(a, AppointmentStatus::Scheduled, 2_500),
            appt(b, AppointmentStatus::Completed, 12_000),
        ];
        let revenue = revenue_by_professional(&snapshot);
        assert_eq!(revenue[&a], 7_500);
        assert_eq!(revenue[&b], 12_000);
        let counts = appointments_per_professional(&snapshot);
        assert_eq!(counts[&a], 2);
        assert_eq!(counts[&b], 1);
    }

    #[test]
    fn status_counts() {
        let p = Ulid::new();
        let snapshot = vec![
            appt(p, AppointmentStatus::Scheduled, 100),
            appt(p, AppointmentStatus::Scheduled, 100),
            appt(p, AppointmentStatus::NoShow, 100),
        ];
        let counts = count_by_status(&snapshot);
        assert_eq!(counts[&AppointmentStatus::Scheduled], 2);
        assert_eq!(counts[&AppointmentStatus::NoShow], 1);
        assert!(!counts.contains_key(&AppointmentStatus::Completed));
    }

    #[test]
    fn low_stock_threshold_is_inclusive() {
        let product = |current, min| Product {
            id: Ulid::new(),
            name: "Shampoo".into(),
            category: "Hygiene".into(),
            current_stock: current,
            min_stock: min,
            unit: "un".into(),
            price_cents: 4_590,
            supplier: None,
        };
        let products = vec![product(15, 5), product(5, 5), product(3, 5)];
        let low = low_stock(&products);
        assert_eq!(low.len(), 2);
        assert!(low.iter().all(|p| p.current_stock <= p.min_stock));
    }

    #[test]
    fn empty_snapshot() {
        assert_eq!(total_revenue_cents(&[]), 0);
        assert_eq!(completed_revenue_cents(&[]), 0);
        assert!(count_by_status(&[]).is_empty());
    }
}
