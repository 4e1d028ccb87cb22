//! Demo dataset: a small salon with two professionals, a service menu, a
//! couple of clients, and a stocked shelf. Used by integration tests and as
//! a starting fixture for embedding demos — an explicit value, not a
//! process-wide singleton.

use std::sync::Arc;

use chrono::NaiveDate;
use ulid::Ulid;

use crate::directory::Directory;
use crate::model::{Client, Product, Professional, Service, Span, WorkingHours};

/// Stable ids so tests can refer to seeded entities by name.
pub struct DemoIds {
    pub stylist: Ulid,
    pub barber: Ulid,
    pub womens_cut: Ulid,
    pub coloring: Ulid,
    pub mens_cut: Ulid,
    pub beard_trim: Ulid,
    pub client_ana: Ulid,
    pub client_pedro: Ulid,
}

pub fn demo() -> (Arc<Directory>, DemoIds) {
    let dir = Directory::new();

    let stylist = Ulid::new();
    dir.add_professional(Professional {
        id: stylist,
        name: "Marina Duarte".into(),
        email: "marina@salon.example".into(),
        phone: "(11) 99999-0001".into(),
        specialties: vec!["Cut".into(), "Coloring".into()],
        hours: WorkingHours::new(Span::hm(9, 0, 18, 0), (1..=6).collect()),
        active: true,
    });

    let barber = Ulid::new();
    dir.add_professional(Professional {
        id: barber,
        name: "Rafael Costa".into(),
        email: "rafael@salon.example".into(),
        phone: "(11) 99999-0002".into(),
        specialties: vec!["Men's cut".into(), "Beard".into()],
        hours: WorkingHours::new(Span::hm(8, 0, 17, 0), (1..=6).collect()),
        active: true,
    });

    let womens_cut = Ulid::new();
    dir.add_service(Service {
        id: womens_cut,
        name: "Women's cut".into(),
        duration_min: 60,
        price_cents: 5_000,
        category: "Hair".into(),
        professional_ids: vec![stylist],
    })
    .expect("seed service is valid");

    let coloring = Ulid::new();
    dir.add_service(Service {
        id: coloring,
        name: "Coloring".into(),
        duration_min: 120,
        price_cents: 12_000,
        category: "Hair".into(),
        professional_ids: vec![stylist],
    })
    .expect("seed service is valid");

    let mens_cut = Ulid::new();
    dir.add_service(Service {
        id: mens_cut,
        name: "Men's cut".into(),
        duration_min: 30,
        price_cents: 2_500,
        category: "Hair".into(),
        professional_ids: vec![barber],
    })
    .expect("seed service is valid");

    let beard_trim = Ulid::new();
    dir.add_service(Service {
        id: beard_trim,
        name: "Beard trim".into(),
        duration_min: 45,
        price_cents: 3_000,
        category: "Beard".into(),
        professional_ids: vec![barber],
    })
    .expect("seed service is valid");

    let client_ana = Ulid::new();
    dir.add_client(Client {
        id: client_ana,
        name: "Ana Ribeiro".into(),
        email: "ana@example.com".into(),
        phone: "(11) 97777-0001".into(),
        notes: None,
        created_at: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
    });

    let client_pedro = Ulid::new();
    dir.add_client(Client {
        id: client_pedro,
        name: "Pedro Azevedo".into(),
        email: "pedro@example.com".into(),
        phone: "(11) 96666-0002".into(),
        notes: None,
        created_at: NaiveDate::from_ymd_opt(2024, 2, 10).unwrap(),
    });

    dir.add_product(Product {
        id: Ulid::new(),
        name: "Premium shampoo".into(),
        category: "Hygiene".into(),
        current_stock: 15,
        min_stock: 5,
        unit: "un".into(),
        price_cents: 4_590,
        supplier: Some("Beleza Distribution".into()),
    });

    dir.add_product(Product {
        id: Ulid::new(),
        name: "Hair dye 6.0".into(),
        category: "Coloring".into(),
        current_stock: 3,
        min_stock: 5,
        unit: "un".into(),
        price_cents: 2_850,
        supplier: Some("Cosmetics Pro".into()),
    });

    (
        Arc::new(dir),
        DemoIds {
            stylist,
            barber,
            womens_cut,
            coloring,
            mens_cut,
            beard_trim,
            client_ana,
            client_pedro,
        },
    )
}
