use dashmap::DashMap;
use ulid::Ulid;

use crate::engine::EngineError;
use crate::model::{Client, Product, Professional, Service};

/// Registry of the entities appointments reference by id. The scheduling
/// engine holds it behind an `Arc` and only ever reads it; whoever embeds
/// the engine owns registration and edits. Appointments never embed these
/// records, so a working-hours or price edit has one place to happen.
pub struct Directory {
    professionals: DashMap<Ulid, Professional>,
    services: DashMap<Ulid, Service>,
    clients: DashMap<Ulid, Client>,
    products: DashMap<Ulid, Product>,
}

impl Default for Directory {
    fn default() -> Self {
        Self::new()
    }
}

impl Directory {
    pub fn new() -> Self {
        Self {
            professionals: DashMap::new(),
            services: DashMap::new(),
            clients: DashMap::new(),
            products: DashMap::new(),
        }
    }

    // ── Registration ─────────────────────────────────────────

    pub fn add_professional(&self, professional: Professional) {
        self.professionals.insert(professional.id, professional);
    }

    pub fn add_service(&self, service: Service) -> Result<(), EngineError> {
        if service.duration_min == 0 {
            return Err(EngineError::InvalidRecord("service duration must be positive"));
        }
        if service.price_cents < 0 {
            return Err(EngineError::InvalidRecord("service price must not be negative"));
        }
        if service.professional_ids.is_empty() {
            return Err(EngineError::InvalidRecord("service needs at least one professional"));
        }
        for pid in &service.professional_ids {
            if !self.professionals.contains_key(pid) {
                return Err(EngineError::NotFound(*pid));
            }
        }
        self.services.insert(service.id, service);
        Ok(())
    }

    pub fn add_client(&self, client: Client) {
        self.clients.insert(client.id, client);
    }

    pub fn add_product(&self, product: Product) {
        self.products.insert(product.id, product);
    }

    // ── Edits ────────────────────────────────────────────────

    pub fn set_professional_active(&self, id: &Ulid, active: bool) -> Result<(), EngineError> {
        let mut entry = self
            .professionals
            .get_mut(id)
            .ok_or(EngineError::NotFound(*id))?;
        entry.active = active;
        Ok(())
    }

    /// Reprices a service. Existing appointments keep their price snapshot.
    pub fn set_service_price(&self, id: &Ulid, price_cents: i64) -> Result<(), EngineError> {
        if price_cents < 0 {
            return Err(EngineError::InvalidRecord("service price must not be negative"));
        }
        let mut entry = self.services.get_mut(id).ok_or(EngineError::NotFound(*id))?;
        entry.price_cents = price_cents;
        Ok(())
    }

    // ── Lookups ──────────────────────────────────────────────

    pub fn professional(&self, id: &Ulid) -> Option<Professional> {
        self.professionals.get(id).map(|e| e.value().clone())
    }

    pub fn service(&self, id: &Ulid) -> Option<Service> {
        self.services.get(id).map(|e| e.value().clone())
    }

    pub fn client(&self, id: &Ulid) -> Option<Client> {
        self.clients.get(id).map(|e| e.value().clone())
    }

    pub fn product(&self, id: &Ulid) -> Option<Product> {
        self.products.get(id).map(|e| e.value().clone())
    }

    pub fn professionals(&self) -> Vec<Professional> {
        self.professionals.iter().map(|e| e.value().clone()).collect()
    }

    pub fn products(&self) -> Vec<Product> {
        self.products.iter().map(|e| e.value().clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Span, WorkingHours};

    fn professional(active: bool) -> Professional {
        Professional {
            id: Ulid::new(),
            name: "Test".into(),
            email: "test@example.com".into(),
            phone: "555-0100".into(),
            specialties: vec![],
            hours: WorkingHours::new(Span::hm(9, 0, 18, 0), (1..=5).collect()),
            active,
        }
    }

    fn service_for(pid: Ulid) -> Service {
        Service {
            id: Ulid::new(),
            name: "Cut".into(),
            duration_min: 30,
            price_cents: 2_500,
            category: "Hair".into(),
            professional_ids: vec![pid],
        }
    }

    #[test]
    fn add_and_lookup_service() {
        let dir = Directory::new();
        let p = professional(true);
        let pid = p.id;
        dir.add_professional(p);

        let svc = service_for(pid);
        let sid = svc.id;
        dir.add_service(svc).unwrap();
        assert_eq!(dir.service(&sid).unwrap().duration_min, 30);
    }

    #[test]
    fn service_rejects_zero_duration() {
        let dir = Directory::new();
        let p = professional(true);
        let pid = p.id;
        dir.add_professional(p);

        let mut svc = service_for(pid);
        svc.duration_min = 0;
        assert!(matches!(
            dir.add_service(svc),
            Err(EngineError::InvalidRecord(_))
        ));
    }

    #[test]
    fn service_rejects_unknown_professional() {
        let dir = Directory::new();
        let svc = service_for(Ulid::new());
        assert!(matches!(dir.add_service(svc), Err(EngineError::NotFound(_))));
    }

    #[test]
    fn service_rejects_empty_professional_set() {
        let dir = Directory::new();
        let p = professional(true);
        let pid = p.id;
        dir.add_professional(p);

        let mut svc = service_for(pid);
        svc.professional_ids.clear();
        assert!(matches!(
            dir.add_service(svc),
            Err(EngineError::InvalidRecord(_))
        ));
    }

    #[test]
    fn toggle_professional_active() {
        let dir = Directory::new();
        let p = professional(true);
        let pid = p.id;
        dir.add_professional(p);

        dir.set_professional_active(&pid, false).unwrap();
        assert!(!dir.professional(&pid).unwrap().active);
        assert!(matches!(
            dir.set_professional_active(&Ulid::new(), true),
            Err(EngineError::NotFound(_))
        ));
    }

    #[test]
    fn reprice_service() {
        let dir = Directory::new();
        let p = professional(true);
        let pid = p.id;
        dir.add_professional(p);
        let svc = service_for(pid);
        let sid = svc.id;
        dir.add_service(svc).unwrap();

        dir.set_service_price(&sid, 3_000).unwrap();
        assert_eq!(dir.service(&sid).unwrap().price_cents, 3_000);
        assert!(dir.set_service_price(&sid, -1).is_err());
    }
}
