use dashmap::DashMap;
use tokio::sync::broadcast;
use ulid::Ulid;

use crate::model::AppointmentEvent;

const CHANNEL_CAPACITY: usize = 256;

/// Broadcast hub: one channel per professional, carrying committed
/// appointment events to whoever renders that calendar.
pub struct NotifyHub {
    channels: DashMap<Ulid, broadcast::Sender<AppointmentEvent>>,
}

impl Default for NotifyHub {
    fn default() -> Self {
        Self::new()
    }
}

impl NotifyHub {
    pub fn new() -> Self {
        Self {
            channels: DashMap::new(),
        }
    }

    /// Subscribe to one professional's events. Creates the channel if needed.
    pub fn subscribe(&self, professional_id: Ulid) -> broadcast::Receiver<AppointmentEvent> {
        let sender = self
            .channels
            .entry(professional_id)
            .or_insert_with(|| broadcast::channel(CHANNEL_CAPACITY).0);
        sender.subscribe()
    }

    /// Send an event. No-op if nobody is listening.
    pub fn send(&self, professional_id: Ulid, event: &AppointmentEvent) {
        if let Some(sender) = self.channels.get(&professional_id) {
            let _ = sender.send(event.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::AppointmentStatus;

    #[tokio::test]
    async fn subscribe_and_receive() {
        let hub = NotifyHub::new();
        let pid = Ulid::new();
        let mut rx = hub.subscribe(pid);

        let event = AppointmentEvent::Transitioned {
            id: Ulid::new(),
            professional_id: pid,
            from: AppointmentStatus::Scheduled,
            to: AppointmentStatus::Confirmed,
        };
        hub.send(pid, &event);

        let received = rx.recv().await.unwrap();
        assert_eq!(received, event);
    }

    #[tokio::test]
    async fn send_without_subscribers_is_noop() {
        let hub = NotifyHub::new();
        let pid = Ulid::new();
        // No subscriber — should not panic
        hub.send(
            pid,
            &AppointmentEvent::Transitioned {
                id: Ulid::new(),
                professional_id: pid,
                from: AppointmentStatus::Scheduled,
                to: AppointmentStatus::Cancelled,
            },
        );
    }
}
