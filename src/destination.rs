//! Shared destination store
//!
//! A single destination string drives the default query of every view. The
//! store is created by the composition root (the GUI app or the CLI shell) and
//! handed to each view explicitly; clones share the same value.

use std::sync::Arc;

use tokio::sync::watch;

/// Destination used when nothing else has been configured
pub const DEFAULT_DESTINATION: &str = "New York";

/// Process-wide destination value with read/write/subscribe access
#[derive(Debug, Clone)]
pub struct DestinationStore {
    tx: Arc<watch::Sender<String>>,
}

impl Default for DestinationStore {
    fn default() -> Self {
        Self::new(DEFAULT_DESTINATION)
    }
}

impl DestinationStore {
    /// Create a store holding `initial`
    pub fn new(initial: impl Into<String>) -> Self {
        let (tx, _) = watch::channel(initial.into());
        Self { tx: Arc::new(tx) }
    }

    /// Current destination
    pub fn read(&self) -> String {
        self.tx.borrow().clone()
    }

    /// Replace the destination and notify every subscriber.
    ///
    /// Empty values are accepted and propagate like any other.
    pub fn write(&self, value: impl Into<String>) {
        let value = value.into();
        tracing::debug!("Destination set to {:?}", value);
        self.tx.send_replace(value);
    }

    /// Observe future writes
    pub fn subscribe(&self) -> Subscription {
        Subscription {
            rx: self.tx.subscribe(),
        }
    }
}

/// Receiver side of the destination store
#[derive(Debug)]
pub struct Subscription {
    rx: watch::Receiver<String>,
}

impl Subscription {
    /// Return the latest value if a write happened since the last call
    pub fn changed(&mut self) -> Option<String> {
        match self.rx.has_changed() {
            Ok(true) => Some(self.rx.borrow_and_update().clone()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_destination() {
        let store = DestinationStore::default();
        assert_eq!(store.read(), "New York");
    }

    #[test]
    fn test_write_visible_to_all_clones() {
        let store = DestinationStore::new("Lisbon");
        let weather_view = store.clone();
        let images_view = store.clone();

        weather_view.write("Kyoto");

        assert_eq!(store.read(), "Kyoto");
        assert_eq!(images_view.read(), "Kyoto");
    }

    #[test]
    fn test_empty_write_propagates() {
        let store = DestinationStore::new("Oslo");
        store.write("");
        assert_eq!(store.read(), "");
    }

    #[test]
    fn test_subscription_sees_latest_write_once() {
        let store = DestinationStore::new("Paris");
        let mut sub = store.subscribe();

        assert_eq!(sub.changed(), None);

        store.write("Rome");
        store.write("Rio");
        assert_eq!(sub.changed(), Some("Rio".to_string()));
        assert_eq!(sub.changed(), None);
    }

    #[test]
    fn test_subscription_from_clone() {
        let store = DestinationStore::new("Cairo");
        let mut sub = store.clone().subscribe();
        store.write("Nairobi");
        assert_eq!(sub.changed(), Some("Nairobi".to_string()));
    }
}
