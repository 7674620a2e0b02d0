//! Home view state

use crate::destination::DestinationStore;
use crate::state::StateEvent;

/// Search box on the home view. Unlike the other views it only writes the
/// destination on explicit submission.
pub struct HomeState {
    pub query: String,
}

impl HomeState {
    pub fn mount(destination: &DestinationStore) -> Self {
        Self {
            query: destination.read(),
        }
    }

    /// Write the trimmed query to the destination; blank queries are ignored
    pub fn submit(&mut self, destination: &DestinationStore) -> Option<StateEvent> {
        let query = self.query.trim();
        if query.is_empty() {
            return None;
        }

        let query = query.to_string();
        destination.write(query.clone());
        self.query = query.clone();
        Some(StateEvent::StatusMessage(format!("Destination set to {}", query)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submit_trims_and_writes() {
        let destination = DestinationStore::new("New York");
        let mut home = HomeState::mount(&destination);
        assert_eq!(home.query, "New York");

        home.query = "  Reykjavik ".to_string();
        let event = home.submit(&destination);
        assert_eq!(destination.read(), "Reykjavik");
        assert_eq!(home.query, "Reykjavik");
        assert!(matches!(event, Some(StateEvent::StatusMessage(msg)) if msg.contains("Reykjavik")));
    }

    #[test]
    fn test_typing_does_not_write() {
        let destination = DestinationStore::new("New York");
        let mut home = HomeState::mount(&destination);
        home.query = "Ber".to_string();
        assert_eq!(destination.read(), "New York");

        home.query = "   ".to_string();
        assert!(home.submit(&destination).is_none());
        assert_eq!(destination.read(), "New York");
    }
}
