//! Activities view state

use eframe::egui;

use crate::destination::DestinationStore;
use crate::fetch::{Fetch, FetchPoll, FetchState};
use crate::providers::activities::describe_error;
use crate::providers::{Activity, ActivityCatalog};
use crate::state::StateEvent;

/// Activities view state
pub struct ActivitiesState {
    pub city: String,
    fetch: Fetch<Vec<Activity>>,
    catalog: ActivityCatalog,
}

impl ActivitiesState {
    pub fn mount(destination: &DestinationStore, catalog: ActivityCatalog) -> Self {
        let mut state = Self {
            city: destination.read(),
            fetch: Fetch::new("activities", describe_error),
            catalog,
        };
        state.request();
        state
    }

    pub fn activities(&self) -> &FetchState<Vec<Activity>> {
        self.fetch.state()
    }

    /// Apply an edit of the city field; the destination follows every keystroke
    pub fn set_city(&mut self, city: String, destination: &DestinationStore) {
        destination.write(city.clone());
        self.city = city;
        self.request();
    }

    fn request(&mut self) {
        if self.city.trim().is_empty() {
            self.fetch.clear();
            return;
        }

        let catalog = self.catalog.clone();
        let city = self.city.clone();
        self.fetch
            .trigger(&self.city, async move { catalog.search(&city).await });
    }

    pub fn poll(&mut self, ctx: &egui::Context) -> Vec<StateEvent> {
        match self.fetch.poll() {
            FetchPoll::Settled => {
                if let Some(msg) = self.fetch.state().error() {
                    return vec![StateEvent::StatusMessage(msg.to_string())];
                }
            }
            FetchPoll::Pending => ctx.request_repaint(),
            FetchPoll::Idle => {}
        }
        Vec::new()
    }
}
