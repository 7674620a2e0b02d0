//! Weather view state

use std::time::{Duration, Instant};

use eframe::egui;

use crate::destination::DestinationStore;
use crate::fetch::{Fetch, FetchPoll, FetchState, RefreshTimer};
use crate::providers::weather::describe_error;
use crate::providers::{TemperatureUnit, WeatherClient, WeatherReport};
use crate::state::StateEvent;

const MAX_REPAINT_WAIT: Duration = Duration::from_secs(24 * 60 * 60);

/// Weather view state; dropping it stops the refresh timer
pub struct WeatherState {
    /// City being shown, edited in place
    pub city: String,
    /// Display unit for temperatures
    pub unit: TemperatureUnit,
    fetch: Fetch<WeatherReport>,
    refresh: RefreshTimer,
    client: WeatherClient,
}

impl WeatherState {
    /// Mount the view, fetching the current destination right away
    pub fn mount(
        destination: &DestinationStore,
        client: WeatherClient,
        unit: TemperatureUnit,
        refresh_every: Duration,
        now: Instant,
    ) -> Self {
        let mut state = Self {
            city: destination.read(),
            unit,
            fetch: Fetch::new("weather", describe_error),
            refresh: RefreshTimer::new(refresh_every, now),
            client,
        };
        state.request();
        state
    }

    pub fn report(&self) -> &FetchState<WeatherReport> {
        self.fetch.state()
    }

    /// Apply an edit of the city field; the destination follows every keystroke
    pub fn set_city(&mut self, city: String, destination: &DestinationStore, now: Instant) {
        destination.write(city.clone());
        self.city = city;
        self.refresh.reset(now);
        self.request();
    }

    fn request(&mut self) {
        if self.city.trim().is_empty() {
            self.fetch.clear();
            return;
        }

        let client = self.client.clone();
        let city = self.city.clone();
        self.fetch
            .trigger(&self.city, async move { client.current(&city).await });
    }

    /// Drive the refresh timer and collect the fetch result
    pub fn poll(&mut self, ctx: &egui::Context, now: Instant) -> Vec<StateEvent> {
        let mut events = Vec::new();

        if self.refresh.tick(now) && !self.city.trim().is_empty() {
            events.push(StateEvent::LogInfo(format!("Refreshing weather for {}", self.city)));
            self.request();
        }

        match self.fetch.poll() {
            FetchPoll::Settled => match self.fetch.state() {
                FetchState::Success(report) => {
                    events.push(StateEvent::StatusMessage(format!(
                        "Weather for {}: {}, {}",
                        self.fetch.query(),
                        self.unit.format(report.temperature_c),
                        report.condition
                    )));
                }
                FetchState::Error(msg) => {
                    events.push(StateEvent::StatusMessage(msg.clone()));
                }
                _ => {}
            },
            FetchPoll::Pending => ctx.request_repaint(),
            FetchPoll::Idle => {}
        }

        // Wake up for the next refresh even without input; egui adds this to
        // the current instant so it has to stay representable
        ctx.request_repaint_after(self.refresh.remaining(now).min(MAX_REPAINT_WAIT));

        events
    }
}
