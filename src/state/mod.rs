//! Application state modules
//!
//! Each view owns its state struct. A view is mounted when its tab is opened
//! and dropped when the user leaves it, which discards its results, its chat
//! history and (for weather) its refresh timer.

mod activities;
mod assistant;
mod home;
mod photos;
mod ui;
mod weather;

use std::time::Instant;

use eframe::egui;

pub use activities::ActivitiesState;
pub use assistant::{AssistantState, ChatMessage, Sender};
pub use home::HomeState;
pub use photos::PhotosState;
pub use ui::{Tab, UiState};
pub use weather::WeatherState;

use crate::config::Config;
use crate::destination::DestinationStore;
use crate::providers::Providers;

/// Events that state poll methods can return.
/// These communicate results back to TravelApp without direct mutation.
#[derive(Debug)]
pub enum StateEvent {
    /// Update the status message
    StatusMessage(String),

    /// Log an error message
    LogError(String),

    /// Log an info message
    LogInfo(String),
}

/// Everything a view needs when it mounts
pub struct MountContext<'a> {
    pub destination: &'a DestinationStore,
    pub providers: &'a Providers,
    pub config: &'a Config,
}

/// The view currently on screen
pub enum ActiveView {
    Home(HomeState),
    Weather(WeatherState),
    Images(PhotosState),
    Activities(ActivitiesState),
    Assistant(AssistantState),
    Settings,
}

impl ActiveView {
    /// Mount the view behind `tab`
    pub fn mount(tab: Tab, ctx: &MountContext<'_>) -> Self {
        tracing::debug!("Mounting {:?} view", tab);
        match tab {
            Tab::Home => ActiveView::Home(HomeState::mount(ctx.destination)),
            Tab::Weather => ActiveView::Weather(WeatherState::mount(
                ctx.destination,
                ctx.providers.weather.clone(),
                ctx.config.weather.units,
                ctx.config.weather.refresh_interval(),
                Instant::now(),
            )),
            Tab::Images => ActiveView::Images(PhotosState::mount(
                ctx.destination,
                ctx.providers.photos.clone(),
            )),
            Tab::Activities => ActiveView::Activities(ActivitiesState::mount(
                ctx.destination,
                ctx.providers.activities.clone(),
            )),
            Tab::Assistant => {
                ActiveView::Assistant(AssistantState::mount(ctx.providers.assistant.clone()))
            }
            Tab::Settings => ActiveView::Settings,
        }
    }

    pub fn tab(&self) -> Tab {
        match self {
            ActiveView::Home(_) => Tab::Home,
            ActiveView::Weather(_) => Tab::Weather,
            ActiveView::Images(_) => Tab::Images,
            ActiveView::Activities(_) => Tab::Activities,
            ActiveView::Assistant(_) => Tab::Assistant,
            ActiveView::Settings => Tab::Settings,
        }
    }

    /// Poll whatever async work the view has outstanding
    pub fn poll(&mut self, ctx: &egui::Context) -> Vec<StateEvent> {
        match self {
            ActiveView::Weather(state) => state.poll(ctx, Instant::now()),
            ActiveView::Images(state) => state.poll(ctx),
            ActiveView::Activities(state) => state.poll(ctx),
            ActiveView::Assistant(state) => state.poll(ctx),
            ActiveView::Home(_) | ActiveView::Settings => Vec::new(),
        }
    }
}
