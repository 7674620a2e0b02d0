//! UI modules for TravelX
//!
//! Rendering code, organized by tab. Views never talk to providers directly;
//! they edit their state structs and the state decides what to request.

mod activities_tab;
mod assistant_tab;
pub mod components;
mod home_tab;
mod images_tab;
mod settings_tab;
pub mod textures;
pub mod theme;
mod weather_tab;

pub use activities_tab::render_activities_tab;
pub use assistant_tab::render_assistant_tab;
pub use home_tab::render_home_tab;
pub use images_tab::render_images_tab;
pub use settings_tab::render_settings_tab;
pub use weather_tab::render_weather_tab;

use crate::destination::DestinationStore;
use crate::state::StateEvent;
use crate::ui::textures::TextureCache;
use crate::ui::theme::Theme;

/// Shared resources handed to a tab while it renders
pub struct TabContext<'a> {
    pub theme: &'a Theme,
    pub destination: &'a DestinationStore,
    pub textures: &'a mut TextureCache,
    /// Events raised by input handling this frame
    pub events: &'a mut Vec<StateEvent>,
}
