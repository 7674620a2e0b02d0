use std::path::PathBuf;

use anyhow::Result;
use eframe::egui;

use crate::config::Config;
use crate::destination::{DestinationStore, Subscription, DEFAULT_DESTINATION};
use crate::providers::{Credentials, Provider, Providers};
use crate::state::{ActiveView, MountContext, StateEvent, Tab, UiState};
use crate::ui::{self, components, textures::TextureCache, TabContext};

/// Main application state
pub struct TravelApp {
    /// Application configuration
    pub(crate) config: Config,
    /// API keys, read once at startup
    pub(crate) credentials: Credentials,
    /// Where settings are saved, resolved once at startup
    pub(crate) config_path: Option<PathBuf>,
    /// Provider clients built from config and credentials
    providers: Providers,
    /// Destination shared by every view
    pub(crate) destination: DestinationStore,
    /// Watches the destination to keep the window title in sync
    destination_changes: Subscription,
    /// UI-only state (theme, markdown cache, dialogs)
    pub(crate) ui: UiState,
    /// View currently mounted
    active: ActiveView,
    /// Downloaded images, kept across view mounts
    textures: TextureCache,
    /// Status message for the status bar
    status_message: String,
}

impl TravelApp {
    /// Create a new application instance
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Result<Self> {
        let config_path = match Config::config_path() {
            Ok(path) => Some(path),
            Err(e) => {
                tracing::warn!("Settings will not be saved: {}", e);
                None
            }
        };

        let config = match config_path.as_deref().map(Config::load_from) {
            Some(Ok(config)) => config,
            Some(Err(e)) => {
                tracing::warn!("Failed to load config, using defaults: {}", e);
                Config::default()
            }
            None => Config::default(),
        };

        let mut app = Self::with_parts(config, Credentials::from_env())?;
        app.config_path = config_path;
        Ok(app)
    }

    /// Build the app from already-resolved configuration and keys
    pub fn with_parts(config: Config, credentials: Credentials) -> Result<Self> {
        for provider in Provider::all() {
            if !credentials.is_configured(*provider) {
                tracing::warn!(
                    "{} key missing, set {} to enable it",
                    provider.name(),
                    provider.env_var()
                );
            }
        }

        let providers = Providers::new(&config, credentials.clone())?;

        let start = config.general.default_destination.trim();
        let destination = DestinationStore::new(if start.is_empty() {
            DEFAULT_DESTINATION
        } else {
            start
        });
        let destination_changes = destination.subscribe();

        let active = ActiveView::mount(
            Tab::Home,
            &MountContext {
                destination: &destination,
                providers: &providers,
                config: &config,
            },
        );

        Ok(Self {
            ui: UiState::new(config.general.theme.theme()),
            textures: TextureCache::new(providers.http().clone()),
            status_message: "Ready".to_string(),
            config,
            credentials,
            config_path: None,
            providers,
            destination,
            destination_changes,
            active,
        })
    }

    pub fn active_tab(&self) -> Tab {
        self.active.tab()
    }

    /// Tear down the current view and mount the one behind `tab`
    pub fn switch_tab(&mut self, tab: Tab) {
        self.active = ActiveView::mount(
            tab,
            &MountContext {
                destination: &self.destination,
                providers: &self.providers,
                config: &self.config,
            },
        );
    }

    /// Save configuration to disk and rebuild providers from it
    pub fn save_config(&mut self) {
        let saved = match &self.config_path {
            Some(path) => self.config.save_to(path),
            None => Err(anyhow::anyhow!("no config directory")),
        };
        if let Err(e) = saved {
            tracing::error!("Failed to save config: {}", e);
            self.status_message = format!("Failed to save settings: {}", e);
        }

        match Providers::new(&self.config, self.credentials.clone()) {
            Ok(providers) => self.providers = providers,
            Err(e) => tracing::error!("Failed to rebuild providers: {}", e),
        }
    }

    fn handle_events(&mut self, events: Vec<StateEvent>) {
        for event in events {
            match event {
                StateEvent::StatusMessage(msg) => self.status_message = msg,
                StateEvent::LogError(msg) => tracing::error!("{}", msg),
                StateEvent::LogInfo(msg) => tracing::info!("{}", msg),
            }
        }
    }

    /// Render whichever view is mounted, collecting the events its input raised
    fn render_active_view(&mut self, ui: &mut egui::Ui) -> Vec<StateEvent> {
        let mut events = Vec::new();

        if matches!(self.active, ActiveView::Settings) {
            ui::render_settings_tab(self, ui);
            return events;
        }

        let mut tab = TabContext {
            theme: &self.ui.current_theme,
            destination: &self.destination,
            textures: &mut self.textures,
            events: &mut events,
        };

        match &mut self.active {
            ActiveView::Home(state) => ui::render_home_tab(state, &mut tab, ui),
            ActiveView::Weather(state) => ui::render_weather_tab(state, &mut tab, ui),
            ActiveView::Images(state) => ui::render_images_tab(state, &mut tab, ui),
            ActiveView::Activities(state) => ui::render_activities_tab(state, &mut tab, ui),
            ActiveView::Assistant(state) => {
                ui::render_assistant_tab(state, &mut self.ui.markdown_cache, &mut tab, ui)
            }
            ActiveView::Settings => {}
        }

        events
    }
}

impl eframe::App for TravelApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.ui.theme_dirty {
            self.ui.current_theme.apply(ctx);
            self.ui.theme_dirty = false;
        }

        // Poll async tasks
        let events = self.active.poll(ctx);
        self.handle_events(events);
        self.textures.poll(ctx);

        if let Some(destination) = self.destination_changes.changed() {
            ctx.send_viewport_cmd(egui::ViewportCommand::Title(format!(
                "TravelX - {}",
                destination
            )));
        }

        egui::TopBottomPanel::top("nav_bar").show(ctx, |ui| {
            ui.add_space(6.0);
            components::render_top_bar(self, ui);
        });

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(
                    egui::RichText::new(&self.status_message)
                        .color(self.ui.current_theme.text_secondary)
                        .size(12.0),
                );
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            let events = self.render_active_view(ui);
            self.handle_events(events);
        });

        components::render_about_dialog(self, ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::theme::ThemePreset;

    fn app(config: Config) -> TravelApp {
        TravelApp::with_parts(config, Credentials::default()).unwrap()
    }

    #[tokio::test]
    async fn test_starts_on_home_with_configured_destination() {
        let mut config = Config::default();
        config.general.default_destination = "Lisbon".to_string();
        config.general.theme = ThemePreset::Forest;

        let app = app(config);
        assert_eq!(app.active_tab(), Tab::Home);
        assert_eq!(app.destination.read(), "Lisbon");
        assert!(app.ui.theme_dirty);
    }

    #[tokio::test]
    async fn test_blank_default_destination_falls_back() {
        let mut config = Config::default();
        config.general.default_destination = "   ".to_string();
        assert_eq!(app(config).destination.read(), DEFAULT_DESTINATION);
    }

    #[tokio::test]
    async fn test_switch_tab_remounts() {
        let mut app = app(Config::default());

        app.switch_tab(Tab::Weather);
        assert_eq!(app.active_tab(), Tab::Weather);

        // Without a key the weather view settles on the configuration message
        let ctx = egui::Context::default();
        for _ in 0..200 {
            let events = app.active.poll(&ctx);
            app.handle_events(events);
            if app.status_message.contains("OPENWEATHER_API_KEY") {
                break;
            }
            tokio::time::sleep(std::time::Duration::from_millis(2)).await;
        }
        assert!(app.status_message.contains("OPENWEATHER_API_KEY"));

        app.switch_tab(Tab::Settings);
        assert_eq!(app.active_tab(), Tab::Settings);
    }

    #[tokio::test]
    async fn test_destination_survives_tab_switches() {
        let mut app = app(Config::default());
        app.switch_tab(Tab::Images);
        if let ActiveView::Images(state) = &mut app.active {
            state.set_location("Kyoto".to_string(), &app.destination);
        }

        app.switch_tab(Tab::Activities);
        let ActiveView::Activities(state) = &app.active else {
            panic!("expected activities view");
        };
        assert_eq!(state.city, "Kyoto");
        assert_eq!(app.destination_changes.changed().as_deref(), Some("Kyoto"));
    }

    #[tokio::test]
    async fn test_handle_events_updates_status() {
        let mut app = app(Config::default());
        app.handle_events(vec![
            StateEvent::LogInfo("ignored".to_string()),
            StateEvent::StatusMessage("Destination set to Oslo".to_string()),
        ]);
        assert_eq!(app.status_message, "Destination set to Oslo");
    }

    #[tokio::test]
    async fn test_save_config_writes_resolved_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut app = app(Config::default());
        app.config_path = Some(path.clone());
        app.config.photos.per_page = 40;
        app.save_config();

        assert_eq!(Config::load_from(&path).unwrap().photos.per_page, 40);
        assert_eq!(app.status_message, "Ready");
    }

    #[tokio::test]
    async fn test_save_config_without_directory_reports_status() {
        let mut app = app(Config::default());
        assert!(app.config_path.is_none());

        app.save_config();
        assert!(app.status_message.starts_with("Failed to save settings"));
    }
}
