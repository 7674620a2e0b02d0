//! UI-related application state

use egui_commonmark::CommonMarkCache;

use crate::ui::theme::Theme;

/// Application tabs representing the main navigation sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    /// Home tab: destination search
    #[default]
    Home,
    /// Weather tab: current conditions, refreshed periodically
    Weather,
    /// Images tab: destination photo grid
    Images,
    /// Activities tab: curated things to do
    Activities,
    /// Assistant tab: chat with the travel assistant
    Assistant,
    /// Settings tab: theme, units, provider key status
    Settings,
}

impl Tab {
    /// Tabs in navigation order
    pub fn all() -> &'static [Tab] {
        &[
            Tab::Home,
            Tab::Weather,
            Tab::Images,
            Tab::Activities,
            Tab::Assistant,
            Tab::Settings,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Tab::Home => "Main Page",
            Tab::Weather => "Weather Info",
            Tab::Images => "Images",
            Tab::Activities => "Activities",
            Tab::Assistant => "Questions",
            Tab::Settings => "Settings",
        }
    }
}

/// UI-related state
pub struct UiState {
    /// Cache for rendering assistant replies as markdown
    pub markdown_cache: CommonMarkCache,
    /// Current theme
    pub current_theme: Theme,
    /// Whether theme needs to be applied
    pub theme_dirty: bool,
    /// Whether to show the About dialog
    pub show_about_dialog: bool,
}

impl UiState {
    /// Create a new UiState with the given theme
    pub fn new(theme: Theme) -> Self {
        Self {
            markdown_cache: CommonMarkCache::default(),
            current_theme: theme,
            theme_dirty: true, // Apply theme on first frame
            show_about_dialog: false,
        }
    }
}
