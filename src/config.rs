use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::destination::DEFAULT_DESTINATION;
use crate::providers::TemperatureUnit;
use crate::ui::theme::ThemePreset;

/// Accepted weather refresh interval, in minutes (one day at most)
pub const REFRESH_MINUTES_RANGE: RangeInclusive<u64> = 1..=1440;

/// Pexels returns at most 80 photos per page
pub const PER_PAGE_RANGE: RangeInclusive<u32> = 1..=80;

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub weather: WeatherConfig,
    #[serde(default)]
    pub photos: PhotosConfig,
    #[serde(default)]
    pub assistant: AssistantConfig,
}

/// Appearance and startup settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Destination shown when the app starts
    #[serde(default = "default_destination")]
    pub default_destination: String,
    /// Color theme
    #[serde(default)]
    pub theme: ThemePreset,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            default_destination: default_destination(),
            theme: ThemePreset::default(),
        }
    }
}

fn default_destination() -> String {
    DEFAULT_DESTINATION.to_string()
}

/// OpenWeather settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// API root, without the `/data/2.5` path
    #[serde(default = "default_weather_url")]
    pub base_url: String,
    /// Unit the weather view opens with
    #[serde(default)]
    pub units: TemperatureUnit,
    /// Minutes between automatic refreshes while the weather view is open
    #[serde(default = "default_refresh_minutes")]
    pub refresh_minutes: u64,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            base_url: default_weather_url(),
            units: TemperatureUnit::default(),
            refresh_minutes: default_refresh_minutes(),
        }
    }
}

impl WeatherConfig {
    /// Refresh interval, clamped to the accepted range
    pub fn refresh_interval(&self) -> Duration {
        let minutes = self
            .refresh_minutes
            .clamp(*REFRESH_MINUTES_RANGE.start(), *REFRESH_MINUTES_RANGE.end());
        Duration::from_secs(minutes.saturating_mul(60))
    }
}

fn default_weather_url() -> String {
    "https://api.openweathermap.org".to_string()
}

fn default_refresh_minutes() -> u64 {
    5
}

/// Pexels settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhotosConfig {
    #[serde(default = "default_photos_url")]
    pub base_url: String,
    /// Photos requested per search
    #[serde(default = "default_per_page")]
    pub per_page: u32,
}

impl Default for PhotosConfig {
    fn default() -> Self {
        Self {
            base_url: default_photos_url(),
            per_page: default_per_page(),
        }
    }
}

fn default_photos_url() -> String {
    "https://api.pexels.com".to_string()
}

fn default_per_page() -> u32 {
    12
}

/// OpenAI chat completion settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssistantConfig {
    #[serde(default = "default_assistant_url")]
    pub base_url: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// Instruction sent ahead of every question
    #[serde(default = "default_system_prompt")]
    pub system_prompt: String,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            base_url: default_assistant_url(),
            model: default_model(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            system_prompt: default_system_prompt(),
        }
    }
}

fn default_assistant_url() -> String {
    "https://api.openai.com".to_string()
}

fn default_model() -> String {
    "gpt-3.5-turbo".to_string()
}

fn default_temperature() -> f32 {
    0.7
}

fn default_max_tokens() -> u32 {
    150
}

fn default_system_prompt() -> String {
    "You are a knowledgeable travel assistant. Provide helpful, concise travel \
     recommendations and tips. Focus on practical advice about destinations, \
     activities, and travel planning."
        .to_string()
}

impl Config {
    /// Get the configuration file path
    pub fn config_path() -> Result<PathBuf> {
        let dirs = directories::ProjectDirs::from("com", "travelx", "TravelX")
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        let config_dir = dirs.config_dir();
        std::fs::create_dir_all(config_dir)?;

        Ok(config_dir.join("config.toml"))
    }

    /// Load configuration from the default location
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from `path`, falling back to defaults if it is missing
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let mut config: Config = toml::from_str(&content)?;
            config.clamp_ranges();
            tracing::info!("Loaded configuration from {:?}", path);
            Ok(config)
        } else {
            tracing::info!("No configuration file found, using defaults");
            Ok(Self::default())
        }
    }

    /// Pull hand-edited numbers back into the ranges the app accepts
    fn clamp_ranges(&mut self) {
        let minutes = self
            .weather
            .refresh_minutes
            .clamp(*REFRESH_MINUTES_RANGE.start(), *REFRESH_MINUTES_RANGE.end());
        if minutes != self.weather.refresh_minutes {
            tracing::warn!(
                "weather.refresh_minutes = {} is out of range, using {}",
                self.weather.refresh_minutes,
                minutes
            );
            self.weather.refresh_minutes = minutes;
        }

        let per_page = self
            .photos
            .per_page
            .clamp(*PER_PAGE_RANGE.start(), *PER_PAGE_RANGE.end());
        if per_page != self.photos.per_page {
            tracing::warn!(
                "photos.per_page = {} is out of range, using {}",
                self.photos.per_page,
                per_page
            );
            self.photos.per_page = per_page;
        }
    }

    /// Save configuration to the default location
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Save configuration to `path`
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        tracing::info!("Saved configuration to {:?}", path);
        Ok(())
    }
}
