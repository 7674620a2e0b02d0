//! Configuration management commands

use anyhow::Result;
use clap::Subcommand;
use serde::Serialize;

use super::Session;
use crate::cli::output::{print_formatted, print_success, OutputFormat};
use crate::config::{Config, PER_PAGE_RANGE, REFRESH_MINUTES_RANGE};
use crate::providers::TemperatureUnit;
use crate::ui::theme::ThemePreset;

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Get a specific config value
    Get {
        /// Config key (e.g., "general.default_destination", "weather.units")
        key: String,
    },

    /// Set a config value
    Set {
        /// Config key (e.g., "general.default_destination", "weather.units")
        key: String,

        /// Value to set
        value: String,
    },

    /// Show config file path
    Path,
}

#[derive(Serialize)]
struct ConfigPathResult {
    path: String,
    exists: bool,
}

pub async fn run(
    command: ConfigCommands,
    session: &mut Session,
    format: OutputFormat,
    quiet: bool,
) -> Result<()> {
    match command {
        ConfigCommands::Show => show(&session.config, format),
        ConfigCommands::Get { key } => get(&session.config, &key, format),
        ConfigCommands::Set { key, value } => set(session, &key, &value, format, quiet),
        ConfigCommands::Path => path(format),
    }
}

fn show(config: &Config, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(config)?;
            println!("{}", json);
        }
        OutputFormat::Text => {
            let toml = toml::to_string_pretty(config)?;
            println!("{}", toml);
        }
    }

    Ok(())
}

fn get(config: &Config, key: &str, format: OutputFormat) -> Result<()> {
    let value = get_config_value(config, key)?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string(&value)?);
        }
        OutputFormat::Text => {
            println!("{}", value);
        }
    }

    Ok(())
}

fn get_config_value(config: &Config, key: &str) -> Result<String> {
    let parts: Vec<&str> = key.split('.').collect();

    match parts.as_slice() {
        ["general", "default_destination"] => Ok(config.general.default_destination.clone()),
        ["general", "theme"] => Ok(enum_name(&config.general.theme)?),
        ["weather", "base_url"] => Ok(config.weather.base_url.clone()),
        ["weather", "units"] => Ok(enum_name(&config.weather.units)?),
        ["weather", "refresh_minutes"] => Ok(config.weather.refresh_minutes.to_string()),
        ["photos", "base_url"] => Ok(config.photos.base_url.clone()),
        ["photos", "per_page"] => Ok(config.photos.per_page.to_string()),
        ["assistant", "base_url"] => Ok(config.assistant.base_url.clone()),
        ["assistant", "model"] => Ok(config.assistant.model.clone()),
        ["assistant", "temperature"] => Ok(config.assistant.temperature.to_string()),
        ["assistant", "max_tokens"] => Ok(config.assistant.max_tokens.to_string()),
        ["assistant", "system_prompt"] => Ok(config.assistant.system_prompt.clone()),
        _ => anyhow::bail!("Unknown config key: {}", key),
    }
}

/// Serialized name of a unit-like enum, as written in config.toml
fn enum_name<T: Serialize>(value: &T) -> Result<String> {
    match serde_json::to_value(value)? {
        serde_json::Value::String(name) => Ok(name),
        other => Ok(other.to_string()),
    }
}

/// Parse a lowercase enum name the way config.toml spells it
fn parse_enum<T: serde::de::DeserializeOwned>(value: &str) -> Result<T> {
    serde_json::from_value(serde_json::Value::String(value.trim().to_lowercase()))
        .map_err(|_| anyhow::anyhow!("Invalid value: {}", value))
}

fn set(
    session: &mut Session,
    key: &str,
    value: &str,
    format: OutputFormat,
    quiet: bool,
) -> Result<()> {
    set_config_value(&mut session.config, key, value)?;
    session.config.save()?;
    session.reload_providers()?;

    print_success(&format!("Set {} = {}", key, value), format, quiet);
    Ok(())
}

fn set_config_value(config: &mut Config, key: &str, value: &str) -> Result<()> {
    let parts: Vec<&str> = key.split('.').collect();

    match parts.as_slice() {
        ["general", "default_destination"] => {
            let value = value.trim();
            if value.is_empty() {
                anyhow::bail!("Destination cannot be empty");
            }
            config.general.default_destination = value.to_string();
        }
        ["general", "theme"] => {
            config.general.theme = parse_enum::<ThemePreset>(value)?;
        }
        ["weather", "base_url"] => {
            config.weather.base_url = value.to_string();
        }
        ["weather", "units"] => {
            config.weather.units = parse_enum::<TemperatureUnit>(value)?;
        }
        ["weather", "refresh_minutes"] => {
            let minutes: u64 = value.parse()?;
            if !REFRESH_MINUTES_RANGE.contains(&minutes) {
                anyhow::bail!(
                    "Refresh interval must be between {} and {} minutes",
                    REFRESH_MINUTES_RANGE.start(),
                    REFRESH_MINUTES_RANGE.end()
                );
            }
            config.weather.refresh_minutes = minutes;
        }
        ["photos", "base_url"] => {
            config.photos.base_url = value.to_string();
        }
        ["photos", "per_page"] => {
            let per_page: u32 = value.parse()?;
            if !PER_PAGE_RANGE.contains(&per_page) {
                anyhow::bail!(
                    "Photos per search must be between {} and {}",
                    PER_PAGE_RANGE.start(),
                    PER_PAGE_RANGE.end()
                );
            }
            config.photos.per_page = per_page;
        }
        ["assistant", "base_url"] => {
            config.assistant.base_url = value.to_string();
        }
        ["assistant", "model"] => {
            config.assistant.model = value.to_string();
        }
        ["assistant", "temperature"] => {
            config.assistant.temperature = value.parse()?;
        }
        ["assistant", "max_tokens"] => {
            config.assistant.max_tokens = value.parse()?;
        }
        ["assistant", "system_prompt"] => {
            config.assistant.system_prompt = value.to_string();
        }
        _ => anyhow::bail!("Unknown or read-only config key: {}", key),
    }

    Ok(())
}

fn path(format: OutputFormat) -> Result<()> {
    let path = Config::config_path()?;
    let exists = path.exists();

    let result = ConfigPathResult {
        path: path.to_string_lossy().to_string(),
        exists,
    };

    print_formatted(&result, format, |r| {
        format!("{}{}", r.path, if r.exists { "" } else { " (not found)" })
    });

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_defaults() {
        let config = Config::default();
        assert_eq!(
            get_config_value(&config, "general.default_destination").unwrap(),
            "New York"
        );
        assert_eq!(get_config_value(&config, "weather.units").unwrap(), "celsius");
        assert_eq!(get_config_value(&config, "general.theme").unwrap(), "sky");
        assert_eq!(get_config_value(&config, "photos.per_page").unwrap(), "12");
    }

    #[test]
    fn test_set_then_get() {
        let mut config = Config::default();
        set_config_value(&mut config, "weather.units", "Fahrenheit").unwrap();
        set_config_value(&mut config, "general.theme", "forest").unwrap();
        set_config_value(&mut config, "assistant.max_tokens", "300").unwrap();

        assert_eq!(config.weather.units, TemperatureUnit::Fahrenheit);
        assert_eq!(config.general.theme, ThemePreset::Forest);
        assert_eq!(get_config_value(&config, "assistant.max_tokens").unwrap(), "300");
    }

    #[test]
    fn test_set_rejects_bad_values() {
        let mut config = Config::default();
        assert!(set_config_value(&mut config, "weather.units", "kelvin").is_err());
        assert!(set_config_value(&mut config, "weather.refresh_minutes", "0").is_err());
        assert!(set_config_value(&mut config, "general.default_destination", "  ").is_err());
        assert!(set_config_value(&mut config, "photos.per_page", "many").is_err());
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_set_enforces_numeric_ranges() {
        let mut config = Config::default();
        assert!(set_config_value(&mut config, "photos.per_page", "0").is_err());
        assert!(set_config_value(&mut config, "photos.per_page", "81").is_err());
        assert!(set_config_value(&mut config, "weather.refresh_minutes", "1441").is_err());
        assert_eq!(config, Config::default());

        set_config_value(&mut config, "photos.per_page", "80").unwrap();
        set_config_value(&mut config, "weather.refresh_minutes", "1440").unwrap();
        assert_eq!(config.photos.per_page, 80);
        assert_eq!(config.weather.refresh_minutes, 1440);
    }

    #[test]
    fn test_unknown_key() {
        let config = Config::default();
        assert!(get_config_value(&config, "game.directory").is_err());
        assert!(get_config_value(&config, "weather").is_err());
    }
}
