//! OpenWeather current conditions

use std::time::Instant;

use serde::{Deserialize, Serialize};

use super::credentials::Credentials;
use super::{error_from_response, Provider, ProviderError};
use crate::config::WeatherConfig;

/// Current conditions for a city, in display units
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherReport {
    /// Rounded temperature in degrees Celsius
    pub temperature_c: i32,
    /// Free-text description, e.g. "light rain"
    pub condition: String,
    /// Relative humidity in percent
    pub humidity: i32,
    /// Wind speed in km/h
    pub wind_kmh: i32,
    /// Condition icon (PNG)
    pub icon_url: String,
}

/// Temperature display unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureUnit {
    #[default]
    Celsius,
    Fahrenheit,
}

impl TemperatureUnit {
    /// Convert a Celsius reading into this unit
    pub fn convert(&self, celsius: i32) -> i32 {
        match self {
            TemperatureUnit::Celsius => celsius,
            TemperatureUnit::Fahrenheit => (celsius as f64 * 9.0 / 5.0 + 32.0).round() as i32,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            TemperatureUnit::Celsius => "°C",
            TemperatureUnit::Fahrenheit => "°F",
        }
    }

    /// Format a Celsius reading, e.g. "21°C"
    pub fn format(&self, celsius: i32) -> String {
        format!("{}{}", self.convert(celsius), self.symbol())
    }
}

#[derive(Debug, Deserialize)]
struct OwmResponse {
    main: OwmMain,
    weather: Vec<OwmCondition>,
    wind: OwmWind,
}

#[derive(Debug, Deserialize)]
struct OwmMain {
    temp: f64,
    humidity: f64,
}

#[derive(Debug, Deserialize)]
struct OwmCondition {
    description: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct OwmWind {
    speed: f64,
}

impl TryFrom<OwmResponse> for WeatherReport {
    type Error = ProviderError;

    fn try_from(body: OwmResponse) -> Result<Self, Self::Error> {
        let condition = body
            .weather
            .into_iter()
            .next()
            .ok_or_else(|| ProviderError::Unknown("Response has no weather conditions".into()))?;

        Ok(Self {
            temperature_c: body.main.temp.round() as i32,
            condition: condition.description,
            humidity: body.main.humidity.round() as i32,
            // m/s to km/h
            wind_kmh: (body.wind.speed * 3.6).round() as i32,
            icon_url: format!("https://openweathermap.org/img/wn/{}@2x.png", condition.icon),
        })
    }
}

/// OpenWeather API client
#[derive(Debug, Clone)]
pub struct WeatherClient {
    http: reqwest::Client,
    base_url: String,
    credentials: Credentials,
}

impl WeatherClient {
    pub fn new(http: reqwest::Client, config: &WeatherConfig, credentials: Credentials) -> Self {
        Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            credentials,
        }
    }

    /// Fetch current conditions for `city`
    pub async fn current(&self, city: &str) -> Result<WeatherReport, ProviderError> {
        let key = self.credentials.key(Provider::Weather)?;
        let start = Instant::now();
        let url = format!("{}/data/2.5/weather", self.base_url);

        let response = self
            .http
            .get(&url)
            .query(&[("q", city), ("units", "metric"), ("appid", key.expose())])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }

        let body: OwmResponse = response.json().await?;
        let report = WeatherReport::try_from(body)?;
        tracing::info!(
            "Fetched weather for {} in {:.1}s",
            city,
            start.elapsed().as_secs_f32()
        );
        Ok(report)
    }
}

/// Message shown in the weather view for a failed fetch
pub fn describe_error(error: &ProviderError) -> String {
    match error {
        ProviderError::NotFound => {
            "City not found. Please check the spelling and try again.".to_string()
        }
        ProviderError::Unauthorized => {
            "Please configure a valid OpenWeather API key (OPENWEATHER_API_KEY).".to_string()
        }
        ProviderError::ConfigurationMissing(_) => {
            "Please configure your OpenWeather API key (OPENWEATHER_API_KEY).".to_string()
        }
        ProviderError::QuotaExceeded | ProviderError::Unknown(_) => {
            "Failed to load weather data. Please try again.".to_string()
        }
    }
}
