//! External data providers
//!
//! This module provides:
//!
//! - `WeatherClient`: current conditions from OpenWeather
//! - `PhotoClient`: destination photos from Pexels
//! - `AssistantClient`: travel advice from the OpenAI chat completions API
//! - `ActivityCatalog`: curated things to do, served through the same async path
//!
//! Every remote client checks its API key before sending anything and maps
//! failures onto [`ProviderError`]. Each view turns those errors into its own
//! user-facing message.

pub mod activities;
pub mod assistant;
pub mod credentials;
pub mod photos;
pub mod weather;

use std::time::Duration;

use anyhow::Result;
use reqwest::StatusCode;
use thiserror::Error;

pub use activities::{Activity, ActivityCatalog};
pub use assistant::AssistantClient;
pub use credentials::Credentials;
pub use photos::{Photo, PhotoClient};
pub use weather::{TemperatureUnit, WeatherClient, WeatherReport};

use crate::config::Config;

/// User agent for outbound requests
const USER_AGENT: &str = concat!("TravelX/", env!("CARGO_PKG_VERSION"));

/// Request timeout for provider calls
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Providers that need an API key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Provider {
    Weather,
    Photos,
    Assistant,
}

impl Provider {
    /// All keyed providers
    pub fn all() -> &'static [Provider] {
        &[Provider::Weather, Provider::Photos, Provider::Assistant]
    }

    /// Display name of the service behind this provider
    pub fn name(&self) -> &'static str {
        match self {
            Provider::Weather => "OpenWeather",
            Provider::Photos => "Pexels",
            Provider::Assistant => "OpenAI",
        }
    }

    /// Environment variable holding the API key
    pub fn env_var(&self) -> &'static str {
        match self {
            Provider::Weather => "OPENWEATHER_API_KEY",
            Provider::Photos => "PEXELS_API_KEY",
            Provider::Assistant => "OPENAI_API_KEY",
        }
    }
}

/// Errors a provider call can end in
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProviderError {
    #[error("{} API key is not configured ({})", .0.name(), .0.env_var())]
    ConfigurationMissing(Provider),

    #[error("Not found")]
    NotFound,

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Quota exceeded")]
    QuotaExceeded,

    #[error("{0}")]
    Unknown(String),
}

impl From<reqwest::Error> for ProviderError {
    fn from(e: reqwest::Error) -> Self {
        ProviderError::Unknown(e.to_string())
    }
}

/// Classify a failed response by status code and error payload.
///
/// Quota exhaustion is recognised from the payload (`insufficient_quota`)
/// because providers report it under a generic 429.
pub fn classify(status: StatusCode, body: &str) -> ProviderError {
    if is_quota_payload(body) {
        return ProviderError::QuotaExceeded;
    }

    match status {
        StatusCode::NOT_FOUND => ProviderError::NotFound,
        StatusCode::UNAUTHORIZED => ProviderError::Unauthorized,
        _ => {
            let snippet: String = body.chars().take(200).collect();
            ProviderError::Unknown(format!("HTTP {} - {}", status, snippet))
        }
    }
}

fn is_quota_payload(body: &str) -> bool {
    let Ok(value) = serde_json::from_str::<serde_json::Value>(body) else {
        return false;
    };
    let Some(error) = value.get("error") else {
        return false;
    };

    ["code", "type"].iter().any(|field| {
        error.get(field).and_then(|v| v.as_str()) == Some("insufficient_quota")
    })
}

/// Turn a non-success response into a [`ProviderError`]
pub(crate) async fn error_from_response(response: reqwest::Response) -> ProviderError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    let error = classify(status, &body);
    tracing::warn!("Provider responded {}: {}", status, error);
    error
}

/// Build the shared HTTP client
pub fn http_client() -> Result<reqwest::Client> {
    let client = reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(REQUEST_TIMEOUT)
        .build()?;
    Ok(client)
}

/// Every provider, wired from configuration and credentials
#[derive(Debug, Clone)]
pub struct Providers {
    pub weather: WeatherClient,
    pub photos: PhotoClient,
    pub assistant: AssistantClient,
    pub activities: ActivityCatalog,
    http: reqwest::Client,
}

impl Providers {
    /// Create all clients sharing one HTTP connection pool
    pub fn new(config: &Config, credentials: Credentials) -> Result<Self> {
        let http = http_client()?;

        Ok(Self {
            weather: WeatherClient::new(http.clone(), &config.weather, credentials.clone()),
            photos: PhotoClient::new(http.clone(), &config.photos, credentials.clone()),
            assistant: AssistantClient::new(http.clone(), &config.assistant, credentials),
            activities: ActivityCatalog::default(),
            http,
        })
    }

    /// The shared HTTP client (used for image downloads)
    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }
}

#[cfg(test)]
pub(crate) mod mock_server;
