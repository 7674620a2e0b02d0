//! Pexels photo search

use std::time::Instant;

use serde::{Deserialize, Serialize};

use super::credentials::Credentials;
use super::{error_from_response, Provider, ProviderError};
use crate::config::PhotosConfig;

/// Alt text used when the photographer left none
const FALLBACK_ALT_TEXT: &str = "Travel destination image";

/// A photo matching the search
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Photo {
    pub id: String,
    /// Large rendition, opened in the browser
    pub image_url: String,
    /// Medium rendition, shown in the grid
    pub thumbnail_url: String,
    pub alt_text: String,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    photos: Vec<PexelsPhoto>,
}

#[derive(Debug, Deserialize)]
struct PexelsPhoto {
    id: u64,
    #[serde(default)]
    alt: Option<String>,
    src: PexelsSources,
}

#[derive(Debug, Deserialize)]
struct PexelsSources {
    large: String,
    medium: String,
}

impl From<PexelsPhoto> for Photo {
    fn from(p: PexelsPhoto) -> Self {
        let alt_text = p
            .alt
            .filter(|alt| !alt.trim().is_empty())
            .unwrap_or_else(|| FALLBACK_ALT_TEXT.to_string());

        Self {
            id: p.id.to_string(),
            image_url: p.src.large,
            thumbnail_url: p.src.medium,
            alt_text,
        }
    }
}

/// Pexels API client
#[derive(Debug, Clone)]
pub struct PhotoClient {
    http: reqwest::Client,
    base_url: String,
    per_page: u32,
    credentials: Credentials,
}

impl PhotoClient {
    pub fn new(http: reqwest::Client, config: &PhotosConfig, credentials: Credentials) -> Self {
        Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            per_page: config.per_page,
            credentials,
        }
    }

    /// Search photos for `query` using the configured page size
    pub async fn search(&self, query: &str) -> Result<Vec<Photo>, ProviderError> {
        self.search_with_limit(query, self.per_page).await
    }

    /// Search photos for `query`, returning at most `per_page` results
    pub async fn search_with_limit(
        &self,
        query: &str,
        per_page: u32,
    ) -> Result<Vec<Photo>, ProviderError> {
        let key = self.credentials.key(Provider::Photos)?;
        let start = Instant::now();
        let url = format!("{}/v1/search", self.base_url);

        let response = self
            .http
            .get(&url)
            .header("Authorization", key.expose())
            .query(&[("query", query.to_string()), ("per_page", per_page.to_string())])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }

        let body: SearchResponse = response.json().await?;
        let photos: Vec<Photo> = body.photos.into_iter().map(Photo::from).collect();
        tracing::info!(
            "Fetched {} photos for {} in {:.1}s",
            photos.len(),
            query,
            start.elapsed().as_secs_f32()
        );
        Ok(photos)
    }
}

/// Message shown in the images view for a failed search
pub fn describe_error(error: &ProviderError) -> String {
    match error {
        ProviderError::ConfigurationMissing(_) => {
            "Please configure your Pexels API key (PEXELS_API_KEY).".to_string()
        }
        ProviderError::Unauthorized => {
            "Please configure a valid Pexels API key (PEXELS_API_KEY).".to_string()
        }
        _ => "Failed to load images. Please try again.".to_string(),
    }
}
