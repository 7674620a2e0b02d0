//! Provider API keys
//!
//! Keys are read once at startup from the environment. They are checked
//! lazily: a provider asks for its key right before a call and gets
//! `ConfigurationMissing` when the value is absent or still a placeholder.

use std::fmt;

use super::{Provider, ProviderError};

/// A secret API key. Never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// The raw key, for building a request
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(****)")
    }
}

/// Raw key values for every provider
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    weather: Option<ApiKey>,
    photos: Option<ApiKey>,
    assistant: Option<ApiKey>,
}

impl Credentials {
    /// Read keys from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read keys through an arbitrary lookup, keyed by environment variable name
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |provider: Provider| lookup(provider.env_var()).map(ApiKey);
        Self {
            weather: read(Provider::Weather),
            photos: read(Provider::Photos),
            assistant: read(Provider::Assistant),
        }
    }

    /// The usable key for `provider`
    pub fn key(&self, provider: Provider) -> Result<&ApiKey, ProviderError> {
        let slot = match provider {
            Provider::Weather => &self.weather,
            Provider::Photos => &self.photos,
            Provider::Assistant => &self.assistant,
        };

        match slot {
            Some(key) if !is_placeholder(key.expose()) => Ok(key),
            _ => {
                tracing::warn!("{} is not configured", provider.env_var());
                Err(ProviderError::ConfigurationMissing(provider))
            }
        }
    }

    /// Whether `provider` has a usable key
    pub fn is_configured(&self, provider: Provider) -> bool {
        let slot = match provider {
            Provider::Weather => &self.weather,
            Provider::Photos => &self.photos,
            Provider::Assistant => &self.assistant,
        };
        slot.as_ref().is_some_and(|key| !is_placeholder(key.expose()))
    }
}

/// Blank values and template values such as `your_openai_api_key`
fn is_placeholder(value: &str) -> bool {
    let value = value.trim().to_ascii_lowercase();
    value.is_empty()
        || value == "changeme"
        || (value.starts_with("your_") && value.ends_with("_key"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn creds(pairs: &[(&str, &str)]) -> Credentials {
        let pairs: Vec<(String, String)> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Credentials::from_lookup(move |name| {
            pairs.iter().find(|(k, _)| k == name).map(|(_, v)| v.clone())
        })
    }

    #[test]
    fn test_missing_key() {
        let c = creds(&[]);
        assert_eq!(
            c.key(Provider::Weather).unwrap_err(),
            ProviderError::ConfigurationMissing(Provider::Weather)
        );
        assert!(!c.is_configured(Provider::Weather));
    }

    #[test]
    fn test_placeholder_keys_rejected() {
        let c = creds(&[
            ("OPENWEATHER_API_KEY", "your_openweather_api_key"),
            ("PEXELS_API_KEY", "   "),
            ("OPENAI_API_KEY", "changeme"),
        ]);
        for provider in Provider::all() {
            assert!(c.key(*provider).is_err(), "{:?} should be missing", provider);
        }
    }

    #[test]
    fn test_real_key_accepted() {
        let c = creds(&[("OPENAI_API_KEY", "sk-test-123")]);
        assert_eq!(c.key(Provider::Assistant).unwrap().expose(), "sk-test-123");
        assert!(c.is_configured(Provider::Assistant));
        assert!(!c.is_configured(Provider::Photos));
    }

    #[test]
    fn test_debug_hides_key() {
        let c = creds(&[("PEXELS_API_KEY", "super-secret")]);
        let printed = format!("{:?}", c);
        assert!(!printed.contains("super-secret"));
    }
}
