//! CLI command handlers

pub mod ask;
pub mod config;
pub mod lookup;

use anyhow::Result;

use crate::config::Config;
use crate::destination::{DestinationStore, DEFAULT_DESTINATION};
use crate::providers::{Credentials, Providers};

/// State shared by every command of one CLI invocation or shell session
pub struct Session {
    pub config: Config,
    pub credentials: Credentials,
    pub providers: Providers,
    /// Default city for lookups; `go` in the shell and explicit city
    /// arguments write it
    pub destination: DestinationStore,
    /// Set when the assistant runs out of quota; lasts for the session
    pub assistant_disabled: bool,
}

impl Session {
    /// Load config and keys from disk and environment
    pub fn load() -> Result<Self> {
        Self::new(Config::load()?, Credentials::from_env())
    }

    pub fn new(config: Config, credentials: Credentials) -> Result<Self> {
        let providers = Providers::new(&config, credentials.clone())?;
        let start = config.general.default_destination.trim();
        let destination = DestinationStore::new(if start.is_empty() {
            DEFAULT_DESTINATION
        } else {
            start
        });

        Ok(Self {
            config,
            credentials,
            providers,
            destination,
            assistant_disabled: false,
        })
    }

    /// Use `arg` as the city if given (and remember it), else the destination
    pub fn resolve_city(&self, arg: Option<String>) -> String {
        match arg.map(|s| s.trim().to_string()).filter(|s| !s.is_empty()) {
            Some(city) => {
                self.destination.write(city.clone());
                city
            }
            None => self.destination.read(),
        }
    }

    /// Rebuild provider clients after a config change
    pub fn reload_providers(&mut self) -> Result<()> {
        self.providers = Providers::new(&self.config, self.credentials.clone())?;
        Ok(())
    }
}
