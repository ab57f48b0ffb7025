//! Provider → builder registry

use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, warn};

use super::traits::FeedBuilder;
use super::vimeo::{VimeoBuilder, VimeoHttpApi};
use super::youtube::{YoutubeBuilder, YoutubeHttpApi};
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::models::Provider;
use crate::utils::UpstreamHttpClient;

/// Immutable mapping from provider to builder, populated once at startup
///
/// # Examples
///
/// ```rust
/// use vidcast::builders::BuilderRegistry;
/// use vidcast::models::Provider;
///
/// let registry = BuilderRegistry::new();
/// assert!(registry.get(Provider::Vimeo).is_err());
/// ```
#[derive(Clone, Default)]
pub struct BuilderRegistry {
    builders: HashMap<Provider, Arc<dyn FeedBuilder>>,
}

impl BuilderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a builder, replacing any previous one for the same provider
    pub fn with_builder(mut self, builder: Arc<dyn FeedBuilder>) -> Self {
        let provider = builder.provider();
        if self.builders.insert(provider, builder).is_some() {
            warn!("Replacing registered builder for {}", provider);
        }
        self
    }

    /// Register a builder for every provider with an API key configured
    pub fn from_config(config: &Config) -> AppResult<Self> {
        let client = UpstreamHttpClient::new(&config.http)?;
        let mut registry = Self::new();

        if let Some(token) = config.vimeo.api_key() {
            let api = VimeoHttpApi::new(client.clone(), &config.vimeo.api_url, token)?;
            registry = registry.with_builder(Arc::new(VimeoBuilder::new(
                Arc::new(api),
                config.download.base_url.clone(),
            )));
        }

        if let Some(key) = config.youtube.api_key() {
            let api = YoutubeHttpApi::new(client, &config.youtube.api_url, key)?;
            registry = registry.with_builder(Arc::new(YoutubeBuilder::new(
                Arc::new(api),
                config.download.base_url.clone(),
            )));
        }

        if registry.is_empty() {
            warn!("No provider API keys configured; every feed will be unsupported");
        } else {
            info!("Registered feed builders: {:?}", registry.providers());
        }

        Ok(registry)
    }

    /// Builder for `provider`, or `UnsupportedProvider`
    pub fn get(&self, provider: Provider) -> AppResult<Arc<dyn FeedBuilder>> {
        self.builders
            .get(&provider)
            .cloned()
            .ok_or(AppError::UnsupportedProvider { provider })
    }

    pub fn contains(&self, provider: Provider) -> bool {
        self.builders.contains_key(&provider)
    }

    pub fn providers(&self) -> Vec<Provider> {
        let mut providers: Vec<Provider> = self.builders.keys().copied().collect();
        providers.sort_by_key(|p| p.to_string());
        providers
    }

    pub fn is_empty(&self) -> bool {
        self.builders.is_empty()
    }
}
