use crate::{
    Config, Endpoint, Location, error::UpstreamError, provider::openweather::OpenWeatherProvider,
};
use async_trait::async_trait;
use serde_json::Value;
use std::{fmt::Debug, sync::Arc};

pub mod openweather;

/// A weather service the handler forwards to.
///
/// The returned payload is passed through to the caller untouched.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn fetch(&self, endpoint: Endpoint, location: &Location) -> Result<Value, UpstreamError>;
}

/// Construct the provider from config.
///
/// Returns `None` when no API key is configured.
pub fn provider_from_config(config: &Config) -> Option<Arc<dyn WeatherProvider>> {
    let api_key = config.api_key()?;
    let provider = OpenWeatherProvider::with_base_url(api_key.to_owned(), config.base_url());
    Some(Arc::new(provider))
}
