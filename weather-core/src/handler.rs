use serde_json::Value;
use std::sync::Arc;
use tracing::Level;

use crate::{
    Config, HandlerError, HandlerResult, Invocation, Location,
    provider::{WeatherProvider, provider_from_config},
};

/// Answers weather lookups by forwarding them to a [`WeatherProvider`].
///
/// A handler without a provider has no credential and rejects every
/// invocation with "Missing API key".
#[derive(Debug, Clone)]
pub struct WeatherHandler {
    provider: Option<Arc<dyn WeatherProvider>>,
}

impl WeatherHandler {
    pub fn new(provider: Arc<dyn WeatherProvider>) -> Self {
        Self { provider: Some(provider) }
    }

    pub fn from_config(config: &Config) -> Self {
        let provider = provider_from_config(config);
        if provider.is_none() {
            tracing::warn!("No API key configured; every request will be rejected");
        }
        Self { provider }
    }

    pub async fn handle(&self, invocation: &Invocation) -> HandlerResult {
        match self.try_handle(invocation).await {
            Ok(payload) => HandlerResult::ok(&payload),
            Err(err) => {
                log_failure(&err);
                HandlerResult::from(&err)
            }
        }
    }

    async fn try_handle(&self, invocation: &Invocation) -> Result<Value, HandlerError> {
        let provider = self.provider.as_ref().ok_or(HandlerError::MissingApiKey)?;
        let location = Location::from_invocation(invocation)?;
        let endpoint = invocation.endpoint();

        let payload = provider.fetch(endpoint, &location).await?;
        Ok(payload)
    }
}

fn failure_level(err: &HandlerError) -> Level {
    match err {
        HandlerError::Upstream(_) => Level::ERROR,
        HandlerError::MissingApiKey => Level::WARN,
        HandlerError::MissingLocation => Level::INFO,
    }
}

fn log_failure(err: &HandlerError) {
    match err {
        HandlerError::Upstream(source) => {
            tracing::error!(error = ?source, "Upstream weather request failed");
        }
        _ if failure_level(err) == Level::WARN => {
            tracing::warn!(status = err.status_code(), "{err}");
        }
        _ => tracing::info!(status = err.status_code(), "{err}"),
    }
}
