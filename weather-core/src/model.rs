use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

use crate::error::HandlerError;

/// The inbound event, in the API Gateway proxy shape.
///
/// Only the query-string parameters and the path are read; every other field
/// of the event is ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invocation {
    #[serde(default)]
    pub query_string_parameters: Option<HashMap<String, String>>,

    /// HTTP API (v2) request path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_path: Option<String>,

    /// REST API (v1) request path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl Invocation {
    /// Look up a query parameter. Empty values count as absent.
    pub fn param(&self, key: &str) -> Option<&str> {
        self.query_string_parameters
            .as_ref()
            .and_then(|params| params.get(key))
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    pub fn with_param(mut self, key: &str, value: impl Into<String>) -> Self {
        self.query_string_parameters
            .get_or_insert_with(HashMap::new)
            .insert(key.to_string(), value.into());
        self
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.raw_path = Some(path.into());
        self
    }

    /// Which upstream resource this invocation asks for, based on the last
    /// segment of its path.
    pub fn endpoint(&self) -> Endpoint {
        let path = self.raw_path.as_deref().or(self.path.as_deref()).unwrap_or_default();
        match path.trim_end_matches('/').rsplit('/').next() {
            Some("forecast") => Endpoint::Forecast,
            _ => Endpoint::Current,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Endpoint {
    #[default]
    Current,
    Forecast,
}

impl Endpoint {
    /// Path segment of the upstream resource.
    pub fn as_str(&self) -> &'static str {
        match self {
            Endpoint::Current => "weather",
            Endpoint::Forecast => "forecast",
        }
    }
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the handler hands back to the hosting runtime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HandlerResult {
    pub status_code: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<HashMap<String, String>>,
    /// JSON-encoded payload.
    pub body: String,
}

impl HandlerResult {
    /// A 200 carrying the upstream payload re-encoded as JSON.
    pub fn ok(payload: &Value) -> Self {
        let headers = HashMap::from([("Content-Type".to_string(), "application/json".to_string())]);
        Self { status_code: 200, headers: Some(headers), body: payload.to_string() }
    }

    pub fn error(status_code: u16, message: &str) -> Self {
        Self {
            status_code,
            headers: None,
            body: serde_json::json!({ "error": message }).to_string(),
        }
    }
}

impl From<&HandlerError> for HandlerResult {
    fn from(err: &HandlerError) -> Self {
        HandlerResult::error(err.status_code(), &err.to_string())
    }
}
