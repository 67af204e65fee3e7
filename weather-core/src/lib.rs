//! Core library for the weather proxy function.
//!
//! This crate defines:
//! - Configuration & credential handling
//! - The invocation/result model shared by the Lambda and the CLI
//! - Location selection from query parameters
//! - Abstraction over the upstream weather provider
//! - The request handler tying them together
//!
//! It is used by `weather-lambda` and `weather-cli`.

pub mod config;
pub mod error;
pub mod handler;
pub mod location;
pub mod model;
pub mod provider;
pub mod telemetry;

pub use config::Config;
pub use error::{HandlerError, UpstreamError};
pub use handler::WeatherHandler;
pub use location::Location;
pub use model::{Endpoint, HandlerResult, Invocation};
pub use provider::{WeatherProvider, openweather::OpenWeatherProvider};
