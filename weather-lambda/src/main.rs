//! AWS Lambda entry point.
//!
//! Reads the configuration from the environment once at cold start, then
//! answers each API Gateway proxy event with a proxy response.

use lambda_runtime::{Error, LambdaEvent, service_fn};
use weather_core::{Config, HandlerResult, Invocation, WeatherHandler, telemetry};

pub async fn lambda_handler(
    handler: &WeatherHandler,
    event: LambdaEvent<Invocation>,
) -> Result<HandlerResult, Error> {
    tracing::debug!(request_id = %event.context.request_id, "Handling invocation");
    Ok(handler.handle(&event.payload).await)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    telemetry::init_tracing("bootstrap=info,weather_core=info");

    let handler = WeatherHandler::from_config(&Config::from_env());
    let handler = &handler;

    lambda_runtime::run(service_fn(move |event: LambdaEvent<Invocation>| async move {
        lambda_handler(handler, event).await
    }))
    .await
}
