use async_trait::async_trait;
use reqwest::{Client, Url};
use serde_json::Value;

use crate::{
    config::DEFAULT_BASE_URL,
    error::UpstreamError,
    location::Location,
    model::Endpoint,
};

use super::WeatherProvider;

/// OpenWeather "2.5" API client. Results are always requested in metric units.
#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    pub fn with_base_url(api_key: String, base_url: &str) -> Self {
        Self {
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    /// Full upstream URL for a lookup, credential included.
    pub fn request_url(&self, endpoint: Endpoint, location: &Location) -> Result<Url, UpstreamError> {
        let mut params = location.query_pairs();
        params.push(("appid", self.api_key.as_str()));
        params.push(("units", "metric"));

        let url = Url::parse_with_params(&format!("{}/{}", self.base_url, endpoint), &params)?;
        Ok(url)
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn fetch(&self, endpoint: Endpoint, location: &Location) -> Result<Value, UpstreamError> {
        let url = self.request_url(endpoint, location)?;

        tracing::debug!(%endpoint, location = location.kind(), "Requesting OpenWeather");

        let res = self.http.get(url).send().await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            return Err(UpstreamError::status(status, &body));
        }

        let payload: Value = serde_json::from_str(&body)?;
        Ok(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn city(name: &str) -> Location {
        Location::City(name.to_string())
    }

    #[test]
    fn city_url() {
        let provider = OpenWeatherProvider::new("KEY".into());
        let url = provider.request_url(Endpoint::Current, &city("London")).unwrap();

        assert_eq!(
            url.as_str(),
            "https://api.openweathermap.org/data/2.5/weather?q=London&appid=KEY&units=metric"
        );
    }

    #[test]
    fn coordinates_url() {
        let provider = OpenWeatherProvider::new("KEY".into());
        let loc = Location::Coordinates { lat: "51.5".into(), lon: "-0.12".into() };
        let url = provider.request_url(Endpoint::Current, &loc).unwrap();

        assert_eq!(
            url.as_str(),
            "https://api.openweathermap.org/data/2.5/weather?lat=51.5&lon=-0.12&appid=KEY&units=metric"
        );
    }

    #[test]
    fn forecast_url_and_encoding() {
        let provider = OpenWeatherProvider::with_base_url("KEY".into(), "http://localhost:1234/");
        let url = provider.request_url(Endpoint::Forecast, &city("New York")).unwrap();

        assert_eq!(url.path(), "/forecast");
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(pairs[0], ("q".to_string(), "New York".to_string()));
    }

    #[test]
    fn bad_base_url_is_an_upstream_error() {
        let provider = OpenWeatherProvider::with_base_url("KEY".into(), "not a url");
        let err = provider.request_url(Endpoint::Current, &city("Paris")).unwrap_err();
        assert!(matches!(err, UpstreamError::Url(_)));
    }

    #[tokio::test]
    async fn fetch_passes_payload_through() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/weather"))
            .and(query_param("q", "Oslo"))
            .and(query_param("appid", "KEY"))
            .and(query_param("units", "metric"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "name": "Oslo",
                "main": { "temp": 4.5 },
                "extra": [1, 2, 3]
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let provider = OpenWeatherProvider::with_base_url("KEY".into(), &mock_server.uri());
        let payload = provider.fetch(Endpoint::Current, &city("Oslo")).await.unwrap();

        assert_eq!(payload["name"], "Oslo");
        assert_eq!(payload["extra"], json!([1, 2, 3]));
    }

    #[tokio::test]
    async fn fetch_forecast_hits_forecast_path() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/forecast"))
            .and(query_param("lat", "1"))
            .and(query_param("lon", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "list": [] })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let provider = OpenWeatherProvider::with_base_url("KEY".into(), &mock_server.uri());
        let loc = Location::Coordinates { lat: "1".into(), lon: "2".into() };
        let payload = provider.fetch(Endpoint::Forecast, &loc).await.unwrap();

        assert_eq!(payload, json!({ "list": [] }));
    }

    #[tokio::test]
    async fn non_success_status_is_an_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/weather"))
            .respond_with(
                ResponseTemplate::new(404)
                    .set_body_json(json!({ "cod": "404", "message": "city not found" })),
            )
            .mount(&mock_server)
            .await;

        let provider = OpenWeatherProvider::with_base_url("KEY".into(), &mock_server.uri());
        let err = provider.fetch(Endpoint::Current, &city("Nowhere")).await.unwrap_err();

        match err {
            UpstreamError::Status { status, body } => {
                assert_eq!(status, StatusCode::NOT_FOUND);
                assert!(body.contains("city not found"));
            }
            other => panic!("expected status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn malformed_json_is_a_decode_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&mock_server)
            .await;

        let provider = OpenWeatherProvider::with_base_url("KEY".into(), &mock_server.uri());
        let err = provider.fetch(Endpoint::Current, &city("Oslo")).await.unwrap_err();

        assert!(matches!(err, UpstreamError::Decode(_)));
    }
}
