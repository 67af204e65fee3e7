use crate::{error::HandlerError, model::Invocation};

/// Where to look up the weather.
///
/// Values are forwarded to the upstream service as given; nothing is trimmed
/// or parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    City(String),
    Coordinates { lat: String, lon: String },
}

impl Location {
    /// Pick the location from an invocation's query parameters.
    ///
    /// A city wins over coordinates when both are given. Coordinates are only
    /// used when both `lat` and `lon` are present.
    pub fn from_invocation(invocation: &Invocation) -> Result<Self, HandlerError> {
        if let Some(city) = invocation.param("city") {
            return Ok(Location::City(city.to_string()));
        }

        match (invocation.param("lat"), invocation.param("lon")) {
            (Some(lat), Some(lon)) => {
                Ok(Location::Coordinates { lat: lat.to_string(), lon: lon.to_string() })
            }
            _ => Err(HandlerError::MissingLocation),
        }
    }

    /// Query pairs identifying this location upstream.
    pub fn query_pairs(&self) -> Vec<(&'static str, &str)> {
        match self {
            Location::City(city) => vec![("q", city.as_str())],
            Location::Coordinates { lat, lon } => vec![("lat", lat.as_str()), ("lon", lon.as_str())],
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Location::City(_) => "city",
            Location::Coordinates { .. } => "coordinates",
        }
    }
}
