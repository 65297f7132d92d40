use reqwest::{Client, StatusCode, Url};

use crate::{
    error::{FetchError, InvalidInput},
    model::ForecastQuery,
};

/// 16-day daily forecast endpoint.
pub const DAILY_FORECAST_URL: &str = "https://api.openweathermap.org/data/2.5/forecast/daily";

/// Builds forecast request URLs and performs the HTTP round trip.
///
/// The round trip is a plain GET returning the raw body; turning the body
/// into entries is [`crate::decode::decode`]'s job.
#[derive(Debug, Clone)]
pub struct ForecastFetcher {
    http: Client,
    endpoint: String,
    api_key: String,
}

impl ForecastFetcher {
    pub fn new(api_key: String) -> Self {
        Self::with_endpoint(api_key, DAILY_FORECAST_URL.to_string())
    }

    pub fn with_endpoint(api_key: String, endpoint: String) -> Self {
        Self {
            http: Client::new(),
            endpoint,
            api_key,
        }
    }

    /// Turn the typed location into a request URL.
    ///
    /// The location is trimmed and percent-encoded before being substituted
    /// into the endpoint together with the entry count, units and API key.
    pub fn build_request(&self, query: &ForecastQuery) -> Result<Url, InvalidInput> {
        let location = query.location.trim();
        if location.is_empty() {
            return Err(InvalidInput::EmptyLocation);
        }

        let raw = format!(
            "{}?q={}&cnt={}&units={}&APPID={}",
            self.endpoint,
            urlencoding::encode(location),
            query.days,
            query.units,
            self.api_key,
        );

        let url = Url::parse(&raw).map_err(|source| InvalidInput::BadUrl {
            location: location.to_string(),
            source,
        })?;

        tracing::debug!(%url, "built forecast request");

        Ok(url)
    }

    /// Execute one GET round trip and return the raw payload.
    ///
    /// Only a 200 answer is read; any other status is reported without
    /// touching the body, and a failure while reading the body discards
    /// whatever arrived. The connection is released on every path.
    pub async fn execute(&self, url: Url) -> Result<String, FetchError> {
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(FetchError::ConnectionFailed)?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(FetchError::ServerError(status.as_u16()));
        }

        response.text().await.map_err(FetchError::ReadFailed)
    }
}
