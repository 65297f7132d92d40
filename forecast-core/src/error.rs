use thiserror::Error;

/// Location text that cannot be turned into a request URL.
#[derive(Debug, Error)]
pub enum InvalidInput {
    #[error("Location is empty")]
    EmptyLocation,

    #[error("Location '{location}' does not form a valid request URL")]
    BadUrl {
        location: String,
        #[source]
        source: url::ParseError,
    },
}

/// Failures of a single HTTP round trip.
#[derive(Debug, Error)]
pub enum FetchError {
    /// DNS failure, refused connection, or timeout before a status arrived.
    #[error("Could not reach the forecast service")]
    ConnectionFailed(#[source] reqwest::Error),

    /// Any status other than 200 OK. The body is not read.
    #[error("Forecast service answered with status {0}")]
    ServerError(u16),

    /// The connection dropped while reading the body; partial data is
    /// discarded.
    #[error("Reading the forecast response failed")]
    ReadFailed(#[source] reqwest::Error),
}

/// Failures turning a payload into forecast entries.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The payload is not JSON, or has no top-level day list.
    #[error("Forecast payload is malformed")]
    MalformedPayload(#[source] serde_json::Error),
}

/// Any way a submitted fetch can fail, from input validation through
/// decoding. Recovered at the presentation boundary, never fatal.
#[derive(Debug, Error)]
pub enum ForecastFailure {
    #[error(transparent)]
    Input(#[from] InvalidInput),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Decode(#[from] DecodeError),
}
