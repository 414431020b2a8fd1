//! Routing collaborator error types.

/// Errors from the Mapbox routing and geocoding client.
#[derive(Debug, thiserror::Error)]
pub enum RoutingError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid or missing access token
    #[error("unauthorized: check MAPBOX_TOKEN")]
    Unauthorized,

    /// Rate limited by the API
    #[error("rate limited by the Mapbox API")]
    RateLimited,

    /// API returned an error status code
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Failed to parse response JSON
    #[error("JSON parse error: {message}")]
    Json { message: String },

    /// Geocoding found no match for the query
    #[error("no geocoding match for {query:?}")]
    NoGeocodeMatch { query: String },

    /// Directions returned no route between the given points
    #[error("no route found between the given points")]
    NoRoute,

    /// Route came back without usable legs
    #[error("route has no legs")]
    EmptyRoute,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = RoutingError::NoGeocodeMatch {
            query: "Villarriba".into(),
        };
        assert_eq!(err.to_string(), "no geocoding match for \"Villarriba\"");

        let err = RoutingError::Api {
            status: 500,
            message: "Internal Server Error".into(),
        };
        assert_eq!(err.to_string(), "API error 500: Internal Server Error");
    }
}
