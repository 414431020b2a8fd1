//! Catalog client error types.

/// Errors that can occur when fetching the station catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Feed returned an error status
    #[error("feed error {status}: {message}")]
    Api { status: u16, message: String },

    /// Failed to parse the feed JSON
    #[error("JSON parse error: {message}")]
    Json { message: String },
}
