//! Error types for the server dashboard

/// Errors that can occur while talking to the server API or loading configuration
#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    #[error("Configuration error: {0}")]
    Config(String),

    /// Transport failure; the description already names the request
    #[error("{0}")]
    Http(String),

    /// The backend answered with a non-success status code
    #[error("An error occurred - Error code: {status_code}")]
    Api { status_code: u16 },

    #[error("Response is missing the {0} payload")]
    MissingPayload(&'static str),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for dashboard operations
pub type Result<T> = std::result::Result<T, DashboardError>;
