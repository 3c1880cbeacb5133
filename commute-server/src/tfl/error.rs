//! TfL client error types.

/// Errors from the TfL HTTP client.
///
/// `resource` is the request path below the API root, e.g.
/// `StopPoint/940GZZLUHWY/Arrivals`.
#[derive(Debug, thiserror::Error)]
pub enum TflError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("malformed response from {resource}: {message}")]
    Decode {
        resource: String,
        message: String,
        /// Start of the offending body.
        snippet: String,
    },

    #[error("{resource} returned HTTP {status}: {snippet}")]
    Status {
        resource: String,
        status: u16,
        snippet: String,
    },

    /// Unknown stop point id, or no route between two stop points.
    #[error("TfL does not know {resource}")]
    NotFound { resource: String },

    #[error("rate limited by TfL (anonymous limits apply without an app key)")]
    RateLimited,

    #[error("TfL rejected the app key")]
    Unauthorized,
}

impl TflError {
    /// Whether retrying later could succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            TflError::Http(_) | TflError::RateLimited => true,
            TflError::Status { status, .. } => *status >= 500,
            TflError::Decode { .. } | TflError::NotFound { .. } | TflError::Unauthorized => false,
        }
    }
}
