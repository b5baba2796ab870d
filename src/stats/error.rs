use std::time::Duration;

/// Why the fetcher could not produce a [`crate::StatRecord`].
///
/// Every variant is an expected outcome: the service renders its `Display` text onto an error
/// panel instead of failing the request.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// Credentials were absent or blank; no request was attempted.
    #[error("Habitica credentials not found (missing {})", .missing.join(", "))]
    Configuration {
        /// Names of the absent credential parts (`userId`, `apiToken`).
        missing: Vec<&'static str>,
    },

    /// The upstream did not answer within the configured bound.
    #[error("API call timed out after {} ms", .after.as_millis())]
    Timeout {
        /// The timeout that elapsed.
        after: Duration,
    },

    /// The request could not be delivered (DNS, connect, TLS, broken body).
    #[error("could not reach the Habitica API: {0}")]
    Network(String),

    /// The upstream answered with a non-success status.
    #[error("Habitica API returned {status}: {body}")]
    UpstreamHttp {
        /// HTTP status code as received.
        status: u16,
        /// Response body, kept for diagnostics only.
        body: String,
    },

    /// The body is not the expected `{ "data": { "stats": { .. } } }` envelope.
    #[error("invalid response structure from Habitica API: {0}")]
    MalformedResponse(String),

    /// The stats object lacks required fields.
    #[error("missing required fields from Habitica API: {}", .names.join(", "))]
    MissingFields {
        /// Absent field names, in required-field order.
        names: Vec<String>,
    },
}

impl FetchError {
    /// `true` when the failure happened before any network traffic.
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration { .. })
    }
}
