use std::{
    fmt,
    sync::{Arc, mpsc},
    thread,
    time::Duration,
};

use reqwest::Url;

use crate::{
    foundation::error::{BadgeError, BadgeResult},
    stats::{error::FetchError, record::StatRecord},
};

/// Default upstream API root.
pub const DEFAULT_API_BASE: &str = "https://habitica.com/api/v3/";
/// Default value of the `x-client` header.
pub const DEFAULT_CLIENT_ID: &str = "habitica-readme-stats-1.0.0";
/// Default bound on a single fetch.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

const MAX_ERROR_BODY_CHARS: usize = 512;

/// User id + API token pair sent with every request.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    user_id: String,
    api_token: String,
}

impl Credentials {
    /// Both parts must be non-blank.
    pub fn new(
        user_id: impl Into<String>,
        api_token: impl Into<String>,
    ) -> Result<Self, FetchError> {
        Self::from_parts(Some(user_id.into()), Some(api_token.into()))
    }

    /// Build from optional parts, reporting every absent one.
    pub fn from_parts(
        user_id: Option<String>,
        api_token: Option<String>,
    ) -> Result<Self, FetchError> {
        let user_id = user_id.map(|s| s.trim().to_owned()).filter(|s| !s.is_empty());
        let api_token = api_token
            .map(|s| s.trim().to_owned())
            .filter(|s| !s.is_empty());

        match (user_id, api_token) {
            (Some(user_id), Some(api_token)) => Ok(Self { user_id, api_token }),
            (user_id, api_token) => {
                let mut missing = Vec::new();
                if user_id.is_none() {
                    missing.push("userId");
                }
                if api_token.is_none() {
                    missing.push("apiToken");
                }
                Err(FetchError::Configuration { missing })
            }
        }
    }

    /// The `x-api-user` value.
    pub fn user_id(&self) -> &str {
        &self.user_id
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("user_id", &self.user_id)
            .field("api_token", &"<redacted>")
            .finish()
    }
}

/// Upstream location and limits, injected at construction.
#[derive(Clone, Debug)]
pub struct FetchConfig {
    /// API root; `user` is resolved against it.
    pub api_base: Url,
    /// `x-client` header value.
    pub client_id: String,
    /// Bound on one fetch, connection included.
    pub timeout: Duration,
}

impl FetchConfig {
    /// Parse `api_base`; a missing trailing slash is added so `user` resolves below it.
    pub fn new(
        api_base: &str,
        client_id: impl Into<String>,
        timeout: Duration,
    ) -> BadgeResult<Self> {
        if timeout.is_zero() {
            return Err(BadgeError::config("fetch timeout must be > 0"));
        }
        let mut base = api_base.trim().to_owned();
        if !base.ends_with('/') {
            base.push('/');
        }
        let api_base = Url::parse(&base)
            .map_err(|e| BadgeError::config(format!("invalid api base url \"{api_base}\": {e}")))?;
        Ok(Self {
            api_base,
            client_id: client_id.into(),
            timeout,
        })
    }

    /// The `GET /user` endpoint.
    pub fn user_url(&self) -> BadgeResult<Url> {
        self.api_base
            .join("user")
            .map_err(|e| BadgeError::config(format!("resolve user endpoint: {e}")))
    }

    /// Habitica defaults: public API root, stock client id, 10 s timeout.
    pub fn habitica() -> BadgeResult<Self> {
        Self::new(DEFAULT_API_BASE, DEFAULT_CLIENT_ID, DEFAULT_TIMEOUT)
    }
}

/// A fully built outbound request.
#[derive(Clone, Debug)]
pub struct UpstreamRequest {
    /// Target URL.
    pub url: Url,
    /// Header name/value pairs, in sending order.
    pub headers: Vec<(&'static str, String)>,
}

impl UpstreamRequest {
    /// First header value with `name` (case-insensitive).
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Raw upstream answer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UpstreamResponse {
    /// HTTP status code.
    pub status: u16,
    /// Body text.
    pub body: String,
}

/// One blocking GET. Implementations map their failures onto
/// [`FetchError::Timeout`] or [`FetchError::Network`].
pub trait Transport: Send + Sync + 'static {
    /// Perform the request.
    fn get(&self, request: &UpstreamRequest) -> Result<UpstreamResponse, FetchError>;
}

/// [`Transport`] backed by `reqwest::blocking`.
pub struct HttpTransport {
    client: reqwest::blocking::Client,
    timeout: Duration,
}

impl HttpTransport {
    /// Build a client whose own request timeout matches the fetch bound.
    pub fn new(timeout: Duration) -> BadgeResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout)
            .build()
            .map_err(|e| BadgeError::config(format!("build http client: {e}")))?;
        Ok(Self { client, timeout })
    }

    fn classify(&self, err: reqwest::Error) -> FetchError {
        if err.is_timeout() {
            FetchError::Timeout {
                after: self.timeout,
            }
        } else {
            FetchError::Network(err.to_string())
        }
    }
}

impl Transport for HttpTransport {
    fn get(&self, request: &UpstreamRequest) -> Result<UpstreamResponse, FetchError> {
        let mut builder = self.client.get(request.url.clone());
        for (name, value) in &request.headers {
            builder = builder.header(*name, value);
        }

        let response = builder.send().map_err(|e| self.classify(e))?;
        let status = response.status().as_u16();
        let body = response.text().map_err(|e| self.classify(e))?;
        Ok(UpstreamResponse { status, body })
    }
}

/// Fetches and validates one [`StatRecord`] per call. No retries, no state between calls.
pub struct StatsFetcher<T: Transport = HttpTransport> {
    config: FetchConfig,
    transport: Arc<T>,
}

impl StatsFetcher<HttpTransport> {
    /// Fetcher using the `reqwest` transport.
    pub fn http(config: FetchConfig) -> BadgeResult<Self> {
        let transport = HttpTransport::new(config.timeout)?;
        Ok(Self::new(config, transport))
    }
}

impl<T: Transport> StatsFetcher<T> {
    /// Fetcher over an arbitrary transport.
    pub fn new(config: FetchConfig, transport: T) -> Self {
        Self {
            config,
            transport: Arc::new(transport),
        }
    }

    /// Injected configuration.
    pub fn config(&self) -> &FetchConfig {
        &self.config
    }

    /// Headers and URL for `GET /user`.
    pub fn build_request(&self, credentials: &Credentials) -> Result<UpstreamRequest, FetchError> {
        let url = self
            .config
            .user_url()
            .map_err(|e| FetchError::Network(e.to_string()))?;
        Ok(UpstreamRequest {
            url,
            headers: vec![
                ("x-client", self.config.client_id.clone()),
                ("x-api-user", credentials.user_id.clone()),
                ("x-api-key", credentials.api_token.clone()),
                ("Content-Type", "application/json".to_owned()),
            ],
        })
    }

    /// Fetch, bounded by the configured timeout, then validate.
    #[tracing::instrument(skip_all, fields(user_id = %credentials.user_id()))]
    pub fn fetch(&self, credentials: &Credentials) -> Result<StatRecord, FetchError> {
        let request = self.build_request(credentials)?;
        tracing::debug!(url = %request.url, "requesting upstream stats");

        let response = self.race_timeout(request)?;
        tracing::debug!(status = response.status, "upstream responded");
        interpret_response(response)
    }

    /// Run the transport on a worker thread and wait at most `timeout` for it.
    ///
    /// The worker is never joined; if the timer wins, its late result is dropped on send.
    fn race_timeout(&self, request: UpstreamRequest) -> Result<UpstreamResponse, FetchError> {
        let (tx, rx) = mpsc::sync_channel(1);
        let transport = Arc::clone(&self.transport);
        thread::Builder::new()
            .name("habitica-fetch".to_owned())
            .spawn(move || {
                let _ = tx.send(transport.get(&request));
            })
            .map_err(|e| FetchError::Network(format!("spawn fetch worker: {e}")))?;

        match rx.recv_timeout(self.config.timeout) {
            Ok(result) => result,
            Err(mpsc::RecvTimeoutError::Timeout) => {
                tracing::warn!(
                    timeout_ms = self.config.timeout.as_millis() as u64,
                    "upstream fetch timed out"
                );
                Err(FetchError::Timeout {
                    after: self.config.timeout,
                })
            }
            Err(mpsc::RecvTimeoutError::Disconnected) => Err(FetchError::Network(
                "fetch worker exited without a result".to_owned(),
            )),
        }
    }
}

/// Status check first, then envelope and field validation.
pub fn interpret_response(response: UpstreamResponse) -> Result<StatRecord, FetchError> {
    if !(200..300).contains(&response.status) {
        let body = truncate_chars(&response.body, MAX_ERROR_BODY_CHARS);
        tracing::warn!(status = response.status, body = %body, "upstream returned an error status");
        return Err(FetchError::UpstreamHttp {
            status: response.status,
            body,
        });
    }
    StatRecord::from_envelope(&response.body)
}

fn truncate_chars(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((idx, _)) => format!("{}…", &s[..idx]),
        None => s.to_owned(),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/stats/fetch.rs"]
mod tests;
