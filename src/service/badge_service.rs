use crate::{
    foundation::error::{BadgeError, BadgeResult},
    render::badge::{BadgeImage, BadgeRenderer, Panel},
    service::{
        config::ServiceConfig,
        query::{BadgeMode, BadgeQuery},
        response::{BadgeResponse, CachePolicy, cache_control},
    },
    stats::{
        error::FetchError,
        fetch::{Credentials, HttpTransport, StatsFetcher, Transport},
        record::StatRecord,
    },
    theme::palette::Theme,
};

const MISSING_CREDENTIALS: &str = "Missing Credentials";
const UPSTREAM_ERROR: &str = "Habitica API Error";
const UPSTREAM_HINT: &str = "Check your userId and apiToken";
const UNEXPECTED_ERROR: &str = "Unexpected Error";

/// Request dispatcher: query in, image response out.
///
/// Holds only immutable state; one instance can serve concurrent requests.
pub struct BadgeService<T: Transport = HttpTransport> {
    config: ServiceConfig,
    fetcher: StatsFetcher<T>,
    renderer: BadgeRenderer,
}

impl BadgeService<HttpTransport> {
    /// Service talking to the configured upstream over HTTP.
    pub fn from_config(config: ServiceConfig) -> BadgeResult<Self> {
        let fetcher = StatsFetcher::http(config.fetch_config()?)?;
        let renderer = BadgeRenderer::with_fonts_dir(config.fonts_dir.as_deref());
        Ok(Self {
            config,
            fetcher,
            renderer,
        })
    }
}

impl<T: Transport> BadgeService<T> {
    /// Service over an arbitrary transport.
    pub fn new(config: ServiceConfig, transport: T, renderer: BadgeRenderer) -> BadgeResult<Self> {
        let fetcher = StatsFetcher::new(config.fetch_config()?, transport);
        Ok(Self {
            config,
            fetcher,
            renderer,
        })
    }

    /// Active configuration.
    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// Shared renderer.
    pub fn renderer(&self) -> &BadgeRenderer {
        &self.renderer
    }

    /// Credentials for `query`: query values when allowed, configured values otherwise.
    pub fn credentials_for(&self, query: &BadgeQuery) -> Result<Credentials, FetchError> {
        let pick = |from_query: &Option<String>, configured: &Option<String>| {
            if self.config.allow_query_credentials && from_query.is_some() {
                from_query.clone()
            } else {
                configured.clone()
            }
        };
        Credentials::from_parts(
            pick(&query.user_id, &self.config.user_id),
            pick(&query.api_token, &self.config.api_token),
        )
    }

    /// Resolve credentials and fetch one record.
    pub fn fetch_stats(&self, query: &BadgeQuery) -> Result<StatRecord, FetchError> {
        let credentials = self.credentials_for(query)?;
        self.fetcher.fetch(&credentials)
    }

    /// Parse a request URL and dispatch it. An unparsable URL is served with default options.
    pub fn handle_url(&self, raw: &str) -> BadgeResponse {
        let query = BadgeQuery::from_url(raw).unwrap_or_else(|err| {
            tracing::warn!(%err, "unparsable request url; using defaults");
            BadgeQuery::default()
        });
        self.handle(&query)
    }

    /// Dispatch one request. Expected failures come back as 200 panels.
    #[tracing::instrument(skip_all, fields(mode = query.mode.as_str(), theme = query.theme.as_str()))]
    pub fn handle(&self, query: &BadgeQuery) -> BadgeResponse {
        let theme = Theme::named(query.theme);

        let rendered = match query.mode {
            BadgeMode::Live => match self.fetch_stats(query) {
                Ok(record) => self.badge(&record, &theme, query),
                Err(err) => Err(fetch_panel(&err)),
            },
            BadgeMode::Mock => self.badge(&StatRecord::sample(), &theme, query),
            BadgeMode::Simple => Err(Panel::info(
                "Renderer OK",
                "Badge rendering is working.",
            )),
            BadgeMode::Env => Err(self.env_panel()),
        };

        let result = match rendered {
            Ok(image) => Ok((image, CachePolicy::Badge)),
            Err(panel) => self
                .renderer
                .render_panel_or_solid(&panel, &theme, query.canvas, query.format)
                .map(|image| (image, CachePolicy::Panel)),
        };

        match result {
            Ok((image, policy)) => BadgeResponse::image(image, self.cache_header(policy)),
            Err(err) => {
                tracing::error!(%err, "could not produce any image");
                BadgeResponse::internal_error()
            }
        }
    }

    fn badge(
        &self,
        record: &StatRecord,
        theme: &Theme,
        query: &BadgeQuery,
    ) -> Result<BadgeImage, Panel> {
        self.renderer
            .render_badge(record, theme, query.canvas, query.format)
            .map_err(|err| render_panel(&err))
    }

    fn env_panel(&self) -> Panel {
        let state = |v: &Option<String>| {
            if v.as_deref().is_some_and(|s| !s.trim().is_empty()) {
                "Set"
            } else {
                "Missing"
            }
        };
        Panel::info(
            "Credentials Status",
            format!(
                "User ID: {} API Token: {}",
                state(&self.config.user_id),
                state(&self.config.api_token)
            ),
        )
        .with_hint(format!(
            "Query credentials: {}",
            if self.config.allow_query_credentials {
                "allowed"
            } else {
                "ignored"
            }
        ))
    }

    fn cache_header(&self, policy: CachePolicy) -> String {
        match policy {
            CachePolicy::Badge => cache_control(self.config.success_max_age_secs),
            CachePolicy::Panel => cache_control(self.config.error_max_age_secs),
        }
    }
}

fn fetch_panel(err: &FetchError) -> Panel {
    if err.is_configuration() {
        tracing::warn!(%err, "no credentials available");
        Panel::error(MISSING_CREDENTIALS, err.to_string())
    } else {
        tracing::warn!(%err, "stats fetch failed");
        Panel::error(UPSTREAM_ERROR, err.to_string()).with_hint(UPSTREAM_HINT)
    }
}

fn render_panel(err: &BadgeError) -> Panel {
    tracing::warn!(%err, "badge rendering failed");
    Panel::error(UNEXPECTED_ERROR, err.to_string())
}

#[cfg(test)]
#[path = "../../tests/unit/service/badge_service.rs"]
mod tests;
