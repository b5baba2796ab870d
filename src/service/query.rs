use reqwest::Url;

use crate::{
    foundation::{
        core::Canvas,
        error::{BadgeError, BadgeResult},
    },
    render::badge::ImageFormat,
    theme::palette::ThemeName,
};

/// What a request asks the service to produce.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum BadgeMode {
    /// Fetch the user's stats and render them.
    #[default]
    Live,
    /// Render the built-in sample record.
    Mock,
    /// Render an info panel confirming the renderer works.
    Simple,
    /// Render an info panel describing which credentials are configured.
    Env,
}

impl BadgeMode {
    /// Lenient lookup; unknown values give `None`.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "live" => Some(BadgeMode::Live),
            "mock" => Some(BadgeMode::Mock),
            "simple" => Some(BadgeMode::Simple),
            "env" => Some(BadgeMode::Env),
            _ => None,
        }
    }

    /// Canonical query value.
    pub fn as_str(self) -> &'static str {
        match self {
            BadgeMode::Live => "live",
            BadgeMode::Mock => "mock",
            BadgeMode::Simple => "simple",
            BadgeMode::Env => "env",
        }
    }
}

/// Parsed badge request. Parsing never fails on unknown or malformed values; they fall back to
/// defaults.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct BadgeQuery {
    /// Palette.
    pub theme: ThemeName,
    /// What to render.
    pub mode: BadgeMode,
    /// Output size.
    pub canvas: Canvas,
    /// Output encoding.
    pub format: ImageFormat,
    /// `userId` / `userid` parameter.
    pub user_id: Option<String>,
    /// `apiToken` / `apitoken` parameter.
    pub api_token: Option<String>,
}

impl std::fmt::Debug for BadgeQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BadgeQuery")
            .field("theme", &self.theme)
            .field("mode", &self.mode)
            .field("canvas", &self.canvas)
            .field("format", &self.format)
            .field("user_id", &self.user_id)
            .field("api_token", &self.api_token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl BadgeQuery {
    /// Parse the query string of an absolute URL or a path such as `/badge?theme=dark`.
    pub fn from_url(raw: &str) -> BadgeResult<Self> {
        let base = Url::parse("http://localhost/")
            .map_err(|e| BadgeError::validation(format!("request base url: {e}")))?;
        let url = base
            .join(raw.trim())
            .map_err(|e| BadgeError::validation(format!("invalid request url \"{raw}\": {e}")))?;
        Ok(Self::from_pairs(url.query_pairs()))
    }

    /// Build from decoded key/value pairs. Later duplicates win; `mode` beats legacy `debug`.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut q = Self::default();
        let mut mode = None;
        let mut legacy_mode = None;

        for (k, v) in pairs {
            let v = v.as_ref();
            match k.as_ref() {
                "theme" => q.theme = ThemeName::parse_lossy(v),
                "mode" => mode = BadgeMode::parse(v),
                "debug" => {
                    legacy_mode = match v.trim().to_ascii_lowercase().as_str() {
                        "mock" => Some(BadgeMode::Mock),
                        "simple" => Some(BadgeMode::Simple),
                        _ => None,
                    }
                }
                "size" => {
                    q.canvas = if v.trim().eq_ignore_ascii_case("compact") {
                        Canvas::COMPACT
                    } else {
                        Canvas::STANDARD
                    }
                }
                "format" => {
                    q.format = if v.trim().eq_ignore_ascii_case("svg") {
                        ImageFormat::Svg
                    } else {
                        ImageFormat::Png
                    }
                }
                "userId" | "userid" => q.user_id = non_blank(v),
                "apiToken" | "apitoken" => q.api_token = non_blank(v),
                _ => {}
            }
        }

        q.mode = mode.or(legacy_mode).unwrap_or_default();
        q
    }
}

fn non_blank(v: &str) -> Option<String> {
    let v = v.trim();
    (!v.is_empty()).then(|| v.to_owned())
}

#[cfg(test)]
#[path = "../../tests/unit/service/query.rs"]
mod tests;
