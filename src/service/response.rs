use crate::render::badge::{BadgeImage, ImageFormat};

/// Which `Cache-Control` lifetime applies.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CachePolicy {
    /// A rendered stats badge.
    Badge,
    /// An error or diagnostic panel.
    Panel,
}

/// Transport-agnostic HTTP response.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BadgeResponse {
    /// HTTP status code.
    pub status: u16,
    /// Header name/value pairs in emission order.
    pub headers: Vec<(&'static str, String)>,
    /// Encoded image, empty on 500.
    pub body: Vec<u8>,
}

impl BadgeResponse {
    /// 200 response carrying `image`.
    pub fn image(image: BadgeImage, cache_control: String) -> Self {
        let mut headers = vec![
            ("Content-Type", image.format.content_type().to_owned()),
            ("Cache-Control", cache_control),
        ];
        headers.extend(common_headers());
        Self {
            status: 200,
            headers,
            body: image.bytes,
        }
    }

    /// Bare 500 with an empty body.
    pub fn internal_error() -> Self {
        let mut headers = vec![("Cache-Control", "no-store".to_owned())];
        headers.extend(common_headers());
        Self {
            status: 500,
            headers,
            body: Vec::new(),
        }
    }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Format implied by `Content-Type`, if any.
    pub fn format(&self) -> Option<ImageFormat> {
        match self.header("Content-Type")? {
            "image/png" => Some(ImageFormat::Png),
            "image/svg+xml" => Some(ImageFormat::Svg),
            _ => None,
        }
    }
}

/// `public, max-age=N, s-maxage=N`.
pub fn cache_control(max_age_secs: u32) -> String {
    format!("public, max-age={max_age_secs}, s-maxage={max_age_secs}")
}

fn common_headers() -> [(&'static str, String); 3] {
    [
        ("Access-Control-Allow-Origin", "*".to_owned()),
        ("Cross-Origin-Resource-Policy", "cross-origin".to_owned()),
        ("X-Content-Type-Options", "nosniff".to_owned()),
    ]
}
