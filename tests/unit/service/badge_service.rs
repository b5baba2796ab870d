use std::{
    sync::{Arc, Mutex},
    time::{Duration, Instant},
};

use serde_json::json;

use super::*;
use crate::{
    render::badge::ImageFormat,
    stats::fetch::{DEFAULT_CLIENT_ID, UpstreamRequest, UpstreamResponse},
};

#[derive(Clone)]
struct Recording {
    status: u16,
    body: String,
    delay: Duration,
    seen: Arc<Mutex<Vec<UpstreamRequest>>>,
}

impl Recording {
    fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
            delay: Duration::ZERO,
            seen: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl Transport for Recording {
    fn get(&self, request: &UpstreamRequest) -> Result<UpstreamResponse, FetchError> {
        self.seen.lock().unwrap().push(request.clone());
        std::thread::sleep(self.delay);
        Ok(UpstreamResponse {
            status: self.status,
            body: self.body.clone(),
        })
    }
}

fn stats_body() -> String {
    json!({
        "success": true,
        "data": { "stats": {
            "hp": 45, "maxHealth": 50, "mp": 32, "maxMP": 40,
            "exp": 180, "toNextLevel": 250, "lvl": 15, "gp": 125, "class": "mage"
        }}
    })
    .to_string()
}

fn configured() -> ServiceConfig {
    ServiceConfig {
        api_base: "http://habitica.test/api/v3/".to_owned(),
        user_id: Some("cfg-user".to_owned()),
        api_token: Some("cfg-token".to_owned()),
        ..ServiceConfig::default()
    }
}

fn service(config: ServiceConfig, transport: Recording) -> BadgeService<Recording> {
    let renderer = BadgeRenderer::with_fonts_dir(None);
    BadgeService::new(config, transport, renderer).unwrap()
}

fn svg_body(resp: &BadgeResponse) -> String {
    String::from_utf8(resp.body.clone()).unwrap()
}

#[test]
fn live_badge_has_long_cache_and_common_headers() {
    let svc = service(configured(), Recording::new(200, stats_body()));
    let resp = svc.handle_url("/?format=svg");

    assert_eq!(resp.status, 200);
    assert_eq!(resp.header("content-type"), Some("image/svg+xml"));
    assert_eq!(
        resp.header("Cache-Control"),
        Some("public, max-age=1800, s-maxage=1800")
    );
    assert_eq!(resp.header("Access-Control-Allow-Origin"), Some("*"));
    assert_eq!(resp.header("Cross-Origin-Resource-Policy"), Some("cross-origin"));
    assert_eq!(resp.header("X-Content-Type-Options"), Some("nosniff"));
    assert!(svg_body(&resp).contains(">45 / 50</text>"));
}

#[test]
fn missing_credentials_panel() {
    let transport = Recording::new(200, stats_body());
    let seen = transport.seen.clone();
    let cfg = ServiceConfig {
        api_token: None,
        ..configured()
    };
    let resp = service(cfg, transport).handle_url("/?format=svg");

    assert_eq!(resp.status, 200);
    assert_eq!(
        resp.header("Cache-Control"),
        Some("public, max-age=300, s-maxage=300")
    );
    let body = svg_body(&resp);
    assert!(body.contains(">Missing Credentials</text>"));
    assert!(body.contains("apiToken"));
    assert!(seen.lock().unwrap().is_empty());
}

#[test]
fn upstream_error_panel_with_hint() {
    let svc = service(
        configured(),
        Recording::new(401, r#"{"success":false,"message":"Unauthorized"}"#),
    );
    let resp = svc.handle_url("/?format=svg");

    assert_eq!(resp.status, 200);
    let body = svg_body(&resp);
    assert!(body.contains(">Habitica API Error</text>"));
    assert!(body.contains(">Check your userId and apiToken</text>"));
    assert!(body.contains("401"));
}

#[test]
fn query_credentials_ignored_unless_allowed() {
    let transport = Recording::new(200, stats_body());
    let seen = transport.seen.clone();
    let svc = service(configured(), transport);
    svc.handle_url("/?userId=q-user&apiToken=q-token&format=svg");

    let req = seen.lock().unwrap()[0].clone();
    assert_eq!(req.header("x-api-user"), Some("cfg-user"));
    assert_eq!(req.header("x-api-key"), Some("cfg-token"));
}

#[test]
fn query_credentials_used_when_allowed() {
    let transport = Recording::new(200, stats_body());
    let seen = transport.seen.clone();
    let cfg = ServiceConfig {
        allow_query_credentials: true,
        user_id: None,
        api_token: None,
        ..configured()
    };
    let svc = service(cfg, transport);
    let resp = svc.handle_url("/?userid=q-user&apitoken=q-token&format=svg");

    assert!(svg_body(&resp).contains(">@mage</text>"));
    let req = seen.lock().unwrap()[0].clone();
    assert_eq!(req.header("x-api-user"), Some("q-user"));
    assert_eq!(req.header("x-api-key"), Some("q-token"));
    assert_eq!(req.header("x-client"), Some(DEFAULT_CLIENT_ID));
}

#[test]
fn mock_mode_never_calls_upstream() {
    let transport = Recording::new(500, "boom");
    let seen = transport.seen.clone();
    let resp = service(ServiceConfig::default(), transport).handle_url("/?mode=mock&format=svg");

    assert!(svg_body(&resp).contains(">Level 15 mage</text>"));
    assert_eq!(
        resp.header("Cache-Control"),
        Some("public, max-age=1800, s-maxage=1800")
    );
    assert!(seen.lock().unwrap().is_empty());
}

#[test]
fn env_mode_reports_presence_not_values() {
    let resp = service(configured(), Recording::new(200, stats_body()))
        .handle_url("/?mode=env&format=svg");
    let body = svg_body(&resp);

    assert!(body.contains("User ID: Set API Token: Set"));
    assert!(!body.contains("cfg-token"));
    assert!(!body.contains("cfg-user"));
}

#[test]
fn simple_mode_renders_info_panel() {
    let resp = service(configured(), Recording::new(200, stats_body()))
        .handle_url("/?debug=simple&format=svg&theme=light");
    let body = svg_body(&resp);
    assert!(body.contains(">Renderer OK</text>"));
    assert!(body.contains(r##"fill="#FFFFFF"/>"##));
}

#[test]
fn png_response_decodes_at_compact_size() {
    let resp = service(configured(), Recording::new(200, stats_body()))
        .handle_url("/?mode=mock&size=compact");
    assert_eq!(resp.format(), Some(ImageFormat::Png));
    let img = image::load_from_memory(&resp.body).unwrap();
    assert_eq!((img.width(), img.height()), (500, 300));
}

#[test]
fn slow_upstream_becomes_timeout_panel() {
    let mut transport = Recording::new(200, stats_body());
    transport.delay = Duration::from_secs(3);
    let cfg = ServiceConfig {
        timeout_ms: 100,
        ..configured()
    };
    let svc = service(cfg, transport);

    let started = Instant::now();
    let resp = svc.handle_url("/?format=svg");
    assert!(started.elapsed() < Duration::from_secs(2));
    let body = svg_body(&resp);
    assert!(body.contains(">Habitica API Error</text>"));
    assert!(body.contains("timed out"));
}

#[test]
fn custom_cache_lifetimes() {
    let cfg = ServiceConfig {
        success_max_age_secs: 60,
        error_max_age_secs: 5,
        ..configured()
    };
    let svc = service(cfg, Recording::new(503, "down"));
    assert_eq!(
        svc.handle_url("/?mode=mock&format=svg").header("Cache-Control"),
        Some("public, max-age=60, s-maxage=60")
    );
    assert_eq!(
        svc.handle_url("/?format=svg").header("Cache-Control"),
        Some("public, max-age=5, s-maxage=5")
    );
}

#[test]
fn internal_error_is_bare() {
    let resp = BadgeResponse::internal_error();
    assert_eq!(resp.status, 500);
    assert!(resp.body.is_empty());
    assert_eq!(resp.header("Access-Control-Allow-Origin"), Some("*"));
    assert_eq!(resp.format(), None);
}
