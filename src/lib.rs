//! Habitica stats badges for README files.
//!
//! One authenticated request to the Habitica API produces a [`StatRecord`], which is drawn as a
//! themed PNG or SVG badge with three progress bars (health, experience, mana). Every expected
//! failure is drawn as well, on a [`Panel`], so an embedding page always receives an image.
//!
//! - [`StatsFetcher`] fetches and validates a record, bounded by a timeout
//! - [`BadgeRenderer`] turns records and panels into encoded images
//! - [`BadgeService`] maps a request URL to a complete [`BadgeResponse`]
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

pub(crate) mod render;
pub(crate) mod service;
pub(crate) mod stats;
pub(crate) mod theme;

pub use crate::foundation::core::{Canvas, MAX_CANVAS_DIM, Point, Rect, Rgb8};
pub use crate::foundation::error::{BadgeError, BadgeResult};

pub use crate::render::badge::{BadgeImage, BadgeRenderer, ImageFormat, Panel, PanelTone};
pub use crate::render::layout::{BadgeLayout, BarRow, PanelLayout, TextSlot};
pub use crate::render::progress::{BarFill, fill_percent, fill_width, format_number, readout};
pub use crate::render::raster::{BadgeFrame, build_fontdb, encode_png, rasterize_svg, solid_frame};
pub use crate::render::svg::{Anchor, FONT_STACK, escape_xml};
pub use crate::render::text::{MONO_ADVANCE, char_budget, truncate_with_ellipsis, wrap_text};

pub use crate::service::badge_service::BadgeService;
pub use crate::service::config::ServiceConfig;
pub use crate::service::query::{BadgeMode, BadgeQuery};
pub use crate::service::response::{BadgeResponse, CachePolicy, cache_control};

pub use crate::stats::error::FetchError;
pub use crate::stats::fetch::{
    Credentials, DEFAULT_API_BASE, DEFAULT_CLIENT_ID, DEFAULT_TIMEOUT, FetchConfig, HttpTransport,
    StatsFetcher, Transport, UpstreamRequest, UpstreamResponse, interpret_response,
};
pub use crate::stats::record::{FALLBACK_CLASS, REQUIRED_FIELDS, StatKind, StatRecord};

pub use crate::theme::palette::{StatPalette, Theme, ThemeName};
