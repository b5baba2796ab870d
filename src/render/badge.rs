use std::{fmt, path::Path, sync::Arc};

use crate::{
    foundation::{
        core::{Canvas, Point},
        error::BadgeResult,
    },
    render::{
        layout::{BadgeLayout, PanelLayout},
        progress::{BarFill, readout},
        raster::{BadgeFrame, build_fontdb, encode_png, rasterize_svg, solid_frame},
        svg::{Anchor, SvgWriter, TextStyle, glyph},
        text::{char_budget, truncate_with_ellipsis, wrap_text},
    },
    stats::record::{StatKind, StatRecord},
    theme::palette::{StatPalette, Theme},
};

const PANEL_MESSAGE_LINES: usize = 4;
const PANEL_HINT_LINES: usize = 2;

/// Encoded output format.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ImageFormat {
    /// Rasterized PNG.
    #[default]
    Png,
    /// The SVG document itself.
    Svg,
}

impl ImageFormat {
    /// HTTP `Content-Type`.
    pub fn content_type(self) -> &'static str {
        match self {
            ImageFormat::Png => "image/png",
            ImageFormat::Svg => "image/svg+xml",
        }
    }

    /// File extension without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Svg => "svg",
        }
    }
}

/// An encoded badge or panel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BadgeImage {
    /// Encoding of `bytes`.
    pub format: ImageFormat,
    /// Pixel width.
    pub width: u32,
    /// Pixel height.
    pub height: u32,
    /// Encoded image.
    pub bytes: Vec<u8>,
}

/// Heading color of a panel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PanelTone {
    /// Heading in the error color.
    Error,
    /// Heading in the theme's primary text color.
    Info,
}

/// A single-message image shown instead of a badge.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Panel {
    /// One-line heading, truncated with `…` if too long.
    pub heading: String,
    /// Body text, wrapped.
    pub message: String,
    /// Optional smaller line under the message.
    pub hint: Option<String>,
    /// Heading color.
    pub tone: PanelTone,
}

impl Panel {
    /// Error-toned panel without a hint.
    pub fn error(heading: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            heading: heading.into(),
            message: message.into(),
            hint: None,
            tone: PanelTone::Error,
        }
    }

    /// Info-toned panel without a hint.
    pub fn info(heading: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            heading: heading.into(),
            message: message.into(),
            hint: None,
            tone: PanelTone::Info,
        }
    }

    /// Attach a hint line.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

/// Turns stat records and panels into encoded images.
///
/// Holds only a shared font database, so clones are cheap and the renderer is `Send + Sync`.
#[derive(Clone)]
pub struct BadgeRenderer {
    fontdb: Arc<usvg::fontdb::Database>,
}

impl fmt::Debug for BadgeRenderer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BadgeRenderer")
            .field("font_faces", &self.fontdb.len())
            .finish()
    }
}

impl Default for BadgeRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl BadgeRenderer {
    /// Renderer using system fonts only.
    pub fn new() -> Self {
        Self::with_fonts_dir(None)
    }

    /// Renderer using system fonts plus the font files in `dir`.
    pub fn with_fonts_dir(dir: Option<&Path>) -> Self {
        Self {
            fontdb: build_fontdb(dir),
        }
    }

    /// SVG document of the stats badge.
    pub fn badge_svg(&self, record: &StatRecord, theme: &Theme, canvas: Canvas) -> String {
        let layout = BadgeLayout::for_canvas(canvas);
        let mut w = SvgWriter::new(canvas);

        w.rect(canvas.bounds(), theme.background, 0.0);

        let avatar = layout.avatar;
        let radius = avatar.width() / 2.0;
        let center = avatar.center();
        w.circle(center.x, center.y, radius, StatPalette::AVATAR);
        let inset = avatar.width() * 0.25;
        w.glyph(
            glyph::SHIELD,
            avatar.inset(-inset),
            StatPalette::AVATAR_GLYPH,
        );

        w.text(
            layout.title.origin,
            TextStyle::new(layout.title.size, theme.primary_text, Anchor::Start).bold(),
            &record.handle(),
        );
        w.text(
            layout.subtitle.origin,
            TextStyle::new(layout.subtitle.size, theme.secondary_text, Anchor::Start),
            &record.level_line(),
        );

        for row in &layout.rows {
            let color = StatPalette::color_for(row.kind);
            let (value, max) = record.bar(row.kind);

            w.glyph(icon_for(row.kind), row.icon, color);
            w.text(
                row.label.origin,
                TextStyle::new(row.label.size, theme.secondary_text, Anchor::Start),
                row.kind.label(),
            );
            w.text(
                row.readout.origin,
                TextStyle::new(row.readout.size, theme.secondary_text, Anchor::End),
                &readout(value, max),
            );

            w.rect(row.track, StatPalette::TRACK, row.radius);
            let fill = BarFill::compute(value, max, row.track_width_px());
            if fill.fill_px > 0 {
                w.rect(row.fill_rect(fill.fill_px), color, row.radius);
            }
        }

        w.finish()
    }

    /// Rasterized stats badge.
    pub fn render_frame(
        &self,
        record: &StatRecord,
        theme: &Theme,
        canvas: Canvas,
    ) -> BadgeResult<BadgeFrame> {
        let svg = self.badge_svg(record, theme, canvas);
        rasterize_svg(&svg, self.fontdb.clone(), canvas)
    }

    /// Render the stats badge for `record` in `format`.
    #[tracing::instrument(skip(self, record, theme), fields(theme = theme.name.as_str()))]
    pub fn render_badge(
        &self,
        record: &StatRecord,
        theme: &Theme,
        canvas: Canvas,
        format: ImageFormat,
    ) -> BadgeResult<BadgeImage> {
        let svg = self.badge_svg(record, theme, canvas);
        self.encode(svg, canvas, format)
    }

    /// SVG document of a panel.
    pub fn panel_svg(&self, panel: &Panel, theme: &Theme, canvas: Canvas) -> String {
        let layout = PanelLayout::for_canvas(canvas);
        let mut w = SvgWriter::new(canvas);
        w.rect(canvas.bounds(), theme.background, 0.0);

        let heading = vec![truncate_with_ellipsis(
            panel.heading.trim(),
            char_budget(layout.text_width, layout.heading_size),
        )];
        let message = wrap_text(
            &panel.message,
            char_budget(layout.text_width, layout.message_size),
            PANEL_MESSAGE_LINES,
        );
        let hint = panel
            .hint
            .as_deref()
            .map(|h| {
                wrap_text(
                    h,
                    char_budget(layout.text_width, layout.hint_size),
                    PANEL_HINT_LINES,
                )
            })
            .unwrap_or_default();

        let heading_color = match panel.tone {
            PanelTone::Error => StatPalette::ERROR,
            PanelTone::Info => theme.primary_text,
        };
        let blocks = [
            (heading, layout.heading_size, heading_color, true),
            (message, layout.message_size, theme.primary_text, false),
            (hint, layout.hint_size, theme.secondary_text, false),
        ];
        let metrics: Vec<(f64, usize)> = blocks
            .iter()
            .map(|(lines, size, _, _)| (*size, lines.len()))
            .collect();
        let baselines = layout.baselines(canvas, &metrics);

        for ((lines, size, color, bold), ys) in blocks.iter().zip(baselines) {
            for (line, y) in lines.iter().zip(ys) {
                let mut style = TextStyle::new(*size, *color, Anchor::Middle);
                if *bold {
                    style = style.bold();
                }
                w.text(Point::new(layout.center_x, y), style, line);
            }
        }

        w.finish()
    }

    /// Render a panel in `format`.
    #[tracing::instrument(skip(self, panel, theme), fields(heading = %panel.heading, theme = theme.name.as_str()))]
    pub fn render_panel(
        &self,
        panel: &Panel,
        theme: &Theme,
        canvas: Canvas,
        format: ImageFormat,
    ) -> BadgeResult<BadgeImage> {
        let svg = self.panel_svg(panel, theme, canvas);
        self.encode(svg, canvas, format)
    }

    /// [`BadgeRenderer::render_panel`], falling back to a plain background image.
    ///
    /// The fallback is built without parsing any SVG; it only fails if PNG encoding fails.
    pub fn render_panel_or_solid(
        &self,
        panel: &Panel,
        theme: &Theme,
        canvas: Canvas,
        format: ImageFormat,
    ) -> BadgeResult<BadgeImage> {
        match self.render_panel(panel, theme, canvas, format) {
            Ok(img) => Ok(img),
            Err(err) => {
                tracing::warn!(%err, "panel rendering failed; using plain background");
                solid_image(theme, canvas, format)
            }
        }
    }

    fn encode(&self, svg: String, canvas: Canvas, format: ImageFormat) -> BadgeResult<BadgeImage> {
        let bytes = match format {
            ImageFormat::Svg => svg.into_bytes(),
            ImageFormat::Png => encode_png(&rasterize_svg(&svg, self.fontdb.clone(), canvas)?)?,
        };
        Ok(BadgeImage {
            format,
            width: canvas.width,
            height: canvas.height,
            bytes,
        })
    }
}

fn solid_image(theme: &Theme, canvas: Canvas, format: ImageFormat) -> BadgeResult<BadgeImage> {
    let bytes = match format {
        ImageFormat::Svg => {
            let mut w = SvgWriter::new(canvas);
            w.rect(canvas.bounds(), theme.background, 0.0);
            w.finish().into_bytes()
        }
        ImageFormat::Png => encode_png(&solid_frame(canvas, theme.background))?,
    };
    Ok(BadgeImage {
        format,
        width: canvas.width,
        height: canvas.height,
        bytes,
    })
}

fn icon_for(kind: StatKind) -> &'static str {
    match kind {
        StatKind::Health => glyph::HEART,
        StatKind::Experience => glyph::STAR,
        StatKind::Mana => glyph::GEM,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/badge.rs"]
mod tests;
