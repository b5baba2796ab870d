use std::{borrow::Cow, fmt::Write as _};

use crate::foundation::core::{Canvas, Point, Rect, Rgb8};

/// Font stack used for every text node; the generic `monospace` is last so `usvg` can still
/// resolve something when none of the named families is installed.
pub const FONT_STACK: &str =
    "'DejaVu Sans Mono', 'Liberation Mono', Menlo, Consolas, 'Courier New', monospace";

/// Icon outlines on a 24x24 grid.
pub(crate) mod glyph {
    pub(crate) const HEART: &str = "M12 21.35l-1.45-1.32C5.4 15.36 2 12.28 2 8.5 2 5.42 4.42 3 7.5 3c1.74 0 3.41.81 4.5 2.09C13.09 3.81 14.76 3 16.5 3 19.58 3 22 5.42 22 8.5c0 3.78-3.4 6.86-8.55 11.54L12 21.35z";
    pub(crate) const STAR: &str = "M12 2l3.09 6.26L22 9.27l-5 4.87 1.18 6.88L12 17.77l-6.18 3.25L7 14.14 2 9.27l6.91-1.01L12 2z";
    pub(crate) const GEM: &str = "M6 3h12l4 6-10 12L2 9z";
    pub(crate) const SHIELD: &str = "M12 2L4 5v6c0 5.55 3.84 10.74 8 12 4.16-1.26 8-6.45 8-12V5l-8-3z";
}

/// Horizontal text alignment, mapped to `text-anchor`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Anchor {
    /// Left edge at the origin.
    Start,
    /// Centered on the origin.
    Middle,
    /// Right edge at the origin.
    End,
}

impl Anchor {
    fn as_str(self) -> &'static str {
        match self {
            Anchor::Start => "start",
            Anchor::Middle => "middle",
            Anchor::End => "end",
        }
    }
}

/// Font size, color and alignment of one text node.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct TextStyle {
    pub(crate) size: f64,
    pub(crate) fill: Rgb8,
    pub(crate) anchor: Anchor,
    pub(crate) bold: bool,
}

impl TextStyle {
    pub(crate) fn new(size: f64, fill: Rgb8, anchor: Anchor) -> Self {
        Self {
            size,
            fill,
            anchor,
            bold: false,
        }
    }

    pub(crate) fn bold(mut self) -> Self {
        self.bold = true;
        self
    }
}

/// Minimal append-only SVG document writer.
pub(crate) struct SvgWriter {
    buf: String,
}

impl SvgWriter {
    pub(crate) fn new(canvas: Canvas) -> Self {
        let mut buf = String::with_capacity(4096);
        let _ = write!(
            buf,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = canvas.width,
            h = canvas.height,
        );
        Self { buf }
    }

    pub(crate) fn rect(&mut self, r: Rect, fill: Rgb8, radius: f64) {
        let _ = write!(
            self.buf,
            r#"<rect x="{}" y="{}" width="{}" height="{}""#,
            r.x0,
            r.y0,
            r.width(),
            r.height()
        );
        if radius > 0.0 {
            let _ = write!(self.buf, r#" rx="{radius}" ry="{radius}""#);
        }
        let _ = write!(self.buf, r#" fill="{fill}"/>"#);
    }

    pub(crate) fn circle(&mut self, cx: f64, cy: f64, r: f64, fill: Rgb8) {
        let _ = write!(
            self.buf,
            r#"<circle cx="{cx}" cy="{cy}" r="{r}" fill="{fill}"/>"#
        );
    }

    /// Draw a 24x24 glyph scaled into `bounds`.
    pub(crate) fn glyph(&mut self, d: &str, bounds: Rect, fill: Rgb8) {
        let s = bounds.width().min(bounds.height()) / 24.0;
        let _ = write!(
            self.buf,
            r#"<path transform="translate({} {}) scale({s})" d="{d}" fill="{fill}"/>"#,
            bounds.x0, bounds.y0
        );
    }

    pub(crate) fn text(&mut self, origin: Point, style: TextStyle, content: &str) {
        let _ = write!(
            self.buf,
            r#"<text x="{}" y="{}" font-family="{FONT_STACK}" font-size="{}" fill="{}" text-anchor="{}""#,
            origin.x,
            origin.y,
            style.size,
            style.fill,
            style.anchor.as_str()
        );
        if style.bold {
            self.buf.push_str(r#" font-weight="bold""#);
        }
        self.buf.push('>');
        self.buf.push_str(&escape_xml(content));
        self.buf.push_str("</text>");
    }

    pub(crate) fn finish(mut self) -> String {
        self.buf.push_str("</svg>");
        self.buf
    }
}

/// Escape the five XML special characters.
pub fn escape_xml(s: &str) -> Cow<'_, str> {
    if !s.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(s);
    }
    let mut out = String::with_capacity(s.len() + 16);
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    Cow::Owned(out)
}

#[cfg(test)]
#[path = "../../tests/unit/render/svg.rs"]
mod tests;
