use crate::{
    foundation::core::{Canvas, Point, Rect},
    stats::record::StatKind,
};

// Metrics at the 600x400 reference size; everything scales by `Canvas::scale`.
const AVATAR_SIZE: f64 = 100.0;
const AVATAR_GAP: f64 = 20.0;
const HEADER_GAP: f64 = 20.0;
const TITLE_SIZE: f64 = 24.0;
const SUBTITLE_SIZE: f64 = 18.0;
const LABEL_SIZE: f64 = 14.0;
const LABEL_GAP: f64 = 5.0;
const ICON_SIZE: f64 = 16.0;
const ICON_GAP: f64 = 6.0;
const BAR_WIDTH: f64 = 400.0;
const BAR_HEIGHT: f64 = 20.0;
const BAR_RADIUS: f64 = 10.0;
const ROW_GAP: f64 = 20.0;

const ROW_HEIGHT: f64 = LABEL_SIZE + LABEL_GAP + BAR_HEIGHT;
const CONTENT_HEIGHT: f64 = AVATAR_SIZE + HEADER_GAP + 3.0 * ROW_HEIGHT + 2.0 * ROW_GAP;

/// A text anchor point (alphabetic baseline) and font size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextSlot {
    /// Baseline anchor.
    pub origin: Point,
    /// Font size in pixels.
    pub size: f64,
}

/// Geometry of one stat row.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BarRow {
    /// Which stat the row shows.
    pub kind: StatKind,
    /// Icon box left of the label.
    pub icon: Rect,
    /// Left-aligned label.
    pub label: TextSlot,
    /// Right-aligned readout; `origin.x` is the right edge.
    pub readout: TextSlot,
    /// Full bar track, snapped to whole pixels.
    pub track: Rect,
    /// Corner radius of track and fill.
    pub radius: f64,
}

impl BarRow {
    /// Track width in whole pixels.
    pub fn track_width_px(&self) -> u32 {
        self.track.width().round().max(0.0) as u32
    }

    /// Filled part of the track for `fill_px` pixels.
    pub fn fill_rect(&self, fill_px: u32) -> Rect {
        let w = f64::from(fill_px.min(self.track_width_px()));
        Rect::new(
            self.track.x0,
            self.track.y0,
            self.track.x0 + w,
            self.track.y1,
        )
    }
}

/// Element positions of a stats badge on a given canvas.
#[derive(Clone, Debug, PartialEq)]
pub struct BadgeLayout {
    /// Target canvas.
    pub canvas: Canvas,
    /// Metric scale relative to 600x400.
    pub scale: f64,
    /// Avatar disc bounds.
    pub avatar: Rect,
    /// `@class` line.
    pub title: TextSlot,
    /// `Level N Class` line.
    pub subtitle: TextSlot,
    /// Health, Experience, Mana rows.
    pub rows: [BarRow; 3],
}

impl BadgeLayout {
    /// Center the content block on `canvas`.
    pub fn for_canvas(canvas: Canvas) -> Self {
        let s = canvas.scale();
        let w = f64::from(canvas.width);
        let h = f64::from(canvas.height);

        let bar_w = (BAR_WIDTH * s).round();
        let left = ((w - bar_w) / 2.0).floor().max(0.0);
        let top = ((h - CONTENT_HEIGHT * s) / 2.0).floor().max(0.0);

        let avatar = Rect::new(left, top, left + AVATAR_SIZE * s, top + AVATAR_SIZE * s);
        let text_x = avatar.x1 + AVATAR_GAP * s;
        let title = TextSlot {
            origin: Point::new(text_x, top + AVATAR_SIZE * s * 0.45),
            size: TITLE_SIZE * s,
        };
        let subtitle = TextSlot {
            origin: Point::new(
                text_x,
                title.origin.y + (SUBTITLE_SIZE + LABEL_GAP + 6.0) * s,
            ),
            size: SUBTITLE_SIZE * s,
        };

        let rows_top = top + (AVATAR_SIZE + HEADER_GAP) * s;
        let row = |i: usize, kind: StatKind| {
            let y = rows_top + (i as f64) * (ROW_HEIGHT + ROW_GAP) * s;
            let baseline = y + LABEL_SIZE * s;
            let track_y0 = (y + (LABEL_SIZE + LABEL_GAP) * s).floor();
            let track = Rect::new(
                left,
                track_y0,
                left + bar_w,
                track_y0 + (BAR_HEIGHT * s).round(),
            );
            let icon_size = ICON_SIZE * s;
            BarRow {
                kind,
                icon: Rect::new(
                    left,
                    baseline - icon_size + 2.0 * s,
                    left + icon_size,
                    baseline + 2.0 * s,
                ),
                label: TextSlot {
                    origin: Point::new(left + icon_size + ICON_GAP * s, baseline),
                    size: LABEL_SIZE * s,
                },
                readout: TextSlot {
                    origin: Point::new(track.x1, baseline),
                    size: LABEL_SIZE * s,
                },
                track,
                radius: BAR_RADIUS * s,
            }
        };

        Self {
            canvas,
            scale: s,
            avatar,
            title,
            subtitle,
            rows: [
                row(0, StatKind::ALL[0]),
                row(1, StatKind::ALL[1]),
                row(2, StatKind::ALL[2]),
            ],
        }
    }
}

/// Geometry of a single-message panel.
#[derive(Clone, Debug, PartialEq)]
pub struct PanelLayout {
    /// Horizontal center of every line.
    pub center_x: f64,
    /// Usable text width.
    pub text_width: f64,
    /// Heading font size.
    pub heading_size: f64,
    /// Message font size.
    pub message_size: f64,
    /// Hint font size.
    pub hint_size: f64,
    /// Gap between blocks.
    pub block_gap: f64,
    /// Line advance as a multiple of font size.
    pub line_height: f64,
}

impl PanelLayout {
    /// Panel metrics for `canvas`.
    pub fn for_canvas(canvas: Canvas) -> Self {
        let s = canvas.scale();
        let w = f64::from(canvas.width);
        Self {
            center_x: w / 2.0,
            text_width: w * 0.8,
            heading_size: 24.0 * s,
            message_size: 14.0 * s,
            hint_size: 12.0 * s,
            block_gap: 16.0 * s,
            line_height: 1.4,
        }
    }

    /// Baselines for blocks of `(font_size, line_count)`, vertically centered on `canvas`.
    pub fn baselines(&self, canvas: Canvas, blocks: &[(f64, usize)]) -> Vec<Vec<f64>> {
        let block_heights: Vec<f64> = blocks
            .iter()
            .map(|&(size, lines)| size * self.line_height * lines as f64)
            .collect();
        let non_empty = blocks.iter().filter(|(_, n)| *n > 0).count();
        let total: f64 = block_heights.iter().sum::<f64>()
            + self.block_gap * non_empty.saturating_sub(1) as f64;

        let mut y = (f64::from(canvas.height) - total) / 2.0;
        let mut out = Vec::with_capacity(blocks.len());
        for &(size, lines) in blocks {
            let advance = size * self.line_height;
            let ys: Vec<f64> = (0..lines)
                .map(|i| y + advance * i as f64 + size)
                .collect();
            if lines > 0 {
                y += advance * lines as f64 + self.block_gap;
            }
            out.push(ys);
        }
        out
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/layout.rs"]
mod tests;
