use super::*;
use crate::theme::palette::ThemeName;

fn renderer() -> BadgeRenderer {
    BadgeRenderer {
        fontdb: Arc::new(usvg::fontdb::Database::new()),
    }
}

#[test]
fn sample_badge_svg_contains_readouts_and_lines() {
    let svg = renderer().badge_svg(&StatRecord::sample(), &Theme::DEFAULT, Canvas::STANDARD);

    assert!(svg.contains(">@mage</text>"));
    assert!(svg.contains(">Level 15 mage</text>"));
    assert!(svg.contains(">45 / 50</text>"));
    assert!(svg.contains(">180 / 250</text>"));
    assert!(svg.contains(">32 / 40</text>"));
    assert!(svg.contains(">Health</text>"));
    assert!(svg.contains(">Experience</text>"));
    assert!(svg.contains(">Mana</text>"));
}

#[test]
fn sample_badge_fill_widths() {
    let svg = renderer().badge_svg(&StatRecord::sample(), &Theme::DEFAULT, Canvas::STANDARD);

    assert!(svg.contains(r##"width="360" height="20" rx="10" ry="10" fill="#F74E52""##));
    assert!(svg.contains(r##"width="288" height="20" rx="10" ry="10" fill="#FFB445""##));
    assert!(svg.contains(r##"width="320" height="20" rx="10" ry="10" fill="#50B5E9""##));
    assert_eq!(svg.matches(r##"fill="#4D3B67""##).count(), 3);
}

#[test]
fn empty_bar_draws_track_only() {
    let mut record = StatRecord::sample();
    record.mp = 0.0;
    let svg = renderer().badge_svg(&record, &Theme::DARK, Canvas::STANDARD);

    assert_eq!(svg.matches(r##"fill="#4D3B67""##).count(), 3);
    assert!(!svg.contains(r##"rx="10" ry="10" fill="#50B5E9""##));
    assert!(svg.contains(">0 / 40</text>"));
}

#[test]
fn overfull_bar_is_clamped_but_readout_is_not() {
    let mut record = StatRecord::sample();
    record.hp = 75.0;
    let svg = renderer().badge_svg(&record, &Theme::DEFAULT, Canvas::STANDARD);

    assert!(svg.contains(r##"width="400" height="20" rx="10" ry="10" fill="#F74E52""##));
    assert!(svg.contains(">75 / 50</text>"));
}

#[test]
fn theme_colors_reach_background_and_text() {
    let theme = Theme::named(ThemeName::Light);
    let svg = renderer().badge_svg(&StatRecord::sample(), &theme, Canvas::COMPACT);

    assert!(svg.contains(r##"<rect x="0" y="0" width="500" height="300" fill="#FFFFFF"/>"##));
    assert!(svg.contains(r##"fill="#24292E" text-anchor="start" font-weight="bold">@mage"##));
}

#[test]
fn svg_format_returns_document_bytes() {
    let img = renderer()
        .render_badge(
            &StatRecord::sample(),
            &Theme::DEFAULT,
            Canvas::COMPACT,
            ImageFormat::Svg,
        )
        .unwrap();
    assert_eq!(img.format, ImageFormat::Svg);
    assert_eq!((img.width, img.height), (500, 300));
    assert!(img.bytes.starts_with(b"<svg"));
}

#[test]
fn error_panel_uses_error_color_and_wraps() {
    let panel = Panel::error(
        "Habitica API Error",
        "Habitica API returned 401: There is no account that uses those credentials. ".repeat(4),
    )
    .with_hint("Check your userId and apiToken");
    let svg = renderer().panel_svg(&panel, &Theme::DEFAULT, Canvas::STANDARD);

    assert!(svg.contains(r##"fill="#F74E52" text-anchor="middle" font-weight="bold">Habitica API Error"##));
    assert!(svg.contains(">Check your userId and apiToken</text>"));
    let message_lines = svg.matches(r#"font-size="14""#).count();
    assert_eq!(message_lines, 4);
    assert!(svg.contains('…'));
}

#[test]
fn info_panel_heading_uses_primary_text() {
    let panel = Panel::info("Renderer OK", "Badge rendering works.");
    let svg = renderer().panel_svg(&panel, &Theme::DARK, Canvas::STANDARD);
    assert!(svg.contains(r##"fill="#CCCCCC" text-anchor="middle" font-weight="bold">Renderer OK"##));
}

#[test]
fn panel_escapes_markup() {
    let panel = Panel::error("Unexpected Error", "<script>alert(1)</script> & more");
    let svg = renderer().panel_svg(&panel, &Theme::DEFAULT, Canvas::STANDARD);
    assert!(!svg.contains("<script>"));
    assert!(svg.contains("&lt;script&gt;"));
}

#[test]
fn solid_fallback_png_matches_canvas() {
    let img = solid_image(&Theme::DARK, Canvas::COMPACT, ImageFormat::Png).unwrap();
    let decoded = image::load_from_memory(&img.bytes).unwrap().to_rgba8();
    assert_eq!(decoded.dimensions(), (500, 300));
    assert_eq!(decoded.get_pixel(250, 150).0, [0x0F, 0x0F, 0x23, 0xFF]);
}

#[test]
fn png_badge_has_requested_size() {
    let img = renderer()
        .render_panel_or_solid(
            &Panel::info("Renderer OK", "fine"),
            &Theme::DEFAULT,
            Canvas::COMPACT,
            ImageFormat::Png,
        )
        .unwrap();
    let decoded = image::load_from_memory(&img.bytes).unwrap().to_rgba8();
    assert_eq!(decoded.dimensions(), (500, 300));
}

#[test]
fn format_metadata() {
    assert_eq!(ImageFormat::Png.content_type(), "image/png");
    assert_eq!(ImageFormat::Svg.content_type(), "image/svg+xml");
    assert_eq!(ImageFormat::Svg.extension(), "svg");
    assert_eq!(ImageFormat::default(), ImageFormat::Png);
}
