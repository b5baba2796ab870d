use super::*;

#[test]
fn canvas_new_rejects_degenerate_sizes() {
    assert!(Canvas::new(0, 400).is_err());
    assert!(Canvas::new(600, 0).is_err());
    assert!(Canvas::new(MAX_CANVAS_DIM + 1, 10).is_err());
    assert_eq!(Canvas::new(600, 400).unwrap(), Canvas::STANDARD);
}

#[test]
fn canvas_scale_uses_tighter_axis() {
    assert_eq!(Canvas::STANDARD.scale(), 1.0);
    assert_eq!(Canvas::COMPACT.scale(), 0.75);
    assert_eq!(Canvas::new(1200, 800).unwrap().scale(), 2.0);
}

#[test]
fn hex_parse_and_display() {
    let c = Rgb8::from_hex("#2d1b47").unwrap();
    assert_eq!(c, Rgb8::new(0x2D, 0x1B, 0x47));
    assert_eq!(c.to_string(), "#2D1B47");
    assert_eq!(Rgb8::from_hex("F74E52").unwrap(), Rgb8::new(0xF7, 0x4E, 0x52));

    assert!(Rgb8::from_hex("#fff").is_err());
    assert!(Rgb8::from_hex("#gg0000").is_err());
    assert!(Rgb8::from_hex("#ééé").is_err());
}
