use super::*;

fn inside(outer: Rect, inner: Rect) -> bool {
    inner.x0 >= outer.x0 && inner.y0 >= outer.y0 && inner.x1 <= outer.x1 && inner.y1 <= outer.y1
}

#[test]
fn standard_layout_matches_reference_geometry() {
    let l = BadgeLayout::for_canvas(Canvas::STANDARD);
    assert_eq!(l.scale, 1.0);
    assert_eq!(l.avatar, Rect::new(100.0, 61.0, 200.0, 161.0));

    let tracks: Vec<Rect> = l.rows.iter().map(|r| r.track).collect();
    assert_eq!(
        tracks,
        vec![
            Rect::new(100.0, 200.0, 500.0, 220.0),
            Rect::new(100.0, 259.0, 500.0, 279.0),
            Rect::new(100.0, 318.0, 500.0, 338.0),
        ]
    );
    assert!(l.rows.iter().all(|r| r.radius == 10.0));
    assert_eq!(l.rows[0].track_width_px(), 400);
}

#[test]
fn rows_follow_health_experience_mana() {
    let l = BadgeLayout::for_canvas(Canvas::STANDARD);
    let kinds: Vec<StatKind> = l.rows.iter().map(|r| r.kind).collect();
    assert_eq!(kinds, StatKind::ALL.to_vec());
}

#[test]
fn every_element_stays_on_canvas() {
    for canvas in [Canvas::STANDARD, Canvas::COMPACT, Canvas::new(320, 200).unwrap()] {
        let l = BadgeLayout::for_canvas(canvas);
        let bounds = canvas.bounds();
        assert!(inside(bounds, l.avatar), "{canvas:?}");
        for row in &l.rows {
            assert!(inside(bounds, row.track), "{canvas:?}");
            assert!(inside(bounds, row.icon), "{canvas:?}");
            assert!(row.label.origin.y < row.track.y0);
        }
        assert!(l.rows[0].track.y1 < l.rows[1].track.y0);
        assert!(l.rows[1].track.y1 < l.rows[2].track.y0);
    }
}

#[test]
fn compact_layout_scales_down() {
    let l = BadgeLayout::for_canvas(Canvas::COMPACT);
    assert_eq!(l.scale, 0.75);
    assert_eq!(l.rows[0].track_width_px(), 300);
    assert_eq!(l.rows[0].track.x0, 100.0);
    assert_eq!(l.rows[0].track.height(), 15.0);
}

#[test]
fn fill_rect_is_clamped_to_track() {
    let row = BadgeLayout::for_canvas(Canvas::STANDARD).rows[0];
    assert_eq!(row.fill_rect(360), Rect::new(100.0, 200.0, 460.0, 220.0));
    assert_eq!(row.fill_rect(9999).x1, row.track.x1);
    assert_eq!(row.fill_rect(0).width(), 0.0);
}

#[test]
fn panel_baselines_are_centered_and_ordered() {
    let p = PanelLayout::for_canvas(Canvas::STANDARD);
    let ys = p.baselines(Canvas::STANDARD, &[(24.0, 1), (14.0, 3), (12.0, 1)]);
    assert_eq!(ys.len(), 3);
    assert_eq!(ys[1].len(), 3);

    let flat: Vec<f64> = ys.iter().flatten().copied().collect();
    assert!(flat.windows(2).all(|w| w[0] < w[1]));
    assert!(flat.first().copied().unwrap() > 0.0);
    assert!(flat.last().copied().unwrap() < 400.0);
}
