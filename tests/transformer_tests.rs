use glam::DVec2;
use rand::Rng;
use viewport_charts::geometry::Rect;
use viewport_charts::transformer::Transformer;
use viewport_charts::viewport::{ChartInvalidator, ViewPortHandler};

#[derive(Default)]
struct Flag(bool);

impl ChartInvalidator for Flag {
    fn invalidate(&mut self) {
        self.0 = true;
    }
}

/// 200x100 chart, 10px offsets, x in [0, 100], y in [0, 50].
fn setup(inverted: bool) -> (ViewPortHandler, Transformer) {
    let mut vp = ViewPortHandler::new(200.0, 100.0);
    vp.restrain_view_port(10.0, 10.0, 10.0, 10.0);
    let mut trans = Transformer::new();
    trans.prepare_matrix_value_px(&vp, 0.0, 100.0, 50.0, 0.0);
    trans.prepare_matrix_offset(&vp, inverted);
    (vp, trans)
}

fn assert_close(a: DVec2, b: DVec2) {
    assert!((a - b).length() < 1e-9, "{a:?} != {b:?}");
}

#[test]
fn test_value_extent_maps_to_content_corners() {
    let (vp, trans) = setup(false);
    assert_close(
        trans.pixel_for_values(&vp, 0.0, 0.0),
        DVec2::new(vp.content_left(), vp.content_bottom()),
    );
    assert_close(
        trans.pixel_for_values(&vp, 100.0, 50.0),
        DVec2::new(vp.content_right(), vp.content_top()),
    );
    assert_close(trans.pixel_for_values(&vp, 50.0, 25.0), vp.content_center());
}

#[test]
fn test_inverted_axis_flips_vertically() {
    let (vp, trans) = setup(true);
    assert_close(
        trans.pixel_for_values(&vp, 0.0, 0.0),
        DVec2::new(vp.content_left(), vp.content_top()),
    );
    assert_close(
        trans.pixel_for_values(&vp, 100.0, 50.0),
        DVec2::new(vp.content_right(), vp.content_bottom()),
    );
}

#[test]
fn test_round_trip_random_points() {
    let mut rng = rand::rng();
    for inverted in [false, true] {
        let (mut vp, trans) = setup(inverted);
        let mut flag = Flag::default();
        let zoomed = vp.zoom_at(3.0, 2.0, 40.0, -20.0);
        vp.refresh(zoomed, &mut flag, true);

        for _ in 0..500 {
            let value = DVec2::new(
                rng.random_range(-1000.0..1000.0),
                rng.random_range(-1000.0..1000.0),
            );
            let pixel = trans.pixel_for_values(&vp, value.x, value.y);
            let back = trans.value_for_touch_point(&vp, pixel);
            assert!((back - value).length() < 1e-6, "{value:?} -> {back:?}");
        }
    }
}

#[test]
fn test_batch_matches_single_point() {
    let (vp, trans) = setup(false);
    let mut points: Vec<DVec2> = (0..20_000)
        .map(|i| DVec2::new(i as f64 * 0.005, (i % 50) as f64))
        .collect();
    let expected: Vec<DVec2> = points
        .iter()
        .map(|p| trans.pixel_for_values(&vp, p.x, p.y))
        .collect();

    trans.point_values_to_pixel(&vp, &mut points);
    for (got, want) in points.iter().zip(&expected) {
        assert_close(*got, *want);
    }

    trans.pixels_to_values(&vp, &mut points);
    assert!((points[100].x - 0.5).abs() < 1e-9);
    assert!((points[100].y - 0.0).abs() < 1e-9);
}

#[test]
fn test_rect_with_phase_scales_vertical_extent() {
    let (vp, trans) = setup(false);
    let mut rect = Rect::new(0.0, 0.0, 10.0, 50.0);
    trans.rect_value_to_pixel_with_phase(&vp, &mut rect, 0.5);

    let rect = rect.standardized();
    assert!((rect.left() - 10.0).abs() < 1e-9);
    assert!((rect.right() - 28.0).abs() < 1e-9);
    // y from 0 to 25 in values: 1.6px per unit from the bottom at 90
    assert!((rect.top() - 50.0).abs() < 1e-9);
    assert!((rect.bottom() - 90.0).abs() < 1e-9);
}

#[test]
fn test_zoom_scales_distance_from_origin() {
    let (mut vp, trans) = setup(false);
    let mut flag = Flag::default();
    let matrix = vp.zoom(2.0, 1.0);
    vp.refresh(matrix, &mut flag, true);
    assert!(flag.0);

    // 50 units wide now spans the whole content width
    let p = trans.pixel_for_values(&vp, 50.0, 0.0);
    assert!((p.x - vp.content_right()).abs() < 1e-9);
}

#[test]
fn test_zero_range_does_not_panic() {
    let vp = ViewPortHandler::new(200.0, 100.0);
    let mut trans = Transformer::new();
    trans.prepare_matrix_value_px(&vp, 0.0, 0.0, 0.0, 0.0);
    trans.prepare_matrix_offset(&vp, false);
    let p = trans.pixel_for_values(&vp, 1.0, 1.0);
    assert!(p.x.is_finite());
    // singular matrix: the inverse yields non-finite values instead of panicking
    let back = trans.value_for_touch_point(&vp, DVec2::new(10.0, 10.0));
    assert!(!back.is_finite());
}
