use glam::DVec2;
use viewport_charts::decimation::{reduce_with_douglas_peucker, reduce_with_douglas_peucker_into};

#[test]
fn test_collinear_points_reduce_to_endpoints() {
    let points: Vec<DVec2> = (0..10).map(|i| DVec2::new(i as f64, i as f64 * 2.0)).collect();
    let reduced = reduce_with_douglas_peucker(&points, 0.5);
    assert_eq!(reduced, vec![points[0], points[9]]);
}

#[test]
fn test_peak_is_kept() {
    let points = vec![
        DVec2::new(0.0, 0.0),
        DVec2::new(1.0, 0.1),
        DVec2::new(2.0, 10.0),
        DVec2::new(3.0, 0.1),
        DVec2::new(4.0, 0.0),
    ];
    let reduced = reduce_with_douglas_peucker(&points, 1.0);
    assert_eq!(
        reduced,
        vec![DVec2::new(0.0, 0.0), DVec2::new(2.0, 10.0), DVec2::new(4.0, 0.0)]
    );
}

#[test]
fn test_endpoints_always_kept_and_order_preserved() {
    let points: Vec<DVec2> = (0..200)
        .map(|i| DVec2::new(i as f64, (i as f64 * 0.3).sin() * 20.0))
        .collect();
    let reduced = reduce_with_douglas_peucker(&points, 2.0);
    assert_eq!(reduced.first(), points.first());
    assert_eq!(reduced.last(), points.last());
    assert!(reduced.len() < points.len());
    assert!(reduced.windows(2).all(|w| w[0].x < w[1].x));
}

#[test]
fn test_zero_tolerance_or_short_input_is_unchanged() {
    let points = vec![DVec2::new(0.0, 0.0), DVec2::new(1.0, 5.0), DVec2::new(2.0, 0.0)];
    assert_eq!(reduce_with_douglas_peucker(&points, 0.0), points);
    assert_eq!(reduce_with_douglas_peucker(&points[..2], 10.0), points[..2].to_vec());
}

#[test]
fn test_into_reuses_buffer() {
    let points: Vec<DVec2> = (0..5).map(|i| DVec2::new(i as f64, 0.0)).collect();
    let mut out = vec![DVec2::splat(99.0); 8];
    reduce_with_douglas_peucker_into(&points, 0.1, &mut out);
    assert_eq!(out, vec![points[0], points[4]]);
}
