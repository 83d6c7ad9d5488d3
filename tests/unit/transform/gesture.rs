use super::*;

#[test]
fn drag_accumulates_step_deltas() {
    let mut g = GestureTracker::default();
    assert_eq!(g.drag_move(Point::new(5.0, 5.0)), None);

    g.drag_start(Point::new(100.0, 100.0));
    assert!(g.is_dragging());
    assert_eq!(
        g.drag_move(Point::new(110.0, 95.0)),
        Some(Vec2::new(10.0, -5.0))
    );
    assert_eq!(
        g.drag_move(Point::new(111.0, 95.0)),
        Some(Vec2::new(1.0, 0.0))
    );

    g.drag_end();
    assert!(!g.is_dragging());
    assert_eq!(g.drag_move(Point::new(0.0, 0.0)), None);
    assert_eq!(g.drag_move(Point::new(7.0, 7.0)), None);
    assert!(!g.is_dragging());
}

#[test]
fn pinch_ratio_and_baseline_update() {
    let mut g = GestureTracker::default();
    assert_eq!(g.pinch_move(120.0), None);
    // The first move without a start still records a baseline.
    assert!(g.is_pinching());

    g.pinch_start(100.0);
    assert_eq!(g.pinch_move(150.0), Some(1.5));
    assert_eq!(g.pinch_move(150.0), Some(1.0));
    assert_eq!(g.pinch_move(75.0), Some(0.5));

    g.pinch_end();
    assert!(!g.is_pinching());
}

#[test]
fn pinch_from_zero_distance_yields_no_factor() {
    let mut g = GestureTracker::default();
    g.pinch_start(0.0);
    assert_eq!(g.pinch_move(40.0), None);
    assert_eq!(g.pinch_move(80.0), Some(2.0));
}

#[test]
fn reset_clears_everything() {
    let mut g = GestureTracker::default();
    g.drag_start(Point::ZERO);
    g.pinch_start(10.0);
    g.reset();
    assert_eq!(g, GestureTracker::default());
}

#[test]
fn pointer_mapping_scales_per_axis() {
    let m = PointerMapping::new(1080.0, Vec2::new(540.0, 270.0)).unwrap();
    assert_eq!(m.factor(), Vec2::new(2.0, 4.0));
    assert_eq!(
        m.to_reference(Point::new(10.0, 10.0)),
        Point::new(20.0, 40.0)
    );
    assert_eq!(
        PointerMapping::identity().to_reference(Point::new(3.0, 4.0)),
        Point::new(3.0, 4.0)
    );
}

#[test]
fn pointer_mapping_rejects_degenerate_sizes() {
    assert!(PointerMapping::new(1080.0, Vec2::new(0.0, 100.0)).is_err());
    assert!(PointerMapping::new(0.0, Vec2::new(100.0, 100.0)).is_err());
    assert!(PointerMapping::new(1080.0, Vec2::new(f64::NAN, 100.0)).is_err());
}

#[test]
fn bound_scale_caps_but_never_below_cover() {
    assert_eq!(bound_scale(8.0, 6.0, 1.0), 6.0);
    assert_eq!(bound_scale(2.0, 6.0, 1.0), 2.0);
    assert_eq!(bound_scale(9.0, 6.0, 7.5), 7.5);
}

#[test]
fn pinch_distance_is_euclidean() {
    assert_eq!(
        pinch_distance(Point::new(0.0, 0.0), Point::new(3.0, 4.0)),
        5.0
    );
}
