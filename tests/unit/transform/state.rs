use super::*;

const R: f64 = 1080.0;
const EPS: f64 = 1e-9;

fn size(w: u32, h: u32) -> ImageSize {
    ImageSize::new(w, h).unwrap()
}

fn assert_covers(state: TransformState, image: ImageSize) {
    let rect = state.image_rect(image);
    assert!(rect.x0 <= EPS, "left gap: {rect:?}");
    assert!(rect.y0 <= EPS, "top gap: {rect:?}");
    assert!(rect.x1 >= R - EPS, "right gap: {rect:?}");
    assert!(rect.y1 >= R - EPS, "bottom gap: {rect:?}");
}

#[test]
fn fit_uses_cover_scale_and_centers() {
    for (w, h) in [(4000, 3000), (3000, 4000), (1080, 1080), (500, 200), (7, 13)] {
        let image = size(w, h);
        let st = TransformState::fit(image, R);
        let expected = (R / f64::from(w)).max(R / f64::from(h));
        assert!((st.scale - expected).abs() < EPS);
        assert_covers(st, image);

        let rect = st.image_rect(image);
        assert!(((rect.x0 + rect.x1) / 2.0 - R / 2.0).abs() < 1e-6);
        assert!(((rect.y0 + rect.y1) / 2.0 - R / 2.0).abs() < 1e-6);
    }
}

#[test]
fn fit_landscape_spans_height_exactly() {
    let st = TransformState::fit(size(2000, 1000), R);
    assert!((st.scale - 1.08).abs() < EPS);
    assert!(st.offset.y.abs() < EPS);
    assert!((st.offset.x - (R - 2160.0) / 2.0).abs() < 1e-6);
}

#[test]
fn clamp_raises_scale_to_cover_floor() {
    let image = size(2000, 1000);
    let st = TransformState {
        scale: 0.1,
        offset: Vec2::ZERO,
    }
    .clamp(image, R);
    assert!((st.scale - 1.08).abs() < EPS);
    assert_covers(st, image);
}

#[test]
fn clamp_keeps_offsets_inside_bounds() {
    let image = size(2000, 2000);
    let cases = [
        Vec2::new(50.0, 50.0),
        Vec2::new(-5000.0, -5000.0),
        Vec2::new(-100.0, 30.0),
        Vec2::new(f64::NAN, -10.0),
    ];
    for offset in cases {
        let st = TransformState { scale: 1.0, offset }.clamp(image, R);
        assert_eq!(st.scale, 1.0);
        for v in [st.offset.x, st.offset.y] {
            assert!((R - 2000.0..=0.0).contains(&v), "offset {v} out of range");
        }
        assert_covers(st, image);
    }
}

#[test]
fn clamp_leaves_valid_state_alone() {
    let image = size(2000, 1500);
    let st = TransformState {
        scale: 1.0,
        offset: Vec2::new(-300.0, -200.0),
    };
    assert_eq!(st.clamp(image, R), st);
}

#[test]
fn clamp_centers_axis_that_exactly_fits() {
    // Height exactly spans the square at cover scale, width overflows.
    let image = size(2160, 1080);
    let st = TransformState {
        scale: 1.0,
        offset: Vec2::new(-10.0, -40.0),
    }
    .clamp(image, R);
    assert_eq!(st.offset.x, -10.0);
    assert_eq!(st.offset.y, 0.0);
}

#[test]
fn clamp_is_idempotent() {
    let image = size(1234, 987);
    let states = [
        TransformState {
            scale: 0.2,
            offset: Vec2::new(300.0, -900.0),
        },
        TransformState {
            scale: 3.7,
            offset: Vec2::new(-10_000.0, 12.0),
        },
        TransformState {
            scale: 1.5,
            offset: Vec2::new(-200.0, -150.0),
        },
    ];
    for st in states {
        let once = st.clamp(image, R);
        assert_eq!(once.clamp(image, R), once);
    }
}

#[test]
fn clamp_imposes_no_upper_bound() {
    let st = TransformState {
        scale: 50.0,
        offset: Vec2::new(-1.0, -1.0),
    }
    .clamp(size(100, 100), R);
    assert_eq!(st.scale, 50.0);
}

#[test]
fn affine_maps_image_corners_onto_rect() {
    let image = size(400, 300);
    let st = TransformState {
        scale: 4.0,
        offset: Vec2::new(-20.0, -30.0),
    };
    let a = st.to_affine();
    let rect = st.image_rect(image);
    assert_eq!(a * kurbo::Point::ZERO, kurbo::Point::new(rect.x0, rect.y0));
    assert_eq!(
        a * kurbo::Point::new(400.0, 300.0),
        kurbo::Point::new(rect.x1, rect.y1)
    );
}

#[test]
fn pan_and_zoom_helpers_do_not_clamp() {
    let st = TransformState::default()
        .panned(Vec2::new(10.0, -5.0))
        .zoomed(1.5);
    assert_eq!(st.offset, Vec2::new(10.0, -5.0));
    assert_eq!(st.scale, 1.5);
}
