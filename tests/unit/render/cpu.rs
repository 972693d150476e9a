use super::*;
use crate::attractor::config::AttractorConfig;

fn opts(width: u32, height: u32) -> RasterOpts {
    RasterOpts {
        width,
        height,
        background: [0, 0, 0],
        margin_px: 0,
    }
}

fn bounds_of(points: &[Point3]) -> BoundingBox {
    let mut bb = BoundingBox::empty();
    for p in points {
        bb.include(p.to_f64());
    }
    bb
}

#[test]
fn zero_sized_frame_is_rejected() {
    let err = rasterize(&[], &[], &BoundingBox::empty(), &opts(0, 4)).unwrap_err();
    assert!(matches!(err, AttractorError::Config(_)));
}

#[test]
fn mismatched_buffers_are_rejected() {
    let points = [Point3::new(0.0, 0.0, 0.0)];
    let err = rasterize(&points, &[], &bounds_of(&points), &opts(4, 4)).unwrap_err();
    assert!(matches!(err, AttractorError::Validation(_)));
}

#[test]
fn empty_cloud_is_plain_background() {
    let mut o = opts(3, 2);
    o.background = [10, 20, 30];
    let frame = rasterize(&[], &[], &BoundingBox::empty(), &o).unwrap();
    assert_eq!(frame.data.len(), 3 * 2 * 4);
    assert!(frame.data.chunks_exact(4).all(|px| px == [10, 20, 30, 255]));
}

#[test]
fn bounds_corners_land_on_frame_corners() {
    let points = [Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 1.0, 0.0)];
    let colors = [
        Rgba::new(1.0, 0.0, 0.0, 1.0),
        Rgba::new(0.0, 1.0, 0.0, 1.0),
    ];
    let frame = rasterize(&points, &colors, &bounds_of(&points), &opts(10, 10)).unwrap();

    // y points up, so the minimum lands bottom-left.
    assert_eq!(frame.pixel(0, 9), Some([255, 0, 0, 255]));
    assert_eq!(frame.pixel(9, 0), Some([0, 255, 0, 255]));
    assert_eq!(frame.pixel(5, 5), Some([0, 0, 0, 255]));
}

#[test]
fn aspect_ratio_is_preserved() {
    let points = [Point3::new(0.0, 0.0, 0.0), Point3::new(2.0, 1.0, 0.0)];
    let white = Rgba::new(1.0, 1.0, 1.0, 1.0);
    let frame = rasterize(&points, &[white; 2], &bounds_of(&points), &opts(21, 21)).unwrap();

    assert_eq!(frame.pixel(0, 15), Some([255, 255, 255, 255]));
    assert_eq!(frame.pixel(20, 5), Some([255, 255, 255, 255]));
    let lit = frame.data.chunks_exact(4).filter(|px| px[0] == 255).count();
    assert_eq!(lit, 2);
}

#[test]
fn overlapping_points_blend_source_over() {
    let p = Point3::new(3.0, -1.0, 0.0);
    let half_white = Rgba::new(1.0, 1.0, 1.0, 0.5);

    let once = rasterize(&[p], &[half_white], &bounds_of(&[p]), &opts(10, 10)).unwrap();
    assert_eq!(once.pixel(5, 5), Some([128, 128, 128, 255]));

    let twice = rasterize(
        &[p, p],
        &[half_white; 2],
        &bounds_of(&[p, p]),
        &opts(10, 10),
    )
    .unwrap();
    assert_eq!(twice.pixel(5, 5), Some([191, 191, 191, 255]));
}

#[test]
fn non_finite_points_and_colors_are_skipped() {
    let points = [
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(f32::NAN, 0.5, 0.0),
        Point3::new(1.0, 1.0, 0.0),
    ];
    let colors = [
        Rgba::new(1.0, 1.0, 1.0, 1.0),
        Rgba::new(1.0, 1.0, 1.0, 1.0),
        Rgba::new(f32::NAN, 1.0, 1.0, 1.0),
    ];
    let frame = rasterize(&points, &colors, &bounds_of(&points), &opts(8, 8)).unwrap();
    let lit = frame.data.chunks_exact(4).filter(|px| px[0] != 0).count();
    assert_eq!(lit, 1);
    assert_eq!(frame.pixel(0, 7), Some([255, 255, 255, 255]));
}

#[test]
fn out_of_range_colors_are_clamped() {
    let p = Point3::new(0.0, 0.0, 0.0);
    let frame = rasterize(
        &[p],
        &[Rgba::new(4.0, -2.0, 0.5, 3.0)],
        &bounds_of(&[p]),
        &opts(4, 4),
    )
    .unwrap();
    assert_eq!(frame.pixel(2, 2), Some([255, 0, 128, 255]));
}

#[test]
fn attractor_rasterize_realizes_first() {
    let mut a = Attractor::new(&AttractorConfig::classic().with_precision_points(5_000)).unwrap();
    assert!(!a.is_realized());

    let mut o = opts(64, 48);
    o.margin_px = 4;
    let frame = a.rasterize(&o).unwrap();
    assert!(a.is_realized());
    assert_eq!((frame.width, frame.height), (64, 48));
    assert_eq!(frame.data.len(), 64 * 48 * 4);
    assert!(frame.data.chunks_exact(4).any(|px| px[0] > 0));
}

#[test]
fn pixel_outside_the_frame_is_none() {
    let frame = rasterize(&[], &[], &BoundingBox::empty(), &opts(3, 2)).unwrap();
    assert_eq!(frame.pixel(2, 1), Some([0, 0, 0, 255]));
    assert_eq!(frame.pixel(3, 0), None);
    assert_eq!(frame.pixel(0, 2), None);
}

#[test]
fn nan_depth_still_draws_the_plane() {
    let points = [Point3::new(0.0, 0.0, f32::NAN), Point3::new(1.0, 1.0, f32::NAN)];
    let bb = bounds_of(&points);
    assert!(bb.is_axis_empty(2));

    let white = Rgba::new(1.0, 1.0, 1.0, 1.0);
    let frame = rasterize(&points, &[white; 2], &bb, &opts(10, 10)).unwrap();
    assert_eq!(frame.pixel(0, 9), Some([255, 255, 255, 255]));
    assert_eq!(frame.pixel(9, 0), Some([255, 255, 255, 255]));
}

#[test]
fn attractor_with_nan_depth_channel_renders() {
    let cfg = AttractorConfig::classic()
        .with_precision_points(20_000)
        .with_channel(crate::attractor::config::Channel::Z, "sqrt(-1)");
    let mut a = Attractor::new(&cfg).unwrap();
    let frame = a.rasterize(&opts(32, 32)).unwrap();
    assert!(!a.bounding_box().is_empty());
    assert!(frame.data.chunks_exact(4).any(|px| px[0] > 0));
}
