use super::*;

#[test]
fn empty_box_uses_numeric_extremes() {
    let bb = BoundingBox::empty();
    assert!(bb.is_empty());
    assert_eq!(bb.min, [f64::MAX; 3]);
    assert_eq!(bb.max, [f64::MIN; 3]);
    assert_eq!(bb.extent(0), 0.0);
}

#[test]
fn include_widens_both_ends() {
    let mut bb = BoundingBox::empty();
    bb.include([1.0, -2.0, 0.0]);
    assert!(!bb.is_empty());
    assert_eq!(bb.min, [1.0, -2.0, 0.0]);
    assert_eq!(bb.max, [1.0, -2.0, 0.0]);

    bb.include([-1.0, 3.0, 0.5]);
    assert_eq!(bb.min, [-1.0, -2.0, 0.0]);
    assert_eq!(bb.max, [1.0, 3.0, 0.5]);
    assert!(bb.contains([0.0, 0.0, 0.25]));
    assert!(bb.contains([1.0, 3.0, 0.5]));
    assert!(!bb.contains([1.5, 0.0, 0.0]));
    assert_eq!(bb.extent(1), 5.0);
}

#[test]
fn nan_is_ignored_and_infinity_widens() {
    let mut bb = BoundingBox::empty();
    bb.include([0.0, 0.0, 0.0]);
    bb.include([f64::NAN, f64::INFINITY, f64::NEG_INFINITY]);
    assert_eq!(bb.min[0], 0.0);
    assert_eq!(bb.max[0], 0.0);
    assert_eq!(bb.max[1], f64::INFINITY);
    assert_eq!(bb.min[2], f64::NEG_INFINITY);
}

#[test]
fn point_widening_is_exact() {
    let p = Point3::new(0.1, -2.5, 0.0);
    let [x, y, z] = p.to_f64();
    assert_eq!(x as f32, 0.1f32);
    assert_eq!(y, -2.5);
    assert_eq!(z, 0.0);
    assert!(p.is_finite());
    assert!(!Point3::new(f32::NAN, 0.0, 0.0).is_finite());
}

#[test]
fn axes_fill_independently() {
    let mut bb = BoundingBox::empty();
    bb.include([1.0, 2.0, f64::NAN]);
    assert!(!bb.is_empty());
    assert!(!bb.is_axis_empty(0));
    assert!(bb.is_axis_empty(2));
    assert_eq!(bb.extent(2), 0.0);
    assert_eq!(bb.extent(0), 0.0);

    bb.include([3.0, 2.0, f64::NAN]);
    assert_eq!(bb.extent(0), 2.0);
}

#[test]
fn plane_finiteness_ignores_depth() {
    let p = Point3::new(1.0, 2.0, f32::NAN);
    assert!(p.is_finite_xy());
    assert!(!p.is_finite());
    assert!(!Point3::new(1.0, f32::INFINITY, 0.0).is_finite_xy());
}
