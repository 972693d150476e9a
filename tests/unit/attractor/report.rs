use super::*;
use crate::attractor::config::AttractorConfig;

#[test]
fn report_lists_channels_rpn_and_constants() {
    let cfg = AttractorConfig::clifford()
        .with_seed(3)
        .with_precision_points(100);
    let mut a = Attractor::new(&cfg).unwrap();
    a.set_constants(vec![1.5, -0.25, 2.0, 0.5]).unwrap();

    let lines = a.report().unwrap();
    assert!(a.is_realized());
    assert!(lines[0].starts_with("attractor: 100 points, x ["));
    assert_eq!(lines[1], "x: sin(a * y) + c * cos(a * x)");
    assert_eq!(lines[2], "  rpn: a y * sin c a x * cos * +");
    assert_eq!(lines[3], "  a = 1.5");
    assert_eq!(lines[4], "  b = -0.25");
    assert_eq!(lines[7], "y: sin(b * x) + d * cos(b * y)");
    assert_eq!(lines.len(), 1 + 2 * (2 + 4));
}

#[test]
fn report_without_constants_has_no_value_lines() {
    let mut a = Attractor::new(&AttractorConfig::classic().with_precision_points(10)).unwrap();
    let lines = a.report().unwrap();
    assert_eq!(lines.len(), 5);
    assert_eq!(lines[2], "  rpn: -1.4 y * sin -1.4 x * cos +");
}

#[test]
fn empty_bounds_are_labelled() {
    assert_eq!(format_bounds(&BoundingBox::empty()), "empty bounds");
}

#[test]
fn axis_without_finite_values_is_labelled() {
    let mut bb = BoundingBox::empty();
    bb.include([1.0, 2.0, f64::NAN]);
    assert_eq!(format_bounds(&bb), "x [1, 1] y [2, 2] z empty");
}
