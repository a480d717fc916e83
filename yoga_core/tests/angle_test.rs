use glam::Vec2;
use yoga_core::geometry::{joint_angle, within};

#[test]
fn test_straight_line_is_180() {
    let angle = joint_angle(Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0), Vec2::new(2.0, 0.0));
    assert_eq!(angle, Some(180));
}

#[test]
fn test_right_angle() {
    let angle = joint_angle(Vec2::new(1.0, 0.0), Vec2::new(0.0, 0.0), Vec2::new(0.0, 1.0));
    assert_eq!(angle, Some(90));
}

#[test]
fn test_rounds_to_nearest_degree() {
    // atan(1/2) ≈ 26.57°
    let angle = joint_angle(Vec2::new(2.0, 0.0), Vec2::new(0.0, 0.0), Vec2::new(2.0, 1.0));
    assert_eq!(angle, Some(27));
}

#[test]
fn test_folded_back_limb_is_zero() {
    let angle = joint_angle(Vec2::new(3.0, 3.0), Vec2::new(0.0, 0.0), Vec2::new(3.0, 3.0));
    assert_eq!(angle, Some(0));
}

#[test]
fn test_symmetric_in_outer_points() {
    let triples = [
        ([12.5, 300.0], [100.0, 250.0], [180.0, 390.0]),
        ([0.0, 0.0], [3.0, 4.0], [10.0, -2.0]),
        ([640.0, 10.0], [320.0, 200.0], [5.0, 399.0]),
    ];
    for (a, b, c) in triples {
        let (a, b, c) = (Vec2::from(a), Vec2::from(b), Vec2::from(c));
        assert_eq!(joint_angle(a, b, c), joint_angle(c, b, a));
    }
}

#[test]
fn test_coincident_points_are_unavailable() {
    assert_eq!(
        joint_angle(Vec2::new(0.0, 0.0), Vec2::new(0.0, 0.0), Vec2::new(1.0, 1.0)),
        None
    );
    assert_eq!(
        joint_angle(Vec2::new(5.0, 1.0), Vec2::new(2.0, 2.0), Vec2::new(2.0, 2.0)),
        None
    );
}

#[test]
fn test_within_range() {
    assert!(within(Some(120), 120, 150));
    assert!(within(Some(150), 120, 150));
    assert!(!within(Some(151), 120, 150));
    assert!(!within(None, 120, 150));
}
