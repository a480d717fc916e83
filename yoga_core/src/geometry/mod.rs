use glam::Vec2;

/// Angle at vertex `b` formed by `a` and `c`, in whole degrees.
///
/// Uses the law of cosines over the three pairwise distances. Returns `None`
/// when either limb segment (`ab` or `bc`) has zero length, since the angle is
/// undefined there; callers treat that as "angle unavailable".
pub fn joint_angle(a: Vec2, b: Vec2, c: Vec2) -> Option<i32> {
    let ab = a.distance(b);
    let bc = b.distance(c);
    let ac = a.distance(c);

    if ab <= f32::EPSILON || bc <= f32::EPSILON {
        return None;
    }

    let cos = (ab * ab + bc * bc - ac * ac) / (2.0 * (ab * bc));
    // Rounding can push nearly collinear points slightly past ±1.
    let radians = cos.clamp(-1.0, 1.0).acos();
    Some(radians.to_degrees().round() as i32)
}

/// Whether an optional angle falls inside an inclusive range.
pub fn within(angle: Option<i32>, min: i32, max: i32) -> bool {
    matches!(angle, Some(a) if a >= min && a <= max)
}
