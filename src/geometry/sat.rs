//! Separating axis tests for convex polygons.

use glam::Vec2;

use super::{Polygon, Response};

/// Project a set of points onto an axis, returning the (min, max) range.
pub fn flatten_points_on(points: &[Vec2], axis: Vec2) -> (f32, f32) {
    let mut min = f32::MAX;
    let mut max = -f32::MAX;

    for point in points {
        let dot = point.dot(axis);
        min = min.min(dot);
        max = max.max(dot);
    }

    (min, max)
}

/// Test whether `axis` separates the two point sets.
///
/// Returns true when the projections are disjoint. When they overlap, the
/// signed overlap along the axis is folded into `response`, keeping the
/// smallest magnitude seen so far across calls. When one projection contains
/// the other, the shorter way out is chosen.
pub fn is_separating_axis(
    a_pos: Vec2,
    b_pos: Vec2,
    a_points: &[Vec2],
    b_points: &[Vec2],
    axis: Vec2,
    response: &mut Response,
) -> bool {
    let projected_offset = (b_pos - a_pos).dot(axis);

    let (a_min, a_max) = flatten_points_on(a_points, axis);
    let (mut b_min, mut b_max) = flatten_points_on(b_points, axis);
    b_min += projected_offset;
    b_max += projected_offset;

    if a_min > b_max || b_min > a_max {
        return true;
    }

    let overlap;
    if a_min < b_min {
        response.a_in_b = false;
        if a_max < b_max {
            overlap = a_max - b_min;
            response.b_in_a = false;
        } else {
            // B is contained in A, take the shorter escape
            let option1 = a_max - b_min;
            let option2 = b_max - a_min;
            overlap = if option1 < option2 { option1 } else { -option2 };
        }
    } else {
        response.b_in_a = false;
        if a_max > b_max {
            overlap = a_min - b_max;
            response.a_in_b = false;
        } else {
            // A is contained in B, take the shorter escape
            let option1 = a_max - b_min;
            let option2 = b_max - a_min;
            overlap = if option1 < option2 { option1 } else { -option2 };
        }
    }

    let abs_overlap = overlap.abs();
    if abs_overlap < response.overlap {
        response.overlap = abs_overlap;
        response.overlap_n = if overlap < 0.0 { -axis } else { axis };
    }

    false
}

/// Full SAT test between two convex polygons.
///
/// Returns true when the polygons overlap, filling `response` with the
/// minimum translation vector pointing from `a` towards `b`. The caller is
/// responsible for clearing a reused response beforehand.
pub fn test_polygon_polygon(a: &Polygon, b: &Polygon, response: &mut Response) -> bool {
    for axis in a.normals() {
        if is_separating_axis(a.pos, b.pos, a.calc_points(), b.calc_points(), *axis, response) {
            return false;
        }
    }

    for axis in b.normals() {
        if is_separating_axis(a.pos, b.pos, a.calc_points(), b.calc_points(), *axis, response) {
            return false;
        }
    }

    response.overlap_v = response.overlap_n * response.overlap;
    true
}
