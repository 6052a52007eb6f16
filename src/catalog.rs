//! Builders for every supported tile shape.
//!
//! Each builder takes a tile's world position and dimensions and produces a
//! [`TileSlope`]: the collision polygon (local vertices, world-positioned),
//! the sloped boundary line where the shape has one, the non-default edge
//! flags, and the preferred separation axis for non-rectangular shapes.
//!
//! Shape names read as `<occupied region><slope facing>`: `HalfBottomLeft`
//! fills the bottom-left triangle, `QuarterLeftBottomLow` is the shallow
//! half of a leftward 22.5 degree ramp, and so on.

use std::collections::HashMap;

use glam::Vec2;

use crate::geometry::{Polygon, Rect};
use crate::slope::{EdgeKind, EdgeSet, Line, SlopeType, TileSlope};

/// Builds the slope for one tile from its world rectangle.
pub type SlopeBuilder = fn(SlopeType, f32, f32, f32, f32) -> TileSlope;

// Unit axis components for 45 and 22.5 degree surfaces.
const SLOPE_45: f32 = std::f32::consts::FRAC_1_SQRT_2;
const SLOPE_22_X: f32 = 0.447_213_6; // 1 / sqrt(5)
const SLOPE_22_Y: f32 = 0.894_427_2; // 2 / sqrt(5)

/// The default builder for every concrete shape.
pub fn definitions() -> HashMap<SlopeType, SlopeBuilder> {
    let mut definitions: HashMap<SlopeType, SlopeBuilder> = HashMap::new();

    definitions.insert(SlopeType::Full, full);
    definitions.insert(SlopeType::HalfBottom, half_bottom);
    definitions.insert(SlopeType::HalfTop, half_top);
    definitions.insert(SlopeType::HalfLeft, half_left);
    definitions.insert(SlopeType::HalfRight, half_right);
    definitions.insert(SlopeType::HalfBottomLeft, half_bottom_left);
    definitions.insert(SlopeType::HalfBottomRight, half_bottom_right);
    definitions.insert(SlopeType::HalfTopLeft, half_top_left);
    definitions.insert(SlopeType::HalfTopRight, half_top_right);
    definitions.insert(SlopeType::QuarterBottomLeftLow, quarter_bottom_left_low);
    definitions.insert(SlopeType::QuarterBottomLeftHigh, quarter_bottom_left_high);
    definitions.insert(SlopeType::QuarterBottomRightLow, quarter_bottom_right_low);
    definitions.insert(SlopeType::QuarterBottomRightHigh, quarter_bottom_right_high);
    definitions.insert(SlopeType::QuarterLeftBottomLow, quarter_left_bottom_low);
    definitions.insert(SlopeType::QuarterLeftBottomHigh, quarter_left_bottom_high);
    definitions.insert(SlopeType::QuarterRightBottomLow, quarter_right_bottom_low);
    definitions.insert(SlopeType::QuarterRightBottomHigh, quarter_right_bottom_high);
    definitions.insert(SlopeType::QuarterLeftTopLow, quarter_left_top_low);
    definitions.insert(SlopeType::QuarterLeftTopHigh, quarter_left_top_high);
    definitions.insert(SlopeType::QuarterRightTopLow, quarter_right_top_low);
    definitions.insert(SlopeType::QuarterRightTopHigh, quarter_right_top_high);
    definitions.insert(SlopeType::QuarterTopLeftLow, quarter_top_left_low);
    definitions.insert(SlopeType::QuarterTopLeftHigh, quarter_top_left_high);
    definitions.insert(SlopeType::QuarterTopRightLow, quarter_top_right_low);
    definitions.insert(SlopeType::QuarterTopRightHigh, quarter_top_right_high);

    definitions
}

/// Build the slope for a shape directly, without a factory.
pub fn build(kind: SlopeType, x: f32, y: f32, w: f32, h: f32) -> Option<TileSlope> {
    definitions().get(&kind).map(|builder| builder(kind, x, y, w, h))
}

fn polygon(x: f32, y: f32, points: Vec<Vec2>) -> Polygon {
    Polygon::new(Vec2::new(x, y), points)
}

/// A fully solid tile.
pub fn full(kind: SlopeType, x: f32, y: f32, w: f32, h: f32) -> TileSlope {
    let polygon = Rect::new(Vec2::new(x, y), w, h).to_polygon();
    TileSlope::new(kind, polygon, None, EdgeSet::default(), None)
}

/// The bottom half of a tile.
pub fn half_bottom(kind: SlopeType, x: f32, y: f32, w: f32, h: f32) -> TileSlope {
    let polygon = polygon(
        x,
        y,
        vec![
            Vec2::new(0.0, h / 2.0),
            Vec2::new(w, h / 2.0),
            Vec2::new(w, h),
            Vec2::new(0.0, h),
        ],
    );
    let line = Line::new(Vec2::new(x, y + h / 2.0), Vec2::new(x + w, y + h / 2.0));
    let edges = EdgeSet {
        top: EdgeKind::Interesting,
        left: EdgeKind::Interesting,
        right: EdgeKind::Interesting,
        ..EdgeSet::default()
    };
    TileSlope::new(kind, polygon, Some(line), edges, None)
}

/// The top half of a tile.
pub fn half_top(kind: SlopeType, x: f32, y: f32, w: f32, h: f32) -> TileSlope {
    let polygon = polygon(
        x,
        y,
        vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(w, 0.0),
            Vec2::new(w, h / 2.0),
            Vec2::new(0.0, h / 2.0),
        ],
    );
    let line = Line::new(Vec2::new(x, y), Vec2::new(x + w, y));
    let edges = EdgeSet {
        bottom: EdgeKind::Interesting,
        left: EdgeKind::Interesting,
        right: EdgeKind::Interesting,
        ..EdgeSet::default()
    };
    TileSlope::new(kind, polygon, Some(line), edges, None)
}

/// The left half of a tile.
pub fn half_left(kind: SlopeType, x: f32, y: f32, w: f32, h: f32) -> TileSlope {
    let polygon = polygon(
        x,
        y,
        vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(w / 2.0, 0.0),
            Vec2::new(w / 2.0, h),
            Vec2::new(0.0, h),
        ],
    );
    let line = Line::new(Vec2::new(x + w / 2.0, y), Vec2::new(x + w / 2.0, y + h));
    let edges = EdgeSet {
        top: EdgeKind::Interesting,
        bottom: EdgeKind::Interesting,
        right: EdgeKind::Interesting,
        ..EdgeSet::default()
    };
    TileSlope::new(kind, polygon, Some(line), edges, None)
}

/// The right half of a tile.
pub fn half_right(kind: SlopeType, x: f32, y: f32, w: f32, h: f32) -> TileSlope {
    let polygon = polygon(
        x,
        y,
        vec![
            Vec2::new(w / 2.0, 0.0),
            Vec2::new(w, 0.0),
            Vec2::new(w, h),
            Vec2::new(w / 2.0, h),
        ],
    );
    let line = Line::new(Vec2::new(x + w / 2.0, y), Vec2::new(x + w / 2.0, y + h));
    let edges = EdgeSet {
        top: EdgeKind::Interesting,
        bottom: EdgeKind::Interesting,
        left: EdgeKind::Interesting,
        ..EdgeSet::default()
    };
    TileSlope::new(kind, polygon, Some(line), edges, None)
}

/// A 45 degree slope rising right to left, filling the bottom-left triangle.
pub fn half_bottom_left(kind: SlopeType, x: f32, y: f32, w: f32, h: f32) -> TileSlope {
    let polygon = polygon(
        x,
        y,
        vec![Vec2::new(0.0, 0.0), Vec2::new(w, h), Vec2::new(0.0, h)],
    );
    let line = Line::new(Vec2::new(x, y), Vec2::new(x + w, y + h));
    let edges = EdgeSet {
        top: EdgeKind::Interesting,
        right: EdgeKind::Interesting,
        ..EdgeSet::default()
    };
    TileSlope::new(kind, polygon, Some(line), edges, Some(Vec2::new(SLOPE_45, -SLOPE_45)))
}

/// A 45 degree slope rising left to right, filling the bottom-right triangle.
pub fn half_bottom_right(kind: SlopeType, x: f32, y: f32, w: f32, h: f32) -> TileSlope {
    let polygon = polygon(
        x,
        y,
        vec![Vec2::new(w, 0.0), Vec2::new(w, h), Vec2::new(0.0, h)],
    );
    let line = Line::new(Vec2::new(x, y + h), Vec2::new(x + w, y));
    let edges = EdgeSet {
        top: EdgeKind::Interesting,
        left: EdgeKind::Interesting,
        ..EdgeSet::default()
    };
    TileSlope::new(kind, polygon, Some(line), edges, Some(Vec2::new(-SLOPE_45, -SLOPE_45)))
}

/// An upside-down 45 degree slope filling the top-left triangle.
pub fn half_top_left(kind: SlopeType, x: f32, y: f32, w: f32, h: f32) -> TileSlope {
    let polygon = polygon(
        x,
        y,
        vec![Vec2::new(0.0, 0.0), Vec2::new(w, 0.0), Vec2::new(0.0, h)],
    );
    let line = Line::new(Vec2::new(x + w, y), Vec2::new(x, y + h));
    let edges = EdgeSet {
        bottom: EdgeKind::Interesting,
        right: EdgeKind::Interesting,
        ..EdgeSet::default()
    };
    TileSlope::new(kind, polygon, Some(line), edges, Some(Vec2::new(SLOPE_45, SLOPE_45)))
}

/// An upside-down 45 degree slope filling the top-right triangle.
pub fn half_top_right(kind: SlopeType, x: f32, y: f32, w: f32, h: f32) -> TileSlope {
    let polygon = polygon(
        x,
        y,
        vec![Vec2::new(0.0, 0.0), Vec2::new(w, 0.0), Vec2::new(w, h)],
    );
    let line = Line::new(Vec2::new(x + w, y + h), Vec2::new(x, y));
    let edges = EdgeSet {
        bottom: EdgeKind::Interesting,
        left: EdgeKind::Interesting,
        ..EdgeSet::default()
    };
    TileSlope::new(kind, polygon, Some(line), edges, Some(Vec2::new(-SLOPE_45, SLOPE_45)))
}

/// The shallow half of a 22.5 degree floor slope rising right to left.
pub fn quarter_bottom_left_low(kind: SlopeType, x: f32, y: f32, w: f32, h: f32) -> TileSlope {
    let polygon = polygon(
        x,
        y,
        vec![Vec2::new(0.0, h / 2.0), Vec2::new(w, h), Vec2::new(0.0, h)],
    );
    let line = Line::new(Vec2::new(x, y + h / 2.0), Vec2::new(x + w, y + h));
    let edges = EdgeSet {
        top: EdgeKind::Interesting,
        left: EdgeKind::Interesting,
        right: EdgeKind::Interesting,
        ..EdgeSet::default()
    };
    TileSlope::new(kind, polygon, Some(line), edges, Some(Vec2::new(SLOPE_22_X, -SLOPE_22_Y)))
}

/// The steep half of a 22.5 degree floor slope rising right to left.
pub fn quarter_bottom_left_high(kind: SlopeType, x: f32, y: f32, w: f32, h: f32) -> TileSlope {
    let polygon = polygon(
        x,
        y,
        vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(w, h / 2.0),
            Vec2::new(w, h),
            Vec2::new(0.0, h),
        ],
    );
    let line = Line::new(Vec2::new(x, y), Vec2::new(x + w, y + h / 2.0));
    let edges = EdgeSet {
        top: EdgeKind::Interesting,
        right: EdgeKind::Interesting,
        ..EdgeSet::default()
    };
    TileSlope::new(kind, polygon, Some(line), edges, Some(Vec2::new(SLOPE_22_X, -SLOPE_22_Y)))
}

/// The shallow half of a 22.5 degree floor slope rising left to right.
pub fn quarter_bottom_right_low(kind: SlopeType, x: f32, y: f32, w: f32, h: f32) -> TileSlope {
    let polygon = polygon(
        x,
        y,
        vec![Vec2::new(w, h / 2.0), Vec2::new(w, h), Vec2::new(0.0, h)],
    );
    let line = Line::new(Vec2::new(x, y + h), Vec2::new(x + w, y + h / 2.0));
    let edges = EdgeSet {
        top: EdgeKind::Interesting,
        left: EdgeKind::Interesting,
        right: EdgeKind::Interesting,
        ..EdgeSet::default()
    };
    TileSlope::new(kind, polygon, Some(line), edges, Some(Vec2::new(-SLOPE_22_X, -SLOPE_22_Y)))
}

/// The steep half of a 22.5 degree floor slope rising left to right.
pub fn quarter_bottom_right_high(kind: SlopeType, x: f32, y: f32, w: f32, h: f32) -> TileSlope {
    let polygon = polygon(
        x,
        y,
        vec![
            Vec2::new(w, 0.0),
            Vec2::new(0.0, h / 2.0),
            Vec2::new(0.0, h),
            Vec2::new(w, h),
        ],
    );
    let line = Line::new(Vec2::new(x, y + h), Vec2::new(x + w, y + h / 2.0));
    let edges = EdgeSet {
        top: EdgeKind::Interesting,
        left: EdgeKind::Interesting,
        ..EdgeSet::default()
    };
    TileSlope::new(kind, polygon, Some(line), edges, Some(Vec2::new(-SLOPE_22_X, -SLOPE_22_Y)))
}

/// The shallow half of a 22.5 degree wall slope leaning left, floor facing.
pub fn quarter_left_bottom_low(kind: SlopeType, x: f32, y: f32, w: f32, h: f32) -> TileSlope {
    let polygon = polygon(
        x,
        y,
        vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(w / 2.0, 0.0),
            Vec2::new(w, h),
            Vec2::new(0.0, h),
        ],
    );
    let line = Line::new(Vec2::new(x + w / 2.0, y), Vec2::new(x + w, y + h));
    let edges = EdgeSet {
        top: EdgeKind::Interesting,
        right: EdgeKind::Interesting,
        ..EdgeSet::default()
    };
    TileSlope::new(kind, polygon, Some(line), edges, Some(Vec2::new(SLOPE_22_Y, -SLOPE_22_X)))
}

/// The steep half of a 22.5 degree wall slope leaning left, floor facing.
pub fn quarter_left_bottom_high(kind: SlopeType, x: f32, y: f32, w: f32, h: f32) -> TileSlope {
    let polygon = polygon(
        x,
        y,
        vec![Vec2::new(0.0, 0.0), Vec2::new(w / 2.0, h), Vec2::new(0.0, h)],
    );
    let line = Line::new(Vec2::new(x, y), Vec2::new(x + w / 2.0, y + h));
    let edges = EdgeSet {
        top: EdgeKind::Interesting,
        bottom: EdgeKind::Interesting,
        right: EdgeKind::Interesting,
        ..EdgeSet::default()
    };
    TileSlope::new(kind, polygon, Some(line), edges, Some(Vec2::new(SLOPE_22_Y, -SLOPE_22_X)))
}

/// The shallow half of a 22.5 degree wall slope leaning right, floor facing.
pub fn quarter_right_bottom_low(kind: SlopeType, x: f32, y: f32, w: f32, h: f32) -> TileSlope {
    let polygon = polygon(
        x,
        y,
        vec![
            Vec2::new(w / 2.0, 0.0),
            Vec2::new(w, 0.0),
            Vec2::new(w, h),
            Vec2::new(0.0, h),
        ],
    );
    let line = Line::new(Vec2::new(x, y + h), Vec2::new(x + w / 2.0, y));
    let edges = EdgeSet {
        top: EdgeKind::Interesting,
        left: EdgeKind::Interesting,
        ..EdgeSet::default()
    };
    TileSlope::new(kind, polygon, Some(line), edges, Some(Vec2::new(-SLOPE_22_Y, -SLOPE_22_X)))
}

/// The steep half of a 22.5 degree wall slope leaning right, floor facing.
pub fn quarter_right_bottom_high(kind: SlopeType, x: f32, y: f32, w: f32, h: f32) -> TileSlope {
    let polygon = polygon(
        x,
        y,
        vec![Vec2::new(w, 0.0), Vec2::new(w, h), Vec2::new(w / 2.0, h)],
    );
    let line = Line::new(Vec2::new(x + w / 2.0, y + h), Vec2::new(x + w, y));
    let edges = EdgeSet {
        top: EdgeKind::Interesting,
        bottom: EdgeKind::Interesting,
        left: EdgeKind::Interesting,
        ..EdgeSet::default()
    };
    TileSlope::new(kind, polygon, Some(line), edges, Some(Vec2::new(-SLOPE_22_Y, -SLOPE_22_X)))
}

/// The shallow half of a 22.5 degree wall slope leaning left, ceiling facing.
pub fn quarter_left_top_low(kind: SlopeType, x: f32, y: f32, w: f32, h: f32) -> TileSlope {
    let polygon = polygon(
        x,
        y,
        vec![Vec2::new(0.0, 0.0), Vec2::new(w / 2.0, 0.0), Vec2::new(0.0, h)],
    );
    let line = Line::new(Vec2::new(x, y + h), Vec2::new(x + w / 2.0, y));
    let edges = EdgeSet {
        top: EdgeKind::Interesting,
        bottom: EdgeKind::Interesting,
        right: EdgeKind::Interesting,
        ..EdgeSet::default()
    };
    TileSlope::new(kind, polygon, Some(line), edges, Some(Vec2::new(SLOPE_22_Y, SLOPE_22_X)))
}

/// The steep half of a 22.5 degree wall slope leaning left, ceiling facing.
pub fn quarter_left_top_high(kind: SlopeType, x: f32, y: f32, w: f32, h: f32) -> TileSlope {
    let polygon = polygon(
        x,
        y,
        vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(w, 0.0),
            Vec2::new(w / 2.0, h),
            Vec2::new(0.0, h),
        ],
    );
    let line = Line::new(Vec2::new(x + w / 2.0, y + h), Vec2::new(x + w, y + h));
    let edges = EdgeSet {
        bottom: EdgeKind::Interesting,
        right: EdgeKind::Interesting,
        ..EdgeSet::default()
    };
    TileSlope::new(kind, polygon, Some(line), edges, Some(Vec2::new(SLOPE_22_Y, SLOPE_22_X)))
}

/// The shallow half of a 22.5 degree wall slope leaning right, ceiling facing.
pub fn quarter_right_top_low(kind: SlopeType, x: f32, y: f32, w: f32, h: f32) -> TileSlope {
    let polygon = polygon(
        x,
        y,
        vec![Vec2::new(w / 2.0, 0.0), Vec2::new(w, 0.0), Vec2::new(w, h)],
    );
    let line = Line::new(Vec2::new(x + w / 2.0, y), Vec2::new(x + w, y + h));
    let edges = EdgeSet {
        top: EdgeKind::Interesting,
        bottom: EdgeKind::Interesting,
        right: EdgeKind::Interesting,
        ..EdgeSet::default()
    };
    TileSlope::new(kind, polygon, Some(line), edges, Some(Vec2::new(-SLOPE_22_Y, SLOPE_22_X)))
}

/// The steep half of a 22.5 degree wall slope leaning right, ceiling facing.
pub fn quarter_right_top_high(kind: SlopeType, x: f32, y: f32, w: f32, h: f32) -> TileSlope {
    let polygon = polygon(
        x,
        y,
        vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(w, 0.0),
            Vec2::new(w, h),
            Vec2::new(w / 2.0, h),
        ],
    );
    let line = Line::new(Vec2::new(x, y), Vec2::new(x + w / 2.0, y + h));
    let edges = EdgeSet {
        bottom: EdgeKind::Interesting,
        right: EdgeKind::Interesting,
        ..EdgeSet::default()
    };
    TileSlope::new(kind, polygon, Some(line), edges, Some(Vec2::new(-SLOPE_22_Y, SLOPE_22_X)))
}

/// The shallow half of a 22.5 degree ceiling slope dropping left to right.
pub fn quarter_top_left_low(kind: SlopeType, x: f32, y: f32, w: f32, h: f32) -> TileSlope {
    let polygon = polygon(
        x,
        y,
        vec![Vec2::new(0.0, 0.0), Vec2::new(w, 0.0), Vec2::new(0.0, h / 2.0)],
    );
    let line = Line::new(Vec2::new(x, y + h / 2.0), Vec2::new(x + w, y));
    let edges = EdgeSet {
        bottom: EdgeKind::Interesting,
        left: EdgeKind::Interesting,
        right: EdgeKind::Interesting,
        ..EdgeSet::default()
    };
    TileSlope::new(kind, polygon, Some(line), edges, Some(Vec2::new(SLOPE_22_X, SLOPE_22_Y)))
}

/// The steep half of a 22.5 degree ceiling slope dropping left to right.
pub fn quarter_top_left_high(kind: SlopeType, x: f32, y: f32, w: f32, h: f32) -> TileSlope {
    let polygon = polygon(
        x,
        y,
        vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(w, 0.0),
            Vec2::new(w, h / 2.0),
            Vec2::new(0.0, h),
        ],
    );
    let line = Line::new(Vec2::new(x, y + h), Vec2::new(x + w, y + h / 2.0));
    let edges = EdgeSet {
        bottom: EdgeKind::Interesting,
        right: EdgeKind::Interesting,
        ..EdgeSet::default()
    };
    TileSlope::new(kind, polygon, Some(line), edges, Some(Vec2::new(SLOPE_22_X, SLOPE_22_Y)))
}

/// The shallow half of a 22.5 degree ceiling slope dropping right to left.
pub fn quarter_top_right_low(kind: SlopeType, x: f32, y: f32, w: f32, h: f32) -> TileSlope {
    let polygon = polygon(
        x,
        y,
        vec![Vec2::new(0.0, 0.0), Vec2::new(w, 0.0), Vec2::new(w, h / 2.0)],
    );
    let line = Line::new(Vec2::new(x, y), Vec2::new(x + w, y + h / 2.0));
    let edges = EdgeSet {
        bottom: EdgeKind::Interesting,
        left: EdgeKind::Interesting,
        right: EdgeKind::Interesting,
        ..EdgeSet::default()
    };
    TileSlope::new(kind, polygon, Some(line), edges, Some(Vec2::new(-SLOPE_22_X, SLOPE_22_Y)))
}

/// The steep half of a 22.5 degree ceiling slope dropping right to left.
pub fn quarter_top_right_high(kind: SlopeType, x: f32, y: f32, w: f32, h: f32) -> TileSlope {
    let polygon = polygon(
        x,
        y,
        vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(w, 0.0),
            Vec2::new(w, h),
            Vec2::new(0.0, h / 2.0),
        ],
    );
    let line = Line::new(Vec2::new(x, y + h / 2.0), Vec2::new(x + w, y + h));
    let edges = EdgeSet {
        bottom: EdgeKind::Interesting,
        left: EdgeKind::Interesting,
        ..EdgeSet::default()
    };
    TileSlope::new(kind, polygon, Some(line), edges, Some(Vec2::new(-SLOPE_22_X, SLOPE_22_Y)))
}
