//! Tile slope shapes and their collision metadata.

use glam::Vec2;

use crate::geometry::Polygon;
use crate::solver::SolverKind;

/// The set of supported tile shapes.
///
/// Numeric codes are stable so that maps authored against the historical
/// constants keep working: `Full` is 0, the 45 degree slopes are 1 to 4,
/// the 22.5 degree quarter slopes are 5 to 20, and the half rectangles are
/// 21 to 24.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlopeType {
    Unknown,
    Full,
    HalfBottomLeft,
    HalfBottomRight,
    HalfTopLeft,
    HalfTopRight,
    QuarterBottomLeftLow,
    QuarterBottomLeftHigh,
    QuarterBottomRightLow,
    QuarterBottomRightHigh,
    QuarterLeftBottomLow,
    QuarterLeftBottomHigh,
    QuarterRightBottomLow,
    QuarterRightBottomHigh,
    QuarterLeftTopLow,
    QuarterLeftTopHigh,
    QuarterRightTopLow,
    QuarterRightTopHigh,
    QuarterTopLeftLow,
    QuarterTopLeftHigh,
    QuarterTopRightLow,
    QuarterTopRightHigh,
    HalfBottom,
    HalfTop,
    HalfLeft,
    HalfRight,
}

impl SlopeType {
    /// Every concrete shape, in code order. Excludes `Unknown`.
    pub const ALL: [SlopeType; 25] = [
        SlopeType::Full,
        SlopeType::HalfBottomLeft,
        SlopeType::HalfBottomRight,
        SlopeType::HalfTopLeft,
        SlopeType::HalfTopRight,
        SlopeType::QuarterBottomLeftLow,
        SlopeType::QuarterBottomLeftHigh,
        SlopeType::QuarterBottomRightLow,
        SlopeType::QuarterBottomRightHigh,
        SlopeType::QuarterLeftBottomLow,
        SlopeType::QuarterLeftBottomHigh,
        SlopeType::QuarterRightBottomLow,
        SlopeType::QuarterRightBottomHigh,
        SlopeType::QuarterLeftTopLow,
        SlopeType::QuarterLeftTopHigh,
        SlopeType::QuarterRightTopLow,
        SlopeType::QuarterRightTopHigh,
        SlopeType::QuarterTopLeftLow,
        SlopeType::QuarterTopLeftHigh,
        SlopeType::QuarterTopRightLow,
        SlopeType::QuarterTopRightHigh,
        SlopeType::HalfBottom,
        SlopeType::HalfTop,
        SlopeType::HalfLeft,
        SlopeType::HalfRight,
    ];

    pub fn code(self) -> i32 {
        match self {
            SlopeType::Unknown => -1,
            SlopeType::Full => 0,
            SlopeType::HalfBottomLeft => 1,
            SlopeType::HalfBottomRight => 2,
            SlopeType::HalfTopLeft => 3,
            SlopeType::HalfTopRight => 4,
            SlopeType::QuarterBottomLeftLow => 5,
            SlopeType::QuarterBottomLeftHigh => 6,
            SlopeType::QuarterBottomRightLow => 7,
            SlopeType::QuarterBottomRightHigh => 8,
            SlopeType::QuarterLeftBottomLow => 9,
            SlopeType::QuarterLeftBottomHigh => 10,
            SlopeType::QuarterRightBottomLow => 11,
            SlopeType::QuarterRightBottomHigh => 12,
            SlopeType::QuarterLeftTopLow => 13,
            SlopeType::QuarterLeftTopHigh => 14,
            SlopeType::QuarterRightTopLow => 15,
            SlopeType::QuarterRightTopHigh => 16,
            SlopeType::QuarterTopLeftLow => 17,
            SlopeType::QuarterTopLeftHigh => 18,
            SlopeType::QuarterTopRightLow => 19,
            SlopeType::QuarterTopRightHigh => 20,
            SlopeType::HalfBottom => 21,
            SlopeType::HalfTop => 22,
            SlopeType::HalfLeft => 23,
            SlopeType::HalfRight => 24,
        }
    }

    /// Look up a shape by its numeric code. Unmatched codes map to `Unknown`.
    pub fn from_code(code: i32) -> Self {
        SlopeType::ALL
            .iter()
            .copied()
            .find(|kind| kind.code() == code)
            .unwrap_or(SlopeType::Unknown)
    }

    pub fn name(self) -> &'static str {
        match self {
            SlopeType::Unknown => "UNKNOWN",
            SlopeType::Full => "FULL",
            SlopeType::HalfBottomLeft => "HALF_BOTTOM_LEFT",
            SlopeType::HalfBottomRight => "HALF_BOTTOM_RIGHT",
            SlopeType::HalfTopLeft => "HALF_TOP_LEFT",
            SlopeType::HalfTopRight => "HALF_TOP_RIGHT",
            SlopeType::QuarterBottomLeftLow => "QUARTER_BOTTOM_LEFT_LOW",
            SlopeType::QuarterBottomLeftHigh => "QUARTER_BOTTOM_LEFT_HIGH",
            SlopeType::QuarterBottomRightLow => "QUARTER_BOTTOM_RIGHT_LOW",
            SlopeType::QuarterBottomRightHigh => "QUARTER_BOTTOM_RIGHT_HIGH",
            SlopeType::QuarterLeftBottomLow => "QUARTER_LEFT_BOTTOM_LOW",
            SlopeType::QuarterLeftBottomHigh => "QUARTER_LEFT_BOTTOM_HIGH",
            SlopeType::QuarterRightBottomLow => "QUARTER_RIGHT_BOTTOM_LOW",
            SlopeType::QuarterRightBottomHigh => "QUARTER_RIGHT_BOTTOM_HIGH",
            SlopeType::QuarterLeftTopLow => "QUARTER_LEFT_TOP_LOW",
            SlopeType::QuarterLeftTopHigh => "QUARTER_LEFT_TOP_HIGH",
            SlopeType::QuarterRightTopLow => "QUARTER_RIGHT_TOP_LOW",
            SlopeType::QuarterRightTopHigh => "QUARTER_RIGHT_TOP_HIGH",
            SlopeType::QuarterTopLeftLow => "QUARTER_TOP_LEFT_LOW",
            SlopeType::QuarterTopLeftHigh => "QUARTER_TOP_LEFT_HIGH",
            SlopeType::QuarterTopRightLow => "QUARTER_TOP_RIGHT_LOW",
            SlopeType::QuarterTopRightHigh => "QUARTER_TOP_RIGHT_HIGH",
            SlopeType::HalfBottom => "HALF_BOTTOM",
            SlopeType::HalfTop => "HALF_TOP",
            SlopeType::HalfLeft => "HALF_LEFT",
            SlopeType::HalfRight => "HALF_RIGHT",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        SlopeType::ALL.iter().copied().find(|kind| kind.name() == name)
    }
}

/// Visibility of a tile edge for collision purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EdgeKind {
    /// Ignored entirely during separation.
    Empty,
    /// A fully solid boundary.
    #[default]
    Solid,
    /// A boundary that neighbour comparison never flags away.
    Interesting,
}

/// Edge visibility for the four sides of a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EdgeSet {
    pub top: EdgeKind,
    pub bottom: EdgeKind,
    pub left: EdgeKind,
    pub right: EdgeKind,
}

/// A line segment along the sloped boundary of a tile, in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    pub start: Vec2,
    pub end: Vec2,
}

impl Line {
    pub fn new(start: Vec2, end: Vec2) -> Self {
        Self { start, end }
    }
}

/// The collision shape attached to a sloped tile.
#[derive(Debug, Clone)]
pub struct TileSlope {
    pub kind: SlopeType,
    /// World-positioned collision polygon.
    pub polygon: Polygon,
    /// The sloped boundary, where the shape has one.
    pub line: Option<Line>,
    pub edges: EdgeSet,
    /// Unit axis a restrained collision is re-resolved along.
    pub axis: Option<Vec2>,
    /// Per-tile friction, combined with the body's own.
    pub friction: Vec2,
    /// Overrides the solver used for this tile.
    pub solver: Option<SolverKind>,
}

impl TileSlope {
    pub fn new(
        kind: SlopeType,
        polygon: Polygon,
        line: Option<Line>,
        edges: EdgeSet,
        axis: Option<Vec2>,
    ) -> Self {
        Self {
            kind,
            polygon,
            line,
            edges,
            axis,
            friction: Vec2::ZERO,
            solver: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_round_trip() {
        for kind in SlopeType::ALL {
            assert_eq!(SlopeType::from_code(kind.code()), kind);
        }
        assert_eq!(SlopeType::from_code(-1), SlopeType::Unknown);
        assert_eq!(SlopeType::from_code(99), SlopeType::Unknown);
    }

    #[test]
    fn test_names_round_trip() {
        for kind in SlopeType::ALL {
            assert_eq!(SlopeType::from_name(kind.name()), Some(kind));
        }
        assert_eq!(SlopeType::from_name("GARBAGE"), None);
        // Unknown is not a nameable shape
        assert_eq!(SlopeType::from_name("UNKNOWN"), None);
    }

    #[test]
    fn test_edges_default_solid() {
        let edges = EdgeSet::default();
        assert_eq!(edges.top, EdgeKind::Solid);
        assert_eq!(edges.bottom, EdgeKind::Solid);
        assert_eq!(edges.left, EdgeKind::Solid);
        assert_eq!(edges.right, EdgeKind::Solid);
    }
}
