//! Restraint rules that stop bodies snagging on hidden internal edges.
//!
//! When sloped tiles meet, the seam between them produces collision normals
//! that would shove a moving body sideways or stall it on a surface it
//! should glide across. Each slope type carries an ordered list of rules
//! matched against the colliding normal and the neighbouring tile's type;
//! the first match suppresses the pending separation, optionally
//! re-resolving the collision along the tile's preferred axis instead.

use std::collections::HashMap;

use crate::body::Body;
use crate::geometry::Response;
use crate::slope::SlopeType;
use crate::solver::SatSolver;
use crate::tilemap::{Direction8, Tile, TileLayer};

/// Constraint on one component of the collision normal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OverlapBound {
    Exact(f32),
    /// Inclusive range.
    Range(f32, f32),
}

impl OverlapBound {
    fn matches(self, value: f32) -> bool {
        match self {
            OverlapBound::Exact(expected) => value == expected,
            OverlapBound::Range(lo, hi) => value >= lo && value <= hi,
        }
    }
}

/// What a matched rule does about separation.
#[derive(Debug, Clone, Copy)]
pub enum SeparateRule {
    /// Re-resolve along the tile's preferred axis.
    Always,
    /// Suppress the collision entirely.
    Never,
    /// Re-resolve only when the predicate holds for this body and tile.
    When(fn(&Body, &Tile) -> bool),
}

/// A single restraint, matched in declaration order. First match wins.
#[derive(Debug, Clone)]
pub struct Rule {
    /// Which neighbour the rule inspects.
    pub neighbour: Direction8,
    pub overlap_x: Option<OverlapBound>,
    pub overlap_y: Option<OverlapBound>,
    /// Neighbour slope types the rule applies to. Empty means "the same
    /// type as the colliding tile".
    pub types: Vec<SlopeType>,
    pub separate: SeparateRule,
}

/// Shorthand for the push direction a rule matches, expanded into normal
/// component bounds when the table is built.
#[derive(Debug, Clone, Copy)]
enum Heading {
    Up,
    Down,
    Left,
    Right,
}

fn rule(
    heading: Heading,
    neighbour: Direction8,
    types: Vec<SlopeType>,
    separate: SeparateRule,
) -> Rule {
    let (overlap_x, overlap_y) = match heading {
        Heading::Up => (OverlapBound::Exact(0.0), OverlapBound::Range(-1.0, 0.0)),
        Heading::Down => (OverlapBound::Exact(0.0), OverlapBound::Range(0.0, 1.0)),
        Heading::Left => (OverlapBound::Range(-1.0, 0.0), OverlapBound::Exact(0.0)),
        Heading::Right => (OverlapBound::Range(0.0, 1.0), OverlapBound::Exact(0.0)),
    };
    Rule {
        neighbour,
        overlap_x: Some(overlap_x),
        overlap_y: Some(overlap_y),
        types,
        separate,
    }
}

/// Named vertex positions on the unit tile, used to describe which
/// neighbour shapes a rule cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VertexLocation {
    Top,
    Bottom,
    Left,
    Right,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

fn vertices(location: VertexLocation) -> &'static [SlopeType] {
    use crate::slope::SlopeType::*;
    match location {
        VertexLocation::Top => &[
            HalfLeft,
            HalfRight,
            QuarterLeftTopLow,
            QuarterRightTopLow,
            QuarterLeftBottomLow,
            QuarterRightBottomLow,
        ],
        VertexLocation::Bottom => &[
            HalfLeft,
            HalfRight,
            QuarterLeftTopHigh,
            QuarterLeftBottomHigh,
            QuarterRightTopHigh,
            QuarterRightBottomHigh,
        ],
        VertexLocation::Left => &[
            HalfTop,
            HalfBottom,
            QuarterTopLeftLow,
            QuarterTopRightHigh,
            QuarterBottomLeftLow,
            QuarterBottomRightHigh,
        ],
        VertexLocation::Right => &[
            HalfTop,
            HalfBottom,
            QuarterTopLeftHigh,
            QuarterTopRightLow,
            QuarterBottomLeftHigh,
            QuarterBottomRightLow,
        ],
        VertexLocation::TopLeft => &[
            Full,
            HalfTop,
            HalfLeft,
            HalfTopLeft,
            HalfTopRight,
            HalfBottomLeft,
            QuarterTopLeftLow,
            QuarterTopLeftHigh,
            QuarterTopRightHigh,
            QuarterBottomLeftHigh,
            QuarterLeftTopLow,
            QuarterLeftTopHigh,
            QuarterLeftBottomLow,
            QuarterLeftBottomHigh,
            QuarterRightTopHigh,
        ],
        VertexLocation::TopRight => &[
            Full,
            HalfTop,
            HalfRight,
            HalfTopLeft,
            HalfTopRight,
            HalfBottomRight,
            QuarterTopLeftLow,
            QuarterTopLeftHigh,
            QuarterTopRightLow,
            QuarterTopRightHigh,
            QuarterBottomRightHigh,
            QuarterLeftTopHigh,
            QuarterRightTopLow,
            QuarterRightTopHigh,
            QuarterRightBottomLow,
            QuarterRightBottomHigh,
        ],
        VertexLocation::BottomLeft => &[
            Full,
            HalfLeft,
            HalfBottom,
            HalfTopLeft,
            HalfBottomLeft,
            HalfBottomRight,
            QuarterTopLeftHigh,
            QuarterBottomLeftLow,
            QuarterBottomLeftHigh,
            QuarterBottomRightLow,
            QuarterBottomRightHigh,
            QuarterLeftTopHigh,
            QuarterLeftBottomLow,
            QuarterLeftBottomHigh,
            QuarterRightBottomLow,
        ],
        VertexLocation::BottomRight => &[
            Full,
            HalfRight,
            HalfBottom,
            HalfTopRight,
            HalfBottomLeft,
            HalfBottomRight,
            QuarterTopRightHigh,
            QuarterBottomLeftLow,
            QuarterBottomLeftHigh,
            QuarterBottomRightLow,
            QuarterBottomRightHigh,
            QuarterLeftBottomLow,
            QuarterRightTopHigh,
            QuarterRightBottomLow,
            QuarterRightBottomHigh,
        ],
    }
}

/// Slope types that have a vertex at every one of the given locations.
pub fn resolve(locations: &[VertexLocation]) -> Vec<SlopeType> {
    let mut iter = locations.iter();
    let first = match iter.next() {
        Some(location) => vertices(*location),
        None => return Vec::new(),
    };
    let mut result = first.to_vec();
    for location in iter {
        let set = vertices(*location);
        result.retain(|kind| set.contains(kind));
    }
    result
}

/// Holds the per-type restraint tables and applies them to collisions.
pub struct SatRestrainer {
    restraints: HashMap<SlopeType, Vec<Rule>>,
}

impl SatRestrainer {
    pub fn new() -> Self {
        Self {
            restraints: default_restraints(),
        }
    }

    /// The rules registered for a slope type, in matching order.
    pub fn rules_for(&self, kind: SlopeType) -> Option<&[Rule]> {
        self.restraints.get(&kind).map(Vec::as_slice)
    }

    /// Replace the rules for a slope type.
    pub fn set_rules(&mut self, kind: SlopeType, rules: Vec<Rule>) {
        self.restraints.insert(kind, rules);
    }

    /// Decide whether the pending separation should go ahead.
    ///
    /// Returns true to allow it. Returns false when a rule matched: the
    /// collision has either been suppressed, or already dealt with by
    /// re-resolving along the tile's preferred axis. Expects the prepared
    /// response, with the normal facing out of the tile.
    pub fn restrain(
        &self,
        solver: &SatSolver,
        body: &mut Body,
        tile: &Tile,
        layer: &TileLayer,
        response: &Response,
    ) -> bool {
        let slope = match &tile.slope {
            Some(slope) => slope,
            None => return true,
        };
        let rules = match self.restraints.get(&slope.kind) {
            Some(rules) => rules,
            None => return true,
        };
        if response.overlap == 0.0 {
            return true;
        }

        for rule in rules {
            let coords = match tile.neighbours.get(rule.neighbour) {
                Some(coords) => coords,
                None => continue,
            };
            let neighbour = match layer.tile(coords.0, coords.1) {
                Some(tile) => tile,
                None => continue,
            };
            let neighbour_slope = match &neighbour.slope {
                Some(slope) => slope,
                None => continue,
            };

            let type_matches = if rule.types.is_empty() {
                neighbour_slope.kind == slope.kind
            } else {
                rule.types.contains(&neighbour_slope.kind)
            };
            if !type_matches {
                continue;
            }

            if let Some(bound) = rule.overlap_x {
                if !bound.matches(response.overlap_n.x) {
                    continue;
                }
            }
            if let Some(bound) = rule.overlap_y {
                if !bound.matches(response.overlap_n.y) {
                    continue;
                }
            }

            let separate = match rule.separate {
                SeparateRule::Always => true,
                SeparateRule::Never => false,
                SeparateRule::When(predicate) => predicate(body, tile),
            };

            if separate {
                if let Some(axis) = slope.axis {
                    solver.collide_on_axis(body, tile, layer, axis);
                }
            }

            return false;
        }

        true
    }
}

impl Default for SatRestrainer {
    fn default() -> Self {
        Self::new()
    }
}

fn body_bottom_above_tile_bottom(body: &Body, tile: &Tile) -> bool {
    body.bottom() < tile.bottom()
}

fn body_left_inside_tile(body: &Body, tile: &Tile) -> bool {
    body.left() > tile.left()
}

fn body_right_inside_tile(body: &Body, tile: &Tile) -> bool {
    body.right() < tile.right()
}

fn body_top_below_tile_top(body: &Body, tile: &Tile) -> bool {
    body.top() > tile.top()
}

fn default_restraints() -> HashMap<SlopeType, Vec<Rule>> {
    use self::Heading as H;
    use self::SeparateRule::{Always, Never, When};
    use self::VertexLocation as V;
    use crate::tilemap::Direction8 as N;

    let mut restraints = HashMap::new();

    restraints.insert(
        SlopeType::HalfTop,
        vec![
            rule(H::Left, N::Left, resolve(&[V::TopRight, V::Right]), Never),
            rule(H::Right, N::Right, resolve(&[V::TopLeft, V::Left]), Never),
        ],
    );

    restraints.insert(
        SlopeType::HalfBottom,
        vec![
            rule(H::Left, N::Left, resolve(&[V::Right, V::BottomRight]), Never),
            rule(H::Right, N::Right, resolve(&[V::Left, V::BottomLeft]), Never),
        ],
    );

    restraints.insert(
        SlopeType::HalfLeft,
        vec![
            rule(H::Up, N::Above, resolve(&[V::BottomLeft, V::Bottom]), Never),
            rule(H::Down, N::Below, resolve(&[V::TopLeft, V::Top]), Never),
        ],
    );

    restraints.insert(
        SlopeType::HalfRight,
        vec![
            rule(H::Up, N::Above, resolve(&[V::Bottom, V::BottomRight]), Never),
            rule(H::Down, N::Below, resolve(&[V::Top, V::TopRight]), Never),
        ],
    );

    restraints.insert(
        SlopeType::HalfBottomLeft,
        vec![
            rule(H::Right, N::BottomRight, resolve(&[V::TopLeft]), Always),
            rule(H::Up, N::TopLeft, resolve(&[V::BottomRight]), Always),
        ],
    );

    restraints.insert(
        SlopeType::HalfBottomRight,
        vec![
            rule(H::Left, N::BottomLeft, resolve(&[V::TopRight]), Always),
            rule(H::Up, N::TopRight, resolve(&[V::BottomLeft]), Always),
        ],
    );

    restraints.insert(
        SlopeType::HalfTopLeft,
        vec![
            rule(H::Right, N::TopRight, resolve(&[V::BottomLeft]), Always),
            rule(H::Down, N::BottomLeft, resolve(&[V::TopRight]), Always),
        ],
    );

    restraints.insert(
        SlopeType::HalfTopRight,
        vec![
            rule(H::Left, N::TopLeft, resolve(&[V::BottomRight]), Always),
            rule(H::Down, N::BottomRight, resolve(&[V::TopLeft]), Always),
        ],
    );

    restraints.insert(
        SlopeType::QuarterBottomLeftLow,
        vec![
            rule(H::Right, N::BottomRight, resolve(&[V::TopLeft]), Always),
            rule(
                H::Up,
                N::Left,
                resolve(&[V::TopLeft, V::Right, V::BottomRight]),
                Always,
            ),
            rule(H::Left, N::Left, resolve(&[V::Right, V::BottomRight]), Never),
        ],
    );

    restraints.insert(
        SlopeType::QuarterBottomLeftHigh,
        vec![
            rule(
                H::Right,
                N::Right,
                resolve(&[V::Left, V::BottomLeft]),
                When(body_bottom_above_tile_bottom),
            ),
            rule(H::Up, N::TopLeft, resolve(&[V::BottomRight]), Always),
        ],
    );

    restraints.insert(
        SlopeType::QuarterBottomRightLow,
        vec![
            rule(H::Left, N::BottomLeft, resolve(&[V::TopRight]), Always),
            rule(
                H::Up,
                N::Right,
                resolve(&[V::TopRight, V::Left, V::BottomLeft]),
                Always,
            ),
            rule(H::Right, N::Right, resolve(&[V::Left, V::BottomLeft]), Never),
        ],
    );

    restraints.insert(
        SlopeType::QuarterBottomRightHigh,
        vec![
            rule(
                H::Left,
                N::Left,
                resolve(&[V::Right, V::BottomRight]),
                When(body_bottom_above_tile_bottom),
            ),
            rule(H::Up, N::TopRight, resolve(&[V::BottomLeft]), Always),
        ],
    );

    restraints.insert(
        SlopeType::QuarterLeftBottomLow,
        vec![
            rule(
                H::Up,
                N::Above,
                resolve(&[V::TopLeft, V::Left]),
                When(body_left_inside_tile),
            ),
            rule(H::Right, N::BottomRight, resolve(&[V::TopLeft]), Always),
        ],
    );

    restraints.insert(
        SlopeType::QuarterLeftBottomHigh,
        vec![
            rule(H::Up, N::TopLeft, resolve(&[V::BottomRight]), Always),
            rule(H::Down, N::Below, resolve(&[V::TopLeft, V::Top]), Never),
            rule(
                H::Right,
                N::Below,
                resolve(&[V::TopLeft, V::Top, V::BottomRight]),
                Always,
            ),
        ],
    );

    restraints.insert(
        SlopeType::QuarterRightBottomLow,
        vec![
            rule(
                H::Up,
                N::Above,
                resolve(&[V::Bottom, V::BottomRight]),
                When(body_right_inside_tile),
            ),
            rule(H::Left, N::BottomLeft, resolve(&[V::TopRight]), Always),
        ],
    );

    restraints.insert(
        SlopeType::QuarterRightBottomHigh,
        vec![
            rule(H::Up, N::TopRight, resolve(&[V::BottomLeft]), Always),
            rule(H::Down, N::Below, resolve(&[V::Top, V::TopRight]), Never),
            rule(
                H::Left,
                N::Below,
                resolve(&[V::Top, V::TopRight, V::BottomLeft]),
                Always,
            ),
        ],
    );

    restraints.insert(
        SlopeType::QuarterLeftTopLow,
        vec![
            rule(H::Up, N::Above, resolve(&[V::BottomLeft, V::Bottom]), Always),
            rule(H::Right, N::Above, resolve(&[V::BottomLeft, V::Bottom]), Never),
            rule(H::Down, N::BottomLeft, resolve(&[V::TopRight]), Always),
        ],
    );

    restraints.insert(
        SlopeType::QuarterLeftTopHigh,
        vec![
            rule(H::Right, N::TopRight, resolve(&[V::BottomLeft]), Always),
            rule(
                H::Down,
                N::Below,
                resolve(&[V::TopLeft, V::Top]),
                When(body_left_inside_tile),
            ),
        ],
    );

    restraints.insert(
        SlopeType::QuarterRightTopLow,
        vec![
            rule(H::Up, N::Above, resolve(&[V::Bottom, V::BottomRight]), Always),
            rule(H::Left, N::Above, resolve(&[V::Bottom, V::BottomRight]), Never),
            rule(H::Down, N::BottomRight, resolve(&[V::TopLeft]), Always),
        ],
    );

    restraints.insert(
        SlopeType::QuarterRightTopHigh,
        vec![
            rule(H::Left, N::TopLeft, resolve(&[V::BottomRight]), Always),
            rule(
                H::Down,
                N::Below,
                resolve(&[V::Top, V::TopRight]),
                When(body_right_inside_tile),
            ),
        ],
    );

    restraints.insert(
        SlopeType::QuarterTopLeftLow,
        vec![
            rule(H::Right, N::TopRight, resolve(&[V::BottomLeft]), Always),
            rule(H::Left, N::Left, resolve(&[V::TopRight, V::Right]), Never),
            rule(
                H::Down,
                N::Left,
                resolve(&[V::BottomLeft, V::TopRight, V::Right]),
                Always,
            ),
        ],
    );

    restraints.insert(
        SlopeType::QuarterTopLeftHigh,
        vec![
            rule(
                H::Right,
                N::Right,
                resolve(&[V::TopLeft, V::Left]),
                When(body_top_below_tile_top),
            ),
            rule(H::Down, N::BottomLeft, resolve(&[V::TopRight]), Always),
        ],
    );

    restraints.insert(
        SlopeType::QuarterTopRightLow,
        vec![
            rule(H::Left, N::TopLeft, resolve(&[V::BottomRight]), Always),
            rule(H::Right, N::Right, resolve(&[V::TopLeft, V::Left]), Never),
            rule(
                H::Down,
                N::Right,
                resolve(&[V::BottomRight, V::TopLeft, V::Left]),
                Always,
            ),
        ],
    );

    restraints.insert(
        SlopeType::QuarterTopRightHigh,
        vec![
            rule(
                H::Left,
                N::Left,
                resolve(&[V::TopRight, V::Right]),
                When(body_top_below_tile_top),
            ),
            rule(H::Down, N::BottomRight, resolve(&[V::TopLeft]), Always),
        ],
    );

    restraints
}
