//! SAT collision solver for bodies against sloped tiles.
//!
//! The solver runs the narrow phase, separates the body out of the tile,
//! applies bounce and friction to its velocity and updates its contact
//! flags. Separation can be vetoed by tile edge flags, restraint rules and
//! collision callbacks before the body is ever moved.

use glam::Vec2;

use crate::body::Body;
use crate::geometry::{is_separating_axis, test_polygon_polygon, Response};
use crate::restrain::SatRestrainer;
use crate::slope::EdgeKind;
use crate::tilemap::{Tile, TileLayer};

/// Identifies the solver a tile resolves with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SolverKind {
    #[default]
    Sat,
}

/// Behaviour switches for the SAT solver.
#[derive(Debug, Clone, Copy)]
pub struct SolverConfig {
    /// Resolve sloped contacts along Y only when the body moves into them.
    pub prefer_y: bool,
    /// Run restraint rules before separating.
    pub restrain: bool,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            prefer_y: false,
            restrain: true,
        }
    }
}

/// Separates bodies from sloped tiles using the separating axis theorem.
pub struct SatSolver {
    config: SolverConfig,
}

impl SatSolver {
    pub fn new(config: SolverConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Collide a body against a single tile, separating it and applying
    /// velocity changes when an overlap is found.
    ///
    /// With `overlap_only` the body is left untouched and the return value
    /// just reports whether the shapes overlap.
    pub fn collide(
        &self,
        restrainer: &SatRestrainer,
        body: &mut Body,
        tile: &Tile,
        layer: &TileLayer,
        overlap_only: bool,
    ) -> bool {
        if !body.enabled {
            return false;
        }
        let slope = match &tile.slope {
            Some(slope) => slope,
            None => return false,
        };

        // Tile polygons are positioned in world space when they are built,
        // so only the body polygon needs its position refreshed.
        match body.polygon.as_mut() {
            Some(polygon) => polygon.pos = body.position,
            None => return false,
        }

        let mut response = Response::new();
        let body_polygon = match &body.polygon {
            Some(polygon) => polygon,
            None => return false,
        };
        if !test_polygon_polygon(body_polygon, &slope.polygon, &mut response) {
            return false;
        }

        if overlap_only {
            return true;
        }

        // Cache the raw overlap, pointing into the tile
        body.overlap = response.overlap_v;

        // Flip the response so it faces out of the tile
        prepare_response(&mut response);
        body.slopes.last_response = Some(response.clone());

        if !self.should_separate(restrainer, body, tile, layer, &response) {
            return false;
        }
        if !self.separate(body, tile, layer, &response) {
            return false;
        }

        self.apply_velocity(body, tile, &response);
        update_flags(body, &response);

        true
    }

    /// Collide a body against a tile along a single fixed axis.
    ///
    /// Used by restraint rules to re-resolve a collision along a slope's
    /// preferred axis. Edge flags and restraint gating are skipped, but
    /// collision callbacks still run and can veto the separation.
    pub fn collide_on_axis(
        &self,
        body: &mut Body,
        tile: &Tile,
        layer: &TileLayer,
        axis: Vec2,
    ) -> bool {
        if !body.enabled {
            return false;
        }
        let slope = match &tile.slope {
            Some(slope) => slope,
            None => return false,
        };

        match body.polygon.as_mut() {
            Some(polygon) => polygon.pos = body.position,
            None => return false,
        }

        let mut response = Response::new();
        let body_polygon = match &body.polygon {
            Some(polygon) => polygon,
            None => return false,
        };
        let separating = is_separating_axis(
            body_polygon.pos,
            slope.polygon.pos,
            body_polygon.calc_points(),
            slope.polygon.calc_points(),
            axis,
            &mut response,
        );
        if separating {
            return false;
        }
        response.overlap_v = response.overlap_n * response.overlap;

        prepare_response(&mut response);

        // Separation is forced here; edge flags and restraints never apply
        // on a fixed axis, but callbacks still can
        if !self.separate(body, tile, layer, &response) {
            return false;
        }

        self.apply_velocity(body, tile, &response);
        update_flags(body, &response);

        true
    }

    /// Snapping was retired; separation plus pull covers its use cases.
    /// Kept so callers with snap distances configured still resolve.
    pub fn snap(&self, _body: &mut Body, _tiles: &[&Tile]) -> bool {
        false
    }

    fn separate(
        &self,
        body: &mut Body,
        tile: &Tile,
        layer: &TileLayer,
        response: &Response,
    ) -> bool {
        // Tile callbacks take priority over layer level callbacks
        if let Some(callback) = &tile.collision_callback {
            if !callback(body, tile) {
                return false;
            }
        } else if let Some(callback) = layer.callback_for(tile.index) {
            if !callback(body, tile) {
                return false;
            }
        }

        if self.should_prefer_y(body, response) {
            body.position.y += minimum_offset_y(response.overlap_v);
        } else {
            body.position += response.overlap_v;
        }

        true
    }

    fn should_separate(
        &self,
        restrainer: &SatRestrainer,
        body: &mut Body,
        tile: &Tile,
        layer: &TileLayer,
        response: &Response,
    ) -> bool {
        if !body.enabled || response.overlap == 0.0 {
            return false;
        }

        let slope = match &tile.slope {
            Some(slope) => slope,
            None => return false,
        };

        // Edges flagged empty by neighbour comparison never separate along
        // their own axis
        let n = response.overlap_n;
        if slope.edges.top == EdgeKind::Empty && n.y < 0.0 && n.x == 0.0 {
            return false;
        }
        if slope.edges.bottom == EdgeKind::Empty && n.y > 0.0 && n.x == 0.0 {
            return false;
        }
        if slope.edges.left == EdgeKind::Empty && n.x < 0.0 && n.y == 0.0 {
            return false;
        }
        if slope.edges.right == EdgeKind::Empty && n.x > 0.0 && n.y == 0.0 {
            return false;
        }

        if !self.config.restrain {
            return true;
        }

        restrainer.restrain(self, body, tile, layer, response)
    }

    fn should_prefer_y(&self, body: &Body, response: &Response) -> bool {
        (self.config.prefer_y || body.slopes.prefer_y)
            && response.overlap_v.y != 0.0
            && response.overlap_v.x != 0.0
            && moving_against_y(body, response)
    }

    fn apply_velocity(&self, body: &mut Body, tile: &Tile, response: &Response) {
        let velocity = body.velocity;
        body.slopes.velocity = velocity;

        // Split velocity into the normal component (bounce) and the
        // surface component (friction)
        let n = response.overlap_n;
        let bounce = n * velocity.dot(n);
        let friction = velocity - bounce;

        let bounce = bounce * -body.bounce;

        let friction = if body.slopes.skip_friction {
            friction
        } else {
            let tile_friction = match &tile.slope {
                Some(slope) => slope.friction,
                None => Vec2::ZERO,
            };
            Vec2::new(
                friction.x * (1.0 - body.slopes.friction.x - tile_friction.x),
                friction.y * (1.0 - body.slopes.friction.y - tile_friction.y),
            )
        };

        body.velocity = bounce + friction;

        self.pull(body, response);
    }

    /// Accelerate the body into the surface it collided with. The first
    /// configured direction that matches the collision wins.
    fn pull(&self, body: &mut Body, response: &Response) -> bool {
        let slopes = &body.slopes;
        if slopes.pull_up == 0.0
            && slopes.pull_down == 0.0
            && slopes.pull_left == 0.0
            && slopes.pull_right == 0.0
        {
            return false;
        }

        let pull_up = slopes.pull_up;
        let pull_down = slopes.pull_down;
        let pull_left = slopes.pull_left;
        let pull_right = slopes.pull_right;

        // Flip the normal so it faces into the collision
        let n = -response.overlap_n;

        if pull_up != 0.0 && n.y < 0.0 {
            body.velocity += n * pull_up;
            return true;
        }
        if pull_down != 0.0 && n.y > 0.0 {
            body.velocity += n * pull_down;
            return true;
        }
        if pull_left != 0.0 && n.x < 0.0 {
            body.velocity += n * pull_left;
            return true;
        }
        if pull_right != 0.0 && n.x > 0.0 {
            body.velocity += n * pull_right;
            return true;
        }

        false
    }
}

impl Default for SatSolver {
    fn default() -> Self {
        Self::new(SolverConfig::default())
    }
}

/// Flip a response in place so its overlap faces out of the tile.
fn prepare_response(response: &mut Response) {
    response.overlap_v = -response.overlap_v;
    response.overlap_n = -response.overlap_n;
}

/// OR the body's touching and blocked flags with a prepared response.
fn update_flags(body: &mut Body, response: &Response) {
    let v = response.overlap_v;

    body.touching.up = body.touching.up || v.y > 0.0;
    body.touching.down = body.touching.down || v.y < 0.0;
    body.touching.left = body.touching.left || v.x > 0.0;
    body.touching.right = body.touching.right || v.x < 0.0;

    body.blocked.up = body.blocked.up || (v.x == 0.0 && v.y > 0.0);
    body.blocked.down = body.blocked.down || (v.x == 0.0 && v.y < 0.0);
    body.blocked.left = body.blocked.left || (v.y == 0.0 && v.x > 0.0);
    body.blocked.right = body.blocked.right || (v.y == 0.0 && v.x < 0.0);
}

/// The Y offset that resolves an overlap vector by vertical movement alone.
fn minimum_offset_y(v: Vec2) -> f32 {
    ((v.x * v.x) / v.y) + v.y
}

/// Whether the body's vertical velocity opposes the overlap vector.
fn moving_against_y(body: &Body, response: &Response) -> bool {
    (response.overlap_v.y < 0.0 && body.velocity.y > 0.0)
        || (response.overlap_v.y > 0.0 && body.velocity.y < 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factory::{SlopeMap, TileSlopeFactory};
    use crate::geometry::Rect;
    use crate::slope::SlopeType;
    use crate::tilemap::TileLayer;

    fn layer_of(
        width: usize,
        height: usize,
        indices: &[i32],
        kind: SlopeType,
    ) -> TileLayer {
        let factory = TileSlopeFactory::new();
        let map = SlopeMap::from_types([(1, kind)]);
        let mut layer = TileLayer::from_indices(width, height, 16.0, 16.0, indices);
        factory.convert_layer(&mut layer, &map);
        layer
    }

    fn enabled_body(x: f32, y: f32, width: f32, height: f32) -> Body {
        let mut body = Body::new(x, y, width, height);
        body.polygon = Some(Rect::new(body.position, width, height).to_polygon());
        body
    }

    fn assert_vec2_near(a: Vec2, b: Vec2) {
        assert!((a - b).length() < 1e-4, "{a:?} != {b:?}");
    }

    #[test]
    fn test_collide_separates_from_full_tile() {
        let layer = layer_of(1, 1, &[1], SlopeType::Full);
        let solver = SatSolver::default();
        let restrainer = SatRestrainer::new();

        // Overlapping the tile's left face by 3
        let mut body = enabled_body(-7.0, 3.0, 10.0, 10.0);
        body.velocity = Vec2::new(50.0, 0.0);

        let tile = layer.tile(0, 0).unwrap();
        assert!(solver.collide(&restrainer, &mut body, tile, &layer, false));

        assert_vec2_near(body.position, Vec2::new(-10.0, 3.0));
        assert_vec2_near(body.velocity, Vec2::ZERO);
        assert!(body.touching.right);
        assert!(body.blocked.right);
        assert!(!body.touching.left);
        assert_vec2_near(body.overlap, Vec2::new(3.0, 0.0));
        assert!(body.slopes.last_response.is_some());
    }

    #[test]
    fn test_collide_rests_on_half_bottom() {
        let layer = layer_of(1, 1, &[1], SlopeType::HalfBottom);
        let solver = SatSolver::default();
        let restrainer = SatRestrainer::new();

        // Solid half spans y 8..16; body bottom dips 1 unit into it
        let mut body = enabled_body(3.0, -1.0, 10.0, 10.0);
        body.velocity = Vec2::new(0.0, 20.0);

        let tile = layer.tile(0, 0).unwrap();
        assert!(solver.collide(&restrainer, &mut body, tile, &layer, false));

        assert_vec2_near(body.position, Vec2::new(3.0, -2.0));
        assert_vec2_near(body.velocity, Vec2::ZERO);
        assert!(body.touching.down);
        assert!(body.blocked.down);
    }

    #[test]
    fn test_overlap_only_reports_without_mutating() {
        let layer = layer_of(1, 1, &[1], SlopeType::Full);
        let solver = SatSolver::default();
        let restrainer = SatRestrainer::new();

        let mut body = enabled_body(-7.0, 3.0, 10.0, 10.0);
        let tile = layer.tile(0, 0).unwrap();

        assert!(solver.collide(&restrainer, &mut body, tile, &layer, true));
        assert_eq!(body.position, Vec2::new(-7.0, 3.0));
        assert!(body.slopes.last_response.is_none());

        // No overlap at all
        let mut far = enabled_body(100.0, 100.0, 10.0, 10.0);
        assert!(!solver.collide(&restrainer, &mut far, tile, &layer, true));
    }

    #[test]
    fn test_disabled_body_never_collides() {
        let layer = layer_of(1, 1, &[1], SlopeType::Full);
        let solver = SatSolver::default();
        let restrainer = SatRestrainer::new();

        let mut body = enabled_body(-7.0, 3.0, 10.0, 10.0);
        body.enabled = false;

        let tile = layer.tile(0, 0).unwrap();
        assert!(!solver.collide(&restrainer, &mut body, tile, &layer, false));
    }

    #[test]
    fn test_empty_edge_rejects_separation() {
        // Two stacked full tiles share an edge, which collapses to empty
        let layer = layer_of(1, 2, &[1, 1], SlopeType::Full);
        let solver = SatSolver::default();
        let restrainer = SatRestrainer::new();

        // Dips 1 unit into the lower tile's hidden top face
        let mut body = enabled_body(3.0, 7.0, 10.0, 10.0);
        body.velocity = Vec2::new(0.0, 20.0);

        let tile = layer.tile(0, 1).unwrap();
        assert!(!solver.collide(&restrainer, &mut body, tile, &layer, false));
        assert_eq!(body.position, Vec2::new(3.0, 7.0));
        assert_eq!(body.velocity, Vec2::new(0.0, 20.0));
        assert_eq!(body.touching, crate::body::Sides::default());
    }

    #[test]
    fn test_tile_callback_vetoes_separation() {
        let factory = TileSlopeFactory::new();
        let map = SlopeMap::from_types([(1, SlopeType::Full)]);
        let mut layer = TileLayer::from_indices(1, 1, 16.0, 16.0, &[1]);
        factory.convert_layer(&mut layer, &map);
        if let Some(tile) = layer.tile_mut(0, 0) {
            tile.collision_callback = Some(Box::new(|_, _| false));
        }

        let solver = SatSolver::default();
        let restrainer = SatRestrainer::new();
        let mut body = enabled_body(-7.0, 3.0, 10.0, 10.0);

        let tile = layer.tile(0, 0).unwrap();
        assert!(!solver.collide(&restrainer, &mut body, tile, &layer, false));
        assert_eq!(body.position, Vec2::new(-7.0, 3.0));
    }

    #[test]
    fn test_layer_callback_vetoes_separation() {
        let factory = TileSlopeFactory::new();
        let map = SlopeMap::from_types([(1, SlopeType::Full)]);
        let mut layer = TileLayer::from_indices(1, 1, 16.0, 16.0, &[1]);
        factory.convert_layer(&mut layer, &map);
        layer.set_collision_callback(1, Box::new(|_, _| false));

        let solver = SatSolver::default();
        let restrainer = SatRestrainer::new();
        let mut body = enabled_body(-7.0, 3.0, 10.0, 10.0);

        let tile = layer.tile(0, 0).unwrap();
        assert!(!solver.collide(&restrainer, &mut body, tile, &layer, false));
        assert_eq!(body.position, Vec2::new(-7.0, 3.0));
    }

    #[test]
    fn test_prefer_y_resolves_slope_contact_vertically() {
        let layer = layer_of(1, 1, &[1], SlopeType::HalfBottomLeft);
        let solver = SatSolver::new(SolverConfig {
            prefer_y: true,
            restrain: true,
        });
        let restrainer = SatRestrainer::new();

        // Straddling the hypotenuse while falling
        let mut body = enabled_body(8.0, 3.0, 10.0, 10.0);
        body.velocity = Vec2::new(0.0, 5.0);

        let tile = layer.tile(0, 0).unwrap();
        assert!(solver.collide(&restrainer, &mut body, tile, &layer, false));

        // Resolved straight up; x stays put
        assert_vec2_near(body.position, Vec2::new(8.0, -2.0));
    }

    #[test]
    fn test_diagonal_contact_resolves_along_normal_by_default() {
        let layer = layer_of(1, 1, &[1], SlopeType::HalfBottomLeft);
        let solver = SatSolver::default();
        let restrainer = SatRestrainer::new();

        let mut body = enabled_body(8.0, 3.0, 10.0, 10.0);

        let tile = layer.tile(0, 0).unwrap();
        assert!(solver.collide(&restrainer, &mut body, tile, &layer, false));

        assert_vec2_near(body.position, Vec2::new(10.5, 0.5));
    }

    #[test]
    fn test_collide_on_axis_separates_along_given_axis() {
        let layer = layer_of(1, 1, &[1], SlopeType::HalfBottomLeft);
        let solver = SatSolver::default();

        let mut body = enabled_body(8.0, 3.0, 10.0, 10.0);
        let tile = layer.tile(0, 0).unwrap();
        let axis = tile.slope.as_ref().unwrap().axis.unwrap();

        assert!(solver.collide_on_axis(&mut body, tile, &layer, axis));
        assert_vec2_near(body.position, Vec2::new(10.5, 0.5));

        // Well clear of the slope the axis separates
        body.position = Vec2::new(40.0, 3.0);
        assert!(!solver.collide_on_axis(&mut body, tile, &layer, axis));
    }

    #[test]
    fn test_bounce_reflects_normal_velocity() {
        let layer = layer_of(1, 1, &[1], SlopeType::Full);
        let solver = SatSolver::default();
        let restrainer = SatRestrainer::new();

        let mut body = enabled_body(3.0, -9.0, 10.0, 10.0);
        body.velocity = Vec2::new(4.0, 10.0);
        body.bounce = Vec2::new(0.0, 0.5);

        let tile = layer.tile(0, 0).unwrap();
        assert!(solver.collide(&restrainer, &mut body, tile, &layer, false));

        // Tangential velocity kept, normal velocity halved and reflected
        assert_vec2_near(body.velocity, Vec2::new(4.0, -5.0));
        assert!(body.touching.down);
    }

    #[test]
    fn test_friction_scales_surface_velocity() {
        let layer = layer_of(1, 1, &[1], SlopeType::Full);
        let solver = SatSolver::default();
        let restrainer = SatRestrainer::new();

        let mut body = enabled_body(3.0, -9.0, 10.0, 10.0);
        body.velocity = Vec2::new(4.0, 10.0);
        body.slopes.friction = Vec2::new(0.25, 0.0);

        let tile = layer.tile(0, 0).unwrap();
        assert!(solver.collide(&restrainer, &mut body, tile, &layer, false));
        assert_vec2_near(body.velocity, Vec2::new(3.0, 0.0));

        // And skipped entirely on request
        let mut slick = enabled_body(3.0, -9.0, 10.0, 10.0);
        slick.velocity = Vec2::new(4.0, 10.0);
        slick.slopes.friction = Vec2::new(0.25, 0.0);
        slick.slopes.skip_friction = true;
        assert!(solver.collide(&restrainer, &mut slick, tile, &layer, false));
        assert_vec2_near(slick.velocity, Vec2::new(4.0, 0.0));
    }

    #[test]
    fn test_pull_accelerates_into_surface() {
        let layer = layer_of(1, 1, &[1], SlopeType::Full);
        let solver = SatSolver::default();
        let restrainer = SatRestrainer::new();

        // Resting on top of the tile, pulled back down into it
        let mut body = enabled_body(3.0, -9.0, 10.0, 10.0);
        body.velocity = Vec2::new(0.0, 10.0);
        body.slopes.pull_down = 2.0;

        let tile = layer.tile(0, 0).unwrap();
        assert!(solver.collide(&restrainer, &mut body, tile, &layer, false));

        // Normal velocity zeroed, then pulled along the flipped normal
        assert_vec2_near(body.velocity, Vec2::new(0.0, 2.0));
    }

    #[test]
    fn test_snap_is_inert() {
        let layer = layer_of(1, 1, &[1], SlopeType::Full);
        let solver = SatSolver::default();

        let mut body = enabled_body(0.0, -30.0, 10.0, 10.0);
        body.slopes.snap_down = 8.0;

        let tile = layer.tile(0, 0).unwrap();
        assert!(!solver.snap(&mut body, &[tile]));
        assert_eq!(body.position, Vec2::new(0.0, -30.0));
    }

    #[test]
    fn test_minimum_offset_y() {
        assert_eq!(minimum_offset_y(Vec2::new(2.0, -2.0)), -4.0);
        assert_eq!(minimum_offset_y(Vec2::new(0.0, -3.0)), -3.0);
    }

    #[test]
    fn test_adjacent_tiles_do_not_snag() {
        // Two bottom halves in a row; running along them must not produce
        // a horizontal push at the seam
        let layer = layer_of(2, 1, &[1, 1], SlopeType::HalfBottom);
        let solver = SatSolver::default();
        let restrainer = SatRestrainer::new();

        let mut body = enabled_body(8.0, 9.0, 10.0, 10.0);
        body.velocity = Vec2::new(30.0, 0.0);

        let tile = layer.tile(1, 0).unwrap();
        assert!(!solver.collide(&restrainer, &mut body, tile, &layer, false));
        assert_eq!(body.position, Vec2::new(8.0, 9.0));
        assert_eq!(body.velocity, Vec2::new(30.0, 0.0));
    }
}
