//! High-level facade tying the factory, solver and restrainer together.

use glam::Vec2;

use crate::body::Body;
use crate::factory::{SlopeMap, TileSlopeFactory};
use crate::geometry::Rect;
use crate::restrain::SatRestrainer;
use crate::solver::{SatSolver, SolverConfig, SolverKind};
use crate::tilemap::TileLayer;

/// Owns the pieces of the slope collision pipeline and exposes the
/// typical calls a game loop makes each step.
pub struct SlopeWorld {
    factory: TileSlopeFactory,
    solver: SatSolver,
    restrainer: SatRestrainer,
}

impl SlopeWorld {
    pub fn new(config: SolverConfig) -> Self {
        Self {
            factory: TileSlopeFactory::new(),
            solver: SatSolver::new(config),
            restrainer: SatRestrainer::new(),
        }
    }

    pub fn factory(&self) -> &TileSlopeFactory {
        &self.factory
    }

    /// Mutable access for registering custom slope builders.
    pub fn factory_mut(&mut self) -> &mut TileSlopeFactory {
        &mut self.factory
    }

    pub fn restrainer_mut(&mut self) -> &mut SatRestrainer {
        &mut self.restrainer
    }

    /// Attach a collision polygon to a body so it can collide with slopes.
    pub fn enable(&self, body: &mut Body) {
        body.polygon = Some(Rect::new(body.position, body.width, body.height).to_polygon());
    }

    /// Attach slope shapes, neighbour links and edge flags to a layer.
    pub fn convert_layer(&self, layer: &mut TileLayer, map: &SlopeMap) {
        self.factory.convert_layer(layer, map);
    }

    /// Collide a body against the tile at the given grid coordinates.
    pub fn collide(
        &self,
        body: &mut Body,
        layer: &TileLayer,
        x: usize,
        y: usize,
        overlap_only: bool,
    ) -> bool {
        let tile = match layer.tile(x, y) {
            Some(tile) => tile,
            None => return false,
        };
        let kind = tile
            .slope
            .as_ref()
            .and_then(|slope| slope.solver)
            .unwrap_or_default();
        match kind {
            SolverKind::Sat => {
                self.solver
                    .collide(&self.restrainer, body, tile, layer, overlap_only)
            }
        }
    }

    /// Collide a body against a set of tiles, reporting whether any of
    /// them collided.
    pub fn collide_tiles(
        &self,
        body: &mut Body,
        layer: &TileLayer,
        tiles: &[(usize, usize)],
        overlap_only: bool,
    ) -> bool {
        let mut collided = false;
        for &(x, y) in tiles {
            collided |= self.collide(body, layer, x, y, overlap_only);
        }
        collided
    }

    /// Collide a body against a tile along a fixed axis.
    pub fn collide_on_axis(
        &self,
        body: &mut Body,
        layer: &TileLayer,
        x: usize,
        y: usize,
        axis: Vec2,
    ) -> bool {
        let tile = match layer.tile(x, y) {
            Some(tile) => tile,
            None => return false,
        };
        self.solver.collide_on_axis(body, tile, layer, axis)
    }
}

impl Default for SlopeWorld {
    fn default() -> Self {
        Self::new(SolverConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slope::SlopeType;

    fn world_and_layer(indices: &[i32], width: usize, height: usize) -> (SlopeWorld, TileLayer) {
        let world = SlopeWorld::default();
        let map = SlopeMap::from_types([
            (1, SlopeType::Full),
            (2, SlopeType::HalfBottomRight),
        ]);
        let mut layer = TileLayer::from_indices(width, height, 16.0, 16.0, indices);
        world.convert_layer(&mut layer, &map);
        (world, layer)
    }

    #[test]
    fn test_enable_attaches_polygon() {
        let world = SlopeWorld::default();
        let mut body = Body::new(5.0, 6.0, 10.0, 12.0);
        assert!(body.polygon.is_none());

        world.enable(&mut body);

        let polygon = body.polygon.as_ref().unwrap();
        assert_eq!(polygon.pos, Vec2::new(5.0, 6.0));
        assert_eq!(polygon.points().len(), 4);
    }

    #[test]
    fn test_collide_against_grid_coordinates() {
        let (world, layer) = world_and_layer(&[1], 1, 1);
        let mut body = Body::new(-7.0, 3.0, 10.0, 10.0);
        world.enable(&mut body);

        assert!(world.collide(&mut body, &layer, 0, 0, false));
        assert_eq!(body.position, Vec2::new(-10.0, 3.0));

        // Out of bounds coordinates never collide
        assert!(!world.collide(&mut body, &layer, 5, 5, false));
    }

    #[test]
    fn test_collide_tiles_accumulates() {
        let (world, layer) = world_and_layer(&[1, -1], 2, 1);
        let mut body = Body::new(-7.0, 3.0, 10.0, 10.0);
        world.enable(&mut body);

        // One hit and one empty tile still reports a collision
        assert!(world.collide_tiles(&mut body, &layer, &[(0, 0), (1, 0)], false));
        assert_eq!(body.position, Vec2::new(-10.0, 3.0));
    }

    #[test]
    fn test_body_slides_up_a_slope() {
        // A flat run onto a 45 degree ramp rising to the right
        let (world, layer) = world_and_layer(&[-1, 2, 1], 3, 1);
        let mut body = Body::new(14.0, 2.0, 10.0, 10.0);
        world.enable(&mut body);
        body.velocity = Vec2::new(20.0, 0.0);

        assert!(world.collide(&mut body, &layer, 1, 0, false));

        // Pushed out along the slope normal, with velocity redirected
        // along the surface rather than stopped dead
        assert!((body.position - Vec2::new(12.0, 0.0)).length() < 1e-4);
        assert!(body.touching.down);
        assert!(body.velocity.x > 0.0);
        assert!(body.velocity.y < 0.0);
    }

    #[test]
    fn test_overlap_only_query() {
        let (world, layer) = world_and_layer(&[1], 1, 1);
        let mut body = Body::new(-7.0, 3.0, 10.0, 10.0);
        world.enable(&mut body);

        assert!(world.collide(&mut body, &layer, 0, 0, true));
        assert_eq!(body.position, Vec2::new(-7.0, 3.0));
    }
}
