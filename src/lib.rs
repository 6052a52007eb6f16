//! Sloped tile collision for AABB bodies in 2D tile worlds.
//!
//! Separates axis-aligned bodies from a catalog of 25 tile shapes using
//! the separating axis theorem, with the neighbour-aware bookkeeping that
//! keeps bodies from snagging on the seams between adjacent tiles.
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! 1. **geometry** - Polygons, SAT tests and collision responses
//! 2. **slope** - The tile shape catalog types and edge flags
//! 3. **catalog** - Builders for every supported shape
//! 4. **tilemap** - Tile grid storage and neighbour lookups
//! 5. **body** - Physics body state for AABB actors
//! 6. **factory** - Attaching slopes, neighbours and edge flags to layers
//! 7. **restrain** - Rules that suppress collisions at tile seams
//! 8. **solver** - Separation, bounce, friction and contact flags
//! 9. **world** - A facade tying the pipeline together

pub mod body;
pub mod catalog;
pub mod factory;
pub mod geometry;
pub mod restrain;
pub mod slope;
pub mod solver;
pub mod tilemap;
pub mod world;

// Re-export commonly used types
pub use body::{Body, Sides, SlopeBodyConfig};
pub use factory::{compare_edges, SlopeError, SlopeMap, TileSlopeFactory};
pub use geometry::{Polygon, Rect, Response};
pub use restrain::{OverlapBound, Rule, SatRestrainer, SeparateRule, VertexLocation};
pub use slope::{EdgeKind, EdgeSet, Line, SlopeType, TileSlope};
pub use solver::{SatSolver, SolverConfig, SolverKind};
pub use tilemap::{CollisionCallback, Direction8, Neighbours, Tile, TileLayer};
pub use world::SlopeWorld;

// Re-export glam for convenience
pub use glam;
