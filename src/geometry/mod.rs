//! 2D convex polygon geometry and separating axis tests.
//!
//! The kernel is deliberately small: polygons with cached derived data, a
//! reusable collision [`Response`], and the projection-based SAT routines
//! that everything above is built on.

mod polygon;
mod response;
pub mod sat;

pub use polygon::{Polygon, Rect};
pub use response::Response;
pub use sat::{flatten_points_on, is_separating_axis, test_polygon_polygon};
